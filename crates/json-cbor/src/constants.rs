//! Opcode layout of the wire format.
//!
//! An opcode packs a major type into its top three bits and a length
//! selector into the low five. Selectors 0..=23 carry the argument inline;
//! 24..=27 announce a 1/2/4/8-byte big-endian argument.

pub const NULL: u8 = 0xf6;
pub const FALSE: u8 = 0xf4;
pub const TRUE: u8 = 0xf5;
pub const FLOAT16: u8 = 0xf9;
pub const FLOAT32: u8 = 0xfa;
pub const FLOAT64: u8 = 0xfb;
pub const BREAK: u8 = 0xff;

/// Largest argument stored inline in the opcode.
pub const MAX_INLINE: u64 = 23;

/// Additional-info selector for a one-byte argument; 25, 26 and 27 follow.
const FOLLOWS_1: u8 = 24;
const INDEFINITE: u8 = 31;

/// The major types this codec reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Major {
    Unsigned,
    Negative,
    Text,
    Array,
    Map,
}

impl Major {
    /// Opcode of the inline-zero form (`B` in the magnitude ladder).
    pub const fn base(self) -> u8 {
        match self {
            Major::Unsigned => 0x00,
            Major::Negative => 0x20,
            Major::Text => 0x60,
            Major::Array => 0x80,
            Major::Map => 0xa0,
        }
    }

    /// Opcode announcing a follow-on argument of `width` bytes.
    pub const fn follows(self, width: Width) -> u8 {
        self.base() | (FOLLOWS_1 + width as u8)
    }

    /// Opcode opening the indefinite-length form, where one exists.
    pub const fn indefinite(self) -> Option<u8> {
        match self {
            Major::Text | Major::Array | Major::Map => Some(self.base() | INDEFINITE),
            Major::Unsigned | Major::Negative => None,
        }
    }
}

/// Width of a follow-on argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Width {
    W1 = 0,
    W2 = 1,
    W4 = 2,
    W8 = 3,
}

impl Width {
    /// Narrowest width able to hold `n`, or `None` when `n` fits inline.
    pub const fn for_arg(n: u64) -> Option<Width> {
        if n <= MAX_INLINE {
            None
        } else if n <= 0xff {
            Some(Width::W1)
        } else if n <= 0xffff {
            Some(Width::W2)
        } else if n <= 0xffff_ffff {
            Some(Width::W4)
        } else {
            Some(Width::W8)
        }
    }

    pub const fn bytes(self) -> usize {
        1 << self as u8
    }

    const fn from_selector(selector: u8) -> Width {
        match selector & 0x03 {
            0 => Width::W1,
            1 => Width::W2,
            2 => Width::W4,
            _ => Width::W8,
        }
    }
}

/// Where an item's argument (value, length or count) lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Inline(u8),
    Follows(Width),
}

/// Every opcode the decoder accepts, classified by range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Unsigned(Arg),
    Negative(Arg),
    Text(Arg),
    TextIndefinite,
    Array(Arg),
    ArrayIndefinite,
    Map(Arg),
    MapIndefinite,
    False,
    True,
    Null,
    Float16,
    Float32,
    Float64,
}

impl Opcode {
    /// Classifies a leading byte. `None` means the byte is not part of the
    /// accepted grammar, including a stray break byte.
    pub const fn classify(byte: u8) -> Option<Opcode> {
        let inline = Arg::Inline(byte & 0x1f);
        let follows = Arg::Follows(Width::from_selector(byte));
        Some(match byte {
            0x00..=0x17 => Opcode::Unsigned(inline),
            0x18..=0x1b => Opcode::Unsigned(follows),
            0x20..=0x37 => Opcode::Negative(inline),
            0x38..=0x3b => Opcode::Negative(follows),
            0x60..=0x77 => Opcode::Text(inline),
            0x78..=0x7b => Opcode::Text(follows),
            0x7f => Opcode::TextIndefinite,
            0x80..=0x97 => Opcode::Array(inline),
            0x98..=0x9b => Opcode::Array(follows),
            0x9f => Opcode::ArrayIndefinite,
            0xa0..=0xb7 => Opcode::Map(inline),
            0xb8..=0xbb => Opcode::Map(follows),
            0xbf => Opcode::MapIndefinite,
            FALSE => Opcode::False,
            TRUE => Opcode::True,
            NULL => Opcode::Null,
            FLOAT16 => Opcode::Float16,
            FLOAT32 => Opcode::Float32,
            FLOAT64 => Opcode::Float64,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_on_opcodes() {
        let expected = [
            (Major::Unsigned, [0x18, 0x19, 0x1a, 0x1b]),
            (Major::Negative, [0x38, 0x39, 0x3a, 0x3b]),
            (Major::Text, [0x78, 0x79, 0x7a, 0x7b]),
            (Major::Array, [0x98, 0x99, 0x9a, 0x9b]),
            (Major::Map, [0xb8, 0xb9, 0xba, 0xbb]),
        ];
        for (major, ops) in expected {
            let widths = [Width::W1, Width::W2, Width::W4, Width::W8];
            for (width, op) in widths.into_iter().zip(ops) {
                assert_eq!(major.follows(width), op, "{major:?} {width:?}");
                assert!(Opcode::classify(op).is_some(), "0x{op:02x} must be accepted");
            }
        }
    }

    #[test]
    fn indefinite_opcodes() {
        assert_eq!(Major::Text.indefinite(), Some(0x7f));
        assert_eq!(Major::Array.indefinite(), Some(0x9f));
        assert_eq!(Major::Map.indefinite(), Some(0xbf));
        assert_eq!(Major::Unsigned.indefinite(), None);
    }

    #[test]
    fn width_tiers() {
        assert_eq!(Width::for_arg(23), None);
        assert_eq!(Width::for_arg(24), Some(Width::W1));
        assert_eq!(Width::for_arg(255), Some(Width::W1));
        assert_eq!(Width::for_arg(256), Some(Width::W2));
        assert_eq!(Width::for_arg(65535), Some(Width::W2));
        assert_eq!(Width::for_arg(65536), Some(Width::W4));
        assert_eq!(Width::for_arg(4294967295), Some(Width::W4));
        assert_eq!(Width::for_arg(4294967296), Some(Width::W8));
        assert_eq!(Width::W8.bytes(), 8);
        assert_eq!(Width::W1.bytes(), 1);
    }

    #[test]
    fn classify_ranges() {
        assert_eq!(Opcode::classify(0x17), Some(Opcode::Unsigned(Arg::Inline(23))));
        assert_eq!(Opcode::classify(0x37), Some(Opcode::Negative(Arg::Inline(23))));
        assert_eq!(Opcode::classify(0x65), Some(Opcode::Text(Arg::Inline(5))));
        assert_eq!(
            Opcode::classify(0x9a),
            Some(Opcode::Array(Arg::Follows(Width::W4)))
        );
        assert_eq!(Opcode::classify(0xbf), Some(Opcode::MapIndefinite));
        assert_eq!(Opcode::classify(0xf9), Some(Opcode::Float16));
    }

    #[test]
    fn rejected_bytes() {
        // reserved selectors, byte strings, tags, undefined, simple values, break
        for byte in [
            0x1c, 0x1f, 0x3c, 0x40, 0x5f, 0x7c, 0x9c, 0xbc, 0xc0, 0xd8, 0xf7, 0xf8, 0xfc, 0xff,
        ] {
            assert_eq!(Opcode::classify(byte), None, "0x{byte:02x}");
        }
    }
}
