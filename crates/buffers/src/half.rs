/// Widens an IEEE-754 binary16 bit pattern to `f64`.
///
/// Handles subnormals, signed zero, infinities and NaN.
pub fn decode_half(half: u16) -> f64 {
    let exp = (half >> 10) & 0x1f;
    let mant = f64::from(half & 0x03ff);
    let val = match exp {
        0 => mant * 2f64.powi(-24),
        31 if mant == 0.0 => f64::INFINITY,
        31 => f64::NAN,
        _ => (mant + 1024.0) * 2f64.powi(i32::from(exp) - 25),
    };
    if half & 0x8000 != 0 {
        -val
    } else {
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_values() {
        assert_eq!(decode_half(0x3c00), 1.0);
        assert_eq!(decode_half(0x3e00), 1.5);
        assert_eq!(decode_half(0xc400), -4.0);
        assert_eq!(decode_half(0x7bff), 65504.0);
    }

    #[test]
    fn zeros_keep_their_sign() {
        assert_eq!(decode_half(0x0000), 0.0);
        assert!(decode_half(0x0000).is_sign_positive());
        assert!(decode_half(0x8000).is_sign_negative());
    }

    #[test]
    fn subnormals() {
        assert_eq!(decode_half(0x0001), 2f64.powi(-24));
        assert_eq!(decode_half(0x0400), 6.103515625e-5);
    }

    #[test]
    fn specials() {
        assert_eq!(decode_half(0x7c00), f64::INFINITY);
        assert_eq!(decode_half(0xfc00), f64::NEG_INFINITY);
        assert!(decode_half(0x7e00).is_nan());
    }
}
