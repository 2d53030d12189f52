//! Output targets for the encoder traversal.
//!
//! The encoder walks a value tree once per target. Running the same walk
//! against [`SizeCounter`] and then [`Writer`] guarantees that the computed
//! size is the exact number of bytes written.

use json_cbor_buffers::Writer;

/// Receives the big-endian primitives emitted by the encoder.
pub trait Sink {
    fn u8(&mut self, val: u8);
    fn u16(&mut self, val: u16);
    fn u32(&mut self, val: u32);
    fn u64(&mut self, val: u64);
    fn f64(&mut self, val: f64);
    fn buf(&mut self, buf: &[u8]);
}

/// Sink that only totals the size of what it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeCounter {
    size: usize,
}

impl SizeCounter {
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Sink for SizeCounter {
    fn u8(&mut self, _: u8) {
        self.size += 1;
    }

    fn u16(&mut self, _: u16) {
        self.size += 2;
    }

    fn u32(&mut self, _: u32) {
        self.size += 4;
    }

    fn u64(&mut self, _: u64) {
        self.size += 8;
    }

    fn f64(&mut self, _: f64) {
        self.size += 8;
    }

    fn buf(&mut self, buf: &[u8]) {
        self.size += buf.len();
    }
}

impl Sink for Writer {
    fn u8(&mut self, val: u8) {
        Writer::u8(self, val);
    }

    fn u16(&mut self, val: u16) {
        Writer::u16(self, val);
    }

    fn u32(&mut self, val: u32) {
        Writer::u32(self, val);
    }

    fn u64(&mut self, val: u64) {
        Writer::u64(self, val);
    }

    fn f64(&mut self, val: f64) {
        Writer::f64(self, val);
    }

    fn buf(&mut self, buf: &[u8]) {
        Writer::buf(self, buf);
    }
}
