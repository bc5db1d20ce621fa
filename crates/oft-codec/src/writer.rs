//! Growable write cursor, the inverse of [`AccountReader`](crate::reader::AccountReader).
//!
//! Used to build account fixtures and to check that decoders and layouts
//! agree. Writes always succeed; width checks happen in the callers that
//! know the declared layout.

/// Append-only buffer laid out like [`AccountReader`](crate::reader::AccountReader) expects.
pub struct AccountWriter {
    buf: Vec<u8>,
}

impl AccountWriter {
    /// Empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }

    /// Append raw bytes, no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append one byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian `u16`.
    pub fn write_u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian `u64`.
    pub fn write_u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append `1` for true, `0` for false.
    pub fn write_bool(&mut self, val: bool) {
        self.buf.push(val as u8);
    }

    /// Tag byte `1` plus the value, or a lone `0` tag.
    pub fn write_option<T>(&mut self, val: Option<&T>, write: impl FnOnce(&mut Self, &T)) {
        match val {
            Some(v) => {
                self.write_u8(1);
                write(self, v);
            }
            None => self.write_u8(0),
        }
    }

    /// The bytes written so far.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
