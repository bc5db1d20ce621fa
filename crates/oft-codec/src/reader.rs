//! Bounds-checked read cursor over account data.
//!
//! Layout conventions (Anchor / Borsh):
//!
//! ```text
//! discriminator   8 bytes
//! u8 / bool       1 byte, bool is "nonzero = true"
//! u16 / u64       little-endian
//! key             32 raw bytes
//! Option<T>       tag byte (0 = None) followed by T only when present
//! ```
//!
//! The cursor only moves forward. Each primitive read either advances by
//! exactly the field width or fails with [`DecodeError::BufferTooShort`]
//! without moving.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Length of the account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// How option tag bytes other than 0 and 1 are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionTagMode {
    /// Any nonzero tag means "present".
    #[default]
    Lenient,
    /// Tags above 1 fail with [`DecodeError::UnexpectedOptionTag`].
    Strict,
}

/// Forward-only cursor over one account's bytes.
pub struct AccountReader<'a> {
    data: &'a [u8],
    pos: usize,
    tags: OptionTagMode,
}

impl<'a> AccountReader<'a> {
    /// Cursor at offset 0 with lenient option tags.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_tag_mode(data, OptionTagMode::Lenient)
    }

    /// Cursor at offset 0 with the given option tag handling.
    pub fn with_tag_mode(data: &'a [u8], tags: OptionTagMode) -> Self {
        Self { data, pos: 0, tags }
    }

    /// Fail early unless the whole buffer holds at least `len` bytes.
    pub fn require(&self, len: usize) -> Result<(), DecodeError> {
        if self.data.len() < len {
            return Err(DecodeError::BufferTooShort {
                needed: len,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::BufferTooShort {
            needed: usize::MAX,
            actual: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(DecodeError::BufferTooShort {
                needed: end,
                actual: self.data.len(),
            });
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Take the next `N` bytes as an owned array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Take the 8-byte account discriminator.
    pub fn read_discriminator(&mut self) -> Result<[u8; DISCRIMINATOR_LEN], DecodeError> {
        self.read_array()
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// `0` is `false`, anything else is `true`.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a 32-byte public key.
    pub fn read_key(&mut self) -> Result<[u8; 32], DecodeError> {
        self.read_array()
    }

    /// Read an `Option<T>`: one tag byte, then `read` only if the tag says
    /// the value is present.
    pub fn read_option<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        match (tag, self.tags) {
            (0, _) => Ok(None),
            (1, _) | (_, OptionTagMode::Lenient) => read(self).map(Some),
            (tag, OptionTagMode::Strict) => Err(DecodeError::UnexpectedOptionTag { offset, tag }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_little_endian() {
        let data = [0x2a, 0x0a, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0x01];
        let mut r = AccountReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 42);
        assert_eq!(r.read_u16().unwrap(), 10);
        assert_eq!(r.read_u64().unwrap(), 1);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.position(), data.len());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn any_nonzero_byte_is_true() {
        let mut r = AccountReader::new(&[0x00, 0x02, 0xff]);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
    }

    #[test]
    fn short_read_reports_needed_and_actual() {
        // Discriminator plus one key; a second key runs 32 bytes past the end.
        let data = [0u8; 40];
        let mut r = AccountReader::new(&data);
        r.read_discriminator().unwrap();
        assert_eq!(r.read_key(), Ok([0u8; 32]));
        assert_eq!(
            r.read_key(),
            Err(DecodeError::BufferTooShort {
                needed: 72,
                actual: 40,
            })
        );
        assert_eq!(r.position(), 40);

        let short = [0u8; 39];
        let mut r = AccountReader::new(&short);
        r.read_discriminator().unwrap();
        assert_eq!(
            r.read_key(),
            Err(DecodeError::BufferTooShort {
                needed: 40,
                actual: 39,
            })
        );
    }

    #[test]
    fn failed_read_does_not_advance() {
        let data = [1u8; 5];
        let mut r = AccountReader::new(&data);
        assert!(r.read_u64().is_err());
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u8().unwrap(), 1);
    }

    #[test]
    fn require_checks_total_length() {
        let data = [0u8; 10];
        let r = AccountReader::new(&data);
        assert!(r.require(10).is_ok());
        assert_eq!(
            r.require(11),
            Err(DecodeError::BufferTooShort {
                needed: 11,
                actual: 10,
            })
        );
    }

    #[test]
    fn absent_option_consumes_only_the_tag() {
        let data = [0x00, 0xff, 0xff];
        let mut r = AccountReader::new(&data);
        assert_eq!(r.read_option(|r| r.read_u16()).unwrap(), None);
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn present_option_consumes_tag_and_value() {
        let data = [0x01, 0x0a, 0x00, 0x07];
        let mut r = AccountReader::new(&data);
        assert_eq!(r.read_option(|r| r.read_u16()).unwrap(), Some(10));
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn lenient_mode_treats_any_nonzero_tag_as_present() {
        let data = [0x05, 0x0a, 0x00];
        let mut r = AccountReader::new(&data);
        assert_eq!(r.read_option(|r| r.read_u16()).unwrap(), Some(10));
    }

    #[test]
    fn strict_mode_rejects_tags_above_one() {
        let data = [0xaa, 0x05, 0x0a, 0x00];
        let mut r = AccountReader::with_tag_mode(&data, OptionTagMode::Strict);
        r.read_u8().unwrap();
        assert_eq!(
            r.read_option(|r| r.read_u16()),
            Err(DecodeError::UnexpectedOptionTag { offset: 1, tag: 5 })
        );
    }

    #[test]
    fn present_option_with_truncated_value_fails() {
        let data = [0x01, 0x0a];
        let mut r = AccountReader::new(&data);
        assert_eq!(
            r.read_option(|r| r.read_u16()),
            Err(DecodeError::BufferTooShort {
                needed: 3,
                actual: 2,
            })
        );
    }
}
