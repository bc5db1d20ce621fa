use thiserror::Error;

/// Account decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes, have {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    #[error("option tag {tag:#04x} at offset {offset} is neither 0 nor 1")]
    UnexpectedOptionTag { offset: usize, tag: u8 },

    #[error("unknown account discriminator {0:02x?}")]
    UnknownDiscriminator([u8; 8]),

    #[error("discriminator mismatch: expected {expected:02x?}, found {found:02x?}")]
    DiscriminatorMismatch { expected: [u8; 8], found: [u8; 8] },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("{field} is {actual} bytes but the layout declares {expected}")]
    BlobWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_buffer_too_short() {
        let err = DecodeError::BufferTooShort {
            needed: 159,
            actual: 158,
        };
        assert_eq!(err.to_string(), "buffer too short: need 159 bytes, have 158");
    }

    #[test]
    fn display_unexpected_option_tag() {
        let err = DecodeError::UnexpectedOptionTag {
            offset: 157,
            tag: 2,
        };
        assert_eq!(
            err.to_string(),
            "option tag 0x02 at offset 157 is neither 0 nor 1"
        );
    }

    #[test]
    fn display_unknown_discriminator() {
        let err = DecodeError::UnknownDiscriminator([0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 1]);
        assert_eq!(
            err.to_string(),
            "unknown account discriminator [de, ad, be, ef, 00, 00, 00, 01]"
        );
    }

    #[test]
    fn display_blob_width() {
        let err = DecodeError::BlobWidth {
            field: "enforced_options",
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "enforced_options is 31 bytes but the layout declares 32"
        );
    }

    #[test]
    fn debug_format_works() {
        let err = DecodeError::InvalidLayout("zero width".into());
        assert!(format!("{err:?}").contains("InvalidLayout"));
    }
}
