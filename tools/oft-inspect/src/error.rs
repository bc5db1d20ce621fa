use oft_codec::DecodeError;
use program_address::DerivationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("address derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<hex::FromHexError> for InspectError {
    fn from(e: hex::FromHexError) -> Self {
        InspectError::InvalidInput(format!("hex decode failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_is_wrapped() {
        let err: InspectError = DecodeError::BufferTooShort {
            needed: 76,
            actual: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "decode failed: buffer too short: need 76 bytes, have 3"
        );
    }

    #[test]
    fn derivation_error_is_wrapped() {
        let err: InspectError = DerivationError::ExhaustedBumpSpace.into();
        assert_eq!(
            err.to_string(),
            "address derivation failed: no bump seed produced an off-curve address"
        );
    }

    #[test]
    fn hex_error_becomes_invalid_input() {
        let err: InspectError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, InspectError::InvalidInput(_)));
    }
}
