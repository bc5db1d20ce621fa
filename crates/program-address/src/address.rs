//! Base58 encoding of 32-byte ledger keys.
//!
//! Program ids, account addresses and derived addresses all share the same
//! textual form: the standard Bitcoin-alphabet Base58 encoding of the raw
//! 32 bytes, with no checksum.

use crate::error::DerivationError;

/// Encode 32 bytes as a Base58 address string.
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a Base58 address string to its 32-byte representation.
///
/// Returns an error if the string is not valid Base58 or does not decode
/// to exactly 32 bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], DerivationError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| DerivationError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        DerivationError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })?;

    Ok(arr)
}

/// Check that `address` is Base58 and decodes to exactly 32 bytes.
pub fn validate_address(address: &str) -> Result<(), DerivationError> {
    address_to_bytes(address).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The System Program id is 32 zero bytes.
    #[test]
    fn zero_key_encodes_to_all_ones() {
        assert_eq!(bytes_to_address(&[0u8; 32]), "11111111111111111111111111111111");
    }

    #[test]
    fn oft_program_id_roundtrip() {
        let address = "7ARvMSh4xHDvRBPPxEMtLxZdEHH65yAXYeTUN52bMgGv";
        let bytes = address_to_bytes(address).unwrap();
        assert_eq!(bytes_to_address(&bytes), address);
    }

    #[test]
    fn validate_accepts_known_address() {
        assert!(validate_address("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").is_ok());
    }

    #[test]
    fn validate_rejects_garbage() {
        assert!(validate_address("not-a-valid-address!!!").is_err());
    }

    #[test]
    fn short_key_is_rejected() {
        // "1" decodes to a single zero byte.
        let err = address_to_bytes("1").unwrap_err();
        assert_eq!(
            err,
            DerivationError::InvalidAddress("expected 32 bytes, got 1".into())
        );
    }
}
