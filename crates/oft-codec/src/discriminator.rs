//! Account discriminators and the registry that maps them to schemas.
//!
//! Anchor prefixes every account with `sha256("account:<TypeName>")[..8]`.
//! The plain decoders skip this prefix; [`DiscriminatorRegistry`] is how a
//! caller opts into checking it before dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DecodeError;
use crate::reader::DISCRIMINATOR_LEN;

/// `sha256("account:OFTStore")[..8]`
pub const OFT_STORE_DISCRIMINATOR: [u8; 8] = [0xc3, 0xd7, 0x68, 0x86, 0xb9, 0xc3, 0xf0, 0x72];

/// `sha256("account:PeerConfig")[..8]`
pub const PEER_CONFIG_DISCRIMINATOR: [u8; 8] = [0xb5, 0x9d, 0x56, 0xc6, 0x21, 0xc1, 0x5e, 0xcb];

/// Anchor account discriminator for `type_name`.
pub fn account_discriminator(type_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::new()
        .chain_update(b"account:")
        .chain_update(type_name.as_bytes())
        .finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// Record schemas this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    OftStore,
    PeerConfig,
}

impl AccountKind {
    /// On-chain type name, the input to [`account_discriminator`].
    pub fn type_name(&self) -> &'static str {
        match self {
            AccountKind::OftStore => "OFTStore",
            AccountKind::PeerConfig => "PeerConfig",
        }
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            AccountKind::OftStore => OFT_STORE_DISCRIMINATOR,
            AccountKind::PeerConfig => PEER_CONFIG_DISCRIMINATOR,
        }
    }
}

/// Lookup table from discriminator to [`AccountKind`].
#[derive(Debug, Clone, Default)]
pub struct DiscriminatorRegistry {
    kinds: HashMap<[u8; DISCRIMINATOR_LEN], AccountKind>,
}

impl DiscriminatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for the OFT program's two account types.
    pub fn oft() -> Self {
        let mut registry = Self::new();
        registry.register(OFT_STORE_DISCRIMINATOR, AccountKind::OftStore);
        registry.register(PEER_CONFIG_DISCRIMINATOR, AccountKind::PeerConfig);
        registry
    }

    /// Map `discriminator` to `kind`. Returns the kind it replaced, if any.
    ///
    /// Forks of the program that rename their account types register their
    /// own discriminators here.
    pub fn register(
        &mut self,
        discriminator: [u8; DISCRIMINATOR_LEN],
        kind: AccountKind,
    ) -> Option<AccountKind> {
        self.kinds.insert(discriminator, kind)
    }

    pub fn lookup(&self, discriminator: &[u8; DISCRIMINATOR_LEN]) -> Option<AccountKind> {
        self.kinds.get(discriminator).copied()
    }

    /// Identify the schema of a raw account buffer.
    pub fn kind_of(&self, data: &[u8]) -> Result<AccountKind, DecodeError> {
        let discriminator: [u8; DISCRIMINATOR_LEN] = data
            .get(..DISCRIMINATOR_LEN)
            .and_then(|d| d.try_into().ok())
            .ok_or(DecodeError::BufferTooShort {
                needed: DISCRIMINATOR_LEN,
                actual: data.len(),
            })?;

        self.lookup(&discriminator)
            .ok_or(DecodeError::UnknownDiscriminator(discriminator))
    }

    /// Check that `data` starts with the discriminator registered for `kind`.
    pub fn expect(&self, data: &[u8], kind: AccountKind) -> Result<(), DecodeError> {
        match self.kind_of(data) {
            Ok(found) if found == kind => Ok(()),
            Ok(_) | Err(DecodeError::UnknownDiscriminator(_)) => {
                let mut found = [0u8; DISCRIMINATOR_LEN];
                found.copy_from_slice(&data[..DISCRIMINATOR_LEN]);
                Err(DecodeError::DiscriminatorMismatch {
                    expected: kind.discriminator(),
                    found,
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_anchor_hash() {
        assert_eq!(account_discriminator("OFTStore"), OFT_STORE_DISCRIMINATOR);
        assert_eq!(account_discriminator("PeerConfig"), PEER_CONFIG_DISCRIMINATOR);
    }

    #[test]
    fn kind_type_names_hash_to_their_discriminators() {
        for kind in [AccountKind::OftStore, AccountKind::PeerConfig] {
            assert_eq!(account_discriminator(kind.type_name()), kind.discriminator());
        }
    }

    #[test]
    fn oft_registry_identifies_both_kinds() {
        let registry = DiscriminatorRegistry::oft();

        let mut store = OFT_STORE_DISCRIMINATOR.to_vec();
        store.extend_from_slice(&[0; 16]);
        assert_eq!(registry.kind_of(&store).unwrap(), AccountKind::OftStore);

        assert_eq!(
            registry.kind_of(&PEER_CONFIG_DISCRIMINATOR).unwrap(),
            AccountKind::PeerConfig
        );
    }

    #[test]
    fn unknown_discriminator_is_reported() {
        let registry = DiscriminatorRegistry::oft();
        assert_eq!(
            registry.kind_of(&[0u8; 8]),
            Err(DecodeError::UnknownDiscriminator([0u8; 8]))
        );
    }

    #[test]
    fn short_buffer_has_no_discriminator() {
        let registry = DiscriminatorRegistry::oft();
        assert_eq!(
            registry.kind_of(&[1, 2, 3]),
            Err(DecodeError::BufferTooShort {
                needed: 8,
                actual: 3,
            })
        );
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = DiscriminatorRegistry::new();
        assert!(registry.lookup(&OFT_STORE_DISCRIMINATOR).is_none());
    }

    #[test]
    fn custom_registration() {
        let mut registry = DiscriminatorRegistry::new();
        let renamed = account_discriminator("MyOFTStore");
        assert_eq!(registry.register(renamed, AccountKind::OftStore), None);
        assert_eq!(registry.lookup(&renamed), Some(AccountKind::OftStore));
        assert_eq!(
            registry.register(renamed, AccountKind::PeerConfig),
            Some(AccountKind::OftStore)
        );
    }

    #[test]
    fn expect_reports_mismatch() {
        let registry = DiscriminatorRegistry::oft();
        assert!(registry
            .expect(&OFT_STORE_DISCRIMINATOR, AccountKind::OftStore)
            .is_ok());
        assert_eq!(
            registry.expect(&PEER_CONFIG_DISCRIMINATOR, AccountKind::OftStore),
            Err(DecodeError::DiscriminatorMismatch {
                expected: OFT_STORE_DISCRIMINATOR,
                found: PEER_CONFIG_DISCRIMINATOR,
            })
        );
        assert_eq!(
            registry.expect(&[7u8; 8], AccountKind::PeerConfig),
            Err(DecodeError::DiscriminatorMismatch {
                expected: PEER_CONFIG_DISCRIMINATOR,
                found: [7u8; 8],
            })
        );
    }
}
