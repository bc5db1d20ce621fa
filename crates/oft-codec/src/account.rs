//! Discriminator-checked decoding of any supported account.

use serde::{Deserialize, Serialize};

use crate::discriminator::{AccountKind, DiscriminatorRegistry};
use crate::error::DecodeError;
use crate::oft_store::{decode_oft_store_with, OftStore};
use crate::peer_config::{decode_peer_config_with, PeerConfig, PeerConfigLayout};
use crate::reader::OptionTagMode;

/// Decoder configuration shared by every schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub peer_layout: PeerConfigLayout,
    pub option_tags: OptionTagMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "account")]
pub enum Account {
    OftStore(OftStore),
    PeerConfig(PeerConfig),
}

impl Account {
    pub fn kind(&self) -> AccountKind {
        match self {
            Account::OftStore(_) => AccountKind::OftStore,
            Account::PeerConfig(_) => AccountKind::PeerConfig,
        }
    }
}

/// Look up the buffer's discriminator in `registry` and decode it with the
/// matching schema.
pub fn decode_account(
    data: &[u8],
    registry: &DiscriminatorRegistry,
    options: &DecodeOptions,
) -> Result<Account, DecodeError> {
    match registry.kind_of(data)? {
        AccountKind::OftStore => {
            decode_oft_store_with(data, options.option_tags).map(Account::OftStore)
        }
        AccountKind::PeerConfig => {
            decode_peer_config_with(data, &options.peer_layout, options.option_tags)
                .map(Account::PeerConfig)
        }
    }
}
