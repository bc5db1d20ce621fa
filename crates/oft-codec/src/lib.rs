//! Decoders for the LayerZero OFT program's Solana accounts.
//!
//! Accounts are read straight from their Anchor/Borsh byte layout with a
//! forward-only cursor, without pulling in `anchor-lang` or `borsh`. Every
//! decoder is a pure function of the input slice.
//!
//! - [`decode_oft_store`]: the fixed-layout `OFTStore` account.
//! - [`decode_peer_config`]: the `PeerConfig` account, whose sub-record
//!   widths come from a [`PeerConfigLayout`].
//! - [`decode_account`]: discriminator lookup followed by either of the above.

pub mod account;
pub mod discriminator;
pub mod error;
pub mod oft_store;
pub mod peer_config;
pub mod reader;
pub mod writer;

pub use account::{decode_account, Account, DecodeOptions};
pub use discriminator::{
    account_discriminator, AccountKind, DiscriminatorRegistry, OFT_STORE_DISCRIMINATOR,
    PEER_CONFIG_DISCRIMINATOR,
};
pub use error::DecodeError;
pub use oft_store::{
    decode_oft_store, decode_oft_store_with, read_oft_store, OftStore, OftType,
    OFT_STORE_FIXED_LEN, OFT_STORE_MAX_LEN, OFT_STORE_MIN_LEN,
};
pub use peer_config::{
    decode_peer_config, decode_peer_config_with, read_peer_config, EnforcedOptions, PeerConfig,
    PeerConfigLayout, RateLimiter, RateLimiterWords, EVM_ADDRESS_LEN, EVM_PADDING_LEN,
    MAX_ACCOUNT_LEN,
};
pub use reader::{AccountReader, OptionTagMode, DISCRIMINATOR_LEN};
pub use writer::AccountWriter;
