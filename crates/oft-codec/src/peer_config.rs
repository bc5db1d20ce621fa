//! `PeerConfig` account: per-remote-chain settings of an OFT deployment.
//!
//! Unlike `OFTStore`, this layout is not self-describing. The enforced
//! options and the rate limiters have no length prefix in the data we
//! decode, so their widths come from a [`PeerConfigLayout`] supplied by the
//! caller:
//!
//! ```text
//! discriminator           8
//! peer_address            32        foreign address, left-padded with zeros
//! enforced_options        E         opaque
//! outbound_rate_limiter   1 (+ R)   Option<opaque>
//! inbound_rate_limiter    1 (+ R)   Option<opaque>
//! fee_bps                 1 (+ 2)   Option<u16 LE>
//! bump                    1
//! ```
//!
//! The default layout (E = 32, R = 32) matches the accounts we have seen,
//! but it is an observation rather than a published schema.
//!
//! `bump` is the byte right after the fee option, not the last byte of the
//! buffer; the two coincide only when the account has no trailing padding.

use serde::{Deserialize, Serialize};

use crate::discriminator::PEER_CONFIG_DISCRIMINATOR;
use crate::error::DecodeError;
use crate::reader::{AccountReader, OptionTagMode, DISCRIMINATOR_LEN};
use crate::writer::AccountWriter;

/// Zero bytes in front of a 20-byte EVM address inside `peer_address`.
pub const EVM_PADDING_LEN: usize = 12;

pub const EVM_ADDRESS_LEN: usize = 20;

/// Largest account the ledger allows (10 MiB); no declared width may exceed it.
pub const MAX_ACCOUNT_LEN: usize = 10 * 1024 * 1024;

/// Declared widths of the `PeerConfig` sub-records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerConfigLayout {
    pub enforced_options_len: usize,
    pub rate_limiter_len: usize,
}

impl Default for PeerConfigLayout {
    fn default() -> Self {
        Self {
            enforced_options_len: 32,
            rate_limiter_len: 32,
        }
    }
}

impl PeerConfigLayout {
    /// Reject zero widths and widths no account could hold.
    pub fn validate(&self) -> Result<(), DecodeError> {
        check_layout_width("enforced_options_len", self.enforced_options_len)?;
        check_layout_width("rate_limiter_len", self.rate_limiter_len)
    }

    /// Smallest valid buffer: every option absent. Saturates instead of
    /// overflowing on unvalidated widths.
    pub fn min_len(&self) -> usize {
        (DISCRIMINATOR_LEN + 32 + 1 + 1 + 1 + 1).saturating_add(self.enforced_options_len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcedOptions {
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiter {
    pub data: Vec<u8>,
}

/// The four counters of a 32-byte rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterWords {
    pub capacity: u64,
    pub tokens: u64,
    pub refill_per_second: u64,
    pub last_refill_time: u64,
}

impl RateLimiter {
    /// Interpret the blob as four u64 LE counters. `None` unless it is
    /// exactly 32 bytes.
    pub fn words(&self) -> Option<RateLimiterWords> {
        if self.data.len() != 32 {
            return None;
        }
        let word = |i: usize| {
            let mut b = [0u8; 8];
            b.copy_from_slice(&self.data[i * 8..i * 8 + 8]);
            u64::from_le_bytes(b)
        };
        Some(RateLimiterWords {
            capacity: word(0),
            tokens: word(1),
            refill_per_second: word(2),
            last_refill_time: word(3),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    pub peer_address: [u8; 32],
    pub enforced_options: EnforcedOptions,
    pub outbound_rate_limiter: Option<RateLimiter>,
    pub inbound_rate_limiter: Option<RateLimiter>,
    pub fee_bps: Option<u16>,
    pub bump: u8,
}

/// Decode with the default layout, treating any nonzero option tag as
/// present.
pub fn decode_peer_config(data: &[u8]) -> Result<PeerConfig, DecodeError> {
    decode_peer_config_with(data, &PeerConfigLayout::default(), OptionTagMode::Lenient)
}

pub fn decode_peer_config_with(
    data: &[u8],
    layout: &PeerConfigLayout,
    tags: OptionTagMode,
) -> Result<PeerConfig, DecodeError> {
    layout.validate()?;
    let mut r = AccountReader::with_tag_mode(data, tags);
    r.require(layout.min_len())?;
    read_peer_config(&mut r, layout)
}

/// Like [`read_oft_store`](crate::oft_store::read_oft_store), for `PeerConfig`.
pub fn read_peer_config(
    r: &mut AccountReader<'_>,
    layout: &PeerConfigLayout,
) -> Result<PeerConfig, DecodeError> {
    let _discriminator = r.read_discriminator()?;

    let rate_limiter = |r: &mut AccountReader<'_>| {
        r.read_bytes(layout.rate_limiter_len).map(|b| RateLimiter { data: b.to_vec() })
    };

    Ok(PeerConfig {
        peer_address: r.read_key()?,
        enforced_options: EnforcedOptions {
            data: r.read_bytes(layout.enforced_options_len)?.to_vec(),
        },
        outbound_rate_limiter: r.read_option(rate_limiter)?,
        inbound_rate_limiter: r.read_option(rate_limiter)?,
        fee_bps: r.read_option(|r| r.read_u16())?,
        bump: r.read_u8()?,
    })
}

impl PeerConfig {
    /// Low 20 bytes of `peer_address`, the remote EVM contract.
    pub fn evm_address(&self) -> [u8; EVM_ADDRESS_LEN] {
        let mut out = [0u8; EVM_ADDRESS_LEN];
        out.copy_from_slice(&self.peer_address[EVM_PADDING_LEN..]);
        out
    }

    /// Whether the high 12 bytes are zero, i.e. the peer looks like an EVM
    /// address rather than a full 32-byte key.
    pub fn has_evm_padding(&self) -> bool {
        self.peer_address[..EVM_PADDING_LEN].iter().all(|b| *b == 0)
    }

    pub fn encoded_len(&self, layout: &PeerConfigLayout) -> usize {
        let limiters = self.outbound_rate_limiter.is_some() as usize
            + self.inbound_rate_limiter.is_some() as usize;
        let fee = if self.fee_bps.is_some() { 2 } else { 0 };
        layout
            .min_len()
            .saturating_add(limiters.saturating_mul(layout.rate_limiter_len))
            .saturating_add(fee)
    }

    /// Serialize with the `PeerConfig` discriminator. Blob lengths must
    /// match `layout`.
    pub fn encode(&self, layout: &PeerConfigLayout) -> Result<Vec<u8>, DecodeError> {
        layout.validate()?;
        check_width(
            "enforced_options",
            layout.enforced_options_len,
            &self.enforced_options.data,
        )?;
        for limiter in [&self.outbound_rate_limiter, &self.inbound_rate_limiter]
            .into_iter()
            .flatten()
        {
            check_width("rate_limiter", layout.rate_limiter_len, &limiter.data)?;
        }

        let mut w = AccountWriter::with_capacity(self.encoded_len(layout));
        w.write_bytes(&PEER_CONFIG_DISCRIMINATOR);
        w.write_bytes(&self.peer_address);
        w.write_bytes(&self.enforced_options.data);
        w.write_option(self.outbound_rate_limiter.as_ref(), |w, l| {
            w.write_bytes(&l.data)
        });
        w.write_option(self.inbound_rate_limiter.as_ref(), |w, l| {
            w.write_bytes(&l.data)
        });
        w.write_option(self.fee_bps.as_ref(), |w, fee| w.write_u16(*fee));
        w.write_u8(self.bump);
        Ok(w.into_inner())
    }
}

fn check_layout_width(field: &str, width: usize) -> Result<(), DecodeError> {
    if width == 0 {
        return Err(DecodeError::InvalidLayout(format!("{field} must be > 0")));
    }
    if width > MAX_ACCOUNT_LEN {
        return Err(DecodeError::InvalidLayout(format!(
            "{field} is {width} bytes, max is {MAX_ACCOUNT_LEN}"
        )));
    }
    Ok(())
}

fn check_width(field: &'static str, expected: usize, data: &[u8]) -> Result<(), DecodeError> {
    if data.len() != expected {
        return Err(DecodeError::BlobWidth {
            field,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}
