//! Human and JSON renderings of decoded accounts.
//!
//! Keys are shown in base58, opaque blobs in hex, and a peer that looks like
//! a padded EVM address is also shown in EIP-55 form.

use std::fmt;

use oft_codec::{
    Account, AccountReader, DecodeError, OftStore, OftType, PeerConfig, PeerConfigLayout,
    RateLimiter, RateLimiterWords, DISCRIMINATOR_LEN,
};
use program_address::bytes_to_address;
use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::args::Format;
use crate::error::InspectError;
use crate::peer::PeerDerivation;

pub fn render<T: Serialize + fmt::Display>(
    format: Format,
    value: &T,
) -> Result<String, InspectError> {
    match format {
        Format::Text => Ok(value.to_string()),
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// EIP-55 mixed-case checksum of a 20-byte EVM address.
pub fn checksum_evm_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (c, h) in lower.chars().zip(hash.chars()) {
        // A hash nibble >= 8 uppercases the letter at the same position.
        if c.is_ascii_alphabetic() && h.to_digit(16).unwrap_or(0) >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn oft_type_name(oft_type: OftType) -> String {
    match oft_type {
        OftType::Native => "Native".into(),
        OftType::Adapter => "Adapter".into(),
        OftType::Unknown(v) => format!("Unknown({v})"),
    }
}

fn row(f: &mut fmt::Formatter<'_>, name: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "  {name:<24} {value}")
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".into(),
    }
}

// ---------------------------------------------------------------------------
// OFTStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreReport {
    pub oft_type: String,
    pub ld2sd_rate: u64,
    pub token_mint: String,
    pub token_escrow: String,
    pub endpoint_program: String,
    pub bump: u8,
    pub tvl_ld: u64,
    pub admin: String,
    pub default_fee_bps: u16,
    pub paused: bool,
    pub pauser: Option<String>,
    pub unpauser: Option<String>,
    pub encoded_len: usize,
}

impl From<&OftStore> for StoreReport {
    fn from(store: &OftStore) -> Self {
        Self {
            oft_type: oft_type_name(store.oft_type),
            ld2sd_rate: store.ld2sd_rate,
            token_mint: bytes_to_address(&store.token_mint),
            token_escrow: bytes_to_address(&store.token_escrow),
            endpoint_program: bytes_to_address(&store.endpoint_program),
            bump: store.bump,
            tvl_ld: store.tvl_ld,
            admin: bytes_to_address(&store.admin),
            default_fee_bps: store.default_fee_bps,
            paused: store.paused,
            pauser: store.pauser.as_ref().map(bytes_to_address),
            unpauser: store.unpauser.as_ref().map(bytes_to_address),
            encoded_len: store.encoded_len(),
        }
    }
}

impl fmt::Display for StoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OFTStore ({} bytes)", self.encoded_len)?;
        row(f, "oft_type", &self.oft_type)?;
        row(f, "ld2sd_rate", self.ld2sd_rate)?;
        row(f, "token_mint", &self.token_mint)?;
        row(f, "token_escrow", &self.token_escrow)?;
        row(f, "endpoint_program", &self.endpoint_program)?;
        row(f, "bump", self.bump)?;
        row(f, "tvl_ld", self.tvl_ld)?;
        row(f, "admin", &self.admin)?;
        row(f, "default_fee_bps", self.default_fee_bps)?;
        row(f, "paused", self.paused)?;
        row(f, "pauser", or_none(&self.pauser))?;
        row(f, "unpauser", or_none(&self.unpauser))
    }
}

// ---------------------------------------------------------------------------
// PeerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimiterReport {
    pub data: String,
    /// Present only for 32-byte limiters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<RateLimiterWords>,
}

impl From<&RateLimiter> for LimiterReport {
    fn from(limiter: &RateLimiter) -> Self {
        Self {
            data: hex::encode(&limiter.data),
            words: limiter.words(),
        }
    }
}

impl fmt::Display for LimiterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.words {
            Some(w) => write!(
                f,
                "capacity={} tokens={} refill_per_second={} last_refill_time={}",
                w.capacity, w.tokens, w.refill_per_second, w.last_refill_time
            ),
            None => f.write_str(&self.data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerReport {
    pub peer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_evm_address: Option<String>,
    pub enforced_options: String,
    pub outbound_rate_limiter: Option<LimiterReport>,
    pub inbound_rate_limiter: Option<LimiterReport>,
    pub fee_bps: Option<u16>,
    pub bump: u8,
}

impl From<&PeerConfig> for PeerReport {
    fn from(peer: &PeerConfig) -> Self {
        Self {
            peer_address: hex::encode(peer.peer_address),
            peer_evm_address: peer
                .has_evm_padding()
                .then(|| checksum_evm_address(&peer.evm_address())),
            enforced_options: hex::encode(&peer.enforced_options.data),
            outbound_rate_limiter: peer.outbound_rate_limiter.as_ref().map(LimiterReport::from),
            inbound_rate_limiter: peer.inbound_rate_limiter.as_ref().map(LimiterReport::from),
            fee_bps: peer.fee_bps,
            bump: peer.bump,
        }
    }
}

impl fmt::Display for PeerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PeerConfig")?;
        row(f, "peer_address", format!("0x{}", self.peer_address))?;
        if let Some(evm) = &self.peer_evm_address {
            row(f, "peer (evm)", evm)?;
        }
        row(f, "enforced_options", &self.enforced_options)?;
        row(f, "outbound_rate_limiter", or_none(&self.outbound_rate_limiter))?;
        row(f, "inbound_rate_limiter", or_none(&self.inbound_rate_limiter))?;
        row(f, "fee_bps", or_none(&self.fee_bps))?;
        row(f, "bump", self.bump)
    }
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationReport {
    pub remote_eid: u32,
    pub address: String,
    pub bump: u8,
}

impl From<&PeerDerivation> for DerivationReport {
    fn from(peer: &PeerDerivation) -> Self {
        Self {
            remote_eid: peer.remote_eid,
            address: bytes_to_address(&peer.derived.address),
            bump: peer.derived.bump,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DerivationsReport {
    pub program_id: String,
    pub oft_store: String,
    pub peers: Vec<DerivationReport>,
}

impl fmt::Display for DerivationsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PeerConfig addresses")?;
        row(f, "program_id", &self.program_id)?;
        row(f, "oft_store", &self.oft_store)?;
        for peer in &self.peers {
            row(
                f,
                &format!("eid {}", peer.remote_eid),
                format!("{} (bump {})", peer.address, peer.bump),
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Command outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StoreOutput {
    pub store: StoreReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivations: Option<DerivationsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutDump>,
}

impl fmt::Display for StoreOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.store)?;
        if let Some(derivations) = &self.derivations {
            write!(f, "\n{derivations}")?;
        }
        if let Some(layout) = &self.layout {
            write!(f, "\n{layout}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeerOutput {
    pub peer: PeerReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutDump>,
}

impl fmt::Display for PeerOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.peer)?;
        if let Some(layout) = &self.layout {
            write!(f, "\n{layout}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "account")]
pub enum AccountReport {
    OftStore(StoreReport),
    PeerConfig(PeerReport),
}

impl From<&Account> for AccountReport {
    fn from(account: &Account) -> Self {
        match account {
            Account::OftStore(store) => AccountReport::OftStore(store.into()),
            Account::PeerConfig(peer) => AccountReport::PeerConfig(peer.into()),
        }
    }
}

impl fmt::Display for AccountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountReport::OftStore(store) => fmt::Display::fmt(store, f),
            AccountReport::PeerConfig(peer) => fmt::Display::fmt(peer, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw layout dump
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpRow {
    pub offset: usize,
    pub width: usize,
    pub field: String,
    pub value: String,
}

/// Every field of a buffer with its offset, read the same way the decoders
/// read it. Nonzero option tags are followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayoutDump(pub Vec<DumpRow>);

impl fmt::Display for LayoutDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6} {:>5}  {:<24} value", "offset", "width", "field")?;
        for r in &self.0 {
            writeln!(f, "{:>6} {:>5}  {:<24} {}", r.offset, r.width, r.field, r.value)?;
        }
        Ok(())
    }
}

struct Dumper<'a> {
    reader: AccountReader<'a>,
    rows: Vec<DumpRow>,
}

impl<'a> Dumper<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            reader: AccountReader::new(data),
            rows: Vec::new(),
        }
    }

    fn field(&mut self, name: &str, width: usize) -> Result<&'a [u8], DecodeError> {
        let offset = self.reader.position();
        let bytes = self.reader.read_bytes(width)?;
        self.rows.push(DumpRow {
            offset,
            width,
            field: name.to_string(),
            value: hex::encode(bytes),
        });
        Ok(bytes)
    }

    fn option(&mut self, name: &str, width: usize) -> Result<(), DecodeError> {
        let tag = self.field(&format!("{name} (tag)"), 1)?[0];
        if tag != 0 {
            self.field(name, width)?;
        }
        Ok(())
    }

    fn finish(self) -> LayoutDump {
        LayoutDump(self.rows)
    }
}

pub fn dump_oft_store(data: &[u8]) -> Result<LayoutDump, DecodeError> {
    let mut d = Dumper::new(data);
    d.field("discriminator", DISCRIMINATOR_LEN)?;
    d.field("oft_type", 1)?;
    d.field("ld2sd_rate", 8)?;
    d.field("token_mint", 32)?;
    d.field("token_escrow", 32)?;
    d.field("endpoint_program", 32)?;
    d.field("bump", 1)?;
    d.field("tvl_ld", 8)?;
    d.field("admin", 32)?;
    d.field("default_fee_bps", 2)?;
    d.field("paused", 1)?;
    d.option("pauser", 32)?;
    d.option("unpauser", 32)?;
    Ok(d.finish())
}

pub fn dump_peer_config(
    data: &[u8],
    layout: &PeerConfigLayout,
) -> Result<LayoutDump, DecodeError> {
    layout.validate()?;
    let mut d = Dumper::new(data);
    d.field("discriminator", DISCRIMINATOR_LEN)?;
    d.field("peer_address", 32)?;
    d.field("enforced_options", layout.enforced_options_len)?;
    d.option("outbound_rate_limiter", layout.rate_limiter_len)?;
    d.option("inbound_rate_limiter", layout.rate_limiter_len)?;
    d.option("fee_bps", 2)?;
    d.field("bump", 1)?;
    Ok(d.finish())
}
