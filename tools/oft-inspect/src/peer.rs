//! PeerConfig address convention of the OFT program.
//!
//! A PeerConfig lives at the PDA with seeds
//! `["Peer", oft_store, remote_eid as u64 big-endian]`.

use program_address::{derive_address, DerivationError, DerivedAddress};
use serde::Serialize;

pub const PEER_SEED: &[u8; 4] = b"Peer";

/// Ethereum, BNB Chain, Arbitrum, Base.
pub const DEFAULT_REMOTE_EIDS: [u32; 4] = [30101, 30102, 30109, 30184];

/// The three seeds of one PeerConfig address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerSeeds {
    pub tag: [u8; 4],
    pub oft_store: [u8; 32],
    pub remote_eid: [u8; 8],
}

pub fn peer_config_seeds(oft_store: &[u8; 32], remote_eid: u32) -> PeerSeeds {
    PeerSeeds {
        tag: *PEER_SEED,
        oft_store: *oft_store,
        remote_eid: u64::from(remote_eid).to_be_bytes(),
    }
}

impl PeerSeeds {
    pub fn as_slices(&self) -> [&[u8]; 3] {
        [&self.tag, &self.oft_store, &self.remote_eid]
    }
}

/// One derived PeerConfig address, with the seeds that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PeerDerivation {
    pub remote_eid: u32,
    #[serde(skip)]
    pub seeds: PeerSeeds,
    pub derived: DerivedAddress,
}

pub fn derive_peer_config_address(
    program_id: &[u8; 32],
    oft_store: &[u8; 32],
    remote_eid: u32,
) -> Result<PeerDerivation, DerivationError> {
    let seeds = peer_config_seeds(oft_store, remote_eid);
    let derived = derive_address(program_id, &seeds.as_slices())?;
    Ok(PeerDerivation {
        remote_eid,
        seeds,
        derived,
    })
}

/// Derive peers for every eid, stopping at the first failure.
pub fn derive_peer_config_addresses(
    program_id: &[u8; 32],
    oft_store: &[u8; 32],
    remote_eids: &[u32],
) -> Result<Vec<PeerDerivation>, DerivationError> {
    remote_eids
        .iter()
        .map(|eid| derive_peer_config_address(program_id, oft_store, *eid))
        .collect()
}
