//! Program-derived address (PDA) search.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || bump || program_id || "ProgramDerivedAddress")`
//! for the first bump whose digest is NOT a valid Ed25519 point. Being off
//! the curve guarantees no private key exists for the address, so only the
//! owning program can sign for it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DerivationError;
use crate::scan::BumpScan;

/// Domain separator appended after the program id.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, counting the bump.
pub const MAX_SEEDS: usize = 16;

/// Digest function used for each derivation attempt.
///
/// `parts` are hashed as one contiguous message, in order.
pub trait AddressHasher {
    fn digest(&self, parts: &[&[u8]]) -> [u8; 32];
}

/// SHA-256, the ledger's PDA hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl AddressHasher for Sha256Hasher {
    fn digest(&self, parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// An accepted derivation: the address and the bump that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub address: [u8; 32],
    pub bump: u8,
}

/// Find the canonical PDA for `seeds` under `program_id`.
///
/// Scans bumps 255 down to 0 with SHA-256.
pub fn derive_address(
    program_id: &[u8; 32],
    seeds: &[&[u8]],
) -> Result<DerivedAddress, DerivationError> {
    derive_address_with(program_id, seeds, &BumpScan::CANONICAL, &Sha256Hasher)
}

/// Find a PDA using an explicit bump scan order and digest function.
pub fn derive_address_with<H: AddressHasher + ?Sized>(
    program_id: &[u8; 32],
    seeds: &[&[u8]],
    scan: &BumpScan,
    hasher: &H,
) -> Result<DerivedAddress, DerivationError> {
    check_seeds(seeds)?;

    for bump in scan.bumps() {
        if let Some(address) = try_derive(program_id, seeds, bump, hasher) {
            return Ok(DerivedAddress { address, bump });
        }
    }

    Err(DerivationError::ExhaustedBumpSpace)
}

/// Derive the address for one known bump.
///
/// Fails with [`DerivationError::OnCurve`] if that bump does not yield a
/// valid PDA.
pub fn create_program_address(
    program_id: &[u8; 32],
    seeds: &[&[u8]],
    bump: u8,
) -> Result<[u8; 32], DerivationError> {
    check_seeds(seeds)?;
    try_derive(program_id, seeds, bump, &Sha256Hasher).ok_or(DerivationError::OnCurve)
}

/// Check if 32 bytes decompress to a valid Ed25519 point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), DerivationError> {
    // The bump travels as one more seed.
    let count = seeds.len() + 1;
    if count > MAX_SEEDS {
        return Err(DerivationError::TooManySeeds {
            count,
            max: MAX_SEEDS,
        });
    }

    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(DerivationError::SeedTooLong {
            index,
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }

    Ok(())
}

/// Returns `None` when the digest falls on the curve.
fn try_derive<H: AddressHasher + ?Sized>(
    program_id: &[u8; 32],
    seeds: &[&[u8]],
    bump: u8,
    hasher: &H,
) -> Option<[u8; 32]> {
    let bump_seed = [bump];

    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
    parts.extend_from_slice(seeds);
    parts.push(&bump_seed);
    parts.push(program_id);
    parts.push(PDA_MARKER);

    let hash = hasher.digest(&parts);
    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}
