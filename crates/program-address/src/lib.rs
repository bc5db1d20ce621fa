//! Program-derived address calculation for Solana-style ledgers.
//!
//! A program-derived address (PDA) is a pure function of a program id and an
//! ordered list of seeds: we hash the seeds together with a candidate bump
//! byte until the digest is not a valid Ed25519 point. No `solana-sdk`
//! dependency; the hash comes from `sha2` and the curve check from
//! `curve25519-dalek`.

pub mod address;
pub mod derive;
pub mod error;
pub mod scan;

pub use address::{address_to_bytes, bytes_to_address, validate_address};
pub use derive::{
    create_program_address, derive_address, derive_address_with, is_on_curve, AddressHasher,
    DerivedAddress, Sha256Hasher, MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER,
};
pub use error::DerivationError;
pub use scan::{BumpScan, Bumps, ScanDirection};
