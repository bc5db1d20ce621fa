//! `OFTStore` account: the per-token configuration of an OFT deployment.
//!
//! ```text
//! offset  width  field
//!      0      8  discriminator (not validated here)
//!      8      1  oft_type
//!      9      8  ld2sd_rate         u64 LE
//!     17     32  token_mint
//!     49     32  token_escrow
//!     81     32  endpoint_program
//!    113      1  bump
//!    114      8  tvl_ld             u64 LE
//!    122     32  admin
//!    154      2  default_fee_bps    u16 LE
//!    156      1  paused             bool
//!    157   1/33  pauser             Option<key>
//!      …   1/33  unpauser           Option<key>
//! ```
//!
//! Every offset after 157 depends only on which option tags are set.

use serde::{Deserialize, Serialize};

use crate::discriminator::OFT_STORE_DISCRIMINATOR;
use crate::error::DecodeError;
use crate::reader::{AccountReader, OptionTagMode, DISCRIMINATOR_LEN};
use crate::writer::AccountWriter;

/// Bytes between the discriminator and the first option tag.
pub const OFT_STORE_FIXED_LEN: usize = 1 + 8 + 32 + 32 + 32 + 1 + 8 + 32 + 2 + 1;

/// Smallest valid buffer: discriminator, fixed fields and two `None` tags.
pub const OFT_STORE_MIN_LEN: usize = DISCRIMINATOR_LEN + OFT_STORE_FIXED_LEN + 2;

/// Largest meaningful encoding: both optional keys present.
pub const OFT_STORE_MAX_LEN: usize = OFT_STORE_MIN_LEN + 2 * 32;

/// Whether the store mints/burns natively or escrows an existing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OftType {
    Native,
    Adapter,
    /// A value this crate does not know; kept so re-encoding is lossless.
    Unknown(u8),
}

impl OftType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => OftType::Native,
            1 => OftType::Adapter,
            other => OftType::Unknown(other),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            OftType::Native => 0,
            OftType::Adapter => 1,
            OftType::Unknown(v) => *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OftStore {
    // immutable
    pub oft_type: OftType,
    pub ld2sd_rate: u64,
    pub token_mint: [u8; 32],
    pub token_escrow: [u8; 32],
    pub endpoint_program: [u8; 32],
    pub bump: u8,
    // mutable
    pub tvl_ld: u64,
    // configurable
    pub admin: [u8; 32],
    pub default_fee_bps: u16,
    pub paused: bool,
    pub pauser: Option<[u8; 32]>,
    pub unpauser: Option<[u8; 32]>,
}

/// Decode an `OFTStore` account, treating any nonzero option tag as present.
pub fn decode_oft_store(data: &[u8]) -> Result<OftStore, DecodeError> {
    decode_oft_store_with(data, OptionTagMode::Lenient)
}

pub fn decode_oft_store_with(data: &[u8], tags: OptionTagMode) -> Result<OftStore, DecodeError> {
    let mut r = AccountReader::with_tag_mode(data, tags);
    r.require(OFT_STORE_MIN_LEN)?;
    read_oft_store(&mut r)
}

/// Field-by-field read from the reader's current position, which must be
/// the start of the account. Leaves the reader just past the last field.
pub fn read_oft_store(r: &mut AccountReader<'_>) -> Result<OftStore, DecodeError> {
    let _discriminator = r.read_discriminator()?;

    Ok(OftStore {
        oft_type: OftType::from_u8(r.read_u8()?),
        ld2sd_rate: r.read_u64()?,
        token_mint: r.read_key()?,
        token_escrow: r.read_key()?,
        endpoint_program: r.read_key()?,
        bump: r.read_u8()?,
        tvl_ld: r.read_u64()?,
        admin: r.read_key()?,
        default_fee_bps: r.read_u16()?,
        paused: r.read_bool()?,
        pauser: r.read_option(|r| r.read_key())?,
        unpauser: r.read_option(|r| r.read_key())?,
    })
}

impl OftStore {
    /// Bytes this record occupies in an account, discriminator included.
    pub fn encoded_len(&self) -> usize {
        let present = self.pauser.is_some() as usize + self.unpauser.is_some() as usize;
        OFT_STORE_MIN_LEN + present * 32
    }

    /// Serialize with the `OFTStore` discriminator.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = AccountWriter::with_capacity(self.encoded_len());
        w.write_bytes(&OFT_STORE_DISCRIMINATOR);
        w.write_u8(self.oft_type.as_u8());
        w.write_u64(self.ld2sd_rate);
        w.write_bytes(&self.token_mint);
        w.write_bytes(&self.token_escrow);
        w.write_bytes(&self.endpoint_program);
        w.write_u8(self.bump);
        w.write_u64(self.tvl_ld);
        w.write_bytes(&self.admin);
        w.write_u16(self.default_fee_bps);
        w.write_bool(self.paused);
        w.write_option(self.pauser.as_ref(), |w, k| w.write_bytes(k));
        w.write_option(self.unpauser.as_ref(), |w, k| w.write_bytes(k));
        w.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OftStore {
        OftStore {
            oft_type: OftType::Adapter,
            ld2sd_rate: 1_000,
            token_mint: [0x11; 32],
            token_escrow: [0x22; 32],
            endpoint_program: [0x33; 32],
            bump: 254,
            tvl_ld: 123_456_789,
            admin: [0x44; 32],
            default_fee_bps: 30,
            paused: false,
            pauser: None,
            unpauser: None,
        }
    }

    /// Buffer with every fixed field zeroed except the ones a test sets.
    fn minimal_buffer() -> Vec<u8> {
        let mut data = vec![0u8; OFT_STORE_MIN_LEN];
        data[9] = 0x01; // ld2sd_rate = 1
        data[154] = 0x0a; // default_fee_bps = 10
        data[156] = 0x01; // paused
        data
    }

    #[test]
    fn fixed_length_is_149() {
        assert_eq!(OFT_STORE_FIXED_LEN, 149);
        assert_eq!(OFT_STORE_MIN_LEN, 159);
        assert_eq!(OFT_STORE_MAX_LEN, 223);
    }

    #[test]
    fn decodes_all_zero_vector() {
        let store = decode_oft_store(&minimal_buffer()).unwrap();
        assert_eq!(
            store,
            OftStore {
                oft_type: OftType::Native,
                ld2sd_rate: 1,
                token_mint: [0; 32],
                token_escrow: [0; 32],
                endpoint_program: [0; 32],
                bump: 0,
                tvl_ld: 0,
                admin: [0; 32],
                default_fee_bps: 10,
                paused: true,
                pauser: None,
                unpauser: None,
            }
        );
        assert_eq!(store.encoded_len(), OFT_STORE_MIN_LEN);
    }

    #[test]
    fn one_byte_short_fails() {
        let data = minimal_buffer();
        assert_eq!(
            decode_oft_store(&data[..OFT_STORE_MIN_LEN - 1]),
            Err(DecodeError::BufferTooShort {
                needed: OFT_STORE_MIN_LEN,
                actual: OFT_STORE_MIN_LEN - 1,
            })
        );
    }

    #[test]
    fn discriminator_is_not_validated() {
        let mut data = minimal_buffer();
        data[..8].copy_from_slice(b"whatever");
        assert!(decode_oft_store(&data).is_ok());
    }

    #[test]
    fn trailing_bytes_are_padding() {
        let mut data = sample().encode();
        data.extend_from_slice(&[0xee; 40]);
        assert_eq!(decode_oft_store(&data).unwrap(), sample());
    }

    #[test]
    fn present_pauser_without_key_bytes_fails() {
        let mut data = minimal_buffer();
        data[157] = 1;
        assert_eq!(
            decode_oft_store(&data),
            Err(DecodeError::BufferTooShort {
                needed: 158 + 32,
                actual: OFT_STORE_MIN_LEN,
            })
        );
    }

    #[test]
    fn option_offsets_shift_with_presence() {
        let mut store = sample();
        store.pauser = Some([0xaa; 32]);
        store.unpauser = Some([0xbb; 32]);
        let data = store.encode();

        assert_eq!(data.len(), OFT_STORE_MAX_LEN);
        assert_eq!(data[157], 1);
        assert_eq!(&data[158..190], &[0xaa; 32]);
        assert_eq!(data[190], 1);
        assert_eq!(&data[191..223], &[0xbb; 32]);
    }

    #[test]
    fn encode_writes_field_offsets() {
        let data = sample().encode();
        assert_eq!(&data[..8], &OFT_STORE_DISCRIMINATOR);
        assert_eq!(data[8], 1);
        assert_eq!(u64::from_le_bytes(data[9..17].try_into().unwrap()), 1_000);
        assert_eq!(&data[17..49], &[0x11; 32]);
        assert_eq!(&data[81..113], &[0x33; 32]);
        assert_eq!(data[113], 254);
        assert_eq!(&data[122..154], &[0x44; 32]);
        assert_eq!(u16::from_le_bytes([data[154], data[155]]), 30);
    }

    #[test]
    fn strict_mode_rejects_odd_tag() {
        let mut data = minimal_buffer();
        data[158] = 2;
        data.extend_from_slice(&[0x55; 32]);
        assert_eq!(decode_oft_store(&data).unwrap().unpauser, Some([0x55; 32]));
        assert_eq!(
            decode_oft_store_with(&data, OptionTagMode::Strict),
            Err(DecodeError::UnexpectedOptionTag { offset: 158, tag: 2 })
        );
    }

    #[test]
    fn unknown_oft_type_survives_reencoding() {
        let mut store = sample();
        store.oft_type = OftType::Unknown(9);
        assert_eq!(decode_oft_store(&store.encode()).unwrap(), store);
    }

    #[test]
    fn oft_type_mapping() {
        assert_eq!(OftType::from_u8(0), OftType::Native);
        assert_eq!(OftType::from_u8(1), OftType::Adapter);
        assert_eq!(OftType::from_u8(7).as_u8(), 7);
    }
}
