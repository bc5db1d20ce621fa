use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::peer::DEFAULT_REMOTE_EIDS;

/// Mainnet OFT program.
pub const DEFAULT_PROGRAM_ID: &str = "7ARvMSh4xHDvRBPPxEMtLxZdEHH65yAXYeTUN52bMgGv";

#[derive(Parser)]
#[command(author, version, about = "Decode OFT program accounts and derive peer addresses", long_about = None)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode an OFTStore account and derive its PeerConfig addresses.
    Store {
        #[command(flatten)]
        input: InputArgs,
        /// Base58 address of the OFTStore account, needed for peer derivation.
        #[arg(long)]
        address: Option<String>,
        #[arg(long, help = "OFT program id (base58)")]
        program_id: Option<String>,
        #[arg(long = "remote-eid", help = "Remote endpoint ids to derive peers for")]
        remote_eids: Vec<u32>,
        #[arg(long, help = "Print an offset-by-offset dump of the buffer")]
        dump: bool,
        #[arg(long, help = "Reject option tags other than 0 and 1")]
        strict: bool,
    },
    /// Decode a PeerConfig account.
    Peer {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        #[arg(long)]
        dump: bool,
    },
    /// Identify an account by discriminator and decode it.
    Decode {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Derive PeerConfig addresses without decoding anything.
    Derive {
        #[arg(long, help = "OFTStore address (base58)")]
        oft_store: String,
        #[arg(long, help = "OFT program id (base58)")]
        program_id: Option<String>,
        #[arg(long = "remote-eid")]
        remote_eids: Vec<u32>,
    },
}

#[derive(ClapArgs)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    #[arg(long, help = "File holding the raw account data")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Account data as hex")]
    pub hex: Option<String>,
}

#[derive(ClapArgs)]
pub struct LayoutArgs {
    #[arg(long, help = "JSON file with PeerConfig sub-record widths")]
    pub layout: Option<PathBuf>,
    #[arg(long, help = "Reject option tags other than 0 and 1")]
    pub strict: bool,
}

pub fn get_program_id(cli_program_id: Option<String>) -> String {
    cli_program_id
        .or_else(|| std::env::var("OFT_PROGRAM_ID").ok())
        .unwrap_or_else(|| DEFAULT_PROGRAM_ID.to_string())
}

pub fn get_remote_eids(cli_eids: Vec<u32>) -> Vec<u32> {
    if cli_eids.is_empty() {
        DEFAULT_REMOTE_EIDS.to_vec()
    } else {
        cli_eids
    }
}
