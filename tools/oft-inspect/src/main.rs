mod args;
mod error;
mod input;
mod peer;
mod report;

use std::path::Path;

use clap::Parser;
use oft_codec::{
    decode_account, decode_oft_store_with, decode_peer_config_with, DecodeOptions,
    DiscriminatorRegistry, OptionTagMode, PeerConfigLayout,
};
use program_address::{address_to_bytes, bytes_to_address};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::args::{get_program_id, get_remote_eids, Args, Command, LayoutArgs};
use crate::error::InspectError;
use crate::input::load_account_data;
use crate::peer::derive_peer_config_addresses;
use crate::report::{
    dump_oft_store, dump_peer_config, render, AccountReport, DerivationReport, DerivationsReport,
    PeerOutput, PeerReport, StoreOutput, StoreReport,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!(error = %e, "oft-inspect failed");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<String, InspectError> {
    let format = args.format;
    match args.command {
        Command::Store {
            input,
            address,
            program_id,
            remote_eids,
            dump,
            strict,
        } => {
            let data = load_account_data(&input)?;
            info!(len = data.len(), strict, "decoding OFTStore");
            let store = decode_oft_store_with(&data, tag_mode(strict))?;
            match DiscriminatorRegistry::oft().kind_of(&data) {
                Ok(kind) => debug!(?kind, "discriminator recognized"),
                Err(e) => debug!(error = %e, "decoding without a known discriminator"),
            }

            let derivations = match address {
                Some(address) => Some(derive(
                    &get_program_id(program_id),
                    &address,
                    get_remote_eids(remote_eids),
                )?),
                None => None,
            };

            let output = StoreOutput {
                store: StoreReport::from(&store),
                derivations,
                layout: dump.then(|| dump_oft_store(&data)).transpose()?,
            };
            render(format, &output)
        }
        Command::Peer {
            input,
            layout,
            dump,
        } => {
            let data = load_account_data(&input)?;
            let options = decode_options(&layout)?;
            info!(len = data.len(), layout = ?options.peer_layout, "decoding PeerConfig");
            let peer = decode_peer_config_with(&data, &options.peer_layout, options.option_tags)?;

            let output = PeerOutput {
                peer: PeerReport::from(&peer),
                layout: dump
                    .then(|| dump_peer_config(&data, &options.peer_layout))
                    .transpose()?,
            };
            render(format, &output)
        }
        Command::Decode { input, layout } => {
            let data = load_account_data(&input)?;
            let options = decode_options(&layout)?;
            let account = decode_account(&data, &DiscriminatorRegistry::oft(), &options)?;
            info!(kind = ?account.kind(), len = data.len(), "decoded account");
            render(format, &AccountReport::from(&account))
        }
        Command::Derive {
            oft_store,
            program_id,
            remote_eids,
        } => {
            let report = derive(
                &get_program_id(program_id),
                &oft_store,
                get_remote_eids(remote_eids),
            )?;
            render(format, &report)
        }
    }
}

fn derive(
    program_id: &str,
    oft_store: &str,
    remote_eids: Vec<u32>,
) -> Result<DerivationsReport, InspectError> {
    let program = address_to_bytes(program_id)?;
    let store = address_to_bytes(oft_store)?;
    info!(program_id, oft_store, eids = remote_eids.len(), "deriving PeerConfig addresses");

    let peers = derive_peer_config_addresses(&program, &store, &remote_eids)?;
    for peer in &peers {
        debug!(
            remote_eid = peer.remote_eid,
            eid_seed = %hex::encode(peer.seeds.remote_eid),
            address = %bytes_to_address(&peer.derived.address),
            bump = peer.derived.bump,
            "derived PeerConfig"
        );
    }

    Ok(DerivationsReport {
        program_id: program_id.to_string(),
        oft_store: oft_store.to_string(),
        peers: peers.iter().map(DerivationReport::from).collect(),
    })
}

fn decode_options(layout: &LayoutArgs) -> Result<DecodeOptions, InspectError> {
    let peer_layout = match &layout.layout {
        Some(path) => load_layout(path)?,
        None => PeerConfigLayout::default(),
    };
    peer_layout.validate()?;

    Ok(DecodeOptions {
        peer_layout,
        option_tags: tag_mode(layout.strict),
    })
}

fn tag_mode(strict: bool) -> OptionTagMode {
    if strict {
        OptionTagMode::Strict
    } else {
        OptionTagMode::Lenient
    }
}

fn load_layout(path: &Path) -> Result<PeerConfigLayout, InspectError> {
    let raw = std::fs::read_to_string(path)?;
    let layout: PeerConfigLayout = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), ?layout, "loaded PeerConfig layout");
    Ok(layout)
}
