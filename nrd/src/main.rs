// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! nrd: announce blackhole routes for blocked countries through the local
//! BGP speaker, one reconciliation pass per invocation.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nr_common::log::{init_file_logger, init_logger};
use pset::{Prefix4, PrefixSetBuilder};
use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::path::PathBuf;

mod client;
mod config;
mod error;
mod geo;

mod log;

use crate::log::dlog;
use client::SpeakerClient;
use config::RunConfig;
use geo::{FileGeoSource, GeoSource};

pub const COMPONENT_NRD: &str = "nrd";
pub const MOD_DAEMON: &str = "daemon";

#[derive(Parser, Debug)]
#[command(version, about = "geo-driven BGP blackhole injector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one reconciliation pass against the local speaker.
    Run(RunArgs),
    /// Print the version and exit.
    Version,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to the per-country prefix map.
    #[arg(long, env = "NRD_GEO_PATH")]
    geo_path: PathBuf,

    /// Control socket of the local BGP speaker.
    #[arg(
        long,
        env = "NRD_SPEAKER_SOCKET",
        default_value = "/var/run/nrd-speaker.sock"
    )]
    speaker_socket: PathBuf,

    /// ISO code of a country to blackhole. Repeatable.
    #[arg(long = "country", required = true)]
    countries: Vec<String>,

    /// Host address never blackholed. Repeatable.
    #[arg(long = "allow")]
    allow: Vec<String>,

    /// Next hop placed on every announced prefix.
    #[arg(long, env = "NRD_NEXT_HOP")]
    next_hop: Ipv4Addr,

    /// Community to attach, as an A:B pair of 16-bit decimals. Repeatable.
    #[arg(long = "community")]
    communities: Vec<String>,

    /// Log to this file instead of stdout.
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    match args.command {
        Commands::Run(args) => run(args),
        Commands::Version => {
            println!("nrd {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let log = match &args.log_file {
        Some(f) => init_file_logger(f),
        None => init_logger(),
    };
    let config = RunConfig::from(&args);

    dlog!(log, info, "starting blackhole pass";
        "countries" => config.countries.join(","),
        "next_hop" => config.next_hop.to_string()
    );

    // Both scoped resources come up before any work happens; failure on
    // either is fatal and nothing has been announced or withdrawn yet.
    let geo = FileGeoSource::open(&args.geo_path)
        .with_context(|| format!("open geo source {:?}", args.geo_path))?;
    let client = SpeakerClient::connect(&args.speaker_socket)
        .with_context(|| {
            format!("connect to speaker at {:?}", args.speaker_socket)
        })?;

    let mut builder = PrefixSetBuilder::new(log.clone());
    for iso in &config.countries {
        match geo.country_prefixes(iso) {
            Ok(prefixes) => {
                builder.add_country(iso, &prefixes);
            }
            Err(e) => {
                dlog!(log, warn, "skipping country {}: {}", iso, e;
                    "country" => iso.clone()
                );
            }
        }
    }
    builder.allow(&config.allow);

    let covered = builder.addresses();
    let desired: BTreeSet<Prefix4> = builder.build().into_iter().collect();
    dlog!(log, info, "desired block set computed";
        "prefixes" => desired.len(),
        "addresses" => covered
    );

    let encoder = announce::AttributeEncoder::new(
        config.next_hop,
        &config.communities,
        log.clone(),
    );
    let stats = nr_lower::run_pass(&client, &encoder, &desired, &log)
        .context("reconciliation pass")?;

    dlog!(log, info, "pass complete";
        "withdrawn" => stats.withdrawn,
        "announced" => stats.announced,
        "failed" => stats.failed,
        "kept" => stats.kept
    );
    Ok(())
}
