//! Command-line front end: decodes one hex transmission and reports its
//! version sum and value.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use bits_decoder::{DEFAULT_MAX_DEPTH, DecodeConfig, Decoder, Packet, Summary, Transmission};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bits-decode")]
#[command(about = "Decode a hex BITS transmission and evaluate it", long_about = None)]
struct Cli {
    /// File holding the hex transmission, `-` for stdin
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Largest literal width in bits (1-64)
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..=64))]
    max_literal_bits: u32,

    /// Deepest packet nesting accepted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the decoded packet tree as JSON
    #[arg(long)]
    tree: bool,
}

impl Cli {
    fn decode_config(&self) -> DecodeConfig {
        let mut config = DecodeConfig::new();
        config
            .set_max_literal_bits(self.max_literal_bits)
            .set_max_depth(self.max_depth);
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let line = read_transmission(&cli.input)?;
    let transmission = Transmission::from_hex(&line)
        .with_context(|| format!("failed to read transmission from {}", cli.input.display()))?;
    debug!(bits = transmission.bit_len(), "loaded transmission");

    let decoder = Decoder::new(cli.decode_config());
    debug!(config = ?decoder.config(), "decoding");

    let mut reader = transmission.reader();
    let packet = decoder
        .decode(&mut reader)
        .context("failed to decode transmission")?;
    debug!(
        packets = packet.packet_count(),
        depth = packet.depth(),
        trailing_bits = reader.remaining(),
        "decoded packet tree"
    );

    let summary = packet.summary().context("failed to evaluate transmission")?;
    info!(
        version_sum = summary.version_sum,
        value = summary.value,
        "evaluated transmission"
    );

    report(&cli, &packet, &summary)
}

/// Returns the first non-empty line of the input.
fn read_transmission(path: &Path) -> Result<String> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        content
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    match content.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => Ok(line.to_string()),
        None => bail!("{} holds no transmission", path.display()),
    }
}

fn report(cli: &Cli, packet: &Packet, summary: &Summary) -> Result<()> {
    if cli.tree {
        println!("{}", serde_json::to_string_pretty(packet)?);
    }

    if cli.json {
        println!("{}", serde_json::to_string(summary)?);
    } else {
        println!("version sum: {}", summary.version_sum);
        println!("value: {}", summary.value);
    }

    Ok(())
}
