use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use pulsecode_rs::phy::{EncodingKind, PulseEncoder};
use pulsecode_rs::ui::{self, ConversionSteps, ProgressManager};
use pulsecode_rs::utils::consts::{DEFAULT_INPUT_TEXT, STEP_INTERVAL_MS};
use pulsecode_rs::utils::dump::StreamDump;
use pulsecode_rs::utils::logging::init_logging;
use pulsecode_rs::{EncoderConfig, Result};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text and print the conversion steps and waveform
    Encode {
        #[arg(short, long, default_value = DEFAULT_INPUT_TEXT)]
        text: String,
        #[arg(short, long, default_value = "NRZ")]
        encoding: EncodingKind,
        /// JSON encoder config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Hide connectors between bits
        #[arg(long)]
        no_connect: bool,
        /// Flag bits with a mid-bit transition
        #[arg(long)]
        markers: bool,
        /// Dump the rendered stream as JSON (`-` for stdout)
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Walk through the bits one at a time
    Step {
        #[arg(short, long, default_value = DEFAULT_INPUT_TEXT)]
        text: String,
        #[arg(short, long, default_value = "NRZ")]
        encoding: EncodingKind,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = STEP_INTERVAL_MS)]
        interval_ms: u64,
    },
    /// List the supported line codes
    List,
}

fn load_config(path: Option<&PathBuf>) -> Result<EncoderConfig> {
    match path {
        Some(path) => EncoderConfig::from_json_file(path),
        None => Ok(EncoderConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode {
            text,
            encoding,
            config,
            no_connect,
            markers,
            json,
        } => {
            let mut config = load_config(config.as_ref())?;
            if no_connect {
                config.render.connect_bits = false;
            }
            if markers {
                config.render.show_mid_bit_markers = true;
            }

            let encoder = PulseEncoder::new(config);
            let stream = encoder.encode(&text, encoding);

            match json {
                Some(path) => StreamDump::new(&stream, encoder.config()).save(&path)?,
                None => {
                    let units = encoder.text_to_binary(&text);
                    let steps = ConversionSteps::from_units(&text, &units, encoding);
                    ui::print_banner();
                    ui::print_stream(&stream, &steps);
                }
            }
        }
        Commands::Step {
            text,
            encoding,
            config,
            interval_ms,
        } => {
            let encoder = PulseEncoder::new(load_config(config.as_ref())?);
            let stream = encoder.encode(&text, encoding);
            let progress = ProgressManager::new();
            let mut stdout = std::io::stdout().lock();
            ui::step_through(
                &stream,
                &progress,
                Duration::from_millis(interval_ms),
                &mut stdout,
            )?;
            progress.finish_all();
        }
        Commands::List => ui::print_encodings(),
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
