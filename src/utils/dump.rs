use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::EncoderConfig;
use crate::error::Result;
use crate::phy::encoder::PulseStream;

/// JSON export of a rendered stream
#[derive(Serialize)]
pub struct StreamDump<'a> {
    pub encoding_name: &'static str,
    pub summary: String,
    pub config: &'a EncoderConfig,
    pub stream: &'a PulseStream,
}

impl<'a> StreamDump<'a> {
    pub fn new(stream: &'a PulseStream, config: &'a EncoderConfig) -> Self {
        Self {
            encoding_name: stream.encoding.name(),
            summary: stream.summary(),
            config,
            stream,
        }
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write to `path`, or to stdout when `path` is `-`
    pub fn save(&self, path: &Path) -> Result<()> {
        if path == Path::new("-") {
            let mut stdout = io::stdout().lock();
            self.write_to(&mut stdout)?;
            writeln!(stdout)?;
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.write_to(BufWriter::new(File::create(path)?))?;
        info!("Stream dump saved to: {}", path.display());
        Ok(())
    }
}
