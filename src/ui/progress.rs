use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::{LineCodeError, Result};

pub struct ProgressManager {
    mp: MultiProgress,
    bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
}

fn lock_error<E: std::fmt::Display>(e: E) -> LineCodeError {
    LineCodeError::Progress(format!("Lock error: {}", e))
}

impl ProgressManager {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            mp: MultiProgress::with_draw_target(target),
            bars: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// True when nothing is drawn, e.g. stderr is not a terminal
    pub fn is_hidden(&self) -> bool {
        self.mp.is_hidden()
    }

    /// Create a new bar
    /// - `id`: unique bar identifier
    /// - `total`: length of the bar
    /// - `template`: indicatif template
    /// - `message`: initial message
    pub fn create_bar(
        &self,
        id: &str,
        total: u64,
        template: &str,
        message: &str,
    ) -> Result<()> {
        let mut bars = self.bars.lock().map_err(lock_error)?;

        if bars.contains_key(id) {
            return Err(LineCodeError::Progress(format!(
                "Progress bar '{}' already exists",
                id
            )));
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| LineCodeError::Progress(format!("Invalid template: {}", e)))?
            .progress_chars("█▉▊▋▌▍▎▏ ");

        let pb = self
            .mp
            .add(ProgressBar::new(total));
        pb.set_style(style);
        pb.set_message(message.to_string());

        bars.insert(id.to_string(), pb);
        Ok(())
    }

    pub fn set_position(&self, id: &str, pos: u64) -> Result<()> {
        self.with_bar(id, |pb| pb.set_position(pos))
    }

    pub fn set_message(&self, id: &str, message: &str) -> Result<()> {
        self.with_bar(id, |pb| pb.set_message(message.to_string()))
    }

    /// Print a line above the bars.
    ///
    /// A hidden target swallows `MultiProgress::println`, so the line goes
    /// to `fallback` instead.
    pub fn println<W: Write>(&self, line: &str, fallback: &mut W) -> Result<()> {
        if self.is_hidden() {
            writeln!(fallback, "{}", line)?;
            return Ok(());
        }
        self.mp.println(line)?;
        Ok(())
    }

    /// Finish a bar and keep it on screen
    pub fn finish(&self, id: &str, message: &str) -> Result<()> {
        self.with_bar(id, |pb| pb.finish_with_message(message.to_string()))
    }

    pub fn finish_all(&self) {
        if let Ok(mut bars) = self.bars.lock() {
            for (_, pb) in bars.drain() {
                pb.finish();
            }
        }
    }

    fn with_bar(&self, id: &str, f: impl FnOnce(&ProgressBar)) -> Result<()> {
        let bars = self.bars.lock().map_err(lock_error)?;
        match bars.get(id) {
            Some(pb) => {
                f(pb);
                Ok(())
            }
            None => Err(LineCodeError::Progress(format!(
                "Progress bar '{}' not found",
                id
            ))),
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub mod templates {
    pub const STEP: &str =
        "STEP [{bar:30.cyan}] {percent}% ({pos}/{len} bits) {msg}";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lifecycle() {
        let pm = ProgressManager::with_draw_target(ProgressDrawTarget::hidden());
        pm.create_bar("step", 16, templates::STEP, "start").unwrap();
        assert!(matches!(
            pm.create_bar("step", 16, templates::STEP, "again"),
            Err(LineCodeError::Progress(_))
        ));

        pm.set_position("step", 4).unwrap();
        pm.set_message("step", "bit 4").unwrap();
        assert!(pm.set_position("missing", 1).is_err());

        pm.finish("step", "done").unwrap();
        pm.finish_all();
    }

    #[test]
    fn test_hidden_target_prints_to_fallback() {
        let pm = ProgressManager::with_draw_target(ProgressDrawTarget::hidden());
        assert!(pm.is_hidden());

        let mut out = Vec::new();
        pm.println("bit 1", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "bit 1\n");
    }
}
