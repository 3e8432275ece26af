pub mod config;
pub mod error;
pub mod phy;
pub mod ui;
pub mod utils;

pub use config::EncoderConfig;
pub use error::{LineCodeError, Result};
