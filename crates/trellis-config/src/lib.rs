//! # Trellis Configuration Library
//!
//! Configuration for the trellis render engine and its demo driver.
//!
//! ## Features
//!
//! - Multi-format support (TOML, YAML, JSON), selected by file extension
//! - Every field has a default; partial files are fine
//! - Validation of cross-field constraints after parsing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trellis_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("trellis.toml")?;
//!     println!("matching strategy: {:?}", config.render.strategy);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

mod config;
mod loader;

pub use config::*;
pub use loader::*;
