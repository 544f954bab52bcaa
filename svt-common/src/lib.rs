//! # SVT Common Library
//!
//! Shared code for the skate video track scraper:
//! - Common error type
//! - Configuration loading and run directory layout
//! - Logging initialisation
//! - Date-stamped file naming

pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use error::{Error, Result};
