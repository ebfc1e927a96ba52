//! Pre-configured panel profiles
//!
//! Profiles for shipped ILI9488 modules.

pub mod ilitek;

pub use ilitek::*;
