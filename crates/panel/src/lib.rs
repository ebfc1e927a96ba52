//! Dirty-region flush pipeline for ILI9488 SPI panels
//!
//! Turns "this rectangle of the framebuffer changed" into the shortest
//! command stream that brings the panel up to date.
//!
//! # Pipeline
//!
//! ```text
//! on_damage(source, hint)
//!         ↓
//! DamageTracker   merge into one pending bounding box
//!         ↓
//! convert         XRGB8888 → RGB888 (18 bpp wire), RGB565 → RGB565
//!         ↓
//! compute_window  CASET / PASET with panel offsets
//!         ↓
//! PanelLink       RAMWR + pixels, chunked over SPI (SpiLink)
//! ```
//!
//! [`Panel`] owns the whole path plus the power state machine
//! (`Off → Resetting → Initializing → Ready ⇄ Disabled`). [`SharedPanel`]
//! wraps it for callers on more than one execution context.
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls
//! - `defmt`: hardware logging and `defmt::Format` derives
//! - `tracing`: host logging
//!
//! # Example
//!
//! ```
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//! use panel::{Panel, PanelConfig};
//! use panel_specs::displays::ILI9488_SX035HV006;
//! use platform::mocks::{MockBacklight, RecordingLink};
//! use platform::{FlushOutcome, PixelBuffer, PixelFormat, Rect};
//!
//! let config = PanelConfig::new(&ILI9488_SX035HV006);
//! let mut tx = vec![0u8; panel::transmit::required_len(&config.geometry())];
//! let fb_bytes = vec![0u8; 320 * 480 * 4];
//! let fb = PixelBuffer::new(&fb_bytes, 320, 480, PixelFormat::Xrgb8888).unwrap();
//!
//! let mut link = RecordingLink::new();
//! let mut panel = Panel::new(&mut link, MockBacklight::new(), NoopDelay, config, &mut tx).unwrap();
//! panel.power_on(&fb).unwrap();
//!
//! let hint = Rect::new(10, 10, 20, 20);
//! assert_eq!(panel.on_damage(&fb, hint), Ok(FlushOutcome::Flushed(hint)));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // command mnemonics (CASET, MADCTL) in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod log;

pub mod canvas;
pub mod config;
pub mod convert;
pub mod damage;
pub mod driver;
pub mod error;
pub mod shared;
pub mod spi_link;
pub mod transmit;
pub mod window;

pub use canvas::Canvas;
pub use config::{PanelConfig, WarmStart};
pub use convert::ConvertError;
pub use damage::{merge, DamageTracker};
pub use driver::{NoReset, Panel, PanelStatus};
pub use error::PanelError;
pub use shared::SharedPanel;
pub use spi_link::SpiLink;
pub use transmit::TransmitBuffer;
pub use window::{compute_window, PanelGeometry, WindowAddress};
