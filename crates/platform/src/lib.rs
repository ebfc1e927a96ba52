//! Hardware Abstraction Layer for SPI TFT panel drivers
//!
//! This crate provides the trait-based seams the panel pipeline talks
//! through, so the pipeline can be developed and tested without a panel
//! attached.
//!
//! # Architecture Layers
//!
//! ```text
//! Host / firmware (owns the framebuffer and the SPI bus)
//!         ↓
//! Panel pipeline (panel crate: damage, conversion, state machine)
//!         ↓
//! Platform HAL (this crate - trait abstractions + pixel data model)
//!         ↓
//! embedded-hal implementations (SPI device, GPIO, delay)
//! ```
//!
//! # Contents
//!
//! - [`pixel`] - [`PixelFormat`], [`Rect`], [`PixelSource`] with scoped read access
//! - [`link`] - [`PanelLink`], the command/pixel transport
//! - [`backlight`] - [`Backlight`] with GPIO and absent implementations
//! - [`power`] - [`PowerProbe`] for warm-start detection
//! - [`display`] - [`DisplayPipeline`] lifecycle hooks and panel status enums
//! - [`mocks`] - recording test doubles (`std` feature or tests only)
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and the [`mocks`] module
//! - `defmt`: `defmt::Format` derives on all public types
//!
//! # Example
//!
//! ```
//! use platform::{PixelBuffer, PixelFormat, Rect, SourceReadGuard};
//!
//! let bytes = [0u8; 4 * 4 * 2];
//! let fb = PixelBuffer::new(&bytes, 4, 2, PixelFormat::Xrgb8888).unwrap();
//! let guard = SourceReadGuard::acquire(&fb).unwrap();
//! assert_eq!(guard.row(1).map(<[u8]>::len), Some(16));
//! assert_eq!(Rect::full(4, 2).area(), 8);
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
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod backlight;
pub mod display;
pub mod link;
pub mod mocks;
pub mod pixel;
pub mod power;

pub use backlight::{Backlight, GpioBacklight, NoBacklight};
pub use display::{DisplayPipeline, FlushOutcome, PanelHealth, PanelPowerState};
pub use link::{LinkError, LinkErrorKind, PanelLink};
pub use pixel::{PixelBuffer, PixelFormat, PixelSource, Rect, SourceError, SourceReadGuard};
pub use power::{ColdBoot, PinProbe, PowerProbe};
