//! TFT Panel Profiles
//!
//! Data-only descriptions of SPI TFT panel modules: native resolution, reset
//! timing, init command sequences, rotation tables and interface pixel
//! format. The `panel` crate's state machine is driven entirely by these.
//!
//! # Features
//!
//! - **no_std compatible** - Profiles are `const` data
//! - **Shipped profiles** - ILI9488 modules in [`displays`]
//! - **Serde support** - Optional serialization for config dumps and tooling
//!
//! # Example
//!
//! ```
//! use panel_specs::displays::ILI9488_SX035HV006;
//! use panel_specs::{ColorOrder, Rotation};
//!
//! let profile = ILI9488_SX035HV006;
//! println!("Panel: {}", profile.name);
//! println!("Resolution: {}×{}", profile.native_width, profile.native_height);
//! println!("Init steps: {}", profile.init_sequence.len());
//!
//! let madctl = profile.madctl.value(Rotation::Deg90, ColorOrder::Rgb);
//! assert_eq!(madctl, 0x20);
//! ```
//!
//! # Custom Profiles
//!
//! ```
//! use panel_specs::commands::{DISPLAY_ON, PIXEL_FORMAT, SLEEP_OUT};
//! use panel_specs::{
//!     ColorOrder, Controller, InitStep, MadctlTable, PanelProfile, ResetTiming, WireFormat,
//! };
//!
//! const MY_PANEL: PanelProfile = PanelProfile {
//!     name: "Custom 3.5\"",
//!     controller: Controller::ILI9488,
//!     native_width: 320,
//!     native_height: 480,
//!     reset: ResetTiming::ILI9488,
//!     init_sequence: &[
//!         InitStep::cmd(SLEEP_OUT).then_wait(120),
//!         InitStep::with_args(PIXEL_FORMAT, &[0x66]),
//!         InitStep::cmd(DISPLAY_ON),
//!     ],
//!     madctl: MadctlTable::ILI9488,
//!     color_order: ColorOrder::Bgr,
//!     wire_format: WireFormat::Rgb666,
//!     max_transfer: 4096,
//!     spi_hz: 10_000_000,
//! };
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod commands;
pub mod displays;
mod profile;
mod rotation;

pub use profile::{Controller, InitStep, PanelProfile, ResetTiming, WireFormat};
pub use rotation::{ColorOrder, MadctlTable, Rotation, MADCTL_BGR, MADCTL_MV, MADCTL_MX, MADCTL_MY};
