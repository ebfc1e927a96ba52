//! Panel configuration
//!
//! A [`PanelConfig`] pairs a static [`PanelProfile`] with the per-board
//! choices: rotation, glass offsets inside controller RAM, RGB565 byte
//! order and warm-start policy.
//!
//! ```
//! use panel::{PanelConfig, WarmStart};
//! use panel_specs::{displays::ILI9488_SX035HV006, Rotation};
//!
//! let config = PanelConfig::new(&ILI9488_SX035HV006)
//!     .rotation(Rotation::Deg90)
//!     .warm_start(WarmStart::AlwaysInitialize);
//! let geometry = config.geometry();
//! assert_eq!((geometry.width, geometry.height), (480, 320));
//! assert_eq!(config.madctl(), 0x20);
//! ```

use panel_specs::{PanelProfile, Rotation};

use crate::window::PanelGeometry;

/// What bring-up does when the platform reports the panel already powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WarmStart {
    /// Trust the probe: skip the reset pulse and init sequence.
    #[default]
    SkipInitSequence,
    /// Ignore the probe and always run the full bring-up.
    AlwaysInitialize,
}

/// Per-panel configuration built on a profile.
#[derive(Debug, Clone, Copy)]
pub struct PanelConfig {
    profile: &'static PanelProfile,
    rotation: Rotation,
    left_offset: u16,
    top_offset: u16,
    swap_bytes: bool,
    warm_start: WarmStart,
}

impl PanelConfig {
    /// Defaults: no rotation, no offsets, warm start allowed, RGB565 bytes
    /// swapped on little-endian hosts (SPI sends the high byte first).
    pub const fn new(profile: &'static PanelProfile) -> Self {
        Self {
            profile,
            rotation: Rotation::Deg0,
            left_offset: 0,
            top_offset: 0,
            swap_bytes: cfg!(target_endian = "little"),
            warm_start: WarmStart::SkipInitSequence,
        }
    }

    /// Set the rotation.
    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set where the visible area starts in controller RAM.
    #[must_use]
    pub const fn offsets(mut self, left: u16, top: u16) -> Self {
        self.left_offset = left;
        self.top_offset = top;
        self
    }

    /// Swap the two bytes of every RGB565 pixel before sending.
    #[must_use]
    pub const fn swap_bytes(mut self, swap: bool) -> Self {
        self.swap_bytes = swap;
        self
    }

    /// Set the warm-start policy.
    #[must_use]
    pub const fn warm_start(mut self, policy: WarmStart) -> Self {
        self.warm_start = policy;
        self
    }

    /// The panel profile.
    pub const fn profile(&self) -> &'static PanelProfile {
        self.profile
    }

    /// Configured rotation.
    pub const fn current_rotation(&self) -> Rotation {
        self.rotation
    }

    /// Whether RGB565 payloads are byte-swapped.
    pub const fn swaps_bytes(&self) -> bool {
        self.swap_bytes
    }

    /// Configured warm-start policy.
    pub const fn warm_start_policy(&self) -> WarmStart {
        self.warm_start
    }

    /// Logical geometry for the configured rotation and offsets.
    pub const fn geometry(&self) -> PanelGeometry {
        let base = PanelGeometry::rotated(
            self.profile.native_width,
            self.profile.native_height,
            self.rotation,
        );
        PanelGeometry {
            left_offset: self.left_offset,
            top_offset: self.top_offset,
            ..base
        }
    }

    /// MADCTL byte for the configured rotation and the profile's color order.
    pub const fn madctl(&self) -> u8 {
        self.profile
            .madctl
            .value(self.rotation, self.profile.color_order)
    }
}
