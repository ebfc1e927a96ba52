//! Panel rotation and MADCTL address-mode tables

use core::fmt;

/// MADCTL row address order (flip vertically).
pub const MADCTL_MY: u8 = 1 << 7;
/// MADCTL column address order (flip horizontally).
pub const MADCTL_MX: u8 = 1 << 6;
/// MADCTL row/column exchange.
pub const MADCTL_MV: u8 = 1 << 5;
/// MADCTL BGR subpixel order.
pub const MADCTL_BGR: u8 = 1 << 3;

/// Clockwise rotation of the logical image relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Rotation {
    /// Native orientation
    #[default]
    Deg0,
    /// 90° clockwise
    Deg90,
    /// 180°
    Deg180,
    /// 270° clockwise
    Deg270,
}

impl Rotation {
    /// Rotation from a device-tree style angle. Only multiples of 90 are valid.
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Angle in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True when logical width and height are the native height and width.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Subpixel order of the panel glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ColorOrder {
    /// Red first
    #[default]
    Rgb,
    /// Blue first; sets [`MADCTL_BGR`]
    Bgr,
}

/// MADCTL address-mode value per rotation, before the BGR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MadctlTable {
    /// 0°
    pub deg0: u8,
    /// 90°
    pub deg90: u8,
    /// 180°
    pub deg180: u8,
    /// 270°
    pub deg270: u8,
}

impl MadctlTable {
    /// ILI9488 modules whose native scan is mirrored horizontally.
    pub const ILI9488: Self = Self {
        deg0: MADCTL_MX,
        deg90: MADCTL_MV,
        deg180: MADCTL_MY,
        deg270: MADCTL_MV | MADCTL_MY | MADCTL_MX,
    };

    /// MADCTL byte for `rotation` with the subpixel order applied.
    pub const fn value(&self, rotation: Rotation, order: ColorOrder) -> u8 {
        let base = match rotation {
            Rotation::Deg0 => self.deg0,
            Rotation::Deg90 => self.deg90,
            Rotation::Deg180 => self.deg180,
            Rotation::Deg270 => self.deg270,
        };
        match order {
            ColorOrder::Rgb => base,
            ColorOrder::Bgr => base | MADCTL_BGR,
        }
    }
}
