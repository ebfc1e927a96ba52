//! Command bytes
//!
//! MIPI DCS commands shared by MIPI-DBI controllers, followed by the
//! ILI9488 manufacturer commands used in its init sequences.

// ── MIPI DCS ────────────────────────────────────────────────────────────────

/// No operation
pub const NOP: u8 = 0x00;
/// Software reset
pub const SOFT_RESET: u8 = 0x01;
/// Enter sleep mode
pub const SLEEP_IN: u8 = 0x10;
/// Exit sleep mode (needs 120 ms before the next sleep command)
pub const SLEEP_OUT: u8 = 0x11;
/// Normal display mode on
pub const NORMAL_MODE: u8 = 0x13;
/// Display off (frame memory kept)
pub const DISPLAY_OFF: u8 = 0x28;
/// Display on
pub const DISPLAY_ON: u8 = 0x29;
/// Column address set (CASET)
pub const COLUMN_ADDRESS: u8 = 0x2A;
/// Page address set (PASET)
pub const PAGE_ADDRESS: u8 = 0x2B;
/// Memory write (RAMWR)
pub const MEMORY_WRITE: u8 = 0x2C;
/// Memory access control (MADCTL)
pub const ADDRESS_MODE: u8 = 0x36;
/// Interface pixel format (COLMOD)
pub const PIXEL_FORMAT: u8 = 0x3A;

// ── ILI9488 manufacturer commands ───────────────────────────────────────────

/// Interface mode control
pub const IFMODE: u8 = 0xB0;
/// Frame rate control (normal mode)
pub const FRAME_RATE: u8 = 0xB1;
/// Display inversion control
pub const INVERSION: u8 = 0xB4;
/// Display function control
pub const DISPLAY_FUNCTION: u8 = 0xB6;
/// Entry mode set
pub const ENTRY_MODE: u8 = 0xB7;
/// Power control 1
pub const POWER_1: u8 = 0xC0;
/// Power control 2
pub const POWER_2: u8 = 0xC1;
/// VCOM control
pub const VCOM: u8 = 0xC5;
/// Positive gamma correction
pub const POSITIVE_GAMMA: u8 = 0xE0;
/// Negative gamma correction
pub const NEGATIVE_GAMMA: u8 = 0xE1;
/// Adjust control 3
pub const ADJUST_3: u8 = 0xF7;
