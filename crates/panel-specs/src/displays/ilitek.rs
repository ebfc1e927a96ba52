//! Ilitek ILI9488 panel profiles
//!
//! Init sequences taken from the module vendors' bring-up code.

use crate::commands::*;
use crate::{ColorOrder, Controller, InitStep, MadctlTable, PanelProfile, ResetTiming, WireFormat};

/// Largest SPI transfer most host controllers accept in one message.
const SPI_MAX_TRANSFER: usize = 64 * 1024;

const SX035HV006_INIT: &[InitStep] = &[
    InitStep::cmd(DISPLAY_OFF),
    InitStep::with_args(
        POSITIVE_GAMMA,
        &[
            0x00, 0x03, 0x09, 0x08, 0x16, 0x0A, 0x3F, 0x78, 0x4C, 0x09, 0x0A, 0x08, 0x16, 0x1A,
            0x0F,
        ],
    ),
    InitStep::with_args(
        NEGATIVE_GAMMA,
        &[
            0x00, 0x16, 0x19, 0x03, 0x0F, 0x05, 0x32, 0x45, 0x46, 0x04, 0x0E, 0x0D, 0x35, 0x37,
            0x0F,
        ],
    ),
    // VREG1OUT / VREG2OUT
    InitStep::with_args(POWER_1, &[0x17, 0x15]),
    // VGH / VGL
    InitStep::with_args(POWER_2, &[0x41]),
    InitStep::with_args(VCOM, &[0x00, 0x12, 0x80]),
    // MX | BGR; replaced by the rotation-specific value after init.
    InitStep::with_args(ADDRESS_MODE, &[0x48]),
    // 18 bits per pixel
    InitStep::with_args(PIXEL_FORMAT, &[0x66]),
    InitStep::with_args(IFMODE, &[0x00]),
    // 60 Hz
    InitStep::with_args(FRAME_RATE, &[0xA0]),
    // 2-dot inversion
    InitStep::with_args(INVERSION, &[0x02]),
    InitStep::with_args(DISPLAY_FUNCTION, &[0x02, 0x02, 0x3B]),
    InitStep::with_args(ENTRY_MODE, &[0xC6]),
    InitStep::with_args(ADJUST_3, &[0xA9, 0x51, 0x2C, 0x82]),
    InitStep::cmd(SLEEP_OUT).then_wait(120),
    InitStep::cmd(NORMAL_MODE),
    InitStep::cmd(DISPLAY_ON).then_wait(100),
];

/// SX035HV006 3.5" module (320×480, ILI9488)
///
/// Full bring-up: gamma tables, power and VCOM settings, 18-bit COLMOD,
/// then sleep-out and display-on.
/// - Reset: 20 ms low, 120 ms settle
/// - Post-init MADCTL comes from the rotation table without BGR
pub const ILI9488_SX035HV006: PanelProfile = PanelProfile {
    name: "SX035HV006 (ILI9488)",
    controller: Controller::ILI9488,
    native_width: 320,
    native_height: 480,
    reset: ResetTiming::ILI9488,
    init_sequence: SX035HV006_INIT,
    madctl: MadctlTable::ILI9488,
    color_order: ColorOrder::Rgb,
    wire_format: WireFormat::Rgb666,
    max_transfer: SPI_MAX_TRANSFER,
    spi_hz: 32_000_000,
};

const MINIMAL_INIT: &[InitStep] = &[
    InitStep::cmd(SLEEP_OUT).then_wait(120),
    InitStep::with_args(PIXEL_FORMAT, &[0x66]),
    InitStep::with_args(ADDRESS_MODE, &[0x48]),
    InitStep::cmd(DISPLAY_ON).then_wait(20),
];

/// Generic ILI9488 module with the controller's power-on defaults
///
/// Minimal bring-up: sleep-out, 18-bit COLMOD, MADCTL, display-on.
/// - Reset: 5 ms high, 20 ms low, 120 ms settle
/// - BGR glass
/// - 4 MHz nominal clock
pub const ILI9488_MINIMAL: PanelProfile = PanelProfile {
    name: "ILI9488 (minimal init)",
    controller: Controller::ILI9488,
    native_width: 320,
    native_height: 480,
    reset: ResetTiming {
        idle_high_ms: 5,
        pulse_ms: 20,
        settle_ms: 120,
    },
    init_sequence: MINIMAL_INIT,
    madctl: MadctlTable::ILI9488,
    color_order: ColorOrder::Bgr,
    wire_format: WireFormat::Rgb666,
    max_transfer: SPI_MAX_TRANSFER,
    spi_hz: 4_000_000,
};
