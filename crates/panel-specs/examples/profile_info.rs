//! Panel Profile Example
//!
//! Prints each shipped profile with its derived timing and rotation values.
//!
//! Run with: cargo run --example profile_info

use panel_specs::displays::*;
use panel_specs::{PanelProfile, Rotation};

fn print_profile(profile: &PanelProfile) {
    println!("\n{}", "=".repeat(60));
    println!("Panel: {}", profile.name);
    println!("{}", "=".repeat(60));

    println!("\nGeometry:");
    println!(
        "  Native: {}×{} pixels",
        profile.native_width, profile.native_height
    );
    println!("  Controller: {:?}", profile.controller);
    println!("  Frame: {} bytes at 18 bpp", profile.frame_bytes());

    println!("\nTiming:");
    println!(
        "  Reset: {}ms high, {}ms low, {}ms settle",
        profile.reset.idle_high_ms, profile.reset.pulse_ms, profile.reset.settle_ms
    );
    println!(
        "  Init: {} commands, {}ms of delays",
        profile.init_sequence.len(),
        profile.init_delay_ms()
    );
    println!("  SPI clock: {:.1} MHz", f64::from(profile.spi_hz) / 1e6);

    println!("\nRotation (MADCTL):");
    for rotation in [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ] {
        println!(
            "  {:>4}: {:#04x}",
            rotation.to_string(),
            profile.madctl.value(rotation, profile.color_order)
        );
    }

    println!("\nInit sequence:");
    for step in profile.init_sequence {
        println!(
            "  {:#04x} {:02x?}{}",
            step.command,
            step.args,
            if step.delay_ms > 0 {
                format!(" +{}ms", step.delay_ms)
            } else {
                String::new()
            }
        );
    }
}

fn main() {
    print_profile(&ILI9488_SX035HV006);
    print_profile(&ILI9488_MINIMAL);
}
