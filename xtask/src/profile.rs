use anyhow::Result;
use colored::Colorize;
use panel_specs::displays::{ILI9488_MINIMAL, ILI9488_SX035HV006};
use panel_specs::PanelProfile;

const PROFILES: &[&PanelProfile] = &[&ILI9488_SX035HV006, &ILI9488_MINIMAL];

pub fn run(name: Option<&str>, list: bool) -> Result<()> {
    if list || name.is_none() {
        println!();
        println!("{}", "Built-in panel profiles:".cyan().bold());
        for p in PROFILES {
            println!(
                "  {:<24} {}×{}  {:?}",
                p.name, p.native_width, p.native_height, p.wire_format
            );
        }
        println!();
        return Ok(());
    }

    let wanted = name.unwrap_or_default();
    let Some(profile) = find(wanted) else {
        anyhow::bail!("unknown profile '{wanted}' (try --list)");
    };

    println!();
    println!("{}", profile.name.cyan().bold());
    println!(
        "  controller {:?}   {}×{}   {:?}   {} Hz   chunk {} B",
        profile.controller,
        profile.native_width,
        profile.native_height,
        profile.wire_format,
        profile.spi_hz,
        profile.max_transfer
    );
    println!(
        "  reset: {} ms high, {} ms low, {} ms settle",
        profile.reset.idle_high_ms, profile.reset.pulse_ms, profile.reset.settle_ms
    );
    println!();
    for (i, step) in profile.init_sequence.iter().enumerate() {
        let wait = if step.delay_ms > 0 {
            format!("  (+{} ms)", step.delay_ms).dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {i:>2}  {:#04x}  {:02x?}{wait}", step.command, step.args);
    }
    println!();
    println!(
        "{}",
        format!(
            "  {} commands, {} ms of fixed delays, {} byte frame",
            profile.init_sequence.len(),
            profile.init_delay_ms(),
            profile.frame_bytes()
        )
        .green()
    );
    println!();
    Ok(())
}

fn find(name: &str) -> Option<&'static PanelProfile> {
    PROFILES
        .iter()
        .copied()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
