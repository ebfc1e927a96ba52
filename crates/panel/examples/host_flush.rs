//! Host walk-through of the flush pipeline, no hardware needed.
//!
//! Draws into a [`Canvas`], reports the damage to a [`Panel`] wired to a
//! recording link, and logs the command stream.
//!
//! Run with: cargo run -p panel --example host_flush --features std,tracing
//! (set `RUST_LOG=panel=trace` to see every flush)

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_hal_mock::eh1::delay::NoopDelay;
use panel::{Canvas, Panel, PanelConfig};
use panel_specs::displays::ILI9488_SX035HV006;
use panel_specs::Rotation;
use platform::mocks::{LinkEvent, MockBacklight, RecordingLink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let config = PanelConfig::new(&ILI9488_SX035HV006).rotation(Rotation::Deg90);
    let geometry = config.geometry();
    let (w, h) = (geometry.width, geometry.height);

    let mut fb = vec![0u8; usize::from(w) * usize::from(h) * 4];
    let mut tx = vec![0u8; panel::transmit::required_len(&geometry)];
    let mut link = RecordingLink::new();

    {
        let mut panel = Panel::new(&mut link, MockBacklight::new(), NoopDelay, config, &mut tx)?;
        let mut canvas = Canvas::new(&mut fb, w, h)?;

        canvas.clear(Rgb888::BLACK)?;
        canvas.take_damage();
        panel.power_on(&canvas)?;

        Circle::new(Point::new(200, 120), 80)
            .into_styled(PrimitiveStyle::with_fill(Rgb888::new(0xFF, 0xA5, 0x00)))
            .draw(&mut canvas)?;
        Text::new("ILI9488", Point::new(10, 20), MonoTextStyle::new(&FONT_6X10, Rgb888::WHITE))
            .draw(&mut canvas)?;

        if let Some(damage) = canvas.take_damage() {
            let outcome = panel.on_damage(&canvas, damage)?;
            tracing::info!(?outcome, "flushed drawing");
        }

        panel.disable()?;
        panel.power_off();
        tracing::info!(status = ?panel.status(), "done");
    }

    for event in link.events() {
        match event {
            LinkEvent::Command { code, args } => println!("cmd  {code:#04x} {args:02x?}"),
            LinkEvent::Pixels(px) => println!("data {} bytes", px.len()),
        }
    }
    Ok(())
}
