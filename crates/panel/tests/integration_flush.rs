//! Flush integration tests: the exact SPI stream a panel produces.
//!
//! Run with: cargo test -p panel --test integration_flush
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use panel::{Panel, PanelConfig, SpiLink};
use panel_specs::displays::ILI9488_SX035HV006;
use platform::mocks::{FixedProbe, LinkEvent, MockBacklight, RecordingLink};
use platform::{FlushOutcome, PanelPowerState, PixelBuffer, PixelFormat, Rect};

const W: u16 = 320;
const H: u16 = 480;
const FRAME_WIRE: usize = W as usize * H as usize * 3;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the three SPI expectations that correspond to one `spi.write(&data)` call
/// via the `SpiDevice` trait.
fn spi_device_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::transaction_end(),
    ]
}

/// SPI expectations of a command with parameters.
fn command(code: u8, args: &[u8]) -> Vec<SpiTransaction<u8>> {
    let mut v = spi_device_write(&[code]).to_vec();
    if !args.is_empty() {
        v.extend(spi_device_write(args));
    }
    v
}

/// D/C expectations of a command with parameters.
fn command_dc(has_args: bool) -> Vec<PinTransaction> {
    let mut v = vec![PinTransaction::set(PinState::Low)];
    if has_args {
        v.push(PinTransaction::set(PinState::High));
    }
    v
}

/// Solid XRGB8888 frame, one little-endian `u32` per pixel.
fn solid_frame(xrgb: u32) -> Vec<u8> {
    xrgb.to_le_bytes()
        .iter()
        .copied()
        .cycle()
        .take(usize::from(W) * usize::from(H) * 4)
        .collect()
}

// ---------------------------------------------------------------------------
// Test: first flush after a warm start
// ---------------------------------------------------------------------------

/// A warm-started panel sends MADCTL, COLMOD (the controller's format is
/// unknown), the full window and one RAMWR with 460 800 bytes of
/// `{00, 00, AA}`, chunked at 64 KiB inside one CS-held transaction.
/// A later 2×2 damage sends only the window, RAMWR and 12 bytes.
#[test]
fn test_full_then_partial_flush_over_spi() {
    let fb_bytes = solid_frame(0xFF00_00AA);
    let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

    let wire_frame: Vec<u8> = [0x00, 0x00, 0xAA]
        .iter()
        .copied()
        .cycle()
        .take(FRAME_WIRE)
        .collect();

    let mut spi_exp = Vec::new();
    spi_exp.extend(command(0x36, &[0x40]));
    spi_exp.extend(command(0x3A, &[0x66]));
    spi_exp.extend(command(0x2A, &[0x00, 0x00, 0x01, 0x3F]));
    spi_exp.extend(command(0x2B, &[0x00, 0x00, 0x01, 0xDF]));
    spi_exp.extend(command(0x2C, &[]));
    spi_exp.push(SpiTransaction::transaction_start());
    for chunk in wire_frame.chunks(64 * 1024) {
        spi_exp.push(SpiTransaction::write_vec(chunk.to_vec()));
    }
    spi_exp.push(SpiTransaction::transaction_end());
    // Second flush: 2×2 at (10, 20).
    spi_exp.extend(command(0x2A, &[0x00, 10, 0x00, 11]));
    spi_exp.extend(command(0x2B, &[0x00, 20, 0x00, 21]));
    spi_exp.extend(command(0x2C, &[]));
    spi_exp.extend(spi_device_write(&wire_frame[..12]));

    let mut dc_exp = Vec::new();
    for _ in 0..4 {
        dc_exp.extend(command_dc(true));
    }
    dc_exp.extend(command_dc(false));
    dc_exp.push(PinTransaction::set(PinState::High));
    dc_exp.extend(command_dc(true));
    dc_exp.extend(command_dc(true));
    dc_exp.extend(command_dc(false));
    dc_exp.push(PinTransaction::set(PinState::High));

    let mut spi = SpiMock::new(&spi_exp);
    let mut dc = PinMock::new(&dc_exp);
    let mut tx = vec![0u8; FRAME_WIRE];

    let mut panel = Panel::new(
        SpiLink::new(spi.clone(), dc.clone()),
        MockBacklight::new(),
        NoopDelay,
        PanelConfig::new(&ILI9488_SX035HV006),
        &mut tx,
    )
    .unwrap()
    .with_probe(FixedProbe(true));

    panel.power_on(&fb).unwrap();
    assert_eq!(panel.state(), PanelPowerState::Ready);

    let hint = Rect::new(10, 20, 12, 22);
    assert_eq!(panel.on_damage(&fb, hint), Ok(FlushOutcome::Flushed(hint)));
    assert_eq!(panel.status().bytes, (FRAME_WIRE + 12) as u64);

    spi.done();
    dc.done();
}

// ---------------------------------------------------------------------------
// Test: cold start stream
// ---------------------------------------------------------------------------

/// After the init sequence, a cold bring-up emits exactly MADCTL, CASET,
/// PASET, RAMWR and one full-frame payload.
#[test]
fn test_cold_start_ends_with_single_full_write() {
    let fb_bytes = solid_frame(0xFF00_00AA);
    let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();
    let mut tx = vec![0u8; FRAME_WIRE];
    let mut link = RecordingLink::new();

    let mut panel = Panel::new(
        &mut link,
        MockBacklight::new(),
        NoopDelay,
        PanelConfig::new(&ILI9488_SX035HV006),
        &mut tx,
    )
    .unwrap();
    panel.power_on(&fb).unwrap();
    drop(panel);

    let init_len = ILI9488_SX035HV006.init_sequence.len();
    let tail = &link.events()[init_len..];
    assert_eq!(tail.len(), 5);
    assert_eq!(
        tail[0],
        LinkEvent::Command { code: 0x36, args: vec![0x40] }
    );
    assert_eq!(
        tail[1],
        LinkEvent::Command { code: 0x2A, args: vec![0x00, 0x00, 0x01, 0x3F] }
    );
    assert_eq!(
        tail[2],
        LinkEvent::Command { code: 0x2B, args: vec![0x00, 0x00, 0x01, 0xDF] }
    );
    assert_eq!(tail[3], LinkEvent::Command { code: 0x2C, args: vec![] });
    match &tail[4] {
        LinkEvent::Pixels(px) => {
            assert_eq!(px.len(), FRAME_WIRE);
            assert!(px.chunks(3).all(|p| p == [0x00, 0x00, 0xAA]));
        }
        other => panic!("expected pixel payload, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: RGB565 source
// ---------------------------------------------------------------------------

/// An RGB565 framebuffer switches the controller to 16 bpp once and sends
/// byte-swapped pixels.
#[test]
fn test_rgb565_switches_colmod_once() {
    let px: u16 = 0xF800;
    let fb_bytes: Vec<u8> = px
        .to_le_bytes()
        .iter()
        .copied()
        .cycle()
        .take(usize::from(W) * usize::from(H) * 2)
        .collect();
    let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Rgb565).unwrap();
    let mut tx = vec![0u8; FRAME_WIRE];
    let mut link = RecordingLink::new();

    let config = PanelConfig::new(&ILI9488_SX035HV006).swap_bytes(true);
    let mut panel = Panel::new(&mut link, MockBacklight::new(), NoopDelay, config, &mut tx).unwrap();
    panel.power_on(&fb).unwrap();
    panel.on_damage(&fb, Rect::new(0, 0, 1, 1)).unwrap();
    drop(panel);

    let colmods: Vec<&LinkEvent> = link
        .events()
        .iter()
        .filter(|e| matches!(e, LinkEvent::Command { code: 0x3A, .. }))
        .collect();
    // One from the init sequence (18 bpp), one switch to 16 bpp.
    assert_eq!(colmods.len(), 2);
    assert_eq!(link.last_args(0x3A), Some(&[0x55][..]));
    assert_eq!(
        link.events().last(),
        Some(&LinkEvent::Pixels(vec![0xF8, 0x00]))
    );
}
