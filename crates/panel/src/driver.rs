//! ILI9488 panel state machine
//!
//! Drives one panel from power-on to pixel updates:
//!
//! ```text
//!            power_on                      init ok, MADCTL, full flush
//!   Off ──────────────▶ Resetting ─▶ Initializing ─────────────────────▶ Ready
//!   │ ▲ ▲                                   │ any failure                 ▲   │ ▲
//!   │ │ └───────────────────────────────────┘                             │   │ │
//!   │ │                                                           disable │   ▼ │ enable
//!   │ └─────────────────────────── power_off (any state) ─────────────── │ Disabled
//!   └──── warm start (probe reports power): MADCTL, full flush ──────────┘
//! ```
//!
//! Only `Ready` produces pixel traffic. Damage reported in any other state
//! is accumulated and sent by the full-screen flush that ends `power_on` /
//! `enable`.
//!
//! # Flush
//!
//! ```text
//! [COLMOD fmt]   only when the payload format differs from the panel's
//! CASET  xs xe   big-endian, offsets applied
//! PASET  ys ye
//! RAMWR  <pixels>
//! ```
//!
//! Pending damage is cleared only after the pixels went out; a failed
//! flush leaves it for the next attempt.

// Flush statistics use saturating adds; everything else is bounded by the
// u16 panel geometry.
#![allow(clippy::arithmetic_side_effects)]

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use panel_specs::commands::{
    COLUMN_ADDRESS, DISPLAY_OFF, MEMORY_WRITE, PAGE_ADDRESS, PIXEL_FORMAT, SLEEP_IN,
};
use panel_specs::{commands::ADDRESS_MODE, WireFormat};
use platform::{
    Backlight, ColdBoot, DisplayPipeline, FlushOutcome, PanelHealth, PanelLink, PanelPowerState,
    PixelSource, PowerProbe, Rect,
};

use crate::config::{PanelConfig, WarmStart};
use crate::convert::{self, ConvertError};
use crate::damage::DamageTracker;
use crate::error::PanelError;
use crate::transmit::TransmitBuffer;
use crate::window::{compute_window, PanelGeometry, WindowAddress};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Snapshot of a panel's state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelStatus {
    /// Power/enable state.
    pub state: PanelPowerState,
    /// Whether the panel shows the current framebuffer.
    pub health: PanelHealth,
    /// Flushes completed since construction.
    pub frames: u32,
    /// Pixel bytes sent since construction.
    pub bytes: u64,
    /// Flushes that failed since construction.
    pub failed_flushes: u32,
    /// State changes since construction.
    pub transitions: u32,
    /// Damage waiting to be sent.
    pub pending: Option<Rect>,
}

/// Placeholder reset pin for panels without a reset line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReset;

impl ErrorType for NoReset {
    type Error = Infallible;
}

impl OutputPin for NoReset {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// One ILI9488 panel.
///
/// Generic over:
/// - `L` — the [`PanelLink`] (usually [`crate::SpiLink`]).
/// - `RST` — reset [`OutputPin`]; [`NoReset`] when the board has none.
/// - `BL` — [`Backlight`].
/// - `D` — [`DelayNs`] for reset and init timing.
/// - `P` — [`PowerProbe`] for warm-start detection; [`ColdBoot`] by default.
///
/// In host tests supply `platform::mocks::RecordingLink` and
/// `embedded_hal_mock::eh1::delay::NoopDelay`.
pub struct Panel<'buf, L, RST, BL, D, P = ColdBoot> {
    link: L,
    reset: Option<RST>,
    backlight: BL,
    delay: D,
    probe: P,
    config: PanelConfig,
    geometry: PanelGeometry,
    state: PanelPowerState,
    health: PanelHealth,
    damage: DamageTracker,
    tx: TransmitBuffer<'buf>,
    /// COLMOD currently programmed; `None` when unknown.
    wire: Option<WireFormat>,
    frames: u32,
    bytes: u64,
    failed_flushes: u32,
    transitions: u32,
}

impl<'buf, L, BL, D> Panel<'buf, L, NoReset, BL, D, ColdBoot>
where
    L: PanelLink,
    BL: Backlight,
    D: DelayNs,
{
    /// Create a panel in `Off`, without reset line or power probe.
    ///
    /// `buffer` must hold a full frame at 3 bytes per pixel.
    pub fn new(
        link: L,
        backlight: BL,
        delay: D,
        config: PanelConfig,
        buffer: &'buf mut [u8],
    ) -> Result<Self, PanelError> {
        let geometry = config.geometry();
        let tx = TransmitBuffer::new(buffer, &geometry)?;
        Ok(Self {
            link,
            reset: None,
            backlight,
            delay,
            probe: ColdBoot,
            config,
            geometry,
            state: PanelPowerState::Off,
            health: PanelHealth::Dark,
            damage: DamageTracker::new(),
            tx,
            wire: None,
            frames: 0,
            bytes: 0,
            failed_flushes: 0,
            transitions: 0,
        })
    }
}

impl<'buf, L, RST, BL, D, P> Panel<'buf, L, RST, BL, D, P>
where
    L: PanelLink,
    RST: OutputPin,
    BL: Backlight,
    D: DelayNs,
    P: PowerProbe,
{
    /// Attach a reset line.
    pub fn with_reset<R: OutputPin>(self, reset: R) -> Panel<'buf, L, R, BL, D, P> {
        Panel {
            link: self.link,
            reset: Some(reset),
            backlight: self.backlight,
            delay: self.delay,
            probe: self.probe,
            config: self.config,
            geometry: self.geometry,
            state: self.state,
            health: self.health,
            damage: self.damage,
            tx: self.tx,
            wire: self.wire,
            frames: self.frames,
            bytes: self.bytes,
            failed_flushes: self.failed_flushes,
            transitions: self.transitions,
        }
    }

    /// Attach a power probe for warm-start detection.
    pub fn with_probe<Q: PowerProbe>(self, probe: Q) -> Panel<'buf, L, RST, BL, D, Q> {
        Panel {
            link: self.link,
            reset: self.reset,
            backlight: self.backlight,
            delay: self.delay,
            probe,
            config: self.config,
            geometry: self.geometry,
            state: self.state,
            health: self.health,
            damage: self.damage,
            tx: self.tx,
            wire: self.wire,
            frames: self.frames,
            bytes: self.bytes,
            failed_flushes: self.failed_flushes,
            transitions: self.transitions,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current power/enable state.
    pub fn state(&self) -> PanelPowerState {
        self.state
    }

    /// Logical geometry.
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Configuration the panel was built with.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Damage waiting to be sent.
    pub fn pending_damage(&self) -> Option<Rect> {
        self.damage.pending()
    }

    /// Diagnostics snapshot.
    pub fn status(&self) -> PanelStatus {
        PanelStatus {
            state: self.state,
            health: self.health,
            frames: self.frames,
            bytes: self.bytes,
            failed_flushes: self.failed_flushes,
            transitions: self.transitions,
            pending: self.damage.pending(),
        }
    }

    /// The transport.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// The transport, mutably (e.g. to inject faults in tests).
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// The backlight.
    pub fn backlight(&self) -> &BL {
        &self.backlight
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Bring the panel from `Off` to `Ready` showing `source`.
    ///
    /// Cold path: reset pulse, init sequence, MADCTL, full-screen flush,
    /// backlight on. When the probe reports the panel already powered and
    /// the policy is [`WarmStart::SkipInitSequence`], the reset pulse and
    /// init sequence are skipped.
    ///
    /// Any failure leaves the panel in `Off` with health
    /// [`PanelHealth::InitFailed`]. Nothing is retried.
    pub fn power_on<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<(), PanelError> {
        if self.state != PanelPowerState::Off {
            return Err(PanelError::InvalidState(self.state));
        }

        let warm = self.config.warm_start_policy() == WarmStart::SkipInitSequence
            && self.probe.is_powered();

        let result = if warm {
            panel_info!("panel already powered, skipping reset and init sequence");
            // Whatever COLMOD the previous owner left is unknown.
            self.wire = None;
            Ok(())
        } else {
            self.cold_init()
        };

        let result = result
            .and_then(|()| self.set_address_mode())
            .and_then(|()| {
                self.damage.mark_full(self.geometry.width, self.geometry.height);
                self.flush_pending(source).map(|_| ())
            });

        match result {
            Ok(()) => {
                self.backlight.enable();
                self.health = PanelHealth::Current;
                self.set_state(PanelPowerState::Ready);
                Ok(())
            }
            Err(e) => {
                panel_error!("panel bring-up failed: {}", e);
                self.health = PanelHealth::InitFailed;
                self.wire = None;
                self.set_state(PanelPowerState::Off);
                Err(e)
            }
        }
    }

    /// Turn a `Ready` panel dark.
    ///
    /// Switches the backlight off; a panel without backlight control is
    /// blanked with a full-screen black write instead. Damage reported
    /// while disabled is kept for [`Panel::enable`]. Disabling a disabled
    /// panel does nothing.
    pub fn disable(&mut self) -> Result<(), PanelError> {
        match self.state {
            PanelPowerState::Ready => {}
            PanelPowerState::Disabled => return Ok(()),
            state => return Err(PanelError::InvalidState(state)),
        }

        if self.backlight.is_present() {
            self.backlight.disable();
        } else if let Err(e) = self.blank() {
            // Best-effort, like a backlight; `enable` repaints everything.
            panel_warn!("blanking panel failed: {}", e);
        }
        self.set_state(PanelPowerState::Disabled);
        Ok(())
    }

    /// Bring a `Disabled` panel back to `Ready`: one full-screen flush of
    /// `source`, then backlight on.
    ///
    /// On failure the panel stays `Disabled` with full-screen damage
    /// pending.
    pub fn enable<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<(), PanelError> {
        if self.state != PanelPowerState::Disabled {
            return Err(PanelError::InvalidState(self.state));
        }

        self.damage.mark_full(self.geometry.width, self.geometry.height);
        match self.flush_pending(source) {
            Ok(_) => {
                self.backlight.enable();
                self.health = PanelHealth::Current;
                self.set_state(PanelPowerState::Ready);
                Ok(())
            }
            Err(e) => {
                panel_warn!("re-enable flush failed: {}", e);
                self.health = PanelHealth::Stale;
                Err(e)
            }
        }
    }

    /// Power the panel down from any state.
    ///
    /// Backlight off, then DISPLAY_OFF and SLEEP_IN if the controller was
    /// initialised (best-effort), then the reset line is held low.
    pub fn power_off(&mut self) {
        self.backlight.disable();
        if matches!(
            self.state,
            PanelPowerState::Ready | PanelPowerState::Disabled
        ) {
            if let Err(e) = self
                .link
                .send_command(DISPLAY_OFF, &[])
                .and_then(|()| self.link.send_command(SLEEP_IN, &[]))
            {
                panel_warn!("display off / sleep in failed: {}", e);
            }
        }
        if let Some(rst) = self.reset.as_mut() {
            if rst.set_low().is_err() {
                panel_warn!("holding reset low failed");
            }
        }
        self.wire = None;
        self.health = PanelHealth::Dark;
        self.set_state(PanelPowerState::Off);
    }

    /// Report that `hint` of `source` changed, and flush if `Ready`.
    ///
    /// - `Flushed(rect)`: `rect` (pending damage merged with `hint`) was sent.
    /// - `NoDamage`: nothing pending.
    /// - `Deferred`: not `Ready`; the damage is kept.
    ///
    /// A transport or conversion failure keeps the damage and marks the
    /// panel stale; the panel stays `Ready`.
    pub fn on_damage<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        hint: Rect,
    ) -> Result<FlushOutcome, PanelError> {
        debug_assert!(hint.is_well_formed(), "malformed damage rectangle");
        debug_assert!(
            self.geometry.bounds().contains_rect(&hint),
            "damage rectangle outside the panel"
        );
        self.damage
            .add(hint.clamp_to(self.geometry.width, self.geometry.height));

        if self.state != PanelPowerState::Ready {
            panel_trace!("damage {} deferred while {}", hint, self.state);
            return Ok(FlushOutcome::Deferred);
        }

        match self.flush_pending(source) {
            Ok(Some(rect)) => {
                self.health = PanelHealth::Current;
                Ok(FlushOutcome::Flushed(rect))
            }
            Ok(None) => Ok(FlushOutcome::NoDamage),
            Err(e) => {
                self.health = PanelHealth::Stale;
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Bring-up helpers
    // -----------------------------------------------------------------------

    fn set_state(&mut self, next: PanelPowerState) {
        if next != self.state {
            panel_debug!("panel {} -> {}", self.state, next);
            self.state = next;
            self.transitions = self.transitions.saturating_add(1);
        }
    }

    /// Reset pulse and init sequence.
    fn cold_init(&mut self) -> Result<(), PanelError> {
        self.set_state(PanelPowerState::Resetting);
        self.hardware_reset()?;
        self.set_state(PanelPowerState::Initializing);
        self.run_init_sequence()?;
        self.wire = Some(self.config.profile().wire_format);
        Ok(())
    }

    /// Pulse the reset line per the profile's timing. No line, no pulse.
    fn hardware_reset(&mut self) -> Result<(), PanelError> {
        let timing = self.config.profile().reset;
        let Some(rst) = self.reset.as_mut() else {
            return Ok(());
        };
        if timing.idle_high_ms > 0 {
            rst.set_high().map_err(|_| PanelError::Gpio)?;
            self.delay.delay_ms(timing.idle_high_ms);
        }
        rst.set_low().map_err(|_| PanelError::Gpio)?;
        self.delay.delay_ms(timing.pulse_ms);
        rst.set_high().map_err(|_| PanelError::Gpio)?;
        self.delay.delay_ms(timing.settle_ms);
        Ok(())
    }

    /// Send every init step in order, honouring post-command delays.
    fn run_init_sequence(&mut self) -> Result<(), PanelError> {
        let profile = self.config.profile();
        for (step, cmd) in profile.init_sequence.iter().enumerate() {
            self.link
                .send_command(cmd.command, cmd.args)
                .map_err(|source| PanelError::Init {
                    step,
                    command: cmd.command,
                    source,
                })?;
            if cmd.delay_ms > 0 {
                self.delay.delay_ms(cmd.delay_ms);
            }
        }
        panel_info!(
            "{}: init sequence done ({} commands)",
            profile.name,
            profile.init_sequence.len()
        );
        Ok(())
    }

    /// MADCTL for the configured rotation.
    fn set_address_mode(&mut self) -> Result<(), PanelError> {
        let madctl = self.config.madctl();
        self.link
            .send_command(ADDRESS_MODE, &[madctl])
            .map_err(|source| PanelError::Init {
                step: self.config.profile().init_sequence.len(),
                command: ADDRESS_MODE,
                source,
            })
    }

    // -----------------------------------------------------------------------
    // Flush
    // -----------------------------------------------------------------------

    /// Send the pending damage of `source`. `Ok(None)` when nothing is pending.
    fn flush_pending<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<Option<Rect>, PanelError> {
        let Some(pending) = self.damage.pending() else {
            return Ok(None);
        };
        let rect = pending
            .clamp_to(self.geometry.width, self.geometry.height)
            .clamp_to(source.width(), source.height());
        if rect.is_empty() {
            self.damage.clear();
            return Ok(None);
        }

        let format = source.format();
        let Some(wire) = convert::wire_format(format) else {
            panel_warn!("unsupported pixel format {}, flush skipped", format);
            self.failed_flushes = self.failed_flushes.saturating_add(1);
            return Err(ConvertError::UnsupportedFormat(format).into());
        };

        let swap = self.config.swaps_bytes();
        let len = convert::convert(source, rect, swap, self.tx.as_mut_slice()).map_err(|e| {
            self.failed_flushes = self.failed_flushes.saturating_add(1);
            PanelError::Convert(e)
        })?;

        if let Err(e) = self.write_region(wire, rect, len) {
            panel_warn!("flush of {} failed: {}", rect, e);
            self.failed_flushes = self.failed_flushes.saturating_add(1);
            return Err(PanelError::Link(e));
        }

        self.damage.clear();
        self.frames = self.frames.saturating_add(1);
        self.bytes = self.bytes.saturating_add(len as u64);
        panel_trace!("flushed {} ({} bytes)", rect, len);
        Ok(Some(rect))
    }

    /// COLMOD (if needed), window, RAMWR and the first `len` transmit bytes.
    fn write_region(
        &mut self,
        wire: WireFormat,
        rect: Rect,
        len: usize,
    ) -> Result<(), platform::LinkError> {
        if self.wire != Some(wire) {
            self.link.send_command(PIXEL_FORMAT, &[wire.colmod()])?;
            self.wire = Some(wire);
        }
        let window = compute_window(rect, &self.geometry);
        self.set_window(&window)?;
        self.link.send_command(MEMORY_WRITE, &[])?;
        self.link.send_pixels(self.tx.filled(len))
    }

    fn set_window(&mut self, window: &WindowAddress) -> Result<(), platform::LinkError> {
        self.link
            .send_command(COLUMN_ADDRESS, &window.column_args())?;
        self.link.send_command(PAGE_ADDRESS, &window.page_args())
    }

    /// Full-screen black in the current wire format.
    fn blank(&mut self) -> Result<(), platform::LinkError> {
        let wire = self.wire.unwrap_or(self.config.profile().wire_format);
        let len = self.geometry.pixel_count() * wire.bytes_per_pixel();
        if self.wire != Some(wire) {
            self.link.send_command(PIXEL_FORMAT, &[wire.colmod()])?;
            self.wire = Some(wire);
        }
        let window = compute_window(self.geometry.bounds(), &self.geometry);
        self.set_window(&window)?;
        self.link.send_command(MEMORY_WRITE, &[])?;
        let black = self.tx.fill(len, 0x00);
        self.link.send_pixels(black)
    }
}

// ---------------------------------------------------------------------------
// DisplayPipeline
// ---------------------------------------------------------------------------

impl<L, RST, BL, D, P> DisplayPipeline for Panel<'_, L, RST, BL, D, P>
where
    L: PanelLink,
    RST: OutputPin,
    BL: Backlight,
    D: DelayNs,
    P: PowerProbe,
{
    type Error = PanelError;

    fn on_enable<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<(), PanelError> {
        match self.state {
            PanelPowerState::Off => self.power_on(source),
            PanelPowerState::Disabled => self.enable(source),
            PanelPowerState::Ready => Ok(()),
            state => Err(PanelError::InvalidState(state)),
        }
    }

    fn on_disable(&mut self) -> Result<(), PanelError> {
        self.disable()
    }

    fn on_damage<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        hint: Rect,
    ) -> Result<FlushOutcome, PanelError> {
        Panel::on_damage(self, source, hint)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use panel_specs::displays::{ILI9488_MINIMAL, ILI9488_SX035HV006};
    use platform::mocks::{FixedProbe, LinkEvent, MockBacklight, RecordingLink};
    use platform::{LinkErrorKind, PixelBuffer, PixelFormat};

    const W: u16 = 320;
    const H: u16 = 480;
    const FRAME: usize = W as usize * H as usize * 3;

    fn black_frame() -> Vec<u8> {
        vec![0u8; W as usize * H as usize * 4]
    }

    fn panel<'a>(
        link: &'a mut RecordingLink,
        buf: &'a mut [u8],
    ) -> Panel<'a, &'a mut RecordingLink, NoReset, MockBacklight, NoopDelay> {
        Panel::new(
            link,
            MockBacklight::new(),
            NoopDelay,
            PanelConfig::new(&ILI9488_SX035HV006),
            buf,
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_short_buffer() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME - 1];
        let err = Panel::new(
            &mut link,
            MockBacklight::new(),
            NoopDelay,
            PanelConfig::new(&ILI9488_SX035HV006),
            &mut buf,
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            PanelError::BufferTooSmall { needed: FRAME, available: FRAME - 1 }
        );
    }

    #[test]
    fn cold_power_on_runs_sequence_then_flushes() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let mut p = panel(&mut link, &mut buf);
        p.power_on(&fb).unwrap();
        assert_eq!(p.state(), PanelPowerState::Ready);
        assert!(p.backlight().is_lit());
        let status = p.status();
        assert_eq!(status.health, PanelHealth::Current);
        assert_eq!((status.frames, status.bytes), (1, FRAME as u64));
        drop(p);

        let mut expected: Vec<u8> = ILI9488_SX035HV006
            .init_sequence
            .iter()
            .map(|s| s.command)
            .collect();
        // Init leaves COLMOD at 18 bpp, so the first flush needs no COLMOD.
        expected.extend([ADDRESS_MODE, COLUMN_ADDRESS, PAGE_ADDRESS, MEMORY_WRITE]);
        assert_eq!(link.command_codes(), expected);
        assert_eq!(link.last_args(ADDRESS_MODE), Some(&[0x40][..]));
        assert_eq!(link.pixel_bytes(), FRAME);
    }

    #[test]
    fn reset_line_is_pulsed_with_profile_timing() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();
        // ILI9488_MINIMAL holds the line high before the pulse.
        let mut rst = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut p = Panel::new(
            &mut link,
            MockBacklight::new(),
            NoopDelay,
            PanelConfig::new(&ILI9488_MINIMAL),
            &mut buf,
        )
        .unwrap()
        .with_reset(rst.clone());
        p.power_on(&fb).unwrap();
        drop(p);

        rst.done();
        assert_eq!(link.command_codes().first(), Some(&0x11));
        assert_eq!(link.last_args(ADDRESS_MODE), Some(&[0x48][..]));
    }

    #[test]
    fn reset_gpio_failure_leaves_panel_off() {
        use embedded_hal_mock::eh1::MockError;

        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();
        let mut rst = PinMock::new(&[PinTransaction::set(PinState::Low)
            .with_error(MockError::Io(std::io::ErrorKind::NotConnected))]);

        let mut p = panel(&mut link, &mut buf).with_reset(rst.clone());
        assert_eq!(p.power_on(&fb), Err(PanelError::Gpio));
        assert_eq!(p.state(), PanelPowerState::Off);
        assert_eq!(p.status().health, PanelHealth::InitFailed);
        drop(p);

        rst.done();
        assert!(link.events().is_empty());
    }

    #[test]
    fn warm_start_skips_reset_and_init() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();
        // No reset transitions expected.
        let mut rst = PinMock::new(&[]);

        let mut p = panel(&mut link, &mut buf)
            .with_reset(rst.clone())
            .with_probe(FixedProbe(true));
        p.power_on(&fb).unwrap();
        assert_eq!(p.state(), PanelPowerState::Ready);
        // Off -> Ready directly.
        assert_eq!(p.status().transitions, 1);
        drop(p);

        rst.done();
        assert_eq!(
            link.command_codes(),
            vec![ADDRESS_MODE, PIXEL_FORMAT, COLUMN_ADDRESS, PAGE_ADDRESS, MEMORY_WRITE]
        );
        assert_eq!(link.last_args(PIXEL_FORMAT), Some(&[0x66][..]));
    }

    #[test]
    fn always_initialize_ignores_probe() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let config =
            PanelConfig::new(&ILI9488_SX035HV006).warm_start(WarmStart::AlwaysInitialize);
        let mut p = Panel::new(&mut link, MockBacklight::new(), NoopDelay, config, &mut buf)
            .unwrap()
            .with_probe(FixedProbe(true));
        p.power_on(&fb).unwrap();
        drop(p);

        assert_eq!(link.command_codes().first(), Some(&DISPLAY_OFF));
    }

    #[test]
    fn madctl_failure_reports_step_after_sequence() {
        let mut link = RecordingLink::new();
        link.fail_command(ADDRESS_MODE, LinkErrorKind::Bus);
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        // The init sequence itself contains MADCTL at index 6.
        let mut p = panel(&mut link, &mut buf);
        match p.power_on(&fb) {
            Err(PanelError::Init { step: 6, command, .. }) => assert_eq!(command, ADDRESS_MODE),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(p.state(), PanelPowerState::Off);
    }

    #[test]
    fn calls_in_wrong_state_are_rejected() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let mut p = panel(&mut link, &mut buf);
        assert_eq!(
            p.enable(&fb),
            Err(PanelError::InvalidState(PanelPowerState::Off))
        );
        assert_eq!(
            p.disable(),
            Err(PanelError::InvalidState(PanelPowerState::Off))
        );
        p.power_on(&fb).unwrap();
        assert_eq!(
            p.power_on(&fb),
            Err(PanelError::InvalidState(PanelPowerState::Ready))
        );
    }

    #[test]
    fn disable_without_backlight_blanks_panel() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = vec![0xFFu8; W as usize * H as usize * 4];
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let mut p = Panel::new(
            &mut link,
            MockBacklight::absent(),
            NoopDelay,
            PanelConfig::new(&ILI9488_SX035HV006),
            &mut buf,
        )
        .unwrap();
        p.power_on(&fb).unwrap();
        p.link_mut().clear();
        p.disable().unwrap();
        assert_eq!(p.state(), PanelPowerState::Disabled);
        assert_eq!(p.backlight().disable_count(), 0);
        drop(p);

        assert_eq!(
            link.command_codes(),
            vec![COLUMN_ADDRESS, PAGE_ADDRESS, MEMORY_WRITE]
        );
        match link.events().last() {
            Some(LinkEvent::Pixels(px)) => {
                assert_eq!(px.len(), FRAME);
                assert!(px.iter().all(|&b| b == 0));
            }
            other => panic!("expected pixels, got {other:?}"),
        }
    }

    #[test]
    fn power_off_sleeps_initialised_panel() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let mut p = panel(&mut link, &mut buf);
        p.power_on(&fb).unwrap();
        p.link_mut().clear();
        p.power_off();
        assert_eq!(p.state(), PanelPowerState::Off);
        assert_eq!(p.status().health, PanelHealth::Dark);
        assert!(!p.backlight().is_lit());
        // Off panels accept nothing but damage.
        assert_eq!(
            p.on_damage(&fb, Rect::new(0, 0, 1, 1)),
            Ok(FlushOutcome::Deferred)
        );
        drop(p);

        assert_eq!(link.command_codes(), vec![DISPLAY_OFF, SLEEP_IN]);
    }

    #[test]
    fn pipeline_on_enable_is_idempotent_when_ready() {
        let mut link = RecordingLink::new();
        let mut buf = vec![0u8; FRAME];
        let fb_bytes = black_frame();
        let fb = PixelBuffer::new(&fb_bytes, W, H, PixelFormat::Xrgb8888).unwrap();

        let mut p = panel(&mut link, &mut buf);
        DisplayPipeline::on_enable(&mut p, &fb).unwrap();
        let frames = p.status().frames;
        DisplayPipeline::on_enable(&mut p, &fb).unwrap();
        assert_eq!(p.status().frames, frames);
        DisplayPipeline::on_disable(&mut p).unwrap();
        DisplayPipeline::on_enable(&mut p, &fb).unwrap();
        assert_eq!(p.state(), PanelPowerState::Ready);
        assert_eq!(p.status().frames, frames + 1);
    }
}
