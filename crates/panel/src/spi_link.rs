//! 4-wire SPI transport with a D/C line
//!
//! | Signal | Role |
//! |--------|------|
//! | SCK/MOSI | Bytes, MSB first |
//! | CS     | Managed by `SpiDevice` |
//! | D/C    | Low for the command byte, high for parameters and pixels |
//!
//! Pixel payloads are split into chunks of at most `max_transfer` bytes
//! (the host controller's message limit). Up to [`OPS_PER_TRANSACTION`]
//! chunks go out in one transaction, so CS stays asserted across them.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{ErrorKind, Operation, SpiDevice};
use panel_specs::PanelProfile;
use platform::{LinkError, LinkErrorKind, PanelLink};

/// Default chunk size: the usual 64 KiB SPI message limit.
pub const DEFAULT_MAX_TRANSFER: usize = 64 * 1024;

/// Chunks batched into one CS-held transaction.
pub const OPS_PER_TRANSACTION: usize = 8;

/// [`PanelLink`] over an SPI device plus a D/C pin.
pub struct SpiLink<SPI, DC> {
    spi: SPI,
    dc: DC,
    max_transfer: usize,
}

impl<SPI, DC> SpiLink<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    /// Link with the default 64 KiB chunk size.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            max_transfer: DEFAULT_MAX_TRANSFER,
        }
    }

    /// Link sized to the profile's transfer limit.
    pub fn for_profile(spi: SPI, dc: DC, profile: &PanelProfile) -> Self {
        Self::new(spi, dc).with_max_transfer(profile.max_transfer)
    }

    /// Override the chunk size (minimum 1 byte).
    #[must_use]
    pub fn with_max_transfer(mut self, bytes: usize) -> Self {
        self.max_transfer = bytes.max(1);
        self
    }

    /// Current chunk size.
    pub fn max_transfer(&self) -> usize {
        self.max_transfer
    }

    /// Give back the SPI device and D/C pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    fn data_mode(&mut self) -> Result<(), LinkError> {
        self.dc
            .set_high()
            .map_err(|_| LinkError::new(LinkErrorKind::Gpio))
    }
}

/// Map a bus error onto the transport error kinds.
fn spi_error<E: embedded_hal::spi::Error>(e: E) -> LinkError {
    let reason = match e.kind() {
        ErrorKind::Overrun | ErrorKind::ModeFault | ErrorKind::FrameFormat => LinkErrorKind::Bus,
        ErrorKind::ChipSelectFault => LinkErrorKind::Busy,
        _ => LinkErrorKind::Other,
    };
    LinkError::new(reason)
}

impl<SPI, DC> PanelLink for SpiLink<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    fn send_command(&mut self, code: u8, args: &[u8]) -> Result<(), LinkError> {
        self.dc
            .set_low()
            .map_err(|_| LinkError::new(LinkErrorKind::Gpio))?;
        self.spi.write(&[code]).map_err(spi_error)?;
        if args.is_empty() {
            return Ok(());
        }
        self.data_mode()?;
        self.spi.write(args).map_err(spi_error)
    }

    fn send_pixels(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.data_mode()?;
        let chunk = self.max_transfer;
        for batch in bytes.chunks(chunk.saturating_mul(OPS_PER_TRANSACTION)) {
            let mut ops: heapless::Vec<Operation<'_, u8>, OPS_PER_TRANSACTION> = batch
                .chunks(chunk)
                .take(OPS_PER_TRANSACTION)
                .map(Operation::Write)
                .collect();
            self.spi.transaction(&mut ops).map_err(spi_error)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
