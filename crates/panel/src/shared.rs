//! Panel shared between execution contexts
//!
//! Display hooks can arrive from more than one context (a compositor task
//! reporting damage, a power manager disabling the panel). Every call
//! holds the mutex for its whole duration, so a flush is never interleaved
//! with a state change.
//!
//! Pick the raw mutex like any other embassy-sync user:
//! `CriticalSectionRawMutex` when hooks come from interrupts or other
//! cores, `NoopRawMutex` when everything runs on one executor.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use platform::{DisplayPipeline, FlushOutcome, PixelSource, Rect};

/// A [`DisplayPipeline`] behind a blocking mutex.
pub struct SharedPanel<M: RawMutex, P> {
    inner: Mutex<M, RefCell<P>>,
}

impl<M: RawMutex, P> SharedPanel<M, P> {
    /// Wrap `panel`. `const` so it can initialise a `static`.
    pub const fn new(panel: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
        }
    }

    /// Run `f` with exclusive access to the panel.
    ///
    /// # Panics
    ///
    /// If `f` calls back into the same `SharedPanel`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Unwrap the panel.
    pub fn into_inner(self) -> P {
        self.inner.into_inner().into_inner()
    }
}

impl<M: RawMutex, P: DisplayPipeline> SharedPanel<M, P> {
    /// [`DisplayPipeline::on_enable`] under the lock.
    pub fn on_enable<S: PixelSource + ?Sized>(&self, source: &S) -> Result<(), P::Error> {
        self.lock(|p| p.on_enable(source))
    }

    /// [`DisplayPipeline::on_disable`] under the lock.
    pub fn on_disable(&self) -> Result<(), P::Error> {
        self.lock(DisplayPipeline::on_disable)
    }

    /// [`DisplayPipeline::on_damage`] under the lock.
    pub fn on_damage<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        hint: Rect,
    ) -> Result<FlushOutcome, P::Error> {
        self.lock(|p| p.on_damage(source, hint))
    }
}
