//! ISR-safe ENC28J60 wrapper using critical sections.
//!
//! [`SharedEnc28j60`] holds the whole handle, so every compound operation
//! (bank switch, pointer update, buffer transfer) runs inside one critical
//! section. This is the level at which main loop and interrupt handler must
//! be serialized; guarding single bus transactions is not enough.

use super::primitives::CriticalSectionCell;
use crate::driver::device::Enc28j60;
use crate::hal::guard::Unguarded;

/// ISR-safe ENC28J60 wrapper using critical sections.
///
/// The cell starts empty and is filled once the handle is constructed.
///
/// # Example
///
/// ```ignore
/// static ENC: SharedEnc28j60<Spi, CsPin> = SharedEnc28j60::new();
///
/// fn main() {
///     let mut enc = Enc28j60::new(spi, cs, Enc28j60Config::new());
///     enc.init(&mut delay).unwrap();
///     ENC.install(enc);
/// }
///
/// #[interrupt]
/// fn EXTI0() {
///     ENC.with(|enc| {
///         let flags = enc.interrupt_flags()?;
///         enc.interrupt_clear(flags)
///     });
/// }
/// ```
pub struct SharedEnc28j60<SPI, CS, G = Unguarded> {
    inner: CriticalSectionCell<Option<Enc28j60<SPI, CS, G>>>,
}

impl<SPI, CS, G> SharedEnc28j60<SPI, CS, G> {
    /// Create an empty wrapper (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Store `device`, returning the previously installed handle if any.
    pub fn install(&self, device: Enc28j60<SPI, CS, G>) -> Option<Enc28j60<SPI, CS, G>> {
        self.inner.with(|slot| slot.replace(device))
    }

    /// Remove the handle, e.g. to release the bus.
    pub fn take(&self) -> Option<Enc28j60<SPI, CS, G>> {
        self.inner.with(Option::take)
    }

    /// Check whether a handle is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the device.
    ///
    /// Interrupts are disabled for the duration of the closure. Returns
    /// `None` when no handle is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<SPI, CS, G>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Like [`with`](Self::with), but returns `None` instead of panicking
    /// when the device is already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<SPI, CS, G>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }
}

impl<SPI, CS, G> Default for SharedEnc28j60<SPI, CS, G> {
    fn default() -> Self {
        Self::new()
    }
}
