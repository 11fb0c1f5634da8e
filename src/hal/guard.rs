//! Exclusive-access capability for the SPI transport.
//!
//! The guard is chosen when the device handle is built, as a type parameter.
//!
//! A guard covers exactly one Transport call. Multi-call sequences such as
//! bank switch + register access + bank restore are *not* atomic; wrap whole
//! operations with `SharedEnc28j60` (feature `critical-section`) when the same chip is used
//! from both the main loop and an interrupt handler.

/// Runs one SPI transaction with whatever exclusion the handle was built with.
pub trait BusGuard {
    /// Execute `f` while holding exclusive access to the bus.
    fn exclusive<R>(f: impl FnOnce() -> R) -> R;
}

/// No mutual exclusion; for single-context use.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unguarded;

impl BusGuard for Unguarded {
    #[inline]
    fn exclusive<R>(f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Each transaction runs inside `critical_section::with`, so an interrupt
/// handler touching the chip cannot split an instruction from its payload.
#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CriticalSectionGuard;

#[cfg(feature = "critical-section")]
impl BusGuard for CriticalSectionGuard {
    #[inline]
    fn exclusive<R>(f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}
