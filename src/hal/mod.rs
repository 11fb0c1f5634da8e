//! Hardware Abstraction Layer
//!
//! The chip is reached only through `embedded-hal` traits:
//!
//! - [`transport`]: instruction framing over [`SpiBus`](embedded_hal::spi::SpiBus)
//!   with an active-low [`OutputPin`](embedded_hal::digital::OutputPin) chip select
//! - [`guard`]: the exclusive-access capability chosen at construction time
//!
//! # Delay Integration
//!
//! Operations with a bounded wait take `&mut impl embedded_hal::delay::DelayNs`.
//! Pass any delay implementation from your HAL.

pub mod guard;
pub mod transport;

#[cfg(feature = "critical-section")]
pub use guard::CriticalSectionGuard;
pub use guard::{BusGuard, Unguarded};
pub use transport::SpiTransport;
