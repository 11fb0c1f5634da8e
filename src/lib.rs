//! ENC28J60 Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Microchip ENC28J60, a 10BASE-T
//! Ethernet controller with an SPI host interface and 8 KiB of on-chip
//! packet memory.
//!
//! The chip is reached only through `embedded-hal` 1.0 traits, so the driver
//! runs on any MCU whose HAL provides a blocking SPI bus, an output pin for
//! chip select and a delay.
//!
//! # Architecture
//!
//! The driver is organized in layers:
//!
//! 1. **HAL Layer** ([`hal`]): instruction framing over SPI and the
//!    exclusive-access guard
//! 2. **Register Layer** ([`register`]): banked control registers, buffer
//!    memory and bit-field instructions
//! 3. **PHY Layer** ([`phy`]): MII indirect access to the integrated PHY
//! 4. **Driver Layer** ([`driver`]): initialization, receive and transmit
//!    pipelines, interrupt control
//!
//! ## Chip memory layout
//!
//! ```text
//! 0x0000                    R-1 R                           0x1FFF
//! +--------------------------+---------------------------------+
//! | receive ring (chip owns) | transmit region (one frame)     |
//! +--------------------------+---------------------------------+
//! ```
//!
//! `R` is [`Enc28j60Config::rx_buffer_size`]; the default of 6666 bytes
//! leaves room for exactly one maximum-size frame in the transmit region.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and driver logging
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable `CriticalSectionGuard` and the ISR-safe
//!   `SharedEnc28j60` wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::{Enc28j60, Enc28j60Config, InterruptStatus};
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]);
//!
//! let mut enc = Enc28j60::new(spi, cs, config);
//! enc.init(&mut delay)?;
//! enc.interrupts(InterruptStatus::PACKET_PENDING)?;
//!
//! // Streaming receive
//! let len = enc.receive_init()?;
//! enc.receive_read(&mut frame[..len as usize])?;
//! enc.receive_ack()?;
//!
//! // Streaming transmit
//! enc.transfer_init()?;
//! enc.transfer_write(&header)?;
//! enc.transfer_write(&payload)?;
//! enc.transfer_send(&mut delay)?;
//! ```
//!
//! # Chip errata
//!
//! The driver carries the workarounds from the silicon errata that concern
//! the host interface: receive ring starting at 0, odd ERXRDPT, transmit
//! logic reset before every send, EPKTCNT instead of EIR.PKTIF, half-duplex
//! loopback disabled, and a settle delay after soft reset.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;
pub mod register;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{Duplex, Enc28j60Config, RxFilter};
pub use driver::device::Enc28j60;
pub use driver::error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use driver::interrupt::InterruptStatus;
pub use driver::rx::{RxHeader, RxStatus};
pub use driver::tx::TxStatus;

pub use hal::{BusGuard, SpiTransport, Unguarded};

#[cfg(feature = "critical-section")]
pub use hal::CriticalSectionGuard;

pub use phy::LinkStatus;

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedEnc28j60;

/// Register map for the low-level primitives.
///
/// Intended for callers of [`Enc28j60::read8`], [`Enc28j60::write16`],
/// [`Enc28j60::read_phy`] and friends. The driver operations keep the bank
/// selection consistent; code using these directly must restore the bank it
/// changes.
pub mod regs {
    pub use crate::internal::regs::*;

    /// PHY registers, reached through [`Enc28j60::read_phy`](crate::Enc28j60::read_phy)
    pub mod phy {
        pub use crate::internal::phy_regs::*;
    }

    pub use crate::driver::rx::rsv;
    pub use crate::driver::tx::tsv;
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Chip memory
        BUFFER_MEMORY_END,
        BUFFER_MEMORY_SIZE,
        // Frame sizes
        CRC_SIZE,
        DEFAULT_MAC_ADDR,
        DEFAULT_PHY_TIMEOUT_US,
        DEFAULT_RX_BUFFER_SIZE,
        DEFAULT_TX_TIMEOUT_US,
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        MTU,
        RX_HEADER_SIZE,
        RX_START,
        TX_CONTROL_SIZE,
        TX_STATUS_SIZE,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe ENC28J60 slot.
///
/// Expands to a [`SharedEnc28j60`](crate::sync::SharedEnc28j60) static that
/// starts empty; install the initialized handle from `main`.
///
/// # Examples
///
/// ```ignore
/// ph_enc28j60::enc28j60_static!(ENC: Spi<'static, Blocking>, Output<'static>);
///
/// let mut enc = Enc28j60::new(spi, cs, Enc28j60Config::new());
/// enc.init(&mut delay).unwrap();
/// ENC.install(enc);
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! enc28j60_static {
    ($name:ident: $spi:ty, $cs:ty) => {
        $crate::enc28j60_static!($name: $spi, $cs, $crate::hal::Unguarded);
    };
    ($name:ident: $spi:ty, $cs:ty, $guard:ty) => {
        static $name: $crate::sync::SharedEnc28j60<$spi, $cs, $guard> =
            $crate::sync::SharedEnc28j60::new();
    };
}

#[cfg(all(test, feature = "critical-section"))]
mod tests {
    struct NoBus;
    struct NoPin;

    crate::enc28j60_static!(ENC: NoBus, NoPin);

    #[test]
    fn static_slot_starts_empty() {
        assert!(!ENC.is_installed());
        assert!(ENC.take().is_none());
    }
}
