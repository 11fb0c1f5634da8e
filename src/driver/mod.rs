//! Core driver components for the ENC28J60.
//!
//! This module contains the device handle and the operations built on the
//! register layer:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`device`] - The device handle, initialization and soft reset
//! - [`rx`] - Receive pipeline and receive header types
//! - [`tx`] - Transmit pipeline and the transmit status vector
//! - [`interrupt`] - Interrupt enable, flags and handler bracketing
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::driver::{Enc28j60, Enc28j60Config, Error};
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod config;
pub mod device;
pub mod error;
pub mod interrupt;
pub mod rx;
pub mod tx;

// Re-exports for convenience
pub use config::{Duplex, Enc28j60Config, RxFilter};
pub use device::Enc28j60;
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use interrupt::InterruptStatus;
pub use rx::{RxHeader, RxStatus};
pub use tx::TxStatus;
