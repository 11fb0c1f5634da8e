//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - Implements `smoltcp::phy::Device` for [`Enc28j60Device`]
//!   - RX/TX token support
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::phy::Device;
//! let mut device = Enc28j60Device::new(enc, delay);
//! if let Some((rx, tx)) = device.receive(Instant::ZERO) {
//!     // ...
//! }
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{Enc28j60Device, Enc28j60RxToken, Enc28j60TxToken, ethernet_address};
