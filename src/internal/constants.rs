//! Centralized Constants
//!
//! Single source of truth for the chip memory layout, Ethernet frame sizes and
//! the timing values used by the bounded waits.
//!
//! Register addresses and bit masks live in [`super::regs`] and
//! [`super::phy_regs`].

// =============================================================================
// Chip Memory Layout
// =============================================================================

/// Size of the on-chip Ethernet buffer memory in bytes
pub const BUFFER_MEMORY_SIZE: u16 = 8192;

/// Highest valid buffer memory address
pub const BUFFER_MEMORY_END: u16 = BUFFER_MEMORY_SIZE - 1;

/// Start of the receive region.
///
/// Errata issue 5: the receive buffer must start at address 0.
pub const RX_START: u16 = 0;

/// Default receive region size.
///
/// Leaves `8192 - 6666 = 1526` bytes for the transmit region: one control
/// byte, a maximum sized frame and the 7 byte status vector written after it.
pub const DEFAULT_RX_BUFFER_SIZE: u16 = 6666;

// =============================================================================
// Frame Sizes
// =============================================================================

/// Maximum Ethernet frame size accepted by the MAC (MAMXFL default)
pub const MAX_FRAME_SIZE: usize = 1518;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// CRC/FCS size at the end of every received frame record
pub const CRC_SIZE: usize = 4;

/// MAC address length
pub const MAC_ADDR_LEN: usize = 6;

/// Size of the receive header preceding every frame record
pub const RX_HEADER_SIZE: usize = 6;

/// Per-packet control byte written in front of every transmitted frame
pub const TX_CONTROL_SIZE: usize = 1;

/// Size of the transmit status vector written after a transmitted frame
pub const TX_STATUS_SIZE: usize = 7;

/// Default locally administered MAC address (02:00:00:00:00:01)
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

// =============================================================================
// Timing Constants
// =============================================================================

/// Delay after a soft reset before the clock-ready bit can be trusted.
///
/// Errata issue 2: ESTAT.CLKRDY may read set too early after a reset.
pub const RESET_DELAY_US: u32 = 1_000;

/// Bounded wait for ESTAT.CLKRDY after the reset delay
pub const CLOCK_READY_TIMEOUT_US: u32 = 10_000;

/// Poll interval for ESTAT.CLKRDY
pub const CLOCK_READY_POLL_US: u32 = 100;

/// Time the MII interface needs for one PHY register access (10.24 µs)
pub const MII_ACCESS_DELAY_US: u32 = 11;

/// Default upper bound for one PHY register access
pub const DEFAULT_PHY_TIMEOUT_US: u32 = 1_000;

/// Poll interval while waiting for ECON1.TXRTS to clear
pub const TX_POLL_INTERVAL_US: u32 = 1;

/// Default upper bound for one transmission (including collision back-off)
pub const DEFAULT_TX_TIMEOUT_US: u32 = 100_000;
