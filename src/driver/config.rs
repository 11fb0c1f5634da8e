//! Configuration types for the ENC28J60 driver

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    BUFFER_MEMORY_SIZE, DEFAULT_MAC_ADDR, DEFAULT_PHY_TIMEOUT_US, DEFAULT_RX_BUFFER_SIZE,
    DEFAULT_TX_TIMEOUT_US, MAC_ADDR_LEN, MAX_FRAME_SIZE, RX_START, TX_CONTROL_SIZE,
    TX_STATUS_SIZE,
};
use crate::internal::regs::erxfcon;

/// Smallest frame the MAC will accept (with CRC)
const MIN_FRAME_LEN: u16 = 64;

/// Ethernet duplex mode
///
/// The PHY does not auto-negotiate, so the mode programmed here must match
/// the link partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    #[default]
    Half,
    /// Full duplex
    Full,
}

/// Receive filter selection, programmed into ERXFCON.
///
/// With every filter disabled the chip accepts all frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFilter {
    /// Accept frames addressed to the station address
    pub unicast: bool,
    /// Accept multicast frames
    pub multicast: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Accept frames matching the hash table
    pub hash_table: bool,
    /// Accept magic packets for the station address
    pub magic_packet: bool,
    /// Discard frames with an invalid CRC
    pub crc_check: bool,
    /// Require every enabled filter to match instead of any
    pub match_all: bool,
}

impl RxFilter {
    /// Accept every frame (the reset state)
    pub const PROMISCUOUS: Self = Self {
        unicast: false,
        multicast: false,
        broadcast: false,
        hash_table: false,
        magic_packet: false,
        crc_check: false,
        match_all: false,
    };

    /// Own unicast and broadcast frames with a valid CRC
    pub const STATION: Self = Self {
        unicast: true,
        broadcast: true,
        crc_check: true,
        ..Self::PROMISCUOUS
    };

    /// Encode as an ERXFCON value
    #[inline]
    #[must_use]
    pub const fn to_raw(&self) -> u8 {
        let mut raw = 0;
        if self.unicast {
            raw |= erxfcon::UCEN;
        }
        if self.match_all {
            raw |= erxfcon::ANDOR;
        }
        if self.crc_check {
            raw |= erxfcon::CRCEN;
        }
        if self.magic_packet {
            raw |= erxfcon::MPEN;
        }
        if self.hash_table {
            raw |= erxfcon::HTEN;
        }
        if self.multicast {
            raw |= erxfcon::MCEN;
        }
        if self.broadcast {
            raw |= erxfcon::BCEN;
        }
        raw
    }
}

/// Configuration for the ENC28J60 driver
///
/// # Example
///
/// ```ignore
/// let config = Enc28j60Config::new()
///     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56])
///     .with_duplex(Duplex::Full)
///     .with_rx_filter(RxFilter::STATION);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Enc28j60Config {
    /// Station MAC address
    pub mac_address: [u8; MAC_ADDR_LEN],
    /// Size of the receive region at the start of buffer memory.
    /// The transmit region is everything after it.
    pub rx_buffer_size: u16,
    /// Maximum frame length programmed into MAMXFL
    pub max_frame_len: u16,
    /// Duplex mode programmed into MAC and PHY
    pub duplex: Duplex,
    /// Receive filters
    pub rx_filter: RxFilter,
    /// Upper bound for one transmission in microseconds
    pub tx_timeout_us: u32,
    /// Upper bound for one PHY register access in microseconds
    pub phy_timeout_us: u32,
}

impl Default for Enc28j60Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Enc28j60Config {
    /// Create a configuration with the default memory layout
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            rx_buffer_size: DEFAULT_RX_BUFFER_SIZE,
            max_frame_len: MAX_FRAME_SIZE as u16,
            duplex: Duplex::Half,
            rx_filter: RxFilter::PROMISCUOUS,
            tx_timeout_us: DEFAULT_TX_TIMEOUT_US,
            phy_timeout_us: DEFAULT_PHY_TIMEOUT_US,
        }
    }

    /// Set the MAC address
    ///
    /// Use a locally administered address (bit 1 of the first byte set)
    /// unless you own an OUI.
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the receive region size
    #[must_use]
    pub const fn with_rx_buffer_size(mut self, size: u16) -> Self {
        self.rx_buffer_size = size;
        self
    }

    /// Set the maximum frame length
    #[must_use]
    pub const fn with_max_frame_len(mut self, len: u16) -> Self {
        self.max_frame_len = len;
        self
    }

    /// Set the duplex mode
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Set the receive filters
    #[must_use]
    pub const fn with_rx_filter(mut self, filter: RxFilter) -> Self {
        self.rx_filter = filter;
        self
    }

    /// Set the transmit timeout
    #[must_use]
    pub const fn with_tx_timeout_us(mut self, timeout_us: u32) -> Self {
        self.tx_timeout_us = timeout_us;
        self
    }

    /// Set the PHY access timeout
    #[must_use]
    pub const fn with_phy_timeout_us(mut self, timeout_us: u32) -> Self {
        self.phy_timeout_us = timeout_us;
        self
    }

    /// Last address of the receive region (ERXND)
    #[inline]
    #[must_use]
    pub const fn rx_end(&self) -> u16 {
        RX_START.saturating_add(self.rx_buffer_size).saturating_sub(1)
    }

    /// First address of the transmit region (ETXST)
    #[inline]
    #[must_use]
    pub const fn tx_start(&self) -> u16 {
        RX_START.saturating_add(self.rx_buffer_size)
    }

    /// Check the configuration before it is programmed into the chip
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.max_frame_len < MIN_FRAME_LEN || self.max_frame_len as usize > MAX_FRAME_SIZE {
            return Err(ConfigError::InvalidFrameLength);
        }
        if self.rx_buffer_size == 0 || self.rx_buffer_size % 2 != 0 {
            return Err(ConfigError::InvalidRxBufferSize);
        }
        if self.rx_buffer_size >= BUFFER_MEMORY_SIZE {
            return Err(ConfigError::InvalidRxBufferSize);
        }
        let tx_region = (BUFFER_MEMORY_SIZE - self.rx_buffer_size) as usize;
        if tx_region < TX_CONTROL_SIZE + self.max_frame_len as usize + TX_STATUS_SIZE {
            return Err(ConfigError::InvalidRxBufferSize);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
