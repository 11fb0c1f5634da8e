//! Transmit pipeline
//!
//! The transmit region `[R, 8191]` holds one frame at a time:
//!
//! ```text
//! ETXST                                ETXND
//!   |                                    |
//!   v                                    v
//! +---------+----------------------------+---------------------------+
//! | control |  frame (appended in parts)  | status vector (7 bytes)   |
//! +---------+----------------------------+---------------------------+
//! ```
//!
//! `transfer_init` places the control byte, `transfer_write` appends and
//! moves ETXND, `transfer_send` starts the MAC and waits for it, and
//! `transfer_status` reads back the vector the chip wrote after ETXND.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::device::Enc28j60;
use super::error::{IoError, Result};
use crate::hal::guard::BusGuard;
use crate::internal::constants::{BUFFER_MEMORY_END, TX_POLL_INTERVAL_US, TX_STATUS_SIZE};
use crate::internal::regs::{self, econ1};

/// Per-packet control byte: use the MACON3 settings
const TX_CONTROL_BYTE: u8 = 0x00;

// =============================================================================
// Transmit Status Vector
// =============================================================================

/// Bit indices into the 56-bit transmit status vector
pub mod tsv {
    /// CRC error in the transmitted frame
    pub const CRC_ERROR: usize = 20;
    /// Length check error
    pub const LENGTH_CHECK_ERROR: usize = 21;
    /// Length out of range
    pub const LENGTH_OUT_OF_RANGE: usize = 22;
    /// Transmission completed
    pub const DONE: usize = 23;
    /// Multicast destination
    pub const MULTICAST: usize = 24;
    /// Broadcast destination
    pub const BROADCAST: usize = 25;
    /// Deferred at least once
    pub const PACKET_DEFER: usize = 26;
    /// Deferred beyond the limit
    pub const EXCESSIVE_DEFER: usize = 27;
    /// Aborted after too many collisions
    pub const EXCESSIVE_COLLISION: usize = 28;
    /// Collision after the collision window
    pub const LATE_COLLISION: usize = 29;
    /// Giant frame
    pub const GIANT: usize = 30;
    /// Transmit underrun
    pub const UNDERRUN: usize = 31;
    /// Control frame
    pub const CONTROL_FRAME: usize = 48;
    /// Pause control frame
    pub const PAUSE_FRAME: usize = 49;
    /// Backpressure applied
    pub const BACKPRESSURE: usize = 50;
    /// VLAN tagged frame
    pub const VLAN: usize = 51;
}

/// Transmit status vector written by the chip after each transmission.
///
/// The layout is fixed by the hardware; individual flags are addressed by
/// bit index (see [`tsv`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxStatus(pub [u8; TX_STATUS_SIZE]);

impl TxStatus {
    /// Status bit `index`; indices beyond the vector read as `false`
    #[inline]
    pub const fn bit(&self, index: usize) -> bool {
        if index >= TX_STATUS_SIZE * 8 {
            return false;
        }
        self.0[index / 8] & (1 << (index % 8)) != 0
    }

    /// Bytes in the frame as counted by the MAC (bits 0-15)
    #[inline]
    pub const fn byte_count(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Collisions seen during the attempt (bits 16-19)
    #[inline]
    pub const fn collision_count(&self) -> u8 {
        self.0[2] & 0x0F
    }

    /// Bytes put on the wire including collided attempts (bits 32-47)
    #[inline]
    pub const fn total_bytes_on_wire(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    /// Transmission completed
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.bit(tsv::DONE)
    }

    /// Transmission failed
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.bit(tsv::CRC_ERROR)
            || self.bit(tsv::EXCESSIVE_DEFER)
            || self.bit(tsv::EXCESSIVE_COLLISION)
            || self.bit(tsv::LATE_COLLISION)
            || self.bit(tsv::UNDERRUN)
    }
}

// =============================================================================
// Transmit Operations
// =============================================================================

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Start a new frame at the transmit region origin.
    pub fn transfer_init(&mut self) -> Result<()> {
        let start = self.config.tx_start();
        self.in_bank(0, |dev| {
            dev.write16(regs::ETXST, start)?;
            dev.write16(regs::ETXND, start)?;
            dev.write16(regs::EWRPT, start)?;
            dev.write_buffer(&[TX_CONTROL_BYTE])
        })
    }

    /// Append `payload` to the frame being built and move ETXND past it.
    ///
    /// Fails with [`IoError::FrameTooLarge`] if the frame and the status
    /// vector behind it would no longer fit in buffer memory; nothing is
    /// written in that case.
    pub fn transfer_write(&mut self, payload: &[u8]) -> Result<()> {
        self.in_bank(0, |dev| {
            let end = dev.read16(regs::ETXND)? as usize;
            let new_end = end + payload.len();
            if new_end + TX_STATUS_SIZE > BUFFER_MEMORY_END as usize {
                return Err(IoError::FrameTooLarge.into());
            }
            dev.write_buffer(payload)?;
            dev.write16(regs::ETXND, new_end as u16)
        })
    }

    /// Send the frame and wait until the MAC is done with it.
    ///
    /// Errata issue 12: the transmit logic is reset before every request.
    /// Fails with [`IoError::Timeout`] after
    /// [`tx_timeout_us`](crate::driver::config::Enc28j60Config::tx_timeout_us);
    /// the request is withdrawn in that case.
    pub fn transfer_send<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.bit_set(regs::ECON1, econ1::TXRST)?;
        self.bit_clear(regs::ECON1, econ1::TXRST)?;
        self.bit_set(regs::ECON1, econ1::TXRTS)?;

        let timeout = self.config.tx_timeout_us;
        let mut waited = 0;
        while (self.read8(regs::ECON1, false)? & econ1::TXRTS) != 0 {
            if waited >= timeout {
                self.bit_clear(regs::ECON1, econ1::TXRTS)?;
                #[cfg(feature = "defmt")]
                defmt::warn!("transmit did not complete within {=u32} us", timeout);
                return Err(IoError::Timeout.into());
            }
            delay.delay_us(TX_POLL_INTERVAL_US);
            waited += TX_POLL_INTERVAL_US;
        }
        Ok(())
    }

    /// Read the status vector of the last transmission into `status`.
    ///
    /// Does nothing when `status` is `None`.
    pub fn transfer_status(&mut self, status: Option<&mut TxStatus>) -> Result<()> {
        let Some(status) = status else {
            return Ok(());
        };
        self.in_bank(0, |dev| {
            let end = dev.read16(regs::ETXND)?;
            dev.write16(regs::ERDPT, end.wrapping_add(1))?;
            dev.read_buffer(&mut status.0)
        })
    }

    /// Status vector of the last transmission
    pub fn tx_status(&mut self) -> Result<TxStatus> {
        let mut status = TxStatus::default();
        self.transfer_status(Some(&mut status))?;
        Ok(status)
    }

    /// Build and send `frame` in one call.
    ///
    /// The frame is the Ethernet header and payload; padding and CRC are
    /// added by the MAC.
    pub fn transmit<D: DelayNs>(&mut self, frame: &[u8], delay: &mut D) -> Result<()> {
        self.transfer_init()?;
        self.transfer_write(frame)?;
        self.transfer_send(delay)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
