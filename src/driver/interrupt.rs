//! Interrupt control for the ENC28J60.
//!
//! This module provides the [`InterruptStatus`] structure used both as an
//! enable mask and as the decoded EIR flags, and the operations driving the
//! INT pin.
//!
//! A typical interrupt handler:
//!
//! ```ignore
//! enc.isr_begin()?;
//! let flags = enc.interrupt_flags()?;
//! if flags.packet_pending {
//!     while let Some(len) = enc.receive(&mut frame)? { /* ... */ }
//! }
//! enc.interrupt_clear(flags)?;
//! enc.isr_end()?;
//! ```

use core::ops::BitOr;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::device::Enc28j60;
use super::error::Result;
use crate::hal::guard::BusGuard;
use crate::internal::regs::{self, eie, eir};

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt sources of the chip.
///
/// # Example
///
/// ```ignore
/// enc.interrupts(InterruptStatus::PACKET_PENDING | InterruptStatus::RX_ERROR)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// At least one frame is waiting in the receive region
    pub packet_pending: bool,
    /// DMA copy or checksum finished
    pub dma_done: bool,
    /// PHY link state changed
    pub link_changed: bool,
    /// Transmission finished
    pub tx_done: bool,
    /// Transmission aborted
    pub tx_error: bool,
    /// Frame dropped (receive region full or too many pending frames)
    pub rx_error: bool,
}

impl InterruptStatus {
    /// No source
    pub const NONE: Self = Self {
        packet_pending: false,
        dma_done: false,
        link_changed: false,
        tx_done: false,
        tx_error: false,
        rx_error: false,
    };

    /// Every source
    pub const ALL: Self = Self::from_raw(eir::ALL);

    /// Packet pending
    pub const PACKET_PENDING: Self = Self::from_raw(eir::PKTIF);
    /// DMA done
    pub const DMA_DONE: Self = Self::from_raw(eir::DMAIF);
    /// Link changed
    pub const LINK_CHANGED: Self = Self::from_raw(eir::LINKIF);
    /// Transmit done
    pub const TX_DONE: Self = Self::from_raw(eir::TXIF);
    /// Transmit error
    pub const TX_ERROR: Self = Self::from_raw(eir::TXERIF);
    /// Receive error
    pub const RX_ERROR: Self = Self::from_raw(eir::RXERIF);

    /// Create from a raw EIR (or EIE) value
    #[inline]
    pub const fn from_raw(flags: u8) -> Self {
        Self {
            packet_pending: (flags & eir::PKTIF) != 0,
            dma_done: (flags & eir::DMAIF) != 0,
            link_changed: (flags & eir::LINKIF) != 0,
            tx_done: (flags & eir::TXIF) != 0,
            tx_error: (flags & eir::TXERIF) != 0,
            rx_error: (flags & eir::RXERIF) != 0,
        }
    }

    /// Convert to the EIR/EIE bit layout
    #[inline]
    pub const fn to_raw(&self) -> u8 {
        let mut val = 0u8;
        if self.packet_pending {
            val |= eir::PKTIF;
        }
        if self.dma_done {
            val |= eir::DMAIF;
        }
        if self.link_changed {
            val |= eir::LINKIF;
        }
        if self.tx_done {
            val |= eir::TXIF;
        }
        if self.tx_error {
            val |= eir::TXERIF;
        }
        if self.rx_error {
            val |= eir::RXERIF;
        }
        val
    }

    /// Check if any source is set
    #[inline]
    pub const fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check if any error source is set
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.tx_error || self.rx_error
    }
}

impl BitOr for InterruptStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_raw(self.to_raw() | rhs.to_raw())
    }
}

// =============================================================================
// Interrupt Operations
// =============================================================================

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Enable exactly the sources in `mask` and the INT pin.
    ///
    /// Flags already pending for those sources are cleared first so that
    /// stale events do not fire immediately.
    pub fn interrupts(&mut self, mask: InterruptStatus) -> Result<()> {
        let raw = mask.to_raw();
        self.bit_clear(regs::EIR, raw)?;
        self.write8(regs::EIE, raw | eie::INTIE)
    }

    /// Gate the INT pin at the start of an interrupt handler.
    pub fn isr_begin(&mut self) -> Result<()> {
        self.bit_clear(regs::EIE, eie::INTIE)
    }

    /// Re-open the INT pin at the end of an interrupt handler.
    ///
    /// Any flag still set produces a new falling edge here.
    pub fn isr_end(&mut self) -> Result<()> {
        self.bit_set(regs::EIE, eie::INTIE)
    }

    /// Pending interrupt flags.
    ///
    /// `packet_pending` is derived from EPKTCNT as well: errata issue 6,
    /// EIR.PKTIF does not reliably report pending frames.
    pub fn interrupt_flags(&mut self) -> Result<InterruptStatus> {
        let mut flags = self.read8(regs::EIR, false)?;
        let pending = self.in_bank(1, |dev| dev.read8(regs::EPKTCNT, false))?;
        if pending != 0 {
            flags |= eir::PKTIF;
        }
        Ok(InterruptStatus::from_raw(flags))
    }

    /// Clear the flags in `mask`, or every flag if `mask` is empty.
    ///
    /// `packet_pending` only clears once EPKTCNT reaches zero; it cannot
    /// be cleared here.
    pub fn interrupt_clear(&mut self, mask: InterruptStatus) -> Result<()> {
        let raw = if mask.any() { mask.to_raw() } else { eir::ALL };
        self.bit_clear(regs::EIR, raw)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
