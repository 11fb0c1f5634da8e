//! Receive pipeline
//!
//! The receive region `[0, R-1]` is a ring of frame records written by the
//! chip. Each record is a 6-byte header followed by the frame and its CRC:
//!
//! ```text
//! +-------------+-------------+-------------+------------------+-------+
//! | next (u16)  | count (u16) | status (u16)| frame payload    | CRC   |
//! +-------------+-------------+-------------+------------------+-------+
//! ```
//!
//! All header fields are little-endian. Reading one frame goes through
//! `receive_init` → `receive_read`* → `receive_ack`:
//!
//! - `receive_init` reads the header at the cursor and moves the cursor to
//!   the next record
//! - `receive_read` streams payload bytes (ERDPT auto-increments and wraps
//!   at ERXND)
//! - `receive_ack` skips the CRC, decrements EPKTCNT and hands the record
//!   back to the chip by moving ERXRDPT

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::device::Enc28j60;
use super::error::{IoError, Result};
use crate::hal::guard::BusGuard;
use crate::internal::constants::{CRC_SIZE, RX_HEADER_SIZE, RX_START};
use crate::internal::regs::{self, econ2};

// =============================================================================
// Receive Status
// =============================================================================

/// Receive status vector bits (header bytes 4 and 5)
pub mod rsv {
    /// Long event or dropped packet
    pub const LONG_EVENT: u16 = 0x0001;
    /// Carrier event seen
    pub const CARRIER_EVENT: u16 = 0x0004;
    /// CRC error
    pub const CRC_ERROR: u16 = 0x0010;
    /// Length check error
    pub const LENGTH_CHECK_ERROR: u16 = 0x0020;
    /// Type/length field out of range
    pub const LENGTH_OUT_OF_RANGE: u16 = 0x0040;
    /// Received OK
    pub const RECEIVED_OK: u16 = 0x0080;
    /// Multicast destination
    pub const MULTICAST: u16 = 0x0100;
    /// Broadcast destination
    pub const BROADCAST: u16 = 0x0200;
    /// Dribble nibble
    pub const DRIBBLE_NIBBLE: u16 = 0x0400;
    /// Control frame
    pub const CONTROL_FRAME: u16 = 0x0800;
    /// Pause control frame
    pub const PAUSE_FRAME: u16 = 0x1000;
    /// Unknown control opcode
    pub const UNKNOWN_OPCODE: u16 = 0x2000;
    /// VLAN tagged frame
    pub const VLAN: u16 = 0x4000;
}

/// Status word of a received frame record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStatus(pub u16);

impl RxStatus {
    /// Frame was received without error
    #[inline]
    pub const fn received_ok(&self) -> bool {
        self.0 & rsv::RECEIVED_OK != 0
    }

    /// CRC did not match
    #[inline]
    pub const fn crc_error(&self) -> bool {
        self.0 & rsv::CRC_ERROR != 0
    }

    /// Length field did not match the frame length
    #[inline]
    pub const fn length_check_error(&self) -> bool {
        self.0 & rsv::LENGTH_CHECK_ERROR != 0
    }

    /// Multicast destination address
    #[inline]
    pub const fn is_multicast(&self) -> bool {
        self.0 & rsv::MULTICAST != 0
    }

    /// Broadcast destination address
    #[inline]
    pub const fn is_broadcast(&self) -> bool {
        self.0 & rsv::BROADCAST != 0
    }

    /// VLAN tagged frame
    #[inline]
    pub const fn is_vlan(&self) -> bool {
        self.0 & rsv::VLAN != 0
    }
}

/// Header of a frame record in the receive region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxHeader {
    /// Address of the following record
    pub next_packet: u16,
    /// Bytes of frame data including the 4-byte CRC
    pub byte_count: u16,
    /// Receive status
    pub status: RxStatus,
}

impl RxHeader {
    /// Decode the 6 header bytes
    pub const fn from_bytes(bytes: &[u8; RX_HEADER_SIZE]) -> Self {
        Self {
            next_packet: u16::from_le_bytes([bytes[0], bytes[1]]),
            byte_count: u16::from_le_bytes([bytes[2], bytes[3]]),
            status: RxStatus(u16::from_le_bytes([bytes[4], bytes[5]])),
        }
    }

    /// Usable payload length: the byte count without CRC, or 0 for a bad frame
    pub const fn payload_len(&self) -> u16 {
        if self.status.received_ok() {
            self.byte_count.saturating_sub(CRC_SIZE as u16)
        } else {
            0
        }
    }
}

// =============================================================================
// Receive Operations
// =============================================================================

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Read the header of the frame at the cursor.
    ///
    /// Returns the payload length (byte count minus CRC), or 0 when the
    /// chip did not flag the frame as received OK. Either way the record
    /// must be released with [`receive_ack`](Self::receive_ack).
    pub fn receive_init(&mut self) -> Result<u16> {
        let cursor = self.next_packet;
        let mut raw = [0u8; RX_HEADER_SIZE];
        self.in_bank(0, |dev| {
            dev.write16(regs::ERDPT, cursor)?;
            dev.read_buffer(&mut raw)
        })?;

        let header = RxHeader::from_bytes(&raw);
        self.next_packet = header.next_packet;
        self.rx_header = Some(header);
        self.rx_remaining = header.payload_len();
        self.rx_open = true;

        #[cfg(feature = "defmt")]
        {
            if !header.status.received_ok() {
                defmt::debug!(
                    "bad frame at {=u16:#06x}, status {=u16:#06x}",
                    cursor,
                    header.status.0
                );
            }
        }

        Ok(self.rx_remaining)
    }

    /// Read the next `buffer.len()` payload bytes of the current frame.
    ///
    /// May be called repeatedly; asking for more than remains of the frame
    /// fails with [`IoError::ReadPastFrame`] without touching the chip.
    pub fn receive_read(&mut self, buffer: &mut [u8]) -> Result<()> {
        if buffer.len() > self.rx_remaining as usize {
            return Err(IoError::ReadPastFrame.into());
        }
        self.read_buffer(buffer)?;
        self.rx_remaining -= buffer.len() as u16;
        Ok(())
    }

    /// Release the current frame record to the chip.
    ///
    /// Returns the new ERXRDPT value. Errata issue 14: ERXRDPT must be odd,
    /// so the record is freed up to `cursor - 1`, or up to ERXND when the
    /// cursor sits at the start of the receive region.
    ///
    /// Each record is released once: without a preceding `receive_init`
    /// this fails with [`IoError::NoFrameOpen`] and EPKTCNT is left alone.
    pub fn receive_ack(&mut self) -> Result<u16> {
        if !self.rx_open {
            return Err(IoError::NoFrameOpen.into());
        }
        self.rx_open = false;

        let mut crc = [0u8; CRC_SIZE];
        self.read_buffer(&mut crc)?;
        self.bit_set(regs::ECON2, econ2::PKTDEC)?;

        let cursor = self.next_packet;
        let free = self.in_bank(0, |dev| {
            let free = if cursor == RX_START {
                dev.read16(regs::ERXND)?
            } else {
                cursor - 1
            };
            dev.write16(regs::ERXRDPT, free)?;
            Ok(free)
        })?;

        self.rx_remaining = 0;
        Ok(free)
    }

    /// Header of the frame most recently opened with `receive_init`
    #[inline]
    pub fn rx_header(&self) -> Option<RxHeader> {
        self.rx_header
    }

    /// Payload bytes of the current frame not yet read
    #[inline]
    pub fn rx_remaining(&self) -> u16 {
        self.rx_remaining
    }

    /// Number of complete frames waiting in the receive region (EPKTCNT)
    pub fn packet_count(&mut self) -> Result<u8> {
        self.in_bank(1, |dev| dev.read8(regs::EPKTCNT, false))
    }

    /// Check whether at least one frame is waiting
    pub fn rx_available(&mut self) -> Result<bool> {
        Ok(self.packet_count()? != 0)
    }

    /// Receive one frame into `buffer`.
    ///
    /// Returns `Ok(None)` when no frame is pending. Frames the chip did not
    /// receive OK are released and skipped. A frame longer than `buffer`
    /// is released and reported as [`IoError::BufferTooSmall`].
    pub fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>> {
        while self.rx_available()? {
            let len = self.receive_init()? as usize;
            if len == 0 {
                self.receive_ack()?;
                continue;
            }
            if len > buffer.len() {
                self.skip_frame()?;
                return Err(IoError::BufferTooSmall.into());
            }
            self.receive_read(&mut buffer[..len])?;
            self.receive_ack()?;
            return Ok(Some(len));
        }
        Ok(None)
    }

    /// Release the current frame without reading the rest of its payload.
    fn skip_frame(&mut self) -> Result<()> {
        self.rx_remaining = 0;
        self.receive_ack().map(|_| ())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
