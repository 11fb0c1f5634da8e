//! Control register access
//!
//! Primitive register operations of the ENC28J60, implemented as methods of
//! [`Enc28j60`]. Each call is one or two bus transactions.
//!
//! Control registers are banked: an address below `0x1B` refers to the bank
//! currently selected in `ECON1.BSEL`. Callers that change the bank
//! transiently must put the previous one back; [`Enc28j60::switch_bank`]
//! returns it for that purpose.
//!
//! MAC and MII registers (bank 2 and parts of bank 3) shift out a dummy
//! byte before their value on RCR; pass `skip_dummy = true` when reading them.
//!
//! The bit-field instructions (BFS/BFC) are only defined for ETH registers.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::driver::device::Enc28j60;
use crate::driver::error::Result;
use crate::hal::guard::BusGuard;
use crate::internal::regs::{self, econ1, instruction, opcode};

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Send a raw instruction byte followed by `payload`, under the handle's guard.
    ///
    /// Build `instruction` with [`crate::regs::instruction`]. The driver's
    /// host-side state (cursor, open receive frame) is not updated.
    pub fn write_raw(&mut self, instruction: u8, payload: &[u8]) -> Result<()> {
        self.transport.write(instruction, payload)?;
        Ok(())
    }

    /// Send a raw instruction byte and read `buffer.len()` bytes back.
    ///
    /// For MAC/MII register reads the first byte returned is the dummy byte.
    pub fn read_raw(&mut self, instruction: u8, buffer: &mut [u8]) -> Result<()> {
        self.transport.read(instruction, buffer)?;
        Ok(())
    }

    /// Read an 8-bit control register in the selected bank.
    pub fn read8(&mut self, address: u8, skip_dummy: bool) -> Result<u8> {
        let mut data = [0u8; 2];
        let len = if skip_dummy { 2 } else { 1 };
        self.transport
            .read(instruction(opcode::RCR, address), &mut data[..len])?;
        Ok(data[len - 1])
    }

    /// Read a 16-bit ETH register pair, low byte first.
    pub fn read16(&mut self, address: u8) -> Result<u16> {
        let low = self.read8(address, false)?;
        let high = self.read8(address.wrapping_add(1), false)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write an 8-bit control register in the selected bank.
    pub fn write8(&mut self, address: u8, value: u8) -> Result<()> {
        self.transport
            .write(instruction(opcode::WCR, address), &[value])?;
        Ok(())
    }

    /// Write a 16-bit register pair, low byte first.
    ///
    /// Writing the high byte last matters for MIWR, where it starts the
    /// MII transaction.
    pub fn write16(&mut self, address: u8, value: u16) -> Result<()> {
        let [low, high] = value.to_le_bytes();
        self.write8(address, low)?;
        self.write8(address.wrapping_add(1), high)
    }

    /// Set the bits of `mask` in an ETH register (chip-side read-modify-write).
    pub fn bit_set(&mut self, address: u8, mask: u8) -> Result<()> {
        self.transport
            .write(instruction(opcode::BFS, address), &[mask])?;
        Ok(())
    }

    /// Clear the bits of `mask` in an ETH register (chip-side read-modify-write).
    pub fn bit_clear(&mut self, address: u8, mask: u8) -> Result<()> {
        self.transport
            .write(instruction(opcode::BFC, address), &[mask])?;
        Ok(())
    }

    /// Select register bank `bank` and return the bank that was selected.
    ///
    /// Only the low two bits of `bank` are used; larger values wrap.
    pub fn switch_bank(&mut self, bank: u8) -> Result<u8> {
        let previous = self.read8(regs::ECON1, false)? & econ1::BSEL;
        self.bit_clear(regs::ECON1, econ1::BSEL)?;
        self.bit_set(regs::ECON1, bank & econ1::BSEL)?;
        Ok(previous)
    }

    /// Read `buffer.len()` bytes of buffer memory starting at ERDPT.
    pub fn read_buffer(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.transport
            .read(instruction(opcode::RBM, opcode::BM_ARG), buffer)?;
        Ok(())
    }

    /// Write `data` into buffer memory starting at EWRPT.
    pub fn write_buffer(&mut self, data: &[u8]) -> Result<()> {
        self.transport
            .write(instruction(opcode::WBM, opcode::BM_ARG), data)?;
        Ok(())
    }

    /// Run `f` with `bank` selected, then restore the previous bank.
    ///
    /// The previous bank is restored even when `f` fails; the first error wins.
    pub(crate) fn in_bank<R>(
        &mut self,
        bank: u8,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        let previous = self.switch_bank(bank)?;
        let result = f(self);
        let restored = self.switch_bank(previous);
        let value = result?;
        restored?;
        Ok(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
