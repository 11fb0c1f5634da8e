//! Testing utilities and mock implementations
//!
//! This module provides a simulated ENC28J60 for exercising the driver on the
//! host without hardware access. The simulation sits behind the same
//! `embedded-hal` traits the driver uses:
//!
//! - [`MockSpi`] implements `SpiBus<u8>` and decodes the instruction set
//! - [`MockCs`] implements `OutputPin` and frames transactions
//! - [`MockDelay`] implements `DelayNs` and only accumulates time
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec;
use std::vec::Vec;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::internal::constants::{BUFFER_MEMORY_END, BUFFER_MEMORY_SIZE};
use crate::internal::phy_regs::reg as phy;
use crate::internal::regs::{self, econ1, econ2, eir, estat, micmd, mistat, opcode};

/// CRC bytes appended after every injected frame
pub const INJECTED_CRC: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Silicon revision reported by the simulated chip (rev. B7)
pub const MOCK_REVISION: u8 = 0x06;

/// PHID2 reported by the simulated chip
pub const MOCK_PHID2: u16 = 0x1405;

// =============================================================================
// Chip Model
// =============================================================================

/// One completed chip-select frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Instruction byte
    pub instruction: u8,
    /// Bytes written after the instruction
    pub written: Vec<u8>,
    /// Number of bytes clocked back
    pub read: usize,
}

#[derive(Debug)]
struct ChipModel {
    /// Control registers; the common bank is stored in bank 0
    banks: [[u8; 32]; 4],
    mem: Vec<u8>,
    phy: [u16; 32],

    selected: bool,
    instruction: Option<u8>,
    written: Vec<u8>,
    read_index: usize,

    log: Vec<Transaction>,
    resets: usize,
    sent: Vec<Vec<u8>>,
    stall_tx: bool,
    clock_ready: bool,
    mii_busy: bool,
    /// MISTAT polls that report BUSY after each MII command
    mii_busy_polls: usize,
    mii_pending: usize,
    fail_spi: bool,
    fail_cs: bool,
}

impl ChipModel {
    fn new() -> Self {
        let mut chip = Self {
            banks: [[0; 32]; 4],
            mem: vec![0; BUFFER_MEMORY_SIZE as usize],
            phy: [0; 32],
            selected: false,
            instruction: None,
            written: Vec::new(),
            read_index: 0,
            log: Vec::new(),
            resets: 0,
            sent: Vec::new(),
            stall_tx: false,
            clock_ready: true,
            mii_busy: false,
            mii_busy_polls: 0,
            mii_pending: 0,
            fail_spi: false,
            fail_cs: false,
        };
        chip.power_on_defaults();
        chip
    }

    fn power_on_defaults(&mut self) {
        self.banks = [[0; 32]; 4];
        self.banks[0][regs::ECON2 as usize] = econ2::AUTOINC;
        if self.clock_ready {
            self.banks[0][regs::ESTAT as usize] = estat::CLKRDY;
        }
        self.set16(0, regs::ERXND, BUFFER_MEMORY_END);
        self.set16(0, regs::ERDPT, 0x05FA);
        self.banks[3][regs::EREVID as usize] = MOCK_REVISION;

        self.phy = [0; 32];
        self.phy[phy::PHID1 as usize] = 0x0083;
        self.phy[phy::PHID2 as usize] = MOCK_PHID2;
    }

    fn selected_bank(&self) -> usize {
        (self.banks[0][regs::ECON1 as usize] & econ1::BSEL) as usize
    }

    /// Resolve a 5-bit address against the selected bank
    fn slot(&self, address: u8) -> (usize, usize) {
        let address = address & opcode::ARG_MASK;
        if address >= regs::COMMON_BANK_START {
            (0, address as usize)
        } else {
            (self.selected_bank(), address as usize)
        }
    }

    fn get16(&self, bank: usize, address: u8) -> u16 {
        let address = address as usize;
        u16::from_le_bytes([self.banks[bank][address], self.banks[bank][address + 1]])
    }

    fn set16(&mut self, bank: usize, address: u8, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.banks[bank][address as usize] = low;
        self.banks[bank][address as usize + 1] = high;
    }

    /// MAC and MII registers clock out a dummy byte before their value
    fn has_dummy_byte(bank: usize, address: usize) -> bool {
        if address >= regs::COMMON_BANK_START as usize {
            return false;
        }
        match bank {
            2 => true,
            3 => address <= regs::MAADR2 as usize || address == regs::MISTAT as usize,
            _ => false,
        }
    }

    fn rx_wrap(&self, pointer: u16) -> u16 {
        if pointer == self.get16(0, regs::ERXND) {
            self.get16(0, regs::ERXST)
        } else if pointer >= BUFFER_MEMORY_END {
            0
        } else {
            pointer + 1
        }
    }

    fn begin(&mut self) {
        self.selected = true;
        self.instruction = None;
        self.written.clear();
        self.read_index = 0;
    }

    fn end(&mut self) {
        if let Some(instruction) = self.instruction.take() {
            self.log.push(Transaction {
                instruction,
                written: core::mem::take(&mut self.written),
                read: self.read_index,
            });
        }
        self.selected = false;
    }

    fn clock_in(&mut self, byte: u8) {
        let Some(instruction) = self.instruction else {
            self.instruction = Some(byte);
            if byte & opcode::OPCODE_MASK == opcode::SRC {
                self.resets += 1;
                self.power_on_defaults();
            }
            return;
        };
        self.written.push(byte);

        let argument = instruction & opcode::ARG_MASK;
        match instruction & opcode::OPCODE_MASK {
            opcode::WCR => {
                let (bank, address) = self.slot(argument);
                self.banks[bank][address] = byte;
                self.after_write(bank, address);
            }
            opcode::BFS => {
                let (bank, address) = self.slot(argument);
                self.banks[bank][address] |= byte;
                self.after_write(bank, address);
            }
            opcode::BFC => {
                let (bank, address) = self.slot(argument);
                self.banks[bank][address] &= !byte;
                self.after_write(bank, address);
            }
            opcode::WBM => {
                let pointer = self.get16(0, regs::EWRPT);
                self.mem[pointer as usize] = byte;
                let next = if pointer >= BUFFER_MEMORY_END { 0 } else { pointer + 1 };
                self.set16(0, regs::EWRPT, next);
            }
            _ => {}
        }
    }

    fn clock_out(&mut self) -> u8 {
        let Some(instruction) = self.instruction else {
            return 0xFF;
        };
        let index = self.read_index;
        self.read_index += 1;

        let argument = instruction & opcode::ARG_MASK;
        match instruction & opcode::OPCODE_MASK {
            opcode::RCR => {
                let (bank, address) = self.slot(argument);
                if Self::has_dummy_byte(bank, address) && index == 0 {
                    0xFF
                } else {
                    let value = self.banks[bank][address];
                    if (bank, address) == (3, regs::MISTAT as usize) {
                        self.mii_polled();
                    }
                    value
                }
            }
            opcode::RBM => {
                let pointer = self.get16(0, regs::ERDPT);
                let byte = self.mem[pointer as usize];
                let next = self.rx_wrap(pointer);
                self.set16(0, regs::ERDPT, next);
                byte
            }
            _ => 0xFF,
        }
    }

    fn after_write(&mut self, bank: usize, address: usize) {
        match (bank, address as u8) {
            (0, regs::ECON1) => {
                if self.banks[0][address] & econ1::TXRTS != 0 && !self.stall_tx {
                    self.transmit();
                }
            }
            (0, regs::ECON2) => {
                if self.banks[0][address] & econ2::PKTDEC != 0 {
                    let count = &mut self.banks[1][regs::EPKTCNT as usize];
                    *count = count.saturating_sub(1);
                    self.banks[0][address] &= !econ2::PKTDEC;
                }
            }
            (2, regs::MICMD) => {
                if self.banks[2][address] & micmd::MIIRD != 0 {
                    let target = self.banks[2][regs::MIREGADR as usize] as usize & 0x1F;
                    self.set16(2, regs::MIRD, self.phy[target]);
                    self.mii_started();
                }
            }
            (2, a) if a == regs::MIWR + 1 => {
                let target = self.banks[2][regs::MIREGADR as usize] as usize & 0x1F;
                self.phy[target] = self.get16(2, regs::MIWR);
                self.mii_started();
            }
            _ => {}
        }
    }

    fn mii_started(&mut self) {
        self.mii_pending = self.mii_busy_polls;
        if self.mii_pending > 0 {
            self.banks[3][regs::MISTAT as usize] |= mistat::BUSY;
        }
    }

    /// BUSY drops after the configured number of MISTAT reads
    fn mii_polled(&mut self) {
        if self.mii_pending == 0 {
            return;
        }
        self.mii_pending -= 1;
        if self.mii_pending == 0 && !self.mii_busy {
            self.banks[3][regs::MISTAT as usize] &= !mistat::BUSY;
        }
    }

    fn transmit(&mut self) {
        let start = self.get16(0, regs::ETXST) as usize;
        let end = self.get16(0, regs::ETXND) as usize;
        // Skip the per-packet control byte
        let frame = self.mem[start + 1..=end].to_vec();
        let len = frame.len() as u16;
        self.sent.push(frame);

        let mut status = [0u8; 7];
        status[..2].copy_from_slice(&len.to_le_bytes());
        status[2] = 0x80; // transmit done
        status[4..6].copy_from_slice(&len.to_le_bytes());
        for (offset, byte) in status.iter().enumerate() {
            self.mem[(end + 1 + offset) & BUFFER_MEMORY_END as usize] = *byte;
        }

        self.banks[0][regs::ECON1 as usize] &= !econ1::TXRTS;
        self.banks[0][regs::EIR as usize] |= eir::TXIF;
    }
}

// =============================================================================
// Mock Chip Handle
// =============================================================================

/// Simulated ENC28J60 shared between a [`MockSpi`] and a [`MockCs`].
///
/// # Example
///
/// ```ignore
/// let chip = MockEnc28j60::new();
/// let mut enc = Enc28j60::new(chip.spi(), chip.cs(), Enc28j60Config::new());
/// enc.init(&mut MockDelay::new()).unwrap();
/// chip.inject_frame(0, 100, &[0xAA; 60], true);
/// assert_eq!(enc.receive_init().unwrap(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct MockEnc28j60 {
    chip: Rc<RefCell<ChipModel>>,
}

impl Default for MockEnc28j60 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnc28j60 {
    /// Create a chip in its power-on state
    pub fn new() -> Self {
        Self {
            chip: Rc::new(RefCell::new(ChipModel::new())),
        }
    }

    /// SPI bus wired to this chip
    pub fn spi(&self) -> MockSpi {
        MockSpi {
            chip: Rc::clone(&self.chip),
        }
    }

    /// Chip-select pin wired to this chip
    pub fn cs(&self) -> MockCs {
        MockCs {
            chip: Rc::clone(&self.chip),
        }
    }

    // -------------------------------------------------------------------------
    // Register and memory inspection
    // -------------------------------------------------------------------------

    pub fn bank_reg(&self, bank: usize, address: u8) -> u8 {
        let chip = self.chip.borrow();
        let (bank, address) = if address >= regs::COMMON_BANK_START {
            (0, address)
        } else {
            (bank, address)
        };
        chip.banks[bank][address as usize]
    }

    pub fn set_bank_reg(&self, bank: usize, address: u8, value: u8) {
        let mut chip = self.chip.borrow_mut();
        let bank = if address >= regs::COMMON_BANK_START { 0 } else { bank };
        chip.banks[bank][address as usize] = value;
    }

    pub fn bank_reg16(&self, bank: usize, address: u8) -> u16 {
        self.chip.borrow().get16(bank, address)
    }

    pub fn set_bank_reg16(&self, bank: usize, address: u8, value: u16) {
        self.chip.borrow_mut().set16(bank, address, value);
    }

    pub fn selected_bank(&self) -> usize {
        self.chip.borrow().selected_bank()
    }

    pub fn memory(&self, start: u16, len: usize) -> Vec<u8> {
        let chip = self.chip.borrow();
        chip.mem[start as usize..start as usize + len].to_vec()
    }

    pub fn write_memory(&self, start: u16, bytes: &[u8]) {
        let mut chip = self.chip.borrow_mut();
        chip.mem[start as usize..start as usize + bytes.len()].copy_from_slice(bytes);
    }

    pub fn phy_reg(&self, address: u8) -> u16 {
        self.chip.borrow().phy[address as usize]
    }

    pub fn set_phy_reg(&self, address: u8, value: u16) {
        self.chip.borrow_mut().phy[address as usize] = value;
    }

    pub fn pending_packets(&self) -> u8 {
        self.bank_reg(1, regs::EPKTCNT)
    }

    // -------------------------------------------------------------------------
    // Traffic
    // -------------------------------------------------------------------------

    /// Write a frame record at `at` in the receive region and bump EPKTCNT.
    ///
    /// The record wraps at ERXND like the receive hardware does.
    pub fn inject_frame(&self, at: u16, next_packet: u16, payload: &[u8], received_ok: bool) {
        let mut chip = self.chip.borrow_mut();
        let byte_count = (payload.len() + INJECTED_CRC.len()) as u16;
        let status: u16 = if received_ok { 0x0080 } else { 0x0010 };

        let mut record = Vec::new();
        record.extend_from_slice(&next_packet.to_le_bytes());
        record.extend_from_slice(&byte_count.to_le_bytes());
        record.extend_from_slice(&status.to_le_bytes());
        record.extend_from_slice(payload);
        record.extend_from_slice(&INJECTED_CRC);

        let mut pointer = at;
        for byte in record {
            chip.mem[pointer as usize] = byte;
            pointer = chip.rx_wrap(pointer);
        }

        let count = &mut chip.banks[1][regs::EPKTCNT as usize];
        *count = count.saturating_add(1);
    }

    /// Frames handed to the wire, without control byte
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.chip.borrow().sent.clone()
    }

    /// Keep ECON1.TXRTS set forever, as a hung transmitter does
    pub fn stall_transmit(&self, stall: bool) {
        self.chip.borrow_mut().stall_tx = stall;
    }

    /// Whether ESTAT.CLKRDY comes up after a reset
    pub fn set_clock_ready(&self, ready: bool) {
        let mut chip = self.chip.borrow_mut();
        chip.clock_ready = ready;
        if !ready {
            chip.banks[0][regs::ESTAT as usize] &= !estat::CLKRDY;
        }
    }

    /// Keep MISTAT.BUSY set, as a stuck MII interface does
    pub fn set_mii_busy(&self, busy: bool) {
        let mut chip = self.chip.borrow_mut();
        chip.mii_busy = busy;
        chip.banks[3][regs::MISTAT as usize] = u8::from(busy);
    }

    /// Report MISTAT.BUSY for the next `polls` reads after every MII command
    pub fn hold_mii_busy(&self, polls: usize) {
        self.chip.borrow_mut().mii_busy_polls = polls;
    }

    pub fn fail_spi(&self, fail: bool) {
        self.chip.borrow_mut().fail_spi = fail;
    }

    pub fn fail_cs(&self, fail: bool) {
        self.chip.borrow_mut().fail_cs = fail;
    }

    // -------------------------------------------------------------------------
    // Bus observation
    // -------------------------------------------------------------------------

    pub fn resets(&self) -> usize {
        self.chip.borrow().resets
    }

    pub fn transactions(&self) -> usize {
        self.chip.borrow().log.len()
    }

    pub fn log(&self) -> Vec<Transaction> {
        self.chip.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.chip.borrow_mut().log.clear();
    }

    pub fn cs_is_high(&self) -> bool {
        !self.chip.borrow().selected
    }
}

// =============================================================================
// Mock SPI Bus
// =============================================================================

/// `SpiBus` end of the simulated chip
#[derive(Debug)]
pub struct MockSpi {
    chip: Rc<RefCell<ChipModel>>,
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl MockSpi {
    fn check(&self) -> Result<(), spi::ErrorKind> {
        let chip = self.chip.borrow();
        if chip.fail_spi {
            return Err(spi::ErrorKind::Other);
        }
        // Clocking without CS asserted would be a driver bug
        assert!(chip.selected, "SPI clocked with chip select high");
        Ok(())
    }
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        let mut chip = self.chip.borrow_mut();
        for word in words.iter_mut() {
            *word = chip.clock_out();
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        let mut chip = self.chip.borrow_mut();
        for word in words {
            chip.clock_in(*word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        self.read(read)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        let mut chip = self.chip.borrow_mut();
        for word in words.iter_mut() {
            chip.clock_in(*word);
            *word = 0xFF;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// Mock Chip Select
// =============================================================================

/// Active-low chip-select pin of the simulated chip
#[derive(Debug)]
pub struct MockCs {
    chip: Rc<RefCell<ChipModel>>,
}

impl digital::ErrorType for MockCs {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        if chip.fail_cs {
            return Err(digital::ErrorKind::Other);
        }
        chip.begin();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        if chip.fail_cs {
            return Err(digital::ErrorKind::Other);
        }
        chip.end();
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Self Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let chip = MockEnc28j60::new();
        assert_eq!(chip.bank_reg(0, regs::ESTAT) & estat::CLKRDY, estat::CLKRDY);
        assert_eq!(chip.bank_reg16(0, regs::ERXND), BUFFER_MEMORY_END);
        assert_eq!(chip.selected_bank(), 0);
        assert!(chip.cs_is_high());
    }

    #[test]
    fn injected_frame_wraps_at_rx_end() {
        let chip = MockEnc28j60::new();
        chip.set_bank_reg16(0, regs::ERXND, 15);

        chip.inject_frame(10, 8, &[1, 2], true);

        // 6 header bytes occupy 10..=15, payload wraps to 0
        assert_eq!(chip.memory(0, 2), vec![1, 2]);
        assert_eq!(chip.memory(2, 4), INJECTED_CRC.to_vec());
        assert_eq!(chip.pending_packets(), 1);
    }
}
