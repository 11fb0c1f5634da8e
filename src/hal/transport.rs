//! SPI transport: one chip instruction per chip-select frame.
//!
//! Every call asserts CS (active low), clocks out the instruction byte, then
//! writes or reads the payload, flushes the bus and releases CS. The bus
//! guard is held for exactly that span.

use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::guard::{BusGuard, Unguarded};
use crate::driver::error::{IoError, IoResult};

/// Data phase following the instruction byte
enum Phase<'a> {
    Write(&'a [u8]),
    Read(&'a mut [u8]),
}

/// Instruction framing over an SPI bus and a dedicated chip-select pin.
#[derive(Debug)]
pub struct SpiTransport<SPI, CS, G = Unguarded> {
    spi: SPI,
    cs: CS,
    _guard: PhantomData<G>,
}

impl<SPI, CS, G> SpiTransport<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Wrap an initialized bus and an output pin configured as chip select.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            _guard: PhantomData,
        }
    }

    /// Send `instruction` followed by `payload` (which may be empty).
    pub fn write(&mut self, instruction: u8, payload: &[u8]) -> IoResult<()> {
        self.transaction(instruction, Phase::Write(payload))
    }

    /// Send `instruction` and read `buffer.len()` bytes back.
    pub fn read(&mut self, instruction: u8, buffer: &mut [u8]) -> IoResult<()> {
        self.transaction(instruction, Phase::Read(buffer))
    }

    /// Give the bus and pin back to the caller.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn transaction(&mut self, instruction: u8, phase: Phase<'_>) -> IoResult<()> {
        let spi = &mut self.spi;
        let cs = &mut self.cs;

        G::exclusive(|| {
            cs.set_low().map_err(|_| IoError::ChipSelect)?;
            let result = Self::clock(spi, instruction, phase);
            // CS goes high even when the transfer failed
            let deselect = cs.set_high().map_err(|_| IoError::ChipSelect);
            result.and(deselect)
        })
    }

    fn clock(spi: &mut SPI, instruction: u8, phase: Phase<'_>) -> IoResult<()> {
        spi.write(&[instruction]).map_err(|_| IoError::Spi)?;
        match phase {
            Phase::Write(payload) if !payload.is_empty() => {
                spi.write(payload).map_err(|_| IoError::Spi)?;
            }
            Phase::Read(buffer) if !buffer.is_empty() => {
                spi.read(buffer).map_err(|_| IoError::Spi)?;
            }
            _ => {}
        }
        spi.flush().map_err(|_| IoError::Spi)
    }
}
