//! ENC28J60 device handle and chip initialization
//!
//! [`Enc28j60`] owns the bus, the chip-select pin and all protocol state the
//! driver keeps on the host side: the receive cursor and the bookkeeping of
//! the frame currently being read. Register primitives live in
//! [`crate::register`], PHY access in [`crate::phy`], and the receive,
//! transmit and interrupt operations in the sibling modules.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::config::{Duplex, Enc28j60Config};
use super::error::{ConfigError, Result};
use super::rx::RxHeader;
use crate::hal::guard::{BusGuard, Unguarded};
use crate::hal::transport::SpiTransport;
use crate::internal::constants::{
    CLOCK_READY_POLL_US, CLOCK_READY_TIMEOUT_US, MAC_ADDR_LEN, RESET_DELAY_US, RX_START,
};
use crate::internal::phy_regs::{phcon1, phcon2, phlcon, reg as phy};
use crate::internal::regs::{
    self, econ1, estat, instruction, ipg, macon1, macon3, macon4, opcode,
};

/// ENC28J60 driver handle.
///
/// `G` selects how each bus transaction is protected: [`Unguarded`] for
/// single-context use, or `CriticalSectionGuard` (feature
/// `critical-section`) when the handle is also used from an interrupt.
///
/// # Example
///
/// ```ignore
/// let config = Enc28j60Config::new().with_mac_address(mac);
/// let mut enc = Enc28j60::new(spi, cs, config);
/// enc.init(&mut delay)?;
///
/// let mut frame = [0u8; 1518];
/// if let Some(len) = enc.receive(&mut frame)? {
///     handle(&frame[..len]);
/// }
/// ```
#[derive(Debug)]
pub struct Enc28j60<SPI, CS, G = Unguarded> {
    pub(crate) transport: SpiTransport<SPI, CS, G>,
    pub(crate) config: Enc28j60Config,
    /// Start of the next unread frame record
    pub(crate) next_packet: u16,
    /// Payload bytes of the current frame not yet read
    pub(crate) rx_remaining: u16,
    pub(crate) rx_header: Option<RxHeader>,
    /// A record opened by `receive_init` is still held by the host
    pub(crate) rx_open: bool,
}

impl<SPI, CS> Enc28j60<SPI, CS, Unguarded>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create an unguarded handle. No bus traffic happens until [`init`](Self::init).
    pub fn new(spi: SPI, cs: CS, config: Enc28j60Config) -> Self {
        Self::with_guard(spi, cs, config)
    }
}

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Create a handle whose bus transactions run under the guard `G`.
    ///
    /// ```ignore
    /// let enc: Enc28j60<_, _, CriticalSectionGuard> =
    ///     Enc28j60::with_guard(spi, cs, config);
    /// ```
    pub fn with_guard(spi: SPI, cs: CS, config: Enc28j60Config) -> Self {
        Self {
            transport: SpiTransport::new(spi, cs),
            config,
            next_packet: RX_START,
            rx_remaining: 0,
            rx_header: None,
            rx_open: false,
        }
    }

    /// Configuration the handle was created with
    #[inline]
    pub fn config(&self) -> &Enc28j60Config {
        &self.config
    }

    /// Station MAC address
    #[inline]
    pub fn mac_address(&self) -> [u8; MAC_ADDR_LEN] {
        self.config.mac_address
    }

    /// Receive cursor: chip address of the next frame record
    #[inline]
    pub fn cursor(&self) -> u16 {
        self.next_packet
    }

    /// Tear the handle down and return the bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        self.transport.release()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Reset and configure the chip, then enable reception.
    ///
    /// Sequence:
    /// 1. Soft reset and wait for the oscillator
    /// 2. LED configuration
    /// 3. Receive region `[0, R-1]` and its read pointer (bank 0)
    /// 4. MAC setup (bank 2)
    /// 5. Station address (bank 3)
    /// 6. PHY duplex settings
    /// 7. Receive filter (bank 1)
    /// 8. `ECON1.RXEN`
    ///
    /// The bank selected on entry is selected again on success.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.config.validate()?;
        self.soft_reset(delay)?;

        self.write_phy(phy::PHLCON, phlcon::LINK_AND_ACTIVITY, delay)?;

        let config = self.config;
        self.in_bank(0, |dev| {
            dev.write16(regs::ERXST, RX_START)?;
            dev.write16(regs::ERXND, config.rx_end())?;
            dev.write16(regs::ERXRDPT, RX_START)?;

            dev.switch_bank(2)?;
            dev.configure_mac(&config)?;

            dev.switch_bank(3)?;
            for (register, byte) in regs::MAADR.iter().zip(config.mac_address) {
                dev.write8(*register, byte)?;
            }

            // Errata issue 9: half-duplex loopback must be disabled explicitly
            dev.write_phy(phy::PHCON2, phcon2::HDLDIS, delay)?;
            if config.duplex == Duplex::Full {
                dev.write_phy(phy::PHCON1, phcon1::PDPXMD, delay)?;
            }

            dev.switch_bank(1)?;
            dev.write8(regs::ERXFCON, config.rx_filter.to_raw())?;

            dev.bit_set(regs::ECON1, econ1::RXEN)
        })?;

        #[cfg(feature = "defmt")]
        {
            let revision = self.revision()?;
            defmt::info!(
                "ENC28J60 rev {=u8:#04x} up, rx region 0..={=u16}",
                revision,
                config.rx_end()
            );
        }

        Ok(())
    }

    fn configure_mac(&mut self, config: &Enc28j60Config) -> Result<()> {
        let full = config.duplex == Duplex::Full;

        let mut con1 = macon1::MARXEN;
        let mut con3 = macon3::PADCFG_60 | macon3::TXCRCEN | macon3::FRMLNEN;
        if full {
            con1 |= macon1::TXPAUS | macon1::RXPAUS;
            con3 |= macon3::FULDPX;
        }

        self.write8(regs::MACON1, con1)?;
        self.write8(regs::MACON3, con3)?;
        self.write8(regs::MACON4, if full { 0 } else { macon4::DEFER })?;
        self.write16(regs::MAMXFL, config.max_frame_len)?;
        self.write8(
            regs::MABBIPG,
            if full {
                ipg::BACK_TO_BACK_FULL
            } else {
                ipg::BACK_TO_BACK_HALF
            },
        )?;
        self.write16(regs::MAIPG, ipg::NON_BACK_TO_BACK)
    }

    /// Issue the System Reset Command and wait for the clock to come back.
    ///
    /// Every register returns to its reset value (bank 0 selected) and the
    /// host-side receive state is cleared. Fails with
    /// [`ConfigError::ResetFailed`] if `ESTAT.CLKRDY` stays clear.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.transport
            .write(instruction(opcode::SRC, opcode::SRC_ARG), &[])?;

        // Errata issue 2: CLKRDY is not reliable right after a reset
        delay.delay_us(RESET_DELAY_US);

        let mut waited = 0;
        while (self.read8(regs::ESTAT, false)? & estat::CLKRDY) == 0 {
            if waited >= CLOCK_READY_TIMEOUT_US {
                #[cfg(feature = "defmt")]
                defmt::warn!("ENC28J60 clock not ready after reset");
                return Err(ConfigError::ResetFailed.into());
            }
            delay.delay_us(CLOCK_READY_POLL_US);
            waited += CLOCK_READY_POLL_US;
        }

        self.next_packet = RX_START;
        self.rx_remaining = 0;
        self.rx_header = None;
        self.rx_open = false;
        Ok(())
    }

    /// Silicon revision (EREVID)
    pub fn revision(&mut self) -> Result<u8> {
        self.in_bank(3, |dev| dev.read8(regs::EREVID, false))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
