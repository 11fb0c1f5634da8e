//! Integrated PHY access
//!
//! The ENC28J60 PHY (10BASE-T only) is reached through the MII management
//! registers in bank 2:
//!
//! 1. Write the PHY register address to MIREGADR
//! 2. Read: set `MICMD.MIIRD`. Write: write MIWRL then MIWRH
//! 3. Wait while `MISTAT.BUSY` is set (about 10.24 µs)
//! 4. Read: take MIRDL/MIRDH and clear `MICMD.MIIRD`
//!
//! The wait is bounded by [`Enc28j60Config::phy_timeout_us`]; a PHY that
//! stays busy yields [`IoError::Timeout`].
//!
//! MICMD is a MII register, so the command bit is set and cleared with
//! plain writes; BFS/BFC only work on ETH registers.
//!
//! [`Enc28j60Config::phy_timeout_us`]: crate::driver::config::Enc28j60Config::phy_timeout_us

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::driver::config::Duplex;
use crate::driver::device::Enc28j60;
use crate::driver::error::{IoError, Result};
use crate::hal::guard::BusGuard;
use crate::internal::constants::MII_ACCESS_DELAY_US;
use crate::internal::phy_regs::{phie, phstat2, phy_id, reg};
use crate::internal::regs::{self, micmd, mistat};

/// Link state reported by PHSTAT2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link is up
    pub up: bool,
    /// Duplex mode the PHY is operating in
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Decode a PHSTAT2 value
    pub const fn from_phstat2(value: u16) -> Self {
        Self {
            up: value & phstat2::LSTAT != 0,
            duplex: if value & phstat2::DPXSTAT != 0 {
                Duplex::Full
            } else {
                Duplex::Half
            },
        }
    }
}

impl<SPI, CS, G> Enc28j60<SPI, CS, G>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    /// Read a PHY register.
    pub fn read_phy<D: DelayNs>(&mut self, address: u8, delay: &mut D) -> Result<u16> {
        self.in_bank(2, |dev| {
            dev.write8(regs::MIREGADR, address)?;
            dev.write8(regs::MICMD, micmd::MIIRD)?;
            let waited = dev.wait_mii_idle(delay);
            if waited.is_err() {
                dev.write8(regs::MICMD, 0)?;
            }
            waited?;

            let low = dev.read8(regs::MIRD, true)?;
            let high = dev.read8(regs::MIRD + 1, true)?;
            dev.write8(regs::MICMD, 0)?;
            Ok(u16::from_le_bytes([low, high]))
        })
    }

    /// Write a PHY register.
    pub fn write_phy<D: DelayNs>(&mut self, address: u8, value: u16, delay: &mut D) -> Result<()> {
        self.in_bank(2, |dev| {
            dev.write8(regs::MIREGADR, address)?;
            // The MIWRH write starts the transaction
            dev.write16(regs::MIWR, value)?;
            dev.wait_mii_idle(delay)
        })
    }

    /// Wait out one MII access, then poll MISTAT.BUSY up to the configured bound.
    fn wait_mii_idle<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        let timeout = self.config.phy_timeout_us;
        let mut elapsed: u32 = 0;
        loop {
            delay.delay_us(MII_ACCESS_DELAY_US);
            elapsed = elapsed.saturating_add(MII_ACCESS_DELAY_US);

            let status = self.in_bank(3, |dev| dev.read8(regs::MISTAT, true))?;
            if status & mistat::BUSY == 0 {
                return Ok(());
            }
            if elapsed >= timeout {
                #[cfg(feature = "defmt")]
                defmt::warn!("MII access still busy after {=u32} us", elapsed);
                return Err(IoError::Timeout.into());
            }
        }
    }

    /// PHY identifier as `PHID1 << 16 | PHID2`
    pub fn phy_id<D: DelayNs>(&mut self, delay: &mut D) -> Result<u32> {
        let id1 = self.read_phy(reg::PHID1, delay)?;
        let id2 = self.read_phy(reg::PHID2, delay)?;
        Ok(((id1 as u32) << 16) | id2 as u32)
    }

    /// Check the PHY identifier against the Microchip OUI, ignoring revision bits.
    pub fn verify_phy_id<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool> {
        let id = self.phy_id(delay)?;
        let id1 = (id >> 16) as u16;
        let id2 = id as u16;
        Ok(id1 == phy_id::PHID1 && id2 & phy_id::PHID2_MASK == phy_id::PHID2)
    }

    /// Current link state
    pub fn link_status<D: DelayNs>(&mut self, delay: &mut D) -> Result<LinkStatus> {
        let status = self.read_phy(reg::PHSTAT2, delay)?;
        Ok(LinkStatus::from_phstat2(status))
    }

    /// Check whether the link is up
    pub fn link_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool> {
        Ok(self.link_status(delay)?.up)
    }

    /// Route PHY link changes to `EIR.LINKIF`.
    ///
    /// The flag only reaches the INT pin if `link_changed` is also enabled
    /// with [`interrupts`](Self::interrupts). Acknowledge a link interrupt
    /// with [`clear_link_interrupt`](Self::clear_link_interrupt).
    pub fn enable_link_interrupt<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.write_phy(reg::PHIE, phie::PGEIE | phie::PLNKIE, delay)
    }

    /// Read PHIR, which clears the latched PHY interrupt and `EIR.LINKIF`.
    pub fn clear_link_interrupt<D: DelayNs>(&mut self, delay: &mut D) -> Result<u16> {
        self.read_phy(reg::PHIR, delay)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
