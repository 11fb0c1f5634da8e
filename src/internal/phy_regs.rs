//! ENC28J60 PHY Register Definitions
//!
//! The PHY registers are not on the control register map; they are reached
//! through the MII indirect interface (MIREGADR/MICMD/MIWR/MIRD).

#![allow(dead_code)]

/// PHY register addresses
pub mod reg {
    /// PHY control register 1
    pub const PHCON1: u8 = 0x00;
    /// Physical layer status register 1
    pub const PHSTAT1: u8 = 0x01;
    /// PHY identifier 1
    pub const PHID1: u8 = 0x02;
    /// PHY identifier 2
    pub const PHID2: u8 = 0x03;
    /// PHY control register 2
    pub const PHCON2: u8 = 0x10;
    /// Physical layer status register 2
    pub const PHSTAT2: u8 = 0x11;
    /// PHY interrupt enable register
    pub const PHIE: u8 = 0x12;
    /// PHY interrupt request register
    pub const PHIR: u8 = 0x13;
    /// PHY LED configuration register
    pub const PHLCON: u8 = 0x14;
}

/// PHY identifier values (Microchip OUI)
pub mod phy_id {
    /// Expected PHID1 value
    pub const PHID1: u16 = 0x0083;
    /// Expected PHID2 value with the revision bits masked off
    pub const PHID2: u16 = 0x1400;
    /// Mask removing the revision bits of PHID2
    pub const PHID2_MASK: u16 = 0xFFF0;
}

/// PHCON1 bits
pub mod phcon1 {
    /// PHY software reset
    pub const PRST: u16 = 0x8000;
    /// PHY loopback
    pub const PLOOPBK: u16 = 0x4000;
    /// PHY power-down
    pub const PPWRSV: u16 = 0x0800;
    /// PHY duplex mode (full duplex if set)
    pub const PDPXMD: u16 = 0x0100;
}

/// PHSTAT1 bits
pub mod phstat1 {
    /// Full duplex capable
    pub const PFDPX: u16 = 0x1000;
    /// Half duplex capable
    pub const PHDPX: u16 = 0x0800;
    /// Link status (latching low)
    pub const LLSTAT: u16 = 0x0004;
    /// Jabber detected (latching high)
    pub const JBSTAT: u16 = 0x0002;
}

/// PHCON2 bits
pub mod phcon2 {
    /// Force link up
    pub const FRCLNK: u16 = 0x4000;
    /// Twisted pair transmitter disable
    pub const TXDIS: u16 = 0x2000;
    /// Jabber correction disable
    pub const JABBER: u16 = 0x0400;
    /// Half-duplex loopback disable
    pub const HDLDIS: u16 = 0x0100;
}

/// PHSTAT2 bits
pub mod phstat2 {
    /// Transmitting
    pub const TXSTAT: u16 = 0x2000;
    /// Receiving
    pub const RXSTAT: u16 = 0x1000;
    /// Collision occurring
    pub const COLSTAT: u16 = 0x0800;
    /// Link is up
    pub const LSTAT: u16 = 0x0400;
    /// Full duplex
    pub const DPXSTAT: u16 = 0x0200;
    /// Polarity reversed
    pub const PLRITY: u16 = 0x0010;
}

/// PHIE bits
pub mod phie {
    /// Link change interrupt enable
    pub const PLNKIE: u16 = 0x0010;
    /// Global PHY interrupt enable
    pub const PGEIE: u16 = 0x0002;
}

/// PHIR bits
pub mod phir {
    /// Link change interrupt flag
    pub const PLNKIF: u16 = 0x0010;
    /// Global PHY interrupt flag
    pub const PGIF: u16 = 0x0004;
}

/// PHLCON presets
pub mod phlcon {
    /// LEDA: link status and receive activity, LEDB: transmit activity,
    /// stretched pulses
    pub const LINK_AND_ACTIVITY: u16 = 0x3476;
}
