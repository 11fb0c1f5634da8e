//! ENC28J60 Control Register Definitions
//!
//! Instruction opcodes, the banked control register map and the bit masks
//! used by the driver.
//!
//! # Addressing
//!
//! Control registers are 5-bit addresses. Addresses `0x1B..=0x1F` are the
//! common bank and are reachable whatever bank is selected; everything below
//! is only meaningful relative to the bank selected in `ECON1.BSEL`.
//! 16-bit registers are always laid out low byte first at consecutive
//! addresses, so only the low byte address is listed.
//!
//! # References
//!
//! - ENC28J60 Data Sheet (DS39662)
//! - ENC28J60 Silicon Errata (DS80349)

#![allow(dead_code)]

// =============================================================================
// SPI Instruction Set
// =============================================================================

/// SPI instruction opcodes (upper 3 bits of the instruction byte)
pub mod opcode {
    /// Read Control Register
    pub const RCR: u8 = 0x00;
    /// Read Buffer Memory
    pub const RBM: u8 = 0x20;
    /// Write Control Register
    pub const WCR: u8 = 0x40;
    /// Write Buffer Memory
    pub const WBM: u8 = 0x60;
    /// Bit Field Set
    pub const BFS: u8 = 0x80;
    /// Bit Field Clear
    pub const BFC: u8 = 0xA0;
    /// System Reset Command (soft reset)
    pub const SRC: u8 = 0xE0;

    /// Fixed argument of the RBM/WBM instructions
    pub const BM_ARG: u8 = 0x1A;
    /// Fixed argument of the SRC instruction
    pub const SRC_ARG: u8 = 0x1F;

    /// Mask selecting the opcode part of an instruction byte
    pub const OPCODE_MASK: u8 = 0xE0;
    /// Mask selecting the argument part of an instruction byte
    pub const ARG_MASK: u8 = 0x1F;
}

// =============================================================================
// Common Bank
// =============================================================================

/// Ethernet Interrupt Enable register
pub const EIE: u8 = 0x1B;
/// Ethernet Interrupt Request (flag) register
pub const EIR: u8 = 0x1C;
/// Ethernet Status register
pub const ESTAT: u8 = 0x1D;
/// Ethernet Control register 2
pub const ECON2: u8 = 0x1E;
/// Ethernet Control register 1
pub const ECON1: u8 = 0x1F;

/// First address of the common bank
pub const COMMON_BANK_START: u8 = 0x1B;

// =============================================================================
// Bank 0
// =============================================================================

/// Buffer read pointer
pub const ERDPT: u8 = 0x00;
/// Buffer write pointer
pub const EWRPT: u8 = 0x02;
/// Transmit buffer start
pub const ETXST: u8 = 0x04;
/// Transmit buffer end
pub const ETXND: u8 = 0x06;
/// Receive buffer start
pub const ERXST: u8 = 0x08;
/// Receive buffer end
pub const ERXND: u8 = 0x0A;
/// Receive buffer read pointer (free space boundary)
pub const ERXRDPT: u8 = 0x0C;
/// Receive buffer write pointer
pub const ERXWRPT: u8 = 0x0E;
/// DMA start
pub const EDMAST: u8 = 0x10;
/// DMA end
pub const EDMAND: u8 = 0x12;
/// DMA destination
pub const EDMADST: u8 = 0x14;
/// DMA checksum
pub const EDMACS: u8 = 0x16;

// =============================================================================
// Bank 1
// =============================================================================

/// Hash table (8 bytes)
pub const EHT: u8 = 0x00;
/// Pattern match mask (8 bytes)
pub const EPMM: u8 = 0x08;
/// Pattern match checksum
pub const EPMCS: u8 = 0x10;
/// Pattern match offset
pub const EPMO: u8 = 0x14;
/// Receive filter control
pub const ERXFCON: u8 = 0x18;
/// Pending packet counter
pub const EPKTCNT: u8 = 0x19;

// =============================================================================
// Bank 2 (MAC/MII registers: reads are preceded by a dummy byte)
// =============================================================================

/// MAC control register 1
pub const MACON1: u8 = 0x00;
/// MAC control register 3
pub const MACON3: u8 = 0x02;
/// MAC control register 4
pub const MACON4: u8 = 0x03;
/// Back-to-back inter-packet gap
pub const MABBIPG: u8 = 0x04;
/// Non-back-to-back inter-packet gap
pub const MAIPG: u8 = 0x06;
/// Retransmission maximum
pub const MACLCON1: u8 = 0x08;
/// Collision window
pub const MACLCON2: u8 = 0x09;
/// Maximum frame length
pub const MAMXFL: u8 = 0x0A;
/// MII command register
pub const MICMD: u8 = 0x12;
/// MII register address
pub const MIREGADR: u8 = 0x14;
/// MII write data
pub const MIWR: u8 = 0x16;
/// MII read data
pub const MIRD: u8 = 0x18;

// =============================================================================
// Bank 3
// =============================================================================

/// MAC address byte 5
pub const MAADR5: u8 = 0x00;
/// MAC address byte 6
pub const MAADR6: u8 = 0x01;
/// MAC address byte 3
pub const MAADR3: u8 = 0x02;
/// MAC address byte 4
pub const MAADR4: u8 = 0x03;
/// MAC address byte 1
pub const MAADR1: u8 = 0x04;
/// MAC address byte 2
pub const MAADR2: u8 = 0x05;
/// Built-in self-test fill seed
pub const EBSTSD: u8 = 0x06;
/// Built-in self-test control
pub const EBSTCON: u8 = 0x07;
/// Built-in self-test checksum
pub const EBSTCS: u8 = 0x08;
/// MII status register
pub const MISTAT: u8 = 0x0A;
/// Silicon revision
pub const EREVID: u8 = 0x12;
/// Clock output control
pub const ECOCON: u8 = 0x15;
/// Flow control
pub const EFLOCON: u8 = 0x17;
/// Pause timer value
pub const EPAUS: u8 = 0x18;

/// Station address register for each MAC address byte, in address order
pub const MAADR: [u8; 6] = [MAADR1, MAADR2, MAADR3, MAADR4, MAADR5, MAADR6];

// =============================================================================
// Register Bits
// =============================================================================

/// EIE (interrupt enable) bits
pub mod eie {
    /// Global interrupt enable (gates the INT pin)
    pub const INTIE: u8 = 0x80;
    /// Receive packet pending interrupt enable
    pub const PKTIE: u8 = 0x40;
    /// DMA interrupt enable
    pub const DMAIE: u8 = 0x20;
    /// Link status change interrupt enable
    pub const LINKIE: u8 = 0x10;
    /// Transmit interrupt enable
    pub const TXIE: u8 = 0x08;
    /// Transmit error interrupt enable
    pub const TXERIE: u8 = 0x02;
    /// Receive error interrupt enable
    pub const RXERIE: u8 = 0x01;
}

/// EIR (interrupt flag) bits; same positions as the EIE enables
pub mod eir {
    /// Receive packet pending
    pub const PKTIF: u8 = 0x40;
    /// DMA complete
    pub const DMAIF: u8 = 0x20;
    /// Link status changed
    pub const LINKIF: u8 = 0x10;
    /// Transmit complete
    pub const TXIF: u8 = 0x08;
    /// Transmit error
    pub const TXERIF: u8 = 0x02;
    /// Receive error
    pub const RXERIF: u8 = 0x01;
    /// Every flag the driver knows about
    pub const ALL: u8 = PKTIF | DMAIF | LINKIF | TXIF | TXERIF | RXERIF;
}

/// ESTAT bits
pub mod estat {
    /// INT interrupt flag
    pub const INT: u8 = 0x80;
    /// Ethernet buffer error
    pub const BUFER: u8 = 0x40;
    /// Late collision error
    pub const LATECOL: u8 = 0x10;
    /// Receive busy
    pub const RXBUSY: u8 = 0x04;
    /// Transmit abort error
    pub const TXABRT: u8 = 0x02;
    /// Clock ready
    pub const CLKRDY: u8 = 0x01;
}

/// ECON2 bits
pub mod econ2 {
    /// Automatic buffer pointer increment
    pub const AUTOINC: u8 = 0x80;
    /// Packet decrement
    pub const PKTDEC: u8 = 0x40;
    /// Power save enable
    pub const PWRSV: u8 = 0x20;
    /// Voltage regulator power save
    pub const VRPS: u8 = 0x08;
}

/// ECON1 bits
pub mod econ1 {
    /// Transmit logic reset
    pub const TXRST: u8 = 0x80;
    /// Receive logic reset
    pub const RXRST: u8 = 0x40;
    /// DMA start/busy
    pub const DMAST: u8 = 0x20;
    /// DMA checksum enable
    pub const CSUMEN: u8 = 0x10;
    /// Transmit request to send
    pub const TXRTS: u8 = 0x08;
    /// Receive enable
    pub const RXEN: u8 = 0x04;
    /// Bank select mask
    pub const BSEL: u8 = 0x03;
}

/// ERXFCON (receive filter) bits
pub mod erxfcon {
    /// Unicast filter enable
    pub const UCEN: u8 = 0x80;
    /// AND/OR filter select
    pub const ANDOR: u8 = 0x40;
    /// Post-filter CRC check enable
    pub const CRCEN: u8 = 0x20;
    /// Pattern match filter enable
    pub const PMEN: u8 = 0x10;
    /// Magic packet filter enable
    pub const MPEN: u8 = 0x08;
    /// Hash table filter enable
    pub const HTEN: u8 = 0x04;
    /// Multicast filter enable
    pub const MCEN: u8 = 0x02;
    /// Broadcast filter enable
    pub const BCEN: u8 = 0x01;
}

/// MACON1 bits
pub mod macon1 {
    /// Pause control frame transmission enable
    pub const TXPAUS: u8 = 0x08;
    /// Pause control frame reception enable
    pub const RXPAUS: u8 = 0x04;
    /// Pass all received frames
    pub const PASSALL: u8 = 0x02;
    /// MAC receive enable
    pub const MARXEN: u8 = 0x01;
}

/// MACON3 bits
pub mod macon3 {
    /// Pad to 64 bytes and append CRC
    pub const PADCFG_64: u8 = 0xE0;
    /// No automatic padding
    pub const PADCFG_NO: u8 = 0xC0;
    /// Detect VLAN frames and pad accordingly
    pub const PADCFG_VLAN: u8 = 0xA0;
    /// Pad to 60 bytes and append CRC
    pub const PADCFG_60: u8 = 0x20;
    /// Transmit CRC enable
    pub const TXCRCEN: u8 = 0x10;
    /// Proprietary header enable
    pub const PHDREN: u8 = 0x08;
    /// Huge frame enable
    pub const HFRMEN: u8 = 0x04;
    /// Frame length checking enable
    pub const FRMLNEN: u8 = 0x02;
    /// MAC full-duplex enable
    pub const FULDPX: u8 = 0x01;
}

/// MACON4 bits
pub mod macon4 {
    /// Defer transmission (half duplex)
    pub const DEFER: u8 = 0x40;
}

/// MICMD bits
pub mod micmd {
    /// MII read enable
    pub const MIIRD: u8 = 0x01;
}

/// MISTAT bits
pub mod mistat {
    /// MII management busy
    pub const BUSY: u8 = 0x01;
}

/// Inter-packet gap values recommended by the datasheet
pub mod ipg {
    /// MABBIPG for half duplex
    pub const BACK_TO_BACK_HALF: u8 = 0x12;
    /// MABBIPG for full duplex
    pub const BACK_TO_BACK_FULL: u8 = 0x15;
    /// MAIPG (half duplex needs the high byte as well)
    pub const NON_BACK_TO_BACK: u16 = 0x0C12;
}

/// Build an instruction byte from an opcode and a 5-bit argument
#[inline]
pub const fn instruction(opcode: u8, argument: u8) -> u8 {
    (opcode & opcode::OPCODE_MASK) | (argument & opcode::ARG_MASK)
}
