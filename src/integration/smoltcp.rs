//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! This module provides integration with the [smoltcp](https://docs.rs/smoltcp) network stack.
//! [`Enc28j60Device`] pairs an initialized driver handle with a delay source
//! and implements `smoltcp::phy::Device` for it.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_enc28j60::integration::smoltcp::{ethernet_address, Enc28j60Device};
//!
//! let mut enc = Enc28j60::new(spi, cs, Enc28j60Config::new());
//! enc.init(&mut delay).unwrap();
//!
//! let mut device = Enc28j60Device::new(enc, delay);
//! let config = Config::new(ethernet_address(device.inner()).into());
//! let mut iface = Interface::new(config, &mut device, smoltcp::time::Instant::ZERO);
//!
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Token model
//!
//! smoltcp asks for an RX and a TX token at the same time. The RX token
//! carries its own copy of the frame, read out of the chip before the
//! tokens are handed over, so only the TX token borrows the device.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use smoltcp::phy::{Checksum, ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::driver::device::Enc28j60;
use crate::hal::guard::BusGuard;
use crate::internal::constants::{ETH_HEADER_SIZE, MAX_FRAME_SIZE, MTU};

// =============================================================================
// Device Wrapper
// =============================================================================

/// smoltcp `Device` over an initialized ENC28J60.
pub struct Enc28j60Device<SPI, CS, G, D> {
    enc: Enc28j60<SPI, CS, G>,
    delay: D,
}

impl<SPI, CS, G, D> Enc28j60Device<SPI, CS, G, D> {
    /// Wrap an initialized handle; `delay` bounds the transmit wait.
    pub fn new(enc: Enc28j60<SPI, CS, G>, delay: D) -> Self {
        Self { enc, delay }
    }

    /// Driver handle, e.g. for interrupt handling or link checks
    pub fn inner(&mut self) -> &mut Enc28j60<SPI, CS, G> {
        &mut self.enc
    }

    /// Unwrap into the handle and the delay
    pub fn into_inner(self) -> (Enc28j60<SPI, CS, G>, D) {
        (self.enc, self.delay)
    }
}

// =============================================================================
// RX Token
// =============================================================================

/// Receive token holding one frame read out of the chip.
pub struct Enc28j60RxToken {
    buffer: [u8; MAX_FRAME_SIZE],
    len: usize,
}

impl smoltcp::phy::RxToken for Enc28j60RxToken {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token streaming one frame through the transmit pipeline.
pub struct Enc28j60TxToken<'a, SPI, CS, G, D> {
    enc: &'a mut Enc28j60<SPI, CS, G>,
    delay: &'a mut D,
}

impl<SPI, CS, G, D> smoltcp::phy::TxToken for Enc28j60TxToken<'_, SPI, CS, G, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
    D: DelayNs,
{
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        // MAMXFL counts the CRC the MAC appends
        let len = len.min(MTU + ETH_HEADER_SIZE);
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let result = f(&mut buffer[..len]);

        // smoltcp has no error path here; a lost frame is retried by the upper layers
        if let Err(_e) = self.enc.transmit(&buffer[..len], self.delay) {
            #[cfg(feature = "defmt")]
            defmt::warn!("transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<SPI, CS, G, D> Device for Enc28j60Device<SPI, CS, G, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
    D: DelayNs,
{
    type RxToken<'a>
        = Enc28j60RxToken
    where
        Self: 'a;
    type TxToken<'a>
        = Enc28j60TxToken<'a, SPI, CS, G, D>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        let mut rx = Enc28j60RxToken {
            buffer: [0u8; MAX_FRAME_SIZE],
            len: 0,
        };
        match self.enc.receive(&mut rx.buffer) {
            Ok(Some(len)) => rx.len = len,
            Ok(None) => return None,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("receive failed: {}", _e);
                return None;
            }
        }

        Some((
            rx,
            Enc28j60TxToken {
                enc: &mut self.enc,
                delay: &mut self.delay,
            },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        // The transmit region is free again once the previous send returned
        Some(Enc28j60TxToken {
            enc: &mut self.enc,
            delay: &mut self.delay,
        })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();

        caps.medium = Medium::Ethernet;

        // smoltcp counts the Ethernet header for Medium::Ethernet
        caps.max_transmission_unit = MTU + ETH_HEADER_SIZE;

        // One frame in the transmit region at a time
        caps.max_burst_size = Some(1);

        // No checksum offload on this chip
        caps.checksum = ChecksumCapabilities::default();
        caps.checksum.ipv4 = Checksum::Both;
        caps.checksum.udp = Checksum::Both;
        caps.checksum.tcp = Checksum::Both;
        caps.checksum.icmpv4 = Checksum::Both;

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
pub fn ethernet_address<SPI, CS, G>(enc: &Enc28j60<SPI, CS, G>) -> smoltcp::wire::EthernetAddress
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    G: BusGuard,
{
    smoltcp::wire::EthernetAddress(enc.mac_address())
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;
    use std::vec::Vec;

    use smoltcp::phy::{RxToken, TxToken};

    use super::*;
    use crate::driver::config::Enc28j60Config;
    use crate::testing::{MockCs, MockDelay, MockEnc28j60, MockSpi};

    fn device() -> (MockEnc28j60, Enc28j60Device<MockSpi, MockCs, crate::hal::Unguarded, MockDelay>) {
        let chip = MockEnc28j60::new();
        let mut enc = Enc28j60::new(chip.spi(), chip.cs(), Enc28j60Config::new());
        enc.init(&mut MockDelay::new()).unwrap();
        (chip, Enc28j60Device::new(enc, MockDelay::new()))
    }

    #[test]
    fn capabilities_describe_ethernet() {
        let (_chip, device) = device();
        let caps = device.capabilities();

        assert_eq!(caps.medium, Medium::Ethernet);
        assert_eq!(caps.max_transmission_unit, 1514);
        assert_eq!(caps.max_burst_size, Some(1));
        assert!(matches!(caps.checksum.tcp, Checksum::Both));
    }

    #[test]
    fn receive_without_frames_yields_nothing() {
        let (_chip, mut device) = device();

        assert!(device.receive(Instant::ZERO).is_none());
    }

    #[test]
    fn receive_hands_frame_to_stack() {
        let (chip, mut device) = device();
        let frame: Vec<u8> = (0..60).collect();
        chip.inject_frame(0, 70, &frame, true);

        let (rx, _tx) = device.receive(Instant::ZERO).unwrap();
        let received = rx.consume(|data| data.to_vec());

        assert_eq!(received, frame);
        assert_eq!(chip.pending_packets(), 0);
    }

    #[test]
    fn transmit_token_sends_frame() {
        let (chip, mut device) = device();

        let tx = device.transmit(Instant::ZERO).unwrap();
        tx.consume(42, |buf| buf.fill(0xA5));

        assert_eq!(chip.sent_frames(), vec![vec![0xA5; 42]]);
    }

    #[test]
    fn oversized_transmit_is_clamped() {
        let (chip, mut device) = device();

        let tx = device.transmit(Instant::ZERO).unwrap();
        let seen = tx.consume(4000, |buf| buf.len());

        assert_eq!(seen, 1514);
        assert_eq!(seen, device.capabilities().max_transmission_unit);
        assert_eq!(chip.sent_frames()[0].len(), 1514);
    }

    #[test]
    fn ethernet_address_matches_config() {
        let (_chip, mut device) = device();

        let addr = ethernet_address(device.inner());

        assert_eq!(addr.0, Enc28j60Config::new().mac_address);
    }
}
