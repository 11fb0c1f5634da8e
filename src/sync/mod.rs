//! Synchronization and Concurrency Support
//!
//! This module provides synchronization primitives and concurrency-safe wrappers
//! for the ENC28J60 driver. It includes:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!
//! - **Shared Wrappers** (`shared`): ISR-safe device wrappers
//!   - [`SharedEnc28j60`] - Critical-section protected device handle
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Guard levels
//!
//! `CriticalSectionGuard` on the handle protects each SPI transaction.
//! [`SharedEnc28j60`] protects whole operations; use it when both the main
//! loop and an interrupt handler call receive, transmit or interrupt
//! operations.

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedEnc28j60;
