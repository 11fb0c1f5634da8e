//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Memory layout, frame sizes and timing constants
//! - [`regs`]: ENC28J60 instruction opcodes, control register map and bit masks
//! - [`phy_regs`]: Indirectly addressed PHY register map and bit masks
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The pieces advanced callers need
//! for the low-level primitives are re-exported from the crate root under
//! [`crate::regs`] and [`crate::constants`].

pub(crate) mod constants;
pub(crate) mod phy_regs;
pub(crate) mod regs;
