//! Error types for the ENC28J60 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Configuration and initialization failures
//! - [`IoError`]: Runtime bus, receive and transmit failures
//!
//! The unified [`Error`] enum wraps both domain errors and is returned
//! by most driver methods.
//!
//! A receive header without the "received OK" bit is not an error: the
//! receive pipeline reports it as a zero length frame.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Receive region size is zero, odd, or leaves no room for one transmit frame
    InvalidRxBufferSize,
    /// Maximum frame length is outside the Ethernet frame range
    InvalidFrameLength,
    /// Clock-ready bit never set after a soft reset
    ResetFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidRxBufferSize => "invalid receive buffer size",
            ConfigError::InvalidFrameLength => "invalid maximum frame length",
            ConfigError::ResetFailed => "soft reset failed",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime bus, receive and transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// SPI transfer failed
    Spi,
    /// Chip select pin could not be driven
    ChipSelect,
    /// Device did not respond within the configured bound
    Timeout,
    /// Frame does not fit in the transmit region
    FrameTooLarge,
    /// Caller buffer too small for the received frame
    BufferTooSmall,
    /// Read requested more bytes than remain in the current frame
    ReadPastFrame,
    /// Receive operation without a frame opened by `receive_init`
    NoFrameOpen,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Spi => "SPI transfer failed",
            IoError::ChipSelect => "chip select failed",
            IoError::Timeout => "device unresponsive",
            IoError::FrameTooLarge => "frame too large for transmit buffer",
            IoError::BufferTooSmall => "buffer too small for frame",
            IoError::ReadPastFrame => "read past end of frame",
            IoError::NoFrameOpen => "no receive frame open",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match enc.transfer_send(&mut delay) {
///     Err(Error::Io(IoError::Timeout)) => { /* chip hung, reset it */ }
///     Err(e) => { /* ... */ }
///     Ok(()) => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for bus level operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
