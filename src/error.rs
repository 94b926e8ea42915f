//! Error types for the CSI-2 receiver controller
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: invalid static topology, variant, format or encoding
//! - [`WaitPoint`]: which bounded hardware wait expired
//! - [`UpstreamError`]: the upstream video source refused or is missing
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by every bring-up entry point. Transfer faults seen by the interrupt
//! handler are never surfaced as errors; they are recovered internally.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Raised while validating the static topology at attach time, while
/// resolving the hardware variant, or when a stream start asks for
/// something the selected variant cannot do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Endpoint is not port 0 / endpoint 0
    NotConnected,
    /// Bus type is neither D-PHY nor C-PHY
    UnsupportedBus,
    /// Lane count is not legal for the encoding (D-PHY: 1, 2, 4; C-PHY: 3)
    InvalidLaneCount,
    /// Lane position outside 1..=4
    InvalidLanePosition,
    /// Two logical lanes mapped to the same physical position
    DuplicateLane,
    /// Upstream advertises more lanes than the topology declares
    TooManyLanes,
    /// Pin-swap order array does not match the trio count
    InvalidPinSwapOrder,
    /// Equalization array does not match the trio count or value too large
    InvalidEqualization,
    /// No variant profile matches the hardware identity
    UnknownVariant,
    /// Encoding not supported by this variant (C-PHY on V4M)
    UnsupportedEncoding,
    /// Pixel format code not in the format table
    UnknownFormat,
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
            ConfigError::NotConnected => "endpoint is not port 0 / id 0",
            ConfigError::UnsupportedBus => "unsupported bus type",
            ConfigError::InvalidLaneCount => "unsupported number of data lanes",
            ConfigError::InvalidLanePosition => "lane position out of range",
            ConfigError::DuplicateLane => "duplicate lane position",
            ConfigError::TooManyLanes => "more lanes than configured",
            ConfigError::InvalidPinSwapOrder => "invalid pin-swap order",
            ConfigError::InvalidEqualization => "invalid receive equalization",
            ConfigError::UnknownVariant => "unknown hardware variant",
            ConfigError::UnsupportedEncoding => "encoding not supported by variant",
            ConfigError::UnknownFormat => "unknown pixel format",
        }
    }
}

// =============================================================================
// Wait Points
// =============================================================================

/// Bounded hardware waits
///
/// Carried by [`Error::Timeout`] so the caller can tell which
/// synchronization point never became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitPoint {
    /// Clock and data lanes reaching LP-11
    Lp11,
    /// PHTW write request acknowledge
    PhtwAck,
    /// C-PHY calibration ready
    Calibration,
    /// D-PHY power-on-reset completion
    PowerOnReset,
    /// Per-lane stop state after calibration
    StopState,
}

impl core::fmt::Display for WaitPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WaitPoint {
    /// Returns a human-readable description of the wait
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            WaitPoint::Lp11 => "waiting for LP-11 state",
            WaitPoint::PhtwAck => "waiting for test interface acknowledge",
            WaitPoint::Calibration => "PHY calibration",
            WaitPoint::PowerOnReset => "waiting for PHY power-on-reset",
            WaitPoint::StopState => "waiting for stop state",
        }
    }
}

// =============================================================================
// Upstream Errors
// =============================================================================

/// Upstream video source errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpstreamError {
    /// No source is bound to the receiver
    NotBound,
    /// Source exposes no pixel rate
    NoPixelRate,
    /// Source failed to report its bus configuration
    ConfigQuery,
    /// Source rejected the stream on/off command
    StreamControl,
}

impl core::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UpstreamError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UpstreamError::NotBound => "no upstream source bound",
            UpstreamError::NoPixelRate => "upstream has no pixel rate",
            UpstreamError::ConfigQuery => "upstream bus configuration query failed",
            UpstreamError::StreamControl => "upstream stream control failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match receiver.stream_enable() {
///     Err(Error::Timeout(WaitPoint::Lp11)) => { /* sensor not driving LP-11 */ }
///     Err(Error::UnsupportedSpeed(mbps)) => { /* pixel rate too high */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Link speed (Mbps or Msps) outside every applicable tuning table
    UnsupportedSpeed(u32),
    /// A bounded hardware wait expired
    Timeout(WaitPoint),
    /// Upstream source error
    Upstream(UpstreamError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::UnsupportedSpeed(mbps) => write!(f, "unsupported link speed: {mbps}"),
            Error::Timeout(p) => write!(f, "timeout: {}", p.as_str()),
            Error::Upstream(e) => write!(f, "upstream: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<WaitPoint> for Error {
    fn from(p: WaitPoint) -> Self {
        Error::Timeout(p)
    }
}

impl From<UpstreamError> for Error {
    fn from(e: UpstreamError) -> Self {
        Error::Upstream(e)
    }
}

/// Result type alias for receiver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
