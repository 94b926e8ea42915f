//! Upstream video source interface
//!
//! The receiver does not own the sensor or bridge feeding it. It asks the
//! source for the numbers it needs to tune the PHY and tells it when to
//! start and stop transmitting.

use crate::driver::format::FrameFormat;
use crate::error::UpstreamError;

/// Bus type advertised by the upstream source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MbusType {
    /// CSI-2 over D-PHY
    Dphy,
    /// CSI-2 over C-PHY
    Cphy,
    /// Anything else (parallel, BT.656, ...)
    Other,
}

/// Bus configuration advertised by the upstream source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MbusConfig {
    /// Bus type
    pub bus_type: MbusType,
    /// Data lanes (or trios) the source will drive
    pub lanes: u8,
}

/// The device transmitting into the receiver
pub trait VideoSource {
    /// Pixel rate in pixels per second, if the source exposes one
    fn pixel_rate(&mut self) -> Option<u64>;

    /// Advertised bus configuration
    ///
    /// `Ok(None)` means the source does not advertise one and the declared
    /// lane count applies.
    fn mbus_config(&mut self) -> Result<Option<MbusConfig>, UpstreamError> {
        Ok(None)
    }

    /// Begin transmitting `format`
    fn start_stream(&mut self, format: &FrameFormat) -> Result<(), UpstreamError>;

    /// Stop transmitting
    fn stop_stream(&mut self) -> Result<(), UpstreamError>;
}

impl<S: VideoSource + ?Sized> VideoSource for &mut S {
    fn pixel_rate(&mut self) -> Option<u64> {
        (**self).pixel_rate()
    }

    fn mbus_config(&mut self) -> Result<Option<MbusConfig>, UpstreamError> {
        (**self).mbus_config()
    }

    fn start_stream(&mut self, format: &FrameFormat) -> Result<(), UpstreamError> {
        (**self).start_stream(format)
    }

    fn stop_stream(&mut self) -> Result<(), UpstreamError> {
        (**self).stop_stream()
    }
}
