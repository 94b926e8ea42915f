//! CSI-2 receiver state machine
//!
//! [`Csi2Receiver`] owns everything one receiver instance needs: its
//! register window, a delay, the platform's power control, the bound
//! upstream source and the variant profile resolved at attach time. It
//! turns reference-counted stream enable/disable requests into the
//! bring-up and teardown sequences of [`crate::phy`].
//!
//! # States
//!
//! ```text
//! Standby -> Resetting -> StaticConfig -> Calibrating -> Streaming
//!    ^                                                      |
//!    +----------------------- Stopping <--------------------+
//! ```
//!
//! Any failure on the way up returns the receiver to `Standby` with its
//! power reference dropped.
//!
//! The receiver itself is not synchronized. Wrap it in a
//! [`SharedReceiver`](crate::sync::SharedReceiver) when stream control and
//! fault recovery run in different contexts.

use embedded_hal::delay::DelayNs;

use super::config::{BusType, DeviceConfig, LinkTopology};
use super::format::{FrameFormat, format_info};
use super::lanes::{LinkConfig, active_lanes, fixed_link_rate_mbps, link_rate_mbps};
use super::source::VideoSource;
use crate::constants::{FAULT_RESTART_PAUSE_US, STANDBY_SETTLE_US};
use crate::error::{ConfigError, Result, UpstreamError};
use crate::hal::power::PowerControl;
use crate::hal::regs::RegisterAccess;
use crate::internal::register::gen3::{PHTC, PHTC_TESTCLR, PHYCNT};
use crate::phy::{self, StreamPlan};
use crate::variant::{self, BringupAlgorithm, Capabilities, VariantProfile};

// =============================================================================
// PHY State
// =============================================================================

/// Receiver PHY state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyState {
    /// Powered down, reset asserted
    #[default]
    Standby,
    /// Leaving standby
    Resetting,
    /// Deriving link parameters and writing static registers
    StaticConfig,
    /// PHY calibration and readiness waits
    Calibrating,
    /// PHY up and upstream transmitting
    Streaming,
    /// Tearing down
    Stopping,
}

// =============================================================================
// Receiver
// =============================================================================

/// One CSI-2 receiver instance
///
/// # Type Parameters
/// * `R` - Register window
/// * `D` - Delay provider used by every bounded wait
/// * `P` - Power domain and reset control
/// * `S` - Upstream video source
///
/// # Example
/// ```ignore
/// let config = DeviceConfig::new("renesas,r8a779g0-csi2", Topology::dphy(&[1, 2, 3, 4]));
/// let mut csi = Csi2Receiver::new(config, regs, delay, power)?;
/// csi.bind_source(sensor);
/// csi.set_format(FrameFormat::new(media_bus::UYVY8_1X16, 1920, 1080));
/// csi.stream_enable()?;
/// ```
pub struct Csi2Receiver<R, D, P, S> {
    regs: R,
    delay: D,
    power: P,
    source: Option<S>,
    profile: &'static VariantProfile,
    topology: LinkTopology,
    format: FrameFormat,
    /// Link parameters of the running stream
    link: Option<LinkConfig>,
    stream_count: u32,
    state: PhyState,
}

impl<R, D, P, S> Csi2Receiver<R, D, P, S>
where
    R: RegisterAccess,
    D: DelayNs,
    P: PowerControl,
    S: VideoSource,
{
    /// Attach a receiver
    ///
    /// Resolves the variant profile and validates the declared topology.
    /// Nothing is written to the hardware.
    pub fn new(config: DeviceConfig<'_>, regs: R, delay: D, power: P) -> Result<Self> {
        let profile = variant::lookup(config.compatible, config.soc_revision)?;
        let topology = config.topology.validate()?;

        if profile.algorithm == BringupAlgorithm::DphyOnly && topology.bus_type == BusType::Cphy {
            error!("R-Car {} does not support C-PHY", profile.name);
            return Err(ConfigError::UnsupportedEncoding.into());
        }

        info!(
            "{} CSI-2 receiver, {} lanes, {} channels",
            profile.name, topology.lanes, profile.num_channels
        );

        Ok(Self {
            regs,
            delay,
            power,
            source: None,
            profile,
            topology,
            format: FrameFormat::default(),
            link: None,
            stream_count: 0,
            state: PhyState::Standby,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current PHY state
    pub fn state(&self) -> PhyState {
        self.state
    }

    /// Number of outstanding stream enables
    pub fn stream_count(&self) -> u32 {
        self.stream_count
    }

    /// Resolved variant profile
    pub fn profile(&self) -> &'static VariantProfile {
        self.profile
    }

    /// Validated static topology
    pub fn topology(&self) -> &LinkTopology {
        &self.topology
    }

    /// Link parameters while streaming
    pub fn link(&self) -> Option<&LinkConfig> {
        self.link.as_ref()
    }

    /// Register window
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Power control
    pub fn power(&self) -> &P {
        &self.power
    }

    /// Bound upstream source
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Bound upstream source, mutably
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    // =========================================================================
    // Format and Source
    // =========================================================================

    /// Negotiated frame format
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Store a new frame format, substituting the default pixel code for
    /// unsupported ones; returns the format actually stored
    ///
    /// Takes effect at the next stream start.
    pub fn set_format(&mut self, format: FrameFormat) -> FrameFormat {
        self.format = format.normalized();
        self.format
    }

    /// Bind the upstream source, returning the previous one
    pub fn bind_source(&mut self, source: S) -> Option<S> {
        debug!("Upstream source bound");
        self.source.replace(source)
    }

    /// Unbind the upstream source
    ///
    /// A running stream is left running; its eventual stop only tears down
    /// the PHY.
    pub fn unbind_source(&mut self) -> Option<S> {
        if self.stream_count > 0 {
            warn!("Upstream source unbound while streaming");
        }
        self.source.take()
    }

    // =========================================================================
    // Stream Control
    // =========================================================================

    /// Take a stream reference, bringing the link up on the first one
    pub fn stream_enable(&mut self) -> Result<()> {
        if self.stream_count == 0 {
            self.start()?;
        }
        self.stream_count += 1;
        Ok(())
    }

    /// Drop a stream reference, tearing the link down on the last one
    pub fn stream_disable(&mut self) {
        match self.stream_count {
            0 => {
                warn!("Stream disable without matching enable");
                return;
            }
            1 => self.stop(),
            _ => {}
        }
        self.stream_count -= 1;
    }

    /// Full stop / start cycle after a transfer error
    ///
    /// Does nothing when no stream is enabled. On failure the receiver is
    /// left in `Standby` with its stream count unchanged.
    pub fn recover(&mut self) -> Result<()> {
        if self.stream_count == 0 {
            return Ok(());
        }

        self.stop();
        self.delay.delay_us(FAULT_RESTART_PAUSE_US);
        self.start()
    }

    // =========================================================================
    // Bring-up / Teardown
    // =========================================================================

    fn start(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(UpstreamError::NotBound.into());
        }

        self.state = PhyState::Resetting;
        self.exit_standby();

        if let Err(e) = self.bring_up() {
            self.enter_standby();
            self.link = None;
            self.state = PhyState::Standby;
            return Err(e);
        }

        Ok(())
    }

    fn bring_up(&mut self) -> Result<()> {
        self.state = PhyState::StaticConfig;
        let plan = self.plan()?;

        debug!(
            "Input size ({}x{}), {} lanes at {} Mbps",
            plan.format.width, plan.format.height, plan.link.lanes, plan.link.mbps
        );

        self.state = PhyState::Calibrating;
        phy::start(&self.regs, &mut self.delay, self.profile, &plan)?;
        debug!("Link and PHY of CSI-2 receiver set");

        let source = self.source.as_mut().ok_or(UpstreamError::NotBound)?;
        source
            .start_stream(&plan.format)
            .inspect_err(|_| error!("Upstream source failed to start"))?;

        self.link = Some(plan.link);
        self.state = PhyState::Streaming;
        debug!("CSI-2 receiver streaming");
        Ok(())
    }

    /// Derive this stream's link parameters
    fn plan(&mut self) -> Result<StreamPlan> {
        let info = format_info(self.format.code).ok_or(ConfigError::UnknownFormat)?;
        let source = self.source.as_mut().ok_or(UpstreamError::NotBound)?;

        let (lanes, mbps) = match self.profile.fixed_link_rate_bps {
            Some(bps) => {
                let lanes = self.topology.lanes;
                (lanes, fixed_link_rate_mbps(bps, lanes)?)
            }
            None => {
                let lanes = active_lanes(&self.topology, source.mbus_config()?)?;
                let pixel_rate = source.pixel_rate().ok_or(UpstreamError::NoPixelRate)?;
                (lanes, link_rate_mbps(pixel_rate, info.bpp, lanes)?)
            }
        };

        Ok(StreamPlan {
            link: LinkConfig::new(&self.topology, lanes, mbps),
            format: self.format,
            datatype: info.datatype,
            bpp: info.bpp,
        })
    }

    fn stop(&mut self) {
        if self.state == PhyState::Standby {
            return;
        }

        self.state = PhyState::Stopping;
        if let Some(source) = self.source.as_mut() {
            if source.stop_stream().is_err() {
                warn!("Upstream source failed to stop");
            }
        }

        self.enter_standby();
        self.link = None;
        self.state = PhyState::Standby;
        debug!("CSI-2 receiver in standby");
    }

    fn enter_standby(&mut self) {
        if !self.profile.has(Capabilities::STANDBY_KEEPS_PHYCNT) {
            self.regs.write32(PHYCNT, 0);
            self.regs.write32(PHTC, PHTC_TESTCLR);
        }

        if !self.profile.has(Capabilities::NO_RESET_CONTROL) {
            self.power.reset_assert();
        }

        self.delay.delay_us(STANDBY_SETTLE_US);
        self.power.power_put();
    }

    fn exit_standby(&mut self) {
        self.power.power_get();
        if !self.profile.has(Capabilities::NO_RESET_CONTROL) {
            self.power.reset_deassert();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
