//! PHY bring-up algorithms
//!
//! One module per receiver family. [`start`] dispatches on the profile's
//! [`BringupAlgorithm`] and, for the V4 generation, confirms that every
//! lane reached stop state before releasing the force-receive-mode bits
//! that were held during calibration.
//!
//! # Modules
//!
//! - [`legacy`]: Gen3 and V3U, programmed through PHYCNT and the PHTW
//!   test interface
//! - [`gen4`]: V4H (D-PHY and C-PHY) and V4M (D-PHY only)
//! - [`snps`]: X5H with independently addressed PHY, link and SDI blocks
//!
//! Every hardware wait is bounded; the first failed step aborts the
//! sequence and the caller is responsible for putting the receiver back
//! into standby.

pub mod gen4;
pub mod legacy;
pub mod snps;

use embedded_hal::delay::DelayNs;

use crate::constants::STOP_STATE_POLL;
use crate::driver::format::FrameFormat;
use crate::driver::lanes::LinkConfig;
use crate::error::{Result, WaitPoint};
use crate::hal::regs::RegisterAccess;
use crate::hal::timing::wait_until;
use crate::internal::register::gen4::{
    FRXM, FRXM_FORCERXMODE_0, FRXM_FORCERXMODE_1, FRXM_FORCERXMODE_2, FRXM_FORCERXMODE_DCK,
    ST_PHYST, ST_STOPSTATE_0, ST_STOPSTATE_1, ST_STOPSTATE_2, ST_STOPSTATE_DCK,
};
use crate::variant::{BringupAlgorithm, VariantProfile};

// =============================================================================
// Stream Plan
// =============================================================================

/// Everything a bring-up algorithm needs for one stream start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamPlan {
    /// Lanes, swap, equalization and link rate
    pub link: LinkConfig,
    /// Negotiated frame format
    pub format: FrameFormat,
    /// CSI-2 data type of the format
    pub datatype: u8,
    /// Bits per pixel of the format
    pub bpp: u8,
}

// =============================================================================
// Dispatch
// =============================================================================

/// Run the bring-up algorithm of `profile`
pub fn start<R, D>(regs: &R, delay: &mut D, profile: &VariantProfile, plan: &StreamPlan) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    debug!(
        "{} bring-up: {} lanes at {} Mbps",
        profile.name, plan.link.lanes, plan.link.mbps
    );

    match profile.algorithm {
        BringupAlgorithm::Legacy => legacy::start(regs, delay, profile, plan)?,
        BringupAlgorithm::CombinedPhy => gen4::start_v4h(regs, delay, profile, &plan.link)?,
        BringupAlgorithm::DphyOnly => gen4::start_v4m(regs, delay, profile, &plan.link)?,
        BringupAlgorithm::IndependentBlocks => snps::start(regs, plan),
    }

    if profile.algorithm.confirms_stop_state() {
        confirm_stop_state(regs, delay, profile.algorithm)?;
    }

    Ok(())
}

/// Force-receive-mode bits held during calibration
const fn forced_rx_lanes(algorithm: BringupAlgorithm) -> u32 {
    let data = FRXM_FORCERXMODE_0 | FRXM_FORCERXMODE_1 | FRXM_FORCERXMODE_2;
    match algorithm {
        BringupAlgorithm::CombinedPhy => data | FRXM_FORCERXMODE_DCK,
        _ => data,
    }
}

/// Wait for clock and data lanes to report stop state, then let the PHY
/// leave forced receive mode
fn confirm_stop_state<R, D>(regs: &R, delay: &mut D, algorithm: BringupAlgorithm) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    let stopped = ST_STOPSTATE_DCK | ST_STOPSTATE_0 | ST_STOPSTATE_1 | ST_STOPSTATE_2;

    wait_until(delay, STOP_STATE_POLL, WaitPoint::StopState, || {
        (regs.read32(ST_PHYST) & stopped) == stopped
    })
    .inspect_err(|_| error!("Timeout waiting for stop state"))?;

    regs.clear_bits32(FRXM, forced_rx_lanes(algorithm));
    debug!("PHY confirmed in stop state");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
