//! Gen3 / V3U bring-up
//!
//! The link block and the D-PHY share one 32-bit register window. Analog
//! tuning goes through the PHTW test interface from the profile's
//! `init_phtw` hook; the PLL range comes from the profile's `hsfreqrange`
//! table. The sequence ends with a bounded wait for LP-11 on the clock lane
//! and every active data lane.

use embedded_hal::delay::DelayNs;

use super::StreamPlan;
use crate::constants::LP11_POLL;
use crate::driver::lanes::{fld, lswap, vcdt};
use crate::error::{Result, WaitPoint};
use crate::hal::phtw::Phtw;
use crate::hal::regs::RegisterAccess;
use crate::hal::timing::wait_until;
use crate::internal::register::gen3::*;
use crate::variant::{Capabilities, VariantProfile};

/// Run the Gen3 / V3U start sequence
pub fn start<R, D>(regs: &R, delay: &mut D, profile: &VariantProfile, plan: &StreamPlan) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    let link = &plan.link;
    let mbps = link.mbps;

    regs.write32(INTEN, INTEN_INT_AFIFO_OF | INTEN_INT_ERRSOTHS | INTEN_INT_ERRSOTSYNCHS);

    // Init
    regs.write32(TREF, TREF_TREF);
    regs.write32(PHTC, 0);

    // Configure
    if !profile.has(Capabilities::NO_VCDT) {
        let [vcdt1, vcdt2] = vcdt(profile.num_channels, plan.datatype);
        regs.write32(VCDT, vcdt1);
        if vcdt2 != 0 {
            regs.write32(VCDT2, vcdt2);
        }
    }
    regs.write32(LSWAP, lswap(&link.lane_swap));

    // Start
    if let Some(init_phtw) = profile.init_phtw {
        let mut phy = Phtw::new(regs, &mut *delay, profile.phtw_port());
        init_phtw(&mut phy, profile, mbps)?;
    }

    if let Some(table) = profile.hsfreqrange {
        let m = table.lookup(mbps)?;
        regs.write32(PHYPLL, phypll_hsfreqrange(u32::from(m.value)));
    }

    if profile.csi0clkfreqrange != 0 {
        regs.write32(CSI0CLKFCPR, csi0clkfreqrange(u32::from(profile.csi0clkfreqrange)));
    }

    if profile.has(Capabilities::HAS_PHYFRX) {
        regs.write32(PHYFRX, PHYFRX_FORCERX_MODE_ALL);
    }

    let phycnt = PHYCNT_ENABLECLK | link.lane_mask();
    regs.write32(PHYCNT, phycnt);
    regs.write32(LINKCNT, LINKCNT_MONITOR_EN | LINKCNT_REG_MONI_PACT_EN | LINKCNT_ICLK_NONSTOP);
    regs.write32(FLD, fld(&plan.format));
    regs.write32(PHYCNT, phycnt | PHYCNT_SHUTDOWNZ);
    regs.write32(PHYCNT, phycnt | PHYCNT_SHUTDOWNZ | PHYCNT_RSTZ);

    wait_lp11(regs, delay, link.lane_mask())?;

    if profile.has(Capabilities::HAS_PHYFRX) {
        regs.write32(PHYFRX, 0);
    }

    if let Some(post_init) = profile.phy_post_init {
        let mut phy = Phtw::new(regs, &mut *delay, profile.phtw_port());
        post_init(&mut phy)?;
    }

    // ULPS start/end latch is stale after PHY start
    if profile.has(Capabilities::CLEAR_ULPS) {
        regs.write32(INTSTATE, INTSTATE_INT_ULPS_START | INTSTATE_INT_ULPS_END);
    }

    Ok(())
}

/// Wait for the clock lane and every lane of `lane_mask` to enter LP-11
fn wait_lp11<R, D>(regs: &R, delay: &mut D, lane_mask: u32) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    wait_until(delay, LP11_POLL, WaitPoint::Lp11, || {
        regs.read32(PHCLM) & PHCLM_STOPSTATECKL != 0 && regs.read32(PHDLM) & lane_mask == lane_mask
    })
    .inspect_err(|_| error!("Timeout waiting for LP-11 state"))
}

// =============================================================================
// Unit Tests
// =============================================================================
