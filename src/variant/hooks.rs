//! Per-generation PHY programming hooks
//!
//! Each hook is a plain function over a [`TestInterface`], so profiles can
//! hold them as `fn` values. Sequences are written pair by pair in order and
//! the first failed acknowledge aborts the hook.

use crate::error::{ConfigError, Result};
use crate::hal::phtw::{PhtwPair, TestInterface, write_mbps, write_sequence};
use crate::internal::register::gen3::phypll_hsfreqrange;
use crate::internal::register::gen4::{
    PHY_EN, PHY_ENABLE_0, PHY_ENABLE_1, PHY_ENABLE_2, PHY_ENABLE_DCK, V4M_CSI0CLKFCPR,
    V4M_PHYPLL, v4m_csi0clkfreqrange,
};
use crate::tuning::SpeedTable;
use crate::tuning::tables::{PHTW_MBPS_H3_V3H_M3N, PHTW_MBPS_V3M_E3, PHTW_MBPS_V3U};
use crate::variant::VariantProfile;

const fn pair(data: u8, code: u8) -> PhtwPair {
    PhtwPair::new(data, code)
}

// =============================================================================
// H3 / V3H / M3-N
// =============================================================================

/// Highest link rate that takes the low speed tuning pairs
const H3_LOW_SPEED_MAX_MBPS: u32 = 250;

static H3_STEP1: [PhtwPair; 5] = [
    pair(0xcc, 0xe2),
    pair(0x01, 0xe3),
    pair(0x11, 0xe4),
    pair(0x01, 0xe5),
    pair(0x10, 0x04),
];

static H3_STEP2: [PhtwPair; 5] = [
    pair(0x38, 0x08),
    pair(0x01, 0x00),
    pair(0x4b, 0xac),
    pair(0x03, 0x00),
    pair(0x80, 0x07),
];

fn h3_v3h_m3n(phy: &mut dyn TestInterface, mbps: u32) -> Result<()> {
    write_sequence(phy, &H3_STEP1)?;

    if mbps != 0 && mbps <= H3_LOW_SPEED_MAX_MBPS {
        phy.phtw_write(0x39, 0x05)?;
        write_mbps(phy, SpeedTable::new(&PHTW_MBPS_H3_V3H_M3N), mbps, 0xf1)?;
    }

    write_sequence(phy, &H3_STEP2)
}

/// H3 (ES3+), V3H and M3-N
pub fn init_phtw_h3_v3h_m3n(phy: &mut dyn TestInterface, _: &VariantProfile, mbps: u32) -> Result<()> {
    h3_v3h_m3n(phy, mbps)
}

/// H3 ES2 never takes the low speed branch
pub fn init_phtw_h3es2(phy: &mut dyn TestInterface, _: &VariantProfile, _mbps: u32) -> Result<()> {
    h3_v3h_m3n(phy, 0)
}

// =============================================================================
// V3M / E3
// =============================================================================

static V3M_E3_POST_INIT: [PhtwPair; 5] = [
    pair(0xee, 0x34),
    pair(0xee, 0x44),
    pair(0xee, 0x54),
    pair(0xee, 0x84),
    pair(0xee, 0x94),
];

/// V3M and E3
pub fn init_phtw_v3m_e3(phy: &mut dyn TestInterface, _: &VariantProfile, mbps: u32) -> Result<()> {
    write_mbps(phy, SpeedTable::new(&PHTW_MBPS_V3M_E3), mbps, 0x44)
}

/// V3M and E3 fixup once the lanes reached LP-11
pub fn phy_post_init_v3m_e3(phy: &mut dyn TestInterface) -> Result<()> {
    write_sequence(phy, &V3M_E3_POST_INIT)
}

// =============================================================================
// V3U
// =============================================================================

/// Highest link rate that uses the fixed V3U oscillator setting
const V3U_FIXED_OSC_MAX_MBPS: u32 = 1500;

static V3U_STEP2: [PhtwPair; 3] = [pair(0x01, 0xe3), pair(0x11, 0xe4), pair(0x01, 0xe5)];

static V3U_STEP4: [PhtwPair; 4] = [
    pair(0x01, 0x00),
    pair(0x4b, 0xac),
    pair(0x03, 0x00),
    pair(0x80, 0x07),
];

/// V3U (also used by X5H)
pub fn init_phtw_v3u(phy: &mut dyn TestInterface, _: &VariantProfile, mbps: u32) -> Result<()> {
    let low_speed = mbps != 0 && mbps <= V3U_FIXED_OSC_MAX_MBPS;

    if low_speed {
        phy.phtw_write(0xcc, 0xe2)?;
    } else {
        write_mbps(phy, SpeedTable::new(&PHTW_MBPS_V3U), mbps, 0xe2)?;
    }

    write_sequence(phy, &V3U_STEP2)?;

    if low_speed {
        phy.phtw_write(0x38, 0x08)?;
    }

    write_sequence(phy, &V3U_STEP4)
}

// =============================================================================
// V4M
// =============================================================================

/// Boundary between the V4M low and high speed tuning
const V4M_HIGH_SPEED_MIN_MBPS: u32 = 1500;

static V4M_STEP33: [PhtwPair; 2] = [pair(0x00, 0x00), pair(0x3c, 0x08)];

static V4M_STEP36: [PhtwPair; 21] = [
    pair(0x00, 0x00),
    pair(0x80, 0xe0),
    pair(0x01, 0xe1),
    pair(0x06, 0x00),
    pair(0x0f, 0x11),
    pair(0x08, 0x00),
    pair(0x0f, 0x11),
    pair(0x0a, 0x00),
    pair(0x0f, 0x11),
    pair(0x0c, 0x00),
    pair(0x0f, 0x11),
    pair(0x01, 0x00),
    pair(0x31, 0xaa),
    pair(0x05, 0x00),
    pair(0x05, 0x09),
    pair(0x07, 0x00),
    pair(0x05, 0x09),
    pair(0x09, 0x00),
    pair(0x05, 0x09),
    pair(0x0b, 0x00),
    pair(0x05, 0x09),
];

/// Low byte of the DDL oscillator target
const fn osc_low(target: u16) -> u8 {
    (target & 0xff) as u8
}

/// Bits 11:8 of the DDL oscillator target
const fn osc_high(target: u16) -> u8 {
    ((target >> 8) & 0xf) as u8
}

/// V4M: PLL range, oscillator target, clock range and PHY enable, all
/// programmed while the PHY is held in reset
pub fn init_phtw_v4m(phy: &mut dyn TestInterface, profile: &VariantProfile, mbps: u32) -> Result<()> {
    if let Some(table) = profile.hsfreqrange {
        let range = table.lookup(mbps)?;
        phy.write32(V4M_PHYPLL, phypll_hsfreqrange(u32::from(range.value)));
    }

    let osc = profile.osc_freq_target.ok_or(ConfigError::UnknownVariant)?;
    let target = osc.lookup(mbps)?.value;
    debug!("v4m osc target {} for {} Mbps", target, mbps);

    write_sequence(
        phy,
        &[
            pair(0x00, 0x00),
            pair(osc_low(target), 0xe2),
            pair(osc_high(target), 0xe3),
            pair(0x01, 0xe4),
        ],
    )?;

    if mbps != 0 && mbps <= V4M_HIGH_SPEED_MIN_MBPS {
        write_sequence(phy, &V4M_STEP33)?;
    }

    if profile.csi0clkfreqrange != 0 {
        phy.write32(
            V4M_CSI0CLKFCPR,
            v4m_csi0clkfreqrange(u32::from(profile.csi0clkfreqrange)),
        );
    }

    phy.set_bits32(
        PHY_EN,
        PHY_ENABLE_DCK | PHY_ENABLE_0 | PHY_ENABLE_1 | PHY_ENABLE_2,
    );

    if mbps > V4M_HIGH_SPEED_MIN_MBPS {
        write_sequence(phy, &V4M_STEP36)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
