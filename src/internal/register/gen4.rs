//! V4H / V4M link registers and the 16-bit PPI / core PHY register windows.
//!
//! Lane 3 bits are listed for completeness; bring-up only drives DCK and
//! lanes 0-2.

#![allow(dead_code)]

// =============================================================================
// Link block (32-bit)
// =============================================================================

/// Number of active data lanes minus one
pub const N_LANES: u32 = 0x4;
/// Link reset release
pub const CSI2_RESETN: u32 = 0x8;
/// PHY mode select
pub const PHY_MODE: u32 = 0x1c;
/// PHY shutdown release
pub const PHY_SHUTDOWNZ: u32 = 0x40;
/// D-PHY reset release
pub const DPHY_RSTZ: u32 = 0x44;
/// Field detection control
pub const FLDC: u32 = 0x804;
/// Field detection data
pub const FLDD: u32 = 0x808;
/// ID check control
pub const IDIC: u32 = 0x810;

/// Release bit shared by CSI2_RESETN, PHY_SHUTDOWNZ, DPHY_RSTZ and PHY_MODE
pub const RELEASE: u32 = 1 << 0;

/// Force RX mode overrides
pub const PHY_DPHY_OVR1: u32 = 0x848;
/// Override enable, data lane 3
pub const OVR1_FORCERXMODE_3: u32 = 1 << 12;
/// Override enable, data lane 2
pub const OVR1_FORCERXMODE_2: u32 = 1 << 11;
/// Override enable, data lane 1
pub const OVR1_FORCERXMODE_1: u32 = 1 << 10;
/// Override enable, data lane 0
pub const OVR1_FORCERXMODE_0: u32 = 1 << 9;
/// Override enable, clock lane
pub const OVR1_FORCERXMODE_DCK: u32 = 1 << 8;

/// Per-lane PHY enable
pub const PHY_EN: u32 = 0x2000;
/// Data lane 3 enable
pub const PHY_ENABLE_3: u32 = 1 << 7;
/// Data lane 2 enable
pub const PHY_ENABLE_2: u32 = 1 << 6;
/// Data lane 1 enable
pub const PHY_ENABLE_1: u32 = 1 << 5;
/// Data lane 0 enable
pub const PHY_ENABLE_0: u32 = 1 << 4;
/// Clock lane enable
pub const PHY_ENABLE_DCK: u32 = 1 << 0;

/// Force RX mode
pub const FRXM: u32 = 0x2004;
/// Clock lane
pub const FRXM_FORCERXMODE_DCK: u32 = 1 << 4;
/// Data lane 3
pub const FRXM_FORCERXMODE_3: u32 = 1 << 3;
/// Data lane 2
pub const FRXM_FORCERXMODE_2: u32 = 1 << 2;
/// Data lane 1
pub const FRXM_FORCERXMODE_1: u32 = 1 << 1;
/// Data lane 0
pub const FRXM_FORCERXMODE_0: u32 = 1 << 0;

/// PHY status
pub const ST_PHYST: u32 = 0x2814;
/// C-PHY calibration complete
pub const ST_PHY_READY: u32 = 1 << 31;
/// Clock lane stop state
pub const ST_STOPSTATE_DCK: u32 = 1 << 7;
/// Data lane 3 stop state
pub const ST_STOPSTATE_3: u32 = 1 << 3;
/// Data lane 2 stop state
pub const ST_STOPSTATE_2: u32 = 1 << 2;
/// Data lane 1 stop state
pub const ST_STOPSTATE_1: u32 = 1 << 1;
/// Data lane 0 stop state
pub const ST_STOPSTATE_0: u32 = 1 << 0;

// =============================================================================
// V4 PHY test interface and clock registers (32-bit)
// =============================================================================

/// PHY frequency control
pub const V4M_PHYPLL: u32 = 0x2050;
/// CSI0CLK frequency configuration preset
pub const V4M_CSI0CLKFCPR: u32 = 0x2054;
/// PHY test interface write
pub const V4M_PHTW: u32 = 0x2060;
/// PHY test interface read
pub const V4M_PHTR: u32 = 0x2064;
/// PHY test interface clear
pub const V4M_PHTC: u32 = 0x2068;

/// Power-on-reset status field of PHTR
pub const PHTR_POR_MASK: u32 = 0xf << 16;
/// Power-on-reset complete pattern
pub const PHTR_POR_DONE: u32 = 0x7 << 16;

/// CSI0CLK frequency range field (8 bits wide on V4M)
#[inline(always)]
pub const fn v4m_csi0clkfreqrange(n: u32) -> u32 {
    (n & 0xff) << 16
}

// =============================================================================
// PPI registers (16-bit)
// =============================================================================

/// Common D-PHY startup configuration, word `n`
#[inline(always)]
pub const fn ppi_startup_rw_common_dphy(n: u32) -> u32 {
    0x21800 + n * 2
}

/// Startup configuration 1_1
pub const PPI_STARTUP_RW_COMMON_STARTUP_1_1: u32 = 0x21822;
/// Bandgap calibration control
pub const PPI_CALIBCTRL_RW_COMMON_BG_0: u32 = 0x2184c;
/// LP DCO calibration time base
pub const PPI_RW_LPDCOCAL_TIMEBASE: u32 = 0x21c02;
/// LP DCO calibration reference
pub const PPI_RW_LPDCOCAL_NREF: u32 = 0x21c04;
/// LP DCO calibration reference range
pub const PPI_RW_LPDCOCAL_NREF_RANGE: u32 = 0x21c06;
/// LP DCO calibration wait
pub const PPI_RW_LPDCOCAL_TWAIT_CONFIG: u32 = 0x21c0a;
/// LP DCO calibration voltage threshold
pub const PPI_RW_LPDCOCAL_VT_CONFIG: u32 = 0x21c0c;
/// LP DCO coarse calibration
pub const PPI_RW_LPDCOCAL_COARSE_CFG: u32 = 0x21c10;
/// Common configuration
pub const PPI_RW_COMMON_CFG: u32 = 0x21c6c;
/// Termination calibration
pub const PPI_RW_TERMCAL_CFG_0: u32 = 0x21c80;
/// Offset calibration
pub const PPI_RW_OFFSETCAL_CFG_0: u32 = 0x21ca0;

// =============================================================================
// Core digital registers (16-bit)
// =============================================================================

/// Analog front end control 2, lane 0, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_lane0_ctrl_2(n: u32) -> u32 {
    0x22040 + n * 2
}

/// Analog front end control 2, lane 1, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_lane1_ctrl_2(n: u32) -> u32 {
    0x22440 + n * 2
}

/// Analog front end control 2, lane 2, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_lane2_ctrl_2(n: u32) -> u32 {
    0x22840 + n * 2
}

/// Analog front end control 2, lane 3, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_lane3_ctrl_2(n: u32) -> u32 {
    0x22c40 + n * 2
}

/// Analog front end control 2, lane 4, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_lane4_ctrl_2(n: u32) -> u32 {
    0x23040 + n * 2
}

/// Analog front end common block control 2, word `n`
#[inline(always)]
pub const fn core_dig_ioctrl_rw_afe_cb_ctrl_2(n: u32) -> u32 {
    0x23840 + n * 2
}

/// Common digital configuration, word `n`
#[inline(always)]
pub const fn core_dig_rw_common(n: u32) -> u32 {
    0x23880 + n * 2
}

/// Analog control, word `n`
#[inline(always)]
pub const fn core_dig_anactrl_rw_common_anactrl(n: u32) -> u32 {
    0x239e0 + n * 2
}

/// Trio 0 configuration, word `n`
#[inline(always)]
pub const fn core_dig_rw_trio0(n: u32) -> u32 {
    0x22100 + n * 2
}

/// Trio 1 configuration, word `n`
#[inline(always)]
pub const fn core_dig_rw_trio1(n: u32) -> u32 {
    0x22500 + n * 2
}

/// Trio 2 configuration, word `n`
#[inline(always)]
pub const fn core_dig_rw_trio2(n: u32) -> u32 {
    0x22900 + n * 2
}

/// C-PHY lane 0 configuration
pub const CORE_DIG_CLANE_0_RW_CFG_0: u32 = 0x2a000;
/// C-PHY lane 1 configuration
pub const CORE_DIG_CLANE_1_RW_CFG_0: u32 = 0x2a400;
/// C-PHY lane 2 configuration
pub const CORE_DIG_CLANE_2_RW_CFG_0: u32 = 0x2a800;

/// C-PHY lane 0 LP control
pub const CORE_DIG_CLANE_0_RW_LP_0: u32 = 0x2a080;
/// C-PHY lane 1 LP control
pub const CORE_DIG_CLANE_1_RW_LP_0: u32 = 0x2a480;
/// C-PHY lane 2 LP control
pub const CORE_DIG_CLANE_2_RW_LP_0: u32 = 0x2a880;

/// C-PHY lane 1 HS TX control 6
pub const CORE_DIG_CLANE_1_RW_HS_TX_6: u32 = 0x2a60c;

/// C-PHY lane 0 HS RX configuration, word `n`
#[inline(always)]
pub const fn core_dig_clane_0_rw_hs_rx(n: u32) -> u32 {
    0x2a100 + n * 2
}

/// C-PHY lane 1 HS RX configuration, word `n`
#[inline(always)]
pub const fn core_dig_clane_1_rw_hs_rx(n: u32) -> u32 {
    0x2a500 + n * 2
}

/// C-PHY lane 2 HS RX configuration, word `n`
#[inline(always)]
pub const fn core_dig_clane_2_rw_hs_rx(n: u32) -> u32 {
    0x2a900 + n * 2
}
