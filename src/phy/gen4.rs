//! V4H / V4M bring-up
//!
//! Both generations share one link block and a 16-bit PPI / core register
//! window. V4H carries a combined PHY that runs either D-PHY or C-PHY after
//! the analog common block is programmed; V4M is D-PHY only and tunes its
//! oscillator through the test interface instead.
//!
//! Neither function confirms stop state; [`super::start`] does that once
//! the algorithm returns.

use embedded_hal::delay::DelayNs;

use crate::constants::{CALIBRATION_POLL, POWER_ON_RESET_POLL};
use crate::driver::config::BusType;
use crate::driver::lanes::LinkConfig;
use crate::error::{ConfigError, Result, WaitPoint};
use crate::hal::phtw::{Phtw, PhtwPair, PhtwPort, write_sequence};
use crate::hal::regs::RegisterAccess;
use crate::hal::timing::wait_until;
use crate::internal::register::gen3::PHTC_TESTCLR;
use crate::internal::register::gen4::*;
use crate::tuning::cphy;
use crate::variant::VariantProfile;

// =============================================================================
// Static Tables
// =============================================================================

/// Analog common block, written in order after the link leaves reset
static COMMON_BLOCK: [(u32, u16); 28] = [
    (ppi_startup_rw_common_dphy(10), 0x0030),
    (core_dig_anactrl_rw_common_anactrl(2), 0x1444),
    (core_dig_anactrl_rw_common_anactrl(0), 0x1bfd),
    (PPI_STARTUP_RW_COMMON_STARTUP_1_1, 0x0233),
    (ppi_startup_rw_common_dphy(6), 0x0027),
    (PPI_CALIBCTRL_RW_COMMON_BG_0, 0x01f4),
    (PPI_RW_TERMCAL_CFG_0, 0x0013),
    (PPI_RW_OFFSETCAL_CFG_0, 0x0003),
    (PPI_RW_LPDCOCAL_TIMEBASE, 0x004f),
    (PPI_RW_LPDCOCAL_NREF, 0x0320),
    (PPI_RW_LPDCOCAL_NREF_RANGE, 0x000f),
    (PPI_RW_LPDCOCAL_TWAIT_CONFIG, 0xfe18),
    (PPI_RW_LPDCOCAL_VT_CONFIG, 0x0c3c),
    (PPI_RW_LPDCOCAL_COARSE_CFG, 0x0105),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(6), 0x1000),
    (PPI_RW_COMMON_CFG, 0x0003),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(0), 0x0000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(1), 0x0400),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(3), 0x41f6),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(0), 0x0000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(3), 0x43f6),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(6), 0x3000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(7), 0x0000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(6), 0x3000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(7), 0x0000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(6), 0x7000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(7), 0x0000),
    (core_dig_ioctrl_rw_afe_cb_ctrl_2(5), 0x4000),
];

/// Registers tuned individually for each C-PHY trio
struct TrioRegs {
    hs_receive: u32,
    pin_swap: u32,
    ctrl27: u32,
    rwconf: u32,
}

static TRIOS: [TrioRegs; 3] = [
    TrioRegs {
        hs_receive: core_dig_ioctrl_rw_afe_lane0_ctrl_2(9),
        pin_swap: core_dig_ioctrl_rw_afe_lane0_ctrl_2(9),
        ctrl27: core_dig_ioctrl_rw_afe_lane0_ctrl_2(7),
        rwconf: CORE_DIG_CLANE_0_RW_CFG_0,
    },
    TrioRegs {
        hs_receive: core_dig_ioctrl_rw_afe_lane1_ctrl_2(9),
        pin_swap: core_dig_ioctrl_rw_afe_lane2_ctrl_2(9),
        ctrl27: core_dig_ioctrl_rw_afe_lane1_ctrl_2(7),
        rwconf: CORE_DIG_CLANE_1_RW_CFG_0,
    },
    TrioRegs {
        hs_receive: core_dig_ioctrl_rw_afe_lane2_ctrl_2(9),
        pin_swap: core_dig_ioctrl_rw_afe_lane3_ctrl_2(9),
        ctrl27: core_dig_ioctrl_rw_afe_lane2_ctrl_2(7),
        rwconf: CORE_DIG_CLANE_2_RW_CFG_0,
    },
];

static CLANE_LP_0: [u32; 3] = [
    CORE_DIG_CLANE_0_RW_LP_0,
    CORE_DIG_CLANE_1_RW_LP_0,
    CORE_DIG_CLANE_2_RW_LP_0,
];

static CLANE_HS_RX: [fn(u32) -> u32; 3] = [
    core_dig_clane_0_rw_hs_rx,
    core_dig_clane_1_rw_hs_rx,
    core_dig_clane_2_rw_hs_rx,
];

static TRIO_CFG: [fn(u32) -> u32; 3] = [core_dig_rw_trio0, core_dig_rw_trio1, core_dig_rw_trio2];

/// D-PHY calibration kick, issued after the PHY leaves shutdown
static DPHY_CALIBRATION: [PhtwPair; 2] = [PhtwPair::new(0x00, 0x00), PhtwPair::new(0x00, 0x1e)];

const ALL_LANES_EN: u32 = PHY_ENABLE_DCK | PHY_ENABLE_0 | PHY_ENABLE_1 | PHY_ENABLE_2;

// =============================================================================
// V4H
// =============================================================================

/// Run the V4H start sequence for either encoding
pub fn start_v4h<R, D>(regs: &R, delay: &mut D, profile: &VariantProfile, link: &LinkConfig) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    reset_link_and_phy(regs);

    // PHY static setting
    regs.set_bits32(PHY_EN, ALL_LANES_EN);
    regs.set_bits32(
        FRXM,
        FRXM_FORCERXMODE_DCK | FRXM_FORCERXMODE_0 | FRXM_FORCERXMODE_1 | FRXM_FORCERXMODE_2,
    );
    regs.set_bits32(
        PHY_DPHY_OVR1,
        OVR1_FORCERXMODE_DCK | OVR1_FORCERXMODE_0 | OVR1_FORCERXMODE_1 | OVR1_FORCERXMODE_2,
    );
    clear_field_and_id_checks(regs);
    regs.write32(PHY_MODE, RELEASE);
    regs.write32(N_LANES, u32::from(link.lanes.saturating_sub(1)));

    regs.write32(CSI2_RESETN, RELEASE);

    for &(offset, value) in COMMON_BLOCK.iter() {
        regs.write16(offset, value);
    }

    match link.bus_type {
        BusType::Cphy => cphy_setting(regs, delay, link)
            .inspect_err(|_| error!("Setting C-PHY failed")),
        BusType::Dphy => dphy_setting(regs, delay, profile.phtw_port())
            .inspect_err(|_| error!("Setting D-PHY failed")),
    }
}

/// Program the combined PHY for C-PHY and wait for calibration
fn cphy_setting<R, D>(regs: &R, delay: &mut D, link: &LinkConfig) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    let msps = link.symbol_rate();
    let m = cphy::lookup(msps)?;
    let setting = m.value;
    debug!("C-PHY {} Msps using {} Msps settings", msps, m.speed);

    regs.write16(core_dig_rw_common(7), 0x0155);
    regs.write16(ppi_startup_rw_common_dphy(7), 0x0068);
    regs.write16(ppi_startup_rw_common_dphy(8), 0x0010);

    for &lp in CLANE_LP_0.iter() {
        regs.write16(lp, 0x463c);
    }

    for (word, value) in [(0, 0x0195), (1, 0x0013), (5, 0x0013), (6, 0x000a), (2, setting.rw_hs_rx_2)] {
        for hs_rx in CLANE_HS_RX.iter() {
            regs.write16(hs_rx(word), value);
        }
    }

    regs.write16(core_dig_ioctrl_rw_afe_lane0_ctrl_2(2), 0x0001);
    regs.write16(core_dig_ioctrl_rw_afe_lane1_ctrl_2(2), 0x0000);
    regs.write16(core_dig_ioctrl_rw_afe_lane2_ctrl_2(2), 0x0001);
    regs.write16(core_dig_ioctrl_rw_afe_lane3_ctrl_2(2), 0x0001);
    regs.write16(core_dig_ioctrl_rw_afe_lane4_ctrl_2(2), 0x0000);

    for trio in TRIO_CFG.iter() {
        regs.write16(trio(0), 0x044a);
    }
    for trio in TRIO_CFG.iter() {
        regs.modify16(trio(2), setting.rw_trio_2, 0x00ff);
    }
    for trio in TRIO_CFG.iter() {
        regs.write16(trio(1), setting.rw_trio_1);
    }
    for trio in TRIO_CFG.iter() {
        regs.modify16(trio(0), setting.rw_trio_0, 0x0e00);
    }

    for &lp in CLANE_LP_0.iter() {
        regs.write16(lp, 0x163c);
    }

    for (trio, &eq) in TRIOS.iter().zip(link.hs_receive_eq.iter()) {
        regs.modify16(trio.hs_receive, setting.afe_lane0_29 | eq, 0x001f);
        regs.modify16(trio.ctrl27, setting.afe_lane0_27, 0x1c00);
    }

    if let Some(orders) = link.pin_swap {
        regs.write16(CORE_DIG_CLANE_1_RW_CFG_0, 0x00f5);
        regs.write16(CORE_DIG_CLANE_1_RW_HS_TX_6, 0x5000);
        for (trio, order) in TRIOS.iter().zip(orders.iter()) {
            regs.modify16(trio.pin_swap, order.fields().afe_clane_29_b8 << 8, 0x0100);
            regs.modify16(trio.rwconf, order.rw_cfg0(), 0x000f);
        }
    }

    // Leave shutdown
    regs.write32(DPHY_RSTZ, RELEASE);
    regs.write32(PHY_SHUTDOWNZ, RELEASE);

    wait_until(delay, CALIBRATION_POLL, WaitPoint::Calibration, || {
        regs.read32(ST_PHYST) & ST_PHY_READY != 0
    })
    .inspect_err(|_| error!("PHY calibration failed"))
}

// =============================================================================
// V4M
// =============================================================================

/// Run the V4M start sequence (D-PHY only)
pub fn start_v4m<R, D>(regs: &R, delay: &mut D, profile: &VariantProfile, link: &LinkConfig) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    if link.bus_type == BusType::Cphy {
        error!("R-Car V4M does not support C-PHY");
        return Err(ConfigError::UnsupportedEncoding.into());
    }

    let port = profile.phtw_port();

    reset_link_and_phy(regs);
    regs.write32(port.clear, PHTC_TESTCLR);

    // PHY static setting; the clock lane is not forced on V4M
    regs.set_bits32(FRXM, FRXM_FORCERXMODE_0 | FRXM_FORCERXMODE_1 | FRXM_FORCERXMODE_2);
    regs.set_bits32(
        PHY_DPHY_OVR1,
        OVR1_FORCERXMODE_0 | OVR1_FORCERXMODE_1 | OVR1_FORCERXMODE_2,
    );
    clear_field_and_id_checks(regs);
    regs.write32(N_LANES, u32::from(link.lanes.saturating_sub(1)));

    regs.write32(port.clear, 0);
    regs.write32(CSI2_RESETN, RELEASE);

    // PHY registers are programmed with the PHY still in reset
    if let Some(init_phtw) = profile.init_phtw {
        let mut phy = Phtw::new(regs, &mut *delay, port);
        init_phtw(&mut phy, profile, link.mbps)?;
    }

    dphy_setting(regs, delay, port).inspect_err(|_| error!("Setting D-PHY failed"))
}

// =============================================================================
// Shared Steps
// =============================================================================

fn reset_link_and_phy<R: RegisterAccess>(regs: &R) {
    regs.write32(CSI2_RESETN, 0);
    regs.write32(DPHY_RSTZ, 0);
    regs.write32(PHY_SHUTDOWNZ, 0);
}

fn clear_field_and_id_checks<R: RegisterAccess>(regs: &R) {
    regs.write32(FLDC, 0);
    regs.write32(FLDD, 0);
    regs.write32(IDIC, 0);
}

/// Release the PHY, kick D-PHY calibration and wait for power-on-reset
fn dphy_setting<R, D>(regs: &R, delay: &mut D, port: PhtwPort) -> Result<()>
where
    R: RegisterAccess,
    D: DelayNs,
{
    regs.write32(DPHY_RSTZ, RELEASE);
    regs.write32(PHY_SHUTDOWNZ, RELEASE);

    {
        let mut phy = Phtw::new(regs, &mut *delay, port);
        write_sequence(&mut phy, &DPHY_CALIBRATION)?;
    }

    wait_until(delay, POWER_ON_RESET_POLL, WaitPoint::PowerOnReset, || {
        regs.read32(V4M_PHTR) & PHTR_POR_MASK == PHTR_POR_DONE
    })
    .inspect_err(|_| error!("PHY calibration failed"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::driver::config::{PinSwapOrder, Topology};
    use crate::error::Error;
    use crate::internal::register::gen3;
    use crate::test_utils::{Access, MockDelay, MockRegisters};
    use crate::variant::{V4H, V4M};

    fn dphy_link(lanes: &[u8], mbps: u32) -> LinkConfig {
        let topology = Topology::dphy(lanes).validate().unwrap();
        LinkConfig::new(&topology, topology.lanes, mbps)
    }

    fn cphy_link(topology: Topology, mbps: u32) -> LinkConfig {
        let topology = topology.validate().unwrap();
        LinkConfig::new(&topology, topology.lanes, mbps)
    }

    // =========================================================================
    // V4H
    // =========================================================================

    #[test]
    fn v4h_resets_before_static_setting() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4h(&regs, &mut delay, &V4H, &dphy_link(&[1, 2, 3, 4], 1000)).unwrap();

        assert_eq!(regs.writes_to(CSI2_RESETN), [0, RELEASE]);
        assert_eq!(regs.writes_to(N_LANES), [3]);
        assert_eq!(regs.writes_to(PHY_MODE), [RELEASE]);
        assert!(regs.first_write_index(CSI2_RESETN) < regs.first_write_index(PHY_EN));
        assert_eq!(regs.get_register(PHY_EN), ALL_LANES_EN);
    }

    #[test]
    fn v4h_common_block_written_in_order() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4h(&regs, &mut delay, &V4H, &dphy_link(&[1, 2], 1000)).unwrap();

        let writes16: std::vec::Vec<_> = regs
            .write_log()
            .into_iter()
            .filter_map(|a| match a {
                Access::Write16(o, v) => Some((o, v)),
                Access::Write32(..) => None,
            })
            .collect();
        assert_eq!(&writes16[..COMMON_BLOCK.len()], &COMMON_BLOCK[..]);
    }

    #[test]
    fn v4h_dphy_uses_gen4_test_interface() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4h(&regs, &mut delay, &V4H, &dphy_link(&[1, 2], 1000)).unwrap();

        assert_eq!(
            regs.writes_to(V4M_PHTW),
            [DPHY_CALIBRATION[0].request(), DPHY_CALIBRATION[1].request()]
        );
        assert!(regs.writes_to(gen3::PHTW).is_empty());
    }

    #[test]
    fn v4h_dphy_power_on_reset_timeout() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        regs.set_register(V4M_PHTR, 0x3 << 16);
        let mut delay = MockDelay::new();

        let result = start_v4h(&regs, &mut delay, &V4H, &dphy_link(&[1, 2], 1000));
        assert_eq!(result, Err(Error::Timeout(WaitPoint::PowerOnReset)));
    }

    #[test]
    fn v4h_cphy_programs_table_fields_and_equalization() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();
        let topology = Topology::cphy(&[1, 2, 3]).with_hs_receive_eq(&[0x1, 0x2, 0x3]);
        // 2800 Mbps is 1000 Msps
        let link = cphy_link(topology, 2800);
        let setting = cphy::lookup(1000).unwrap().value;

        start_v4h(&regs, &mut delay, &V4H, &link).unwrap();

        assert_eq!(regs.get_register16(core_dig_clane_1_rw_hs_rx(2)), setting.rw_hs_rx_2);
        assert_eq!(regs.get_register16(core_dig_rw_trio2(1)), setting.rw_trio_1);
        assert_eq!(regs.get_register16(core_dig_rw_trio0(0)) & 0x0e00, setting.rw_trio_0);
        assert_eq!(regs.get_register16(core_dig_rw_trio0(0)) & !0x0e00, 0x044a & !0x0e00);
        assert_eq!(
            regs.get_register16(core_dig_ioctrl_rw_afe_lane1_ctrl_2(9)) & 0x1f,
            setting.afe_lane0_29 | 0x2
        );
        assert_eq!(regs.get_register16(CORE_DIG_CLANE_2_RW_LP_0), 0x163c);
        assert!(regs.writes_to(V4M_PHTW).is_empty());
    }

    #[test]
    fn v4h_cphy_without_pin_swap_leaves_cfg_alone() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4h(&regs, &mut delay, &V4H, &cphy_link(Topology::cphy(&[1, 2, 3]), 2800)).unwrap();

        assert!(regs.writes16_to(CORE_DIG_CLANE_1_RW_CFG_0).is_empty());
        assert!(regs.writes16_to(CORE_DIG_CLANE_1_RW_HS_TX_6).is_empty());
    }

    #[test]
    fn v4h_cphy_pin_swap_programs_each_trio() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();
        let topology = Topology::cphy(&[1, 2, 3])
            .with_pin_swap(true)
            .with_pin_swap_rx_order(&[PinSwapOrder::Abc, PinSwapOrder::Cba, PinSwapOrder::Bca]);

        start_v4h(&regs, &mut delay, &V4H, &cphy_link(topology, 2800)).unwrap();

        assert_eq!(regs.get_register16(CORE_DIG_CLANE_0_RW_CFG_0) & 0xf, 0);
        // 0xf5 first, then bits 3:0 replaced by CBA
        assert_eq!(regs.get_register16(CORE_DIG_CLANE_1_RW_CFG_0), 0xf0 | PinSwapOrder::Cba.rw_cfg0());
        assert_eq!(regs.get_register16(CORE_DIG_CLANE_2_RW_CFG_0) & 0xf, 5);
        assert_eq!(regs.get_register16(CORE_DIG_CLANE_1_RW_HS_TX_6), 0x5000);
        assert_eq!(regs.get_register16(core_dig_ioctrl_rw_afe_lane2_ctrl_2(9)) & 0x100, 0x100);
        assert_eq!(regs.get_register16(core_dig_ioctrl_rw_afe_lane3_ctrl_2(9)) & 0x100, 0);
    }

    #[test]
    fn v4h_cphy_calibration_timeout_propagates() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        regs.set_register(ST_PHYST, 0);
        let mut delay = MockDelay::new();

        let result = start_v4h(&regs, &mut delay, &V4H, &cphy_link(Topology::cphy(&[1, 2, 3]), 2800));

        assert_eq!(result, Err(Error::Timeout(WaitPoint::Calibration)));
        assert_eq!(delay.total_us(), u64::from(CALIBRATION_POLL.attempts) * 1_000);
    }

    #[test]
    fn v4h_cphy_above_table_is_unsupported() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();
        // 11200 Mbps is 4000 Msps
        let link = cphy_link(Topology::cphy(&[1, 2, 3]), 11_200);

        let result = start_v4h(&regs, &mut delay, &V4H, &link);

        assert_eq!(result, Err(Error::UnsupportedSpeed(4000)));
        assert!(regs.writes_to(DPHY_RSTZ).iter().all(|v| *v == 0));
    }

    // =========================================================================
    // V4M
    // =========================================================================

    #[test]
    fn v4m_rejects_cphy_before_touching_hardware() {
        let regs = MockRegisters::new();
        let mut delay = MockDelay::new();

        let result = start_v4m(&regs, &mut delay, &V4M, &cphy_link(Topology::cphy(&[1, 2, 3]), 2800));

        assert_eq!(result, Err(Error::Config(ConfigError::UnsupportedEncoding)));
        assert!(regs.write_log().is_empty());
    }

    #[test]
    fn v4m_pulses_test_clear_and_leaves_clock_lane_unforced() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4m(&regs, &mut delay, &V4M, &dphy_link(&[1, 2], 1000)).unwrap();

        assert_eq!(regs.writes_to(V4M_PHTC), [PHTC_TESTCLR, 0]);
        assert_eq!(regs.get_register(FRXM) & FRXM_FORCERXMODE_DCK, 0);
        assert_eq!(
            regs.get_register(FRXM),
            FRXM_FORCERXMODE_0 | FRXM_FORCERXMODE_1 | FRXM_FORCERXMODE_2
        );
    }

    #[test]
    fn v4m_tunes_before_calibration_kick() {
        let regs = MockRegisters::new();
        regs.simulate_healthy_phy();
        let mut delay = MockDelay::new();

        start_v4m(&regs, &mut delay, &V4M, &dphy_link(&[1, 2], 1000)).unwrap();

        let phtw = regs.writes_to(V4M_PHTW);
        let n = phtw.len();
        assert!(n > 2);
        assert_eq!(phtw[n - 2..], [DPHY_CALIBRATION[0].request(), DPHY_CALIBRATION[1].request()]);
        assert_eq!(regs.writes_to(V4M_PHYPLL).len(), 1);
        let log = regs.write_log();
        let release = log
            .iter()
            .rposition(|a| *a == Access::Write32(DPHY_RSTZ, RELEASE))
            .unwrap();
        assert!(regs.first_write_index(V4M_PHYPLL).unwrap() < release);
    }
}
