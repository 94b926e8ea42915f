//! X5H bring-up
//!
//! The X5H controller addresses its PHY, link and stream data interface
//! (SDI) blocks independently. Nothing here waits on hardware: the
//! controller is held powered down while configured and then woken.

use super::StreamPlan;
use crate::driver::config::BusType;
use crate::hal::regs::RegisterAccess;
use crate::internal::register::snps::*;

/// Configure the X5H controller and power it up
pub fn start<R: RegisterAccess>(regs: &R, plan: &StreamPlan) {
    regs.modify32(PWR_UP, 0, PWR_UP_EN);

    // PHY
    let cphy = plan.link.bus_type == BusType::Cphy;
    regs.update_field32(PHY_MODE_CFG, PHY_MODE_CFG_PHY_MODE, u32::from(cphy));
    regs.update_field32(PHY_MODE_CFG, PHY_MODE_CFG_PPI_WIDTH, ppi_width(plan.bpp));
    regs.update_field32(PHY_DESKEW_CFG, PHY_DESKEW_CFG_CYCLES, 0);

    // SDI in bypass mode, no VC/DT filtering
    regs.update_field32(SDI_CFG, SDI_CFG_ENABLE, 1);
    regs.update_field32(SDI_CFG, SDI_CFG_ENCODE_MODE, 0);
    regs.modify32(
        SDI_FILTER_CFG,
        0,
        SDI_FILTER_VC_EN | SDI_FILTER_VC | SDI_FILTER_DT_EN | SDI_FILTER_DT | SDI_FILTER_EXCLUDE_SP,
    );

    regs.set_bits32(INT_UNMASK_CSI2, INT_UNMASK_CSI2_ALL);
    regs.set_bits32(INT_UNMASK_FRAME, INT_UNMASK_FRAME_ALL);
    regs.set_bits32(INT_UNMASK_LINE, INT_UNMASK_LINE_ALL);

    regs.modify32(PWR_UP, PWR_UP_EN, PWR_UP_EN);
    debug!("X5H controller powered up, ppi width {}", ppi_width(plan.bpp));
}

/// PPI data path width for a pixel depth
const fn ppi_width(bpp: u8) -> u32 {
    if bpp <= 8 { PPI_WIDTH_8 } else { PPI_WIDTH_16 }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::Topology;
    use crate::driver::format::FrameFormat;
    use crate::driver::lanes::LinkConfig;
    use crate::test_utils::MockRegisters;

    fn plan(topology: Topology, bpp: u8) -> StreamPlan {
        let topology = topology.validate().unwrap();
        StreamPlan {
            link: LinkConfig::new(&topology, topology.lanes, 1855),
            format: FrameFormat::default(),
            datatype: 0x1e,
            bpp,
        }
    }

    #[test]
    fn powers_down_then_up() {
        let regs = MockRegisters::new();
        regs.set_register(PWR_UP, PWR_UP_EN);

        start(&regs, &plan(Topology::dphy(&[1, 2, 3, 4]), 16));

        assert_eq!(regs.writes_to(PWR_UP), [0, PWR_UP_EN]);
        assert_eq!(regs.first_write_index(PWR_UP), Some(0));
    }

    #[test]
    fn phy_mode_and_ppi_width() {
        let regs = MockRegisters::new();
        start(&regs, &plan(Topology::cphy(&[1, 2, 3]), 16));
        assert_eq!(regs.get_register(PHY_MODE_CFG), PHY_MODE_CFG_PHY_MODE | (PPI_WIDTH_16 << 16));

        let regs = MockRegisters::new();
        start(&regs, &plan(Topology::dphy(&[1, 2]), 8));
        assert_eq!(regs.get_register(PHY_MODE_CFG), 0);
    }

    #[test]
    fn sdi_enabled_with_filters_cleared() {
        let regs = MockRegisters::new();
        regs.set_register(SDI_FILTER_CFG, 0xffff_ffff);
        regs.set_register(SDI_CFG, SDI_CFG_ENCODE_MODE);

        start(&regs, &plan(Topology::dphy(&[1, 2]), 16));

        assert_eq!(regs.get_register(SDI_CFG), SDI_CFG_ENABLE);
        assert_eq!(regs.get_register(SDI_FILTER_CFG), 0xfff8_c0e0);
    }

    #[test]
    fn error_interrupts_unmasked() {
        let regs = MockRegisters::new();
        start(&regs, &plan(Topology::dphy(&[1, 2]), 16));

        assert_eq!(regs.get_register(INT_UNMASK_CSI2), INT_UNMASK_CSI2_ALL);
        assert_eq!(regs.get_register(INT_UNMASK_FRAME), INT_UNMASK_FRAME_ALL);
        assert_eq!(regs.get_register(INT_UNMASK_LINE), INT_UNMASK_LINE_ALL);
    }
}
