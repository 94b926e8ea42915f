//! Lane and channel mapping
//!
//! Turns the validated topology, the source's advertised bus and the
//! negotiated format into the per-stream [`LinkConfig`] and the register
//! words that encode it (lane swap, VC/DT selectors, field detection).

use crate::constants::{MAX_LANES, NUM_TRIOS, VCDT_SLOTS};
use crate::driver::config::{BusType, LinkTopology, PinSwapOrder};
use crate::driver::format::{Field, FrameFormat};
use crate::driver::source::{MbusConfig, MbusType};
use crate::error::{ConfigError, ConfigResult, Error, Result};
use crate::internal::register::gen3::{
    FLD_FLD_EN, FLD_FLD_EN2, FLD_FLD_EN3, FLD_FLD_EN4, VCDT_SEL_DTN_ON, VCDT_VCDTN_EN,
    fld_det_sel, fld_num, lswap_lsel, vcdt_sel_dt, vcdt_sel_vc,
};

// =============================================================================
// Link Configuration
// =============================================================================

/// Per-stream link parameters, derived at every stream start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Encoding
    pub bus_type: BusType,
    /// Active lanes (or trios)
    pub lanes: u8,
    /// Physical position (1..=4) of each logical lane
    pub lane_swap: [u8; MAX_LANES],
    /// Per-trio receive equalization
    pub hs_receive_eq: [u16; NUM_TRIOS],
    /// Per-trio wire order; `None` when the board declares no pin swap
    pub pin_swap: Option<[PinSwapOrder; NUM_TRIOS]>,
    /// Link rate per lane in Mbps
    pub mbps: u32,
}

impl LinkConfig {
    /// Combine the static topology with the values discovered for this stream
    pub fn new(topology: &LinkTopology, lanes: u8, mbps: u32) -> Self {
        Self {
            bus_type: topology.bus_type,
            lanes,
            lane_swap: topology.lane_swap,
            hs_receive_eq: topology.hs_receive_eq,
            pin_swap: topology.pin_swap.then_some(topology.pin_swap_rx_order),
            mbps,
        }
    }

    /// Bit mask with one bit per active lane
    pub const fn lane_mask(&self) -> u32 {
        (1 << self.lanes) - 1
    }

    /// C-PHY symbol rate in Msps
    pub const fn symbol_rate(&self) -> u32 {
        cphy_symbol_rate(self.mbps)
    }
}

/// Active lane count for this stream
///
/// Without an advertised bus configuration the declared count applies.
pub fn active_lanes(topology: &LinkTopology, advertised: Option<MbusConfig>) -> ConfigResult<u8> {
    let Some(mbus) = advertised else {
        return Ok(topology.lanes);
    };

    if mbus.bus_type == MbusType::Other {
        return Err(ConfigError::UnsupportedBus);
    }
    if !(1..=MAX_LANES as u8).contains(&mbus.lanes) {
        return Err(ConfigError::InvalidLaneCount);
    }
    if mbus.lanes > topology.lanes {
        return Err(ConfigError::TooManyLanes);
    }
    Ok(mbus.lanes)
}

/// Per-lane link rate in Mbps from the source's pixel rate
pub fn link_rate_mbps(pixel_rate: u64, bpp: u8, lanes: u8) -> Result<u32> {
    if lanes == 0 {
        return Err(ConfigError::InvalidLaneCount.into());
    }
    let mbps = pixel_rate * u64::from(bpp) / (u64::from(lanes) * 1_000_000);
    u32::try_from(mbps).map_err(|_| Error::UnsupportedSpeed(u32::MAX))
}

/// Per-lane link rate in Mbps from a fixed link bit rate
pub fn fixed_link_rate_mbps(bps: u64, lanes: u8) -> Result<u32> {
    link_rate_mbps(bps, 1, lanes)
}

/// C-PHY symbol rate for a two-wire-equivalent bit rate
///
/// One C-PHY symbol carries 2.8 bits on average; the quotient truncates.
pub const fn cphy_symbol_rate(mbps: u32) -> u32 {
    (mbps as u64 * 10 / 28) as u32
}

// =============================================================================
// Register Words
// =============================================================================

/// LSWAP word: logical lane `i` reads physical position `lane_swap[i]`
pub fn lswap(lane_swap: &[u8; MAX_LANES]) -> u32 {
    lane_swap
        .iter()
        .enumerate()
        .fold(0, |acc, (lane, &position)| {
            acc | lswap_lsel(lane as u32, u32::from(position.saturating_sub(1)))
        })
}

/// Recover the 1-indexed physical positions from an LSWAP word
pub fn lswap_positions(value: u32) -> [u8; MAX_LANES] {
    let mut positions = [0; MAX_LANES];
    for (lane, slot) in positions.iter_mut().enumerate() {
        *slot = ((value >> (lane * 2)) & 0x3) as u8 + 1;
    }
    positions
}

/// VCDT / VCDT2 words selecting `datatype` on virtual channels
/// `0..num_channels` (capped to the four selector slots)
pub fn vcdt(num_channels: u8, datatype: u8) -> [u32; 2] {
    let mut words = [0u32; 2];
    for channel in 0..num_channels.min(VCDT_SLOTS) {
        let selector = VCDT_VCDTN_EN
            | VCDT_SEL_DTN_ON
            | vcdt_sel_vc(u32::from(channel))
            | vcdt_sel_dt(u32::from(datatype));
        let word = usize::from(channel / 2);
        words[word] |= selector << (u32::from(channel % 2) * 16);
    }
    words
}

/// FLD word for the negotiated field order
pub fn fld(format: &FrameFormat) -> u32 {
    match format.field {
        Field::Alternate => {
            let base = fld_det_sel(1) | FLD_FLD_EN4 | FLD_FLD_EN3 | FLD_FLD_EN2 | FLD_FLD_EN;
            // 240 lines per field is NTSC; it starts on the bottom field
            if format.height == 240 {
                base | fld_num(0)
            } else {
                base | fld_num(1)
            }
        }
        Field::None | Field::Interlaced => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::Topology;
    use crate::driver::format::media_bus;

    fn topology(lanes: &[u8]) -> LinkTopology {
        Topology::dphy(lanes).validate().unwrap()
    }

    // =========================================================================
    // Active Lanes
    // =========================================================================

    #[test]
    fn missing_mbus_config_uses_declared_lanes() {
        assert_eq!(active_lanes(&topology(&[1, 2, 3, 4]), None), Ok(4));
    }

    #[test]
    fn advertised_lanes_may_be_fewer() {
        let mbus = MbusConfig {
            bus_type: MbusType::Dphy,
            lanes: 2,
        };
        assert_eq!(active_lanes(&topology(&[1, 2, 3, 4]), Some(mbus)), Ok(2));
    }

    #[test]
    fn advertised_lanes_may_not_exceed_declared() {
        let mbus = MbusConfig {
            bus_type: MbusType::Dphy,
            lanes: 4,
        };
        assert_eq!(
            active_lanes(&topology(&[1, 2]), Some(mbus)),
            Err(ConfigError::TooManyLanes)
        );
    }

    #[test]
    fn advertised_bus_must_be_csi2() {
        let mbus = MbusConfig {
            bus_type: MbusType::Other,
            lanes: 1,
        };
        assert_eq!(
            active_lanes(&topology(&[1]), Some(mbus)),
            Err(ConfigError::UnsupportedBus)
        );
    }

    #[test]
    fn advertised_zero_lanes_is_invalid() {
        let mbus = MbusConfig {
            bus_type: MbusType::Dphy,
            lanes: 0,
        };
        assert_eq!(
            active_lanes(&topology(&[1, 2]), Some(mbus)),
            Err(ConfigError::InvalidLaneCount)
        );
    }

    // =========================================================================
    // Link Rate
    // =========================================================================

    #[test]
    fn link_rate_from_pixel_rate() {
        // 1080p30 UYVY over 4 lanes
        assert_eq!(link_rate_mbps(74_250_000, 16, 4), Ok(297));
        // Same stream over 2 lanes
        assert_eq!(link_rate_mbps(74_250_000, 16, 2), Ok(594));
    }

    #[test]
    fn fixed_link_rate() {
        assert_eq!(fixed_link_rate_mbps(7_423_000_000, 4), Ok(1855));
    }

    #[test]
    fn symbol_rate_truncates() {
        assert_eq!(cphy_symbol_rate(2800), 1000);
        assert_eq!(cphy_symbol_rate(2827), 1009);
        assert_eq!(cphy_symbol_rate(0), 0);
    }

    // =========================================================================
    // Lane Swap
    // =========================================================================

    #[test]
    fn lswap_is_zero_indexed() {
        assert_eq!(lswap(&[1, 2, 3, 4]), 0b11_10_01_00);
        assert_eq!(lswap(&[4, 3, 2, 1]), 0b00_01_10_11);
    }

    #[test]
    fn lswap_is_a_bijection_for_every_declared_permutation() {
        let positions = [1u8, 2, 3, 4];
        let mut checked = 0;
        for a in positions {
            for b in positions {
                for c in positions {
                    for d in positions {
                        let lanes = [a, b, c, d];
                        for count in [1usize, 2, 4] {
                            let active = &lanes[..count];
                            let Ok(link) = Topology::dphy(active).validate() else {
                                continue;
                            };
                            let decoded = lswap_positions(lswap(&link.lane_swap));
                            assert_eq!(&decoded[..count], active);
                            assert!((1..=4).all(|p| decoded.contains(&p)));
                            checked += 1;
                        }
                    }
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn cphy_trios_map_through_lswap() {
        let link = Topology::cphy(&[3, 1, 2]).validate().unwrap();
        let decoded = lswap_positions(lswap(&link.lane_swap));
        assert_eq!(&decoded[..3], &[3, 1, 2]);
        assert_eq!(decoded[3], 4);
    }

    // =========================================================================
    // VC/DT and Field
    // =========================================================================

    #[test]
    fn vcdt_fills_four_channels() {
        let [vcdt, vcdt2] = vcdt(4, 0x1e);
        let ch = |vc: u32| VCDT_VCDTN_EN | VCDT_SEL_DTN_ON | (vc << 8) | 0x1e;
        assert_eq!(vcdt, ch(0) | (ch(1) << 16));
        assert_eq!(vcdt2, ch(2) | (ch(3) << 16));
    }

    #[test]
    fn vcdt_two_channels_leaves_vcdt2_empty() {
        let [vcdt, vcdt2] = vcdt(2, 0x2a);
        assert_ne!(vcdt, 0);
        assert_eq!(vcdt2, 0);
    }

    #[test]
    fn vcdt_caps_at_four_slots() {
        assert_eq!(vcdt(16, 0x24), vcdt(4, 0x24));
    }

    #[test]
    fn fld_progressive_is_zero() {
        assert_eq!(fld(&FrameFormat::default()), 0);
    }

    #[test]
    fn fld_alternate_ntsc_and_pal() {
        let ntsc = FrameFormat::new(media_bus::UYVY8_2X8, 720, 240).with_field(Field::Alternate);
        let pal = FrameFormat::new(media_bus::UYVY8_2X8, 720, 288).with_field(Field::Alternate);
        assert_eq!(fld(&ntsc), 0x0000_001f);
        assert_eq!(fld(&pal), 0x0001_001f);
    }

    #[test]
    fn link_config_pin_swap_only_when_declared() {
        let plain = Topology::cphy(&[1, 2, 3]).validate().unwrap();
        assert!(LinkConfig::new(&plain, 3, 1000).pin_swap.is_none());

        let swapped = Topology::cphy(&[1, 2, 3]).with_pin_swap(true).validate().unwrap();
        let link = LinkConfig::new(&swapped, 3, 1000);
        assert_eq!(link.pin_swap, Some([PinSwapOrder::Abc; NUM_TRIOS]));
        assert_eq!(link.lane_mask(), 0x7);
    }
}
