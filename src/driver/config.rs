//! Static receiver configuration
//!
//! [`Topology`] describes what the board declares about the link: encoding,
//! which physical lane carries each logical lane, and the optional C-PHY
//! pin-swap and equalization overrides. It is validated once, at attach
//! time, into a [`LinkTopology`]; nothing about it changes afterwards.

use crate::constants::{DEFAULT_HS_RECEIVE_EQ, MAX_LANES, NUM_TRIOS};
use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Bus Encoding
// =============================================================================

/// PHY encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusType {
    /// Two-wire differential lanes with a dedicated clock lane
    #[default]
    Dphy,
    /// Three-wire trios with embedded clock
    Cphy,
}

impl BusType {
    /// Whether `lanes` is a legal declared lane count for this encoding
    pub const fn supports_lanes(self, lanes: usize) -> bool {
        match self {
            BusType::Dphy => matches!(lanes, 1 | 2 | 4),
            BusType::Cphy => lanes == 3,
        }
    }
}

// =============================================================================
// C-PHY Pin Swap
// =============================================================================

/// Wire order of a C-PHY trio as routed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinSwapOrder {
    /// A-B-C (no swap)
    #[default]
    Abc,
    /// C-B-A
    Cba,
    /// A-C-B
    Acb,
    /// C-A-B
    Cab,
    /// B-A-C
    Bac,
    /// B-C-A
    Bca,
}

/// Register fields that realise a [`PinSwapOrder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSwapFields {
    /// CLANE RW_CFG_0 bits 2:0
    pub rw_cfg0_b2_0: u16,
    /// CLANE RW_CFG_0 bit 3
    pub rw_cfg0_b3: u16,
    /// AFE lane control 2 word 9, bit 8
    pub afe_clane_29_b8: u16,
}

impl PinSwapOrder {
    /// Decode the numeric order used in hardware descriptions (0 = ABC ... 5 = BCA)
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Abc),
            1 => Some(Self::Cba),
            2 => Some(Self::Acb),
            3 => Some(Self::Cab),
            4 => Some(Self::Bac),
            5 => Some(Self::Bca),
            _ => None,
        }
    }

    /// Register fields for this order
    pub const fn fields(self) -> PinSwapFields {
        let (rw_cfg0_b2_0, rw_cfg0_b3, afe_clane_29_b8) = match self {
            Self::Abc => (0, 0, 0),
            Self::Cba => (1, 1, 1),
            Self::Acb => (2, 1, 1),
            Self::Cab => (3, 0, 0),
            Self::Bac => (4, 1, 1),
            Self::Bca => (5, 0, 0),
        };
        PinSwapFields {
            rw_cfg0_b2_0,
            rw_cfg0_b3,
            afe_clane_29_b8,
        }
    }

    /// Value for the RW_CFG_0 bits 3:0 field
    pub const fn rw_cfg0(self) -> u16 {
        let fields = self.fields();
        fields.rw_cfg0_b2_0 | (fields.rw_cfg0_b3 << 3)
    }
}

// =============================================================================
// Topology (declared)
// =============================================================================

/// Board-declared link topology
///
/// # Example
///
/// ```ignore
/// let topology = Topology::cphy(&[1, 2, 3])
///     .with_pin_swap(true)
///     .with_pin_swap_rx_order(&[PinSwapOrder::Abc, PinSwapOrder::Cba, PinSwapOrder::Abc])
///     .with_hs_receive_eq(&[0x4, 0x6, 0x4]);
/// let link = topology.validate()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Topology {
    bus_type: BusType,
    port: u32,
    endpoint: u32,
    data_lanes: [u8; MAX_LANES],
    num_lanes: usize,
    pin_swap: bool,
    hs_receive_eq: Option<([u16; NUM_TRIOS], usize)>,
    pin_swap_rx_order: Option<([PinSwapOrder; NUM_TRIOS], usize)>,
}

impl Topology {
    /// D-PHY link; `data_lanes[i]` is the physical position (1..=4) of logical lane `i`
    pub fn dphy(data_lanes: &[u8]) -> Self {
        Self::new(BusType::Dphy, data_lanes)
    }

    /// C-PHY link; `data_lanes[i]` is the physical position (1..=4) of trio `i`
    pub fn cphy(data_lanes: &[u8]) -> Self {
        Self::new(BusType::Cphy, data_lanes)
    }

    fn new(bus_type: BusType, data_lanes: &[u8]) -> Self {
        let mut lanes = [0; MAX_LANES];
        for (slot, lane) in lanes.iter_mut().zip(data_lanes) {
            *slot = *lane;
        }
        Self {
            bus_type,
            port: 0,
            endpoint: 0,
            data_lanes: lanes,
            num_lanes: data_lanes.len(),
            pin_swap: false,
            hs_receive_eq: None,
            pin_swap_rx_order: None,
        }
    }

    /// Set the port / endpoint ids the link was declared on
    #[must_use]
    pub const fn with_endpoint(mut self, port: u32, endpoint: u32) -> Self {
        self.port = port;
        self.endpoint = endpoint;
        self
    }

    /// Declare a board-level C-PHY pin swap
    #[must_use]
    pub const fn with_pin_swap(mut self, pin_swap: bool) -> Self {
        self.pin_swap = pin_swap;
        self
    }

    /// Override per-trio receive equalization
    #[must_use]
    pub fn with_hs_receive_eq(mut self, eq: &[u16]) -> Self {
        let mut values = [DEFAULT_HS_RECEIVE_EQ; NUM_TRIOS];
        for (slot, value) in values.iter_mut().zip(eq) {
            *slot = *value;
        }
        self.hs_receive_eq = Some((values, eq.len()));
        self
    }

    /// Override per-trio wire order
    #[must_use]
    pub fn with_pin_swap_rx_order(mut self, order: &[PinSwapOrder]) -> Self {
        let mut values = [PinSwapOrder::Abc; NUM_TRIOS];
        for (slot, value) in values.iter_mut().zip(order) {
            *slot = *value;
        }
        self.pin_swap_rx_order = Some((values, order.len()));
        self
    }

    /// Declared encoding
    pub const fn bus_type(&self) -> BusType {
        self.bus_type
    }

    /// Validate the declaration and derive the static link parameters
    pub fn validate(&self) -> ConfigResult<LinkTopology> {
        if self.port != 0 || self.endpoint != 0 {
            return Err(ConfigError::NotConnected);
        }

        let lanes = self.num_lanes;
        if !self.bus_type.supports_lanes(lanes) {
            return Err(ConfigError::InvalidLaneCount);
        }

        let lane_swap = complete_lane_swap(&self.data_lanes[..lanes])?;

        let hs_receive_eq = match self.hs_receive_eq {
            None => [DEFAULT_HS_RECEIVE_EQ; NUM_TRIOS],
            Some((values, count)) => {
                if count < trio_count(self.bus_type, lanes) || count > NUM_TRIOS {
                    return Err(ConfigError::InvalidEqualization);
                }
                // AFE field is 5 bits wide and shared with the table boost bit
                if values.iter().any(|eq| *eq > 0x0f) {
                    return Err(ConfigError::InvalidEqualization);
                }
                values
            }
        };

        let pin_swap_rx_order = match self.pin_swap_rx_order {
            None => [PinSwapOrder::Abc; NUM_TRIOS],
            Some((values, count)) => {
                if count < trio_count(self.bus_type, lanes) || count > NUM_TRIOS {
                    return Err(ConfigError::InvalidPinSwapOrder);
                }
                values
            }
        };

        Ok(LinkTopology {
            bus_type: self.bus_type,
            lanes: lanes as u8,
            lane_swap,
            pin_swap: self.pin_swap,
            hs_receive_eq,
            pin_swap_rx_order,
        })
    }
}

fn trio_count(bus_type: BusType, lanes: usize) -> usize {
    match bus_type {
        BusType::Cphy => lanes,
        BusType::Dphy => 0,
    }
}

/// Extend the declared positions of the active lanes into a full 4-slot
/// permutation; idle slots take the positions left free, lowest first.
fn complete_lane_swap(active: &[u8]) -> ConfigResult<[u8; MAX_LANES]> {
    let mut used = [false; MAX_LANES + 1];
    for &position in active {
        if !(1..=MAX_LANES as u8).contains(&position) {
            return Err(ConfigError::InvalidLanePosition);
        }
        if used[position as usize] {
            return Err(ConfigError::DuplicateLane);
        }
        used[position as usize] = true;
    }

    let mut swap = [0; MAX_LANES];
    swap[..active.len()].copy_from_slice(active);

    let mut free = (1..=MAX_LANES as u8).filter(|p| !used[*p as usize]);
    for slot in swap.iter_mut().skip(active.len()) {
        *slot = free.next().ok_or(ConfigError::DuplicateLane)?;
    }
    Ok(swap)
}

// =============================================================================
// Link Topology (validated)
// =============================================================================

/// Validated static link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkTopology {
    /// Encoding
    pub bus_type: BusType,
    /// Declared lane (or trio) count
    pub lanes: u8,
    /// Physical position (1..=4) of each logical lane; a full permutation
    pub lane_swap: [u8; MAX_LANES],
    /// Board-level pin swap declared
    pub pin_swap: bool,
    /// Per-trio receive equalization
    pub hs_receive_eq: [u16; NUM_TRIOS],
    /// Per-trio wire order
    pub pin_swap_rx_order: [PinSwapOrder; NUM_TRIOS],
}

// =============================================================================
// Device Configuration
// =============================================================================

/// Everything needed to attach a receiver
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig<'a> {
    /// Hardware identity, e.g. `"renesas,r8a779g0-csi2"`
    pub compatible: &'a str,
    /// SoC revision string, e.g. `"ES2.0"`, when the platform reports one
    pub soc_revision: Option<&'a str>,
    /// Declared link topology
    pub topology: Topology,
}

impl<'a> DeviceConfig<'a> {
    /// Create a configuration for `compatible`
    pub const fn new(compatible: &'a str, topology: Topology) -> Self {
        Self {
            compatible,
            soc_revision: None,
            topology,
        }
    }

    /// Set the SoC revision
    #[must_use]
    pub const fn with_soc_revision(mut self, revision: &'a str) -> Self {
        self.soc_revision = Some(revision);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Lane Count Validation
    // =========================================================================

    #[test]
    fn dphy_accepts_1_2_4_lanes() {
        assert!(Topology::dphy(&[1]).validate().is_ok());
        assert!(Topology::dphy(&[1, 2]).validate().is_ok());
        assert!(Topology::dphy(&[1, 2, 3, 4]).validate().is_ok());
    }

    #[test]
    fn dphy_rejects_3_lanes() {
        assert_eq!(
            Topology::dphy(&[1, 2, 3]).validate(),
            Err(ConfigError::InvalidLaneCount)
        );
    }

    #[test]
    fn dphy_rejects_zero_and_five_lanes() {
        assert_eq!(Topology::dphy(&[]).validate(), Err(ConfigError::InvalidLaneCount));
        assert_eq!(
            Topology::dphy(&[1, 2, 3, 4, 1]).validate(),
            Err(ConfigError::InvalidLaneCount)
        );
    }

    #[test]
    fn cphy_requires_exactly_3_lanes() {
        assert!(Topology::cphy(&[1, 2, 3]).validate().is_ok());
        assert_eq!(Topology::cphy(&[1, 2]).validate(), Err(ConfigError::InvalidLaneCount));
        assert_eq!(
            Topology::cphy(&[1, 2, 3, 4]).validate(),
            Err(ConfigError::InvalidLaneCount)
        );
    }

    #[test]
    fn nonzero_endpoint_is_rejected() {
        let topology = Topology::dphy(&[1, 2]).with_endpoint(1, 0);
        assert_eq!(topology.validate(), Err(ConfigError::NotConnected));
    }

    // =========================================================================
    // Lane Swap
    // =========================================================================

    #[test]
    fn lane_positions_out_of_range_are_rejected() {
        assert_eq!(
            Topology::dphy(&[0, 1]).validate(),
            Err(ConfigError::InvalidLanePosition)
        );
        assert_eq!(
            Topology::dphy(&[1, 5]).validate(),
            Err(ConfigError::InvalidLanePosition)
        );
    }

    #[test]
    fn duplicate_lane_positions_are_rejected() {
        assert_eq!(Topology::dphy(&[2, 2]).validate(), Err(ConfigError::DuplicateLane));
    }

    #[test]
    fn idle_slots_take_free_positions() {
        let link = Topology::dphy(&[3, 1]).validate().unwrap();
        assert_eq!(link.lane_swap, [3, 1, 2, 4]);
    }

    #[test]
    fn every_permutation_survives_validation() {
        let positions = [1u8, 2, 3, 4];
        for a in positions {
            for b in positions {
                for c in positions {
                    for d in positions {
                        let lanes = [a, b, c, d];
                        let distinct = (1..=4).all(|p| lanes.contains(&p));
                        let result = Topology::dphy(&lanes).validate();
                        if distinct {
                            assert_eq!(result.unwrap().lane_swap, lanes);
                        } else {
                            assert_eq!(result, Err(ConfigError::DuplicateLane));
                        }
                    }
                }
            }
        }
    }

    // =========================================================================
    // C-PHY Overrides
    // =========================================================================

    #[test]
    fn cphy_defaults_are_abc_and_default_eq() {
        let link = Topology::cphy(&[1, 2, 3]).validate().unwrap();
        assert!(!link.pin_swap);
        assert_eq!(link.pin_swap_rx_order, [PinSwapOrder::Abc; NUM_TRIOS]);
        assert_eq!(link.hs_receive_eq, [DEFAULT_HS_RECEIVE_EQ; NUM_TRIOS]);
    }

    #[test]
    fn cphy_overrides_are_kept() {
        let link = Topology::cphy(&[1, 2, 3])
            .with_pin_swap(true)
            .with_pin_swap_rx_order(&[PinSwapOrder::Cba, PinSwapOrder::Abc, PinSwapOrder::Bca])
            .with_hs_receive_eq(&[0x2, 0x4, 0x6])
            .validate()
            .unwrap();

        assert!(link.pin_swap);
        assert_eq!(link.pin_swap_rx_order[0], PinSwapOrder::Cba);
        assert_eq!(link.pin_swap_rx_order[2], PinSwapOrder::Bca);
        assert_eq!(link.hs_receive_eq, [0x2, 0x4, 0x6]);
    }

    #[test]
    fn short_override_arrays_are_rejected() {
        let topology = Topology::cphy(&[1, 2, 3]).with_pin_swap_rx_order(&[PinSwapOrder::Abc]);
        assert_eq!(topology.validate(), Err(ConfigError::InvalidPinSwapOrder));

        let topology = Topology::cphy(&[1, 2, 3]).with_hs_receive_eq(&[0x4, 0x4]);
        assert_eq!(topology.validate(), Err(ConfigError::InvalidEqualization));
    }

    #[test]
    fn oversized_equalization_is_rejected() {
        let topology = Topology::cphy(&[1, 2, 3]).with_hs_receive_eq(&[0x4, 0x20, 0x4]);
        assert_eq!(topology.validate(), Err(ConfigError::InvalidEqualization));
    }

    #[test]
    fn pin_swap_fields_match_orders() {
        assert_eq!(PinSwapOrder::Abc.rw_cfg0(), 0x0);
        assert_eq!(PinSwapOrder::Cba.rw_cfg0(), 0x9);
        assert_eq!(PinSwapOrder::Acb.rw_cfg0(), 0xa);
        assert_eq!(PinSwapOrder::Cab.rw_cfg0(), 0x3);
        assert_eq!(PinSwapOrder::Bac.rw_cfg0(), 0xc);
        assert_eq!(PinSwapOrder::Bca.rw_cfg0(), 0x5);
        assert_eq!(PinSwapOrder::Bac.fields().afe_clane_29_b8, 1);
    }

    #[test]
    fn pin_swap_codes_round_trip_through_fields() {
        for code in 0..6 {
            let order = PinSwapOrder::from_code(code).unwrap();
            assert_eq!(order.fields().rw_cfg0_b2_0 as u32, code);
        }
        assert!(PinSwapOrder::from_code(6).is_none());
    }

    #[test]
    fn device_config_builder() {
        let config = DeviceConfig::new("renesas,r8a7795-csi2", Topology::dphy(&[1, 2, 3, 4]))
            .with_soc_revision("ES1.1");
        assert_eq!(config.soc_revision, Some("ES1.1"));
    }
}
