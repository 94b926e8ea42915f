//! Three-wire (C-PHY) composite tuning table.
//!
//! Unlike the two-wire tables, each entry bundles several register fields
//! that are programmed together for one symbol rate.

use super::{Match, SpeedKeyed, nearest};
use crate::error::Result;

/// C-PHY tuning record for one symbol rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CphySetting {
    /// Symbol rate in Msps
    pub msps: u16,
    /// CLANE HS_RX word 2
    pub rw_hs_rx_2: u16,
    /// TRIO word 0, bits 11:9
    pub rw_trio_0: u16,
    /// TRIO word 1
    pub rw_trio_1: u16,
    /// TRIO word 2, bits 7:0
    pub rw_trio_2: u16,
    /// AFE lane control 2 word 9, bits 4:0 (before equalization)
    pub afe_lane0_29: u16,
    /// AFE lane control 2 word 7, bits 12:10
    pub afe_lane0_27: u16,
}

impl CphySetting {
    const fn new(
        msps: u16,
        rw_hs_rx_2: u16,
        rw_trio_0: u16,
        rw_trio_1: u16,
        rw_trio_2: u16,
        afe_lane0_29: u16,
        afe_lane0_27: u16,
    ) -> Self {
        Self {
            msps,
            rw_hs_rx_2,
            rw_trio_0,
            rw_trio_1,
            rw_trio_2,
            afe_lane0_29,
            afe_lane0_27,
        }
    }
}

impl SpeedKeyed for CphySetting {
    fn speed(&self) -> u16 {
        self.msps
    }
}

/// V4H C-PHY characterisation, 80 to 3500 Msps
pub static CPHY_SETTINGS_V4H: [CphySetting; 36] = [
    CphySetting::new(80, 0x38, 0x200, 0x134, 0x6a, 0x00, 0x0000),
    CphySetting::new(100, 0x38, 0x200, 0xf5, 0x55, 0x00, 0x0000),
    CphySetting::new(200, 0x38, 0x200, 0x77, 0x2b, 0x00, 0x0000),
    CphySetting::new(300, 0x38, 0x200, 0x4d, 0x1d, 0x00, 0x0000),
    CphySetting::new(400, 0x38, 0x200, 0x38, 0x16, 0x00, 0x0000),
    CphySetting::new(500, 0x38, 0x200, 0x2c, 0x12, 0x00, 0x0000),
    CphySetting::new(600, 0x38, 0x200, 0x23, 0x0f, 0x00, 0x0000),
    CphySetting::new(700, 0x38, 0x200, 0x1d, 0x0d, 0x00, 0x0000),
    CphySetting::new(800, 0x38, 0x200, 0x19, 0x0c, 0x00, 0x0000),
    CphySetting::new(900, 0x38, 0x200, 0x15, 0x0b, 0x00, 0x0000),
    CphySetting::new(1000, 0x3e, 0x200, 0x13, 0x0a, 0x00, 0x0400),
    CphySetting::new(1100, 0x44, 0x200, 0x10, 0x09, 0x00, 0x0800),
    CphySetting::new(1200, 0x4a, 0x200, 0x0e, 0x08, 0x00, 0x0c00),
    CphySetting::new(1300, 0x51, 0x200, 0x0d, 0x08, 0x00, 0x0c00),
    CphySetting::new(1400, 0x57, 0x200, 0x0b, 0x07, 0x00, 0x1000),
    CphySetting::new(1500, 0x5d, 0x400, 0x0a, 0x07, 0x00, 0x1000),
    CphySetting::new(1600, 0x63, 0x400, 0x09, 0x07, 0x00, 0x1400),
    CphySetting::new(1700, 0x6a, 0x400, 0x08, 0x06, 0x00, 0x1400),
    CphySetting::new(1800, 0x70, 0x400, 0x07, 0x06, 0x00, 0x1400),
    CphySetting::new(1900, 0x76, 0x400, 0x07, 0x06, 0x00, 0x1400),
    CphySetting::new(2000, 0x7c, 0x400, 0x06, 0x06, 0x00, 0x1800),
    CphySetting::new(2100, 0x83, 0x400, 0x05, 0x05, 0x00, 0x1800),
    CphySetting::new(2200, 0x89, 0x600, 0x05, 0x05, 0x00, 0x1800),
    CphySetting::new(2300, 0x8f, 0x600, 0x04, 0x05, 0x00, 0x1800),
    CphySetting::new(2400, 0x95, 0x600, 0x04, 0x05, 0x00, 0x1800),
    CphySetting::new(2500, 0x9c, 0x600, 0x04, 0x05, 0x00, 0x1c00),
    CphySetting::new(2600, 0xa2, 0x600, 0x03, 0x05, 0x10, 0x1c00),
    CphySetting::new(2700, 0xa8, 0x600, 0x03, 0x05, 0x10, 0x1c00),
    CphySetting::new(2800, 0xae, 0x600, 0x02, 0x04, 0x10, 0x1c00),
    CphySetting::new(2900, 0xb5, 0x800, 0x02, 0x04, 0x10, 0x1c00),
    CphySetting::new(3000, 0xbb, 0x800, 0x02, 0x04, 0x10, 0x1c00),
    CphySetting::new(3100, 0xc1, 0x800, 0x02, 0x04, 0x10, 0x1c00),
    CphySetting::new(3200, 0xc7, 0x800, 0x01, 0x04, 0x10, 0x1c00),
    CphySetting::new(3300, 0xce, 0x800, 0x01, 0x04, 0x10, 0x1c00),
    CphySetting::new(3400, 0xd4, 0x800, 0x01, 0x04, 0x10, 0x1c00),
    CphySetting::new(3500, 0xda, 0x800, 0x01, 0x04, 0x10, 0x1c00),
];

/// Tuning record nearest `msps`
pub fn lookup(msps: u32) -> Result<Match<CphySetting>> {
    nearest(&CPHY_SETTINGS_V4H, msps).map(|m| m.map(|setting| *setting))
}
