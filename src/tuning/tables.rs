//! Two-wire tuning tables.
//!
//! Values are characterisation data for the respective SoCs; speeds are in
//! Mbps per lane.

use super::SpeedEntry;

// =============================================================================
// PHY PLL frequency range (PHYPLL.HSFREQRANGE)
// =============================================================================

/// H3 ES2+, V3H, M3-N
pub static HSFREQRANGE_H3_V3H_M3N: [SpeedEntry; 43] = [
    SpeedEntry::new(80, 0x00),
    SpeedEntry::new(90, 0x10),
    SpeedEntry::new(100, 0x20),
    SpeedEntry::new(110, 0x30),
    SpeedEntry::new(120, 0x01),
    SpeedEntry::new(130, 0x11),
    SpeedEntry::new(140, 0x21),
    SpeedEntry::new(150, 0x31),
    SpeedEntry::new(160, 0x02),
    SpeedEntry::new(170, 0x12),
    SpeedEntry::new(180, 0x22),
    SpeedEntry::new(190, 0x32),
    SpeedEntry::new(205, 0x03),
    SpeedEntry::new(220, 0x13),
    SpeedEntry::new(235, 0x23),
    SpeedEntry::new(250, 0x33),
    SpeedEntry::new(275, 0x04),
    SpeedEntry::new(300, 0x14),
    SpeedEntry::new(325, 0x25),
    SpeedEntry::new(350, 0x35),
    SpeedEntry::new(400, 0x05),
    SpeedEntry::new(450, 0x16),
    SpeedEntry::new(500, 0x26),
    SpeedEntry::new(550, 0x37),
    SpeedEntry::new(600, 0x07),
    SpeedEntry::new(650, 0x18),
    SpeedEntry::new(700, 0x28),
    SpeedEntry::new(750, 0x39),
    SpeedEntry::new(800, 0x09),
    SpeedEntry::new(850, 0x19),
    SpeedEntry::new(900, 0x29),
    SpeedEntry::new(950, 0x3a),
    SpeedEntry::new(1000, 0x0a),
    SpeedEntry::new(1050, 0x1a),
    SpeedEntry::new(1100, 0x2a),
    SpeedEntry::new(1150, 0x3b),
    SpeedEntry::new(1200, 0x0b),
    SpeedEntry::new(1250, 0x1b),
    SpeedEntry::new(1300, 0x2b),
    SpeedEntry::new(1350, 0x3c),
    SpeedEntry::new(1400, 0x0c),
    SpeedEntry::new(1450, 0x1c),
    SpeedEntry::new(1500, 0x2c),
];

/// M3-W and H3 ES1.x
pub static HSFREQRANGE_M3W_H3ES1: [SpeedEntry; 43] = [
    SpeedEntry::new(80, 0x00),
    SpeedEntry::new(90, 0x10),
    SpeedEntry::new(100, 0x20),
    SpeedEntry::new(110, 0x30),
    SpeedEntry::new(120, 0x01),
    SpeedEntry::new(130, 0x11),
    SpeedEntry::new(140, 0x21),
    SpeedEntry::new(150, 0x31),
    SpeedEntry::new(160, 0x02),
    SpeedEntry::new(170, 0x12),
    SpeedEntry::new(180, 0x22),
    SpeedEntry::new(190, 0x32),
    SpeedEntry::new(205, 0x03),
    SpeedEntry::new(220, 0x13),
    SpeedEntry::new(235, 0x23),
    SpeedEntry::new(250, 0x33),
    SpeedEntry::new(275, 0x04),
    SpeedEntry::new(300, 0x14),
    SpeedEntry::new(325, 0x05),
    SpeedEntry::new(350, 0x15),
    SpeedEntry::new(400, 0x25),
    SpeedEntry::new(450, 0x06),
    SpeedEntry::new(500, 0x16),
    SpeedEntry::new(550, 0x07),
    SpeedEntry::new(600, 0x17),
    SpeedEntry::new(650, 0x08),
    SpeedEntry::new(700, 0x18),
    SpeedEntry::new(750, 0x09),
    SpeedEntry::new(800, 0x19),
    SpeedEntry::new(850, 0x29),
    SpeedEntry::new(900, 0x39),
    SpeedEntry::new(950, 0x0a),
    SpeedEntry::new(1000, 0x1a),
    SpeedEntry::new(1050, 0x2a),
    SpeedEntry::new(1100, 0x3a),
    SpeedEntry::new(1150, 0x0b),
    SpeedEntry::new(1200, 0x1b),
    SpeedEntry::new(1250, 0x2b),
    SpeedEntry::new(1300, 0x3b),
    SpeedEntry::new(1350, 0x0c),
    SpeedEntry::new(1400, 0x1c),
    SpeedEntry::new(1450, 0x2c),
    SpeedEntry::new(1500, 0x3c),
];

/// V3U (no 2250 Mbps characterisation point)
pub static HSFREQRANGE_V3U: [SpeedEntry; 62] = [
    SpeedEntry::new(80, 0x00),
    SpeedEntry::new(90, 0x10),
    SpeedEntry::new(100, 0x20),
    SpeedEntry::new(110, 0x30),
    SpeedEntry::new(120, 0x01),
    SpeedEntry::new(130, 0x11),
    SpeedEntry::new(140, 0x21),
    SpeedEntry::new(150, 0x31),
    SpeedEntry::new(160, 0x02),
    SpeedEntry::new(170, 0x12),
    SpeedEntry::new(180, 0x22),
    SpeedEntry::new(190, 0x32),
    SpeedEntry::new(205, 0x03),
    SpeedEntry::new(220, 0x13),
    SpeedEntry::new(235, 0x23),
    SpeedEntry::new(250, 0x33),
    SpeedEntry::new(275, 0x04),
    SpeedEntry::new(300, 0x14),
    SpeedEntry::new(325, 0x25),
    SpeedEntry::new(350, 0x35),
    SpeedEntry::new(400, 0x05),
    SpeedEntry::new(450, 0x16),
    SpeedEntry::new(500, 0x26),
    SpeedEntry::new(550, 0x37),
    SpeedEntry::new(600, 0x07),
    SpeedEntry::new(650, 0x18),
    SpeedEntry::new(700, 0x28),
    SpeedEntry::new(750, 0x39),
    SpeedEntry::new(800, 0x09),
    SpeedEntry::new(850, 0x19),
    SpeedEntry::new(900, 0x29),
    SpeedEntry::new(950, 0x3a),
    SpeedEntry::new(1000, 0x0a),
    SpeedEntry::new(1050, 0x1a),
    SpeedEntry::new(1100, 0x2a),
    SpeedEntry::new(1150, 0x3b),
    SpeedEntry::new(1200, 0x0b),
    SpeedEntry::new(1250, 0x1b),
    SpeedEntry::new(1300, 0x2b),
    SpeedEntry::new(1350, 0x3c),
    SpeedEntry::new(1400, 0x0c),
    SpeedEntry::new(1450, 0x1c),
    SpeedEntry::new(1500, 0x2c),
    SpeedEntry::new(1550, 0x3d),
    SpeedEntry::new(1600, 0x0d),
    SpeedEntry::new(1650, 0x1d),
    SpeedEntry::new(1700, 0x2e),
    SpeedEntry::new(1750, 0x3e),
    SpeedEntry::new(1800, 0x0e),
    SpeedEntry::new(1850, 0x1e),
    SpeedEntry::new(1900, 0x2f),
    SpeedEntry::new(1950, 0x3f),
    SpeedEntry::new(2000, 0x0f),
    SpeedEntry::new(2050, 0x40),
    SpeedEntry::new(2100, 0x41),
    SpeedEntry::new(2150, 0x42),
    SpeedEntry::new(2200, 0x43),
    SpeedEntry::new(2300, 0x45),
    SpeedEntry::new(2350, 0x46),
    SpeedEntry::new(2400, 0x47),
    SpeedEntry::new(2450, 0x48),
    SpeedEntry::new(2500, 0x49),
];

/// V4M
pub static HSFREQRANGE_V4M: [SpeedEntry; 63] = [
    SpeedEntry::new(80, 0x00),
    SpeedEntry::new(90, 0x10),
    SpeedEntry::new(100, 0x20),
    SpeedEntry::new(110, 0x30),
    SpeedEntry::new(120, 0x01),
    SpeedEntry::new(130, 0x11),
    SpeedEntry::new(140, 0x21),
    SpeedEntry::new(150, 0x31),
    SpeedEntry::new(160, 0x02),
    SpeedEntry::new(170, 0x12),
    SpeedEntry::new(180, 0x22),
    SpeedEntry::new(190, 0x32),
    SpeedEntry::new(205, 0x03),
    SpeedEntry::new(220, 0x13),
    SpeedEntry::new(235, 0x23),
    SpeedEntry::new(250, 0x33),
    SpeedEntry::new(275, 0x04),
    SpeedEntry::new(300, 0x14),
    SpeedEntry::new(325, 0x25),
    SpeedEntry::new(350, 0x35),
    SpeedEntry::new(400, 0x05),
    SpeedEntry::new(450, 0x16),
    SpeedEntry::new(500, 0x26),
    SpeedEntry::new(550, 0x37),
    SpeedEntry::new(600, 0x07),
    SpeedEntry::new(650, 0x18),
    SpeedEntry::new(700, 0x28),
    SpeedEntry::new(750, 0x39),
    SpeedEntry::new(800, 0x09),
    SpeedEntry::new(850, 0x19),
    SpeedEntry::new(900, 0x29),
    SpeedEntry::new(950, 0x3a),
    SpeedEntry::new(1000, 0x0a),
    SpeedEntry::new(1050, 0x1a),
    SpeedEntry::new(1100, 0x2a),
    SpeedEntry::new(1150, 0x3b),
    SpeedEntry::new(1200, 0x0b),
    SpeedEntry::new(1250, 0x1b),
    SpeedEntry::new(1300, 0x2b),
    SpeedEntry::new(1350, 0x3c),
    SpeedEntry::new(1400, 0x0c),
    SpeedEntry::new(1450, 0x1c),
    SpeedEntry::new(1500, 0x2c),
    SpeedEntry::new(1550, 0x3d),
    SpeedEntry::new(1600, 0x0d),
    SpeedEntry::new(1650, 0x1d),
    SpeedEntry::new(1700, 0x2e),
    SpeedEntry::new(1750, 0x3e),
    SpeedEntry::new(1800, 0x0e),
    SpeedEntry::new(1850, 0x1e),
    SpeedEntry::new(1900, 0x2f),
    SpeedEntry::new(1950, 0x3f),
    SpeedEntry::new(2000, 0x0f),
    SpeedEntry::new(2050, 0x40),
    SpeedEntry::new(2100, 0x41),
    SpeedEntry::new(2150, 0x42),
    SpeedEntry::new(2200, 0x43),
    SpeedEntry::new(2250, 0x44),
    SpeedEntry::new(2300, 0x45),
    SpeedEntry::new(2350, 0x46),
    SpeedEntry::new(2400, 0x47),
    SpeedEntry::new(2450, 0x48),
    SpeedEntry::new(2500, 0x49),
];

// =============================================================================
// PHTW speed-dependent test codes
// =============================================================================

/// Test code 0xf1 data for H3 / V3H / M3-N at 250 Mbps and below
pub static PHTW_MBPS_H3_V3H_M3N: [SpeedEntry; 16] = [
    SpeedEntry::new(80, 0x86),
    SpeedEntry::new(90, 0x86),
    SpeedEntry::new(100, 0x87),
    SpeedEntry::new(110, 0x87),
    SpeedEntry::new(120, 0x88),
    SpeedEntry::new(130, 0x88),
    SpeedEntry::new(140, 0x89),
    SpeedEntry::new(150, 0x89),
    SpeedEntry::new(160, 0x8a),
    SpeedEntry::new(170, 0x8a),
    SpeedEntry::new(180, 0x8b),
    SpeedEntry::new(190, 0x8b),
    SpeedEntry::new(205, 0x8c),
    SpeedEntry::new(220, 0x8d),
    SpeedEntry::new(235, 0x8e),
    SpeedEntry::new(250, 0x8e),
];

/// Test code 0x44 data for V3M / E3
pub static PHTW_MBPS_V3M_E3: [SpeedEntry; 32] = [
    SpeedEntry::new(80, 0x00),
    SpeedEntry::new(90, 0x20),
    SpeedEntry::new(100, 0x40),
    SpeedEntry::new(110, 0x02),
    SpeedEntry::new(130, 0x22),
    SpeedEntry::new(140, 0x42),
    SpeedEntry::new(150, 0x04),
    SpeedEntry::new(170, 0x24),
    SpeedEntry::new(180, 0x44),
    SpeedEntry::new(200, 0x06),
    SpeedEntry::new(220, 0x26),
    SpeedEntry::new(240, 0x46),
    SpeedEntry::new(250, 0x08),
    SpeedEntry::new(270, 0x28),
    SpeedEntry::new(300, 0x0a),
    SpeedEntry::new(330, 0x2a),
    SpeedEntry::new(360, 0x4a),
    SpeedEntry::new(400, 0x0c),
    SpeedEntry::new(450, 0x2c),
    SpeedEntry::new(500, 0x0e),
    SpeedEntry::new(550, 0x2e),
    SpeedEntry::new(600, 0x10),
    SpeedEntry::new(650, 0x30),
    SpeedEntry::new(700, 0x12),
    SpeedEntry::new(750, 0x32),
    SpeedEntry::new(800, 0x52),
    SpeedEntry::new(850, 0x72),
    SpeedEntry::new(900, 0x14),
    SpeedEntry::new(950, 0x34),
    SpeedEntry::new(1000, 0x54),
    SpeedEntry::new(1050, 0x74),
    SpeedEntry::new(1125, 0x16),
];

/// Test code 0xe2 data for V3U above 1500 Mbps
pub static PHTW_MBPS_V3U: [SpeedEntry; 21] = [
    SpeedEntry::new(1500, 0xcc),
    SpeedEntry::new(1550, 0x1d),
    SpeedEntry::new(1600, 0x27),
    SpeedEntry::new(1650, 0x30),
    SpeedEntry::new(1700, 0x39),
    SpeedEntry::new(1750, 0x42),
    SpeedEntry::new(1800, 0x4b),
    SpeedEntry::new(1850, 0x55),
    SpeedEntry::new(1900, 0x5e),
    SpeedEntry::new(1950, 0x67),
    SpeedEntry::new(2000, 0x71),
    SpeedEntry::new(2050, 0x79),
    SpeedEntry::new(2100, 0x83),
    SpeedEntry::new(2150, 0x8c),
    SpeedEntry::new(2200, 0x95),
    SpeedEntry::new(2250, 0x9e),
    SpeedEntry::new(2300, 0xa7),
    SpeedEntry::new(2350, 0xb0),
    SpeedEntry::new(2400, 0xba),
    SpeedEntry::new(2450, 0xc3),
    SpeedEntry::new(2500, 0xcc),
];

// =============================================================================
// Oscillator frequency targets
// =============================================================================

/// V4M DDL oscillator target (12 bits, split over two test codes)
pub static OSC_FREQ_TARGET_V4M: [SpeedEntry; 63] = [
    SpeedEntry::new(80, 0x1a9),
    SpeedEntry::new(90, 0x1a9),
    SpeedEntry::new(100, 0x1a9),
    SpeedEntry::new(110, 0x1a9),
    SpeedEntry::new(120, 0x1a9),
    SpeedEntry::new(130, 0x1a9),
    SpeedEntry::new(140, 0x1a9),
    SpeedEntry::new(150, 0x1a9),
    SpeedEntry::new(160, 0x1a9),
    SpeedEntry::new(170, 0x1a9),
    SpeedEntry::new(180, 0x1a9),
    SpeedEntry::new(190, 0x1a9),
    SpeedEntry::new(205, 0x1a9),
    SpeedEntry::new(220, 0x1a9),
    SpeedEntry::new(235, 0x1a9),
    SpeedEntry::new(250, 0x1a9),
    SpeedEntry::new(275, 0x1a9),
    SpeedEntry::new(300, 0x1a9),
    SpeedEntry::new(325, 0x1a9),
    SpeedEntry::new(350, 0x1a9),
    SpeedEntry::new(400, 0x1a9),
    SpeedEntry::new(450, 0x1a9),
    SpeedEntry::new(500, 0x1a9),
    SpeedEntry::new(550, 0x1a9),
    SpeedEntry::new(600, 0x1a9),
    SpeedEntry::new(650, 0x1a9),
    SpeedEntry::new(700, 0x1a9),
    SpeedEntry::new(750, 0x1a9),
    SpeedEntry::new(800, 0x1a9),
    SpeedEntry::new(850, 0x1a9),
    SpeedEntry::new(900, 0x1a9),
    SpeedEntry::new(950, 0x1a9),
    SpeedEntry::new(1000, 0x1a9),
    SpeedEntry::new(1050, 0x1a9),
    SpeedEntry::new(1100, 0x1a9),
    SpeedEntry::new(1150, 0x1a9),
    SpeedEntry::new(1200, 0x1a9),
    SpeedEntry::new(1250, 0x1a9),
    SpeedEntry::new(1300, 0x1a9),
    SpeedEntry::new(1350, 0x1a9),
    SpeedEntry::new(1400, 0x1a9),
    SpeedEntry::new(1450, 0x1a9),
    SpeedEntry::new(1500, 0x1a9),
    SpeedEntry::new(1550, 0x108),
    SpeedEntry::new(1600, 0x110),
    SpeedEntry::new(1650, 0x119),
    SpeedEntry::new(1700, 0x121),
    SpeedEntry::new(1750, 0x12a),
    SpeedEntry::new(1800, 0x132),
    SpeedEntry::new(1850, 0x13b),
    SpeedEntry::new(1900, 0x143),
    SpeedEntry::new(1950, 0x14c),
    SpeedEntry::new(2000, 0x154),
    SpeedEntry::new(2050, 0x15d),
    SpeedEntry::new(2100, 0x165),
    SpeedEntry::new(2150, 0x16e),
    SpeedEntry::new(2200, 0x176),
    SpeedEntry::new(2250, 0x17f),
    SpeedEntry::new(2300, 0x187),
    SpeedEntry::new(2350, 0x190),
    SpeedEntry::new(2400, 0x198),
    SpeedEntry::new(2450, 0x1a1),
    SpeedEntry::new(2500, 0x1a9),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::SpeedTable;

    fn strictly_ascending(table: &[SpeedEntry]) -> bool {
        table.windows(2).all(|w| w[0].mbps < w[1].mbps)
    }

    #[test]
    fn all_tables_are_strictly_ascending() {
        let tables: [&[SpeedEntry]; 8] = [
            &HSFREQRANGE_H3_V3H_M3N,
            &HSFREQRANGE_M3W_H3ES1,
            &HSFREQRANGE_V3U,
            &HSFREQRANGE_V4M,
            &PHTW_MBPS_H3_V3H_M3N,
            &PHTW_MBPS_V3M_E3,
            &PHTW_MBPS_V3U,
            &OSC_FREQ_TARGET_V4M,
        ];
        for table in tables {
            assert!(strictly_ascending(table));
        }
    }

    #[test]
    fn hsfreqrange_h3_lookup() {
        let table = SpeedTable::new(&HSFREQRANGE_H3_V3H_M3N);
        assert_eq!(table.lookup(1500).unwrap().value, 0x2c);
        // 212 is 7 above 205 and 8 below 220
        assert_eq!(table.lookup(212).unwrap().value, 0x03);
        assert!(table.lookup(1501).is_err());
    }

    #[test]
    fn v3u_and_v4m_differ_only_at_2250() {
        let v3u = SpeedTable::new(&HSFREQRANGE_V3U);
        let v4m = SpeedTable::new(&HSFREQRANGE_V4M);
        assert_eq!(v3u.lookup(2250).unwrap().value, 0x43);
        assert_eq!(v4m.lookup(2250).unwrap().value, 0x44);
        assert_eq!(v3u.lookup(2400).unwrap().value, v4m.lookup(2400).unwrap().value);
    }

    #[test]
    fn osc_freq_target_is_flat_up_to_1500() {
        let table = SpeedTable::new(&OSC_FREQ_TARGET_V4M);
        assert_eq!(table.lookup(80).unwrap().value, 0x1a9);
        assert_eq!(table.lookup(1500).unwrap().value, 0x1a9);
        assert_eq!(table.lookup(1550).unwrap().value, 0x108);
    }
}
