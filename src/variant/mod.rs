//! Hardware variant profiles
//!
//! Every R-Car generation shares the same high level bring-up protocol but
//! differs in register layout, calibration sequence and capabilities. A
//! [`VariantProfile`] bundles those differences as immutable data: which
//! [`BringupAlgorithm`] applies, [`Capabilities`] flags, the speed tables
//! used for PLL and oscillator tuning, and two optional hooks run around
//! PHY start.
//!
//! Profiles live in a static registry keyed by the hardware identity
//! string; [`lookup`] resolves one at attach time.
//!
//! # Example
//!
//! ```ignore
//! let profile = variant::lookup("renesas,r8a77990-csi2", None)?;
//! assert_eq!(profile.num_channels, 2);
//! ```

pub mod hooks;

use bitflags::bitflags;

use crate::constants::X5H_LINK_RATE_BPS;
use crate::error::{ConfigError, ConfigResult, Result};
use crate::hal::phtw::{PhtwPort, TestInterface};
use crate::tuning::SpeedTable;
use crate::tuning::tables::{
    HSFREQRANGE_H3_V3H_M3N, HSFREQRANGE_M3W_H3ES1, HSFREQRANGE_V3U, HSFREQRANGE_V4M,
    OSC_FREQ_TARGET_V4M,
};

// =============================================================================
// Types
// =============================================================================

/// Pre-calibration programming hook, called with the link rate in Mbps
pub type InitPhtwFn = fn(&mut dyn TestInterface, &VariantProfile, u32) -> Result<()>;

/// Post-calibration fixup hook
pub type PostInitFn = fn(&mut dyn TestInterface) -> Result<()>;

/// Bring-up algorithm, one per receiver family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupAlgorithm {
    /// Gen3 / V3U D-PHY only receiver programmed through PHYCNT and PHTW
    Legacy,
    /// V4H combined D-PHY / C-PHY
    CombinedPhy,
    /// V4M: V4H register shape, D-PHY only, separate clock range register
    DphyOnly,
    /// X5H: independently addressed PHY, link and stream interface blocks
    IndependentBlocks,
}

impl BringupAlgorithm {
    /// Whether the algorithm ends with the stop-state / force-RX release step
    pub const fn confirms_stop_state(self) -> bool {
        matches!(self, BringupAlgorithm::CombinedPhy | BringupAlgorithm::DphyOnly)
    }
}

bitflags! {
    /// Optional behaviours of a receiver generation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u32 {
        /// Clear the stale ULPS start/end latch after PHY start
        const CLEAR_ULPS = 1 << 0;
        /// No VC/DT selector registers
        const NO_VCDT = 1 << 1;
        /// Has the PHYFRX force-receive-mode register
        const HAS_PHYFRX = 1 << 2;
        /// Entering standby leaves PHYCNT / PHTC untouched
        const STANDBY_KEEPS_PHYCNT = 1 << 3;
        /// No reset controller; standby only drops the power domain
        const NO_RESET_CONTROL = 1 << 4;
        /// Test interface writes are posted, never acknowledged
        const NO_PHTW_ACK = 1 << 5;
    }
}

// =============================================================================
// Variant Profile
// =============================================================================

/// Immutable description of one receiver generation
#[derive(Clone, Copy)]
pub struct VariantProfile {
    /// Short SoC name, for logs
    pub name: &'static str,
    /// Bring-up algorithm
    pub algorithm: BringupAlgorithm,
    /// Optional behaviours
    pub capabilities: Capabilities,
    /// PLL frequency range table
    pub hsfreqrange: Option<SpeedTable>,
    /// DDL target oscillation frequency table
    pub osc_freq_target: Option<SpeedTable>,
    /// Clock frequency range value; 0 means the register is left alone
    pub csi0clkfreqrange: u8,
    /// Programming run before PHY start
    pub init_phtw: Option<InitPhtwFn>,
    /// Fixup run after PHY start
    pub phy_post_init: Option<PostInitFn>,
    /// Number of virtual channels the receiver can route
    pub num_channels: u8,
    /// Link rate in bits per second when it does not derive from the source
    pub fixed_link_rate_bps: Option<u64>,
}

impl core::fmt::Debug for VariantProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VariantProfile")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("capabilities", &self.capabilities)
            .field("num_channels", &self.num_channels)
            .finish_non_exhaustive()
    }
}

impl VariantProfile {
    const fn legacy(name: &'static str) -> Self {
        Self {
            name,
            algorithm: BringupAlgorithm::Legacy,
            capabilities: Capabilities::empty(),
            hsfreqrange: None,
            osc_freq_target: None,
            csi0clkfreqrange: 0,
            init_phtw: None,
            phy_post_init: None,
            num_channels: 4,
            fixed_link_rate_bps: None,
        }
    }

    /// Test interface registers and handshake for this generation
    pub const fn phtw_port(&self) -> PhtwPort {
        if self.capabilities.contains(Capabilities::NO_PHTW_ACK) {
            return PhtwPort::POSTED;
        }
        match self.algorithm {
            BringupAlgorithm::CombinedPhy | BringupAlgorithm::DphyOnly => PhtwPort::GEN4,
            BringupAlgorithm::Legacy | BringupAlgorithm::IndependentBlocks => PhtwPort::LEGACY,
        }
    }

    /// Whether `caps` are all set
    pub const fn has(&self, caps: Capabilities) -> bool {
        self.capabilities.contains(caps)
    }
}

// =============================================================================
// Profiles
// =============================================================================

const H3_BASE: VariantProfile = VariantProfile {
    capabilities: Capabilities::CLEAR_ULPS,
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_H3_V3H_M3N)),
    csi0clkfreqrange: 0x20,
    init_phtw: Some(hooks::init_phtw_h3_v3h_m3n),
    ..VariantProfile::legacy("h3-v3h-m3n")
};

/// H3, M3-N, V3H and RZ/G2 equivalents
pub static H3_V3H_M3N: VariantProfile = H3_BASE;

/// H3 ES1.x
pub static H3_ES1: VariantProfile = VariantProfile {
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_M3W_H3ES1)),
    ..VariantProfile::legacy("h3-es1")
};

/// H3 ES2.x
pub static H3_ES2: VariantProfile = VariantProfile {
    name: "h3-es2",
    init_phtw: Some(hooks::init_phtw_h3es2),
    ..H3_BASE
};

/// M3-W and its RZ/G2 equivalent
pub static M3W: VariantProfile = VariantProfile {
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_M3W_H3ES1)),
    ..VariantProfile::legacy("m3w")
};

/// V3M
pub static V3M: VariantProfile = VariantProfile {
    init_phtw: Some(hooks::init_phtw_v3m_e3),
    phy_post_init: Some(hooks::phy_post_init_v3m_e3),
    ..VariantProfile::legacy("v3m")
};

/// E3 and its RZ/G2 equivalent
pub static E3: VariantProfile = VariantProfile {
    init_phtw: Some(hooks::init_phtw_v3m_e3),
    phy_post_init: Some(hooks::phy_post_init_v3m_e3),
    num_channels: 2,
    ..VariantProfile::legacy("e3")
};

/// V3U
pub static V3U: VariantProfile = VariantProfile {
    capabilities: Capabilities::CLEAR_ULPS
        .union(Capabilities::NO_VCDT)
        .union(Capabilities::HAS_PHYFRX),
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_V3U)),
    csi0clkfreqrange: 0x20,
    init_phtw: Some(hooks::init_phtw_v3u),
    ..VariantProfile::legacy("v3u")
};

/// V4H
pub static V4H: VariantProfile = VariantProfile {
    algorithm: BringupAlgorithm::CombinedPhy,
    capabilities: Capabilities::STANDBY_KEEPS_PHYCNT,
    num_channels: 16,
    ..VariantProfile::legacy("v4h")
};

/// V4M
pub static V4M: VariantProfile = VariantProfile {
    algorithm: BringupAlgorithm::DphyOnly,
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_V4M)),
    osc_freq_target: Some(SpeedTable::new(&OSC_FREQ_TARGET_V4M)),
    csi0clkfreqrange: 0x0c,
    init_phtw: Some(hooks::init_phtw_v4m),
    num_channels: 16,
    ..VariantProfile::legacy("v4m")
};

/// X5H
pub static X5H: VariantProfile = VariantProfile {
    algorithm: BringupAlgorithm::IndependentBlocks,
    capabilities: Capabilities::CLEAR_ULPS
        .union(Capabilities::NO_VCDT)
        .union(Capabilities::HAS_PHYFRX)
        .union(Capabilities::NO_RESET_CONTROL)
        .union(Capabilities::NO_PHTW_ACK),
    hsfreqrange: Some(SpeedTable::new(&HSFREQRANGE_V3U)),
    csi0clkfreqrange: 0x20,
    init_phtw: Some(hooks::init_phtw_v3u),
    fixed_link_rate_bps: Some(X5H_LINK_RATE_BPS),
    ..VariantProfile::legacy("x5h")
};

// =============================================================================
// Registry
// =============================================================================

/// Hardware identity strings and their profiles
static REGISTRY: [(&str, &VariantProfile); 15] = [
    ("renesas,r8a774a1-csi2", &M3W),
    ("renesas,r8a774b1-csi2", &H3_V3H_M3N),
    ("renesas,r8a774c0-csi2", &E3),
    ("renesas,r8a774e1-csi2", &H3_V3H_M3N),
    ("renesas,r8a7795-csi2", &H3_V3H_M3N),
    ("renesas,r8a7796-csi2", &M3W),
    ("renesas,r8a77961-csi2", &M3W),
    ("renesas,r8a77965-csi2", &H3_V3H_M3N),
    ("renesas,r8a77970-csi2", &V3M),
    ("renesas,r8a77980-csi2", &H3_V3H_M3N),
    ("renesas,r8a77990-csi2", &E3),
    ("renesas,r8a779a0-csi2", &V3U),
    ("renesas,r8a779g0-csi2", &V4H),
    ("renesas,r8a779h0-csi2", &V4M),
    ("renesas,r8a78000-csi2", &X5H),
];

/// H3 silicon revisions share one compatible string but behave differently
const H3_COMPATIBLE: &str = "renesas,r8a7795-csi2";

/// Resolve the profile for `compatible`, applying the H3 revision overrides
pub fn lookup(compatible: &str, soc_revision: Option<&str>) -> ConfigResult<&'static VariantProfile> {
    if compatible == H3_COMPATIBLE {
        match soc_revision {
            Some(rev) if rev.starts_with("ES1.") => return Ok(&H3_ES1),
            Some(rev) if rev.starts_with("ES2.") => return Ok(&H3_ES2),
            _ => {}
        }
    }

    REGISTRY
        .iter()
        .find(|(name, _)| *name == compatible)
        .map(|(_, profile)| *profile)
        .ok_or(ConfigError::UnknownVariant)
}

// =============================================================================
// Unit Tests
// =============================================================================
