//! PHY test interface (PHTW) handshake
//!
//! The D-PHY's analog tuning registers sit behind a narrow test interface:
//! one write request carries an 8-bit test code and an 8-bit data byte, and
//! the hardware clears the two enable bits once it has consumed the pair.
//! Calibration sequences are ordered lists of such pairs.

use embedded_hal::delay::DelayNs;

use crate::constants::PHTW_POLL;
use crate::error::{Result, WaitPoint};
use crate::hal::regs::RegisterAccess;
use crate::hal::timing::wait_until;
use crate::internal::register::{gen3, gen4};
use crate::tuning::SpeedTable;

// =============================================================================
// Types
// =============================================================================

/// Test interface registers of a receiver generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhtwPort {
    /// Write request register
    pub write: u32,
    /// Test interface clear register
    pub clear: u32,
    /// Wait for the request to be consumed before the next one
    pub ack: bool,
}

impl PhtwPort {
    /// Gen3 / V3U test interface
    pub const LEGACY: Self = Self {
        write: gen3::PHTW,
        clear: gen3::PHTC,
        ack: true,
    };

    /// X5H keeps the legacy offsets but posts writes without acknowledge
    pub const POSTED: Self = Self {
        write: gen3::PHTW,
        clear: gen3::PHTC,
        ack: false,
    };

    /// V4H / V4M test interface
    pub const GEN4: Self = Self {
        write: gen4::V4M_PHTW,
        clear: gen4::V4M_PHTC,
        ack: true,
    };
}

/// One `(data, code)` test interface write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhtwPair {
    /// Data byte
    pub data: u8,
    /// Test code
    pub code: u8,
}

impl PhtwPair {
    /// Create a pair
    pub const fn new(data: u8, code: u8) -> Self {
        Self { data, code }
    }

    /// Encoded write request
    pub const fn request(&self) -> u32 {
        gen3::PHTW_DWEN
            | gen3::phtw_testdin_data(self.data as u32)
            | gen3::PHTW_CWEN
            | gen3::phtw_testdin_code(self.code as u32)
    }
}

// =============================================================================
// Test Interface
// =============================================================================

/// What a calibration hook may do to the PHY
///
/// Object safe so hooks can be plain `fn` values stored in a
/// [`VariantProfile`](crate::variant::VariantProfile).
pub trait TestInterface {
    /// Issue one test write and wait for it to be consumed
    fn phtw_write(&mut self, data: u8, code: u8) -> Result<()>;

    /// Write a 32-bit receiver register
    fn write32(&mut self, offset: u32, value: u32);

    /// OR bits into a 32-bit receiver register
    fn set_bits32(&mut self, offset: u32, bits: u32);
}

/// Issue every pair of `sequence` in order; the first failure aborts
pub fn write_sequence(phy: &mut dyn TestInterface, sequence: &[PhtwPair]) -> Result<()> {
    sequence
        .iter()
        .try_for_each(|pair| phy.phtw_write(pair.data, pair.code))
}

/// Issue `code` with the data byte `table` holds nearest `mbps`
pub fn write_mbps(phy: &mut dyn TestInterface, table: SpeedTable, mbps: u32, code: u8) -> Result<()> {
    let m = table.lookup(mbps)?;
    phy.phtw_write(m.value as u8, code)
}

/// [`TestInterface`] over a register window and a delay
pub struct Phtw<'a, R: RegisterAccess, D: DelayNs> {
    regs: &'a R,
    delay: &'a mut D,
    port: PhtwPort,
}

impl<'a, R: RegisterAccess, D: DelayNs> Phtw<'a, R, D> {
    /// Bind the test interface of `port`
    pub fn new(regs: &'a R, delay: &'a mut D, port: PhtwPort) -> Self {
        Self { regs, delay, port }
    }
}

impl<R: RegisterAccess, D: DelayNs> TestInterface for Phtw<'_, R, D> {
    fn phtw_write(&mut self, data: u8, code: u8) -> Result<()> {
        let pair = PhtwPair::new(data, code);
        trace!("phtw data {} code {}", data, code);
        self.regs.write32(self.port.write, pair.request());

        if !self.port.ack {
            return Ok(());
        }

        let regs = self.regs;
        let offset = self.port.write;
        wait_until(&mut *self.delay, PHTW_POLL, WaitPoint::PhtwAck, || {
            regs.read32(offset) & (gen3::PHTW_DWEN | gen3::PHTW_CWEN) == 0
        })
        .inspect_err(|_| error!("Timeout waiting for PHTW_DWEN and/or PHTW_CWEN"))
    }

    fn write32(&mut self, offset: u32, value: u32) {
        self.regs.write32(offset, value);
    }

    fn set_bits32(&mut self, offset: u32, bits: u32) {
        self.regs.set_bits32(offset, bits);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
