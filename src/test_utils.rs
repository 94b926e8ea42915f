//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the receiver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use crate::driver::format::FrameFormat;
use crate::driver::source::{MbusConfig, VideoSource};
use crate::error::UpstreamError;
use crate::hal::power::PowerControl;
use crate::hal::regs::RegisterAccess;
use crate::internal::register::{gen3, gen4};

// =============================================================================
// Mock Registers
// =============================================================================

/// One recorded register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 32-bit write (offset, value)
    Write32(u32, u32),
    /// 16-bit write (offset, value)
    Write16(u32, u16),
}

/// Mock register window for testing bring-up sequences without hardware
///
/// Unset registers read as zero. Writes are stored and logged; registers
/// configured with [`auto_clear`](Self::auto_clear) drop the given bits right
/// after every write (self-clearing request bits), and registers configured
/// with [`write_one_to_clear`](Self::write_one_to_clear) clear the written
/// bits instead of storing them.
///
/// # Example
///
/// ```ignore
/// let regs = MockRegisters::new();
/// regs.set_register(gen3::PHCLM, gen3::PHCLM_STOPSTATECKL);
/// regs.set_register(gen3::PHDLM, 0xf);
/// ```
#[derive(Debug, Default)]
pub struct MockRegisters {
    regs32: RefCell<HashMap<u32, u32>>,
    regs16: RefCell<HashMap<u32, u16>>,
    write_log: RefCell<Vec<Access>>,
    auto_clear: RefCell<HashMap<u32, u32>>,
    w1c: RefCell<Vec<u32>>,
}

impl MockRegisters {
    /// Create a new mock register window
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a 32-bit register value without logging a write
    pub fn set_register(&self, offset: u32, value: u32) {
        self.regs32.borrow_mut().insert(offset, value);
    }

    /// Current value of a 32-bit register
    pub fn get_register(&self, offset: u32) -> u32 {
        self.regs32.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Set a 16-bit register value without logging a write
    pub fn set_register16(&self, offset: u32, value: u16) {
        self.regs16.borrow_mut().insert(offset, value);
    }

    /// Current value of a 16-bit register
    pub fn get_register16(&self, offset: u32) -> u16 {
        self.regs16.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Clear `bits` of `offset` right after every write to it
    pub fn auto_clear(&self, offset: u32, bits: u32) {
        self.auto_clear.borrow_mut().insert(offset, bits);
    }

    /// Treat `offset` as a write-1-to-clear status register
    pub fn write_one_to_clear(&self, offset: u32) {
        self.w1c.borrow_mut().push(offset);
    }

    /// Every write in order
    pub fn write_log(&self) -> Vec<Access> {
        self.write_log.borrow().clone()
    }

    /// Values written to a 32-bit register, in order
    pub fn writes_to(&self, offset: u32) -> Vec<u32> {
        self.write_log
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write32(o, v) if o == offset => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Values written to a 16-bit register, in order
    pub fn writes16_to(&self, offset: u32) -> Vec<u16> {
        self.write_log
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write16(o, v) if o == offset => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Position of the first write to a 32-bit register in the log
    pub fn first_write_index(&self, offset: u32) -> Option<usize> {
        self.write_log
            .borrow()
            .iter()
            .position(|access| matches!(*access, Access::Write32(o, _) if o == offset))
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Make every bounded wait in bring-up succeed immediately
    ///
    /// Both PHTW ports acknowledge, clock and data lanes report LP-11, the
    /// V4 status reports calibration done plus stop state, and the V4 test
    /// interface reports power-on-reset complete.
    pub fn simulate_healthy_phy(&self) {
        let ack = gen3::PHTW_DWEN | gen3::PHTW_CWEN;
        self.auto_clear(gen3::PHTW, ack);
        self.auto_clear(gen4::V4M_PHTW, ack);

        self.set_register(gen3::PHCLM, gen3::PHCLM_STOPSTATECKL);
        self.set_register(gen3::PHDLM, 0xf);

        self.set_register(
            gen4::ST_PHYST,
            gen4::ST_PHY_READY
                | gen4::ST_STOPSTATE_DCK
                | gen4::ST_STOPSTATE_0
                | gen4::ST_STOPSTATE_1
                | gen4::ST_STOPSTATE_2,
        );
        self.set_register(gen4::V4M_PHTR, gen4::PHTR_POR_DONE);

        self.write_one_to_clear(gen3::INTSTATE);
        self.write_one_to_clear(gen3::INTERRSTATE);
    }
}

impl RegisterAccess for MockRegisters {
    fn read32(&self, offset: u32) -> u32 {
        self.get_register(offset)
    }

    fn write32(&self, offset: u32, value: u32) {
        self.write_log.borrow_mut().push(Access::Write32(offset, value));

        if self.w1c.borrow().contains(&offset) {
            let current = self.get_register(offset);
            self.set_register(offset, current & !value);
            return;
        }

        let cleared = self.auto_clear.borrow().get(&offset).copied().unwrap_or(0);
        self.set_register(offset, value & !cleared);
    }

    fn read16(&self, offset: u32) -> u16 {
        self.get_register16(offset)
    }

    fn write16(&self, offset: u32, value: u16) {
        self.write_log.borrow_mut().push(Access::Write16(offset, value));
        self.set_register16(offset, value);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Mock Video Source
// =============================================================================

/// Mock upstream source recording stream commands
#[derive(Debug)]
pub struct MockSource {
    pub pixel_rate: Option<u64>,
    pub mbus: Result<Option<MbusConfig>, UpstreamError>,
    pub fail_start: bool,
    pub fail_stop: bool,
    pub starts: u32,
    pub stops: u32,
    pub last_format: Option<FrameFormat>,
}

impl MockSource {
    /// Source streaming at `pixel_rate` without an advertised bus configuration
    pub fn new(pixel_rate: u64) -> Self {
        Self {
            pixel_rate: Some(pixel_rate),
            mbus: Ok(None),
            fail_start: false,
            fail_stop: false,
            starts: 0,
            stops: 0,
            last_format: None,
        }
    }

    /// Whether the source is currently transmitting
    pub fn streaming(&self) -> bool {
        self.starts > self.stops
    }
}

impl VideoSource for MockSource {
    fn pixel_rate(&mut self) -> Option<u64> {
        self.pixel_rate
    }

    fn mbus_config(&mut self) -> Result<Option<MbusConfig>, UpstreamError> {
        self.mbus
    }

    fn start_stream(&mut self, format: &FrameFormat) -> Result<(), UpstreamError> {
        if self.fail_start {
            return Err(UpstreamError::StreamControl);
        }
        self.starts += 1;
        self.last_format = Some(*format);
        Ok(())
    }

    fn stop_stream(&mut self) -> Result<(), UpstreamError> {
        self.stops += 1;
        if self.fail_stop {
            return Err(UpstreamError::StreamControl);
        }
        Ok(())
    }
}

// =============================================================================
// Mock Power
// =============================================================================

/// Mock power domain and reset line
#[derive(Debug, Default)]
pub struct MockPower {
    pub gets: u32,
    pub puts: u32,
    pub asserts: u32,
    pub deasserts: u32,
    pub in_reset: bool,
}

impl MockPower {
    /// Create a new mock power controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding power references
    pub fn references(&self) -> i64 {
        i64::from(self.gets) - i64::from(self.puts)
    }
}

impl PowerControl for MockPower {
    fn power_get(&mut self) {
        self.gets += 1;
    }

    fn power_put(&mut self) {
        self.puts += 1;
    }

    fn reset_assert(&mut self) {
        self.asserts += 1;
        self.in_reset = true;
    }

    fn reset_deassert(&mut self) {
        self.deasserts += 1;
        self.in_reset = false;
    }
}

// =============================================================================
// Tests for Mock Implementations
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_registers_read_write() {
        let regs = MockRegisters::new();
        assert_eq!(regs.read32(0x10), 0);

        regs.write32(0x10, 0x1234);
        regs.write16(0x21800, 0x55);

        assert_eq!(regs.read32(0x10), 0x1234);
        assert_eq!(regs.read16(0x21800), 0x55);
        assert_eq!(
            regs.write_log(),
            [Access::Write32(0x10, 0x1234), Access::Write16(0x21800, 0x55)]
        );
    }

    #[test]
    fn mock_registers_auto_clear() {
        let regs = MockRegisters::new();
        regs.auto_clear(0x50, 0x0100_0100);

        regs.write32(0x50, 0x01cc_01e2);

        assert_eq!(regs.read32(0x50), 0x00cc_00e2);
        assert_eq!(regs.writes_to(0x50), [0x01cc_01e2]);
    }

    #[test]
    fn mock_registers_write_one_to_clear() {
        let regs = MockRegisters::new();
        regs.write_one_to_clear(0x38);
        regs.set_register(0x38, 0b1010);

        regs.write32(0x38, 0b0010);

        assert_eq!(regs.read32(0x38), 0b1000);
    }

    #[test]
    fn mock_delay_tracks_time() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_us(&mut delay, 1_000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 500);

        assert_eq!(delay.total_ns(), 1_000_500);
        assert_eq!(delay.total_us(), 1_000);

        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn mock_source_counts_commands() {
        let mut source = MockSource::new(74_250_000);
        source.start_stream(&FrameFormat::default()).unwrap();
        assert!(source.streaming());
        source.stop_stream().unwrap();
        assert!(!source.streaming());
    }
}
