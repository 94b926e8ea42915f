//! Centralized Constants
//!
//! Timing budgets and fixed link parameters used by the bring-up paths.
//!
//! # Note
//!
//! Register offsets and bit definitions live in `internal::register`
//! next to the block they describe.

use crate::hal::timing::PollConfig;

// =============================================================================
// Timing Constants
// =============================================================================

/// Interval between LP-11 / PHTW polls, lower bound in microseconds
pub const POLL_INTERVAL_MIN_US: u32 = 1_000;

/// Interval between LP-11 / PHTW polls, upper bound in microseconds
pub const POLL_INTERVAL_MAX_US: u32 = 2_000;

/// Clock and data lanes must reach LP-11 within this budget
pub const LP11_POLL: PollConfig = PollConfig::new(21, POLL_INTERVAL_MIN_US, POLL_INTERVAL_MAX_US);

/// PHTW write acknowledge budget
pub const PHTW_POLL: PollConfig = PollConfig::new(21, POLL_INTERVAL_MIN_US, POLL_INTERVAL_MAX_US);

/// C-PHY calibration ready budget
pub const CALIBRATION_POLL: PollConfig =
    PollConfig::new(10, POLL_INTERVAL_MIN_US, POLL_INTERVAL_MAX_US);

/// D-PHY power-on-reset budget (V4 generation)
pub const POWER_ON_RESET_POLL: PollConfig =
    PollConfig::new(10, POLL_INTERVAL_MIN_US, POLL_INTERVAL_MAX_US);

/// Stop-state budget after V4 calibration
pub const STOP_STATE_POLL: PollConfig =
    PollConfig::new(10, POLL_INTERVAL_MIN_US, POLL_INTERVAL_MAX_US);

/// Settle time after asserting reset before dropping the power domain
pub const STANDBY_SETTLE_US: u32 = 100;

/// Pause between teardown and re-bring-up when recovering from a fault
pub const FAULT_RESTART_PAUSE_US: u32 = 1_000;

// =============================================================================
// Link Defaults
// =============================================================================

/// Default per-lane C-PHY receive equalization
pub const DEFAULT_HS_RECEIVE_EQ: u16 = 0x4;

/// Fixed link rate of the X5H camera path in bits per second
pub const X5H_LINK_RATE_BPS: u64 = 7_423_000_000;

/// Number of VC/DT selector slots in VCDT + VCDT2
pub const VCDT_SLOTS: u8 = 4;

/// Maximum data lanes / trios the receiver has
pub const MAX_LANES: usize = 4;

/// Number of C-PHY trios
pub const NUM_TRIOS: usize = 3;
