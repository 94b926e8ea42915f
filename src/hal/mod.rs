//! Hardware Abstraction Layer
//!
//! This module provides the seams between the driver and the platform:
//! register access, bounded polling, power and reset control, and the
//! PHY test interface used for analog tuning.
//!
//! # Modules
//!
//! - [`regs`]: 16/32-bit register access and the memory-mapped window
//! - [`timing`]: Bounded polling on top of `DelayNs`
//! - [`power`]: Runtime power references and the reset line
//! - [`phtw`]: PHY test interface (PHTW) code/data writes
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod phtw;
pub mod power;
pub mod regs;
pub mod timing;

// Re-export commonly used types
pub use phtw::{Phtw, PhtwPair, PhtwPort, TestInterface};
pub use power::{AlwaysOn, PowerControl};
pub use regs::{Mmio, RegisterAccess};
pub use timing::{PollConfig, wait_until};
