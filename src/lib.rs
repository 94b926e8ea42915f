//! R-Car CSI-2 Receiver Driver
//!
//! A `no_std`, `no_alloc` bring-up and fault-recovery controller for the
//! MIPI CSI-2 receivers of Renesas R-Car SoCs and their D-PHY / C-PHY.
//!
//! The crate turns a static link description (bus type, data lanes, lane
//! swap, equalization) plus what the upstream sensor reports at stream
//! start (pixel rate, active lanes) into the register sequence that brings
//! the receiver out of reset, calibrates the PHY and confirms the lanes
//! are idle before the sensor starts transmitting.
//!
//! # Architecture
//!
//! The driver is organized into layers:
//!
//! 1. **Receiver Layer** ([`driver`]): attach-time configuration, stream
//!    reference counting, the PHY state machine and the interrupt handler
//! 2. **PHY Layer** ([`phy`]): one bring-up algorithm per receiver family
//! 3. **Variant Layer** ([`variant`], [`tuning`]): per-SoC profiles and the
//!    speed-keyed tuning tables they reference
//! 4. **HAL Layer** ([`hal`]): register access, bounded polling, power
//!    control and the PHY test interface
//! 5. **Sync Layer** ([`sync`]): the lock serializing stream transitions
//!    and the interrupt-to-worker fault handoff
//!
//! # Supported Receivers
//!
//! | Family | SoCs | PHY |
//! |--------|------|-----|
//! | Gen3 | H3, M3-W, M3-N, V3M, V3H, E3 | D-PHY |
//! | V3U | V3U | D-PHY |
//! | V4H | V4H | D-PHY, C-PHY |
//! | V4M | V4M | D-PHY |
//! | X5H | X5H | D-PHY, C-PHY (fixed link rate) |
//!
//! # Features
//!
//! - `defmt`: Log through defmt and derive `defmt::Format` for public types
//! - `log`: Log through the `log` facade (ignored when `defmt` is enabled)
//!
//! # Example
//!
//! ```ignore
//! use rcar_csi2::{Csi2Receiver, DeviceConfig, Mmio, SharedReceiver, Topology};
//!
//! let regs = unsafe { Mmio::new(0xfe50_0000) };
//! let config = DeviceConfig::new("renesas,r8a779g0-csi2", Topology::dphy(&[1, 2, 3, 4]));
//!
//! let mut csi = Csi2Receiver::new(config, regs, delay, power)?;
//! csi.bind_source(sensor);
//!
//! let csi = SharedReceiver::new(csi);
//! csi.stream_enable()?;
//!
//! // interrupt vector
//! if csi.on_interrupt() == IrqReturn::WakeThread {
//!     // schedule csi.service_fault() outside interrupt context
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// Logging macros must be declared before every module that uses them
#[macro_use]
mod fmt;

// =============================================================================
// Modules
// =============================================================================

pub mod constants;
pub mod driver;
pub mod error;
pub mod hal;
pub mod phy;
pub mod sync;
pub mod tuning;
pub mod variant;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{BusType, DeviceConfig, LinkTopology, PinSwapOrder, Topology};
pub use driver::format::{Field, FrameFormat};
pub use driver::interrupt::{InterruptStatus, IrqReturn};
pub use driver::lanes::LinkConfig;
pub use driver::receiver::{Csi2Receiver, PhyState};
pub use driver::source::{MbusConfig, MbusType, VideoSource};
pub use error::{ConfigError, ConfigResult, Error, Result, UpstreamError, WaitPoint};
pub use hal::power::{AlwaysOn, PowerControl};
pub use hal::regs::{Mmio, RegisterAccess};
pub use sync::{FaultLatch, SharedReceiver};
pub use variant::{BringupAlgorithm, Capabilities, VariantProfile};
