//! Core driver components for the R-Car CSI-2 receiver.
//!
//! This module contains the building blocks for describing a receiver
//! instance and driving its stream lifecycle:
//!
//! - [`config`] - Link topology, bus type and attach-time configuration
//! - [`format`] - Supported pixel codes and the negotiated frame format
//! - [`source`] - The upstream video source contract
//! - [`lanes`] - Per-stream link derivation (lane count, rate, swap)
//! - [`receiver`] - The reference-counted receiver state machine
//! - [`interrupt`] - Interrupt status and the first-level handler
//!
//! # Example
//!
//! ```ignore
//! use rcar_csi2::driver::{Csi2Receiver, DeviceConfig, Topology};
//!
//! let config = DeviceConfig::new("renesas,r8a779g0-csi2", Topology::dphy(&[1, 2, 3, 4]));
//! let mut csi = Csi2Receiver::new(config, regs, delay, power)?;
//! csi.bind_source(sensor);
//! csi.stream_enable()?;
//! ```

// Submodules
pub mod config;
pub mod format;
pub mod interrupt;
pub mod lanes;
pub mod receiver;
pub mod source;

// Re-exports for convenience
pub use config::{BusType, DeviceConfig, LinkTopology, PinSwapOrder, Topology};
pub use format::{Field, FrameFormat, media_bus};
pub use interrupt::{InterruptStatus, IrqReturn, handle_irq};
pub use lanes::LinkConfig;
pub use receiver::{Csi2Receiver, PhyState};
pub use source::{MbusConfig, MbusType, VideoSource};
