//! Synchronization between interrupt context and the receiver.
//!
//! Every register sequence of a receiver runs under one lock, polling waits
//! included. The first-level interrupt handler cannot take that lock, so it
//! only acknowledges the hardware and raises a [`FaultLatch`]; the restart
//! runs later from thread context through [`SharedReceiver::service_fault`].
//!
//! # Example
//!
//! ```ignore
//! static CSI40: SharedReceiver<Mmio, Delay, Cpg, Sensor> = /* ... */;
//!
//! // interrupt vector
//! fn csi40_irq() {
//!     if CSI40.on_interrupt() == IrqReturn::WakeThread {
//!         wake_worker();
//!     }
//! }
//!
//! // worker thread
//! loop {
//!     wait_for_wake();
//!     CSI40.service_fault();
//! }
//! ```

mod primitives;

pub use primitives::{CriticalSectionCell, FaultLatch};

mod shared;

pub use shared::SharedReceiver;
