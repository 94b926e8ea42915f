//! Lock-protected receiver handle with interrupt-driven fault recovery.
//!
//! Provides [`SharedReceiver`], which serializes every stream transition of
//! one receiver behind a spinning mutex and hands transfer faults from
//! interrupt context to a worker through a [`FaultLatch`].

use embedded_hal::delay::DelayNs;
use spin::Mutex;

use super::primitives::FaultLatch;
use crate::driver::format::FrameFormat;
use crate::driver::interrupt::{IrqReturn, handle_irq};
use crate::driver::receiver::Csi2Receiver;
use crate::driver::source::VideoSource;
use crate::error::Result;
use crate::hal::power::PowerControl;
use crate::hal::regs::RegisterAccess;

/// Receiver shared between threads and its interrupt handler
///
/// The receiver itself lives behind a `spin::Mutex` that is held for a
/// whole start or stop sequence, polling waits included. The interrupt
/// handler works on its own copy of the register handle and never takes
/// that lock.
///
/// # Example
///
/// ```ignore
/// let shared = SharedReceiver::new(receiver);
///
/// shared.stream_enable()?;
/// shared.with(|rx| rx.state());
/// ```
pub struct SharedReceiver<R, D, P, S> {
    device: Mutex<Csi2Receiver<R, D, P, S>>,
    irq_regs: R,
    fault: FaultLatch,
}

impl<R, D, P, S> SharedReceiver<R, D, P, S>
where
    R: RegisterAccess + Clone,
    D: DelayNs,
    P: PowerControl,
    S: VideoSource,
{
    /// Wrap an attached receiver
    pub fn new(receiver: Csi2Receiver<R, D, P, S>) -> Self {
        let irq_regs = receiver.registers().clone();
        Self {
            device: Mutex::new(receiver),
            irq_regs,
            fault: FaultLatch::new(),
        }
    }

    /// Execute a closure with exclusive access to the receiver.
    ///
    /// Spins while another context holds the receiver. Must not be called
    /// from the receiver's own interrupt handler.
    #[inline]
    pub fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut Csi2Receiver<R, D, P, S>) -> T,
    {
        f(&mut self.device.lock())
    }

    /// Try to execute a closure, returning `None` if the receiver is busy.
    #[inline]
    pub fn try_with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut Csi2Receiver<R, D, P, S>) -> T,
    {
        self.device.try_lock().map(|mut rx| f(&mut rx))
    }

    /// Take a stream reference, starting the link on the first one
    pub fn stream_enable(&self) -> Result<()> {
        self.with(|rx| rx.stream_enable())
    }

    /// Drop a stream reference, stopping the link on the last one
    pub fn stream_disable(&self) {
        self.with(|rx| rx.stream_disable());
    }

    /// Store a new format, returning the one actually applied
    pub fn set_format(&self, format: FrameFormat) -> FrameFormat {
        self.with(|rx| rx.set_format(format))
    }

    /// Current format
    pub fn format(&self) -> FrameFormat {
        self.with(|rx| rx.format())
    }

    // =========================================================================
    // Fault Recovery
    // =========================================================================

    /// First-level interrupt handler
    ///
    /// Acknowledges the status registers and, on a transfer error, raises
    /// the fault latch. `WakeThread` tells the caller to schedule
    /// [`Self::service_fault`].
    pub fn on_interrupt(&self) -> IrqReturn {
        let ret = handle_irq(&self.irq_regs);
        if ret == IrqReturn::WakeThread {
            self.fault.raise();
        }
        ret
    }

    /// Second-level handler, run outside interrupt context
    ///
    /// Consumes the fault latch and restarts the link once, however many
    /// faults were raised. Returns `false` when no fault was pending.
    pub fn service_fault(&self) -> bool {
        let faults = self.fault.take();
        if faults == 0 {
            return false;
        }

        trace!("Servicing {} transfer fault(s)", faults);
        self.with(|rx| {
            if let Err(e) = rx.recover() {
                warn!("Failed to restart CSI-2 receiver: {}", e);
            }
        });
        true
    }

    /// Check if a transfer fault is waiting for [`Self::service_fault`]
    pub fn fault_pending(&self) -> bool {
        self.fault.is_raised()
    }

    /// Release the receiver
    pub fn into_inner(self) -> Csi2Receiver<R, D, P, S> {
        self.device.into_inner()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
