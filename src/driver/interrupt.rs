//! Interrupt status handling for the CSI-2 receiver.
//!
//! This module provides the [`InterruptStatus`] snapshot of the interrupt
//! state and error state monitors, and [`handle_irq`], the first-level
//! handler that acknowledges them. The handler never touches the receiver
//! state; a transfer error only asks for the second-level worker to run.

use crate::hal::regs::RegisterAccess;
use crate::internal::register::gen3::{
    INTERRSTATE, INTSTATE, INTSTATE_INT_ULPS_END, INTSTATE_INT_ULPS_START,
};

// =============================================================================
// Interrupt Status
// =============================================================================

/// Snapshot of the interrupt status registers
///
/// Both registers are write-1-to-clear; writing a snapshot back with
/// [`InterruptStatus::clear`] acknowledges exactly the events it holds.
///
/// # Example
///
/// ```ignore
/// let status = InterruptStatus::read(&regs);
/// if status.has_error() {
///     // Restart the link from thread context
/// }
/// status.clear(&regs);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// Raw INTSTATE value
    pub status: u32,
    /// Raw INTERRSTATE value
    pub errors: u32,
}

impl InterruptStatus {
    /// Create from raw register values
    #[inline]
    pub const fn from_raw(status: u32, errors: u32) -> Self {
        Self { status, errors }
    }

    /// Read both status registers
    #[inline]
    pub fn read<R: RegisterAccess>(regs: &R) -> Self {
        Self::from_raw(regs.read32(INTSTATE), regs.read32(INTERRSTATE))
    }

    /// Acknowledge every event of this snapshot
    ///
    /// The error register is only written when it held something.
    #[inline]
    pub fn clear<R: RegisterAccess>(&self, regs: &R) {
        regs.write32(INTSTATE, self.status);
        if self.has_error() {
            regs.write32(INTERRSTATE, self.errors);
        }
    }

    /// No interrupt was pending on this receiver
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.status == 0
    }

    /// A transfer error was reported
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.errors != 0
    }

    /// Link entered ultra-low-power state
    #[inline]
    pub const fn ulps_start(&self) -> bool {
        self.status & INTSTATE_INT_ULPS_START != 0
    }

    /// Link left ultra-low-power state
    #[inline]
    pub const fn ulps_end(&self) -> bool {
        self.status & INTSTATE_INT_ULPS_END != 0
    }
}

// =============================================================================
// First-level Handler
// =============================================================================

/// Outcome of the first-level interrupt handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqReturn {
    /// Nothing pending on this receiver (shared line)
    Spurious,
    /// Status acknowledged, nothing else to do
    Handled,
    /// Transfer error acknowledged, the link must be restarted
    WakeThread,
}

impl IrqReturn {
    /// Convert to a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spurious => "spurious",
            Self::Handled => "handled",
            Self::WakeThread => "wake thread",
        }
    }
}

impl core::fmt::Display for IrqReturn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and acknowledge the receiver's interrupt status
///
/// Safe to call from interrupt context: only the two status registers are
/// accessed and nothing blocks.
pub fn handle_irq<R: RegisterAccess>(regs: &R) -> IrqReturn {
    let status = InterruptStatus::read(regs);
    if status.is_empty() {
        return IrqReturn::Spurious;
    }

    status.clear(regs);
    if !status.has_error() {
        return IrqReturn::Handled;
    }

    info!("Transfer error, restarting CSI-2 receiver");
    IrqReturn::WakeThread
}

// =============================================================================
// Unit Tests
// =============================================================================
