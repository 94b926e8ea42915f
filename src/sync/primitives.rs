//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives shared by the first-level interrupt handler and the
//! receiver worker.

use core::cell::RefCell;
use critical_section::Mutex;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

// SAFETY: CriticalSectionCell uses critical sections to protect all access.
unsafe impl<T> Sync for CriticalSectionCell<T> {}

/// Pending transfer fault, raised from interrupt context
///
/// Several faults raised before the worker runs collapse into one restart.
pub struct FaultLatch {
    raised: CriticalSectionCell<u32>,
}

impl FaultLatch {
    /// Create a cleared latch (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            raised: CriticalSectionCell::new(0),
        }
    }

    /// Record a fault
    #[inline]
    pub fn raise(&self) {
        self.raised.with(|count| *count = count.saturating_add(1));
    }

    /// Consume the latch, returning how many faults were raised since the
    /// last call
    #[inline]
    pub fn take(&self) -> u32 {
        self.raised.with(core::mem::take)
    }

    /// Check if a fault is waiting to be serviced
    pub fn is_raised(&self) -> bool {
        self.raised.with(|count| *count != 0)
    }
}

impl Default for FaultLatch {
    fn default() -> Self {
        Self::new()
    }
}
