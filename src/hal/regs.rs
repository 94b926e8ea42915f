//! Register access primitives
//!
//! The bring-up code never touches memory directly; it goes through
//! [`RegisterAccess`], which is implemented by [`Mmio`] for real hardware
//! and by a recording mock in host tests.
//!
//! The receiver exposes two widths at different offsets of one window:
//! 32-bit link/control registers and 16-bit PPI/core PHY registers.

use crate::internal::register::{field_prep, read_reg, read_reg16, write_reg, write_reg16};

// =============================================================================
// RegisterAccess Trait
// =============================================================================

/// Read, write and masked-modify over the receiver register window
///
/// Offsets are byte offsets from the start of the window. Methods take
/// `&self` so a handle can be shared by the first-level interrupt handler
/// while the device lock owns another handle to the same window.
pub trait RegisterAccess {
    /// Read a 32-bit register
    fn read32(&self, offset: u32) -> u32;

    /// Write a 32-bit register
    fn write32(&self, offset: u32, value: u32);

    /// Read a 16-bit register
    fn read16(&self, offset: u32) -> u16;

    /// Write a 16-bit register
    fn write16(&self, offset: u32, value: u16);

    /// Replace the bits selected by `mask` with the same bits of `data`
    #[inline]
    fn modify32(&self, offset: u32, data: u32, mask: u32) {
        let value = self.read32(offset);
        self.write32(offset, (value & !mask) | (data & mask));
    }

    /// Replace the bits selected by `mask` with the same bits of `data`
    #[inline]
    fn modify16(&self, offset: u32, data: u16, mask: u16) {
        let value = self.read16(offset);
        self.write16(offset, (value & !mask) | (data & mask));
    }

    /// Write `value` into the contiguous field described by `mask`
    #[inline]
    fn update_field32(&self, offset: u32, mask: u32, value: u32) {
        self.modify32(offset, field_prep(mask, value), mask);
    }

    /// OR `bits` into a 32-bit register
    #[inline]
    fn set_bits32(&self, offset: u32, bits: u32) {
        let value = self.read32(offset);
        self.write32(offset, value | bits);
    }

    /// Clear `bits` in a 32-bit register
    #[inline]
    fn clear_bits32(&self, offset: u32, bits: u32) {
        let value = self.read32(offset);
        self.write32(offset, value & !bits);
    }
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for &R {
    #[inline]
    fn read32(&self, offset: u32) -> u32 {
        (**self).read32(offset)
    }

    #[inline]
    fn write32(&self, offset: u32, value: u32) {
        (**self).write32(offset, value);
    }

    #[inline]
    fn read16(&self, offset: u32) -> u16 {
        (**self).read16(offset)
    }

    #[inline]
    fn write16(&self, offset: u32, value: u16) {
        (**self).write16(offset, value);
    }
}

// =============================================================================
// Memory-mapped Implementation
// =============================================================================

/// Volatile access to a memory-mapped receiver window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Wrap the register window starting at `base`
    ///
    /// # Safety
    /// `base` must be the mapped address of a CSI-2 receiver register window
    /// that stays valid for the lifetime of every copy of this handle, and
    /// every offset the driver uses must fall inside that window.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the window
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read32(&self, offset: u32) -> u32 {
        // SAFETY: window validity is the contract of `Mmio::new`
        unsafe { read_reg(self.base + offset as usize) }
    }

    #[inline(always)]
    fn write32(&self, offset: u32, value: u32) {
        // SAFETY: window validity is the contract of `Mmio::new`
        unsafe { write_reg(self.base + offset as usize, value) }
    }

    #[inline(always)]
    fn read16(&self, offset: u32) -> u16 {
        // SAFETY: window validity is the contract of `Mmio::new`
        unsafe { read_reg16(self.base + offset as usize) }
    }

    #[inline(always)]
    fn write16(&self, offset: u32, value: u16) {
        // SAFETY: window validity is the contract of `Mmio::new`
        unsafe { write_reg16(self.base + offset as usize, value) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockRegisters;

    #[test]
    fn modify32_only_touches_masked_bits() {
        let regs = MockRegisters::new();
        regs.set_register(0x100, 0xffff_0000);

        regs.modify32(0x100, 0x0000_1234, 0x0000_ff00);

        assert_eq!(regs.get_register(0x100), 0xffff_1200);
    }

    #[test]
    fn modify16_masks_data() {
        let regs = MockRegisters::new();
        regs.set_register16(0x22100, 0x0044);

        // Data bits outside the mask are dropped
        regs.modify16(0x22100, 0xffff, 0x0e00);

        assert_eq!(regs.get_register16(0x22100), 0x0e44);
    }

    #[test]
    fn update_field32_shifts_value() {
        let regs = MockRegisters::new();
        regs.update_field32(0x100, 0x3 << 16, 1);
        assert_eq!(regs.get_register(0x100), 1 << 16);
    }

    #[test]
    fn set_and_clear_bits() {
        let regs = MockRegisters::new();
        regs.set_bits32(0x2004, 0x17);
        regs.clear_bits32(0x2004, 0x07);
        assert_eq!(regs.get_register(0x2004), 0x10);
    }

    #[test]
    fn reference_forwards_to_inner() {
        let regs = MockRegisters::new();
        let handle = &regs;
        handle.write32(0x30, 0x1234);
        assert_eq!(regs.get_register(0x30), 0x1234);
    }

    #[test]
    fn mmio_reads_and_writes_backing_memory() {
        let mut window = [0u32; 4];
        let base = window.as_mut_ptr() as usize;
        // SAFETY: `window` outlives `mmio` and all offsets stay within it
        let mmio = unsafe { Mmio::new(base) };

        mmio.write32(0x8, 0xdead_beef);
        assert_eq!(mmio.read32(0x8), 0xdead_beef);

        mmio.write16(0x4, 0x1234);
        assert_eq!(mmio.read16(0x4), 0x1234);
        assert_eq!(mmio.base(), base);
    }
}
