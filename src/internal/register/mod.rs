//! Register definitions for the R-Car CSI-2 receiver
//!
//! Offsets are relative to the receiver's register window; the window base
//! is owned by [`crate::hal::regs::Mmio`]. All hardware access is volatile.
//!
//! - [`gen3`]: link/PHY control shared by Gen3, V3U and the status words
//!   later generations kept
//! - [`gen4`]: V4H / V4M link block plus the 16-bit PPI and core windows
//! - [`snps`]: X5H controller blocks

pub mod gen3;
pub mod gen4;
pub mod snps;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Read a 16-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and 2-byte aligned.
#[inline(always)]
pub unsafe fn read_reg16(addr: usize) -> u16 {
    unsafe { core::ptr::read_volatile(addr as *const u16) }
}

/// Write a 16-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and 2-byte aligned.
#[inline(always)]
pub unsafe fn write_reg16(addr: usize, value: u16) {
    unsafe { core::ptr::write_volatile(addr as *mut u16, value) }
}

/// Shift `value` into the position described by a contiguous `mask`.
#[inline(always)]
pub const fn field_prep(mask: u32, value: u32) -> u32 {
    (value << mask.trailing_zeros()) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_prep_shifts_into_mask() {
        assert_eq!(field_prep(snps::PHY_MODE_CFG_PPI_WIDTH, 1), 1 << 16);
        assert_eq!(field_prep(snps::SDI_FILTER_DT, 0x2a), 0x2a << 8);
        assert_eq!(field_prep(snps::PWR_UP_EN, 1), 1);
    }

    #[test]
    fn field_prep_truncates_to_mask() {
        assert_eq!(field_prep(snps::PHY_MODE_CFG_PPI_WIDTH, 0x7), 0x3 << 16);
    }
}
