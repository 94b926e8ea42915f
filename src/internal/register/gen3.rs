//! Legacy (Gen3 / V3U) link and PHY register block.
//!
//! Also shared with later generations for the status, interrupt and
//! PHY control words they kept at the same offsets.

/// Time out enable register
pub const TREF: u32 = 0x00;
/// Time out enable
pub const TREF_TREF: u32 = 1 << 0;

/// PHY operation control register
pub const PHYCNT: u32 = 0x08;
/// PHY shutdown release
pub const PHYCNT_SHUTDOWNZ: u32 = 1 << 17;
/// PHY reset release
pub const PHYCNT_RSTZ: u32 = 1 << 16;
/// Clock lane enable
pub const PHYCNT_ENABLECLK: u32 = 1 << 4;

/// Channel data type select, channels 0 and 1
pub const VCDT: u32 = 0x10;
/// Channel data type select, channels 2 and 3
pub const VCDT2: u32 = 0x14;
/// Selector enable
pub const VCDT_VCDTN_EN: u32 = 1 << 15;
/// Data type match enable
pub const VCDT_SEL_DTN_ON: u32 = 1 << 6;

/// Virtual channel field of a VCDT slot
#[inline(always)]
pub const fn vcdt_sel_vc(n: u32) -> u32 {
    (n & 0x3) << 8
}

/// Data type field of a VCDT slot
#[inline(always)]
pub const fn vcdt_sel_dt(n: u32) -> u32 {
    n & 0x3f
}

/// Field detection control register
pub const FLD: u32 = 0x1c;
/// Field detection enable bits
pub const FLD_FLD_EN4: u32 = 1 << 3;
/// Field detection enable bits
pub const FLD_FLD_EN3: u32 = 1 << 2;
/// Field detection enable bits
pub const FLD_FLD_EN2: u32 = 1 << 1;
/// Field detection enable bits
pub const FLD_FLD_EN: u32 = 1 << 0;

/// Field number field
#[inline(always)]
pub const fn fld_num(n: u32) -> u32 {
    (n & 0xff) << 16
}

/// Detection select field
#[inline(always)]
pub const fn fld_det_sel(n: u32) -> u32 {
    (n & 0x3) << 4
}

/// Interrupt enable register
pub const INTEN: u32 = 0x30;
/// Async FIFO overflow
pub const INTEN_INT_AFIFO_OF: u32 = 1 << 27;
/// Start-of-transmission error on HS data
pub const INTEN_INT_ERRSOTHS: u32 = 1 << 4;
/// Start-of-transmission sync error on HS data
pub const INTEN_INT_ERRSOTSYNCHS: u32 = 1 << 3;

/// Interrupt status monitor register (write 1 to clear)
pub const INTSTATE: u32 = 0x38;
/// Ultra-low-power state entered
pub const INTSTATE_INT_ULPS_START: u32 = 1 << 7;
/// Ultra-low-power state left
pub const INTSTATE_INT_ULPS_END: u32 = 1 << 6;

/// Interrupt error status monitor register (write 1 to clear)
pub const INTERRSTATE: u32 = 0x3c;

/// Link operation control register
pub const LINKCNT: u32 = 0x48;
/// Monitoring enable
pub const LINKCNT_MONITOR_EN: u32 = 1 << 31;
/// Packet-active monitoring enable
pub const LINKCNT_REG_MONI_PACT_EN: u32 = 1 << 25;
/// Keep internal clock running
pub const LINKCNT_ICLK_NONSTOP: u32 = 1 << 24;

/// Lane swap register
pub const LSWAP: u32 = 0x4c;

/// Physical position field for logical lane `n`
#[inline(always)]
pub const fn lswap_lsel(lane: u32, position: u32) -> u32 {
    (position & 0x3) << (lane * 2)
}

/// PHY test interface write register
pub const PHTW: u32 = 0x50;
/// Data write enable
pub const PHTW_DWEN: u32 = 1 << 24;
/// Code write enable
pub const PHTW_CWEN: u32 = 1 << 8;

/// Test data field
#[inline(always)]
pub const fn phtw_testdin_data(n: u32) -> u32 {
    (n & 0xff) << 16
}

/// Test code field
#[inline(always)]
pub const fn phtw_testdin_code(n: u32) -> u32 {
    n & 0xff
}

/// PHY test interface clear register
pub const PHTC: u32 = 0x58;
/// Test interface clear
pub const PHTC_TESTCLR: u32 = 1 << 0;

/// PHY force RX mode register
pub const PHYFRX: u32 = 0x64;
/// Force all four data lanes into RX mode
pub const PHYFRX_FORCERX_MODE_ALL: u32 = 0xf;

/// PHY frequency control register
pub const PHYPLL: u32 = 0x68;

/// HS frequency range field
#[inline(always)]
pub const fn phypll_hsfreqrange(n: u32) -> u32 {
    n << 16
}

/// PHY clock lane monitor register
pub const PHCLM: u32 = 0x78;
/// Clock lane in stop state
pub const PHCLM_STOPSTATECKL: u32 = 1 << 0;

/// PHY data lane monitor register (one stop-state bit per lane)
pub const PHDLM: u32 = 0x7c;

/// CSI0CLK frequency configuration preset register
pub const CSI0CLKFCPR: u32 = 0x260;

/// CSI0CLK frequency range field
#[inline(always)]
pub const fn csi0clkfreqrange(n: u32) -> u32 {
    (n & 0x3f) << 16
}
