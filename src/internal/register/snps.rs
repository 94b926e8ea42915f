//! X5H CSI-2 controller registers (independently addressed PHY, link and
//! SDI filter blocks).

/// PHY/controller power-up
pub const PWR_UP: u32 = 0xc;
/// Power-up enable
pub const PWR_UP_EN: u32 = 1 << 0;

/// PHY mode configuration
pub const PHY_MODE_CFG: u32 = 0x100;
/// PPI data path width
pub const PHY_MODE_CFG_PPI_WIDTH: u32 = 0x3 << 16;
/// 0 = D-PHY, 1 = C-PHY
pub const PHY_MODE_CFG_PHY_MODE: u32 = 1 << 0;

/// Deskew calibration configuration
pub const PHY_DESKEW_CFG: u32 = 0x104;
/// Deskew cycle count
pub const PHY_DESKEW_CFG_CYCLES: u32 = 0xff;

/// Streaming-direction interface (SDI) configuration
pub const SDI_CFG: u32 = 0x400;
/// 0 = bypass, 1 = encode
pub const SDI_CFG_ENCODE_MODE: u32 = 1 << 1;
/// SDI enable
pub const SDI_CFG_ENABLE: u32 = 1 << 0;

/// SDI packet filter configuration
pub const SDI_FILTER_CFG: u32 = 0x404;
/// Exclude short packets from the filter
pub const SDI_FILTER_EXCLUDE_SP: u32 = 1 << 18;
/// Data type filter enable
pub const SDI_FILTER_DT_EN: u32 = 1 << 17;
/// Virtual channel filter enable
pub const SDI_FILTER_VC_EN: u32 = 1 << 16;
/// Data type to match
pub const SDI_FILTER_DT: u32 = 0x3f << 8;
/// Virtual channel to match
pub const SDI_FILTER_VC: u32 = 0x1f;

/// CSI-2 packet error interrupt unmask
pub const INT_UNMASK_CSI2: u32 = 0x59c;
/// All packet error categories: max data ids, invalid DT, CRC, invalid
/// length, header non-fatal, header fatal
pub const INT_UNMASK_CSI2_ALL: u32 = 0x3f;

/// Frame error interrupt unmask
pub const INT_UNMASK_FRAME: u32 = 0x5a0;
/// Frame sequence and boundary errors
pub const INT_UNMASK_FRAME_ALL: u32 = 0x3;

/// Line error interrupt unmask
pub const INT_UNMASK_LINE: u32 = 0x5a4;
/// Line sequence and boundary errors
pub const INT_UNMASK_LINE_ALL: u32 = 0x3;

/// PPI width code for a 8-bit PPI
pub const PPI_WIDTH_8: u32 = 0;
/// PPI width code for a 16-bit PPI
pub const PPI_WIDTH_16: u32 = 1;
