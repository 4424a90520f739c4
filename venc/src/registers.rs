use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Represents a register in the VPU register space that holds the video
/// encoders, identified by its register number.
///
/// The raw value `0xffff` is not a register.
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum Register {
    ENCI_VIDEO_MODE = 0x1b00,
    ENCI_VIDEO_MODE_ADV = 0x1b01,
    ENCI_VIDEO_SCH = 0x1b07,
    ENCI_SYNC_MODE = 0x1b08,
    ENCI_SYNC_HSO_BEGIN = 0x1b0a,
    ENCI_SYNC_HSO_END = 0x1b0b,
    ENCI_SYNC_VSO_EVNLN = 0x1b0e,
    ENCI_SYNC_VSO_ODDLN = 0x1b0f,
    ENCI_SYNC_HOFFST = 0x1b10,
    ENCI_DBG_PX_RST = 0x1b48,
    ENCI_DBG_FLDLN_RST = 0x1b49,
    ENCI_MACV_MAX_AMP = 0x1b4c,
    ENCI_CFILT_CTRL = 0x1b4e,
    ENCI_CFILT_CTRL2 = 0x1b4f,
    ENCI_YC_DELAY = 0x1b50,
    ENCI_VIDEO_EN = 0x1b57,
    ENCI_VFIFO2VD_CTL = 0x1b58,
    ENCI_VFIFO2VD_PIXEL_START = 0x1b59,
    ENCI_VFIFO2VD_PIXEL_END = 0x1b5a,
    ENCI_VFIFO2VD_LINE_TOP_START = 0x1b5b,
    ENCI_VFIFO2VD_LINE_TOP_END = 0x1b5c,
    ENCI_VFIFO2VD_LINE_BOT_START = 0x1b5d,
    ENCI_VFIFO2VD_LINE_BOT_END = 0x1b5e,
    VENC_DVI_SETTING = 0x1b62,
    VENC_VIDEO_PROG_MODE = 0x1b68,
    VENC_SYNC_ROUTE = 0x1b6a,
    ENCP_VIDEO_EN = 0x1b80,
    ENCP_VIDEO_SYNC_MODE = 0x1b81,
    ENCP_VIDEO_MODE = 0x1b8d,
    ENCP_VIDEO_MODE_ADV = 0x1b8e,
    ENCP_VIDEO_YFP1_HTIME = 0x1b94,
    ENCP_VIDEO_YFP2_HTIME = 0x1b95,
    ENCP_VIDEO_MAX_PXCNT = 0x1b97,
    ENCP_VIDEO_HSPULS_BEGIN = 0x1b98,
    ENCP_VIDEO_HSPULS_END = 0x1b99,
    ENCP_VIDEO_HSPULS_SWITCH = 0x1b9a,
    ENCP_VIDEO_VSPULS_BEGIN = 0x1b9b,
    ENCP_VIDEO_VSPULS_END = 0x1b9c,
    ENCP_VIDEO_VSPULS_BLINE = 0x1b9d,
    ENCP_VIDEO_VSPULS_ELINE = 0x1b9e,
    ENCP_VIDEO_EQPULS_BEGIN = 0x1b9f,
    ENCP_VIDEO_EQPULS_END = 0x1ba0,
    ENCP_VIDEO_EQPULS_BLINE = 0x1ba1,
    ENCP_VIDEO_EQPULS_ELINE = 0x1ba2,
    ENCP_VIDEO_HAVON_END = 0x1ba3,
    ENCP_VIDEO_HAVON_BEGIN = 0x1ba4,
    ENCP_VIDEO_VAVON_BLINE = 0x1ba6,
    ENCP_VIDEO_HSO_BEGIN = 0x1ba7,
    ENCP_VIDEO_HSO_END = 0x1ba8,
    ENCP_VIDEO_VSO_BEGIN = 0x1ba9,
    ENCP_VIDEO_VSO_END = 0x1baa,
    ENCP_VIDEO_VSO_BLINE = 0x1bab,
    ENCP_VIDEO_VSO_ELINE = 0x1bac,
    ENCP_VIDEO_MAX_LNCNT = 0x1bae,
    ENCP_VIDEO_VAVON_ELINE = 0x1baf,
    ENCP_VIDEO_OFLD_VOAV_OFST = 0x1bba,
    ENCP_DVI_HSO_BEGIN = 0x1c30,
    ENCP_DVI_HSO_END = 0x1c31,
    ENCP_DVI_VSO_BLINE_EVN = 0x1c32,
    ENCP_DVI_VSO_BLINE_ODD = 0x1c33,
    ENCP_DVI_VSO_ELINE_EVN = 0x1c34,
    ENCP_DVI_VSO_ELINE_ODD = 0x1c35,
    ENCP_DVI_VSO_BEGIN_EVN = 0x1c36,
    ENCP_DVI_VSO_BEGIN_ODD = 0x1c37,
    ENCP_DVI_VSO_END_EVN = 0x1c38,
    ENCP_DVI_VSO_END_ODD = 0x1c39,
    ENCP_DE_H_BEGIN = 0x1c3a,
    ENCP_DE_H_END = 0x1c3b,
    ENCP_DE_V_BEGIN_EVEN = 0x1c3c,
    ENCP_DE_V_END_EVEN = 0x1c3d,
    ENCP_DE_V_BEGIN_ODD = 0x1c3e,
    ENCP_DE_V_END_ODD = 0x1c3f,
    VPU_HDMI_SETTING = 0x271b,
}

impl Register {
    /// The lowest-numbered register in the enumeration.
    pub const FIRST: Self = Self::ENCI_VIDEO_MODE;

    /// The highest-numbered register in the enumeration.
    pub const LAST: Self = Self::VPU_HDMI_SETTING;

    /// The number of `u32` slots needed to hold every register when the
    /// register file is modelled as a dense array starting at `FIRST`.
    pub const FILE_LEN: usize = (Self::LAST as usize) - (Self::FIRST as usize) + 1;

    /// Returns the register number, as used by the hardware documentation.
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Returns the byte offset of the register from the start of the VPU
    /// register window. Registers are 32 bits wide and word-addressed.
    pub const fn byte_offset(self) -> usize {
        (self as usize) << 2
    }

    /// Returns the index of the register within a dense register file that
    /// starts at `Register::FIRST`.
    pub const fn index(self) -> usize {
        (self as usize) - (Self::FIRST as usize)
    }
}

/// A value to be written verbatim into a register, as one step of a fixed
/// register sequence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegValue {
    pub reg: Register,
    pub value: u32,
}

impl RegValue {
    pub const fn new(reg: Register, value: u32) -> Self {
        Self { reg, value }
    }
}
