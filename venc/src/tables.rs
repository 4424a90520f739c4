//! Fixed register sequences for formats whose encoder setup isn't derived
//! from the timing descriptor.

use crate::registers::RegValue;
use crate::registers::Register::*;

const fn r(reg: crate::registers::Register, value: u32) -> RegValue {
    RegValue::new(reg, value)
}

/// ENCP setup for 1920x1080i at 60Hz field rate (and the 120Hz variant).
///
/// The interlaced calculator refines the DE and DVI sync registers on top of
/// this and reads back `ENCP_VIDEO_HAVON_BEGIN`, `ENCP_VIDEO_VAVON_BLINE` and
/// `ENCP_VIDEO_OFLD_VOAV_OFST` from it, so those must stay in the table.
pub static TVREGS_1080I60: [RegValue; 34] = [
    r(ENCP_VIDEO_EN, 0),
    r(ENCI_VIDEO_EN, 0),
    r(VENC_DVI_SETTING, 0x2029),
    r(ENCP_VIDEO_MAX_PXCNT, 2199),
    r(ENCP_VIDEO_MAX_LNCNT, 1124),
    r(ENCP_VIDEO_HSPULS_BEGIN, 88),
    r(ENCP_VIDEO_HSPULS_END, 264),
    r(ENCP_VIDEO_HSPULS_SWITCH, 88),
    r(ENCP_VIDEO_HAVON_BEGIN, 192),
    r(ENCP_VIDEO_HAVON_END, 2111),
    r(ENCP_VIDEO_HSO_BEGIN, 0),
    r(ENCP_VIDEO_HSO_END, 44),
    r(ENCP_VIDEO_EQPULS_BEGIN, 2288),
    r(ENCP_VIDEO_EQPULS_END, 2464),
    r(ENCP_VIDEO_VSPULS_BEGIN, 440),
    r(ENCP_VIDEO_VSPULS_END, 2200),
    r(ENCP_VIDEO_VSPULS_BLINE, 0),
    r(ENCP_VIDEO_VSPULS_ELINE, 4),
    r(ENCP_VIDEO_EQPULS_BLINE, 0),
    r(ENCP_VIDEO_EQPULS_ELINE, 4),
    r(ENCP_VIDEO_VAVON_BLINE, 20),
    r(ENCP_VIDEO_VAVON_ELINE, 559),
    r(ENCP_VIDEO_VSO_BEGIN, 30),
    r(ENCP_VIDEO_VSO_END, 50),
    r(ENCP_VIDEO_VSO_BLINE, 0),
    r(ENCP_VIDEO_VSO_ELINE, 5),
    r(ENCP_VIDEO_YFP1_HTIME, 516),
    r(ENCP_VIDEO_YFP2_HTIME, 4355),
    r(VENC_VIDEO_PROG_MODE, 0x100),
    r(ENCP_VIDEO_OFLD_VOAV_OFST, 0x11),
    r(ENCP_VIDEO_MODE, 0x5ffc),
    r(ENCP_VIDEO_MODE_ADV, 0x0018),
    r(ENCP_VIDEO_SYNC_MODE, 0x207),
    r(ENCI_VIDEO_EN, 0),
];

/// ENCP setup for 1920x1080i at 50Hz field rate (and the 100Hz variant).
pub static TVREGS_1080I50: [RegValue; 30] = [
    r(ENCP_VIDEO_EN, 0),
    r(ENCI_VIDEO_EN, 0),
    r(VENC_DVI_SETTING, 0x202d),
    r(ENCP_VIDEO_MAX_PXCNT, 2639),
    r(ENCP_VIDEO_MAX_LNCNT, 1124),
    r(ENCP_VIDEO_HSPULS_BEGIN, 88),
    r(ENCP_VIDEO_HSPULS_END, 264),
    r(ENCP_VIDEO_HSPULS_SWITCH, 88),
    r(ENCP_VIDEO_HAVON_BEGIN, 192),
    r(ENCP_VIDEO_HAVON_END, 2111),
    r(ENCP_VIDEO_HSO_BEGIN, 0),
    r(ENCP_VIDEO_HSO_END, 44),
    r(ENCP_VIDEO_VSPULS_BEGIN, 440),
    r(ENCP_VIDEO_VSPULS_END, 2200),
    r(ENCP_VIDEO_VSPULS_BLINE, 0),
    r(ENCP_VIDEO_VSPULS_ELINE, 4),
    r(ENCP_VIDEO_VAVON_BLINE, 20),
    r(ENCP_VIDEO_VAVON_ELINE, 559),
    r(ENCP_VIDEO_VSO_BEGIN, 30),
    r(ENCP_VIDEO_VSO_END, 50),
    r(ENCP_VIDEO_VSO_BLINE, 0),
    r(ENCP_VIDEO_VSO_ELINE, 5),
    r(ENCP_VIDEO_YFP1_HTIME, 526),
    r(ENCP_VIDEO_YFP2_HTIME, 4365),
    r(VENC_VIDEO_PROG_MODE, 0x100),
    r(ENCP_VIDEO_OFLD_VOAV_OFST, 0x11),
    r(ENCP_VIDEO_MODE, 0x5ffc),
    r(ENCP_VIDEO_MODE_ADV, 0x0018),
    r(ENCP_VIDEO_SYNC_MODE, 0x7),
    r(ENCI_VIDEO_EN, 0),
];

// ENCI horizontal sync positions for 480i are given in the encoder's own
// pixel count, then pulled in by the two clocks of YC delay.
const ENCI_480I_HSO_BEGIN: u32 = 11;
const ENCI_480I_HSO_END: u32 = 31;
const ENCI_480I_YC_DELAY_CLOCKS: u32 = 2;

const ENCI_480I_PIXEL_START: u32 = 233;
const ENCI_480I_LINE_TOP_START: u32 = 17;
const ENCI_480I_LINE_BOT_START: u32 = 18;
const ENCI_576I_PIXEL_START: u32 = 267;
const ENCI_576I_LINE_TOP_START: u32 = 21;
const ENCI_576I_LINE_BOT_START: u32 = 22;

// The encoder runs at twice the 720-pixel sample rate.
const ENCI_ACTIVE_PIXELS: u32 = 720 * 2;
const ENCI_480I_FIELD_LINES: u32 = 240;
const ENCI_576I_FIELD_LINES: u32 = 288;

/// Enables the VFIFO2VD fetch with the fixed request delay of 0x4e.
const ENCI_VFIFO2VD_ENABLE: u32 = (0x4e << 8) | 1;

/// Field/line reset value written while the 480i encoder runs normally.
pub const ENCI_FLDLN_RST_RUN: u32 = 0x0f05;

/// Field/line reset value that resynchronizes the 480i field counter.
pub const ENCI_FLDLN_RST_RESYNC: u32 = 0xcf05;

/// ENCI setup for the 480i family, up to (but not including) the field
/// counter resynchronization that must follow it.
pub static TVREGS_480I: [RegValue; 15] = [
    r(VENC_SYNC_ROUTE, 0),
    // hsync/vsync come from the interlaced encoder
    r(VENC_VIDEO_PROG_MODE, 0xf0),
    // both Y and C delayed by two clocks
    r(ENCI_YC_DELAY, 0x22),
    r(ENCI_VFIFO2VD_PIXEL_START, ENCI_480I_PIXEL_START),
    r(ENCI_VFIFO2VD_PIXEL_END, ENCI_480I_PIXEL_START + ENCI_ACTIVE_PIXELS),
    r(ENCI_VFIFO2VD_LINE_TOP_START, ENCI_480I_LINE_TOP_START),
    r(
        ENCI_VFIFO2VD_LINE_TOP_END,
        ENCI_480I_LINE_TOP_START + ENCI_480I_FIELD_LINES,
    ),
    r(ENCI_VFIFO2VD_LINE_BOT_START, ENCI_480I_LINE_BOT_START),
    r(
        ENCI_VFIFO2VD_LINE_BOT_END,
        ENCI_480I_LINE_BOT_START + ENCI_480I_FIELD_LINES,
    ),
    r(ENCI_VFIFO2VD_CTL, ENCI_VFIFO2VD_ENABLE),
    r(ENCI_DBG_FLDLN_RST, ENCI_FLDLN_RST_RUN),
    r(ENCI_SYNC_VSO_EVNLN, 0x0508),
    r(ENCI_SYNC_VSO_ODDLN, 0x0508),
    r(
        ENCI_SYNC_HSO_BEGIN,
        ENCI_480I_HSO_BEGIN - ENCI_480I_YC_DELAY_CLOCKS,
    ),
    r(ENCI_SYNC_HSO_END, ENCI_480I_HSO_END - ENCI_480I_YC_DELAY_CLOCKS),
];

/// ENCI setup for 576i, which is also the default for any VIC outside the
/// 480i family.
pub static TVREGS_576I: [RegValue; 22] = [
    r(ENCI_CFILT_CTRL, 0x0800),
    r(ENCI_CFILT_CTRL2, 0x0010),
    r(ENCI_SYNC_HSO_BEGIN, 1),
    r(ENCI_SYNC_HSO_END, 127),
    r(ENCI_SYNC_VSO_EVNLN, (0 << 8) | 3),
    r(ENCI_SYNC_VSO_ODDLN, (0 << 8) | 3),
    // horizontal offset after HSI in slave mode
    r(ENCI_SYNC_HOFFST, 0x16),
    r(ENCI_MACV_MAX_AMP, 0x8107),
    r(VENC_VIDEO_PROG_MODE, 0xff),
    // PAL
    r(ENCI_VIDEO_MODE, 0x13),
    // high bandwidth for CBW and YBW
    r(ENCI_VIDEO_MODE_ADV, 0x26),
    r(ENCI_VIDEO_SCH, 0x28),
    // master mode
    r(ENCI_SYNC_MODE, 0x07),
    r(ENCI_YC_DELAY, 0x341),
    r(ENCI_VFIFO2VD_PIXEL_START, ENCI_576I_PIXEL_START),
    r(ENCI_VFIFO2VD_PIXEL_END, ENCI_576I_PIXEL_START + ENCI_ACTIVE_PIXELS),
    r(ENCI_VFIFO2VD_LINE_TOP_START, ENCI_576I_LINE_TOP_START),
    r(
        ENCI_VFIFO2VD_LINE_TOP_END,
        ENCI_576I_LINE_TOP_START + ENCI_576I_FIELD_LINES,
    ),
    r(ENCI_VFIFO2VD_LINE_BOT_START, ENCI_576I_LINE_BOT_START),
    r(
        ENCI_VFIFO2VD_LINE_BOT_END,
        ENCI_576I_LINE_BOT_START + ENCI_576I_FIELD_LINES,
    ),
    r(ENCI_VFIFO2VD_CTL, ENCI_VFIFO2VD_ENABLE),
    // starts the encoder
    r(ENCI_DBG_PX_RST, 0x0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::Register;

    fn value_of(table: &[RegValue], reg: Register) -> Option<u32> {
        table.iter().rev().find(|e| e.reg == reg).map(|e| e.value)
    }

    #[test]
    fn test_1080i_totals_match_formats() {
        assert_eq!(value_of(&TVREGS_1080I60, ENCP_VIDEO_MAX_PXCNT), Some(2199));
        assert_eq!(value_of(&TVREGS_1080I50, ENCP_VIDEO_MAX_PXCNT), Some(2639));
        assert_eq!(value_of(&TVREGS_1080I60, ENCP_VIDEO_MAX_LNCNT), Some(1124));
        assert_eq!(value_of(&TVREGS_1080I50, ENCP_VIDEO_MAX_LNCNT), Some(1124));
    }

    #[test]
    fn test_1080i_tables_leave_encoders_disabled() {
        for table in [&TVREGS_1080I60[..], &TVREGS_1080I50[..]].iter() {
            assert_eq!(table.first().map(|e| e.reg), Some(ENCP_VIDEO_EN));
            assert_eq!(value_of(table, ENCP_VIDEO_EN), Some(0));
            assert_eq!(table.last().map(|e| e.reg), Some(ENCI_VIDEO_EN));
            assert_eq!(value_of(table, ENCI_VIDEO_EN), Some(0));
        }
    }

    #[test]
    fn test_480i_values() {
        assert_eq!(value_of(&TVREGS_480I, ENCI_SYNC_HSO_BEGIN), Some(9));
        assert_eq!(value_of(&TVREGS_480I, ENCI_SYNC_HSO_END), Some(29));
        assert_eq!(value_of(&TVREGS_480I, ENCI_VFIFO2VD_PIXEL_START), Some(233));
        assert_eq!(value_of(&TVREGS_480I, ENCI_VFIFO2VD_PIXEL_END), Some(1673));
        assert_eq!(value_of(&TVREGS_480I, ENCI_VFIFO2VD_LINE_TOP_END), Some(257));
        assert_eq!(value_of(&TVREGS_480I, ENCI_VFIFO2VD_CTL), Some(0x4e01));
    }

    #[test]
    fn test_576i_values() {
        assert_eq!(value_of(&TVREGS_576I, ENCI_VFIFO2VD_PIXEL_END), Some(1707));
        assert_eq!(value_of(&TVREGS_576I, ENCI_VFIFO2VD_LINE_BOT_END), Some(310));
        assert_eq!(value_of(&TVREGS_576I, ENCI_SYNC_VSO_EVNLN), Some(3));
        assert_eq!(TVREGS_576I.last(), Some(&RegValue::new(ENCI_DBG_PX_RST, 0)));
    }
}
