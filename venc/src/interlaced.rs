//! ENCP configuration for 1920x1080 interlaced formats.
//!
//! These formats start from a fixed register table and then refine the DE
//! and DVI sync registers with field-accurate values. Several of those
//! values depend on registers the table has just written, so each step
//! below reads its input back from the hardware after the table is applied,
//! and the steps run strictly in order.

use crate::error::Error;
use crate::interface::Interface;
use crate::low_level::LowLevel;
use crate::progressive::VFIFO2VD_TO_HDMI_LATENCY;
use crate::registers::RegValue;
use crate::registers::Register::*;
use crate::tables;
use crate::timing::{HdmiTiming, Vic};

/// Wraps `a` into `0..b`, assuming `a < 2 * b`.
///
/// This is a single subtraction rather than a remainder: every caller adds
/// at most one period to a value already inside the period.
pub const fn modulo(a: u32, b: u32) -> u32 {
    if a >= b {
        a - b
    } else {
        a
    }
}

/// Sign-extends a 4-bit two's complement nibble: 0 through 7 are positive,
/// 8 through 15 are -8 through -1.
pub const fn to_signed(nibble: u32) -> i32 {
    let nibble = (nibble & 0xf) as i32;
    if nibble <= 7 {
        nibble
    } else {
        nibble - 16
    }
}

/// The two families of 1080i formats the calculator handles, which differ
/// only in horizontal blanking and in the fixed table they start from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Family {
    /// VIC 5 (60Hz fields) and VIC 46 (120Hz fields).
    Hz60,
    /// VIC 20 (50Hz fields) and VIC 40 (100Hz fields).
    Hz50,
}

impl Family {
    /// The family for one of the four 1080i VICs, or `None` for any other.
    pub fn from_vic(vic: Vic) -> Option<Self> {
        match vic {
            Vic::VIC_1920X1080I60 | Vic::VIC_1920X1080I120 => Some(Self::Hz60),
            Vic::VIC_1920X1080I50 | Vic::VIC_1920X1080I100 => Some(Self::Hz50),
            _ => None,
        }
    }

    /// The fixed register table applied before the field calculations.
    pub fn table(self) -> &'static [RegValue] {
        match self {
            Self::Hz60 => &tables::TVREGS_1080I60,
            Self::Hz50 => &tables::TVREGS_1080I50,
        }
    }

    pub const fn geometry(self) -> Geometry {
        let front_porch = match self {
            Self::Hz60 => 88,
            Self::Hz50 => 528,
        };
        Geometry {
            interlace: 1,
            pixel_repeat_venc: 0,
            pixel_repeat_hdmi: 0,
            active_pixels: 1920,
            active_lines: 1080 / 2,
            lines_f0: 562,
            lines_f1: 563,
            front_porch,
            hsync_pixels: 44,
            back_porch: 148,
            eof_lines: 2,
            vsync_lines: 5,
            sof_lines: 15,
        }
    }
}

/// Format constants for one 1080i variant, in HDMI pixels and field lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Geometry {
    /// 1 for interlaced, 0 for progressive.
    pub interlace: u32,
    pub pixel_repeat_venc: u32,
    pub pixel_repeat_hdmi: u32,
    pub active_pixels: u32,
    /// Active lines per field.
    pub active_lines: u32,
    pub lines_f0: u32,
    pub lines_f1: u32,
    pub front_porch: u32,
    pub hsync_pixels: u32,
    pub back_porch: u32,
    pub eof_lines: u32,
    pub vsync_lines: u32,
    pub sof_lines: u32,
}

impl Geometry {
    pub const fn total_pixels(&self) -> u32 {
        self.front_porch + self.hsync_pixels + self.back_porch + self.active_pixels
    }

    pub const fn total_lines(&self) -> u32 {
        self.lines_f0 + self.lines_f1 * self.interlace
    }

    /// Converts a count of HDMI pixels into encoder pixels, which differ
    /// when the two sides use different pixel repetition.
    pub const fn to_venc(&self, hdmi_pixels: u32) -> u32 {
        (hdmi_pixels / (1 + self.pixel_repeat_hdmi)) * (1 + self.pixel_repeat_venc)
    }

    pub const fn is_interlaced(&self) -> bool {
        self.interlace != 0
    }

    pub const fn venc(&self) -> VencPixels {
        VencPixels {
            total: self.to_venc(self.total_pixels()),
            active: self.to_venc(self.active_pixels),
            front_porch: self.to_venc(self.front_porch),
            hsync: self.to_venc(self.hsync_pixels),
        }
    }
}

/// Horizontal counts in encoder pixels. All horizontal wrapping is done
/// modulo `total`, never a fixed line length.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VencPixels {
    pub total: u32,
    pub active: u32,
    pub front_porch: u32,
    pub hsync: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Span {
    pub begin: u32,
    pub end: u32,
}

/// Horizontal sync position, plus whether placing it pushed the pulse onto
/// the next line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HSync {
    pub begin: u32,
    pub end: u32,
    /// 1 when the sync pulse starts on the line after DE ends.
    pub vs_adjust: u32,
}

/// Vertical sync lines for one field, and the pixel within the line where
/// the pulse starts and ends.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VSync {
    pub bline: u32,
    pub eline: u32,
    pub begin: u32,
}

/// Horizontal DE window, from the active-video start the table programmed.
/// `havon_begin` is `ENCP_VIDEO_HAVON_BEGIN` as read back from the encoder.
///
/// Values read back from the encoder are never range checked, so the steps
/// below all use wrapping `u32` arithmetic like the registers themselves.
pub const fn de_horizontal(px: &VencPixels, havon_begin: u32) -> Span {
    let begin = modulo(havon_begin.wrapping_add(VFIFO2VD_TO_HDMI_LATENCY), px.total);
    Span {
        begin,
        end: modulo(begin.wrapping_add(px.active), px.total),
    }
}

/// Even field DE lines. `vavon_bline` is `ENCP_VIDEO_VAVON_BLINE` as read
/// back from the encoder.
pub const fn de_vertical_even(g: &Geometry, vavon_bline: u32) -> Span {
    Span {
        begin: vavon_bline,
        end: vavon_bline.wrapping_add(g.active_lines),
    }
}

/// Odd field DE lines, half a frame after the even field plus the signed
/// field offset in bits 4 to 7 of `ENCP_VIDEO_OFLD_VOAV_OFST`.
pub const fn de_vertical_odd(g: &Geometry, voav_ofst: u32, de_v_begin_even: u32) -> Span {
    let offset = to_signed((voav_ofst & 0xf0) >> 4);
    let base = de_v_begin_even.wrapping_add((g.total_lines() - 1) / 2);
    let begin = base.wrapping_add(offset as u32);
    Span {
        begin,
        end: begin.wrapping_add(g.active_lines),
    }
}

/// Horizontal sync, starting one front porch after DE ends.
pub const fn hsync(px: &VencPixels, de_h_end: u32) -> HSync {
    let after_porch = de_h_end.wrapping_add(px.front_porch);
    let (begin, vs_adjust) = if after_porch >= px.total {
        (after_porch - px.total, 1)
    } else {
        (after_porch, 0)
    };
    HSync {
        begin,
        end: modulo(begin.wrapping_add(px.hsync), px.total),
        vs_adjust,
    }
}

/// First vsync line of the even field.
///
/// The sync precedes DE by the start-of-field lines and the sync itself,
/// plus one more line unless the hsync already wrapped onto the next line.
/// When that would go below line zero it wraps back from the end of the
/// frame instead.
pub const fn even_vsync_bline(g: &Geometry, de_v_begin_even: u32, vs_adjust: u32) -> u32 {
    let lead = g.sof_lines + g.vsync_lines + (1 - vs_adjust);
    if de_v_begin_even >= lead {
        de_v_begin_even - lead
    } else {
        g.total_lines().wrapping_add(de_v_begin_even).wrapping_sub(lead)
    }
}

pub const fn vsync_even(g: &Geometry, de_v_begin_even: u32, hs: &HSync) -> VSync {
    let bline = even_vsync_bline(g, de_v_begin_even, hs.vs_adjust);
    VSync {
        bline,
        eline: modulo(bline.wrapping_add(g.vsync_lines), g.total_lines()),
        begin: hs.begin,
    }
}

/// Odd field vsync. Unlike the even field this always leads DE by exactly
/// one extra line and has no wrap guard: the odd field sits in the middle
/// of the frame, and its pulse starts half a line after the hsync.
pub const fn vsync_odd(g: &Geometry, px: &VencPixels, de_v_begin_odd: u32, hs: &HSync) -> VSync {
    VSync {
        bline: de_v_begin_odd.wrapping_sub(1 + g.sof_lines + g.vsync_lines),
        eline: de_v_begin_odd.wrapping_sub(1 + g.sof_lines),
        begin: modulo(hs.begin.wrapping_add(px.total >> 1), px.total),
    }
}

/// `VPU_HDMI_SETTING` value carrying the sync polarities, with the data
/// source selector set to 4. The enable bit is set separately.
pub const fn hdmi_setting(t: &HdmiTiming) -> u32 {
    (t.h_pol.bit() << 2) | (t.v_pol.bit() << 3) | (4 << 5)
}

/// `ENCP_VIDEO_MODE` bit 14, `cfg_de_v`.
const VIDEO_MODE_DE_V: u32 = 1 << 14;

pub(crate) fn configure<I: Interface>(
    ll: &mut LowLevel<I>,
    family: Family,
    t: &HdmiTiming,
) -> Result<(), Error<I>> {
    let g = family.geometry();
    let px = g.venc();

    ll.write_table(Some(family.table()))?;

    let mode = ll.rd(ENCP_VIDEO_MODE)?;
    ll.wr(ENCP_VIDEO_MODE, mode | VIDEO_MODE_DE_V)?;

    let de_h = de_horizontal(&px, ll.rd(ENCP_VIDEO_HAVON_BEGIN)?);
    ll.wr(ENCP_DE_H_BEGIN, de_h.begin)?;
    ll.wr(ENCP_DE_H_END, de_h.end)?;

    let de_v_even = de_vertical_even(&g, ll.rd(ENCP_VIDEO_VAVON_BLINE)?);
    ll.wr(ENCP_DE_V_BEGIN_EVEN, de_v_even.begin)?;
    ll.wr(ENCP_DE_V_END_EVEN, de_v_even.end)?;

    let de_v_odd = if g.is_interlaced() {
        let ofst = ll.rd(ENCP_VIDEO_OFLD_VOAV_OFST)?;
        let de_v_odd = de_vertical_odd(&g, ofst, de_v_even.begin);
        ll.wr(ENCP_DE_V_BEGIN_ODD, de_v_odd.begin)?;
        ll.wr(ENCP_DE_V_END_ODD, de_v_odd.end)?;
        Some(de_v_odd)
    } else {
        None
    };

    let hs = hsync(&px, de_h.end);
    ll.wr(ENCP_DVI_HSO_BEGIN, hs.begin)?;
    ll.wr(ENCP_DVI_HSO_END, hs.end)?;

    let vs_even = vsync_even(&g, de_v_even.begin, &hs);
    ll.wr(ENCP_DVI_VSO_BLINE_EVN, vs_even.bline)?;
    ll.wr(ENCP_DVI_VSO_ELINE_EVN, vs_even.eline)?;
    ll.wr(ENCP_DVI_VSO_BEGIN_EVN, vs_even.begin)?;
    ll.wr(ENCP_DVI_VSO_END_EVN, vs_even.begin)?;

    if let Some(de_v_odd) = de_v_odd {
        let vs_odd = vsync_odd(&g, &px, de_v_odd.begin, &hs);
        ll.wr(ENCP_DVI_VSO_BLINE_ODD, vs_odd.bline)?;
        ll.wr(ENCP_DVI_VSO_ELINE_ODD, vs_odd.eline)?;
        ll.wr(ENCP_DVI_VSO_BEGIN_ODD, vs_odd.begin)?;
        ll.wr(ENCP_DVI_VSO_END_ODD, vs_odd.begin)?;
    }

    log::debug!(
        "{} 1080i DE h {:?} even {:?} odd {:?}, {:?}",
        t.vic,
        de_h,
        de_v_even,
        de_v_odd,
        hs
    );

    ll.wr(VPU_HDMI_SETTING, hdmi_setting(t))?;
    // Only the enable bit: the rest of this register belongs to other blocks.
    ll.set_bits(VPU_HDMI_SETTING, 1, 1, 1)?;

    Ok(())
}
