//! ENCP configuration derived directly from a timing descriptor.
//!
//! The `ENCP_VIDEO_*` registers control when the encoder fetches video data
//! from the post-processor, which then passes through a FIFO to the
//! `ENCP_DVI_*` and `ENCP_DE_*` timing that the HDMI transmitter actually
//! samples.

use crate::error::Error;
use crate::interface::Interface;
use crate::low_level::LowLevel;
use crate::registers::Register::*;
use crate::timing::HdmiTiming;

/// Pixel count at which the DVI hsync pulse starts.
pub const HSYNC_START: u32 = 4;

/// Line at which the DVI vsync pulse starts.
pub const VSYNC_START: u32 = 1;

/// Pixel clocks between a VFIFO2VD fetch request and the data being ready at
/// the HDMI transmitter. The video window is programmed this much earlier
/// than the DE window it feeds.
pub const VFIFO2VD_TO_HDMI_LATENCY: u32 = 2;

/// `ENCP_VIDEO_MODE` value: hsync and equalization pulse switch in the
/// center, plus `cfg_de_v` (bit 14).
const VIDEO_MODE: u32 = 0x0040 | (1 << 14);

/// `ENCP_VIDEO_MODE_ADV` value selecting a sampling rate of 1.
const VIDEO_MODE_ADV: u32 = 0x18;

/// The data-enable window for one frame, in encoder pixels and lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DeWindow {
    pub h_begin: u32,
    pub h_end: u32,
    pub v_begin: u32,
    pub v_end: u32,
}

impl DeWindow {
    /// Places the active region so that it ends where the front porch
    /// begins, counting from sync starts of `HSYNC_START` and `VSYNC_START`.
    ///
    /// The counters are unsigned registers, so a porch shorter than the
    /// sync start offset wraps rather than failing.
    pub const fn from_timing(t: &HdmiTiming) -> Self {
        let h_end = t.h.total.wrapping_sub(t.h.front.wrapping_sub(HSYNC_START));
        let v_end = t.v.total.wrapping_sub(t.v.front.wrapping_sub(VSYNC_START));
        Self {
            h_begin: h_end.wrapping_sub(t.h.active),
            h_end,
            v_begin: v_end.wrapping_sub(t.v.active),
            v_end,
        }
    }
}

pub(crate) fn configure<I: Interface>(
    ll: &mut LowLevel<I>,
    t: &HdmiTiming,
) -> Result<(), Error<I>> {
    let de = DeWindow::from_timing(t);
    log::debug!("{} progressive DE window {:?}", t.vic, de);

    // DVI hsync
    ll.wr(ENCP_DVI_HSO_BEGIN, HSYNC_START)?;
    ll.wr(ENCP_DVI_HSO_END, HSYNC_START.wrapping_add(t.h.sync))?;

    // DVI vsync
    ll.wr(ENCP_DVI_VSO_BLINE_EVN, VSYNC_START)?;
    ll.wr(ENCP_DVI_VSO_ELINE_EVN, VSYNC_START.wrapping_add(t.v.sync))?;
    ll.wr(ENCP_DVI_VSO_BEGIN_EVN, HSYNC_START)?;
    ll.wr(ENCP_DVI_VSO_END_EVN, HSYNC_START)?;

    // data valid
    ll.wr(ENCP_DE_H_BEGIN, de.h_begin)?;
    ll.wr(ENCP_DE_H_END, de.h_end)?;
    ll.wr(ENCP_DE_V_BEGIN_EVEN, de.v_begin)?;
    ll.wr(ENCP_DE_V_END_EVEN, de.v_end)?;

    ll.wr(ENCP_VIDEO_MODE, VIDEO_MODE)?;
    ll.wr(ENCP_VIDEO_MODE_ADV, VIDEO_MODE_ADV)?;

    // active region, ahead of DE by the FIFO latency
    ll.wr(
        ENCP_VIDEO_HAVON_BEGIN,
        de.h_begin.wrapping_sub(VFIFO2VD_TO_HDMI_LATENCY),
    )?;
    ll.wr(
        ENCP_VIDEO_HAVON_END,
        de.h_end.wrapping_sub(VFIFO2VD_TO_HDMI_LATENCY + 1),
    )?;
    ll.wr(ENCP_VIDEO_VAVON_BLINE, de.v_begin)?;
    ll.wr(ENCP_VIDEO_VAVON_ELINE, de.v_end.wrapping_sub(1))?;

    ll.wr(ENCP_VIDEO_HSO_BEGIN, HSYNC_START - VFIFO2VD_TO_HDMI_LATENCY)?;
    ll.wr(
        ENCP_VIDEO_HSO_END,
        HSYNC_START
            .wrapping_add(t.h.sync)
            .wrapping_sub(VFIFO2VD_TO_HDMI_LATENCY),
    )?;

    ll.wr(ENCP_VIDEO_VSO_BEGIN, 0)?;
    ll.wr(ENCP_VIDEO_VSO_END, 0)?;
    ll.wr(ENCP_VIDEO_VSO_BLINE, VSYNC_START)?;
    ll.wr(ENCP_VIDEO_VSO_ELINE, VSYNC_START.wrapping_add(t.v.sync))?;

    // Counters run from zero, so the maximums are one less than the totals.
    ll.wr(ENCP_VIDEO_MAX_PXCNT, t.h.total.wrapping_sub(1))?;
    ll.wr(ENCP_VIDEO_MAX_LNCNT, t.v.total.wrapping_sub(1))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::testing::{MockInterface, MockInterfaceCall};
    use crate::registers::Register;
    use crate::timing::{CeaTimings, Polarity, TimingDimension, TimingSource, Vic};

    fn run(vic: Vic) -> MockInterface {
        let t = CeaTimings.lookup(vic).unwrap();
        let mut ll = LowLevel::new(MockInterface::new());
        configure(&mut ll, &t).unwrap();
        ll.into_interface()
    }

    #[test]
    fn test_de_window_1080p60() {
        let t = CeaTimings.lookup(Vic::VIC_1920X1080P60).unwrap();
        assert_eq!(
            DeWindow::from_timing(&t),
            DeWindow {
                h_begin: 196,
                h_end: 2116,
                v_begin: 42,
                v_end: 1122,
            }
        );
    }

    #[test]
    fn test_sequence_1080p60() {
        let ei = run(Vic::VIC_1920X1080P60);
        assert_eq!(
            ei.writes(),
            vec![
                (ENCP_DVI_HSO_BEGIN, 4),
                (ENCP_DVI_HSO_END, 48),
                (ENCP_DVI_VSO_BLINE_EVN, 1),
                (ENCP_DVI_VSO_ELINE_EVN, 6),
                (ENCP_DVI_VSO_BEGIN_EVN, 4),
                (ENCP_DVI_VSO_END_EVN, 4),
                (ENCP_DE_H_BEGIN, 196),
                (ENCP_DE_H_END, 2116),
                (ENCP_DE_V_BEGIN_EVEN, 42),
                (ENCP_DE_V_END_EVEN, 1122),
                (ENCP_VIDEO_MODE, 0x4040),
                (ENCP_VIDEO_MODE_ADV, 0x18),
                (ENCP_VIDEO_HAVON_BEGIN, 194),
                (ENCP_VIDEO_HAVON_END, 2113),
                (ENCP_VIDEO_VAVON_BLINE, 42),
                (ENCP_VIDEO_VAVON_ELINE, 1121),
                (ENCP_VIDEO_HSO_BEGIN, 2),
                (ENCP_VIDEO_HSO_END, 46),
                (ENCP_VIDEO_VSO_BEGIN, 0),
                (ENCP_VIDEO_VSO_END, 0),
                (ENCP_VIDEO_VSO_BLINE, 1),
                (ENCP_VIDEO_VSO_ELINE, 6),
                (ENCP_VIDEO_MAX_PXCNT, 2199),
                (ENCP_VIDEO_MAX_LNCNT, 1124),
            ]
        );
    }

    #[test]
    fn test_720p60() {
        let ei = run(Vic::VIC_1280X720P60);
        // h: 1650 - (110 - 4) = 1544, minus 1280 active
        assert_eq!(ei.reg(Register::ENCP_DE_H_BEGIN), 264);
        assert_eq!(ei.reg(Register::ENCP_DE_H_END), 1544);
        // v: 750 - (5 - 1) = 746, minus 720 active
        assert_eq!(ei.reg(Register::ENCP_DE_V_BEGIN_EVEN), 26);
        assert_eq!(ei.reg(Register::ENCP_DE_V_END_EVEN), 746);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_MAX_PXCNT), 1649);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_MAX_LNCNT), 749);
    }

    fn short_porches() -> HdmiTiming {
        HdmiTiming {
            vic: Vic(100),
            pixel_freq_khz: 25_000,
            h: TimingDimension::calculate(800, 2, 80, 80),
            v: TimingDimension::calculate(600, 0, 3, 21),
            h_pol: Polarity::Positive,
            v_pol: Polarity::Positive,
            interlaced: false,
            pixel_repeat: 0,
        }
    }

    #[test]
    fn test_short_porches_wrap() {
        // A front porch shorter than the sync start moves DE past the
        // nominal end of the line instead of failing.
        let t = short_porches();
        assert_eq!(
            DeWindow::from_timing(&t),
            DeWindow {
                h_begin: 164,
                h_end: 964,
                v_begin: 25,
                v_end: 625,
            }
        );

        let mut ll = LowLevel::new(MockInterface::new());
        configure(&mut ll, &t).unwrap();
        let ei = ll.into_interface();
        assert_eq!(ei.writes().len(), 24);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_HAVON_BEGIN), 162);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_HAVON_END), 961);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_VAVON_ELINE), 624);
        assert_eq!(ei.reg(Register::ENCP_VIDEO_MAX_PXCNT), 961);
    }

    #[test]
    fn test_active_larger_than_total_wraps() {
        let mut t = short_porches();
        t.h = TimingDimension::with_total(100, 800, 40, 80, 80);
        let de = DeWindow::from_timing(&t);
        assert_eq!(de.h_end, 64);
        assert_eq!(de.h_begin, 64u32.wrapping_sub(800));
    }

    #[test]
    fn test_writes_only() {
        let ei = run(Vic::VIC_3840X2160P60);
        assert!(ei
            .calls()
            .iter()
            .all(|c| matches!(c, MockInterfaceCall::Write(_, _))));
        assert_eq!(ei.reg(Register::ENCP_VIDEO_MAX_PXCNT), 4399);
    }
}
