//! Video format identification and timing descriptors.
//!
//! The types in this module describe the formats the encoders can be
//! configured for. The encoder configuration entry points on
//! [`Venc`](crate::Venc) take a [`Vic`] and consult a [`TimingSource`] to
//! find the corresponding [`HdmiTiming`].

/// An HDMI/CEA-861 Video Identification Code.
///
/// Any `u8` can be wrapped, including codes that no timing source knows
/// about; looking those up fails with
/// [`Error::UnknownVic`](crate::error::Error::UnknownVic).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Vic(pub u8);

impl Vic {
    pub const VIC_640X480P60: Self = Self(1);
    pub const VIC_720X480P60_4X3: Self = Self(2);
    pub const VIC_720X480P60_16X9: Self = Self(3);
    pub const VIC_1280X720P60: Self = Self(4);
    pub const VIC_1920X1080I60: Self = Self(5);
    pub const VIC_720X480I60_4X3: Self = Self(6);
    pub const VIC_720X480I60_16X9: Self = Self(7);
    pub const VIC_2880X480I60_4X3: Self = Self(10);
    pub const VIC_2880X480I60_16X9: Self = Self(11);
    pub const VIC_1920X1080P60: Self = Self(16);
    pub const VIC_720X576P50_4X3: Self = Self(17);
    pub const VIC_720X576P50_16X9: Self = Self(18);
    pub const VIC_1280X720P50: Self = Self(19);
    pub const VIC_1920X1080I50: Self = Self(20);
    pub const VIC_720X576I50_4X3: Self = Self(21);
    pub const VIC_720X576I50_16X9: Self = Self(22);
    pub const VIC_1920X1080P50: Self = Self(31);
    pub const VIC_1920X1080P24: Self = Self(32);
    pub const VIC_1920X1080P25: Self = Self(33);
    pub const VIC_1920X1080P30: Self = Self(34);
    pub const VIC_1920X1080I100: Self = Self(40);
    pub const VIC_1920X1080I120: Self = Self(46);
    pub const VIC_720X480I120_4X3: Self = Self(50);
    pub const VIC_720X480I120_16X9: Self = Self(51);
    pub const VIC_720X480I240_4X3: Self = Self(58);
    pub const VIC_720X480I240_16X9: Self = Self(59);
    pub const VIC_3840X2160P24: Self = Self(93);
    pub const VIC_3840X2160P25: Self = Self(94);
    pub const VIC_3840X2160P30: Self = Self(95);
    pub const VIC_3840X2160P50: Self = Self(96);
    pub const VIC_3840X2160P60: Self = Self(97);
}

impl core::fmt::Display for Vic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VIC {}", self.0)
    }
}

impl From<u8> for Vic {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<Vic> for u8 {
    fn from(vic: Vic) -> u8 {
        vic.0
    }
}

/// Selects whether a sync pulse is active-high or active-low.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    /// The value of the polarity bit in the HDMI setting register.
    pub const fn bit(self) -> u32 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }
}

/// Represents the period sizes for one dimension (horizontal or vertical)
/// of a video raster.
///
/// For horizontal parameters, the values are in pixel clocks. For vertical
/// parameters, the values are in lines of a whole frame, even for
/// interlaced formats.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimingDimension {
    pub total: u32,
    pub active: u32,
    pub front: u32,
    pub sync: u32,
    pub back: u32,
}

impl TimingDimension {
    /// Calculates a `TimingDimension` from the sizes of the individual
    /// periods in the cycle, deriving the total from them.
    pub const fn calculate(active: u32, front: u32, sync: u32, back: u32) -> Self {
        Self {
            total: active + front + sync + back,
            active,
            front,
            sync,
            back,
        }
    }

    /// Like `calculate`, but with an explicit total. Interlaced formats have
    /// an odd number of lines per frame, which the per-field blanking sizes
    /// can't express.
    pub const fn with_total(total: u32, active: u32, front: u32, sync: u32, back: u32) -> Self {
        Self {
            total,
            active,
            front,
            sync,
            back,
        }
    }

    /// The number of blanking steps in the cycle.
    pub const fn blank(&self) -> u32 {
        self.total - self.active
    }
}

/// Describes the timing of one video format.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HdmiTiming {
    pub vic: Vic,
    pub pixel_freq_khz: u32,
    pub h: TimingDimension,
    pub v: TimingDimension,
    pub h_pol: Polarity,
    pub v_pol: Polarity,
    pub interlaced: bool,

    /// How many times each pixel is sent, minus one.
    pub pixel_repeat: u8,
}

impl HdmiTiming {
    /// Returns the vertical refresh rate in millihertz, counting fields for
    /// interlaced formats.
    pub fn refresh_millihz(&self) -> u32 {
        let pixels_per_frame = self.h.total as u64 * self.v.total as u64;
        if pixels_per_frame == 0 {
            return 0;
        }
        let frames = (self.pixel_freq_khz as u64 * 1_000_000) / pixels_per_frame;
        if self.interlaced {
            (frames * 2) as u32
        } else {
            frames as u32
        }
    }
}

/// Implemented by types that can find the timing descriptor for a VIC.
///
/// [`CeaTimings`] is the built-in implementation. Callers with their own
/// timing database, such as one extended from a display's EDID, can provide
/// their own.
pub trait TimingSource {
    fn lookup(&self, vic: Vic) -> Option<HdmiTiming>;
}

impl<T: TimingSource + ?Sized> TimingSource for &T {
    fn lookup(&self, vic: Vic) -> Option<HdmiTiming> {
        (**self).lookup(vic)
    }
}

/// A [`TimingSource`] over the fixed CEA-861 format table.
#[derive(Clone, Copy, Debug, Default)]
pub struct CeaTimings;

impl CeaTimings {
    /// All of the timings this source knows, in VIC order.
    pub fn all() -> &'static [HdmiTiming] {
        &CEA_TIMINGS
    }
}

impl TimingSource for CeaTimings {
    fn lookup(&self, vic: Vic) -> Option<HdmiTiming> {
        CEA_TIMINGS.iter().find(|t| t.vic == vic).copied()
    }
}

const fn progressive(
    vic: u8,
    pixel_freq_khz: u32,
    h: TimingDimension,
    v: TimingDimension,
    pol: Polarity,
) -> HdmiTiming {
    HdmiTiming {
        vic: Vic(vic),
        pixel_freq_khz,
        h,
        v,
        h_pol: pol,
        v_pol: pol,
        interlaced: false,
        pixel_repeat: 0,
    }
}

const fn interlaced(
    vic: u8,
    pixel_freq_khz: u32,
    h: TimingDimension,
    v: TimingDimension,
    pol: Polarity,
    pixel_repeat: u8,
) -> HdmiTiming {
    HdmiTiming {
        vic: Vic(vic),
        pixel_freq_khz,
        h,
        v,
        h_pol: pol,
        v_pol: pol,
        interlaced: true,
        pixel_repeat,
    }
}

use Polarity::{Negative as NEG, Positive as POS};
type Dim = TimingDimension;

const H_640: Dim = Dim::calculate(640, 16, 96, 48);
const V_480P: Dim = Dim::calculate(480, 10, 2, 33);
const H_720_480: Dim = Dim::calculate(720, 16, 62, 60);
const V_480P_SD: Dim = Dim::calculate(480, 9, 6, 30);
const H_1440_480I: Dim = Dim::calculate(1440, 38, 124, 114);
const H_2880_480I: Dim = Dim::calculate(2880, 76, 248, 228);
const V_480I: Dim = Dim::with_total(525, 480, 4, 3, 15);
const H_720_576: Dim = Dim::calculate(720, 12, 64, 68);
const V_576P: Dim = Dim::calculate(576, 5, 5, 39);
const H_1440_576I: Dim = Dim::calculate(1440, 24, 126, 138);
const V_576I: Dim = Dim::with_total(625, 576, 2, 3, 19);
const H_1280_60: Dim = Dim::calculate(1280, 110, 40, 220);
const H_1280_50: Dim = Dim::calculate(1280, 440, 40, 220);
const V_720P: Dim = Dim::calculate(720, 5, 5, 20);
const H_1920_60: Dim = Dim::calculate(1920, 88, 44, 148);
const H_1920_50: Dim = Dim::calculate(1920, 528, 44, 148);
const H_1920_24: Dim = Dim::calculate(1920, 638, 44, 148);
const V_1080P: Dim = Dim::calculate(1080, 4, 5, 36);
const V_1080I: Dim = Dim::with_total(1125, 1080, 2, 5, 15);
const H_3840_24: Dim = Dim::calculate(3840, 1276, 88, 296);
const H_3840_25: Dim = Dim::calculate(3840, 1056, 88, 296);
const H_3840_30: Dim = Dim::calculate(3840, 176, 88, 296);
const V_2160P: Dim = Dim::calculate(2160, 8, 10, 72);

static CEA_TIMINGS: [HdmiTiming; 31] = [
    progressive(1, 25175, H_640, V_480P, NEG),
    progressive(2, 27000, H_720_480, V_480P_SD, NEG),
    progressive(3, 27000, H_720_480, V_480P_SD, NEG),
    progressive(4, 74250, H_1280_60, V_720P, POS),
    interlaced(5, 74250, H_1920_60, V_1080I, POS, 0),
    interlaced(6, 27000, H_1440_480I, V_480I, NEG, 1),
    interlaced(7, 27000, H_1440_480I, V_480I, NEG, 1),
    interlaced(10, 54000, H_2880_480I, V_480I, NEG, 3),
    interlaced(11, 54000, H_2880_480I, V_480I, NEG, 3),
    progressive(16, 148500, H_1920_60, V_1080P, POS),
    progressive(17, 27000, H_720_576, V_576P, NEG),
    progressive(18, 27000, H_720_576, V_576P, NEG),
    progressive(19, 74250, H_1280_50, V_720P, POS),
    interlaced(20, 74250, H_1920_50, V_1080I, POS, 0),
    interlaced(21, 27000, H_1440_576I, V_576I, NEG, 1),
    interlaced(22, 27000, H_1440_576I, V_576I, NEG, 1),
    progressive(31, 148500, H_1920_50, V_1080P, POS),
    progressive(32, 74250, H_1920_24, V_1080P, POS),
    progressive(33, 74250, H_1920_50, V_1080P, POS),
    progressive(34, 74250, H_1920_60, V_1080P, POS),
    interlaced(40, 148500, H_1920_50, V_1080I, POS, 0),
    interlaced(46, 148500, H_1920_60, V_1080I, POS, 0),
    interlaced(50, 54000, H_1440_480I, V_480I, NEG, 1),
    interlaced(51, 54000, H_1440_480I, V_480I, NEG, 1),
    interlaced(58, 108000, H_1440_480I, V_480I, NEG, 1),
    interlaced(59, 108000, H_1440_480I, V_480I, NEG, 1),
    progressive(93, 297000, H_3840_24, V_2160P, POS),
    progressive(94, 297000, H_3840_25, V_2160P, POS),
    progressive(95, 297000, H_3840_30, V_2160P, POS),
    progressive(96, 594000, H_3840_25, V_2160P, POS),
    progressive(97, 594000, H_3840_30, V_2160P, POS),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate() {
        let d = TimingDimension::calculate(1920, 88, 44, 148);
        assert_eq!(d.total, 2200);
        assert_eq!(d.blank(), 280);
    }

    #[test]
    fn test_lookup() {
        let t = CeaTimings.lookup(Vic::VIC_1920X1080I60).unwrap();
        assert_eq!(t.h.total, 2200);
        assert_eq!(t.v.total, 1125);
        assert!(t.interlaced);
        assert_eq!(t.h_pol, Polarity::Positive);

        assert_eq!(CeaTimings.lookup(Vic(0)), None);
        assert_eq!(CeaTimings.lookup(Vic(200)), None);
    }

    #[test]
    fn test_table_is_consistent() {
        let all = CeaTimings::all();
        for pair in all.windows(2) {
            assert!(pair[0].vic < pair[1].vic, "{} out of order", pair[1].vic);
        }
        for t in all {
            assert_eq!(
                t.h.total,
                t.h.active + t.h.front + t.h.sync + t.h.back,
                "{} horizontal periods",
                t.vic
            );
            if !t.interlaced {
                assert_eq!(
                    t.v.total,
                    t.v.active + t.v.front + t.v.sync + t.v.back,
                    "{} vertical periods",
                    t.vic
                );
            }
        }
    }

    #[test]
    fn test_refresh() {
        let p60 = CeaTimings.lookup(Vic::VIC_1920X1080P60).unwrap();
        assert_eq!(p60.refresh_millihz(), 60000);
        let i50 = CeaTimings.lookup(Vic::VIC_1920X1080I50).unwrap();
        assert_eq!(i50.refresh_millihz(), 50000);
        let p24 = CeaTimings.lookup(Vic::VIC_1920X1080P24).unwrap();
        assert_eq!(p24.refresh_millihz(), 24000);
    }
}
