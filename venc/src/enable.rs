use crate::error::Error;
use crate::interface::Interface;
use crate::low_level::LowLevel;
use crate::registers::Register::{ENCI_VIDEO_EN, ENCP_VIDEO_EN};

/// Which encoder drives the HDMI transmitter. At most one of the two runs
/// at a time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActiveEncoder {
    None,
    Progressive,
    Interlaced,
}

impl ActiveEncoder {
    pub const fn select(enable: bool, progressive: bool) -> Self {
        match (enable, progressive) {
            (false, _) => Self::None,
            (true, true) => Self::Progressive,
            (true, false) => Self::Interlaced,
        }
    }

    /// The values for `ENCP_VIDEO_EN` and `ENCI_VIDEO_EN` respectively.
    pub const fn enable_bits(self) -> (u32, u32) {
        match self {
            Self::None => (0, 0),
            Self::Progressive => (1, 0),
            Self::Interlaced => (0, 1),
        }
    }
}

pub(crate) fn set_encoder_enable<I: Interface>(
    ll: &mut LowLevel<I>,
    enable: bool,
    progressive: bool,
) -> Result<(), Error<I>> {
    let active = ActiveEncoder::select(enable, progressive);
    log::info!("active encoder {:?}", active);
    let (encp, enci) = active.enable_bits();
    ll.wr(ENCP_VIDEO_EN, encp)?;
    ll.wr(ENCI_VIDEO_EN, enci)
}
