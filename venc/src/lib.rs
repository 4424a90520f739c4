//! Timing setup for the HDMI video encoders in the Amlogic VPU.
//!
//! The VPU has two timing generators that can feed the HDMI transmitter:
//! ENCP, for progressive formats and 1080i, and ENCI, for standard-definition
//! interlaced formats. [`Venc`] programs their sync, blanking and
//! data-enable registers for a given [`Vic`] and selects which of them runs.
//!
//! Register access goes through an [`Interface`] implementation, so the same
//! code can drive real hardware (see the `venc-mmio` crate) or the fake
//! register file in [`interface::fake`].

#![cfg_attr(not(test), no_std)]

pub mod enable;
pub mod error;
pub mod interface;
pub mod interlaced;
pub mod low_level;
pub mod progressive;
pub mod registers;
pub mod sd;
pub mod tables;
pub mod timing;

pub use error::Error;
pub use interface::Interface;
pub use registers::Register;
pub use timing::{CeaTimings, HdmiTiming, TimingSource, Vic};

/// Selects one of the encoder register blocks on parts with more than one
/// instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EncoderIndex {
    Venc0,
    Venc1,
    Venc2,
}

impl EncoderIndex {
    /// Offset of this instance's registers from those of `Venc0`, in
    /// register numbers.
    pub const fn reg_offset(self) -> u32 {
        match self {
            Self::Venc0 => 0,
            Self::Venc1 => 0x600,
            Self::Venc2 => 0x800,
        }
    }
}

impl core::default::Default for EncoderIndex {
    fn default() -> Self {
        Self::Venc0
    }
}

impl core::convert::TryFrom<u32> for EncoderIndex {
    type Error = u32;

    fn try_from(v: u32) -> Result<Self, u32> {
        match v {
            0 => Ok(Self::Venc0),
            1 => Ok(Self::Venc1),
            2 => Ok(Self::Venc2),
            _ => Err(v),
        }
    }
}

/// The main type for this crate, providing the encoder configuration
/// operations over a register [`Interface`].
pub struct Venc<I: Interface, T: TimingSource = CeaTimings> {
    pub(crate) ll: low_level::LowLevel<I>,
    timings: T,
}

impl<I: Interface> Venc<I, CeaTimings> {
    /// Wraps the given interface, using the built-in CEA-861 timings.
    pub fn new(ei: I) -> Self {
        Self::with_timing_source(ei, CeaTimings)
    }
}

impl<I: Interface, T: TimingSource> Venc<I, T> {
    /// Wraps the given interface, looking up VICs in `timings`.
    pub fn with_timing_source(ei: I, timings: T) -> Self {
        Self {
            ll: low_level::LowLevel::new(ei),
            timings,
        }
    }

    /// Programs the ENCP timing registers for the given format.
    ///
    /// The four 1080i VICs start from a fixed register table which is then
    /// refined with field timings calculated from values read back from the
    /// encoder. Other formats are calculated directly from their timing
    /// descriptor.
    ///
    /// Returns [`Error::UnknownVic`] without writing any register if the
    /// timing source has no descriptor for `vic`.
    ///
    /// `encoder` and `enable` are accepted for multi-instance parts but don't
    /// currently change which registers are written, and this function does
    /// not enable the encoder. Use
    /// [`set_encoder_enable`](Self::set_encoder_enable) for that.
    pub fn configure_progressive_encoder(
        &mut self,
        encoder: EncoderIndex,
        vic: Vic,
        enable: bool,
    ) -> Result<(), Error<I>> {
        log::info!(
            "configuring ENCP for {} (encoder {:?} at offset {:#x}, enable {})",
            vic,
            encoder,
            encoder.reg_offset(),
            enable
        );

        let t = match self.timings.lookup(vic) {
            Some(t) => t,
            None => {
                log::warn!("no timing for {}, leaving ENCP unchanged", vic);
                return Err(Error::UnknownVic(vic));
            }
        };

        match interlaced::Family::from_vic(vic) {
            Some(family) => interlaced::configure(&mut self.ll, family, &t),
            None => progressive::configure(&mut self.ll, &t),
        }
    }

    /// Programs the ENCI timing registers for a standard-definition
    /// interlaced format.
    ///
    /// The 480i VICs get the 480i register sequence. Every other VIC gets
    /// the 576i sequence, so this can't fail except through the interface.
    pub fn configure_interlaced_encoder(
        &mut self,
        encoder: EncoderIndex,
        vic: Vic,
        enable: bool,
    ) -> Result<(), Error<I>> {
        log::info!(
            "configuring ENCI for {} (encoder {:?} at offset {:#x}, enable {})",
            vic,
            encoder,
            encoder.reg_offset(),
            enable
        );
        sd::configure(&mut self.ll, vic)
    }

    /// Selects which encoder drives the HDMI transmitter.
    ///
    /// With `enable` false both encoders are stopped, whatever `progressive`
    /// says. Otherwise ENCP runs if `progressive` is true and ENCI runs if
    /// not, and the other is stopped.
    pub fn set_encoder_enable(&mut self, enable: bool, progressive: bool) -> Result<(), Error<I>> {
        enable::set_encoder_enable(&mut self.ll, enable, progressive)
    }

    /// The timing source VICs are looked up in.
    pub fn timing_source(&self) -> &T {
        &self.timings
    }

    pub fn borrow_interface<'a>(&'a mut self) -> &'a mut I {
        self.ll.borrow_interface()
    }

    pub fn into_interface(self) -> I {
        self.ll.into_interface()
    }
}
