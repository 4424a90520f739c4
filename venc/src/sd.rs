//! ENCI configuration for standard-definition interlaced formats.
//!
//! There's no arithmetic here: the 480i family and everything else (which
//! gets the 576i setup) each have a fixed register sequence.

use crate::error::Error;
use crate::interface::Interface;
use crate::low_level::LowLevel;
use crate::registers::Register::ENCI_DBG_FLDLN_RST;
use crate::tables;
use crate::timing::Vic;

/// Number of reads of `ENCI_DBG_FLDLN_RST` between writing the resync value
/// and restoring the run value. The field/line reset is sampled in the 27MHz
/// clock domain, and four register reads is the delay measured to let the
/// first write land there before the second one is issued.
pub const FLDLN_RST_SYNC_READS: usize = 4;

/// Which of the two fixed ENCI setups a VIC gets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Standard {
    /// 480i at any field rate or pixel repetition.
    Ntsc480i,
    /// 576i, and the default for anything that isn't 480i.
    Pal576i,
}

impl Standard {
    pub fn from_vic(vic: Vic) -> Self {
        match vic {
            Vic::VIC_720X480I60_4X3
            | Vic::VIC_720X480I60_16X9
            | Vic::VIC_2880X480I60_4X3
            | Vic::VIC_2880X480I60_16X9
            | Vic::VIC_720X480I120_4X3
            | Vic::VIC_720X480I120_16X9
            | Vic::VIC_720X480I240_4X3
            | Vic::VIC_720X480I240_16X9 => Self::Ntsc480i,
            _ => Self::Pal576i,
        }
    }
}

pub(crate) fn configure<I: Interface>(ll: &mut LowLevel<I>, vic: Vic) -> Result<(), Error<I>> {
    let standard = Standard::from_vic(vic);
    log::debug!("{} ENCI setup {:?}", vic, standard);
    match standard {
        Standard::Ntsc480i => {
            ll.write_table(Some(&tables::TVREGS_480I))?;
            resync_field_counter(ll)
        }
        Standard::Pal576i => ll.write_table(Some(&tables::TVREGS_576I)),
    }
}

/// Pulses the field/line reset so the field counter restarts in step with
/// the new timing. The reads only exist for their delay; their values are
/// ignored.
fn resync_field_counter<I: Interface>(ll: &mut LowLevel<I>) -> Result<(), Error<I>> {
    ll.wr(ENCI_DBG_FLDLN_RST, tables::ENCI_FLDLN_RST_RESYNC)?;
    for _ in 0..FLDLN_RST_SYNC_READS {
        ll.rd(ENCI_DBG_FLDLN_RST)?;
    }
    ll.wr(ENCI_DBG_FLDLN_RST, tables::ENCI_FLDLN_RST_RUN)
}
