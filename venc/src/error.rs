//! Error types returned by the encoder configuration entry points.

use crate::timing::Vic;

/// A general error type for errors from the main [`Venc`](crate::Venc) type.
///
/// Errors about the requested format are always detected before the first
/// register write, so when one of those is returned the encoders are left
/// exactly as they were. Interface errors can arrive part way through a
/// register sequence, leaving it partially applied.
#[non_exhaustive]
pub enum Error<I: crate::interface::Interface> {
    /// The timing source has no timing descriptor for the given VIC.
    UnknownVic(Vic),

    /// Errors encountered when reading or writing the encoder registers.
    ///
    /// The wrapped error type for this variant is the error type for whichever
    /// [`Interface`](crate::interface::Interface) implementation you are using.
    Interface(I::Error),
}

impl<I: crate::interface::Interface> Error<I> {
    pub fn interface_result<R>(r: Result<R, I::Error>) -> Result<R, Self> {
        r.map_err(Self::Interface)
    }

    /// Returns the VIC the error is about, if it's about a VIC.
    pub fn vic(&self) -> Option<Vic> {
        match self {
            Error::UnknownVic(vic) => Some(*vic),
            Error::Interface(_) => None,
        }
    }
}

impl<I> core::fmt::Debug for Error<I>
where
    I: crate::interface::Interface,
    I::Error: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Error::UnknownVic(vic) => f.debug_tuple("UnknownVic").field(vic).finish(),
            Error::Interface(err) => f.debug_tuple("Interface").field(err).finish(),
        }
    }
}

impl<I> core::fmt::Display for Error<I>
where
    I: crate::interface::Interface,
    I::Error: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Error::UnknownVic(vic) => write!(f, "no timing for {}", vic),
            Error::Interface(err) => write!(f, "register access failed: {:?}", err),
        }
    }
}

impl<I> PartialEq for Error<I>
where
    I: crate::interface::Interface,
    I::Error: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::UnknownVic(a), Error::UnknownVic(b)) => a == b,
            (Error::Interface(a), Error::Interface(b)) => a == b,
            _ => false,
        }
    }
}
