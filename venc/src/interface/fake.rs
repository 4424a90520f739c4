//! Fake `Interface` implementation for testing and dry runs.

use crate::registers::Register;

/// Run the given function with a ready-to-use instance of the fake
/// `Interface`, backed by a zeroed register file.
///
/// This is only here to make it easy to write testable code examples in the
/// crate documentation.
#[doc(hidden)]
pub fn interface_example(f: impl FnOnce(Interface<&mut [u32]>)) {
    let mut regs: [u32; Register::FILE_LEN] = [0; Register::FILE_LEN];
    f(Interface::new(&mut regs[..]));
}

/// An implementation of [`Interface`](super::Interface) which just reads and
/// writes a register file in local RAM.
///
/// This type alone doesn't implement any of the side-effects the real
/// encoders have, but it remembers everything written to it and so it's
/// enough to see what a particular configuration sequence leaves behind.
pub struct Interface<RF: RegisterFile> {
    registers: RF,
    reads: usize,
    writes: usize,
}

impl<RF: RegisterFile> Interface<RF> {
    pub fn new(registers: RF) -> Self {
        Self {
            registers,
            reads: 0,
            writes: 0,
        }
    }

    /// Returns the current value of the given register without counting it
    /// as a read.
    pub fn peek(&self, reg: Register) -> u32 {
        self.registers.internal_read(reg)
    }

    /// Returns the number of reads and writes performed so far.
    pub fn access_counts(&self) -> (usize, usize) {
        (self.reads, self.writes)
    }

    pub fn into_inner(self) -> RF {
        self.registers
    }
}

impl<RF: RegisterFile> super::Interface for Interface<RF> {
    type Error = RF::Error;

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        self.reads += 1;
        self.registers.read(reg)
    }

    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error> {
        self.writes += 1;
        self.registers.write(reg, v)
    }
}

/// Implemented by types that serve as "hooks" for implementing register
/// behaviors.
pub trait RegisterFile {
    type Error: core::fmt::Debug;

    /// Directly read the backing store for the given register, with no
    /// side-effects and no failures.
    fn internal_read(&self, reg: Register) -> u32;

    /// Write a new value to the given register, and take any side-effects that
    /// the write might imply.
    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error>;

    /// Read the value of the given register and also take any side-effects
    /// that the read might imply.
    ///
    /// The default implementation of `read` is just a thin wrapper around
    /// `internal_read`. Implementations can override it to add any additional
    /// side-effects.
    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        Ok(self.internal_read(reg))
    }
}

impl RegisterFile for &mut [u32] {
    type Error = SliceError;

    fn internal_read(&self, reg: Register) -> u32 {
        let idx = reg.index();
        if idx >= self.len() {
            return 0x00000000; // an arbitrary placeholder value
        }
        self[idx]
    }

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        let idx = reg.index();
        if idx >= self.len() {
            return Err(Self::Error::OutOfBounds {
                size: self.len(),
                index: idx,
            });
        }
        Ok(self.internal_read(reg))
    }

    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error> {
        let idx = reg.index();
        if idx >= self.len() {
            return Err(Self::Error::OutOfBounds {
                size: self.len(),
                index: idx,
            });
        }
        self[idx] = v;
        Ok(())
    }
}

/// Error type for when register accesses are backed by a slice value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceError {
    OutOfBounds { size: usize, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Interface as _;

    #[test]
    fn test_read_back() {
        interface_example(|mut ei| {
            ei.write(Register::ENCP_VIDEO_HAVON_BEGIN, 192).unwrap();
            assert_eq!(ei.read(Register::ENCP_VIDEO_HAVON_BEGIN).unwrap(), 192);
            assert_eq!(ei.read(Register::ENCP_VIDEO_HAVON_END).unwrap(), 0);
            assert_eq!(ei.access_counts(), (2, 1));
            assert_eq!(ei.peek(Register::ENCP_VIDEO_HAVON_BEGIN), 192);
        })
    }

    #[test]
    fn test_short_register_file() {
        let mut regs: [u32; 4] = [0; 4];
        let mut ei = Interface::new(&mut regs[..]);
        ei.write(Register::ENCI_VIDEO_MODE, 0x13).unwrap();
        assert_eq!(
            ei.write(Register::VPU_HDMI_SETTING, 1),
            Err(SliceError::OutOfBounds {
                size: 4,
                index: Register::VPU_HDMI_SETTING.index(),
            })
        );
        assert_eq!(ei.peek(Register::VPU_HDMI_SETTING), 0);
    }

    #[test]
    fn test_set_bits_through_fake() {
        interface_example(|mut ei| {
            ei.write(Register::VPU_HDMI_SETTING, 0x8c).unwrap();
            ei.set_bits(Register::VPU_HDMI_SETTING, 1, 1, 1).unwrap();
            assert_eq!(ei.peek(Register::VPU_HDMI_SETTING), 0x8e);
        })
    }
}
