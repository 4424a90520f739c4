use crate::registers::Register;

pub mod fake;

/// Implementations of `Interface` serve as adapters between the register
/// access this library expects and a specific physical route to the VPU
/// registers, such as a memory-mapped register window.
///
/// The main library contains no hardware implementations of this trait, in
/// order to keep it portable. The `venc-mmio` crate binds it to a real
/// memory-mapped register window.
///
/// Implementations must not buffer or reorder accesses: a value written must
/// be what a subsequent `read` of the same register observes, because several
/// of the timing calculations read back registers they have just written.
pub trait Interface {
    type Error;

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error>;
    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error>;

    /// Replaces the `width` bits of `reg` starting at bit `start` with the
    /// low bits of `value`, leaving all of the other bits unchanged.
    ///
    /// The default implementation is a read-modify-write using `read` and
    /// `write`. Implementations that have a cheaper way to do a partial
    /// update can override it.
    fn set_bits(
        &mut self,
        reg: Register,
        value: u32,
        start: u32,
        width: u32,
    ) -> Result<(), Self::Error> {
        let old = self.read(reg)?;
        self.write(reg, insert_bits(old, value, start, width))
    }
}

/// Returns `old` with `width` bits starting at `start` replaced by the low
/// bits of `value`.
pub const fn insert_bits(old: u32, value: u32, start: u32, width: u32) -> u32 {
    let mask = if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    };
    (old & !(mask << start)) | ((value & mask) << start)
}

impl<I: Interface + ?Sized> Interface for &mut I {
    type Error = I::Error;

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error> {
        (**self).write(reg, v)
    }

    fn set_bits(
        &mut self,
        reg: Register,
        value: u32,
        start: u32,
        width: u32,
    ) -> Result<(), Self::Error> {
        (**self).set_bits(reg, value, start, width)
    }
}

// The crate links std in test mode only, so the mock can do dynamic
// allocation.
#[cfg(test)]
pub mod testing {
    use super::{insert_bits, Interface};
    use crate::registers::Register;
    use std::collections::HashMap;
    use std::vec::Vec;

    /// A test double for `trait Interface`, available only in test mode.
    pub struct MockInterface {
        // _regs is a sparse representation of the register space which
        // remembers what was written into it and returns zero for any
        // register that wasn't previously written.
        _regs: HashMap<Register, u32>,

        // if _fail is Some then the mock methods will call it and use the
        // result to decide whether to return an error.
        _fail: Option<fn(&MockInterfaceCall) -> bool>,

        // _calls is the call log. Each call to a mock method appends one
        // entry to this vector, including any that fail.
        _calls: Vec<MockInterfaceCall>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum MockInterfaceCall {
        Write(Register, u32),
        Read(Register),
        SetBits(Register, u32, u32, u32),
    }

    impl MockInterface {
        pub fn new() -> Self {
            Self {
                _regs: HashMap::new(),
                _fail: None,
                _calls: Vec::new(),
            }
        }

        pub fn with_fail(mut self, fail: fn(&MockInterfaceCall) -> bool) -> Self {
            self._fail = Some(fail);
            self
        }

        /// Returns the calls logged so far, in order.
        pub fn calls(&self) -> &[MockInterfaceCall] {
            &self._calls
        }

        /// Returns only the logged writes, as (register, value) pairs.
        pub fn writes(&self) -> Vec<(Register, u32)> {
            self._calls
                .iter()
                .filter_map(|c| match c {
                    MockInterfaceCall::Write(reg, v) => Some((*reg, *v)),
                    _ => None,
                })
                .collect()
        }

        /// Returns the value most recently written to the given register,
        /// or zero if it was never written.
        pub fn reg(&self, reg: Register) -> u32 {
            self._regs.get(&reg).copied().unwrap_or(0)
        }

        // Puts a value into the fake register space without considering it
        // to be a logged operation. This is intended for setting up
        // registers ready for subsequent calls to `read`.
        pub fn setup_reg(&mut self, reg: Register, v: u32) {
            self._regs.insert(reg, v);
        }

        fn log(&mut self, call: MockInterfaceCall) -> Result<(), ()> {
            if let Some(fail) = self._fail {
                if fail(&call) {
                    self._calls.push(call);
                    return Err(());
                }
            }
            self._calls.push(call);
            Ok(())
        }
    }

    impl Interface for MockInterface {
        type Error = ();

        fn read(&mut self, reg: Register) -> core::result::Result<u32, ()> {
            self.log(MockInterfaceCall::Read(reg))?;
            Ok(self.reg(reg))
        }

        fn write(&mut self, reg: Register, v: u32) -> core::result::Result<(), ()> {
            self.log(MockInterfaceCall::Write(reg, v))?;
            self.setup_reg(reg, v);
            Ok(())
        }

        fn set_bits(
            &mut self,
            reg: Register,
            value: u32,
            start: u32,
            width: u32,
        ) -> core::result::Result<(), ()> {
            self.log(MockInterfaceCall::SetBits(reg, value, start, width))?;
            let v = insert_bits(self.reg(reg), value, start, width);
            self.setup_reg(reg, v);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_bits() {
        assert_eq!(insert_bits(0x0000_0000, 1, 1, 1), 0x0000_0002);
        assert_eq!(insert_bits(0xffff_ffff, 0, 1, 1), 0xffff_fffd);
        assert_eq!(insert_bits(0x0000_0f0f, 0xa, 4, 4), 0x0000_0faf);
        // Bits of the value beyond the field width are discarded.
        assert_eq!(insert_bits(0, 0xff, 0, 4), 0x0f);
        assert_eq!(insert_bits(0x1234_5678, 0xdead_beef, 0, 32), 0xdead_beef);
    }

    #[test]
    fn test_default_set_bits_preserves_other_bits() {
        struct Plain(u32);
        impl Interface for Plain {
            type Error = ();
            fn read(&mut self, _reg: Register) -> Result<u32, ()> {
                Ok(self.0)
            }
            fn write(&mut self, _reg: Register, v: u32) -> Result<(), ()> {
                self.0 = v;
                Ok(())
            }
        }

        let mut ei = Plain(0x0000_008c);
        ei.set_bits(Register::VPU_HDMI_SETTING, 1, 1, 1).unwrap();
        assert_eq!(ei.0, 0x0000_008e);
    }
}
