use crate::error::Error;
use crate::interface::Interface;
use crate::registers::{RegValue, Register};

/// `LowLevel` is a thin layer over an [`Interface`] matching the register
/// primitives used in the encoder programming guides: single-register
/// reads and writes, partial bit updates, and fixed register sequences.
///
/// It has no knowledge of what any register means. It adds access logging
/// at the `trace` level and converts interface errors into [`Error`] so that
/// callers can use `?` throughout.
pub struct LowLevel<I: Interface> {
    raw: I,
}

impl<I: Interface> LowLevel<I> {
    pub fn new(interface: I) -> Self {
        Self { raw: interface }
    }

    pub fn rd(&mut self, reg: Register) -> Result<u32, Error<I>> {
        let v = Error::interface_result(self.raw.read(reg))?;
        log::trace!("rd {:?} ({:#06x}) -> {:#x}", reg, reg.number(), v);
        Ok(v)
    }

    pub fn wr(&mut self, reg: Register, v: u32) -> Result<(), Error<I>> {
        log::trace!("wr {:?} ({:#06x}) <- {:#x}", reg, reg.number(), v);
        Error::interface_result(self.raw.write(reg, v))
    }

    pub fn set_bits(
        &mut self,
        reg: Register,
        value: u32,
        start: u32,
        width: u32,
    ) -> Result<(), Error<I>> {
        log::trace!(
            "set_bits {:?} ({:#06x}) [{}+:{}] <- {:#x}",
            reg,
            reg.number(),
            start,
            width,
            value
        );
        Error::interface_result(self.raw.set_bits(reg, value, start, width))
    }

    /// Writes each entry of a fixed register sequence, in order.
    ///
    /// There's no validation of the table contents: every entry is written
    /// verbatim. `None` and empty tables write nothing.
    pub fn write_table(&mut self, table: Option<&[RegValue]>) -> Result<(), Error<I>> {
        let table = match table {
            Some(t) => t,
            None => return Ok(()),
        };
        for entry in table {
            self.wr(entry.reg, entry.value)?;
        }
        Ok(())
    }

    pub fn borrow_interface<'a>(&'a mut self) -> &'a mut I {
        &mut self.raw
    }

    pub fn into_interface(self) -> I {
        self.raw
    }
}
