#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;
use venc::interface::Interface;
use venc::registers::Register;

/// `MmioInterface` is an implementation of `venc::Interface` that accesses
/// the VPU registers through a memory-mapped register window.
///
/// Each register is a 32-bit word at byte offset `reg << 2` from the start
/// of the window. Every access is a single volatile load or store, issued in
/// program order.
pub struct MmioInterface {
    base: *mut u32,
}

impl MmioInterface {
    /// Create a new interface for the VPU register window starting at
    /// `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of the VPU register window (or of memory
    /// standing in for it) mapped for reading and writing, covering at least
    /// every register number in [`Register`], for as long as the returned
    /// object exists. Nothing else may access that window concurrently.
    pub unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }

    pub fn base(&self) -> *mut u32 {
        self.base
    }

    fn addr(&self, reg: Register) -> *mut u32 {
        // Register numbers count words, so adding them to a word pointer
        // gives byte offset `reg << 2`.
        self.base.wrapping_add(reg.number() as usize)
    }
}

impl Interface for MmioInterface {
    type Error = Infallible;

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        // Safety: `new`'s caller promised the window covers every register.
        Ok(unsafe { self.addr(reg).read_volatile() })
    }

    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error> {
        unsafe { self.addr(reg).write_volatile(v) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venc::{EncoderIndex, Venc, Vic};

    fn window() -> Vec<u32> {
        vec![0; Register::LAST.number() as usize + 1]
    }

    #[test]
    fn test_addressing() {
        let mut mem = window();
        let mut ei = unsafe { MmioInterface::new(mem.as_mut_ptr()) };
        ei.write(Register::ENCP_VIDEO_EN, 0xdead_beef).unwrap();
        ei.write(Register::VPU_HDMI_SETTING, 0x8c).unwrap();
        assert_eq!(ei.read(Register::ENCP_VIDEO_EN), Ok(0xdead_beef));
        assert_eq!(
            ei.addr(Register::ENCP_VIDEO_EN) as usize - ei.base() as usize,
            Register::ENCP_VIDEO_EN.byte_offset()
        );
        drop(ei);

        assert_eq!(mem[0x1b80], 0xdead_beef);
        assert_eq!(mem[0x271b], 0x8c);
        assert_eq!(mem.iter().filter(|v| **v != 0).count(), 2);
    }

    #[test]
    fn test_set_bits() {
        let mut mem = window();
        mem[Register::VPU_HDMI_SETTING.number() as usize] = 0x8c;
        let mut ei = unsafe { MmioInterface::new(mem.as_mut_ptr()) };
        ei.set_bits(Register::VPU_HDMI_SETTING, 1, 1, 1).unwrap();
        assert_eq!(ei.read(Register::VPU_HDMI_SETTING), Ok(0x8e));
    }

    #[test]
    fn test_with_venc() {
        let mut mem = window();
        let ei = unsafe { MmioInterface::new(mem.as_mut_ptr()) };
        let mut venc = Venc::new(ei);
        venc.configure_progressive_encoder(EncoderIndex::Venc0, Vic::VIC_1920X1080P60, true)
            .unwrap();
        venc.set_encoder_enable(true, true).unwrap();
        drop(venc);

        assert_eq!(mem[Register::ENCP_VIDEO_MAX_PXCNT.number() as usize], 2199);
        assert_eq!(mem[Register::ENCP_VIDEO_MAX_LNCNT.number() as usize], 1124);
        assert_eq!(mem[Register::ENCP_VIDEO_EN.number() as usize], 1);
    }
}
