//! Fetch/decode/execute for the required real-mode instruction subset,
//! real-mode segmentation, flag computation, and interrupt entry.

use std::fmt;
use std::sync::Arc;

use crate::bios::{self, BiosRegisters};
use crate::disk::IdeDisk;
use crate::error::{EmulatorError, Result};
use crate::fields::{decode_modrm, flag, modrm_disp_len, RegId, RegMem};
use crate::interrupts::InterruptController;
use crate::io::IoBus;
use crate::memory::Memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegReg {
    Cs,
    Ds,
    Es,
    Fs,
    Gs,
    Ss,
}

pub struct Cpu {
    /// General registers A, C, D, B, SP, BP, SI, DI, indexed by `RegId as usize`.
    regs: [u32; 8],
    segs: [u16; 6],
    ip: u16,
    flags: u32,
    pub running: bool,
    ic: Arc<InterruptController>,
    bios_enabled: bool,
}

impl Cpu {
    pub fn new(ic: Arc<InterruptController>) -> Self {
        let mut cpu = Cpu {
            regs: [0; 8],
            segs: [0; 6],
            ip: 0,
            flags: 0,
            running: true,
            ic,
            bios_enabled: true,
        };
        cpu.reset();
        cpu
    }

    pub fn reset(&mut self) {
        self.regs = [0; 8];
        self.segs = [0; 6];
        self.segs[SegReg::Cs as usize] = 0xF000;
        self.ip = 0xFFF0;
        self.flags = 0x0000_0002;
        self.running = true;
    }

    pub fn set_bios_enabled(&mut self, enabled: bool) {
        self.bios_enabled = enabled;
    }

    /// Forces CS:IP directly, bypassing the reset-vector far-jump protocol.
    /// Used by callers (tests, and a debugger's `jump` command) that need
    /// to place execution at an arbitrary address rather than power-on
    /// reset.
    pub fn force_cs_ip(&mut self, cs: u16, ip: u16) {
        self.set_seg(SegReg::Cs, cs);
        self.ip = ip;
    }

    pub fn reg(&self, id: RegId) -> u32 {
        self.regs[id as usize]
    }

    pub fn word(&self, id: RegId) -> u16 {
        self.regs[id as usize] as u16
    }

    pub fn set_word(&mut self, id: RegId, value: u16) {
        let slot = &mut self.regs[id as usize];
        *slot = (*slot & 0xFFFF_0000) | value as u32;
    }

    pub fn seg(&self, s: SegReg) -> u16 {
        self.segs[s as usize]
    }

    fn set_seg(&mut self, s: SegReg, value: u16) {
        self.segs[s as usize] = value;
    }

    pub fn ip(&self) -> u16 {
        self.ip
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn flag(&self, bit: u32) -> bool {
        crate::fields::get_bit(self.flags, bit)
    }

    pub fn set_flag(&mut self, bit: u32, value: bool) {
        self.flags = crate::fields::set_bit(self.flags, bit, value);
    }

    fn physical(seg: u16, offset: u16) -> u32 {
        ((seg as u32) << 4) + offset as u32
    }

    fn advance_ip(&mut self, by: u16) {
        self.ip = self.ip.wrapping_add(by);
    }

    fn fetch8(&mut self, memory: &Memory) -> Result<u8> {
        let addr = Self::physical(self.seg(SegReg::Cs), self.ip) & 0xFFFFF;
        let byte = memory.read8(addr)?;
        self.advance_ip(1);
        Ok(byte)
    }

    fn fetch16(&mut self, memory: &Memory) -> Result<u16> {
        let lo = self.fetch8(memory)?;
        let hi = self.fetch8(memory)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn push16(&mut self, memory: &mut Memory, value: u16) -> Result<()> {
        let sp = self.word(RegId::Sp).wrapping_sub(2);
        self.set_word(RegId::Sp, sp);
        memory.write16(Self::physical(self.seg(SegReg::Ss), sp), value)
    }

    fn pop16(&mut self, memory: &Memory) -> Result<u16> {
        let sp = self.word(RegId::Sp);
        let value = memory.read16(Self::physical(self.seg(SegReg::Ss), sp))?;
        self.set_word(RegId::Sp, sp.wrapping_add(2));
        Ok(value)
    }

    /// One instruction-boundary step: delivers a pending interrupt if IF is
    /// set and one is pending, otherwise fetches and executes one opcode.
    pub fn step(&mut self, memory: &mut Memory, io: &IoBus, disk: &mut IdeDisk) -> Result<()> {
        if self.flag(flag::IF) {
            if let Some(vector) = self.ic.get_pending_interrupt() {
                return self.enter_interrupt(memory, vector);
            }
        }
        let fault_cs = self.seg(SegReg::Cs);
        let fault_ip = self.ip;
        let opcode = self.fetch8(memory)?;
        self.execute(opcode, memory, io, disk)
            .map_err(|e| match e {
                EmulatorError::UnimplementedOpcode { opcode, .. } => {
                    EmulatorError::UnimplementedOpcode {
                        opcode,
                        cs: fault_cs,
                        ip: fault_ip,
                    }
                }
                other => other,
            })
    }

    fn enter_interrupt(&mut self, memory: &mut Memory, vector: u8) -> Result<()> {
        let flags = self.flags as u16;
        self.set_flag(flag::IF, false);
        self.set_flag(flag::TF, false);
        self.push16(memory, flags)?;
        self.push16(memory, self.seg(SegReg::Cs))?;
        self.push16(memory, self.ip)?;
        self.load_vector(memory, vector)
    }

    fn load_vector(&mut self, memory: &Memory, vector: u8) -> Result<()> {
        let entry = vector as u32 * 4;
        let new_ip = memory.read16(entry)?;
        let new_cs = memory.read16(entry + 2)?;
        self.ip = new_ip;
        self.set_seg(SegReg::Cs, new_cs);
        Ok(())
    }

    fn software_interrupt(
        &mut self,
        memory: &mut Memory,
        io: &IoBus,
        disk: &mut IdeDisk,
        vector: u8,
    ) -> Result<()> {
        if self.bios_enabled {
            if let Some(result) = self.dispatch_bios(memory, io, disk, vector)? {
                if let Some(ax) = result.ax {
                    self.set_word(RegId::A, ax);
                }
                if let Some(cx) = result.cx {
                    self.set_word(RegId::C, cx);
                }
                if let Some(dx) = result.dx {
                    self.set_word(RegId::D, dx);
                }
                if let Some(cf) = result.cf {
                    self.set_flag(flag::CF, cf);
                }
                return Ok(());
            }
        }
        let flags = self.flags as u16;
        self.set_flag(flag::IF, false);
        self.set_flag(flag::TF, false);
        self.push16(memory, flags)?;
        self.push16(memory, self.seg(SegReg::Cs))?;
        self.push16(memory, self.ip)?;
        self.load_vector(memory, vector)
    }

    fn dispatch_bios(
        &mut self,
        memory: &mut Memory,
        _io: &IoBus,
        disk: &mut IdeDisk,
        vector: u8,
    ) -> Result<Option<bios::BiosResult>> {
        let regs = BiosRegisters {
            ax: self.word(RegId::A),
            bx: self.word(RegId::B),
            cx: self.word(RegId::C),
            dx: self.word(RegId::D),
            es: self.seg(SegReg::Es),
        };
        match vector {
            bios::INT_VIDEO => Ok(Some(bios::handle_int10(memory, &regs)?)),
            bios::INT_DISK => {
                let ch = (regs.cx >> 8) as u8;
                let cl = regs.cx as u8;
                let dh = (regs.dx >> 8) as u8;
                Ok(Some(bios::handle_int13(memory, disk, &regs, ch, cl, dh)?))
            }
            bios::INT_SYSTEM => Ok(Some(bios::handle_int15(memory, regs.ax as u32)?)),
            _ => Ok(None),
        }
    }

    fn read_rm16(&self, memory: &Memory, rm: RegMem, seg: SegReg) -> Result<u16> {
        match rm {
            RegMem::Reg(id) => Ok(self.word(id)),
            RegMem::Mem { offset } => memory.read16(Self::physical(self.seg(seg), offset)),
        }
    }

    fn write_rm16(&mut self, memory: &mut Memory, rm: RegMem, seg: SegReg, value: u16) -> Result<()> {
        match rm {
            RegMem::Reg(id) => {
                self.set_word(id, value);
                Ok(())
            }
            RegMem::Mem { offset } => memory.write16(Self::physical(self.seg(seg), offset), value),
        }
    }

    fn fetch_modrm(&mut self, memory: &Memory) -> Result<crate::fields::ModRm> {
        let modrm = self.fetch8(memory)?;
        let disp_len = modrm_disp_len(modrm);
        let mut disp_bytes = [0u8; 2];
        for b in disp_bytes.iter_mut().take(disp_len) {
            *b = self.fetch8(memory)?;
        }
        let regs = self.regs;
        let (decoded, _) = decode_modrm(modrm, &disp_bytes, |id| regs[(id & 7) as usize] as u16);
        Ok(decoded)
    }

    fn execute(
        &mut self,
        opcode: u8,
        memory: &mut Memory,
        io: &IoBus,
        disk: &mut IdeDisk,
    ) -> Result<()> {
        match opcode {
            0xEA => {
                let new_ip = self.fetch16(memory)?;
                let new_cs = self.fetch16(memory)?;
                self.ip = new_ip;
                self.set_seg(SegReg::Cs, new_cs);
            }
            0xCD => {
                let vector = self.fetch8(memory)?;
                self.software_interrupt(memory, io, disk, vector)?;
            }
            0x90 => {}
            0xB8 => {
                let imm = self.fetch16(memory)?;
                self.set_word(RegId::A, imm);
            }
            0x05 => {
                let imm = self.fetch16(memory)?;
                let a = self.word(RegId::A);
                let (result, flags) = add16(a, imm);
                self.apply_arith_flags(flags);
                self.set_word(RegId::A, result);
            }
            0x3D => {
                let imm = self.fetch16(memory)?;
                let a = self.word(RegId::A);
                let (_, flags) = sub16(a, imm);
                self.apply_arith_flags(flags);
            }
            0xE8 => {
                let disp = self.fetch16(memory)? as i16;
                let ret = self.ip;
                self.push16(memory, ret)?;
                self.ip = self.ip.wrapping_add(disp as u16);
            }
            0xC3 => {
                self.ip = self.pop16(memory)?;
            }
            0x8B => {
                let modrm = self.fetch_modrm(memory)?;
                let value = self.read_rm16(memory, modrm.rm, SegReg::Ds)?;
                self.set_word(modrm.reg, value);
            }
            0x89 => {
                let modrm = self.fetch_modrm(memory)?;
                let value = self.word(modrm.reg);
                self.write_rm16(memory, modrm.rm, SegReg::Ds, value)?;
            }
            0x50..=0x57 => {
                let id = RegId::from_bits(opcode & 7);
                let value = self.word(id);
                self.push16(memory, value)?;
            }
            0x58..=0x5F => {
                let id = RegId::from_bits(opcode & 7);
                let value = self.pop16(memory)?;
                self.set_word(id, value);
            }
            0x70..=0x7F => {
                let disp = self.fetch8(memory)? as i8;
                if self.evaluate_condition(opcode & 0x0F) {
                    self.ip = self.ip.wrapping_add(disp as i16 as u16);
                }
            }
            0xE2 => {
                let disp = self.fetch8(memory)? as i8;
                let c = self.word(RegId::C).wrapping_sub(1);
                self.set_word(RegId::C, c);
                if c != 0 {
                    self.ip = self.ip.wrapping_add(disp as i16 as u16);
                }
            }
            0xAA => {
                let al = self.word(RegId::A) as u8;
                let di = self.word(RegId::Di);
                memory.write8(Self::physical(self.seg(SegReg::Es), di), al)?;
                self.step_index(RegId::Di, 1);
            }
            0xAC => {
                let si = self.word(RegId::Si);
                let al = memory.read8(Self::physical(self.seg(SegReg::Ds), si))?;
                self.set_word(RegId::A, (self.word(RegId::A) & 0xFF00) | al as u16);
                self.step_index(RegId::Si, 1);
            }
            0xF3 => {
                let rep_opcode = self.fetch8(memory)?;
                self.execute_rep(rep_opcode, memory)?;
            }
            other => {
                return Err(EmulatorError::UnimplementedOpcode {
                    opcode: other,
                    cs: 0,
                    ip: 0,
                })
            }
        }
        Ok(())
    }

    fn step_index(&mut self, id: RegId, size: u16) {
        let df = self.flag(flag::DF);
        let cur = self.word(id);
        let next = if df {
            cur.wrapping_sub(size)
        } else {
            cur.wrapping_add(size)
        };
        self.set_word(id, next);
    }

    fn execute_rep(&mut self, rep_opcode: u8, memory: &mut Memory) -> Result<()> {
        let size: u16 = if rep_opcode == 0xA5 { 2 } else { 1 };
        loop {
            let c = self.word(RegId::C);
            if c == 0 {
                break;
            }
            match rep_opcode {
                0xA4 => {
                    let si = self.word(RegId::Si);
                    let di = self.word(RegId::Di);
                    let byte = memory.read8(Self::physical(self.seg(SegReg::Ds), si))?;
                    memory.write8(Self::physical(self.seg(SegReg::Es), di), byte)?;
                    self.step_index(RegId::Si, 1);
                    self.step_index(RegId::Di, 1);
                }
                0xA5 => {
                    let si = self.word(RegId::Si);
                    let di = self.word(RegId::Di);
                    let word = memory.read16(Self::physical(self.seg(SegReg::Ds), si))?;
                    memory.write16(Self::physical(self.seg(SegReg::Es), di), word)?;
                    self.step_index(RegId::Si, size);
                    self.step_index(RegId::Di, size);
                }
                0xAA => {
                    let al = self.word(RegId::A) as u8;
                    let di = self.word(RegId::Di);
                    memory.write8(Self::physical(self.seg(SegReg::Es), di), al)?;
                    self.step_index(RegId::Di, 1);
                }
                other => {
                    return Err(EmulatorError::UnimplementedOpcode {
                        opcode: other,
                        cs: 0,
                        ip: 0,
                    })
                }
            }
            self.set_word(RegId::C, c.wrapping_sub(1));
        }
        Ok(())
    }

    fn evaluate_condition(&self, cond: u8) -> bool {
        match cond {
            0x0 => self.flag(flag::OF),
            0x1 => !self.flag(flag::OF),
            0x2 => self.flag(flag::CF),
            0x3 => !self.flag(flag::CF),
            0x4 => self.flag(flag::ZF),
            0x5 => !self.flag(flag::ZF),
            0x8 => self.flag(flag::SF),
            0x9 => !self.flag(flag::SF),
            _ => false,
        }
    }

    fn apply_arith_flags(&mut self, flags: ArithFlags) {
        self.set_flag(flag::CF, flags.cf);
        self.set_flag(flag::ZF, flags.zf);
        self.set_flag(flag::SF, flags.sf);
        self.set_flag(flag::OF, flags.of);
    }
}

struct ArithFlags {
    cf: bool,
    zf: bool,
    sf: bool,
    of: bool,
}

fn add16(a: u16, b: u16) -> (u16, ArithFlags) {
    let full = a as u32 + b as u32;
    let result = full as u16;
    let cf = full > 0xFFFF;
    let zf = result == 0;
    let sf = result & 0x8000 != 0;
    let of = (a ^ result) & (b ^ result) & 0x8000 != 0;
    (result, ArithFlags { cf, zf, sf, of })
}

fn sub16(a: u16, b: u16) -> (u16, ArithFlags) {
    let result = a.wrapping_sub(b);
    let cf = a < b;
    let zf = result == 0;
    let sf = result & 0x8000 != 0;
    let of = (a ^ b) & (a ^ result) & 0x8000 != 0;
    (result, ArithFlags { cf, zf, sf, of })
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "AX={:04X} BX={:04X} CX={:04X} DX={:04X} SI={:04X} DI={:04X} BP={:04X} SP={:04X}",
            self.word(RegId::A),
            self.word(RegId::B),
            self.word(RegId::C),
            self.word(RegId::D),
            self.word(RegId::Si),
            self.word(RegId::Di),
            self.word(RegId::Bp),
            self.word(RegId::Sp),
        )?;
        write!(
            f,
            "CS={:04X} IP={:04X} FLAGS={:08X}",
            self.seg(SegReg::Cs),
            self.ip,
            self.flags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn scratch_disk() -> IdeDisk {
        let path = NamedTempFile::new().unwrap().into_temp_path();
        let path_str = path.to_str().unwrap().to_string();
        std::fs::remove_file(&path_str).ok();
        let geometry = crate::disk::Geometry {
            cylinders: 4,
            heads: 4,
            sectors: 16,
        };
        IdeDisk::create(&path_str, geometry).unwrap()
    }

    fn run_program(program: &[u8]) -> (Cpu, Memory) {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.reset();
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        let mut memory = Memory::new(0x10000);
        memory.write_bytes(0x7C00, program).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        for _ in 0..program.len() {
            cpu.step(&mut memory, &io, &mut disk).unwrap();
        }
        (cpu, memory)
    }

    #[test]
    fn mov_and_add_set_expected_registers_and_flags() {
        let program = [0xB8, 0x34, 0x12, 0x05, 0x01, 0x00];
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        let mut memory = Memory::new(0x10000);
        memory.write_bytes(0x7C00, &program).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        assert_eq!(cpu.word(RegId::A), 0x1235);
        assert!(!cpu.flag(flag::ZF));
        assert!(!cpu.flag(flag::CF));
    }

    #[test]
    fn add_overflow_sets_sf_and_of() {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.set_word(RegId::A, 0x7FFF);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        let mut memory = Memory::new(0x10000);
        memory.write_bytes(0x7C00, &[0x05, 0x01, 0x00]).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        assert_eq!(cpu.word(RegId::A), 0x8000);
        assert!(cpu.flag(flag::SF));
        assert!(cpu.flag(flag::OF));
        assert!(!cpu.flag(flag::CF));
        assert!(!cpu.flag(flag::ZF));
    }

    #[test]
    fn software_interrupt_pushes_flags_cs_ip_and_loads_ivt_entry() {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        cpu.set_word(RegId::Sp, 0x2000);
        cpu.set_seg(SegReg::Ss, 0);
        let mut memory = Memory::new(0x10000);
        memory.write16(0x21 * 4, 0x1234).unwrap();
        memory.write16(0x21 * 4 + 2, 0x5678).unwrap();
        memory.write_bytes(0x7C00, &[0xCD, 0x21]).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        let old_flags = cpu.flags() as u16;
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        assert_eq!(cpu.seg(SegReg::Cs), 0x5678);
        assert_eq!(cpu.ip(), 0x1234);
        let sp = cpu.word(RegId::Sp);
        assert_eq!(memory.read16(Cpu::physical(0, sp)).unwrap(), 0x7C02);
        assert_eq!(memory.read16(Cpu::physical(0, sp + 2)).unwrap(), 0);
        assert_eq!(memory.read16(Cpu::physical(0, sp + 4)).unwrap(), old_flags);
    }

    #[test]
    fn hardware_irq_defers_fetch_and_enters_vector() {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(Arc::clone(&ic));
        cpu.set_bios_enabled(false);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        cpu.set_word(RegId::Sp, 0x2000);
        cpu.set_flag(flag::IF, true);
        let mut memory = Memory::new(0x10000);
        memory.write16(0x08 * 4, 0xABCD).unwrap();
        memory.write16(0x08 * 4 + 2, 0x9000).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        ic.request_irq(0);
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        assert_eq!(cpu.seg(SegReg::Cs), 0x9000);
        assert_eq!(cpu.ip(), 0xABCD);
    }

    #[test]
    fn rep_movsb_copies_and_advances_indices() {
        let mut memory = Memory::new(0x10000);
        memory.write_bytes(0x100, &[1, 2, 3, 4]).unwrap();
        let program = [0xF3, 0xA4];
        memory.write_bytes(0x7C00, &program).unwrap();
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        cpu.set_word(RegId::Si, 0x100);
        cpu.set_word(RegId::Di, 0x200);
        cpu.set_word(RegId::C, 4);
        let io = IoBus::new();
        let mut disk = scratch_disk();
        cpu.step(&mut memory, &io, &mut disk).unwrap();
        assert_eq!(memory.read_bytes(0x200, 4).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(cpu.word(RegId::C), 0);
        assert_eq!(cpu.word(RegId::Si), 0x104);
        assert_eq!(cpu.word(RegId::Di), 0x204);
    }

    #[test]
    fn reset_to_boot_sector_far_jump() {
        let (cpu, _memory) = run_program_at_reset(&[0x90, 0xC3]);
        assert_eq!(cpu.seg(SegReg::Cs), 0);
        assert_eq!(cpu.ip(), 0x7C01);
    }

    fn run_program_at_reset(boot: &[u8]) -> (Cpu, Memory) {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        let mut memory = Memory::new(0x200000);
        memory.write_bytes(0x7C00, boot).unwrap();
        memory
            .write_bytes(bios::RESET_VECTOR_ADDR, &[0xEA, 0x00, 0x7C, 0x00, 0x00])
            .unwrap();
        cpu.ip = 0xFFF0;
        cpu.set_seg(SegReg::Cs, 0xF000);
        let io = IoBus::new();
        let mut disk = scratch_disk();
        cpu.step(&mut memory, &io, &mut disk).unwrap(); // far jump
        cpu.step(&mut memory, &io, &mut disk).unwrap(); // NOP at 7C00
        (cpu, memory)
    }

    #[test]
    fn unimplemented_opcode_reports_faulting_address() {
        let ic = Arc::new(InterruptController::new());
        let mut cpu = Cpu::new(ic);
        cpu.set_bios_enabled(false);
        cpu.set_seg(SegReg::Cs, 0);
        cpu.ip = 0x7C00;
        let mut memory = Memory::new(0x10000);
        memory.write_bytes(0x7C00, &[0x0F]).unwrap();
        let io = IoBus::new();
        let mut disk = scratch_disk();
        let err = cpu.step(&mut memory, &io, &mut disk).unwrap_err();
        match err {
            EmulatorError::UnimplementedOpcode { opcode, cs, ip } => {
                assert_eq!(opcode, 0x0F);
                assert_eq!(cs, 0);
                assert_eq!(ip, 0x7C00);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
