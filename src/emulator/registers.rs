//! The register file: V0 to VF, I, PC, the two timers and the call stack.

use crate::emulator::error::EmulatorError;
use crate::emulator::instruction::Reg;
use crate::emulator::memory::PROGRAM_START;
use std::fmt;

pub const NUM_REGISTERS: usize = 16;

/// Maximum number of nested subroutine calls.
pub const STACK_SIZE: usize = 16;

/// The flag register.
pub const VF: Reg = Reg(0xF);

/// Every field is stored at its declared width, so all writes wrap
/// (8 bits for V0 to VF and the timers, 16 bits for I and PC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; NUM_REGISTERS],
    i: u16,
    pc: u16,
    delay_timer: u8,
    sound_timer: u8,
    stack: Vec<u16>,
}

impl Registers {
    pub fn new() -> Registers {
        Registers {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: Vec::with_capacity(STACK_SIZE),
        }
    }

    /// Zero everything, empty the stack and point PC at the program start.
    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    pub fn v(&self, Reg(x): Reg) -> u8 {
        self.v[x as usize & 0xF]
    }

    pub fn set_v(&mut self, Reg(x): Reg, value: u8) {
        self.v[x as usize & 0xF] = value;
    }

    /// Set the flag register. Handlers call this as their final effect
    /// so the flag wins over a data write to VF by the same instruction.
    pub fn set_flag(&mut self, on: bool) {
        self.set_v(VF, on as u8);
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Move PC forward by `count` instruction widths.
    pub fn advance(&mut self, count: u16) {
        self.pc = self.pc.wrapping_add(2 * count);
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// Decrement both timers, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn push(&mut self, addr: u16) -> Result<(), EmulatorError> {
        if self.stack.len() >= STACK_SIZE {
            return Err(EmulatorError::StackOverflow {
                pc: self.pc,
                depth: STACK_SIZE,
            });
        }
        self.stack.push(addr);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, EmulatorError> {
        self.stack
            .pop()
            .ok_or(EmulatorError::StackUnderflow { pc: self.pc })
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.v.chunks(4).enumerate() {
            for (col, value) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "V{:X}: {:#04x}", row * 4 + col, value)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "I: {:#06x}  PC: {:#06x}", self.i, self.pc)?;
        writeln!(f, "DT: {:#04x}  ST: {:#04x}", self.delay_timer, self.sound_timer)?;
        write!(f, "Stack:")?;
        for addr in &self.stack {
            write!(f, " {:#06x}", addr)?;
        }
        writeln!(f)
    }
}
