//! The CHIP-8 emulator as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::error::EmulatorError;
use crate::emulator::input::{EmulatorInput, Keypad};
use crate::emulator::instruction::*;
use crate::emulator::memory::{Memory, FONT_START, GLYPH_SIZE, MEM_SIZE, PROGRAM_START};
use crate::emulator::output::{DummyOutput, EmulatorOutput};
use crate::emulator::quirks::Quirks;
use crate::emulator::registers::Registers;
use crate::emulator::screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::util::opcode::Opcode;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Whether the emulator can make progress on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Stopped at an FX0A until a key is pressed.
    /// The driver must keep calling `step` (and ticking timers).
    AwaitingKey,
}

/// What happens to PC after an instruction has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Skip,
    Jump(u16),
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Flow {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

pub struct Emulator<I: EmulatorInput, O: EmulatorOutput> {
    memory: Memory,
    registers: Registers,
    screen: Screen,
    waiting_for_key: Option<Reg>,
    quirks: Quirks,
    rng: StdRng,

    input: I,
    output: O,
}

impl Emulator<Keypad, DummyOutput> {
    /// Create a new emulator with a plain keypad and no output device
    pub fn new() -> Emulator<Keypad, DummyOutput> {
        Emulator::with_io(Keypad::new(), DummyOutput)
    }
}

impl Default for Emulator<Keypad, DummyOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EmulatorInput, O: EmulatorOutput> Emulator<I, O> {
    /// Create a new emulator with input and output
    pub fn with_io(input: I, output: O) -> Emulator<I, O> {
        Emulator::with_quirks(input, output, Quirks::default())
    }

    pub fn with_quirks(input: I, output: O, quirks: Quirks) -> Emulator<I, O> {
        Emulator {
            memory: Memory::new(),
            registers: Registers::new(),
            screen: Screen::new(),
            waiting_for_key: None,
            quirks,
            rng: StdRng::from_entropy(),

            input,
            output,
        }
    }

    /// Make RND reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Put the machine back in its power-on state: registers zeroed,
    /// PC at 0x200, empty stack, blank screen and memory holding only the font.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.registers.reset();
        self.screen.clear();
        self.output.clear();
        self.waiting_for_key = None;
        log::info!("Emulator reset");
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        let max = MEM_SIZE - PROGRAM_START as usize;
        if program.len() > max {
            return Err(EmulatorError::ProgramTooLarge {
                size: program.len(),
                max,
            });
        }
        self.memory.write_slice(PROGRAM_START, program);
        log::info!("Loaded {} bytes at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Fetch, decode and execute the instruction at PC.
    ///
    /// While waiting for a key, this only looks at the input, and completes
    /// the pending FX0A once a key is held down.
    pub fn step(&mut self) -> Result<Status, EmulatorError> {
        if let Some(reg) = self.waiting_for_key {
            return Ok(self.poll_key(reg));
        }

        let pc = self.registers.pc();
        let instruction = Instruction::decode(Opcode::from_u16(self.memory.read_word(pc)));
        log::trace!("{:#06x}: {}", pc, instruction);

        self.execute_single(instruction)
    }

    /// Decrement the delay and sound timers. Meant to be called at 60 Hz,
    /// independently of `step`.
    pub fn tick_timers(&mut self) {
        self.registers.tick_timers();
    }

    pub fn status(&self) -> Status {
        match self.waiting_for_key {
            Some(_) => Status::AwaitingKey,
            None => Status::Running,
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Execute several instructions in order, stopping at the first error
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), EmulatorError> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction as if it was fetched from PC,
    /// then move PC accordingly.
    ///
    /// Refused while a FX0A is waiting for a key, since only `step`
    /// may complete it.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<Status, EmulatorError> {
        if self.waiting_for_key.is_some() {
            return Err(EmulatorError::AwaitingKey {
                pc: self.registers.pc(),
            });
        }
        match self.execute(instruction)? {
            Flow::Next => self.registers.advance(1),
            Flow::Skip => self.registers.advance(2),
            Flow::Jump(addr) => self.registers.set_pc(addr),
            Flow::Wait => {}
        }
        Ok(self.status())
    }

    fn poll_key(&mut self, reg: Reg) -> Status {
        match self.input.first_pressed() {
            Some(key) => {
                log::debug!("Key {:X} pressed, stored in V{:X}", key, reg.0);
                self.registers.set_v(reg, key);
                self.waiting_for_key = None;
                self.registers.advance(1);
                Status::Running
            }
            None => Status::AwaitingKey,
        }
    }

    /// Perform the instruction's effect on everything but PC.
    /// Handlers that set VF as a flag do so last.
    fn execute(&mut self, instruction: Instruction) -> Result<Flow, EmulatorError> {
        let flow = match instruction {
            // Machine code routines are not supported, skip it
            Instruction::Sys(_) => Flow::Next,

            Instruction::ClearScreen => {
                self.screen.clear();
                self.output.clear();
                Flow::Next
            }

            // Return to the previous call site via the stack.
            Instruction::Return => Flow::Jump(self.registers.pop()?),

            Instruction::Goto(Addr(addr)) => Flow::Jump(addr),

            // Store the address of the next instruction on the stack, then jump
            Instruction::Call(Addr(addr)) => {
                let return_addr = self.registers.pc().wrapping_add(2);
                self.registers.push(return_addr)?;
                Flow::Jump(addr)
            }

            Instruction::IfRegEqConst(x, Const(n)) => Flow::skip_if(self.registers.v(x) == n),

            Instruction::IfRegNeqConst(x, Const(n)) => Flow::skip_if(self.registers.v(x) != n),

            Instruction::IfRegEqReg(x, y) => {
                Flow::skip_if(self.registers.v(x) == self.registers.v(y))
            }

            Instruction::SetRegToConst(x, Const(n)) => {
                self.registers.set_v(x, n);
                Flow::Next
            }

            // No carry flag for this one
            Instruction::IncRegByConst(x, Const(n)) => {
                self.registers.set_v(x, self.registers.v(x).wrapping_add(n));
                Flow::Next
            }

            Instruction::SetRegToReg(x, y) => {
                self.registers.set_v(x, self.registers.v(y));
                Flow::Next
            }

            Instruction::BitwiseOr(x, y) => {
                self.registers.set_v(x, self.registers.v(x) | self.registers.v(y));
                Flow::Next
            }

            Instruction::BitwiseAnd(x, y) => {
                self.registers.set_v(x, self.registers.v(x) & self.registers.v(y));
                Flow::Next
            }

            Instruction::BitwiseXor(x, y) => {
                self.registers.set_v(x, self.registers.v(x) ^ self.registers.v(y));
                Flow::Next
            }

            // VF is the carry
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.registers.v(x).overflowing_add(self.registers.v(y));
                self.registers.set_v(x, sum);
                self.registers.set_flag(carry);
                Flow::Next
            }

            // VF is set when there is no borrow
            Instruction::DecRegByReg(x, y) => {
                let (vx, vy) = (self.registers.v(x), self.registers.v(y));
                self.registers.set_v(x, vx.wrapping_sub(vy));
                self.registers.set_flag(vx > vy);
                Flow::Next
            }

            // VF is the bit shifted out
            Instruction::BitshiftRight(x) => {
                let vx = self.registers.v(x);
                self.registers.set_v(x, vx >> 1);
                self.registers.set_flag(vx & 0x01 != 0);
                Flow::Next
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (vx, vy) = (self.registers.v(x), self.registers.v(y));
                self.registers.set_v(x, vy.wrapping_sub(vx));
                self.registers.set_flag(vy > vx);
                Flow::Next
            }

            Instruction::BitshiftLeft(x) => {
                let vx = self.registers.v(x);
                self.registers.set_v(x, vx << 1);
                self.registers.set_flag(vx & 0x80 != 0);
                Flow::Next
            }

            Instruction::IfRegNeqReg(x, y) => {
                Flow::skip_if(self.registers.v(x) != self.registers.v(y))
            }

            Instruction::SetI(Addr(addr)) => {
                self.registers.set_i(addr);
                Flow::Next
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                Flow::Jump(addr.wrapping_add(self.registers.v(Reg(0)) as u16))
            }

            Instruction::SetVxRand(x, Const(n)) => {
                let random: u8 = self.rng.gen();
                self.registers.set_v(x, random & n);
                Flow::Next
            }

            Instruction::Draw(x, y, Const(sprite_height)) => {
                let erased = self.draw(
                    self.registers.v(x) as usize,
                    self.registers.v(y) as usize,
                    sprite_height,
                );
                self.registers.set_flag(erased);
                Flow::Next
            }

            Instruction::IfKeyEqVx(x) => {
                Flow::skip_if(self.input.is_pressed(self.registers.v(x) & 0xF))
            }

            Instruction::IfKeyNeqVx(x) => {
                Flow::skip_if(!self.input.is_pressed(self.registers.v(x) & 0xF))
            }

            Instruction::SetRegToDelayTimer(x) => {
                self.registers.set_v(x, self.registers.delay_timer());
                Flow::Next
            }

            // Take a key that is already down, otherwise wait for one
            Instruction::SetRegToGetKey(x) => match self.input.first_pressed() {
                Some(key) => {
                    self.registers.set_v(x, key);
                    Flow::Next
                }
                None => {
                    log::debug!("Waiting for key press at {:#06x}", self.registers.pc());
                    self.waiting_for_key = Some(x);
                    Flow::Wait
                }
            },

            Instruction::SetDelayTimerToReg(x) => {
                self.registers.set_delay_timer(self.registers.v(x));
                Flow::Next
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.registers.set_sound_timer(self.registers.v(x));
                Flow::Next
            }

            Instruction::AddRegToI(x) => {
                let i = self.registers.i().wrapping_add(self.registers.v(x) as u16);
                self.registers.set_i(i);
                Flow::Next
            }

            // Each glyph in the font is 5 bytes.
            Instruction::SetIToSpriteAddrVx(x) => {
                let glyph = GLYPH_SIZE * self.registers.v(x) as u16;
                self.registers.set_i(FONT_START + glyph);
                Flow::Next
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.registers.v(x);
                let i = self.registers.i();
                self.memory.write(i, value / 100);
                self.memory.write(i.wrapping_add(1), value / 10 % 10);
                self.memory.write(i.wrapping_add(2), value % 10);
                Flow::Next
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = self.registers.i();
                for reg_no in 0..=x & 0xF {
                    let value = self.registers.v(Reg(reg_no));
                    self.memory.write(i.wrapping_add(reg_no as u16), value);
                }
                self.bump_i_after_transfer(x);
                Flow::Next
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let i = self.registers.i();
                for reg_no in 0..=x & 0xF {
                    let value = self.memory.read(i.wrapping_add(reg_no as u16));
                    self.registers.set_v(Reg(reg_no), value);
                }
                self.bump_i_after_transfer(x);
                Flow::Next
            }

            Instruction::Unassigned(opcode) => {
                let pc = self.registers.pc();
                if self.quirks.strict_decoding {
                    log::error!("Unknown opcode {:#06x} at {:#06x}", opcode, pc);
                    return Err(EmulatorError::UnknownOpcode { opcode, pc });
                }
                log::warn!("Skipping unknown opcode {:#06x} at {:#06x}", opcode, pc);
                Flow::Next
            }
        };

        Ok(flow)
    }

    /// XOR a sprite of `sprite_height` rows, read from I, onto the screen
    /// at `(x_coord, y_coord)`. Returns whether any lit cell was erased.
    fn draw(&mut self, x_coord: usize, y_coord: usize, sprite_height: u8) -> bool {
        let sprite_addr = self.registers.i();
        let mut any_erased = false;
        for row in 0..sprite_height as usize {
            let sprite_row = self.memory.read(sprite_addr.wrapping_add(row as u16));
            for bit in 0..8 {
                if (sprite_row >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let x = (x_coord + bit) % SCREEN_WIDTH;
                let y = (y_coord + row) % SCREEN_HEIGHT;
                any_erased |= self.screen.toggle(x, y);
                self.output.set(x, y, self.screen.get(x, y));
            }
        }
        self.output.refresh();
        any_erased
    }

    fn bump_i_after_transfer(&mut self, x: u8) {
        if self.quirks.load_store_increments_i {
            let i = self.registers.i().wrapping_add((x & 0xF) as u16 + 1);
            self.registers.set_i(i);
        }
    }
}

impl<I: EmulatorInput, O: EmulatorOutput> fmt::Display for Emulator<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.screen, f)
    }
}
