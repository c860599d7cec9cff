//! Small helpers shared by the emulator.

pub mod opcode;
