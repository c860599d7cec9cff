/// Ways a step can fail. All of them are reachable only through
/// malformed programs or bad driver input, and none of them leave
/// the machine half-updated: on error, PC still points at the
/// faulting instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorError {
    #[error("stack overflow: call at {pc:#06x} exceeds {depth} nested subroutines")]
    StackOverflow { pc: u16, depth: usize },

    #[error("stack underflow: return at {pc:#06x} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06x} at {pc:#06x}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("instruction refused at {pc:#06x}: waiting for a key press")]
    AwaitingKey { pc: u16 },

    #[error("program is too large ({size} bytes), at most {max} bytes fit")]
    ProgramTooLarge { size: usize, max: usize },
}
