/// Behaviors that differ between historical interpreters.
/// Fixed for the lifetime of an emulator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Leave I pointing past the last register copied by FX55 and FX65,
    /// as the original COSMAC VIP interpreter did. Off by default, so I
    /// is left unchanged.
    pub load_store_increments_i: bool,

    /// Fail the step with `EmulatorError::UnknownOpcode` on a bit pattern
    /// that names no instruction. Off by default, so such patterns are
    /// skipped over like a no-op.
    pub strict_decoding: bool,
}
