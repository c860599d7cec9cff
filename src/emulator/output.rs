/// Represents an output device that mirrors the emulator's screen.
///
/// The emulator keeps the authoritative grid itself and tells the output
/// about every cell that changes, so an implementation only has to draw.
pub trait EmulatorOutput {
    /// The cell at `(x, y)`, already wrapped onto the grid, is now `on`.
    fn set(&mut self, x: usize, y: usize, on: bool);
    /// Every cell is now off.
    fn clear(&mut self);
    /// A draw instruction has finished, so it is a good time to flush.
    fn refresh(&mut self) {}
}

/// An output device that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyOutput;

impl EmulatorOutput for DummyOutput {
    fn set(&mut self, _: usize, _: usize, _: bool) {}
    fn clear(&mut self) {}
}
