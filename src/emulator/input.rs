pub const NUM_KEYS: usize = 16;

/// Represents an input device that knows which of the keys 0x0..=0xF are held down.
pub trait EmulatorInput {
    fn is_pressed(&self, key: u8) -> bool;

    /// The lowest key currently held down, if any.
    fn first_pressed(&self) -> Option<u8> {
        (0..NUM_KEYS as u8).find(|key| self.is_pressed(*key))
    }
}

/// A snapshot of the sixteen keys, updated by the driver between steps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Only the low nibble of `key` is used.
    pub fn set(&mut self, key: u8, pressed: bool) {
        self.keys[key as usize & 0xF] = pressed;
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}

impl EmulatorInput for Keypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.keys[key as usize & 0xF]
    }
}

/// An input device that never provides any input
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn is_pressed(&self, _: u8) -> bool {
        false
    }
}
