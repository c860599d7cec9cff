//! The 4 KiB address space, with the font at the bottom and
//! the program from `PROGRAM_START` and up.

use std::ops::Range;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x000;

/// Bytes per glyph in the font table.
pub const GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat byte-addressable memory. Every access takes its address
/// modulo `MEM_SIZE`, so no address is ever out of bounds.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut memory = Memory {
            bytes: [0; MEM_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zero everything and reload the font.
    pub fn reset(&mut self) {
        self.bytes = [0; MEM_SIZE];
        let start = FONT_START as usize;
        self.bytes[start..start + FONT.len()].copy_from_slice(&FONT);
    }

    fn wrap(addr: u16) -> usize {
        addr as usize % MEM_SIZE
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::wrap(addr)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[Self::wrap(addr)] = value;
    }

    /// Read the big-endian word at `addr`, the high byte first.
    pub fn read_word(&self, addr: u16) -> u16 {
        let high = self.read(addr) as u16;
        let low = self.read(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Copy `data` to `addr` and onwards, wrapping at the end of memory.
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// A hex dump of `range`, sixteen bytes per line, each line
    /// prefixed with its address.
    pub fn dump(&self, range: Range<usize>) -> String {
        let start = range.start.min(MEM_SIZE);
        let end = range.end.min(MEM_SIZE).max(start);
        self.bytes[start..end]
            .chunks(16)
            .enumerate()
            .map(|(line, chunk)| {
                let bytes: String = chunk.iter().map(|byte| format!(" {:02x}", byte)).collect();
                format!("{:03x}:{}\n", start + line * 16, bytes)
            })
            .collect()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
