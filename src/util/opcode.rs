/// A raw 16-bit instruction word, with helpers for splitting it
/// into the nibble fields and immediates the instruction set uses.
///
/// The nibbles are named from most to least significant:
/// `d` selects the instruction family, `c` is usually the X register,
/// `b` the Y register and `a` the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    pub fn from_u16(value: u16) -> Opcode {
        Opcode(value)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The four nibbles as `(d, c, b, a)`.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        let nibble = |shift: u16| ((self.0 >> shift) & 0x0F) as u8;
        (nibble(12), nibble(8), nibble(4), nibble(0))
    }

    /// The 8-bit literal `kk`, i.e. `(b << 4) | a`.
    pub fn byte(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The 12-bit address `nnn`, i.e. `(c << 8) | (b << 4) | a`.
    pub fn addr(&self) -> u16 {
        self.0 & 0x0FFF
    }
}
