//! The interpreter core and the interfaces it needs from the outside world.

pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod memory;
pub mod output;
pub mod quirks;
pub mod registers;
pub mod screen;

pub use self::emulator::{Emulator, Status};
pub use self::error::EmulatorError;
pub use self::quirks::Quirks;
