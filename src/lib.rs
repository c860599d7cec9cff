/*!

A CHIP-8 interpreter core as specified at https://en.wikipedia.org/wiki/CHIP-8.

The core knows nothing about files, windows, keyboards or clocks.
It is given a program as bytes, a snapshot of the sixteen keys, and optionally
an output device to mirror its screen to. The caller decides how often to
`step` (about 700 times a second) and how often to `tick_timers` (60 times a second).

# Headless driver

To run a program without any frontend, use
`cargo run --release --bin headless -- <program> --cycles 10000 --dump`.
The screen and registers are printed when it stops.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip_8::emulator::{Emulator, Status};
use chip_8::emulator::instruction::Reg;

let mut emulator = Emulator::new();

// LD V0, 5; LD V1, 10; ADD V0, V1
emulator.load(&[0x60, 0x05, 0x61, 0x0A, 0x80, 0x14]).unwrap();
for _ in 0..3 {
    assert_eq!(emulator.step(), Ok(Status::Running));
}
assert_eq!(emulator.registers().v(Reg(0)), 15);
assert_eq!(emulator.registers().pc(), 0x206);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8::emulator::Emulator;
use chip_8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.registers().v(Reg(0xB)), 35);
```

## Keys

`FX0A` does not block. The step returns `Status::AwaitingKey` instead,
and the driver keeps stepping (and ticking timers) while it updates the keys.

```rust
use chip_8::emulator::{Emulator, Status};

let mut emulator = Emulator::new();
emulator.load(&[0xF0, 0x0A]).unwrap(); // LD V0, K
assert_eq!(emulator.step(), Ok(Status::AwaitingKey));

emulator.input_mut().press(0x7);
assert_eq!(emulator.step(), Ok(Status::Running));
```

## Custom input and output

To hook up a real keyboard and screen, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this,
then do the following.

```ignore
use chip_8::emulator::Emulator;

let mut emulator = Emulator::with_io(MyInput::new(), MyOutput::new());
```
*/

pub mod emulator;
pub mod util;
