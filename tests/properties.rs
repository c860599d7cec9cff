use chip_8::emulator::input::Keypad;
use chip_8::emulator::instruction::{Addr, Const, Instruction, Reg};
use chip_8::emulator::output::DummyOutput;
use chip_8::emulator::screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip_8::emulator::Emulator;
use proptest::prelude::*;

fn with_registers(vx: u8, vy: u8) -> Emulator<Keypad, DummyOutput> {
    let mut emulator = Emulator::new();
    emulator
        .execute_many(&[
            Instruction::SetRegToConst(Reg(1), Const(vx)),
            Instruction::SetRegToConst(Reg(2), Const(vy)),
        ])
        .unwrap();
    emulator
}

proptest! {
    #[test]
    fn add_const_wraps_and_keeps_flag(start in any::<u8>(), n in any::<u8>(), flag in any::<u8>()) {
        let mut emulator = Emulator::new();
        emulator
            .execute_many(&[
                Instruction::SetRegToConst(Reg(0xF), Const(flag)),
                Instruction::SetRegToConst(Reg(0), Const(start)),
                Instruction::IncRegByConst(Reg(0), Const(n)),
            ])
            .unwrap();
        prop_assert_eq!(((start as u16 + n as u16) % 256) as u8, emulator.registers().v(Reg(0)));
        prop_assert_eq!(flag, emulator.registers().v(Reg(0xF)));
    }

    #[test]
    fn add_carry_law(vx in any::<u8>(), vy in any::<u8>()) {
        let mut emulator = with_registers(vx, vy);
        emulator.execute_single(Instruction::IncRegByReg(Reg(1), Reg(2))).unwrap();
        let sum = vx as u16 + vy as u16;
        prop_assert_eq!((sum % 256) as u8, emulator.registers().v(Reg(1)));
        prop_assert_eq!((sum > 255) as u8, emulator.registers().v(Reg(0xF)));
    }

    #[test]
    fn sub_not_borrow_law(vx in any::<u8>(), vy in any::<u8>()) {
        let mut emulator = with_registers(vx, vy);
        emulator.execute_single(Instruction::DecRegByReg(Reg(1), Reg(2))).unwrap();
        prop_assert_eq!(vx.wrapping_sub(vy), emulator.registers().v(Reg(1)));
        prop_assert_eq!((vx > vy) as u8, emulator.registers().v(Reg(0xF)));
    }

    #[test]
    fn subn_not_borrow_law(vx in any::<u8>(), vy in any::<u8>()) {
        let mut emulator = with_registers(vx, vy);
        emulator.execute_single(Instruction::SetVxVyMinusVx(Reg(1), Reg(2))).unwrap();
        prop_assert_eq!(vy.wrapping_sub(vx), emulator.registers().v(Reg(1)));
        prop_assert_eq!((vy > vx) as u8, emulator.registers().v(Reg(0xF)));
    }

    #[test]
    fn shift_laws(vx in any::<u8>()) {
        let mut emulator = with_registers(vx, 0);
        emulator.execute_single(Instruction::BitshiftRight(Reg(1))).unwrap();
        prop_assert_eq!(vx >> 1, emulator.registers().v(Reg(1)));
        prop_assert_eq!(vx & 1, emulator.registers().v(Reg(0xF)));

        let mut emulator = with_registers(vx, 0);
        emulator.execute_single(Instruction::BitshiftLeft(Reg(1))).unwrap();
        prop_assert_eq!(vx.wrapping_shl(1), emulator.registers().v(Reg(1)));
        prop_assert_eq!(vx >> 7, emulator.registers().v(Reg(0xF)));
    }

    #[test]
    fn skip_law(vx in any::<u8>(), byte in any::<u8>()) {
        let mut emulator = with_registers(vx, 0);
        let before = emulator.registers().pc();
        emulator.execute_single(Instruction::IfRegEqConst(Reg(1), Const(byte))).unwrap();
        let expected = if vx == byte { 4 } else { 2 };
        prop_assert_eq!(before + expected, emulator.registers().pc());
    }

    #[test]
    fn call_then_return_lands_after_call(addr in 0x200u16..0x1000) {
        let mut emulator = Emulator::new();
        emulator.execute_single(Instruction::Goto(Addr(0x300))).unwrap();
        emulator.execute_single(Instruction::Call(Addr(addr))).unwrap();
        prop_assert_eq!(addr, emulator.registers().pc());
        emulator.execute_single(Instruction::Return).unwrap();
        prop_assert_eq!(0x302, emulator.registers().pc());
    }

    #[test]
    fn timer_floor_law(start in any::<u8>(), ticks in 0usize..300) {
        let mut emulator = with_registers(start, 0);
        emulator
            .execute_many(&[
                Instruction::SetDelayTimerToReg(Reg(1)),
                Instruction::SetSoundTimerToReg(Reg(1)),
            ])
            .unwrap();
        for _ in 0..ticks {
            emulator.tick_timers();
        }
        let expected = (start as usize).saturating_sub(ticks) as u8;
        prop_assert_eq!(expected, emulator.registers().delay_timer());
        prop_assert_eq!(expected, emulator.registers().sound_timer());
    }

    #[test]
    fn redraw_always_collides(sprite in 1u8..=255, x in any::<u8>(), y in any::<u8>()) {
        let mut emulator = Emulator::new();
        emulator.load(&[sprite]).unwrap();
        emulator
            .execute_many(&[
                Instruction::SetI(Addr(0x200)),
                Instruction::SetRegToConst(Reg(1), Const(x)),
                Instruction::SetRegToConst(Reg(2), Const(y)),
                Instruction::Draw(Reg(1), Reg(2), Const(1)),
            ])
            .unwrap();
        prop_assert_eq!(0, emulator.registers().v(Reg(0xF)));
        prop_assert_eq!(sprite.count_ones() as usize, emulator.screen().lit());

        emulator.execute_single(Instruction::Draw(Reg(1), Reg(2), Const(1))).unwrap();
        prop_assert_eq!(1, emulator.registers().v(Reg(0xF)));
        prop_assert_eq!(0, emulator.screen().lit());
    }

    #[test]
    fn toggle_wraps(x in 0usize..1000, y in 0usize..1000) {
        let mut wrapped = Screen::new();
        let mut direct = Screen::new();
        wrapped.toggle(x, y);
        direct.toggle(x % SCREEN_WIDTH, y % SCREEN_HEIGHT);
        prop_assert_eq!(wrapped, direct);
    }
}
