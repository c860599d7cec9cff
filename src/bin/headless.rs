use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip_8::emulator::input::DummyInput;
use chip_8::emulator::output::DummyOutput;
use chip_8::emulator::{Emulator, Quirks, Status};

const TIMER_HZ: u32 = 60;

/// Run a CHIP-8 program without a screen or keyboard.
#[derive(StructOpt, Debug)]
#[structopt(name = "headless")]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions per second
    #[structopt(long, default_value = "700")]
    hz: u32,

    /// Stop after this many instructions
    #[structopt(long)]
    cycles: Option<u64>,

    /// Seed for the RND instruction
    #[structopt(long)]
    seed: Option<u64>,

    /// Let FX55 and FX65 advance I past the copied registers
    #[structopt(long)]
    increment_i: bool,

    /// Stop on opcodes that name no instruction instead of skipping them
    #[structopt(long)]
    strict: bool,

    /// Run as fast as possible instead of at the given rate
    #[structopt(long)]
    no_sleep: bool,

    /// Print registers and screen when stopping
    #[structopt(long)]
    dump: bool,
}

/// Spreads timer ticks evenly over instruction steps, so the timers
/// run at `timer_hz` whenever the steps run at `cpu_hz`.
struct Pacer {
    cpu_hz: u32,
    timer_hz: u32,
    accumulated: u32,
}

impl Pacer {
    fn new(cpu_hz: u32, timer_hz: u32) -> Pacer {
        Pacer {
            cpu_hz: cpu_hz.max(1),
            timer_hz,
            accumulated: 0,
        }
    }

    /// How long one step should take.
    fn step_duration(&self) -> Duration {
        Duration::from_secs(1) / self.cpu_hz
    }

    /// Record one step, returning how many timer ticks are now due.
    fn after_step(&mut self) -> u32 {
        self.accumulated += self.timer_hz;
        let ticks = self.accumulated / self.cpu_hz;
        self.accumulated %= self.cpu_hz;
        ticks
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    if opt.hz == 0 {
        return Err("--hz must be at least 1".into());
    }
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let quirks = Quirks {
        load_store_increments_i: opt.increment_i,
        strict_decoding: opt.strict,
    };
    let mut emulator = Emulator::with_quirks(DummyInput, DummyOutput, quirks);
    if let Some(seed) = opt.seed {
        emulator.reseed(seed);
    }
    emulator.reset();
    emulator.load(&program)?;

    let mut pacer = Pacer::new(opt.hz, TIMER_HZ);
    let mut executed: u64 = 0;
    let outcome = loop {
        if opt.cycles.map_or(false, |limit| executed >= limit) {
            log::info!("Reached the limit of {} instructions", executed);
            break Ok(());
        }

        match emulator.step() {
            Ok(Status::Running) => {}
            Ok(Status::AwaitingKey) => {
                log::info!("Program waits for a key, which never comes in headless mode");
                break Ok(());
            }
            Err(e) => {
                log::error!("Stopped after {} instructions: {}", executed, e);
                break Err(e);
            }
        }
        executed += 1;

        for _ in 0..pacer.after_step() {
            emulator.tick_timers();
        }
        if !opt.no_sleep {
            std::thread::sleep(pacer.step_duration());
        }
    };

    if opt.dump {
        println!("{}", emulator.registers());
        print!("{}", emulator);
    }

    outcome?;
    Ok(())
}
