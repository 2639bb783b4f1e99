use clap::Parser;
use log::info;

use em386::debugger::Debugger;
use em386::machine::{Configuration, Machine};

/// A toy 80386 real-mode PC emulator.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the flat disk image (created, zero-filled, if missing).
    #[arg(long, default_value = "disk.img")]
    disk: String,

    /// Physical memory size in bytes.
    #[arg(long, default_value_t = 0x0100_0000)]
    memory_size: usize,

    /// Timer frequency in Hz (periodic IRQ0 cadence).
    #[arg(long, default_value_t = 1000)]
    timer_hz: u64,

    /// Disable the in-memory INT 10h/13h/15h BIOS service stubs.
    #[arg(long)]
    no_bios: bool,

    /// Run continuously from boot instead of dropping into the debugger.
    #[arg(long)]
    go: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = Configuration {
        memory_size: args.memory_size,
        disk_path: args.disk,
        bios_enabled: !args.no_bios,
        timer_frequency_hz: args.timer_hz,
        ..Configuration::default()
    };

    let mut machine = match Machine::new(config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("failed to build machine: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = machine.boot() {
        eprintln!("failed to boot: {}", e);
        std::process::exit(1);
    }
    info!("booted, entering console");

    if args.go {
        while machine.is_running() {
            if let Err(e) = machine.step() {
                eprintln!("fatal: {}", e);
                break;
            }
        }
    } else {
        let mut debugger = Debugger::new();
        while machine.is_running() && debugger.prompt(&mut machine) {}
    }

    machine.shutdown();
}
