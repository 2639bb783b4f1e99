//! Wires memory, CPU, interrupt controller, timer, DMA, disk, and BIOS
//! together into a runnable machine.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::{error, info};

use crate::bios;
use crate::disk::{Geometry, IdeDisk};
use crate::dma::DmaController;
use crate::error::{EmulatorError, Result};
use crate::interrupts::InterruptController;
use crate::io::{IoBus, IoDevice};
use crate::memory::Memory;
use crate::timer::Timer;
use crate::vga::Palette;
use crate::Cpu;

const DISK_PORTS: std::ops::RangeInclusive<u16> = 0x1F0..=0x1F7;

/// Machine parameters, in place of hand-wiring the same numbers across
/// `main()`: memory size, disk geometry/path, timer cadence, and whether
/// the BIOS INT 10h/13h/15h stubs are installed.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub memory_size: usize,
    pub disk_path: String,
    pub geometry: Geometry,
    pub timer_frequency_hz: u64,
    pub bios_enabled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            memory_size: 0x0100_0000,
            disk_path: "disk.img".to_string(),
            geometry: Geometry {
                cylinders: 16,
                heads: 16,
                sectors: 63,
            },
            timer_frequency_hz: 1000,
            bios_enabled: true,
        }
    }
}

pub struct Machine {
    pub memory: Memory,
    pub cpu: Cpu,
    pub io: IoBus,
    pub disk: Rc<RefCell<IdeDisk>>,
    pub dma: DmaController,
    pub timer: Timer,
    pub ic: Arc<InterruptController>,
    pub palette: Palette,
    config: Configuration,
}

impl Machine {
    pub fn new(config: Configuration) -> Result<Self> {
        let ic = Arc::new(InterruptController::new());
        let memory = Memory::new(config.memory_size);
        let disk = Rc::new(RefCell::new(IdeDisk::create(
            &config.disk_path,
            config.geometry,
        )?));

        let mut io = IoBus::new();
        io.attach(DISK_PORTS, Rc::clone(&disk) as Rc<RefCell<dyn IoDevice>>);

        let dma = DmaController::new(Arc::clone(&ic));
        let timer = Timer::new(Arc::clone(&ic), config.timer_frequency_hz);
        let mut cpu = Cpu::new(Arc::clone(&ic));
        cpu.set_bios_enabled(config.bios_enabled);

        info!(
            "machine configured: {} bytes ram, disk {:?} at {}, timer {} Hz",
            config.memory_size, config.geometry, config.disk_path, config.timer_frequency_hz
        );

        Ok(Machine {
            memory,
            cpu,
            io,
            disk,
            dma,
            timer,
            ic,
            palette: Palette::default(),
            config,
        })
    }

    /// Loads the BIOS (IVT zeroing, boot sector load, reset vector stub),
    /// resets the CPU to its power-on state, and starts the timer thread.
    pub fn boot(&mut self) -> Result<()> {
        {
            let mut disk = self.disk.borrow_mut();
            bios::load_bios(&mut self.memory, &mut disk, self.config.geometry)?;
        }
        self.cpu.reset();
        self.timer.start();
        info!("bios loaded, cpu reset to {:#06x}:{:#06x}", 0xF000u16, 0xFFF0u16);
        Ok(())
    }

    /// Runs a single instruction-boundary step. On a fatal error the CPU's
    /// running flag is cleared and the error is both logged and returned,
    /// matching the propagation rule: other components (timer, disk
    /// registers) are left exactly as they were.
    pub fn step(&mut self) -> Result<()> {
        let mut disk = self.disk.borrow_mut();
        let outcome = self.cpu.step(&mut self.memory, &self.io, &mut disk);
        if let Some(e) = disk.take_error() {
            self.cpu.running = false;
            error!("fatal disk i/o fault: {}", e);
            return Err(EmulatorError::DiskIoError(e));
        }
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => {
                self.cpu.running = false;
                error!("fatal cpu fault: {}", e);
                Err(e)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.cpu.running
    }

    /// Reads the current VGA framebuffer (320x200) as packed RGB pixels,
    /// for a presentation collaborator to paint; tolerates cosmetic torn
    /// reads.
    pub fn framebuffer(&self) -> Vec<u32> {
        crate::vga::read_frame(&self.memory, &self.palette)
    }

    pub fn shutdown(&mut self) {
        self.timer.stop();
        info!("machine shut down");
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
