//! Periodic IRQ0 source, running on its own OS thread. Mirrors the 8253
//! PIT only in spirit: cadence is wall-clock, not cycle-accurate, and missed
//! ticks under load simply coalesce rather than catching up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::interrupts::InterruptController;

pub struct Timer {
    frequency_hz: u64,
    ic: Arc<InterruptController>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    pub fn new(ic: Arc<InterruptController>, frequency_hz: u64) -> Self {
        Timer {
            frequency_hz,
            ic,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn start(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let running = Arc::clone(&self.running);
        let ic = Arc::clone(&self.ic);
        let interval = Duration::from_nanos(1_000_000_000 / self.frequency_hz.max(1));
        self.handle = Some(thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                if running.load(Ordering::SeqCst) {
                    ic.request_irq(0);
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}
