//! The interrupt controller: 16 IRQ lines, fixed priority, shared between the
//! CPU thread and the timer thread. This bitset is the only state in the
//! machine that crosses threads, so it is guarded by a single small lock
//! rather than left to ad hoc synchronization.

use std::sync::Mutex;

pub const MASTER_BASE: u8 = 0x08;
pub const SLAVE_BASE: u8 = 0x70;

pub struct InterruptController {
    pending: Mutex<[bool; 16]>,
}

impl InterruptController {
    pub fn new() -> Self {
        InterruptController {
            pending: Mutex::new([false; 16]),
        }
    }

    pub fn request_irq(&self, line: u8) {
        if (line as usize) < 16 {
            let mut pending = self.pending.lock().unwrap();
            pending[line as usize] = true;
        }
    }

    pub fn clear_irq(&self, line: u8) {
        if (line as usize) < 16 {
            let mut pending = self.pending.lock().unwrap();
            pending[line as usize] = false;
        }
    }

    /// Returns the CPU-visible vector for the lowest-numbered pending line
    /// and clears it, or `None` if nothing is pending.
    pub fn get_pending_interrupt(&self) -> Option<u8> {
        let mut pending = self.pending.lock().unwrap();
        let line = pending.iter().position(|&p| p)?;
        pending[line] = false;
        Some(irq_to_vector(line as u8))
    }
}

fn irq_to_vector(line: u8) -> u8 {
    if line < 8 {
        MASTER_BASE.wrapping_add(line)
    } else {
        SLAVE_BASE.wrapping_add(line - 8)
    }
}
