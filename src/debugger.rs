//! The interactive console driver: single-step vs. continuous execution and
//! a register dump, matching the external collaborator contract for the
//! command surface. Intentionally thin: a line-oriented REPL, one command
//! per line, with no breakpoints, disassembly, or call-graphing — those sit
//! outside the machine core this crate implements.
//!
//! Console input is read on its own thread into a queue, and `go` runs in
//! bounded step batches, draining the queue between batches. That's what
//! lets `stop` (or `quit`) interrupt a `go` already in flight instead of
//! only ever observing it once the CPU itself halts.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::machine::Machine;

/// Number of instructions a `go` batch runs before checking the input queue
/// for a `stop`/`quit` that arrived while it was running.
const GO_BATCH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Go,
    Next,
    Stop,
    Regs,
    Quit,
    Unknown,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "go" => Command::Go,
            "next" => Command::Next,
            "stop" => Command::Stop,
            "regs" => Command::Regs,
            "quit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

pub struct Debugger {
    running_continuously: bool,
    lines: Receiver<String>,
}

impl Debugger {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(l) => {
                        if tx.send(l).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });
        Debugger {
            running_continuously: false,
            lines: rx,
        }
    }

    /// Test-only constructor that takes command lines from an arbitrary
    /// channel instead of a real stdin-reading thread, so tests can inject a
    /// `stop`/`quit` without a terminal.
    #[cfg(test)]
    fn from_lines(lines: Receiver<String>) -> Self {
        Debugger {
            running_continuously: false,
            lines,
        }
    }

    /// Reads one REPL line and reacts to it. Returns `false` once `quit` has
    /// been issued (or stdin has closed), `true` otherwise.
    pub fn prompt(&mut self, machine: &mut Machine) -> bool {
        print!("> ");
        let _ = io::stdout().flush();
        match self.lines.recv() {
            Ok(line) => self.dispatch(Command::parse(&line), machine),
            Err(_) => false,
        }
    }

    fn dispatch(&mut self, command: Command, machine: &mut Machine) -> bool {
        match command {
            Command::Go => {
                self.running_continuously = true;
                while self.running_continuously && machine.is_running() {
                    for _ in 0..GO_BATCH {
                        if !(self.running_continuously && machine.is_running()) {
                            break;
                        }
                        if let Err(e) = machine.step() {
                            println!("fatal: {}", e);
                            self.running_continuously = false;
                            break;
                        }
                    }
                    while let Ok(line) = self.lines.try_recv() {
                        match Command::parse(&line) {
                            Command::Stop => self.running_continuously = false,
                            Command::Quit => {
                                self.running_continuously = false;
                                return false;
                            }
                            _ => {} // other input is ignored while a `go` batch is in flight
                        }
                    }
                }
                true
            }
            Command::Next => {
                if let Err(e) = machine.step() {
                    println!("fatal: {}", e);
                }
                true
            }
            Command::Stop => {
                self.running_continuously = false;
                true
            }
            Command::Regs => {
                println!("{}", machine.cpu);
                true
            }
            Command::Quit => {
                self.running_continuously = false;
                false
            }
            Command::Unknown => {
                println!("commands: go, next, stop, regs, quit");
                true
            }
        }
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Debugger::new()
    }
}
