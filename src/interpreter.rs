use tracing::debug;

use crate::error::{ExecutionError, Result};
use crate::grid::Grid;
use crate::host::Host;
use crate::instruction::Instruction;
use crate::machine::Machine;

const FINISH: char = 'F';

/// Why a run stopped without a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// The cursor reached an `F`.
    Finish,
    /// The cursor walked off the grid.
    OffGrid,
    /// The configured step limit was exhausted.
    StepLimit,
}

/// Result of a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub halt: Halt,
    /// Instructions dispatched, not counting the halting cell.
    pub steps: u64,
}

/// Configuration for an interpreter run.
#[derive(Clone, Debug, Default)]
pub struct InterpreterConfig {
    /// Stop after this many instructions. `None` runs until the program halts.
    pub step_limit: Option<u64>,
}

/// A loaded program ready to run any number of times.
pub struct Interpreter {
    grid: Grid,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, InterpreterConfig::default())
    }

    pub fn with_config(grid: Grid, config: InterpreterConfig) -> Self {
        Self { grid, config }
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.config.step_limit = Some(limit);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A fresh machine parked on the start cell.
    pub fn machine(&self) -> Machine {
        Machine::new(self.grid.find_start())
    }

    /// Run from the start cell with a fresh machine.
    pub fn run<H: Host>(&self, host: &mut H) -> Result<Outcome> {
        let mut machine = self.machine();
        self.resume(&mut machine, host)
    }

    /// Drive `machine` until it halts or faults. The machine is left in its
    /// final state for inspection.
    pub fn resume<H: Host>(&self, machine: &mut Machine, host: &mut H) -> Result<Outcome> {
        let mut steps: u64 = 0;
        loop {
            let ch = self.grid.get(machine.pos);
            if host.tracing() {
                host.trace(&machine.snapshot(ch));
            }

            let ch = match ch {
                None => return Ok(halted(Halt::OffGrid, steps, machine)),
                Some(FINISH) => return Ok(halted(Halt::Finish, steps, machine)),
                Some(c) => c,
            };
            if self.config.step_limit.is_some_and(|limit| steps >= limit) {
                return Ok(halted(Halt::StepLimit, steps, machine));
            }

            let Some(instr) = Instruction::decode(ch) else {
                let err = ExecutionError::InvalidInstruction {
                    instruction: ch,
                    x: machine.pos.x,
                    y: machine.pos.y,
                };
                debug!(steps, "{err}");
                return Err(err);
            };
            if let Err(err) = machine.execute(ch, instr, host) {
                debug!(steps, "{err}");
                return Err(err);
            }
            steps += 1;
            machine.advance();
        }
    }
}

fn halted(halt: Halt, steps: u64, machine: &Machine) -> Outcome {
    debug!(
        ?halt,
        steps,
        x = machine.pos.x,
        y = machine.pos.y,
        num = machine.num,
        "halted"
    );
    Outcome { halt, steps }
}

/// Parse `source` and run it to completion on `host`.
pub fn run<H: Host>(source: &str, host: &mut H) -> Result<Outcome> {
    Interpreter::new(Grid::parse(source)).run(host)
}
