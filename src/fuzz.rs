use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

use crate::error::{ExecutionError, Result};
use crate::grid::Grid;
use crate::host::BufferHost;
use crate::instruction::ALPHABET;
use crate::interpreter::{Halt, Interpreter, Outcome};

/// Configuration for a batch of random programs.
#[derive(Clone, Debug)]
pub struct FuzzConfig {
    /// Number of programs to generate.
    pub programs: usize,
    /// Grid width of every program.
    pub width: usize,
    /// Grid height of every program.
    pub height: usize,
    /// Max instructions per program.
    pub step_limit: u64,
    /// Bytes of random stdin given to each program.
    pub input_len: usize,
    /// Per-cell probability of a lowercase letter instead of an instruction.
    pub noise_rate: f64,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            programs: 1 << 12, // 4096
            width: 16,
            height: 8,
            step_limit: 1 << 13, // 8192
            input_len: 16,
            noise_rate: 0.01,
        }
    }
}

/// A generated population of programs with their scripted input.
pub struct FuzzBatch {
    pub sources: Vec<String>,
    pub inputs: Vec<Vec<u8>>,
    pub config: FuzzConfig,
}

/// Generate one random grid. Cells are drawn uniformly from the instruction
/// alphabet; a single `S` is then dropped on a random cell.
pub fn random_source(rng: &mut SmallRng, config: &FuzzConfig) -> String {
    let (w, h) = (config.width.max(1), config.height.max(1));
    let mut cells: Vec<char> = (0..w * h)
        .map(|_| {
            if config.noise_rate > 0.0 && rng.gen_bool(config.noise_rate) {
                char::from(rng.gen_range(b'a'..=b'z'))
            } else {
                ALPHABET[rng.gen_range(0..ALPHABET.len())]
            }
        })
        .collect();
    cells[rng.gen_range(0..w * h)] = 'S';

    let mut source = String::with_capacity(w * h + h);
    for (y, row) in cells.chunks(w).enumerate() {
        if y > 0 {
            source.push('\n');
        }
        source.extend(row);
    }
    source
}

impl FuzzBatch {
    /// Generate `config.programs` programs from `seed`.
    pub fn new(config: FuzzConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut sources = Vec::with_capacity(config.programs);
        let mut inputs = Vec::with_capacity(config.programs);
        for _ in 0..config.programs {
            sources.push(random_source(&mut rng, &config));
            let mut input = vec![0u8; config.input_len];
            rng.fill(&mut input[..]);
            inputs.push(input);
        }
        Self {
            sources,
            inputs,
            config,
        }
    }

    /// Execute every program in parallel and tally the outcomes.
    pub fn run(&self) -> FuzzReport {
        let limit = self.config.step_limit;
        self.sources
            .par_iter()
            .zip(self.inputs.par_iter())
            .map(|(source, input)| {
                let interp = Interpreter::new(Grid::parse(source)).with_step_limit(limit);
                let mut host = BufferHost::with_input(input);
                let result = interp.run(&mut host);
                let mut report = FuzzReport::default();
                report.record(&result, &host);
                report
            })
            .reduce(FuzzReport::default, FuzzReport::merge)
    }
}

/// Outcome counts across a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuzzReport {
    pub finished: u64,
    pub off_grid: u64,
    pub step_limit: u64,
    pub stack_underflow: u64,
    pub invalid_instruction: u64,
    pub io_errors: u64,
    /// Instructions executed by programs that halted without a fault.
    pub total_steps: u64,
    pub output_bytes: u64,
    pub alerts: u64,
}

impl FuzzReport {
    fn record(&mut self, result: &Result<Outcome>, host: &BufferHost) {
        match result {
            Ok(outcome) => {
                self.total_steps += outcome.steps;
                match outcome.halt {
                    Halt::Finish => self.finished += 1,
                    Halt::OffGrid => self.off_grid += 1,
                    Halt::StepLimit => self.step_limit += 1,
                }
            }
            Err(ExecutionError::StackUnderflow { .. }) => self.stack_underflow += 1,
            Err(ExecutionError::InvalidInstruction { .. }) => self.invalid_instruction += 1,
            Err(ExecutionError::Io(_)) => self.io_errors += 1,
        }
        self.output_bytes += host.output.len() as u64;
        self.alerts += host.alerts as u64;
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            finished: self.finished + other.finished,
            off_grid: self.off_grid + other.off_grid,
            step_limit: self.step_limit + other.step_limit,
            stack_underflow: self.stack_underflow + other.stack_underflow,
            invalid_instruction: self.invalid_instruction + other.invalid_instruction,
            io_errors: self.io_errors + other.io_errors,
            total_steps: self.total_steps + other.total_steps,
            output_bytes: self.output_bytes + other.output_bytes,
            alerts: self.alerts + other.alerts,
        }
    }

    /// Number of programs accounted for.
    pub fn programs(&self) -> u64 {
        self.finished
            + self.off_grid
            + self.step_limit
            + self.stack_underflow
            + self.invalid_instruction
            + self.io_errors
    }
}

impl fmt::Display for FuzzReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fuzz results:")?;
        writeln!(f, "  Programs:            {}", self.programs())?;
        writeln!(f, "  Finished (F):        {}", self.finished)?;
        writeln!(f, "  Walked off grid:     {}", self.off_grid)?;
        writeln!(f, "  Hit step limit:      {}", self.step_limit)?;
        writeln!(f, "  Stack underflow:     {}", self.stack_underflow)?;
        writeln!(f, "  Invalid instruction: {}", self.invalid_instruction)?;
        writeln!(f, "  Steps (clean halts): {}", self.total_steps)?;
        writeln!(f, "  Output bytes:        {}", self.output_bytes)?;
        write!(f, "  Alerts:              {}", self.alerts)
    }
}
