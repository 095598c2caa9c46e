use std::fmt;

use thiserror::Error;

/// Which of the two machine stacks an instruction popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackKind {
    Value,
    Matrix,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Value => f.write_str("value"),
            StackKind::Matrix => f.write_str("matrix"),
        }
    }
}

/// A fatal fault. The run stops at the first one.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("stack underflow on {stack} stack at '{instruction}' ({x},{y})")]
    StackUnderflow {
        stack: StackKind,
        instruction: char,
        x: i64,
        y: i64,
    },

    #[error("invalid instruction at '{instruction}' ({x},{y})")]
    InvalidInstruction { instruction: char, x: i64, y: i64 },

    #[error("host i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
