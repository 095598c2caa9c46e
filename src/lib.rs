pub mod direction;
pub mod grid;
pub mod instruction;
pub mod error;
pub mod host;
pub mod machine;
pub mod interpreter;
pub mod fuzz;

pub use error::{ExecutionError, StackKind};
pub use grid::Grid;
pub use host::{BufferHost, ConsoleHost, Host};
pub use interpreter::{Halt, Interpreter, InterpreterConfig, Outcome, run};
