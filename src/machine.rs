use std::fmt::Write as _;

use crate::direction::{Direction, Position};
use crate::error::{ExecutionError, Result, StackKind};
use crate::host::Host;
use crate::instruction::Instruction;

/// Saturate an intermediate result into the register's 0..=255 range.
#[inline(always)]
pub fn clip(n: i64) -> u8 {
    n.clamp(0, 255) as u8
}

/// The complete mutable state of one run.
///
/// The register saturates instead of wrapping. Both stacks are unbounded;
/// popping an empty one is a fault rather than a zero read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    pub pos: Position,
    pub dir: Direction,
    /// The register ("current number").
    pub num: u8,
    /// The flag ("current value").
    pub val: bool,
    /// Value stack.
    pub stack: Vec<u8>,
    /// Matrix stack. Despite the name it only ever holds register values.
    pub mstack: Vec<u8>,
}

impl Machine {
    pub fn new(start: Position) -> Self {
        Self {
            pos: start,
            dir: Direction::East,
            num: 0,
            val: false,
            stack: Vec::new(),
            mstack: Vec::new(),
        }
    }

    /// Move the cursor one cell along the current direction.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.pos = self.pos.step(self.dir);
    }

    fn underflow(&self, stack: StackKind, instruction: char) -> ExecutionError {
        ExecutionError::StackUnderflow {
            stack,
            instruction,
            x: self.pos.x,
            y: self.pos.y,
        }
    }

    #[inline(always)]
    fn pop_value(&mut self, ch: char) -> Result<u8> {
        match self.stack.pop() {
            Some(n) => Ok(n),
            None => Err(self.underflow(StackKind::Value, ch)),
        }
    }

    #[inline(always)]
    fn pop_matrix(&mut self, ch: char) -> Result<u8> {
        match self.mstack.pop() {
            Some(n) => Ok(n),
            None => Err(self.underflow(StackKind::Matrix, ch)),
        }
    }

    /// Apply one decoded instruction. `ch` is the source character, used only
    /// for diagnostics. Does not perform the per-step advance.
    pub fn execute<H: Host>(&mut self, ch: char, instr: Instruction, host: &mut H) -> Result<()> {
        use Instruction::*;
        match instr {
            Nop => {}
            Input => self.num = host.read_char()?.unwrap_or(0),
            Output => host.write_char(self.num)?,

            Push => self.stack.push(self.num),
            Pop => self.num = self.pop_value(ch)?,
            Add => {
                let n = self.pop_value(ch)?;
                self.num = clip(self.num as i64 + n as i64);
            }
            Sub => {
                let n = self.pop_value(ch)?;
                self.num = clip(self.num as i64 - n as i64);
            }
            Mul => {
                let n = self.pop_value(ch)?;
                self.num = clip(self.num as i64 * n as i64);
            }
            Div => {
                // x / 0 saturates like +inf would.
                let n = self.pop_value(ch)?;
                self.num = if n == 0 { u8::MAX } else { self.num / n };
            }
            Digit(d) => self.num = d,

            IsZero => self.val = self.num == 0,
            Not => self.val = !self.val,
            SetTrue => self.val = true,

            MatrixPop => self.num = self.pop_matrix(ch)?,
            MatrixPush => self.mstack.push(self.num),

            GoEast => self.dir = Direction::East,
            GoWest => self.dir = Direction::West,
            Slash => self.dir = self.dir.reflect_slash(),
            Backslash => self.dir = self.dir.reflect_backslash(),
            FlipHorizontal => self.dir = self.dir.flip_horizontal(),
            FlipVertical => self.dir = self.dir.flip_vertical(),
            Reverse => self.dir = self.dir.reverse(),
            Bounce => {
                if !self.val {
                    self.dir = self.dir.reverse();
                }
            }
            Skip => {
                if self.val {
                    self.advance();
                }
            }
            RotateLeft => self.dir = self.dir.rotate_left(),
            RotateRight => self.dir = self.dir.rotate_right(),

            Alert => host.alert(),
        }
        Ok(())
    }

    /// One-line human readable dump of the state with the character under
    /// the cursor.
    pub fn snapshot(&self, ch: Option<char>) -> String {
        let mut line = String::new();
        match ch {
            Some(c) => line.push(c),
            None => line.push_str("off-grid"),
        }
        let _ = write!(
            line,
            " ({},{}) num={} stk=[{}] mstk=[{}] val={}",
            self.pos.x,
            self.pos.y,
            self.num,
            join(&self.stack),
            join(&self.mstack),
            self.val
        );
        line
    }
}

fn join(stack: &[u8]) -> String {
    stack
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::host::BufferHost;
    use proptest::prelude::*;

    const STACK_OPS: &[char] = &['^', 'v', 'A', 'U', 'M', 'D', '$', '&', '0', '5', '9', 'I'];

    proptest! {
        #[test]
        fn clip_stays_in_range(n in any::<i64>()) {
            let c = clip(n) as i64;
            prop_assert!((0..=255).contains(&c));
            if (0..=255).contains(&n) {
                prop_assert_eq!(c, n);
            }
        }

        #[test]
        fn arithmetic_matches_clipped_integer_math(a in any::<u8>(), b in any::<u8>()) {
            for (ch, expected) in [
                ('A', clip(a as i64 + b as i64)),
                ('U', clip(a as i64 - b as i64)),
                ('M', clip(a as i64 * b as i64)),
                ('D', if b == 0 { 255 } else { a / b }),
            ] {
                let mut m = Machine::new(Position::new(0, 0));
                m.num = a;
                m.stack.push(b);
                let instr = Instruction::decode(ch).unwrap();
                m.execute(ch, instr, &mut BufferHost::new()).unwrap();
                prop_assert_eq!(m.num, expected);
            }
        }

        #[test]
        fn stack_sequences_never_panic(
            ops in prop::collection::vec(prop::sample::select(STACK_OPS), 0..64),
            input in prop::collection::vec(any::<u8>(), 0..8),
        ) {
            let mut host = BufferHost::with_input(&input);
            let mut m = Machine::new(Position::new(0, 0));
            for ch in ops {
                let instr = Instruction::decode(ch).unwrap();
                if m.execute(ch, instr, &mut host).is_err() {
                    break;
                }
            }
        }
    }
}
