/// A decoded grid character.
///
/// `F` and off-grid cells are not instructions: the execution loop halts on
/// them before decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `S`, space, `~`
    Nop,
    /// `I`: read one input byte into the register (EOF reads 0).
    Input,
    /// `O`: write the register as a character.
    Output,
    /// `^`
    Push,
    /// `v`
    Pop,
    /// `A`
    Add,
    /// `U`
    Sub,
    /// `M`
    Mul,
    /// `D`
    Div,
    /// `0`-`9`: load a literal.
    Digit(u8),
    /// `%`: flag = register is zero.
    IsZero,
    /// `!`
    Not,
    /// `T`
    SetTrue,
    /// `$`: pop the matrix stack into the register.
    MatrixPop,
    /// `&`: push the register onto the matrix stack.
    MatrixPush,
    /// `(`
    GoEast,
    /// `)`
    GoWest,
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `|`
    FlipHorizontal,
    /// `-`
    FlipVertical,
    /// `+`
    Reverse,
    /// `#`: reverse unless the flag is set.
    Bounce,
    /// `@`: skip a cell if the flag is set.
    Skip,
    /// `<`
    RotateLeft,
    /// `>`
    RotateRight,
    /// `*`
    Alert,
}

/// Every character the machine accepts, halting `F` included.
pub const ALPHABET: &[char] = &[
    'S', ' ', '~', 'F', 'I', 'O', '^', 'v', 'A', 'U', 'M', 'D', '0', '1', '2', '3', '4', '5', '6',
    '7', '8', '9', '%', '!', 'T', '$', '&', '(', ')', '/', '\\', '|', '-', '+', '#', '@', '<',
    '>', '*',
];

impl Instruction {
    /// Decode a grid character; `None` for anything outside the instruction set.
    pub fn decode(ch: char) -> Option<Self> {
        use Instruction::*;
        let instr = match ch {
            'S' | ' ' | '~' => Nop,
            'I' => Input,
            'O' => Output,
            '^' => Push,
            'v' => Pop,
            'A' => Add,
            'U' => Sub,
            'M' => Mul,
            'D' => Div,
            '0'..='9' => Digit(ch as u8 - b'0'),
            '%' => IsZero,
            '!' => Not,
            'T' => SetTrue,
            '$' => MatrixPop,
            '&' => MatrixPush,
            '(' => GoEast,
            ')' => GoWest,
            '/' => Slash,
            '\\' => Backslash,
            '|' => FlipHorizontal,
            '-' => FlipVertical,
            '+' => Reverse,
            '#' => Bounce,
            '@' => Skip,
            '<' => RotateLeft,
            '>' => RotateRight,
            '*' => Alert,
            _ => return None,
        };
        Some(instr)
    }
}

/// Returns true if `ch` means something to the machine.
pub fn is_instruction(ch: char) -> bool {
    ch == 'F' || Instruction::decode(ch).is_some()
}
