use std::collections::VecDeque;
use std::io::{self, BufWriter, Read, Stdout, Write};

/// The capabilities a running machine needs from its environment.
///
/// The interpreter is generic over `Host`, so the same engine drives the
/// console, in-memory test buffers and the fuzz harness.
pub trait Host {
    /// Emit the character whose code is `code`.
    fn write_char(&mut self, code: u8) -> io::Result<()>;

    /// Block for the next input byte. `None` means end of input.
    fn read_char(&mut self) -> io::Result<Option<u8>>;

    /// Fire-and-forget audible or visual signal.
    fn alert(&mut self);

    /// Whether the interpreter should build per-step snapshots at all.
    fn tracing(&self) -> bool {
        false
    }

    /// Receive one snapshot line. Only called when [`Host::tracing`] is true.
    fn trace(&mut self, message: &str) {
        let _ = message;
    }
}

/// Stdin/stdout host used by the `runr` binary.
///
/// Output is buffered and flushed before every read so prompts appear in
/// interactive sessions. Alerts ring the terminal bell on stderr. Trace lines
/// are forwarded as `tracing` events under the `runr::step` target.
pub struct ConsoleHost {
    stdout: BufWriter<Stdout>,
    trace: bool,
}

impl ConsoleHost {
    pub fn new(trace: bool) -> Self {
        Self {
            stdout: BufWriter::new(io::stdout()),
            trace,
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Host for ConsoleHost {
    fn write_char(&mut self, code: u8) -> io::Result<()> {
        let mut buf = [0u8; 4];
        let encoded = char::from(code).encode_utf8(&mut buf);
        self.stdout.write_all(encoded.as_bytes())
    }

    fn read_char(&mut self) -> io::Result<Option<u8>> {
        self.stdout.flush()?;
        let mut byte = [0u8; 1];
        match io::stdin().lock().read_exact(&mut byte) {
            Ok(()) => Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn alert(&mut self) {
        let _ = io::stderr().write_all(b"\x07");
    }

    fn tracing(&self) -> bool {
        self.trace
    }

    fn trace(&mut self, message: &str) {
        tracing::trace!(target: "runr::step", "{message}");
    }
}

/// In-memory host: scripted input, captured output.
#[derive(Clone, Debug, Default)]
pub struct BufferHost {
    input: VecDeque<u8>,
    /// Every code passed to `write_char`, in order.
    pub output: Vec<u8>,
    /// Number of alerts fired.
    pub alerts: usize,
    /// Captured snapshots; `None` disables tracing.
    pub trace: Option<Vec<String>>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Start capturing trace lines.
    pub fn traced(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Bytes of input not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Host for BufferHost {
    fn write_char(&mut self, code: u8) -> io::Result<()> {
        self.output.push(code);
        Ok(())
    }

    fn read_char(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn alert(&mut self) {
        self.alerts += 1;
    }

    fn tracing(&self) -> bool {
        self.trace.is_some()
    }

    fn trace(&mut self, message: &str) {
        if let Some(lines) = &mut self.trace {
            lines.push(message.to_string());
        }
    }
}
