//! Operator I/O
//!
//! The console talks to the operator only through [`InputReader`] and
//! [`OutputWriter`], so a whole session (forms, confirmation prompts and
//! all) can be replayed from a script under test.

use std::io::{self, BufRead, Write};

/// ANSI sequence that wipes the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Where operator lines come from
pub trait InputReader {
    /// Show `prompt` and read one raw line. End of input is reported as
    /// `UnexpectedEof`.
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error>;

    /// Read a form field or confirmation answer with surrounding whitespace
    /// removed.
    fn read_field(&mut self, prompt: &str) -> Result<String, io::Error> {
        Ok(self.read_line(prompt)?.trim().to_string())
    }
}

/// Where rendered lines go
pub trait OutputWriter {
    fn write(&mut self, message: &str);

    fn writeln(&mut self, message: &str);

    /// Blank the operator's view (the `clear` command).
    fn clear_screen(&mut self) {
        self.write(CLEAR_SCREEN);
    }
}

/// The operator's terminal: stdin for input, stdout for output.
/// Trace output goes to stderr and never lands here.
pub struct StdConsole;

impl InputReader for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} ", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "operator input closed")),
            _ => Ok(line),
        }
    }
}

impl OutputWriter for StdConsole {
    fn write(&mut self, message: &str) {
        let mut stdout = io::stdout().lock();
        // a closed stdout leaves nothing to report to
        let _ = stdout.write_all(message.as_bytes()).and_then(|_| stdout.flush());
    }

    fn writeln(&mut self, message: &str) {
        println!("{}", message);
    }
}
