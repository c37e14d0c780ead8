use crate::utils::errors::Result;
use std::fmt::Display;
use std::io::{self, Write};

/// Operator-facing output, written to stdout in the binary and to a buffer in tests
pub struct OutputFormat<W: Write> {
    out: W,
}

impl OutputFormat<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormat<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a single line
    pub fn line<T: Display>(&mut self, message: T) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    /// Print key-value pairs with the keys padded to a common width
    pub fn print_key_value<K, V>(&mut self, pairs: &[(K, V)]) -> Result<()>
    where
        K: AsRef<str>,
        V: Display,
    {
        let width = pairs
            .iter()
            .map(|(k, _)| k.as_ref().len())
            .max()
            .unwrap_or(0);

        for (key, value) in pairs {
            writeln!(self.out, "  {:<width$}  {value}", key.as_ref())?;
        }
        Ok(())
    }
}
