//! The `"default"` appender kind: a console appender writing to `stderr`.
//!
//! Each record is encoded into a stack buffer first and written with a single
//! locked write, so lines from concurrent tasks don't interleave.

use std::io::{self, IsTerminal, Write as _};

use arrayvec::ArrayVec;
use log::Record;
use log4rs::append::Append;
use log4rs::config::{Deserialize, Deserializers};
use log4rs::encode::{self, Color, Encode, EncoderConfig, Style};

use super::LINE_BUF_SIZE;

#[derive(Debug)]
pub struct ConsoleAppender {
    encoder: Box<dyn Encode>,
    color: bool,
}

impl Append for ConsoleAppender {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let mut line = LineWriter {
            color: self.color,
            buf: ArrayVec::new(),
        };

        self.encoder.encode(&mut line, record)?;
        line.flush()?;
        Ok(())
    }

    fn flush(&self) {
        _ = io::stderr().flush();
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ConsoleAppenderConfig {
    /// Forces colors on or off instead of detecting support.
    color: Option<bool>,
    encoder: EncoderConfig,
}

pub struct ConsoleAppenderDeserializer;

impl Deserialize for ConsoleAppenderDeserializer {
    type Trait = dyn Append;
    type Config = ConsoleAppenderConfig;

    fn deserialize(
        &self,
        config: Self::Config,
        deserializers: &Deserializers,
    ) -> anyhow::Result<Box<Self::Trait>> {
        let encoder = deserializers.deserialize(&config.encoder.kind, config.encoder.config)?;
        let color = config.color.unwrap_or_else(|| detect_color(&io::stderr()));
        Ok(Box::new(ConsoleAppender { encoder, color }))
    }
}

/// Whether `stream` should receive ANSI escapes, following the `NO_COLOR` and
/// `CLICOLOR` conventions.
fn detect_color<T: IsTerminal>(stream: &T) -> bool {
    use anstyle_query as q;

    if q::no_color() {
        return false;
    }

    if q::clicolor_force() {
        return true;
    }

    match q::clicolor() {
        Some(false) => false,
        clicolor => stream.is_terminal() && (clicolor.is_some() || q::term_supports_color() || q::is_ci()),
    }
}

/// Buffers one encoded line. Output that doesn't fit goes straight to
/// `stderr` after whatever was buffered.
struct LineWriter {
    color: bool,
    buf: ArrayVec<u8, LINE_BUF_SIZE>,
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.buf.remaining_capacity() < buf.len() {
            self.flush()?;
        }

        if buf.len() > self.buf.capacity() {
            io::stderr().write_all(buf)
        } else {
            self.buf.write_all(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }

        let mut stderr = io::stderr().lock();
        stderr.write_all(&self.buf)?;
        self.buf.clear();
        stderr.flush()
    }
}

/// SGR parameter for a log4rs color.
fn sgr(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::White => 7,
    }
}

impl encode::Write for LineWriter {
    fn set_style(&mut self, style: &Style) -> io::Result<()> {
        if !self.color {
            return Ok(());
        }

        self.write_all(b"\x1b[0m")?;

        if let Some(text) = style.text {
            write!(self, "\x1b[{}m", 30 + sgr(text))?;
        }

        if let Some(background) = style.background {
            write!(self, "\x1b[{}m", 40 + sgr(background))?;
        }

        if style.intense == Some(true) {
            self.write_all(b"\x1b[1m")?;
        }

        Ok(())
    }
}
