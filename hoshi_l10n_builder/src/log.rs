//! Minimal timestamped console output.

use std::fmt::{self, Arguments};
use std::io::{self, IsTerminal, Write as _, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Instant, SystemTime};

macro_rules! action {
    ($($t:tt)*) => {
        $crate::log::Action::start(::std::format!($($t)*))
    };
}

macro_rules! info {
    ($($t:tt)*) => {
        $crate::log::__println($crate::log::Level::Info, ::std::format_args!($($t)*))
    };
}

macro_rules! warning {
    ($($t:tt)*) => {
        $crate::log::__println($crate::log::Level::Warn, ::std::format_args!($($t)*))
    };
}

pub(crate) use {action, info, warning};

const GRAY: &str = "\x1b[38;5;8m";
const GREEN: &str = "\x1b[38;5;10m";
const YELLOW: &str = "\x1b[38;5;11m";
const RESET: &str = "\x1b[0m";

static COLOR: AtomicBool = AtomicBool::new(false);

/// Sets whether output is colored. [`None`] detects support.
pub fn use_color(color: Option<bool>) {
    let color = color.unwrap_or_else(|| detect_color(&io::stdout()));
    COLOR.store(color, Ordering::Relaxed);
}

fn detect_color<T: IsTerminal>(stream: &T) -> bool {
    use anstyle_query as a;

    if a::no_color() {
        return false;
    }

    if a::clicolor_force() {
        return true;
    }

    match a::clicolor() {
        Some(false) => false,
        clicolor => stream.is_terminal() && (clicolor.is_some() || a::term_supports_color() || a::is_ci()),
    }
}

/// Returns the escape sequence if color is enabled, else nothing.
fn esc(code: &'static str) -> &'static str {
    if COLOR.load(Ordering::Relaxed) { code } else { "" }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[doc(hidden)]
pub enum Level {
    Info,
    Warn,
}

#[doc(hidden)]
pub fn __println(level: Level, args: Arguments<'_>) {
    let mut out = stdout().lock();
    _ = write!(
        out,
        "{}[{}]{} ",
        esc(GRAY),
        humantime::format_rfc3339_seconds(SystemTime::now()),
        esc(RESET),
    );

    if level == Level::Warn {
        _ = write!(out, "{}warning:{} ", esc(YELLOW), esc(RESET));
    }

    _ = writeln!(out, "{args}");
}

/// A timed step. Prints its name when started and the elapsed time once
/// finished or dropped.
#[derive(Debug)]
#[must_use = "dropping an action finishes it immediately"]
pub struct Action {
    name: String,
    start: Instant,
    count: Option<usize>,
}

impl Action {
    pub fn start(name: String) -> Self {
        info!("{name}");
        Self {
            name,
            start: Instant::now(),
            count: None,
        }
    }

    /// Sets a count to report when finished.
    pub fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Action {
    fn drop(&mut self) {
        info!(
            "{} {}[{:.1?}]{}{} {}Done!{}",
            self.name,
            esc(GRAY),
            self.start.elapsed(),
            esc(RESET),
            Count(self.count),
            esc(GREEN),
            esc(RESET),
        );
    }
}

struct Count(Option<usize>);

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(count) => write!(f, " ({count})"),
            None => Ok(()),
        }
    }
}
