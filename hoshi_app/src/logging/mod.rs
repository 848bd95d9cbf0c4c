//! log4rs setup with the custom `"default"` appender and encoder kinds.

use std::panic::{self, PanicHookInfo};

use log4rs::config::{Deserializers, RawConfig};

mod default_appender;
mod default_pattern;

/// Size of the stack buffer for one console log line.
const LINE_BUF_SIZE: usize = 1024;

/// Installs the global logger described by the `[log.log4rs]` section.
///
/// Any appender that fails to deserialize fails the whole setup.
pub fn init(config: RawConfig) -> anyhow::Result<()> {
    let (appenders, errors) = config.appenders_lossy(&deserializers());
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let config = log4rs::Config::builder()
        .appenders(appenders)
        .loggers(config.loggers())
        .build(config.root())?;

    log4rs::init_config(config)?;
    Ok(())
}

/// Routes panics through the logger.
///
/// Call this only after [`init`].
pub fn install_panic_hook() {
    panic::set_hook(Box::new(on_panic));
}

/// The log4rs deserializers including the custom `"default"` kinds.
fn deserializers() -> Deserializers {
    let mut d = Deserializers::new();
    d.insert("default", default_appender::ConsoleAppenderDeserializer);
    d.insert("default", default_pattern::PatternDeserializer);
    d
}

fn on_panic(info: &PanicHookInfo<'_>) {
    use std::backtrace::Backtrace;
    use std::io::{Write as _, stdout};

    // captured even if RUST_BACKTRACE is unset
    let backtrace = Backtrace::force_capture();
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");

    // the logger may be the thing that panicked
    _ = writeln!(stdout(), "thread '{name}' {info}");
    log::error!("thread '{name}' {info}\n{backtrace}");
    log::logger().flush();
}
