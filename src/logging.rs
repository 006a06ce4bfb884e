//! One-shot logger initialisation for binaries and benchmarks embedding the engine.
//!
//! The library itself only emits through the `log` facade; nothing is printed
//! unless the host installs a logger, either its own or this one.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use crate::config::LoggingConfig;
use crate::error::BitmapError;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` writing `[LEVEL] message` lines at `level`, to
/// `log_file` (append mode) if given, stderr otherwise.
///
/// Only the first call has any effect; later calls return `Ok(())`. If another
/// logger is already installed, that one is kept.
pub fn enable_verbose_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), BitmapError> {
    // Open the file before entering the Once so an I/O error can be reported.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Plain `[LEVEL] message` lines, no timestamp or module path.
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

/// Initialises logging from a `LoggingConfig`.
pub fn init_from_config(config: &LoggingConfig) -> Result<(), BitmapError> {
    enable_verbose_logging(config.level_filter()?, config.log_file.as_deref())
}
