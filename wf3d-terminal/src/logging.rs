/// Logger setup for the terminal frontend
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

/// Where logs go when no `--log-file` is given
pub const DEFAULT_LOG_FILE: &str = "wf3d-terminal.log";

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "wf3d_core=debug"). Records always go to `file`: the renderer owns the
/// terminal, and anything written to stderr would land on top of the frame.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let file = File::create(&config.file)?;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.target(env_logger::Target::Pipe(Box::new(file)));
        builder.write_style(env_logger::WriteStyle::Never);

        builder.init();
        log::debug!("logging initialized");
    });
    Ok(())
}
