use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE: &str = "topology.log";

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory for the log file; `None` logs to the console only.
    pub log_dir: Option<PathBuf>,

    /// Used when `RUST_LOG` is unset or unparsable.
    pub default_level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig { log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)), default_level: LevelFilter::Info }
    }
}

/// Initializes the global logger.
///
/// This function should be called once at the very beginning of `main`.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
/// Example: `RUST_LOG=debug pipeline-topology --blueprint ... --dockerinfo ...`
///
/// Logs go to stderr and, if `config.log_dir` is set, to `<log_dir>/topology.log`.
pub fn init(config: &LoggerConfig) {
    let log_level_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(config.default_level);

    let console_config = Dispatch::new()
        .format(|out, message, record| {
            let colors = fern::colors::ColoredLevelConfig::new()
                .error(fern::colors::Color::Red)
                .warn(fern::colors::Color::Yellow)
                .info(fern::colors::Color::Green)
                .debug(fern::colors::Color::Blue)
                .trace(fern::colors::Color::BrightBlack);

            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut base_config = Dispatch::new().level(log_level_filter).level_for("serde", LevelFilter::Warn).chain(console_config);

    let mut log_file_path = None;
    if let Some(log_dir) = &config.log_dir {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create log directory at '{}': {}", log_dir.display(), e);
        }

        let path = log_dir.join(LOG_FILE);
        match fern::log_file(&path) {
            Ok(file) => {
                let file_config = Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file);
                base_config = base_config.chain(file_config);
                log_file_path = Some(path);
            }
            Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
        }
    }

    base_config.apply().unwrap_or_else(|e| {
        eprintln!("Failed to apply logger configuration: {}", e);
    });

    match log_file_path {
        Some(path) => log::info!("Logger initialized. Logging to console and '{}'.", path.display()),
        None => log::info!("Logger initialized. Logging to console."),
    }
}
