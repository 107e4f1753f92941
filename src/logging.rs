use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::errors::ConfigError;
use crate::initialization::LoggingConfig;

/// Sets up log4rs with a console appender at the configured level
///
pub fn setup_logger(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level.parse::<LevelFilter>()
        .map_err(|_| ConfigError(format!("unknown log level: {}", config.level)))?;

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}")))
        .build();

    let log_config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;

    log4rs::init_config(log_config)?;

    Ok(())
}
