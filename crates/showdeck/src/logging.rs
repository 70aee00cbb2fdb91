use colored::Colorize;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Level for the `-v`/`-q` flags. `-q` wins over any number of `-v`.
pub fn level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub fn init(verbose: u8, quiet: bool) {
    Builder::new()
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red().bold(),
                log::Level::Warn => record.level().to_string().yellow().bold(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().purple(),
            };
            writeln!(buf, "[{}] {}", level, record.args())
        })
        .filter(None, level(verbose, quiet))
        // eframe and its windowing stack are chatty at debug
        .filter(Some("winit"), LevelFilter::Warn)
        .filter(Some("wgpu_core"), LevelFilter::Warn)
        .filter(Some("wgpu_hal"), LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level(0, false), LevelFilter::Warn);
        assert_eq!(level(1, false), LevelFilter::Debug);
        assert_eq!(level(2, false), LevelFilter::Trace);
        assert_eq!(level(5, false), LevelFilter::Trace);
        assert_eq!(level(2, true), LevelFilter::Error);
    }
}
