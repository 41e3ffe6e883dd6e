use console::{StyledObject, style};
use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Overrides the level selected by `--verbose`
pub const LOG_ENV: &str = "PREFIX_EXEC_LOG";

/// Initialize the CLI logger
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    Builder::from_env(Env::new().filter_or(LOG_ENV, default))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {}",
                level_tag(record.level()),
                style(record.target()).dim(),
                record.args()
            )
        })
        .init();
}

fn level_tag(level: Level) -> StyledObject<&'static str> {
    match level {
        Level::Error => style("error").red().bold(),
        Level::Warn => style("warn ").yellow().bold(),
        Level::Info => style("info ").green(),
        Level::Debug => style("debug").cyan(),
        Level::Trace => style("trace").dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tags_have_equal_width() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_tag(level).force_styling(false).to_string().len(), 5);
        }
    }
}
