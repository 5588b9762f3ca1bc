//! Log backend configuration

use {clap::ArgMatches, log::LevelFilter, std::str::FromStr};

/// Verbosity of the process, picked once at startup from `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Level was given on the command line and wins over `RUST_LOG`
    pub explicit: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            explicit: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            explicit: true,
        }
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let level = matches
            .value_of("log_level")
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Info);
        Self {
            level,
            explicit: matches.occurrences_of("log_level") > 0,
        }
    }

    /// Filter directive handed to the logger. Solana crates stay at `warn`
    /// below `debug`.
    pub fn filter(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        if self.level >= LevelFilter::Debug {
            level
        } else {
            format!("{},solana=warn", level)
        }
    }

    /// Install the backend. Only the first call in a process takes effect.
    /// Without an explicit level, `RUST_LOG` takes precedence when set.
    pub fn setup(&self) {
        if self.explicit {
            solana_logger::setup_with(&self.filter());
        } else {
            solana_logger::setup_with_default(&self.filter());
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::clap_app::app};

    #[test]
    fn level_comes_from_the_command_line() {
        let program_id = bundt_cake_interface::id().to_string();
        let matches =
            app(&program_id).get_matches_from(vec!["bundt-cake", "-l", "debug", "create"]);
        let (_, sub_matches) = matches.subcommand();
        assert_eq!(
            LogConfig::from_matches(sub_matches.unwrap()),
            LogConfig::new(LevelFilter::Debug)
        );

        let matches = app(&program_id).get_matches_from(vec!["bundt-cake", "create"]);
        let (_, sub_matches) = matches.subcommand();
        let log_config = LogConfig::from_matches(sub_matches.unwrap());
        assert_eq!(log_config, LogConfig::default());
        assert!(!log_config.explicit);
    }

    #[test]
    fn level_given_after_the_subcommand_is_explicit() {
        let program_id = bundt_cake_interface::id().to_string();
        let matches =
            app(&program_id).get_matches_from(vec!["bundt-cake", "create", "--log-level", "warn"]);
        let (_, sub_matches) = matches.subcommand();
        let log_config = LogConfig::from_matches(sub_matches.unwrap());
        assert!(log_config.explicit);
        assert_eq!(log_config.level, LevelFilter::Warn);
    }

    #[test]
    fn filter_directives() {
        assert_eq!(LogConfig::new(LevelFilter::Warn).filter(), "warn,solana=warn");
        assert_eq!(LogConfig::default().filter(), "info,solana=warn");
        assert_eq!(LogConfig::new(LevelFilter::Trace).filter(), "trace");
    }
}
