use std::path::PathBuf;

use clap::Args;
use env_logger::Env;

use crate::store::JsonFileStore;

/// Options shared by every command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the quiz records
    #[arg(long, env = "QUIZ_STORE", default_value = "quizzes.json", global = true)]
    pub store: PathBuf,
    /// Id of the acting user; quizzes are listed and edited per owner
    #[arg(long, env = "QUIZ_USER", default_value = "local", global = true)]
    pub user: String,
    /// Which messages to log (error, warn, info or debug) when RUST_LOG is unset
    #[arg(long, env = "QUIZ_LOG", default_value = "warn", global = true)]
    pub log_level: String,
}

impl Config {
    /// Install the global logger. `RUST_LOG` wins over `--log-level`.
    pub fn init_logging(&self) {
        env_logger::Builder::from_env(Env::default().default_filter_or(self.log_level.as_str()))
            .format_timestamp(None)
            .init();
    }

    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store)
    }
}

#[cfg(test)]
mod config_tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "quiz-forge",
            "--store",
            "/tmp/q.json",
            "--user",
            "bob",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(
            cli.config,
            Config {
                store: PathBuf::from("/tmp/q.json"),
                user: "bob".to_string(),
                log_level: "debug".to_string(),
            }
        );
        assert_eq!(cli.config.open_store().path(), PathBuf::from("/tmp/q.json"));
    }
}
