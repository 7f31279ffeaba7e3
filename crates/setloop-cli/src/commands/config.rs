use clap::Subcommand;
use setloop_core::WorkoutConfig;

use super::open_config_strict;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key ("exercises", "exercise_duration", "rest_duration")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value; lists take a comma-separated string or a JSON array
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut persisted = open_config_strict(None)?;

    match action {
        ConfigAction::Get { key } => match persisted.config().get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key}");
                std::process::exit(1);
            }
        },
        ConfigAction::Set { key, value } => {
            persisted.edit(|config| config.set(&key, &value))?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(persisted.config())?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            persisted.replace(WorkoutConfig::default());
            println!("config reset to defaults");
        }
    }
    Ok(())
}
