use clap::Subcommand;
use tiltboard_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `alarm.snooze_minutes`
    Get { key: String },
    /// Change one value and write the file
    Set { key: String, value: String },
    /// Print every `key = value` pair
    List {
        /// Only keys under this section, e.g. `orientation`
        section: Option<String>,
    },
    /// Overwrite the file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { section } => {
            let prefix = section.map(|s| format!("{s}."));
            let entries = Config::load()?.entries();
            let mut shown = 0;
            for (key, value) in entries
                .iter()
                .filter(|(key, _)| prefix.as_deref().map_or(true, |p| key.starts_with(p)))
            {
                println!("{key} = {value}");
                shown += 1;
            }
            if shown == 0 {
                if let Some(prefix) = prefix {
                    return Err(ConfigError::UnknownKey(prefix.trim_end_matches('.').into()).into());
                }
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
