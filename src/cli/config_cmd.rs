//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::command::{split_args, Extension};
use crate::domain::config::AppConfig;
use crate::domain::device::DeviceSelection;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "screen" => config.screen.clone(),
        "audio" => config.audio.clone(),
        "camera" => config.camera.clone(),
        "screen_args" => config.screen_args.clone(),
        "audio_args" => config.audio_args.clone(),
        "camera_args" => config.camera_args.clone(),
        "output_args" => config.output_args.clone(),
        "extension" => config.extension.clone(),
        "framerate" => config.framerate.map(|f| f.to_string()),
        "output_dir" => config.output_dir.clone(),
        "ffmpeg" => config.ffmpeg.clone(),
        _ => None,
    }
}

fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.to_string();
    match key {
        "screen" => config.screen = Some(value),
        "audio" => config.audio = Some(value),
        "camera" => config.camera = Some(value),
        "screen_args" => config.screen_args = Some(value),
        "audio_args" => config.audio_args = Some(value),
        "camera_args" => config.camera_args = Some(value),
        "output_args" => config.output_args = Some(value),
        "extension" => config.extension = Some(value),
        "framerate" => config.framerate = Some(parse_framerate(key, &value)?),
        "output_dir" => config.output_dir = Some(value),
        "ffmpeg" => config.ffmpeg = Some(value),
        _ => return check_key(key),
    }
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "screen" | "audio" | "camera" => {
            value
                .parse::<DeviceSelection>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "screen_args" | "audio_args" | "camera_args" | "output_args" => {
            split_args(value).map_err(|e| invalid(e.to_string()))?;
        }
        "extension" => {
            Extension::parse(value).map_err(|e| invalid(e.to_string()))?;
        }
        "framerate" => {
            parse_framerate(key, value)?;
        }
        "ffmpeg" | "output_dir" if value.trim().is_empty() => {
            return Err(invalid("Value must not be empty".to_string()));
        }
        _ => {}
    }
    Ok(())
}

fn parse_framerate(key: &str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be a positive whole number".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn validate_selections() {
        assert!(validate_config_value("screen", "prompt").is_ok());
        assert!(validate_config_value("audio", "2").is_ok());
        assert!(validate_config_value("camera", "off").is_ok());
        assert!(validate_config_value("camera", "front").is_err());
    }

    #[test]
    fn validate_args_need_balanced_quotes() {
        assert!(validate_config_value("output_args", "-metadata title='My talk'").is_ok());
        assert!(validate_config_value("output_args", "-metadata title='My talk").is_err());
    }

    #[test]
    fn validate_extension() {
        assert!(validate_config_value("extension", ".mp4").is_ok());
        assert!(validate_config_value("extension", "m p4").is_err());
    }

    #[test]
    fn validate_framerate() {
        assert!(validate_config_value("framerate", "60").is_ok());
        assert!(validate_config_value("framerate", "0").is_err());
        assert!(validate_config_value("framerate", "fast").is_err());
    }

    #[test]
    fn validate_paths_not_empty() {
        assert!(validate_config_value("ffmpeg", "  ").is_err());
        assert!(validate_config_value("output_dir", "~/Videos").is_ok());
    }

    #[test]
    fn set_then_get_every_key() {
        let mut config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            let value = if *key == "framerate" { "24" } else { "1" };
            set_value(&mut config, key, value).unwrap();
            assert_eq!(get_value(&config, key).as_deref(), Some(value), "key {}", key);
        }
    }

    #[tokio::test]
    async fn set_persists_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "framerate", "60").await.unwrap();
        handle_set(&store, &presenter, "audio", "1").await.unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.framerate, Some(60));
        assert_eq!(config.audio.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let result = handle_set(&store, &Presenter::new(), "api_key", "x").await;

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }
}
