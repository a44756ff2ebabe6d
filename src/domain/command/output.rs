//! Output file naming

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::error::CommandError;

/// Default container extension
pub const DEFAULT_EXTENSION: &str = "mkv";

/// Validated container extension (without the leading dot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension(String);

impl Extension {
    pub fn parse(value: &str) -> Result<Self, CommandError> {
        let trimmed = value.trim().trim_start_matches('.');
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CommandError::InvalidExtension(value.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self(DEFAULT_EXTENSION.to_string())
    }
}

/// File name for a capture started at `started`
pub fn default_file_name(started: NaiveDateTime, extension: &Extension) -> String {
    format!(
        "Screencast {} at {}.{}",
        started.format("%Y-%m-%d"),
        started.format("%H.%M.%S"),
        extension.as_str()
    )
}

/// Where the capture is written: an explicit path wins over directory + generated name
pub fn output_path(
    explicit: Option<&Path>,
    directory: Option<&Path>,
    started: NaiveDateTime,
    extension: &Extension,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => directory
            .unwrap_or_else(|| Path::new("."))
            .join(default_file_name(started, extension)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap()
    }

    #[test]
    fn extension_accepts_common_containers() {
        assert_eq!(Extension::parse("mkv").unwrap().as_str(), "mkv");
        assert_eq!(Extension::parse(".MP4").unwrap().as_str(), "mp4");
        assert_eq!(Extension::parse(" webm ").unwrap().as_str(), "webm");
    }

    #[test]
    fn extension_rejects_paths_and_blanks() {
        assert!(Extension::parse("").is_err());
        assert!(Extension::parse(".").is_err());
        assert!(Extension::parse("mkv/../x").is_err());
        assert!(Extension::parse("tar.gz").is_err());
    }

    #[test]
    fn file_name_has_date_and_time() {
        let name = default_file_name(started(), &Extension::default());
        assert_eq!(name, "Screencast 2024-03-09 at 07.05.42.mkv");
    }

    #[test]
    fn explicit_path_wins() {
        let path = output_path(
            Some(Path::new("/tmp/demo.mp4")),
            Some(Path::new("/videos")),
            started(),
            &Extension::default(),
        );
        assert_eq!(path, PathBuf::from("/tmp/demo.mp4"));
    }

    #[test]
    fn directory_joins_generated_name() {
        let ext = Extension::parse("mp4").unwrap();
        let path = output_path(None, Some(Path::new("/videos")), started(), &ext);
        assert_eq!(
            path,
            PathBuf::from("/videos/Screencast 2024-03-09 at 07.05.42.mp4")
        );
    }

    #[test]
    fn defaults_to_current_directory() {
        let path = output_path(None, None, started(), &Extension::default());
        assert_eq!(path, Path::new(".").join("Screencast 2024-03-09 at 07.05.42.mkv"));
    }
}
