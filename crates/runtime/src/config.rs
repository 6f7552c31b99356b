//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Session name used when `ENCOUNTER_SESSION_ID` is unset.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Where the session lives on disk and whether it is saved at all.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub session_id: Option<String>,
    pub save_data_dir: Option<PathBuf>,
    pub content_data_dir: Option<PathBuf>,
    pub enable_persistence: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            save_data_dir: None,
            content_data_dir: None,
            enable_persistence: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ENCOUNTER_SESSION_ID` - Save file and log directory name (default: "default")
    /// - `SAVE_DATA_DIR` - Directory for snapshots (default: platform data dir)
    /// - `CONTENT_DATA_DIR` - Directory holding `bestiary.ron` and `roster.ron`
    ///   (default: bundled content)
    /// - `ENABLE_PERSISTENCE` - Save after every change (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.session_id = env::var("ENCOUNTER_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());
        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);
        config.content_data_dir = env::var("CONTENT_DATA_DIR").ok().map(PathBuf::from);

        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        config
    }

    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_ID)
    }

    /// Snapshot directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_data_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("saves"))
            .unwrap_or_else(|| env::temp_dir().join("encounter").join("saves"))
    }

    /// Log directory for this session.
    pub fn log_dir(&self) -> PathBuf {
        let base = project_dirs()
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| env::temp_dir().join("encounter").join("logs"));
        base.join(self.session_id())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "encounter")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_persist_under_default_session() {
        let config = RuntimeConfig::default();
        assert!(config.enable_persistence);
        assert_eq!(config.session_id(), DEFAULT_SESSION_ID);
        assert!(config.log_dir().ends_with(DEFAULT_SESSION_ID));
    }

    #[test]
    fn explicit_save_dir_wins() {
        let config = RuntimeConfig {
            save_data_dir: Some(PathBuf::from("/srv/saves")),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.save_dir(), PathBuf::from("/srv/saves"));
    }
}
