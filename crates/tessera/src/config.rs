use std::path::{Path, PathBuf};

use tessera_engine::EngineSettings;

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "tessera";

pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn log_dir() -> Option<PathBuf> {
    let dir = config_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

/// Settings from `path`, or from the config directory. Unreadable files fall back to the defaults.
pub fn load_settings(path: Option<&Path>) -> EngineSettings {
    let Some(path) = path.map(Path::to_path_buf).or_else(|| config_dir().map(|dir| dir.join(EngineSettings::FILE_NAME))) else {
        return EngineSettings::default();
    };
    match EngineSettings::load(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings from {}: {err}", path.display());
            EngineSettings::default()
        }
    }
}
