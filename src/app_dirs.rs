use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "devtype").map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("devtype");
            Some(state_dir.join("devtype.log"))
        } else {
            ProjectDirs::from("", "", "devtype")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("devtype.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_app_specific() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.to_string_lossy().contains("devtype"));
            assert_eq!(path.file_name().unwrap(), "devtype.log");
        }
        if let Some(path) = AppDirs::config_path() {
            assert_eq!(path.file_name().unwrap(), "config.json");
        }
    }
}
