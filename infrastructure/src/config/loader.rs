//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["aurelio.toml", ".aurelio.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./aurelio.toml` or `./.aurelio.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/aurelio/config.toml`
    /// 4. `AURELIO_*` environment variables (`AURELIO_ADVICE__MODEL`, ...)
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|path| path.exists());
        let project = Self::project_config_path();
        Self::from_sources(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the discovered files over defaults and environment, lowest priority first
    fn from_sources(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        [global, project, explicit]
            .into_iter()
            .flatten()
            .fold(Self::base(), |figment, path| figment.merge(Toml::file(path)))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn base() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed("AURELIO_").split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/aurelio/config.toml` if set,
    /// otherwise falls back to `~/.config/aurelio/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aurelio").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./aurelio.toml or ./.aurelio.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Env:     AURELIO_* variables");
        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurelio_domain::AdviceModel;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.advice.model, AdviceModel::Gemini3Flash);
        assert!(config.catalog.path.is_none());
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("aurelio"));
    }

    #[test]
    fn test_explicit_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aurelio.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[advice]\nmodel = \"gemini-2.5-flash\"\nhistory_window = 6").unwrap();
        drop(file);

        let config = ConfigLoader::from_sources(None, None, Some(&path)).unwrap();
        assert_eq!(config.advice.model, AdviceModel::Gemini25Flash);
        assert_eq!(config.advice.history_window, Some(6));
        assert_eq!(config.advice.timeout_seconds, Some(30));
        assert!(config.output.color);
    }

    #[test]
    fn test_type_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[advice]\ntemperature = \"hot\"\n").unwrap();
        assert!(ConfigLoader::from_sources(None, None, Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_file_wins_over_project_and_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.toml");
        let project = dir.path().join("aurelio.toml");
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&global, "[advice]\nmodel = \"gemini-2.5-flash\"\nhistory_window = 4\n")
            .unwrap();
        std::fs::write(&project, "[advice]\nhistory_window = 8\n").unwrap();
        std::fs::write(&explicit, "[repl]\nshow_progress = false\n").unwrap();

        let config =
            ConfigLoader::from_sources(Some(&global), Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.advice.model, AdviceModel::Gemini25Flash);
        assert_eq!(config.advice.history_window, Some(8));
        assert!(!config.repl.show_progress);
    }
}
