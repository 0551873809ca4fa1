use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file inside its own temp directory.
///
/// The directory lives as long as the value, so relative state paths can be
/// pointed inside it.
pub struct TempConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempConfig {
    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("subscribers.json")
    }
}

/// Write `contents` to `config.toml` in a fresh temp directory.
///
/// `{state}` in the contents is replaced with a state file path inside the
/// same directory.
pub fn write_temp_config(contents: &str) -> TempConfig {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    let state = dir.path().join("subscribers.json");
    let contents = contents.replace("{state}", &state.display().to_string().replace('\\', "/"));
    fs::write(&path, contents).expect("write temp config");
    TempConfig { dir, path }
}
