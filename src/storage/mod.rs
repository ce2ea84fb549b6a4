use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use eyre::{Context, Result, bail};

/// File-backed home of the device auth key. The key is written once
/// on first run and read verbatim on every later run; nothing here
/// expires or rotates it.
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    pub fn new(path: impl Into<PathBuf>) -> AuthStore {
        AuthStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let key = std::fs::read_to_string(&self.path)
            .wrap_err(format!("reading {}", self.path.display()))?;
        let key = key.trim();
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(key.to_string()))
    }

    pub fn save(&self, key: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .wrap_err(format!("creating directory {}", dir.display()))?;
        }
        std::fs::write(&self.path, key).wrap_err(format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Returns the stored key, or prompts for one on the terminal and
    /// persists it. Must run before the alternate screen is entered.
    pub fn load_or_prompt(&self) -> Result<String> {
        if let Some(key) = self.load()? {
            return Ok(key);
        }

        eprint!("Enter your auth key: ");
        std::io::stderr().flush().wrap_err("flushing stderr")?;

        let mut key = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut key)
            .wrap_err("reading auth key")?;
        let key = key.trim().to_string();
        if key.is_empty() {
            bail!("no auth key provided");
        }

        self.save(&key)?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_key_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("neoctl-test-{}-{}", name, std::process::id()))
            .join("auth_key")
    }

    #[test]
    fn test_load_missing_key() {
        let store = AuthStore::new(temp_key_path("missing"));
        assert!(store.load().expect("load failed").is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_key_path("roundtrip");
        let store = AuthStore::new(&path);
        store.save("sekrit\n").expect("save failed");
        assert_eq!(store.load().expect("load failed").as_deref(), Some("sekrit"));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_blank_file_counts_as_missing() {
        let path = temp_key_path("blank");
        let store = AuthStore::new(&path);
        store.save("   \n").expect("save failed");
        assert!(store.load().expect("load failed").is_none());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
