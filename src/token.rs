//! Saved bearer token for the command-line front end.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};

/// A token kept in a single file, by default `<data_dir>/twilight/token`.
#[derive(Debug, Clone)]
pub struct TokenStore {
  path: PathBuf,
}

impl TokenStore {
  /// Store at the default location, if the platform has a data directory.
  pub fn default_location() -> Option<Self> {
    dirs::data_dir().map(|dir| Self::at(dir.join("twilight").join("token")))
  }

  pub fn at(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The saved token; a missing or blank file means none.
  pub fn load(&self) -> Result<Option<String>> {
    match std::fs::read_to_string(&self.path) {
      Ok(contents) => {
        let token = contents.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(eyre!("Failed to read token file {}: {}", self.path.display(), e)),
    }
  }

  pub fn save(&self, token: &str) -> Result<()> {
    if let Some(dir) = self.path.parent() {
      std::fs::create_dir_all(dir)
        .map_err(|e| eyre!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    std::fs::write(&self.path, token)
      .map_err(|e| eyre!("Failed to write token file {}: {}", self.path.display(), e))?;
    tracing::debug!("Saved token to {}", self.path.display());
    Ok(())
  }

  /// Remove the saved token. Clearing an absent token is not an error.
  pub fn clear(&self) -> Result<()> {
    match std::fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(eyre!("Failed to remove token file {}: {}", self.path.display(), e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch(name: &str) -> TokenStore {
    let dir = std::env::temp_dir().join(format!("twilight-token-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    TokenStore::at(dir.join("nested").join("token"))
  }

  #[test]
  fn test_missing_file_is_no_token() {
    let store = scratch("missing");
    assert_eq!(store.load().unwrap(), None);
  }

  #[test]
  fn test_save_load_clear() {
    let store = scratch("cycle");

    store.save("abc123").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
  }

  #[test]
  fn test_whitespace_is_trimmed() {
    let store = scratch("trim");
    store.save("  tok\n").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok"));

    store.save("\n").unwrap();
    assert_eq!(store.load().unwrap(), None);
  }
}
