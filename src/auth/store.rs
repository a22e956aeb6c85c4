use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::auth::token::Credential;
use crate::error::AppError;

/// The JSON token file shared across runs.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Credential, AppError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.token_error(e))?;
        let credential: Credential =
            serde_json::from_str(&contents).map_err(|e| self.token_error(e))?;
        if credential.access_token.is_empty() {
            return Err(self.token_error("access_token is empty"));
        }
        Ok(credential)
    }

    /// Replace the file contents with `credential`.
    pub fn save(&self, credential: &Credential) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    pub fn delete(&self) -> Result<bool, AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn token_error(&self, message: impl ToString) -> AppError {
        AppError::Token {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AppError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credential(token: &str) -> Credential {
        serde_json::from_value(serde_json::json!({
            "access_token": token,
            "refresh_token": "refresh",
        }))
        .unwrap()
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("oauth2.json"));

        store.save(&credential("first-token-which-is-long")).unwrap();
        store.save(&credential("second")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token, "second");
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("first-token"));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("oauth2.json"));
        fs::write(store.path(), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.error_type(), "token");
    }

    #[test]
    fn test_load_rejects_empty_access_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("oauth2.json"));
        fs::write(store.path(), r#"{"access_token": ""}"#).unwrap();

        assert!(matches!(store.load(), Err(AppError::Token { .. })));
    }

    #[test]
    fn test_delete_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("oauth2.json"));
        assert!(!store.delete().unwrap());

        store.save(&credential("abc")).unwrap();
        assert!(store.exists());
        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }
}
