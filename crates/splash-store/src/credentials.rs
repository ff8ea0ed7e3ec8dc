//! The credential store: a JSON document of username -> password digest.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use splash_core::error::Result;
use splash_core::{CredentialRepository, StoreError, Username};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

type CredentialMap = BTreeMap<String, String>;

/// File-backed implementation of [`CredentialRepository`].
///
/// Passwords are stored as unsalted lowercase-hex SHA-256 digests for
/// compatibility with documents written by earlier deployments.
/// Records are never mutated or removed; there is no password change
/// and no account deletion.
#[derive(Debug)]
pub struct JsonCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the backing document. Missing or unparseable files are an
    /// empty map, never an error.
    async fn load(&self) -> CredentialMap {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return CredentialMap::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "credential document unparseable, treating as empty");
                CredentialMap::new()
            }
        }
    }

    async fn save(&self, credentials: &CredentialMap) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(credentials)
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for JsonCredentialStore {
    async fn register(&self, username: &Username, password: &str) -> Result<()> {
        if username.is_reserved() {
            return Err(StoreError::InvalidInput(
                "this username is reserved".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(StoreError::InvalidInput(
                "password cannot be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut credentials = self.load().await;
        if credentials.contains_key(username.as_str()) {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }
        credentials.insert(username.as_str().to_owned(), digest(password));
        self.save(&credentials).await
    }

    async fn authenticate(&self, username: &Username, password: &str) -> Result<()> {
        let credentials = self.load().await;
        // Unknown user and wrong password take the same path to the
        // same error: responses must not allow username enumeration.
        let stored = credentials
            .get(username.as_str())
            .ok_or(StoreError::InvalidCredentials)?;
        if !constant_time_eq(stored.as_bytes(), digest(password).as_bytes()) {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(())
    }
}

/// Lowercase-hex SHA-256 of the password.
fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> JsonCredentialStore {
        JsonCredentialStore::new(dir.path().join("data").join("users.json"))
    }

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.register(&user("alice"), "pw1").await.unwrap();
        store.authenticate(&user("alice"), "pw1").await.unwrap();
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.register(&user("alice"), "pw1").await.unwrap();

        let wrong_pw = store
            .authenticate(&user("alice"), "pw2")
            .await
            .unwrap_err();
        let unknown = store
            .authenticate(&user("mallory"), "pw1")
            .await
            .unwrap_err();

        assert!(matches!(wrong_pw, StoreError::InvalidCredentials));
        assert!(matches!(unknown, StoreError::InvalidCredentials));
        assert_eq!(wrong_pw.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn names_collide_after_normalization() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.register(&user("Bob "), "pw1").await.unwrap();
        let err = store.register(&user("bob"), "pw2").await.unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn reserved_name_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.register(&user("Global"), "pw").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_password_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.register(&user("alice"), "").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn stores_unsalted_sha256_hex() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.register(&user("alice"), "pw1").await.unwrap();

        let raw = fs::read(dir.path().join("data").join("users.json"))
            .await
            .unwrap();
        let map: CredentialMap = serde_json::from_slice(&raw).unwrap();
        // Known digest so old documents keep verifying.
        assert_eq!(
            map["alice"],
            "c592df4a86933b92addc9842402ddf198c638ea9be58916ee6e3734e1e3152f8"
        );
    }

    #[tokio::test]
    async fn corrupt_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        fs::create_dir_all(dir.path().join("data")).await.unwrap();
        fs::write(dir.path().join("data").join("users.json"), b"]]")
            .await
            .unwrap();

        let err = store
            .authenticate(&user("alice"), "pw1")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        store.register(&user("alice"), "pw1").await.unwrap();
    }

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
