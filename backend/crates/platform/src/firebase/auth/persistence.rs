use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::state::Session;
use crate::firebase::error::FirebaseError;

/// How long a signed-in session outlives the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persistence {
    /// Kept in memory only; gone when the process exits
    Session,
    /// Written to the configured session file and restored at startup
    #[default]
    Local,
}

/// On-disk home of a `Persistence::Local` session
#[derive(Debug, Clone)]
pub(crate) struct SessionFile {
    path: Option<PathBuf>,
}

impl SessionFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn is_configured(&self) -> bool {
        self.path.is_some()
    }

    pub async fn load(&self) -> Result<Option<Session>, FirebaseError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file atomically (write + rename)
    pub async fn save(&self, session: &Session) -> Result<(), FirebaseError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = tmp_path(path);
        fs::write(&tmp, serde_json::to_vec(session)?).await?;
        restrict_permissions(&tmp).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), FirebaseError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firebase::auth::state::User;

    fn session() -> Session {
        Session {
            user: User {
                uid: "u1".to_string(),
                email: Some("a@example.com".to_string()),
                display_name: None,
                email_verified: true,
            },
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 42,
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(Some(dir.path().join("nested").join("session.json")));

        assert_eq!(file.load().await.unwrap(), None);
        file.save(&session()).await.unwrap();
        assert_eq!(file.load().await.unwrap(), Some(session()));

        file.clear().await.unwrap();
        assert_eq!(file.load().await.unwrap(), None);
        // clearing twice is fine
        file.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_unconfigured_file_is_a_no_op() {
        let file = SessionFile::new(None);
        assert!(!file.is_configured());
        file.save(&session()).await.unwrap();
        assert_eq!(file.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();
        let file = SessionFile::new(Some(path));
        assert!(matches!(file.load().await, Err(FirebaseError::Decode(_))));
    }
}
