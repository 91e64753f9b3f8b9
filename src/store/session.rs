//! The session store: which user is signed in, persisted across runs, plus the menu visibility flag
//! of the front end.

use crate::error::{Error, ErrorType, IntoResult, Res, Result};
use crate::model::{User, UserId};
use crate::utils;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info};

/// The persisted form of a session, e.g. `{"userId": 3, "admin": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    user_id: UserId,
    admin: bool,
}

/// A snapshot of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// `None` when nobody is signed in.
    pub user: Option<User>,
    /// Presentation-only, never persisted.
    pub menu_visible: bool,
}

/// Owns the session. All methods take `&self`, so a single instance can be shared by handle.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Restores the session persisted at `path`. A missing file means nobody is signed in.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let user = read_session_file(&path)
            .await
            .pub_result(ErrorType::Session)?;
        match user {
            Some(user) => debug!("Restored session for user {}", user.user_id()),
            None => debug!("No session found at {}", path.display()),
        }
        let (state, _) = watch::channel(SessionState {
            user,
            menu_visible: false,
        });
        Ok(Self { path, state })
    }

    /// Persists and activates a session for `user_id`.
    pub async fn sign_in(&self, user_id: UserId, is_admin: bool) -> Result<User> {
        let file = SessionFile {
            user_id,
            admin: is_admin,
        };
        let json = serde_json::to_string_pretty(&file)
            .context("Unable to serialize the session")
            .pub_result(ErrorType::Session)?;
        utils::write(&self.path, json)
            .await
            .pub_result(ErrorType::Session)?;

        let user = User::new(user_id, is_admin);
        self.state.send_modify(|state| state.user = Some(user));
        info!("Signed in as user {user_id}");
        Ok(user)
    }

    /// Deletes the persisted session and forgets the user.
    pub async fn sign_out(&self) -> Result<()> {
        utils::remove_if_exists(&self.path)
            .await
            .pub_result(ErrorType::Session)?;
        self.state.send_modify(|state| state.user = None);
        info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user
    }

    /// Returns the signed-in user or a `Session` error.
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or_else(|| {
            Error::msg(
                ErrorType::Session,
                "Nobody is signed in, run 'cashbook login' first",
            )
        })
    }

    /// Flips the menu visibility and returns the new value.
    pub fn toggle_menu(&self) -> bool {
        self.state
            .send_modify(|state| state.menu_visible = !state.menu_visible);
        self.menu_visible()
    }

    pub fn menu_visible(&self) -> bool {
        self.state.borrow().menu_visible
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn read_session_file(path: &Path) -> Res<Option<User>> {
    if !path.is_file() {
        return Ok(None);
    }
    let file: SessionFile = utils::deserialize(path)
        .await
        .context("The saved session is unreadable, delete it or run 'cashbook logout'")?;
    Ok(Some(User::new(file.user_id, file.admin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_no_file_means_signed_out() {
        let dir = TempDir::new().unwrap();
        let session = SessionStore::load(dir.path().join("session.json"))
            .await
            .unwrap();
        assert!(session.current_user().is_none());
        let err = session.require_user().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Session);
    }

    #[tokio::test]
    async fn test_sign_in_persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let session = SessionStore::load(&path).await.unwrap();
        let user = session.sign_in(42, true).await.unwrap();
        assert_eq!(session.current_user(), Some(user));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["userId"], 42);
        assert_eq!(raw["admin"], true);

        let restored = SessionStore::load(&path).await.unwrap();
        let user = restored.require_user().unwrap();
        assert_eq!(user.user_id(), 42);
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_sign_out_clears_file_and_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let session = SessionStore::load(&path).await.unwrap();
        session.sign_in(7, false).await.unwrap();
        session.sign_out().await.unwrap();
        assert!(session.current_user().is_none());
        assert!(!path.exists());
        // Signing out twice is harmless.
        session.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_session_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = SessionStore::load(&path).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Session);
    }

    #[tokio::test]
    async fn test_toggle_menu_and_subscribe() {
        let dir = TempDir::new().unwrap();
        let session = SessionStore::load(dir.path().join("session.json"))
            .await
            .unwrap();
        let mut rx = session.subscribe();
        assert!(!session.menu_visible());
        assert!(session.toggle_menu());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().menu_visible);

        session.sign_in(1, false).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().user, Some(User::new(1, false)));

        assert!(!session.toggle_menu());
    }
}
