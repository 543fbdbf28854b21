//! File-backed session persistence

use pretty_assertions::assert_eq;
use synthesis::egui_app::session::TOKEN_KEY;
use synthesis::egui_app::{AppState, FileStorage, KeyValueStorage, SessionStore};

use crate::common::{config_for, test_token, test_user, TEST_TOKEN};

#[test]
fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut store = SessionStore::open(Some(path.clone()));
    store.save(&test_token(), &test_user());
    assert!(path.exists());

    let mut reopened = SessionStore::new(FileStorage::open(&path));
    let session = reopened.load().unwrap();
    assert_eq!(session.token.as_str(), TEST_TOKEN);
    assert_eq!(session.user, test_user());
}

#[test]
fn test_clear_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::new(FileStorage::open(&path));
    store.save(&test_token(), &test_user());
    store.clear();

    let storage = FileStorage::open(&path);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert!(SessionStore::new(storage).load().is_none());
}

#[cfg(unix)]
#[test]
fn test_session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let fresh = dir.path().join("session.json");
    SessionStore::new(FileStorage::open(&fresh)).save(&test_token(), &test_user());
    let mode = std::fs::metadata(&fresh).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    let existing = dir.path().join("existing.json");
    std::fs::write(&existing, "{}").unwrap();
    std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o644)).unwrap();
    SessionStore::new(FileStorage::open(&existing)).save(&test_token(), &test_user());
    let mode = std::fs::metadata(&existing).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_corrupt_file_starts_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = SessionStore::new(FileStorage::open(&path));
    assert!(store.load().is_none());

    store.save(&test_token(), &test_user());
    assert!(store.load().is_some());
}

#[test]
fn test_app_restores_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    SessionStore::new(FileStorage::open(&path)).save(&test_token(), &test_user());

    let state = AppState::with_parts(
        config_for("http://127.0.0.1:1"),
        SessionStore::new(FileStorage::open(&path)),
    )
    .unwrap();
    assert!(state.auth_state.is_authenticated());
    assert_eq!(state.auth_state.user.as_ref().unwrap().username, "jane_doe");
}
