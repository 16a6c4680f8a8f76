// SPDX-License-Identifier: MPL-2.0
//! Cross-module integration tests exercising the client's state machines
//! and persistence layers together, without a network.

use photarium::api::types::BatchUploadOutcome;
use photarium::app::persisted_state::AppState;
use photarium::config::{self, Config};
use photarium::selection::{BulkOutcome, SelectionController};
use photarium::upload::{UploadSession, UploadStatus};
use photarium::viewer_navigation::ViewerNavigator;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn upload_queue_end_to_end_success() {
    let mut session = UploadSession::new();

    // Mixed drop: only media survives, the reject is counted.
    let added = session.add_files(vec![
        PathBuf::from("a.jpg"),
        PathBuf::from("b.mp4"),
        PathBuf::from("c.txt"),
    ]);
    assert_eq!(added.added, 2);
    assert_eq!(added.rejected, 1);

    let uploading = session.begin_upload().expect("queue should submit");
    assert_eq!(uploading.len(), 2);
    assert!(session.is_uploading());

    // Mocked aggregate response: 2 uploaded, 1 restored from trash.
    let outcome = BatchUploadOutcome {
        photos: Vec::new(),
        uploaded: 2,
        restored: 1,
        duplicates: 0,
    };
    session.finish_success(&outcome);

    assert!(session.all_done());
    for item in session.items() {
        assert_eq!(item.status(), UploadStatus::Done);
        assert_eq!(item.progress(), 100);
    }
    let toast = outcome.summary_message();
    assert!(toast.contains("Uploaded 2"), "{toast}");
    assert!(toast.contains("restored 1"), "{toast}");
}

#[test]
fn upload_queue_failure_then_retry() {
    let mut session = UploadSession::new();
    session.add_files(vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);

    session.begin_upload().expect("first submit");
    session.finish_failure();
    assert!(session
        .items()
        .iter()
        .all(|item| item.status() == UploadStatus::Error));

    // The user re-triggers; failed entries go out again as one batch.
    let retried = session.begin_upload().expect("retry submit");
    assert_eq!(retried.len(), 2);
    session.finish_success(&BatchUploadOutcome {
        photos: Vec::new(),
        uploaded: 2,
        restored: 0,
        duplicates: 0,
    });
    assert!(session.all_done());
}

#[test]
fn selection_and_viewer_track_a_shrinking_collection() {
    let ids: Vec<u64> = vec![1, 2, 3, 4, 5];

    let mut selection = SelectionController::new();
    selection.toggle(3);
    selection.toggle(7); // not in the collection; pruned on refresh
    selection.prune(ids.iter().copied());
    assert!(selection.contains(3));
    assert!(!selection.contains(7));

    let mut navigator = ViewerNavigator::new();
    navigator.sync(ids.len());
    navigator.open(ids.iter().position(|id| *id == 3));
    assert_eq!(navigator.current_index(), Some(2));

    navigator.next();
    navigator.next();
    navigator.next(); // clamps at the end
    assert_eq!(navigator.current_index(), Some(4));

    // Two items deleted elsewhere; index re-clamps.
    navigator.sync(3);
    assert!(navigator.is_open());
    assert_eq!(navigator.current_index(), Some(2));

    // Collection empties; the viewer closes itself.
    navigator.sync(0);
    assert!(!navigator.is_open());
}

#[test]
fn toggle_is_an_involution_across_bulk_flow() {
    let mut selection = SelectionController::new();
    selection.toggle(3);
    selection.toggle(7);

    selection.toggle(3);
    assert_eq!(selection.len(), 1);
    selection.toggle(3);
    let mut ids = selection.ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![3, 7]);

    // A partially failed bulk run aggregates into one message and the
    // selection clears afterwards.
    let mut outcome = BulkOutcome::default();
    outcome.record_success();
    outcome.record_failure();
    assert_eq!(outcome.message("Trashed"), "Trashed 1 item, 1 failed");
    selection.clear();
    assert!(!selection.is_active());
}

#[test]
fn config_round_trips_through_disk() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("settings.toml");

    let mut saved = Config::default();
    saved.server.api_url = Some("https://photos.example.com".into());
    saved.display.grid_tile_px = Some(220.0);
    config::save_to_path(&saved, &path).expect("failed to save");

    let loaded = config::load_from_path(&path).expect("failed to load");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.grid_tile_px(), 220.0);
}

#[test]
fn session_state_survives_restart_and_logout() {
    let dir = tempdir().expect("failed to create temp dir");
    let base = Some(dir.path().to_path_buf());

    // Sign-in persists the token.
    let mut state = AppState {
        auth_token: Some("bearer-token".into()),
        last_save_directory: Some(PathBuf::from("/downloads")),
        last_open_directory: None,
    };
    state.save_to(base.clone()).expect("failed to save");

    // "Restart": the token is still there.
    let (restored, warning) = AppState::load_from(base.clone());
    assert!(warning.is_none());
    assert_eq!(restored.auth_token.as_deref(), Some("bearer-token"));

    // Logout clears it durably.
    state.auth_token = None;
    state.save_to(base.clone()).expect("failed to save");
    let (after_logout, _) = AppState::load_from(base);
    assert_eq!(after_logout.auth_token, None);
    assert_eq!(
        after_logout.last_save_directory.as_deref(),
        Some(std::path::Path::new("/downloads"))
    );
}
