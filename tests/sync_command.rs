//! Integration tests for the reconciliation engine.
#![cfg(unix)]

mod common;

use std::path::PathBuf;

use common::TestHome;
use kontor::store::{compute_state, FileStatus, SyncState};

#[test]
fn sync_on_empty_store_succeeds_with_zero_entries() {
    let th = TestHome::new();
    let store = th.store("work");

    let report = store.sync().expect("sync");

    assert!(report.files.is_empty());
    assert!(report.is_synced());
}

#[test]
fn sync_recreates_deleted_symlink() {
    let th = TestHome::new();
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "export A=1\n");
    let target = store.link(&bashrc).expect("link");

    let slot = store.home().join(".bashrc");
    std::fs::remove_file(&slot).expect("delete symlink");

    let report = store.sync().expect("sync");

    assert!(report.is_synced());
    assert_eq!(report.files.len(), 1);
    assert!(matches!(report.files[0].1, FileStatus::Relinked));
    assert_eq!(
        std::fs::read_link(&slot).expect("read link"),
        target.absolute,
        "sync must recreate the identical absolute link"
    );
    assert_eq!(
        compute_state(&target.absolute, &slot).expect("state"),
        SyncState::Synced
    );
}

#[test]
fn sync_creates_parent_directories_for_nested_slots() {
    let th = TestHome::new();
    let store = th.store("work");
    let conf = th.write_file(".config/git/config", "[user]\n");
    store.link(&conf).expect("link");

    // Remove the whole home-side subtree, leaving only the store copy.
    std::fs::remove_file(store.home().join(".config/git/config")).expect("rm link");
    std::fs::remove_dir_all(store.home().join(".config")).expect("rm tree");

    let report = store.sync().expect("sync");

    assert!(report.is_synced());
    assert!(
        std::fs::symlink_metadata(store.home().join(".config/git/config"))
            .expect("slot recreated")
            .is_symlink()
    );
}

#[test]
fn sync_reports_conflict_for_regular_file_without_touching_it() {
    let th = TestHome::new();
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "export A=1\n");
    store.link(&bashrc).expect("link");

    // Replace the symlink with a freshly edited regular file.
    let slot = store.home().join(".bashrc");
    std::fs::remove_file(&slot).expect("rm link");
    std::fs::write(&slot, "local edits\n").expect("write file");

    let report = store.sync().expect("sync");

    assert!(!report.is_synced());
    assert_eq!(report.failure_count(), 1);
    let (relative, status) = &report.files[0];
    assert_eq!(relative, &PathBuf::from(".bashrc"));
    match status {
        FileStatus::Conflict { slot: reported, found } => {
            assert_eq!(reported, &slot, "conflict must surface the home path");
            assert!(found.is_none(), "occupant is not a symlink");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(
        std::fs::read(&slot).expect("read"),
        b"local edits\n",
        "conflicting file must be left alone"
    );
}

#[test]
fn sync_reports_conflict_for_wrong_link_target() {
    let th = TestHome::new();
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "x");
    store.link(&bashrc).expect("link");

    let slot = store.home().join(".bashrc");
    let elsewhere = th.write_file("elsewhere.txt", "y");
    std::fs::remove_file(&slot).expect("rm link");
    std::os::unix::fs::symlink(&elsewhere, &slot).expect("wrong link");

    let report = store.sync().expect("sync");

    assert!(!report.is_synced());
    match &report.files[0].1 {
        FileStatus::Conflict { found, .. } => {
            assert_eq!(found.as_deref(), Some(elsewhere.as_path()));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(
        std::fs::read_link(&slot).expect("read link"),
        elsewhere,
        "wrong link must be left alone"
    );
}

#[test]
fn conflict_does_not_stop_the_rest_of_the_batch() {
    let th = TestHome::new();
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "a");
    let vimrc = th.write_file(".vimrc", "b");
    store.link(&bashrc).expect("link bashrc");
    store.link(&vimrc).expect("link vimrc");

    // Break both: one into a conflict, one into a missing link.
    std::fs::remove_file(store.home().join(".bashrc")).expect("rm");
    std::fs::write(store.home().join(".bashrc"), "conflict").expect("write");
    std::fs::remove_file(store.home().join(".vimrc")).expect("rm");

    let report = store.sync().expect("sync");

    assert!(!report.is_synced());
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failure_count(), 1);

    // The unrelated file still reconciled normally.
    let vimrc_status = report
        .files
        .iter()
        .find(|(rel, _)| rel == &PathBuf::from(".vimrc"))
        .map(|(_, status)| status)
        .expect(".vimrc in report");
    assert!(matches!(vimrc_status, FileStatus::Relinked));
    assert!(
        std::fs::symlink_metadata(store.home().join(".vimrc"))
            .expect("slot")
            .is_symlink()
    );
}

#[test]
fn io_failure_on_one_file_is_recorded_and_batch_continues() {
    use std::os::unix::fs::PermissionsExt;

    let th = TestHome::new();
    let store = th.store("work");
    let conf = th.write_file(".config/git/config", "[user]\n");
    let bashrc = th.write_file(".bashrc", "x");
    store.link(&conf).expect("link conf");
    store.link(&bashrc).expect("link bashrc");

    // One file becomes unrepairable (its slot cannot even be read), the
    // other just needs its link recreated.
    std::fs::remove_file(store.home().join(".bashrc")).expect("rm link");
    let locked = store.home().join(".config");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).expect("chmod");
    // Permission bits are not enforced for root; nothing to observe then.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        return;
    }

    let report = store.sync().expect("the walk itself must succeed");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    assert!(!report.is_synced());
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failure_count(), 1);

    let conf_status = report
        .files
        .iter()
        .find(|(rel, _)| rel == &PathBuf::from(".config/git/config"))
        .map(|(_, status)| status)
        .expect(".config/git/config in report");
    assert!(
        matches!(conf_status, FileStatus::Failed(_)),
        "unexpected I/O failure must be recorded as Failed, got {conf_status:?}"
    );

    let bashrc_status = report
        .files
        .iter()
        .find(|(rel, _)| rel == &PathBuf::from(".bashrc"))
        .map(|(_, status)| status)
        .expect(".bashrc in report");
    assert!(
        matches!(bashrc_status, FileStatus::Relinked),
        "the rest of the batch must still reconcile, got {bashrc_status:?}"
    );
}

#[test]
fn sync_is_idempotent() {
    let th = TestHome::new();
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "x");
    store.link(&bashrc).expect("link");

    let first = store.sync().expect("first sync");
    let second = store.sync().expect("second sync");

    assert!(first.is_synced());
    assert!(second.is_synced());
    assert!(matches!(second.files[0].1, FileStatus::Synced));
}

#[test]
fn end_to_end_profile_scenario() {
    // home=<tmp>, profile=work, file .bashrc linked: managed file at
    // .kontor/work/.bashrc, slot becomes an absolute symlink; deleting the
    // symlink and re-running sync recreates it identically.
    let th = TestHome::new();
    th.write_config("work");
    let store = th.store("work");
    let bashrc = th.write_file(".bashrc", "export PATH\n");

    let target = store.link(&bashrc).expect("link");
    assert_eq!(
        target.absolute,
        store.home().join(".kontor").join("work").join(".bashrc")
    );

    let slot = store.home().join(".bashrc");
    let original_link = std::fs::read_link(&slot).expect("read link");
    std::fs::remove_file(&slot).expect("delete");

    let report = store.sync().expect("sync");
    assert!(report.is_synced());
    assert_eq!(
        std::fs::read_link(&slot).expect("read link"),
        original_link,
        "recreated link must be identical"
    );
    assert_eq!(std::fs::read(&slot).expect("read"), b"export PATH\n");
}
