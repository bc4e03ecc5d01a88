use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tempfile::TempDir;
use tokio::sync::mpsc;

use super::watcher::handle_fs_event;
use super::*;
use crate::events::EditorCommand;
use crate::schema::{Rule, Weekday};

fn temp_snapshot() -> (TempDir, SnapshotFile) {
    let dir = TempDir::new().unwrap();
    let file = SnapshotFile::new(dir.path().join("rules.yml"));
    (dir, file)
}

fn sample() -> Vec<Rule> {
    let mut a = Rule::new([Weekday::Mon, Weekday::Wed], 1, 9, 17);
    a.serial = 1;
    let mut b = Rule::new([Weekday::Sat], 15, 20, 23);
    b.serial = 2;
    vec![a, b]
}

#[test]
fn missing_file_loads_empty() {
    let (_dir, file) = temp_snapshot();
    assert!(file.load().unwrap().is_empty());
}

#[test]
fn blank_file_loads_empty() {
    let (_dir, file) = temp_snapshot();
    fs::write(file.path(), "  \n").unwrap();
    assert!(file.load().unwrap().is_empty());
}

#[test]
fn write_and_read_back() {
    let (_dir, file) = temp_snapshot();
    file.write(&sample()).unwrap();
    assert_eq!(file.load().unwrap(), sample());
}

#[test]
fn write_leaves_no_tmp_file() {
    let (dir, file) = temp_snapshot();
    file.write(&sample()).unwrap();
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["rules.yml".to_string()]);
}

#[test]
fn write_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let file = SnapshotFile::new(dir.path().join("nested/deeper/rules.yml"));
    file.write(&sample()).unwrap();
    assert!(file.path().exists());
}

#[test]
fn invalid_yaml_produces_error_not_panic() {
    let (_dir, file) = temp_snapshot();
    fs::write(file.path(), "- days: [Mon\n  from: nine").unwrap();
    assert!(matches!(file.load(), Err(SnapshotError::Parse(_))));
}

#[test]
fn hand_written_snapshot_without_serials() {
    let yaml = "- days: [Tue, Thu]\n  interval: 5\n  from: 8\n  to: 12\n";
    let rules = parse_snapshot(yaml).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].serial, 0);
    assert_eq!(rules[0].shape(), Rule::new([Weekday::Tue, Weekday::Thu], 5, 8, 12).shape());
}

fn event(kind: EventKind, path: PathBuf) -> Event {
    Event::new(kind).add_path(path)
}

#[test]
fn modify_event_sends_applied_snapshot() {
    let (_dir, file) = temp_snapshot();
    file.write(&sample()).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    handle_fs_event(
        &event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            file.path().to_path_buf(),
        ),
        file.path(),
        &tx,
    );

    match rx.try_recv().unwrap() {
        EditorCommand::ApplyRules { rules } => assert_eq!(rules, sample()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn remove_event_sends_empty_snapshot() {
    let (_dir, file) = temp_snapshot();
    let (tx, mut rx) = mpsc::unbounded_channel();

    handle_fs_event(
        &event(EventKind::Remove(RemoveKind::File), file.path().to_path_buf()),
        file.path(),
        &tx,
    );

    match rx.try_recv().unwrap() {
        EditorCommand::ApplyRules { rules } => assert!(rules.is_empty()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn unparsable_reload_keeps_previous_state() {
    let (_dir, file) = temp_snapshot();
    fs::write(file.path(), "{{{ not yaml").unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    handle_fs_event(
        &event(EventKind::Create(CreateKind::File), file.path().to_path_buf()),
        file.path(),
        &tx,
    );

    assert!(rx.try_recv().is_err());
}

#[test]
fn unrelated_files_are_ignored() {
    let (dir, file) = temp_snapshot();
    file.write(&sample()).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for name in [".rules.yml.tmp", "other.yml"] {
        handle_fs_event(
            &event(EventKind::Create(CreateKind::File), dir.path().join(name)),
            file.path(),
            &tx,
        );
    }

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn watch_delivers_written_snapshot() {
    let (_dir, mut file) = temp_snapshot();
    let (tx, mut rx) = mpsc::unbounded_channel();
    file.watch(tx, Duration::from_millis(50)).unwrap();

    SnapshotFile::new(file.path()).write(&sample()).unwrap();

    let command = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no reload within 5s")
        .unwrap();
    match command {
        EditorCommand::ApplyRules { rules } => assert_eq!(rules, sample()),
        other => panic!("unexpected command: {other:?}"),
    }
}
