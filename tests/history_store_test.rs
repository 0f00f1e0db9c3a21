/// History store integration tests
///
/// These tests exercise load/mutate/reload cycles against real files,
/// including the corruption and capacity edge cases.
mod common;

use std::fs;

use common::{HistoryDirBuilder, call_record};
use medivoice_transcript::history::{HistoryStore, MAX_RECORDS};
use medivoice_transcript::models::{Role, TranscriptMessage};

#[test]
fn test_roundtrip_through_reload() {
    let dir = HistoryDirBuilder::new();

    let mut store = HistoryStore::load(dir.history_path());
    let conversation = vec![
        TranscriptMessage::new("System", "Call started with MediVoice AI Assistant", Role::System),
        TranscriptMessage::new("You", "I have a headache", Role::User),
        TranscriptMessage::new("AI Assistant", "How long has it lasted?", Role::Ai),
    ];
    let id = store.finalize_call(conversation.clone(), "01:23").unwrap().id;

    let reloaded = HistoryStore::load(dir.history_path());
    let record = reloaded.get(id).expect("record should survive reload");
    assert_eq!(record.duration, "01:23");
    assert_eq!(record.conversation, conversation);
}

#[test]
fn test_corrupt_history_loads_as_empty_and_is_recoverable() {
    let dir = HistoryDirBuilder::new().with_raw_history("{\"not\": \"an array\"");

    let mut store = HistoryStore::load(dir.history_path());
    assert!(store.is_empty());

    // The next successful call overwrites the corrupt file.
    store.finalize_call(vec![TranscriptMessage::new("You", "hi", Role::User)], "00:02");
    assert_eq!(HistoryStore::load(dir.history_path()).len(), 1);
}

#[test]
fn test_seeded_records_newest_first() {
    let dir =
        HistoryDirBuilder::new().with_records(&[call_record(300, "c"), call_record(200, "b")]);

    let store = HistoryStore::load(dir.history_path());
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].id, 300);
    assert!(store.get(200).is_some());
}

#[test]
fn test_new_id_exceeds_seeded_future_id() {
    // Seed a record whose id is far in the future; the next id must still be
    // strictly greater.
    let future_id = i64::MAX - 1000;
    let dir = HistoryDirBuilder::new().with_records(&[call_record(future_id, "from the future")]);

    let mut store = HistoryStore::load(dir.history_path());
    let new_id =
        store.finalize_call(vec![TranscriptMessage::new("You", "now", Role::User)], "00:01")
            .unwrap()
            .id;
    assert!(new_id > future_id);
}

#[test]
fn test_cap_holds_across_reloads() {
    let dir = HistoryDirBuilder::new();

    let mut store = HistoryStore::load(dir.history_path());
    for i in 0..(MAX_RECORDS + 5) {
        store.finalize_call(
            vec![TranscriptMessage::new("You", format!("call {i}"), Role::User)],
            "00:01",
        );
    }
    drop(store);

    let reloaded = HistoryStore::load(dir.history_path());
    assert_eq!(reloaded.len(), MAX_RECORDS);
    assert_eq!(reloaded.records()[0].conversation[0].text, format!("call {}", MAX_RECORDS + 4));
}

#[test]
fn test_delete_then_reload() {
    let dir = HistoryDirBuilder::new().with_records(&[
        call_record(3, "newest"),
        call_record(2, "middle"),
        call_record(1, "oldest"),
    ]);

    let mut store = HistoryStore::load(dir.history_path());
    assert!(store.delete(2));

    let reloaded = HistoryStore::load(dir.history_path());
    let ids: Vec<i64> = reloaded.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn test_no_stray_temp_file_after_write() {
    let dir = HistoryDirBuilder::new();

    let mut store = HistoryStore::load(dir.history_path());
    store.finalize_call(vec![TranscriptMessage::new("You", "hi", Role::User)], "00:01");

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
