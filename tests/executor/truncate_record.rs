//! TRUNCATE RECORD Tests
//!
//! Raw removal by identifier, driven through the composed executor.

use crate::common::*;
use orbisdb::{
    AccessMode, CommandRequest, Error, OrbisError, Output, RecordId, RecordStorage, Value,
};

#[test]
fn truncates_two_records_and_repeats_idempotently() {
    let (session, storage) = admin_session();
    let executor = create_executor();
    let a = seed(&storage, "Broken");
    let b = seed(&storage, "Broken");

    let request = CommandRequest::new(format!("TRUNCATE RECORD {}, {}", a.rid, b.rid));
    let output = executor.execute(&session, &request).unwrap();
    assert_eq!(extract_count(&output), 2);
    assert!(!storage.contains(&a.rid));
    assert!(!storage.contains(&b.rid));

    // Deleting an absent entry is not an error; the count still reflects the request.
    let output = executor.execute(&session, &request).unwrap();
    assert_eq!(extract_count(&output), 2);
}

#[test]
fn duplicates_count_once() {
    let (session, storage) = admin_session();
    let rec = seed(&storage, "Broken");
    let text = format!("truncate record {0}, {0}, [{0}]", rec.rid);
    let output = create_executor()
        .execute(&session, &CommandRequest::new(text))
        .unwrap();
    assert_eq!(output, Output::Count(1));
}

#[test]
fn targets_from_positional_list_parameter() {
    let (session, storage) = admin_session();
    let a = seed(&storage, "Broken");
    let b = seed(&storage, "Broken");
    let keep = seed(&storage, "Broken");

    let request = CommandRequest::new("TRUNCATE RECORD ?")
        .with_parameter(vec![Value::Link(a.rid), Value::from(b.rid.to_string())]);
    let output = create_executor().execute(&session, &request).unwrap();
    assert_eq!(extract_count(&output), 2);
    assert!(storage.contains(&keep.rid));
}

#[test]
fn corrupted_entries_are_removed() {
    let (session, storage) = admin_session();
    let rid = RecordId::new(12, 0);
    storage.put_raw(rid, 7, vec![0xde, 0xad, 0xbe, 0xef]);
    assert!(matches!(storage.read(&rid), Err(OrbisError::Corruption { .. })));

    let output = create_executor()
        .execute(&session, &CommandRequest::new("TRUNCATE RECORD #12:0"))
        .unwrap();
    assert_eq!(extract_count(&output), 1);
    assert!(!storage.contains(&rid));
}

#[test]
fn missing_target_list_is_a_syntax_error() {
    let (session, _) = admin_session();
    let err = create_executor()
        .execute(&session, &CommandRequest::new("TRUNCATE RECORD"))
        .unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
}

#[test]
fn user_without_command_access_is_denied() {
    let (session, storage) = create_session(AccessMode::ReadWrite, "nobody", &["no-such-role"]);
    let rec = seed(&storage, "Broken");
    let err = create_executor()
        .execute(&session, &CommandRequest::new(format!("TRUNCATE RECORD {}", rec.rid)))
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied { .. }));
    assert!(storage.contains(&rec.rid));
}

#[test]
fn cached_copy_is_evicted() {
    let (session, storage) = admin_session();
    let rec = seed(&storage, "Broken");
    assert!(session.load(&rec.rid).unwrap().is_some());

    create_executor()
        .execute(&session, &CommandRequest::new(format!("TRUNCATE RECORD {}", rec.rid)))
        .unwrap();
    assert_eq!(session.load(&rec.rid).unwrap(), None);
}
