//! Graph Tests
//!
//! Graph verbs through the composed executor, mixed with TRUNCATE RECORD.

use crate::common::*;
use orbisdb::{
    graph_session, AccessMode, CommandRequest, Error, Output, SessionKind, Value,
};

#[test]
fn build_and_tear_down_a_small_graph() {
    let (session, storage) = admin_session();
    let executor = create_executor();
    let run = |text: String| executor.execute(&session, &CommandRequest::new(text)).unwrap();

    let ada = extract_record(run("CREATE VERTEX Person SET name = 'ada'".into()));
    let bob = extract_record(run("CREATE VERTEX Person SET name = 'bob'".into()));
    let knows = extract_record(run(format!("CREATE EDGE Knows FROM {} TO {}", ada.rid, bob.rid)));
    let likes = extract_record(run(format!("CREATE EDGE Likes FROM {} TO {}", bob.rid, ada.rid)));

    let gs = graph_session(&session);
    assert_eq!(gs.edges_between(ada.rid, None).unwrap(), vec![knows.rid]);
    assert_eq!(gs.edges_between(bob.rid, Some(ada.rid)).unwrap(), vec![likes.rid]);

    assert_eq!(run(format!("DELETE VERTEX {}", ada.rid)), Output::Count(1));
    assert!(!storage.contains(&knows.rid));
    assert!(!storage.contains(&likes.rid));

    let bob = session.load(&bob.rid).unwrap().unwrap();
    assert_eq!(bob.field("in_Knows"), Some(&Value::List(vec![])));
    assert_eq!(bob.field("out_Likes"), Some(&Value::List(vec![])));
}

#[test]
fn truncate_bypasses_graph_bookkeeping() {
    let (session, storage) = admin_session();
    let executor = create_executor();
    let run = |text: String| executor.execute(&session, &CommandRequest::new(text)).unwrap();

    let a = extract_record(run("CREATE VERTEX".into()));
    let b = extract_record(run("CREATE VERTEX".into()));
    let edge = extract_record(run(format!("CREATE EDGE FROM {} TO {}", a.rid, b.rid)));

    assert_eq!(run(format!("TRUNCATE RECORD {}", edge.rid)), Output::Count(1));
    assert!(!storage.contains(&edge.rid));

    // The dangling link stays; raw removal does not touch the endpoints.
    let a = session.load(&a.rid).unwrap().unwrap();
    assert_eq!(a.field("out_E"), Some(&Value::List(vec![Value::Link(edge.rid)])));

    // Deleting the vertex skips the edge that no longer exists.
    assert_eq!(run(format!("DELETE VERTEX {}", a.rid)), Output::Count(1));
}

#[test]
fn graph_session_wraps_document_sessions_only() {
    let (session, _) = admin_session();
    assert!(graph_session(&session).is_wrapped());

    let native = session.with_kind(SessionKind::Graph);
    let gs = graph_session(&native);
    assert!(!gs.is_wrapped());
    assert!(gs.use_class_for_edge_label());
}

#[test]
fn writer_may_build_graphs_reader_may_not() {
    let executor = create_executor();

    let (writer, _) = create_session(AccessMode::ReadWrite, "w", &["writer"]);
    assert!(executor
        .execute(&writer, &CommandRequest::new("CREATE VERTEX Person"))
        .is_ok());

    let (reader, _) = create_session(AccessMode::ReadWrite, "r", &["reader"]);
    assert!(matches!(
        executor.execute(&reader, &CommandRequest::new("CREATE VERTEX Person")),
        Err(Error::PermissionDenied { .. })
    ));
}

#[test]
fn read_only_database_refuses_graph_deletes() {
    let (session, storage) = create_session(AccessMode::ReadOnly, "admin", &["admin"]);
    let rec = seed(&storage, "V");
    let err = create_executor()
        .execute(&session, &CommandRequest::new(format!("DELETE VERTEX {}", rec.rid)))
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied { .. }));
    assert!(storage.contains(&rec.rid));
}
