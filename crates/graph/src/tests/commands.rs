//! The graph verbs driven through an executor.

use orbis_executor::{
    AccessMode, CommandRequest, Error, OrbisError, Output, Permission, Record, RecordId, Value,
};

use super::{admin_session, executor, session_in};

fn record(out: Output) -> Record {
    match out {
        Output::Record(record) => record,
        other => panic!("expected a record, got {:?}", other),
    }
}

#[test]
fn test_create_vertex_with_fields() {
    let (session, storage) = admin_session();
    let out = executor()
        .execute(&session, &CommandRequest::new("CREATE VERTEX Person SET name = 'ada', age = 36"))
        .unwrap();
    let vertex = record(out);
    assert_eq!(vertex.class(), "Person");
    assert_eq!(vertex.field("name"), Some(&Value::from("ada")));
    assert_eq!(vertex.field("age"), Some(&Value::Integer(36)));
    assert!(storage.contains(&vertex.rid));
}

#[test]
fn test_create_vertex_defaults_to_v() {
    let (session, _) = admin_session();
    let vertex = record(executor().execute(&session, &CommandRequest::new("create vertex")).unwrap());
    assert_eq!(vertex.class(), "V");
}

#[test]
fn test_create_edge_from_parameters() {
    let (session, _) = admin_session();
    let exec = executor();
    let a = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let b = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());

    let request = CommandRequest::new("CREATE EDGE Knows FROM :a TO ? SET since = 2020")
        .with_named("a", a.rid)
        .with_parameter(b.rid.to_string());
    let edge = record(exec.execute(&session, &request).unwrap());
    assert_eq!(edge.class(), "Knows");
    assert_eq!(edge.field("out"), Some(&Value::Link(a.rid)));
    assert_eq!(edge.field("in"), Some(&Value::Link(b.rid)));
    assert_eq!(edge.field("since"), Some(&Value::Integer(2020)));

    let a = session.load(&a.rid).unwrap().unwrap();
    assert_eq!(a.field("out_Knows"), Some(&Value::List(vec![Value::Link(edge.rid)])));
}

#[test]
fn test_create_edge_to_missing_vertex() {
    let (session, _) = admin_session();
    let exec = executor();
    let a = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let text = format!("CREATE EDGE FROM {} TO #99:0", a.rid);
    assert_eq!(
        exec.execute(&session, &CommandRequest::new(text)),
        Err(Error::execution(
            "CREATE EDGE",
            OrbisError::RecordNotFound { rid: RecordId::new(99, 0) }
        ))
    );
}

#[test]
fn test_endpoint_must_be_a_record_id() {
    let (session, _) = admin_session();
    let err = executor()
        .execute(&session, &CommandRequest::new("CREATE EDGE FROM 1 TO 2"))
        .unwrap_err();
    assert!(matches!(err, Error::Syntax { position: None, .. }));
}

#[test]
fn test_delete_edges_between_vertices() {
    let (session, storage) = admin_session();
    let exec = executor();
    let a = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let b = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let c = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    for to in [b.rid, b.rid, c.rid] {
        let text = format!("CREATE EDGE FROM {} TO {}", a.rid, to);
        exec.execute(&session, &CommandRequest::new(text)).unwrap();
    }

    let text = format!("DELETE EDGE FROM {} TO {}", a.rid, b.rid);
    assert_eq!(exec.execute(&session, &CommandRequest::new(text)).unwrap(), Output::Count(2));

    let text = format!("DELETE EDGE FROM {}", a.rid);
    assert_eq!(exec.execute(&session, &CommandRequest::new(text)).unwrap(), Output::Count(1));

    assert!(storage.contains(&a.rid));
    assert!(storage.contains(&c.rid));
    let a = session.load(&a.rid).unwrap().unwrap();
    assert_eq!(a.field("out_E"), Some(&Value::List(vec![])));
}

#[test]
fn test_delete_single_edge_and_missing_edge() {
    let (session, storage) = admin_session();
    let exec = executor();
    let a = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let text = format!("CREATE EDGE FROM {} TO {}", a.rid, a.rid);
    let edge = record(exec.execute(&session, &CommandRequest::new(text)).unwrap());

    let text = format!("DELETE EDGE {}", edge.rid);
    assert_eq!(exec.execute(&session, &CommandRequest::new(text.clone())).unwrap(), Output::Count(1));
    assert!(!storage.contains(&edge.rid));
    assert_eq!(exec.execute(&session, &CommandRequest::new(text)).unwrap(), Output::Count(0));
}

#[test]
fn test_delete_vertex_removes_incident_edges() {
    let (session, storage) = admin_session();
    let exec = executor();
    let a = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let b = record(exec.execute(&session, &CommandRequest::new("CREATE VERTEX")).unwrap());
    let text = format!("CREATE EDGE FROM {} TO {}", a.rid, b.rid);
    let edge = record(exec.execute(&session, &CommandRequest::new(text)).unwrap());

    let text = format!("DELETE VERTEX {}", b.rid);
    assert_eq!(exec.execute(&session, &CommandRequest::new(text.clone())).unwrap(), Output::Count(1));
    assert!(!storage.contains(&b.rid));
    assert!(!storage.contains(&edge.rid));

    assert_eq!(exec.execute(&session, &CommandRequest::new(text)).unwrap(), Output::Count(0));
}

#[test]
fn test_reader_cannot_create() {
    let (session, storage) = session_in(AccessMode::ReadWrite, "guest", &["reader"]);
    let err = executor()
        .execute(&session, &CommandRequest::new("CREATE VERTEX Person"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PermissionDenied { ref resource, permission: Permission::Create, .. }
            if resource == "database.class.Person"
    ));
    assert!(storage.is_empty());
}

#[test]
fn test_read_only_database_refuses_graph_writes() {
    let (session, storage) = session_in(AccessMode::ReadOnly, "root", &["admin"]);
    let exec = executor();
    for text in ["CREATE VERTEX", "CREATE EDGE FROM #1:0 TO #1:1"] {
        assert!(matches!(
            exec.execute(&session, &CommandRequest::new(text)),
            Err(Error::PermissionDenied { .. })
        ));
    }
    assert!(storage.is_empty());
}

#[test]
fn test_verb_mismatch_is_a_syntax_error() {
    use crate::CreateEdge;
    use orbis_executor::{CommandExecutor, Parameters};

    let (session, _) = admin_session();
    let mut cmd = CreateEdge::default();
    let err = cmd
        .parse(&session, &CommandRequest::new("CREATE VERTEX"))
        .unwrap_err();
    assert_eq!(err, Error::syntax("expected CREATE EDGE, found CREATE VERTEX", 0));
    assert_eq!(
        cmd.execute(&session, &Parameters::new()),
        Err(Error::not_parsed("CREATE EDGE"))
    );
}
