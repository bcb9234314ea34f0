//! Registry and Dispatch Tests
//!
//! The shipped families compose without clashes and the executor resolves
//! verbs by their longest registered prefix.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::common::*;
use orbisdb::{
    core_registry, default_registry, graph_registry, CommandRegistry, CommandRequest,
    CompositeRegistry, Error, Executor, GraphCommandRegistry,
};

#[test]
fn default_registry_holds_every_verb() {
    let registry = default_registry().unwrap();
    assert_eq!(
        registry.names(),
        BTreeSet::from([
            "CREATE EDGE",
            "CREATE VERTEX",
            "DELETE EDGE",
            "DELETE VERTEX",
            "TRUNCATE RECORD",
        ])
    );
}

#[test]
fn families_stay_separate() {
    assert_eq!(core_registry().names(), BTreeSet::from(["TRUNCATE RECORD"]));
    assert_eq!(GraphCommandRegistry.names().len(), 4);
    assert!(!GraphCommandRegistry.contains("TRUNCATE RECORD"));
}

#[test]
fn registering_a_family_twice_fails() {
    let core: Arc<dyn CommandRegistry> = core_registry();
    let again: Arc<dyn CommandRegistry> = core_registry();
    assert!(matches!(
        CompositeRegistry::new(vec![core, again]),
        Err(Error::Registration { ref name }) if name == "TRUNCATE RECORD"
    ));
}

#[test]
fn resolve_verb_normalizes_case_and_spacing() {
    let executor = create_executor();
    assert_eq!(executor.resolve_verb("  delete   vertex #1:0").unwrap(), "DELETE VERTEX");
    assert_eq!(executor.resolve_verb("Truncate Record #1:0").unwrap(), "TRUNCATE RECORD");
    assert_eq!(executor.resolve_verb("CREATE EDGE FROM #1:0 TO #1:1").unwrap(), "CREATE EDGE");
}

#[test]
fn unknown_verbs_are_reported() {
    let executor = create_executor();
    for text in ["SELECT FROM V", "CREATE VERTEXES", "TRUNCATE CLASS Foo"] {
        assert!(matches!(
            executor.resolve_verb(text),
            Err(Error::UnknownCommand { .. })
        ));
    }
    let (session, _) = admin_session();
    assert_eq!(
        executor.execute(&session, &CommandRequest::new("drop class Foo")),
        Err(Error::UnknownCommand { name: "DROP CLASS".into() })
    );
}

#[test]
fn core_only_executor_does_not_know_graph_verbs() {
    let (session, storage) = admin_session();
    let executor = Executor::default();
    assert!(matches!(
        executor.execute(&session, &CommandRequest::new("CREATE VERTEX")),
        Err(Error::UnknownCommand { .. })
    ));
    assert!(storage.is_empty());

    let with_graph = Executor::new(Arc::new(
        CompositeRegistry::new(vec![core_registry() as Arc<dyn CommandRegistry>, graph_registry()])
            .unwrap(),
    ));
    assert!(with_graph
        .execute(&session, &CommandRequest::new("CREATE VERTEX"))
        .is_ok());
}

#[test]
fn batch_runs_independently() {
    let (session, storage) = admin_session();
    let a = seed(&storage, "Broken");
    let results = create_executor().execute_many(
        &session,
        vec![
            CommandRequest::new("NOT A VERB"),
            CommandRequest::new(format!("TRUNCATE RECORD {}", a.rid)),
        ],
    );
    assert!(results[0].is_err());
    assert_eq!(extract_count(results[1].as_ref().unwrap()), 1);
}
