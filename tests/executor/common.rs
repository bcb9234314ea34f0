//! Common test utilities for executor tests

use std::sync::{Arc, Once};

use orbisdb::{
    default_executor, AccessMode, Executor, MemoryStorage, Output, Record, RecordStorage,
    RoleBasedSecurity, Session, User,
};

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output to the test harness
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Create a session for `name` over a fresh in-memory store
pub fn create_session(mode: AccessMode, name: &str, roles: &[&str]) -> (Session, Arc<MemoryStorage>) {
    init_logging();
    let storage = Arc::new(MemoryStorage::new());
    let security = Arc::new(RoleBasedSecurity::with_default_roles(mode));
    let session = Session::new(User::new(name, roles), security, storage.clone());
    (session, storage)
}

/// An admin session in a writable database
pub fn admin_session() -> (Session, Arc<MemoryStorage>) {
    create_session(AccessMode::ReadWrite, "admin", &["admin"])
}

/// Executor over every shipped verb family
pub fn create_executor() -> Executor {
    default_executor().unwrap()
}

/// Store an empty record of `class`
pub fn seed(storage: &MemoryStorage, class: &str) -> Record {
    let cluster = storage.cluster_id(class).unwrap();
    storage.create(cluster, Record::new(class)).unwrap()
}

/// Extract the count from Output::Count
pub fn extract_count(output: &Output) -> u64 {
    match output {
        Output::Count(n) => *n,
        _ => panic!("Expected Output::Count, got {:?}", output),
    }
}

/// Extract the record from Output::Record
pub fn extract_record(output: Output) -> Record {
    match output {
        Output::Record(record) => record,
        other => panic!("Expected Output::Record, got {:?}", other),
    }
}
