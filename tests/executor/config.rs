//! Configuration Tests
//!
//! `orbis.toml` drives the session's access mode and cache, and the
//! executor's replication hook.

use std::sync::Arc;

use crate::common::*;
use orbisdb::{
    default_registry, AccessMode, CommandRequest, Error, Executor, MemoryStorage, OrbisConfig,
    RecordingReplicator, Session, User, CONFIG_FILE_NAME,
};

#[test]
fn default_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    OrbisConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(OrbisConfig::from_file(&path).unwrap(), OrbisConfig::default());
}

#[test]
fn read_only_config_still_allows_truncate() {
    init_logging();
    let config = OrbisConfig::from_toml_str("access_mode = \"read_only\"").unwrap();
    let storage = Arc::new(MemoryStorage::new());
    let rec = seed(&storage, "Broken");
    let session = Session::from_config(User::new("admin", &["admin"]), &config, storage.clone());

    // TRUNCATE RECORD only checks command read access, which read-only mode
    // still grants; the raw storage delete is not permission-checked.
    let out = create_executor()
        .execute(&session, &CommandRequest::new(format!("TRUNCATE RECORD {}", rec.rid)))
        .unwrap();
    assert_eq!(extract_count(&out), 1);
    assert_eq!(config.access_mode, AccessMode::ReadOnly);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(
        OrbisConfig::from_toml_str("[cache]\nlevel2_enabled = true"),
        Err(Error::Config { .. })
    ));
}

#[test]
fn replication_forwards_truncate_only() {
    let (session, storage) = admin_session();
    let rec = seed(&storage, "Broken");
    let config = OrbisConfig::from_toml_str("[replication]\nenabled = true").unwrap();
    let replicator = Arc::new(RecordingReplicator::new());
    let executor = Executor::new(Arc::new(default_registry().unwrap()))
        .with_config(config)
        .with_replicator(replicator.clone());

    executor
        .execute(&session, &CommandRequest::new("CREATE VERTEX"))
        .unwrap();
    let truncate = CommandRequest::new(format!("TRUNCATE RECORD {}", rec.rid));
    executor.execute(&session, &truncate).unwrap();

    assert_eq!(replicator.sent(), vec![truncate]);
}
