//! Replication hand-off for verbatim commands.
//!
//! Commands whose [`ReplicationMode`](crate::ReplicationMode) is `Verbatim`
//! are broadcast as the original request; each peer parses and executes it
//! again. The transport itself lives behind the [`Replicator`] trait.

use orbis_core::OrbisResult;
use parking_lot::Mutex;
use tracing::debug;

use crate::request::CommandRequest;

/// Ships a request to the other nodes.
pub trait Replicator: Send + Sync {
    /// Broadcast `request` exactly as received.
    fn replicate(&self, request: &CommandRequest) -> OrbisResult<()>;
}

/// Replicator that keeps everything it was asked to send.
///
/// Serves single-node deployments and tests.
#[derive(Debug, Default)]
pub struct RecordingReplicator {
    sent: Mutex<Vec<CommandRequest>>,
}

impl RecordingReplicator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests replicated so far, oldest first.
    pub fn sent(&self) -> Vec<CommandRequest> {
        self.sent.lock().clone()
    }
}

impl Replicator for RecordingReplicator {
    fn replicate(&self, request: &CommandRequest) -> OrbisResult<()> {
        debug!(text = request.text(), "recording replicated request");
        self.sent.lock().push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let replicator = RecordingReplicator::new();
        replicator.replicate(&CommandRequest::new("TRUNCATE RECORD #1:0")).unwrap();
        replicator
            .replicate(&CommandRequest::new("TRUNCATE RECORD ?").with_parameter("#1:1"))
            .unwrap();

        let sent = replicator.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].text(), "TRUNCATE RECORD #1:0");
        assert_eq!(sent[1].parameters().len(), 1);
    }
}
