//! Graph view over a document session.
//!
//! Vertices and edges are ordinary records. An edge record links its two
//! endpoints through its `out` and `in` fields; each endpoint lists the edge
//! in a link-list field named after the edge label, `out_<label>` on the
//! source and `in_<label>` on the target.
//!
//! ```text
//!   #9:0 { out_Knows: [#10:0] } --- #10:0 { out: #9:0, in: #9:1 } ---> #9:1 { in_Knows: [#10:0] }
//! ```

use orbis_core::{DeleteMode, OrbisError, OrbisResult, Record, RecordId, RecordVersion, Value};
use orbis_executor::{Session, SessionKind};
use tracing::{debug, trace};

/// Class used for vertices created without one.
pub const VERTEX_CLASS: &str = "V";
/// Class used for edges created without one, and the label when class
/// labels are off.
pub const EDGE_CLASS: &str = "E";

const OUT_PREFIX: &str = "out_";
const IN_PREFIX: &str = "in_";

/// A session with graph semantics.
#[derive(Debug)]
pub struct GraphSession<'a> {
    session: &'a Session,
    wrapped: bool,
    use_class_for_edge_label: bool,
}

/// Bridge `session` to a graph session.
///
/// Document sessions are wrapped; the result always labels edges with their
/// declared class.
pub fn graph_session(session: &Session) -> GraphSession<'_> {
    let wrapped = session.kind() == SessionKind::Document;
    if wrapped {
        debug!(session = %session.id(), "wrapping document session for graph use");
    }
    GraphSession {
        session,
        wrapped,
        use_class_for_edge_label: true,
    }
}

impl<'a> GraphSession<'a> {
    /// Underlying session.
    pub fn session(&self) -> &'a Session {
        self.session
    }

    /// Whether the underlying session had to be wrapped.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Whether edges are labelled with their class.
    pub fn use_class_for_edge_label(&self) -> bool {
        self.use_class_for_edge_label
    }

    /// Turn class labels on or off.
    pub fn set_use_class_for_edge_label(&mut self, on: bool) {
        self.use_class_for_edge_label = on;
    }

    fn edge_label<'c>(&self, class: &'c str) -> &'c str {
        if self.use_class_for_edge_label {
            class
        } else {
            EDGE_CLASS
        }
    }

    fn require(&self, rid: &RecordId) -> OrbisResult<Record> {
        self.session
            .load(rid)?
            .ok_or(OrbisError::RecordNotFound { rid: *rid })
    }

    fn save(&self, mut record: Record) -> OrbisResult<Record> {
        let version = self
            .session
            .storage()
            .update(&record, RecordVersion::tracked(record.version))?;
        record.version = version;
        self.session.cache().put(record.clone())?;
        Ok(record)
    }

    fn insert(&self, record: Record) -> OrbisResult<Record> {
        let cluster = self.session.storage().cluster_id(record.class())?;
        let record = self.session.storage().create(cluster, record)?;
        self.session.cache().put(record.clone())?;
        Ok(record)
    }

    fn remove(&self, record: &Record) -> OrbisResult<()> {
        self.session.storage().delete(
            &record.rid,
            RecordVersion::tracked(record.version),
            DeleteMode::Synchronous,
            None,
        )?;
        self.session.cache().evict(&record.rid)
    }

    /// Create a vertex of `class` (default `V`).
    pub fn create_vertex(
        &self,
        class: Option<&str>,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> OrbisResult<Record> {
        let mut vertex = Record::new(class.unwrap_or(VERTEX_CLASS));
        vertex.fields.extend(fields);
        let vertex = self.insert(vertex)?;
        debug!(rid = %vertex.rid, class = vertex.class(), "created vertex");
        Ok(vertex)
    }

    /// Create an edge of `class` (default `E`) from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbisError::RecordNotFound`] if either endpoint is missing.
    pub fn create_edge(
        &self,
        class: Option<&str>,
        from: RecordId,
        to: RecordId,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> OrbisResult<Record> {
        let class = class.unwrap_or(EDGE_CLASS);
        let source = self.require(&from)?;
        let target = if from == to {
            None
        } else {
            Some(self.require(&to)?)
        };

        let mut edge = Record::new(class);
        edge.fields.extend(fields);
        edge.set_field("out", from);
        edge.set_field("in", to);
        let edge = self.insert(edge)?;

        let label = self.edge_label(class);
        let out_field = format!("{}{}", OUT_PREFIX, label);
        let in_field = format!("{}{}", IN_PREFIX, label);
        match target {
            None => {
                let mut vertex = source;
                push_link(&mut vertex, &out_field, edge.rid);
                push_link(&mut vertex, &in_field, edge.rid);
                self.save(vertex)?;
            }
            Some(mut target) => {
                let mut source = source;
                push_link(&mut source, &out_field, edge.rid);
                push_link(&mut target, &in_field, edge.rid);
                self.save(source)?;
                self.save(target)?;
            }
        }
        debug!(rid = %edge.rid, %from, %to, label, "created edge");
        Ok(edge)
    }

    /// Outgoing edges of `from`, optionally only those ending at `to`.
    pub fn edges_between(&self, from: RecordId, to: Option<RecordId>) -> OrbisResult<Vec<RecordId>> {
        let Some(vertex) = self.session.load(&from)? else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        for edge_rid in links_with_prefix(&vertex, OUT_PREFIX) {
            let Some(edge) = self.session.load(&edge_rid)? else {
                continue;
            };
            let target = edge.field("in").and_then(Value::as_link);
            if to.is_none() || target == to {
                found.push(edge_rid);
            }
        }
        Ok(found)
    }

    /// Delete an edge and unlink it from both endpoints.
    ///
    /// Returns `false` if there is no edge at `rid`.
    pub fn remove_edge(&self, rid: RecordId) -> OrbisResult<bool> {
        let Some(edge) = self.session.load(&rid)? else {
            return Ok(false);
        };
        if let Some(out) = edge.field("out").and_then(Value::as_link) {
            self.unlink(out, OUT_PREFIX, rid)?;
        }
        if let Some(target) = edge.field("in").and_then(Value::as_link) {
            self.unlink(target, IN_PREFIX, rid)?;
        }
        self.remove(&edge)?;
        debug!(%rid, "removed edge");
        Ok(true)
    }

    /// Delete a vertex together with every edge touching it.
    ///
    /// Returns `false` if there is no vertex at `rid`.
    pub fn remove_vertex(&self, rid: RecordId) -> OrbisResult<bool> {
        let Some(vertex) = self.session.load(&rid)? else {
            return Ok(false);
        };
        let mut edges = links_with_prefix(&vertex, OUT_PREFIX);
        edges.extend(links_with_prefix(&vertex, IN_PREFIX));
        edges.sort();
        edges.dedup();
        for edge in &edges {
            self.remove_edge(*edge)?;
        }
        // Unlinking may have bumped the vertex version.
        let vertex = self.require(&rid)?;
        self.remove(&vertex)?;
        debug!(%rid, edges = edges.len(), "removed vertex");
        Ok(true)
    }

    fn unlink(&self, vertex: RecordId, prefix: &str, edge: RecordId) -> OrbisResult<()> {
        let Some(mut record) = self.session.load(&vertex)? else {
            trace!(%vertex, %edge, "endpoint already gone");
            return Ok(());
        };
        let mut changed = false;
        for (name, value) in record.fields.iter_mut() {
            if !name.starts_with(prefix) {
                continue;
            }
            if let Value::List(items) = value {
                let before = items.len();
                items.retain(|item| item.as_link() != Some(edge));
                changed |= items.len() != before;
            }
        }
        if changed {
            self.save(record)?;
        }
        Ok(())
    }
}

fn push_link(record: &mut Record, field: &str, rid: RecordId) {
    match record.fields.get_mut(field) {
        Some(Value::List(items)) => items.push(Value::Link(rid)),
        _ => {
            record.set_field(field, vec![Value::Link(rid)]);
        }
    }
}

fn links_with_prefix(record: &Record, prefix: &str) -> Vec<RecordId> {
    record
        .fields
        .iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .filter_map(|(_, value)| value.as_list())
        .flatten()
        .filter_map(Value::as_link)
        .collect()
}
