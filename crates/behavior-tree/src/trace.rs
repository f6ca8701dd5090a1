//! Evaluation traces for debugging tree decisions.

use core::fmt;

use crate::Status;

/// One visited node in a [`Trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Nesting depth below the traced root (root = 0).
    pub depth: usize,
    /// Node label as reported by [`crate::Behavior::name`].
    pub name: String,
    /// Result of the node; `None` only while a composite is still evaluating.
    pub status: Option<Status>,
}

/// Pre-order record of every node visited during one traced tick.
///
/// Nodes skipped by short-circuiting never appear, which makes traces a
/// convenient way to assert evaluation order in tests.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    entries: Vec<TraceEntry>,
    depth: usize,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished leaf at the current depth.
    pub fn record(&mut self, name: &str, status: Status) {
        self.entries.push(TraceEntry {
            depth: self.depth,
            name: name.to_owned(),
            status: Some(status),
        });
    }

    /// Opens a composite entry; children recorded before the matching
    /// [`Trace::close`] are nested one level deeper.
    pub fn open(&mut self, name: &str) -> usize {
        self.entries.push(TraceEntry {
            depth: self.depth,
            name: name.to_owned(),
            status: None,
        });
        self.depth += 1;
        self.entries.len() - 1
    }

    /// Closes the composite opened at `slot` with its final status.
    pub fn close(&mut self, slot: usize, status: Status) {
        self.depth = self.depth.saturating_sub(1);
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.status = Some(status);
        }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts how many times a node with the given label was visited.
    pub fn visits(&self, name: &str) -> usize {
        self.entries.iter().filter(|e| e.name == name).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.depth = 0;
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let status = match entry.status {
                Some(status) => format!("{status:?}"),
                None => "?".to_owned(),
            };
            writeln!(f, "{:indent$}{} -> {}", "", entry.name, status, indent = entry.depth * 2)?;
        }
        Ok(())
    }
}
