use std::sync::Arc;

use crate::record::ConnectionRecord;

/// Frozen result of the startup collection pass, shared by every request.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    records: Arc<[ConnectionRecord]>,
}

impl SnapshotStore {
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<ConnectionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[ConnectionRecord] {
        &self.records
    }

    /// Handle to the frozen records without copying them.
    pub fn shared(&self) -> Arc<[ConnectionRecord]> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::empty()
    }
}
