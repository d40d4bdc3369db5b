use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: EntityId,
    pub name: String,
    /// Position on the album, 1-based.
    pub position: Option<u32>,
    pub length_ms: Option<u64>,
}

impl Track {
    pub fn duration(&self) -> Option<Duration> {
        self.length_ms.map(Duration::from_millis)
    }

    /// Length as `m:ss`, or `-` when unknown.
    pub fn display_length(&self) -> String {
        match self.duration() {
            Some(d) => {
                let secs = d.as_secs();
                format!("{}:{:02}", secs / 60, secs % 60)
            }
            None => "-".into(),
        }
    }
}
