//! Queue entry wire types and dashboard counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::QueueEntryId;
use super::status::QueueEntryStatus;

/// The barber a customer is queued for: an id, or the populated barber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarberRef {
    Id(String),
    Populated {
        #[serde(default)]
        name: Option<String>,
    },
}

impl BarberRef {
    /// Display name when the barber was populated.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated { name } => name.as_deref(),
        }
    }
}

/// A customer waiting in (or served from) a shop's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    #[serde(rename = "_id")]
    pub id: QueueEntryId,
    pub name: String,
    pub barber: BarberRef,
    pub service_name: String,
    /// Minutes.
    #[serde(default)]
    pub service_duration: u32,
    pub status: QueueEntryStatus,
    pub created_at: DateTime<Utc>,
}

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Every entry returned for today.
    pub total: usize,
    pub completed: usize,
    pub waiting: usize,
}

impl QueueStats {
    /// Tally a queue snapshot.
    #[must_use]
    pub fn from_entries(entries: &[QueueEntry]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut stats, entry| {
                match entry.status {
                    QueueEntryStatus::Completed => stats.completed += 1,
                    QueueEntryStatus::Waiting => stats.waiting += 1,
                    QueueEntryStatus::Other => {}
                }
                stats
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, status: &str) -> QueueEntry {
        serde_json::from_value(json!({
            "_id": id,
            "name": "Alex",
            "barber": {"name": "Sam"},
            "serviceName": "Fade",
            "serviceDuration": 30,
            "status": status,
            "createdAt": "2026-10-16T09:30:00.000Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_stats() {
        let entries = vec![
            entry("1", "waiting"),
            entry("2", "completed"),
            entry("3", "waiting"),
            entry("4", "cancelled"),
        ];
        assert_eq!(
            QueueStats::from_entries(&entries),
            QueueStats {
                total: 4,
                completed: 1,
                waiting: 2,
            }
        );
    }

    #[test]
    fn test_barber_ref_forms() {
        assert_eq!(entry("1", "waiting").barber.name(), Some("Sam"));
        let by_id: BarberRef = serde_json::from_value(json!("b1")).unwrap();
        assert_eq!(by_id.name(), None);
    }
}
