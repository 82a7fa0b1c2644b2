//! the control-unit stub's only state: the most recently received payload.
//!
//! `PayloadStore` is a clone-able handle; every clone points at the same
//! lock-guarded slot. the lock is held only for the swap or the copy, never
//! across formatting or network i/o.

use crate::domain::Payload;
use crate::error::Result;

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone, Default)]
pub struct PayloadStore {
    latest: Arc<Mutex<Payload>>,
}

impl PayloadStore {
    /// an empty store holding the zero payload
    pub fn new() -> Self {
        Self::default()
    }

    /// decode a raw request body and, only if it decodes, replace `latest`.
    ///
    /// a decode failure leaves the store untouched.
    pub async fn ingest(&self, raw: &[u8]) -> Result<()> {
        let payload: Payload = serde_json::from_slice(raw)?;
        self.replace(payload).await;
        Ok(())
    }

    /// replace the stored payload wholesale; the previous one is dropped
    pub async fn replace(&self, payload: Payload) {
        debug!(
            control_unit_id = %payload.device_uuid,
            groups = payload.timestamp_groups.len(),
            "replacing latest payload"
        );
        *self.latest.lock().await = payload;
    }

    /// a copy of the stored payload, consistent with respect to `replace`
    pub async fn snapshot(&self) -> Payload {
        self.latest.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SensorUnit, TimestampGroup};

    fn payload(id: &str, readings: usize) -> Payload {
        Payload {
            device_uuid: id.to_string(),
            timestamp_groups: vec![TimestampGroup {
                timestamp: 1_700_000_000,
                sensor_units: (0..readings)
                    .map(|i| SensorUnit {
                        uuid: format!("{id}-s{i}"),
                        temperature: i as f64,
                        humidity: 50.0,
                    })
                    .collect(),
            }],
        }
    }

    #[tokio::test]
    async fn starts_with_the_zero_payload() {
        assert_eq!(PayloadStore::new().snapshot().await, Payload::default());
    }

    #[tokio::test]
    async fn ingest_replaces_instead_of_merging() {
        let store = PayloadStore::new();
        store
            .ingest(br#"{"control_unit_id":"a","timestamp_groups":[{"timestamp":1},{"timestamp":2}]}"#)
            .await
            .unwrap();
        store
            .ingest(br#"{"control_unit_id":"b","timestamp_groups":[{"timestamp":3}]}"#)
            .await
            .unwrap();

        let latest = store.snapshot().await;
        assert_eq!(latest.device_uuid, "b");
        assert_eq!(latest.timestamp_groups.len(), 1);
        assert_eq!(latest.timestamp_groups[0].timestamp, 3);
    }

    #[tokio::test]
    async fn failed_decode_keeps_previous_payload() {
        let store = PayloadStore::new();
        store.replace(payload("keep", 2)).await;

        assert!(store.ingest(b"{not json").await.is_err());
        assert!(store.ingest(&[0xff, 0xfe, 0x00]).await.is_err());

        assert_eq!(store.snapshot().await, payload("keep", 2));
    }

    #[tokio::test]
    async fn clones_share_the_same_slot() {
        let store = PayloadStore::new();
        let handle = store.clone();
        handle.replace(payload("shared", 1)).await;
        assert_eq!(store.snapshot().await.device_uuid, "shared");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_ingests_leave_one_whole_payload() {
        let store = PayloadStore::new();
        let candidates: Vec<Payload> = (0..16)
            .map(|i| payload(&format!("dev{i}"), i + 1))
            .collect();

        let mut tasks = Vec::new();
        for candidate in candidates.clone() {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let raw = serde_json::to_vec(&candidate).unwrap();
                store.ingest(&raw).await.unwrap();
            }));
        }
        let reader = {
            let store = store.clone();
            let candidates = candidates.clone();
            tokio::spawn(async move {
                for _ in 0..64 {
                    let seen = store.snapshot().await;
                    assert!(seen == Payload::default() || candidates.contains(&seen));
                }
            })
        };

        for task in tasks {
            task.await.unwrap();
        }
        reader.await.unwrap();

        assert!(candidates.contains(&store.snapshot().await));
    }
}
