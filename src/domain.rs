//! wire types for the payloads a control unit reports.
//!
//! decoding is lenient in the way the devices expect: unknown fields are
//! ignored, missing fields fall back to their zero value, and an explicit
//! `null` for a string or list is treated the same as a missing field.

use serde::{Deserialize, Deserializer, Serialize};

/// one ingestion batch from one control unit
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Payload {
    #[serde(rename = "control_unit_id", deserialize_with = "null_as_default")]
    pub device_uuid: String,

    #[serde(deserialize_with = "null_as_default")]
    pub timestamp_groups: Vec<TimestampGroup>,
}

/// readings that share one sampling instant
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct TimestampGroup {
    /// unix seconds
    pub timestamp: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub sensor_units: Vec<SensorUnit>,
}

/// a single sensor unit's reading
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct SensorUnit {
    #[serde(rename = "sensor_unit_id", deserialize_with = "null_as_default")]
    pub uuid: String,

    /// degrees celsius
    pub temperature: f64,

    /// relative humidity (0-100%)
    pub humidity: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
