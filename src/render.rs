//! ==============================================================================
//! render.rs - html view of the latest control-unit payload
//! ==============================================================================
//!
//! purpose:
//!     turns a `Payload` into the page served at `/` by the control-unit stub.
//!     the page is what a tester looks at while a real control unit posts
//!     readings, so the number formats are fixed:
//!     - timestamp: utc rfc3339, whole seconds ("1970-01-01T00:00:00Z")
//!     - temperature: 2 decimals
//!     - humidity: 1 decimal
//!
//! relationships:
//!     - used by: control_unit.rs (dashboard handler)
//!     - reads: domain.rs (payload types)
//!
//! ==============================================================================

use crate::domain::{Payload, SensorUnit, TimestampGroup};

use chrono::{DateTime, SecondsFormat};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;
use std::str::FromStr;

pub const PAGE_TITLE: &str = "Chas Advance Control Unit Testserver";

/// shown instead of the group list when the payload has no groups
pub const EMPTY_GROUPS_PLACEHOLDER: &str = "timestamp_groups: []";

/// render the full html document for a payload
pub fn render_dashboard(payload: &Payload) -> String {
    let mut html = String::with_capacity(512);

    // writing into a String cannot fail
    let _ = write!(
        html,
        r#"<html>
<head>
    <title>{title}</title>
</head>
<body>
    <h1>{title}</h1>
    <h2>Latest readings</h2>
    <p><strong>Device UUID:</strong> {device}</p>
"#,
        title = PAGE_TITLE,
        device = html_escape(&payload.device_uuid),
    );

    if payload.timestamp_groups.is_empty() {
        let _ = writeln!(html, "    <p><em>{}</em></p>", EMPTY_GROUPS_PLACEHOLDER);
    } else {
        for group in &payload.timestamp_groups {
            render_group(&mut html, group);
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_group(html: &mut String, group: &TimestampGroup) {
    let _ = writeln!(
        html,
        "    <h3>Timestamp: {}</h3>\n    <ul>",
        format_timestamp(group.timestamp)
    );
    for unit in &group.sensor_units {
        let _ = writeln!(html, "        <li>{}</li>", format_unit(unit));
    }
    html.push_str("    </ul>\n");
}

/// "uuid — Temp: X, Humidity: Y%" with the uuid escaped
fn format_unit(unit: &SensorUnit) -> String {
    format!(
        "{} — Temp: {}, Humidity: {}%",
        html_escape(&unit.uuid),
        format_fixed(unit.temperature, 2),
        format_fixed(unit.humidity, 1),
    )
}

/// unix seconds as utc rfc3339.
/// falls back to the raw number outside chrono's calendar range.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => secs.to_string(),
    }
}

/// fixed-point with ties rounded away from zero (40.25 -> "40.3" at 1 decimal).
///
/// a tie is judged on the shortest decimal form of the value, so 1.4649999999999999
/// stays below the midpoint. values outside `Decimal`'s range (and nan/inf) use
/// plain float formatting.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let Ok(exact) = Decimal::from_str(&value.to_string()) else {
        return format!("{:.*}", decimals, value);
    };
    let scale = decimals as u32;
    let mut rounded = exact.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded.to_string()
}

/// escape html special characters to prevent xss
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
