//! Metric derivation: turn extracted records into final metrics.
//!
//! Both generations funnel into the same small set of shapes: unit-stripped
//! scalars, tenths-encoded gauges, per-channel instance labels built from a
//! role prefix and a 1-based position, and the qos/qosflows cross-index
//! join. Positions come from the flattened channel ordering, never from the
//! device's raw walk index, so instance names stay stable across polls.

use crate::error::CollectError;
use crate::extract::{ColumnRecords, IndexedRecords, PageRecords, Record};
use crate::metric::{Metric, TYPE_BITRATE, TYPE_DERIVE, TYPE_GAUGE};

/// Reading the generation-1 firmware reports for a channel that carries no
/// usable signal. Skipped outright: zero is a valid power level.
pub const NOT_APPLICABLE: &str = "N/A";

/// Which direction a channel set serves; prefixes its instance labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Downstream,
    Upstream,
}

impl ChannelRole {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Downstream => "DS",
            Self::Upstream => "US",
        }
    }
}

/// Leading numeric token of a unit-bearing value: `"123456 bps"` becomes
/// `"123456"`. Already-bare values pass through unchanged.
pub fn leading_token(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.split_once(' ').map_or(trimmed, |(token, _)| token)
}

/// Unit-strip a raw value and parse the numeric prefix.
pub fn parse_scalar(field: &'static str, raw: &str) -> Result<f64, CollectError> {
    leading_token(raw)
        .parse()
        .map_err(|_| CollectError::MalformedValue {
            field,
            value: raw.to_string(),
        })
}

/// Decode a tenths-encoded integer (power levels): raw `255` is `25.5`.
pub fn parse_tenths(field: &'static str, raw: &str) -> Result<f64, CollectError> {
    let units: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CollectError::MalformedValue {
            field,
            value: raw.to_string(),
        })?;
    Ok(units as f64 / 10.0)
}

/// Provisioned maximum bitrates, bits per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaxSpeeds {
    pub down: f64,
    pub up: f64,
}

/// The two top-line bitrate metrics, in dispatch order.
pub fn bitrate_metrics(plugin_instance: &str, speeds: MaxSpeeds) -> Vec<Metric> {
    vec![
        Metric::single(plugin_instance, TYPE_BITRATE, "max-down", speeds.down),
        Metric::single(plugin_instance, TYPE_BITRATE, "max-up", speeds.up),
    ]
}

/// Generation-1 bitrates: unit-stripped service-flow rates from the
/// configuration page.
pub fn page_max_speeds(configuration: &PageRecords) -> Result<MaxSpeeds, CollectError> {
    Ok(MaxSpeeds {
        down: parse_scalar("down_maxrate", configuration.field("down_maxrate")?)?,
        up: parse_scalar("up_maxrate", configuration.field("up_maxrate")?)?,
    })
}

/// Generation-3 bitrates: join the qos rate table against the qosflows
/// descriptor table by walk index, keeping the primary flow per direction.
///
/// A direction with no primary flow reports 0. A primary flow whose index
/// has no qos counterpart is a `JoinMismatch`: the walks are inconsistent.
pub fn max_speeds(
    qos: &IndexedRecords,
    flows: &IndexedRecords,
) -> Result<MaxSpeeds, CollectError> {
    let mut speeds = MaxSpeeds::default();

    for (index, flow) in flows {
        if field_i64(flow, "primary")? != 1 {
            continue;
        }

        let rates = qos.get(index).ok_or_else(|| CollectError::JoinMismatch {
            index: index.clone(),
        })?;
        let raw = rates
            .get("maxrate")
            .ok_or(CollectError::MissingField { field: "maxrate" })?;
        let rate = parse_scalar("maxrate", raw)?;

        match field_i64(flow, "direction")? {
            1 => speeds.down = rate,
            2 => speeds.up = rate,
            _ => {}
        }
    }

    Ok(speeds)
}

/// Per-channel metrics from a generation-1 multi-column table.
///
/// Channels are numbered by column position. A channel whose power reads
/// `N/A` is not bonded and emits nothing; upstream channels additionally
/// carry their T1-T4 timeout counters, skipped per value when absent or
/// `N/A`.
pub fn page_channel_metrics(
    plugin_instance: &str,
    role: ChannelRole,
    columns: &ColumnRecords,
) -> Result<Vec<Metric>, CollectError> {
    const TIMEOUT_FIELDS: [&'static str; 4] =
        ["t1timeouts", "t2timeouts", "t3timeouts", "t4timeouts"];

    let mut metrics = Vec::new();

    for (position, (_, record)) in columns.iter().enumerate() {
        let power = record
            .get("power")
            .ok_or(CollectError::MissingField { field: "power" })?;
        if power == NOT_APPLICABLE {
            continue;
        }

        metrics.push(Metric::single(
            plugin_instance,
            TYPE_GAUGE,
            instance(role, position, "power"),
            parse_scalar("power", power)?,
        ));

        if role == ChannelRole::Upstream {
            for field in TIMEOUT_FIELDS {
                let Some(raw) = record.get(field) else {
                    continue;
                };
                if raw == NOT_APPLICABLE {
                    continue;
                }
                metrics.push(Metric::single(
                    plugin_instance,
                    TYPE_DERIVE,
                    instance(role, position, field),
                    parse_scalar(field, raw)?,
                ));
            }
        }
    }

    Ok(metrics)
}

/// Generation-3 downstream metrics: tenths-encoded power per flattened
/// channel.
pub fn walk_downstream_metrics(
    plugin_instance: &str,
    channels: &[(&str, &Record)],
) -> Result<Vec<Metric>, CollectError> {
    let mut metrics = Vec::new();

    for (position, (_, record)) in channels.iter().enumerate() {
        let raw = record
            .get("power")
            .ok_or(CollectError::MissingField { field: "power" })?;
        metrics.push(Metric::single(
            plugin_instance,
            TYPE_GAUGE,
            instance(ChannelRole::Downstream, position, "power"),
            parse_tenths("power", raw)?,
        ));
    }

    Ok(metrics)
}

/// Generation-3 upstream metrics: power and timeout counters live in the
/// status subtree, joined to each flattened channel by walk index.
pub fn walk_upstream_metrics(
    plugin_instance: &str,
    channels: &[(&str, &Record)],
    status: &IndexedRecords,
) -> Result<Vec<Metric>, CollectError> {
    let mut metrics = Vec::new();

    for (position, (index, _)) in channels.iter().enumerate() {
        let stat = status.get(*index).ok_or_else(|| CollectError::JoinMismatch {
            index: index.to_string(),
        })?;

        let power = stat
            .get("power")
            .ok_or(CollectError::MissingField { field: "power" })?;
        metrics.push(Metric::single(
            plugin_instance,
            TYPE_GAUGE,
            instance(ChannelRole::Upstream, position, "power"),
            parse_tenths("power", power)?,
        ));

        for field in ["t3timeouts", "t4timeouts"] {
            let count = field_i64(stat, field)?;
            metrics.push(Metric::single(
                plugin_instance,
                TYPE_DERIVE,
                instance(ChannelRole::Upstream, position, field),
                count as f64,
            ));
        }
    }

    Ok(metrics)
}

/// Instance label for one channel metric, e.g. `DS-1-power`.
fn instance(role: ChannelRole, position: usize, suffix: &str) -> String {
    format!("{}-{}-{}", role.prefix(), position + 1, suffix)
}

fn field_i64(record: &Record, field: &'static str) -> Result<i64, CollectError> {
    let raw = record
        .get(field)
        .ok_or(CollectError::MissingField { field })?;
    raw.trim()
        .parse()
        .map_err(|_| CollectError::MalformedValue {
            field,
            value: raw.clone(),
        })
}
