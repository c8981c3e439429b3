//! Terminal metric artifacts handed to the dispatch adapter.
//!
//! A [`Metric`] is the collectd-shaped tuple (plugin, plugin instance, type,
//! type instance, value). Metrics are built fresh each poll cycle and never
//! retained after dispatch.

/// Plugin name reported in every dispatched value list.
pub const PLUGIN: &str = "cmwatch";

/// collectd type for provisioned bitrates.
pub const TYPE_BITRATE: &str = "bitrate";

/// collectd type for instantaneous readings (power levels).
pub const TYPE_GAUGE: &str = "gauge";

/// collectd type for monotonic counters (timeout totals).
pub const TYPE_DERIVE: &str = "derive";

/// One or two numeric readings carried by a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Single(f64),
    Pair(f64, f64),
}

/// A fully derived metric, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Instance of this plugin (identifies the device, e.g. "cm1").
    pub plugin_instance: String,

    /// collectd type name.
    pub type_name: &'static str,

    /// Type instance label (e.g. "max-down", "DS-1-power"). Empty means
    /// the dispatch adapter omits the field entirely.
    pub type_instance: String,

    pub value: MetricValue,
}

impl Metric {
    /// Build a single-valued metric.
    pub fn single(
        plugin_instance: &str,
        type_name: &'static str,
        type_instance: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            plugin_instance: plugin_instance.to_string(),
            type_name,
            type_instance: type_instance.into(),
            value: MetricValue::Single(value),
        }
    }
}

/// Format a reading the way collectd expects: integral values carry no
/// decimal point, fractional values keep their precision.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
