//! collectd exec-protocol dispatch adapter.
//!
//! Each metric becomes one `PUTVAL` line on the wrapped writer:
//!
//! ```text
//! PUTVAL "<host>/<plugin>-<plugin_instance>/<type>-<type_instance>" interval=<secs> N:<value>
//! ```
//!
//! An empty plugin instance or type instance omits its `-<...>` part rather
//! than leaving a trailing dash. Under the collectd exec plugin the
//! COLLECTD_HOSTNAME and COLLECTD_INTERVAL environment variables describe
//! the dispatch target and override the configured values.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::metric::{format_value, Metric, MetricValue, PLUGIN};

/// Writes PUTVAL lines for derived metrics.
pub struct PutvalWriter<W: Write> {
    out: W,
    host: String,
    interval: Duration,
}

impl<W: Write> PutvalWriter<W> {
    pub fn new(out: W, host: impl Into<String>, interval: Duration) -> Self {
        Self {
            out,
            host: host.into(),
            interval,
        }
    }

    /// Dispatch one metric.
    pub fn dispatch(&mut self, metric: &Metric) -> Result<()> {
        writeln!(
            self.out,
            "PUTVAL \"{}\" interval={} {}",
            self.identifier(metric),
            format_value(self.interval.as_secs_f64()),
            values_token(&metric.value),
        )
        .context("writing PUTVAL line")
    }

    /// Flush buffered lines; called once per cycle so a consumer sees whole
    /// snapshots.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flushing dispatch output")
    }

    fn identifier(&self, metric: &Metric) -> String {
        let mut id = format!("{}/{}", self.host, PLUGIN);
        if !metric.plugin_instance.is_empty() {
            id.push('-');
            id.push_str(&metric.plugin_instance);
        }
        id.push('/');
        id.push_str(metric.type_name);
        if !metric.type_instance.is_empty() {
            id.push('-');
            id.push_str(&metric.type_instance);
        }
        id
    }
}

fn values_token(value: &MetricValue) -> String {
    match value {
        MetricValue::Single(v) => format!("N:{}", format_value(*v)),
        MetricValue::Pair(a, b) => format!("N:{}:{}", format_value(*a), format_value(*b)),
    }
}

/// Resolve the effective dispatch host and interval, honoring the collectd
/// exec plugin environment.
pub fn resolve_target(hostname: &str, interval: Duration) -> (String, Duration) {
    resolve_with(
        hostname,
        interval,
        std::env::var("COLLECTD_HOSTNAME").ok(),
        std::env::var("COLLECTD_INTERVAL").ok(),
    )
}

fn resolve_with(
    hostname: &str,
    interval: Duration,
    env_host: Option<String>,
    env_interval: Option<String>,
) -> (String, Duration) {
    let host = env_host
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| hostname.to_string());

    let interval = env_interval
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|secs| *secs > 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(interval);

    (host, interval)
}
