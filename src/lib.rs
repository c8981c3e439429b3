//! Cable modem telemetry agent.
//!
//! Polls a Virgin Media SuperHub over HTTP and reduces its channel and
//! service-flow statistics to one uniform metric set. Generation 1 devices
//! serve HTML status pages; generation 3 devices serve an SNMP-style OID
//! walk endpoint. Both feed the same derivation layer, and every derived
//! metric is dispatched as a collectd exec-protocol `PUTVAL` line.
//!
//! A poll cycle is stateless and atomic: it either emits its complete
//! metric set or fails as a whole.

pub mod config;
pub mod derive;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod fieldmap;
pub mod hub;
pub mod metric;
pub mod poller;
