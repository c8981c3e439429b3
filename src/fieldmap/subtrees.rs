//! OID subtree field maps for the generation-3 device.
//!
//! Each subtree is walked in one request against its base OID; suffixes are
//! the portion between the base and the trailing row index. Ignored entries
//! are leaves the device serves but monitoring has no use for.

use std::collections::HashMap;

use super::{SubtreeSpec, SuffixMapping};
use SuffixMapping::{Field, Ignored};

pub const DOWNSTREAM: &str = "downstream";
pub const UPSTREAM: &str = "upstream";
pub const UPSTREAM_EXT: &str = "upstreamext";
pub const UPSTREAM_STATUS: &str = "upstreamstatus";
pub const SIGNAL_QUALITY_EXT: &str = "signalqualityext";
pub const QOS: &str = "qos";
pub const QOS_FLOWS: &str = "qosflows";

pub(super) fn all() -> HashMap<&'static str, SubtreeSpec> {
    HashMap::from([
        (
            DOWNSTREAM,
            SubtreeSpec::new(
                "1.3.6.1.2.1.10.127.1.1.1",
                HashMap::from([
                    ("1.1", Field("chanid")),
                    ("1.2", Field("freq")),
                    ("1.3", Field("width")),
                    ("1.4", Field("modulation")),
                    ("1.5", Field("interleave")),
                    ("1.6", Field("power")),
                    ("1.7", Field("annex")),
                    ("1.8", Field("storage")),
                ]),
            ),
        ),
        (
            UPSTREAM,
            SubtreeSpec::new(
                "1.3.6.1.2.1.10.127.1.1.2",
                HashMap::from([
                    ("1.1", Field("chanid")),
                    ("1.2", Field("freq")),
                    ("1.3", Field("width")),
                    ("1.4", Field("modulation")),
                    ("1.5", Field("slotsize")),
                    ("1.6", Field("timingofs")),
                    ("1.7", Field("backoffstart")),
                    ("1.8", Field("backoffend")),
                    ("1.9", Field("txbackoffstart")),
                    ("1.10", Field("txbackoffend")),
                    ("1.11", Field("scdmaactivecodes")),
                    ("1.12", Field("scdmacodesperslot")),
                    ("1.13", Field("scdmaframesize")),
                    ("1.14", Field("scdmahoppingspeed")),
                    ("1.15", Field("type")),
                    ("1.16", Field("clonefrom")),
                    ("1.17", Field("update")),
                    ("1.18", Field("status")),
                    ("1.19", Field("preeqenable")),
                ]),
            ),
        ),
        (
            UPSTREAM_EXT,
            SubtreeSpec::new(
                "1.3.6.1.4.1.4115.1.3.4.1.9.2",
                HashMap::from([
                    ("1.1", Field("chanid")),
                    ("1.2", Field("symrate")),
                    ("1.3", Field("modulation")),
                ]),
            ),
        ),
        (
            UPSTREAM_STATUS,
            SubtreeSpec::new(
                "1.3.6.1.4.1.4491.2.1.20.1.2",
                HashMap::from([
                    ("1.1", Field("power")),
                    ("1.2", Field("t3timeouts")),
                    ("1.3", Field("t4timeouts")),
                    ("1.4", Field("rangingaborteds")),
                    ("1.5", Field("modulation")),
                    ("1.6", Field("eqdata")),
                    ("1.7", Field("t3exceededs")),
                    ("1.8", Field("ismuted")),
                    ("1.9", Field("ranging")),
                ]),
            ),
        ),
        (
            SIGNAL_QUALITY_EXT,
            SubtreeSpec::new(
                "1.3.6.1.4.1.4491.2.1.20.1.24",
                HashMap::from([("1.1", Field("rxmer")), ("1.2", Field("rxmersamples"))]),
            ),
        ),
        (
            QOS,
            SubtreeSpec::new(
                "1.3.6.1.4.1.4491.2.1.21.1.2.1.6",
                HashMap::from([
                    ("2.1", Field("maxrate")),
                    ("2.2", Ignored),
                    ("2.3", Ignored),
                ]),
            ),
        ),
        (
            QOS_FLOWS,
            SubtreeSpec::new(
                "1.3.6.1.4.1.4491.2.1.21.1.3.1",
                HashMap::from([
                    ("6.2", Field("sfsid")),
                    ("7.2", Field("direction")),
                    ("8.2", Field("primary")),
                    ("9.2", Field("flowparam")),
                    ("10.2", Field("chansetid")),
                    ("11.2", Field("flowattrsuccess")),
                    ("12.2", Field("sfdsid")),
                    ("13.2", Ignored),
                    ("14.2", Ignored),
                    ("15.2", Ignored),
                    ("16.2", Ignored),
                    ("17.2", Ignored),
                ]),
            ),
        ),
    ])
}
