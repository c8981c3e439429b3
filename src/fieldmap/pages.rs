//! Status page field maps for the generation-1 device.
//!
//! Source identifiers double as the page path fetched from the device.
//! Caption and label strings are matched exactly against the page markup.

use std::collections::HashMap;

use super::PageSpec;

pub const INFO: &str = "VmRouterStatus_info.asp";
pub const CONFIGURATION: &str = "VmRouterStatus_configuration.asp";
pub const UPSTREAM: &str = "VmRouterStatus_upstream.asp";
pub const DOWNSTREAM: &str = "VmRouterStatus_downstream.asp";
pub const USBURST: &str = "VmRouterStatus_usburst.asp";

pub(super) fn all() -> HashMap<&'static str, PageSpec> {
    HashMap::from([
        (
            INFO,
            PageSpec::new(HashMap::from([(
                "Information",
                HashMap::from([
                    ("Cable Modem", "type"),
                    ("Serial Number", "serialno"),
                    ("Boot Code Version", "bootcodever"),
                    ("Software Version", "softwarever"),
                    ("Hardware Version", "hardwarever"),
                    ("CA Key", "cakey"),
                ]),
            )])),
        ),
        (
            CONFIGURATION,
            PageSpec::new(HashMap::from([
                (
                    "General Configuration",
                    HashMap::from([
                        ("Network Access", "access"),
                        ("Maximum Number of CPEs", "maxcpe"),
                        ("Baseline Privacy", "privacy"),
                        ("DOCSIS Mode", "docsis"),
                        ("Config File", "config"),
                    ]),
                ),
                (
                    "Primary Downstream Service Flow",
                    HashMap::from([
                        ("SFID", "down_sfid"),
                        ("Max Traffic Rate", "down_maxrate"),
                        ("Max Traffic Burst", "down_maxburst"),
                        ("Min Traffic Rate", "down_minrate"),
                    ]),
                ),
                (
                    "Primary Upstream Service Flow",
                    HashMap::from([
                        ("SFID", "up_sfid"),
                        ("Max Traffic Rate", "up_maxrate"),
                        ("Max Traffic Burst", "up_maxburst"),
                        ("Min Traffic Rate", "up_minrate"),
                        ("Max Concatenated Burst", "up_maxconcatburst"),
                        ("Scheduling Type", "up_scheduling"),
                    ]),
                ),
            ])),
        ),
        (
            UPSTREAM,
            PageSpec::new(HashMap::from([(
                "Upstream",
                HashMap::from([
                    ("Channel Type", "chantype"),
                    ("Channel ID", "chanid"),
                    ("Frequency (Hz)", "freq"),
                    ("Ranging Status", "ranging"),
                    ("Modulation", "modulation"),
                    ("Symbol Rate (Sym/sec)", "symrate"),
                    ("Mini-Slot Size", "slotsize"),
                    ("Power Level (dBmV)", "power"),
                    ("T1 Timeouts", "t1timeouts"),
                    ("T2 Timeouts", "t2timeouts"),
                    ("T3 Timeouts", "t3timeouts"),
                    ("T4 Timeouts", "t4timeouts"),
                ]),
            )])),
        ),
        (
            DOWNSTREAM,
            PageSpec::new(HashMap::from([(
                "Downstream",
                HashMap::from([
                    ("Frequency (Hz)", "freq"),
                    ("Lock Status(QAM Lock/FEC Sync/MPEG Lock)", "lock"),
                    ("Channel ID", "chanid"),
                    ("Modulation", "modulation"),
                    ("Symbol Rate (Msym/sec)", "symrate"),
                    ("Interleave Depth", "interleave"),
                    ("Power Level (dBmV)", "power"),
                    ("RxMER (dB)", "rxmer"),
                ]),
            )])),
        ),
        (
            USBURST,
            PageSpec::new(HashMap::from([(
                "Upstream Burst",
                HashMap::from([
                    ("Modulation Type", "modulation"),
                    ("Differential Encoding", "diffenc"),
                    ("Preamble Length", "preamblelen"),
                    ("Preamble Value Offset", "preambleoff"),
                    ("FEC Error Correction (T)", "fec"),
                    ("FEC Codeword Information Bytes (K)", "fecbytes"),
                    ("Maximum Burst Size", "maxburst"),
                    ("Guard Time Size", "guardtime"),
                    ("Last Codeword Length", "lastcwlen"),
                    ("Scrambler On/Off", "scrambler"),
                ]),
            )])),
        ),
    ])
}
