//! Lenient extractor for the generation-3 OID walk endpoint.
//!
//! A walk response is a flat OID-to-value dump for one subtree. Keys
//! decompose into the subtree base, a suffix naming the leaf, and a trailing
//! index naming the row. Vendor trees routinely carry undocumented leaves
//! with no monitoring value, so an unknown suffix is logged and skipped
//! rather than failing the call; the strictness lives in the HTML extractor,
//! where an unknown label really does mean layout drift.

use std::collections::BTreeMap;

use tracing::debug;

use super::IndexedRecords;
use crate::fieldmap::{SubtreeSpec, SuffixMapping};

/// Value the walk endpoint appends to mark the end of a subtree.
const WALK_TERMINATOR: &str = "Finish";

/// Reduce one walk dump to records keyed by trailing index.
pub fn parse_walk(spec: &SubtreeSpec, dump: &BTreeMap<String, String>) -> IndexedRecords {
    let mut records = IndexedRecords::new();

    for (oid, value) in dump {
        if value == WALK_TERMINATOR {
            continue;
        }

        let Some((suffix, index)) = split_oid(spec.base(), oid) else {
            debug!(base = spec.base(), oid = %oid, "walk key outside subtree");
            continue;
        };

        match spec.mapping(suffix) {
            None => {
                debug!(
                    base = spec.base(),
                    suffix,
                    index,
                    value = %value,
                    "unknown OID suffix",
                );
            }
            Some(SuffixMapping::Ignored) => {}
            Some(SuffixMapping::Field(field)) => {
                records
                    .entry(index.to_string())
                    .or_default()
                    .insert(field, value.clone());
            }
        }
    }

    records
}

/// Split a full OID into (suffix, trailing index) relative to the subtree
/// base. `None` means the key does not sit under the base or carries no
/// row index.
fn split_oid<'a>(base: &str, oid: &'a str) -> Option<(&'a str, &'a str)> {
    let rest = oid.strip_prefix(base)?.strip_prefix('.')?;
    rest.rsplit_once('.')
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::fieldmap::SuffixMapping::{Field, Ignored};

    const BASE: &str = "1.3.6.1.2.1.10.127.1.1.1";

    fn spec() -> SubtreeSpec {
        SubtreeSpec::new(
            BASE,
            HashMap::from([
                ("1.1", Field("chanid")),
                ("1.6", Field("power")),
                ("1.7", Ignored),
            ]),
        )
    }

    fn dump(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(oid, value)| (oid.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_rows_group_by_trailing_index() {
        let dump = dump(&[
            (&format!("{BASE}.1.1.3"), "1"),
            (&format!("{BASE}.1.6.3"), "75"),
            (&format!("{BASE}.1.1.4"), "2"),
            (&format!("{BASE}.1.6.4"), "80"),
        ]);

        let records = parse_walk(&spec(), &dump);
        assert_eq!(records.len(), 2);
        assert_eq!(records["3"].get("chanid").expect("chanid"), "1");
        assert_eq!(records["3"].get("power").expect("power"), "75");
        assert_eq!(records["4"].get("chanid").expect("chanid"), "2");
        assert_eq!(records["4"].get("power").expect("power"), "80");
    }

    #[test]
    fn test_terminator_value_dropped() {
        let dump = dump(&[
            (&format!("{BASE}.1.1.3"), "1"),
            (&format!("{BASE}.1.1.4"), "Finish"),
        ]);

        let records = parse_walk(&spec(), &dump);
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("3"));
    }

    #[test]
    fn test_unknown_suffixes_skipped_not_fatal() {
        // Any number of distinct unknown suffixes: no error, no record.
        let dump = dump(&[
            (&format!("{BASE}.1.9.3"), "junk"),
            (&format!("{BASE}.2.14.3"), "more junk"),
            (&format!("{BASE}.1.1.3"), "1"),
        ]);

        let records = parse_walk(&spec(), &dump);
        assert_eq!(records.len(), 1);
        assert_eq!(records["3"].len(), 1);
        assert_eq!(records["3"].get("chanid").expect("chanid"), "1");
    }

    #[test]
    fn test_ignored_suffix_skipped_silently() {
        let dump = dump(&[
            (&format!("{BASE}.1.7.3"), "4"),
            (&format!("{BASE}.1.1.3"), "1"),
        ]);

        let records = parse_walk(&spec(), &dump);
        assert_eq!(records["3"].len(), 1);
        assert!(records["3"].get("chanid").is_some());
    }

    #[test]
    fn test_unknown_only_rows_yield_no_record() {
        let dump = dump(&[(&format!("{BASE}.1.9.3"), "junk")]);

        assert!(parse_walk(&spec(), &dump).is_empty());
    }

    #[test]
    fn test_key_outside_base_skipped() {
        let dump = dump(&[
            ("1.3.6.1.4.1.9999.1.1.3", "stray"),
            (&format!("{BASE}.1.1.3"), "1"),
        ]);

        let records = parse_walk(&spec(), &dump);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_key_without_index_skipped() {
        let dump = dump(&[(&format!("{BASE}.3"), "scalar leaf")]);

        assert!(parse_walk(&spec(), &dump).is_empty());
    }

    #[test]
    fn test_split_oid() {
        assert_eq!(
            split_oid(BASE, &format!("{BASE}.1.6.12")),
            Some(("1.6", "12"))
        );
        assert_eq!(split_oid(BASE, &format!("{BASE}.4")), None);
        assert_eq!(split_oid(BASE, "1.2.3.4.5"), None);
    }
}
