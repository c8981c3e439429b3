//! Source extractors and the record shapes they share.
//!
//! Both extractors reduce raw device output to string-valued records keyed
//! by canonical field names. Values stay undecoded here; scaling, unit
//! stripping and joins belong to metric derivation.

pub mod html;
pub mod walk;

use std::collections::BTreeMap;

use crate::error::CollectError;

/// One logical row: canonical field name to raw string value.
pub type Record = BTreeMap<&'static str, String>;

/// Rows of an OID subtree keyed by trailing walk index.
pub type IndexedRecords = BTreeMap<String, Record>;

/// Per-column records of a multi-column table, in document order. Document
/// order is the device's channel presentation order and drives positional
/// instance numbering for generation-1 channels.
pub type ColumnRecords = Vec<(String, Record)>;

/// Everything extracted from one HTML status page.
///
/// Single-row tables merge into `fields`; multi-column tables append one
/// record per column label to `columns`.
#[derive(Debug, Default)]
pub struct PageRecords {
    pub fields: Record,
    pub columns: ColumnRecords,
}

impl PageRecords {
    /// Read a required single-row field.
    pub fn field(&self, field: &'static str) -> Result<&str, CollectError> {
        self.fields
            .get(field)
            .map(String::as_str)
            .ok_or(CollectError::MissingField { field })
    }
}

/// Order an indexed mapping by the numeric value of one designated field,
/// ascending. The result pairs each record with its original walk index so
/// callers can still correlate against sibling subtrees.
///
/// Device walk indices are neither contiguous nor meaningful; positions in
/// the returned sequence (1-based) are the stable channel identity.
pub fn flatten_by<'a>(
    records: &'a IndexedRecords,
    field: &'static str,
) -> Result<Vec<(&'a str, &'a Record)>, CollectError> {
    let mut keyed = Vec::with_capacity(records.len());

    for (index, record) in records {
        let raw = record
            .get(field)
            .ok_or(CollectError::MissingField { field })?;
        let key: i64 = raw.trim().parse().map_err(|_| CollectError::MalformedValue {
            field,
            value: raw.clone(),
        })?;
        keyed.push((key, index.as_str(), record));
    }

    // Stable sort: equal keys keep index order.
    keyed.sort_by_key(|(key, _, _)| *key);

    Ok(keyed
        .into_iter()
        .map(|(_, index, record)| (index, record))
        .collect())
}
