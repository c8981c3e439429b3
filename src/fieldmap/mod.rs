//! Declarative field maps for both device generations.
//!
//! A field map names, for each logical source (an HTML status page or an OID
//! subtree), which raw labels or OID suffixes map to which canonical field
//! names. The maps are pure data: the built-in set is constructed once at
//! startup, validated for field-name uniqueness, and immutable thereafter.

pub mod pages;
pub mod subtrees;

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::error::CollectError;

/// Row-label to canonical-field mapping for one captioned table.
pub type RowSpec = HashMap<&'static str, &'static str>;

/// Field maps for every known source, keyed by source identifier.
#[derive(Debug)]
pub struct FieldMap {
    pages: HashMap<&'static str, PageSpec>,
    subtrees: HashMap<&'static str, SubtreeSpec>,
}

/// Field map for one HTML status page: caption text to its row mapping.
#[derive(Debug)]
pub struct PageSpec {
    tables: HashMap<&'static str, RowSpec>,
}

/// Field map for one OID subtree.
#[derive(Debug)]
pub struct SubtreeSpec {
    base: &'static str,
    suffixes: HashMap<&'static str, SuffixMapping>,
}

/// What a known OID suffix maps to.
///
/// `Ignored` is a tagged variant rather than a magic string so an ignored
/// leaf can never collide with a real field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixMapping {
    Field(&'static str),
    Ignored,
}

impl FieldMap {
    /// Build the built-in field maps for both device generations,
    /// validating them before first use.
    pub fn builtin() -> Result<Self> {
        Self::new(pages::all(), subtrees::all())
    }

    fn new(
        pages: HashMap<&'static str, PageSpec>,
        subtrees: HashMap<&'static str, SubtreeSpec>,
    ) -> Result<Self> {
        for (name, spec) in &pages {
            spec.validate(name)?;
        }
        for (name, spec) in &subtrees {
            spec.validate(name)?;
        }
        Ok(Self { pages, subtrees })
    }

    /// Look up the spec for an HTML status page.
    pub fn page(&self, name: &str) -> Result<&PageSpec, CollectError> {
        self.pages.get(name).ok_or_else(|| CollectError::UnknownSource {
            name: name.to_string(),
        })
    }

    /// Look up the spec for an OID subtree.
    pub fn subtree(&self, name: &str) -> Result<&SubtreeSpec, CollectError> {
        self.subtrees
            .get(name)
            .ok_or_else(|| CollectError::UnknownSource {
                name: name.to_string(),
            })
    }
}

impl PageSpec {
    pub(crate) fn new(tables: HashMap<&'static str, RowSpec>) -> Self {
        Self { tables }
    }

    /// Row mapping for a table caption, if the caption is known.
    pub fn rows(&self, caption: &str) -> Option<&RowSpec> {
        self.tables.get(caption)
    }

    /// Field names must be unique across the whole page: single-row tables
    /// merge into one record per page.
    fn validate(&self, name: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for rows in self.tables.values() {
            for field in rows.values() {
                if !seen.insert(*field) {
                    bail!("duplicate field {field:?} in page map {name}");
                }
            }
        }
        Ok(())
    }
}

impl SubtreeSpec {
    pub(crate) fn new(
        base: &'static str,
        suffixes: HashMap<&'static str, SuffixMapping>,
    ) -> Self {
        Self { base, suffixes }
    }

    /// Base OID prefix requested from the walk endpoint.
    pub fn base(&self) -> &'static str {
        self.base
    }

    /// Mapping for an OID suffix, if the suffix is known.
    pub fn mapping(&self, suffix: &str) -> Option<SuffixMapping> {
        self.suffixes.get(suffix).copied()
    }

    fn validate(&self, name: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for mapping in self.suffixes.values() {
            if let SuffixMapping::Field(field) = mapping {
                if !seen.insert(*field) {
                    bail!("duplicate field {field:?} in subtree map {name}");
                }
            }
        }
        Ok(())
    }
}
