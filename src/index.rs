//! The typedef index: every typedef available as an expansion source.

use crate::config::ExpandOptions;
use crate::error::Result;
use crate::merge;
use crate::model::DocRecord;
use crate::source::RecordSource;
use tracing::debug;

/// Owned, de-referenced copies of the typedefs an expansion may pull from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedefIndex {
    typedefs: Vec<DocRecord>,
}

impl TypedefIndex {
    /// Index the well-formed typedefs among `records`.
    pub fn from_records(records: &[DocRecord]) -> Self {
        TypedefIndex {
            typedefs: typedefs_only(records),
        }
    }

    /// Union auxiliary typedefs into the index. Names already present win.
    pub fn with_auxiliary(self, auxiliary: &[DocRecord]) -> Self {
        if auxiliary.is_empty() {
            return self;
        }
        TypedefIndex {
            typedefs: merge::union(self.typedefs, auxiliary.iter().cloned()),
        }
    }

    /// First typedef whose `name` or `longname` is `name`.
    pub fn find(&self, name: &str) -> Option<&DocRecord> {
        self.typedefs.iter().find(|def| def.answers_to(name))
    }

    pub fn len(&self) -> usize {
        self.typedefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typedefs.is_empty()
    }

    pub fn into_records(self) -> Vec<DocRecord> {
        self.typedefs
    }
}

fn typedefs_only(records: &[DocRecord]) -> Vec<DocRecord> {
    records.iter().filter(|r| r.is_typedef()).cloned().collect()
}

/// Load the typedefs of every auxiliary file named in `options`.
///
/// Files are read in order and unioned by name, so a typedef from an
/// earlier file shadows a same-named one from a later file.
pub fn load_auxiliary(options: &ExpandOptions, source: &dyn RecordSource) -> Result<Vec<DocRecord>> {
    let mut auxiliary = Vec::new();
    for path in &options.source_typedefs {
        let found = typedefs_only(&source.load(path)?);
        debug!(path = %path.display(), typedefs = found.len(), "loaded auxiliary typedefs");
        auxiliary = merge::union(auxiliary, found);
    }
    Ok(auxiliary)
}

/// Build the index for `records` plus the auxiliary files in `options`.
pub fn build_index(
    records: &[DocRecord],
    options: &ExpandOptions,
    source: &dyn RecordSource,
) -> Result<TypedefIndex> {
    let auxiliary = load_auxiliary(options, source)?;
    Ok(TypedefIndex::from_records(records).with_auxiliary(&auxiliary))
}
