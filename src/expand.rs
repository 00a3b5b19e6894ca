//! Typedef expansion.
//!
//! A property whose type names a typedef is replaced by itself (retyped as
//! `object`) followed by the typedef's properties under dotted names,
//! recursively. A typedef whose own type names other typedefs absorbs their
//! properties before its own list is expanded the same way.

use crate::config::ExpandOptions;
use crate::error::Result;
use crate::index::{load_auxiliary, TypedefIndex};
use crate::merge;
use crate::model::{DocRecord, Kind, Property, TypeRef};
use crate::resolve::resolve_type_sources;
use crate::source::RecordSource;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Expand one property into `[property, property.a, property.b, ...]`.
///
/// Without an index, or when the property's type resolves to nothing, the
/// property comes back alone and untouched. Sub-properties of an optional
/// property are optional too.
pub fn expand_property(property: Property, index: Option<&TypedefIndex>) -> Vec<Property> {
    let Some(index) = index else {
        return vec![property];
    };
    let mut path = Vec::new();
    expand_with_path(property, index, &mut path)
}

/// `path` holds the type names of every property being expanded above this one.
/// Meeting the same type again would expand forever, so it stops there.
fn expand_with_path(
    mut property: Property,
    index: &TypedefIndex,
    path: &mut Vec<Vec<String>>,
) -> Vec<Property> {
    let Some(type_names) = property.type_ref().map(|t| t.names.clone()) else {
        return vec![property];
    };
    if path.contains(&type_names) {
        debug!(property = ?property.name, types = ?type_names, "recursive type, not expanding");
        return vec![property];
    }

    let mut sources = resolve_type_sources(property.type_ref(), index);
    if sources.is_empty() {
        return vec![property];
    }

    path.push(type_names);
    for i in 0..sources.len() {
        let mut expanded = expand_with_path(std::mem::take(&mut sources[i]), index, path).into_iter();
        if let Some(head) = expanded.next() {
            sources[i] = head;
        }
        sources = merge::union(sources, expanded);
    }
    path.pop();

    property.ty = Some(TypeRef::object().into());
    let parent = property.name.as_deref().unwrap_or_default();
    let optional = property.is_optional();
    for source in &mut sources {
        let child = source.name.as_deref().unwrap_or_default();
        source.name = Some(format!("{parent}.{child}"));
        if optional {
            source.optional = Some(true);
        }
    }

    let mut out = Vec::with_capacity(sources.len() + 1);
    out.push(property);
    out.extend(sources);
    out
}

/// Fully expand one typedef record against `records` and the auxiliary
/// files named in `options`.
///
/// Records that are not typedefs come back unchanged.
pub fn expand_typedef(
    record: &DocRecord,
    records: &[DocRecord],
    options: &ExpandOptions,
    source: &dyn RecordSource,
) -> Result<DocRecord> {
    if record.kind != Kind::Typedef {
        return Ok(record.clone());
    }
    let auxiliary = load_auxiliary(options, source)?;
    Ok(expand_typedef_with(record, records, &auxiliary))
}

/// [`expand_typedef`] with the auxiliary typedefs already loaded.
pub fn expand_typedef_with(record: &DocRecord, records: &[DocRecord], auxiliary: &[DocRecord]) -> DocRecord {
    if record.kind != Kind::Typedef {
        return record.clone();
    }

    let index = TypedefIndex::from_records(records).with_auxiliary(auxiliary);
    let mut doc = record.clone();
    let mut properties = doc.properties.take().unwrap_or_default();

    let root = resolve_type_sources(doc.type_ref(), &index);
    if !root.is_empty() {
        doc.ty = Some(TypeRef::object().into());
        let inherited: Vec<Property> = root
            .into_iter()
            .flat_map(|p| expand_property(p, Some(&index)))
            .collect();
        // own properties shadow inherited ones
        properties = merge::union(properties, inherited);
    }

    if !properties.is_empty() {
        properties = expand_listed(properties, &index);
        order_properties(&mut properties);
    }

    debug!(typedef = ?doc.name, properties = properties.len(), "expanded typedef");
    doc.properties = Some(properties);
    doc
}

/// Expand each listed property and join the results, one entry per name.
///
/// A listed entry beats a generated one of the same name wherever it sits
/// in the list; otherwise the first entry seen is kept.
fn expand_listed(listed: Vec<Property>, index: &TypedefIndex) -> Vec<Property> {
    let explicit: HashSet<String> = listed.iter().filter_map(|p| p.name.clone()).collect();

    listed.into_iter().fold(Vec::new(), |acc, property| {
        let mut expanded = expand_property(property, Some(index)).into_iter();
        let head = expanded.next();
        let generated = expanded.filter(|p| p.name.as_ref().map_or(true, |n| !explicit.contains(n)));
        merge::union(acc, head.into_iter().chain(generated))
    })
}

/// Expand every typedef in `records`, in place and in order.
///
/// Each typedef only has its `properties` replaced. Typedefs later in the
/// list are expanded against the already-expanded earlier ones.
pub fn expand_typedefs(
    mut records: Vec<DocRecord>,
    options: &ExpandOptions,
    source: &dyn RecordSource,
) -> Result<Vec<DocRecord>> {
    let mut auxiliary: Option<Vec<DocRecord>> = None;

    for i in 0..records.len() {
        if records[i].kind != Kind::Typedef {
            continue;
        }
        if auxiliary.is_none() {
            auxiliary = Some(load_auxiliary(options, source)?);
        }
        let aux = auxiliary.as_deref().unwrap_or_default();
        let expanded = expand_typedef_with(&records[i], &records, aux);
        records[i].properties = expanded.properties;
    }

    Ok(records)
}

/// Leading number of a name, read the way JavaScript's `parseFloat` does.
static RE_LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))").unwrap()
});

fn leading_number(name: &str) -> Option<f64> {
    let caps = RE_LEADING_NUMBER.captures(name)?;
    caps[1].parse().ok()
}

/// Sort numerically-named properties in descending order among the slots
/// they already occupy. Everything else stays where it is.
fn order_properties(props: &mut [Property]) {
    let slots: Vec<(usize, f64)> = props
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.name.as_deref().and_then(leading_number).map(|n| (i, n)))
        .collect();
    if slots.len() < 2 {
        return;
    }

    let mut ranked = slots.clone();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let moved: Vec<Property> = ranked.iter().map(|&(i, _)| props[i].clone()).collect();
    for (&(slot, _), prop) in slots.iter().zip(moved) {
        props[slot] = prop;
    }
}
