//! Type resolution: what a type reference is made of.

use crate::index::TypedefIndex;
use crate::merge;
use crate::model::{is_terminal, Property, TypeRef};
use tracing::debug;

/// Collect the properties a type reference inherits from the typedefs it names.
///
/// Each referenced typedef contributes its own properties followed by
/// whatever its own type resolves to (own entries win). Across names the
/// later name wins, and its entries lead the result. Unknown and terminal
/// names contribute nothing. The returned properties are not expanded.
pub fn resolve_type_sources(type_ref: Option<&TypeRef>, index: &TypedefIndex) -> Vec<Property> {
    let mut chain = Vec::new();
    resolve_with_chain(type_ref, index, &mut chain)
}

/// `chain` holds the typedefs currently being resolved, outermost first.
fn resolve_with_chain<'a>(
    type_ref: Option<&TypeRef>,
    index: &'a TypedefIndex,
    chain: &mut Vec<&'a str>,
) -> Vec<Property> {
    let Some(type_ref) = type_ref else {
        return Vec::new();
    };

    let mut sources: Vec<Property> = Vec::new();

    for name in &type_ref.names {
        if is_terminal(name) {
            continue;
        }
        let Some(typedef) = index.find(name) else {
            continue;
        };

        let id = typedef
            .name
            .as_deref()
            .or(typedef.longname.as_deref())
            .unwrap_or_default();
        if chain.contains(&id) {
            debug!(typedef = id, "skipping self-referential typedef");
            continue;
        }

        chain.push(id);
        let inherited = resolve_with_chain(typedef.type_ref(), index, chain);
        chain.pop();

        let own = typedef.properties.clone().unwrap_or_default();
        let resolved = merge::union(own, inherited);
        sources = merge::union(resolved, sources);
    }

    sources
}
