use crate::catalog::catalog_model::{Catalog, ElementDescriptor};
use crate::resolver::field_spec::FieldSpec;

/// Resolve a field spec against a catalog snapshot.
///
/// Fallback chain, first match wins:
///   1. exact primary label + given ordinal
///   2. exact primary label, first in document order
///   3. each alias in listed order (exact, first in document order)
///   4. case-insensitive substring of the primary label
///
/// Only controls of the spec's kind are considered. No match is `None`,
/// never an error; a missing field must not void the rest of the run.
pub fn resolve<'a>(catalog: &'a Catalog, spec: &FieldSpec) -> Option<&'a ElementDescriptor> {
    let candidates: Vec<&ElementDescriptor> = catalog.of_kind(spec.kind).collect();

    // 1. exact label + ordinal
    if let Some(ordinal) = spec.ordinal {
        if let Some(found) = candidates
            .iter()
            .copied()
            .find(|c| label_eq(&c.label, &spec.label) && c.ordinal == ordinal)
        {
            return Some(found);
        }
    }

    // 2. exact label, first in document order. Ordinals bucket by
    // lowercased label, so a case-exact match may carry a nonzero
    // ordinal; filtering on ordinal here would let a weaker match win.
    if let Some(found) = candidates
        .iter()
        .copied()
        .find(|c| label_eq(&c.label, &spec.label))
    {
        return Some(found);
    }

    // 3. aliases, in listed order
    for alias in &spec.aliases {
        if let Some(found) = candidates
            .iter()
            .copied()
            .find(|c| label_eq(&c.label, alias))
        {
            return Some(found);
        }
    }

    // 4. substring of the primary label
    let needle = spec.label.trim().to_lowercase();
    if !needle.is_empty() {
        if let Some(found) = candidates
            .iter()
            .copied()
            .find(|c| c.label.to_lowercase().contains(&needle))
        {
            return Some(found);
        }
    }

    None
}

fn label_eq(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}
