//! Merging independent scope factories into one.
//!
//! Composition is what lets a single opaque [`Scope`](crate::Scope) value
//! satisfy several unrelated families at once: the combined factory resolves
//! every input factory against the same external scope and folds the
//! per-family sequences into one mapping. Earlier factories win for a given
//! scope name; genuinely contested names are rejected up front.

use std::collections::BTreeMap;

use crate::errors::ContextError;
use crate::scope::ScopeFactory;

/// Combine several scope factories into one.
///
/// The first factory is the base: the combined factory keeps its scope name,
/// so composed factories can themselves be composed again (composition is
/// associative in the resulting mapping). A single input is returned
/// unchanged.
///
/// Two inputs claiming the same scope name from different registries is a
/// configuration defect and fails here, before anything renders. The same
/// family reached twice through one registry (a diamond dependency) is
/// legal: every path resolves to the identical sequence.
pub fn compose_context_scopes(
    factories: &[ScopeFactory],
) -> Result<ScopeFactory, ContextError> {
    let base = factories
        .first()
        .expect("compose_context_scopes requires at least one factory");
    if factories.len() == 1 {
        return Ok(base.clone());
    }

    let mut contributions: BTreeMap<&'static str, u64> = BTreeMap::new();
    for factory in factories {
        for (&scope, &registry_id) in factory.contributions() {
            match contributions.get(scope) {
                Some(&existing) if existing != registry_id => {
                    return Err(ContextError::AmbiguousScope { scope });
                }
                Some(_) => {}
                None => {
                    contributions.insert(scope, registry_id);
                }
            }
        }
    }
    log::debug!(
        "composed scope `{}` over {:?}",
        base.scope_name(),
        contributions.keys()
    );

    Ok(ScopeFactory::composed(
        base.scope_name(),
        contributions,
        factories.to_vec(),
    ))
}
