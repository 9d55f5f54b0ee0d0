use std::collections::{BTreeMap, BTreeSet};

use crate::expression::context::{Context, ExprId};
use crate::foundation::error::{GeoError, GeoResult};

/// All transitive dependents of `name`, ordered so that every expression comes after the
/// expressions whose labels it references.
///
/// Ties break on [`ExprId`], i.e. bind order. Fails with [`GeoError::DependencyCycle`] naming the
/// expressions that could not be ordered.
#[tracing::instrument(skip(ctx))]
pub fn ordered_dependents(ctx: &Context, name: &str) -> GeoResult<Vec<ExprId>> {
    let collected = collect_transitive(ctx, name);

    // Edges restricted to the collected set: producer -> consumers.
    let by_label: BTreeMap<&str, ExprId> = collected
        .iter()
        .filter_map(|&id| ctx.label(id).map(|l| (l, id)))
        .collect();
    let mut indeg: BTreeMap<ExprId, u32> = collected.iter().map(|&id| (id, 0)).collect();
    let mut outs: BTreeMap<ExprId, Vec<ExprId>> = BTreeMap::new();
    for &id in &collected {
        for r in ctx.references(id) {
            let Some(&producer) = by_label.get(r) else {
                continue;
            };
            if producer == id || ctx.resolve_ref(id, r) != Some(producer) {
                continue;
            }
            outs.entry(producer).or_default().push(id);
            if let Some(d) = indeg.get_mut(&id) {
                *d += 1;
            }
        }
    }

    // Kahn with deterministic tie-break on ExprId.
    let mut ready: BTreeSet<ExprId> = indeg
        .iter()
        .filter(|&(_, &d)| d == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(collected.len());
    while let Some(id) = ready.pop_first() {
        order.push(id);
        for &j in outs.get(&id).map(Vec::as_slice).unwrap_or_default() {
            if let Some(dj) = indeg.get_mut(&j) {
                *dj = dj.saturating_sub(1);
                if *dj == 0 {
                    ready.insert(j);
                }
            }
        }
    }

    if order.len() != collected.len() {
        let placed: BTreeSet<ExprId> = order.iter().copied().collect();
        let stuck = collected
            .iter()
            .filter(|id| !placed.contains(id))
            .map(|&id| ctx.display_name(id));
        return Err(GeoError::dependency_cycle(stuck));
    }

    tracing::debug!(count = order.len(), "ordered dependents");
    Ok(order)
}

/// Breadth-first closure over `get_dependents`, following each new expression's label.
fn collect_transitive(ctx: &Context, name: &str) -> BTreeSet<ExprId> {
    let mut collected = BTreeSet::new();
    let mut queue: Vec<ExprId> = ctx.get_dependents(name).into_iter().collect();
    while let Some(id) = queue.pop() {
        if !collected.insert(id) {
            continue;
        }
        if let Some(label) = ctx.label(id) {
            queue.extend(
                ctx.get_dependents(label)
                    .into_iter()
                    .filter(|d| !collected.contains(d)),
            );
        }
    }
    collected
}

#[cfg(test)]
#[path = "../../tests/unit/expression/deps.rs"]
mod tests;
