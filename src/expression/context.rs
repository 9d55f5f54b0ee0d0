use std::collections::{BTreeMap, BTreeSet};

use crate::expression::ast::Expr;

/// Index of an expression inside a [`Context`]. Ids grow in bind order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ExprId(pub u32);

#[derive(Clone, Debug)]
struct Entry {
    expr: Expr,
    label: Option<String>,
    /// Names referenced by `expr`, with the binding each one had when `expr` was added.
    /// `None` means the name was unbound then and is looked up when evaluated.
    refs: BTreeMap<String, Option<ExprId>>,
}

/// Symbol table plus the reverse dependency index for one diagram evaluation.
///
/// Labels are unique: binding a name again shadows the earlier expression, which keeps its id
/// but loses its label and its dependency edges. Expressions that referenced the old binding keep
/// pointing at it.
#[derive(Clone, Debug, Default)]
pub struct Context {
    entries: Vec<Entry>,
    bindings: BTreeMap<String, ExprId>,
    dependents: BTreeMap<String, BTreeSet<ExprId>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `label` to `expr`, replacing any earlier binding of that name.
    pub fn bind(&mut self, label: impl Into<String>, expr: Expr) -> ExprId {
        let label = label.into();
        let id = self.insert(expr, Some(label.clone()));
        if let Some(old) = self.bindings.insert(label.clone(), id) {
            tracing::debug!(label = %label, old = old.0, new = id.0, "rebinding label");
            self.entries[old.0 as usize].label = None;
            self.drop_edges_from(old);
            // Readers that captured the old binding now hang off an unlabeled expression;
            // late-bound readers follow the new one.
            if let Some(set) = self.dependents.get_mut(&label) {
                let entries = &self.entries;
                set.retain(|d| entries[d.0 as usize].refs.get(&label) != Some(&Some(old)));
                if set.is_empty() {
                    self.dependents.remove(&label);
                }
            }
        }
        self.add_edges_from(id);
        id
    }

    /// Add an unlabeled expression.
    pub fn push(&mut self, expr: Expr) -> ExprId {
        let id = self.insert(expr, None);
        self.add_edges_from(id);
        id
    }

    fn insert(&mut self, expr: Expr, label: Option<String>) -> ExprId {
        let id = ExprId(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        let refs = expr
            .references()
            .into_iter()
            .map(|name| {
                let bound = self.bindings.get(&name).copied();
                (name, bound)
            })
            .collect();
        self.entries.push(Entry { expr, label, refs });
        id
    }

    fn add_edges_from(&mut self, id: ExprId) {
        let entry = &self.entries[id.0 as usize];
        let own = entry.label.clone();
        let names: Vec<String> = entry
            .refs
            .keys()
            .filter(|n| Some(n.as_str()) != own.as_deref())
            .cloned()
            .collect();
        for name in names {
            self.dependents.entry(name).or_default().insert(id);
        }
    }

    fn drop_edges_from(&mut self, id: ExprId) {
        let names: Vec<String> = self.entries[id.0 as usize].refs.keys().cloned().collect();
        for name in names {
            if let Some(set) = self.dependents.get_mut(&name) {
                set.remove(&id);
                if set.is_empty() {
                    self.dependents.remove(&name);
                }
            }
        }
    }

    /// Current binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<ExprId> {
        self.bindings.get(name).copied()
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.entries.get(id.0 as usize).map(|e| &e.expr)
    }

    /// Current label of `id`; `None` when unlabeled or shadowed.
    pub fn label(&self, id: ExprId) -> Option<&str> {
        self.entries.get(id.0 as usize)?.label.as_deref()
    }

    /// Expressions that directly reference `name`. No transitive closure.
    pub fn get_dependents(&self, name: &str) -> BTreeSet<ExprId> {
        self.dependents.get(name).cloned().unwrap_or_default()
    }

    /// Names referenced by `id`.
    pub fn references(&self, id: ExprId) -> impl Iterator<Item = &str> {
        self.entries
            .get(id.0 as usize)
            .into_iter()
            .flat_map(|e| e.refs.keys().map(String::as_str))
    }

    /// The expression `name` means inside `id`: the binding captured when `id` was added, or
    /// the current binding for names that were unbound then.
    pub fn resolve_ref(&self, id: ExprId, name: &str) -> Option<ExprId> {
        let entry = self.entries.get(id.0 as usize)?;
        match entry.refs.get(name) {
            Some(Some(captured)) => Some(*captured),
            Some(None) => self.lookup(name),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label or a stable placeholder, for diagnostics.
    pub(crate) fn display_name(&self, id: ExprId) -> String {
        match self.label(id) {
            Some(l) => l.to_owned(),
            None => format!("<expr {}>", id.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/context.rs"]
mod tests;
