//! Flattening of nested category counts into the parallel id/label/parent
//! arrays consumed by treemap and sunburst traces.

use serde_json::{Map, Value};

/// Flattened tree in depth-first pre-order: every non-root's parent id
/// appears earlier in the arrays, which the renderer requires.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatHierarchy {
    /// Dash-joined path, unique per node.
    pub ids: Vec<String>,
    /// Last path segment.
    pub labels: Vec<String>,
    /// Dash-joined parent path, `""` for roots.
    pub parents: Vec<String>,
    /// Aligned with `ids`: `Some` at numeric leaves, `None` at branches
    /// (branch totals are aggregated by the renderer via `branchvalues`).
    pub values: Vec<Option<f64>>,
}

impl FlatHierarchy {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Nesting level per node, roots at 0, counted from the parent path.
    pub fn depths(&self) -> Vec<usize> {
        self.parents
            .iter()
            .map(|p| if p.is_empty() { 0 } else { p.split('-').count() })
            .collect()
    }

    /// Deepest parent segment count; at least 1 so depth ratios stay finite
    /// for flat trees.
    pub fn max_depth(&self) -> usize {
        self.parents
            .iter()
            .map(|p| p.split('-').count())
            .max()
            .unwrap_or(1)
    }
}

/// Flatten a nested mapping depth-first in insertion order. An object value
/// makes a branch node; any scalar makes a leaf, carrying its value when
/// numeric.
pub fn flatten(tree: &Map<String, Value>) -> FlatHierarchy {
    let mut flat = FlatHierarchy::default();
    walk(tree, &mut Vec::new(), &mut flat);
    flat
}

fn walk(tree: &Map<String, Value>, path: &mut Vec<String>, out: &mut FlatHierarchy) {
    for (key, val) in tree {
        path.push(key.clone());
        out.ids.push(path.join("-"));
        out.labels.push(key.clone());
        out.parents.push(path[..path.len() - 1].join("-"));

        match val {
            Value::Object(children) => {
                out.values.push(None);
                walk(children, path, out);
            }
            leaf => out.values.push(leaf.as_f64()),
        }
        path.pop();
    }
}
