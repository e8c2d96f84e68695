//! Delegation tree flattening.
//!
//! The cloud surface returns tokens as a parent/child delegation tree; the
//! gateway returns a flat list. Flattening converts the former into the
//! latter so every downstream consumer renders one shape.

use crate::error::ApiError;
use crate::model::Token;

/// Upper bound on nodes in one listing. JSON cannot encode cycles, but a
/// hostile or buggy server can still send an enormous tree; past this bound
/// we fail instead of exhausting memory.
pub const MAX_TREE_NODES: usize = 10_000;

/// Flatten a forest of tokens into pre-order: each parent immediately
/// before its children, depth-first, left-to-right, every node exactly
/// once. Emitted nodes have `children` cleared and `depth` set, so
/// flattening an already-flat list is a no-op and the operation is
/// idempotent.
///
/// # Errors
/// Returns [`ApiError::MalformedResponse`] when the tree exceeds
/// [`MAX_TREE_NODES`].
pub fn flatten(roots: Vec<Token>) -> Result<Vec<Token>, ApiError> {
    let mut out = Vec::with_capacity(roots.len());
    // Iterative worklist; recursion depth is server-controlled.
    let mut stack: Vec<Token> = roots.into_iter().rev().collect();

    while let Some(mut node) = stack.pop() {
        if out.len() >= MAX_TREE_NODES {
            return Err(ApiError::MalformedResponse(format!(
                "token tree exceeds {MAX_TREE_NODES} nodes"
            )));
        }
        let children = std::mem::take(&mut node.children);
        for mut child in children.into_iter().rev() {
            child.depth = node.depth + 1;
            if child.parent_id.is_none() && !node.id.is_empty() {
                child.parent_id = Some(node.id.clone());
            }
            stack.push(child);
        }
        out.push(node);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str, children: Vec<Token>) -> Token {
        Token {
            id: id.to_string(),
            name: id.to_string(),
            children,
            ..Token::default()
        }
    }

    #[test]
    fn test_preorder_parent_before_children() {
        let roots = vec![
            token("a", vec![token("a1", vec![token("a1x", vec![])]), token("a2", vec![])]),
            token("b", vec![]),
        ];

        let flat = flatten(roots).unwrap();
        let ids: Vec<&str> = flat.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b"]);

        let depths: Vec<usize> = flat.iter().map(|t| t.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);

        // Lineage filled in from the tree structure
        assert_eq!(flat[1].parent_id.as_deref(), Some("a"));
        assert_eq!(flat[2].parent_id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let roots = vec![token("a", vec![token("a1", vec![]), token("a2", vec![])])];
        let once = flatten(roots).unwrap();
        let twice = flatten(once.clone()).unwrap();
        assert_eq!(once, twice);

        // Already-flat input is also a fixed point
        let flat = vec![token("x", vec![]), token("y", vec![])];
        assert_eq!(flatten(flat.clone()).unwrap(), flat);
    }

    #[test]
    fn test_runaway_tree_is_rejected() {
        // A single long chain past the bound
        let mut node = token("leaf", vec![]);
        for i in 0..=MAX_TREE_NODES {
            node = token(&format!("n{i}"), vec![node]);
        }
        let err = flatten(vec![node]).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));

        // Wide trees hit the same bound
        let wide: Vec<Token> = (0..=MAX_TREE_NODES).map(|i| token(&format!("w{i}"), vec![])).collect();
        assert!(flatten(wide).is_err());
    }

    #[test]
    fn test_exactly_at_bound_is_accepted() {
        let ok: Vec<Token> = (0..MAX_TREE_NODES).map(|i| token(&format!("t{i}"), vec![])).collect();
        assert_eq!(flatten(ok).unwrap().len(), MAX_TREE_NODES);
    }
}
