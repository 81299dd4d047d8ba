//! Two-level tree assembly over flat parent/child records.
//!
//! Listing endpoints return hierarchical entities as roots with their direct
//! children attached. The assembly is a pure transformation of a flat,
//! already-sorted list; it performs no I/O and holds no state, so it is
//! unit-testable without a database fixture.

use std::collections::HashMap;
use std::hash::Hash;

/// A flat record that may reference a parent record of the same type.
pub trait TreeRecord {
    /// Identifier type shared by the record and its parent reference.
    type Id: Copy + Eq + Hash;

    /// This record's identifier.
    fn id(&self) -> Self::Id;

    /// The parent's identifier, or `None` for a root record.
    fn parent_id(&self) -> Option<Self::Id>;
}

/// A root record with its direct children attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub record: T,
    pub children: Vec<T>,
}

/// Assemble a flat sorted list into a two-level root/children view.
///
/// Roots keep their input order; each root's children keep the global input
/// order filtered down (no per-parent re-sort). A child whose parent id does
/// not match any root in the input is omitted entirely; it is neither
/// promoted to root nor reported. This matters when the input is a truncated
/// listing window that excludes the parent.
pub fn assemble<T: TreeRecord>(records: Vec<T>) -> Vec<TreeNode<T>> {
    let mut roots: Vec<TreeNode<T>> = Vec::new();
    let mut root_index: HashMap<T::Id, usize> = HashMap::new();
    let mut pending: Vec<T> = Vec::new();

    for record in records {
        if record.parent_id().is_none() {
            root_index.insert(record.id(), roots.len());
            roots.push(TreeNode {
                record,
                children: Vec::new(),
            });
        } else {
            pending.push(record);
        }
    }

    for child in pending {
        let Some(parent) = child.parent_id() else {
            continue;
        };
        if let Some(&idx) = root_index.get(&parent) {
            if let Some(node) = roots.get_mut(idx) {
                node.children.push(child);
            }
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Rec {
        id: i32,
        parent: Option<i32>,
        name: &'static str,
    }

    impl TreeRecord for Rec {
        type Id = i32;

        fn id(&self) -> i32 {
            self.id
        }

        fn parent_id(&self) -> Option<i32> {
            self.parent
        }
    }

    const fn rec(id: i32, parent: Option<i32>, name: &'static str) -> Rec {
        Rec { id, parent, name }
    }

    #[test]
    fn test_assemble_empty() {
        let tree = assemble(Vec::<Rec>::new());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_assemble_roots_only() {
        let tree = assemble(vec![rec(1, None, "a"), rec(2, None, "b")]);
        assert_eq!(tree.len(), 2);
        assert!(tree.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_assemble_groups_children_in_order() {
        // Roots [A, B] with children [a1, a2, b1]: A gets 2, B gets 1,
        // all in the original sort order.
        let tree = assemble(vec![
            rec(1, None, "A"),
            rec(2, None, "B"),
            rec(3, Some(1), "a1"),
            rec(4, Some(1), "a2"),
            rec(5, Some(2), "b1"),
        ]);

        assert_eq!(tree.len(), 2);
        let a = tree.first().expect("root A");
        let b = tree.get(1).expect("root B");
        assert_eq!(a.record.name, "A");
        assert_eq!(
            a.children.iter().map(|c| c.name).collect::<Vec<_>>(),
            ["a1", "a2"]
        );
        assert_eq!(b.record.name, "B");
        assert_eq!(
            b.children.iter().map(|c| c.name).collect::<Vec<_>>(),
            ["b1"]
        );
    }

    #[test]
    fn test_assemble_preserves_interleaved_global_order() {
        // Children interleaved with roots in the input keep their relative
        // order within each parent's children list.
        let tree = assemble(vec![
            rec(10, Some(1), "early-child"),
            rec(1, None, "A"),
            rec(11, Some(1), "late-child"),
        ]);

        let a = tree.first().expect("root A");
        assert_eq!(
            a.children.iter().map(|c| c.name).collect::<Vec<_>>(),
            ["early-child", "late-child"]
        );
    }

    #[test]
    fn test_assemble_drops_child_with_absent_parent() {
        // Parent 99 is outside the input window (e.g. a truncated listing):
        // the child is omitted, not promoted to root.
        let tree = assemble(vec![rec(1, None, "A"), rec(2, Some(99), "orphan")]);

        assert_eq!(tree.len(), 1);
        let a = tree.first().expect("root A");
        assert!(a.children.is_empty());
    }
}
