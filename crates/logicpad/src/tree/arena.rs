//! Parent/child structure of a formula tree.
//!
//! Built fresh for each check and dropped afterwards. Direction comes from
//! rows: the endpoint on the lower row is the child.

use std::{cmp::Ordering, collections::HashMap};

use logicpad_core::{diagram::Diagram, identifier::Id};

use super::rows::Rows;

#[derive(Debug)]
pub(super) struct TreeNode {
    pub id: Id,
    pub parents: Vec<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug)]
pub(super) struct TreeArena {
    nodes: Vec<TreeNode>,
    index: HashMap<Id, usize>,
}

impl TreeArena {
    /// Builds the arena from every formula box, bottom row first.
    ///
    /// # Errors
    ///
    /// Returns the two endpoints of the first link that joins nodes on the
    /// same row.
    pub fn build(diagram: &Diagram, rows: &Rows<'_>) -> Result<Self, (Id, Id)> {
        let ordered: Vec<Id> = rows.iter().flat_map(|row| row.formula_ids()).collect();
        let index: HashMap<Id, usize> = ordered
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        let mut nodes: Vec<TreeNode> = ordered
            .iter()
            .map(|id| TreeNode {
                id: *id,
                parents: Vec::new(),
                children: Vec::new(),
            })
            .collect();

        for node in &mut nodes {
            for link in diagram.links_touching(node.id) {
                let Some(other) = link.other_end(node.id) else {
                    continue;
                };
                let Some(&other_idx) = index.get(&other) else {
                    continue;
                };
                match rows.compare(other, node.id) {
                    Some(Ordering::Less) => node.children.push(other_idx),
                    Some(Ordering::Greater) => node.parents.push(other_idx),
                    Some(Ordering::Equal) => return Err((node.id, other)),
                    None => {}
                }
            }
        }

        Ok(Self { nodes, index })
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn get(&self, id: Id) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Marks every node reachable from `root` by following parent edges.
    pub fn ancestors(&self, root: usize) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if current >= seen.len() || seen[current] {
                continue;
            }
            seen[current] = true;
            stack.extend(self.nodes[current].parents.iter().copied());
        }
        seen
    }
}
