//! Row assignment.
//!
//! Row 0 is the bottom row: layout y grows upward. In position mode nodes are
//! sorted by y and a node joins the current row when it lies within the row
//! tolerance of the row's first node; otherwise it starts a new row. In
//! explicit mode the row index each node carries is used directly. Nodes in a
//! row are ordered left to right.

use std::{cmp::Ordering, collections::HashMap};

use log::debug;

use logicpad_core::{
    diagram::{Diagram, DiagramNode, FormulaBox, JustificationBox},
    geometry::RowTolerance,
    identifier::Id,
};

use crate::config::{RowMode, TreeConfig};

/// Nodes sharing one structural rank.
#[derive(Debug, Default)]
pub(super) struct Row<'d> {
    pub index: usize,
    pub formulas: Vec<&'d FormulaBox>,
    pub justifications: Vec<&'d JustificationBox>,
}

impl<'d> Row<'d> {
    pub fn formula_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.formulas.iter().map(|f| f.id)
    }

    pub fn justification_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.justifications.iter().map(|j| j.id)
    }

    fn push(&mut self, node: &'d DiagramNode) {
        match node {
            DiagramNode::Formula(f) => self.formulas.push(f),
            DiagramNode::Justification(j) => self.justifications.push(j),
        }
    }

    fn sort_by_x(&mut self) {
        self.formulas
            .sort_by(|a, b| a.position.x().total_cmp(&b.position.x()));
        self.justifications
            .sort_by(|a, b| a.position.x().total_cmp(&b.position.x()));
    }
}

/// All rows of a diagram, bottom first.
#[derive(Debug)]
pub(super) struct Rows<'d> {
    rows: Vec<Row<'d>>,
    ranks: HashMap<Id, usize>,
}

impl<'d> Rows<'d> {
    /// Assigns every node of `diagram` to a row.
    ///
    /// Returns `None` in explicit mode when some node carries no row index.
    pub fn assign(diagram: &'d Diagram, config: &TreeConfig) -> Option<Self> {
        let all_explicit = diagram.nodes().iter().all(|node| node.row().is_some());
        let rows = match config.row_mode() {
            RowMode::Position => Self::by_position(diagram, config.row_tolerance()),
            RowMode::Explicit if all_explicit => Self::by_index(diagram),
            RowMode::Explicit => return None,
            RowMode::Auto if all_explicit => Self::by_index(diagram),
            RowMode::Auto => Self::by_position(diagram, config.row_tolerance()),
        };
        debug!(rows = rows.rows.len(), explicit = all_explicit; "Rows assigned");
        Some(rows)
    }

    fn by_position(diagram: &'d Diagram, tolerance: RowTolerance) -> Self {
        let mut nodes: Vec<&DiagramNode> = diagram.nodes().iter().collect();
        nodes.sort_by(|a, b| a.position().y().total_cmp(&b.position().y()));

        let mut rows: Vec<Row<'d>> = Vec::new();
        let mut anchor_y = f32::NEG_INFINITY;
        for node in nodes {
            let y = node.position().y();
            if rows.is_empty() || !tolerance.same_row(anchor_y, y) {
                anchor_y = y;
                rows.push(Row {
                    index: rows.len(),
                    ..Row::default()
                });
            }
            if let Some(row) = rows.last_mut() {
                row.push(node);
            }
        }

        Self::finish(rows)
    }

    fn by_index(diagram: &'d Diagram) -> Self {
        let mut indices: Vec<u32> = diagram.nodes().iter().filter_map(|n| n.row()).collect();
        indices.sort_unstable();
        indices.dedup();

        let mut rows: Vec<Row<'d>> = (0..indices.len())
            .map(|index| Row {
                index,
                ..Row::default()
            })
            .collect();
        for node in diagram.nodes() {
            let slot = node
                .row()
                .and_then(|explicit| indices.binary_search(&explicit).ok());
            if let Some(row) = slot.and_then(|slot| rows.get_mut(slot)) {
                row.push(node);
            }
        }

        Self::finish(rows)
    }

    fn finish(mut rows: Vec<Row<'d>>) -> Self {
        let mut ranks = HashMap::new();
        for row in &mut rows {
            row.sort_by_x();
            ranks.extend(row.formula_ids().map(|id| (id, row.index)));
            ranks.extend(row.justification_ids().map(|id| (id, row.index)));
        }
        Self { rows, ranks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row<'d>> {
        self.rows.iter()
    }

    /// The root row: the lowest row holding a formula box.
    pub fn bottom(&self) -> Option<&Row<'d>> {
        self.rows.iter().find(|row| !row.formulas.is_empty())
    }

    pub fn row_of(&self, id: Id) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    /// Orders node `a` relative to node `b` by row: `Less` when `a` sits on a
    /// lower row. `None` if either node has no row.
    pub fn compare(&self, a: Id, b: Id) -> Option<Ordering> {
        Some(self.row_of(a)?.cmp(&self.row_of(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicpad_core::geometry::Point;

    fn formula(id: &str, x: f32, y: f32) -> DiagramNode {
        FormulaBox::new(id, Point::new(x, y), id).into()
    }

    fn justification(id: &str, x: f32, y: f32) -> DiagramNode {
        JustificationBox::new(id, Point::new(x, y), "").into()
    }

    fn position_config() -> TreeConfig {
        TreeConfig::new(RowTolerance::default(), RowMode::Position, false)
    }

    #[test]
    fn test_clusters_by_y() {
        let diagram = Diagram::from_parts(
            vec![
                formula("top", 0.0, 100.0),
                formula("root", 0.0, 0.0),
                justification("j", 200.0, 104.0),
                formula("top-left", -50.0, 96.0),
            ],
            vec![],
        );
        let rows = Rows::assign(&diagram, &position_config()).unwrap();
        let rows: Vec<_> = rows.iter().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].formula_ids().collect::<Vec<_>>(), vec![Id::new("root")]);
        assert_eq!(
            rows[1].formula_ids().collect::<Vec<_>>(),
            vec![Id::new("top-left"), Id::new("top")]
        );
        assert_eq!(rows[1].justification_ids().count(), 1);
    }

    #[test]
    fn test_anchor_is_first_node_of_row() {
        // 0 -> 8 joins, 16 is more than 10 from the anchor and starts a row.
        let diagram = Diagram::from_parts(
            vec![
                formula("a", 0.0, 0.0),
                formula("b", 0.0, 8.0),
                formula("c", 0.0, 16.0),
            ],
            vec![],
        );
        let rows = Rows::assign(&diagram, &position_config()).unwrap();
        assert_eq!(rows.row_of(Id::new("b")), Some(0));
        assert_eq!(rows.row_of(Id::new("c")), Some(1));
    }

    #[test]
    fn test_explicit_rows() {
        let diagram = Diagram::from_parts(
            vec![
                FormulaBox::new("low", Point::new(0.0, 500.0), "").with_row(2).into(),
                FormulaBox::new("high", Point::new(0.0, 0.0), "").with_row(7).into(),
                JustificationBox::new("j", Point::new(0.0, 3.0), "").with_row(7).into(),
            ],
            vec![],
        );
        let rows = Rows::assign(&diagram, &TreeConfig::default()).unwrap();
        assert_eq!(rows.row_of(Id::new("low")), Some(0));
        assert_eq!(rows.row_of(Id::new("high")), Some(1));
        assert_eq!(
            rows.compare(Id::new("low"), Id::new("high")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_explicit_mode_needs_every_row() {
        let diagram = Diagram::from_parts(
            vec![
                FormulaBox::new("a", Point::new(0.0, 0.0), "").with_row(0).into(),
                formula("b", 0.0, 50.0),
            ],
            vec![],
        );
        let explicit = TreeConfig::new(RowTolerance::default(), RowMode::Explicit, false);
        assert!(Rows::assign(&diagram, &explicit).is_none());

        // Auto mode falls back to positions.
        let rows = Rows::assign(&diagram, &TreeConfig::default()).unwrap();
        assert_eq!(rows.row_of(Id::new("b")), Some(1));
    }

    #[test]
    fn test_compare_follows_rows_not_distance() {
        // Rows are {j0, r} and {c, j1}: c is 6 above r but on the next row.
        let diagram = Diagram::from_parts(
            vec![
                justification("j0", 300.0, 0.0),
                formula("r", 0.0, 9.0),
                formula("c", 0.0, 15.0),
                justification("j1", 300.0, 15.0),
            ],
            vec![],
        );
        let rows = Rows::assign(&diagram, &position_config()).unwrap();
        assert_eq!(rows.row_of(Id::new("r")), Some(0));
        assert_eq!(rows.row_of(Id::new("c")), Some(1));
        assert_eq!(
            rows.compare(Id::new("c"), Id::new("r")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_bottom_skips_justification_only_rows() {
        let diagram = Diagram::from_parts(
            vec![justification("j0", 300.0, -50.0), formula("r", 0.0, 0.0)],
            vec![],
        );
        let rows = Rows::assign(&diagram, &position_config()).unwrap();
        let bottom = rows.bottom().unwrap();
        assert_eq!(bottom.index, 1);
        assert_eq!(bottom.formula_ids().collect::<Vec<_>>(), vec![Id::new("r")]);
    }
}
