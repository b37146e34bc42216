//! Formula tree validation.
//!
//! A formula tree is drawn bottom-up: the formula being analyzed sits alone
//! on the bottom row and each row above breaks the formulas below into their
//! parts. Every row carries one justification box citing a rule for each of
//! its formulas. [`TreeValidator::check`] runs the checks in a fixed order and
//! reports the first violation:
//!
//! 1. the diagram has formula boxes and a consistent model;
//! 2. rows, bottom to top: formula boxes on the row, one justification box,
//!    no unprimed abbreviating rule, one cited rule per formula;
//! 3. no link joins two nodes of the same row;
//! 4. one node on the bottom row and no other node without a child, at most
//!    one child per node, and every node an ancestor of that root.
//!
//! The bottom row is the lowest row holding a formula box. Its justification
//! is optional unless the configuration requires it.

mod arena;
mod justification;
mod rows;

pub use justification::{JustificationScan, Rule, RuleFamily, RuleVocabulary};

use std::collections::HashSet;

use log::{debug, info, trace};

use logicpad_core::{diagram::Diagram, identifier::Id};

use crate::{
    config::TreeConfig,
    result::{ValidationResult, Violation},
};
use arena::TreeArena;
use rows::{Row, Rows};

/// Checks formula-tree diagrams.
#[derive(Debug, Clone)]
pub struct TreeValidator {
    config: TreeConfig,
    vocabulary: RuleVocabulary,
}

impl TreeValidator {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            vocabulary: RuleVocabulary::default(),
        }
    }

    /// Replaces the rules students may cite.
    pub fn with_vocabulary(mut self, vocabulary: RuleVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Validates a diagram snapshot. Never mutates it.
    pub fn check(&self, diagram: &Diagram) -> ValidationResult {
        info!(
            nodes = diagram.nodes().len(),
            links = diagram.links().len();
            "Checking formula tree"
        );
        match self.evaluate(diagram) {
            Ok(()) => {
                info!("Formula tree is correct");
                ValidationResult::passed()
            }
            Err(result) => {
                info!(violation:? = result.violation(); "Formula tree rejected");
                trace!(highlight_ids:? = result.highlight_ids(); "Highlighted nodes");
                result
            }
        }
    }

    fn evaluate(&self, diagram: &Diagram) -> Result<(), ValidationResult> {
        if diagram.formula_boxes().next().is_none() {
            return Err(ValidationResult::failed(Violation::EmptyDiagram, []));
        }
        check_consistency(diagram)?;

        let rows = Rows::assign(diagram, &self.config)
            .ok_or_else(|| ValidationResult::failed(Violation::InconsistentModel, []))?;
        let root_row = rows.bottom().map(|row| row.index);
        for row in rows.iter() {
            self.check_row(row, root_row == Some(row.index))?;
        }
        debug!("Justifications accepted");

        let arena = TreeArena::build(diagram, &rows)
            .map_err(|(a, b)| ValidationResult::failed(Violation::SameRowLink, [a, b]))?;

        let root = single_root(&rows, &arena)?;
        check_children(&arena)?;
        check_connected(&arena, root)
    }

    fn check_row(&self, row: &Row<'_>, is_root: bool) -> Result<(), ValidationResult> {
        trace!(row = row.index, formulas = row.formulas.len(); "Checking row");
        if row.formulas.is_empty() {
            return Err(ValidationResult::failed(
                Violation::JustificationWithoutFormulas,
                row.justification_ids(),
            ));
        }
        let justification = match row.justifications.as_slice() {
            [] if is_root && !self.config.require_root_justification() => return Ok(()),
            [] => {
                return Err(ValidationResult::failed(
                    Violation::MissingJustification,
                    row.formula_ids(),
                ));
            }
            [justification] => *justification,
            _ => {
                return Err(ValidationResult::failed(
                    Violation::DuplicateJustification,
                    row.justification_ids(),
                ));
            }
        };

        let scan = self.vocabulary.scan(&justification.text);
        if let Some(rule) = scan.missing_prime.first() {
            return Err(
                ValidationResult::failed(Violation::MissingPrime, [justification.id])
                    .with_help(format!("abbreviating rules are cited with a prime: {rule}")),
            );
        }
        if scan.recognized.len() != row.formulas.len() {
            debug!(
                row = row.index,
                cited = scan.recognized.len(),
                formulas = row.formulas.len();
                "Justification count mismatch"
            );
            return Err(ValidationResult::failed(
                Violation::JustificationCountMismatch,
                [justification.id],
            )
            .with_help(format!(
                "cite one rule for each of the {} formulas on this row",
                row.formulas.len()
            )));
        }
        Ok(())
    }
}

impl Default for TreeValidator {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

/// Rejects duplicate node ids, dangling links, self links and links that
/// touch justification boxes.
fn check_consistency(diagram: &Diagram) -> Result<(), ValidationResult> {
    let mut seen = HashSet::new();
    if let Some(node) = diagram.nodes().iter().find(|node| !seen.insert(node.id())) {
        debug!(id:% = node.id(); "Duplicate node id");
        return Err(ValidationResult::failed(
            Violation::InconsistentModel,
            [node.id()],
        ));
    }

    for link in diagram.links() {
        let endpoints_ok = link.source != link.target
            && [link.source, link.target]
                .iter()
                .all(|id| diagram.node(*id).is_some_and(|node| node.is_formula()));
        if !endpoints_ok {
            debug!(link:% = link.id; "Link endpoint is missing or not a formula box");
            return Err(ValidationResult::failed(
                Violation::InconsistentModel,
                [link.id],
            ));
        }
    }
    Ok(())
}

fn single_root(rows: &Rows<'_>, arena: &TreeArena) -> Result<usize, ValidationResult> {
    let bottom: Vec<Id> = rows
        .bottom()
        .map(|row| row.formula_ids().collect())
        .unwrap_or_default();
    let [root] = bottom[..] else {
        return Err(ValidationResult::failed(Violation::MultipleRoots, bottom));
    };

    let childless: Vec<Id> = arena
        .nodes()
        .iter()
        .filter(|node| node.children.is_empty())
        .map(|node| node.id)
        .collect();
    if childless.len() > 1 {
        debug!(count = childless.len(); "More than one node without a child");
        return Err(ValidationResult::failed(
            Violation::MultipleRoots,
            childless,
        ));
    }

    arena
        .get(root)
        .ok_or_else(|| ValidationResult::failed(Violation::InconsistentModel, [root]))
}

fn check_children(arena: &TreeArena) -> Result<(), ValidationResult> {
    let offenders: Vec<Id> = arena
        .nodes()
        .iter()
        .filter(|node| node.children.len() > 1)
        .map(|node| node.id)
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(ValidationResult::failed(
            Violation::MultipleChildren,
            offenders,
        ))
    }
}

fn check_connected(arena: &TreeArena, root: usize) -> Result<(), ValidationResult> {
    let reached = arena.ancestors(root);
    let orphans: Vec<Id> = arena
        .nodes()
        .iter()
        .zip(reached)
        .filter(|(_, reached)| !reached)
        .map(|(node, _)| node.id)
        .collect();
    if orphans.is_empty() {
        Ok(())
    } else {
        Err(ValidationResult::failed(
            Violation::DisconnectedNode,
            orphans,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowMode;
    use logicpad_core::{
        diagram::{DiagramLink, DiagramNode, FormulaBox, JustificationBox},
        geometry::{Point, RowTolerance},
    };

    fn formula(id: &str, x: f32, y: f32) -> FormulaBox {
        FormulaBox::new(id, Point::new(x, y), id)
    }

    fn justification(id: &str, y: f32, text: &str) -> JustificationBox {
        JustificationBox::new(id, Point::new(300.0, y), text)
    }

    fn diagram(
        formulas: Vec<FormulaBox>,
        justifications: Vec<JustificationBox>,
        links: &[(&str, &str)],
    ) -> Diagram {
        let mut nodes: Vec<DiagramNode> = formulas.into_iter().map(Into::into).collect();
        nodes.extend(justifications.into_iter().map(Into::into));
        let links = links
            .iter()
            .enumerate()
            .map(|(i, (s, t))| DiagramLink::new(Id::from_index(i), *s, *t))
            .collect();
        Diagram::from_parts(nodes, links)
    }

    fn violation(diagram: &Diagram) -> Option<Violation> {
        TreeValidator::default().check(diagram).violation()
    }

    #[test]
    fn test_seed_tree() {
        let d = diagram(
            vec![formula("root", 0.0, 0.0), formula("neg", 0.0, 60.0)],
            vec![justification("j1", 60.0, "FR(~)")],
            &[("neg", "root")],
        );
        let result = TreeValidator::default().check(&d);
        assert!(result.success(), "{result:?}");
    }

    #[test]
    fn test_root_justification_can_be_required() {
        let d = diagram(
            vec![formula("root", 0.0, 0.0), formula("neg", 0.0, 60.0)],
            vec![justification("j1", 60.0, "FR(~)")],
            &[("neg", "root")],
        );
        let strict = TreeValidator::new(TreeConfig::new(
            RowTolerance::default(),
            RowMode::Auto,
            true,
        ));
        let result = strict.check(&d);
        assert_eq!(result.violation(), Some(Violation::MissingJustification));
        assert_eq!(result.highlight_ids(), &[Id::new("root")]);
    }

    #[test]
    fn test_empty_and_inconsistent() {
        assert_eq!(
            violation(&Diagram::new()),
            Some(Violation::EmptyDiagram)
        );

        let dangling = diagram(vec![formula("a", 0.0, 0.0)], vec![], &[("a", "ghost")]);
        assert_eq!(violation(&dangling), Some(Violation::InconsistentModel));

        let to_justification = diagram(
            vec![formula("a", 0.0, 0.0)],
            vec![justification("j", 50.0, "")],
            &[("a", "j")],
        );
        assert_eq!(
            violation(&to_justification),
            Some(Violation::InconsistentModel)
        );

        let self_link = diagram(vec![formula("a", 0.0, 0.0)], vec![], &[("a", "a")]);
        let result = TreeValidator::default().check(&self_link);
        assert_eq!(result.message(), "Nothing to evaluate");
    }

    #[test]
    fn test_duplicate_justification() {
        let d = diagram(
            vec![formula("root", 0.0, 0.0), formula("p", 0.0, 60.0)],
            vec![
                justification("j1", 60.0, "FR(~)"),
                justification("j2", 62.0, "FR(~)"),
            ],
            &[("p", "root")],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(result.violation(), Some(Violation::DuplicateJustification));
        assert_eq!(result.highlight_ids(), &[Id::new("j1"), Id::new("j2")]);
    }

    #[test]
    fn test_missing_prime_before_count() {
        // Two formulas, one unprimed abbreviating citation: the prime is
        // reported rather than the count.
        let d = diagram(
            vec![
                formula("root", 0.0, 0.0),
                formula("l", -40.0, 60.0),
                formula("r", 40.0, 60.0),
            ],
            vec![justification("j", 60.0, "FR(∧)")],
            &[("l", "root"), ("r", "root")],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(result.violation(), Some(Violation::MissingPrime));
        assert_eq!(result.help(), Some("abbreviating rules are cited with a prime: FR'(∧)"));
    }

    #[test]
    fn test_justification_only_row() {
        let d = diagram(
            vec![formula("root", 0.0, 0.0)],
            vec![justification("j", 80.0, "FR(s)")],
            &[],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(
            result.violation(),
            Some(Violation::JustificationWithoutFormulas)
        );
        assert_eq!(result.highlight_ids(), &[Id::new("j")]);
    }

    #[test]
    fn test_justification_below_root() {
        // The empty box below the root does not take over the root row.
        let d = diagram(
            vec![formula("root", 0.0, 0.0), formula("neg", 0.0, 60.0)],
            vec![
                justification("j0", -50.0, ""),
                justification("j1", 60.0, "FR(~)"),
            ],
            &[("neg", "root")],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(
            result.violation(),
            Some(Violation::JustificationWithoutFormulas)
        );
        assert_eq!(result.highlight_ids(), &[Id::new("j0")]);

        let without = diagram(
            vec![formula("root", 0.0, 0.0), formula("neg", 0.0, 60.0)],
            vec![justification("j1", 60.0, "FR(~)")],
            &[("neg", "root")],
        );
        assert!(TreeValidator::default().check(&without).success());
    }

    #[test]
    fn test_link_direction_follows_rows() {
        // j0 anchors the bottom row at 0, so the root at 9 joins it and the
        // child at 15 starts the next row although the two are 6 apart.
        let d = diagram(
            vec![formula("root", 0.0, 9.0), formula("neg", 0.0, 15.0)],
            vec![
                justification("j0", 0.0, "FR(s)"),
                justification("j1", 15.0, "FR(~)"),
            ],
            &[("neg", "root")],
        );
        let result = TreeValidator::default().check(&d);
        assert!(result.success(), "{result:?}");
    }

    #[test]
    fn test_unlinked_boxes_on_different_rows() {
        let d = diagram(
            vec![formula("a", 0.0, 0.0), formula("b", 0.0, 60.0)],
            vec![justification("j1", 60.0, "FR(s)")],
            &[],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(result.violation(), Some(Violation::MultipleRoots));
        assert_eq!(result.highlight_ids(), &[Id::new("a"), Id::new("b")]);
    }

    #[test]
    fn test_multiple_children() {
        // One upper node linked down to two separate lower nodes.
        let d = diagram(
            vec![
                formula("root", 0.0, 0.0),
                formula("mid-a", -40.0, 60.0),
                formula("mid-b", 40.0, 60.0),
                formula("top", 0.0, 120.0),
            ],
            vec![
                justification("j1", 60.0, "FR(s) FR(s)"),
                justification("j2", 120.0, "FR(s)"),
            ],
            &[
                ("mid-a", "root"),
                ("mid-b", "root"),
                ("top", "mid-a"),
                ("top", "mid-b"),
            ],
        );
        let result = TreeValidator::default().check(&d);
        assert_eq!(result.violation(), Some(Violation::MultipleChildren));
        assert_eq!(result.highlight_ids(), &[Id::new("top")]);
    }

    #[test]
    fn test_explicit_rows_override_positions() {
        let d = diagram(
            vec![
                formula("root", 0.0, 300.0).with_row(0),
                formula("neg", 0.0, 0.0).with_row(1),
            ],
            vec![justification("j", 999.0, "FR(~)").with_row(1)],
            &[("root", "neg")],
        );
        assert!(TreeValidator::default().check(&d).success());
    }

    #[test]
    fn test_check_is_idempotent() {
        let d = diagram(
            vec![formula("a", 0.0, 0.0), formula("b", 50.0, 0.0)],
            vec![],
            &[],
        );
        let validator = TreeValidator::default();
        let before = d.clone();
        assert_eq!(validator.check(&d), validator.check(&d));
        assert_eq!(d, before);
    }
}
