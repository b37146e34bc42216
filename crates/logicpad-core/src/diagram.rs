//! The diagram graph model.
//!
//! A [`Diagram`] is the snapshot handed over by the diagram editor: formula
//! boxes and justification boxes placed on a canvas, plus undirected links
//! between formula boxes. The model stores positions only; ranks, parent and
//! child relations are inferred by the validators on every check.

use std::collections::HashSet;

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geometry::Point, identifier::Id};

/// Errors raised while editing a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("an element with id `{0}` already exists")]
    DuplicateId(Id),

    #[error("no node with id `{0}`")]
    UnknownNode(Id),

    #[error("node `{0}` is not a formula box")]
    NotAFormulaBox(Id),
}

/// Visual marks a student can attach to a formula box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Checkmark,
    Cross,
    Underline,
    Circle,
}

/// A box holding a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaBox {
    pub id: Id,
    pub position: Point,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default)]
    pub link_ids: Vec<Id>,
    /// Explicit rank, when the editor records one.
    #[serde(default)]
    pub row: Option<u32>,
}

impl FormulaBox {
    pub fn new(id: impl Into<Id>, position: Point, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            text: text.into(),
            decorations: Vec::new(),
            link_ids: Vec::new(),
            row: None,
        }
    }

    pub fn with_row(mut self, row: u32) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }
}

/// A box citing the rules that justify the formulas of its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JustificationBox {
    pub id: Id,
    pub position: Point,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub row: Option<u32>,
}

impl JustificationBox {
    pub fn new(id: impl Into<Id>, position: Point, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            text: text.into(),
            row: None,
        }
    }

    pub fn with_row(mut self, row: u32) -> Self {
        self.row = Some(row);
        self
    }
}

/// A node placed on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramNode {
    Formula(FormulaBox),
    Justification(JustificationBox),
}

impl DiagramNode {
    pub fn id(&self) -> Id {
        match self {
            DiagramNode::Formula(b) => b.id,
            DiagramNode::Justification(b) => b.id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            DiagramNode::Formula(b) => b.position,
            DiagramNode::Justification(b) => b.position,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DiagramNode::Formula(b) => &b.text,
            DiagramNode::Justification(b) => &b.text,
        }
    }

    /// Returns the explicit row index, if the editor recorded one.
    pub fn row(&self) -> Option<u32> {
        match self {
            DiagramNode::Formula(b) => b.row,
            DiagramNode::Justification(b) => b.row,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, DiagramNode::Formula(_))
    }

    pub fn is_justification(&self) -> bool {
        matches!(self, DiagramNode::Justification(_))
    }

    fn set_position(&mut self, position: Point) {
        match self {
            DiagramNode::Formula(b) => b.position = position,
            DiagramNode::Justification(b) => b.position = position,
        }
    }
}

impl From<FormulaBox> for DiagramNode {
    fn from(node: FormulaBox) -> Self {
        DiagramNode::Formula(node)
    }
}

impl From<JustificationBox> for DiagramNode {
    fn from(node: JustificationBox) -> Self {
        DiagramNode::Justification(node)
    }
}

/// An undirected link between two formula boxes.
///
/// The names `source` and `target` only record how the link was drawn;
/// direction is inferred from the rows of the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramLink {
    pub id: Id,
    pub source: Id,
    pub target: Id,
}

impl DiagramLink {
    pub fn new(id: impl Into<Id>, source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns `true` if `node` is one of the endpoints.
    pub fn touches(&self, node: Id) -> bool {
        self.source == node || self.target == node
    }

    /// Returns the endpoint opposite to `node`, or `None` if the link does not
    /// touch `node`.
    pub fn other_end(&self, node: Id) -> Option<Id> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Snapshot of the diagram editor's model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    nodes: Vec<DiagramNode>,
    #[serde(default)]
    links: Vec<DiagramLink>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a diagram from already-constructed parts without checking them.
    ///
    /// Validators treat dangling references in such diagrams as an
    /// internal-consistency fault rather than failing here.
    pub fn from_parts(nodes: Vec<DiagramNode>, links: Vec<DiagramLink>) -> Self {
        Self { nodes, links }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[DiagramLink] {
        &self.links
    }

    pub fn node(&self, id: Id) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn link(&self, id: Id) -> Option<&DiagramLink> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn formula_boxes(&self) -> impl Iterator<Item = &FormulaBox> {
        self.nodes.iter().filter_map(|node| match node {
            DiagramNode::Formula(b) => Some(b),
            DiagramNode::Justification(_) => None,
        })
    }

    pub fn justification_boxes(&self) -> impl Iterator<Item = &JustificationBox> {
        self.nodes.iter().filter_map(|node| match node {
            DiagramNode::Justification(b) => Some(b),
            DiagramNode::Formula(_) => None,
        })
    }

    /// Returns all links with `node` as one endpoint.
    pub fn links_touching(&self, node: Id) -> impl Iterator<Item = &DiagramLink> {
        self.links.iter().filter(move |link| link.touches(node))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateId`] if a node or link already uses the id.
    pub fn add_node(&mut self, node: impl Into<DiagramNode>) -> Result<(), DiagramError> {
        let node = node.into();
        let id = node.id();
        if self.contains_id(id) {
            return Err(DiagramError::DuplicateId(id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Links two formula boxes and records the link id on both of them.
    ///
    /// # Errors
    ///
    /// Fails if the link id is taken, or either endpoint is missing or is not a
    /// formula box.
    pub fn add_link(&mut self, link: DiagramLink) -> Result<(), DiagramError> {
        if self.contains_id(link.id) {
            return Err(DiagramError::DuplicateId(link.id));
        }
        for endpoint in [link.source, link.target] {
            match self.node(endpoint) {
                Some(DiagramNode::Formula(_)) => {}
                Some(DiagramNode::Justification(_)) => {
                    return Err(DiagramError::NotAFormulaBox(endpoint));
                }
                None => return Err(DiagramError::UnknownNode(endpoint)),
            }
        }

        let endpoints: HashSet<Id> = [link.source, link.target].into_iter().collect();
        for node in &mut self.nodes {
            if let DiagramNode::Formula(b) = node {
                if endpoints.contains(&b.id) {
                    b.link_ids.push(link.id);
                }
            }
        }
        trace!(link:? = link; "Link added");
        self.links.push(link);
        Ok(())
    }

    /// Removes a link and forgets it on its endpoints. Returns the removed link.
    pub fn remove_link(&mut self, id: Id) -> Option<DiagramLink> {
        let index = self.links.iter().position(|link| link.id == id)?;
        let link = self.links.remove(index);
        for node in &mut self.nodes {
            if let DiagramNode::Formula(b) = node {
                b.link_ids.retain(|link_id| *link_id != id);
            }
        }
        Some(link)
    }

    /// Moves a node to a new position, as a drag does.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownNode`] if there is no such node.
    pub fn move_node(&mut self, id: Id, position: Point) -> Result<(), DiagramError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id() == id)
            .ok_or(DiagramError::UnknownNode(id))?;
        node.set_position(position);
        Ok(())
    }

    fn contains_id(&self, id: Id) -> bool {
        self.node(id).is_some() || self.link(id).is_some()
    }
}
