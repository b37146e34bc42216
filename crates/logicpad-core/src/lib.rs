//! Logicpad Core Types
//!
//! This crate provides the foundational types shared by the Logicpad
//! notation resolver and exercise validators. It includes:
//!
//! - **Identifiers**: String-interned identifiers for diagram nodes and links ([`identifier::Id`])
//! - **Geometry**: Layout positions and the row tolerance used to rank nodes ([`geometry`] module)
//! - **Diagram**: The diagram graph model of formula boxes, justification boxes and links ([`diagram`] module)
//! - **History**: Bounded undo/redo of whole-model snapshots ([`history::UndoHistory`])

pub mod diagram;
pub mod geometry;
pub mod history;
pub mod identifier;
