// SPDX-License-Identifier: MIT OR Apache-2.0
//! Linear undo/redo log of user-visible edits.

use crate::graph::{Graph, GraphError};
use crate::interaction::SelectionChange;
use std::collections::VecDeque;
use thiserror::Error;

/// Maximum undo history depth
const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("nothing to redo")]
    NothingToRedo,

    /// Replaying a command failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A reversible user-visible edit.
///
/// Commands are pushed onto the log *already applied*; `redo` runs only
/// when replaying. A command receives the graph alone, never the log,
/// so a replay cannot push re-entrantly.
pub trait Command {
    /// Human-readable description, e.g. for menu entries.
    fn description(&self) -> &str;

    /// Re-apply the edit.
    fn redo(&self, graph: &mut Graph) -> Result<(), GraphError>;

    /// Reverse the edit.
    fn undo(&self, graph: &mut Graph) -> Result<(), GraphError>;
}

/// The selection diff of one gesture, as a replayable command.
#[derive(Debug)]
pub struct SelectionChangeCommand {
    change: SelectionChange,
}

impl SelectionChangeCommand {
    /// Wrap a gesture's selection diff.
    pub fn new(change: SelectionChange) -> Self {
        Self { change }
    }
}

impl Command for SelectionChangeCommand {
    fn description(&self) -> &str {
        "selection change"
    }

    fn redo(&self, graph: &mut Graph) -> Result<(), GraphError> {
        for &id in &self.change.deselected {
            graph.deselect(id)?;
        }
        for &id in &self.change.selected {
            graph.select(id, false)?;
        }
        Ok(())
    }

    fn undo(&self, graph: &mut Graph) -> Result<(), GraphError> {
        for &id in &self.change.selected {
            graph.deselect(id)?;
        }
        for &id in &self.change.deselected {
            graph.select(id, false)?;
        }
        Ok(())
    }
}

/// Linear undo/redo history with a cursor.
///
/// Appending after undos discards the redoable tail: redo is only
/// available for the most recently undone run, not after a new edit.
pub struct CommandLog {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: VecDeque<Box<dyn Command>>,
    max_depth: usize,
}

impl CommandLog {
    /// Create a log with the default depth cap.
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create a log with a custom depth cap.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
        }
    }

    /// Append an *already applied* command. The command is not
    /// re-executed; any redoable tail is discarded.
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Reverse the most recent edit.
    ///
    /// On failure the command stays at the top of the undo stack.
    pub fn undo(&mut self, graph: &mut Graph) -> Result<(), HistoryError> {
        let command = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToUndo)?;
        if let Err(err) = command.undo(graph) {
            self.undo_stack.push_back(command);
            return Err(err.into());
        }
        self.redo_stack.push_back(command);
        Ok(())
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, graph: &mut Graph) -> Result<(), HistoryError> {
        let command = self
            .redo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToRedo)?;
        if let Err(err) = command.redo(graph) {
            self.redo_stack.push_back(command);
            return Err(err.into());
        }
        self.undo_stack.push_back(command);
        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the next undo, if any.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Description of the next redo, if any.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|c| c.description())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new()
    }
}
