//! Free text annotations.

use eve2gns_core::{geometry::Point, record::SourcePosition};

use crate::canvas::Canvas;

/// A positioned text object.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    index: usize,
    text: String,
    position: SourcePosition,
}

impl Drawing {
    pub fn new(index: usize, text: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            index,
            text: text.into(),
            position,
        }
    }

    /// Position of the drawing among all drawings of the lab.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn source_position(&self) -> SourcePosition {
        self.position
    }

    /// Position in display coordinates, using the same transform as nodes.
    pub fn display_position(&self, canvas: &Canvas) -> Point {
        canvas.transform(self.position)
    }
}
