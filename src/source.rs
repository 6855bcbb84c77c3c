//! Source locations and spans.
//!
//! The lexer/parser that produces a [`crate::ast::Document`] is an external
//! collaborator (out of scope for this crate); what we own is the contract
//! every AST node honors: each node carries a [`Span`] so that errors raised
//! during execution can be annotated with a `(line, column)` pair.

use std::fmt;

/// A reference to a line and column in an input source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    index: usize,
    line: usize,
    col: usize,
}

impl SourcePosition {
    /// Constructs a new position. `index` must be at least `line + col`.
    pub fn new(index: usize, line: usize, col: usize) -> Self {
        assert!(index >= line + col);
        Self { index, line, col }
    }

    /// The position at the very start of a source.
    pub fn new_origin() -> Self {
        Self { index: 0, line: 0, col: 0 }
    }

    pub fn advance_col(&mut self) {
        self.index += 1;
        self.col += 1;
    }

    pub fn advance_line(&mut self) {
        self.index += 1;
        self.line += 1;
        self.col = 0;
    }

    /// Zero-based byte index into the source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Zero-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Zero-based column number.
    pub fn column(&self) -> usize {
        self.col
    }

    /// One-based `(line, column)` pair, the shape the wire error format uses.
    pub fn as_one_based(&self) -> (usize, usize) {
        (self.line + 1, self.col + 1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A range of characters in the input source: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    pub fn zero_width(pos: SourcePosition) -> Self {
        Self::new(pos, pos)
    }

    pub fn unlocated() -> Self {
        Self::new(SourcePosition::new_origin(), SourcePosition::new_origin())
    }
}

/// Wraps an AST item with the span it occupied in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spanning<T> {
    pub item: T,
    pub span: Span,
}

impl<T> Spanning<T> {
    pub fn new(span: Span, item: T) -> Self {
        Self { item, span }
    }

    pub fn unlocated(item: T) -> Self {
        Self::new(Span::unlocated(), item)
    }

    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    pub fn map<O>(self, f: impl FnOnce(T) -> O) -> Spanning<O> {
        Spanning::new(self.span, f(self.item))
    }
}

impl<T: fmt::Display> fmt::Display for Spanning<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. At {}", self.item, self.span.start)
    }
}

/// The original query text plus a name, kept only for error-snippet
/// rendering (see [`crate::error::GraphQlError::new`]).
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    body: &'a str,
    name: &'a str,
}

impl<'a> Source<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { body, name: "GraphQL request" }
    }

    pub fn named(body: &'a str, name: &'a str) -> Self {
        Self { body, name }
    }

    pub fn body(&self) -> &'a str {
        self.body
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Converts a byte offset into this source into a `(line, column)` pair,
    /// both one-based, as `graphql-js`'s `getLocation` does.
    pub fn location_for(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut line_start = 0;
        for (idx, ch) in self.body.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                line_start = idx + 1;
            }
        }
        let column = self.body[line_start..offset.min(self.body.len())]
            .chars()
            .count()
            + 1;
        (line, column)
    }

    /// Renders a caret-annotated snippet of the line containing `offset`,
    /// matching the human-readable rendering graphql-js prints under a
    /// formatted error's message.
    pub fn render_snippet(&self, offset: usize) -> String {
        let (line, column) = self.location_for(offset);
        let source_line = self.body.lines().nth(line - 1).unwrap_or("");
        let gutter = format!("{line}: ");
        let caret_pad = " ".repeat(gutter.len() + column.saturating_sub(1));
        format!("{gutter}{source_line}\n{caret_pad}^")
    }
}
