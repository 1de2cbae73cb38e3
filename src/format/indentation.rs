use crate::sql::{ReservedClass, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    TopLevel,
    Block,
}

/// Indentation state of the formatter.
///
/// Top-level levels come from clause keywords (`SELECT`, `FROM`), block levels
/// from `(` and `CASE`. Closing a block also drops the top-level levels opened
/// inside it. The space level pads continuation lines under a clause keyword
/// wider than two indents (`ORDER BY`).
#[derive(Debug, Clone)]
pub struct Indentation {
    unit: String,
    levels: Vec<Level>,
    spaces: usize,
}

impl Indentation {
    /// `width` spaces per level; zero falls back to two.
    pub fn new(width: usize) -> Self {
        let width = if width == 0 { 2 } else { width };
        Self {
            unit: " ".repeat(width),
            levels: Vec::new(),
            spaces: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.unit.len()
    }

    /// Indent for a line starting with a token of `kind`. Clause keywords are
    /// not padded by the space level.
    pub fn get(&self, kind: TokenKind) -> String {
        let levels = self.unit.repeat(self.levels.len());
        match kind {
            TokenKind::Reserved(ReservedClass::TopLevel | ReservedClass::TopLevelNoIndent) => levels,
            _ => levels + &" ".repeat(self.spaces),
        }
    }

    pub fn increase_top_level(&mut self) {
        self.levels.push(Level::TopLevel);
    }

    pub fn increase_block_level(&mut self) {
        self.levels.push(Level::Block);
    }

    pub fn increase_space_level(&mut self, count: usize) {
        self.spaces += count;
    }

    pub fn decrease_space_level(&mut self) {
        self.spaces = 0;
    }

    /// Pops one level if it is a top-level one.
    pub fn decrease_top_level(&mut self) {
        if self.levels.last() == Some(&Level::TopLevel) {
            self.levels.pop();
        }
    }

    /// Pops up to and including the innermost block level.
    pub fn decrease_block_level(&mut self) {
        while let Some(level) = self.levels.pop() {
            if level != Level::TopLevel {
                break;
            }
        }
    }

    pub fn reset(&mut self) {
        self.levels.clear();
        self.spaces = 0;
    }
}
