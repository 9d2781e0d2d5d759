use crate::error::DocumentError;

/// Indent width used by [`IndentedDocument::lines`] and [`IndentedDocument::text`].
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// A contiguous run of lines sharing one nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    level: usize,
    lines: Vec<String>,
}

impl Block {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// An ordered sequence of indentation-tagged line blocks.
///
/// The active level is a cursor: it only decides which block the next pushed
/// line lands in. Lines pushed at the same level as the last block are
/// coalesced into it; any other level opens a new block.
///
/// Every `indent` must be matched by an equal `dedent` before the document is
/// handed to a parent or rendered, otherwise later lines land at the wrong depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedDocument {
    indent_width: usize,
    level: usize,
    blocks: Vec<Block>,
}

impl Default for IndentedDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentedDocument {
    pub fn new() -> Self {
        Self::with_indent_width(DEFAULT_INDENT_WIDTH)
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            indent_width,
            level: 0,
            blocks: Vec::new(),
        }
    }

    /// The current active level.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Total number of leaf lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn indent(&mut self) -> Result<(), DocumentError> {
        self.indent_by(1)
    }

    pub fn indent_by(&mut self, amount: usize) -> Result<(), DocumentError> {
        if amount == 0 {
            return Err(DocumentError::InvalidArgument(amount));
        }
        self.level += amount;
        Ok(())
    }

    pub fn dedent(&mut self) -> Result<(), DocumentError> {
        self.dedent_by(1)
    }

    pub fn dedent_by(&mut self, amount: usize) -> Result<(), DocumentError> {
        if amount == 0 {
            return Err(DocumentError::InvalidArgument(amount));
        }
        if amount > self.level {
            return Err(DocumentError::IndentationUnderflow {
                requested: amount,
                current: self.level,
            });
        }
        self.level -= amount;
        Ok(())
    }

    /// Appends a leaf line at the active level.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        match self.blocks.last_mut() {
            Some(block) if block.level == self.level => block.lines.push(line),
            _ => self.blocks.push(Block {
                level: self.level,
                lines: vec![line],
            }),
        }
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    /// Splices every block of `other` into this document, offset by the active level.
    ///
    /// Lines are re-pushed one by one so they coalesce with this document's
    /// blocks; the active level is unchanged afterwards.
    pub fn append(&mut self, other: &IndentedDocument) {
        let saved_level = self.level;
        for block in &other.blocks {
            self.level = saved_level + block.level;
            for line in &block.lines {
                self.push(line.clone());
            }
        }
        self.level = saved_level;
    }

    /// One string per leaf line, each prefixed by `indent_width * level` spaces.
    pub fn render(&self, indent_width: usize) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(|block| {
                let prefix = " ".repeat(indent_width * block.level);
                block.lines.iter().map(move |line| format!("{}{}", prefix, line))
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.render(self.indent_width)
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}
