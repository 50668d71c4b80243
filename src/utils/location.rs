use std::fmt;

/// Location of a token in the source, both counting from 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// The line number.
    pub line: u32,
    /// The column of the first character.
    pub column: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
