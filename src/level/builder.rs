use regex::Regex;

use crate::grid::Grid;
use crate::level::Level;
use crate::tile::Tile;
use crate::util::*;

lazy_static! {
    /// A row of a level consists of at least two tile characters and nothing else.
    static ref ROW: Regex = Regex::new(r"^[@+ $.*#]{2,}$").unwrap();
    static ref TITLE: Regex = Regex::new(r"^Title:\s*(.*)").unwrap();
    static ref AUTHOR: Regex = Regex::new(r"^Author:\s*(.*)").unwrap();
    static ref SOLUTION: Regex = Regex::new(r"^Solution:\s*(.*)").unwrap();
}

/// What `LevelBuilder::feed` made of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A `Title:`, `Author:` or `Solution:` line.
    Metadata,
    /// A row of tiles.
    Row,
    /// Anything else. The line has not been consumed.
    Other,
}

/// Collects the rows and metadata of one level, line by line.
#[derive(Debug, Default)]
pub struct LevelBuilder {
    rows: Vec<String>,
    title: Option<String>,
    author: Option<String>,
    solution: Option<String>,
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

impl LevelBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Consume a line if it is metadata or a row of tiles.
    pub fn feed(&mut self, line: &str) -> LineKind {
        if let Some(title) = capture(&TITLE, line) {
            self.title = Some(title);
        } else if let Some(author) = capture(&AUTHOR, line) {
            self.author = Some(author);
        } else if let Some(solution) = capture(&SOLUTION, line) {
            self.solution = Some(solution);
        } else if ROW.is_match(line) {
            self.rows.push(line.to_owned());
            return LineKind::Row;
        } else {
            return LineKind::Other;
        }
        LineKind::Metadata
    }

    /// Have any rows been collected so far?
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Turn the collected rows into a `Level`. Fails unless there is exactly one worker.
    pub fn build(self) -> Result<Level, SokobanError> {
        if self.rows.is_empty() {
            return Err(SokobanError::NoLevel);
        }
        let grid = Grid::from_rows(&self.rows).map_err(SokobanError::InvalidCharacter)?;

        match grid.find_all(Tile::PLAYER).count() {
            0 => return Err(SokobanError::NoWorker),
            1 => {}
            n => return Err(SokobanError::TwoWorkers(n)),
        }

        Ok(Level {
            grid,
            title: self.title,
            author: self.author,
            solution: self.solution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_lines() {
        let mut builder = LevelBuilder::new();
        assert_eq!(builder.feed("Title: A"), LineKind::Metadata);
        assert_eq!(builder.feed("Author:Me"), LineKind::Metadata);
        assert_eq!(builder.feed(""), LineKind::Other);
        assert_eq!(builder.feed("#"), LineKind::Other);
        assert_eq!(builder.feed("; comment"), LineKind::Other);
        assert!(builder.is_empty());
        assert_eq!(builder.feed("#@#"), LineKind::Row);
        assert_eq!(builder.feed("  "), LineKind::Row);
        assert!(!builder.is_empty());
        assert_eq!(builder.title.as_deref(), Some("A"));
        assert_eq!(builder.author.as_deref(), Some("Me"));
    }

    #[test]
    fn build_requires_worker() {
        let mut builder = LevelBuilder::new();
        builder.feed("####");
        builder.feed("#$.#");
        builder.feed("####");
        assert!(builder.build().is_err());
    }
}
