use std::mem;

use regex::Regex;

use crate::level::builder::LineKind;
use crate::level::*;

lazy_static! {
    static ref LINE_END: Regex = Regex::new(r"\r\n|\n|\r").unwrap();
}

/// Split a string into lines, accepting LF, CRLF and CR line endings.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    LINE_END.split(content)
}

/// Parse a string containing any number of levels in the XSB format.
///
/// A level is a run of consecutive rows of tile characters. `Title:`, `Author:` and `Solution:`
/// lines may appear anywhere and are attached to the level that is finished next. Any other line
/// ends the current level. Levels that cannot be built, e.g. because they do not contain exactly
/// one worker, are skipped.
pub fn parse_levels(content: &str) -> Vec<Level> {
    let mut levels = vec![];
    let mut builder = LevelBuilder::new();

    for line in split_lines(content) {
        if builder.feed(line) == LineKind::Other && !builder.is_empty() {
            let done = mem::replace(&mut builder, LevelBuilder::new());
            finish_level(done, &mut levels);
        }
    }
    if !builder.is_empty() {
        finish_level(builder, &mut levels);
    }

    levels
}

fn finish_level(builder: LevelBuilder, levels: &mut Vec<Level>) {
    match builder.build() {
        Ok(level) => levels.push(level),
        Err(e) => warn!("Skipping malformed level after level #{}: {}", levels.len(), e),
    }
}

/// A collection of levels.
#[derive(Debug, Clone)]
pub struct Collection {
    /// The name of the collection, e.g. the name of the file it was loaded from.
    name: String,

    /// All levels of this collection, in the order in which they appear in the file. This is
    /// only written to when loading the collection.
    levels: Vec<Level>,
}

impl Collection {
    /// Parse the content of an XSB file.
    pub fn parse(name: &str, content: &str) -> Collection {
        let levels = parse_levels(content);
        info!("{} levels loaded from {}.", levels.len(), name);
        Collection {
            name: name.into(),
            levels,
        }
    }

    // Accessor methods

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn number_of_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
