#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

mod autoplay;
mod collection;
mod command;
mod config;
mod direction;
mod event;
mod game;
mod grid;
mod level;
mod move_;
mod position;
mod tile;
mod undo;
mod util;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::autoplay::*;
pub use crate::collection::*;
pub use crate::command::*;
pub use crate::config::*;
pub use crate::direction::*;
pub use crate::event::*;
pub use crate::game::*;
pub use crate::grid::*;
pub use crate::level::*;
pub use crate::move_::*;
pub use crate::position::*;
pub use crate::tile::*;
pub use crate::util::*;

fn file_stem(p: &Path) -> &str {
    p.file_stem().and_then(OsStr::to_str).unwrap_or_default()
}

/// All XSB files in `dir`, sorted so that "9" comes before "10".
pub fn find_collections(dir: &Path) -> Result<Vec<PathBuf>, SokobanError> {
    let mut paths = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension() == Some(OsStr::new("xsb")) {
            paths.push(path);
        }
    }
    paths.sort_by(|x, y| natord::compare(file_stem(x), file_stem(y)));
    Ok(paths)
}

/// Print the name and number of levels of each collection in `dir`.
pub fn print_collections_table(dir: &Path) -> Result<(), SokobanError> {
    use ansi_term::Colour::{Green, Red, Yellow};

    println!(
        " {}               {}",
        Yellow.bold().paint("File name"),
        Yellow.bold().paint("Levels")
    );
    println!("{0}{0}{0}", "----------------");

    for path in find_collections(dir)? {
        let name = file_stem(&path);
        let padded_name = format!("{:<24}", name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let collection = Collection::parse(name, &content);
                let count = format!("{:>6}", collection.number_of_levels());
                if collection.is_empty() {
                    println!(" {}{}", padded_name, Red.paint(count));
                } else {
                    println!(" {}{}", padded_name, Green.bold().paint(count));
                }
            }
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                println!(" {}{}", padded_name, Red.paint(format!("{:>6}", "?")));
            }
        }
    }
    Ok(())
}
