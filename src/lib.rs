//! Book-or - Picture-book conjunction experiment
//!
//! Children see two flip books and hear a sentence using "and", "or" or a
//! bare noun, then pick the book it describes. One CSV line per response
//! goes to the lab's collector.

pub mod assets;
pub mod catalog;
pub mod core;
pub mod experiment;
pub mod slides;
pub mod submit;
pub mod surface;
pub mod training;
pub mod trial;
pub mod tui;
