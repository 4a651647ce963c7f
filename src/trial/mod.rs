//! Test trials: flip-books, cue sentences, the engine and its records

pub mod engine;
pub mod flipbook;
pub mod record;
pub mod sentence;
pub mod session;

pub use engine::{PreparedTrial, TrialEngine};
pub use flipbook::{slot_id, FlipBook, Page, TrialPictures, PAGES};
pub use record::TrialRecord;
pub use sentence::cue_sentence;
pub use session::{Session, SubjectId};
