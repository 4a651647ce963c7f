//! Four-page picture books shown on each side of a trial

use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::assets::{image_path, BLANK_IMAGE};
use crate::catalog::Noun;
use crate::core::random::shuffled;
use crate::core::types::{Condition, Side};

pub const PAGES: usize = 4;

/// Image paths available to one trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPictures {
    pub pic1: PathBuf,
    pub pic2: PathBuf,
    pub blank: PathBuf,
}

impl TrialPictures {
    pub fn resolve(image_dir: &Path, item1: &Noun, item2: &Noun) -> Self {
        Self {
            pic1: image_path(image_dir, &item1.singular),
            pic2: image_path(image_dir, &item2.singular),
            blank: image_dir.join(BLANK_IMAGE),
        }
    }
}

/// One page: image `a` above image `b`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub a: PathBuf,
    pub b: PathBuf,
}

impl Page {
    fn new(a: &Path, b: &Path) -> Self {
        Self {
            a: a.to_path_buf(),
            b: b.to_path_buf(),
        }
    }

    pub fn images(&self) -> [&Path; 2] {
        [self.a.as_path(), self.b.as_path()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlipBook {
    pages: [Page; PAGES],
}

impl FlipBook {
    /// Build the book for one side's display condition.
    ///
    /// - `and`: both pictures on every page, order split 2:2
    /// - `or`: one picture per page beside a blank, each picture twice
    /// - `noun`: only the first picture, on all four pages
    pub fn build<R: Rng + ?Sized>(rng: &mut R, condition: Condition, pics: &TrialPictures) -> Self {
        let TrialPictures { pic1, pic2, blank } = pics;
        let pages = match condition {
            Condition::And => [
                Page::new(pic1, pic2),
                Page::new(pic1, pic2),
                Page::new(pic2, pic1),
                Page::new(pic2, pic1),
            ],
            Condition::Or => [
                Page::new(pic1, blank),
                Page::new(pic1, blank),
                Page::new(pic2, blank),
                Page::new(pic2, blank),
            ],
            Condition::Noun => [
                Page::new(pic1, blank),
                Page::new(pic1, blank),
                Page::new(pic1, blank),
                Page::new(pic1, blank),
            ],
        };
        Self {
            pages: shuffled(rng, pages),
        }
    }

    pub fn pages(&self) -> &[Page; PAGES] {
        &self.pages
    }

    /// Number of pages on which `image` appears in either slot
    pub fn pages_showing(&self, image: &Path) -> usize {
        self.pages
            .iter()
            .filter(|p| p.a == image || p.b == image)
            .count()
    }
}

/// Element id of an image slot, e.g. `left1a` or `right4b`.
///
/// `page` is 0-based; `slot` is 0 for `a`, 1 for `b`.
pub fn slot_id(side: Side, page: usize, slot: usize) -> String {
    let letter = if slot == 0 { 'a' } else { 'b' };
    format!("{}{}{}", side, page + 1, letter)
}
