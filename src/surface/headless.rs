//! In-memory surface that records what would be on screen

use ahash::AHashSet;

use super::RenderSurface;
use crate::core::types::{Condition, Side};
use crate::slides::Panel;
use crate::training::{Marker, MarkerId};
use crate::trial::{slot_id, FlipBook};
use std::path::Path;

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    visible: AHashSet<Panel>,
    start_enabled: bool,
    conditions: [Option<Condition>; 2],
    books: [Option<FlipBook>; 2],
    sentence: String,
    selected: Option<Side>,
    markers: Vec<Marker>,
    crossed_out: AHashSet<MarkerId>,
    notifications: Vec<String>,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible panels in `Panel::ALL` order
    pub fn visible_panels(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| self.visible.contains(p))
            .collect()
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    pub fn side_condition(&self, side: Side) -> Option<Condition> {
        self.conditions[slot(side)]
    }

    pub fn book(&self, side: Side) -> Option<&FlipBook> {
        self.books[slot(side)].as_ref()
    }

    /// Image currently in the slot named like `left1a`
    pub fn image_at(&self, id: &str) -> Option<&Path> {
        Side::BOTH.into_iter().find_map(|side| {
            let book = self.book(side)?;
            book.pages().iter().enumerate().find_map(|(page, p)| {
                p.images()
                    .into_iter()
                    .enumerate()
                    .find(|(slot, _)| slot_id(side, page, *slot) == id)
                    .map(|(_, image)| image)
            })
        })
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn selected(&self) -> Option<Side> {
        self.selected
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_crossed_out(&self, id: MarkerId) -> bool {
        self.crossed_out.contains(&id)
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        if visible {
            self.visible.insert(panel);
        } else {
            self.visible.remove(&panel);
        }
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
    }

    fn set_side_condition(&mut self, side: Side, condition: Condition) {
        self.conditions[slot(side)] = Some(condition);
    }

    fn set_flip_book(&mut self, side: Side, book: &FlipBook) {
        self.books[slot(side)] = Some(book.clone());
    }

    fn set_sentence(&mut self, text: &str) {
        self.sentence = text.to_string();
    }

    fn mark_selected(&mut self, side: Side) {
        self.selected = Some(side);
    }

    fn clear_stage(&mut self) {
        self.sentence.clear();
        self.selected = None;
        self.books = [None, None];
    }

    fn place_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
        self.crossed_out.clear();
    }

    fn cross_out_marker(&mut self, id: MarkerId) {
        self.crossed_out.insert(id);
    }

    fn remove_markers(&mut self) {
        self.markers.clear();
        self.crossed_out.clear();
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Noun;
    use crate::core::random::session_rng;
    use crate::trial::TrialPictures;

    #[test]
    fn test_image_at_slot_ids() {
        let pics = TrialPictures::resolve(
            Path::new("images"),
            &Noun::new("dog", "dogs"),
            &Noun::new("cat", "cats"),
        );
        let (mut rng, _) = session_rng(Some(4));
        let mut surface = HeadlessSurface::new();
        surface.set_flip_book(Side::Right, &FlipBook::build(&mut rng, Condition::Noun, &pics));

        assert_eq!(surface.image_at("right1a"), Some(pics.pic1.as_path()));
        assert_eq!(surface.image_at("right4b"), Some(pics.blank.as_path()));
        assert_eq!(surface.image_at("left1a"), None);
        assert_eq!(surface.image_at("right5a"), None);

        surface.clear_stage();
        assert_eq!(surface.image_at("right1a"), None);
    }

    #[test]
    fn test_markers_reset_crossings() {
        let mut surface = HeadlessSurface::new();
        surface.cross_out_marker(MarkerId(1));
        assert!(surface.is_crossed_out(MarkerId(1)));
        surface.place_markers(&[]);
        assert!(!surface.is_crossed_out(MarkerId(1)));
    }
}
