//! Rendering surface
//!
//! The experiment only talks to the display through `RenderSurface`, so it
//! runs the same against the terminal front end and the headless recorder
//! used in tests.

pub mod headless;

pub use headless::HeadlessSurface;

use crate::core::types::{Condition, Side};
use crate::slides::Panel;
use crate::training::{Marker, MarkerId};
use crate::trial::FlipBook;

pub trait RenderSurface {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    /// Start button on the instructions panel
    fn set_start_enabled(&mut self, enabled: bool);

    /// Retag a side's clickable region with its display condition
    fn set_side_condition(&mut self, side: Side, condition: Condition);

    fn set_flip_book(&mut self, side: Side, book: &FlipBook);

    fn set_sentence(&mut self, text: &str);

    /// Highlight the chosen book
    fn mark_selected(&mut self, side: Side);

    /// Drop sentence, books and selection
    fn clear_stage(&mut self);

    fn place_markers(&mut self, markers: &[Marker]);

    fn cross_out_marker(&mut self, id: MarkerId);

    fn remove_markers(&mut self);

    /// Message for the experimenter (debug results, input prompts)
    fn notify(&mut self, message: &str);
}
