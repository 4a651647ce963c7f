//! Slide controller: exactly one full-screen panel is visible at a time

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::error::BookError;
use crate::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Panel {
    Instructions,
    StartGame,
    Training,
    Stage,
    Finished,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Instructions,
        Panel::StartGame,
        Panel::Training,
        Panel::Stage,
        Panel::Finished,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Instructions => "instructions",
            Self::StartGame => "startGame",
            Self::Training => "training",
            Self::Stage => "stage",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Panel {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| BookError::UnknownPanel(s.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct SlideController {
    current: Option<Panel>,
}

impl SlideController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Panel> {
        self.current
    }

    /// Hide every panel, then show `panel`
    pub fn show_slide<S: RenderSurface + ?Sized>(&mut self, panel: Panel, surface: &mut S) {
        for p in Panel::ALL {
            surface.set_panel_visible(p, false);
        }
        surface.set_panel_visible(panel, true);
        self.current = Some(panel);
        tracing::debug!(panel = %panel, "Showing slide");
    }

    /// Hide `panel` without showing another (leaves a blank screen)
    pub fn hide<S: RenderSurface + ?Sized>(&mut self, panel: Panel, surface: &mut S) {
        surface.set_panel_visible(panel, false);
        if self.current == Some(panel) {
            self.current = None;
        }
    }
}
