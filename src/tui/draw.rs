//! Frame layout for each panel

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::path::Path;

use super::App;
use crate::assets::BLANK_IMAGE;
use crate::core::types::Side;
use crate::experiment::Experiment;
use crate::slides::Panel;
use crate::surface::HeadlessSurface;
use crate::trial::FlipBook;

pub fn ui(f: &mut Frame, exp: &Experiment<HeadlessSurface>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.size());

    app.hits.markers.clear();
    match exp.slides().current() {
        Some(Panel::Instructions) => draw_instructions(f, chunks[0], exp, app),
        Some(Panel::StartGame) => draw_start_game(f, chunks[0], app),
        Some(Panel::Training) => draw_training(f, chunks[0], exp, app),
        Some(Panel::Stage) => draw_stage(f, chunks[0], exp.surface(), app),
        Some(Panel::Finished) => draw_finished(f, chunks[0]),
        None => {}
    }

    let status = exp
        .surface()
        .notifications()
        .last()
        .map(String::as_str)
        .unwrap_or("");
    let footer = Paragraph::new(format!(" ESC: quit | seed {} | {}", exp.seed(), status))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_instructions(f: &mut Frame, area: Rect, exp: &Experiment<HeadlessSurface>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let text = vec![
        Line::from(Span::styled(
            "Picture books",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The child will see two books and hear a sentence about them."),
        Line::from("They pick the book the sentence is about by tapping it."),
        Line::from("A short dot game comes first to practise tapping."),
        Line::from(""),
        Line::from("Enter the subject ID below (\"debug\" shows results here instead of sending them)."),
    ];
    let intro = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Instructions "));
    f.render_widget(intro, chunks[0]);

    let loaded = match &app.assets {
        Some(assets) => format!(
            " Subject ID ({} images, {} missing) ",
            assets.loaded(),
            assets.failed().len()
        ),
        None => " Subject ID ".to_string(),
    };
    let input = Paragraph::new(app.subject_input.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(loaded));
    f.render_widget(input, chunks[1]);

    let (label, style) = if exp.start_enabled() {
        ("Start", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("Please wait...", Style::default().fg(Color::DarkGray))
    };
    let button_area = centered(chunks[2], 20, 3);
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, button_area);
    app.hits.start = button_area;
}

fn draw_start_game(f: &mut Frame, area: Rect, app: &mut App) {
    let button_area = centered(area, 30, 5);
    let button = Paragraph::new(vec![Line::from(""), Line::from("Let's play!")])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, button_area);
    app.hits.start = button_area;
}

fn draw_training(f: &mut Frame, area: Rect, exp: &Experiment<HeadlessSurface>, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tap all the dots! ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let config = &exp.config().training;
    let surface = exp.surface();
    let span_x = inner.width.saturating_sub(3) as u32;
    let span_y = inner.height.saturating_sub(1) as u32;

    for marker in surface.markers() {
        let col = inner.x + scale(marker.position.x, span_x, config.width);
        let row = inner.y + scale(marker.position.y, span_y, config.height);
        let rect = Rect::new(col, row, 3, 1).intersection(inner);

        let (text, style) = if surface.is_crossed_out(marker.id) {
            (" X ".to_string(), Style::default().fg(Color::Red))
        } else {
            (
                format!("({})", marker.id.0),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        };
        f.render_widget(Paragraph::new(text).style(style), rect);
        app.hits.markers.push((marker.id, rect));
    }
}

/// Map a canvas coordinate in `0..extent` onto `0..=span` cells
fn scale(pos: u32, span: u32, extent: u32) -> u16 {
    let cells = u64::from(pos) * u64::from(span) / u64::from(extent.max(1));
    cells.min(u64::from(span)).min(u64::from(u16::MAX)) as u16
}

fn draw_stage(f: &mut Frame, area: Rect, surface: &HeadlessSurface, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let sentence = Paragraph::new(surface.sentence())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(sentence, chunks[0]);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    for (side, rect) in [(Side::Left, sides[0]), (Side::Right, sides[1])] {
        draw_book(f, rect, surface.book(side), surface.selected() == Some(side), app);
        match side {
            Side::Left => app.hits.left = rect,
            Side::Right => app.hits.right = rect,
        }
    }
}

fn draw_book(f: &mut Frame, area: Rect, book: Option<&FlipBook>, selected: bool, app: &App) {
    let border = if selected {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(book) = book else {
        return;
    };

    let pages = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(inner);

    for (page, rect) in book.pages().iter().zip(pages.iter()) {
        let lines: Vec<Line> = page
            .images()
            .iter()
            .flat_map(|img| [Line::from(image_label(img, app)), Line::from("")])
            .collect();
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, *rect);
    }
}

/// Text standing in for an image; blanks render empty
fn image_label(path: &Path, app: &App) -> String {
    if path.file_name().is_some_and(|n| n == BLANK_IMAGE) {
        return String::new();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default();
    match &app.assets {
        Some(assets) if !assets.contains(path) => format!("{}?", stem),
        _ => stem,
    }
}

fn draw_finished(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "All done! Thank you for playing!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter or Esc to exit."),
    ];
    let done = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(done, centered(area, 50, 7));
}
