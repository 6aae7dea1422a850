//! Neon palette and shared widget styling

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const NEON_CYAN: Color = Color::Rgb(0, 255, 240);
pub const NEON_MAGENTA: Color = Color::Rgb(255, 0, 200);
pub const NEON_GREEN: Color = Color::Rgb(57, 255, 20);
pub const NEON_YELLOW: Color = Color::Rgb(255, 230, 0);
pub const DIM: Color = Color::Rgb(90, 90, 120);

/// Border color between dim and cyan for a glow level in `[0, 1]`
pub fn glow_color(level: f64) -> Color {
    let level = level.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * level).round() as u8;
    Color::Rgb(mix(0, 0), mix(90, 255), mix(120, 240))
}

/// Bordered block with a neon title
pub fn neon_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Centered header with the screen title
pub fn header(title: &str, border: Color) -> Paragraph<'_> {
    Paragraph::new(title)
        .style(Style::default().fg(border).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
}

/// Footer line of `key description` pairs
pub fn help_line(pairs: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let spans: Vec<Span> = pairs
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(
                    *key,
                    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}  ", description)),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(NEON_YELLOW)),
        )
}
