use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph},
};

use crate::core::display::DisplaySnapshot;
use crate::ui::layout::{face_lines, FaceLine, FaceOptions};
use crate::ui::theme::Theme;

fn to_line(line: &FaceLine, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.segments.len() * 2);
    for (i, segment) in line.segments.iter().enumerate() {
        let separator = segment.separator(i);
        if !separator.is_empty() {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(
            segment.text.clone(),
            Style::default().fg(theme.color(segment.slot).into()),
        ));
    }
    Line::from(spans)
}

/// Main render function
pub fn render_face(
    frame: &mut Frame,
    snapshot: &DisplaySnapshot,
    options: &FaceOptions,
    theme: &Theme,
) {
    let lines: Vec<Line> = face_lines(snapshot, options)
        .iter()
        .map(|line| to_line(line, theme))
        .collect();

    let face = Paragraph::new(lines).block(
        Block::default()
            .padding(Padding::uniform(1))
            .style(Style::default().bg(theme.background.into())),
    );

    frame.render_widget(face, frame.area());
}
