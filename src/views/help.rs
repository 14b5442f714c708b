use ratatui::{
    prelude::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use crate::ui::styles;

pub fn render(frame: &mut Frame, rect: Rect) {
    let rect = crate::ui::rect::centered(54, 16, rect);

    let spans = vec![
        Line::from("\n"),
        Line::styled(
            concat!("  iRevolution Terminal v", env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from("\n"),
        Line::from("  1        Overview"),
        Line::from("  2        Dashboard"),
        Line::from("  3        Report"),
        Line::from("  4        Story"),
        Line::from("  R        Refresh the current page"),
        Line::from("  Esc      Back to the previous page"),
        Line::from("  ?        Toggle this help"),
        Line::from("  q / ^C   Quit"),
        Line::from("\n"),
        Line::from("  Any key closes this popup."),
    ];
    let paragraph = Paragraph::new(spans).style(styles::popup()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .padding(Padding::horizontal(2))
            .title("Help"),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}
