use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use time::macros::format_description;

use crate::data::ReadyState;
use crate::ui::styles;

pub fn render(frame: &mut Frame, rect: Rect, ready: ReadyState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rect);

    let (status, status_style) = match ready {
        ReadyState::Open => ("■■■", styles::online()),
        ReadyState::Closed => ("□□□", styles::offline()),
        ReadyState::Connecting => ("···", styles::text()),
    };
    let left = Paragraph::new(Line::from(vec![
        Span::styled(status, status_style),
        Span::styled(format!("  {}", crate::api::base_url()), styles::dark_gray()),
    ]));
    frame.render_widget(left, chunks[0]);

    let clock = Paragraph::new(Span::styled(clock_text(), styles::label()))
        .alignment(Alignment::Right);
    frame.render_widget(clock, chunks[1]);
}

/// Wall-clock time in the local offset, `HH:MM:SS`.
fn clock_text() -> String {
    let now = time::OffsetDateTime::now_utc().to_offset(crate::logger::local_offset());
    now.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::clock_text;

    #[test]
    fn clock_renders_two_digit_fields() {
        let text = clock_text();
        assert_eq!(text.len(), 8);
        let bytes = text.as_bytes();
        assert_eq!(bytes[2], b':');
        assert_eq!(bytes[5], b':');
    }
}
