use std::{borrow::Cow, cmp::Ordering};

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::helper::Sign;

/// Dashboard palette, lifted from the web frontend's shared stylesheet.
pub const BLUE: Color = Color::Rgb(0x4f, 0x8e, 0xff);
pub const VIOLET: Color = Color::Rgb(0x8b, 0x5c, 0xf6);
pub const PINK: Color = Color::Rgb(0xec, 0x48, 0x99);
pub const CYAN: Color = Color::Rgb(0x06, 0xb6, 0xd4);
pub const GREEN: Color = Color::Rgb(0x10, 0xb9, 0x81);
pub const AMBER: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
pub const RED: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const MUTED: Color = Color::Rgb(0x78, 0x78, 0xa0);
/// Panel background behind charts and tooltips.
pub const SURFACE: Color = Color::Rgb(0x1a, 0x1a, 0x2e);

const SERIES: [Color; 7] = [BLUE, VIOLET, PINK, CYAN, GREEN, AMBER, RED];

/// Series accent, cycling through the palette.
#[inline]
pub fn accent(series: usize) -> Color {
    SERIES[series % SERIES.len()]
}

#[inline]
pub fn text() -> Style {
    Style::default().fg(Color::Reset)
}

#[inline]
pub fn primary() -> Style {
    Style::default().fg(Color::White)
}

#[inline]
pub fn label() -> Style {
    Style::default().fg(MUTED)
}

#[inline]
pub fn dark_gray() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[inline]
pub fn title() -> Style {
    primary().add_modifier(Modifier::BOLD)
}

#[inline]
pub fn popup() -> Style {
    text()
}

#[inline]
pub fn tab_selected() -> Style {
    text().add_modifier(Modifier::REVERSED)
}

#[inline]
pub fn tile_value() -> Style {
    Style::default().fg(BLUE).add_modifier(Modifier::BOLD)
}

/// Growth coloring for year-over-year style deltas.
#[inline]
pub fn up(val: Ordering) -> Style {
    match val {
        Ordering::Less => Style::default().fg(RED),
        Ordering::Equal => Style::default().fg(Color::Reset),
        Ordering::Greater => Style::default().fg(GREEN),
    }
}

#[inline]
pub fn online() -> Style {
    Style::default().fg(GREEN)
}

#[inline]
pub fn offline() -> Style {
    Style::default().fg(RED)
}

pub fn item<'a>(label: String, value: impl Into<Cow<'a, str>>) -> ListItem<'a> {
    let spans = Line::from(vec![
        Span::styled(format!("{label}: "), self::label()),
        Span::styled(value, self::text()),
    ]);
    ListItem::new(spans)
}

pub fn item_up<'a>(label: String, value: impl Into<Cow<'a, str>>) -> ListItem<'a> {
    let value = value.into();
    let style = up(value.sign());
    let spans = Line::from(vec![
        Span::styled(format!("{label}: "), self::label()),
        Span::styled(value, style),
    ]);
    ListItem::new(spans)
}

#[cfg(test)]
mod tests {
    use super::accent;

    #[test]
    fn accent_cycles_through_the_palette() {
        assert_eq!(accent(0), accent(7));
        assert_ne!(accent(0), accent(1));
        assert_eq!(accent(3), accent(10));
    }
}
