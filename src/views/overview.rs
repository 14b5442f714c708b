use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::data::RevenuePoint;
use crate::ui::{chart::ChartDefaults, gradient, styles};

const EMPTY_PLACEHOLDER: &str = "--";

/// Overview page: four animated stat tiles over a revenue sparkline.
pub fn render(
    frame: &mut Frame,
    rect: Rect,
    tiles: &[(&str, String); 4],
    revenue: &[RevenuePoint],
    defaults: &ChartDefaults,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(rect);

    render_tiles(frame, chunks[0], tiles);
    render_sparkline(frame, chunks[1], revenue, defaults);
}

fn render_tiles(frame: &mut Frame, rect: Rect, tiles: &[(&str, String); 4]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rect);

    for ((label, value), column) in tiles.iter().zip(columns.iter()) {
        let value = if value.is_empty() {
            EMPTY_PLACEHOLDER
        } else {
            value.as_str()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .title(Span::styled(format!(" {label} "), styles::label()));
        let inner = crate::ui::rect::centered(0, 1, block.inner(*column));
        frame.render_widget(block, *column);
        frame.render_widget(
            Paragraph::new(Span::styled(value, styles::tile_value()))
                .alignment(Alignment::Center),
            inner,
        );
    }
}

fn render_sparkline(
    frame: &mut Frame,
    rect: Rect,
    revenue: &[RevenuePoint],
    defaults: &ChartDefaults,
) {
    let title = match (revenue.first(), revenue.last()) {
        (Some(first), Some(last)) if revenue.len() > 1 => {
            format!(" Annual Revenue {}–{} ", first.year, last.year)
        }
        _ => " Annual Revenue ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(Span::styled(title, styles::label()));

    // one decimal of resolution survives the integer conversion
    let points: Vec<u64> = revenue
        .iter()
        .map(|p| (p.revenue.max(0.0) * 10.0).round() as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(block)
        .data(&points)
        .style(ratatui::style::Style::default().fg(gradient::CYAN.at(0.3)).bg(defaults.grid));
    frame.render_widget(sparkline, rect);
}
