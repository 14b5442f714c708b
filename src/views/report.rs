use itertools::Itertools;
use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, List, Row, Table},
    Frame,
};

use crate::data::{CountryShare, ModelSales, RegionSummary, RevenuePoint};
use crate::helper::{format_billions, format_compact, format_grouped, format_percent};
use crate::ui::styles;

/// Report page: sales tables plus year-over-year growth.
pub fn render(
    frame: &mut Frame,
    rect: Rect,
    summary: &[RegionSummary],
    by_model: &[ModelSales],
    country: &[CountryShare],
    revenue: &[RevenuePoint],
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rect);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_region_summary(frame, top[0], summary);
    render_model_sales(frame, top[1], by_model);
    render_country_mix(frame, bottom[0], country);
    render_growth(frame, bottom[1], revenue);
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(Span::styled(format!(" {} ", title.into()), styles::label()))
}

fn header(columns: &'static [&'static str]) -> Row<'static> {
    Row::new(
        columns
            .iter()
            .map(|c| Cell::from(Span::styled(*c, styles::label()))),
    )
    .bottom_margin(1)
}

fn render_region_summary(frame: &mut Frame, rect: Rect, summary: &[RegionSummary]) {
    let rows: Vec<Row> = summary
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(row.region.clone(), styles::text())),
                Cell::from(format_grouped(row.units)),
                Cell::from(format_billions(row.revenue)),
                Cell::from(format_percent(row.share)),
            ])
        })
        .collect();

    const WIDTHS: [Constraint; 4] = [
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows)
        .header(header(&["Region", "Units", "Revenue", "Share"]))
        .block(panel("Sales by Region"))
        .widths(&WIDTHS)
        .column_spacing(2);
    frame.render_widget(table, rect);
}

fn render_model_sales(frame: &mut Frame, rect: Rect, by_model: &[ModelSales]) {
    let rows: Vec<Row> = by_model
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(row.model.clone(), styles::text())),
                Cell::from(format_compact(row.units).to_string()),
                Cell::from(format_billions(row.revenue)),
            ])
        })
        .collect();

    const WIDTHS: [Constraint; 3] = [
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows)
        .header(header(&["Model", "Units", "Revenue"]))
        .block(panel("Sales by Model"))
        .widths(&WIDTHS)
        .column_spacing(2);
    frame.render_widget(table, rect);
}

/// One line per country: its best-selling model and that model's share.
fn render_country_mix(frame: &mut Frame, rect: Rect, country: &[CountryShare]) {
    let by_country = country
        .iter()
        .map(|row| (row.country.as_str(), row))
        .into_group_map();

    let items: Vec<_> = by_country
        .into_iter()
        .sorted_by_key(|(country, _)| *country)
        .filter_map(|(country, rows)| {
            let top = rows
                .into_iter()
                .max_by(|a, b| a.share.total_cmp(&b.share))?;
            Some(styles::item(
                country.to_string(),
                format!("{} ({})", top.model, format_percent(top.share)),
            ))
        })
        .collect();

    let list = List::new(items).block(panel("Top Model by Country"));
    frame.render_widget(list, rect);
}

fn render_growth(frame: &mut Frame, rect: Rect, revenue: &[RevenuePoint]) {
    let items: Vec<_> = revenue
        .iter()
        .tuple_windows()
        .map(|(prev, next)| {
            let delta = if prev.revenue == 0.0 {
                0.0
            } else {
                (next.revenue - prev.revenue) / prev.revenue * 100.0
            };
            styles::item_up(next.year.to_string(), format!("{delta:+.1}%"))
        })
        .collect();

    let list = List::new(items).block(panel("Revenue Growth YoY"));
    frame.render_widget(list, rect);
}
