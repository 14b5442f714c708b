use itertools::Itertools;
use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, Paragraph},
    Frame,
};

use crate::data::{Demographic, PenetrationPoint, Sentiment};
use crate::helper::{format_compact, format_grouped, format_millions, format_percent, Sign};
use crate::ui::{
    chart::{self, ChartDefaults},
    gradient, styles,
};

/// Story page: market penetration over time, buyer demographics and
/// social sentiment.
pub fn render(
    frame: &mut Frame,
    rect: Rect,
    penetration: &[PenetrationPoint],
    demographics: &[Demographic],
    sentiment: &[Sentiment],
    defaults: &ChartDefaults,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rect);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_penetration(frame, rows[0], penetration, defaults);
    render_demographics(frame, bottom[0], demographics, defaults);
    render_sentiment(frame, bottom[1], sentiment);
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(Span::styled(format!(" {} ", title.into()), styles::label()))
}

fn render_penetration(
    frame: &mut Frame,
    rect: Rect,
    penetration: &[PenetrationPoint],
    defaults: &ChartDefaults,
) {
    let options = chart::line_options(defaults, "Millions", "").with_y_labels(format_millions);

    let units: Vec<(f64, f64)> = penetration
        .iter()
        .map(|p| (f64::from(p.year), p.units))
        .collect();
    let users: Vec<(f64, f64)> = penetration
        .iter()
        .map(|p| (f64::from(p.year), p.active_users))
        .collect();

    let Some((x_min, x_max)) = units.iter().map(|(x, _)| *x).minmax().into_option() else {
        frame.render_widget(panel("Market Penetration"), rect);
        return;
    };
    let y_max = units
        .iter()
        .chain(&users)
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max);

    let mut units_line = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(gradient::GREEN.at(0.0)))
        .data(&units);
    let mut users_line = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(gradient::CYAN.at(1.0)))
        .data(&users);
    // dataset names drive the chart legend
    if options.legend {
        units_line = units_line.name("Units sold");
        users_line = users_line.name("Active users");
    }

    let x_labels = vec![
        Span::styled(format!("{x_min:.0}"), options.axis_style()),
        Span::styled(format!("{x_max:.0}"), options.axis_style()),
    ];
    let y_labels = vec![
        Span::styled(options.y_label(0.0), options.axis_style()),
        Span::styled(options.y_label(y_max / 2.0), options.axis_style()),
        Span::styled(options.y_label(y_max), options.axis_style()),
    ];

    let widget = Chart::new(vec![units_line, users_line])
        .block(panel("Market Penetration"))
        .x_axis(
            Axis::default()
                .style(options.grid_style())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(options.grid_style())
                .bounds([0.0, y_max * 1.05])
                .labels(y_labels),
        );
    frame.render_widget(widget, rect);
}

/// Age cohorts as horizontal bars; the bar chart widget only draws
/// vertical bars, so rows are composed by hand per the bar options.
fn render_demographics(
    frame: &mut Frame,
    rect: Rect,
    demographics: &[Demographic],
    defaults: &ChartDefaults,
) {
    let options = chart::bar_options(defaults, true);
    let block = panel("Buyers by Age Group");
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if !options.horizontal || inner.width < 20 {
        return;
    }

    let max_users = demographics.iter().map(|d| d.users).fold(0.0_f64, f64::max);
    if max_users <= 0.0 {
        return;
    }

    let track = usize::from(inner.width.saturating_sub(18));
    let lines: Vec<Line> = demographics
        .iter()
        .take(usize::from(inner.height))
        .map(|cohort| {
            let filled = ((cohort.users / max_users) * track as f64).round() as usize;
            let mut spans = vec![Span::styled(
                format!("{:<7}", cohort.age),
                options.value_style(),
            )];
            // the bar fades into the panel surface like the web
            // dashboard's area fills did
            spans.extend(
                gradient::area_fade((0xf5, 0x9e, 0x0b), (0x1a, 0x1a, 0x2e), filled.max(1))
                    .into_iter()
                    .take(filled)
                    .map(|color| Span::styled("█", Style::default().fg(color))),
            );
            spans.push(Span::styled(
                format!(" {}", format_compact(cohort.users)),
                options.value_style(),
            ));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_sentiment(frame: &mut Frame, rect: Rect, sentiment: &[Sentiment]) {
    let items: Vec<_> = sentiment
        .iter()
        .map(|row| {
            let mentions = format_grouped(row.mentions);
            let engagement = format_percent(row.engagement);
            let tone = match row.sentiment.as_str() {
                "Positive" => styles::up(std::cmp::Ordering::Greater),
                "Negative" => styles::up(std::cmp::Ordering::Less),
                _ => styles::label(),
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<9}", row.sentiment), tone),
                Span::styled(format!("{mentions:>10} mentions  "), styles::text()),
                Span::styled(format!("{engagement} engagement"), styles::up(engagement.sign())),
            ]);
            ratatui::widgets::ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(panel("Social Sentiment"));
    frame.render_widget(list, rect);
}
