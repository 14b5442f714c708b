use itertools::Itertools;
use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, LineGauge},
    Frame,
};

use crate::data::{ModelShare, QuarterlyShare, RegionRevenue, RevenuePoint};
use crate::helper::{format_billions, format_percent};
use crate::ui::{
    chart::{self, ChartDefaults},
    gradient, styles,
};

/// Dashboard page: revenue line, regional bars, model-mix donut and
/// quarterly share, mirroring the web dashboard's four panels.
pub fn render(
    frame: &mut Frame,
    rect: Rect,
    revenue: &[RevenuePoint],
    regions: &[RegionRevenue],
    models: &[ModelShare],
    quarterly: &[QuarterlyShare],
    defaults: &ChartDefaults,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rect);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_revenue_line(frame, top[0], revenue, defaults);
    render_region_bars(frame, top[1], regions, defaults);
    render_model_donut(frame, bottom[0], models, defaults);
    render_quarterly_bars(frame, bottom[1], quarterly, defaults);
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border())
        .title(Span::styled(format!(" {} ", title.into()), styles::label()))
}

fn render_revenue_line(
    frame: &mut Frame,
    rect: Rect,
    revenue: &[RevenuePoint],
    defaults: &ChartDefaults,
) {
    let options = chart::line_options(defaults, "Revenue ($bn)", "").with_y_labels(format_billions);

    let points: Vec<(f64, f64)> = revenue
        .iter()
        .map(|p| (f64::from(p.year), p.revenue))
        .collect();
    let Some((x_min, x_max)) = points.iter().map(|(x, _)| *x).minmax().into_option() else {
        frame.render_widget(panel("Annual Revenue"), rect);
        return;
    };
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(gradient::BLUE.at(0.0)))
        .data(&points)];

    let x_labels = vec![
        Span::styled(format!("{x_min:.0}"), options.axis_style()),
        Span::styled(format!("{x_max:.0}"), options.axis_style()),
    ];
    let y_labels = vec![
        Span::styled(options.y_label(0.0), options.axis_style()),
        Span::styled(options.y_label(y_max / 2.0), options.axis_style()),
        Span::styled(options.y_label(y_max), options.axis_style()),
    ];

    let mut y_axis = Axis::default()
        .style(options.grid_style())
        .bounds([0.0, y_max * 1.05])
        .labels(y_labels);
    if let Some(title) = &options.y_title {
        y_axis = y_axis.title(Span::styled(title.clone(), options.axis_style()));
    }

    let widget = Chart::new(datasets)
        .block(panel("Annual Revenue"))
        .x_axis(
            Axis::default()
                .style(options.grid_style())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(y_axis);
    frame.render_widget(widget, rect);
}

fn render_region_bars(
    frame: &mut Frame,
    rect: Rect,
    regions: &[RegionRevenue],
    defaults: &ChartDefaults,
) {
    let options = chart::bar_options(defaults, false);

    let Some(latest) = regions.iter().max_by_key(|r| r.year) else {
        frame.render_widget(panel("Revenue by Region"), rect);
        return;
    };

    let colors = gradient::BLUE.steps(RegionRevenue::REGIONS.len());
    let bars: Vec<Bar> = RegionRevenue::REGIONS
        .iter()
        .zip(latest.values())
        .zip(colors)
        .map(|((region, value), color)| {
            Bar::default()
                .label(Span::raw(*region).into())
                .value(value.round() as u64)
                .text_value(format!("{value:.0}"))
                .style(Style::default().fg(color))
                .value_style(options.value_style())
        })
        .collect();

    let widget = BarChart::default()
        .block(panel(format!("Revenue by Region ({})", latest.year)))
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(widget, rect);
}

fn render_model_donut(
    frame: &mut Frame,
    rect: Rect,
    models: &[ModelShare],
    defaults: &ChartDefaults,
) {
    let options = chart::donut_options(defaults);
    let block = panel("Model Mix");
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let shown = models.iter().take(inner.height as usize).collect_vec();
    let colors = gradient::PINK.steps(shown.len().max(1));
    for (i, (model, color)) in shown.iter().zip(colors).enumerate() {
        let row = Rect {
            y: inner.y + i as u16,
            height: 1,
            ..inner
        };
        let ratio = (model.share / 100.0).clamp(0.0, 1.0);
        let label = format!("{:<14} {:>6}", model.model, format_percent(model.share));
        // a 70% cutout renders as a thin ring, not a filled band
        if options.cutout > 0.5 {
            let widget = LineGauge::default()
                .ratio(ratio)
                .label(Span::styled(label, Style::default().fg(options.text)))
                .line_set(symbols::line::THICK)
                .gauge_style(Style::default().fg(color).bg(defaults.grid));
            frame.render_widget(widget, row);
        } else {
            let widget = Gauge::default()
                .ratio(ratio)
                .label(Span::styled(label, Style::default().fg(options.text)))
                .gauge_style(Style::default().fg(color));
            frame.render_widget(widget, row);
        }
    }
}

fn render_quarterly_bars(
    frame: &mut Frame,
    rect: Rect,
    quarterly: &[QuarterlyShare],
    defaults: &ChartDefaults,
) {
    let options = chart::bar_options(defaults, false);

    let Some(latest_year) = quarterly.iter().map(|q| q.year).max() else {
        frame.render_widget(panel("Quarterly Share"), rect);
        return;
    };
    let colors = gradient::GREEN.steps(4);

    let groups: Vec<(String, Vec<Bar>)> = quarterly
        .iter()
        .filter(|q| q.year == latest_year)
        .map(|row| {
            let quarters = [row.q1, row.q2, row.q3, row.q4];
            let bars = quarters
                .iter()
                .zip(["Q1", "Q2", "Q3", "Q4"])
                .zip(colors.iter())
                .map(|((share, quarter), color)| {
                    Bar::default()
                        .label(Span::raw(quarter).into())
                        .value(share.round() as u64)
                        .text_value(format_percent(*share))
                        .style(Style::default().fg(*color))
                        .value_style(options.value_style())
                })
                .collect();
            (row.brand.clone(), bars)
        })
        .collect();

    let mut widget = BarChart::default()
        .block(panel(format!("Quarterly Share ({latest_year})")))
        .bar_width(6)
        .bar_gap(1)
        .group_gap(3);

    for (brand, bars) in &groups {
        widget = widget.data(
            BarGroup::default()
                .label(Span::styled(brand.clone(), styles::label()).into())
                .bars(bars),
        );
    }
    frame.render_widget(widget, rect);
}
