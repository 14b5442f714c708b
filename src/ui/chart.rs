use bevy_ecs::system::Resource;
use ratatui::style::{Color, Style};

use super::styles;

/// Axis/tick label hook. Wired to the `helper::number` formatters the
/// same way the frontend handed them to the chart engine as callbacks.
pub type LabelFormatter = fn(f64) -> String;

/// Process-wide chart styling, built once at startup and passed to the
/// option builders. Replaces the frontend's mutable `Chart.defaults`.
#[derive(Clone, Copy, Debug, Resource)]
pub struct ChartDefaults {
    pub text: Color,
    pub grid: Color,
    pub legend: bool,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            text: styles::MUTED,
            // 4% white over the panel surface
            grid: Color::Rgb(0x23, 0x23, 0x36),
            legend: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LineOptions {
    pub text: Color,
    pub grid: Color,
    pub legend: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub y_labels: Option<LabelFormatter>,
}

impl LineOptions {
    pub fn with_y_labels(mut self, formatter: LabelFormatter) -> Self {
        self.y_labels = Some(formatter);
        self
    }

    /// Tick label for a y-axis value, through the hook when one is set.
    pub fn y_label(&self, value: f64) -> String {
        match self.y_labels {
            Some(formatter) => formatter(value),
            None => format!("{value:.0}"),
        }
    }

    pub fn axis_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn grid_style(&self) -> Style {
        Style::default().fg(self.grid)
    }
}

pub fn line_options(
    defaults: &ChartDefaults,
    y_title: impl Into<String>,
    x_title: impl Into<String>,
) -> LineOptions {
    let y_title = y_title.into();
    let x_title = x_title.into();
    LineOptions {
        text: defaults.text,
        grid: defaults.grid,
        legend: defaults.legend,
        x_title: (!x_title.is_empty()).then_some(x_title),
        y_title: (!y_title.is_empty()).then_some(y_title),
        y_labels: None,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BarOptions {
    pub text: Color,
    pub grid: Color,
    pub horizontal: bool,
    /// Grid lines along the x axis (only when bars run horizontally).
    pub grid_x: bool,
    /// Grid lines along the y axis (only when bars run vertically).
    pub grid_y: bool,
}

impl BarOptions {
    pub fn value_style(&self) -> Style {
        Style::default().fg(self.text)
    }
}

pub fn bar_options(defaults: &ChartDefaults, horizontal: bool) -> BarOptions {
    BarOptions {
        text: defaults.text,
        grid: defaults.grid,
        horizontal,
        grid_x: horizontal,
        grid_y: !horizontal,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DonutOptions {
    pub text: Color,
    /// Hollow center as a fraction of the radius.
    pub cutout: f64,
    pub legend: bool,
}

pub fn donut_options(defaults: &ChartDefaults) -> DonutOptions {
    DonutOptions {
        text: defaults.text,
        cutout: 0.7,
        legend: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::format_billions;

    #[test]
    fn line_options_carry_the_defaults() {
        let defaults = ChartDefaults::default();
        let options = line_options(&defaults, "Revenue", "");
        assert_eq!(options.text, defaults.text);
        assert_eq!(options.grid, defaults.grid);
        assert_eq!(options.y_title.as_deref(), Some("Revenue"));
        assert_eq!(options.x_title, None);
        assert!(!options.legend);
    }

    #[test]
    fn y_label_goes_through_the_formatter_hook() {
        let defaults = ChartDefaults::default();
        let options = line_options(&defaults, "", "").with_y_labels(format_billions);
        assert_eq!(options.y_label(394.328), "$394.3B");

        let bare = line_options(&defaults, "", "");
        assert_eq!(bare.y_label(394.328), "394");
    }

    #[test]
    fn bar_grid_follows_the_value_axis() {
        let defaults = ChartDefaults::default();
        let vertical = bar_options(&defaults, false);
        assert!(vertical.grid_y && !vertical.grid_x);

        let horizontal = bar_options(&defaults, true);
        assert!(horizontal.grid_x && !horizontal.grid_y);
    }

    #[test]
    fn donut_hides_its_legend_and_keeps_the_cutout() {
        let defaults = ChartDefaults {
            legend: true,
            ..ChartDefaults::default()
        };
        let options = donut_options(&defaults);
        assert!(!options.legend);
        assert!((options.cutout - 0.7).abs() < f64::EPSILON);
    }
}
