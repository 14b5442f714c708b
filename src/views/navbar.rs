use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::{app::AppState, ui::styles};

/// Tab index for a page state; `None` for the non-page states.
pub fn tab_index(state: AppState) -> Option<usize> {
    match state {
        AppState::Overview => Some(0),
        AppState::Dashboard => Some(1),
        AppState::Report => Some(2),
        AppState::Story => Some(3),
        AppState::Loading | AppState::Error => None,
    }
}

pub fn render(frame: &mut Frame, rect: Rect, state: AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rect);

    let tabs = vec![
        Line::from(" Overview [1] "),
        Line::from(" Dashboard [2] "),
        Line::from(" Report [3] "),
        Line::from(" Story [4] "),
    ];

    let tabs = Tabs::new(tabs)
        .style(styles::text())
        .highlight_style(styles::tab_selected())
        .divider("|")
        .select(tab_index(state).unwrap_or(0));

    let dark_gray_style = styles::dark_gray();
    let brand = Span::styled(concat!("iRevolution v", env!("CARGO_PKG_VERSION")), dark_gray_style);
    let help = Span::styled("[?] Help", dark_gray_style);
    let refresh = Span::styled("[R] Refresh", dark_gray_style);
    let quit = Span::styled("[Q] Quit", dark_gray_style);
    let hints = Paragraph::new(Line::from(vec![
        brand,
        Span::styled(" | ", dark_gray_style),
        help,
        Span::styled(" ", dark_gray_style),
        refresh,
        Span::styled(" ", dark_gray_style),
        quit,
    ]))
    .alignment(Alignment::Right);

    frame.render_widget(tabs, chunks[0]);
    frame.render_widget(hints, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::tab_index;
    use crate::app::AppState;

    #[test]
    fn page_states_map_to_their_tabs() {
        assert_eq!(tab_index(AppState::Overview), Some(0));
        assert_eq!(tab_index(AppState::Dashboard), Some(1));
        assert_eq!(tab_index(AppState::Report), Some(2));
        assert_eq!(tab_index(AppState::Story), Some(3));
    }

    #[test]
    fn transient_states_have_no_tab() {
        assert_eq!(tab_index(AppState::Loading), None);
        assert_eq!(tab_index(AppState::Error), None);
    }
}
