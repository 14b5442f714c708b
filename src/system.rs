use std::sync::atomic::Ordering;

use atomic::Atomic;
use bevy_ecs::prelude::*;
use ratatui::prelude::Rect;

use crate::app::{AppState, POPUP, POPUP_HELP, RT};
use crate::data::{Dataset, ReadyState, Stats, STORE};
use crate::render::{self, DirtyFlags};
use crate::ui::{chart::ChartDefaults, Content};
use crate::views;
use crate::widgets::{
    animate, Loading, LoadingWidget, SharedText, Terminal, TextSink, TokioScheduler,
    DEFAULT_DURATION,
};

static API_STATE: Atomic<ReadyState> = Atomic::new(ReadyState::Connecting);

pub fn ready_state() -> ReadyState {
    API_STATE.load(Ordering::Relaxed)
}

fn set_ready(state: ReadyState) {
    API_STATE.store(state, Ordering::Relaxed);
}

/// The overview's four animated stat tiles, addressed by id like the
/// frontend's counter elements were.
pub struct StatBoard {
    cells: [(&'static str, &'static str, SharedText); 4],
}

pub static TILES: std::sync::LazyLock<StatBoard> = std::sync::LazyLock::new(StatBoard::new);

impl StatBoard {
    fn new() -> Self {
        Self {
            cells: [
                ("total-revenue", "Total Revenue", SharedText::default()),
                ("peak-revenue", "Peak Revenue", SharedText::default()),
                ("units-sold", "Units Sold", SharedText::default()),
                ("active-users", "Active Users", SharedText::default()),
            ],
        }
    }

    /// Sink for one tile; `None` when no tile carries the id.
    pub fn sink(&self, id: &str) -> Option<TileSink> {
        self.cells
            .iter()
            .find(|(cell_id, _, _)| *cell_id == id)
            .map(|(_, _, cell)| TileSink(cell.clone()))
    }

    pub fn snapshot(&self) -> [(&'static str, String); 4] {
        let cell = |i: usize| (self.cells[i].1, self.cells[i].2.get());
        [cell(0), cell(1), cell(2), cell(3)]
    }
}

/// Tile text cell that also wakes the render loop on every frame.
pub struct TileSink(SharedText);

impl TextSink for TileSink {
    fn set_text(&self, text: String) {
        self.0.set_text(text);
        render::request(DirtyFlags::OVERVIEW);
    }
}

fn animate_tiles(stats: &Stats) {
    let Some(handle) = RT.get() else {
        return;
    };
    let scheduler = TokioScheduler::new(handle.clone());
    animate(
        TILES.sink("total-revenue"),
        stats.total_revenue,
        "$",
        "B",
        DEFAULT_DURATION,
        &scheduler,
    );
    animate(
        TILES.sink("peak-revenue"),
        stats.peak_revenue,
        "$",
        "B",
        DEFAULT_DURATION,
        &scheduler,
    );
    animate(
        TILES.sink("units-sold"),
        stats.total_units,
        "",
        "M",
        DEFAULT_DURATION,
        &scheduler,
    );
    animate(
        TILES.sink("active-users"),
        stats.active_users,
        "",
        "",
        DEFAULT_DURATION,
        &scheduler,
    );
}

/// Fetch one dataset into the store. Returns whether the fetch landed.
pub async fn refresh_dataset(dataset: Dataset) -> bool {
    let result = match dataset {
        Dataset::Stats => crate::api::fetch_stats().await.map(|stats| {
            STORE.set_stats(Some(stats));
            animate_tiles(&stats);
        }),
        Dataset::Revenue => crate::api::fetch_revenue().await.map(|rows| STORE.set_revenue(rows)),
        Dataset::Penetration => crate::api::fetch_penetration()
            .await
            .map(|rows| STORE.set_penetration(rows)),
        Dataset::RegionRevenue => crate::api::fetch_region_revenue()
            .await
            .map(|rows| STORE.set_region_revenue(rows)),
        Dataset::ModelShare => crate::api::fetch_model_share()
            .await
            .map(|rows| STORE.set_model_share(rows)),
        Dataset::CountryShare => crate::api::fetch_country_share()
            .await
            .map(|rows| STORE.set_country_share(rows)),
        Dataset::Quarterly => crate::api::fetch_quarterly()
            .await
            .map(|rows| STORE.set_quarterly(rows)),
        Dataset::SalesSummary => crate::api::fetch_sales_summary()
            .await
            .map(|rows| STORE.set_sales_summary(rows)),
        Dataset::SalesByModel => crate::api::fetch_sales_by_model()
            .await
            .map(|rows| STORE.set_sales_by_model(rows)),
        Dataset::Demographics => crate::api::fetch_demographics()
            .await
            .map(|rows| STORE.set_demographics(rows)),
        Dataset::Sentiment => crate::api::fetch_sentiment()
            .await
            .map(|rows| STORE.set_sentiment(rows)),
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("failed to refresh {}: {err:#}", dataset.endpoint());
            false
        }
    }
}

fn refresh(page: DirtyFlags, datasets: &'static [Dataset]) {
    let Some(handle) = RT.get() else {
        return;
    };
    handle.spawn(async move {
        let mut ok = true;
        for dataset in datasets {
            ok &= refresh_dataset(*dataset).await;
        }
        set_ready(if ok {
            ReadyState::Open
        } else {
            ReadyState::Closed
        });
        render::request(page.with_footer());
    });
}

pub fn refresh_overview() {
    refresh(DirtyFlags::OVERVIEW, &[Dataset::Stats, Dataset::Revenue]);
}

pub fn refresh_dashboard() {
    refresh(
        DirtyFlags::DASHBOARD,
        &[
            Dataset::Revenue,
            Dataset::RegionRevenue,
            Dataset::ModelShare,
            Dataset::Quarterly,
        ],
    );
}

pub fn refresh_report() {
    refresh(
        DirtyFlags::REPORT,
        &[
            Dataset::SalesSummary,
            Dataset::SalesByModel,
            Dataset::CountryShare,
            Dataset::Revenue,
        ],
    );
}

pub fn refresh_story() {
    refresh(
        DirtyFlags::STORY,
        &[
            Dataset::Penetration,
            Dataset::Demographics,
            Dataset::Sentiment,
        ],
    );
}

pub fn enter_overview() {
    refresh_overview();
}

pub fn exit_overview() {
    crate::app::LAST_STATE.store(AppState::Overview, Ordering::Relaxed);
}

pub fn enter_dashboard() {
    refresh_dashboard();
}

pub fn exit_dashboard() {
    crate::app::LAST_STATE.store(AppState::Dashboard, Ordering::Relaxed);
}

pub fn enter_report() {
    refresh_report();
}

pub fn exit_report() {
    crate::app::LAST_STATE.store(AppState::Report, Ordering::Relaxed);
}

pub fn enter_story() {
    refresh_story();
}

pub fn exit_story() {
    crate::app::LAST_STATE.store(AppState::Story, Ordering::Relaxed);
}

pub fn error(mut terminal: ResMut<Terminal>, err: Res<Content<'static>>) {
    _ = terminal.draw(|frame| {
        frame.render_widget(err.clone(), frame.size());
    });
}

pub fn loading(mut terminal: ResMut<Terminal>, loading: Res<Loading>) {
    _ = terminal.draw(|frame| {
        frame.render_widget(LoadingWidget::from(&*loading), frame.size());
    });
}

/// Split the screen into navbar row, page content, footer row.
fn chrome(rect: Rect) -> (Rect, Rect, Rect) {
    let top = Rect { height: 1, ..rect };
    let bottom = Rect {
        y: rect.y + rect.height.saturating_sub(1),
        height: 1,
        ..rect
    };
    let content = Rect {
        y: rect.y + 1,
        height: rect.height.saturating_sub(2),
        ..rect
    };
    (top, content, bottom)
}

fn popup(frame: &mut ratatui::Frame, rect: Rect) {
    if POPUP.load(Ordering::Relaxed) & POPUP_HELP != 0 {
        views::help::render(frame, rect);
    }
}

pub fn render_overview(
    mut terminal: ResMut<Terminal>,
    state: Res<State<AppState>>,
    defaults: Res<ChartDefaults>,
) {
    _ = terminal.draw(|frame| {
        let (top, content, bottom) = chrome(frame.size());
        views::navbar::render(frame, top, *state.get());
        views::footer::render(frame, bottom, ready_state());

        let tiles = TILES.snapshot();
        let revenue = STORE.revenue();
        views::overview::render(frame, content, &tiles, &revenue, &*defaults);
        popup(frame, content);
    });
}

pub fn render_dashboard(
    mut terminal: ResMut<Terminal>,
    state: Res<State<AppState>>,
    defaults: Res<ChartDefaults>,
) {
    _ = terminal.draw(|frame| {
        let (top, content, bottom) = chrome(frame.size());
        views::navbar::render(frame, top, *state.get());
        views::footer::render(frame, bottom, ready_state());

        let revenue = STORE.revenue();
        let regions = STORE.region_revenue();
        let models = STORE.model_share();
        let quarterly = STORE.quarterly();
        views::dashboard::render(
            frame, content, &revenue, &regions, &models, &quarterly, &*defaults,
        );
        popup(frame, content);
    });
}

pub fn render_report(mut terminal: ResMut<Terminal>, state: Res<State<AppState>>) {
    _ = terminal.draw(|frame| {
        let (top, content, bottom) = chrome(frame.size());
        views::navbar::render(frame, top, *state.get());
        views::footer::render(frame, bottom, ready_state());

        let summary = STORE.sales_summary();
        let by_model = STORE.sales_by_model();
        let country = STORE.country_share();
        let revenue = STORE.revenue();
        views::report::render(frame, content, &summary, &by_model, &country, &revenue);
        popup(frame, content);
    });
}

pub fn render_story(
    mut terminal: ResMut<Terminal>,
    state: Res<State<AppState>>,
    defaults: Res<ChartDefaults>,
) {
    _ = terminal.draw(|frame| {
        let (top, content, bottom) = chrome(frame.size());
        views::navbar::render(frame, top, *state.get());
        views::footer::render(frame, bottom, ready_state());

        let penetration = STORE.penetration();
        let demographics = STORE.demographics();
        let sentiment = STORE.sentiment();
        views::story::render(
            frame,
            content,
            &penetration,
            &demographics,
            &sentiment,
            &*defaults,
        );
        popup(frame, content);
    });
}

#[cfg(test)]
mod tests {
    use super::TILES;

    #[test]
    fn tiles_resolve_by_id() {
        assert!(TILES.sink("total-revenue").is_some());
        assert!(TILES.sink("active-users").is_some());
        assert!(TILES.sink("nonexistent").is_none());
    }

    #[test]
    fn snapshot_keeps_tile_order() {
        let labels: Vec<&str> = TILES.snapshot().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Total Revenue", "Peak Revenue", "Units Sold", "Active Users"]);
    }
}
