use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use atomic::Atomic;
use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_ecs::system::{CommandQueue, InsertResource};
use tokio::sync::mpsc;

use crate::render::{self, DirtyFlags, RenderState};
use crate::system;
use crate::ui::{chart::ChartDefaults, Content};
use crate::widgets::{Loading, Terminal};

pub static RT: OnceLock<tokio::runtime::Handle> = OnceLock::new();
pub static POPUP: AtomicU8 = AtomicU8::new(0);
pub static LAST_STATE: Atomic<AppState> = Atomic::new(AppState::Overview);

pub const POPUP_HELP: u8 = 0b1;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, States, bytemuck::NoUninit)]
#[repr(u8)]
pub enum AppState {
    Error,
    #[default]
    Loading,
    Overview,
    Dashboard,
    Report,
    Story,
}

pub async fn run(_args: crate::Args) {
    let (update_tx, mut update_rx) = mpsc::unbounded_channel::<CommandQueue>();
    RT.set(tokio::runtime::Handle::current()).unwrap();

    let mut app = bevy_app::App::new();
    app.add_state::<AppState>()
        .init_resource::<Terminal>()
        .init_resource::<Loading>()
        .insert_resource(ChartDefaults::default())
        .add_systems(Update, system::loading.run_if(in_state(AppState::Loading)))
        .add_systems(Update, system::error.run_if(in_state(AppState::Error)))
        .add_systems(OnEnter(AppState::Overview), system::enter_overview)
        .add_systems(OnExit(AppState::Overview), system::exit_overview)
        .add_systems(
            Update,
            system::render_overview.run_if(in_state(AppState::Overview)),
        )
        .add_systems(OnEnter(AppState::Dashboard), system::enter_dashboard)
        .add_systems(OnExit(AppState::Dashboard), system::exit_dashboard)
        .add_systems(
            Update,
            system::render_dashboard.run_if(in_state(AppState::Dashboard)),
        )
        .add_systems(OnEnter(AppState::Report), system::enter_report)
        .add_systems(OnExit(AppState::Report), system::exit_report)
        .add_systems(
            Update,
            system::render_report.run_if(in_state(AppState::Report)),
        )
        .add_systems(OnEnter(AppState::Story), system::enter_story)
        .add_systems(OnExit(AppState::Story), system::exit_story)
        .add_systems(
            Update,
            system::render_story.run_if(in_state(AppState::Story)),
        );

    // Probe the analytics API, then land on the overview or the error
    // screen. Page data loads through the OnEnter hooks.
    tokio::spawn({
        let tx = update_tx.clone();
        async move {
            match crate::api::fetch_stats().await {
                Ok(_) => {
                    tracing::info!(base = crate::api::base_url(), "analytics API reachable");
                    let mut queue = CommandQueue::default();
                    queue.push(InsertResource {
                        resource: NextState(Some(AppState::Overview)),
                    });
                    _ = tx.send(queue);

                    // warm the remaining datasets so tab switches land
                    // on data instead of empty panels
                    use strum::IntoEnumIterator;
                    for dataset in crate::data::Dataset::iter().filter(|d| *d != crate::data::Dataset::Stats) {
                        _ = system::refresh_dataset(dataset).await;
                    }
                    render::request(DirtyFlags::ALL);
                }
                Err(err) => {
                    tracing::error!("analytics API unreachable: {err:#}");
                    let mut queue = CommandQueue::default();
                    queue.push(InsertResource {
                        resource: Content::new(
                            "Cannot reach the analytics API",
                            crate::api::config_guide(),
                        ),
                    });
                    queue.push(InsertResource {
                        resource: NextState(Some(AppState::Error)),
                    });
                    _ = tx.send(queue);
                }
            }
        }
    });

    // ~30 FPS rendering, plus a 1 Hz tick for the footer clock
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut clock_tick = tokio::time::interval(Duration::from_secs(1));
    clock_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // Give the terminal a moment to settle in the alternate screen
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut events = crossterm::event::EventStream::new();
    let mut render_state = RenderState::new();
    render_state.mark_all_dirty();

    loop {
        tokio::select! {
            _ = render_tick.tick() => {
                render_state.mark_dirty(render::take_pending());
                if render_state.needs_render() {
                    app.update();
                    render_state.clear();
                } else {
                    render_state.skip();
                }
            }
            _ = clock_tick.tick() => {
                // footer clock, plus the spinner while loading
                render_state.mark_dirty(DirtyFlags::FOOTER | DirtyFlags::LOADING);
            }
            Some(mut cmd) = update_rx.recv() => {
                cmd.apply(&mut app.world);
                render_state.mark_dirty(DirtyFlags::ALL);
            }
            Some(event) = tokio_stream::StreamExt::next(&mut events) => {
                let event = match event {
                    Ok(crossterm::event::Event::Key(event)) => event,
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::error!("failed to read terminal events: {err}");
                        continue;
                    }
                };
                if event.kind != crossterm::event::KeyEventKind::Press {
                    continue;
                }

                // any key dismisses the help popup
                if POPUP.swap(0, Ordering::Relaxed) != 0 {
                    render_state.mark_dirty(DirtyFlags::ALL);
                    continue;
                }

                let state = *app.world.resource::<State<AppState>>().get();
                match state {
                    AppState::Error => return,
                    AppState::Loading => {
                        if matches!(event, ctrl!('c') | key!('q')) {
                            return;
                        }
                        continue;
                    }
                    AppState::Overview
                    | AppState::Dashboard
                    | AppState::Report
                    | AppState::Story => (),
                }

                handle_global_keys(&mut app, event, state, &mut render_state);
            }
        }
    }
}

fn handle_global_keys(
    app: &mut bevy_app::App,
    event: crossterm::event::KeyEvent,
    state: AppState,
    render_state: &mut RenderState,
) {
    match event {
        ctrl!('c') | key!('q') => Terminal::graceful_exit(0),
        key!('1') if state != AppState::Overview => {
            switch(app, AppState::Overview, render_state);
        }
        key!('2') if state != AppState::Dashboard => {
            switch(app, AppState::Dashboard, render_state);
        }
        key!('3') if state != AppState::Report => {
            switch(app, AppState::Report, render_state);
        }
        key!('4') if state != AppState::Story => {
            switch(app, AppState::Story, render_state);
        }
        key!('r') | shift!('R') => {
            match state {
                AppState::Overview => system::refresh_overview(),
                AppState::Dashboard => system::refresh_dashboard(),
                AppState::Report => system::refresh_report(),
                AppState::Story => system::refresh_story(),
                AppState::Loading | AppState::Error => return,
            }
            render_state.mark_dirty(page_flags(state));
        }
        key!('?') | shift!('?') => {
            POPUP.store(POPUP_HELP, Ordering::Relaxed);
            render_state.mark_dirty(DirtyFlags::POPUP_HELP | page_flags(state));
        }
        key!(Esc) => {
            let last_state = LAST_STATE.load(Ordering::Relaxed);
            if last_state != state {
                switch(app, last_state, render_state);
            }
        }
        _ => (),
    }
}

fn switch(app: &mut bevy_app::App, next: AppState, render_state: &mut RenderState) {
    app.world.insert_resource(NextState(Some(next)));
    render_state.mark_all_dirty();
}

fn page_flags(state: AppState) -> DirtyFlags {
    match state {
        AppState::Overview => DirtyFlags::OVERVIEW,
        AppState::Dashboard => DirtyFlags::DASHBOARD,
        AppState::Report => DirtyFlags::REPORT,
        AppState::Story => DirtyFlags::STORY,
        AppState::Loading => DirtyFlags::LOADING,
        AppState::Error => DirtyFlags::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::{page_flags, AppState};
    use crate::render::DirtyFlags;

    #[test]
    fn every_state_maps_to_exactly_one_page_flag() {
        let states = [
            AppState::Overview,
            AppState::Dashboard,
            AppState::Report,
            AppState::Story,
            AppState::Loading,
            AppState::Error,
        ];
        for state in states {
            assert_eq!(page_flags(state).bits().count_ones(), 1);
        }
        assert_eq!(page_flags(AppState::Report), DirtyFlags::REPORT);
    }
}
