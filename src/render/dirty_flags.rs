use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use bitflags::bitflags;

bitflags! {
    /// Which parts of the UI need re-rendering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        const NONE = 0;
        /// Overview page (stat tiles and revenue sparkline)
        const OVERVIEW = 0b0000_0001;
        /// Dashboard page (line/bar/donut charts)
        const DASHBOARD = 0b0000_0010;
        /// Report page (sales tables)
        const REPORT = 0b0000_0100;
        /// Story page (penetration, demographics, sentiment)
        const STORY = 0b0000_1000;
        /// Footer clock and API status indicator
        const FOOTER = 0b0001_0000;
        /// Help popup
        const POPUP_HELP = 0b0010_0000;
        /// Loading screen spinner
        const LOADING = 0b0100_0000;
        /// Error screen
        const ERROR = 0b1000_0000;
        /// Full redraw
        const ALL = 0xFFFF_FFFF;
    }
}

impl DirtyFlags {
    #[inline]
    pub fn needs_render(self) -> bool {
        !self.is_empty()
    }

    /// Flags for the page a dataset refresh landed on, footer included
    /// so the status indicator tracks fetch outcomes.
    #[inline]
    #[must_use]
    pub fn with_footer(mut self) -> Self {
        self.insert(Self::FOOTER);
        self
    }
}

/// Redraw requests raised outside the render loop (fetch tasks, the
/// count-up animator). Drained into `RenderState` once per render tick.
static PENDING: AtomicU32 = AtomicU32::new(0);

pub fn request(flags: DirtyFlags) {
    PENDING.fetch_or(flags.bits(), Ordering::Relaxed);
}

pub fn take_pending() -> DirtyFlags {
    DirtyFlags::from_bits_retain(PENDING.swap(0, Ordering::Relaxed))
}

/// Render bookkeeping for the fixed-FPS loop.
#[derive(Debug)]
pub struct RenderState {
    dirty: DirtyFlags,
    last_render: Instant,
    render_count: u64,
    skip_count: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self {
            dirty: DirtyFlags::NONE,
            last_render: Instant::now(),
            render_count: 0,
            skip_count: 0,
        }
    }

    #[inline]
    pub fn needs_render(&self) -> bool {
        self.dirty.needs_render()
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }

    #[inline]
    pub fn mark_all_dirty(&mut self) {
        self.dirty = DirtyFlags::ALL;
    }

    /// Clear after a successful render.
    #[inline]
    pub fn clear(&mut self) {
        self.dirty = DirtyFlags::NONE;
        self.last_render = Instant::now();
        self.render_count += 1;
    }

    #[inline]
    pub fn skip(&mut self) {
        self.skip_count += 1;
    }

    #[inline]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[inline]
    pub fn skip_count(&self) -> u64 {
        self.skip_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_requests_drain_once() {
        request(DirtyFlags::OVERVIEW);
        request(DirtyFlags::FOOTER);
        let drained = take_pending();
        assert!(drained.contains(DirtyFlags::OVERVIEW | DirtyFlags::FOOTER));
        assert_eq!(take_pending(), DirtyFlags::NONE);
    }

    #[test]
    fn render_state_tracks_renders_and_skips() {
        let mut state = RenderState::new();
        assert!(!state.needs_render());

        state.mark_dirty(DirtyFlags::REPORT);
        assert!(state.needs_render());

        state.clear();
        assert!(!state.needs_render());
        assert_eq!(state.render_count(), 1);

        state.skip();
        assert_eq!(state.skip_count(), 1);
    }

    #[test]
    fn with_footer_adds_the_footer_bit() {
        let flags = DirtyFlags::DASHBOARD.with_footer();
        assert!(flags.contains(DirtyFlags::DASHBOARD));
        assert!(flags.contains(DirtyFlags::FOOTER));
    }
}
