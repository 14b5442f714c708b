use std::sync::atomic::{AtomicU8, Ordering};

use bevy_ecs::system::Resource;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Default, Resource)]
pub struct Loading {
    index: AtomicU8,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LoadingWidget {
    index: u8,
}

impl From<&Loading> for LoadingWidget {
    fn from(loading: &Loading) -> Self {
        Self {
            index: loading.index.fetch_add(1, Ordering::Acquire),
        }
    }
}

impl Widget for LoadingWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = match self.index % 4 {
            1 => "◐ FETCHING DATA.  ",
            2 => "◓ FETCHING DATA.. ",
            3 => "◑ FETCHING DATA...",
            _ => "◒ FETCHING DATA   ",
        };
        let area = crate::ui::rect::centered(18, 1, area);
        Paragraph::new(text).render(area, buf);
    }
}
