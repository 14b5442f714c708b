use std::ops::{Deref, DerefMut};

use bevy_ecs::prelude::*;
use ratatui::backend::CrosstermBackend;

#[derive(Resource)]
pub struct Terminal(ratatui::Terminal<CrosstermBackend<std::io::Stdout>>);

impl Deref for Terminal {
    type Target = ratatui::Terminal<CrosstermBackend<std::io::Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Terminal {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Default for Terminal {
    fn default() -> Self {
        let backend = CrosstermBackend::new(std::io::stdout());
        match ratatui::Terminal::new(backend) {
            Ok(mut terminal) => {
                // the backend keeps whatever was on screen, so clear explicitly
                _ = terminal.clear();
                Self(terminal)
            }
            Err(err) => {
                eprintln!("failed to initialize terminal backend: {err}");
                std::process::exit(1);
            }
        }
    }
}

impl Terminal {
    pub fn enter_full_screen() {
        use crossterm::{cursor, terminal};

        _ = terminal::enable_raw_mode();
        _ = crossterm::execute!(
            std::io::stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            terminal::Clear(terminal::ClearType::Purge),
            cursor::MoveTo(0, 0),
            cursor::Hide
        );
    }

    pub fn exit_full_screen() {
        use crossterm::{cursor, terminal};

        _ = crossterm::execute!(
            std::io::stdout(),
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        _ = terminal::disable_raw_mode();
    }

    /// Restore the terminal, then exit the process.
    pub fn graceful_exit(code: i32) -> ! {
        Self::exit_full_screen();
        std::process::exit(code);
    }
}
