/// Key-event pattern with an explicit modifier set. The building block
/// for the `key!`/`ctrl!`/`shift!` shorthands below; match only presses
/// so release/repeat events on Windows don't double-fire.
#[doc(hidden)]
#[macro_export]
macro_rules! key_press {
    ($code:pat, $modifiers:pat) => {
        ::crossterm::event::KeyEvent {
            code: $code,
            modifiers: $modifiers,
            kind: ::crossterm::event::KeyEventKind::Press,
            state: ::crossterm::event::KeyEventState::NONE,
        }
    };
}

#[macro_export]
macro_rules! key {
    ($key:literal) => {
        $crate::key_press!(
            ::crossterm::event::KeyCode::Char($key),
            ::crossterm::event::KeyModifiers::NONE
        )
    };
    ($key:tt) => {
        $crate::key_press!(
            ::crossterm::event::KeyCode::$key,
            ::crossterm::event::KeyModifiers::NONE
        )
    };
}

#[macro_export]
macro_rules! ctrl {
    ($key:literal) => {
        $crate::key_press!(
            ::crossterm::event::KeyCode::Char($key),
            ::crossterm::event::KeyModifiers::CONTROL
        )
    };
}

#[macro_export]
macro_rules! shift {
    ($key:literal) => {
        $crate::key_press!(
            ::crossterm::event::KeyCode::Char($key),
            ::crossterm::event::KeyModifiers::SHIFT
        )
    };
}
