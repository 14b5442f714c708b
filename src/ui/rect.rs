use ratatui::layout::{Margin, Rect};

/// Center a `width` x `height` box inside `r`, clamped to fit.
pub fn centered(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal = if width == 0 {
        0
    } else {
        r.width.saturating_sub(width) / 2
    };
    let vertical = if height == 0 {
        0
    } else {
        r.height.saturating_sub(height) / 2
    };
    r.inner(&Margin {
        horizontal,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_a_smaller_box() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered(20, 10, outer);
        assert_eq!(inner, Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn oversized_request_collapses_to_the_outer_rect() {
        let outer = Rect::new(0, 0, 10, 4);
        let inner = centered(100, 40, outer);
        assert_eq!(inner, outer);
    }
}
