use ratatui::style::Color;

/// Two-stop linear gradient between 24-bit RGB endpoints. The terminal
/// rendition of the frontend's canvas gradients: instead of a pixel ramp
/// we hand out interpolated cell colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    from: (u8, u8, u8),
    to: (u8, u8, u8),
}

pub const BLUE: Gradient = Gradient::new((0x4f, 0x8e, 0xff), (0x8b, 0x5c, 0xf6));
pub const PINK: Gradient = Gradient::new((0xec, 0x48, 0x99), (0x8b, 0x5c, 0xf6));
pub const CYAN: Gradient = Gradient::new((0x06, 0xb6, 0xd4), (0x4f, 0x8e, 0xff));
pub const GREEN: Gradient = Gradient::new((0x10, 0xb9, 0x81), (0x06, 0xb6, 0xd4));
pub const AMBER: Gradient = Gradient::new((0xf5, 0x9e, 0x0b), (0xef, 0x44, 0x44));

impl Gradient {
    pub const fn new(from: (u8, u8, u8), to: (u8, u8, u8)) -> Self {
        Self { from, to }
    }

    /// Color at position `t` in `[0, 1]`, clamped outside that range.
    pub fn at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let mixed = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            mixed.round() as u8
        };
        Color::Rgb(
            channel(self.from.0, self.to.0),
            channel(self.from.1, self.to.1),
            channel(self.from.2, self.to.2),
        )
    }

    /// `n` evenly spaced colors from the first endpoint to the second.
    /// `n = 1` yields the first endpoint alone.
    pub fn steps(&self, n: usize) -> Vec<Color> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![self.at(0.0)];
        }
        (0..n)
            .map(|i| self.at(i as f64 / (n - 1) as f64))
            .collect()
    }
}

/// Fade `color` into `bg` over `n` stops, nearest stop fully saturated.
/// Stands in for the frontend's `color+'55' → color+'00'` area fill,
/// which terminals cannot express with alpha.
pub fn area_fade(color: (u8, u8, u8), bg: (u8, u8, u8), n: usize) -> Vec<Color> {
    Gradient::new(color, bg).steps(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let g = Gradient::new((0, 0, 0), (255, 255, 255));
        assert_eq!(g.at(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(g.at(1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn midpoint_interpolates_each_channel() {
        let g = Gradient::new((0, 100, 200), (100, 0, 250));
        assert_eq!(g.at(0.5), Color::Rgb(50, 50, 225));
    }

    #[test]
    fn positions_outside_unit_range_clamp() {
        let g = BLUE;
        assert_eq!(g.at(-1.0), g.at(0.0));
        assert_eq!(g.at(2.0), g.at(1.0));
    }

    #[test]
    fn steps_span_both_endpoints() {
        let g = Gradient::new((10, 20, 30), (110, 120, 130));
        let steps = g.steps(5);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], Color::Rgb(10, 20, 30));
        assert_eq!(steps[4], Color::Rgb(110, 120, 130));
        assert_eq!(steps[2], Color::Rgb(60, 70, 80));
    }

    #[test]
    fn degenerate_step_counts() {
        let g = AMBER;
        assert!(g.steps(0).is_empty());
        assert_eq!(g.steps(1), vec![g.at(0.0)]);
    }

    #[test]
    fn area_fade_ends_on_the_background() {
        let fade = area_fade((0xec, 0x48, 0x99), (0x1a, 0x1a, 0x2e), 4);
        assert_eq!(fade[0], Color::Rgb(0xec, 0x48, 0x99));
        assert_eq!(fade[3], Color::Rgb(0x1a, 0x1a, 0x2e));
    }
}
