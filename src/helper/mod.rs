pub mod number;

pub use number::{
    format_billions, format_compact, format_grouped, format_millions, format_percent, Compact,
    Sign,
};
