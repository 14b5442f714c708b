mod dirty_flags;

pub use dirty_flags::{request, take_pending, DirtyFlags, RenderState};
