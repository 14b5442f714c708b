mod countup;
mod loading;
mod terminal;

pub use countup::{
    animate, CountUp, Phase, Scheduler, SharedText, TextSink, TokioScheduler, DEFAULT_DURATION,
    TICK,
};
pub use loading::{Loading, LoadingWidget};
pub use terminal::Terminal;
