use std::ops::ControlFlow;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Tick period of the count-up effect, roughly one display frame.
pub const TICK: Duration = Duration::from_millis(16);

/// Default run length of a stat-tile animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Converged,
}

/// Count-up run state. Advances by a fixed per-tick increment and clamps
/// to the target on the tick that reaches or passes it, so the rendered
/// sequence never overshoots.
///
/// Whether frames render as whole numbers is decided once from the
/// target, not per frame: a whole target shows rounded intermediate
/// values even though the accumulator is fractional.
#[derive(Clone, Debug)]
pub struct CountUp {
    target: f64,
    current: f64,
    step: f64,
    whole: bool,
    prefix: String,
    suffix: String,
    phase: Phase,
}

impl CountUp {
    pub fn new(
        target: f64,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        duration: Duration,
    ) -> Self {
        // at least one tick, so a zero duration still emits a frame
        let ticks = (duration.as_millis() as f64 / TICK.as_millis() as f64).max(1.0);
        Self {
            target,
            current: 0.0,
            step: target / ticks,
            whole: target.fract() == 0.0,
            prefix: prefix.into(),
            suffix: suffix.into(),
            phase: Phase::Running,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance one tick. A zero or negative target converges immediately:
    /// the accumulator already satisfies `current >= target`, so the
    /// first tick clamps and emits the target itself.
    pub fn tick(&mut self) -> Phase {
        if self.phase == Phase::Converged {
            return self.phase;
        }
        self.current += self.step;
        if self.current >= self.target {
            self.current = self.target;
            self.phase = Phase::Converged;
        }
        self.phase
    }

    /// Current frame text, decoration included.
    pub fn text(&self) -> String {
        let value = if self.whole {
            format!("{:.0}", self.current)
        } else {
            format!("{:.1}", self.current)
        };
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

/// Where rendered frames go. The animator only ever writes.
pub trait TextSink {
    fn set_text(&self, text: String);
}

/// Shared text cell: the animator task writes, render systems read.
#[derive(Clone, Debug, Default)]
pub struct SharedText(Arc<RwLock<String>>);

impl SharedText {
    pub fn get(&self) -> String {
        self.0.read().expect("poison").clone()
    }
}

impl TextSink for SharedText {
    fn set_text(&self, text: String) {
        *self.0.write().expect("poison") = text;
    }
}

/// Repeating-timer seam. Production drives a tokio interval task; tests
/// drive ticks by hand. The job deregisters itself by returning `Break`.
pub trait Scheduler {
    fn repeat(&self, period: Duration, job: Box<dyn FnMut() -> ControlFlow<()> + Send>);
}

/// Spawns each repeating job as a self-terminating task on the runtime.
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn repeat(&self, period: Duration, mut job: Box<dyn FnMut() -> ControlFlow<()> + Send>) {
        self.handle.spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                if job().is_break() {
                    break;
                }
            }
        });
    }
}

/// Count `sink` up to `target` over `duration`. A missing sink is a
/// no-op: nothing is written and nothing is scheduled. Overlapping runs
/// against the same sink are not coordinated; the last scheduled run
/// keeps writing after earlier ones converge.
pub fn animate<S>(
    sink: Option<S>,
    target: f64,
    prefix: &str,
    suffix: &str,
    duration: Duration,
    scheduler: &impl Scheduler,
) where
    S: TextSink + Send + 'static,
{
    let Some(sink) = sink else {
        return;
    };
    let mut counter = CountUp::new(target, prefix, suffix, duration);
    scheduler.repeat(
        TICK,
        Box::new(move || {
            let phase = counter.tick();
            sink.set_text(counter.text());
            match phase {
                Phase::Running => ControlFlow::Continue(()),
                Phase::Converged => ControlFlow::Break(()),
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::Mutex;

    /// Hand-cranked scheduler: collects jobs and steps them without any
    /// wall-clock involvement.
    #[derive(Default)]
    struct ManualScheduler {
        jobs: RefCell<Vec<Option<Box<dyn FnMut() -> ControlFlow<()> + Send>>>>,
    }

    impl ManualScheduler {
        fn job_count(&self) -> usize {
            self.jobs.borrow().len()
        }

        /// Step every live job once. Returns how many were still live.
        fn step(&self) -> usize {
            let mut jobs = self.jobs.borrow_mut();
            let mut live = 0;
            for slot in jobs.iter_mut() {
                if let Some(job) = slot {
                    live += 1;
                    if job().is_break() {
                        *slot = None;
                    }
                }
            }
            live
        }

        /// Step until every job has deregistered itself, with a runaway cap.
        fn run(&self, cap: usize) -> usize {
            for ticks in 0..cap {
                if self.step() == 0 {
                    return ticks;
                }
            }
            panic!("scheduler still live after {cap} ticks");
        }
    }

    impl Scheduler for ManualScheduler {
        fn repeat(&self, _period: Duration, job: Box<dyn FnMut() -> ControlFlow<()> + Send>) {
            self.jobs.borrow_mut().push(Some(job));
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Recorder {
        fn frames(&self) -> Vec<String> {
            self.0.lock().expect("poison").clone()
        }
    }

    impl TextSink for Recorder {
        fn set_text(&self, text: String) {
            self.0.lock().expect("poison").push(text);
        }
    }

    fn parse(frame: &str, prefix: &str, suffix: &str) -> f64 {
        frame
            .strip_prefix(prefix)
            .and_then(|f| f.strip_suffix(suffix))
            .and_then(|f| f.parse().ok())
            .unwrap_or_else(|| panic!("malformed frame {frame:?}"))
    }

    #[test]
    fn frames_are_monotone_and_end_on_the_target() {
        let scheduler = ManualScheduler::default();
        let recorder = Recorder::default();
        let duration = Duration::from_millis(1200);
        animate(
            Some(recorder.clone()),
            394.3,
            "$",
            "B",
            duration,
            &scheduler,
        );

        let budget = 1200 / 16 + 1;
        let ticks = scheduler.run(budget + 1);
        assert!(ticks <= budget, "converged in {ticks} ticks, budget {budget}");

        let frames = recorder.frames();
        assert_eq!(frames.last().map(String::as_str), Some("$394.3B"));
        let values: Vec<f64> = frames.iter().map(|f| parse(f, "$", "B")).collect();
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
        assert!(values.iter().all(|v| *v <= 394.3));
    }

    #[test]
    fn whole_target_renders_integer_frames_throughout() {
        let scheduler = ManualScheduler::default();
        let recorder = Recorder::default();
        animate(
            Some(recorder.clone()),
            1334.0,
            "",
            "",
            Duration::from_millis(160),
            &scheduler,
        );
        scheduler.run(32);

        for frame in recorder.frames() {
            assert!(
                !frame.contains('.'),
                "intermediate frame {frame:?} is not a whole number"
            );
        }
        assert_eq!(recorder.frames().last().map(String::as_str), Some("1334"));
    }

    #[test]
    fn zero_target_emits_exactly_one_frame() {
        let scheduler = ManualScheduler::default();
        let recorder = Recorder::default();
        animate(
            Some(recorder.clone()),
            0.0,
            "+",
            "%",
            DEFAULT_DURATION,
            &scheduler,
        );

        let ticks = scheduler.run(8);
        assert_eq!(ticks, 1);
        assert_eq!(recorder.frames(), vec!["+0%".to_string()]);
    }

    #[test]
    fn negative_target_shows_the_target_itself_after_one_tick() {
        let scheduler = ManualScheduler::default();
        let recorder = Recorder::default();
        animate(
            Some(recorder.clone()),
            -42.0,
            "",
            "",
            DEFAULT_DURATION,
            &scheduler,
        );

        scheduler.run(8);
        assert_eq!(recorder.frames(), vec!["-42".to_string()]);
    }

    #[test]
    fn missing_sink_schedules_and_writes_nothing() {
        let scheduler = ManualScheduler::default();
        animate(
            None::<Recorder>,
            100.0,
            "",
            "",
            DEFAULT_DURATION,
            &scheduler,
        );
        assert_eq!(scheduler.job_count(), 0);
    }

    #[test]
    fn overlapping_runs_on_one_sink_let_the_last_scheduled_win() {
        let scheduler = ManualScheduler::default();
        let recorder = Recorder::default();
        let short = Duration::from_millis(64);
        animate(Some(recorder.clone()), 10.0, "", "", short, &scheduler);
        animate(Some(recorder.clone()), 20.0, "", "", short, &scheduler);

        scheduler.run(32);
        assert_eq!(recorder.frames().last().map(String::as_str), Some("20"));
    }

    #[test]
    fn state_machine_stays_converged_once_clamped() {
        let mut counter = CountUp::new(5.0, "", "", Duration::from_millis(32));
        assert_eq!(counter.phase(), Phase::Running);
        while counter.tick() == Phase::Running {}
        assert_eq!(counter.text(), "5");
        assert_eq!(counter.tick(), Phase::Converged);
        assert_eq!(counter.text(), "5");
    }
}
