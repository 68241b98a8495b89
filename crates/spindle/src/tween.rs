use crate::geometry::Vec2;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Complete,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn join(self, other: Progress) -> Progress {
        if self == Self::Running || other == Self::Running {
            Self::Running
        } else {
            Self::Complete
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, end: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, end: f64, t: f64) -> f64 {
        self + (end - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, end: Vec2, t: f64) -> Vec2 {
        Vec2::lerp(self, end, t)
    }
}

type Completion = Box<dyn FnOnce()>;

pub struct Tween<T: Lerp> {
    start: T,
    end: T,
    value: T,
    duration: Duration,
    elapsed: Duration,
    finished: bool,
    on_complete: Option<Completion>,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, end: T, duration: Duration) -> Self {
        Self {
            start,
            end,
            value: start,
            duration,
            elapsed: Duration::ZERO,
            finished: false,
            on_complete: None,
        }
    }

    /// Called once, after the frame that writes the exact end value.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Advances by `dt` and returns `Complete` on the final frame and every call after it.
    pub fn tick(&mut self, dt: Duration) -> Progress {
        if self.finished {
            return Progress::Complete;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.value = self.end;
            self.finished = true;
            if let Some(f) = self.on_complete.take() {
                f();
            }
            return Progress::Complete;
        }

        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.value = self.start.lerp(self.end, t);
        Progress::Running
    }
}

impl<T: Lerp + fmt::Debug> fmt::Debug for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("value", &self.value)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(100);

    #[test]
    fn test_scalar_tween_reaches_end() {
        let mut tween = Tween::new(0.0, 1.0, Duration::from_millis(500));

        assert_eq!(tween.tick(FRAME), Progress::Running);
        assert!((tween.value() - 0.2).abs() < 1e-9);

        let mut frames = 1;
        while tween.tick(FRAME) == Progress::Running {
            frames += 1;
        }
        assert_eq!(frames, 4);
        assert_eq!(tween.value(), 1.0);
        assert_eq!(tween.tick(FRAME), Progress::Complete);
    }

    #[test]
    fn test_completion_fires_once() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut tween = Tween::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0), FRAME * 3)
            .on_complete(move || counter.set(counter.get() + 1));

        tween.tick(FRAME);
        tween.tick(FRAME);
        assert_eq!(count.get(), 0);

        assert_eq!(tween.tick(FRAME * 2), Progress::Complete);
        assert_eq!(tween.value(), Vec2::new(100.0, 50.0));
        assert_eq!(count.get(), 1);

        assert_eq!(tween.tick(FRAME), Progress::Complete);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut tween = Tween::new(1.0, 0.0, Duration::ZERO);
        assert_eq!(tween.value(), 1.0);
        assert_eq!(tween.tick(Duration::ZERO), Progress::Complete);
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_progress_join() {
        assert_eq!(Progress::Complete.join(Progress::Complete), Progress::Complete);
        assert_eq!(Progress::Complete.join(Progress::Running), Progress::Running);
        assert_eq!(Progress::Running.join(Progress::Complete), Progress::Running);
    }
}
