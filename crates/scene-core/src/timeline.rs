//! One-shot timers and tweens keyed to the scene clock.
//!
//! Everything here is polled: the frame loop calls [`Timeline::advance`]
//! with the current elapsed time and receives the events that came due.

use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

struct Timer<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// A set of independently cancellable one-shot timers.
pub struct Timeline<E> {
    timers: Vec<Timer<E>>,
    next_id: u32,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due, event });
        id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Remove and return every event due at or before `now`, earliest
    /// first; timers due at the same instant fire in scheduling order.
    pub fn advance(&mut self, now: Duration) -> SmallVec<[E; 4]> {
        let mut due: SmallVec<[Timer<E>; 4]> = SmallVec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due <= now {
                due.push(self.timers.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|t| t.event).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out: fast start, gentle landing.
    QuadOut,
}

impl Ease {
    #[inline]
    fn apply(self, p: f32) -> f32 {
        match self {
            Ease::Linear => p,
            Ease::QuadOut => 1.0 - (1.0 - p) * (1.0 - p),
        }
    }
}

/// Scalar interpolation between two values over a fixed window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn value_at(&self, now: Duration) -> f32 {
        if now <= self.start {
            return self.from;
        }
        if self.is_finished(now) {
            return self.to;
        }
        let p = (now - self.start).as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.ease.apply(p)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn advance_fires_only_due_timers_in_order() {
        let mut tl = Timeline::new();
        tl.schedule(secs(2.0), "late");
        tl.schedule(secs(1.0), "early");
        tl.schedule(secs(1.0), "early-second");
        assert!(tl.advance(secs(0.5)).is_empty());
        assert_eq!(tl.advance(secs(1.0)).as_slice(), &["early", "early-second"]);
        assert_eq!(tl.pending(), 1);
        assert_eq!(tl.advance(secs(10.0)).as_slice(), &["late"]);
        assert!(tl.advance(secs(20.0)).is_empty());
    }

    #[test]
    fn cancelling_one_timer_leaves_the_other() {
        let mut tl = Timeline::new();
        let a = tl.schedule(secs(1.0), 'a');
        let b = tl.schedule(secs(1.0), 'b');
        assert!(tl.cancel(a));
        assert!(!tl.cancel(a));
        assert!(tl.is_pending(b));
        assert_eq!(tl.advance(secs(1.0)).as_slice(), &['b']);
    }

    #[test]
    fn tween_holds_endpoints() {
        let tw = Tween {
            from: 1.0,
            to: 0.0,
            start: secs(1.5),
            duration: secs(1.5),
            ease: Ease::QuadOut,
        };
        assert_eq!(tw.value_at(secs(0.0)), 1.0);
        assert_eq!(tw.value_at(secs(1.5)), 1.0);
        assert_eq!(tw.value_at(secs(3.0)), 0.0);
        assert_eq!(tw.value_at(secs(9.0)), 0.0);
        let mid = tw.value_at(secs(2.25));
        // ease-out has covered 75% of the distance at the midpoint
        assert!((mid - 0.25).abs() < 1e-4);
    }

    #[test]
    fn tween_is_monotonic_for_decreasing_target() {
        let tw = Tween {
            from: 1.0,
            to: 0.0,
            start: secs(0.0),
            duration: secs(1.0),
            ease: Ease::QuadOut,
        };
        let mut prev = f32::MAX;
        for i in 0..=20 {
            let v = tw.value_at(secs(i as f32 * 0.05));
            assert!(v <= prev);
            prev = v;
        }
    }
}
