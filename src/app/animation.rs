//! Eased count-up for score rings

use crate::constants::SCORE_ANIMATION_DURATION;
use std::time::{Duration, Instant};

/// Colour band for a score, fixed by the target value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Success,
    Warning,
    Danger,
}

impl ScoreTier {
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            ScoreTier::Success
        } else if score >= 60 {
            ScoreTier::Warning
        } else {
            ScoreTier::Danger
        }
    }
}

/// One sampled step of the animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFrame {
    pub value: u32,
    /// Visible share of the ring, 0.0..=1.0
    pub arc_fraction: f32,
    pub done: bool,
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Counts from 0 to `target` over a fixed duration. Runs once and cannot be
/// cancelled; the frame loop keeps repainting until `done`.
#[derive(Debug, Clone)]
pub struct ScoreAnimation {
    target: u8,
    tier: ScoreTier,
    started: Instant,
    duration: Duration,
}

impl ScoreAnimation {
    pub fn starting_at(target: u8, started: Instant) -> Self {
        let target = target.min(100);
        Self {
            target,
            tier: ScoreTier::for_score(target),
            started,
            duration: SCORE_ANIMATION_DURATION,
        }
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn tier(&self) -> ScoreTier {
        self.tier
    }

    pub fn frame(&self, now: Instant) -> ScoreFrame {
        self.sample(now.saturating_duration_since(self.started))
    }

    pub fn sample(&self, elapsed: Duration) -> ScoreFrame {
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        let eased = ease_out_cubic(t);
        let target = self.target as f32;
        let value = if t >= 1.0 {
            self.target as u32
        } else {
            (eased * target).floor() as u32
        };
        ScoreFrame {
            value,
            arc_fraction: eased * target / 100.0,
            done: t >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_target() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(80), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(79), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(60), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(59), ScoreTier::Danger);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::Danger);
    }

    #[test]
    fn counts_up_monotonically_to_exact_target() {
        let anim = ScoreAnimation::starting_at(73, Instant::now());
        assert_eq!(anim.tier(), ScoreTier::Warning);

        let mut last = 0;
        for ms in (0..=1500).step_by(16) {
            let frame = anim.sample(Duration::from_millis(ms));
            assert!(frame.value >= last, "value went backwards at {ms}ms");
            assert!(frame.value <= 73);
            last = frame.value;
        }

        let end = anim.sample(Duration::from_millis(1500));
        assert_eq!(end.value, 73);
        assert!(end.done);
        assert!((end.arc_fraction - 0.73).abs() < 1e-6);
        assert_eq!(anim.tier(), ScoreTier::Warning);
    }

    #[test]
    fn starts_at_zero_and_clamps_past_duration() {
        let anim = ScoreAnimation::starting_at(90, Instant::now());
        let start = anim.sample(Duration::ZERO);
        assert_eq!(start.value, 0);
        assert!(!start.done);
        assert_eq!(start.arc_fraction, 0.0);

        let late = anim.sample(Duration::from_secs(10));
        assert_eq!(late.value, 90);
        assert!(late.done);
    }

    #[test]
    fn easing_front_loads_progress() {
        let anim = ScoreAnimation::starting_at(100, Instant::now());
        let half = anim.sample(Duration::from_millis(750));
        // 1 - 0.5^3
        assert_eq!(half.value, 87);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn full_score_closes_the_ring() {
        let anim = ScoreAnimation::starting_at(100, Instant::now());
        let end = anim.sample(Duration::from_millis(1500));
        assert!((end.arc_fraction - 1.0).abs() < 1e-6);
    }
}
