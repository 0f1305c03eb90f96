//! Row expansion animation.
//!
//! The expanded detail block slides in from a negative offset while fading
//! in, mirrored on collapse. Offsets are in abstract units; the renderer maps
//! the slide progress to how many detail lines are revealed and the opacity
//! to a dimming ramp.

use std::f32::consts::FRAC_PI_2;

pub const OFFSET_HIDDEN: f32 = -200.0;
pub const OFFSET_SHOWN: f32 = 0.0;
pub const SLIDE_MS: u32 = 500;
pub const FADE_MS: u32 = 300;
pub const FADE_DELAY_MS: u32 = 300;

/// Tick interval the app drives animations with.
pub const ANIM_TICK_MS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Quarter sine ease-in: gentle start, fast finish.
    Sin,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Sin => 1.0 - (t * FRAC_PI_2).cos(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    delay_ms: u32,
    duration_ms: u32,
    elapsed_ms: u32,
    easing: Easing,
}

impl Tween {
    pub fn fixed(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            delay_ms: 0,
            duration_ms: 0,
            elapsed_ms: 0,
            easing: Easing::Sin,
        }
    }

    /// Re-aim at `to` starting from the current value, so a mid-flight
    /// reversal is continuous rather than jumping to an endpoint.
    pub fn retarget(&mut self, to: f32, duration_ms: u32, delay_ms: u32) {
        self.from = self.value();
        self.to = to;
        self.duration_ms = duration_ms;
        self.delay_ms = delay_ms;
        self.elapsed_ms = 0;
    }

    pub fn advance(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    pub fn value(&self) -> f32 {
        if self.elapsed_ms <= self.delay_ms {
            return self.from;
        }
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = (self.elapsed_ms - self.delay_ms) as f32 / self.duration_ms as f32;
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimPhase {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Drives the slide + fade pair for the one expandable row of a screen.
#[derive(Debug, Clone)]
pub struct RowAnimator {
    offset: Tween,
    opacity: Tween,
    phase: AnimPhase,
}

impl RowAnimator {
    pub fn new() -> Self {
        Self {
            offset: Tween::fixed(OFFSET_HIDDEN),
            opacity: Tween::fixed(0.0),
            phase: AnimPhase::Collapsed,
        }
    }

    pub fn phase(&self) -> AnimPhase {
        self.phase
    }

    pub fn expand(&mut self) {
        if matches!(self.phase, AnimPhase::Expanding | AnimPhase::Expanded) {
            return;
        }
        self.offset.retarget(OFFSET_SHOWN, SLIDE_MS, 0);
        self.opacity.retarget(1.0, FADE_MS, FADE_DELAY_MS);
        self.phase = AnimPhase::Expanding;
    }

    pub fn collapse(&mut self) {
        if matches!(self.phase, AnimPhase::Collapsing | AnimPhase::Collapsed) {
            return;
        }
        self.offset.retarget(OFFSET_HIDDEN, SLIDE_MS, 0);
        self.opacity.retarget(0.0, FADE_MS, FADE_DELAY_MS);
        self.phase = AnimPhase::Collapsing;
    }

    /// Snap to fully collapsed. Used when another row takes over the
    /// expansion and the block restarts from hidden.
    pub fn reset(&mut self) {
        self.offset = Tween::fixed(OFFSET_HIDDEN);
        self.opacity = Tween::fixed(0.0);
        self.phase = AnimPhase::Collapsed;
    }

    /// Advance by `dt_ms`. Returns true while an animation is running.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        match self.phase {
            AnimPhase::Expanding | AnimPhase::Collapsing => {
                self.offset.advance(dt_ms);
                self.opacity.advance(dt_ms);
                if self.offset.is_done() && self.opacity.is_done() {
                    self.phase = if self.phase == AnimPhase::Expanding {
                        AnimPhase::Expanded
                    } else {
                        AnimPhase::Collapsed
                    };
                }
                true
            }
            AnimPhase::Collapsed | AnimPhase::Expanded => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, AnimPhase::Expanding | AnimPhase::Collapsing)
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// How many of `total` detail lines the slide has uncovered.
    pub fn revealed_lines(&self, total: usize) -> usize {
        let progress = (1.0 - self.offset() / OFFSET_HIDDEN).clamp(0.0, 1.0);
        (total as f32 * progress).round() as usize
    }
}

impl Default for RowAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(animator: &mut RowAnimator) {
        // Slide lasts 500ms, fade 300ms after a 300ms delay; 1s covers both.
        for _ in 0..25 {
            animator.tick(ANIM_TICK_MS);
        }
    }

    #[test]
    fn test_expand_reaches_shown_values() {
        let mut animator = RowAnimator::new();
        animator.expand();
        assert_eq!(animator.phase(), AnimPhase::Expanding);

        run_to_rest(&mut animator);
        assert_eq!(animator.phase(), AnimPhase::Expanded);
        assert_eq!(animator.offset(), OFFSET_SHOWN);
        assert_eq!(animator.opacity(), 1.0);
    }

    #[test]
    fn test_collapse_round_trip() {
        let mut animator = RowAnimator::new();
        animator.expand();
        run_to_rest(&mut animator);

        animator.collapse();
        assert_eq!(animator.phase(), AnimPhase::Collapsing);
        run_to_rest(&mut animator);

        assert_eq!(animator.phase(), AnimPhase::Collapsed);
        assert_eq!(animator.offset(), OFFSET_HIDDEN);
        assert_eq!(animator.opacity(), 0.0);
    }

    #[test]
    fn test_fade_waits_for_delay() {
        let mut animator = RowAnimator::new();
        animator.expand();
        for _ in 0..5 {
            animator.tick(ANIM_TICK_MS);
        }
        // 200ms in: slide is under way, fade has not started.
        assert!(animator.offset() > OFFSET_HIDDEN);
        assert_eq!(animator.opacity(), 0.0);
    }

    #[test]
    fn test_mid_flight_collapse_is_continuous() {
        let mut animator = RowAnimator::new();
        animator.expand();
        for _ in 0..4 {
            animator.tick(ANIM_TICK_MS);
        }
        let offset_before = animator.offset();
        animator.collapse();
        // The reversal starts where the expansion left off.
        assert!((animator.offset() - offset_before).abs() < f32::EPSILON);
        run_to_rest(&mut animator);
        assert_eq!(animator.phase(), AnimPhase::Collapsed);
        assert_eq!(animator.offset(), OFFSET_HIDDEN);
    }

    #[test]
    fn test_revealed_lines_follow_slide() {
        let mut animator = RowAnimator::new();
        assert_eq!(animator.revealed_lines(10), 0);
        animator.expand();
        run_to_rest(&mut animator);
        assert_eq!(animator.revealed_lines(10), 10);
    }

    #[test]
    fn test_sin_easing_shape() {
        let early = Easing::Sin.apply(0.25);
        let late = 1.0 - Easing::Sin.apply(0.75);
        // Ease-in: covers less ground in the first quarter than the last.
        assert!(early < late);
        assert!((Easing::Sin.apply(1.0) - 1.0).abs() < 1e-6);
    }
}
