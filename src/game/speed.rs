use std::time::Duration;

/// How the tick interval shrinks as the score goes up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SpeedPolicy {
    /// Interval at the start of a run
    pub(crate) initial: Duration,

    /// The interval never drops below this
    pub(crate) minimum: Duration,

    /// How much the interval drops at each milestone
    pub(crate) step: Duration,

    /// A milestone is reached every time the score hits a multiple of this
    pub(crate) points_per_step: u32,
}

/// The current time between ticks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Speed {
    policy: SpeedPolicy,

    /// The interval without boost
    base: Duration,

    boosted: bool,
}

impl Speed {
    pub(super) fn new(policy: SpeedPolicy) -> Speed {
        Speed {
            policy,
            base: policy.initial,
            boosted: false,
        }
    }

    /// The interval to wait before the next tick
    pub(super) fn interval(&self) -> Duration {
        if self.boosted {
            self.base / 2
        } else {
            self.base
        }
    }

    pub(super) fn boosted(&self) -> bool {
        self.boosted
    }

    /// Start boosting.  Does nothing if already boosting.
    pub(super) fn boost(&mut self) {
        self.boosted = true;
    }

    /// Stop boosting, going back to the unboosted interval
    pub(super) fn release(&mut self) {
        self.boosted = false;
    }

    /// Apply the speed-up policy after the score changed to `score`.  Returns
    /// `true` if the interval changed.
    pub(super) fn on_score(&mut self, score: u32) -> bool {
        if score == 0 || score % self.policy.points_per_step.max(1) != 0 {
            return false;
        }
        let faster = self
            .base
            .saturating_sub(self.policy.step)
            .max(self.policy.minimum);
        let changed = faster != self.base;
        self.base = faster;
        changed
    }
}
