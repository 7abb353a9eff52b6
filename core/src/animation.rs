//! Color Animations
//!
//! An [`AnimationType`] is a shared descriptor: how long a fade lives, what
//! color it starts from, and how quickly it lets go. A [`ColorAnimation`]
//! is one running instance of a type applied to one text item.
//!
//! Fades are additive: at progress 0 the text shows the effect color, and
//! as progress reaches 1 it settles back on the text's own base color.

use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::{blend, Rgb};
use crate::console::{TextId, TextItem};

/// How long an animation lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Lifetime {
    /// A fixed duration
    Constant {
        #[serde(rename = "ms")]
        millis: u64,
    },
}

impl Lifetime {
    pub const fn constant(millis: u64) -> Self {
        Self::Constant { millis }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Constant { millis } => Duration::from_millis(millis),
        }
    }
}

/// How the effect strength decays over the animation's life
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFunction {
    /// Sine-shaped release: holds the effect early, lets go late
    Decelerating,
    /// Straight-line release
    Linear,
}

impl RateFunction {
    /// Effect strength for a progress value in `[0, 1]`
    ///
    /// Both curves start at 1 and end at 0.
    #[must_use]
    pub fn amount(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            // 1 - ease_in_sine(t)
            Self::Decelerating => (t * FRAC_PI_2).cos(),
            Self::Linear => 1.0 - t,
        }
    }
}

/// What an animation does to a text's color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorEffect {
    /// Blend from `color` back to the text's base color
    AlphaAdd { color: Rgb, rate: RateFunction },
}

/// Shared descriptor of a timed color transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationType {
    pub life: Lifetime,
    pub effect: ColorEffect,
}

impl AnimationType {
    /// A constant-life additive fade from `color`
    pub const fn fade(millis: u64, color: Rgb, rate: RateFunction) -> Self {
        Self {
            life: Lifetime::constant(millis),
            effect: ColorEffect::AlphaAdd { color, rate },
        }
    }

    /// Progress through the life for `elapsed`, clamped to `[0, 1]`
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let life = self.life.duration();
        if life.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / life.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether an instance that has run for `elapsed` is finished
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        match self.life {
            Lifetime::Constant { .. } => elapsed >= self.life.duration(),
        }
    }

    /// Apply this effect to `text` at `elapsed`
    ///
    /// Captures the text's base color the first time any fade touches it.
    pub fn apply(&self, text: &mut TextItem, elapsed: Duration) {
        match self.effect {
            ColorEffect::AlphaAdd { color, rate } => {
                let amount = rate.amount(self.progress(elapsed));
                let base = text.base_color();
                text.original_color = Some(base);
                text.color = blend(base, color, amount);
            }
        }
    }
}

/// Index into the animation type table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationTypeId(pub usize);

/// One running fade
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAnimation {
    pub kind: AnimationTypeId,
    pub text: TextId,
    pub elapsed: Duration,
}

/// Advances every running fade
#[derive(Debug, Default)]
pub struct ColorAnimationEngine {
    active: Vec<ColorAnimation>,
}

impl ColorAnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fade of type `kind` on `text`
    pub fn spawn(&mut self, kind: AnimationTypeId, text: TextId) {
        self.active.push(ColorAnimation {
            kind,
            text,
            elapsed: Duration::ZERO,
        });
    }

    /// Running fades, oldest first
    pub fn active(&self) -> &[ColorAnimation] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance all fades by `dt` and drop the ones that finished
    ///
    /// Entries are visited from the highest index down so that removing
    /// a finished entry never shifts one that is still to be visited.
    /// Entries whose type or text is not in the given tables are dropped.
    pub fn advance(&mut self, dt: Duration, types: &[AnimationType], texts: &mut [TextItem]) {
        for i in (0..self.active.len()).rev() {
            let anim = &mut self.active[i];
            anim.elapsed += dt;

            let (Some(kind), Some(text)) = (types.get(anim.kind.0), texts.get_mut(anim.text.0))
            else {
                tracing::warn!(?anim, "Dropping color animation with a dangling reference");
                self.active.remove(i);
                continue;
            };

            kind.apply(text, anim.elapsed);

            if kind.is_expired(anim.elapsed) {
                tracing::trace!(text = anim.text.0, "Color animation finished");
                self.active.remove(i);
            }
        }
    }
}
