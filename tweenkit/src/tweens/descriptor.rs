use std::fmt::{Debug, Display, Formatter};

use crate::tweens::Easing;
use crate::utils::Vec3;

/// Callback applying an interpolated value onto the animated object.
pub type ApplyFn = Box<dyn FnMut(Vec3) + Send>;
/// Callback fired once when a tween reaches terminal completion.
pub type CompleteFn = Box<dyn FnOnce() + Send>;

/// Defines what happens when a tween reaches the end of its duration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum LoopMode {
    /// Play once, then complete (default).
    #[default]
    None,
    /// Restart from the beginning, forever. The tween never completes.
    Loop,
    /// Play to the end, then back, forever. The tween never completes.
    PingPong,
}

impl Display for LoopMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            LoopMode::None => "none",
            LoopMode::Loop => "loop",
            LoopMode::PingPong => "pingpong",
        };
        write!(f, "{}", mode)
    }
}

/// Describes a single property tween: the value range, the timing, and the callbacks
/// through which the tween acts on the world.
///
/// A descriptor is consumed by [`TweenScheduler::start`], which validates it and
/// returns a handle to the running tween.
///
/// [`TweenScheduler::start`]: crate::tweens::TweenScheduler::start
///
/// # Example
/// ```
/// use tweenkit::tweens::{Easing, LoopMode, TweenDescriptor};
/// use tweenkit::utils::Vec3;
///
/// let tween = TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0, |_value| {
///     // apply the value onto the animated object
/// })
/// .set_delay(0.5)
/// .set_easing(Easing::SineInOut)
/// .set_loop(LoopMode::PingPong);
/// ```
pub struct TweenDescriptor {
    pub(crate) from: Vec3,
    pub(crate) to: Vec3,
    /// Duration of one playthrough, in seconds. Must be strictly positive.
    pub(crate) duration: f32,
    /// Time to wait before interpolation starts, in seconds.
    pub(crate) delay: f32,
    pub(crate) easing: Easing,
    pub(crate) loop_mode: LoopMode,
    pub(crate) apply: ApplyFn,
    pub(crate) on_complete: Option<CompleteFn>,
}

impl TweenDescriptor {
    /// Creates a descriptor animating from `from` to `to` over `duration` seconds.
    ///
    /// The `apply` callback receives every interpolated value, the final exact `to`
    /// included.
    pub fn new<F>(from: Vec3, to: Vec3, duration: f32, apply: F) -> Self
    where
        F: FnMut(Vec3) + Send + 'static,
    {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            easing: Easing::default(),
            loop_mode: LoopMode::default(),
            apply: Box::new(apply),
            on_complete: None,
        }
    }

    /// Sets the delay (in seconds) consumed before interpolation starts.
    pub fn set_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Sets the easing curve shaping the interpolation.
    pub fn set_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the loop behaviour once the duration elapses.
    pub fn set_loop(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    /// Registers a callback fired once when the tween completes.
    ///
    /// Looping tweens never complete: the callback only ever fires for
    /// [`LoopMode::None`].
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn get_from(&self) -> Vec3 {
        self.from
    }

    pub fn get_to(&self) -> Vec3 {
        self.to
    }

    pub fn get_duration(&self) -> f32 {
        self.duration
    }

    pub fn get_delay(&self) -> f32 {
        self.delay
    }

    pub fn get_easing(&self) -> Easing {
        self.easing
    }

    pub fn get_loop(&self) -> LoopMode {
        self.loop_mode
    }
}

impl Debug for TweenDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenDescriptor")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("loop_mode", &self.loop_mode)
            .finish()
    }
}

impl Display for TweenDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tween [{} => {}, duration={}s, delay={}s, easing={:?}, loop={}]",
            self.from, self.to, self.duration, self.delay, self.easing, self.loop_mode
        )
    }
}
