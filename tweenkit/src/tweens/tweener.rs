use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::Error;
use crate::targets::{Target, TweenKind};
use crate::tweens::{Easing, LoopMode, TweenDescriptor, TweenHandle, TweenScheduler};
use crate::utils::events::{EventHandler, EventManager};
use crate::utils::Vec3;

/// Lifecycle of a [`Tweener`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum TweenerState {
    /// No tween runs: the target rests on its resting value.
    #[default]
    Idle,
    /// The forward tween runs, from the origin toward the destination.
    Animating,
    /// The restore tween runs, back toward the origin.
    Reversing,
}

impl Display for TweenerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            TweenerState::Idle => "idle",
            TweenerState::Animating => "animating",
            TweenerState::Reversing => "reversing",
        };
        write!(f, "{}", state)
    }
}

/// Lists all events a [`Tweener`] can emit/listen.
pub enum TweenerEvent {
    /// Triggered when a forward animation starts.
    OnStart,
    /// Triggered when a forward animation reaches its destination.
    OnComplete,
}

/// Convert events to string to facilitate usage with [`EventManager`].
impl From<TweenerEvent> for String {
    fn from(value: TweenerEvent) -> Self {
        let event = match value {
            TweenerEvent::OnStart => "start",
            TweenerEvent::OnComplete => "complete",
        };
        event.into()
    }
}

/// Animates one property of one target between two bounds.
///
/// A tweener plays at most one tween at a time. Playing animates the property from
/// the origin to the destination; once the destination is reached the tweener turns
/// around on its own and plays back to the origin, so the target always comes to
/// rest where it started. [`stop`] triggers that same return leg early, from
/// wherever the property currently is.
///
/// Clones share the same state and can be captured by event handlers.
///
/// [`stop`]: Tweener::stop
///
/// # Example
/// ```
/// use tweenkit::mocks::target::MockTarget;
/// use tweenkit::targets::TweenKind;
/// use tweenkit::tweens::{Easing, TweenScheduler, Tweener};
/// use tweenkit::utils::Vec3;
///
/// let scheduler = TweenScheduler::default();
/// let panel = MockTarget::new();
///
/// let tweener = Tweener::new(&scheduler, panel.clone(), TweenKind::Move)
///     .set_from(Vec3::ZERO)
///     .set_to(Vec3::new(120.0, 0.0, 0.0))
///     .set_duration(0.5)
///     .set_easing(Easing::SineInOut);
///
/// tweener.play().unwrap();
/// scheduler.tick(0.25);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone)]
pub struct Tweener {
    #[cfg_attr(feature = "serde", serde(skip))]
    scheduler: TweenScheduler,
    #[cfg_attr(feature = "serde", serde(skip))]
    events: EventManager,
    #[cfg_attr(feature = "serde", serde(with = "crate::targets::arc_rwlock_serde"))]
    inner: Arc<RwLock<Inner>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
struct Inner {
    target: Box<dyn Target>,
    kind: TweenKind,
    /// Animation bounds. While reversing, the two are swapped.
    from: Vec3,
    to: Vec3,
    duration: f32,
    delay: f32,
    easing: Easing,
    loop_mode: LoopMode,
    /// When set, forward plays start from the property current value instead of
    /// snapping it to `from`.
    from_current: bool,
    /// When set (the default), `enable()` plays the animation.
    play_on_enable: bool,
    /// When set (the default), stopping plays the return leg back to the origin.
    /// When unset, stopping cancels on the spot.
    restore_on_stop: bool,
    /// When set, the target deactivates once the animation has settled.
    deactivate_on_complete: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    state: TweenerState,
    #[cfg_attr(feature = "serde", serde(skip))]
    handle: Option<TweenHandle>,
}

impl Tweener {
    /// Creates a tweener animating the given property of the given target.
    ///
    /// Bounds default to zero and one, the duration to one second: use the setters
    /// to configure the animation.
    pub fn new<T: Target + 'static>(
        scheduler: &TweenScheduler,
        target: T,
        kind: TweenKind,
    ) -> Self {
        Self {
            scheduler: scheduler.clone(),
            events: EventManager::default(),
            inner: Arc::new(RwLock::new(Inner {
                target: Box::new(target),
                kind,
                from: Vec3::ZERO,
                to: Vec3::ONE,
                duration: 1.0,
                delay: 0.0,
                easing: Easing::default(),
                loop_mode: LoopMode::default(),
                from_current: false,
                play_on_enable: true,
                restore_on_stop: true,
                deactivate_on_complete: false,
                state: TweenerState::Idle,
                handle: None,
            })),
        }
    }

    /// Sets the animation origin.
    pub fn set_from<V: Into<Vec3>>(self, from: V) -> Self {
        self.inner.write().from = from.into();
        self
    }

    /// Sets the animation destination.
    pub fn set_to<V: Into<Vec3>>(self, to: V) -> Self {
        self.inner.write().to = to.into();
        self
    }

    /// Sets the duration (in seconds) of one playthrough.
    pub fn set_duration(self, duration: f32) -> Self {
        self.inner.write().duration = duration;
        self
    }

    /// Sets the delay (in seconds) before a play starts moving, the return leg
    /// included.
    pub fn set_delay(self, delay: f32) -> Self {
        self.inner.write().delay = delay;
        self
    }

    /// Sets the easing curve, used by both the forward and the return leg.
    pub fn set_easing(self, easing: Easing) -> Self {
        self.inner.write().easing = easing;
        self
    }

    /// Sets the loop behaviour of forward plays. Looping tweeners keep playing
    /// until stopped.
    pub fn set_loop(self, loop_mode: LoopMode) -> Self {
        self.inner.write().loop_mode = loop_mode;
        self
    }

    /// Forward plays start from the property current value instead of snapping it
    /// to the origin.
    pub fn set_from_current(self, from_current: bool) -> Self {
        self.inner.write().from_current = from_current;
        self
    }

    /// Plays the animation whenever [`Tweener::enable`] is called (the default).
    pub fn set_play_on_enable(self, play_on_enable: bool) -> Self {
        self.inner.write().play_on_enable = play_on_enable;
        self
    }

    /// Plays the return leg when stopping (the default). When unset, stopping
    /// cancels on the spot and the property keeps its current value.
    pub fn set_restore_on_stop(self, restore: bool) -> Self {
        self.inner.write().restore_on_stop = restore;
        self
    }

    /// Deactivates the target once the animation has fully settled back on its
    /// origin.
    pub fn set_deactivate_on_complete(self, deactivate: bool) -> Self {
        self.inner.write().deactivate_on_complete = deactivate;
        self
    }

    pub fn get_kind(&self) -> TweenKind {
        self.inner.read().kind
    }

    /// Returns the animation origin. While the return leg runs the bounds are
    /// swapped: this returns the current tween origin.
    pub fn get_from(&self) -> Vec3 {
        self.inner.read().from
    }

    pub fn get_to(&self) -> Vec3 {
        self.inner.read().to
    }

    pub fn get_duration(&self) -> f32 {
        self.inner.read().duration
    }

    pub fn get_state(&self) -> TweenerState {
        self.inner.read().state
    }

    pub fn is_playing(&self) -> bool {
        self.get_state() != TweenerState::Idle
    }

    /// Plays the animation forward, from the origin to the destination.
    ///
    /// Any tween already running on this tweener is cancelled first: a tweener
    /// drives at most one tween at a time. Unless `from_current` is set the
    /// property snaps to the origin immediately.
    ///
    /// Once the destination is reached (for non looping tweeners) the return leg
    /// starts on its own, see [`Tweener::stop`].
    ///
    /// # Errors
    /// Returns an `InvalidDuration` error when the configured duration is not
    /// strictly positive, and a `MissingCapability` error when `from_current`
    /// requires reading a property the target does not carry.
    pub fn play(&self) -> Result<(), Error> {
        {
            let mut inner = self.inner.write();

            if let Some(handle) = inner.handle.take() {
                self.scheduler.cancel(handle);
            }
            // A pending return leg left the bounds swapped.
            if inner.state == TweenerState::Reversing {
                inner.swap_bounds();
            }
            // Nothing is scheduled anymore: a failure below leaves the tweener idle.
            inner.state = TweenerState::Idle;

            let start = match inner.from_current {
                true => inner.target.get_property(inner.kind)?,
                false => {
                    let kind = inner.kind;
                    let from = inner.from;
                    inner.target.set_property(kind, from)?;
                    from
                }
            };

            let tweener = self.clone();
            let descriptor =
                TweenDescriptor::new(start, inner.to, inner.duration, Self::applier(&inner))
                    .set_delay(inner.delay)
                    .set_easing(inner.easing)
                    .set_loop(inner.loop_mode)
                    .on_complete(move || tweener.on_forward_complete());

            let handle = self.scheduler.start(descriptor)?;
            inner.handle = Some(handle);
            inner.state = TweenerState::Animating;
        }

        self.events.emit(TweenerEvent::OnStart, self.clone());
        Ok(())
    }

    /// Stops animating forward and plays the return leg, back to the origin.
    ///
    /// The return leg starts from wherever the property currently is: a tween
    /// stopped halfway travels back from halfway. Once it lands the tweener is
    /// idle, its bounds restored, and the target deactivates when
    /// `deactivate_on_complete` is set.
    ///
    /// When `restore_on_stop` is unset no return leg plays: the running tween is
    /// cancelled on the spot and the optional deactivation applies immediately.
    ///
    /// Stopping an idle tweener only applies the optional deactivation. Stopping
    /// an already reversing tweener is a no-op.
    ///
    /// # Errors
    /// Returns a `MissingCapability` error when the property cannot be read back
    /// from the target.
    pub fn stop(&self) -> Result<(), Error> {
        let mut inner = self.inner.write();
        match inner.state {
            TweenerState::Reversing => Ok(()),
            TweenerState::Idle => {
                if inner.deactivate_on_complete {
                    inner.target.set_active(false);
                }
                Ok(())
            }
            TweenerState::Animating => {
                if let Some(handle) = inner.handle.take() {
                    self.scheduler.cancel(handle);
                }

                if !inner.restore_on_stop {
                    inner.state = TweenerState::Idle;
                    if inner.deactivate_on_complete {
                        inner.target.set_active(false);
                    }
                    return Ok(());
                }

                // The forward tween is cancelled: a failure below leaves the
                // tweener idle with forward bounds.
                inner.state = TweenerState::Idle;

                // Swap the bounds and travel back from the current value: no snap.
                inner.swap_bounds();
                let start = match inner.target.get_property(inner.kind) {
                    Ok(value) => value,
                    Err(err) => {
                        inner.swap_bounds();
                        return Err(err);
                    }
                };

                let tweener = self.clone();
                let descriptor =
                    TweenDescriptor::new(start, inner.to, inner.duration, Self::applier(&inner))
                        .set_delay(inner.delay)
                        .set_easing(inner.easing)
                        .on_complete(move || tweener.on_reverse_complete());

                match self.scheduler.start(descriptor) {
                    Ok(handle) => {
                        inner.handle = Some(handle);
                        inner.state = TweenerState::Reversing;
                        Ok(())
                    }
                    Err(err) => {
                        inner.swap_bounds();
                        Err(err)
                    }
                }
            }
        }
    }

    /// Activates the target, and plays the animation when `play_on_enable` is set.
    pub fn enable(&self) -> Result<(), Error> {
        self.inner.write().target.set_active(true);
        let play_on_enable = self.inner.read().play_on_enable;
        match play_on_enable {
            true => self.play(),
            false => Ok(()),
        }
    }

    /// Stops the animation, see [`Tweener::stop`].
    ///
    /// The counterpart of [`Tweener::enable`]: with `restore_on_stop` the target
    /// animates back to its origin (and deactivates when
    /// `deactivate_on_complete` is set) rather than vanishing mid-animation.
    pub fn disable(&self) -> Result<(), Error> {
        self.stop()
    }

    /// Register event handler for a specific event name, see [`TweenerEvent`].
    ///
    /// The handler receives a clone of this tweener as payload.
    pub fn on<S, F, Fut>(&self, event: S, callback: F) -> EventHandler
    where
        S: Into<String>,
        F: FnMut(Tweener) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.events.on(event, callback)
    }

    /// Builds the apply callback writing interpolated values onto the target.
    fn applier(inner: &Inner) -> impl FnMut(Vec3) + Send + 'static {
        let mut target = inner.target.clone();
        let kind = inner.kind;
        move |value| {
            if let Err(err) = target.set_property(kind, value) {
                log::warn!("Tween value could not be applied: {}", err);
            }
        }
    }

    /// The forward tween landed on the destination: turn around.
    fn on_forward_complete(&self) {
        self.inner.write().handle = None;
        if let Err(err) = self.stop() {
            log::warn!("Return animation could not be started: {}", err);
        }
        self.events.emit(TweenerEvent::OnComplete, self.clone());
    }

    /// The return leg landed back on the origin: rest.
    fn on_reverse_complete(&self) {
        let mut inner = self.inner.write();
        inner.handle = None;
        inner.swap_bounds();
        inner.state = TweenerState::Idle;
        if inner.deactivate_on_complete {
            inner.target.set_active(false);
        }
    }
}

impl Inner {
    fn swap_bounds(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

impl Debug for Tweener {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Tweener")
            .field("target", &inner.target)
            .field("kind", &inner.kind)
            .field("from", &inner.from)
            .field("to", &inner.to)
            .field("duration", &inner.duration)
            .field("state", &inner.state)
            .finish()
    }
}

impl Display for Tweener {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        write!(
            f,
            "Tweener [kind={}, from={}, to={}, duration={}s, state={}]",
            inner.kind, inner.from, inner.to, inner.duration, inner.state
        )
    }
}
