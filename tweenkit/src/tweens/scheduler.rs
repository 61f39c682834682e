use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{Error, InvalidDuration};
use crate::tweens::descriptor::{ApplyFn, CompleteFn};
use crate::tweens::{LoopMode, TweenDescriptor};
use crate::utils::task;
use crate::utils::task::TaskHandler;
use crate::utils::Vec3;

/// Identifies a running tween for [`TweenScheduler::cancel`].
pub type TweenHandle = usize;

type SyncedTweenList = Mutex<Vec<(TweenHandle, Arc<Mutex<ActiveTween>>)>>;

/// Schedules and advances tweens.
///
/// The scheduler owns no clock: time advances only when [`tick`] is called with an
/// elapsed delta, which makes it deterministic and trivial to test. The [`run`]
/// method spawns a runtime task that ticks it at a fixed rate for applications that
/// want wall-clock playback.
///
/// Clones share the same tween list: a controller hands out clones of its scheduler
/// and all of them schedule onto the same set.
///
/// [`tick`]: TweenScheduler::tick
/// [`run`]: TweenScheduler::run
#[derive(Clone, Default)]
pub struct TweenScheduler {
    tweens: Arc<SyncedTweenList>,
    next_id: Arc<AtomicUsize>,
}

/// Book-keeping for a scheduled tween.
struct ActiveTween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    /// Delay still to consume before `elapsed` starts counting.
    remaining_delay: f32,
    elapsed: f32,
    easing: crate::tweens::Easing,
    loop_mode: LoopMode,
    apply: ApplyFn,
    on_complete: Option<CompleteFn>,
}

impl ActiveTween {
    /// Advances the tween by `delta` seconds and applies the resulting value.
    ///
    /// Returns `true` when the tween reached terminal completion.
    fn advance(&mut self, mut delta: f32) -> bool {
        // The delay is consumed first: only the remaining delta moves the tween.
        if self.remaining_delay > 0.0 {
            if delta < self.remaining_delay {
                self.remaining_delay -= delta;
                return false;
            }
            delta -= self.remaining_delay;
            self.remaining_delay = 0.0;
        }

        self.elapsed += delta;
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);

        // At the end of a playthrough the exact `to` value is applied, bypassing the
        // easing so overshooting curves still land on target.
        let value = match t >= 1.0 {
            true => self.to,
            false => Vec3::lerp(self.from, self.to, self.easing.call(t)),
        };
        (self.apply)(value);

        if t >= 1.0 {
            match self.loop_mode {
                LoopMode::None => return true,
                LoopMode::Loop => self.elapsed = 0.0,
                LoopMode::PingPong => {
                    self.elapsed = 0.0;
                    std::mem::swap(&mut self.from, &mut self.to);
                }
            }
        }
        false
    }
}

impl TweenScheduler {
    /// Starts playing the given tween.
    ///
    /// The tween applies no value until the first [`tick`] call: a pending delay is
    /// consumed first, then every tick applies the eased value for the accumulated
    /// elapsed time.
    ///
    /// [`tick`]: TweenScheduler::tick
    ///
    /// # Errors
    /// Returns an `InvalidDuration` error when the descriptor duration is not a
    /// strictly positive (finite) number of seconds.
    pub fn start(&self, descriptor: TweenDescriptor) -> Result<TweenHandle, Error> {
        if !descriptor.duration.is_finite() || descriptor.duration <= 0.0 {
            return Err(InvalidDuration {
                duration: descriptor.duration,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tween = ActiveTween {
            from: descriptor.from,
            to: descriptor.to,
            duration: descriptor.duration,
            remaining_delay: descriptor.delay,
            elapsed: 0.0,
            easing: descriptor.easing,
            loop_mode: descriptor.loop_mode,
            apply: descriptor.apply,
            on_complete: descriptor.on_complete,
        };
        self.tweens.lock().push((id, Arc::new(Mutex::new(tween))));
        Ok(id)
    }

    /// Cancels the given tween, if it still runs.
    ///
    /// No further value is applied and the completion callback never fires.
    /// Cancelling an unknown or already finished handle is a no-op.
    pub fn cancel(&self, handle: TweenHandle) {
        self.tweens.lock().retain(|(id, _)| *id != handle);
    }

    /// Indicates whether the given tween is still scheduled.
    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.tweens.lock().iter().any(|(id, _)| *id == handle)
    }

    /// Number of tweens currently scheduled.
    pub fn count(&self) -> usize {
        self.tweens.lock().len()
    }

    /// Progress of the given tween through its current playthrough, in [0, 1].
    ///
    /// A tween still consuming its delay reports 0. Returns `None` for unknown or
    /// finished handles.
    pub fn progress(&self, handle: TweenHandle) -> Option<f32> {
        let tween = self
            .tweens
            .lock()
            .iter()
            .find(|(id, _)| *id == handle)
            .map(|(_, tween)| tween.clone())?;
        let tween = tween.lock();
        Some((tween.elapsed / tween.duration).clamp(0.0, 1.0))
    }

    /// Advances every running tween by `delta` seconds, in start order.
    ///
    /// Tweens started from inside a callback are not advanced before the next tick.
    /// Tweens cancelled from inside a callback receive no further value, the
    /// current tick included. Completion callbacks run with no internal lock held,
    /// so they are free to start or cancel tweens on this scheduler.
    ///
    /// Negative deltas are treated as zero.
    pub fn tick(&self, delta: f32) {
        let delta = delta.max(0.0);

        // Snapshot so callbacks can mutate the tween list while we iterate.
        let snapshot: Vec<(TweenHandle, Arc<Mutex<ActiveTween>>)> =
            self.tweens.lock().iter().cloned().collect();

        for (id, tween) in snapshot {
            // The tween may have been cancelled by an earlier callback of this tick.
            if !self.is_running(id) {
                continue;
            }

            let completed = tween.lock().advance(delta);
            if completed {
                let callback = tween.lock().on_complete.take();
                self.cancel(id);
                if let Some(callback) = callback {
                    callback();
                }
            }
        }
    }

    /// Drives the scheduler from a runtime task ticking at the given rate.
    ///
    /// Each tick advances time by the measured wall-clock delta since the previous
    /// one, so playback stays accurate even when the task falls behind its
    /// schedule. The task runs until aborted through the returned handler.
    ///
    /// # Errors
    /// Returns a `RuntimeError` when called outside a `#[tweenkit::runtime]`
    /// context.
    pub fn run(&self, fps: u64) -> Result<TaskHandler, Error> {
        let fps = fps.max(1);
        let scheduler = self.clone();

        task::run(async move {
            let mut clock =
                tokio::time::interval(tokio::time::Duration::from_micros(1_000_000 / fps));
            let mut last = tokio::time::Instant::now();
            loop {
                clock.tick().await;
                let now = tokio::time::Instant::now();
                scheduler.tick((now - last).as_secs_f32());
                last = now;
            }
            #[allow(unreachable_code)]
            Ok::<(), Error>(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use crate::tweens::Easing;

    use super::*;

    /// Shared cell the apply callbacks write into.
    fn probe() -> (Arc<Mutex<Vec<Vec3>>>, impl FnMut(Vec3) + Send + 'static) {
        let values: Arc<Mutex<Vec<Vec3>>> = Default::default();
        let clone = values.clone();
        (values, move |value| clone.lock().push(value))
    }

    #[test]
    fn test_start_validates_duration() {
        let scheduler = TweenScheduler::default();

        for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result =
                scheduler.start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, duration, |_| {}));
            assert!(
                matches!(result, Err(InvalidDuration { .. })),
                "Duration {} should be rejected",
                duration
            );
        }

        let result = scheduler.start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 0.001, |_| {}));
        assert!(result.is_ok(), "Tiny positive durations are valid");
    }

    #[test]
    fn test_linear_progression() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        let handle = scheduler
            .start(TweenDescriptor::new(
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                2.0,
                apply,
            ))
            .unwrap();

        scheduler.tick(0.5);
        scheduler.tick(0.5);
        scheduler.tick(1.0);

        let applied = values.lock().clone();
        assert_eq!(
            applied,
            vec![
                Vec3::new(2.5, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ],
            "Each tick applies the value for the accumulated elapsed time"
        );
        assert!(
            !scheduler.is_running(handle),
            "The tween is done once its duration elapsed"
        );

        // Further ticks apply nothing.
        scheduler.tick(1.0);
        assert_eq!(values.lock().len(), 3);
    }

    #[test]
    fn test_overshooting_easing_lands_exactly_on_target() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, apply)
                    .set_easing(Easing::ElasticOut),
            )
            .unwrap();

        // Overshoot the duration in one big step.
        scheduler.tick(5.0);

        let applied = values.lock().clone();
        assert_eq!(
            applied,
            vec![Vec3::new(10.0, 0.0, 0.0)],
            "The final value is the exact target, not an eased approximation"
        );
    }

    #[test]
    fn test_delay_consumed_before_progress() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, apply)
                    .set_delay(1.0),
            )
            .unwrap();

        scheduler.tick(0.5);
        assert!(
            values.lock().is_empty(),
            "No value is applied while the delay runs"
        );

        // This tick crosses the delay boundary: 0.25s of it move the tween.
        scheduler.tick(0.75);
        assert_eq!(values.lock().clone(), vec![Vec3::new(2.5, 0.0, 0.0)]);

        scheduler.tick(0.75);
        assert_eq!(values.lock().last().copied(), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_loop_restarts_from_beginning() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();
        let completed = Arc::new(AtomicUsize::new(0));
        let completed_clone = completed.clone();

        let handle = scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, apply)
                    .set_loop(LoopMode::Loop)
                    .on_complete(move || {
                        completed_clone.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .unwrap();

        scheduler.tick(1.0);
        assert_eq!(values.lock().last().copied(), Some(Vec3::new(10.0, 0.0, 0.0)));

        scheduler.tick(0.5);
        assert_eq!(
            values.lock().last().copied(),
            Some(Vec3::new(5.0, 0.0, 0.0)),
            "After a wrap the tween plays again from the beginning"
        );

        assert!(scheduler.is_running(handle), "Looping tweens never finish");
        assert_eq!(
            completed.load(Ordering::SeqCst),
            0,
            "Looping tweens never fire their completion callback"
        );
    }

    #[test]
    fn test_pingpong_reverses_direction() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        let handle = scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, apply)
                    .set_loop(LoopMode::PingPong),
            )
            .unwrap();

        scheduler.tick(1.0);
        scheduler.tick(0.5);
        scheduler.tick(0.5);
        scheduler.tick(0.5);

        let applied = values.lock().clone();
        assert_eq!(
            applied,
            vec![
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
            ],
            "After the end the tween plays back toward the start, then forth again"
        );
        assert!(scheduler.is_running(handle));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        let handle = scheduler
            .start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 1.0, apply))
            .unwrap();

        scheduler.tick(0.25);
        assert_eq!(values.lock().len(), 1);

        scheduler.cancel(handle);
        scheduler.cancel(handle);
        scheduler.cancel(4242);

        scheduler.tick(0.25);
        assert_eq!(
            values.lock().len(),
            1,
            "A cancelled tween receives no further value"
        );
        assert!(!scheduler.is_running(handle));
    }

    #[test]
    fn test_tick_advances_in_start_order() {
        let scheduler = TweenScheduler::default();
        let order: Arc<Mutex<Vec<u8>>> = Default::default();

        for tag in 0..3u8 {
            let order_clone = order.clone();
            scheduler
                .start(TweenDescriptor::new(
                    Vec3::ZERO,
                    Vec3::ONE,
                    1.0,
                    move |_| order_clone.lock().push(tag),
                ))
                .unwrap();
        }

        scheduler.tick(0.5);
        assert_eq!(
            order.lock().clone(),
            vec![0, 1, 2],
            "Tweens advance in the order they were started"
        );
    }

    #[test]
    fn test_tween_started_during_tick_is_not_advanced() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();
        let scheduler_clone = scheduler.clone();
        let values_clone = values.clone();

        scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 1.0, |_| {}).on_complete(move || {
                    // Chain a follow-up tween from the completion callback.
                    scheduler_clone
                        .start(TweenDescriptor::new(
                            Vec3::ZERO,
                            Vec3::new(10.0, 0.0, 0.0),
                            1.0,
                            apply,
                        ))
                        .unwrap();
                    assert!(
                        values_clone.lock().is_empty(),
                        "The chained tween is not advanced within the same tick"
                    );
                }),
            )
            .unwrap();

        scheduler.tick(1.0);
        assert!(
            values.lock().is_empty(),
            "The chained tween starts moving on the next tick only"
        );

        scheduler.tick(0.5);
        assert_eq!(values.lock().clone(), vec![Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_tween_cancelled_during_tick_is_skipped() {
        let scheduler = TweenScheduler::default();
        let victim: Arc<Mutex<Option<TweenHandle>>> = Default::default();
        let (values, apply) = probe();

        // The first tween cancels the second one from its apply callback.
        let scheduler_clone = scheduler.clone();
        let victim_clone = victim.clone();
        scheduler
            .start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 1.0, move |_| {
                if let Some(handle) = *victim_clone.lock() {
                    scheduler_clone.cancel(handle);
                }
            }))
            .unwrap();

        let handle = scheduler
            .start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 1.0, apply))
            .unwrap();
        *victim.lock() = Some(handle);

        scheduler.tick(0.5);
        assert!(
            values.lock().is_empty(),
            "A tween cancelled earlier in the tick receives no value"
        );
        assert!(!scheduler.is_running(handle));
    }

    #[test]
    fn test_completion_callback_fires_once_after_final_value() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();
        let completed = Arc::new(AtomicUsize::new(0));
        let completed_clone = completed.clone();
        let values_clone = values.clone();

        scheduler
            .start(
                TweenDescriptor::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, apply)
                    .on_complete(move || {
                        assert_eq!(
                            values_clone.lock().last().copied(),
                            Some(Vec3::new(10.0, 0.0, 0.0)),
                            "The final value is applied before the completion fires"
                        );
                        completed_clone.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .unwrap();

        scheduler.tick(2.0);
        scheduler.tick(2.0);
        assert_eq!(
            completed.load(Ordering::SeqCst),
            1,
            "The completion callback fires exactly once"
        );
    }

    #[test]
    fn test_introspection() {
        let scheduler = TweenScheduler::default();
        assert_eq!(scheduler.count(), 0);

        let delayed = scheduler
            .start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 2.0, |_| {}).set_delay(1.0))
            .unwrap();
        let plain = scheduler
            .start(TweenDescriptor::new(Vec3::ZERO, Vec3::ONE, 2.0, |_| {}))
            .unwrap();
        assert_eq!(scheduler.count(), 2);

        scheduler.tick(0.5);
        assert_eq!(
            scheduler.progress(delayed),
            Some(0.0),
            "A tween still consuming its delay has not progressed"
        );
        assert_eq!(scheduler.progress(plain), Some(0.25));

        scheduler.tick(2.0);
        assert_eq!(scheduler.count(), 1, "The plain tween finished");
        assert_eq!(
            scheduler.progress(plain),
            None,
            "Finished handles report no progress"
        );
        assert_eq!(
            scheduler.progress(delayed),
            Some(0.75),
            "The delayed tween consumed its delay and keeps playing"
        );
    }

    #[tweenkit_macros::test]
    async fn test_run_driver_plays_in_wall_clock_time() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        let clock = scheduler.run(100).expect("The driver spawns in the runtime");

        scheduler
            .start(TweenDescriptor::new(
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                0.2,
                apply,
            ))
            .unwrap();

        crate::pause!(500);
        assert_eq!(
            values.lock().last().copied(),
            Some(Vec3::new(10.0, 0.0, 0.0)),
            "A 200ms tween lands on its destination well within 500ms"
        );

        clock.abort();
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let scheduler = TweenScheduler::default();
        let (values, apply) = probe();

        scheduler
            .start(TweenDescriptor::new(
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                1.0,
                apply,
            ))
            .unwrap();

        scheduler.tick(0.5);
        scheduler.tick(-0.25);
        assert_eq!(
            values.lock().last().copied(),
            Some(Vec3::new(5.0, 0.0, 0.0)),
            "A negative delta does not move the tween backward"
        );
    }
}
