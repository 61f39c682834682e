use tweenkit::pause;
use tweenkit::tweens::{Easing, LoopMode, TweenDescriptor, TweenScheduler};
use tweenkit::utils::Vec3;

#[tweenkit::runtime]
async fn main() {
    let scheduler = TweenScheduler::default();

    let clock = scheduler.run(60).unwrap();

    // A raw tween, no controller: bounce a marker up and down forever.
    let handle = scheduler
        .start(
            TweenDescriptor::new(Vec3::ZERO, Vec3::new(0.0, 40.0, 0.0), 0.4, |value| {
                println!("marker at {}", value);
            })
            .set_easing(Easing::SineInOut)
            .set_loop(LoopMode::PingPong),
        )
        .unwrap();

    pause!(2000);
    scheduler.cancel(handle);

    clock.abort();
}
