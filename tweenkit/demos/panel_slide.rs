use tweenkit::mocks::target::MockTarget;
use tweenkit::pause;
use tweenkit::targets::TweenKind;
use tweenkit::tweens::{Easing, TweenScheduler, Tweener, TweenerEvent};
use tweenkit::utils::Vec3;

#[tweenkit::runtime]
async fn main() {
    let scheduler = TweenScheduler::default();
    let panel = MockTarget::new();

    // Drive the scheduler at 60fps until the program ends.
    let clock = scheduler.run(60).unwrap();

    let slide = Tweener::new(&scheduler, panel.clone(), TweenKind::Move)
        .set_to(Vec3::new(120.0, 0.0, 0.0))
        .set_duration(0.5)
        .set_easing(Easing::QuadOut);

    slide.on(TweenerEvent::OnComplete, |tweener: Tweener| async move {
        println!("Panel arrived: {}", tweener);
    });

    slide.play().unwrap();

    // Let the whole back-and-forth cycle play out.
    pause!(1500);
    println!("Panel resting at {}", panel.get_position());

    clock.abort();
}
