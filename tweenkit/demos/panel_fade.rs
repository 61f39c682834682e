use tweenkit::mocks::target::MockTarget;
use tweenkit::pause;
use tweenkit::targets::{Target, TweenKind};
use tweenkit::tweens::{TweenScheduler, Tweener};

#[tweenkit::runtime]
async fn main() {
    let scheduler = TweenScheduler::default();
    let dialog = MockTarget::new();

    let clock = scheduler.run(60).unwrap();

    // Fade the dialog in on enable, then let it fade back out and deactivate.
    let fade = Tweener::new(&scheduler, dialog.clone(), TweenKind::Fade)
        .set_from(0.0)
        .set_to(1.0)
        .set_duration(0.3)
        .set_deactivate_on_complete(true);

    fade.enable().unwrap();

    pause!(1000);
    println!(
        "Dialog opacity: {:?} (active: {})",
        dialog.get_opacity(),
        dialog.is_active()
    );

    clock.abort();
}
