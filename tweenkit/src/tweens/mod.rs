pub use descriptor::{LoopMode, TweenDescriptor};
pub use easing::Easing;
pub use scheduler::{TweenHandle, TweenScheduler};
pub use tweener::{Tweener, TweenerEvent, TweenerState};

pub mod descriptor;
pub mod easing;
pub mod scheduler;
pub mod tweener;
