pub use tokio;
pub use tokio::time::sleep;

pub use scale::Scalable;
pub use vec3::Vec3;

pub mod events;
mod scale;
pub mod task;
mod vec3;
