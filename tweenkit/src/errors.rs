use snafu::Snafu;

pub use crate::errors::Error::*;
use crate::targets::TweenKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Runtime error: Are you sure your code runs inside #[tweenkit::runtime]?
    RuntimeError,
    /// Invalid duration ({duration}s): a tween must last a strictly positive number of seconds.
    InvalidDuration { duration: f32 },
    /// Missing capability: the target does not expose the property required by {kind} tweens.
    MissingCapability { kind: TweenKind },
    /// Unknown error: {info}.
    Unknown { info: String },
}
