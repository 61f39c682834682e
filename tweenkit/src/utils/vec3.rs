use std::fmt::{Display, Formatter};

use crate::utils::Scalable;

/// A 3-component vector of `f32`, the value type every tween interpolates.
///
/// Position, orientation, scale and 2D size tweens use it as-is; opacity (fade)
/// tweens only use the `x` component as an alpha scalar.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise linear interpolation between `from` (t=0) and `to` (t=1).
    ///
    /// `t` is not clamped: eased progress may overshoot the [0, 1] range
    /// (elastic and back easings do) and the value overshoots accordingly.
    pub fn lerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: t.scale(0.0, 1.0, from.x, to.x),
            y: t.scale(0.0, 1.0, from.y, to.y),
            z: t.scale(0.0, 1.0, from.z, to.z),
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<(f32, f32, f32)> for Vec3 {
    fn from(value: (f32, f32, f32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// A single float converts to a vector carrying it in `x`: the convention used
/// by fade (alpha) tweens.
impl From<f32> for Vec3 {
    fn from(value: f32) -> Self {
        Self::new(value, 0.0, 0.0)
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
