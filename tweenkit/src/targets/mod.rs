use std::fmt::{Debug, Display, Formatter};

use dyn_clone::DynClone;

use crate::errors::Error;
use crate::utils::Vec3;

/// The property of a target a tween animates.
///
/// All properties are carried as [`Vec3`] values. `Fade` is the exception: it
/// animates a single alpha scalar stored in the vector `x` component.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TweenKind {
    /// Animates the target position.
    Move,
    /// Animates the target orientation (euler angles, in degrees).
    Rotate,
    /// Animates the target scale.
    Scale,
    /// Animates the target 2D size.
    SizeDelta,
    /// Animates the target opacity (alpha in the `x` component).
    Fade,
}

impl Display for TweenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            TweenKind::Move => "Move",
            TweenKind::Rotate => "Rotate",
            TweenKind::Scale => "Scale",
            TweenKind::SizeDelta => "SizeDelta",
            TweenKind::Fade => "Fade",
        };
        write!(f, "{}", kind)
    }
}

/// A trait for objects whose properties can be animated: tweens "output" interpolated
/// values onto them.
///
/// Implementors provide storage for the five animatable properties and an active flag.
/// The trait requires debugging, cloning, and concurrency support so targets can be
/// captured by scheduler callbacks.
#[cfg_attr(feature = "serde", typetag::serde(tag = "type"))]
pub trait Target: Debug + DynClone + Send + Sync {
    /// Reads the current value of the given property.
    ///
    /// # Errors
    /// Returns a `MissingCapability` error when the target does not carry the
    /// property, typically `Fade` on a target without an opacity channel.
    fn get_property(&self, kind: TweenKind) -> Result<Vec3, Error>;

    /// Writes a new value for the given property.
    ///
    /// Writing `Fade` on a target without an opacity channel attaches one rather
    /// than failing: reads succeed from then on.
    fn set_property(&mut self, kind: TweenKind, value: Vec3) -> Result<(), Error>;

    /// Indicates whether the target is active (visible, interactable).
    fn is_active(&self) -> bool;

    /// Activates or deactivates the target.
    fn set_active(&mut self, active: bool);
}
dyn_clone::clone_trait_object!(Target);

#[cfg(feature = "serde")]
pub mod arc_rwlock_serde {
    use std::sync::Arc;

    use parking_lot::RwLock;
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};

    pub fn serialize<S, T>(val: &Arc<RwLock<T>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        T::serialize(&*val.read(), s)
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<Arc<RwLock<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Arc::new(RwLock::new(T::deserialize(d)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_kind_display() {
        assert_eq!(TweenKind::Move.to_string(), "Move");
        assert_eq!(TweenKind::Rotate.to_string(), "Rotate");
        assert_eq!(TweenKind::Scale.to_string(), "Scale");
        assert_eq!(TweenKind::SizeDelta.to_string(), "SizeDelta");
        assert_eq!(TweenKind::Fade.to_string(), "Fade");
    }
}
