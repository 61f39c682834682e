use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::{Error, MissingCapability};
use crate::targets::{Target, TweenKind};
use crate::utils::Vec3;

/// Mock [`Target`] for testing purposes.
///
/// Clones share the same underlying state, so a clone captured by a tween apply
/// closure writes to the same properties the test inspects.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct MockTarget {
    #[cfg_attr(feature = "serde", serde(with = "crate::targets::arc_rwlock_serde"))]
    state: Arc<RwLock<MockTargetState>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct MockTargetState {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub size: Vec3,
    /// `None` until a fade writes to it, mimicking objects without an opacity channel.
    pub opacity: Option<f32>,
    pub active: bool,
    /// Number of property writes received, all kinds included.
    pub writes: usize,
}

impl MockTarget {
    /// Creates a target with an opacity channel already attached (alpha 1).
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockTargetState {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: Vec3::ONE,
                size: Vec3::ZERO,
                opacity: Some(1.0),
                active: true,
                writes: 0,
            })),
        }
    }

    /// Creates a target with no opacity channel: reading `Fade` fails until a fade
    /// write attaches one.
    pub fn without_opacity() -> Self {
        let target = Self::new();
        target.state.write().opacity = None;
        target
    }

    pub fn get_position(&self) -> Vec3 {
        self.state.read().position
    }

    pub fn get_rotation(&self) -> Vec3 {
        self.state.read().rotation
    }

    pub fn get_scale(&self) -> Vec3 {
        self.state.read().scale
    }

    pub fn get_size(&self) -> Vec3 {
        self.state.read().size
    }

    pub fn get_opacity(&self) -> Option<f32> {
        self.state.read().opacity
    }

    pub fn get_writes(&self) -> usize {
        self.state.read().writes
    }
}

impl Default for MockTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MockTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        write!(
            f,
            "MockTarget [position={}, active={}]",
            state.position, state.active
        )
    }
}

#[cfg_attr(feature = "serde", typetag::serde)]
impl Target for MockTarget {
    fn get_property(&self, kind: TweenKind) -> Result<Vec3, Error> {
        let state = self.state.read();
        match kind {
            TweenKind::Move => Ok(state.position),
            TweenKind::Rotate => Ok(state.rotation),
            TweenKind::Scale => Ok(state.scale),
            TweenKind::SizeDelta => Ok(state.size),
            TweenKind::Fade => state
                .opacity
                .map(Vec3::from)
                .ok_or(MissingCapability { kind }),
        }
    }

    fn set_property(&mut self, kind: TweenKind, value: Vec3) -> Result<(), Error> {
        let mut state = self.state.write();
        match kind {
            TweenKind::Move => state.position = value,
            TweenKind::Rotate => state.rotation = value,
            TweenKind::Scale => state.scale = value,
            TweenKind::SizeDelta => state.size = value,
            // Writing a fade attaches the opacity channel when missing.
            TweenKind::Fade => state.opacity = Some(value.x),
        }
        state.writes += 1;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.state.read().active
    }

    fn set_active(&mut self, active: bool) {
        self.state.write().active = active;
    }
}
