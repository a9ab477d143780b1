//! Reference frames and the local→root coordinate transform.

use nalgebra::Vector2;

use crate::error::EngineError;
use crate::kinematics::{add_velocities, boost_unchecked, validate_velocity};

/// A reference frame in uniform motion along the spatial axis.
///
/// A frame is described entirely relative to its parent: a spacetime offset
/// `(x, y)` at the parent's proper time origin and a velocity `v` as a
/// fraction of light speed. Frames carry no parent pointer; the universe
/// owns the (depth ≤ 2) frame tree and passes the parent explicitly when
/// transforming, so the root is an ordinary frame value rather than a
/// partially populated sentinel.
///
/// `|v| < 1` is enforced at construction and on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFrame {
    offset: Vector2<f64>,
    velocity: f64,
    color: String,
}

impl ReferenceFrame {
    /// Creates a frame with the given offset, velocity, and color hint.
    pub fn new(x: f64, y: f64, v: f64, color: impl Into<String>) -> Result<Self, EngineError> {
        validate_velocity(v)?;
        Ok(Self {
            offset: Vector2::new(x, y),
            velocity: v,
            color: color.into(),
        })
    }

    /// The root observer frame: at the origin, at rest, with a muted color.
    pub fn root() -> Self {
        Self {
            offset: Vector2::zeros(),
            velocity: 0.0,
            color: "hsl(0, 0%, 50%, 50%)".to_string(),
        }
    }

    pub fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Color hint for renderers; no semantic weight.
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset = Vector2::new(x, y);
    }

    pub fn set_velocity(&mut self, v: f64) -> Result<(), EngineError> {
        validate_velocity(v)?;
        self.velocity = v;
        Ok(())
    }

    /// This frame's velocity relative to the ultimate root.
    ///
    /// With a parent, the frame's own velocity composes relativistically
    /// with the parent's; the root itself has no parent and is its own
    /// resolution. Closed under `(-1, 1)`, so the result is always a valid
    /// boost velocity.
    pub fn resolved_velocity(&self, parent: Option<&ReferenceFrame>) -> f64 {
        match parent {
            Some(p) => add_velocities(self.velocity, p.velocity),
            None => self.velocity,
        }
    }

    /// Maps a local `(x, y, v)` triple into root coordinates.
    ///
    /// The pipeline: translate by this frame's offset, resolve the frame's
    /// velocity relative to the root, boost by the *negative* of that
    /// velocity (boosting backwards out of the moving frame and into the
    /// root's coordinates), and compose the point's own velocity into the
    /// root frame.
    pub fn transform(
        &self,
        parent: Option<&ReferenceFrame>,
        x: f64,
        y: f64,
        v: f64,
    ) -> (f64, f64, f64) {
        let (x, y) = (x + self.offset.x, y + self.offset.y);
        let ov = self.resolved_velocity(parent);
        let (x, y) = boost_unchecked(x, y, -ov);
        let v = add_velocities(v, ov);
        (x, y, v)
    }
}
