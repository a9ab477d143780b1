//! Minkowski Core - Relativistic Scene Composition Engine
//!
//! This library is the coordinate-math core of an interactive Minkowski
//! (spacetime) diagram tool:
//! 1. **Kinematics**: collinear velocity addition and the Lorentz boost
//! 2. **Frames**: a hierarchical reference-frame model composing boosts
//! 3. **Universe**: cached root-frame worldlines and the simultaneity slice
//!    ("where is everything *now*, by this observer's definition of now")
//!
//! Drawing, UI controls, and scheduling live outside: the engine consumes
//! setter calls and emits renderable descriptors.

pub mod animator;
pub mod error;
pub mod frame;
pub mod kinematics;
pub mod render;
pub mod scene;
pub mod universe;

// Re-export key types for convenience
pub use animator::{Animator, Step};
pub use error::EngineError;
pub use frame::ReferenceFrame;
pub use render::{Line, LineStyle, Marker, Scene};
pub use scene::SceneSpec;
pub use universe::Universe;
