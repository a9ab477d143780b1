//! Load-specification data model.
//!
//! This is the wire format consumed from an external loader (a JSON file
//! upload, a built-in demo, a test fixture). The structs are plain data;
//! everything semantic (velocity bounds, frame-reference resolution) is
//! validated by [`crate::universe::Universe::load`].

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A complete scene specification.
///
/// All sections are optional: the empty spec is a valid universe containing
/// only the root observer at time 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Human-readable caption for hosts to display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial time cursor, in root coordinates.
    #[serde(default)]
    pub time: f64,

    /// Child frames of the root observer.
    #[serde(default)]
    pub reference_frames: Vec<FrameSpec>,

    /// Worldline objects.
    #[serde(default)]
    pub objects: Vec<BodySpec>,

    /// Point events.
    #[serde(default)]
    pub events: Vec<BodySpec>,
}

/// Declaration of a child reference frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Identifier objects and events refer to. Need not be contiguous.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub v: f64,
    pub color: String,
}

/// Declaration of an object or event, placed relative to frame `rf`.
///
/// Events carry `v` for symmetry with objects; it has no physical meaning
/// for a point event but is validated like any other velocity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    /// Frame reference: a declared frame id, or 0 for the root when no
    /// frame with id 0 was declared.
    pub rf: u32,
    pub x: f64,
    pub y: f64,
    pub v: f64,
    pub color: String,
}

impl SceneSpec {
    /// Parses a specification from JSON text.
    ///
    /// Missing sections take their defaults; ill-typed or unparseable input
    /// fails with [`EngineError::MalformedSpec`].
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(|e| EngineError::MalformedSpec(e.to_string()))
    }

    /// Structural checks that do not need frame resolution: every numeric
    /// field finite, frame ids unique.
    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_finite("time", self.time)?;

        let mut seen = std::collections::BTreeSet::new();
        for f in &self.reference_frames {
            if !seen.insert(f.id) {
                return Err(EngineError::MalformedSpec(format!(
                    "duplicate reference frame id {}",
                    f.id
                )));
            }
            ensure_finite("reference frame x", f.x)?;
            ensure_finite("reference frame y", f.y)?;
            ensure_finite("reference frame v", f.v)?;
        }
        for (section, bodies) in [("object", &self.objects), ("event", &self.events)] {
            for b in bodies {
                ensure_finite(&format!("{section} x"), b.x)?;
                ensure_finite(&format!("{section} y"), b.y)?;
                ensure_finite(&format!("{section} v"), b.v)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::MalformedSpec(format!(
            "{field} is not a finite number ({value})"
        )))
    }
}
