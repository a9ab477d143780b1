//! Built-in demo scenes.

use std::str::FromStr;

use minkowski_core::scene::{BodySpec, FrameSpec, SceneSpec};

/// Demo scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoScene {
    /// Two observers: us at rest, a second object at half light speed
    Basic,

    /// An object one light-year out, moving towards us, with the collision
    /// event marked in its own frame
    Approaching,
}

impl DemoScene {
    /// Returns a list of all demos.
    pub fn all() -> Vec<DemoScene> {
        vec![DemoScene::Basic, DemoScene::Approaching]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DemoScene::Basic => "basic",
            DemoScene::Approaching => "approaching",
        }
    }

    /// The load specification for this demo.
    pub fn spec(&self) -> SceneSpec {
        match self {
            DemoScene::Basic => SceneSpec {
                description: Some(
                    "The blue object represents us. The red object is moving at \
                     50% the speed of light to the right."
                        .to_string(),
                ),
                objects: vec![
                    BodySpec {
                        rf: 0,
                        x: 0.0,
                        y: 0.0,
                        v: 0.0,
                        color: "hsl(240, 100%, 50%)".to_string(),
                    },
                    BodySpec {
                        rf: 0,
                        x: 0.0,
                        y: 0.0,
                        v: 0.5,
                        color: "hsl(0, 100%, 50%)".to_string(),
                    },
                ],
                ..SceneSpec::default()
            },
            DemoScene::Approaching => SceneSpec {
                description: Some(
                    "The purple object is one light-year away with our same speed \
                     vector. The orange object is at the same distance but moving \
                     towards us. The red event represents the moment they collide \
                     in orange's reference frame, which is in our future."
                        .to_string(),
                ),
                reference_frames: vec![FrameSpec {
                    id: 1,
                    x: 1.1547,
                    y: 0.5774,
                    v: -0.5,
                    color: "hsl(30, 100%, 50%, 50%)".to_string(),
                }],
                objects: vec![
                    BodySpec {
                        rf: 0,
                        x: 1.0,
                        y: 0.0,
                        v: 0.0,
                        color: "hsl(270, 100%, 50%)".to_string(),
                    },
                    BodySpec {
                        rf: 1,
                        x: 0.0,
                        y: 0.0,
                        v: 0.0,
                        color: "hsl(30, 100%, 50%)".to_string(),
                    },
                ],
                events: vec![BodySpec {
                    rf: 0,
                    x: 0.0,
                    y: 0.5,
                    v: 0.0,
                    color: "hsl(0, 100%, 50%)".to_string(),
                }],
                ..SceneSpec::default()
            },
        }
    }
}

impl FromStr for DemoScene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(DemoScene::Basic),
            "approaching" => Ok(DemoScene::Approaching),
            other => Err(format!(
                "unknown demo '{}' (available: basic, approaching)",
                other
            )),
        }
    }
}
