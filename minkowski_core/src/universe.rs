//! The universe: frames, objects, events, the worldline cache, and the
//! simultaneity slice.
//!
//! A `Universe` owns the root observer frame, the declared child frames, and
//! the scene content. Every object's local coordinates are transformed into
//! root coordinates once and cached; any mutation that can change a cached
//! value recomputes exactly the affected entries before the next read. The
//! relativity-of-simultaneity payload is [`Universe::slice_at_time`]: where
//! each object is "right now" by the root observer's definition of now.

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::frame::ReferenceFrame;
use crate::kinematics::validate_velocity;
use crate::render::{path_angle, space_angle, Line, LineStyle, Marker, Scene};
use crate::scene::{ensure_finite, BodySpec, SceneSpec};

/// Resolved frame reference. `rf = 0` in the wire format maps to `Root`
/// unless a child frame with id 0 was explicitly declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameRef {
    Root,
    Child(u32),
}

/// An object's position and velocity expressed in root coordinates.
///
/// The object's full worldline is the line through `(x, y)` with slope
/// `1/v` (vertical when `v = 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Worldline {
    pub x: f64,
    pub y: f64,
    pub v: f64,
}

/// An object with a straight worldline, defined in some frame's local
/// coordinates, carrying its cached root-frame parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldlineObject {
    frame: FrameRef,
    x: f64,
    y: f64,
    v: f64,
    color: String,
    worldline: Worldline,
}

impl WorldlineObject {
    /// The wire-format frame id this object was declared against.
    pub fn frame_id(&self) -> u32 {
        match self.frame {
            FrameRef::Root => 0,
            FrameRef::Child(id) => id,
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Cached root-frame worldline parameters.
    pub fn worldline(&self) -> Worldline {
        self.worldline
    }
}

/// A point event. Transformed on demand for rendering; no cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    frame: FrameRef,
    x: f64,
    y: f64,
    v: f64,
    color: String,
}

/// The scene state for one root observer.
///
/// Created by [`Universe::load`]; the hosting application owns the instance
/// and replaces it wholesale on a new load ([`Universe::reload`] commits
/// only on success, so a failed load leaves the previous state intact).
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    description: Option<String>,
    root: ReferenceFrame,
    frames: BTreeMap<u32, ReferenceFrame>,
    objects: Vec<WorldlineObject>,
    events: Vec<Event>,
    time: f64,
}

impl Universe {
    /// Validates and builds a universe from a load specification.
    ///
    /// All-or-nothing: any invalid velocity, unresolved frame reference, or
    /// structural defect fails the whole load and constructs nothing.
    pub fn load(spec: &SceneSpec) -> Result<Self, EngineError> {
        spec.validate()?;

        let mut frames = BTreeMap::new();
        for f in &spec.reference_frames {
            frames.insert(f.id, ReferenceFrame::new(f.x, f.y, f.v, f.color.clone())?);
        }

        let mut universe = Self {
            description: spec.description.clone(),
            root: ReferenceFrame::root(),
            frames,
            objects: Vec::new(),
            events: Vec::new(),
            time: spec.time,
        };

        for o in &spec.objects {
            universe.push_object(o)?;
        }
        for e in &spec.events {
            validate_velocity(e.v)?;
            let frame = universe.resolve(e.rf)?;
            universe.events.push(Event {
                frame,
                x: e.x,
                y: e.y,
                v: e.v,
                color: e.color.clone(),
            });
        }

        Ok(universe)
    }

    /// Replaces this universe with a freshly loaded one, atomically: on any
    /// validation error the current state is left untouched.
    pub fn reload(&mut self, spec: &SceneSpec) -> Result<(), EngineError> {
        *self = Self::load(spec)?;
        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The current time cursor, in root coordinates.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn objects(&self) -> &[WorldlineObject] {
        &self.objects
    }

    /// Appends an object and computes its worldline cache. Other objects'
    /// caches are untouched.
    pub fn add_object(
        &mut self,
        rf: u32,
        x: f64,
        y: f64,
        v: f64,
        color: impl Into<String>,
    ) -> Result<(), EngineError> {
        ensure_finite("object x", x)?;
        ensure_finite("object y", y)?;
        self.push_object(&BodySpec {
            rf,
            x,
            y,
            v,
            color: color.into(),
        })
    }

    /// Boosts the root observer. Every object's cache depends on the root,
    /// so all of them are recomputed.
    pub fn set_root_velocity(&mut self, v: f64) -> Result<(), EngineError> {
        self.root.set_velocity(v)?;
        self.recompute();
        Ok(())
    }

    /// Pans the root observer. Recomputes every object's cache.
    pub fn set_root_offset(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        ensure_finite("root offset x", x)?;
        ensure_finite("root offset y", y)?;
        self.root.set_offset(x, y);
        self.recompute();
        Ok(())
    }

    /// Live-edits a declared frame's velocity. Only objects defined in that
    /// frame have their caches recomputed.
    pub fn set_frame_velocity(&mut self, id: u32, v: f64) -> Result<(), EngineError> {
        self.frames
            .get_mut(&id)
            .ok_or(EngineError::UnknownFrameReference(id))?
            .set_velocity(v)?;
        self.recompute_frame(id);
        Ok(())
    }

    /// Live-edits a declared frame's offset. Only objects defined in that
    /// frame have their caches recomputed.
    pub fn set_frame_offset(&mut self, id: u32, x: f64, y: f64) -> Result<(), EngineError> {
        ensure_finite("frame offset x", x)?;
        ensure_finite("frame offset y", y)?;
        self.frames
            .get_mut(&id)
            .ok_or(EngineError::UnknownFrameReference(id))?
            .set_offset(x, y);
        self.recompute_frame(id);
        Ok(())
    }

    /// Moves the time cursor. The worldline cache does not depend on time;
    /// only the on-demand simultaneity slice does.
    pub fn set_time(&mut self, t: f64) -> Result<(), EngineError> {
        ensure_finite("time", t)?;
        self.time = t;
        Ok(())
    }

    /// Rebuilds every object's worldline cache. Idempotent.
    pub fn recompute(&mut self) {
        for idx in 0..self.objects.len() {
            self.recompute_object(idx);
        }
    }

    /// Intersects each cached worldline with the root observer's
    /// simultaneity hyperplane `y = t`.
    ///
    /// A worldline through `(x, y)` with velocity `v` crosses it at
    /// `x_now = x − v·(y − t)`. One marker per object, in insertion order.
    pub fn slice_at_time(&self, t: f64) -> Vec<Marker> {
        self.objects
            .iter()
            .map(|o| {
                let w = o.worldline;
                Marker::new(w.x - w.v * (w.y - t), t, o.color.clone())
            })
            .collect()
    }

    /// A non-mutating renderable snapshot at the current time cursor.
    ///
    /// `extent` is the half-length used to materialize the conceptually
    /// infinite axis and worldline descriptors as segments.
    pub fn renderables(&self, extent: f64) -> Scene {
        let mut axes = Vec::with_capacity(2 * (1 + self.frames.len()));
        self.push_axes(&mut axes, &self.root, None, extent);
        for frame in self.frames.values() {
            self.push_axes(&mut axes, frame, Some(&self.root), extent);
        }

        let worldlines = self
            .objects
            .iter()
            .map(|o| {
                let w = o.worldline;
                Line::through(
                    w.x,
                    w.y,
                    path_angle(w.v),
                    extent,
                    o.color.clone(),
                    LineStyle::Solid,
                )
            })
            .collect();

        let events = self
            .events
            .iter()
            .map(|e| {
                let (x, y, _) = self.transform_local(e.frame, e.x, e.y, e.v);
                Marker::new(x, y, e.color.clone())
            })
            .collect();

        Scene {
            description: self.description.clone(),
            axes,
            worldlines,
            events,
            now_markers: self.slice_at_time(self.time),
        }
    }

    fn push_axes(
        &self,
        axes: &mut Vec<Line>,
        frame: &ReferenceFrame,
        parent: Option<&ReferenceFrame>,
        extent: f64,
    ) {
        // A frame's axes are its own time and space axes transformed into
        // root coordinates: the image of the local origin, tilted by the
        // frame's resolved velocity.
        let (x, y, ov) = frame.transform(parent, 0.0, 0.0, 0.0);
        axes.push(Line::through(
            x,
            y,
            path_angle(ov),
            extent,
            frame.color(),
            LineStyle::Dashed,
        ));
        axes.push(Line::through(
            x,
            y,
            space_angle(ov),
            extent,
            frame.color(),
            LineStyle::Dashed,
        ));
    }

    fn resolve(&self, rf: u32) -> Result<FrameRef, EngineError> {
        if self.frames.contains_key(&rf) {
            Ok(FrameRef::Child(rf))
        } else if rf == 0 {
            Ok(FrameRef::Root)
        } else {
            Err(EngineError::UnknownFrameReference(rf))
        }
    }

    fn transform_local(&self, frame: FrameRef, x: f64, y: f64, v: f64) -> (f64, f64, f64) {
        match frame {
            FrameRef::Root => self.root.transform(None, x, y, v),
            FrameRef::Child(id) => self.frames[&id].transform(Some(&self.root), x, y, v),
        }
    }

    fn push_object(&mut self, spec: &BodySpec) -> Result<(), EngineError> {
        validate_velocity(spec.v)?;
        let frame = self.resolve(spec.rf)?;
        let (x, y, v) = self.transform_local(frame, spec.x, spec.y, spec.v);
        self.objects.push(WorldlineObject {
            frame,
            x: spec.x,
            y: spec.y,
            v: spec.v,
            color: spec.color.clone(),
            worldline: Worldline { x, y, v },
        });
        Ok(())
    }

    fn recompute_object(&mut self, idx: usize) {
        let (frame, x, y, v) = {
            let o = &self.objects[idx];
            (o.frame, o.x, o.y, o.v)
        };
        let (x, y, v) = self.transform_local(frame, x, y, v);
        self.objects[idx].worldline = Worldline { x, y, v };
    }

    fn recompute_frame(&mut self, id: u32) {
        for idx in 0..self.objects.len() {
            if self.objects[idx].frame == FrameRef::Child(id) {
                self.recompute_object(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn half_light_frame_spec() -> SceneSpec {
        SceneSpec::from_json(
            r#"{
                "reference_frames": [
                    { "id": 1, "x": 0, "y": 0, "v": 0.5, "color": "red" }
                ],
                "objects": [
                    { "rf": 1, "x": 0, "y": 0, "v": 0, "color": "red" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_load_empty_spec() {
        let u = Universe::load(&SceneSpec::default()).unwrap();
        assert_eq!(u.time(), 0.0);
        assert!(u.objects().is_empty());
        // Root axes are always present.
        assert_eq!(u.renderables(10.0).axes.len(), 2);
    }

    #[test]
    fn test_comoving_object_in_boosted_frame() {
        // Frame at v = 0.5, object at its origin at rest: the object's root
        // worldline passes through the origin at v = 0.5.
        let u = Universe::load(&half_light_frame_spec()).unwrap();
        let w = u.objects()[0].worldline();
        assert_relative_eq!(w.x, 0.0);
        assert_relative_eq!(w.y, 0.0);
        assert_relative_eq!(w.v, 0.5);
    }

    #[test]
    fn test_displaced_object_and_slice() {
        // Same frame, object one unit out along the frame's space axis.
        let mut spec = half_light_frame_spec();
        spec.objects[0].x = 1.0;
        let u = Universe::load(&spec).unwrap();

        let w = u.objects()[0].worldline();
        assert_relative_eq!(w.x, 1.1547005383792517, epsilon = 1e-9);
        assert_relative_eq!(w.y, 0.5773502691896258, epsilon = 1e-9);
        assert_relative_eq!(w.v, 0.5);

        // Where is it "now" (t = 0) for the root observer? Its worldline
        // runs back from (γ, γ/2) at slope 1/v: x_now = γ − 0.5·(γ/2).
        let slice = u.slice_at_time(0.0);
        assert_eq!(slice.len(), 1);
        assert_relative_eq!(slice[0].position.x, 0.8660254037844387, epsilon = 1e-9);
        assert_relative_eq!(slice[0].position.y, 0.0);
    }

    #[test]
    fn test_unresolved_frame_reference_fails_load() {
        let spec = SceneSpec::from_json(
            r#"{ "objects": [ { "rf": 7, "x": 0, "y": 0, "v": 0, "color": "red" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            Universe::load(&spec),
            Err(EngineError::UnknownFrameReference(7))
        );
    }

    #[test]
    fn test_failed_reload_keeps_previous_state() {
        let mut u = Universe::load(&half_light_frame_spec()).unwrap();
        let before = u.clone();

        let bad = SceneSpec::from_json(
            r#"{ "events": [ { "rf": 3, "x": 0, "y": 0, "v": 0, "color": "red" } ] }"#,
        )
        .unwrap();
        assert!(u.reload(&bad).is_err());
        assert_eq!(u, before);
    }

    #[test]
    fn test_light_speed_rejected_everywhere() {
        let mut spec = half_light_frame_spec();
        spec.reference_frames[0].v = 1.0;
        assert_eq!(
            Universe::load(&spec),
            Err(EngineError::InvalidVelocity(1.0))
        );

        let mut u = Universe::load(&half_light_frame_spec()).unwrap();
        assert_eq!(
            u.add_object(0, 0.0, 0.0, -1.0, "red"),
            Err(EngineError::InvalidVelocity(-1.0))
        );
        assert_eq!(u.objects().len(), 1);
        assert_eq!(
            u.set_root_velocity(2.0),
            Err(EngineError::InvalidVelocity(2.0))
        );
        assert!(u.add_object(0, 0.0, 0.0, 0.999999, "red").is_ok());
    }

    #[test]
    fn test_add_object_with_unknown_frame() {
        let mut u = Universe::load(&SceneSpec::default()).unwrap();
        assert_eq!(
            u.add_object(2, 0.0, 0.0, 0.0, "red"),
            Err(EngineError::UnknownFrameReference(2))
        );
        assert!(u.objects().is_empty());
    }

    #[test]
    fn test_root_boost_recomputes_all_objects() {
        let mut u = Universe::load(&SceneSpec::default()).unwrap();
        u.add_object(0, 0.0, 0.0, 0.0, "blue").unwrap();
        assert_relative_eq!(u.objects()[0].worldline().v, 0.0);

        // Boost the observer: the object at rest now moves at -0.5 relative
        // to the root's new coordinates.
        u.set_root_velocity(-0.5).unwrap();
        assert_relative_eq!(u.objects()[0].worldline().v, -0.5);
    }

    #[test]
    fn test_frame_edit_recomputes_only_its_objects() {
        let mut u = Universe::load(&half_light_frame_spec()).unwrap();
        u.add_object(0, 2.0, 0.0, 0.25, "blue").unwrap();
        let root_object_before = u.objects()[1].worldline();

        u.set_frame_velocity(1, -0.5).unwrap();
        assert_relative_eq!(u.objects()[0].worldline().v, -0.5);
        assert_eq!(u.objects()[1].worldline(), root_object_before);

        u.set_frame_offset(1, 1.0, 0.0).unwrap();
        assert_relative_eq!(u.objects()[0].worldline().x, 1.1547005383792517, epsilon = 1e-9);
        assert_eq!(u.objects()[1].worldline(), root_object_before);

        assert_eq!(
            u.set_frame_velocity(9, 0.1),
            Err(EngineError::UnknownFrameReference(9))
        );
    }

    proptest! {
        #[test]
        fn prop_slice_symmetry(v in -0.99..0.99f64, t in -10.0..10.0f64) {
            // Two objects at the origin with opposite velocities: their
            // "now" positions mirror each other at every time.
            let mut u = Universe::load(&SceneSpec::default()).unwrap();
            u.add_object(0, 0.0, 0.0, v, "red").unwrap();
            u.add_object(0, 0.0, 0.0, -v, "blue").unwrap();

            let slice = u.slice_at_time(t);
            prop_assert!((slice[0].position.x + slice[1].position.x).abs() < 1e-9);
            prop_assert!((slice[0].position.y - t).abs() < 1e-12);
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut u = Universe::load(&half_light_frame_spec()).unwrap();
        u.recompute();
        let once: Vec<_> = u.objects().iter().map(|o| o.worldline()).collect();
        u.recompute();
        let twice: Vec<_> = u.objects().iter().map(|o| o.worldline()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_time_only_moves_the_slice() {
        let mut u = Universe::load(&half_light_frame_spec()).unwrap();
        let before = u.objects()[0].worldline();
        u.set_time(2.0).unwrap();
        assert_eq!(u.objects()[0].worldline(), before);
        assert_relative_eq!(u.renderables(10.0).now_markers[0].position.y, 2.0);

        assert!(u.set_time(f64::NAN).is_err());
        assert_relative_eq!(u.time(), 2.0);
    }

    #[test]
    fn test_renderables_shape() {
        let spec = SceneSpec::from_json(
            r#"{
                "description": "approaching",
                "reference_frames": [
                    { "id": 1, "x": 1.1547, "y": 0.5774, "v": -0.5, "color": "orange" }
                ],
                "objects": [
                    { "rf": 0, "x": 1, "y": 0, "v": 0, "color": "purple" },
                    { "rf": 1, "x": 0, "y": 0, "v": 0, "color": "orange" }
                ],
                "events": [
                    { "rf": 0, "x": 0, "y": 0.5, "v": 0, "color": "red" }
                ]
            }"#,
        )
        .unwrap();
        let u = Universe::load(&spec).unwrap();
        let scene = u.renderables(10.0);

        assert_eq!(scene.description.as_deref(), Some("approaching"));
        assert_eq!(scene.axes.len(), 4); // root + one child frame, two each
        assert_eq!(scene.worldlines.len(), 2);
        assert_eq!(scene.events.len(), 1);
        assert_eq!(scene.now_markers.len(), 2);

        // The root-frame event needs no boost: it renders where it was
        // declared.
        assert_relative_eq!(scene.events[0].position.x, 0.0);
        assert_relative_eq!(scene.events[0].position.y, 0.5);
        assert!(scene.axes.iter().all(|a| a.style == LineStyle::Dashed));
    }

    #[test]
    fn test_declared_frame_zero_shadows_root() {
        let spec = SceneSpec::from_json(
            r#"{
                "reference_frames": [
                    { "id": 0, "x": 0, "y": 0, "v": 0.5, "color": "red" }
                ],
                "objects": [
                    { "rf": 0, "x": 0, "y": 0, "v": 0, "color": "red" }
                ]
            }"#,
        )
        .unwrap();
        let u = Universe::load(&spec).unwrap();
        assert_relative_eq!(u.objects()[0].worldline().v, 0.5);
    }
}
