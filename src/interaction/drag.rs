//! Press/drag/release state machine for node dragging
//!
//! A press while idle picks the scene under the press-channel pointer and, if
//! the nearest hit is a draggable node, grabs it. A press while dragging drops
//! the node again ("click again to drop"). While a drag is active the
//! per-frame tick re-picks under the move-channel pointer and reports what the
//! ray passes over.
//!
//! The dragged node is referenced by its index into the scene's node list.
//! Nodes are append-only for the lifetime of the process, so a held index
//! never dangles, and the grab transition only fires for nodes with
//! `draggable = true`.

use log::{info, trace};

use crate::gfx::{picking::NodePicker, scene::Scene};

use super::pointer::{PointerSample, PointerTracker};

/// Current drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Dragging the node at this index in the scene.
    Dragging(usize),
}

/// Owns the drag state and drives its transitions from input events.
///
/// All methods run on the single event/render thread; handlers and the tick
/// are never reentered.
#[derive(Debug)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the node currently being dragged, if any.
    pub fn dragged_node(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging(index) => Some(index),
            DragState::Idle => None,
        }
    }

    /// Handles a raw press event from the window.
    ///
    /// While dragging, any press drops the node before the press pointer is
    /// even recorded; the press channel keeps the sample that started the
    /// drag. While idle, the press is recorded and the nearest hit is grabbed
    /// if its node is draggable.
    pub fn handle_press(
        &mut self,
        screen: (f32, f32),
        viewport: (f32, f32),
        pointer: &mut PointerTracker,
        picker: &mut NodePicker,
        scene: &Scene,
    ) {
        if self.drop_if_dragging(scene) {
            return;
        }
        let sample = pointer.record_press(screen, viewport);
        self.try_grab(sample, picker, scene);
    }

    /// Handles a press at an already-converted pointer position.
    ///
    /// Same transitions as [`DragController::handle_press`], without touching
    /// the pointer tracker. A miss is a normal empty result, not an error.
    pub fn on_press(&mut self, sample: PointerSample, picker: &mut NodePicker, scene: &Scene) {
        if self.drop_if_dragging(scene) {
            return;
        }
        self.try_grab(sample, picker, scene);
    }

    fn drop_if_dragging(&mut self, scene: &Scene) -> bool {
        if let DragState::Dragging(index) = self.state {
            if let Some(node) = scene.node(index) {
                info!("dropped draggable node: {}", node.name);
            }
            self.state = DragState::Idle;
            return true;
        }
        false
    }

    fn try_grab(&mut self, sample: PointerSample, picker: &mut NodePicker, scene: &Scene) {
        let hits = picker.pick(sample, &scene.camera_manager.camera, scene);
        if let Some(hit) = hits.first() {
            let node = &scene.nodes[hit.node_index];
            if node.draggable {
                self.state = DragState::Dragging(hit.node_index);
                info!("found draggable node: {}", node.name);
            }
        }
    }

    /// Per-frame hook, called once per frame after all input for that frame.
    ///
    /// While dragging, re-picks under the move-channel pointer and logs the
    /// nodes the ray passes over. The dragged node itself is not
    /// repositioned; the grab changes what the pick observes, not the scene.
    pub fn tick(&self, pointer: &PointerTracker, picker: &mut NodePicker, scene: &Scene) {
        if let DragState::Dragging(_) = self.state {
            let hits = picker.pick(pointer.move_sample(), &scene.camera_manager.camera, scene);
            for hit in &hits {
                trace!("drag ray over {}", scene.nodes[hit.node_index].name);
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{
            camera_controller::CameraController, camera_utils::CameraManager,
            orbit_camera::OrbitCamera,
        },
        geometry::{generate_cube, generate_plane},
        scene::Node,
    };
    use cgmath::{Matrix4, Vector3, Zero};

    fn scene_with_camera(eye: Vector3<f32>) -> Scene {
        let camera = OrbitCamera::from_position(eye, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    const CENTER: PointerSample = PointerSample { x: 0.0, y: 0.0 };

    #[test]
    fn test_press_on_non_draggable_node_stays_idle() {
        let mut scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));
        scene.add_node(Node::from_geometry(&generate_cube()).with_name("box-1"));

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();
        drag.on_press(CENTER, &mut picker, &scene);

        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_press_on_draggable_node_starts_drag() {
        let mut scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));
        let index = scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("box-1")
                .draggable(true),
        );

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();
        drag.on_press(CENTER, &mut picker, &scene);

        assert_eq!(drag.state(), DragState::Dragging(index));
    }

    #[test]
    fn test_press_on_empty_space_stays_idle() {
        let scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();
        drag.on_press(CENTER, &mut picker, &scene);

        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_any_press_while_dragging_drops() {
        let mut scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));
        scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("box-1")
                .draggable(true),
        );

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();
        drag.on_press(CENTER, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Dragging(0));

        // The drop press ray points at nothing at all.
        let offscreen = PointerSample { x: 0.95, y: 0.95 };
        drag.on_press(offscreen, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_ground_plane_grab_and_drop() {
        // Camera at (1, 2, 6) looking at the origin, a 30x30 draggable ground
        // plane at y = 0 and a decorative box off to the side. A press at the
        // screen center rays through the origin and lands on the plane.
        let mut scene = scene_with_camera(Vector3::new(1.0, 2.0, 6.0));
        let plane = scene.add_node(
            Node::from_geometry(&generate_plane(30.0, 30.0))
                .with_name("plane-1")
                .draggable(true)
                .ground(true),
        );
        let mut decoy = Node::from_geometry(&generate_cube()).with_name("box-1");
        decoy.transform = Matrix4::from_translation(Vector3::new(3.0, 0.5, 0.0));
        scene.add_node(decoy);

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();

        drag.on_press(CENTER, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Dragging(plane));

        drag.on_press(PointerSample { x: -0.7, y: 0.3 }, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_press_leaves_press_channel_untouched() {
        let mut scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));
        scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("box-1")
                .draggable(true),
        );

        let viewport = (800.0, 600.0);
        let mut pointer = PointerTracker::new();
        let mut picker = NodePicker::new();
        let mut drag = DragController::new();

        drag.handle_press((400.0, 300.0), viewport, &mut pointer, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Dragging(0));
        let grab_sample = pointer.press_sample();

        // The drop press is discarded before the press channel is recorded.
        drag.handle_press((100.0, 100.0), viewport, &mut pointer, &mut picker, &scene);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(pointer.press_sample(), grab_sample);
    }

    #[test]
    fn test_tick_does_not_move_dragged_node() {
        let mut scene = scene_with_camera(Vector3::new(0.0, 0.0, 10.0));
        scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("box-1")
                .draggable(true),
        );

        let mut picker = NodePicker::new();
        let mut drag = DragController::new();
        let mut pointer = PointerTracker::new();

        drag.on_press(CENTER, &mut picker, &scene);
        let before = scene.nodes[0].position();

        pointer.record_move((600.0, 150.0), (800.0, 600.0));
        drag.tick(&pointer, &mut picker, &scene);

        assert_eq!(drag.state(), DragState::Dragging(0));
        assert_eq!(scene.nodes[0].position(), before);
    }
}
