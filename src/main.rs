//! Playground binary: a spinning box, a bouncing sphere, and a draggable
//! ground plane under a spot light, with an options overlay.

use brae::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = brae::default();

    {
        let scene = app.scene_mut();

        scene
            .add_material_rgb("box", 0.0, 1.0, 0.0)
            .unlit = true;
        scene.add_material_rgb("plane", 1.0, 1.0, 0.0);
        scene.add_material_rgb("sphere", 1.0, 0.917, 0.0);

        scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("box-1")
                .with_material("box"),
        );

        scene.add_node(
            Node::from_geometry(&generate_plane(30.0, 30.0))
                .with_name("plane-1")
                .with_material("plane")
                .draggable(true)
                .ground(true),
        );

        let sphere_index = scene.add_node(
            Node::from_geometry(&generate_sphere(40, 50))
                .with_name("sphere-1")
                .with_material("sphere"),
        );
        if let Some(sphere) = scene.node_mut(sphere_index) {
            sphere.set_scale(5.0);
        }
    }

    app.set_ui(|ui, options| {
        scene_options_panel(ui, options);
    });

    let mut step: f32 = 0.0;
    app.set_update(move |scene, options, elapsed_ms| {
        let t = elapsed_ms / 1000.0;

        if let Some(node) = scene.node_by_name_mut("box-1") {
            node.transform = Matrix4::from_angle_x(Rad(t)) * Matrix4::from_angle_y(Rad(t));
        }

        step += options.sphere_speed;
        if let Some(node) = scene.node_by_name_mut("sphere-1") {
            node.transform = Matrix4::from_translation(Vector3::new(
                0.0,
                10.0 * step.sin().abs(),
                0.0,
            )) * Matrix4::from_scale(5.0);
        }

        if let Some(material) = scene.material_manager.get_material_mut("sphere") {
            material.set_base_color([
                options.sphere_color[0],
                options.sphere_color[1],
                options.sphere_color[2],
                1.0,
            ]);
            material.set_wireframe(options.sphere_wireframe);
        }

        scene.lighting.spot.angle = options.spot_angle;
        scene.lighting.spot.penumbra = options.spot_penumbra;
        scene.lighting.spot.intensity = options.spot_intensity;
    });

    app.run()
}
