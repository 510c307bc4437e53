//! # Deformer Stack Demo
//!
//! Builds a small scene with a twisted, bent and jittered tube next to a
//! waving plane, steps the deformation for a few frames and logs the
//! world-space extent of the scene after each one.
//!
//! Run with `RUST_LOG=debug cargo run --example deform_stack`.

use anyhow::Result;
use cgmath::Vector3;
use haggis_deform::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    // Tube standing on the origin, deformed by a twist, a bend and a little noise
    let mut tube = DeformableMeshNode::from_geometry("tube", &generate_cylinder(0.5, 4.0, 24, 32));
    tube.set_auto_update(true);

    let twist = shared(TwistDeformer::new(Vector3::unit_y(), Vector3::new(0.0, -2.0, 0.0)));
    twist.borrow_mut().set_distance_range(0.0, 4.0);
    let bend = shared(BendDeformer::new(Vector3::unit_y(), Vector3::new(0.0, -2.0, 0.0)));
    bend.borrow_mut().set_distance_range(0.0, 4.0);
    let jitter = shared(RandomDeformer::new(NoiseType::Perlin, DeformationMode::Additive));
    jitter.borrow_mut().set_uniform_intensity(0.05);
    jitter.borrow_mut().set_uniform_frequency(2.0);

    tube.add_deformer(twist.clone());
    tube.add_deformer(bend.clone());
    tube.add_deformer(jitter.clone());

    // Ground plane offset to the side with a travelling wave
    let mut ground = DeformableMeshNode::from_geometry("ground", &generate_plane(6.0, 6.0, 24, 24));
    ground.set_auto_update(true);
    let wave = shared(WaveDeformer::new(0.2, 2.0, 1.5, Vector3::unit_x(), Vector3::unit_y()));
    ground.add_deformer(wave.clone());

    let mut tube_group = CompositeNode::new(TransformNode::at("tube_group", Vector3::new(0.0, 2.0, 0.0)));
    tube_group.add(tube);

    let mut root = CompositeNode::new(TransformNode::at("root", Vector3::new(0.0, 0.0, 0.0)));
    root.add(tube_group);
    let ground_index = root.add(ground);
    root.child_mut(ground_index)?.transform_mut().set_pos(Vector3::new(5.0, 0.0, 0.0));

    let mut root = Node::from(root);
    let mut extents = ExtentVisitor::new();

    for frame in 0..5 {
        let time = frame as f32 * 0.25;

        twist.borrow_mut().set_angle(time * 1.5);
        bend.borrow_mut().set_curvature(time * 0.2);
        jitter.borrow_mut().set_time(time);
        wave.borrow_mut().set_time(time);

        root.draw();

        extents.reset();
        extents.visit(&root);
        let bbox = extents.bounding_box();
        log::info!(
            "frame {frame}: extent min ({:.2}, {:.2}, {:.2}) max ({:.2}, {:.2}, {:.2})",
            bbox.min().x,
            bbox.min().y,
            bbox.min().z,
            bbox.max().x,
            bbox.max().y,
            bbox.max().z
        );
    }

    let center = extents.bounding_box().center();
    println!(
        "Scene center after deformation: ({:.3}, {:.3}, {:.3})",
        center.x, center.y, center.z
    );

    Ok(())
}
