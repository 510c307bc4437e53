use std::sync::Arc;

use approx::assert_abs_diff_eq;
use cgmath::{InnerSpace, Vector3};
use haggis_deform::deform::calculate_weight;
use haggis_deform::prelude::*;

fn tube() -> DeformableMeshNode {
    DeformableMeshNode::from_geometry("tube", &generate_cylinder(0.5, 4.0, 16, 16))
}

#[test]
fn test_twist_keeps_height_and_never_widens() {
    let mut node = tube();
    let twist = shared(TwistDeformer::new(Vector3::unit_y(), Vector3::new(0.0, -2.0, 0.0)));
    twist.borrow_mut().set_angle(std::f32::consts::FRAC_PI_2);
    twist.borrow_mut().set_distance_range(0.0, 4.0);
    node.add_deformer(twist);
    node.apply_deformers().unwrap();

    let original = node.original_vertices().unwrap().clone();
    let deformed = node.mesh(0).unwrap().vertices();
    for (before, after) in original.iter().zip(deformed.iter()) {
        let radius_before = Vector3::new(before.x, 0.0, before.z).magnitude();
        let radius_after = Vector3::new(after.x, 0.0, after.z).magnitude();
        // Partially weighted vertices blend along the chord towards the rotated point.
        assert!(radius_after <= radius_before + 1e-5, "{radius_after} > {radius_before}");
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-5);
    }
    assert_ne!(original.as_ref(), deformed);
}

#[test]
fn test_twist_blends_rotation_by_falloff_weight() {
    let center = Vector3::new(0.0, -2.0, 0.0);
    let angle = std::f32::consts::FRAC_PI_2;
    let mut node = tube();
    let twist = shared(TwistDeformer::new(Vector3::unit_y(), center));
    twist.borrow_mut().set_angle(angle);
    twist.borrow_mut().set_distance_range(0.0, 4.0);
    node.add_deformer(twist.clone());
    node.apply_deformers().unwrap();

    let twist = twist.borrow();
    let original = node.original_vertices().unwrap().clone();
    let deformed = node.mesh(0).unwrap().vertices();
    for (&before, &after) in original.iter().zip(deformed.iter()) {
        let distance = (before.y - center.y).abs();
        let weight = calculate_weight(distance, twist.start_distance(), twist.end_distance(), twist.falloff());
        let (sin, cos) = (angle * weight).sin_cos();
        let rotated = Vector3::new(before.x * cos + before.z * sin, before.y, -before.x * sin + before.z * cos);
        let expected = before + (rotated - before) * weight;
        assert_abs_diff_eq!(after, expected, epsilon = 1e-4);
    }
}

#[test]
fn test_stack_matches_manual_chain() {
    let input = Arc::new(Vertices::from_positions(
        (0..20)
            .map(|i| Vector3::new((i % 5) as f32 * 0.3, (i / 5) as f32 * 0.7, 0.1))
            .collect(),
    ));

    let mut bend = BendDeformer::default();
    bend.set_curvature(0.3);
    let mut wave = WaveDeformer::default();
    wave.set_time(0.75);

    let mut manual_bend = bend.clone();
    manual_bend.set_input(input.clone());
    manual_bend.apply();
    let mut manual_wave = wave.clone();
    manual_wave.set_input(manual_bend.output().unwrap());
    manual_wave.apply();

    let mut stack = DeformerStack::new();
    stack.add_deformer(shared(bend));
    stack.add_deformer(shared(wave));
    stack.set_input(input);
    stack.apply().unwrap();

    assert_eq!(stack.output(), manual_wave.output().as_deref());
}

#[test]
fn test_reapplying_does_not_drift() {
    let mut node = tube();
    let noise = shared(RandomDeformer::new(NoiseType::Gaussian, DeformationMode::Additive));
    noise.borrow_mut().set_uniform_intensity(0.2);
    node.add_deformer(noise);

    node.apply_deformers().unwrap();
    let first = node.mesh(0).unwrap().vertices().clone();
    for _ in 0..3 {
        node.apply_deformers().unwrap();
    }
    assert_eq!(node.mesh(0).unwrap().vertices(), &first);
}

#[test]
fn test_live_edit_through_shared_handle() {
    let mut node = tube();
    let scale = shared(ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)));
    scale.borrow_mut().set_falloff(0.0);
    node.add_deformer(scale.clone());

    node.apply_deformers().unwrap();
    assert_eq!(node.mesh(0).unwrap().vertices(), node.original_vertices().unwrap().as_ref());

    scale.borrow_mut().set_scale(Vector3::new(2.0, 2.0, 2.0));
    node.apply_deformers().unwrap();
    let bbox = node.local_bounding_box();
    assert_abs_diff_eq!(bbox.max().y, 4.0, epsilon = 1e-5);
    assert_abs_diff_eq!(bbox.min().y, -4.0, epsilon = 1e-5);
}

#[test]
fn test_disabling_a_deformer_restores_rest_pose() {
    let mut node = tube();
    let wave = shared(WaveDeformer::new(0.5, 1.0, 0.0, Vector3::unit_y(), Vector3::unit_x()));
    node.add_deformer(wave.clone());
    node.apply_deformers().unwrap();

    wave.borrow_mut().set_enabled(false);
    node.apply_deformers().unwrap();
    assert_eq!(node.mesh(0).unwrap().vertices(), node.original_vertices().unwrap().as_ref());
}

#[test]
fn test_property_round_trip_through_animator() {
    let target = shared(TurbulenceDeformer::default());
    let mut animator = DeformerAnimator::new(target.clone());

    let mut calm = TurbulenceDeformer::default();
    calm.set_intensity(0.0);
    let mut wild = TurbulenceDeformer::default();
    wild.set_intensity(2.0);
    wild.set_octaves(6);

    animator.add_keyframe(0.0, &calm);
    animator.add_keyframe(1.0, &wild);
    animator.set_time(0.75);
    animator.update();

    let target = target.borrow();
    assert_abs_diff_eq!(target.intensity(), 1.5, epsilon = 1e-6);
    assert_eq!(target.octaves(), 6);
}
