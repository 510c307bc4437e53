//! # Spline Path Demo
//!
//! Moves a node along a closed Catmull-Rom path at constant chord speed while
//! a keyframed twist animates on the mesh it carries.

use anyhow::Result;
use cgmath::Vector3;
use haggis_deform::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let path = Spline::from_points([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(4.0, 1.0, 0.0),
        Vector3::new(4.0, 1.0, 4.0),
        Vector3::new(0.0, 0.0, 4.0),
        Vector3::new(0.0, 0.0, 0.0),
    ]);
    log::info!("path length {:.2} over {} control points", path.total_length(), path.len());

    let mut animation = SplineAnimation::new(path);
    animation.set_interpolation(SplineInterpolation::Distance);
    animation.set_mode(SplineAnimMode::Loop);
    animation.set_speed(2.0);

    let mut column = DeformableMeshNode::from_geometry("column", &generate_cylinder(0.25, 2.0, 12, 12));
    let twist = shared(TwistDeformer::default());
    column.add_deformer(twist.clone());

    let mut animator = DeformerAnimator::new(twist.clone());
    let mut key = TwistDeformer::default();
    animator.add_keyframe(0.0, &key);
    key.set_angle(std::f32::consts::PI);
    animator.add_keyframe(2.0, &key);
    animator.set_looping(true);

    let dt = 1.0 / 30.0;
    for frame in 0..90 {
        animation.update(dt, column.transform_mut())?;
        animator.advance(dt);
        column.apply_deformers()?;

        if frame % 15 == 0 {
            let pos = column.transform().pos();
            log::info!(
                "frame {frame}: pos ({:.2}, {:.2}, {:.2}) twist {:.2} rad",
                pos.x,
                pos.y,
                pos.z,
                twist.borrow().angle()
            );
        }
    }

    println!("Finished at distance {:.3}", animation.distance());
    Ok(())
}
