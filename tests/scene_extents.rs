use approx::assert_abs_diff_eq;
use cgmath::Vector3;
use haggis_deform::prelude::*;

fn unit_box() -> BoundingBox {
    BoundingBox::from_bounds(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
}

fn leaf_with_box(name: &str, pos: Vector3<f32>) -> TransformNode {
    let mut leaf = TransformNode::at(name, pos);
    leaf.set_local_bounding_box(unit_box());
    leaf
}

#[test]
fn test_nested_translations_accumulate() {
    let mut inner = CompositeNode::new(TransformNode::at("inner", Vector3::new(0.0, 5.0, 0.0)));
    inner.add(leaf_with_box("leaf", Vector3::new(1.0, 0.0, 0.0)));

    let mut root = CompositeNode::new(TransformNode::at("root", Vector3::new(10.0, 0.0, 0.0)));
    root.add(inner);
    let root = Node::from(root);

    let mut visitor = ExtentVisitor::new();
    visitor.visit(&root);
    let bbox = visitor.bounding_box();
    assert_eq!(bbox.min(), Vector3::new(10.0, 4.0, -1.0));
    assert_eq!(bbox.max(), Vector3::new(12.0, 6.0, 1.0));
    assert_eq!(visitor.depth(), 1);
}

#[test]
fn test_scaled_and_rotated_parent() {
    let mut parent = TransformNode::at("parent", Vector3::new(0.0, 0.0, 0.0));
    parent.set_scale(Vector3::new(2.0, 2.0, 2.0));
    parent.set_rot_axis(Vector3::unit_z());
    parent.set_rot_angle(90.0);

    let mut group = CompositeNode::new(parent);
    group.add(leaf_with_box("leaf", Vector3::new(3.0, 0.0, 0.0)));

    let mut visitor = ExtentVisitor::new();
    visitor.visit(&Node::from(group));
    let bbox = visitor.bounding_box();

    // leaf center (3, 0, 0) -> scaled (6, 0, 0) -> rotated (0, 6, 0), half extent 2
    assert_abs_diff_eq!(bbox.center(), Vector3::new(0.0, 6.0, 0.0), epsilon = 1e-4);
    assert_abs_diff_eq!(bbox.size(), Vector3::new(4.0, 4.0, 4.0), epsilon = 1e-4);
}

#[test]
fn test_extent_follows_deformed_mesh() {
    let mut mesh = DeformableMeshNode::from_geometry("cube", &generate_cube(2.0));
    let grow = shared(ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(3.0, 1.0, 1.0)));
    grow.borrow_mut().set_falloff(0.0);
    mesh.add_deformer(grow);
    mesh.transform_mut().set_pos(Vector3::new(0.0, 0.0, -5.0));

    let mut root = CompositeNode::new(TransformNode::new());
    root.add(mesh);
    let mut root = Node::from(root);

    let mut visitor = ExtentVisitor::new();
    visitor.visit(&root);
    assert_abs_diff_eq!(visitor.bounding_box().max(), Vector3::new(1.0, 1.0, -4.0), epsilon = 1e-5);

    if let Node::Composite(composite) = &mut root {
        if let Ok(Node::Mesh(mesh)) = composite.child_mut(0) {
            mesh.apply_deformers().unwrap();
        }
    }

    visitor.reset();
    visitor.visit(&root);
    assert_abs_diff_eq!(visitor.bounding_box().max(), Vector3::new(3.0, 1.0, -4.0), epsilon = 1e-5);
    assert_abs_diff_eq!(visitor.bounding_box().min(), Vector3::new(-3.0, -1.0, -6.0), epsilon = 1e-5);
}

#[test]
fn test_extent_covers_every_mesh_of_a_node() {
    let mut node = DeformableMeshNode::from_geometry("pair", &generate_cube(1.0));
    let mut shifted = generate_cube(1.0);
    for position in &mut shifted.positions {
        position.x += 10.0;
    }
    node.add_mesh(Mesh::from_geometry(&shifted));

    let grow = shared(ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 4.0, 1.0)));
    grow.borrow_mut().set_falloff(0.0);
    node.add_deformer(grow);
    node.apply_deformers().unwrap();

    let mut visitor = ExtentVisitor::new();
    visitor.visit(&Node::from(node));
    let bbox = visitor.bounding_box();
    assert_abs_diff_eq!(bbox.max(), Vector3::new(10.5, 2.0, 0.5), epsilon = 1e-5);
    assert_abs_diff_eq!(bbox.min(), Vector3::new(-0.5, -2.0, -0.5), epsilon = 1e-5);
}

#[test]
fn test_hidden_subtree_is_ignored_unless_requested() {
    let mut hidden = leaf_with_box("hidden", Vector3::new(50.0, 0.0, 0.0));
    hidden.set_visible(false);

    let mut root = CompositeNode::new(TransformNode::new());
    root.add(leaf_with_box("shown", Vector3::new(0.0, 0.0, 0.0)));
    root.add(hidden);
    let root = Node::from(root);

    let mut visitor = ExtentVisitor::new();
    visitor.visit(&root);
    assert_eq!(visitor.bounding_box().max(), Vector3::new(1.0, 1.0, 1.0));

    visitor.reset();
    visitor.set_include_invisible(true);
    visitor.visit(&root);
    assert_eq!(visitor.bounding_box().max(), Vector3::new(51.0, 1.0, 1.0));
}

#[test]
fn test_positions_of_every_node() {
    let mut group = CompositeNode::new(TransformNode::at("group", Vector3::new(1.0, 0.0, 0.0)));
    group.add(TransformNode::at("a", Vector3::new(0.0, 1.0, 0.0)));
    group.add(TransformNode::at("b", Vector3::new(0.0, 0.0, 1.0)));

    let mut visitor = PositionVisitor::new();
    visitor.visit(&Node::from(group));
    assert_eq!(
        visitor.positions(),
        [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
        ]
    );
}
