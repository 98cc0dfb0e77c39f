//! Integration tests for the scene model
//!
//! These tests drive the World the way a host application does:
//! 1. Walls are built around the scene bounds
//! 2. Users add entities with the default bundle
//! 3. Components are replaced and removed through the SceneHost contract
//! 4. Observers see every change through events and the version counter

use atelier_core::{
    BoundingBox, Component, ComponentType, EntityTemplate, Face, Material, SceneEvent, SceneHost,
    Vec3, World,
};
use atelier_mesh::{MeshKind, PrimitiveMeshEngine};
use atelier_physics::{BodyMode, CollisionGroup, ShapeResource};

fn scene() -> (World, PrimitiveMeshEngine) {
    let engine = PrimitiveMeshEngine::new();
    let mut world = World::new();
    world
        .set_bounding_box(BoundingBox::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0)), &engine)
        .expect("bounds should build");
    world.drain_events();
    (world, engine)
}

// ==================== Default Bundle Tests ====================

/// An added entity carries model, physics body, collision and input target
#[test]
fn test_added_entity_has_default_bundle() {
    let (mut world, engine) = scene();
    let key = world
        .spawn_default_entity("Entity 1", &EntityTemplate::default(), &engine)
        .unwrap();

    let components = world.get_entity(key).unwrap().components();
    let model = components.model().expect("model");
    let body = components.physics_body().expect("physics body");
    let collision = components.collision().expect("collision");
    assert!(components.input_target().is_some());

    assert_eq!(model.descriptor.as_ref().unwrap().kind(), MeshKind::Box);
    assert_eq!(model.materials, vec![Material::default_model()]);
    assert_eq!(body.mode, BodyMode::Dynamic);
    assert_eq!(collision.filter.group, CollisionGroup::DEFAULT);
    assert!(matches!(collision.shapes[0], ShapeResource::Convex { .. }));
}

/// Templates can place entities and pick another mesh
#[test]
fn test_template_position_and_mesh() {
    let (mut world, engine) = scene();
    let template = EntityTemplate::default()
        .with_position(Vec3::new(0.0, 1.5, 0.0))
        .with_mesh(MeshKind::Sphere.default_descriptor());
    let key = world.spawn_default_entity("ball", &template, &engine).unwrap();

    let entity = world.get_entity(key).unwrap();
    assert_eq!(entity.position(), Vec3::new(0.0, 1.5, 0.0));
    let model = entity.components().model().unwrap();
    assert_eq!(model.descriptor.as_ref().unwrap().kind(), MeshKind::Sphere);
}

// ==================== Host Contract Tests ====================

/// Components written through the host replace the previous value
#[test]
fn test_host_round_trip() {
    let (mut world, engine) = scene();
    let key = world
        .spawn_default_entity("a", &EntityTemplate::default(), &engine)
        .unwrap();

    let host: &mut dyn SceneHost = &mut world;
    let mut body = match host.component(key, ComponentType::PhysicsBody) {
        Some(Component::PhysicsBody(body)) => body,
        other => panic!("Expected physics body, got {:?}", other),
    };
    body.mass = 50.0;
    host.set_component(key, body.into()).unwrap();

    match host.component(key, ComponentType::PhysicsBody) {
        Some(Component::PhysicsBody(body)) => assert_eq!(body.mass, 50.0),
        other => panic!("Expected physics body, got {:?}", other),
    }
}

/// Walls exist for every face but never show up as live entities
#[test]
fn test_walls_hidden_from_entity_list() {
    let (mut world, engine) = scene();
    let key = world
        .spawn_default_entity("a", &EntityTemplate::default(), &engine)
        .unwrap();

    assert_eq!(SceneHost::live_entities(&world), vec![key]);
    for face in Face::ALL {
        let wall = world.wall(face).expect("wall for every face");
        assert!(!SceneHost::contains(&world, wall));
        let collision = world.get_entity(wall).unwrap().components().collision().unwrap();
        assert!(collision.is_static);
    }
}

// ==================== Change Notification Tests ====================

/// Observers see adds, component edits and removals in order
#[test]
fn test_change_notifications() {
    let (mut world, engine) = scene();
    let start = world.version();

    let a = world
        .spawn_default_entity("a", &EntityTemplate::default(), &engine)
        .unwrap();
    let b = world
        .spawn_default_entity("b", &EntityTemplate::default(), &engine)
        .unwrap();
    world.take_component(a, ComponentType::Model).unwrap();
    world.remove_entity(b);

    assert_eq!(world.version(), start + 4);
    assert_eq!(
        world.drain_events(),
        vec![
            SceneEvent::EntityAdded(a),
            SceneEvent::EntityAdded(b),
            SceneEvent::ComponentRemoved { entity: a, component_type: ComponentType::Model },
            SceneEvent::EntityRemoved(b),
        ]
    );
    assert_eq!(world.live_entities(), &[a]);
}
