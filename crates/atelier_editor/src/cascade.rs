//! Cascade rules
//!
//! A cascade rule is a secondary update run after a component is committed:
//! committing a `trigger` component may rewrite the entity's `target`
//! component. Rules are declared per component-type pair and switched on or
//! off by configuration. A rule only fires when the target already exists.
//!
//! Cascades are best-effort. A failing rule is logged and reported in the
//! [`CommitReport`]; the primary commit is never rolled back.

use atelier_core::{Component, ComponentType, EntityKey, SceneHost};
use atelier_physics::{PhysicsBodyComponent, ShapeResource, DEFAULT_DENSITY};
use serde::{Serialize, Deserialize};

use crate::error::CascadeError;

/// Which built-in cascade rules are enabled
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// A new model mesh regenerates the collision shape
    pub model_regenerates_collision: bool,
    /// A new model mesh regenerates the physics body shape and mass
    pub model_regenerates_physics_body: bool,
    /// Static colliders keep their shape when the mesh changes
    pub skip_static_collision: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            model_regenerates_collision: true,
            model_regenerates_physics_body: false,
            skip_static_collision: true,
        }
    }
}

/// Settings passed to every rule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeContext {
    pub skip_static_collision: bool,
    pub density: f32,
}

/// What a rule decided to do with the target component
pub type CascadeOutcome = Result<Option<Component>, CascadeError>;

/// Rewrites `target` after `committed` replaced `previous`
///
/// Returns `Ok(None)` when nothing needs to change.
pub type CascadeTransform = fn(
    committed: &Component,
    previous: Option<&Component>,
    target: &Component,
    context: &CascadeContext,
) -> CascadeOutcome;

/// A declared secondary update
#[derive(Clone, Copy)]
pub struct CascadeRule {
    pub name: &'static str,
    pub trigger: ComponentType,
    pub target: ComponentType,
    pub transform: CascadeTransform,
}

impl std::fmt::Debug for CascadeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeRule")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .field("target", &self.target)
            .finish()
    }
}

/// A cascade that was applied
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedCascade {
    pub rule: &'static str,
    pub target: ComponentType,
}

/// Result of a commit
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommitReport {
    pub cascades_applied: Vec<AppliedCascade>,
    pub cascade_failures: Vec<CascadeError>,
}

impl CommitReport {
    /// Number of times a rule wrote `target`
    pub fn applied_to(&self, target: ComponentType) -> usize {
        self.cascades_applied.iter().filter(|c| c.target == target).count()
    }

    pub fn is_clean(&self) -> bool {
        self.cascade_failures.is_empty()
    }
}

/// Mesh of a model component, if `component` is one
fn model_mesh(component: Option<&Component>) -> Option<&atelier_mesh::MeshResource> {
    match component {
        Some(Component::Model(model)) => Some(&model.mesh),
        _ => None,
    }
}

/// True if `committed` is a model whose mesh differs from `previous`
fn mesh_changed(committed: &Component, previous: Option<&Component>) -> bool {
    match model_mesh(Some(committed)) {
        Some(mesh) => model_mesh(previous) != Some(mesh),
        None => false,
    }
}

fn regenerate_collision(
    committed: &Component,
    previous: Option<&Component>,
    target: &Component,
    context: &CascadeContext,
) -> CascadeOutcome {
    const RULE: &str = "model_regenerates_collision";
    let (Some(mesh), Component::Collision(collision)) = (model_mesh(Some(committed)), target) else {
        return Ok(None);
    };
    if !mesh_changed(committed, previous) {
        return Ok(None);
    }
    if context.skip_static_collision && collision.is_static {
        log::debug!("{}: static collider keeps its shape", RULE);
        return Ok(None);
    }
    let shape = ShapeResource::generate_convex(mesh).map_err(|source| CascadeError::Shape { rule: RULE, source })?;
    let mut collision = collision.clone();
    collision.shapes = vec![shape];
    Ok(Some(collision.into()))
}

fn regenerate_physics_body(
    committed: &Component,
    previous: Option<&Component>,
    target: &Component,
    context: &CascadeContext,
) -> CascadeOutcome {
    const RULE: &str = "model_regenerates_physics_body";
    let (Some(mesh), Component::PhysicsBody(body)) = (model_mesh(Some(committed)), target) else {
        return Ok(None);
    };
    if !mesh_changed(committed, previous) {
        return Ok(None);
    }
    let shape = ShapeResource::generate_convex(mesh).map_err(|source| CascadeError::Shape { rule: RULE, source })?;
    let shapes = vec![shape];
    let mut body = body.clone();
    body.mass = PhysicsBodyComponent::mass_for(&shapes, context.density);
    body.set_shapes(shapes);
    Ok(Some(body.into()))
}

/// Model → Collision: rebuild the convex shape from the new mesh
pub const MODEL_REGENERATES_COLLISION: CascadeRule = CascadeRule {
    name: "model_regenerates_collision",
    trigger: ComponentType::Model,
    target: ComponentType::Collision,
    transform: regenerate_collision,
};

/// Model → PhysicsBody: rebuild the shape and derive mass again
pub const MODEL_REGENERATES_PHYSICS_BODY: CascadeRule = CascadeRule {
    name: "model_regenerates_physics_body",
    trigger: ComponentType::Model,
    target: ComponentType::PhysicsBody,
    transform: regenerate_physics_body,
};

/// The set of rules run after each commit
#[derive(Clone, Debug)]
pub struct CascadeRules {
    rules: Vec<CascadeRule>,
    context: CascadeContext,
}

impl Default for CascadeRules {
    fn default() -> Self {
        Self::from_config(&CascadeConfig::default(), DEFAULT_DENSITY)
    }
}

impl CascadeRules {
    /// No rules at all
    pub fn none() -> Self {
        Self {
            rules: Vec::new(),
            context: CascadeContext {
                skip_static_collision: true,
                density: DEFAULT_DENSITY,
            },
        }
    }

    /// Built-in rules enabled by `config`
    ///
    /// `density` is the one new bodies are built with, so a regenerated
    /// mass matches what the entity started with.
    pub fn from_config(config: &CascadeConfig, density: f32) -> Self {
        let mut rules = Vec::new();
        if config.model_regenerates_collision {
            rules.push(MODEL_REGENERATES_COLLISION);
        }
        if config.model_regenerates_physics_body {
            rules.push(MODEL_REGENERATES_PHYSICS_BODY);
        }
        Self {
            rules,
            context: CascadeContext {
                skip_static_collision: config.skip_static_collision,
                density,
            },
        }
    }

    /// Add a custom rule; rules run in insertion order
    pub fn with_rule(mut self, rule: CascadeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[CascadeRule] {
        &self.rules
    }

    /// Run every rule triggered by `committed`
    ///
    /// `previous` is the component `committed` replaced, if any.
    pub fn apply(
        &self,
        host: &mut dyn SceneHost,
        entity: EntityKey,
        committed: &Component,
        previous: Option<&Component>,
    ) -> CommitReport {
        let mut report = CommitReport::default();
        let trigger = committed.component_type();
        for rule in self.rules.iter().filter(|r| r.trigger == trigger) {
            let Some(target) = host.component(entity, rule.target) else {
                continue;
            };
            let outcome = (rule.transform)(committed, previous, &target, &self.context).and_then(|update| {
                match update {
                    Some(update) => host
                        .set_component(entity, update)
                        .map(|_| true)
                        .map_err(|source| CascadeError::Scene { rule: rule.name, source }),
                    None => Ok(false),
                }
            });
            match outcome {
                Ok(true) => {
                    log::debug!("cascade '{}' updated {} on {:?}", rule.name, rule.target, entity);
                    report.cascades_applied.push(AppliedCascade { rule: rule.name, target: rule.target });
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("{}", e);
                    report.cascade_failures.push(e);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{ModelComponent, World, EntityTemplate};
    use atelier_mesh::{MeshKind, MeshResource, PrimitiveMeshEngine};

    fn world_with_entity() -> (World, EntityKey, PrimitiveMeshEngine) {
        let engine = PrimitiveMeshEngine::new();
        let mut world = World::new();
        let key = world
            .spawn_default_entity("a", &EntityTemplate::default(), &engine)
            .unwrap();
        (world, key, engine)
    }

    fn sphere_model(engine: &PrimitiveMeshEngine) -> ModelComponent {
        ModelComponent::from_descriptor(MeshKind::Sphere.default_descriptor(), Vec::new(), engine).unwrap()
    }

    #[test]
    fn test_default_rules() {
        let rules = CascadeRules::default();
        let names: Vec<_> = rules.rules().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["model_regenerates_collision"]);
    }

    #[test]
    fn test_collision_regenerated_once() {
        let (mut world, key, engine) = world_with_entity();
        let previous = world.get_entity(key).unwrap().components().model().cloned().map(Component::from);
        let committed: Component = sphere_model(&engine).into();
        world.insert_component(key, committed.clone()).unwrap();

        let report = CascadeRules::default().apply(&mut world, key, &committed, previous.as_ref());
        assert_eq!(report.applied_to(ComponentType::Collision), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_unchanged_mesh_does_not_cascade() {
        let (mut world, key, _engine) = world_with_entity();
        let model: Component = world.get_entity(key).unwrap().components().model().cloned().unwrap().into();
        let report = CascadeRules::default().apply(&mut world, key, &model, Some(&model));
        assert!(report.cascades_applied.is_empty());
    }

    #[test]
    fn test_missing_target_does_not_cascade() {
        let (mut world, key, engine) = world_with_entity();
        world.take_component(key, ComponentType::Collision).unwrap();
        let committed: Component = sphere_model(&engine).into();
        let report = CascadeRules::default().apply(&mut world, key, &committed, None);
        assert!(report.cascades_applied.is_empty());
        assert!(world.get_entity(key).unwrap().components().collision().is_none());
    }

    #[test]
    fn test_static_collider_skipped() {
        let (mut world, key, engine) = world_with_entity();
        let mut collision = world.get_entity(key).unwrap().components().collision().cloned().unwrap();
        collision.is_static = true;
        world.insert_component(key, collision.into()).unwrap();

        let committed: Component = sphere_model(&engine).into();
        let report = CascadeRules::default().apply(&mut world, key, &committed, None);
        assert_eq!(report.applied_to(ComponentType::Collision), 0);

        let config = CascadeConfig {
            skip_static_collision: false,
            ..CascadeConfig::default()
        };
        let report = CascadeRules::from_config(&config, DEFAULT_DENSITY).apply(&mut world, key, &committed, None);
        assert_eq!(report.applied_to(ComponentType::Collision), 1);
    }

    #[test]
    fn test_physics_body_rule_rederives_mass() {
        let (mut world, key, engine) = world_with_entity();
        let config = CascadeConfig {
            model_regenerates_physics_body: true,
            ..CascadeConfig::default()
        };
        let committed: Component = sphere_model(&engine).into();
        let report = CascadeRules::from_config(&config, DEFAULT_DENSITY).apply(&mut world, key, &committed, None);
        assert_eq!(report.applied_to(ComponentType::PhysicsBody), 1);
        assert_eq!(report.applied_to(ComponentType::Collision), 1);
    }

    #[test]
    fn test_physics_body_rule_uses_given_density() {
        let (mut world, key, engine) = world_with_entity();
        let config = CascadeConfig {
            model_regenerates_physics_body: true,
            ..CascadeConfig::default()
        };
        let model = sphere_model(&engine);
        let committed: Component = model.clone().into();
        CascadeRules::from_config(&config, 500.0).apply(&mut world, key, &committed, None);

        let body = world.get_entity(key).unwrap().components().physics_body().cloned().unwrap();
        let expected = atelier_core::default_physics_body(&model, 500.0, body.mode).unwrap();
        assert_eq!(body.mass, expected.mass);
    }

    #[test]
    fn test_failure_is_reported_not_raised() {
        let (mut world, key, _engine) = world_with_entity();
        let empty = ModelComponent::new(MeshResource::new("empty", Vec::new(), Vec::new()), Vec::new());
        let committed: Component = empty.into();
        let report = CascadeRules::default().apply(&mut world, key, &committed, None);
        assert_eq!(report.cascade_failures.len(), 1);
        assert_eq!(report.cascade_failures[0].rule(), "model_regenerates_collision");
    }

    #[test]
    fn test_none_has_no_rules() {
        assert!(CascadeRules::none().rules().is_empty());
    }
}
