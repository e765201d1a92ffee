//! Collision groups and the rapier-backed line of sight.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::agents::{Layer, RayHit, SpatialQuery};

pub const PLAYER_GROUP: Group = Group::GROUP_1;
pub const ENEMY_GROUP: Group = Group::GROUP_2;
pub const WORLD_GROUP: Group = Group::GROUP_3;

pub fn group_for(layer: Layer) -> Group {
    match layer {
        Layer::Player => PLAYER_GROUP,
        Layer::Enemy => ENEMY_GROUP,
        Layer::World => WORLD_GROUP,
    }
}

/// Groups for a character body: member of its own layer, blocked by the world.
pub fn character_groups(layer: Layer) -> CollisionGroups {
    CollisionGroups::new(group_for(layer), WORLD_GROUP)
}

/// Static level geometry, solid to everything.
pub fn world_groups() -> CollisionGroups {
    CollisionGroups::new(WORLD_GROUP, Group::ALL)
}

/// Query filter that only reports colliders in `targets`, ignoring `exclude`.
pub fn filter_for(targets: Group, exclude: Entity) -> QueryFilter<'static> {
    QueryFilter::default()
        .groups(CollisionGroups::new(Group::ALL, targets))
        .exclude_collider(exclude)
}

/// Raycasts through rapier on behalf of one agent, never hitting the agent itself.
pub struct RapierSight<'a> {
    pub context: &'a RapierContext,
    pub exclude: Entity,
}

impl SpatialQuery for RapierSight<'_> {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: Layer,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        self.context
            .cast_ray(
                origin,
                direction,
                max_distance,
                true,
                filter_for(group_for(layer), self.exclude),
            )
            .map(|(entity, distance)| RayHit { entity, distance })
    }
}
