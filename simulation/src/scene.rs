//! Translates world queries into a drawable scene.

use polygon_defence_rendering::{to_vec2, Hud, Scene, SceneEnemy, SceneProjectile, SceneTower};
use polygon_defence_world::{query, World};

/// Captures everything the current frame displays.
#[must_use]
pub fn capture_scene(world: &World) -> Scene {
    let mut scene = Scene::new(query::viewport(world), query::phase(world));

    scene.path = query::path(world).iter().copied().map(to_vec2).collect();

    scene.towers = query::tower_view(world)
        .iter()
        .map(|tower| SceneTower {
            kind: tower.kind,
            position: to_vec2(tower.position),
            ready: tower.cooldown.is_zero(),
        })
        .collect();

    scene.enemies = query::enemy_view(world)
        .iter()
        .map(|enemy| SceneEnemy {
            position: to_vec2(enemy.position),
            radius: enemy.radius,
            health_fraction: if enemy.max_health > 0.0 {
                enemy.health / enemy.max_health
            } else {
                0.0
            },
        })
        .collect();

    scene.projectiles = query::projectile_view(world)
        .iter()
        .map(|projectile| SceneProjectile {
            kind: projectile.kind,
            position: to_vec2(projectile.position),
        })
        .collect();

    scene.hud = Hud {
        money: query::money(world),
        lives: query::lives(world),
        wave: query::wave(world),
        next_wave: query::time_until_next_wave(world),
        selected: query::selected_tower_kind(world),
    };

    scene
}
