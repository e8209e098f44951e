#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves projectile impacts into per-enemy hits.

use polygon_defence_core::{
    EnemyView, ImpactBehavior, ImpactHit, TowerKind, WorldPoint, SPLASH_RADIUS,
};

/// Tower combat system that turns impacts into hit lists for the world to apply.
#[derive(Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates a new tower combat system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves a projectile landing on `impact`.
    ///
    /// The first enemy (in roster order) whose body contains the impact point
    /// is the direct hit. Without a direct hit the impact has no effect and
    /// the output stays empty. Splash impacts then affect every enemy closer
    /// than [`SPLASH_RADIUS`] to the impact, including the direct hit.
    pub fn resolve_impact(
        &self,
        kind: TowerKind,
        damage: f32,
        impact: WorldPoint,
        enemies: &EnemyView,
        out: &mut Vec<ImpactHit>,
    ) {
        out.clear();

        let Some(direct) = enemies
            .iter()
            .position(|enemy| enemy.position.distance_to(impact) < enemy.radius)
        else {
            return;
        };

        match kind.stats().impact {
            ImpactBehavior::Plain => out.push(ImpactHit {
                enemy_index: direct,
                damage,
                slow: false,
            }),
            ImpactBehavior::Slow => out.push(ImpactHit {
                enemy_index: direct,
                damage,
                slow: true,
            }),
            ImpactBehavior::Splash => {
                for (index, enemy) in enemies.iter().enumerate() {
                    let distance = enemy.position.distance_to(impact);
                    if let Some(scaled) = splash_damage(damage, distance) {
                        out.push(ImpactHit {
                            enemy_index: index,
                            damage: scaled,
                            slow: false,
                        });
                    }
                }
            }
        }
    }
}

/// Damage dealt by a splash of strength `damage` at `distance` from its centre.
///
/// Falls off linearly from full damage at the centre to nothing at
/// [`SPLASH_RADIUS`]; enemies at or beyond the radius are unaffected.
#[must_use]
pub fn splash_damage(damage: f32, distance: f32) -> Option<f32> {
    if distance < SPLASH_RADIUS {
        Some(damage * (1.0 - distance / SPLASH_RADIUS))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_defence_core::{EnemySnapshot, ENEMY_RADIUS};

    fn enemy(x: f32, y: f32) -> EnemySnapshot {
        EnemySnapshot {
            position: WorldPoint::new(x, y),
            radius: ENEMY_RADIUS,
            health: 50.0,
            max_health: 50.0,
            speed: 50.0,
            value: 5,
            path_index: 1,
        }
    }

    #[test]
    fn plain_impact_hits_first_enemy_under_point() {
        let system = TowerCombat::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(300.0, 300.0),
            enemy(104.0, 100.0),
            enemy(98.0, 100.0),
        ]);
        let mut out = Vec::new();

        system.resolve_impact(
            TowerKind::Pentagon,
            30.0,
            WorldPoint::new(100.0, 100.0),
            &enemies,
            &mut out,
        );

        assert_eq!(
            out,
            vec![ImpactHit {
                enemy_index: 1,
                damage: 30.0,
                slow: false,
            }]
        );
    }

    #[test]
    fn impact_without_direct_hit_has_no_effect() {
        let system = TowerCombat::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(120.0, 100.0)]);
        let mut out = Vec::new();

        system.resolve_impact(
            TowerKind::Triangle,
            15.0,
            WorldPoint::new(100.0, 100.0),
            &enemies,
            &mut out,
        );

        assert!(out.is_empty(), "splash requires a direct hit");
    }

    #[test]
    fn slow_impact_flags_direct_hit() {
        let system = TowerCombat::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(100.0, 100.0), enemy(101.0, 100.0)]);
        let mut out = Vec::new();

        system.resolve_impact(
            TowerKind::Square,
            5.0,
            WorldPoint::new(100.0, 100.0),
            &enemies,
            &mut out,
        );

        assert_eq!(
            out,
            vec![ImpactHit {
                enemy_index: 0,
                damage: 5.0,
                slow: true,
            }]
        );
    }

    #[test]
    fn splash_falls_off_linearly() {
        let system = TowerCombat::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(100.0, 100.0),
            enemy(125.0, 100.0),
            enemy(150.0, 100.0),
            enemy(100.0, 190.0),
        ]);
        let mut out = Vec::new();

        system.resolve_impact(
            TowerKind::Triangle,
            15.0,
            WorldPoint::new(100.0, 100.0),
            &enemies,
            &mut out,
        );

        assert_eq!(
            out,
            vec![
                ImpactHit {
                    enemy_index: 0,
                    damage: 15.0,
                    slow: false,
                },
                ImpactHit {
                    enemy_index: 1,
                    damage: 7.5,
                    slow: false,
                },
            ]
        );
    }

    #[test]
    fn splash_damage_boundaries() {
        assert_eq!(splash_damage(20.0, 0.0), Some(20.0));
        assert_eq!(splash_damage(20.0, 10.0), Some(16.0));
        assert_eq!(splash_damage(20.0, 50.0), None);
        assert_eq!(splash_damage(20.0, 75.0), None);
    }
}
