#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use polygon_defence_core::{EnemyView, TowerTarget, TowerView, WorldPoint};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every tower whose cooldown elapsed.
    ///
    /// Each ready tower picks the nearest enemy within its range. Candidates
    /// are scanned in roster order and only a strictly smaller distance
    /// replaces the current best, so equidistant enemies resolve to the one
    /// stored first. The output buffer is cleared before populating it.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<TowerTarget>) {
        out.clear();

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for (tower_index, tower) in towers.iter().enumerate() {
            if !tower.cooldown.is_zero() {
                continue;
            }

            let range = tower.kind.stats().range;
            if let Some(target) = self.nearest(tower_index, tower.position, range) {
                out.push(target);
            }
        }
    }

    fn nearest(&self, tower_index: usize, origin: WorldPoint, range: f32) -> Option<TowerTarget> {
        let mut best: Option<TowerTarget> = None;

        for candidate in &self.enemy_workspace {
            let distance = origin.distance_to(candidate.position);
            if distance > range {
                continue;
            }

            let closer = match &best {
                Some(existing) => distance < existing.distance,
                None => true,
            };

            if closer {
                best = Some(TowerTarget {
                    tower_index,
                    enemy_index: candidate.index,
                    position: candidate.position,
                    distance,
                });
            }
        }

        best
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for (index, snapshot) in enemies.iter().enumerate() {
            self.enemy_workspace.push(EnemyCandidate {
                index,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    index: usize,
    position: WorldPoint,
}

#[cfg(test)]
mod tests {
    use super::TowerTargeting;
    use polygon_defence_core::{
        EnemySnapshot, EnemyView, TowerKind, TowerSnapshot, TowerTarget, TowerView, WorldPoint,
        ENEMY_RADIUS,
    };
    use std::time::Duration;

    fn tower(kind: TowerKind, x: f32, y: f32, cooldown: Duration) -> TowerSnapshot {
        TowerSnapshot {
            kind,
            position: WorldPoint::new(x, y),
            level: 1,
            cooldown,
        }
    }

    fn enemy(x: f32, y: f32) -> EnemySnapshot {
        EnemySnapshot {
            position: WorldPoint::new(x, y),
            radius: ENEMY_RADIUS,
            health: 20.0,
            max_health: 20.0,
            speed: 50.0,
            value: 5,
            path_index: 1,
        }
    }

    #[test]
    fn targets_nearest_enemy_within_range() {
        let mut system = TowerTargeting::new();
        let ready = tower(TowerKind::Line, 100.0, 100.0, Duration::ZERO);
        let towers = TowerView::from_snapshots(vec![ready]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(200.0, 100.0),
            enemy(160.0, 100.0),
            enemy(400.0, 100.0),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(
            out,
            vec![TowerTarget {
                tower_index: 0,
                enemy_index: 1,
                position: WorldPoint::new(160.0, 100.0),
                distance: 60.0,
            }]
        );
    }

    #[test]
    fn equidistant_enemies_resolve_to_first_in_roster() {
        let mut system = TowerTargeting::new();
        let ready = tower(TowerKind::Line, 100.0, 100.0, Duration::ZERO);
        let towers = TowerView::from_snapshots(vec![ready]);
        let enemies = EnemyView::from_snapshots(vec![enemy(150.0, 100.0), enemy(50.0, 100.0)]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy_index, 0);
    }

    #[test]
    fn cooling_towers_are_skipped() {
        let mut system = TowerTargeting::new();
        let towers = TowerView::from_snapshots(vec![
            tower(TowerKind::Line, 100.0, 100.0, Duration::from_millis(100)),
            tower(TowerKind::Square, 100.0, 140.0, Duration::ZERO),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(120.0, 120.0)]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower_index, 1);
    }

    #[test]
    fn range_depends_on_kind() {
        let mut system = TowerTargeting::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(280.0, 100.0)]);

        let triangle = tower(TowerKind::Triangle, 100.0, 100.0, Duration::ZERO);
        let triangle = TowerView::from_snapshots(vec![triangle]);
        let mut out = Vec::new();
        system.handle(&triangle, &enemies, &mut out);
        assert!(out.is_empty(), "180 units is beyond a triangle's reach");

        let pentagon = tower(TowerKind::Pentagon, 100.0, 100.0, Duration::ZERO);
        let pentagon = TowerView::from_snapshots(vec![pentagon]);
        system.handle(&pentagon, &enemies, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn empty_collections_produce_no_targets() {
        let mut system = TowerTargeting::new();
        let towers = TowerView::from_snapshots(Vec::new());
        let enemies = EnemyView::from_snapshots(vec![enemy(1.0, 1.0)]);

        let mut out = vec![TowerTarget {
            tower_index: 9,
            enemy_index: 9,
            position: WorldPoint::new(0.0, 0.0),
            distance: 0.0,
        }];
        system.handle(&towers, &enemies, &mut out);
        assert!(out.is_empty());
    }
}
