#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Polygon Defence.
//!
//! The [`World`] owns the whole game state: phase, economy, the enemy path
//! and the fixed-capacity rosters of towers, enemies and projectiles. All
//! mutations flow through [`apply`]. A [`Command::Tick`] runs the update
//! phase in a fixed order because later stages consume the results of
//! earlier ones within the same tick:
//!
//! 1. wave pacing and spawning,
//! 2. tower cooldowns and firing,
//! 3. enemy movement (which may end the run),
//! 4. projectile movement and impact resolution.

mod path;
mod roster;
mod towers;

use std::time::Duration;

use polygon_defence_core::{
    Command, EnemySnapshot, EnemyView, Event, ImpactHit, Phase, ProjectileSnapshot, TowerKind,
    TowerTarget, TowerView, Viewport, WorldPoint, ENEMY_RADIUS, IMPACT_TOLERANCE, MAX_ENEMIES,
    MAX_PROJECTILES, MAX_TOWERS, PROJECTILE_SPEED, SLOW_FACTOR, STARTING_LIVES, STARTING_MONEY,
    WAYPOINT_TOLERANCE, WELCOME_BANNER,
};
use polygon_defence_system_tower_combat::TowerCombat;
use polygon_defence_system_tower_targeting::TowerTargeting;
use polygon_defence_system_waves::{EnemyStats, Waves};
use tracing::{debug, info};

use self::roster::Roster;
use self::towers::{placement_error, PlacementContext, TowerState};

/// Represents the authoritative Polygon Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    viewport: Viewport,
    phase: Phase,
    path: Vec<WorldPoint>,
    towers: Roster<TowerState>,
    enemies: Roster<Enemy>,
    projectiles: Roster<Projectile>,
    selected: Option<TowerKind>,
    money: u32,
    lives: u32,
    waves: Waves,
    targeting: TowerTargeting,
    combat: TowerCombat,
    target_scratch: Vec<TowerTarget>,
    hit_scratch: Vec<ImpactHit>,
    tick_index: u64,
}

impl World {
    /// Creates a fresh world in [`Phase::Menu`] for the provided viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::with_phase(viewport, Phase::Menu)
    }

    fn with_phase(viewport: Viewport, phase: Phase) -> Self {
        Self {
            banner: WELCOME_BANNER,
            viewport,
            phase,
            path: path::default_path(viewport),
            towers: Roster::with_capacity(MAX_TOWERS),
            enemies: Roster::with_capacity(MAX_ENEMIES),
            projectiles: Roster::with_capacity(MAX_PROJECTILES),
            selected: None,
            money: STARTING_MONEY,
            lives: STARTING_LIVES,
            waves: Waves::default(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            target_scratch: Vec::new(),
            hit_scratch: Vec::new(),
            tick_index: 0,
        }
    }

    fn placement_context(&self) -> PlacementContext<'_> {
        PlacementContext {
            phase: self.phase,
            viewport: self.viewport,
            path: &self.path,
            towers: &self.towers,
            money: self.money,
        }
    }

    fn enemy_view(&self) -> EnemyView {
        EnemyView::from_snapshots(self.enemies.iter().map(Enemy::snapshot).collect())
    }

    fn tower_view(&self) -> TowerView {
        TowerView::from_snapshots(self.towers.iter().map(TowerState::snapshot).collect())
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let from = self.phase;
        *self = Self::with_phase(self.viewport, Phase::Playing);
        info!("game reset");
        out_events.push(Event::GameReset);
        out_events.push(Event::PhaseChanged {
            from,
            to: Phase::Playing,
        });
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        let allowed = matches!(
            (from, phase),
            (Phase::Menu, Phase::Playing)
                | (Phase::Paused, Phase::Playing)
                | (Phase::Playing, Phase::Paused)
        );

        if !allowed {
            debug!(?from, to = ?phase, "ignored phase transition");
            return;
        }

        self.phase = phase;
        debug!(?from, to = ?phase, "phase changed");
        out_events.push(Event::PhaseChanged { from, to: phase });
    }

    fn place_tower(&mut self, kind: TowerKind, position: WorldPoint, out_events: &mut Vec<Event>) {
        if let Some(reason) = placement_error(self.placement_context(), kind, position) {
            debug!(?kind, x = position.x(), y = position.y(), %reason, "placement rejected");
            out_events.push(Event::TowerPlacementRejected {
                kind,
                position,
                reason,
            });
            return;
        }

        let cost = kind.stats().cost;
        if !self.towers.push(TowerState::new(kind, position)) {
            return;
        }
        self.money -= cost;

        info!(
            ?kind,
            x = position.x(),
            y = position.y(),
            money = self.money,
            "tower placed"
        );
        out_events.push(Event::TowerPlaced {
            kind,
            position,
            cost,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        self.advance_waves(dt, out_events);
        self.fire_towers(dt, out_events);
        if self.move_enemies(dt, out_events) == RunState::Lost {
            return;
        }
        self.move_projectiles(dt, out_events);
    }

    fn advance_waves(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let progress = self.waves.advance(dt, self.enemies.len());

        if let Some(wave) = progress.cleared {
            info!(wave, "wave cleared");
            out_events.push(Event::WaveCleared { wave });
        }

        if let Some(start) = progress.started {
            info!(wave = start.wave, enemies = start.enemies, "wave started");
            out_events.push(Event::WaveStarted {
                wave: start.wave,
                enemies: start.enemies,
            });
        }

        if let Some(stats) = progress.spawn {
            let Some(&entry) = self.path.first() else {
                return;
            };

            if self.enemies.push(Enemy::spawn(entry, stats)) {
                out_events.push(Event::EnemySpawned {
                    wave: self.waves.wave(),
                    health: stats.health,
                    speed: stats.speed,
                    value: stats.value,
                });
            }
        }
    }

    fn fire_towers(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for tower in self.towers.iter_mut() {
            tower.cooldown = tower.cooldown.saturating_sub(dt);
        }

        let towers = self.tower_view();
        let enemies = self.enemy_view();
        let mut targets = std::mem::take(&mut self.target_scratch);
        self.targeting.handle(&towers, &enemies, &mut targets);

        for target in &targets {
            let Some(tower) = self.towers.get_mut(target.tower_index) else {
                continue;
            };

            let stats = tower.kind.stats();
            tower.cooldown = stats.cooldown;
            let kind = tower.kind;
            let from = tower.position;

            let projectile = Projectile {
                kind,
                position: from,
                target: target.position,
                damage: stats.damage,
            };
            if self.projectiles.push(projectile) {
                out_events.push(Event::ProjectileFired {
                    kind,
                    from,
                    to: target.position,
                });
            }
        }

        self.target_scratch = targets;
    }

    fn move_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> RunState {
        let seconds = dt.as_secs_f32();
        let mut index = 0;

        while index < self.enemies.len() {
            let Some(enemy) = self.enemies.get_mut(index) else {
                break;
            };

            if let Some(&waypoint) = self.path.get(enemy.path_index) {
                enemy.position = enemy.position.step_toward(waypoint, enemy.speed * seconds);
                if enemy.position.distance_to(waypoint) < WAYPOINT_TOLERANCE {
                    enemy.path_index += 1;
                }
            }

            if enemy.path_index < self.path.len() {
                index += 1;
                continue;
            }

            let _ = self.enemies.swap_remove(index);
            self.lives = self.lives.saturating_sub(1);
            debug!(lives = self.lives, "enemy escaped");
            out_events.push(Event::EnemyEscaped { lives: self.lives });

            if self.lives == 0 {
                let wave = self.waves.wave();
                info!(wave, "game over");
                self.phase = Phase::GameOver;
                out_events.push(Event::PhaseChanged {
                    from: Phase::Playing,
                    to: Phase::GameOver,
                });
                out_events.push(Event::GameOver { wave });
                return RunState::Lost;
            }
        }

        RunState::Running
    }

    fn move_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let step = PROJECTILE_SPEED * dt.as_secs_f32();
        let mut index = 0;

        while index < self.projectiles.len() {
            let Some(projectile) = self.projectiles.get_mut(index) else {
                break;
            };

            projectile.position = projectile.position.step_toward(projectile.target, step);
            if projectile.position.distance_to(projectile.target) >= IMPACT_TOLERANCE {
                index += 1;
                continue;
            }

            if let Some(landed) = self.projectiles.swap_remove(index) {
                self.resolve_impact(landed, out_events);
            }
        }
    }

    fn resolve_impact(&mut self, projectile: Projectile, out_events: &mut Vec<Event>) {
        let enemies = self.enemy_view();
        let mut hits = std::mem::take(&mut self.hit_scratch);
        self.combat.resolve_impact(
            projectile.kind,
            projectile.damage,
            projectile.target,
            &enemies,
            &mut hits,
        );

        for hit in &hits {
            let Some(enemy) = self.enemies.get_mut(hit.enemy_index) else {
                continue;
            };

            if hit.slow {
                enemy.speed *= SLOW_FACTOR;
            }
            enemy.health -= hit.damage;
            out_events.push(Event::EnemyHit {
                kind: projectile.kind,
                damage: hit.damage,
                remaining_health: enemy.health,
            });
        }

        // Hits are in ascending roster order, so removing from the back keeps
        // every pending index valid.
        for hit in hits.iter().rev() {
            let dead = self
                .enemies
                .get(hit.enemy_index)
                .is_some_and(|enemy| enemy.health <= 0.0);
            if !dead {
                continue;
            }

            if let Some(enemy) = self.enemies.swap_remove(hit.enemy_index) {
                self.money = self.money.saturating_add(enemy.value);
                out_events.push(Event::EnemyKilled {
                    position: enemy.position,
                    value: enemy.value,
                });
            }
        }

        self.hit_scratch = hits;
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResetGame => world.reset(out_events),
        Command::SetPhase { phase } => world.set_phase(phase, out_events),
        Command::SelectTowerKind { kind } => {
            world.selected = kind;
            out_events.push(Event::TowerKindSelected { kind });
        }
        Command::PlaceTower { kind, position } => world.place_tower(kind, position, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use polygon_defence_core::{
        EnemyView, Phase, PlacementError, ProjectileView, TowerKind, TowerView, Viewport,
        WorldPoint,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Active phase of the run.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Extents of the play area.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        world.viewport
    }

    /// Waypoints enemies walk along, in order.
    #[must_use]
    pub fn path(world: &World) -> &[WorldPoint] {
        &world.path
    }

    /// Money available for construction.
    #[must_use]
    pub fn money(world: &World) -> u32 {
        world.money
    }

    /// Lives remaining before the run is lost.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Number of the current wave; zero before the first wave.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.waves.wave()
    }

    /// Enemies still queued to spawn in the current wave.
    #[must_use]
    pub fn enemies_remaining_to_spawn(world: &World) -> u32 {
        world.waves.remaining()
    }

    /// Countdown to the next wave while the field is empty.
    #[must_use]
    pub fn time_until_next_wave(world: &World) -> Option<Duration> {
        world.waves.time_until_next_wave(world.enemies.len())
    }

    /// Tower kind the next placement click uses.
    #[must_use]
    pub fn selected_tower_kind(world: &World) -> Option<TowerKind> {
        world.selected
    }

    /// Range of the selected tower kind, or zero without a selection.
    #[must_use]
    pub fn selected_tower_range(world: &World) -> f32 {
        world.selected.map_or(0.0, |kind| kind.stats().range)
    }

    /// Validates placing the selected kind at `position` without mutating state.
    ///
    /// `position` is used as the tower centre as given; callers snap it to
    /// the placement grid first.
    #[must_use]
    pub fn placement_error(world: &World, position: WorldPoint) -> Option<PlacementError> {
        let Some(kind) = world.selected else {
            return Some(PlacementError::NoSelection);
        };
        super::placement_error(world.placement_context(), kind, position)
    }

    /// Captures a read-only view of the enemies in roster order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        world.enemy_view()
    }

    /// Captures a read-only view of the towers in placement order.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        world.tower_view()
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(super::Projectile::snapshot)
                .collect(),
        )
    }

    /// Number of ticks simulated since the run started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

/// Direct state manipulation used to stage scenarios in tests.
#[cfg(any(test, feature = "test_scaffolding"))]
pub mod scaffolding {
    use super::{Enemy, World};
    use polygon_defence_core::{Phase, WorldPoint, ENEMY_RADIUS};

    /// Inserts an enemy at `position` walking toward waypoint `path_index`.
    ///
    /// Returns whether the roster had room for it.
    pub fn spawn_enemy(
        world: &mut World,
        position: WorldPoint,
        path_index: usize,
        health: f32,
        speed: f32,
    ) -> bool {
        world.enemies.push(Enemy {
            position,
            radius: ENEMY_RADIUS,
            health,
            max_health: health,
            speed,
            value: 5,
            path_index,
        })
    }

    /// Overrides the remaining lives.
    pub fn set_lives(world: &mut World, lives: u32) {
        world.lives = lives;
    }

    /// Overrides the available money.
    pub fn set_money(world: &mut World, money: u32) {
        world.money = money;
    }

    /// Forces the phase without validating the transition.
    pub fn force_phase(world: &mut World, phase: Phase) {
        world.phase = phase;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Lost,
}

#[derive(Clone, Debug)]
struct Enemy {
    position: WorldPoint,
    radius: f32,
    health: f32,
    max_health: f32,
    speed: f32,
    value: u32,
    path_index: usize,
}

impl Enemy {
    fn spawn(entry: WorldPoint, stats: EnemyStats) -> Self {
        Self {
            position: entry,
            radius: ENEMY_RADIUS,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            value: stats.value,
            path_index: 1,
        }
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            position: self.position,
            radius: self.radius,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            value: self.value,
            path_index: self.path_index,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    kind: TowerKind,
    position: WorldPoint,
    target: WorldPoint,
    damage: f32,
}

impl Projectile {
    fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            kind: self.kind,
            position: self.position,
            target: self.target,
            damage: self.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_defence_core::PlacementError;

    fn playing_world() -> World {
        let mut world = World::new(Viewport::new(800.0, 600.0));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetPhase {
                phase: Phase::Playing,
            },
            &mut events,
        );
        world
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        run(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
        )
    }

    fn build(world: &mut World, kind: TowerKind, x: f32, y: f32) -> Vec<Event> {
        let _ = run(world, Command::SelectTowerKind { kind: Some(kind) });
        run(
            world,
            Command::PlaceTower {
                kind,
                position: WorldPoint::new(x, y),
            },
        )
    }

    fn count_fired(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileFired { .. }))
            .count()
    }

    #[test]
    fn new_world_waits_in_menu_with_starting_economy() {
        let world = World::new(Viewport::new(800.0, 600.0));

        assert_eq!(query::phase(&world), Phase::Menu);
        assert_eq!(query::money(&world), STARTING_MONEY);
        assert_eq!(query::lives(&world), STARTING_LIVES);
        assert_eq!(query::wave(&world), 0);
        assert_eq!(query::path(&world).len(), 8);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn ticks_outside_play_are_ignored() {
        let mut world = World::new(Viewport::new(800.0, 600.0));
        assert!(tick(&mut world, 10_000).is_empty());
        assert_eq!(query::wave(&world), 0);

        let mut world = playing_world();
        let _ = run(
            &mut world,
            Command::SetPhase {
                phase: Phase::Paused,
            },
        );
        assert!(tick(&mut world, 10_000).is_empty());
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn unsupported_phase_transitions_are_ignored() {
        let mut world = World::new(Viewport::new(800.0, 600.0));

        assert!(run(
            &mut world,
            Command::SetPhase {
                phase: Phase::Paused
            }
        )
        .is_empty());
        assert!(run(
            &mut world,
            Command::SetPhase {
                phase: Phase::GameOver
            }
        )
        .is_empty());
        assert_eq!(query::phase(&world), Phase::Menu);
    }

    #[test]
    fn placement_deducts_cost() {
        let mut world = playing_world();
        let events = build(&mut world, TowerKind::Line, 100.0, 300.0);

        assert_eq!(
            events,
            vec![Event::TowerPlaced {
                kind: TowerKind::Line,
                position: WorldPoint::new(100.0, 300.0),
                cost: 50,
            }]
        );
        assert_eq!(query::money(&world), 50);
        assert_eq!(query::tower_view(&world).len(), 1);
    }

    #[test]
    fn unaffordable_tower_is_rejected_without_charge() {
        let mut world = playing_world();
        let events = build(&mut world, TowerKind::Pentagon, 100.0, 300.0);

        assert_eq!(
            events,
            vec![Event::TowerPlacementRejected {
                kind: TowerKind::Pentagon,
                position: WorldPoint::new(100.0, 300.0),
                reason: PlacementError::InsufficientFunds,
            }]
        );
        assert_eq!(query::money(&world), STARTING_MONEY);
        assert!(query::tower_view(&world).is_empty());
    }

    #[test]
    fn placements_keep_clear_of_path_and_towers() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);

        assert_eq!(
            query::placement_error(&world, WorldPoint::new(100.0, 300.0)),
            Some(PlacementError::TooCloseToTower)
        );
        assert_eq!(
            query::placement_error(&world, WorldPoint::new(180.0, 100.0)),
            Some(PlacementError::TooCloseToPath)
        );
        assert_eq!(
            query::placement_error(&world, WorldPoint::new(820.0, 300.0)),
            Some(PlacementError::OutOfBounds)
        );
        assert_eq!(
            query::placement_error(&world, WorldPoint::new(100.0, 260.0)),
            None,
            "exactly one cell away is allowed"
        );
    }

    #[test]
    fn placement_query_requires_selection() {
        let world = playing_world();
        assert_eq!(
            query::placement_error(&world, WorldPoint::new(100.0, 300.0)),
            Some(PlacementError::NoSelection)
        );
        assert_eq!(query::selected_tower_range(&world), 0.0);
    }

    #[test]
    fn first_wave_starts_after_delay() {
        let mut world = playing_world();

        let early = tick(&mut world, 4_000);
        assert!(!early
            .iter()
            .any(|event| matches!(event, Event::WaveStarted { .. })));
        assert_eq!(
            query::time_until_next_wave(&world),
            Some(Duration::from_secs(1))
        );

        let events = tick(&mut world, 1_000);
        assert!(events.contains(&Event::WaveStarted {
            wave: 1,
            enemies: 7
        }));
        assert!(events.contains(&Event::EnemySpawned {
            wave: 1,
            health: 25.0,
            speed: 52.0,
            value: 6,
        }));
        assert_eq!(query::enemy_view(&world).len(), 1);
        assert_eq!(query::enemies_remaining_to_spawn(&world), 6);
        assert_eq!(query::time_until_next_wave(&world), None);
    }

    #[test]
    fn final_escape_ends_the_run() {
        let mut world = playing_world();
        scaffolding::set_lives(&mut world, 1);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(795.0, 480.0),
            7,
            30.0,
            100.0,
        ));

        let events = tick(&mut world, 100);

        assert!(events.contains(&Event::EnemyEscaped { lives: 0 }));
        assert!(events.contains(&Event::PhaseChanged {
            from: Phase::Playing,
            to: Phase::GameOver,
        }));
        assert!(events.contains(&Event::GameOver { wave: 0 }));
        assert_eq!(query::phase(&world), Phase::GameOver);
        assert!(query::enemy_view(&world).is_empty());
        assert!(tick(&mut world, 100).is_empty());
    }

    #[test]
    fn game_over_freezes_the_rest_of_the_tick() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        scaffolding::set_lives(&mut world, 1);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(795.0, 480.0),
            7,
            30.0,
            100.0,
        ));
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(100.0, 350.0),
            2,
            30.0,
            50.0,
        ));

        let events = tick(&mut world, 100);

        let escaped = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyEscaped { .. }))
            .count();
        let lost = events
            .iter()
            .filter(|event| matches!(event, Event::GameOver { .. }))
            .count();
        assert_eq!((escaped, lost), (1, 1));
        assert_eq!(count_fired(&events), 1, "towers fire before enemies move");
        assert_eq!(query::phase(&world), Phase::GameOver);

        let enemies = query::enemy_view(&world).into_vec();
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].position, WorldPoint::new(100.0, 350.0));

        let projectiles = query::projectile_view(&world);
        let positions: Vec<_> = projectiles.iter().map(|shot| shot.position).collect();
        assert_eq!(positions, vec![WorldPoint::new(100.0, 300.0)]);
    }

    #[test]
    fn tower_roster_stops_at_capacity() {
        let mut world = World::new(Viewport::new(4_000.0, 4_000.0));
        let _ = run(
            &mut world,
            Command::SetPhase {
                phase: Phase::Playing,
            },
        );
        scaffolding::set_money(&mut world, 1_000_000);

        for column in 0..10 {
            for row in 0..10 {
                let x = 100.0 + 40.0 * column as f32;
                let y = 2_000.0 + 40.0 * row as f32;
                let events = build(&mut world, TowerKind::Line, x, y);
                assert!(matches!(events[..], [Event::TowerPlaced { .. }]));
            }
        }
        assert_eq!(query::tower_view(&world).len(), MAX_TOWERS);
        let money = query::money(&world);
        assert_eq!(money, 1_000_000 - 50 * 100);

        let events = build(&mut world, TowerKind::Line, 100.0, 2_500.0);

        assert_eq!(
            events,
            vec![Event::TowerPlacementRejected {
                kind: TowerKind::Line,
                position: WorldPoint::new(100.0, 2_500.0),
                reason: PlacementError::AtCapacity,
            }]
        );
        assert_eq!(query::money(&world), money);
        assert_eq!(query::tower_view(&world).len(), MAX_TOWERS);
    }

    #[test]
    fn cooldown_gates_consecutive_shots() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(100.0, 350.0),
            2,
            1_000.0,
            0.0,
        ));

        let fired: Vec<_> = (0..3)
            .map(|_| count_fired(&tick(&mut world, 300)))
            .collect();

        assert_eq!(fired, vec![1, 0, 1], "0.5s cooldown spans two 0.3s ticks");
    }

    #[test]
    fn equidistant_enemies_resolve_to_lowest_index() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        for y in [350.0, 250.0] {
            assert!(scaffolding::spawn_enemy(
                &mut world,
                WorldPoint::new(100.0, y),
                2,
                1_000.0,
                0.0,
            ));
        }

        let events = tick(&mut world, 10);
        assert!(events.contains(&Event::ProjectileFired {
            kind: TowerKind::Line,
            from: WorldPoint::new(100.0, 300.0),
            to: WorldPoint::new(100.0, 350.0),
        }));
    }

    #[test]
    fn splash_damage_falls_off_with_distance() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Triangle, 300.0, 300.0);
        for x in [300.0, 330.0] {
            assert!(scaffolding::spawn_enemy(
                &mut world,
                WorldPoint::new(x, 360.0),
                2,
                100.0,
                0.0,
            ));
        }

        let _ = tick(&mut world, 300);
        let enemies = query::enemy_view(&world).into_vec();

        assert!((enemies[0].health - 85.0).abs() < 1e-4);
        assert!((enemies[1].health - 94.0).abs() < 1e-4);
    }

    #[test]
    fn slowing_hits_compound() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Square, 300.0, 300.0);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(300.0, 360.0),
            2,
            100.0,
            10.0,
        ));

        let mut hits = 0;
        for _ in 0..20 {
            hits += tick(&mut world, 250)
                .iter()
                .filter(|event| matches!(event, Event::EnemyHit { .. }))
                .count();
            if hits == 2 {
                break;
            }
        }

        assert_eq!(hits, 2);
        let enemy = query::enemy_view(&world).into_vec()[0];
        assert!((enemy.speed - 6.4).abs() < 1e-4);
        assert!((enemy.health - 90.0).abs() < 1e-4);
    }

    #[test]
    fn projectile_lands_harmlessly_when_target_moved_away() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(100.0, 350.0),
            2,
            30.0,
            200.0,
        ));

        let events = tick(&mut world, 300);

        assert_eq!(count_fired(&events), 1);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::EnemyHit { .. })));
        assert!(query::projectile_view(&world).is_empty());
        assert_eq!(query::enemy_view(&world).into_vec()[0].health, 30.0);
    }

    #[test]
    fn kills_award_the_enemy_value() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        assert!(scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(100.0, 350.0),
            2,
            5.0,
            0.0,
        ));

        let events = tick(&mut world, 300);

        assert!(events.contains(&Event::EnemyKilled {
            position: WorldPoint::new(100.0, 350.0),
            value: 5,
        }));
        assert_eq!(query::money(&world), 55);
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn enemy_roster_caps_at_capacity() {
        let mut world = playing_world();
        for _ in 0..MAX_ENEMIES {
            assert!(scaffolding::spawn_enemy(
                &mut world,
                WorldPoint::new(10.0, 10.0),
                1,
                10.0,
                0.0,
            ));
        }

        assert!(!scaffolding::spawn_enemy(
            &mut world,
            WorldPoint::new(10.0, 10.0),
            1,
            10.0,
            0.0,
        ));
        assert_eq!(query::enemy_view(&world).len(), MAX_ENEMIES);
    }

    #[test]
    fn reset_restores_a_fresh_run() {
        let mut world = playing_world();
        let _ = build(&mut world, TowerKind::Line, 100.0, 300.0);
        let _ = tick(&mut world, 6_000);

        let events = run(&mut world, Command::ResetGame);

        assert_eq!(
            events,
            vec![
                Event::GameReset,
                Event::PhaseChanged {
                    from: Phase::Playing,
                    to: Phase::Playing,
                },
            ]
        );
        assert_eq!(query::phase(&world), Phase::Playing);
        assert_eq!(query::money(&world), STARTING_MONEY);
        assert_eq!(query::wave(&world), 0);
        assert_eq!(query::selected_tower_kind(&world), None);
        assert!(query::tower_view(&world).is_empty());
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn identical_scripts_produce_identical_events() {
        let script = || {
            let mut world = playing_world();
            let mut log = build(&mut world, TowerKind::Line, 100.0, 300.0);
            log.extend(build(&mut world, TowerKind::Triangle, 260.0, 180.0));
            for _ in 0..600 {
                log.extend(tick(&mut world, 16));
            }
            log
        };

        assert_eq!(script(), script());
    }
}
