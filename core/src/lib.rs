#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Polygon Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! translate into sound cues and diagnostics. Systems read immutable views
//! such as [`EnemyView`] and answer with plain data.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Polygon Defence.";

/// Side length of a placement cell measured in world units.
///
/// Towers snap to the centre of the cell containing the click and must keep
/// at least this distance from every path waypoint and every other tower.
pub const GRID_SIZE: f32 = 40.0;

/// Maximum number of towers the world stores at once.
pub const MAX_TOWERS: usize = 100;

/// Maximum number of enemies the world stores at once.
pub const MAX_ENEMIES: usize = 100;

/// Maximum number of projectiles the world stores at once.
pub const MAX_PROJECTILES: usize = 200;

/// Maximum number of waypoints composing the enemy path.
pub const MAX_PATH_POINTS: usize = 20;

/// Money granted at the start of every run.
pub const STARTING_MONEY: u32 = 100;

/// Lives granted at the start of every run.
pub const STARTING_LIVES: u32 = 20;

/// Quiet period between the end of one wave and the start of the next.
pub const WAVE_DELAY: Duration = Duration::from_secs(5);

/// Delay between two consecutive enemy spawns within a wave.
pub const SPAWN_INTERVAL: Duration = Duration::from_secs(1);

/// Constant projectile travel speed in world units per second.
pub const PROJECTILE_SPEED: f32 = 300.0;

/// Distance under which a projectile counts as having reached its target point.
pub const IMPACT_TOLERANCE: f32 = 5.0;

/// Distance under which an enemy counts as having reached its waypoint.
pub const WAYPOINT_TOLERANCE: f32 = 5.0;

/// Radius of the area affected by a splash impact.
pub const SPLASH_RADIUS: f32 = 50.0;

/// Multiplier applied to an enemy's speed by every slowing impact.
pub const SLOW_FACTOR: f32 = 0.8;

/// Collision radius of every enemy.
pub const ENEMY_RADIUS: f32 = 10.0;

/// Top-level game mode governing whether the simulation advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen shown before the first click.
    Menu,
    /// Simulation advances every step.
    Playing,
    /// Simulation is frozen until the player resumes.
    Paused,
    /// All lives were lost; the next click restarts the run.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the game state from scratch and enters [`Phase::Playing`].
    ResetGame,
    /// Requests a transition to the provided phase.
    ///
    /// Only `Menu -> Playing`, `Paused -> Playing` and `Playing -> Paused`
    /// are honoured. [`Phase::GameOver`] is entered exclusively by losing.
    SetPhase {
        /// Phase the world should activate.
        phase: Phase,
    },
    /// Chooses the tower kind used by subsequent placements.
    SelectTowerKind {
        /// Kind to select, or `None` to clear the selection.
        kind: Option<TowerKind>,
    },
    /// Requests construction of a tower centred on the provided point.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Centre of the tower, already snapped to the placement grid.
        position: WorldPoint,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the world entered a new phase.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: Phase,
        /// Phase that became active.
        to: Phase,
    },
    /// Confirms that the game state was rebuilt from scratch.
    GameReset,
    /// Confirms a change of the selected tower kind.
    TowerKindSelected {
        /// Newly selected kind, if any.
        kind: Option<TowerKind>,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Centre of the new tower.
        position: WorldPoint,
        /// Money deducted for the construction.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Centre provided in the placement request.
        position: WorldPoint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces the start of a new wave.
    WaveStarted {
        /// Number of the wave that started, counting from one.
        wave: u32,
        /// Enemies queued for the wave.
        enemies: u32,
    },
    /// Announces that every enemy of the wave left the field.
    WaveCleared {
        /// Number of the wave that was cleared.
        wave: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Wave that produced the enemy.
        wave: u32,
        /// Starting health of the enemy.
        health: f32,
        /// Starting speed of the enemy in world units per second.
        speed: f32,
        /// Money awarded for killing the enemy.
        value: u32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Kind of tower that fired.
        kind: TowerKind,
        /// Point the projectile starts from.
        from: WorldPoint,
        /// Point the projectile travels to.
        to: WorldPoint,
    },
    /// Reports damage dealt to an enemy by an impact.
    EnemyHit {
        /// Kind of tower whose projectile hit.
        kind: TowerKind,
        /// Damage applied by the impact.
        damage: f32,
        /// Health remaining after the impact.
        remaining_health: f32,
    },
    /// Reports that an enemy was destroyed by tower fire.
    EnemyKilled {
        /// Where the enemy died.
        position: WorldPoint,
        /// Money awarded to the player.
        value: u32,
    },
    /// Reports that an enemy reached the end of the path.
    EnemyEscaped {
        /// Lives remaining after the escape.
        lives: u32,
    },
    /// Announces that the final life was lost.
    GameOver {
        /// Wave that was in progress when the run ended.
        wave: u32,
    },
}

/// Named audio triggers raised by gameplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A tower fired a projectile.
    TowerShoot,
    /// A projectile damaged an enemy without destroying it.
    EnemyHit,
    /// An enemy was destroyed.
    EnemyExplosion,
    /// A wave was cleared.
    LevelComplete,
    /// The run was lost.
    LevelFail,
}

/// Point in the engine's logical unit space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves toward `target` by at most `max_distance`, never overshooting.
    ///
    /// Non-positive distances leave the point unchanged.
    #[must_use]
    pub fn step_toward(self, target: WorldPoint, max_distance: f32) -> WorldPoint {
        if max_distance <= 0.0 {
            return self;
        }

        let distance = self.distance_to(target);
        if distance <= max_distance || distance <= f32::EPSILON {
            return target;
        }

        let scale = max_distance / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }

    /// Returns the centre of the placement cell that contains this point.
    #[must_use]
    pub fn snapped_to_grid(self) -> WorldPoint {
        let half = GRID_SIZE / 2.0;
        WorldPoint::new(
            (self.x / GRID_SIZE).floor() * GRID_SIZE + half,
            (self.y / GRID_SIZE).floor() * GRID_SIZE + half,
        )
    }
}

/// Extents of the logical play area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, clamping negative or non-finite extents to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Width of the play area.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the play area.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies inside the play area.
    #[must_use]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x() >= 0.0 && point.y() >= 0.0 && point.x() < self.width && point.y() < self.height
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// What happens when a projectile reaches its target point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactBehavior {
    /// Damages the directly hit enemy only.
    Plain,
    /// Damages every enemy around the impact with linear falloff.
    Splash,
    /// Slows the directly hit enemy, then damages it.
    Slow,
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Cheap, fast-firing tower.
    Line,
    /// Splash-damage tower.
    Triangle,
    /// Tower whose projectiles slow their target.
    Square,
    /// Long-range heavy hitter.
    Pentagon,
}

/// Fixed per-kind tower parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Time between two shots.
    pub cooldown: Duration,
    /// Targeting radius in world units.
    pub range: f32,
    /// Damage carried by every projectile.
    pub damage: f32,
    /// Construction price.
    pub cost: u32,
    /// Effect applied when a projectile lands.
    pub impact: ImpactBehavior,
}

impl TowerKind {
    /// Every tower kind in selection-code order.
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Line,
        TowerKind::Triangle,
        TowerKind::Square,
        TowerKind::Pentagon,
    ];

    /// Maps the host's numeric selection code (1..=4) to a kind.
    ///
    /// Every other code yields `None`, which clears the selection.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<TowerKind> {
        match code {
            1 => Some(TowerKind::Line),
            2 => Some(TowerKind::Triangle),
            3 => Some(TowerKind::Square),
            4 => Some(TowerKind::Pentagon),
            _ => None,
        }
    }

    /// Numeric selection code understood by the host.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            TowerKind::Line => 1,
            TowerKind::Triangle => 2,
            TowerKind::Square => 3,
            TowerKind::Pentagon => 4,
        }
    }

    /// Returns the fixed parameters of the kind.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            TowerKind::Line => TowerStats {
                cooldown: Duration::from_millis(500),
                range: 150.0,
                damage: 10.0,
                cost: 50,
                impact: ImpactBehavior::Plain,
            },
            TowerKind::Triangle => TowerStats {
                cooldown: Duration::from_millis(1000),
                range: 100.0,
                damage: 15.0,
                cost: 100,
                impact: ImpactBehavior::Splash,
            },
            TowerKind::Square => TowerStats {
                cooldown: Duration::from_millis(800),
                range: 120.0,
                damage: 5.0,
                cost: 75,
                impact: ImpactBehavior::Slow,
            },
            TowerKind::Pentagon => TowerStats {
                cooldown: Duration::from_millis(1500),
                range: 200.0,
                damage: 30.0,
                cost: 150,
                impact: ImpactBehavior::Plain,
            },
        }
    }

    /// Human readable name used by overlays and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TowerKind::Line => "Line",
            TowerKind::Triangle => "Triangle",
            TowerKind::Square => "Square",
            TowerKind::Pentagon => "Pentagon",
        }
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// Towers can only be built while playing.
    #[error("towers can only be placed while playing")]
    InvalidPhase,
    /// No tower kind is selected.
    #[error("no tower kind is selected")]
    NoSelection,
    /// The requested centre lies outside the viewport.
    #[error("placement lies outside the play area")]
    OutOfBounds,
    /// The requested centre is too close to a path waypoint.
    #[error("placement is too close to the enemy path")]
    TooCloseToPath,
    /// The requested centre is too close to an existing tower.
    #[error("placement is too close to another tower")]
    TooCloseToTower,
    /// The player cannot afford the tower.
    #[error("not enough money for this tower")]
    InsufficientFunds,
    /// The tower roster is full.
    #[error("tower capacity reached")]
    AtCapacity,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Current centre of the enemy.
    pub position: WorldPoint,
    /// Collision radius.
    pub radius: f32,
    /// Health remaining.
    pub health: f32,
    /// Health at spawn time.
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Money awarded when the enemy dies.
    pub value: u32,
    /// Index of the waypoint the enemy walks toward.
    pub path_index: usize,
}

/// Read-only snapshot describing all enemies on the field.
///
/// Snapshots keep roster order, so the index of a snapshot is only valid
/// until the next mutating command.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Centre of the tower.
    pub position: WorldPoint,
    /// Upgrade level; always one since upgrades do not exist.
    pub level: u32,
    /// Time remaining before the tower may fire again.
    pub cooldown: Duration,
}

/// Read-only snapshot describing all towers placed on the field.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<TowerSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no tower.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Kind of the tower that fired the projectile.
    pub kind: TowerKind,
    /// Current position.
    pub position: WorldPoint,
    /// Fixed point the projectile travels to.
    pub target: WorldPoint,
    /// Damage carried by the projectile.
    pub damage: f32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ProjectileSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no projectile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Enemy chosen by a ready tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Frame-scoped roster index of the tower that fires.
    pub tower_index: usize,
    /// Frame-scoped roster index of the chosen enemy.
    pub enemy_index: usize,
    /// Position of the enemy when it was chosen.
    pub position: WorldPoint,
    /// Distance between the tower and the enemy.
    pub distance: f32,
}

/// Damage (and optional slow) an impact applies to one enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactHit {
    /// Frame-scoped roster index of the affected enemy.
    pub enemy_index: usize,
    /// Damage to subtract from the enemy's health.
    pub damage: f32,
    /// Whether the enemy's speed is multiplied by [`SLOW_FACTOR`] first.
    pub slow: bool,
}
