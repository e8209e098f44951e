#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation engine boundary for Polygon Defence.
//!
//! [`Engine`] is the single entry point a host drives: it owns the world,
//! routes input through the builder system, advances time, and reports the
//! outcome through the host's drawing and sound capabilities. Every call is
//! synchronous and runs to completion.

mod scene;

use std::time::Duration;

use polygon_defence_core::{Command, Event, Phase, SoundCue, TowerKind, Viewport, WorldPoint};
use polygon_defence_rendering::{DrawingSurface, SoundSink};
use polygon_defence_system_builder::{Builder, BuilderInput};
use polygon_defence_world::{self as world, query, World};
use tracing::{debug, info, trace};

pub use self::scene::capture_scene;

/// Converts a host-provided frame delta into simulated time.
///
/// Negative, zero and non-finite deltas mean no time elapsed.
#[must_use]
pub fn delta_from_seconds(seconds: f32) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO)
}

/// Sound cue the host should play for a world event, if any.
#[must_use]
pub fn sound_cue(event: &Event) -> Option<SoundCue> {
    match event {
        Event::ProjectileFired { .. } => Some(SoundCue::TowerShoot),
        Event::EnemyHit {
            remaining_health, ..
        } if *remaining_health > 0.0 => Some(SoundCue::EnemyHit),
        Event::EnemyKilled { .. } => Some(SoundCue::EnemyExplosion),
        Event::WaveCleared { .. } => Some(SoundCue::LevelComplete),
        Event::GameOver { .. } => Some(SoundCue::LevelFail),
        _ => None,
    }
}

/// Simulation engine driven by a host loop.
#[derive(Debug)]
pub struct Engine<D, S> {
    world: World,
    builder: Builder,
    surface: D,
    sound: S,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<D, S> Engine<D, S>
where
    D: DrawingSurface,
    S: SoundSink,
{
    /// Creates an engine waiting in the menu for a `width` by `height` play area.
    #[must_use]
    pub fn new(width: f32, height: f32, surface: D, sound: S) -> Self {
        let world = World::new(Viewport::new(width, height));
        info!(
            width,
            height,
            banner = query::welcome_banner(&world),
            "engine initialised"
        );

        Self {
            world,
            builder: Builder::new(),
            surface,
            sound,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Discards the current run and starts a fresh one in [`Phase::Playing`].
    pub fn reset_game(&mut self) {
        self.submit(Command::ResetGame);
    }

    /// Advances the simulation by `dt_seconds` and draws the resulting frame.
    ///
    /// Outside [`Phase::Playing`] no time passes and only the phase overlay
    /// over the frozen field is drawn.
    pub fn step(&mut self, dt_seconds: f32) {
        if query::phase(&self.world) == Phase::Playing {
            self.submit(Command::Tick {
                dt: delta_from_seconds(dt_seconds),
            });
        }

        capture_scene(&self.world).draw(&mut self.surface);
    }

    /// Handles a click or tap at `(x, y)` according to the current phase.
    pub fn handle_click(&mut self, x: f32, y: f32) {
        self.route(BuilderInput::click(WorldPoint::new(x, y)));
    }

    /// Flips between playing and paused; ignored in every other phase.
    pub fn toggle_pause(&mut self) {
        self.route(BuilderInput::toggle_pause());
    }

    /// Selects the tower kind for code `id` (1..=4); other codes clear it.
    pub fn select_tower_type(&mut self, id: i32) {
        self.submit(Command::SelectTowerKind {
            kind: TowerKind::from_code(id),
        });
    }

    /// Reports whether a click at `(x, y)` would build the selected tower.
    #[must_use]
    pub fn can_place_tower(&self, x: f32, y: f32) -> bool {
        let cell = WorldPoint::new(x, y).snapped_to_grid();
        query::placement_error(&self.world, cell).is_none()
    }

    /// Range of the selected tower kind, or zero without a selection.
    #[must_use]
    pub fn tower_range(&self) -> f32 {
        query::selected_tower_range(&self.world)
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Drawing surface the engine renders to.
    #[must_use]
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Sound sink the engine reports cues to.
    #[must_use]
    pub fn sound(&self) -> &S {
        &self.sound
    }

    fn route(&mut self, input: BuilderInput) {
        let mut commands = std::mem::take(&mut self.commands);
        commands.clear();
        self.builder.handle(
            query::phase(&self.world),
            query::selected_tower_kind(&self.world),
            input,
            &mut commands,
        );

        for command in commands.drain(..) {
            self.submit(command);
        }
        self.commands = commands;
    }

    fn submit(&mut self, command: Command) {
        trace!(?command, "applying command");
        world::apply(&mut self.world, command, &mut self.events);

        for event in self.events.drain(..) {
            if let Event::TowerPlacementRejected { kind, reason, .. } = &event {
                debug!(?kind, %reason, "tower placement rejected");
            }
            if let Some(cue) = sound_cue(&event) {
                self.sound.play(cue);
            }
        }
    }
}
