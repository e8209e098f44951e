//! Headless execution of a scenario against recording capabilities.

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
};

use polygon_defence_core::{Phase, SoundCue};
use polygon_defence_rendering::recording::{RecordingSoundSink, RecordingSurface};
use polygon_defence_simulation::Engine;
use polygon_defence_world::query;
use tracing::{debug, info};

use crate::scenario::{Action, Scenario};

type HeadlessEngine = Engine<RecordingSurface, RecordingSoundSink>;

/// Final state of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) frames: u64,
    pub(crate) phase: Phase,
    pub(crate) wave: u32,
    pub(crate) money: u32,
    pub(crate) lives: u32,
    pub(crate) towers: usize,
    pub(crate) enemies: usize,
    pub(crate) shots: usize,
    pub(crate) kills: usize,
    pub(crate) fingerprint: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames:      {}", self.frames)?;
        writeln!(f, "phase:       {:?}", self.phase)?;
        writeln!(f, "wave:        {}", self.wave)?;
        writeln!(f, "money:       {}", self.money)?;
        writeln!(f, "lives:       {}", self.lives)?;
        writeln!(f, "towers:      {}", self.towers)?;
        writeln!(f, "enemies:     {}", self.enemies)?;
        writeln!(f, "shots:       {}", self.shots)?;
        writeln!(f, "kills:       {}", self.kills)?;
        write!(f, "fingerprint: {:#018x}", self.fingerprint)
    }
}

/// Runs `scenario` from a click on the menu until its duration elapses.
pub(crate) fn run(scenario: &Scenario) -> Summary {
    let mut engine = Engine::new(
        scenario.viewport.width,
        scenario.viewport.height,
        RecordingSurface::default(),
        RecordingSoundSink::default(),
    );
    engine.handle_click(0.0, 0.0);

    let fps = scenario.frames_per_second as f32;
    let dt = 1.0 / fps;
    let actions = scenario.ordered_actions();
    let mut next_action = 0;
    let total = scenario.total_frames();

    for frame in 0..total {
        let now = frame as f32 / fps;
        while let Some(timed) = actions.get(next_action) {
            if timed.at > now {
                break;
            }
            debug!(at = timed.at, action = ?timed.action, "scripted input");
            perform(&mut engine, timed.action);
            next_action += 1;
        }

        engine.step(dt);
    }

    let summary = summarise(&engine, total);
    info!(
        phase = ?summary.phase,
        wave = summary.wave,
        fingerprint = summary.fingerprint,
        "scenario finished"
    );
    summary
}

fn perform(engine: &mut HeadlessEngine, action: Action) {
    match action {
        Action::Click { x, y } => engine.handle_click(x, y),
        Action::Select(kind) => engine.select_tower_type(kind.code()),
        Action::TogglePause => engine.toggle_pause(),
    }
}

fn summarise(engine: &HeadlessEngine, frames: u64) -> Summary {
    let world = engine.world();
    let sound = engine.sound();

    Summary {
        frames,
        phase: query::phase(world),
        wave: query::wave(world),
        money: query::money(world),
        lives: query::lives(world),
        towers: query::tower_view(world).len(),
        enemies: query::enemy_view(world).len(),
        shots: sound.count(SoundCue::TowerShoot),
        kills: sound.count(SoundCue::EnemyExplosion),
        fingerprint: fingerprint(engine),
    }
}

fn fingerprint(engine: &HeadlessEngine) -> u64 {
    let world = engine.world();
    let mut hasher = DefaultHasher::new();

    query::phase(world).hash(&mut hasher);
    query::wave(world).hash(&mut hasher);
    query::money(world).hash(&mut hasher);
    query::lives(world).hash(&mut hasher);
    engine.sound().cues().hash(&mut hasher);

    for tower in query::tower_view(world).iter() {
        tower.kind.hash(&mut hasher);
        tower.position.x().to_bits().hash(&mut hasher);
        tower.position.y().to_bits().hash(&mut hasher);
        tower.cooldown.hash(&mut hasher);
    }
    for enemy in query::enemy_view(world).iter() {
        enemy.position.x().to_bits().hash(&mut hasher);
        enemy.position.y().to_bits().hash(&mut hasher);
        enemy.health.to_bits().hash(&mut hasher);
        enemy.speed.to_bits().hash(&mut hasher);
        enemy.path_index.hash(&mut hasher);
    }
    for projectile in query::projectile_view(world).iter() {
        projectile.position.x().to_bits().hash(&mut hasher);
        projectile.position.y().to_bits().hash(&mut hasher);
    }

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{TowerPlacement, ViewportConfig};
    use polygon_defence_core::TowerKind;

    fn defended(seconds: f32) -> Scenario {
        let viewport = ViewportConfig::default();
        let mut scenario = Scenario::new(viewport, 60, seconds).expect("valid scenario");
        scenario.place_at_start(TowerPlacement {
            kind: TowerKind::Line,
            x: 240.0,
            y: 300.0,
        });
        scenario
    }

    #[test]
    fn runs_are_reproducible() {
        let first = run(&defended(20.0));
        let second = run(&defended(20.0));

        assert_eq!(first, second);
        assert_eq!(first.frames, 1_200);
        assert_eq!(first.towers, 1);
        assert_eq!(first.phase, Phase::Playing);
        assert!(first.shots > 0);
    }

    #[test]
    fn empty_run_waits_for_first_wave() {
        let viewport = ViewportConfig::default();
        let scenario = Scenario::new(viewport, 60, 2.0).expect("valid scenario");
        let summary = run(&scenario);

        assert_eq!(summary.wave, 0);
        assert_eq!(summary.enemies, 0);
        assert_eq!(summary.money, 100);
    }

    #[test]
    fn summary_lists_fingerprint_last() {
        let summary = run(&defended(0.0));
        let text = summary.to_string();

        assert!(text.starts_with("frames:      0"));
        let last = text.lines().last().unwrap_or_default();
        assert!(last.starts_with("fingerprint: 0x"));
    }
}
