#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Polygon Defence adapters.
//!
//! The simulation never talks to a canvas or an audio device directly.
//! It builds a [`Scene`] from world queries, draws it onto a
//! [`DrawingSurface`] and reports gameplay cues to a [`SoundSink`]. Hosts
//! implement both capabilities; the [`recording`] module provides fakes that
//! capture every call for headless runs and tests.

pub mod recording;

use std::{f32::consts::TAU, time::Duration};

use glam::Vec2;
use polygon_defence_core::{Phase, SoundCue, TowerKind, Viewport, WorldPoint, GRID_SIZE};

/// Opaque RGB color handed to drawing surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity in the range 0..=255.
    pub red: u8,
    /// Green channel intensity in the range 0..=255.
    pub green: u8,
    /// Blue channel intensity in the range 0..=255.
    pub blue: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
        }
    }
}

fn lighten_channel(channel: u8, amount: f32) -> u8 {
    let channel = f32::from(channel);
    let lightened = channel + (255.0 - channel) * amount;
    lightened.round().clamp(0.0, 255.0) as u8
}

const BACKGROUND: Color = Color::from_rgb_u8(18, 20, 28);
const GRID_LINE: Color = Color::from_rgb_u8(34, 38, 52);
const PATH: Color = Color::from_rgb_u8(92, 78, 60);
const ENEMY: Color = Color::from_rgb_u8(214, 64, 64);
const HEALTH_BACK: Color = Color::from_rgb_u8(0, 0, 0);
const HEALTH_FILL: Color = Color::from_rgb_u8(80, 200, 90);
const TEXT: Color = Color::from_rgb_u8(235, 235, 235);
const ACCENT: Color = Color::from_rgb_u8(250, 210, 90);

/// Host-provided capability that renders primitives in logical units.
pub trait DrawingSurface {
    /// Clears the whole surface.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle whose top-left corner is `origin`.
    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Draws a circle, filled or as an outline.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, filled: bool);

    /// Draws a line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Draws a triangle, filled or as an outline.
    fn draw_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color, filled: bool);

    /// Draws text whose baseline starts at `position`.
    fn draw_text(&mut self, position: Vec2, text: &str, size: f32, color: Color);
}

/// Host-provided capability that plays named sound cues.
///
/// Playback is fire-and-forget: implementations must not block.
pub trait SoundSink {
    /// Triggers playback of the provided cue.
    fn play(&mut self, cue: SoundCue);
}

/// Converts a world point into the vector type used by drawing surfaces.
#[must_use]
pub fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Tower drawn by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Kind of tower, which selects its shape.
    pub kind: TowerKind,
    /// Centre of the tower.
    pub position: Vec2,
    /// Whether the tower's cooldown elapsed.
    pub ready: bool,
}

/// Enemy drawn by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Centre of the enemy.
    pub position: Vec2,
    /// Body radius.
    pub radius: f32,
    /// Remaining health as a fraction of the spawn health.
    pub health_fraction: f32,
}

/// Projectile drawn by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Kind of the tower that fired it.
    pub kind: TowerKind,
    /// Current position.
    pub position: Vec2,
}

/// Heads-up display values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hud {
    /// Money available.
    pub money: u32,
    /// Lives remaining.
    pub lives: u32,
    /// Current wave number.
    pub wave: u32,
    /// Countdown to the next wave while the field is empty.
    pub next_wave: Option<Duration>,
    /// Tower kind used by the next click.
    pub selected: Option<TowerKind>,
}

/// Everything a frame displays, captured from world queries.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Extents of the play area.
    pub viewport: Viewport,
    /// Active phase, which selects the overlay.
    pub phase: Phase,
    /// Enemy route.
    pub path: Vec<Vec2>,
    /// Towers on the field.
    pub towers: Vec<SceneTower>,
    /// Enemies on the field.
    pub enemies: Vec<SceneEnemy>,
    /// Projectiles in flight.
    pub projectiles: Vec<SceneProjectile>,
    /// Heads-up display values.
    pub hud: Hud,
}

impl Scene {
    /// Creates an empty scene for the provided viewport and phase.
    #[must_use]
    pub fn new(viewport: Viewport, phase: Phase) -> Self {
        Self {
            viewport,
            phase,
            path: Vec::new(),
            towers: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            hud: Hud::default(),
        }
    }

    /// Draws the scene onto `surface`.
    ///
    /// The menu only shows the title overlay. Every other phase draws the
    /// field and HUD, with pause and game-over overlays on top.
    pub fn draw<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        surface.clear();
        surface.draw_rect(Vec2::ZERO, self.extent(), BACKGROUND);

        if self.phase == Phase::Menu {
            self.draw_menu(surface);
            return;
        }

        self.draw_grid(surface);
        self.draw_path(surface);
        self.draw_towers(surface);
        self.draw_enemies(surface);
        self.draw_projectiles(surface);
        self.draw_hud(surface);

        match self.phase {
            Phase::Paused => self.draw_banner(surface, "PAUSED", "Click to resume"),
            Phase::GameOver => {
                let detail = format!("Reached wave {} - click to restart", self.hud.wave);
                self.draw_banner(surface, "GAME OVER", &detail);
            }
            Phase::Menu | Phase::Playing => {}
        }
    }

    fn extent(&self) -> Vec2 {
        Vec2::new(self.viewport.width(), self.viewport.height())
    }

    fn draw_grid<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        let extent = self.extent();

        let mut x = GRID_SIZE;
        while x < extent.x {
            surface.draw_line(Vec2::new(x, 0.0), Vec2::new(x, extent.y), 1.0, GRID_LINE);
            x += GRID_SIZE;
        }

        let mut y = GRID_SIZE;
        while y < extent.y {
            surface.draw_line(Vec2::new(0.0, y), Vec2::new(extent.x, y), 1.0, GRID_LINE);
            y += GRID_SIZE;
        }
    }

    fn draw_path<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        for segment in self.path.windows(2) {
            surface.draw_line(segment[0], segment[1], GRID_SIZE * 0.75, PATH);
        }
        for waypoint in &self.path {
            surface.draw_circle(*waypoint, GRID_SIZE * 0.375, PATH, true);
        }
    }

    fn draw_towers<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        let half = GRID_SIZE * 0.4;

        for tower in &self.towers {
            let color = if tower.ready {
                tower_color(tower.kind).lighten(0.25)
            } else {
                tower_color(tower.kind)
            };
            let center = tower.position;

            match tower.kind {
                TowerKind::Line => surface.draw_line(
                    center - Vec2::new(half, 0.0),
                    center + Vec2::new(half, 0.0),
                    GRID_SIZE * 0.2,
                    color,
                ),
                TowerKind::Triangle => {
                    let [a, b, c] = regular_polygon::<3>(center, half);
                    surface.draw_triangle(a, b, c, color, true);
                }
                TowerKind::Square => {
                    surface.draw_rect(center - Vec2::splat(half), Vec2::splat(half * 2.0), color);
                }
                TowerKind::Pentagon => {
                    let corners = regular_polygon::<5>(center, half);
                    for index in 0..corners.len() {
                        let next = corners[(index + 1) % corners.len()];
                        surface.draw_triangle(center, corners[index], next, color, true);
                    }
                }
            }
        }
    }

    fn draw_enemies<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        for enemy in &self.enemies {
            surface.draw_circle(enemy.position, enemy.radius, ENEMY, true);

            let bar_width = enemy.radius * 2.0;
            let bar_height = 3.0;
            let bar_origin = enemy.position - Vec2::new(enemy.radius, enemy.radius + 6.0);
            surface.draw_rect(bar_origin, Vec2::new(bar_width, bar_height), HEALTH_BACK);

            let ratio = enemy.health_fraction.clamp(0.0, 1.0);
            let fill_width = bar_width * ratio;
            if fill_width > f32::EPSILON {
                surface.draw_rect(bar_origin, Vec2::new(fill_width, bar_height), HEALTH_FILL);
            }
        }
    }

    fn draw_projectiles<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        for projectile in &self.projectiles {
            let color = tower_color(projectile.kind).lighten(0.5);
            surface.draw_circle(projectile.position, 3.0, color, true);
        }
    }

    fn draw_hud<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        let hud = &self.hud;
        let lines = [
            format!("Money: {}", hud.money),
            format!("Lives: {}", hud.lives),
            format!("Wave: {}", hud.wave),
        ];
        for (row, line) in lines.iter().enumerate() {
            surface.draw_text(Vec2::new(10.0, 20.0 + 20.0 * row as f32), line, 16.0, TEXT);
        }

        if let Some(remaining) = hud.next_wave {
            let text = format!("Next wave in {:.1}s", remaining.as_secs_f32());
            surface.draw_text(Vec2::new(10.0, 80.0), &text, 16.0, ACCENT);
        }

        if let Some(kind) = hud.selected {
            let stats = kind.stats();
            let text = format!(
                "Selected: {} (cost {}, range {})",
                kind.label(),
                stats.cost,
                stats.range
            );
            let baseline = (self.viewport.height() - 10.0).max(0.0);
            surface.draw_text(Vec2::new(10.0, baseline), &text, 16.0, TEXT);
        }
    }

    fn draw_menu<D>(&self, surface: &mut D)
    where
        D: DrawingSurface + ?Sized,
    {
        self.draw_banner(surface, "POLYGON DEFENCE", "Click to start");
    }

    fn draw_banner<D>(&self, surface: &mut D, title: &str, detail: &str)
    where
        D: DrawingSurface + ?Sized,
    {
        let center = self.extent() * 0.5;
        surface.draw_text(center - Vec2::new(120.0, 10.0), title, 36.0, ACCENT);
        surface.draw_text(center + Vec2::new(-120.0, 30.0), detail, 18.0, TEXT);
    }
}

/// Base color of a tower kind.
#[must_use]
pub const fn tower_color(kind: TowerKind) -> Color {
    match kind {
        TowerKind::Line => Color::from_rgb_u8(90, 170, 240),
        TowerKind::Triangle => Color::from_rgb_u8(240, 150, 60),
        TowerKind::Square => Color::from_rgb_u8(120, 210, 200),
        TowerKind::Pentagon => Color::from_rgb_u8(180, 110, 230),
    }
}

fn regular_polygon<const SIDES: usize>(center: Vec2, radius: f32) -> [Vec2; SIDES] {
    std::array::from_fn(|index| {
        let angle = -TAU / 4.0 + TAU * index as f32 / SIDES as f32;
        center + Vec2::new(angle.cos(), angle.sin()) * radius
    })
}
