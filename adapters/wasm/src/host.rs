//! Drawing, sound and log callbacks provided by the browser host.

use glam::Vec2;
use polygon_defence_core::SoundCue;
use polygon_defence_rendering::{Color, DrawingSurface, SoundSink};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = clearCanvas)]
    fn clear_canvas();

    #[wasm_bindgen(js_name = drawRect)]
    fn draw_rect(x: f32, y: f32, width: f32, height: f32, r: u8, g: u8, b: u8);

    #[wasm_bindgen(js_name = drawCircle)]
    fn draw_circle(x: f32, y: f32, radius: f32, r: u8, g: u8, b: u8, filled: bool);

    #[wasm_bindgen(js_name = drawLine)]
    fn draw_line(x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, r: u8, g: u8, b: u8);

    #[wasm_bindgen(js_name = drawTriangle)]
    fn draw_triangle(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
        r: u8,
        g: u8,
        b: u8,
        filled: bool,
    );

    #[wasm_bindgen(js_name = drawText)]
    fn draw_text(x: f32, y: f32, text: &str, size: f32, r: u8, g: u8, b: u8);

    #[wasm_bindgen(js_name = playTowerShoot)]
    fn play_tower_shoot();

    #[wasm_bindgen(js_name = playEnemyHit)]
    fn play_enemy_hit();

    #[wasm_bindgen(js_name = playEnemyExplosion)]
    fn play_enemy_explosion();

    #[wasm_bindgen(js_name = playLevelComplete)]
    fn play_level_complete();

    #[wasm_bindgen(js_name = playLevelFail)]
    fn play_level_fail();

    #[wasm_bindgen(js_name = logString)]
    pub(crate) fn log_string(message: &str);
}

/// Drawing surface backed by the host canvas callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HostSurface;

impl DrawingSurface for HostSurface {
    fn clear(&mut self) {
        clear_canvas();
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        draw_rect(
            origin.x,
            origin.y,
            size.x,
            size.y,
            color.red,
            color.green,
            color.blue,
        );
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, filled: bool) {
        draw_circle(
            center.x,
            center.y,
            radius,
            color.red,
            color.green,
            color.blue,
            filled,
        );
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        draw_line(
            from.x,
            from.y,
            to.x,
            to.y,
            thickness,
            color.red,
            color.green,
            color.blue,
        );
    }

    fn draw_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color, filled: bool) {
        draw_triangle(
            a.x,
            a.y,
            b.x,
            b.y,
            c.x,
            c.y,
            color.red,
            color.green,
            color.blue,
            filled,
        );
    }

    fn draw_text(&mut self, position: Vec2, text: &str, size: f32, color: Color) {
        draw_text(
            position.x,
            position.y,
            text,
            size,
            color.red,
            color.green,
            color.blue,
        );
    }
}

/// Sound sink backed by the host audio callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HostSound;

impl SoundSink for HostSound {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::TowerShoot => play_tower_shoot(),
            SoundCue::EnemyHit => play_enemy_hit(),
            SoundCue::EnemyExplosion => play_enemy_explosion(),
            SoundCue::LevelComplete => play_level_complete(),
            SoundCue::LevelFail => play_level_fail(),
        }
    }
}
