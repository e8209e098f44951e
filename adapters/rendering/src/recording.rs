//! Capability fakes that record every call for headless runs.

use glam::Vec2;
use polygon_defence_core::SoundCue;

use crate::{Color, DrawingSurface, SoundSink};

/// A single primitive submitted to a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// The surface was cleared.
    Clear,
    /// A filled rectangle.
    Rect {
        /// Top-left corner.
        origin: Vec2,
        /// Width and height.
        size: Vec2,
        /// Fill color.
        color: Color,
    },
    /// A circle.
    Circle {
        /// Centre point.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Stroke or fill color.
        color: Color,
        /// Whether the circle is filled.
        filled: bool,
    },
    /// A line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        thickness: f32,
        /// Stroke color.
        color: Color,
    },
    /// A triangle.
    Triangle {
        /// Corner points.
        corners: [Vec2; 3],
        /// Stroke or fill color.
        color: Color,
        /// Whether the triangle is filled.
        filled: bool,
    },
    /// A text label.
    Text {
        /// Baseline origin.
        position: Vec2,
        /// Label contents.
        text: String,
        /// Font size in logical units.
        size: f32,
        /// Text color.
        color: Color,
    },
}

/// Drawing surface that stores the calls of the current frame.
///
/// Clearing the surface discards the previously recorded frame, so the
/// recording always holds exactly the most recent frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    frames: u64,
}

impl RecordingSurface {
    /// Calls recorded since the last clear.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of frames started with [`DrawingSurface::clear`].
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear);
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.calls.push(DrawCall::Rect {
            origin,
            size,
            color,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, filled: bool) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            filled,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn draw_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color, filled: bool) {
        self.calls.push(DrawCall::Triangle {
            corners: [a, b, c],
            color,
            filled,
        });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, size: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            position,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

/// Sound sink that keeps every cue in the order it was played.
#[derive(Clone, Debug, Default)]
pub struct RecordingSoundSink {
    cues: Vec<SoundCue>,
}

impl RecordingSoundSink {
    /// Cues played so far.
    #[must_use]
    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    /// Number of times `cue` was played.
    #[must_use]
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|played| **played == cue).count()
    }
}

impl SoundSink for RecordingSoundSink {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::default();
        surface.clear();
        surface.draw_circle(Vec2::ONE, 2.0, Color::from_rgb_u8(1, 2, 3), false);
        surface.clear();

        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.calls(), &[DrawCall::Clear]);
    }

    #[test]
    fn sound_sink_counts_cues() {
        let mut sink = RecordingSoundSink::default();
        sink.play(SoundCue::TowerShoot);
        sink.play(SoundCue::EnemyHit);
        sink.play(SoundCue::TowerShoot);

        assert_eq!(sink.count(SoundCue::TowerShoot), 2);
        assert_eq!(sink.cues().len(), 3);
    }
}
