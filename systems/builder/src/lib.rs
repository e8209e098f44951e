#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that translates pointer and keyboard input into world commands.
//!
//! A click means different things depending on the phase: it starts the run
//! from the menu, resumes a paused run, restarts after a defeat, and builds
//! the selected tower while playing.

use polygon_defence_core::{Command, Phase, TowerKind, WorldPoint};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Pointer or tap position, if the player clicked this frame.
    pub click: Option<WorldPoint>,
    /// Indicates whether the player requested a pause toggle this frame.
    pub toggle_pause: bool,
}

impl BuilderInput {
    /// Creates an input descriptor carrying a single click.
    #[must_use]
    pub const fn click(position: WorldPoint) -> Self {
        Self {
            click: Some(position),
            toggle_pause: false,
        }
    }

    /// Creates an input descriptor carrying a single pause toggle.
    #[must_use]
    pub const fn toggle_pause() -> Self {
        Self {
            click: None,
            toggle_pause: true,
        }
    }
}

/// Input routing system that emits phase and placement commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder;

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes the current phase, selection and input to emit commands.
    ///
    /// Placement clicks are snapped to the centre of the grid cell that
    /// contains them; clicks without a selected kind are ignored.
    pub fn handle(
        &self,
        phase: Phase,
        selected: Option<TowerKind>,
        input: BuilderInput,
        out: &mut Vec<Command>,
    ) {
        if input.toggle_pause {
            match phase {
                Phase::Playing => out.push(Command::SetPhase {
                    phase: Phase::Paused,
                }),
                Phase::Paused => out.push(Command::SetPhase {
                    phase: Phase::Playing,
                }),
                Phase::Menu | Phase::GameOver => {}
            }
            return;
        }

        let Some(position) = input.click else {
            return;
        };

        match phase {
            Phase::Menu | Phase::Paused => out.push(Command::SetPhase {
                phase: Phase::Playing,
            }),
            Phase::GameOver => out.push(Command::ResetGame),
            Phase::Playing => {
                if let Some(kind) = selected {
                    out.push(Command::PlaceTower {
                        kind,
                        position: position.snapped_to_grid(),
                    });
                }
            }
        }
    }
}
