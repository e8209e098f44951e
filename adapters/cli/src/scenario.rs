//! Scripted input for headless runs.

use std::str::FromStr;

use polygon_defence_core::TowerKind;
use serde::Deserialize;
use thiserror::Error;

/// Problems found while reading a scenario.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The document is not valid TOML or does not match the schema.
    #[error("scenario is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// The frame rate must be positive.
    #[error("frames per second must be positive")]
    InvalidFrameRate,
    /// The duration must be finite and not negative.
    #[error("duration must be a finite, non-negative number of seconds (got {0})")]
    InvalidDuration(f32),
    /// An action was scheduled at an unusable time.
    #[error("action {index} is scheduled at an invalid time ({at})")]
    InvalidActionTime {
        /// Position of the action in the file.
        index: usize,
        /// Offending time.
        at: f32,
    },
    /// An action must carry exactly one of `click`, `select` or `pause`.
    #[error("action {index} must set exactly one of `click`, `select` or `pause`")]
    AmbiguousAction {
        /// Position of the action in the file.
        index: usize,
    },
    /// A `--tower` flag could not be understood.
    #[error("tower placement `{0}` must look like `line@100,300`")]
    InvalidPlacement(String),
    /// A tower kind name is unknown.
    #[error("unknown tower kind `{0}`")]
    UnknownTowerKind(String),
}

/// Extents of the simulated play area.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub(crate) struct ViewportConfig {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Input applied when the simulated clock reaches `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    /// Click at the provided logical coordinates.
    Click { x: f32, y: f32 },
    /// Select a tower kind for subsequent clicks.
    Select(TowerKind),
    /// Toggle between playing and paused.
    TogglePause,
}

/// Action together with the time it fires at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TimedAction {
    pub(crate) at: f32,
    pub(crate) action: Action,
}

/// Validated scenario ready to run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Scenario {
    pub(crate) viewport: ViewportConfig,
    pub(crate) frames_per_second: u32,
    pub(crate) seconds: f32,
    pub(crate) actions: Vec<TimedAction>,
}

impl Scenario {
    /// Creates a scenario with no scripted actions.
    pub(crate) fn new(
        viewport: ViewportConfig,
        frames_per_second: u32,
        seconds: f32,
    ) -> Result<Self, ScenarioError> {
        if frames_per_second == 0 {
            return Err(ScenarioError::InvalidFrameRate);
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ScenarioError::InvalidDuration(seconds));
        }

        Ok(Self {
            viewport,
            frames_per_second,
            seconds,
            actions: Vec::new(),
        })
    }

    /// Parses a TOML scenario document.
    pub(crate) fn from_toml(source: &str) -> Result<Self, ScenarioError> {
        let file: ScenarioFile = toml::from_str(source)?;
        let mut scenario = Self::new(
            file.viewport.unwrap_or_default(),
            file.frames_per_second.unwrap_or(60),
            file.seconds.unwrap_or(60.0),
        )?;

        for (index, entry) in file.actions.into_iter().enumerate() {
            if !entry.at.is_finite() || entry.at < 0.0 {
                return Err(ScenarioError::InvalidActionTime {
                    index,
                    at: entry.at,
                });
            }

            let action = match (entry.click, entry.select, entry.pause) {
                (Some([x, y]), None, None) => Action::Click { x, y },
                (None, Some(kind), None) => Action::Select(kind),
                (None, None, Some(true)) => Action::TogglePause,
                _ => return Err(ScenarioError::AmbiguousAction { index }),
            };
            scenario.actions.push(TimedAction {
                at: entry.at,
                action,
            });
        }

        Ok(scenario)
    }

    /// Schedules a tower build at the start of the run.
    pub(crate) fn place_at_start(&mut self, placement: TowerPlacement) {
        self.actions.push(TimedAction {
            at: 0.0,
            action: Action::Select(placement.kind),
        });
        self.actions.push(TimedAction {
            at: 0.0,
            action: Action::Click {
                x: placement.x,
                y: placement.y,
            },
        });
    }

    /// Actions in firing order; simultaneous actions keep their file order.
    pub(crate) fn ordered_actions(&self) -> Vec<TimedAction> {
        let mut actions = self.actions.clone();
        actions.sort_by(|left, right| left.at.total_cmp(&right.at));
        actions
    }

    /// Number of frames the run lasts.
    pub(crate) fn total_frames(&self) -> u64 {
        (self.seconds * self.frames_per_second as f32).round() as u64
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    viewport: Option<ViewportConfig>,
    frames_per_second: Option<u32>,
    seconds: Option<f32>,
    #[serde(default)]
    actions: Vec<ActionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionEntry {
    at: f32,
    click: Option<[f32; 2]>,
    select: Option<TowerKind>,
    pause: Option<bool>,
}

/// Tower build requested on the command line as `kind@x,y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TowerPlacement {
    pub(crate) kind: TowerKind,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl FromStr for TowerPlacement {
    type Err = ScenarioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ScenarioError::InvalidPlacement(value.to_owned());

        let (name, coordinates) = value.split_once('@').ok_or_else(invalid)?;
        let (x, y) = coordinates.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;

        let name = name.trim();
        let kind = TowerKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScenarioError::UnknownTowerKind(name.to_owned()))?;

        Ok(Self { kind, x, y })
    }
}
