//! Authoritative tower state management utilities.

use std::time::Duration;

use polygon_defence_core::{
    Phase, PlacementError, TowerKind, TowerSnapshot, Viewport, WorldPoint, GRID_SIZE,
};

use crate::roster::Roster;

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Kind of tower that was constructed; immutable after placement.
    pub(crate) kind: TowerKind,
    /// Centre of the tower.
    pub(crate) position: WorldPoint,
    /// Upgrade level. Upgrades do not exist, so this stays at one.
    pub(crate) level: u32,
    /// Time remaining before the tower may fire again.
    pub(crate) cooldown: Duration,
}

impl TowerState {
    /// Creates a freshly built tower that is ready to fire.
    pub(crate) fn new(kind: TowerKind, position: WorldPoint) -> Self {
        Self {
            kind,
            position,
            level: 1,
            cooldown: Duration::ZERO,
        }
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            kind: self.kind,
            position: self.position,
            level: self.level,
            cooldown: self.cooldown,
        }
    }
}

/// Everything placement validation needs to know about the world.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlacementContext<'a> {
    pub(crate) phase: Phase,
    pub(crate) viewport: Viewport,
    pub(crate) path: &'a [WorldPoint],
    pub(crate) towers: &'a Roster<TowerState>,
    pub(crate) money: u32,
}

/// Validates a placement without mutating anything.
///
/// Clearance is checked before affordability so that a blocked cell reports
/// the blockage even when the player is also short of money.
pub(crate) fn placement_error(
    context: PlacementContext<'_>,
    kind: TowerKind,
    position: WorldPoint,
) -> Option<PlacementError> {
    if context.phase != Phase::Playing {
        return Some(PlacementError::InvalidPhase);
    }

    if !context.viewport.contains(position) {
        return Some(PlacementError::OutOfBounds);
    }

    if context
        .path
        .iter()
        .any(|waypoint| waypoint.distance_to(position) < GRID_SIZE)
    {
        return Some(PlacementError::TooCloseToPath);
    }

    if context
        .towers
        .iter()
        .any(|tower| tower.position.distance_to(position) < GRID_SIZE)
    {
        return Some(PlacementError::TooCloseToTower);
    }

    if context.money < kind.stats().cost {
        return Some(PlacementError::InsufficientFunds);
    }

    if context.towers.is_full() {
        return Some(PlacementError::AtCapacity);
    }

    None
}
