//! Enemy route through the play area.

use polygon_defence_core::{Viewport, WorldPoint, MAX_PATH_POINTS};

/// Default route as fractions of the viewport extents.
///
/// Enters on the left edge and leaves on the right edge after winding
/// through the field.
const DEFAULT_ROUTE: [(f32, f32); 8] = [
    (0.0, 0.2),
    (0.25, 0.2),
    (0.25, 0.7),
    (0.5, 0.7),
    (0.5, 0.3),
    (0.75, 0.3),
    (0.75, 0.8),
    (1.0, 0.8),
];

/// Builds the default waypoint list scaled to `viewport`.
pub(crate) fn default_path(viewport: Viewport) -> Vec<WorldPoint> {
    DEFAULT_ROUTE
        .iter()
        .take(MAX_PATH_POINTS)
        .map(|&(x, y)| WorldPoint::new(x * viewport.width(), y * viewport.height()))
        .collect()
}
