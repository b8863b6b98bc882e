//! Keeps the player's field of view in step with their position.

use std::collections::BTreeSet;
use std::sync::Arc;

use game_core::{GameEnv, GameState, MapOracle, MessageSink, Position};

use super::{HookCriticality, HookError, PostTurnHook};

/// Field-of-view collaborator. Implementations decide which tiles are seen.
pub trait FieldOfView: Send + Sync {
    fn compute(
        &self,
        map: &dyn MapOracle,
        floor: u32,
        origin: Position,
        radius: u32,
    ) -> BTreeSet<Position>;
}

/// Every in-bounds tile within Chebyshev `radius` of the origin. Walls do not occlude.
#[derive(Clone, Copy, Debug, Default)]
pub struct RadiusFov;

impl FieldOfView for RadiusFov {
    fn compute(
        &self,
        map: &dyn MapOracle,
        floor: u32,
        origin: Position,
        radius: u32,
    ) -> BTreeSet<Position> {
        let Some(dims) = map.dimensions(floor) else {
            return BTreeSet::new();
        };
        // Clipped to the map in i64, so any radius is safe.
        let span = |center: i32, extent: u32| {
            let low = (i64::from(center) - i64::from(radius)).max(0);
            let high = (i64::from(center) + i64::from(radius)).min(i64::from(extent) - 1);
            (low as i32)..=(high as i32)
        };
        let columns = span(origin.x, dims.width);
        span(origin.y, dims.height)
            .flat_map(|y| columns.clone().map(move |x| Position::new(x, y)))
            .filter(|&position| map.contains(floor, position))
            .collect()
    }
}

/// Recomputes `world.visible` around the player and folds it into `explored`.
pub struct VisibilityHook {
    radius: u32,
    fov: Arc<dyn FieldOfView>,
}

impl VisibilityHook {
    pub fn new(radius: u32) -> Self {
        Self::with_fov(radius, Arc::new(RadiusFov))
    }

    pub fn with_fov(radius: u32, fov: Arc<dyn FieldOfView>) -> Self {
        Self { radius, fov }
    }
}

impl PostTurnHook for VisibilityHook {
    fn name(&self) -> &'static str {
        "visibility"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn after_player_turn(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        _sink: &mut dyn MessageSink,
    ) -> Result<(), HookError> {
        let map = env.map()?;
        let player = state.player();
        let visible = self
            .fov
            .compute(map, player.floor, player.position, self.radius);
        state.world.update_visibility(visible);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::MapOracleImpl;

    #[test]
    fn radius_fov_clips_to_map() {
        let map = MapOracleImpl::from_ascii(&[&["#####", "#...#", "#####"]]);
        let seen = RadiusFov.compute(&map, 0, Position::new(0, 0), 1);

        let expected: BTreeSet<Position> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn huge_radius_sees_the_whole_floor() {
        let map = MapOracleImpl::from_ascii(&[&["#####", "#...#", "#####"]]);
        let seen = RadiusFov.compute(&map, 0, Position::new(2, 1), u32::MAX);

        assert_eq!(seen.len(), 15);
        assert!(seen.contains(&Position::new(0, 0)));
        assert!(seen.contains(&Position::new(4, 2)));
    }
}
