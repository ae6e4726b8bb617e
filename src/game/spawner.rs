//! Obstacle pair creation, driven by the session's spawn timer.

use rand::Rng;

use crate::{
    constants::game,
    game::types::{Obstacle, ObstacleKind, RunState},
};

/// Pushes one top/bottom pair at the right edge of the field. A single random
/// offset positions both, so the opening between them is always exactly
/// [`game::GAP_HEIGHT`]. No-op unless a run is in progress.
pub fn spawn_pair(state: &mut RunState, rng: &mut impl Rng) {
    if !state.started || state.over {
        return;
    }

    let offset = -game::OBSTACLE_HEIGHT / 4.0 - rng.gen::<f32>() * (game::OBSTACLE_HEIGHT / 2.0);

    state.obstacles.push(Obstacle::new(ObstacleKind::Top, game::FIELD_WIDTH, offset));
    state.obstacles.push(Obstacle::new(
        ObstacleKind::Bottom,
        game::FIELD_WIDTH,
        offset + game::OBSTACLE_HEIGHT + game::GAP_HEIGHT,
    ));
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::constants::game::{FIELD_WIDTH, GAP_HEIGHT, OBSTACLE_HEIGHT};

    fn active_state() -> RunState {
        let mut state = RunState::new();
        state.started = true;
        state
    }

    #[test]
    fn inactive_run_spawns_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut state = RunState::new();
        spawn_pair(&mut state, &mut rng);
        assert!(state.obstacles.is_empty());

        let mut state = active_state();
        state.over = true;
        spawn_pair(&mut state, &mut rng);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn pairs_spawn_at_the_right_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = active_state();
        spawn_pair(&mut state, &mut rng);

        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::Top);
        assert_eq!(state.obstacles[1].kind, ObstacleKind::Bottom);
        assert_eq!(state.obstacles[0].x, FIELD_WIDTH);
        assert_eq!(state.obstacles[1].x, FIELD_WIDTH);
    }

    #[test]
    fn opening_is_always_a_third_of_the_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = active_state();

        for _ in 0..100 {
            spawn_pair(&mut state, &mut rng);
        }
        for pair in state.obstacles.chunks(2) {
            let top = &pair[0];
            let bottom = &pair[1];
            let opening = bottom.y - (top.y + top.height);
            assert!((opening - GAP_HEIGHT).abs() < 1e-3);
        }
    }

    #[test]
    fn top_offset_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut state = active_state();

        for _ in 0..200 {
            spawn_pair(&mut state, &mut rng);
        }
        for pair in state.obstacles.chunks(2) {
            let y = pair[0].y;
            assert!(y <= -OBSTACLE_HEIGHT / 4.0, "top y {y} above range");
            assert!(y >= -OBSTACLE_HEIGHT / 4.0 - OBSTACLE_HEIGHT / 2.0, "top y {y} below range");
        }
    }
}
