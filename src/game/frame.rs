//! The per-frame update: voice input, gravity, scoring, collision, pruning,
//! and terminal-state transitions, in a fixed order.

use std::time::Duration;

use rand::Rng;

use crate::{
    audio::CueId,
    constants::game,
    game::{confetti, geometry::Point, types::RunState},
    voice::VoiceSample,
};

/// Side effects a frame asks its caller to perform. The frame itself only
/// mutates run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    Cue(CueId),
    DelayedCue(CueId, Duration),
    Finished(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Crash,
    Victory,
}

/// Advances the run by one frame.
///
/// Runs regardless of state: an idle or terminal run keeps its physics frozen
/// (only the victory confetti continues to move), so the frame driver never
/// needs to pause.
pub fn advance(state: &mut RunState, voice: Option<VoiceSample>, rng: &mut impl Rng) -> Vec<FrameEvent> {
    let mut events = Vec::new();

    if state.is_active() {
        // A loud enough sample overwrites the velocity outright; sharpness
        // scales the force. No smoothing, no accumulation.
        if let Some(sample) = voice {
            if sample.volume > game::ACTIVATION_THRESHOLD {
                state.bird.velocity = game::BASE_FORCE * (game::SHARPNESS_FLOOR + sample.sharpness * game::SHARPNESS_SPAN);
                events.push(FrameEvent::Cue(CueId::Wing));
            }
        }

        state.bird.velocity += game::GRAVITY;
        // The bird may never leave through the top of the field.
        state.bird.y = (state.bird.y + state.bird.velocity).max(0.0);

        if state.bird.y > game::FIELD_HEIGHT {
            crash(state, &mut events);
        }

        // Backward so removal during iteration stays safe. The sweep runs to
        // completion even if a crash happens mid-frame; physics freezes from
        // the next frame on.
        let mut i = state.obstacles.len();
        while i > 0 {
            i -= 1;

            let obstacle = &mut state.obstacles[i];
            obstacle.x += game::SCROLL_SPEED;

            if !obstacle.passed && state.bird.x > obstacle.x + obstacle.width {
                obstacle.passed = true;
                state.score += 0.5;
                // Obstacles score half a point each; the cue marks a cleared
                // pair.
                if state.score.fract() == 0.0 {
                    events.push(FrameEvent::Cue(CueId::Point));
                }
            }

            let obstacle_rect = state.obstacles[i].rect();
            if state.bird.rect().overlaps(&obstacle_rect) {
                crash(state, &mut events);
            }

            if state.obstacles[i].x < -game::OBSTACLE_WIDTH {
                state.obstacles.remove(i);
            }
        }

        if !state.over && state.score >= game::VICTORY_SCORE {
            victory(state, rng, &mut events);
        }
    }

    if state.won {
        confetti::advance(&mut state.confetti, rng);
    }

    events
}

fn crash(state: &mut RunState, events: &mut Vec<FrameEvent>) {
    if state.over {
        return;
    }
    state.over = true;
    state.show_splash = true;
    state.crash_location = Some(Point { x: state.bird.x, y: state.bird.y });

    events.push(FrameEvent::Cue(CueId::Hit));
    events.push(FrameEvent::DelayedCue(CueId::Die, game::DIE_CUE_DELAY));
    events.push(FrameEvent::Finished(Outcome::Crash));
}

fn victory(state: &mut RunState, rng: &mut impl Rng, events: &mut Vec<FrameEvent>) {
    if state.over {
        return;
    }
    state.over = true;
    state.won = true;
    state.confetti = confetti::spawn(rng);

    events.push(FrameEvent::Cue(CueId::Win));
    events.push(FrameEvent::Finished(Outcome::Victory));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        constants::{confetti::CONFETTI_COUNT, game::*},
        game::types::{Obstacle, ObstacleKind},
    };

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn active_state() -> RunState {
        let mut state = RunState::new();
        state.started = true;
        state
    }

    /// An obstacle pair whose opening is centered on the bird, far enough
    /// right not to touch it.
    fn harmless_pair_at(x: f32, state: &RunState) -> (Obstacle, Obstacle) {
        let center = state.bird.y + state.bird.height / 2.0;
        let top_y = center - GAP_HEIGHT / 2.0 - OBSTACLE_HEIGHT;
        let top = Obstacle::new(ObstacleKind::Top, x, top_y);
        let bottom = Obstacle::new(ObstacleKind::Bottom, x, top_y + OBSTACLE_HEIGHT + GAP_HEIGHT);
        (top, bottom)
    }

    #[test]
    fn gravity_integrates_against_the_initial_impulse() {
        let mut state = active_state();
        state.bird.y = 320.0;
        state.bird.velocity = -4.0;

        advance(&mut state, None, &mut rng());

        assert!((state.bird.velocity - (-3.7)).abs() < 1e-4);
        assert!((state.bird.y - 316.3).abs() < 1e-3);
    }

    #[test]
    fn bird_never_rises_above_the_field() {
        let mut state = active_state();
        state.bird.y = 5.0;
        state.bird.velocity = -100.0;

        for _ in 0..10 {
            advance(&mut state, None, &mut rng());
            assert!(state.bird.y >= 0.0);
        }
    }

    #[test]
    fn falling_out_of_the_field_ends_the_run() {
        let mut state = active_state();
        state.bird.y = FIELD_HEIGHT - 1.0;
        state.bird.velocity = 10.0;

        let events = advance(&mut state, None, &mut rng());

        assert!(state.over);
        assert!(!state.won);
        assert!(state.show_splash);
        let crash = state.crash_location.expect("crash location recorded");
        assert_eq!(crash.x, state.bird.x);
        assert_eq!(crash.y, state.bird.y);
        assert!(events.contains(&FrameEvent::Cue(CueId::Hit)));
        assert!(events.contains(&FrameEvent::DelayedCue(CueId::Die, DIE_CUE_DELAY)));
        assert!(events.contains(&FrameEvent::Finished(Outcome::Crash)));
    }

    #[test]
    fn loud_voice_overwrites_velocity() {
        let mut state = active_state();
        state.bird.velocity = 3.0;

        let sample = VoiceSample { volume: 0.5, sharpness: 0.5 };
        let events = advance(&mut state, Some(sample), &mut rng());

        // -4 * (0.8 + 0.5 * 0.6) = -4.4, plus one gravity step.
        assert!((state.bird.velocity - (-4.4 + GRAVITY)).abs() < 1e-4);
        assert!(events.contains(&FrameEvent::Cue(CueId::Wing)));
    }

    #[test]
    fn quiet_voice_is_ignored() {
        let mut state = active_state();
        state.bird.velocity = 3.0;

        let sample = VoiceSample { volume: 0.19, sharpness: 1.0 };
        let events = advance(&mut state, Some(sample), &mut rng());

        assert!((state.bird.velocity - (3.0 + GRAVITY)).abs() < 1e-4);
        assert!(!events.contains(&FrameEvent::Cue(CueId::Wing)));
    }

    #[test]
    fn sharper_voice_flaps_harder() {
        let mut dull = active_state();
        advance(&mut dull, Some(VoiceSample { volume: 1.0, sharpness: 0.0 }), &mut rng());
        let mut sharp = active_state();
        advance(&mut sharp, Some(VoiceSample { volume: 1.0, sharpness: 1.0 }), &mut rng());

        assert!(sharp.bird.velocity < dull.bird.velocity);
    }

    #[test]
    fn obstacles_scroll_left_each_frame() {
        let mut state = active_state();
        let (top, bottom) = harmless_pair_at(200.0, &state);
        state.obstacles.push(top);
        state.obstacles.push(bottom);

        advance(&mut state, None, &mut rng());

        assert_eq!(state.obstacles[0].x, 200.0 + SCROLL_SPEED);
        assert_eq!(state.obstacles[1].x, 200.0 + SCROLL_SPEED);
    }

    #[test]
    fn passing_an_obstacle_scores_half_a_point_once() {
        let mut state = active_state();
        // Right edge sits exactly at the bird's x; one scroll step clears it.
        let (top, _) = harmless_pair_at(state.bird.x - OBSTACLE_WIDTH, &state);
        state.obstacles.push(top);

        let events = advance(&mut state, None, &mut rng());
        assert_eq!(state.score, 0.5);
        // Half-way through a pair: no point cue yet.
        assert!(!events.contains(&FrameEvent::Cue(CueId::Point)));

        advance(&mut state, None, &mut rng());
        assert_eq!(state.score, 0.5, "an obstacle scores at most once");
    }

    #[test]
    fn clearing_a_pair_cues_the_point() {
        let mut state = active_state();
        let (top, bottom) = harmless_pair_at(state.bird.x - OBSTACLE_WIDTH, &state);
        state.obstacles.push(top);
        state.obstacles.push(bottom);

        let events = advance(&mut state, None, &mut rng());

        assert_eq!(state.score, 1.0);
        assert!(events.contains(&FrameEvent::Cue(CueId::Point)));
    }

    #[test]
    fn touching_an_obstacle_ends_the_run() {
        let mut state = active_state();
        // Directly on the bird, gap far away.
        let top = Obstacle::new(ObstacleKind::Top, state.bird.x, state.bird.y - OBSTACLE_HEIGHT / 2.0);
        state.obstacles.push(top);

        let events = advance(&mut state, None, &mut rng());

        assert!(state.over);
        assert!(events.contains(&FrameEvent::Finished(Outcome::Crash)));
    }

    #[test]
    fn flying_through_the_opening_is_safe() {
        let mut state = active_state();
        state.bird.velocity = 0.0;
        let (top, bottom) = harmless_pair_at(state.bird.x, &state);
        state.obstacles.push(top);
        state.obstacles.push(bottom);

        // Hold the bird level with quiet frames; gravity alone moves it a few
        // units over the pair's width.
        for _ in 0..3 {
            advance(&mut state, Some(VoiceSample { volume: 1.0, sharpness: 0.33 }), &mut rng());
        }

        assert!(!state.over);
    }

    #[test]
    fn offscreen_obstacles_are_pruned() {
        let mut state = active_state();
        let (top, _) = harmless_pair_at(-OBSTACLE_WIDTH - 0.5, &state);
        state.obstacles.push(top);

        advance(&mut state, None, &mut rng());

        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn reaching_the_threshold_wins_and_starts_confetti() {
        let mut state = active_state();
        state.score = VICTORY_SCORE - 0.5;
        let (top, _) = harmless_pair_at(state.bird.x - OBSTACLE_WIDTH, &state);
        state.obstacles.push(top);

        let events = advance(&mut state, None, &mut rng());

        assert_eq!(state.score, VICTORY_SCORE);
        assert!(state.over && state.won);
        assert_eq!(state.confetti.len(), CONFETTI_COUNT);
        // The pair completed and the run won in the same frame.
        assert!(events.contains(&FrameEvent::Cue(CueId::Point)));
        assert!(events.contains(&FrameEvent::Cue(CueId::Win)));
        assert!(events.contains(&FrameEvent::Finished(Outcome::Victory)));
    }

    #[test]
    fn terminal_states_freeze_physics() {
        let mut state = active_state();
        state.bird.y = FIELD_HEIGHT + 1.0;
        state.bird.velocity = 10.0;
        advance(&mut state, None, &mut rng());
        assert!(state.over);

        let y = state.bird.y;
        let velocity = state.bird.velocity;
        let score = state.score;

        for _ in 0..5 {
            let events = advance(&mut state, Some(VoiceSample { volume: 2.0, sharpness: 1.0 }), &mut rng());
            assert!(events.is_empty());
        }

        assert_eq!(state.bird.y, y);
        assert_eq!(state.bird.velocity, velocity);
        assert_eq!(state.score, score);
    }

    #[test]
    fn a_second_terminal_transition_is_a_no_op() {
        let mut state = active_state();
        state.bird.y = FIELD_HEIGHT + 1.0;
        state.bird.velocity = 10.0;
        // Also park an obstacle on the bird so both triggers fire this frame.
        let top = Obstacle::new(ObstacleKind::Top, state.bird.x, state.bird.y - OBSTACLE_HEIGHT / 2.0);
        state.obstacles.push(top);

        let events = advance(&mut state, None, &mut rng());

        let finishes = events.iter().filter(|e| matches!(e, FrameEvent::Finished(_))).count();
        assert_eq!(finishes, 1);
    }

    #[test]
    fn confetti_keeps_falling_after_victory() {
        let mut state = active_state();
        state.score = VICTORY_SCORE;
        advance(&mut state, None, &mut rng());
        assert!(state.won);

        let before: Vec<f32> = state.confetti.iter().map(|p| p.y).collect();
        advance(&mut state, None, &mut rng());
        let after: Vec<f32> = state.confetti.iter().map(|p| p.y).collect();

        assert_ne!(before, after);
    }

    #[test]
    fn idle_run_does_not_move() {
        let mut state = RunState::new();
        let y = state.bird.y;

        let events = advance(&mut state, Some(VoiceSample { volume: 2.0, sharpness: 0.5 }), &mut rng());

        assert!(events.is_empty());
        assert_eq!(state.bird.y, y);
    }
}
