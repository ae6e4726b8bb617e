use std::time::Duration;

use ratatui::style::Color;

/// World units. The original cabinet is a 360x640 portrait field and all
/// physics tuning below assumes a nominal 60Hz frame.
pub const FIELD_WIDTH: f32 = 360.0;
pub const FIELD_HEIGHT: f32 = 640.0;

pub const BIRD_WIDTH: f32 = 34.0;
pub const BIRD_HEIGHT: f32 = 24.0;
pub const BIRD_START_X: f32 = FIELD_WIDTH / 8.0;
pub const BIRD_START_Y: f32 = FIELD_HEIGHT / 2.0;

pub const OBSTACLE_WIDTH: f32 = 64.0;
pub const OBSTACLE_HEIGHT: f32 = 512.0;
/// Vertical opening between the two obstacles of a pair.
pub const GAP_HEIGHT: f32 = FIELD_HEIGHT / 3.0;

pub const GRAVITY: f32 = 0.3;
pub const SCROLL_SPEED: f32 = -2.0;
pub const INITIAL_VELOCITY: f32 = -4.0;
/// Head-start impulse multiplier applied once on `start`.
pub const START_IMPULSE_FACTOR: f32 = 1.5;

/// Voice control tuning: a sample louder than the threshold overwrites the
/// bird velocity with BASE_FORCE scaled by spectral sharpness.
pub const ACTIVATION_THRESHOLD: f32 = 0.2;
pub const BASE_FORCE: f32 = -4.0;
pub const SHARPNESS_FLOOR: f32 = 0.8;
pub const SHARPNESS_SPAN: f32 = 0.6;

pub const VICTORY_SCORE: f32 = 2.0;

pub const SPAWN_PERIOD: Duration = Duration::from_millis(2700);
pub const DIE_CUE_DELAY: Duration = Duration::from_millis(500);
/// Monitor ticks (100ms each) between loss detection and the game-over card,
/// so the crash splash stays visible for a moment.
pub const LOSS_NOTICE_TICKS: u16 = 20;

pub const BIRD_COLOR: Color = Color::Yellow;
pub const PIPE_COLOR: Color = Color::LightGreen;
pub const PIPE_CAP_COLOR: Color = Color::Green;
pub const SPLASH_COLOR: Color = Color::LightRed;

pub const BIRD_TEXT: &str = r#"
  __
<(o )=
"#;

pub const SPLASH_TEXT: &str = r#"
 \ . /
- >X< -
 / ' \
"#;
