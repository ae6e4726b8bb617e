use ratatui::style::Color;

pub const CONFETTI_COUNT: usize = 100;

/// Respawn height above the field for particles that wrapped past the bottom.
pub const RESPAWN_OFFSET: f32 = -20.0;

pub const CONFETTI_COLORS: [Color; 6] = [
    Color::Rgb(242, 215, 78),
    Color::Rgb(149, 195, 222),
    Color::Rgb(255, 154, 145),
    Color::Rgb(242, 215, 78),
    Color::Rgb(161, 204, 133),
    Color::Rgb(190, 145, 255),
];

pub const SIZE_MIN: f32 = 5.0;
pub const SIZE_SPAN: f32 = 7.0;
pub const FALL_SPEED_MIN: f32 = 2.0;
pub const FALL_SPEED_SPAN: f32 = 3.0;
pub const DRIFT_SPAN: f32 = 2.0;
pub const ROTATION_SPEED_SPAN: f32 = 10.0;

/// Glyph per rotation quadrant; rotation shows up as the particle tumbling
/// through these shapes.
pub const CONFETTI_GLYPHS: [char; 4] = ['▘', '▝', '▗', '▖'];
