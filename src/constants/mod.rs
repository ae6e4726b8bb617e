pub mod confetti;
pub mod game;

/// Play-field size in terminal cells. World coordinates are scaled onto this
/// grid at draw time; physics always runs in world units.
pub const FIELD_COLS: u16 = 54;
pub const FIELD_ROWS: u16 = 36;

pub const TITLE_TEXT: &str = r#"
 ____   ___  _   _  _____        ___  __
/ ___| / _ \| | | |/ \  \ \      / / |/ /
\___ \| | | | | | / _ \  \ \ /\ / /| ' /
 ___) | |_| | |_| / ___ \ \ V  V / | . \
|____/ \__\_\\___/_/   \_\ \_/\_/  |_|\_\
"#;

pub const TAGLINE: &str = "shout to flap";
