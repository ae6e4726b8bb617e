pub mod confetti;
pub mod frame;
pub mod geometry;
pub mod session;
pub mod spawner;
pub mod types;
