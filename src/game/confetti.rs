//! Victory particle overlay: a recycling rain of confetti, never a one-shot
//! burst.

use rand::Rng;
use ratatui::style::Color;

use crate::constants::{confetti, game};

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
    pub speed_y: f32,
    pub speed_x: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    /// Terminal stand-in for the rotation transform: the glyph tumbles
    /// through four shapes as the particle spins.
    pub fn glyph(&self) -> char {
        let quadrant = (self.rotation.rem_euclid(360.0) / 90.0) as usize;
        confetti::CONFETTI_GLYPHS[quadrant.min(confetti::CONFETTI_GLYPHS.len() - 1)]
    }
}

/// One fixed-size batch, scattered across the field width and above the
/// visible field so the rain falls into view.
pub fn spawn(rng: &mut impl Rng) -> Vec<Particle> {
    (0..confetti::CONFETTI_COUNT)
        .map(|_| Particle {
            x: rng.gen::<f32>() * game::FIELD_WIDTH,
            y: rng.gen::<f32>() * game::FIELD_HEIGHT - game::FIELD_HEIGHT,
            size: rng.gen::<f32>() * confetti::SIZE_SPAN + confetti::SIZE_MIN,
            color: confetti::CONFETTI_COLORS[rng.gen_range(0..confetti::CONFETTI_COLORS.len())],
            speed_y: rng.gen::<f32>() * confetti::FALL_SPEED_SPAN + confetti::FALL_SPEED_MIN,
            speed_x: rng.gen::<f32>() * confetti::DRIFT_SPAN - confetti::DRIFT_SPAN / 2.0,
            rotation: rng.gen::<f32>() * 360.0,
            rotation_speed: rng.gen::<f32>() * confetti::ROTATION_SPEED_SPAN - confetti::ROTATION_SPEED_SPAN / 2.0,
        })
        .collect()
}

/// One frame of particle motion. Particles that leave through the bottom wrap
/// back above the field at a fresh random x.
pub fn advance(particles: &mut [Particle], rng: &mut impl Rng) {
    for particle in particles.iter_mut() {
        particle.y += particle.speed_y;
        particle.x += particle.speed_x;
        particle.rotation += particle.rotation_speed;

        if particle.y > game::FIELD_HEIGHT {
            particle.y = confetti::RESPAWN_OFFSET;
            particle.x = rng.gen::<f32>() * game::FIELD_WIDTH;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::constants::{confetti::CONFETTI_COUNT, game::FIELD_HEIGHT, game::FIELD_WIDTH};

    #[test]
    fn batch_has_a_fixed_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let particles = spawn(&mut rng);
        assert_eq!(particles.len(), CONFETTI_COUNT);
        for p in &particles {
            assert!(p.x >= 0.0 && p.x <= FIELD_WIDTH);
            assert!(p.y <= 0.0, "particles start above the field");
            assert!(p.size >= 5.0 && p.size <= 12.0);
            assert!(p.speed_y >= 2.0 && p.speed_y <= 5.0);
        }
    }

    #[test]
    fn particles_wrap_instead_of_disappearing() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut particles = spawn(&mut rng);

        // Long enough for every particle to cross the field several times.
        for _ in 0..2000 {
            advance(&mut particles, &mut rng);
        }

        assert_eq!(particles.len(), CONFETTI_COUNT);
        for p in &particles {
            assert!(p.y <= FIELD_HEIGHT + 5.0, "particle escaped: y = {}", p.y);
        }
    }

    #[test]
    fn wrapped_particle_reappears_above_the_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut particles = spawn(&mut rng);
        particles[0].y = FIELD_HEIGHT + 1.0;
        particles[0].speed_y = 0.0;
        particles[0].speed_x = 0.0;

        advance(&mut particles, &mut rng);

        assert!(particles[0].y < 0.0);
        assert!(particles[0].x >= 0.0 && particles[0].x <= FIELD_WIDTH);
    }

    #[test]
    fn rotation_picks_the_glyph() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut particle = spawn(&mut rng).pop().unwrap();
        particle.rotation = 0.0;
        let first = particle.glyph();
        particle.rotation = 270.0;
        let last = particle.glyph();
        assert_ne!(first, last);

        // Negative rotations stay in range too.
        particle.rotation = -45.0;
        let _ = particle.glyph();
    }
}
