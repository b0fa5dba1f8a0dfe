use crate::{geometry::distance, Simulation};
use bevy::prelude::*;
use rand::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BallColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<BallColor> for Color {
    fn from(color: BallColor) -> Self {
        Color::rgb_u8(color.r, color.g, color.b)
    }
}

/// A circular body. `position` is the top-left corner of its bounding box in
/// y-down window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    /// Position before the latest integration step.
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub radius: u32,
    pub mass: f32,
    pub restitution: f32,
    pub color: BallColor,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: u32) -> Self {
        Self {
            position,
            previous_position: position,
            velocity,
            radius: radius.max(1),
            mass: 1.,
            restitution: 1.,
            color: BallColor::default(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius as f32
    }

    pub fn diameter(&self) -> f32 {
        self.radius as f32 * 2.
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius())
    }

    /// Moves the ball so its center sits at `center`.
    pub fn set_center(&mut self, center: Vec2) {
        self.position = center - Vec2::splat(self.radius());
    }

    /// Pulls the ball back inside a `width` x `height` window.
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let max = (Vec2::new(width, height) - Vec2::splat(self.diameter())).max(Vec2::ZERO);
        self.position = self.position.clamp(Vec2::ZERO, max);
    }
}

/// Samples a new ball from the simulation's spawn parameters.
pub fn create_ball(rng: &mut impl Rng, sim: &Simulation) -> Ball {
    let radius = rng.gen_range(sim.radius_range.clone());
    let diameter = radius as f32 * 2.;
    let position = match sim.spawn_point {
        Some((x, y)) => Vec2::new(x, y),
        None => Vec2::new(
            sample_offset(rng, sim.width - diameter),
            sample_offset(rng, sim.height - diameter),
        ),
    };
    let velocity = Vec2::new(
        rng.gen_range(sim.velocity_range.clone()),
        rng.gen_range(sim.velocity_range.clone()),
    );
    Ball {
        mass: sim.mass,
        restitution: sim.restitution,
        color: BallColor {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        },
        ..Ball::new(position, velocity, radius)
    }
}

fn sample_offset(rng: &mut impl Rng, room: f32) -> f32 {
    if room > 0. {
        rng.gen_range(0.0..room)
    } else {
        0.
    }
}

/// True when `candidate` would start touching or overlapping any existing ball.
pub fn single_ball_check(existing: &[Ball], candidate: &Ball) -> bool {
    existing.iter().any(|ball| {
        distance(ball.center(), candidate.center()) <= (ball.radius + candidate.radius) as f32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn random_spawn_is_on_screen() {
        let sim = Simulation {
            spawn_point: None,
            radius_range: 5..50,
            ..default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let ball = create_ball(&mut rng, &sim);
            assert!((5..50).contains(&ball.radius));
            assert!(ball.position.x >= 0. && ball.position.y >= 0.);
            assert!(ball.position.x + ball.diameter() <= sim.width);
            assert!(ball.position.y + ball.diameter() <= sim.height);
            assert!(ball.velocity.x >= -500. && ball.velocity.x < 500.);
            assert!(ball.velocity.y >= -500. && ball.velocity.y < 500.);
            assert_eq!(ball.previous_position, ball.position);
        }
    }

    #[test]
    fn fixed_spawn_uses_configured_point() {
        let sim = Simulation::default();
        let ball = create_ball(&mut StdRng::seed_from_u64(1), &sim);
        assert_eq!(ball.position, Vec2::new(475., 0.));
        assert_eq!(ball.radius, 25);
        assert_eq!(ball.mass, 1.);
        assert_eq!(ball.restitution, 1.);
    }

    #[test]
    fn overlapping_candidate_is_rejected() {
        let existing = [Ball::new(Vec2::new(100., 100.), Vec2::ZERO, 20)];
        let close = Ball::new(Vec2::new(130., 100.), Vec2::ZERO, 20);
        assert!(single_ball_check(&existing, &close));

        // centers exactly r1 + r2 apart still count as touching
        let touching = Ball::new(Vec2::new(140., 100.), Vec2::ZERO, 20);
        assert!(single_ball_check(&existing, &touching));

        let clear = Ball::new(Vec2::new(141., 100.), Vec2::ZERO, 20);
        assert!(!single_ball_check(&existing, &clear));
        assert!(!single_ball_check(&[], &close));
    }

    #[test]
    fn clamp_keeps_ball_inside() {
        let mut ball = Ball::new(Vec2::new(-30., 990.), Vec2::ZERO, 10);
        ball.clamp_to(1000., 1000.);
        assert_eq!(ball.position, Vec2::new(0., 980.));
    }
}
