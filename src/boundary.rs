use crate::{ball::Ball, Simulation};
use serde::{Deserialize, Serialize};

/// What happens to a ball's position once it crosses a wall. Velocity on that
/// axis is reflected and scaled by restitution either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Snap the ball flush against the wall.
    #[default]
    Clamp,
    /// Put the ball back where it was before the last integration step.
    /// Can jitter when the previous position was already out of bounds.
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wall {
    Near,
    Far,
}

/// Checks one axis. `position` is the near edge, `extent` the window size.
fn crossed(position: f32, diameter: f32, extent: f32) -> Option<Wall> {
    if position < 0. {
        Some(Wall::Near)
    } else if position + diameter > extent {
        Some(Wall::Far)
    } else {
        None
    }
}

pub fn resolve_boundaries(balls: &mut [Ball], sim: &Simulation) {
    for ball in balls {
        let diameter = ball.diameter();
        if let Some(wall) = crossed(ball.position.x, diameter, sim.width) {
            ball.velocity.x = -ball.velocity.x * ball.restitution;
            ball.position.x = match sim.boundary {
                BoundaryPolicy::Clamp => edge(wall, diameter, sim.width),
                BoundaryPolicy::Revert => ball.previous_position.x,
            };
        }
        if let Some(wall) = crossed(ball.position.y, diameter, sim.height) {
            ball.velocity.y = -ball.velocity.y * ball.restitution;
            ball.position.y = match sim.boundary {
                BoundaryPolicy::Clamp => edge(wall, diameter, sim.height),
                BoundaryPolicy::Revert => ball.previous_position.y,
            };
        }
    }
}

fn edge(wall: Wall, diameter: f32, extent: f32) -> f32 {
    match wall {
        Wall::Near => 0.,
        Wall::Far => extent - diameter,
    }
}
