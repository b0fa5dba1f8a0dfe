use crate::{ball::Ball, geometry::distance};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How two overlapping balls are pulled apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Exchange an impulse along the contact normal, then push the pair apart
    /// in proportion to the other ball's mass.
    #[default]
    Impulse,
    /// Swap the two velocities and send both balls back to their previous
    /// positions. Ignores mass and contact geometry.
    SwapRevert,
}

/// Resolves every overlapping pair, in index order, against current positions.
///
/// This is a plain O(n²) scan with no broad phase. Balls of very different
/// radii can still gain energy and blow up under the impulse policy.
pub fn resolve_collisions(balls: &mut [Ball], policy: CollisionPolicy) {
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match policy {
                CollisionPolicy::Impulse => impulse(a, b),
                CollisionPolicy::SwapRevert => swap_revert(a, b),
            }
        }
    }
}

/// Penetration depth and unit normal from `a` to `b`, or `None` if they don't overlap.
/// Coincident centers get the full summed radius along +x.
fn contact(a: &Ball, b: &Ball) -> Option<(f32, Vec2)> {
    let reach = (a.radius + b.radius) as f32;
    let d = distance(a.center(), b.center());
    let overlap = reach - d;
    if overlap <= 0. {
        return None;
    }
    if d <= f32::EPSILON {
        return Some((reach, Vec2::X));
    }
    Some((overlap, (b.center() - a.center()) / d))
}

fn impulse(a: &mut Ball, b: &mut Ball) {
    let Some((overlap, normal)) = contact(a, b) else {
        return;
    };
    let closing = (b.velocity - a.velocity).dot(normal);
    if closing > 0. {
        return;
    }

    let total_mass = a.mass + b.mass;
    // no impulse without an approach, but a resting overlap is still pushed apart
    if closing < 0. {
        let restitution = (a.restitution + b.restitution) / 2.;
        let j = -(1. + restitution) * closing / total_mass;
        a.velocity -= j * b.mass * normal;
        b.velocity += j * a.mass * normal;
    }

    let correction = overlap / total_mass;
    a.position -= normal * correction * b.mass;
    b.position += normal * correction * a.mass;
}

fn swap_revert(a: &mut Ball, b: &mut Ball) {
    if contact(a, b).is_none() {
        return;
    }
    std::mem::swap(&mut a.velocity, &mut b.velocity);
    a.position = a.previous_position;
    b.position = b.previous_position;
}
