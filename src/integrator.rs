use crate::ball::Ball;

/// Accelerates every ball downward by `gravity`. Horizontal velocity is left alone.
pub fn apply_velocity_change(balls: &mut [Ball], gravity: f32, dt: f32) {
    for ball in balls {
        ball.velocity.y += gravity * dt;
    }
}

/// Records the pre-step position and advances every ball along its velocity.
pub fn update_position(balls: &mut [Ball], dt: f32) {
    for ball in balls {
        ball.previous_position = ball.position;
        ball.position += ball.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec2;

    fn balls() -> Vec<Ball> {
        vec![
            Ball::new(Vec2::new(10., 20.), Vec2::new(3., -4.), 5),
            Ball::new(Vec2::new(300., 0.), Vec2::new(-120., 50.), 25),
        ]
    }

    #[test]
    fn gravity_only_changes_vertical_velocity() {
        let mut balls = balls();
        let before = balls.clone();
        apply_velocity_change(&mut balls, 982., 0.016);
        for (after, before) in balls.iter().zip(&before) {
            assert_eq!(after.velocity.x, before.velocity.x);
            assert_eq!(after.velocity.y, before.velocity.y + 982. * 0.016);
            assert_eq!(after.position, before.position);
        }
    }

    #[test]
    fn position_moves_by_velocity_times_dt() {
        let mut balls = balls();
        let before = balls.clone();
        update_position(&mut balls, 0.5);
        for (after, before) in balls.iter().zip(&before) {
            assert_eq!(after.previous_position, before.position);
            assert_eq!(after.position, before.position + before.velocity * 0.5);
            assert_eq!(after.velocity, before.velocity);
        }
    }

    #[test]
    fn zero_dt_is_a_no_op_on_position() {
        let mut balls = balls();
        let before = balls.clone();
        update_position(&mut balls, 0.);
        assert_eq!(balls[0].position, before[0].position);
        assert_eq!(balls[1].position, before[1].position);
    }
}
