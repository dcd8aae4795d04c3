//! Collision detection and response
//!
//! Each resolver is a pure function: it takes the ball by value and returns
//! the corrected ball when a contact happened.

use glam::Vec2;

use super::state::{Ball, Court, Tuning};
use crate::consts::{CONTACT_DAMPING, CONTACT_EPSILON, NET_HALF_WIDTH};

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Clamp the ball inside the side walls and the ceiling
///
/// The floor is not a wall: touching it scores a point.
pub fn ball_wall_collision(mut ball: Ball, court: &Court, tuning: &Tuning) -> Option<Ball> {
    let r = tuning.ball_radius;
    let left = 1.0 + r;
    let right = (court.width - 2) as f32 - r;
    let top = 1.0 + r;
    let mut hit = false;

    if ball.pos.x <= left {
        ball.pos.x = left;
        ball.vel.x = -ball.vel.x * tuning.ball_restitution;
        hit = true;
    } else if ball.pos.x >= right {
        ball.pos.x = right;
        ball.vel.x = -ball.vel.x * tuning.ball_restitution;
        hit = true;
    }

    if ball.pos.y <= top {
        ball.pos.y = top;
        ball.vel.y = -ball.vel.y * tuning.ball_restitution;
        hit = true;
    }

    hit.then_some(ball)
}

/// Push the ball out of the net post
///
/// The net is a thin vertical post at `net_x`; a ball whose rounded row is in
/// the net's span and whose center is within the post band gets moved to the
/// side it is on, clear of the band.
pub fn ball_net_collision(mut ball: Ball, court: &Court, tuning: &Tuning) -> Option<Ball> {
    let row = ball.pos.y.round() as i32;
    if !court.net_spans_row(row) {
        return None;
    }

    let net_x = court.net_x as f32;
    let r = tuning.ball_radius;
    if (ball.pos.x - net_x).abs() >= NET_HALF_WIDTH + r {
        return None;
    }

    ball.pos.x = if ball.pos.x < net_x {
        net_x - (1.0 + r)
    } else {
        net_x + (1.0 + r)
    };
    ball.vel.x = -ball.vel.x * tuning.ball_restitution;
    Some(ball)
}

/// Circle/circle contact between the ball and one blob
///
/// `center` is the blob's collision center, `player_vx` its estimated
/// horizontal velocity. Returns `None` when the circles don't overlap or the
/// centers coincide (no usable normal).
pub fn ball_blob_collision(
    mut ball: Ball,
    center: Vec2,
    player_vx: f32,
    tuning: &Tuning,
) -> Option<Ball> {
    let delta = ball.pos - center;
    let d2 = delta.length_squared();
    let reach = tuning.blob_radius + tuning.ball_radius;
    if d2 > reach * reach || d2 <= CONTACT_EPSILON {
        return None;
    }

    let d = d2.sqrt();
    let normal = delta / d;

    // Sit exactly on the combined radius
    ball.pos += normal * (reach - d);

    // Elastic along the normal, only when moving into the blob
    if ball.vel.dot(normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, normal);
    }

    ball.vel += normal * tuning.player_kick;
    ball.vel.x += player_vx * tuning.player_carry;
    ball.vel *= CONTACT_DAMPING;

    Some(ball)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_collision_left_and_right() {
        let court = Court::new(80, 24);
        let tuning = Tuning::default();

        let hit = ball_wall_collision(ball(1.5, 10.0, -10.0, 0.0), &court, &tuning).unwrap();
        assert!((hit.pos.x - 2.05).abs() < 1e-5);
        assert!((hit.vel.x - 7.8).abs() < 1e-4);

        let hit = ball_wall_collision(ball(78.0, 10.0, 10.0, 0.0), &court, &tuning).unwrap();
        assert!((hit.pos.x - 76.95).abs() < 1e-4);
        assert!((hit.vel.x + 7.8).abs() < 1e-4);

        assert!(ball_wall_collision(ball(40.0, 10.0, 10.0, 0.0), &court, &tuning).is_none());
    }

    #[test]
    fn test_ceiling_collision() {
        let court = Court::new(80, 24);
        let tuning = Tuning::default();
        let hit = ball_wall_collision(ball(30.0, 1.0, 0.0, -20.0), &court, &tuning).unwrap();
        assert!((hit.pos.y - 2.05).abs() < 1e-5);
        assert!((hit.vel.y - 15.6).abs() < 1e-4);
    }

    #[test]
    fn test_net_pushes_to_approach_side() {
        let court = Court::new(80, 24);
        let tuning = Tuning::default();

        let hit = ball_net_collision(ball(39.5, 18.0, 5.0, 0.0), &court, &tuning).unwrap();
        assert!((hit.pos.x - 37.95).abs() < 1e-5);
        assert!(hit.vel.x < 0.0);

        let hit = ball_net_collision(ball(40.5, 18.0, -5.0, 0.0), &court, &tuning).unwrap();
        assert!((hit.pos.x - 42.05).abs() < 1e-5);
        assert!(hit.vel.x > 0.0);
    }

    #[test]
    fn test_net_ignores_ball_above_net() {
        let court = Court::new(80, 24);
        let tuning = Tuning::default();
        // Row 15 rounds outside the 16..=22 span
        assert!(ball_net_collision(ball(40.0, 15.2, 5.0, 0.0), &court, &tuning).is_none());
        // Inside span but outside the band
        assert!(ball_net_collision(ball(42.0, 18.0, 5.0, 0.0), &court, &tuning).is_none());
    }

    #[test]
    fn test_blob_contact_pushes_out_and_reflects() {
        let tuning = Tuning::default();
        let center = Vec2::new(20.0, 21.5);
        // Falling straight onto the blob's head
        let hit = ball_blob_collision(ball(20.0, 19.5, 0.0, 10.0), center, 0.0, &tuning).unwrap();

        let reach = tuning.blob_radius + tuning.ball_radius;
        assert!(((hit.pos - center).length() - reach).abs() < 1e-4);
        // Reflected (-10) plus kick (-10), damped
        assert!((hit.vel.y - (-20.0 * CONTACT_DAMPING)).abs() < 1e-4);
        assert!(hit.vel.x.abs() < 1e-5);
    }

    #[test]
    fn test_blob_contact_adds_carry() {
        let tuning = Tuning::default();
        let center = Vec2::new(20.0, 21.5);
        let hit = ball_blob_collision(ball(20.0, 19.5, 0.0, 0.0), center, 20.0, &tuning).unwrap();
        let expected = 20.0 * tuning.player_carry * CONTACT_DAMPING;
        assert!((hit.vel.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_blob_contact_keeps_outward_velocity() {
        let tuning = Tuning::default();
        let center = Vec2::new(20.0, 21.5);
        // Already moving away: no reflection, only kick
        let hit = ball_blob_collision(ball(20.0, 19.5, 0.0, -5.0), center, 0.0, &tuning).unwrap();
        assert!((hit.vel.y - (-15.0 * CONTACT_DAMPING)).abs() < 1e-4);
    }

    #[test]
    fn test_blob_contact_misses() {
        let tuning = Tuning::default();
        let center = Vec2::new(20.0, 21.5);
        assert!(ball_blob_collision(ball(30.0, 21.5, 0.0, 0.0), center, 0.0, &tuning).is_none());
        // Coincident centers have no normal
        assert!(ball_blob_collision(ball(20.0, 21.5, 3.0, 3.0), center, 0.0, &tuning).is_none());
    }
}
