//! Fixed timestep simulation tick
//!
//! Key handling and the per-tick update that advances the game.

use super::collision::{ball_blob_collision, ball_net_collision, ball_wall_collision};
use super::state::{Court, Game, Player, Side, Tuning};

impl Game {
    /// Apply one raw key byte. Unbound keys are ignored.
    ///
    /// Safe to call any number of times between ticks; later keys override
    /// earlier ones for direction and serve choice.
    pub fn handle_key_event(&mut self, key: u8) {
        let key = key.to_ascii_uppercase();
        let controls = self.controls;

        if self.waiting_serve {
            if key == controls.serve_left {
                self.serve(true);
            } else if key == controls.serve_right {
                self.serve(false);
            }
        }

        for side in [Side::Left, Side::Right] {
            let (left, right, jump) = controls.for_side(side);
            let player = self.player_mut(side);
            if key == left {
                player.hold_left();
            } else if key == right {
                player.hold_right();
            } else if key == jump {
                player.jump_requested = true;
            }
        }
    }

    fn serve(&mut self, to_left: bool) {
        self.serve_to_left = to_left;
        self.ball = self.court.serve_ball(to_left);
        self.waiting_serve = false;
        log::debug!("Serve toward {}", if to_left { "left" } else { "right" });
    }

    /// Advance the simulation by one fixed tick
    pub fn step(&mut self) {
        let dt = self.dt;
        let court = self.court;
        let tuning = self.tuning;

        step_player(&mut self.p1, Side::Left, &court, &tuning, dt);
        step_player(&mut self.p2, Side::Right, &court, &tuning, dt);

        // Ball is parked until someone serves
        if self.waiting_serve {
            return;
        }

        let ball = &mut self.ball;
        ball.vel.y += tuning.ball_gravity * dt;
        ball.pos += ball.vel * dt;

        if let Some(hit) = ball_wall_collision(*ball, &court, &tuning) {
            *ball = hit;
        }
        if let Some(hit) = ball_net_collision(*ball, &court, &tuning) {
            *ball = hit;
        }

        // Both blobs get a say every tick
        for player in [&self.p1, &self.p2] {
            if let Some(hit) = ball_blob_collision(*ball, player.center(), player.vx, &tuning) {
                *ball = hit;
            }
        }

        if self.ball.pos.y >= court.ground_ball_y {
            let scorer = if self.ball.pos.x < court.net_x as f32 {
                Side::Right
            } else {
                Side::Left
            };
            self.award_point(scorer);
        }
    }

    fn award_point(&mut self, scorer: Side) {
        match scorer {
            Side::Left => self.p1_score += 1,
            Side::Right => self.p2_score += 1,
        }
        // Side 2 scoring sends the next serve right, side 1 scoring sends it left
        self.serve_to_left = scorer == Side::Left;
        self.waiting_serve = true;
        self.ball = self.court.serve_ball(self.serve_to_left);
        self.ball.vel = glam::Vec2::ZERO;

        log::debug!(
            "Point to {:?}: {} - {}",
            scorer,
            self.p1_score,
            self.p2_score
        );
    }
}

/// Movement, jump and vertical integration for one blob
fn step_player(player: &mut Player, side: Side, court: &Court, tuning: &Tuning, dt: f32) {
    let hx = player.command_velocity(tuning);
    let (min_x, max_x) = court.half_bounds(side);
    player.pos.x = (player.pos.x + hx * dt).clamp(min_x, max_x);

    if player.jump_requested && player.on_ground {
        player.vy = tuning.jump_velocity;
        player.on_ground = false;
    }
    player.jump_requested = false;

    if !player.on_ground {
        let ground = court.ground_y as f32;
        player.vy += tuning.gravity * dt;
        player.pos.y += player.vy * dt;
        if player.pos.y >= ground {
            player.pos.y = ground;
            player.vy = 0.0;
            player.on_ground = true;
        }
    }

    player.vx = (player.pos.x - player.prev_x) / dt;
    player.prev_x = player.pos.x;
}
