//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives on [`Game`]. The host loop owns the
//! single instance; nothing here is global.

use glam::Vec2;

use crate::consts::*;

/// One side of the court. `Left` is player 1, `Right` is player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Key bindings for every in-game action (ASCII, case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub p1_left: u8,
    pub p1_right: u8,
    pub p1_jump: u8,
    pub p2_left: u8,
    pub p2_right: u8,
    pub p2_jump: u8,
    pub serve_left: u8,
    pub serve_right: u8,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            p1_left: b'A',
            p1_right: b'D',
            p1_jump: b'W',
            p2_left: b'J',
            p2_right: b'L',
            p2_jump: b'I',
            serve_left: b'S',
            serve_right: b'K',
        }
    }
}

impl Controls {
    /// Upper-case every binding so lookups only need to normalize the key
    pub fn normalized(self) -> Self {
        Self {
            p1_left: self.p1_left.to_ascii_uppercase(),
            p1_right: self.p1_right.to_ascii_uppercase(),
            p1_jump: self.p1_jump.to_ascii_uppercase(),
            p2_left: self.p2_left.to_ascii_uppercase(),
            p2_right: self.p2_right.to_ascii_uppercase(),
            p2_jump: self.p2_jump.to_ascii_uppercase(),
            serve_left: self.serve_left.to_ascii_uppercase(),
            serve_right: self.serve_right.to_ascii_uppercase(),
        }
    }

    /// (left, right, jump) bindings for one player
    pub fn for_side(&self, side: Side) -> (u8, u8, u8) {
        match side {
            Side::Left => (self.p1_left, self.p1_right, self.p1_jump),
            Side::Right => (self.p2_left, self.p2_right, self.p2_jump),
        }
    }
}

/// Movement and ball tuning, in cells and seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub move_speed: f32,
    pub air_move_speed: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_velocity: f32,
    pub gravity: f32,
    pub ball_gravity: f32,
    /// Fraction of velocity kept after a wall, ceiling or net bounce
    pub ball_restitution: f32,
    /// Outward impulse added on every blob contact
    pub player_kick: f32,
    /// Fraction of the blob's horizontal velocity handed to the ball
    pub player_carry: f32,
    pub ball_radius: f32,
    pub blob_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            air_move_speed: AIR_MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: PLAYER_GRAVITY,
            ball_gravity: BALL_GRAVITY,
            ball_restitution: BALL_RESTITUTION,
            player_kick: PLAYER_KICK,
            player_carry: PLAYER_CARRY,
            ball_radius: BALL_RADIUS,
            blob_radius: BLOB_RADIUS,
        }
    }
}

/// Fixed court geometry derived from the grid size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: i32,
    pub height: i32,
    /// Row the blobs stand on
    pub ground_y: i32,
    /// Ball rows at or below this count as touching the ground
    pub ground_ball_y: f32,
    pub net_x: i32,
    pub net_top_y: i32,
    pub net_bottom_y: i32,
}

impl Court {
    pub fn new(width: i32, height: i32) -> Self {
        let ground_y = height - 2;
        Self {
            width,
            height,
            ground_y,
            ground_ball_y: ground_y as f32,
            net_x: width / 2,
            net_top_y: ground_y - NET_HEIGHT,
            net_bottom_y: ground_y,
        }
    }

    /// Inclusive x range a blob on `side` may occupy
    pub fn half_bounds(&self, side: Side) -> (f32, f32) {
        match side {
            Side::Left => (NET_MARGIN, (self.net_x as f32) - NET_MARGIN),
            Side::Right => ((self.net_x as f32) + NET_MARGIN, (self.width - 3) as f32),
        }
    }

    /// Whether a (rounded) row lies within the net's vertical span
    pub fn net_spans_row(&self, row: i32) -> bool {
        row >= self.net_top_y && row <= self.net_bottom_y
    }

    /// Ball position and velocity for a serve toward the given side
    pub fn serve_ball(&self, to_left: bool) -> Ball {
        let vx = if to_left { -SERVE_SPEED } else { SERVE_SPEED };
        Ball {
            pos: Vec2::new(self.width as f32 * 0.5, SERVE_HEIGHT),
            vel: Vec2::new(vx, 0.0),
        }
    }
}

/// A blob player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Foot position (x center, y ground contact row)
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub on_ground: bool,
    pub left_held: bool,
    pub right_held: bool,
    pub jump_requested: bool,
    pub prev_x: f32,
    /// Finite-difference horizontal velocity from the last tick
    pub vx: f32,
}

impl Player {
    pub fn new(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y),
            vy: 0.0,
            on_ground: true,
            left_held: false,
            right_held: false,
            jump_requested: false,
            prev_x: x,
            vx: 0.0,
        }
    }

    /// Collision circle center, half a cell above the feet
    pub fn center(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, 0.5)
    }

    /// Last key wins: terminals report presses only, never releases
    pub fn hold_left(&mut self) {
        self.left_held = true;
        self.right_held = false;
    }

    pub fn hold_right(&mut self) {
        self.right_held = true;
        self.left_held = false;
    }

    /// Horizontal command velocity for this tick
    pub fn command_velocity(&self, tuning: &Tuning) -> f32 {
        let speed = if self.on_ground {
            tuning.move_speed
        } else {
            tuning.air_move_speed
        };
        let mut vx = 0.0;
        if self.left_held {
            vx -= speed;
        }
        if self.right_held {
            vx += speed;
        }
        vx
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) court: Court,
    pub(crate) tuning: Tuning,
    pub(crate) dt: f32,
    pub(crate) controls: Controls,
    pub(crate) p1: Player,
    pub(crate) p2: Player,
    pub(crate) ball: Ball,
    pub(crate) p1_score: u32,
    pub(crate) p2_score: u32,
    pub(crate) waiting_serve: bool,
    pub(crate) serve_to_left: bool,
}

impl Game {
    /// Create a game with default tuning
    pub fn new(width: i32, height: i32, tick_rate: u32, controls: Controls) -> Self {
        Self::with_tuning(width, height, tick_rate, controls, Tuning::default())
    }

    pub fn with_tuning(
        width: i32,
        height: i32,
        tick_rate: u32,
        controls: Controls,
        tuning: Tuning,
    ) -> Self {
        let court = Court::new(width, height);
        let ground = court.ground_y as f32;
        let p1 = Player::new((width / 4) as f32, ground);
        let p2 = Player::new((width * 3 / 4) as f32, ground);

        // Parked at the serve point; frozen until someone serves
        let mut ball = court.serve_ball(true);
        ball.vel = Vec2::ZERO;

        Self {
            court,
            tuning,
            dt: 1.0 / tick_rate.max(1) as f32,
            controls: controls.normalized(),
            p1,
            p2,
            ball,
            p1_score: 0,
            p2_score: 0,
            waiting_serve: true,
            serve_to_left: true,
        }
    }

    pub fn is_waiting_serve(&self) -> bool {
        self.waiting_serve
    }

    /// Direction of the next serve as last set by a serve key or a point
    pub fn serve_to_left(&self) -> bool {
        self.serve_to_left
    }

    /// (player 1, player 2)
    pub fn score(&self) -> (u32, u32) {
        (self.p1_score, self.p2_score)
    }

    /// (x, y, vx, vy)
    pub fn ball_state(&self) -> (f32, f32, f32, f32) {
        (
            self.ball.pos.x,
            self.ball.pos.y,
            self.ball.vel.x,
            self.ball.vel.y,
        )
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.p1,
            Side::Right => &self.p2,
        }
    }

    pub(crate) fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.p1,
            Side::Right => &mut self.p2,
        }
    }

    pub fn court(&self) -> &Court {
        &self.court
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Fixed tick duration in seconds
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
