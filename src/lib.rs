//! Terminal Volley - two blobs, one ball, one net
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (movement, ball physics, serve/scoring)
//! - `renderer`: Character-grid frame and ANSI renderer
//! - `input`: Raw terminal mode and key polling
//! - `settings`: Controls config loading

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, ControlsConfig, ResolvedControls};
pub use sim::{Controls, Game, Side};

/// Game configuration constants
pub mod consts {
    /// Court dimensions (cells)
    pub const COURT_WIDTH: i32 = 80;
    pub const COURT_HEIGHT: i32 = 24;

    /// Default simulation rate (ticks per second)
    pub const DEFAULT_TICK_RATE: u32 = 200;

    /// Player movement (cells/s)
    pub const MOVE_SPEED: f32 = 20.0;
    pub const AIR_MOVE_SPEED: f32 = 12.0;
    /// Negative is up
    pub const JUMP_VELOCITY: f32 = -28.0;
    pub const PLAYER_GRAVITY: f32 = 32.0;

    /// Ball flight
    pub const BALL_GRAVITY: f32 = 18.0;
    pub const BALL_RESTITUTION: f32 = 0.78;
    pub const BALL_RADIUS: f32 = 1.05;

    /// Blob contact
    pub const BLOB_RADIUS: f32 = 1.7;
    pub const PLAYER_KICK: f32 = 10.0;
    pub const PLAYER_CARRY: f32 = 0.30;
    /// Velocity kept after each blob contact
    pub const CONTACT_DAMPING: f32 = 0.98;
    /// Below this squared distance the contact normal is undefined
    pub const CONTACT_EPSILON: f32 = 0.0001;

    /// Serve launch speed (cells/s) and height (row)
    pub const SERVE_SPEED: f32 = 6.0;
    pub const SERVE_HEIGHT: f32 = 4.0;

    /// Net half-width used for ball detection (plus ball radius)
    pub const NET_HALF_WIDTH: f32 = 0.6;
    /// Net height in rows above the ground line
    pub const NET_HEIGHT: i32 = 6;

    /// Horizontal margin keeping blobs off the net and side walls
    pub const NET_MARGIN: f32 = 2.0;
}
