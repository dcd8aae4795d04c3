//! Simulation module
//!
//! All gameplay logic lives here. It is pure and deterministic:
//! - Fixed timestep only
//! - No rendering, terminal or config dependencies
//! - State is mutated only through `handle_key_event` and `step`

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_blob_collision, ball_net_collision, ball_wall_collision, reflect_velocity};
pub use state::{Ball, Controls, Court, Game, Player, Side, Tuning};
