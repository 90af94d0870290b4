//! Push Fight rules engine and Monte Carlo move planner.
//!
//! Push Fight is a two-player game on an irregular four-row grid. Each
//! side owns three pushers and two movers; a turn is up to two slide
//! moves followed by a mandatory push, and whoever first has a piece
//! shoved off the board loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, piece layout, search parameters
//! - [`board`] - Static grid geometry
//! - [`position`] - Board state, terminal detection, canonical keys
//! - [`movegen`] - Full-turn successor generation (slides plus push)
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search planner
//! - [`codec`] - Packed bit-plane encoding for persistence and transport
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use pushfight_rust::mcts;
//! use pushfight_rust::position::Position;
//!
//! let game = Position::start();
//! let reply = mcts::plan(&game, Duration::from_millis(500));
//! println!("{reply}");
//! ```

pub mod board;
pub mod codec;
pub mod constants;
pub mod mcts;
pub mod movegen;
pub mod playout;
pub mod position;
