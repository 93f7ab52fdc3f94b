// src/simulators/mod.rs

pub mod flight;
pub mod tick_loop;
pub mod tween;

pub use flight::{Collider, Flight, FlightEvent, Phase};
pub use tick_loop::TickLoop;
pub use tween::{Easing, Tween};
