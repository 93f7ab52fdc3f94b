// src/trades/mod.rs

pub mod cooldown;
pub mod mapper;

pub use cooldown::DeviationCooldown;
pub use mapper::TradeObstacleMapper;
