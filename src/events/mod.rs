// src/events/mod.rs

pub mod generator;

pub use generator::EventGenerator;
