//! Signal processing applied to raw pointer input
//!
//! The pointer is smoothed with a damped spring before the particle field
//! reads it, decoupling the simulation from the event arrival rate.

pub mod spring;

pub use spring::{Spring2D, SpringState};
