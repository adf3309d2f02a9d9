//! City Simulation Library
//!
//! A grid-city traffic and pedestrian micro-simulation that runs headless;
//! consumers read per-tick agent snapshots and do their own drawing.

pub mod simulation;
