//! Asteroid field toy library
//!
//! A field of rotating, drifting polygons that shatter into smaller fragments
//! and a fading particle burst when clicked.  The simulation core is plain
//! data driven by [`simulation::Simulation`]; the Bevy plugins only feed it
//! input, advance it on a fixed tick and draw it.

pub mod asteroid;
pub mod asteroid_rendering;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod particles;
pub mod population;
pub mod random;
pub mod rendering;
pub mod simulation;
pub mod viewport;
