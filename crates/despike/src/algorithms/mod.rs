//! Layer 3: Algorithms
//!
//! This layer implements the despiking logic proper: robust background
//! fitting, noise estimation with near/far classification, and local
//! polynomial replacement of spike groups. It is orchestrated by the engine
//! layer.

// Robust polynomial background fitting.
pub mod background;

// Noise scale and near/far partition.
pub mod noise;

// Local replacement of spike groups.
pub mod patch;
