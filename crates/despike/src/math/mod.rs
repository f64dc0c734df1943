//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical building blocks:
//! - Robust scale estimation (median, MAD)
//! - Least-squares polynomial fitting and evaluation
//! - Cost-function corrections for the robust background fit
//!
//! None of these know about spikes or signals.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Robust scale estimation (MAD).
pub mod scaling;

/// Polynomial least squares.
pub mod polynomial;

/// Cost functions for the background fit.
pub mod cost;
