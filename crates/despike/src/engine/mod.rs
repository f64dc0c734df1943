//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a despike run: it validates configuration, calls
//! the noise estimator once, and drives the sweep that hands each spike group
//! to the local patcher.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Despike execution engine.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for despike runs.
pub mod output;
