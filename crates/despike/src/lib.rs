//! Background-aware spike removal for 1-D signals.
//!
//! Removes narrow, anomalous spikes (cosmic-ray hits, detector glitches) from
//! evenly spaced signals such as spectra, while leaving genuine wide peaks and
//! the slowly varying background untouched.
//!
//! ## How it works
//!
//! 1. A polynomial background is fitted robustly, minimising a non-quadratic
//!    cost so that peaks do not drag the fit upwards.
//! 2. The noise is the median absolute deviation (MAD) of the residuals.
//!    Samples further than `threshold` noise units from the background are
//!    "far", the rest are "near".
//! 3. Runs of consecutive far samples are spike groups. A group narrower than
//!    `length` is replaced by a low-order polynomial fitted through the near
//!    samples on either side; wider groups are real features and are kept.
//!
//! ## Quick Start
//!
//! ```rust
//! use despike::prelude::*;
//!
//! let mut signal = vec![0.0f64; 20];
//! signal[10] = 100.0;
//!
//! let report = despike(&mut signal, 3, 3.5, 2)?;
//!
//! assert_eq!(report.patched_count(), 1);
//! assert!(signal[10].abs() < 1e-9);
//! # Result::<(), DespikeError>::Ok(())
//! ```
//!
//! ### Builder
//!
//! ```rust
//! use despike::prelude::*;
//!
//! let signal: Vec<f64> = (0..64)
//!     .map(|i| 10.0 + 0.1 * i as f64 + ((i * 7) % 5) as f64 * 0.2)
//!     .collect();
//!
//! let despiker = Despike::new()
//!     .length(5)                                  // Minimum width of real peaks
//!     .threshold(3.5)                             // Far-point threshold (noise units)
//!     .order(2)                                   // Background polynomial order
//!     .cost_function(SymmetricTruncatedQuadratic) // Background cost function
//!     .max_iterations(500)                        // Background iteration cap
//!     .build()?;
//!
//! let mut cleaned = signal.clone();
//! let report = despiker.apply(&mut cleaned)?;
//! println!("{}", report);
//! # Result::<(), DespikeError>::Ok(())
//! ```
//!
//! ## Diagnostics
//!
//! Intermediate values (first MAD estimate, noise, threshold level, each
//! patched or preserved group) are emitted through the [`log`] facade at
//! `debug` level. Install any logger to see them.
//!
//! ## Minimal Usage (no_std)
//!
//! Disable default features to drop the standard library dependency; `alloc`
//! is still required.
//!
//! ```toml
//! [dependencies]
//! despike = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Mazet, V. et al. (2005). "Background removal from spectra by designing and
//!   minimising a non-quadratic cost function"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - error type and index grouping.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - background, noise and patching.
mod algorithms;

// Layer 4: Engine - orchestration and validation.
mod engine;

// High-level API.
mod api;

// Standard despike prelude.
pub mod prelude {
    pub use crate::api::{
        BackgroundFit, BackgroundOptions,
        CostFunction::{
            AsymmetricHuber, AsymmetricTruncatedQuadratic, SymmetricHuber,
            SymmetricTruncatedQuadratic,
        },
        CostFunction, DespikeBuilder as Despike, DespikeConfig, DespikeError, DespikeReport,
        Despiker, FitWindow, GroupOutcome, NoiseEstimate, Polynomial, SpikeGroup, SpikeGroups,
        despike, estimate_noise, estimate_noise_with, fit_background, fit_background_with,
        median_absolute_deviation, patch_order,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
