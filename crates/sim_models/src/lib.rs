//! # Sim Models (model layer)
//!
//! Stochastic model dynamics for synthetic price-path generation.
//!
//! This crate provides:
//! - Parameter records with fail-fast validation (GBM, Heston)
//! - Per-step update rules (exact log-normal GBM, full-truncation Heston)
//! - The bubble/crash regime schedule for the Heston model
//! - A static-dispatch enum over the supported models
//!
//! ## Design Principles
//!
//! - **Pure step functions**: models consume random draws, they never own
//!   a generator — randomness lives in the engine layer
//! - **Enum-based dispatch** over the two models, no trait objects
//! - **Validate before stepping**: every invariant is checked up front so
//!   a run never emits a partial, inconsistent path

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod gbm;
pub mod heston;
pub mod model_enum;
pub mod regime;

pub use error::ModelError;
pub use gbm::{GbmModel, GbmParams};
pub use heston::{HestonModel, HestonParams};
pub use model_enum::{ModelParams, ModelState};
pub use regime::{CrashWindowPolicy, RegimeSchedule};
