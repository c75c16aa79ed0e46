//! # Sim Engine (engine layer)
//!
//! Path-simulation engine for synthetic market data.
//!
//! This crate drives the models from `sim_models` across day intervals:
//!
//! - [`rng::PathRng`]: seeded random source (independent and correlated draws)
//! - [`grid::SimulationInterval`]: day interval with derived step grid
//! - [`config::SimConfig`]: per-run configuration (seed, sub-steps, policy)
//! - [`runner`]: bulk and lazy path generation with connected-interval seeding
//! - [`ohlc`]: intra-day sub-stepping aggregated into daily OHLC bars
//! - [`chain`]: multi-interval driver threading terminal state
//!
//! # Architecture
//!
//! ```text
//! simulate / PathIter
//! ├── SimConfig           (seed, steps per day, crash-window policy)
//! ├── SimulationInterval  (dt, step count, day checkpoints)
//! ├── PathRng             (random number generation)
//! └── ModelParams         (GBM or Heston step dynamics)
//! ```
//!
//! # Reproducibility
//!
//! Every run takes an explicit seed (or a caller-supplied [`rng::PathRng`]),
//! so the same `(params, interval, seed)` triple always produces bit-identical
//! output. Independent paths are parallelised by the caller with one generator
//! per path; the engine holds no shared mutable state.
//!
//! # Examples
//!
//! ```rust
//! use sim_engine::config::SimConfig;
//! use sim_engine::grid::SimulationInterval;
//! use sim_engine::runner::simulate;
//! use sim_models::{GbmParams, ModelParams};
//!
//! let model = ModelParams::Gbm(GbmParams::new(100.0, 0.05, 0.2));
//! let interval = SimulationInterval::new(0, 10).unwrap();
//! let config = SimConfig::builder().seed(42).build().unwrap();
//!
//! let result = simulate(&model, interval, &config, None).unwrap();
//! assert_eq!(result.samples.len(), 10);
//! assert_eq!(result.samples[0].day, 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod chain;
pub mod config;
pub mod error;
pub mod grid;
pub mod ohlc;
pub mod rng;
pub mod runner;
pub mod sample;

pub use chain::{run_chain, ChainResult, IntervalSpec};
pub use config::SimConfig;
pub use error::EngineError;
pub use grid::SimulationInterval;
pub use ohlc::{simulate_ohlc, OhlcResult};
pub use rng::PathRng;
pub use runner::{simulate, simulate_with_rng, PathIter};
pub use sample::{OhlcBar, PathSample, SimulationResult};
