//! # kcluster - API documentation
//!
//! kcluster is a small rust library that partitions N-dimensional numeric
//! data into k clusters by iterative centroid refinement (Lloyd's
//! k-means algorithm).
//!
//! ## Design target
//! The crate is meant as a reusable analytical engine with a plain API
//! surface: observations are handed over as one flat row-major buffer
//! together with their dimensionality ("stride"), instead of going
//! through a high-level arithmetics / matrix crate such as nalgebra or
//! ndarray. The engine owns the ingested points and the current
//! centroids, and exposes every step of the algorithm individually, so
//! drivers can either run the packaged convergence loop or orchestrate
//! the steps themselves.
//!
//! ## Step API
//! - [`ClusterEngine::ingest`]: load points (append-only, validated).
//! - [`ClusterEngine::set_cluster_count`]: choose k (defaults to the
//!   stride, which is rarely what you want).
//! - [`ClusterEngine::initialize_centroids`]: seed k centroids uniformly
//!   inside the data's per-dimension bounding box.
//! - [`ClusterEngine::assign_points`] / [`ClusterEngine::update_centroids`]:
//!   one Lloyd round; [`ClusterEngine::moved_count`] reaching zero
//!   signals convergence.
//! - [`ClusterEngine::converge`]: the canonical loop with a round cap.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kcluster::*;
//!
//! fn main() -> kcluster::Result<()> {
//!     let (point_cnt, stride, k, max_rounds) = (200, 3, 4, 100);
//!
//!     // Generate some random data
//!     let mut data = vec![0.0f64; point_cnt * stride];
//!     data.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let mut engine = ClusterEngine::new();
//!     engine.ingest(&data, stride)?;
//!     engine.set_cluster_count(k)?;
//!
//!     let config = EngineConfig::default();
//!     engine.initialize_centroids(&config)?;
//!     let outcome = engine.converge(max_rounds, &config)?;
//!
//!     println!("Rounds: {} ({:?})", outcome.rounds, outcome.termination);
//!     println!("Centroids: {:?}", engine.centroids());
//!     println!("Assignments: {:?}", engine.assignments());
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kcluster::*;
//!
//! fn main() -> kcluster::Result<()> {
//!     let (point_cnt, stride, k, max_rounds) = (200, 3, 4, 100);
//!
//!     // Generate some random data
//!     let mut data = vec![0.0f64; point_cnt * stride];
//!     data.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let config = EngineConfig::build()
//!         .init_done(&|_| println!("Initialization completed."))
//!         .round_done(&|engine, round, moved|
//!             println!("Round {} - Moved: {} | Distortion: {:?}",
//!                 round, moved, engine.total_distortion()))
//!         .build();
//!
//!     let mut engine = ClusterEngine::new();
//!     engine.ingest(&data, stride)?;
//!     engine.set_cluster_count(k)?;
//!     engine.initialize_centroids(&config)?;
//!     let outcome = engine.converge(max_rounds, &config)?;
//!
//!     println!("Converged after {} rounds ({:?})", outcome.rounds, outcome.termination);
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry point of the library is the [`ClusterEngine`] struct, generic
//! over the underlying primitive type. An engine instance exclusively
//! owns its point and centroid stores for its whole lifetime; every
//! mutating step takes `&mut self`, so the borrow checker serializes
//! the steps of a run. Behavior knobs (random number generator,
//! status callbacks, empty-cluster policy, minimum centroid separation,
//! early stopping) are collected in [`EngineConfig`], built via
//! [`EngineConfig::build`]. Fallible operations return this crate's
//! [`Result`]; calling a step before its preconditions are established
//! yields [`Error::NotReady`] rather than silently doing nothing.

#[macro_use]
mod helpers;
mod centroids;
mod config;
mod distance;
mod engine;
mod error;
mod init;
mod lloyd;
mod points;
mod primitive;
mod stop_rule;

pub use config::{EmptyClusterPolicy, EngineConfig, EngineConfigBuilder, InitDoneCallbackFn, RoundDoneCallbackFn};
pub use distance::squared_euclidean;
pub use engine::ClusterEngine;
pub use error::{Error, Result};
pub use lloyd::{Convergence, Termination};
pub use primitive::Primitive;
pub use stop_rule::StopRule;
