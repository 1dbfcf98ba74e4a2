#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Territory scoring and stratification engine.
//!
//! Turns raw roster records into fully enriched [`Facility`] values:
//!
//! 1. [`normalize`] types and defaults every recognized column.
//! 2. [`epidemiology`] estimates per-condition volumes for the catchment, and
//!    [`revenue`] annualizes year-to-date revenue as of an explicit date.
//! 3. [`scoring`] computes a bounded composite score with one of two
//!    [`ScoringStrategy`] implementations.
//! 4. [`tiering`] splits the ranked set into three tiers.
//! 5. [`travel`] finds the nearest team base and buckets access difficulty.
//!
//! [`Engine`] runs the stages in order and returns a [`TerritoryReport`].
//! Every operation is infallible: bad cells default, they never abort a run.

pub mod epidemiology;
pub mod normalize;
pub mod pipeline;
pub mod revenue;
pub mod scoring;
pub mod summary;
pub mod tiering;
pub mod travel;

pub use epidemiology::EpidemiologyEstimator;
pub use pipeline::{Engine, TerritoryReport};
pub use scoring::{CommercialStrategy, InfrastructureStrategy, ScoringStrategy};
pub use summary::TerritorySummary;
pub use territory_map_facility_models::Facility;
