//! Curated roadmaps
//!
//! A fixed catalog of hand-picked learning roadmaps, compiled into the
//! binary from `data/roadmaps.json` and served read-only.

pub mod catalog;
pub mod error;
pub mod presentation;

pub use catalog::{Roadmap, RoadmapCatalog, RoadmapResource, RoadmapStep};
pub use error::{RoadmapError, RoadmapResult};
pub use presentation::roadmap_router;
