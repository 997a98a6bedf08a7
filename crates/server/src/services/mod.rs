//! Business logic services for the API server.
//!
//! # Services
//!
//! - `coach` - Focus scoring and model-backed coaching (suggestions,
//!   study plans)

pub mod coach;

pub use coach::CoachService;
