#![warn(clippy::all, missing_docs)]

//! Core domain logic for the campus course-management model.
//!
//! This crate hosts the entity models, the registry that owns and links
//! them, per-account dashboards, roster seeding, and configuration
//! handling used by the `campus` binary.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod models;
pub mod registry;
pub mod roster;

pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use error::RegistryError;
pub use ids::{AssignmentId, CourseId, InstructorId, StudentId, UserId};
pub use models::{Account, Assignment, Course, Grade, Instructor, Mark, Student, User};
pub use registry::Registry;
pub use roster::{Roster, SeedSummary};
