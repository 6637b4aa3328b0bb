//! Errors raised by [`Registry`](crate::Registry) lookups.

use thiserror::Error;

use crate::ids::{AssignmentId, CourseId, InstructorId, StudentId, UserId};

/// A handle did not resolve to an entity in this registry.
///
/// Handles are only minted by a registry, so these arise when a handle from
/// one registry is used against another.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No generic user with this handle.
    #[error("unknown {0}")]
    UnknownUser(UserId),
    /// No student with this handle.
    #[error("unknown {0}")]
    UnknownStudent(StudentId),
    /// No instructor with this handle.
    #[error("unknown {0}")]
    UnknownInstructor(InstructorId),
    /// No course with this handle.
    #[error("unknown {0}")]
    UnknownCourse(CourseId),
    /// No assignment with this handle.
    #[error("unknown {0}")]
    UnknownAssignment(AssignmentId),
}

/// Result alias for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
