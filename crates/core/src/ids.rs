//! Typed handles into the [`Registry`](crate::Registry) arenas.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index)
            }

            /// Position of the entity in its arena.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a generic user without a specialised role.
    UserId,
    "user"
);
define_id!(
    /// Handle to a registered student.
    StudentId,
    "student"
);
define_id!(
    /// Handle to a registered instructor.
    InstructorId,
    "instructor"
);
define_id!(
    /// Handle to a course.
    CourseId,
    "course"
);
define_id!(
    /// Handle to an assignment.
    AssignmentId,
    "assignment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        assert_eq!(StudentId::from_index(3).to_string(), "student#3");
        assert_eq!(CourseId::from_index(0).to_string(), "course#0");
    }

    #[test]
    fn serializes_as_bare_index() {
        let id = AssignmentId::from_index(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: AssignmentId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
