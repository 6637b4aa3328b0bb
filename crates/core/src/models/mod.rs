#![allow(missing_docs)]

//! Shared domain models.
//!
//! Entities reference each other through the typed handles in [`crate::ids`];
//! the [`Registry`](crate::Registry) owns the entities themselves.

use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, CourseId, InstructorId, StudentId, UserId};

/// Score recorded for a single submission.
pub type Mark = f64;

/// Identity record shared by every kind of user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    name: String,
    email: String,
}

impl User {
    /// Build an identity record.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address, stored as given.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A user who enrolls in courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    user: User,
    student_id: String,
    enrolled_courses: Vec<CourseId>,
}

impl Student {
    /// Create a student with no enrollments.
    pub fn new(user: User, student_id: impl Into<String>) -> Self {
        Self {
            user,
            student_id: student_id.into(),
            enrolled_courses: Vec::new(),
        }
    }

    /// Identity fields.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Institution-issued student number.
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Courses in enrollment order. Repeated enrollments appear repeatedly.
    pub fn enrolled_courses(&self) -> &[CourseId] {
        &self.enrolled_courses
    }

    pub(crate) fn record_enrollment(&mut self, course: CourseId) {
        self.enrolled_courses.push(course);
    }
}

/// A user who authors courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    user: User,
    employee_id: String,
    courses: Vec<CourseId>,
}

impl Instructor {
    /// Create an instructor with no courses.
    pub fn new(user: User, employee_id: impl Into<String>) -> Self {
        Self {
            user,
            employee_id: employee_id.into(),
            courses: Vec::new(),
        }
    }

    /// Identity fields.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Institution-issued employee number.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Authored courses in creation order.
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    pub(crate) fn record_course(&mut self, course: CourseId) {
        self.courses.push(course);
    }
}

/// A course taught by exactly one instructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    title: String,
    instructor: InstructorId,
    students: Vec<StudentId>,
    assignments: Vec<AssignmentId>,
}

impl Course {
    /// Create an empty course. The instructor is fixed for the course's lifetime.
    pub fn new(title: impl Into<String>, instructor: InstructorId) -> Self {
        Self {
            title: title.into(),
            instructor,
            students: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> InstructorId {
        self.instructor
    }

    /// Enrolled students in enrollment order, duplicates included.
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    pub fn assignments(&self) -> &[AssignmentId] {
        &self.assignments
    }

    /// Append a student to the roll. Does not touch the student's own list.
    pub fn add_student(&mut self, student: StudentId) {
        self.students.push(student);
    }

    /// Append an assignment. Whether it was created for this course is the caller's concern.
    pub fn add_assignment(&mut self, assignment: AssignmentId) {
        self.assignments.push(assignment);
    }
}

/// Coursework belonging to one course, collecting grades as they are submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    title: String,
    description: String,
    course: CourseId,
    grades: Vec<Grade>,
}

impl Assignment {
    /// Create an assignment bound to `course`. It is not attached to the course.
    pub fn new(title: impl Into<String>, description: impl Into<String>, course: CourseId) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            course,
            grades: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn course(&self) -> CourseId {
        self.course
    }

    /// Grades in submission order.
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Record a grade for `student`. Every call appends; earlier grades are kept.
    pub fn submit(&mut self, student: StudentId, mark: Mark) {
        self.grades.push(Grade::new(student, mark));
    }
}

/// A mark awarded to a student for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    student: StudentId,
    mark: Mark,
}

impl Grade {
    /// Pair a student with a mark.
    pub fn new(student: StudentId, mark: Mark) -> Self {
        Self { student, mark }
    }

    pub fn student(&self) -> StudentId {
        self.student
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Which dashboard a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Account {
    /// A user with no specialised role.
    Generic(UserId),
    Student(StudentId),
    Instructor(InstructorId),
}

impl From<UserId> for Account {
    fn from(id: UserId) -> Self {
        Self::Generic(id)
    }
}

impl From<StudentId> for Account {
    fn from(id: StudentId) -> Self {
        Self::Student(id)
    }
}

impl From<InstructorId> for Account {
    fn from(id: InstructorId) -> Self {
        Self::Instructor(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_lists_are_append_only_without_dedup() {
        let mut course = Course::new("Algorithms", InstructorId::from_index(0));
        let amy = StudentId::from_index(0);
        course.add_student(amy);
        course.add_student(amy);
        course.add_assignment(AssignmentId::from_index(4));

        assert_eq!(course.students(), &[amy, amy]);
        assert_eq!(course.assignments(), &[AssignmentId::from_index(4)]);
        assert_eq!(course.instructor(), InstructorId::from_index(0));
    }

    #[test]
    fn submit_keeps_earlier_grades() {
        let mut hw = Assignment::new("HW1", "Sorting", CourseId::from_index(0));
        let amy = StudentId::from_index(0);
        hw.submit(amy, 95.0);
        hw.submit(amy, 40.0);

        assert_eq!(hw.grades(), &[Grade::new(amy, 95.0), Grade::new(amy, 40.0)]);
    }

    #[test]
    fn account_serializes_with_kind_tag() {
        let account = Account::from(StudentId::from_index(2));
        let value = serde_json::to_value(account).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "student", "id": 2}));
    }
}
