//! Central store for every entity, plus the operations that link them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{RegistryError, Result},
    ids::{AssignmentId, CourseId, InstructorId, StudentId, UserId},
    models::{Account, Assignment, Course, Instructor, Mark, Student, User},
};

/// Insertion-ordered arenas of users, courses, and assignments.
///
/// Nothing is ever removed, so a handle stays valid for the registry's
/// lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    users: Vec<User>,
    students: Vec<Student>,
    instructors: Vec<Instructor>,
    courses: Vec<Course>,
    assignments: Vec<Assignment>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with no specialised role.
    pub fn register_user(&mut self, name: impl Into<String>, email: impl Into<String>) -> UserId {
        let id = UserId::from_index(self.users.len());
        self.users.push(User::new(name, email));
        debug!(user = %id, "User registered");
        id
    }

    /// Register a student with no enrollments.
    pub fn register_student(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        student_id: impl Into<String>,
    ) -> StudentId {
        let id = StudentId::from_index(self.students.len());
        self.students
            .push(Student::new(User::new(name, email), student_id));
        debug!(student = %id, "Student registered");
        id
    }

    /// Register an instructor with no courses.
    pub fn register_instructor(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        employee_id: impl Into<String>,
    ) -> InstructorId {
        let id = InstructorId::from_index(self.instructors.len());
        self.instructors
            .push(Instructor::new(User::new(name, email), employee_id));
        debug!(instructor = %id, "Instructor registered");
        id
    }

    /// Create a course taught by `instructor` and append it to their course list.
    pub fn create_course(
        &mut self,
        instructor: InstructorId,
        title: impl Into<String>,
    ) -> Result<CourseId> {
        let id = CourseId::from_index(self.courses.len());
        let owner = self
            .instructors
            .get_mut(instructor.index())
            .ok_or(RegistryError::UnknownInstructor(instructor))?;
        let course = Course::new(title, instructor);
        debug!(%instructor, course = %id, title = %course.title(), "Course created");
        owner.record_course(id);
        self.courses.push(course);
        Ok(id)
    }

    /// Enroll `student` in `course`, recording the link on both sides.
    ///
    /// Either both lists grow or, when a handle is unknown, neither does.
    /// Enrolling twice records the enrollment twice.
    pub fn enroll(&mut self, student: StudentId, course: CourseId) -> Result<()> {
        let target = self
            .courses
            .get_mut(course.index())
            .ok_or(RegistryError::UnknownCourse(course))?;
        let enrollee = self
            .students
            .get_mut(student.index())
            .ok_or(RegistryError::UnknownStudent(student))?;
        enrollee.record_enrollment(course);
        target.add_student(student);
        debug!(%student, %course, "Student enrolled");
        Ok(())
    }

    /// Append `student` to the course roll only. Prefer [`Registry::enroll`].
    pub fn add_student(&mut self, course: CourseId, student: StudentId) -> Result<()> {
        self.student(student)?;
        self.course_mut(course)?.add_student(student);
        debug!(%student, %course, "Student added to course roll");
        Ok(())
    }

    /// Create an assignment belonging to `course`.
    ///
    /// The course's assignment list is untouched; attach it with
    /// [`Registry::add_assignment`].
    pub fn new_assignment(
        &mut self,
        course: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<AssignmentId> {
        self.course(course)?;
        let id = AssignmentId::from_index(self.assignments.len());
        self.assignments
            .push(Assignment::new(title, description, course));
        debug!(assignment = %id, %course, "Assignment created");
        Ok(id)
    }

    /// Attach `assignment` to `course`. The assignment's own course is not compared.
    pub fn add_assignment(&mut self, course: CourseId, assignment: AssignmentId) -> Result<()> {
        self.assignment(assignment)?;
        self.course_mut(course)?.add_assignment(assignment);
        debug!(%assignment, %course, "Assignment attached");
        Ok(())
    }

    /// Record `mark` for `student` on `assignment`.
    ///
    /// Enrollment is not checked and resubmissions add further grades.
    pub fn submit(&mut self, assignment: AssignmentId, student: StudentId, mark: Mark) -> Result<()> {
        self.student(student)?;
        self.assignments
            .get_mut(assignment.index())
            .ok_or(RegistryError::UnknownAssignment(assignment))?
            .submit(student, mark);
        debug!(%assignment, %student, mark, "Grade submitted");
        Ok(())
    }

    /// Look up a generic user.
    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .get(id.index())
            .ok_or(RegistryError::UnknownUser(id))
    }

    /// Look up a student.
    pub fn student(&self, id: StudentId) -> Result<&Student> {
        self.students
            .get(id.index())
            .ok_or(RegistryError::UnknownStudent(id))
    }

    /// Look up an instructor.
    pub fn instructor(&self, id: InstructorId) -> Result<&Instructor> {
        self.instructors
            .get(id.index())
            .ok_or(RegistryError::UnknownInstructor(id))
    }

    /// Look up a course.
    pub fn course(&self, id: CourseId) -> Result<&Course> {
        self.courses
            .get(id.index())
            .ok_or(RegistryError::UnknownCourse(id))
    }

    /// Look up an assignment.
    pub fn assignment(&self, id: AssignmentId) -> Result<&Assignment> {
        self.assignments
            .get(id.index())
            .ok_or(RegistryError::UnknownAssignment(id))
    }

    fn course_mut(&mut self, id: CourseId) -> Result<&mut Course> {
        self.courses
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownCourse(id))
    }

    /// Generic users in registration order.
    pub fn users(&self) -> impl Iterator<Item = (UserId, &User)> + '_ {
        self.users
            .iter()
            .enumerate()
            .map(|(index, user)| (UserId::from_index(index), user))
    }

    /// Students in registration order.
    pub fn students(&self) -> impl Iterator<Item = (StudentId, &Student)> + '_ {
        self.students
            .iter()
            .enumerate()
            .map(|(index, student)| (StudentId::from_index(index), student))
    }

    /// Instructors in registration order.
    pub fn instructors(&self) -> impl Iterator<Item = (InstructorId, &Instructor)> + '_ {
        self.instructors
            .iter()
            .enumerate()
            .map(|(index, instructor)| (InstructorId::from_index(index), instructor))
    }

    /// Courses in creation order.
    pub fn courses(&self) -> impl Iterator<Item = (CourseId, &Course)> + '_ {
        self.courses
            .iter()
            .enumerate()
            .map(|(index, course)| (CourseId::from_index(index), course))
    }

    /// Every account: generic users, then instructors, then students.
    pub fn accounts(&self) -> Vec<Account> {
        self.users()
            .map(|(id, _)| Account::Generic(id))
            .chain(self.instructors().map(|(id, _)| Account::Instructor(id)))
            .chain(self.students().map(|(id, _)| Account::Student(id)))
            .collect()
    }

    /// Titles for the given courses, in the order given.
    pub fn course_titles(&self, courses: &[CourseId]) -> Result<Vec<&str>> {
        courses
            .iter()
            .map(|id| self.course(*id).map(Course::title))
            .collect()
    }
}
