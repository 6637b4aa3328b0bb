#![allow(missing_docs)]

//! Seed data describing who teaches, who attends, and what was handed in.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    ids::{CourseId, StudentId},
    models::Mark,
    registry::Registry,
};

/// A user with no specialised role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,
    pub email: String,
}

/// An instructor and the course titles they create, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorEntry {
    pub name: String,
    pub email: String,
    pub employee_id: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// A student and the course titles they enroll in, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEntry {
    pub name: String,
    pub email: String,
    pub student_id: String,
    #[serde(default)]
    pub enrollments: Vec<String>,
}

/// One graded submission, keyed by the student's institution id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub student: String,
    pub mark: Mark,
}

/// An assignment posted to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub course: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub submissions: Vec<SubmissionEntry>,
}

/// Serialized roster document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default)]
    pub instructors: Vec<InstructorEntry>,
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
}

/// Counts of what a roster added to a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub instructors: usize,
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub assignments: usize,
    pub grades: usize,
}

impl Roster {
    /// Read a roster from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster {}", path.display()))?;
        let roster = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse roster {}", path.display()))?;
        Ok(roster)
    }

    /// Dr. Lee teaches Algorithms, Amy enrolls and scores 95 on HW1.
    pub fn demo() -> Self {
        Self {
            users: vec![UserEntry {
                name: "Guest".to_string(),
                email: "guest@campus.edu".to_string(),
            }],
            instructors: vec![InstructorEntry {
                name: "Dr. Lee".to_string(),
                email: "lee@campus.edu".to_string(),
                employee_id: "E-1001".to_string(),
                courses: vec!["Algorithms".to_string()],
            }],
            students: vec![StudentEntry {
                name: "Amy".to_string(),
                email: "amy@campus.edu".to_string(),
                student_id: "S-2001".to_string(),
                enrollments: vec!["Algorithms".to_string()],
            }],
            assignments: vec![AssignmentEntry {
                course: "Algorithms".to_string(),
                title: "HW1".to_string(),
                description: "Sorting and searching".to_string(),
                submissions: vec![SubmissionEntry {
                    student: "S-2001".to_string(),
                    mark: 95.0,
                }],
            }],
        }
    }

    /// Apply the roster to `registry` in document order.
    ///
    /// Course titles and student ids referenced by the roster must be declared
    /// in it. When two courses share a title, or two students share an id,
    /// references resolve to the first. On error `registry` is left as it was.
    pub fn seed(&self, registry: &mut Registry) -> Result<SeedSummary> {
        let mut staged = registry.clone();
        let summary = self.seed_into(&mut staged)?;
        *registry = staged;
        Ok(summary)
    }

    fn seed_into(&self, registry: &mut Registry) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();
        let mut courses: HashMap<&str, CourseId> = HashMap::new();
        let mut students: HashMap<&str, StudentId> = HashMap::new();

        for entry in &self.users {
            registry.register_user(entry.name.as_str(), entry.email.as_str());
            summary.users += 1;
        }

        for entry in &self.instructors {
            let instructor = registry.register_instructor(
                entry.name.as_str(),
                entry.email.as_str(),
                entry.employee_id.as_str(),
            );
            summary.instructors += 1;
            for title in &entry.courses {
                let course = registry.create_course(instructor, title.as_str())?;
                summary.courses += 1;
                if courses.contains_key(title.as_str()) {
                    warn!(%title, "Duplicate course title; references resolve to the first");
                } else {
                    courses.insert(title.as_str(), course);
                }
            }
        }

        for entry in &self.students {
            let student = registry.register_student(
                entry.name.as_str(),
                entry.email.as_str(),
                entry.student_id.as_str(),
            );
            summary.students += 1;
            if students.contains_key(entry.student_id.as_str()) {
                warn!(
                    student_id = %entry.student_id,
                    "Duplicate student id; submissions resolve to the first"
                );
            } else {
                students.insert(entry.student_id.as_str(), student);
            }
            for title in &entry.enrollments {
                let course = lookup_course(&courses, title)
                    .with_context(|| format!("enrollment for student {}", entry.student_id))?;
                registry.enroll(student, course)?;
                summary.enrollments += 1;
            }
        }

        for entry in &self.assignments {
            let course = lookup_course(&courses, &entry.course)
                .with_context(|| format!("assignment {}", entry.title))?;
            let assignment =
                registry.new_assignment(course, entry.title.as_str(), entry.description.as_str())?;
            registry.add_assignment(course, assignment)?;
            summary.assignments += 1;
            for submission in &entry.submissions {
                let student = students
                    .get(submission.student.as_str())
                    .copied()
                    .ok_or_else(|| {
                        anyhow!(
                            "assignment {} references unknown student {}",
                            entry.title,
                            submission.student
                        )
                    })?;
                registry.submit(assignment, student, submission.mark)?;
                summary.grades += 1;
            }
        }

        info!(
            users = summary.users,
            instructors = summary.instructors,
            students = summary.students,
            courses = summary.courses,
            grades = summary.grades,
            "Roster seeded"
        );
        Ok(summary)
    }
}

fn lookup_course(courses: &HashMap<&str, CourseId>, title: &str) -> Result<CourseId> {
    courses
        .get(title)
        .copied()
        .ok_or_else(|| anyhow!("unknown course '{title}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    use crate::models::Account;

    #[test]
    fn demo_roster_builds_reference_scenario() -> Result<()> {
        let mut registry = Registry::new();
        let summary = Roster::demo().seed(&mut registry)?;
        assert_eq!(summary.courses, 1);
        assert_eq!(summary.grades, 1);

        let (lee, instructor) = registry.instructors().next().expect("instructor seeded");
        let (amy, student) = registry.students().next().expect("student seeded");
        let (algorithms, course) = registry.courses().next().expect("course seeded");
        assert_eq!(instructor.user().name(), "Dr. Lee");
        assert_eq!(course.title(), "Algorithms");
        assert_eq!(course.instructor(), lee);
        assert_eq!(course.students(), &[amy]);
        assert_eq!(student.enrolled_courses(), &[algorithms]);

        let hw1 = registry.assignment(course.assignments()[0])?;
        assert_eq!(hw1.title(), "HW1");
        assert_eq!(hw1.grades()[0].student(), amy);
        assert_eq!(hw1.grades()[0].mark(), 95.0);

        let mut out = Vec::new();
        registry.view_dashboard(Account::Student(amy), &mut out)?;
        assert_eq!(String::from_utf8(out)?, "Student Dashboard for Amy:\n - Algorithms\n");
        Ok(())
    }

    #[test]
    fn load_reads_json_and_keeps_duplicates() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("roster.json");
        let document = json!({
            "instructors": [
                {"name": "Dr. Lee", "email": "lee@uni.edu", "employee_id": "E-1",
                 "courses": ["Algorithms"]}
            ],
            "students": [
                {"name": "Amy", "email": "amy@uni.edu", "student_id": "S-1",
                 "enrollments": ["Algorithms", "Algorithms"]}
            ],
            "assignments": [
                {"course": "Algorithms", "title": "HW1",
                 "submissions": [{"student": "S-1", "mark": 80}, {"student": "S-1", "mark": 90}]}
            ]
        });
        fs::write(&path, serde_json::to_vec_pretty(&document)?)?;

        let roster = Roster::load(&path)?;
        let mut registry = Registry::new();
        let summary = roster.seed(&mut registry)?;
        assert_eq!(summary.enrollments, 2);
        assert_eq!(summary.grades, 2);
        assert_eq!(summary.users, 0);

        let (_, course) = registry.courses().next().expect("course seeded");
        assert_eq!(course.students().len(), 2);
        let hw1 = registry.assignment(course.assignments()[0])?;
        assert_eq!(hw1.description(), "");
        Ok(())
    }

    #[test]
    fn unknown_course_reference_fails() {
        let roster = Roster {
            students: vec![StudentEntry {
                name: "Amy".to_string(),
                email: "amy@uni.edu".to_string(),
                student_id: "S-1".to_string(),
                enrollments: vec!["Databases".to_string()],
            }],
            ..Roster::default()
        };

        let err = roster.seed(&mut Registry::new()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown course 'Databases'"));
    }

    #[test]
    fn unknown_submitter_fails() {
        let mut roster = Roster::demo();
        roster.assignments[0].submissions[0].student = "S-9999".to_string();

        let err = roster.seed(&mut Registry::new()).unwrap_err();
        assert!(err.to_string().contains("unknown student S-9999"));
    }

    #[test]
    fn failed_seed_leaves_registry_untouched() -> Result<()> {
        let mut registry = Registry::new();
        let lee = registry.register_instructor("Dr. Ito", "ito@uni.edu", "E-7");
        registry.create_course(lee, "Compilers")?;

        let mut roster = Roster::demo();
        roster.assignments[0].course = "Databases".to_string();
        assert!(roster.seed(&mut registry).is_err());

        assert_eq!(registry.instructors().count(), 1);
        assert_eq!(registry.courses().count(), 1);
        assert_eq!(registry.students().count(), 0);
        assert_eq!(registry.users().count(), 0);
        Ok(())
    }

    #[test]
    fn seed_appends_to_existing_registry() -> Result<()> {
        let mut registry = Registry::new();
        let lee = registry.register_instructor("Dr. Ito", "ito@uni.edu", "E-7");
        let compilers = registry.create_course(lee, "Compilers")?;

        Roster::demo().seed(&mut registry)?;
        let titles: Vec<&str> = registry.courses().map(|(_, course)| course.title()).collect();
        assert_eq!(titles, vec!["Compilers", "Algorithms"]);
        assert_eq!(registry.instructor(lee)?.courses(), &[compilers]);
        Ok(())
    }

    #[test]
    fn shared_student_id_resolves_to_first_student() -> Result<()> {
        let mut roster = Roster::demo();
        let mut twin = roster.students[0].clone();
        twin.name = "Amy B".to_string();
        twin.enrollments.clear();
        roster.students.push(twin);

        let mut registry = Registry::new();
        let summary = roster.seed(&mut registry)?;
        assert_eq!(summary.students, 2);

        let (first, _) = registry.students().next().expect("student seeded");
        let (_, course) = registry.courses().next().expect("course seeded");
        let hw1 = registry.assignment(course.assignments()[0])?;
        assert_eq!(hw1.grades().len(), 1);
        assert_eq!(hw1.grades()[0].student(), first);
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Roster::load("/nonexistent/roster.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/roster.json"));
    }
}
