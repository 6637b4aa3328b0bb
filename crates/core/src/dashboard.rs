//! Per-account textual dashboards.

use std::{fmt, io::Write};

use anyhow::{Context, Result};

use crate::{error::RegistryError, models::Account, registry::Registry};

const GENERIC_HEADER: &str = "Viewing generic user dashboard.";

/// Rendered dashboard: a header line followed by one line per course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// First line of output.
    pub header: String,
    /// Remaining lines, already prefixed with ` - `.
    pub lines: Vec<String>,
}

impl Dashboard {
    fn listing<'a>(header: String, titles: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            header,
            lines: titles
                .into_iter()
                .map(|title| format!(" - {title}"))
                .collect(),
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Registry {
    /// Render the dashboard for `account`.
    pub fn dashboard(&self, account: Account) -> Result<Dashboard, RegistryError> {
        let dashboard = match account {
            Account::Generic(id) => {
                self.user(id)?;
                Dashboard {
                    header: GENERIC_HEADER.to_string(),
                    lines: Vec::new(),
                }
            }
            Account::Student(id) => {
                let student = self.student(id)?;
                Dashboard::listing(
                    format!("Student Dashboard for {}:", student.user().name()),
                    self.course_titles(student.enrolled_courses())?,
                )
            }
            Account::Instructor(id) => {
                let instructor = self.instructor(id)?;
                Dashboard::listing(
                    format!("Instructor Dashboard for {}:", instructor.user().name()),
                    self.course_titles(instructor.courses())?,
                )
            }
        };
        Ok(dashboard)
    }

    /// Write the dashboard for `account` to `out`.
    pub fn view_dashboard(&self, account: Account, out: &mut impl Write) -> Result<()> {
        let dashboard = self
            .dashboard(account)
            .with_context(|| format!("failed to render dashboard for {account:?}"))?;
        write!(out, "{dashboard}").context("failed to write dashboard")
    }
}
