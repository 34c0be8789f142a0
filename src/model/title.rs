// File: ./src/model/title.rs
//! The `COURSE MODE VENUE` title grammar used by the portal export.
use crate::config::Config;
use crate::error::{FuseError, Result};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_ELEARNING_VENUE: &str = "ELEARNING";
pub const DEFAULT_LECTURE_MARKER: &str = "LEC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub course: String,
    pub mode: String,
    pub venue: String,
}

impl Title {
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        match parts.as_slice() {
            [course, mode, venue] => Ok(Self {
                course: (*course).to_string(),
                mode: (*mode).to_string(),
                venue: (*venue).to_string(),
            }),
            _ => Err(FuseError::MalformedTitle {
                title: raw.to_string(),
                tokens: parts.len(),
            }),
        }
    }

    /// Combines two titles of the same course. Differing fields are joined
    /// with `/`, first side first.
    pub fn merge(&self, other: &Title) -> Result<Title> {
        if self.course != other.course {
            return Err(FuseError::CourseMismatch {
                first: self.course.clone(),
                second: other.course.clone(),
            });
        }
        Ok(Title {
            course: self.course.clone(),
            mode: join_if_differs(&self.mode, &other.mode),
            venue: join_if_differs(&self.venue, &other.venue),
        })
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.course, self.mode, self.venue)
    }
}

pub(crate) fn join_if_differs(a: &str, b: &str) -> String {
    if a == b {
        a.to_string()
    } else {
        format!("{}/{}", a, b)
    }
}

/// Merges two raw titles into one canonical 3-field title string.
pub fn merge_titles(first: &str, second: &str) -> Result<String> {
    let a = Title::parse(first)?;
    let b = Title::parse(second)?;
    Ok(a.merge(&b)?.to_string())
}

/// Renders titles into their display form using a course-name table.
#[derive(Debug, Clone)]
pub struct TitleCodec {
    courses: BTreeMap<String, String>,
    elearning_venue: String,
    lecture_marker: String,
}

impl Default for TitleCodec {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TitleCodec {
    pub fn new(courses: BTreeMap<String, String>) -> Self {
        Self {
            courses,
            elearning_venue: DEFAULT_ELEARNING_VENUE.to_string(),
            lecture_marker: DEFAULT_LECTURE_MARKER.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            courses: config.courses.clone(),
            elearning_venue: config.elearning_venue.clone(),
            lecture_marker: config.lecture_marker.clone(),
        }
    }

    pub fn courses(&self) -> &BTreeMap<String, String> {
        &self.courses
    }

    pub fn parse(&self, raw: &str) -> Result<Title> {
        Title::parse(raw)
    }

    /// Full course name, or the raw code when the table has no entry.
    pub fn course_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.courses.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn render(&self, title: &Title) -> String {
        let name = self.course_name(&title.course);
        if title.venue != self.elearning_venue {
            format!("({}) {} [{}]", title.mode, name, title.venue)
        } else if title.mode.contains(&self.lecture_marker) {
            format!("(ELEARN) {}", name)
        } else {
            format!("(ELEARN) {} [{}]", name, title.mode)
        }
    }

    pub fn render_raw(&self, raw: &str) -> Result<String> {
        Ok(self.render(&self.parse(raw)?))
    }
}
