// File: ./src/model/location.rs
//! Merging of `COURSE MODE (CLASSROOM)` location strings.
use crate::error::{FuseError, Result};
use crate::model::title::join_if_differs;

const OPEN: char = '(';
const CLOSE: char = ')';

fn tokens(location: &str) -> Vec<&str> {
    location.split_whitespace().collect()
}

fn unsupported(first: &str, second: &str) -> FuseError {
    FuseError::UnsupportedLocationShape {
        first: first.to_string(),
        second: second.to_string(),
    }
}

/// Removes one layer of parentheses. Unwrapped values are returned as-is.
fn unwrap_classroom(classroom: &str) -> &str {
    classroom
        .strip_prefix(OPEN)
        .and_then(|s| s.strip_suffix(CLOSE))
        .unwrap_or(classroom)
}

pub fn merge_locations(first: &str, second: &str) -> Result<String> {
    if first == second {
        return Ok(first.to_string());
    }
    let a = tokens(first);
    let b = tokens(second);
    if a.len() != b.len() {
        return Ok(format!("{}\n{}", first, second));
    }
    let ([course_a, mode_a, room_a], [course_b, mode_b, room_b]) = (a.as_slice(), b.as_slice())
    else {
        return Err(unsupported(first, second));
    };

    let classroom = if room_a == room_b {
        (*room_a).to_string()
    } else {
        format!(
            "{}{}/{}{}",
            OPEN,
            unwrap_classroom(room_a),
            unwrap_classroom(room_b),
            CLOSE
        )
    };
    Ok(format!(
        "{} {} {}",
        join_if_differs(course_a, course_b),
        join_if_differs(mode_a, mode_b),
        classroom
    ))
}

/// True when both locations belong to the same class (course and mode),
/// possibly held in different rooms.
pub fn same_location_class(first: &str, second: &str) -> Result<bool> {
    if first == second {
        return Ok(true);
    }
    let a = tokens(first);
    let b = tokens(second);
    if a.len() != b.len() {
        return Ok(false);
    }
    match (a.as_slice(), b.as_slice()) {
        ([course_a, mode_a, _], [course_b, mode_b, _]) => {
            Ok(course_a == course_b && mode_a == mode_b)
        }
        _ => Err(unsupported(first, second)),
    }
}
