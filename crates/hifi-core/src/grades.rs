//! Expert letter grades.
//!
//! Third-party reviewers rank gear with letter grades. HiFinder folds them onto
//! a GPA-style scale so the scorer can compare against a numeric threshold.

/// Grade at or above which a component earns the expert bonus (B+).
pub const EXPERT_BONUS_THRESHOLD: f64 = 3.3;

/// Convert a letter grade (`"A+"`, `"B-"`, `"S"`, ...) to its numeric value.
///
/// Whitespace and case are ignored. Returns `None` for anything unrecognised.
#[must_use]
pub fn grade_to_numeric(grade: &str) -> Option<f64> {
    let g = grade.trim().to_ascii_uppercase();
    let mut chars = g.chars();
    let letter = chars.next()?;
    let modifier = chars.next();
    if chars.next().is_some() {
        return None;
    }

    let base = match letter {
        'S' => {
            return match modifier {
                Some('+') => Some(5.0),
                None => Some(4.8),
                Some('-') => Some(4.6),
                _ => None,
            };
        }
        'A' => 4.0,
        'B' => 3.0,
        'C' => 2.0,
        'D' => 1.0,
        'F' => return if modifier.is_none() { Some(0.0) } else { None },
        _ => return None,
    };

    match modifier {
        None => Some(base),
        Some('+') => Some(base + 0.3),
        Some('-') => Some(base - 0.3),
        _ => None,
    }
}
