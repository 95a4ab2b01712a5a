//! Version string comparison
//!
//! Versions are split into numeric and textual parts the way PHP's
//! `version_compare` does it: `-`, `_` and `+` act like dots and a switch
//! between digits and letters starts a new part, so `1.0rc1` reads as
//! `1 . 0 . rc . 1`. Textual parts rank `dev < alpha/a < beta/b < RC/rc <
//! number < pl/p`; unknown words rank below `dev`.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Answers "is the current version at least X" and remembers each answer
///
/// The cache belongs to the gate, so separate gates never share results.
///
/// # Example
/// ```rust,ignore
/// let gate = VersionGate::new("8.1.2");
/// assert!(gate.is_at_least("8.1"));
/// assert!(!gate.is_at_least("8.2"));
/// ```
#[derive(Debug)]
pub struct VersionGate {
    current: String,
    answers: RefCell<HashMap<String, bool>>,
}

impl VersionGate {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            answers: RefCell::new(HashMap::new()),
        }
    }

    /// Gate on the version of this crate
    pub fn crate_version() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Check if the current version is equal to or newer than `required`
    pub fn is_at_least(&self, required: &str) -> bool {
        if let Some(answer) = self.answers.borrow().get(required) {
            return *answer;
        }

        let answer = compare(&self.current, required) != Ordering::Less;
        self.answers.borrow_mut().insert(required.to_string(), answer);
        answer
    }

    /// Number of distinct requirements answered so far
    pub fn cached(&self) -> usize {
        self.answers.borrow().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Number(String),
    Word(String),
}

impl Part {
    fn rank(&self) -> i8 {
        match self {
            Part::Number(_) => 4,
            Part::Word(word) => word_rank(word),
        }
    }
}

fn word_rank(word: &str) -> i8 {
    match word {
        "dev" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "RC" | "rc" => 3,
        "#" => 4,
        "pl" | "p" => 5,
        _ => -1,
    }
}

fn split_parts(version: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut numeric = false;

    let mut flush = |current: &mut String, numeric: bool| {
        if !current.is_empty() {
            let text = std::mem::take(current);
            parts.push(if numeric {
                Part::Number(text)
            } else {
                Part::Word(text)
            });
        }
    };

    for ch in version.trim().chars() {
        if matches!(ch, '.' | '-' | '_' | '+') {
            flush(&mut current, numeric);
            continue;
        }

        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != numeric {
            flush(&mut current, numeric);
        }
        numeric = is_digit;
        current.push(ch);
    }
    flush(&mut current, numeric);

    parts
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_parts(a: &Part, b: &Part) -> Ordering {
    match (a, b) {
        (Part::Number(x), Part::Number(y)) => compare_numbers(x, y),
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Extra trailing part compared against "nothing"
fn compare_trailing(part: &Part) -> Ordering {
    match part {
        Part::Number(_) => Ordering::Greater,
        Part::Word(word) => word_rank(word).cmp(&word_rank("#")),
    }
}

/// Compare two version strings
///
/// # Example
/// ```rust,ignore
/// assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
/// assert_eq!(compare("1.0rc1", "1.0"), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = split_parts(a);
    let right = split_parts(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ordering = compare_parts(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    match left.len().cmp(&right.len()) {
        Ordering::Greater => compare_trailing(&left[right.len()]),
        Ordering::Less => compare_trailing(&right[left.len()]).reverse(),
        Ordering::Equal => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_parts() {
        assert_eq!(
            split_parts("1.0rc1"),
            vec![
                Part::Number("1".into()),
                Part::Number("0".into()),
                Part::Word("rc".into()),
                Part::Number("1".into()),
            ]
        );
        assert_eq!(split_parts("2_0-beta").len(), 3);
        assert!(split_parts("").is_empty());
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare("5.6", "5.6"), Ordering::Equal);
        assert_eq!(compare("5.6", "5.6.0"), Ordering::Less);
        assert_eq!(compare("1.0rc1", "1.0"), Ordering::Less);
        assert_eq!(compare("1.0pl1", "1.0"), Ordering::Greater);
        assert_eq!(compare("1.0-dev", "1.0-alpha"), Ordering::Less);
        assert_eq!(compare("1.0b2", "1.0RC1"), Ordering::Less);
        assert_eq!(compare("1.0.0", "1.0.0-beta"), Ordering::Greater);
        assert_eq!(compare("007", "7"), Ordering::Equal);
        assert_eq!(compare("10000000000000000000001", "9"), Ordering::Greater);
    }

    #[test]
    fn test_gate_memoizes_per_instance() {
        let gate = VersionGate::new("8.1.2");
        assert_eq!(gate.current(), "8.1.2");

        assert!(gate.is_at_least("8.1"));
        assert!(gate.is_at_least("8.1.2"));
        assert!(!gate.is_at_least("8.2"));
        assert!(gate.is_at_least("8.1"));
        assert_eq!(gate.cached(), 3);

        let other = VersionGate::new("7.4");
        assert!(!other.is_at_least("8.1"));
        assert_eq!(other.cached(), 1);
    }

    #[test]
    fn test_crate_version_gate() {
        let gate = VersionGate::crate_version();
        assert!(gate.is_at_least("0.1"));
        assert!(!gate.is_at_least("999"));
    }
}
