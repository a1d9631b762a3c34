use chrono::{DateTime, Datelike, Utc};

/// Bucket key for the ISO 8601 week containing `timestamp`, e.g. `"2024 - 7"`.
pub fn week_key(timestamp: &DateTime<Utc>) -> String {
    let iso = timestamp.iso_week();
    format!("{} - {}", iso.year(), iso.week())
}

/// A run of digits or non-digits within a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    Text(String),
    Number(u64),
}

/// Split `key` into alternating non-digit and digit runs, digits parsed as integers.
pub fn alphanumeric_key(key: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for c in key.chars() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits && !current.is_empty() {
            segments.push(to_segment(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        segments.push(to_segment(current, in_digits));
    }
    segments
}

fn to_segment(run: String, digits: bool) -> Segment {
    if digits {
        // Runs too long for u64 fall back to text comparison.
        match run.parse() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Text(run),
        }
    } else {
        Segment::Text(run)
    }
}

/// Sort the given items the way humans expect: `"2023 - 7"` before `"2023 - 41"`.
pub fn sorted_alphanumerically<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by_cached_key(|item| alphanumeric_key(item.as_ref()));
    items
}
