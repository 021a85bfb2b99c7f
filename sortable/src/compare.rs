//! Comparator registry and the built-in comparators.
//!
//! Every comparator orders two sort keys given as strings. Headers pick one
//! by tag through their `sort_type`.
//!
//! Built-in tags:
//! - `int`: base-10 integer prefix, compared numerically
//! - `float`: floating point prefix, compared numerically
//! - `string`: locale-aware ordering (root collation, tertiary strength)
//! - `string-insensitive` (alias `string-ins`): `string` ordering of the
//!   lowercased keys
//!
//! Keys the numeric comparators cannot parse compare equal to each other and
//! after every number, so a column of mixed input still sorts without error.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

/// Tag of the integer comparator.
pub const INT: &str = "int";
/// Tag of the floating point comparator.
pub const FLOAT: &str = "float";
/// Tag of the locale-aware string comparator.
pub const STRING: &str = "string";
/// Tag of the case-insensitive string comparator.
pub const STRING_INSENSITIVE: &str = "string-insensitive";
/// Short alias of [`STRING_INSENSITIVE`].
pub const STRING_INS: &str = "string-ins";

/// Root-locale collator shared by the string comparators.
static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
        .map_err(|e| log::warn!("Root collator unavailable, comparing code points: {}", e))
        .ok()
});

type CompareFn = dyn Fn(&str, &str) -> Ordering + Send + Sync;

/// A two-argument ordering over sort keys.
///
/// Comparators must impose a total order. The engine sorts with the standard
/// library's stable sort, which may panic on an inconsistent comparator.
#[derive(Clone)]
pub struct Comparator(Arc<CompareFn>);

impl Comparator {
    /// Wrap an ordering function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Compare two sort keys.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// Named comparators, keyed by type tag.
#[derive(Debug, Clone, Default)]
pub struct Comparators {
    map: HashMap<String, Comparator>,
}

impl Comparators {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in comparators.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(INT, Comparator::new(compare_int));
        registry.insert(FLOAT, Comparator::new(compare_float));
        registry.insert(STRING, Comparator::new(compare_string));
        let insensitive = Comparator::new(compare_string_insensitive);
        registry.insert(STRING_INSENSITIVE, insensitive.clone());
        registry.insert(STRING_INS, insensitive);
        registry
    }

    /// Register a comparator, replacing any existing one with the same tag.
    pub fn insert(
        &mut self,
        tag: impl Into<String>,
        comparator: Comparator,
    ) -> Option<Comparator> {
        self.map.insert(tag.into(), comparator)
    }

    /// Register a comparator (builder form).
    pub fn with<F>(mut self, tag: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        self.insert(tag, Comparator::new(f));
        self
    }

    /// Get the comparator registered under a tag.
    pub fn get(&self, tag: &str) -> Option<&Comparator> {
        self.map.get(tag)
    }

    /// Check whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }

    /// Get the comparator for a tag, falling back to `string`.
    ///
    /// Unknown tags sort as strings. If `string` itself was never registered,
    /// the built-in string ordering is used.
    pub fn resolve(&self, tag: &str) -> Comparator {
        if let Some(comparator) = self.map.get(tag) {
            return comparator.clone();
        }
        log::warn!(
            "No comparator registered for sort type '{}', sorting as string",
            tag
        );
        self.map
            .get(STRING)
            .cloned()
            .unwrap_or_else(|| Comparator::new(compare_string))
    }

    /// Merge `other` into this registry, tag by tag.
    ///
    /// Tags present in `other` replace ours; every other tag is kept.
    pub fn merge(&mut self, other: Comparators) {
        self.map.extend(other.map);
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.map.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered comparators.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no comparator is registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Built-in comparators
// -----------------------------------------------------------------------------

/// Compare two keys as base-10 integers.
pub fn compare_int(a: &str, b: &str) -> Ordering {
    compare_numbers(parse_int(a), parse_int(b))
}

/// Compare two keys as floating point numbers.
pub fn compare_float(a: &str, b: &str) -> Ordering {
    compare_numbers(parse_float(a), parse_float(b))
}

/// Compare two keys as text in locale order.
///
/// Uses the root collation at its default (tertiary) strength: accents and
/// letters sort together (`éclair` before `ocean`), lowercase sorts before
/// uppercase on otherwise equal keys, and the empty string sorts first.
/// Keys the collator considers equal are ordered by code point.
pub fn compare_string(a: &str, b: &str) -> Ordering {
    let collated = COLLATOR
        .as_ref()
        .map_or(Ordering::Equal, |collator| collator.compare(a, b));
    collated.then_with(|| a.cmp(b))
}

/// Compare two keys as text, ignoring case entirely.
pub fn compare_string_insensitive(a: &str, b: &str) -> Ordering {
    compare_string(&a.to_lowercase(), &b.to_lowercase())
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Parse the leading base-10 integer of a key.
///
/// Leading whitespace and a sign are accepted; anything after the digits is
/// ignored, so `"12px"` is 12 and `"1.9"` is 1. Returns `None` when no digit
/// follows the sign.
pub fn parse_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let sign_len = s.len() - unsigned.len();
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the leading floating point number of a key.
///
/// Accepts leading whitespace, a sign, digits with an optional fraction
/// (`".5"` and `"5."` included), an optional exponent, and `Infinity`.
/// Trailing text is ignored. Returns `None` when no number starts the key.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let sign_len = s.len() - unsigned.len();

    if unsigned.starts_with("Infinity") {
        let value = f64::INFINITY;
        return Some(if s.starts_with('-') { -value } else { value });
    }

    let bytes = unsigned.as_bytes();
    let int_digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let number = &unsigned[..end];
    let value: f64 = if number.ends_with('.') {
        number[..number.len() - 1].parse().ok()?
    } else if number.starts_with('.') {
        format!("0{number}").parse().ok()?
    } else {
        number.parse().ok()?
    };
    Some(if s[..sign_len].starts_with('-') {
        -value
    } else {
        value
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str], comparator: fn(&str, &str) -> Ordering) -> Vec<String> {
        let mut values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        values.sort_by(|a, b| comparator(a, b));
        values
    }

    #[test]
    fn test_int_ordering() {
        assert_eq!(
            sorted(&["95", "-53", "2", "195", "15"], compare_int),
            vec!["-53", "2", "15", "95", "195"]
        );
    }

    #[test]
    fn test_float_ordering() {
        assert_eq!(
            sorted(&["36", "-.18", "88.5", "-858", "-152.5"], compare_float),
            vec!["-858", "-152.5", "-.18", "36", "88.5"]
        );
    }

    #[test]
    fn test_string_ordering() {
        assert_eq!(
            sorted(&["orange", "zebra", "apple", "coke", "banana"], compare_string),
            vec!["apple", "banana", "coke", "orange", "zebra"]
        );
        assert_eq!(
            sorted(&["banana", "", "hello", "", ""], compare_string),
            vec!["", "", "", "banana", "hello"]
        );
        assert_eq!(
            sorted(&["Banana", "apple", "banana"], compare_string),
            vec!["apple", "banana", "Banana"]
        );
    }

    #[test]
    fn test_string_collates_accents_with_base_letters() {
        assert_eq!(
            sorted(&["zebra", "éclair", "apple", "Ölfass", "ocean"], compare_string),
            vec!["apple", "éclair", "ocean", "Ölfass", "zebra"]
        );
        assert_eq!(
            sorted(&["Zürich", "zoo", "Aarhus", "ångström"], compare_string_insensitive),
            vec!["Aarhus", "ångström", "zoo", "Zürich"]
        );
    }

    #[test]
    fn test_short_insensitive_tag() {
        let registry = Comparators::builtin();
        assert!(registry.contains(STRING_INS));
        assert_eq!(registry.resolve(STRING_INS).compare("Apple", "apple"), Ordering::Equal);
        assert_eq!(registry.resolve(STRING_INS).compare("éclair", "Ocean"), Ordering::Less);
    }

    #[test]
    fn test_string_insensitive_ties() {
        assert_eq!(compare_string_insensitive("Apple", "apple"), Ordering::Equal);
        assert_eq!(compare_string_insensitive("APPLE", "banana"), Ordering::Less);
        assert_ne!(compare_string("Apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int("  -53"), Some(-53.0));
        assert_eq!(parse_int("+7"), Some(7.0));
        assert_eq!(parse_int("12px"), Some(12.0));
        assert_eq!(parse_int("1.9"), Some(1.0));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("-.18"), Some(-0.18));
        assert_eq!(parse_float("88.5kg"), Some(88.5));
        assert_eq!(parse_float("5."), Some(5.0));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("2e"), Some(2.0));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("n/a"), None);
    }

    #[test]
    fn test_unparseable_numbers_sort_last() {
        assert_eq!(
            sorted(&["n/a", "3", "", "-1"], compare_int),
            vec!["-1", "3", "n/a", ""]
        );
    }

    #[test]
    fn test_merge_keeps_builtins() {
        let mut registry = Comparators::builtin();
        registry.merge(
            Comparators::new()
                .with("date", compare_int)
                .with(STRING, |a: &str, b: &str| b.cmp(a)),
        );

        assert_eq!(
            registry.tags(),
            vec![
                "date",
                "float",
                "int",
                "string",
                "string-ins",
                "string-insensitive"
            ]
        );
        assert_eq!(registry.resolve(STRING).compare("a", "b"), Ordering::Greater);
        assert_eq!(registry.resolve(INT).compare("2", "10"), Ordering::Less);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_string() {
        let registry = Comparators::builtin();
        assert!(!registry.contains("currency"));
        assert_eq!(registry.resolve("currency").compare("10", "9"), Ordering::Less);

        assert_eq!(
            Comparators::new().resolve("anything").compare("b", "a"),
            Ordering::Greater
        );
    }
}
