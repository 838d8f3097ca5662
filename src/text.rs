//! Text helpers: case conversion, cleaning and identifier formatting.
//!
//! Word boundaries in camel-case input are found with two rewrite rules,
//! applied in order:
//!
//! 1. any character followed by an upper-case letter and a lower-case run
//!    (`xWord` → `x_Word`);
//! 2. a lower-case letter or digit followed by an upper-case letter
//!    (`aB` → `a_B`), which splits acronym tails such as `getHTTP`.

use std::sync::LazyLock;

use regex::Regex;

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));

const SEPARATORS: [char; 3] = ['_', '-', ' '];

// ---------------------------------------------------------------------------
// Case conversions
// ---------------------------------------------------------------------------

/// Converts `snake_case` to `camelCase`.
///
/// The first segment is kept verbatim; each following segment is
/// title-cased and appended.
///
/// # Examples
/// ```
/// use shared_utils::text::snake_to_camel;
/// assert_eq!(snake_to_camel("hello_world"), "helloWorld");
/// assert_eq!(snake_to_camel(""), "");
/// ```
pub fn snake_to_camel(text: &str) -> String {
    let mut parts = text.split('_');
    let mut out = parts.next().unwrap_or_default().to_owned();
    for part in parts {
        out.push_str(&to_title(part));
    }
    out
}

/// Converts `CamelCase` or `camelCase` to `snake_case`.
///
/// Existing separators are left in place, so mixed input like
/// `"Hello-World"` keeps its dash. Use [`to_snake`] for a fully
/// normalized identifier.
///
/// # Examples
/// ```
/// use shared_utils::text::camel_to_snake;
/// assert_eq!(camel_to_snake("HelloWorld"), "hello_world");
/// assert_eq!(camel_to_snake("helloWorldExample"), "hello_world_example");
/// assert_eq!(camel_to_snake("getHTTPResponse"), "get_http_response");
/// ```
pub fn camel_to_snake(text: &str) -> String {
    let marked = WORD_START.replace_all(text, "${1}_${2}");
    LOWER_UPPER
        .replace_all(&marked, "${1}_${2}")
        .to_lowercase()
}

pub fn to_upper(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lower(text: &str) -> String {
    text.to_lowercase()
}

/// Title-cases `text`: the first letter of every alphabetic run is
/// upper-cased and the rest of the run lower-cased.
///
/// Any non-alphabetic character (space, digit, apostrophe, ...) starts a new
/// run.
///
/// # Examples
/// ```
/// use shared_utils::text::to_title;
/// assert_eq!(to_title("hello world"), "Hello World");
/// assert_eq!(to_title("mIxEd_case"), "Mixed_Case");
/// ```
pub fn to_title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Removes every space character.
pub fn remove_blanks(text: &str) -> String {
    text.replace(' ', "")
}

/// Removes every `-`.
pub fn remove_dashes(text: &str) -> String {
    text.replace('-', "")
}

/// Keeps only ASCII letters, digits and `_`.
///
/// # Examples
/// ```
/// use shared_utils::text::remove_special_chars;
/// assert_eq!(remove_special_chars("a!@#b$%^c"), "abc");
/// assert_eq!(remove_special_chars("123_abc"), "123_abc");
/// ```
pub fn remove_special_chars(text: &str) -> String {
    SPECIAL.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Format conversions
// ---------------------------------------------------------------------------

/// Converts any mix of camel case, dashes, spaces and underscores to
/// `snake_case`, collapsing runs of separators into one `_`.
///
/// # Examples
/// ```
/// use shared_utils::text::to_snake;
/// assert_eq!(to_snake("HelloWorld-Test"), "hello_world_test");
/// assert_eq!(to_snake("some value"), "some_value");
/// ```
pub fn to_snake(text: &str) -> String {
    join_words(text, "_")
}

/// Like [`to_snake`], joined with `-`.
///
/// # Examples
/// ```
/// use shared_utils::text::to_kebab;
/// assert_eq!(to_kebab("HelloWorld_Test"), "hello-world-test");
/// ```
pub fn to_kebab(text: &str) -> String {
    join_words(text, "-")
}

/// Reverses `text` by Unicode scalar value.
pub fn to_reverse(text: &str) -> String {
    text.chars().rev().collect()
}

fn join_words(text: &str, sep: &str) -> String {
    camel_to_snake(text)
        .split(SEPARATORS)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn reverse_is_involution(s in "\\PC{0,40}") {
            prop_assert_eq!(to_reverse(&to_reverse(&s)), s);
        }

        #[test]
        fn special_chars_removed(s in "\\PC{0,40}") {
            let cleaned = remove_special_chars(&s);
            prop_assert!(cleaned.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }

        #[test]
        fn snake_and_kebab_have_single_separators(s in "[A-Za-z0-9 _-]{0,40}") {
            let snake = to_snake(&s);
            prop_assert!(!snake.contains('-') && !snake.contains(' '));
            prop_assert!(!snake.contains("__"));
            prop_assert!(!snake.starts_with('_') && !snake.ends_with('_'));
            let kebab = to_kebab(&s);
            prop_assert!(!kebab.contains('_') && !kebab.contains("--"));
            prop_assert_eq!(kebab.replace('-', "_"), snake);
        }
    }
}
