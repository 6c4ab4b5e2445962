//! Lazily-compiled static regex patterns.

/// Declare a module-private function returning `&'static regex::Regex`,
/// compiled on first access and cached in a `OnceLock`.
///
/// The calling module must have `use regex::Regex;` in scope. An invalid
/// pattern panics on first use with the pattern text in the message.
///
/// ```ignore
/// use regex::Regex;
/// use crate::regex_util::static_regex;
///
/// static_regex!(fn literal_strong, r"\*\*([^*]*?)\*\*");
///
/// assert!(literal_strong().is_match("**粗体**"));
/// ```
macro_rules! static_regex {
    (fn $fname:ident, $pattern:expr) => {
        fn $fname() -> &'static Regex {
            static STORE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
            STORE.get_or_init(|| {
                Regex::new($pattern).expect(concat!("BUG: invalid static regex: ", $pattern))
            })
        }
    };
}
pub(crate) use static_regex;
