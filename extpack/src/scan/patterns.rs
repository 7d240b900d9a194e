//! Named leak patterns.
//!
//! The pattern list is data: each [`PatternSpec`] pairs a report name with
//! a regular expression. Patterns are tested in declaration order, and the
//! configured usernames are folded into one case-insensitive pattern that
//! takes the second slot.

use super::error::ScanError;
use regex::Regex;

/// Report name for `C:\Users` prefixes.
pub const WINDOWS_USER_PATH: &str = "Windows User Path";
/// Report name for configured developer usernames.
pub const SPECIFIC_USERNAME: &str = "Specific Username";
/// Report name for `/home/<user>` prefixes.
pub const LINUX_HOME_PATH: &str = "Linux Home Path";
/// Report name for any drive-letter path.
pub const ABSOLUTE_WINDOWS_PATH: &str = "Absolute Windows Path";

/// Usernames flagged when the configuration names none.
pub const DEFAULT_USERNAMES: &[&str] = &["Straightheart"];

/// A pattern before compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    /// Name shown in reports.
    pub name: &'static str,
    /// Regular expression source.
    pub regex: &'static str,
}

/// Path patterns that precede the username pattern.
pub const LEADING_PATTERNS: &[PatternSpec] = &[PatternSpec {
    name: WINDOWS_USER_PATH,
    regex: r"(?i)c:\\Users",
}];

/// Path patterns that follow the username pattern.
pub const TRAILING_PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        name: LINUX_HOME_PATH,
        regex: r"(?i)/home/[a-z]+",
    },
    PatternSpec {
        name: ABSOLUTE_WINDOWS_PATH,
        regex: r#"[a-zA-Z]:\\[^ \t\n\r\f\v"']*"#,
    },
];

/// One compiled, named pattern.
#[derive(Debug, Clone)]
pub struct LeakPattern {
    name: String,
    regex: Regex,
}

impl LeakPattern {
    /// Compile a named pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] when `source` is not a valid regular
    /// expression.
    pub fn new(name: &str, source: &str) -> Result<Self, ScanError> {
        let regex = Regex::new(source).map_err(|err| ScanError::Pattern {
            name: name.to_owned(),
            source: err,
        })?;
        Ok(Self {
            name: name.to_owned(),
            regex,
        })
    }

    /// Name shown in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return true when the pattern occurs anywhere in `line`.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// The ordered pattern set applied to every scanned line.
///
/// # Examples
///
/// ```
/// use extpack::scan::PatternSet;
///
/// let patterns = PatternSet::new(&["alice".to_owned()]).expect("patterns compile");
/// let names: Vec<_> = patterns
///     .matching(r#"path = "C:\Users\alice\project""#)
///     .map(|pattern| pattern.name())
///     .collect();
/// assert_eq!(
///     names,
///     ["Windows User Path", "Specific Username", "Absolute Windows Path"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<LeakPattern>,
}

impl PatternSet {
    /// Compile the fixed patterns plus one pattern for `usernames`.
    ///
    /// Usernames are matched literally and case-insensitively. Blank entries
    /// are ignored, and the username pattern is omitted when none remain.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a pattern fails to compile.
    pub fn new(usernames: &[String]) -> Result<Self, ScanError> {
        let mut patterns = compile(LEADING_PATTERNS)?;
        if let Some(source) = username_regex(usernames) {
            patterns.push(LeakPattern::new(SPECIFIC_USERNAME, &source)?);
        }
        patterns.extend(compile(TRAILING_PATTERNS)?);
        Ok(Self { patterns })
    }

    /// Patterns in the order they are tested.
    #[must_use]
    pub fn patterns(&self) -> &[LeakPattern] {
        &self.patterns
    }

    /// Patterns that occur in `line`, in declaration order.
    pub fn matching<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a LeakPattern> + 'a {
        self.patterns
            .iter()
            .filter(move |pattern| pattern.is_match(line))
    }
}

fn compile(specs: &[PatternSpec]) -> Result<Vec<LeakPattern>, ScanError> {
    specs
        .iter()
        .map(|spec| LeakPattern::new(spec.name, spec.regex))
        .collect()
}

fn username_regex(usernames: &[String]) -> Option<String> {
    let alternatives: Vec<String> = usernames
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        None
    } else {
        Some(format!("(?i)(?:{})", alternatives.join("|")))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "the built-in patterns always compile")]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn patterns() -> PatternSet {
        PatternSet::new(&["Straightheart".to_owned()]).expect("default patterns compile")
    }

    fn names<'a>(patterns: &'a PatternSet, line: &'a str) -> Vec<&'a str> {
        patterns.matching(line).map(LeakPattern::name).collect()
    }

    #[rstest]
    fn declaration_order_is_stable(patterns: PatternSet) {
        let order: Vec<_> = patterns.patterns().iter().map(LeakPattern::name).collect();
        assert_eq!(
            order,
            [
                WINDOWS_USER_PATH,
                SPECIFIC_USERNAME,
                LINUX_HOME_PATH,
                ABSOLUTE_WINDOWS_PATH
            ]
        );
    }

    #[rstest]
    #[case::windows_user(r"C:\Users\bob", &[WINDOWS_USER_PATH, ABSOLUTE_WINDOWS_PATH])]
    #[case::lowercase_drive(r"c:\users\bob", &[WINDOWS_USER_PATH, ABSOLUTE_WINDOWS_PATH])]
    #[case::other_drive(r"D:\work\terminal-start", &[ABSOLUTE_WINDOWS_PATH])]
    #[case::username("owner: straightHEART", &[SPECIFIC_USERNAME])]
    #[case::linux_home("cd /home/dev/project", &[LINUX_HOME_PATH])]
    #[case::linux_home_upper("/HOME/Dev", &[LINUX_HOME_PATH])]
    #[case::clean("const root = path.resolve(__dirname, '..')", &[])]
    #[case::forward_slash_drive("C:/Users/bob", &[])]
    #[case::home_without_user("/home/", &[])]
    fn lines_match_expected_patterns(
        patterns: PatternSet,
        #[case] line: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(names(&patterns, line), expected);
    }

    #[test]
    fn usernames_are_matched_literally() {
        let patterns = PatternSet::new(&["a.b".to_owned()]).expect("compile");
        assert_eq!(names(&patterns, "user a.b"), [SPECIFIC_USERNAME]);
        assert!(names(&patterns, "user axb").is_empty());
    }

    #[test]
    fn several_usernames_share_one_pattern() {
        let patterns =
            PatternSet::new(&["alice".to_owned(), "bob".to_owned()]).expect("compile");
        assert_eq!(names(&patterns, "alice and bob"), [SPECIFIC_USERNAME]);
    }

    #[rstest]
    #[case::none(&[])]
    #[case::blank(&["  "])]
    fn username_pattern_is_omitted_without_names(#[case] usernames: &[&str]) {
        let owned: Vec<String> = usernames.iter().map(|name| (*name).to_owned()).collect();
        let patterns = PatternSet::new(&owned).expect("compile");
        assert_eq!(patterns.patterns().len(), 3);
        assert!(
            patterns
                .patterns()
                .iter()
                .all(|pattern| pattern.name() != SPECIFIC_USERNAME)
        );
    }

    #[test]
    fn invalid_regex_names_the_pattern() {
        let err = LeakPattern::new("broken", "(").expect_err("unbalanced group");
        assert!(matches!(err, ScanError::Pattern { ref name, .. } if name == "broken"));
    }
}
