//! Version banner grammars
//!
//! A GraalVM image prints a three line banner for `-version`. Two grammars
//! describe what the gate accepts: [`VersionGrammar::Open`] requires OpenJDK
//! vendor and runtime labels, [`VersionGrammar::Permissive`] also accepts the
//! commercial `java` / `Java(TM) SE` labels common on developer machines.
//!
//! Both patterns are anchored at the start of the text. Anything after the
//! banner is ignored.

use regex::Regex;
use std::sync::LazyLock;

const OPEN_PATTERN: &str = concat!(
    r#"^openjdk version "(?P<java_version>[0-9_.]+)"\n"#,
    r"OpenJDK Runtime Environment \(build [0-9a-z_+\-.]+\)\n",
    r"GraalVM (?P<graalvm_version>[0-9a-z_\-.]+) \(build [0-9a-z_+\-.]+, mixed mode\)",
);

const PERMISSIVE_PATTERN: &str = concat!(
    r#"^(?:openjdk|java) version "(?P<java_version>[0-9_.]+)"\n"#,
    r"(?:OpenJDK|Java\(TM\) SE) Runtime Environment \(build [0-9a-z_+\-.]+\)\n",
    r"GraalVM (?P<graalvm_version>[0-9a-z_\-.]+) \(build [0-9a-z_+\-.]+, mixed mode\)",
);

static OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OPEN_PATTERN).expect("open banner pattern is valid"));

static PERMISSIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PERMISSIVE_PATTERN).expect("permissive banner pattern is valid"));

/// Which banner grammar is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGrammar {
    /// OpenJDK vendor and runtime labels only
    Open,
    /// OpenJDK or commercial JDK labels
    Permissive,
}

impl std::fmt::Display for VersionGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionGrammar::Open => write!(f, "open"),
            VersionGrammar::Permissive => write!(f, "permissive"),
        }
    }
}

/// Fields captured from a banner that matched a grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerMatch<'a> {
    /// Java version from the first line, e.g. `17.0.1`
    pub java_version: &'a str,
    /// GraalVM release identifier from the third line, e.g. `22.3.0`
    pub release: &'a str,
}

impl VersionGrammar {
    /// The grammar that decides pass/fail for a run
    pub fn authoritative(strict_mode: bool) -> Self {
        if strict_mode {
            VersionGrammar::Open
        } else {
            VersionGrammar::Permissive
        }
    }

    /// The grammar consulted when the authoritative one fails, used only to
    /// tell a vendor-policy violation apart from malformed output
    pub fn diagnostic_fallback(self) -> Option<Self> {
        match self {
            VersionGrammar::Open => Some(VersionGrammar::Permissive),
            VersionGrammar::Permissive => None,
        }
    }

    /// Pattern text, as shown in diagnostics
    pub fn pattern(self) -> &'static str {
        match self {
            VersionGrammar::Open => OPEN_PATTERN,
            VersionGrammar::Permissive => PERMISSIVE_PATTERN,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            VersionGrammar::Open => &OPEN_REGEX,
            VersionGrammar::Permissive => &PERMISSIVE_REGEX,
        }
    }

    /// Match `text` from its first byte
    pub fn parse(self, text: &str) -> Option<BannerMatch<'_>> {
        let caps = self.regex().captures(text)?;
        Some(BannerMatch {
            java_version: caps.name("java_version")?.as_str(),
            release: caps.name("graalvm_version")?.as_str(),
        })
    }

    pub fn matches(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}
