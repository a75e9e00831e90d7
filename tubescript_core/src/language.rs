use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Ordered list of language codes, most preferred first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct LanguagePreference(Vec<String>);

impl From<Vec<String>> for LanguagePreference {
    fn from(codes: Vec<String>) -> Self {
        Self::new(codes, DEFAULT_LANGUAGE)
    }
}

impl LanguagePreference {
    /// Build a preference list from raw codes.
    ///
    /// Codes are trimmed, blanks dropped and duplicates removed (first occurrence
    /// kept). If nothing is left the list becomes `[fallback]`.
    pub fn new<I, S>(codes: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() || out.iter().any(|c| c == code) {
                continue;
            }
            out.push(code.to_string());
        }

        if out.is_empty() {
            let fallback = fallback.trim();
            let fallback = if fallback.is_empty() {
                DEFAULT_LANGUAGE
            } else {
                fallback
            };
            out.push(fallback.to_string());
        }

        Self(out)
    }

    /// The most preferred language.
    pub fn primary(&self) -> &str {
        // Non-empty by construction.
        &self.0[0]
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Comma-joined codes, as used in user-facing messages.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self(vec![DEFAULT_LANGUAGE.to_string()])
    }
}
