//! Keyword Normalizer: canonicalizes raw skill strings into `SkillKeyword`s.
//!
//! Rules, in order: NFKC compatibility folding (full-width forms, ligatures),
//! strip zero-width format characters, trim + collapse whitespace, lower-case,
//! alias lookup, reject tokens with no visible character.
//!
//! The alias table is an explicit, immutable value handed to the normalizer at
//! construction. Loading an overlay file happens once at startup.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Built-in aliases: (canonical, &[aliases]).
const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "java script", "ecmascript", "es6"]),
    ("typescript", &["ts", "type script"]),
    ("nodejs", &["node.js", "node js", "node"]),
    ("react", &["reactjs", "react.js", "react js"]),
    ("vue", &["vuejs", "vue.js", "vue js"]),
    ("angular", &["angularjs", "angular.js"]),
    ("nextjs", &["next.js", "next js"]),
    ("express", &["expressjs", "express.js"]),
    ("postgresql", &["postgres", "postgre sql"]),
    ("mysql", &["my sql"]),
    ("mongodb", &["mongo", "mongo db"]),
    ("python", &["python3", "python 3", "py"]),
    ("csharp", &["c#", "c sharp"]),
    ("cplusplus", &["c++", "cpp"]),
    ("golang", &["go", "go lang"]),
    ("kubernetes", &["k8s", "kube"]),
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud platform", "google cloud"]),
    ("azure", &["microsoft azure"]),
    ("machine learning", &["ml"]),
    ("ci/cd", &["cicd", "ci cd"]),
];

// ────────────────────────────────────────────────────────────────────────────
// SkillKeyword
// ────────────────────────────────────────────────────────────────────────────

/// A normalized skill token. Only `KeywordNormalizer` can mint one, so every
/// value is trimmed, lower-cased and alias-resolved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SkillKeyword(String);

impl SkillKeyword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AliasTable
// ────────────────────────────────────────────────────────────────────────────

/// Alias → canonical lookup. Keys and values are stored folded
/// (whitespace-collapsed, lower-case).
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

/// On-disk overlay format: a flat JSON object `{ "alias": "canonical" }`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct AliasFile(HashMap<String, String>);

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table covering common abbreviations and dotted framework names.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (canonical, aliases) in DEFAULT_ALIASES {
            for alias in *aliases {
                table = table.with_alias(alias, canonical);
            }
        }
        table
    }

    /// Built-in table, overlaid with the JSON file at `path` when given.
    /// File entries win over built-in ones.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let table = Self::builtin();
        match path {
            Some(path) => table.overlay_file(path),
            None => Ok(table),
        }
    }

    fn overlay_file(mut self, path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias file '{}'", path.display()))?;
        let AliasFile(overrides) = serde_json::from_str(&raw)
            .with_context(|| format!("Alias file '{}' is not a JSON object of strings", path.display()))?;

        for (alias, canonical) in overrides {
            self = self.with_alias(&alias, &canonical);
        }
        Ok(self)
    }

    /// Adds or replaces one alias. Entries whose alias or canonical form folds to
    /// nothing are ignored.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        if let (Some(alias), Some(canonical)) = (fold(alias), fold(canonical)) {
            self.entries.insert(alias, canonical);
        }
        self
    }

    pub fn resolve(&self, folded: &str) -> Option<&str> {
        self.entries.get(folded).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordNormalizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct KeywordNormalizer {
    aliases: AliasTable,
}

impl KeywordNormalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Normalizes one raw skill string. `None` is the empty keyword: blank or
    /// invisible input, which never enters a `SkillSet`.
    pub fn normalize(&self, raw: &str) -> Option<SkillKeyword> {
        let folded = fold(raw)?;
        // Single-step resolution: the canonical form is not looked up again.
        let canonical = match self.aliases.resolve(&folded) {
            Some(canonical) => canonical.to_string(),
            None => folded,
        };
        Some(SkillKeyword(canonical))
    }
}

/// Rules 1, 2 and 4: NFKC, drop format characters, collapse whitespace,
/// lower-case, reject invisible tokens.
fn fold(raw: &str) -> Option<String> {
    let canonical: String = raw.nfkc().filter(|c| !is_format(*c)).collect();
    let collapsed = canonical.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.chars().any(is_visible) {
        return None;
    }
    Some(collapsed.to_lowercase())
}

fn is_visible(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !is_format(c)
}

/// Unicode format characters (category Cf) that render as nothing: BOM,
/// zero-width space/joiners, soft hyphen, word joiner, bidi marks.
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn normalize(raw: &str) -> Option<String> {
        KeywordNormalizer::new(AliasTable::builtin())
            .normalize(raw)
            .map(|k| k.as_str().to_string())
    }

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  Distributed \t  Systems \n"), Some("distributed systems".into()));
    }

    #[test]
    fn test_case_folds() {
        assert_eq!(normalize("RUST"), Some("rust".into()));
        assert_eq!(normalize("TypeScript"), Some("typescript".into()));
    }

    #[test]
    fn test_resolves_aliases_after_folding() {
        assert_eq!(normalize("JS"), Some("javascript".into()));
        assert_eq!(normalize("Node.js"), Some("nodejs".into()));
        assert_eq!(normalize("  node   js "), Some("nodejs".into()));
        assert_eq!(normalize("K8s"), Some("kubernetes".into()));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(normalize("Terraform"), Some("terraform".into()));
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   \t\n"), None);
        assert_eq!(normalize("\u{0007}"), None);
    }

    #[test]
    fn test_zero_width_only_input_is_empty() {
        assert_eq!(normalize("\u{FEFF}"), None);
        assert_eq!(normalize("\u{200B}"), None);
        assert_eq!(normalize(" \u{2060}\u{00AD} "), None);
    }

    #[test]
    fn test_strips_format_characters_inside_tokens() {
        assert_eq!(normalize("\u{FEFF}React"), Some("react".into()));
        assert_eq!(normalize("Type\u{200B}Script"), Some("typescript".into()));
        assert_eq!(normalize("Kuber\u{00AD}netes"), Some("kubernetes".into()));
        assert_eq!(normalize("\u{FEFF}JS"), Some("javascript".into()));
    }

    #[test]
    fn test_full_width_forms_fold_before_alias_lookup() {
        assert_eq!(normalize("ＪＳ"), Some("javascript".into()));
        assert_eq!(normalize("Ｎｏｄｅ．ｊｓ"), Some("nodejs".into()));
        assert_eq!(normalize("Ｒｕｓｔ"), Some("rust".into()));
        // Ideographic space collapses like ASCII space
        assert_eq!(normalize("node\u{3000}js"), Some("nodejs".into()));
    }

    #[test]
    fn test_alias_resolution_is_single_step() {
        let table = AliasTable::empty()
            .with_alias("a", "b")
            .with_alias("b", "c");
        let normalizer = KeywordNormalizer::new(table);
        assert_eq!(normalizer.normalize("A").unwrap().as_str(), "b");
    }

    #[test]
    fn test_empty_table_only_folds() {
        let normalizer = KeywordNormalizer::default();
        assert_eq!(normalizer.normalize("Node.js").unwrap().as_str(), "node.js");
    }

    #[test]
    fn test_alias_entries_are_folded_on_insert() {
        let table = AliasTable::empty().with_alias("  Spring  Boot ", "SPRING");
        assert_eq!(table.resolve("spring boot"), Some("spring"));
        assert_eq!(AliasTable::empty().with_alias(" ", "x").len(), 0);
    }

    #[test]
    fn test_load_overlays_file_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"js": "ecmascript", "Pg": "PostgreSQL"}}"#).unwrap();

        let table = AliasTable::load(Some(file.path())).unwrap();
        let normalizer = KeywordNormalizer::new(table);
        assert_eq!(normalizer.normalize("js").unwrap().as_str(), "ecmascript");
        assert_eq!(normalizer.normalize("pg").unwrap().as_str(), "postgresql");
        // Built-ins survive the overlay
        assert_eq!(normalizer.normalize("node.js").unwrap().as_str(), "nodejs");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(AliasTable::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_load_without_path_is_builtin() {
        let table = AliasTable::load(None).unwrap();
        assert_eq!(table.len(), AliasTable::builtin().len());
        assert!(table.len() > 0);
    }
}
