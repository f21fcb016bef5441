//! # Lexicon Manifest
//!
//! TOML declaration of the domains a world uses.
//!
//! ```toml
//! [[domain]]
//! name = "english"
//!
//! [[domain]]
//! name = "base"
//! combine = ["english", "names"]
//! ```
//!
//! A domain without `combine` is a plain word list the host supplies. Applying
//! the manifest marks those as requested and declares the combined ones.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};
use crate::store::Lexicon;

/// One declared domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDecl {
    /// Domain name.
    pub name: String,
    /// Parts of a combined domain. Empty for a plain word list.
    #[serde(default)]
    pub combine: Vec<String>,
}

/// The full manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconManifest {
    /// Declared domains.
    #[serde(default, rename = "domain")]
    pub domains: Vec<DomainDecl>,
}

impl LexiconManifest {
    /// Parses and validates a manifest.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Manifest`] for malformed TOML, empty or
    /// duplicate names.
    pub fn from_toml_str(text: &str) -> LexiconResult<Self> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks names are present and unique.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Manifest`] describing the first problem.
    pub fn validate(&self) -> LexiconResult<()> {
        let mut names = HashSet::new();
        for decl in &self.domains {
            if decl.name.trim().is_empty() {
                return Err(LexiconError::Manifest("domain with empty name".into()));
            }
            if !names.insert(decl.name.as_str()) {
                return Err(LexiconError::Manifest(format!(
                    "domain {} declared twice",
                    decl.name
                )));
            }
        }
        Ok(())
    }

    /// Registers every declaration with `lexicon`.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::CombineCycle`] if combined domains refer to
    /// each other in a loop.
    pub fn apply(&self, lexicon: &Lexicon) -> LexiconResult<()> {
        for decl in &self.domains {
            if decl.combine.is_empty() {
                lexicon.request(&decl.name);
            } else {
                lexicon.declare_combined(&decl.name, &decl.combine)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DomainSource;

    const MANIFEST: &str = r#"
[[domain]]
name = "english"

[[domain]]
name = "names"

[[domain]]
name = "base"
combine = ["english", "names"]
"#;

    #[test]
    fn test_parse_and_apply() {
        let manifest = LexiconManifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(manifest.domains.len(), 3);
        assert_eq!(manifest.domains[2].combine, vec!["english", "names"]);

        let lexicon = Lexicon::new();
        manifest.apply(&lexicon).unwrap();
        assert_eq!(lexicon.requested(), vec!["english".to_owned(), "names".to_owned()]);
        assert!(!lexicon.lookup_domain("base").is_ready());
    }

    #[test]
    fn test_rejects_duplicates() {
        let text = "[[domain]]\nname = \"a\"\n[[domain]]\nname = \"a\"\n";
        assert!(matches!(
            LexiconManifest::from_toml_str(text),
            Err(LexiconError::Manifest(_))
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            LexiconManifest::from_toml_str("[[domain]]\nname = 3\n"),
            Err(LexiconError::Manifest(_))
        ));
        assert_eq!(LexiconManifest::from_toml_str("").unwrap(), LexiconManifest::default());
    }
}
