//! Model name normalization.
//!
//! Customers write "redmi note 13" or "s24 ultra"; the catalog knows
//! "Xiaomi Redmi Note 13" and "Samsung Galaxy S24 Ultra". The
//! normalizer maps colloquial mentions onto canonical catalog names via
//! case-folded substring containment: aliases first (most specific),
//! then the literal canonical names. Aliases are checked longest-first
//! so a longer alias can never be shadowed by a shorter one.

use std::collections::BTreeSet;

/// Alias table: colloquial substring to canonical catalog name.
const ALIASES: &[(&str, &str)] = &[
    ("iphone 15 pro max", "iPhone 15 Pro Max"),
    ("redmi note 13", "Xiaomi Redmi Note 13"),
    ("galaxy a54", "Samsung Galaxy A54"),
    ("xiaomi 13t", "Xiaomi 13T"),
    ("s24 ultra", "Samsung Galaxy S24 Ultra"),
    ("moto g54", "Motorola Moto G54"),
];

/// Resolves free-text model mentions to canonical catalog names.
#[derive(Debug, Clone)]
pub struct ModelNormalizer {
    /// Alias pairs sorted by descending alias length.
    aliases: Vec<(String, String)>,

    /// Canonical catalog names.
    catalog: Vec<String>,
}

impl ModelNormalizer {
    /// Build a normalizer over the given canonical catalog names.
    pub fn new(catalog: Vec<String>) -> Self {
        let mut aliases: Vec<(String, String)> = ALIASES
            .iter()
            .map(|(a, c)| (a.to_string(), c.to_string()))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));

        Self { aliases, catalog }
    }

    /// Canonical catalog names known to this normalizer.
    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Resolve the first model mentioned in `text`, or `None`.
    ///
    /// Aliases are tried before canonical names since they are the
    /// more specific substrings.
    pub fn normalize(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();

        for (alias, canonical) in &self.aliases {
            if lower.contains(alias.as_str()) {
                return Some(canonical);
            }
        }

        self.catalog
            .iter()
            .find(|model| lower.contains(&model.to_lowercase()))
            .map(|s| s.as_str())
    }

    /// Every distinct model mentioned anywhere in `text`.
    ///
    /// Union of alias hits and canonical-name hits; a `BTreeSet` keeps
    /// the result deterministic for comparison dispatch.
    pub fn find_all_mentions(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        let mut mentioned = BTreeSet::new();

        for (alias, canonical) in &self.aliases {
            if lower.contains(alias.as_str()) {
                mentioned.insert(canonical.clone());
            }
        }

        for model in &self.catalog {
            if lower.contains(&model.to_lowercase()) {
                mentioned.insert(model.clone());
            }
        }

        mentioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> ModelNormalizer {
        ModelNormalizer::new(vec![
            "iPhone 15 Pro Max".to_string(),
            "Motorola Moto G54".to_string(),
            "Samsung Galaxy A54".to_string(),
            "Samsung Galaxy S24 Ultra".to_string(),
            "Xiaomi 13T".to_string(),
            "Xiaomi Redmi Note 13".to_string(),
        ])
    }

    #[test]
    fn test_alias_resolution() {
        let n = normalizer();
        assert_eq!(n.normalize("quanto custa o redmi note 13?"), Some("Xiaomi Redmi Note 13"));
        assert_eq!(n.normalize("o S24 ULTRA tem nfc?"), Some("Samsung Galaxy S24 Ultra"));
        assert_eq!(n.normalize("me fala do moto g54"), Some("Motorola Moto G54"));
    }

    #[test]
    fn test_canonical_name_resolution() {
        let n = normalizer();
        assert_eq!(
            n.normalize("detalhes do Samsung Galaxy A54 por favor"),
            Some("Samsung Galaxy A54")
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let n = normalizer();
        for model in n.catalog().to_vec() {
            assert_eq!(n.normalize(&model), Some(model.as_str()));
        }
    }

    #[test]
    fn test_no_mention() {
        let n = normalizer();
        assert_eq!(n.normalize("qual o melhor celular da loja?"), None);
    }

    #[test]
    fn test_longer_alias_not_shadowed() {
        let n = normalizer();
        // "iphone 15 pro max" must win as a unit, not partially match
        assert_eq!(
            n.normalize("o iphone 15 pro max vale a pena?"),
            Some("iPhone 15 Pro Max")
        );
    }

    #[test]
    fn test_find_all_mentions_union() {
        let n = normalizer();
        let mentions = n.find_all_mentions("compare o redmi note 13 com o galaxy a54");
        assert_eq!(mentions.len(), 2);
        assert!(mentions.contains("Xiaomi Redmi Note 13"));
        assert!(mentions.contains("Samsung Galaxy A54"));
    }

    #[test]
    fn test_find_all_mentions_dedupes_alias_and_canonical() {
        let n = normalizer();
        // Alias and canonical name of the same model count once
        let mentions = n.find_all_mentions("Xiaomi 13T ou xiaomi 13t?");
        assert_eq!(mentions.len(), 1);
    }
}
