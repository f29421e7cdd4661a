//! Keyword-table intent classification.
//!
//! Classification is a pure function over the message text plus the
//! normalizer's model mentions. Rules are evaluated in a fixed order
//! (identity, greeting, well-being, photo, technical, feature-flag,
//! sales, generic) and the first match wins, so behavior under
//! overlapping keyword sets is deterministic. A technical message that
//! mentions two or more distinct catalog models is a comparison, a
//! distinguished sub-case of [`Intent::Technical`].

use crate::normalize::ModelNormalizer;
use std::collections::BTreeSet;

/// Feature-flag question topics, each answered per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTopic {
    /// NFC / contactless payment.
    Nfc,
    /// Dual SIM / eSIM support.
    DualSim,
}

impl FeatureTopic {
    /// Human-readable topic label, used when phrasing the retrieval query.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureTopic::Nfc => "NFC e pagamento por aproximação",
            FeatureTopic::DualSim => "dual SIM / eSIM",
        }
    }
}

/// Intent category of an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "What is your name?" and variants.
    Identity,
    /// Opening greeting ("oi", "bom dia").
    Greeting,
    /// Small talk about well-being ("tudo bem?").
    WellBeing,
    /// Request to see product photos.
    PhotoRequest,
    /// Technical-spec or price question.
    Technical,
    /// Narrow yes/no feature question (NFC, dual SIM).
    FeatureFlag(FeatureTopic),
    /// Sales or finance question.
    Sales,
    /// Everything else.
    Generic,
}

/// Result of classifying one message.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The matched intent category.
    pub intent: Intent,
    /// Distinct catalog models mentioned in the message.
    pub mentioned_models: BTreeSet<String>,
}

impl Classification {
    /// Technical question naming two or more distinct models.
    pub fn is_comparison(&self) -> bool {
        self.intent == Intent::Technical && self.mentioned_models.len() >= 2
    }
}

/// Identity phrases (exact or prefix match on cleaned text).
const IDENTITY_PHRASES: &[&str] = &[
    "qual o seu nome",
    "qual seu nome",
    "quem é você",
    "quem e voce",
    "como você se chama",
    "como voce se chama",
];

/// Greeting phrases (exact or prefix match on cleaned text).
const GREETING_PHRASES: &[&str] = &[
    "oi", "olá", "ola", "opa", "eai", "e aí", "e ai", "bom dia", "boa tarde", "boa noite",
];

/// Well-being phrases (substring match).
const WELL_BEING_PHRASES: &[&str] = &[
    "tudo bem",
    "tudo bom",
    "como vai",
    "como você está",
    "como voce esta",
    "beleza",
];

/// Photo-request keywords. Single words match on word boundaries.
const PHOTO_WORDS: &[&str] = &["foto", "fotos", "imagem", "imagens"];
const PHOTO_PHRASES: &[&str] = &["quero ver", "me mostra", "me mostre", "pode mostrar"];

/// Technical-spec keywords. Single words match on word boundaries so
/// "x" and "vs" do not fire inside "xiaomi" or other words.
const TECHNICAL_WORDS: &[&str] = &[
    "processador",
    "ram",
    "memória",
    "memoria",
    "armazenamento",
    "câmera",
    "camera",
    "bateria",
    "tela",
    "display",
    "preço",
    "preco",
    "valor",
    "custo",
    "característica",
    "caracteristica",
    "especificação",
    "especificacao",
    "detalhe",
    "detalhes",
    "comparar",
    "compare",
    "vs",
    "x",
    "diferença",
    "diferenca",
    "melhor",
    "pior",
];
const TECHNICAL_PHRASES: &[&str] = &["ficha técnica", "ficha tecnica"];

const NFC_PHRASES: &[&str] = &["nfc", "aproximação", "aproximacao", "apple pay", "google pay", "samsung pay"];
const DUAL_SIM_PHRASES: &[&str] = &["dual sim", "dois chips", "2 chips", "esim", "e-sim"];

/// Sales/finance keywords.
const SALES_WORDS: &[&str] = &[
    "vendido",
    "vendidos",
    "vendas",
    "vendeu",
    "campeão",
    "campeao",
    "líder",
    "lider",
    "top",
    "receita",
    "faturamento",
    "arrecadação",
    "arrecadacao",
];
const SALES_PHRASES: &[&str] = &["mais vendeu"];

/// Ordered keyword-table classifier.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message, resolving model mentions via `normalizer`.
    pub fn classify(&self, text: &str, normalizer: &ModelNormalizer) -> Classification {
        let cleaned = clean(text);
        let mentioned_models = normalizer.find_all_mentions(text);

        let intent = self.match_intent(&cleaned);

        Classification {
            intent,
            mentioned_models,
        }
    }

    fn match_intent(&self, cleaned: &str) -> Intent {
        if IDENTITY_PHRASES.iter().any(|p| cleaned.contains(p)) {
            return Intent::Identity;
        }

        if GREETING_PHRASES.iter().any(|p| opens_with(cleaned, p)) {
            return Intent::Greeting;
        }

        if WELL_BEING_PHRASES.iter().any(|p| cleaned.contains(p)) {
            return Intent::WellBeing;
        }

        if PHOTO_WORDS.iter().any(|w| contains_word(cleaned, w))
            || PHOTO_PHRASES.iter().any(|p| cleaned.contains(p))
        {
            return Intent::PhotoRequest;
        }

        if TECHNICAL_WORDS.iter().any(|w| contains_word(cleaned, w))
            || TECHNICAL_PHRASES.iter().any(|p| cleaned.contains(p))
        {
            return Intent::Technical;
        }

        if NFC_PHRASES.iter().any(|p| cleaned.contains(p)) {
            return Intent::FeatureFlag(FeatureTopic::Nfc);
        }
        if DUAL_SIM_PHRASES.iter().any(|p| cleaned.contains(p)) {
            return Intent::FeatureFlag(FeatureTopic::DualSim);
        }

        if SALES_WORDS.iter().any(|w| contains_word(cleaned, w))
            || SALES_PHRASES.iter().any(|p| cleaned.contains(p))
        {
            return Intent::Sales;
        }

        Intent::Generic
    }
}

/// Lowercase and replace sentence punctuation with spaces so phrase
/// matching sees clean word sequences ("oi, tudo bem?" -> "oi tudo bem").
fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if matches!(c, ',' | '.' | '!' | '?' | ';' | ':') {
                ' '
            } else {
                c
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the cleaned text is exactly `phrase` or starts with it as a
/// full word prefix. Keeps "oi" from matching inside "oitavo".
fn opens_with(cleaned: &str, phrase: &str) -> bool {
    cleaned == phrase
        || cleaned
            .strip_prefix(phrase)
            .map(|rest| rest.starts_with(' '))
            .unwrap_or(false)
}

/// Word-boundary containment: `word` must not be flanked by
/// alphanumeric characters. Keeps "x" from firing inside "xiaomi".
fn contains_word(cleaned: &str, word: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = cleaned[start..].find(word) {
        let abs = start + pos;
        let end = abs + word.len();

        let before_ok = cleaned[..abs]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = cleaned[end..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);

        if before_ok && after_ok {
            return true;
        }

        // Advance by at least one char to make progress on overlaps
        start = abs + cleaned[abs..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
        if start >= cleaned.len() {
            break;
        }
    }
    false
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

    fn classify(text: &str) -> Classification {
        IntentClassifier::new().classify(text, &normalizer())
    }

    #[test]
    fn test_identity_beats_everything() {
        assert_eq!(classify("oi, qual o seu nome?").intent, Intent::Identity);
        assert_eq!(classify("quem é você?").intent, Intent::Identity);
    }

    #[test]
    fn test_greeting_variants() {
        assert_eq!(classify("oi").intent, Intent::Greeting);
        assert_eq!(classify("Olá!").intent, Intent::Greeting);
        assert_eq!(classify("bom dia").intent, Intent::Greeting);
        // "oi" must be an opener, not a substring
        assert_ne!(classify("foi bom demais").intent, Intent::Greeting);
    }

    #[test]
    fn test_well_being() {
        assert_eq!(classify("tudo bem com você?").intent, Intent::WellBeing);
    }

    #[test]
    fn test_greeting_takes_priority_over_well_being() {
        assert_eq!(classify("oi, tudo bem?").intent, Intent::Greeting);
    }

    #[test]
    fn test_photo_request() {
        assert_eq!(classify("tem foto do redmi note 13?").intent, Intent::PhotoRequest);
        assert_eq!(classify("me mostra o galaxy a54").intent, Intent::PhotoRequest);
    }

    #[test]
    fn test_technical_keywords() {
        assert_eq!(classify("qual o preço do moto g54?").intent, Intent::Technical);
        assert_eq!(classify("quanto de ram tem o xiaomi 13t?").intent, Intent::Technical);
    }

    #[test]
    fn test_x_needs_word_boundary() {
        // "x" as a versus marker is technical
        assert_eq!(classify("redmi note 13 x galaxy a54").intent, Intent::Technical);
        // but must not fire inside "xiaomi"
        assert_eq!(classify("gosto da xiaomi").intent, Intent::Generic);
    }

    #[test]
    fn test_comparison_detection() {
        let c = classify("compare o redmi note 13 com o s24 ultra");
        assert_eq!(c.intent, Intent::Technical);
        assert!(c.is_comparison());
        assert_eq!(c.mentioned_models.len(), 2);
    }

    #[test]
    fn test_single_model_not_comparison() {
        let c = classify("qual a bateria do moto g54?");
        assert_eq!(c.intent, Intent::Technical);
        assert!(!c.is_comparison());
    }

    #[test]
    fn test_feature_flags() {
        assert_eq!(
            classify("o galaxy a54 tem nfc?").intent,
            Intent::FeatureFlag(FeatureTopic::Nfc)
        );
        assert_eq!(
            classify("o moto g54 aceita dois chips?").intent,
            Intent::FeatureFlag(FeatureTopic::DualSim)
        );
    }

    #[test]
    fn test_technical_beats_feature_flag() {
        // "preço" and "nfc" co-occur; technical is checked first
        assert_eq!(
            classify("qual o preço do modelo com nfc?").intent,
            Intent::Technical
        );
    }

    #[test]
    fn test_sales_keywords() {
        assert_eq!(classify("qual o mais vendido?").intent, Intent::Sales);
        assert_eq!(classify("qual foi o faturamento de janeiro?").intent, Intent::Sales);
        assert_eq!(classify("top 3 produtos").intent, Intent::Sales);
    }

    #[test]
    fn test_generic_fallthrough() {
        assert_eq!(
            classify("qual celular combina com quem ama jogos?").intent,
            Intent::Generic
        );
    }
}
