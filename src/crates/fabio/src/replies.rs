//! Canned replies for small talk and failure paths.

use rand::seq::SliceRandom;

/// Fixed identity reply; never varies.
pub const IDENTITY_REPLY: &str =
    "Meu nome é Fabio! 😄 Sou o assistente de vendas da loja. Posso te ajudar com \
     especificações, preços, fotos e comparações dos nossos smartphones.";

/// Greeting pool; one is drawn at random per greeting.
pub const GREETING_POOL: &[&str] = &[
    "Oi! 👋 Eu sou o Fabio, assistente da loja. Como posso te ajudar hoje?",
    "Olá! 😄 Fabio por aqui. Quer saber sobre algum modelo específico?",
    "E aí! 👋 Sou o Fabio. Me pergunta sobre preços, câmeras, o que quiser!",
    "Oi, tudo certo? Sou o Fabio, da loja. Em que posso ajudar?",
];

/// Well-being small-talk pool.
pub const WELL_BEING_POOL: &[&str] = &[
    "Tudo ótimo por aqui! 😄 E com você? Me conta, procurando algum celular novo?",
    "Estou muito bem, obrigado por perguntar! 🙌 Posso te ajudar a escolher um aparelho?",
    "Tudo certo! E aí, quer dar uma olhada nos nossos smartphones?",
];

/// Generic failure apology when a dispatch path errors out.
pub const APOLOGY: &str = "Desculpe, tive um problema ao processar sua pergunta. Pode reformular?";

/// Reply when a model lookup comes back empty.
pub const NOT_FOUND: &str =
    "😕 Desculpe, não encontrei esse modelo em nosso sistema. Posso te ajudar com outro?";

/// Prompt asking which model the user means (photo requests without a
/// resolvable model).
pub fn which_model_prompt() -> String {
    "Claro! 📸 De qual modelo você quer ver fotos? Temos iPhone, Samsung, Xiaomi e Motorola."
        .to_string()
}

/// Draw one reply from a pool.
pub fn pick(pool: &[&str]) -> String {
    let mut rng = rand::thread_rng();
    pool.choose(&mut rng)
        .copied()
        .unwrap_or(APOLOGY)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_pool() {
        for _ in 0..20 {
            let reply = pick(GREETING_POOL);
            assert!(GREETING_POOL.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_pick_empty_pool_falls_back() {
        assert_eq!(pick(&[]), APOLOGY);
    }
}
