//! System prompts and prompt builders.
//!
//! Every prompt that touches catalog facts embeds the facts in the
//! prompt text itself. The model is instructed to use only what it was
//! given; the router enforces that by fetching before calling.

/// System prompt for the tool-calling path: the model may pick a
/// catalog query, nothing else.
pub fn tool_system_prompt(models: &[String]) -> String {
    format!(
        "Você é Fabio, assistente de vendas de uma loja de smartphones. \
         Os únicos modelos em catálogo são: {}. \
         Para responder, você DEVE usar uma das ferramentas disponíveis. \
         Nunca invente especificações, preços ou números de vendas.",
        models.join(", ")
    )
}

/// System prompt for the comparison synthesis call.
pub const COMPARISON_SYSTEM: &str =
    "Você é um especialista que cria comparações claras de produtos.";

/// Build the comparison prompt over pre-fetched, pre-formatted spec
/// blocks (one per model, joined with separators).
pub fn comparison_prompt(user_message: &str, spec_blocks: &[String]) -> String {
    format!(
        "O usuário pediu para comparar: \"{}\"\n\n\
         Dados dos produtos:\n\n---\n{}\n---\n\n\
         Sua tarefa: Crie uma tabela comparativa em markdown ou uma lista clara \
         comparando os pontos principais (câmera, processador, preço, etc.) dos \
         produtos. Seja objetivo e use apenas os dados fornecidos.",
        user_message,
        spec_blocks.join("\n---\n")
    )
}

/// System prompt for the humanize call.
pub const HUMANIZE_SYSTEM: &str =
    "Você é um vendedor amigável. Use APENAS os dados fornecidos.";

/// Build the humanize prompt: rephrase already-correct data, add nothing.
pub fn humanize_prompt(user_message: &str, formatted_data: &str) -> String {
    format!(
        "O usuário perguntou: \"{}\"\n\n\
         Dados reais do banco de dados:\n{}\n\n\
         Sua tarefa: Responda de forma AMIGÁVEL e CONVERSACIONAL usando APENAS os \
         dados acima. Não invente nada. Seja breve (máximo 5 linhas).",
        user_message, formatted_data
    )
}

/// System prompt for the ungrounded chat fallback. Lists the real
/// catalog so the model cannot drift into inventing models.
pub fn general_chat_system(models: &[String]) -> String {
    format!(
        "Você é Fabio, assistente de vendas simpático de uma loja de smartphones. \
         Os únicos modelos em catálogo são: {}. \
         Responda de forma breve e amigável. Se a pergunta exigir especificações, \
         preços ou números exatos, peça para o cliente indicar o modelo em vez de \
         inventar dados.",
        models.join(", ")
    )
}

/// Phrase a narrow yes/no feature question for the retrieval backend.
pub fn feature_question(topic_label: &str, model: &str) -> String {
    format!("O {} tem suporte a {}? Responda sim ou não com base na documentação.", model, topic_label)
}
