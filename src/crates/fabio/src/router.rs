//! The dispatch router.
//!
//! Each incoming message is classified and dispatched to exactly one
//! terminal action. The ordering is fixed: small talk first, then the
//! deterministic data paths, then the delegating paths. The central
//! invariant lives here: catalog facts are fetched from the store
//! before any language-model call, and the model only rephrases or
//! synthesizes over that pre-fetched text. When the model is allowed to
//! choose (tool calling), the answer still comes from the executed
//! query, never from the model's prose.

use crate::config::AgentConfig;
use crate::error::Result;
use crate::format::format_query;
use crate::intent::{Classification, FeatureTopic, Intent, IntentClassifier};
use crate::normalize::ModelNormalizer;
use crate::prompts;
use crate::replies;
use crate::response::ResponseAction;
use crate::retrieval::DocumentRetriever;
use crate::session::{MemorySessionStore, SessionStore, TurnRole};
use crate::tools::{CatalogToolbox, ToolCallingAdapter, ToolOutcome};
use catalog::ProductStore;
use llm::{ChatModel, ChatRequest, Message};
use std::sync::Arc;

const DETAILS_QUERY: &str = "get_smartphone_details_and_photos";

/// The sales agent: classify, dispatch, reply.
pub struct SalesAgent {
    model: Arc<dyn ChatModel>,
    store: Arc<dyn ProductStore>,
    retriever: Arc<dyn DocumentRetriever>,
    sessions: Arc<dyn SessionStore>,
    normalizer: ModelNormalizer,
    classifier: IntentClassifier,
    adapter: ToolCallingAdapter,
    config: AgentConfig,
}

impl SalesAgent {
    /// Build an agent over the given backends.
    ///
    /// `model_names` are the canonical catalog names, used for mention
    /// normalization and for the system prompts that pin the model to
    /// the real catalog.
    pub fn new(
        model: Arc<dyn ChatModel>,
        store: Arc<dyn ProductStore>,
        retriever: Arc<dyn DocumentRetriever>,
        model_names: Vec<String>,
        config: AgentConfig,
    ) -> Self {
        let adapter = ToolCallingAdapter::new(
            model.clone(),
            CatalogToolbox::new(store.clone()),
            config.tool_temperature,
        );

        Self {
            model,
            store,
            retriever,
            sessions: Arc::new(MemorySessionStore::new()),
            normalizer: ModelNormalizer::new(model_names),
            classifier: IntentClassifier::new(),
            adapter,
            config,
        }
    }

    /// Replace the session store (shared stores, test doubles).
    pub fn with_session_store(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Handle one user message end to end.
    ///
    /// Never returns an error to the caller: any dispatch failure is
    /// logged and becomes the fixed apology text.
    pub async fn process_message(&self, user_id: &str, text: &str) -> ResponseAction {
        self.sessions.evict_idle(self.config.session_ttl);

        let classification = self.classifier.classify(text, &self.normalizer);
        tracing::info!(
            user = user_id,
            intent = ?classification.intent,
            models = classification.mentioned_models.len(),
            "dispatching message"
        );

        self.sessions.append(user_id, TurnRole::User, text);

        let action = match self.dispatch(user_id, text, &classification).await {
            Ok(action) => action,
            Err(e) => {
                tracing::error!(user = user_id, error = %e, "dispatch failed");
                ResponseAction::text(replies::APOLOGY)
            }
        };

        self.sessions
            .append(user_id, TurnRole::Assistant, action.text_content());

        action
    }

    async fn dispatch(
        &self,
        user_id: &str,
        text: &str,
        classification: &Classification,
    ) -> Result<ResponseAction> {
        match classification.intent {
            Intent::Identity => Ok(ResponseAction::text(replies::IDENTITY_REPLY)),
            Intent::Greeting => Ok(ResponseAction::text(replies::pick(replies::GREETING_POOL))),
            Intent::WellBeing => Ok(ResponseAction::text(replies::pick(
                replies::WELL_BEING_POOL,
            ))),
            Intent::PhotoRequest => self.answer_photos(text).await,
            Intent::Technical if classification.is_comparison() => {
                self.answer_comparison(text, classification).await
            }
            Intent::Technical if classification.mentioned_models.len() == 1 => {
                let model = classification
                    .mentioned_models
                    .iter()
                    .next()
                    .map(String::as_str)
                    .unwrap_or_default();
                self.answer_single_model(text, model).await
            }
            Intent::Technical => self.answer_with_tools(user_id, text).await,
            Intent::FeatureFlag(topic) => self.answer_feature_flag(text, topic).await,
            Intent::Sales => self.answer_with_tools(user_id, text).await,
            Intent::Generic => self.answer_with_rag(user_id, text).await,
        }
    }

    /// Photo request: resolve the model, return its photo references.
    async fn answer_photos(&self, text: &str) -> Result<ResponseAction> {
        let Some(model) = self.normalizer.normalize(text) else {
            return Ok(ResponseAction::text(replies::which_model_prompt()));
        };

        let rows = self.store.smartphone_details_and_photos(model).await?;
        let Some(row) = rows.first() else {
            return Ok(ResponseAction::text(replies::NOT_FOUND));
        };

        let photos: Vec<String> = row["fotos"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if photos.is_empty() {
            return Ok(ResponseAction::text(replies::NOT_FOUND));
        }

        Ok(ResponseAction::photos(
            photos,
            format!("📸 Fotos do {}", model),
        ))
    }

    /// Comparison: fetch every mentioned model, format each block, then
    /// ask the model only to synthesize over the blocks.
    async fn answer_comparison(
        &self,
        text: &str,
        classification: &Classification,
    ) -> Result<ResponseAction> {
        let mut blocks = Vec::new();
        for model in &classification.mentioned_models {
            let rows = self.store.smartphone_details_and_photos(model).await?;
            if !rows.is_empty() {
                blocks.push(format_query(DETAILS_QUERY, &rows));
            }
        }

        if blocks.is_empty() {
            return Ok(ResponseAction::text(replies::NOT_FOUND));
        }

        let request = ChatRequest::new(vec![
            Message::system(prompts::COMPARISON_SYSTEM),
            Message::user(prompts::comparison_prompt(text, &blocks)),
        ])
        .with_temperature(self.config.comparison_temperature)
        .with_max_tokens(self.config.comparison_max_tokens);

        let response = self.model.chat(request).await?;
        Ok(ResponseAction::text(response.message.content))
    }

    /// Single model: fetch, format, then humanize the correct text.
    async fn answer_single_model(&self, text: &str, model: &str) -> Result<ResponseAction> {
        let rows = self.store.smartphone_details_and_photos(model).await?;
        if rows.is_empty() {
            return Ok(ResponseAction::text(replies::NOT_FOUND));
        }

        let formatted = format_query(DETAILS_QUERY, &rows);

        let request = ChatRequest::new(vec![
            Message::system(prompts::HUMANIZE_SYSTEM),
            Message::user(prompts::humanize_prompt(text, &formatted)),
        ])
        .with_temperature(self.config.humanize_temperature)
        .with_max_tokens(self.config.humanize_max_tokens);

        let response = self.model.chat(request).await?;
        Ok(ResponseAction::text(response.message.content))
    }

    /// Feature flag (NFC, dual SIM): narrow yes/no question per model,
    /// answered from documents only.
    async fn answer_feature_flag(
        &self,
        text: &str,
        topic: FeatureTopic,
    ) -> Result<ResponseAction> {
        let Some(model) = self.normalizer.normalize(text) else {
            return Ok(ResponseAction::text(format!(
                "Confiro {} por modelo específico. Me diz qual aparelho você quer saber?",
                topic.label()
            )));
        };

        let question = prompts::feature_question(topic.label(), model);
        let answer = self.retriever.query(&question).await?;

        if answer.trim().is_empty() {
            return Ok(ResponseAction::text(format!(
                "😕 Não tenho essa informação confirmada sobre {} para o {}. \
                 Posso te passar as especificações completas dele?",
                topic.label(),
                model
            )));
        }

        Ok(ResponseAction::text(answer))
    }

    /// Let the model pick a catalog query; fall back to retrieval when
    /// it answers in prose instead.
    async fn answer_with_tools(&self, user_id: &str, text: &str) -> Result<ResponseAction> {
        let messages = self.sessions.history(
            user_id,
            &prompts::tool_system_prompt(self.normalizer.catalog()),
        );

        match self.adapter.run(messages).await? {
            ToolOutcome::Answered(answer) => Ok(ResponseAction::text(answer)),
            ToolOutcome::NoToolCall => self.answer_with_rag(user_id, text).await,
        }
    }

    /// Retrieval first; if it yields nothing, an ungrounded chat
    /// completion pinned to the real catalog.
    async fn answer_with_rag(&self, user_id: &str, text: &str) -> Result<ResponseAction> {
        let retrieved = self.retriever.query(text).await?;
        if !retrieved.trim().is_empty() {
            return Ok(ResponseAction::text(retrieved));
        }

        tracing::debug!(user = user_id, "retrieval empty, using general chat fallback");

        let messages = self.sessions.history(
            user_id,
            &prompts::general_chat_system(self.normalizer.catalog()),
        );

        let request = ChatRequest::new(messages)
            .with_temperature(self.config.chat_temperature)
            .with_max_tokens(self.config.chat_max_tokens);

        let response = self.model.chat(request).await?;
        Ok(ResponseAction::text(response.message.content))
    }
}
