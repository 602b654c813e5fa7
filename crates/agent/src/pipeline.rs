//! The FAQ pipeline: classify, extract, resolve
//!
//! One synchronous call chain per message. All components are immutable
//! after construction, so a single pipeline is shared across requests.

use std::sync::Arc;

use campus_faq_config::{CollegeContent, Settings};
use campus_faq_core::{EntityMap, Intent, Language};
use campus_faq_text_processing::{GazetteerTagger, IntentExtractor, LanguageClassifier};
use serde::Serialize;

use crate::fallback::KeywordFallback;
use crate::resolver::ResponseResolver;
use crate::AgentError;

/// Full result of the NLP path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub response: String,
    pub language: Language,
    pub intent: Intent,
    pub confidence: f64,
    pub entities: EntityMap,
}

/// Which path produced a handler reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplySource {
    #[default]
    Pipeline,
    Fallback,
    EmptyInput,
}

/// Reply body as sent to the chat widget.
///
/// Only the NLP path reports language, intent and confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip)]
    pub source: ReplySource,
}

impl HandlerReply {
    /// Reply carrying only a response string
    pub fn bare(response: impl Into<String>, source: ReplySource) -> Self {
        Self {
            response: response.into(),
            language: None,
            intent: None,
            confidence: None,
            source,
        }
    }
}

impl From<Reply> for HandlerReply {
    fn from(reply: Reply) -> Self {
        Self {
            response: reply.response,
            language: Some(reply.language),
            intent: Some(reply.intent),
            confidence: Some(reply.confidence),
            source: ReplySource::Pipeline,
        }
    }
}

/// Language classifier, intent extractor and resolver wired together
#[derive(Debug, Clone)]
pub struct FaqPipeline {
    classifier: Arc<LanguageClassifier>,
    extractor: Arc<IntentExtractor>,
    resolver: Arc<ResponseResolver>,
    fallback: KeywordFallback,
    empty_prompt: String,
}

impl FaqPipeline {
    /// Pipeline with default classifier settings and response options
    pub fn new(content: Arc<CollegeContent>) -> Self {
        Self::from_settings(&Settings::default(), content)
    }

    /// Build every stage from settings.
    ///
    /// The entity tagger learns faculty surnames from the content so they
    /// are tagged as people.
    pub fn from_settings(settings: &Settings, content: Arc<CollegeContent>) -> Self {
        let classifier = LanguageClassifier::new(
            &settings.classifier.hinglish_markers,
            settings.classifier.min_detector_confidence,
        );

        let people: Vec<&str> = content
            .faculty_data
            .values()
            .flatten()
            .map(|member| member.name.as_str())
            .collect();
        let tagger = GazetteerTagger::with_people(&people);
        let extractor = IntentExtractor::with_tagger(Arc::new(tagger));

        let resolver = ResponseResolver::new(content)
            .with_selection(settings.responses.greeting_selection)
            .with_apology(settings.responses.apology.clone());

        Self::with_components(
            classifier,
            extractor,
            resolver,
            settings.responses.empty_prompt.clone(),
        )
    }

    /// Load the content named in settings and build the pipeline
    pub fn load(settings: &Settings) -> Result<Self, AgentError> {
        let content = CollegeContent::from_file(&settings.content.path)?;
        Ok(Self::from_settings(settings, Arc::new(content)))
    }

    pub fn with_components(
        classifier: LanguageClassifier,
        extractor: IntentExtractor,
        resolver: ResponseResolver,
        empty_prompt: impl Into<String>,
    ) -> Self {
        let resolver = Arc::new(resolver);
        Self {
            classifier: Arc::new(classifier),
            extractor: Arc::new(extractor),
            fallback: KeywordFallback::new(Arc::clone(&resolver)),
            resolver,
            empty_prompt: empty_prompt.into(),
        }
    }

    pub fn content(&self) -> &CollegeContent {
        self.resolver.content()
    }

    pub fn classifier(&self) -> &LanguageClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &IntentExtractor {
        &self.extractor
    }

    pub fn resolver(&self) -> &ResponseResolver {
        &self.resolver
    }

    /// Run the NLP path on one message
    pub fn answer(&self, text: &str) -> Result<Reply, AgentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AgentError::EmptyInput);
        }

        let language = self.classifier.classify(text);
        let extraction = self.extractor.extract(text, language);
        let response = self.resolver.resolve(
            extraction.intent,
            &extraction.entities,
            language,
            extraction.confidence,
        );

        if response.trim().is_empty() {
            return Err(AgentError::Internal(format!(
                "empty response for {}",
                extraction.intent
            )));
        }

        tracing::debug!(
            %language,
            intent = %extraction.intent,
            confidence = extraction.confidence,
            "Answered message"
        );

        Ok(Reply {
            response,
            language,
            intent: extraction.intent,
            confidence: extraction.confidence,
            entities: extraction.entities,
        })
    }

    /// Answer as the request handler does: blank input gets the prompt,
    /// pipeline errors drop to the keyword fallback
    pub fn answer_with_fallback(&self, text: &str) -> HandlerReply {
        if text.trim().is_empty() {
            return self.empty_reply();
        }

        match self.answer(text) {
            Ok(reply) => reply.into(),
            Err(e) => {
                tracing::warn!(error = %e, "Pipeline failed, using keyword fallback");
                self.fallback_reply(text)
            }
        }
    }

    /// Keyword chain reply without language, intent or confidence
    pub fn fallback_reply(&self, text: &str) -> HandlerReply {
        HandlerReply::bare(self.fallback.respond(text), ReplySource::Fallback)
    }

    pub fn empty_reply(&self) -> HandlerReply {
        HandlerReply::bare(self.empty_prompt.clone(), ReplySource::EmptyInput)
    }
}
