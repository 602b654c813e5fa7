//! Response resolution
//!
//! Maps (intent, entities, language) to one canned fragment from the
//! college content. Every table key is looked up in the language's own
//! table first, then in the English table, then replaced by a fixed
//! literal, so every combination resolves to a non-empty reply.

use std::sync::Arc;

use campus_faq_config::{CollegeContent, GreetingSelection, Variants, DEFAULT_APOLOGY};
use campus_faq_core::{Department, EntityMap, Intent, Language, DEPARTMENT_KEY};
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::faculty;

const GREETING_LITERAL: &str = "Hello! How can I help you with college information?";
const FEES_LITERAL: &str = "Fee information not available.";
const ADMISSION_LITERAL: &str = "Admission information not available.";
const DEPARTMENTS_LITERAL: &str =
    "We have Computer, Mechanical, Electrical, Civil, and IT departments.";
const FACULTY_LITERAL: &str = "Our faculty information is available for all departments.";
const CONTACT_LITERAL: &str = "Contact information not available.";
const PLACEMENT_LITERAL: &str =
    "Our college has excellent placement opportunities with top companies.";
const GENERAL_LITERAL: &str = "I'm here to help you with college information. Please ask about admissions, fees, departments, or facilities.";

/// Department page shown when no topic was asked for
const ABOUT_FIELD: &str = "about";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("No content for {key}")]
    MissingContent { key: String },

    #[error("Resolved an empty response for {intent}")]
    Empty { intent: Intent },
}

/// Looks up canned responses in the shared content store
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    content: Arc<CollegeContent>,
    selection: GreetingSelection,
    apology: String,
}

impl ResponseResolver {
    pub fn new(content: Arc<CollegeContent>) -> Self {
        Self {
            content,
            selection: GreetingSelection::default(),
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }

    /// How one of several greeting or default variants is chosen
    pub fn with_selection(mut self, selection: GreetingSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }

    pub fn content(&self) -> &CollegeContent {
        &self.content
    }

    pub fn apology(&self) -> &str {
        &self.apology
    }

    /// Resolve a reply; any lookup error becomes the apology
    pub fn resolve(
        &self,
        intent: Intent,
        entities: &EntityMap,
        language: Language,
        confidence: f64,
    ) -> String {
        match self.try_resolve(intent, entities, language, confidence) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%intent, %language, error = %e, "Response resolution failed");
                self.apology.clone()
            }
        }
    }

    pub fn try_resolve(
        &self,
        intent: Intent,
        entities: &EntityMap,
        language: Language,
        confidence: f64,
    ) -> Result<String, ResolveError> {
        let topic = entities.topic();

        let response = match intent {
            Intent::Greeting => self
                .pick(language, "greeting")
                .unwrap_or(GREETING_LITERAL)
                .to_string(),
            Intent::Fees => self
                .lookup(language, "fees", topic)
                .unwrap_or(FEES_LITERAL)
                .to_string(),
            Intent::Admission => self
                .lookup(language, "admission_info", None)
                .unwrap_or(ADMISSION_LITERAL)
                .to_string(),
            Intent::Contact => self.contact(language, topic).to_string(),
            Intent::Department => match department_entity(entities)? {
                Some(department) => self.department_page(department, topic, language),
                None => self.departments_overview(language).to_string(),
            },
            Intent::Faculty => self.faculty(department_entity(entities)?, language),
            Intent::Placement => self
                .lookup(language, "placement", None)
                .unwrap_or(PLACEMENT_LITERAL)
                .to_string(),
            Intent::Discipline
            | Intent::Transportation
            | Intent::Workshop
            | Intent::Library
            | Intent::Disability => {
                let key = intent.as_str();
                self.lookup(language, key, topic)
                    .or_else(|| self.pick(language, "default"))
                    .ok_or_else(|| ResolveError::MissingContent {
                        key: key.to_string(),
                    })?
                    .to_string()
            }
            Intent::General => self.general(language).to_string(),
        };

        if response.trim().is_empty() {
            return Err(ResolveError::Empty { intent });
        }

        tracing::debug!(
            %intent,
            %language,
            confidence,
            topic = topic.unwrap_or(""),
            bytes = response.len(),
            "Resolved response"
        );

        Ok(response)
    }

    /// Fragment for `key`: the topic in the language table, then in the
    /// English table, then the overview in the same order
    pub fn lookup(&self, language: Language, key: &str, topic: Option<&str>) -> Option<&str> {
        let native = self.content.table(language).fragment(key);
        let english = self.content.table(Language::English).fragment(key);

        let by_topic = topic.and_then(|t| {
            native
                .and_then(|f| f.topic(t))
                .or_else(|| english.and_then(|f| f.topic(t)))
        });

        by_topic
            .or_else(|| native.and_then(|f| f.overview()))
            .or_else(|| english.and_then(|f| f.overview()))
    }

    /// One variant of `greeting` or `default`, language table first
    pub fn pick(&self, language: Language, key: &str) -> Option<&str> {
        let variants = self
            .content
            .table(language)
            .variants(key)
            .or_else(|| self.content.table(Language::English).variants(key))?;
        self.choose(variants)
    }

    fn choose<'a>(&self, variants: &'a Variants) -> Option<&'a str> {
        match self.selection {
            GreetingSelection::First => variants.first(),
            GreetingSelection::Random => {
                let options = variants.options();
                options.choose(&mut rand::thread_rng()).copied()
            }
        }
    }

    fn contact(&self, language: Language, topic: Option<&str>) -> &str {
        topic
            .and_then(|t| self.content.leadership(t))
            .or_else(|| self.lookup(language, "contact_details", None))
            .unwrap_or(CONTACT_LITERAL)
    }

    fn department_page(
        &self,
        department: Department,
        topic: Option<&str>,
        language: Language,
    ) -> String {
        topic
            .and_then(|t| self.content.department_detail(department, t))
            .or_else(|| self.content.department_detail(department, ABOUT_FIELD))
            .unwrap_or_else(|| self.departments_overview(language))
            .to_string()
    }

    fn departments_overview(&self, language: Language) -> &str {
        self.lookup(language, "department_info", None)
            .unwrap_or(DEPARTMENTS_LITERAL)
    }

    /// Faculty cards for one department, or the overview with a button per department
    pub fn faculty(&self, department: Option<Department>, language: Language) -> String {
        match department {
            Some(department) => {
                faculty::render_department(department, self.content.faculty(department))
            }
            None => {
                let intro = self
                    .lookup(language, "faculty", None)
                    .unwrap_or(FACULTY_LITERAL);
                format!("{}\n{}", intro, faculty::department_buttons())
            }
        }
    }

    pub fn general(&self, language: Language) -> &str {
        self.pick(language, "default").unwrap_or(GENERAL_LITERAL)
    }
}

fn department_entity(entities: &EntityMap) -> Result<Option<Department>, ResolveError> {
    match entities.get(DEPARTMENT_KEY) {
        None => Ok(None),
        Some(key) => Department::from_key(key)
            .map(Some)
            .ok_or_else(|| ResolveError::UnknownDepartment(key.to_string())),
    }
}
