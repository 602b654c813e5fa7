//! Intent detection and entity extraction
//!
//! Maps a message to one intent of the closed set using an ordered list of
//! keyword rules. The first rule with any matching keyword wins; later
//! rules are never consulted. Department and topic entities are filled from
//! their own ordered mappings once the intent is known.
//!
//! # Example
//!
//! ```
//! use campus_faq_core::{Intent, Language};
//! use campus_faq_text_processing::IntentExtractor;
//!
//! let extractor = IntentExtractor::new();
//! let result = extractor.extract("Tell me about the mechanical department", Language::English);
//!
//! assert_eq!(result.intent, Intent::Department);
//! assert_eq!(result.entities.get("department"), Some("mechanical"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use campus_faq_core::{
    Department, EntityMap, EntityTagger, Intent, Language, DEPARTMENT_KEY, TOPIC_KEY,
};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::entities::GazetteerTagger;
use crate::{Result, TextProcessingError};

/// Confidence reported when no rule matches
pub const GENERAL_CONFIDENCE: f64 = 0.5;

/// Confidence reported for a department intent with a recognized department
pub const DEPARTMENT_HIT_CONFIDENCE: f64 = 0.9;

/// How a keyword is compared against the lowercased message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    /// Anywhere in the text
    Substring,
    /// Only as a complete word
    WholeWord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: String,
    mode: KeywordMatch,
}

impl Keyword {
    pub fn substring(text: &str) -> Self {
        Self {
            text: text.to_lowercase(),
            mode: KeywordMatch::Substring,
        }
    }

    pub fn whole_word(text: &str) -> Self {
        Self {
            text: text.to_lowercase(),
            mode: KeywordMatch::WholeWord,
        }
    }

    /// Parse the compact rule notation: a leading `=` marks a whole-word keyword
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('=') {
            Some(word) => Self::whole_word(word),
            None => Self::substring(spec),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> KeywordMatch {
        self.mode
    }

    fn matches(&self, message: &Message<'_>) -> bool {
        match self.mode {
            KeywordMatch::Substring => message.lower.contains(&self.text),
            KeywordMatch::WholeWord => message.words.iter().any(|w| *w == self.text),
        }
    }
}

fn keywords(specs: &[&str]) -> Vec<Keyword> {
    specs.iter().map(|s| Keyword::parse(s)).collect()
}

/// Lowercased message with its word segmentation
struct Message<'a> {
    lower: &'a str,
    words: Vec<&'a str>,
}

impl<'a> Message<'a> {
    fn new(lower: &'a str) -> Self {
        Self {
            lower,
            words: lower.unicode_words().collect(),
        }
    }

    fn first_match<'k>(&self, keywords: &'k [Keyword]) -> Option<&'k Keyword> {
        keywords.iter().find(|k| k.matches(self))
    }
}

/// Confidence assigned when a rule fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidencePolicy {
    Fixed(f64),
    /// `base + span * len(keyword) / len(text)`
    Weighted { base: f64, span: f64 },
}

impl ConfidencePolicy {
    pub fn score(&self, keyword: &str, text: &str) -> f64 {
        let score = match *self {
            Self::Fixed(value) => value,
            Self::Weighted { base, span } => {
                let text_len = text.chars().count().max(1) as f64;
                base + span * keyword.chars().count() as f64 / text_len
            }
        };
        score.clamp(0.0, 1.0)
    }
}

/// One entry of the ordered rule list
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<Keyword>,
    pub confidence: ConfidencePolicy,
}

impl IntentRule {
    pub fn new(intent: Intent, keywords: Vec<Keyword>, confidence: ConfidencePolicy) -> Self {
        Self {
            intent,
            keywords,
            confidence,
        }
    }

    fn from_specs(intent: Intent, specs: &[&str], confidence: ConfidencePolicy) -> Self {
        Self::new(intent, keywords(specs), confidence)
    }
}

/// Intent, entities and confidence for one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub intent: Intent,
    pub entities: EntityMap,
    pub confidence: f64,
}

/// Ordered surface variants per canonical department
pub fn default_department_variants() -> Vec<(Department, Vec<Keyword>)> {
    vec![
        (
            Department::Computer,
            keywords(&[
                "computer",
                "=cs",
                "cse",
                "computer science",
                "computer engineering",
                "कंप्यूटर",
            ]),
        ),
        (
            Department::Mechanical,
            keywords(&["mechanical", "mech", "mechanical engineering", "मैकेनिकल"]),
        ),
        (
            Department::Electrical,
            keywords(&["electrical", "=ee", "electrical engineering", "इलेक्ट्रिकल"]),
        ),
        (Department::Civil, keywords(&["civil", "civil engineering", "सिविल"])),
        (
            Department::It,
            keywords(&["=it", "information technology", "आईटी"]),
        ),
    ]
}

/// Ordered topic keywords per intent; keys match the content table topics
pub fn default_topics() -> HashMap<Intent, Vec<(&'static str, Vec<Keyword>)>> {
    let mut topics = HashMap::new();

    topics.insert(
        Intent::Fees,
        vec![
            ("payment", keywords(&["payment", "installment", "=pay", "=emi", "किस्त"])),
            ("scholarship", keywords(&["scholarship", "waiver", "छात्रवृत्ति"])),
        ],
    );

    topics.insert(
        Intent::Department,
        vec![
            ("vision", keywords(&["vision", "दृष्टि"])),
            ("mission", keywords(&["mission", "मिशन"])),
            ("labs", keywords(&["lab", "laborator", "प्रयोगशाला"])),
            ("programs", keywords(&["program", "course"])),
            ("research", keywords(&["research", "शोध"])),
            ("activities", keywords(&["activit", "event"])),
            ("achievements", keywords(&["achievement", "award"])),
            ("infrastructure", keywords(&["infrastructure", "facilit"])),
        ],
    );

    topics.insert(
        Intent::Contact,
        vec![
            ("president", keywords(&["president", "अध्यक्ष"])),
            ("principal", keywords(&["principal", "प्राचार्य"])),
            ("director", keywords(&["director", "निदेशक"])),
            ("address", keywords(&["address", "location", "पता"])),
            ("admission", keywords(&["enquiry", "inquiry", "helpline"])),
        ],
    );

    topics.insert(
        Intent::Discipline,
        vec![
            ("attendance", keywords(&["attend"])),
            ("ragging", keywords(&["ragg"])),
            ("anti_social", keywords(&["anti", "social"])),
            ("uniform", keywords(&["uniform", "dress"])),
            ("library", keywords(&["library"])),
            ("behavior", keywords(&["behav"])),
            ("schedule", keywords(&["schedule", "=time", "timing"])),
            ("conduct", keywords(&["conduct"])),
            ("general", keywords(&["general", "=code"])),
            ("full", keywords(&["=all", "complete"])),
        ],
    );

    topics.insert(
        Intent::Transportation,
        vec![
            ("features", keywords(&["feature"])),
            ("schedule", keywords(&["schedule", "=time", "timing"])),
        ],
    );

    topics.insert(
        Intent::Workshop,
        vec![
            ("fitting", keywords(&["fitting"])),
            ("carpentry", keywords(&["carpent"])),
            ("welding", keywords(&["weld"])),
        ],
    );

    topics.insert(
        Intent::Library,
        vec![
            ("services", keywords(&["service"])),
            ("facilities", keywords(&["facilit"])),
        ],
    );

    topics.insert(
        Intent::Disability,
        vec![
            ("support", keywords(&["support", "service"])),
            ("access", keywords(&["physical", "ramp", "wheelchair"])),
            ("learning", keywords(&["learn", "exam", "software"])),
            ("campus", keywords(&["campus", "hostel", "parking"])),
            ("contact", keywords(&["contact", "help", "assist"])),
        ],
    );

    topics
}

/// The ordered rule list, in global priority order
pub fn default_rules() -> Vec<IntentRule> {
    use ConfidencePolicy::{Fixed, Weighted};

    let weighted = Weighted {
        base: 0.8,
        span: 0.2,
    };

    vec![
        IntentRule::from_specs(
            Intent::Greeting,
            &[
                "hello",
                "=hi",
                "=hey",
                "namaste",
                "namaskar",
                "good morning",
                "good afternoon",
                "good evening",
                "=hii",
                "helo",
                "kaise ho",
                "kya haal",
                "=sup",
                "नमस्ते",
                "नमस्कार",
            ],
            Fixed(0.9),
        ),
        IntentRule::from_specs(
            Intent::Fees,
            &[
                "fee",
                "fees",
                "cost",
                "price",
                "amount",
                "charge",
                "tuition",
                "payment",
                "scholarship",
                "kitni fees",
                "fees kitni",
                "paisa",
                "rupee",
                "fees kya hai",
                "फीस",
                "शुल्क",
            ],
            weighted,
        ),
        IntentRule::from_specs(
            Intent::Admission,
            &[
                "admission",
                "apply",
                "application",
                "entrance",
                "eligibility",
                "process",
                "procedure",
                "=form",
                "admission kaise",
                "apply kaise",
                "प्रवेश",
                "दाखिला",
                "admission process",
            ],
            weighted,
        ),
        IntentRule::from_specs(
            Intent::Faculty,
            &[
                "faculty",
                "teacher",
                "professor",
                "staff",
                "=hod",
                "=head",
                "शिक्षक",
                "प्रोफेसर",
                "kaun hain",
                "faculty kaun",
            ],
            weighted,
        ),
        IntentRule::from_specs(
            Intent::Contact,
            &[
                "contact",
                "phone",
                "email",
                "address",
                "location",
                "president",
                "principal",
                "director",
                "संपर्क",
                "पता",
                "contact kaise",
            ],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Placement,
            &[
                "placement",
                "=job",
                "=jobs",
                "career",
                "company",
                "package",
                "salary",
                "recruit",
                "नौकरी",
                "placement details",
            ],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Discipline,
            &[
                "discipline",
                "rules",
                "regulation",
                "ragging",
                "attendance",
                "uniform",
                "dress code",
                "अनुशासन",
                "नियम",
            ],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Transportation,
            &["transport", "=bus", "=buses", "shuttle", "परिवहन", "बस"],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Workshop,
            &["workshop", "fitting", "carpentry", "welding", "कार्यशाला"],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Library,
            &["library", "books", "reading room", "पुस्तकालय"],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Disability,
            &[
                "disab",
                "accessib",
                "wheelchair",
                "special need",
                "divyang",
                "विकलांग",
                "दिव्यांग",
            ],
            Fixed(0.8),
        ),
        IntentRule::from_specs(
            Intent::Department,
            &[
                "department",
                "branch",
                "course",
                "program",
                "engineering",
                "computer",
                "mechanical",
                "electrical",
                "civil",
                "=it",
                "information technology",
                "cse",
                "विभाग",
                "शाखा",
                "कोर्स",
                "baare mein",
                "about",
                "ke baare mein",
            ],
            Fixed(0.9),
        ),
    ]
}

/// Rule-based intent and entity extractor
pub struct IntentExtractor {
    rules: Vec<IntentRule>,
    departments: Vec<(Department, Vec<Keyword>)>,
    topics: HashMap<Intent, Vec<(&'static str, Vec<Keyword>)>>,
    tagger: Arc<dyn EntityTagger>,
}

impl IntentExtractor {
    /// Extractor with the default rules and a gazetteer tagger without people
    pub fn new() -> Self {
        Self::with_tagger(Arc::new(GazetteerTagger::new()))
    }

    /// Extractor with the default rules and an injected entity tagger
    pub fn with_tagger(tagger: Arc<dyn EntityTagger>) -> Self {
        Self {
            rules: default_rules(),
            departments: default_department_variants(),
            topics: default_topics(),
            tagger,
        }
    }

    /// Replace the rule list.
    ///
    /// Each intent may appear at most once, `general` never, and every rule
    /// needs at least one keyword.
    pub fn with_rules(mut self, rules: Vec<IntentRule>) -> Result<Self> {
        let mut seen = Vec::with_capacity(rules.len());
        for rule in &rules {
            if rule.intent == Intent::General {
                return Err(TextProcessingError::InvalidRule(
                    "general is the no-match result and cannot have a rule".to_string(),
                ));
            }
            if rule.keywords.iter().all(|k| k.text().is_empty()) {
                return Err(TextProcessingError::InvalidRule(format!(
                    "rule for {} has no keywords",
                    rule.intent
                )));
            }
            if seen.contains(&rule.intent) {
                return Err(TextProcessingError::InvalidRule(format!(
                    "duplicate rule for {}",
                    rule.intent
                )));
            }
            seen.push(rule.intent);
        }
        self.rules = rules;
        Ok(self)
    }

    /// Intents in evaluation order
    pub fn priority(&self) -> Vec<Intent> {
        self.rules.iter().map(|r| r.intent).collect()
    }

    /// Detect intent and entities for a message
    pub fn extract(&self, text: &str, language: Language) -> Extraction {
        let lower = text.to_lowercase();
        let message = Message::new(&lower);

        let mut entities = EntityMap::new();
        match self.tagger.tag(&lower, language) {
            Ok(spans) => entities.extend_spans(&spans),
            Err(e) => {
                tracing::warn!(tagger = self.tagger.name(), error = %e, "Entity tagging failed");
            }
        }

        let (intent, mut confidence) = self
            .rules
            .iter()
            .find_map(|rule| {
                message
                    .first_match(&rule.keywords)
                    .map(|keyword| (rule.intent, rule.confidence.score(keyword.text(), &lower)))
            })
            .unwrap_or((Intent::General, GENERAL_CONFIDENCE));

        if intent.uses_department() {
            if let Some(department) = self.find_department(&message) {
                entities.insert(DEPARTMENT_KEY, department.key());
                if intent == Intent::Department {
                    confidence = DEPARTMENT_HIT_CONFIDENCE;
                }
            }
        }

        if let Some(topic) = self.find_topic(intent, &message) {
            entities.insert(TOPIC_KEY, topic);
        }

        tracing::debug!(
            %intent,
            %language,
            confidence,
            entities = entities.len(),
            "Extracted intent"
        );

        Extraction {
            intent,
            entities,
            confidence,
        }
    }

    fn find_department(&self, message: &Message<'_>) -> Option<Department> {
        self.departments
            .iter()
            .find(|(_, variants)| message.first_match(variants).is_some())
            .map(|(department, _)| *department)
    }

    fn find_topic(&self, intent: Intent, message: &Message<'_>) -> Option<&'static str> {
        self.topics
            .get(&intent)?
            .iter()
            .find(|(_, keywords)| message.first_match(keywords).is_some())
            .map(|(topic, _)| *topic)
    }
}

impl Default for IntentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IntentExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentExtractor")
            .field("priority", &self.priority())
            .field("tagger", &self.tagger.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_faq_core::{EntitySpan, Error as CoreError, Result as CoreResult};

    fn extract(text: &str) -> Extraction {
        IntentExtractor::new().extract(text, Language::English)
    }

    #[test]
    fn test_greeting() {
        let result = extract("Hello");
        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.confidence, 0.9);

        assert_eq!(extract("hi there").intent, Intent::Greeting);
        assert_eq!(extract("नमस्ते").intent, Intent::Greeting);
    }

    #[test]
    fn test_short_keywords_need_word_boundaries() {
        // "this" contains "hi", "information" contains "form"
        assert_eq!(extract("what is this").intent, Intent::General);
        assert_eq!(extract("contact information").intent, Intent::Contact);
        // "with" contains "it"
        assert_eq!(extract("help with something").intent, Intent::General);
        assert_eq!(extract("tell me about it").entities.department(), Some(Department::It));
        // "ahead" contains "head"
        assert_eq!(extract("go ahead").intent, Intent::General);
        assert_eq!(extract("who is the head of civil").intent, Intent::Faculty);
    }

    #[test]
    fn test_first_rule_wins() {
        // Greeting precedes fees
        assert_eq!(extract("hello, what are the fees?").intent, Intent::Greeting);
        // Fees precedes department
        let result = extract("computer engineering fees");
        assert_eq!(result.intent, Intent::Fees);
        assert!(result.entities.department().is_none());
    }

    #[test]
    fn test_faculty_precedes_department() {
        let result = extract("computer faculty");
        assert_eq!(result.intent, Intent::Faculty);
        assert_eq!(result.entities.department(), Some(Department::Computer));
    }

    #[test]
    fn test_weighted_confidence() {
        let result = IntentExtractor::new().extract("Fees kya hai?", Language::Hinglish);
        assert_eq!(result.intent, Intent::Fees);
        // "fee" is the first listed keyword that matches: 0.8 + 0.2 * 3 / 13
        let expected = 0.8 + 0.2 * 3.0 / 13.0;
        assert!((result.confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn test_department_entity() {
        let result = IntentExtractor::new()
            .extract("Computer engineering ke baare mein batao", Language::Hinglish);
        assert_eq!(result.intent, Intent::Department);
        assert_eq!(result.entities.get(DEPARTMENT_KEY), Some("computer"));
        assert_eq!(result.confidence, DEPARTMENT_HIT_CONFIDENCE);
        assert_eq!(result.entities.topic(), None);
    }

    #[test]
    fn test_department_mapping_order() {
        // Computer is checked before civil regardless of position in text
        let result = extract("civil or computer department");
        assert_eq!(result.entities.department(), Some(Department::Computer));

        let result = IntentExtractor::new().extract("सिविल विभाग", Language::Hindi);
        assert_eq!(result.intent, Intent::Department);
        assert_eq!(result.entities.department(), Some(Department::Civil));
    }

    #[test]
    fn test_department_topics() {
        let result = extract("Mechanical engineering vision");
        assert_eq!(result.intent, Intent::Department);
        assert_eq!(result.entities.department(), Some(Department::Mechanical));
        assert_eq!(result.entities.topic(), Some("vision"));

        let result = extract("labs in electrical engineering");
        assert_eq!(result.entities.department(), Some(Department::Electrical));
        assert_eq!(result.entities.topic(), Some("labs"));
    }

    #[test]
    fn test_other_intents() {
        let cases = [
            ("Admission process kya hai?", Intent::Admission),
            ("Faculty kaun hain?", Intent::Faculty),
            ("Placement details", Intent::Placement),
            ("who is the principal", Intent::Contact),
            ("what are the attendance rules", Intent::Discipline),
            ("bus timings", Intent::Transportation),
            ("welding section", Intent::Workshop),
            ("library services", Intent::Library),
            ("wheelchair access", Intent::Disability),
            ("Civil department about", Intent::Department),
            ("what is the weather", Intent::General),
        ];
        for (text, intent) in cases {
            assert_eq!(extract(text).intent, intent, "{text}");
        }
    }

    #[test]
    fn test_topics() {
        assert_eq!(extract("fee payment options").entities.topic(), Some("payment"));
        assert_eq!(extract("any scholarship?").entities.topic(), Some("scholarship"));
        assert_eq!(extract("principal contact").entities.topic(), Some("principal"));
        assert_eq!(extract("bus timings").entities.topic(), Some("schedule"));
        assert_eq!(extract("ragging rules").entities.topic(), Some("ragging"));
        assert_eq!(extract("welding workshop").entities.topic(), Some("welding"));
        assert_eq!(extract("wheelchair ramp").entities.topic(), Some("access"));
        assert_eq!(extract("library").entities.topic(), None);
    }

    #[test]
    fn test_general_default() {
        let result = extract("");
        assert_eq!(result.intent, Intent::General);
        assert_eq!(result.confidence, GENERAL_CONFIDENCE);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_tagger_spans_seed_entities() {
        let result = extract("admission in june 2025 at arvi");
        assert_eq!(result.intent, Intent::Admission);
        assert_eq!(result.entities.get("DATE"), Some("2025"));
        assert_eq!(result.entities.get("GPE"), Some("arvi"));
    }

    struct BrokenTagger;

    impl EntityTagger for BrokenTagger {
        fn tag(&self, _text: &str, _language: Language) -> CoreResult<Vec<EntitySpan>> {
            Err(CoreError::Tagging("model unavailable".into()))
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_tagger_failure_is_ignored() {
        let extractor = IntentExtractor::with_tagger(Arc::new(BrokenTagger));
        let result = extractor.extract("civil engineering", Language::English);
        assert_eq!(result.intent, Intent::Department);
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities.department(), Some(Department::Civil));
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![IntentRule::new(
            Intent::Library,
            vec![Keyword::substring("books")],
            ConfidencePolicy::Fixed(0.7),
        )];
        let extractor = IntentExtractor::new().with_rules(rules).unwrap();
        assert_eq!(extractor.priority(), vec![Intent::Library]);

        let result = extractor.extract("hello, any books?", Language::English);
        assert_eq!(result.intent, Intent::Library);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let general = vec![IntentRule::new(
            Intent::General,
            vec![Keyword::substring("x")],
            ConfidencePolicy::Fixed(0.5),
        )];
        assert!(IntentExtractor::new().with_rules(general).is_err());

        let duplicate = vec![
            IntentRule::new(Intent::Fees, vec![Keyword::substring("fee")], ConfidencePolicy::Fixed(0.8)),
            IntentRule::new(Intent::Fees, vec![Keyword::substring("cost")], ConfidencePolicy::Fixed(0.8)),
        ];
        assert!(IntentExtractor::new().with_rules(duplicate).is_err());

        let empty = vec![IntentRule::new(Intent::Fees, vec![], ConfidencePolicy::Fixed(0.8))];
        assert!(IntentExtractor::new().with_rules(empty).is_err());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let policy = ConfidencePolicy::Weighted { base: 0.9, span: 0.5 };
        assert_eq!(policy.score("hello", "hello"), 1.0);
        assert_eq!(ConfidencePolicy::Fixed(1.4).score("a", "a"), 1.0);
    }

    #[test]
    fn test_priority_order() {
        let priority = IntentExtractor::new().priority();
        assert_eq!(priority.first(), Some(&Intent::Greeting));
        assert_eq!(priority.last(), Some(&Intent::Department));
        assert_eq!(priority.len(), Intent::all().len() - 1);
    }

    #[test]
    fn test_extraction_serializes() {
        let result = extract("Tell me about civil labs");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "intent": "department",
                "entities": {"department": "civil", "topic": "labs"},
                "confidence": 0.9
            })
        );
    }
}
