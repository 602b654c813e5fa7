//! Keyword fallback
//!
//! A plain keyword chain used when the main pipeline fails. It does no
//! language detection beyond a whole-word Hinglish token check and no
//! entity extraction. Routes are tried in order and the first hit wins;
//! within a route the first matching topic selects the fragment.
//!
//! Triggers use the same compact notation as the intent rules: a leading
//! `=` matches a whole word only, anything else matches as a substring.

use std::sync::Arc;

use campus_faq_core::{Department, Language};
use campus_faq_text_processing::hindi;

use crate::resolver::ResponseResolver;

/// A route that reads one topic table
struct TopicRoute {
    key: &'static str,
    triggers: &'static [&'static str],
    topics: &'static [(&'static str, &'static [&'static str])],
}

const LEADERSHIP_ROUTES: &[(&str, &str)] = &[
    ("president", "president"),
    ("principal", "principal"),
    ("director", "director"),
    ("address", "address"),
];

const TOPIC_ROUTES: &[TopicRoute] = &[
    TopicRoute {
        key: "discipline",
        triggers: &["discipline", "rules", "regulation"],
        topics: &[
            ("attendance", &["attend"]),
            ("ragging", &["ragg"]),
            ("anti_social", &["anti", "social"]),
            ("uniform", &["uniform", "dress"]),
            ("library", &["library"]),
            ("behavior", &["behav"]),
            ("schedule", &["schedule", "=time"]),
            ("conduct", &["conduct"]),
            ("general", &["general", "=code"]),
            ("full", &["=all", "complete"]),
        ],
    },
    TopicRoute {
        key: "transportation",
        triggers: &["transport", "=bus", "=buses"],
        topics: &[("features", &["feature"]), ("schedule", &["schedule", "=time"])],
    },
    TopicRoute {
        key: "workshop",
        triggers: &["workshop"],
        topics: &[
            ("fitting", &["fitting"]),
            ("carpentry", &["carpent"]),
            ("welding", &["weld"]),
        ],
    },
    TopicRoute {
        key: "computer_lab",
        triggers: &["computer", "lab"],
        topics: &[("features", &["feature"]), ("resources", &["resource"])],
    },
    TopicRoute {
        key: "library",
        triggers: &["library"],
        topics: &[("services", &["service"]), ("facilities", &["facilit"])],
    },
    TopicRoute {
        key: "fees",
        triggers: &["fee", "payment", "scholarship"],
        topics: &[("payment", &["payment", "=pay"]), ("scholarship", &["scholarship"])],
    },
    TopicRoute {
        key: "disability",
        triggers: &["disab", "accessib", "special need"],
        topics: &[
            ("support", &["support", "service"]),
            ("access", &["physical", "ramp", "wheelchair"]),
            ("learning", &["learn", "exam", "software"]),
            ("campus", &["campus", "hostel", "parking"]),
            ("contact", &["contact", "help", "assist"]),
        ],
    },
];

const FACULTY_DEPARTMENTS: &[(Department, &[&str])] = &[
    (Department::Civil, &["civil"]),
    (Department::Mechanical, &["mechanical"]),
    (Department::Electrical, &["electrical"]),
    (Department::Computer, &["computer", "cse"]),
    (Department::It, &["information technology", "=it"]),
];

/// Lowercased message with its words
struct Probe {
    lower: String,
    words: Vec<String>,
}

impl Probe {
    fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { lower, words }
    }

    fn hit(&self, trigger: &str) -> bool {
        match trigger.strip_prefix('=') {
            Some(word) => self.words.iter().any(|w| w == word),
            None => self.lower.contains(trigger),
        }
    }

    fn any(&self, triggers: &[&str]) -> bool {
        triggers.iter().any(|t| self.hit(t))
    }
}

/// Non-NLP keyword chain over the same content as the resolver
#[derive(Debug, Clone)]
pub struct KeywordFallback {
    resolver: Arc<ResponseResolver>,
}

impl KeywordFallback {
    pub fn new(resolver: Arc<ResponseResolver>) -> Self {
        Self { resolver }
    }

    /// Reply language: Hinglish when a romanized Hindi token is present
    pub fn language(&self, text: &str) -> Language {
        if hindi::has_hinglish_token(text) {
            Language::Hinglish
        } else {
            Language::English
        }
    }

    /// Answer `text`; never empty
    pub fn respond(&self, text: &str) -> String {
        let probe = Probe::new(text);
        let language = self.language(text);
        let r = &self.resolver;

        let response = if probe.any(&["=hi", "hello", "=hey", "namaste"]) {
            r.pick(language, "greeting").map(str::to_string)
        } else if probe.any(&["department", "branch"]) {
            r.lookup(language, "department_info", None).map(str::to_string)
        } else if probe.any(&["course", "program"]) {
            r.lookup(language, "courses", None).map(str::to_string)
        } else if probe.any(&["date", "when", "admission"]) {
            r.lookup(language, "admission_info", None).map(str::to_string)
        } else if probe.any(&["contact", "phone", "email"]) {
            r.lookup(language, "contact_details", None).map(str::to_string)
        } else if probe.any(&["faculty", "professor", "teacher"]) {
            let department = FACULTY_DEPARTMENTS
                .iter()
                .find(|(_, triggers)| probe.any(triggers))
                .map(|(d, _)| *d);
            Some(r.faculty(department, language))
        } else if let Some((_, key)) = LEADERSHIP_ROUTES.iter().find(|(t, _)| probe.hit(t)) {
            r.content().leadership(key).map(str::to_string)
        } else if probe.hit("college") && probe.any(&["about", "info"]) {
            r.lookup(Language::English, "leadership", None).map(str::to_string)
        } else if let Some(route) = TOPIC_ROUTES.iter().find(|route| probe.any(route.triggers)) {
            let topic = route
                .topics
                .iter()
                .find(|(_, triggers)| probe.any(triggers))
                .map(|(topic, _)| *topic);
            r.lookup(language, route.key, topic).map(str::to_string)
        } else {
            None
        };

        let response = response
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| r.general(language).to_string());

        tracing::debug!(%language, bytes = response.len(), "Keyword fallback reply");
        response
    }
}
