//! College content store
//!
//! The document holds every canned fragment the assistant can return.
//! Fragments are HTML snippets rendered verbatim by the chat widget.

use std::collections::BTreeMap;
use std::path::Path;

use campus_faq_core::{Department, Language};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Topic keys that name the overview entry of a topic map, in lookup order
pub const OVERVIEW_KEYS: &[&str] = &["overview", "main", "default"];

/// One-or-many text variants (greetings, default replies)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variants {
    One(String),
    Many(Vec<String>),
}

impl Variants {
    /// Non-blank variants, in document order
    pub fn options(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            Self::One(text) => vec![text.as_str()],
            Self::Many(items) => items.iter().map(String::as_str).collect(),
        };
        all.into_iter().filter(|v| !v.trim().is_empty()).collect()
    }

    pub fn first(&self) -> Option<&str> {
        self.options().into_iter().next()
    }

    pub fn is_blank(&self) -> bool {
        self.options().is_empty()
    }
}

/// A response entry: either a single fragment or a map of topic to fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Text(String),
    Topics(BTreeMap<String, String>),
}

impl Fragment {
    /// Fragment for a specific topic; plain fragments have no topics
    pub fn topic(&self, topic: &str) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Topics(map) => map.get(topic).map(String::as_str).filter(|t| !is_blank(t)),
        }
    }

    /// The overview: the plain fragment itself, or the first present overview key
    pub fn overview(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()).filter(|t| !is_blank(t)),
            Self::Topics(_) => OVERVIEW_KEYS.iter().find_map(|key| self.topic(key)),
        }
    }

    /// Topic fragment when requested and present, otherwise the overview
    pub fn topic_or_overview(&self, topic: Option<&str>) -> Option<&str> {
        topic.and_then(|t| self.topic(t)).or_else(|| self.overview())
    }

    pub fn is_blank(&self) -> bool {
        self.overview().is_none()
            && match self {
                Self::Text(_) => true,
                Self::Topics(map) => map.values().all(|v| is_blank(v)),
            }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Per-language response table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    #[serde(default)]
    pub greeting: Option<Variants>,
    #[serde(default)]
    pub fees: Option<Fragment>,
    #[serde(default, alias = "admission")]
    pub admission_info: Option<Fragment>,
    #[serde(default, alias = "contact")]
    pub contact_details: Option<Fragment>,
    #[serde(default, alias = "departments")]
    pub department_info: Option<Fragment>,
    #[serde(default)]
    pub faculty: Option<Fragment>,
    #[serde(default)]
    pub placement: Option<Fragment>,
    #[serde(default)]
    pub courses: Option<Fragment>,
    #[serde(default)]
    pub leadership: Option<Fragment>,
    #[serde(default)]
    pub discipline: Option<Fragment>,
    #[serde(default)]
    pub transportation: Option<Fragment>,
    #[serde(default)]
    pub workshop: Option<Fragment>,
    #[serde(default)]
    pub computer_lab: Option<Fragment>,
    #[serde(default)]
    pub library: Option<Fragment>,
    #[serde(default)]
    pub disability: Option<Fragment>,
    #[serde(default)]
    pub default: Option<Variants>,
}

impl ResponseTable {
    /// Look up a fragment entry by its table key (aliases accepted)
    pub fn fragment(&self, key: &str) -> Option<&Fragment> {
        let entry = match key {
            "fees" => &self.fees,
            "admission_info" | "admission" => &self.admission_info,
            "contact_details" | "contact" => &self.contact_details,
            "department_info" | "departments" => &self.department_info,
            "faculty" => &self.faculty,
            "placement" => &self.placement,
            "courses" => &self.courses,
            "leadership" => &self.leadership,
            "discipline" => &self.discipline,
            "transportation" => &self.transportation,
            "workshop" => &self.workshop,
            "computer_lab" => &self.computer_lab,
            "library" => &self.library,
            "disability" => &self.disability,
            _ => return None,
        };
        entry.as_ref().filter(|f| !f.is_blank())
    }

    /// Look up a variants entry (`greeting` or `default`)
    pub fn variants(&self, key: &str) -> Option<&Variants> {
        let entry = match key {
            "greeting" => &self.greeting,
            "default" => &self.default,
            _ => return None,
        };
        entry.as_ref().filter(|v| !v.is_blank())
    }
}

/// A faculty member listed on a department page.
///
/// Empty strings mean the field is not published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
}

/// The full college content document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeContent {
    pub college_name: String,
    pub departments: Vec<String>,
    pub leadership_info: BTreeMap<String, String>,
    pub department_details: BTreeMap<String, BTreeMap<String, String>>,
    pub faculty_data: BTreeMap<String, Vec<FacultyMember>>,
    pub responses: ResponseTable,
    pub hindi_responses: ResponseTable,
    pub hinglish_responses: ResponseTable,
}

impl CollegeContent {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = read_file(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = read_file(path.as_ref())?;
        serde_yaml::from_str(&yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load by extension (`.yaml`/`.yml` as YAML, anything else as JSON) and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            _ => Self::from_json_file(path)?,
        };
        content.validate()?;

        tracing::info!(
            path = %path.display(),
            departments = content.department_details.len(),
            faculty = content.faculty_count(),
            "Loaded college content"
        );

        Ok(content)
    }

    /// Response table for a language
    pub fn table(&self, language: Language) -> &ResponseTable {
        match language {
            Language::English => &self.responses,
            Language::Hindi => &self.hindi_responses,
            Language::Hinglish => &self.hinglish_responses,
        }
    }

    /// A field of a department page (`about`, `vision`, `labs`, ...)
    pub fn department_detail(&self, department: Department, field: &str) -> Option<&str> {
        self.department_details
            .get(department.key())
            .and_then(|page| page.get(field))
            .map(String::as_str)
            .filter(|t| !is_blank(t))
    }

    /// Faculty listed for a department, empty when none are published
    pub fn faculty(&self, department: Department) -> &[FacultyMember] {
        self.faculty_data
            .get(department.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn faculty_count(&self) -> usize {
        self.faculty_data.values().map(Vec::len).sum()
    }

    pub fn leadership(&self, key: &str) -> Option<&str> {
        self.leadership_info
            .get(key)
            .map(String::as_str)
            .filter(|t| !is_blank(t))
    }

    /// Check structural requirements the resolver relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(&self.college_name) {
            return Err(ConfigError::MissingField("college_name".to_string()));
        }

        for key in self.department_details.keys() {
            if Department::from_key(key).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "department_details".to_string(),
                    message: format!("Unknown department key '{}'", key),
                });
            }
        }

        for key in self.faculty_data.keys() {
            if Department::from_key(key).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "faculty_data".to_string(),
                    message: format!("Unknown department key '{}'", key),
                });
            }
        }

        for key in ["greeting", "default"] {
            if self.responses.variants(key).is_none() {
                return Err(ConfigError::MissingField(format!("responses.{}", key)));
            }
        }

        for key in [
            "fees",
            "admission_info",
            "contact_details",
            "department_info",
            "faculty",
        ] {
            if self.responses.fragment(key).is_none() {
                return Err(ConfigError::MissingField(format!("responses.{}", key)));
            }
        }

        for (language, table) in [
            (Language::Hindi, &self.hindi_responses),
            (Language::Hinglish, &self.hinglish_responses),
        ] {
            if table.greeting.is_none() {
                tracing::warn!(
                    language = %language,
                    "No greeting variants; English greetings will be used"
                );
            }
        }

        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}
