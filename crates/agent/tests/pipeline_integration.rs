//! Integration tests for the FAQ pipeline (classify -> extract -> resolve)
//!
//! These run against the shipped college content document.

use std::sync::Arc;

use campus_faq_agent::{
    AgentError, FaqPipeline, ReplySource, ResponseResolver, DEFAULT_APOLOGY, DEFAULT_EMPTY_PROMPT,
};
use campus_faq_config::{CollegeContent, GreetingSelection, Settings};
use campus_faq_core::{Department, Intent, Language};
use campus_faq_text_processing::{IntentExtractor, LanguageClassifier};

/// Content with no library table and no default reply
const SPARSE: &str = r#"{
    "college_name": "Test College",
    "departments": ["Civil Engineering"],
    "leadership_info": {"principal": "Principal: Dr. Test"},
    "department_details": {"civil": {"about": "Civil about"}},
    "faculty_data": {"civil": [{"name": "Prof. B", "email": "b@test.in"}]},
    "responses": {
        "greeting": "Hello",
        "fees": "Fees overview",
        "admission_info": "Admissions open",
        "contact_details": "Call us",
        "department_info": "One department",
        "faculty": "Faculty intro"
    },
    "hindi_responses": {},
    "hinglish_responses": {}
}"#;

fn content() -> Arc<CollegeContent> {
    let json = include_str!("../../../config/college_data.json");
    let content = CollegeContent::from_json_str(json).expect("shipped content parses");
    content.validate().expect("shipped content is valid");
    Arc::new(content)
}

fn pipeline() -> FaqPipeline {
    FaqPipeline::new(content())
}

#[test]
fn test_hello_is_an_english_greeting() {
    let pipeline = pipeline();
    let reply = pipeline.answer("Hello").unwrap();

    assert_eq!(reply.intent, Intent::Greeting);
    assert_eq!(reply.language, Language::English);
    assert_eq!(reply.confidence, 0.9);

    let greetings = pipeline.content().responses.greeting.as_ref().unwrap().options();
    assert!(greetings.contains(&reply.response.as_str()));
}

#[test]
fn test_hinglish_fee_question() {
    let pipeline = pipeline();
    let reply = pipeline.answer("Fees kya hai?").unwrap();

    assert_eq!(reply.language, Language::Hinglish);
    assert_eq!(reply.intent, Intent::Fees);

    let overview = pipeline
        .content()
        .hinglish_responses
        .fees
        .as_ref()
        .and_then(|f| f.overview())
        .unwrap();
    assert_eq!(reply.response, overview);
}

#[test]
fn test_department_about_page() {
    let pipeline = pipeline();
    let reply = pipeline
        .answer("Computer engineering ke baare mein batao")
        .unwrap();

    assert_eq!(reply.intent, Intent::Department);
    assert_eq!(reply.entities.get("department"), Some("computer"));
    assert_eq!(reply.confidence, 0.9);

    let about = pipeline
        .content()
        .department_detail(Department::Computer, "about")
        .unwrap();
    assert_eq!(reply.response, about);
}

#[test]
fn test_department_topic_page() {
    let pipeline = pipeline();
    let reply = pipeline.answer("What is the vision of the IT department?").unwrap();

    assert_eq!(reply.intent, Intent::Department);
    assert_eq!(reply.entities.department(), Some(Department::It));
    assert_eq!(reply.entities.topic(), Some("vision"));
    assert_eq!(
        reply.response,
        pipeline.content().department_detail(Department::It, "vision").unwrap()
    );
}

#[test]
fn test_hindi_question() {
    let pipeline = pipeline();
    let reply = pipeline.answer("फीस कितनी है?").unwrap();

    assert_eq!(reply.language, Language::Hindi);
    assert_eq!(reply.intent, Intent::Fees);

    let overview = pipeline
        .content()
        .hindi_responses
        .fees
        .as_ref()
        .and_then(|f| f.overview())
        .unwrap();
    assert_eq!(reply.response, overview);
}

#[test]
fn test_department_faculty_cards() {
    let pipeline = pipeline();
    let reply = pipeline.answer("mechanical faculty").unwrap();

    assert_eq!(reply.intent, Intent::Faculty);
    assert_eq!(reply.entities.department(), Some(Department::Mechanical));
    assert!(reply.response.contains("Mechanical Engineering Faculty"));
    for member in pipeline.content().faculty(Department::Mechanical) {
        assert!(reply.response.contains(&member.name));
    }
}

#[test]
fn test_faculty_surnames_are_tagged() {
    let pipeline = pipeline();
    let content = pipeline.content();
    let member = &content.faculty(Department::Computer)[0];
    let surname = member
        .name
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| w.chars().count() >= 4)
        .last()
        .unwrap()
        .to_lowercase();

    let reply = pipeline
        .answer(&format!("is {} a professor here", surname))
        .unwrap();
    assert_eq!(reply.entities.get("PERSON"), Some(surname.as_str()));
}

#[test]
fn test_unmatched_question_is_general() {
    let pipeline = pipeline();
    let reply = pipeline.answer("What is the weather like today?").unwrap();

    assert_eq!(reply.intent, Intent::General);
    assert_eq!(reply.confidence, 0.5);
    assert!(!reply.response.is_empty());
}

#[test]
fn test_empty_input_prompts() {
    let pipeline = pipeline();
    assert!(pipeline.answer("   ").is_err());

    let reply = pipeline.answer_with_fallback("   ");
    assert_eq!(reply.response, DEFAULT_EMPTY_PROMPT);
    assert_eq!(reply.source, ReplySource::EmptyInput);
    assert_eq!(reply.language, None);
    assert_eq!(reply.intent, None);
}

#[test]
fn test_pipeline_error_uses_keyword_fallback() {
    let content = Arc::new(CollegeContent::from_json_str(SPARSE).unwrap());
    // A blank apology turns the missing library content into a pipeline error
    let resolver = ResponseResolver::new(content).with_apology("");
    let pipeline = FaqPipeline::with_components(
        LanguageClassifier::default(),
        IntentExtractor::new(),
        resolver,
        DEFAULT_EMPTY_PROMPT,
    );

    assert!(matches!(
        pipeline.answer("library hours"),
        Err(AgentError::Internal(_))
    ));

    let reply = pipeline.answer_with_fallback("library hours");
    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(reply.response.contains("college information"));
    assert_eq!(reply.intent, None);
    assert_eq!(reply.language, None);
    assert_eq!(reply.confidence, None);
}

#[test]
fn test_one_apology_everywhere() {
    let settings = Settings::default();
    assert_eq!(settings.responses.apology, DEFAULT_APOLOGY);
    assert_eq!(ResponseResolver::new(content()).apology(), DEFAULT_APOLOGY);
    assert_eq!(
        FaqPipeline::from_settings(&settings, content()).resolver().apology(),
        DEFAULT_APOLOGY
    );
}

#[test]
fn test_answers_are_idempotent() {
    let pipeline = pipeline();
    for text in ["Hello", "Fees kya hai?", "Placement details", "नमस्ते", "library services"] {
        let first = pipeline.answer(text).unwrap();
        let second = pipeline.answer(text).unwrap();
        assert_eq!(first, second, "{text}");
    }
}

#[test]
fn test_confidence_stays_in_range() {
    let pipeline = pipeline();
    for text in [
        "fee",
        "Admission process kya hai?",
        "Who is the principal?",
        "bus timing",
        "wheelchair access",
        "?",
    ] {
        let reply = pipeline.answer(text).unwrap();
        assert!((0.0..=1.0).contains(&reply.confidence), "{text}");
        assert!(!reply.response.trim().is_empty(), "{text}");
    }
}

#[test]
fn test_handler_reply_serialization() {
    let pipeline = pipeline();

    let reply = pipeline.answer_with_fallback("Hello");
    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["intent"], "greeting");
    assert_eq!(json["language"], "english");
    assert_eq!(json["confidence"], 0.9);

    let fallback = pipeline.fallback_reply("civil faculty");
    assert_eq!(fallback.source, ReplySource::Fallback);
    assert!(fallback.response.contains("Civil Engineering Faculty"));
    let json = serde_json::to_value(&fallback).unwrap();
    assert!(json.get("intent").is_none());
    assert!(json.get("source").is_none());
}

#[test]
fn test_settings_drive_responses() {
    let mut settings = Settings::default();
    settings.responses.greeting_selection = GreetingSelection::Random;
    settings.responses.empty_prompt = "Type something".to_string();
    settings.classifier.hinglish_markers = vec!["bolo".to_string()];

    let pipeline = FaqPipeline::from_settings(&settings, content());
    assert_eq!(pipeline.answer_with_fallback("").response, "Type something");
    assert_eq!(pipeline.classifier().markers(), &["bolo".to_string()]);

    let greetings = pipeline.content().responses.greeting.as_ref().unwrap().options();
    for _ in 0..10 {
        let reply = pipeline.answer("hello").unwrap();
        assert!(greetings.contains(&reply.response.as_str()));
    }
}

#[tokio::test]
async fn test_shared_pipeline_across_tasks() {
    let pipeline = Arc::new(pipeline());
    let expected = pipeline.answer("Contact information").unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::task::spawn_blocking(move || {
            pipeline.answer("Contact information")
        }));
    }

    for handle in handles {
        let reply = handle.await.unwrap().unwrap();
        assert_eq!(reply, expected);
        assert_eq!(reply.intent, Intent::Contact);
    }
}
