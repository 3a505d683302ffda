//! Integration tests for the intake pipeline.

use std::io;

use tfwise_intake::{
    enrich_answers, ElicitationSession, Prompter, QuestionCatalog, ServiceQuestionSet,
};

struct ScriptedPrompter {
    inputs: Vec<String>,
    cursor: usize,
}

impl ScriptedPrompter {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            cursor: 0,
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, _text: &str) {}

    fn ask(&mut self, _prompt: &str) -> io::Result<String> {
        let input = self.inputs.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        Ok(input)
    }
}

fn catalog() -> QuestionCatalog {
    QuestionCatalog::parse(
        "\
Service-name: GENERAL
Questions:
- What is the project called?

Service-name: VPC
Questions:
- What environment and scale is this network for?

Service-name: RDS
Questions:
- Which database engine do you prefer?
",
    )
}

/// Full elicit-then-infer pass: raw answers are namespaced per service and
/// keyword rules contribute derived values.
#[test]
fn elicitation_and_inference_end_to_end() {
    let mut prompter = ScriptedPrompter::new(&[
        "all",
        "acme-shop",
        "production, enterprise scale",
        "postgres please",
    ]);
    let mut session = ElicitationSession::new(&mut prompter);
    let records = session.collect_answers(&catalog()).unwrap();
    assert_eq!(records.len(), 3);

    let set = enrich_answers(&records);

    assert_eq!(set.get("general_q1"), Some("acme-shop"));
    assert_eq!(set.get("vpc_q1"), Some("production, enterprise scale"));
    assert_eq!(set.get("rds_q1"), Some("postgres please"));

    assert_eq!(set.get("vpc_environment"), Some("production"));
    assert_eq!(set.get("vpc_enable_flow_logs"), Some("true"));
    assert_eq!(set.get("vpc_suggested_cidr"), Some("10.0.0.0/16"));
    assert_eq!(set.get("rds_suggested_engine"), Some("postgres"));
    assert_eq!(set.get("rds_suggested_version"), Some("14"));
}

/// The persisted format is the parse grammar: serialize then parse is the
/// identity.
#[test]
fn catalog_persistence_is_idempotent() {
    let original = catalog();
    let reparsed = QuestionCatalog::parse(&original.serialize());
    assert_eq!(reparsed, original);

    // And a second round changes nothing further.
    assert_eq!(QuestionCatalog::parse(&reparsed.serialize()), reparsed);
}

/// Selecting a subset still forces the GENERAL bucket to run first.
#[test]
fn subset_selection_keeps_general_first() {
    let mut prompter = ScriptedPrompter::new(&["3", "acme-shop", "mysql for the app"]);
    let mut session = ElicitationSession::new(&mut prompter);
    let records = session.collect_answers(&catalog()).unwrap();

    assert_eq!(records[0].service, "GENERAL");
    assert_eq!(records[1].service, "RDS");

    let set = enrich_answers(&records);
    assert_eq!(set.get("rds_suggested_engine"), Some("mysql"));
    assert_eq!(set.get("rds_suggested_version"), Some("8.0"));
}

#[test]
fn empty_catalog_collects_nothing() {
    let mut prompter = ScriptedPrompter::new(&[]);
    let mut session = ElicitationSession::new(&mut prompter);
    let records = session.collect_answers(&QuestionCatalog::new()).unwrap();
    assert!(records.is_empty());

    let empty = ServiceQuestionSet {
        service: "VPC".to_string(),
        questions: Vec::new(),
    };
    let mut catalog = QuestionCatalog::new();
    catalog.push(empty);
    assert!(catalog.is_empty());
}
