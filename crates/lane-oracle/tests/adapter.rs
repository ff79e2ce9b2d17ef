//! Oracle adapter behavior over the scripted transport.

use lane_oracle::{
    DisambiguationOracle, OracleAdapter, OracleError, ScriptedCompletion, ScriptedFailure,
};

const TEMPLATE: &str = "Answer with the cca2 code of the country, or null.\n\nExamples:\nPérou -> PE\nUSA/CANADA -> null\n\nValue:\n";

fn oracle(transport: ScriptedCompletion) -> OracleAdapter<ScriptedCompletion> {
    OracleAdapter::new(transport, TEMPLATE, ["PE", "KR", "MO", "US"])
}

#[test]
fn known_code_is_returned() {
    let transport = ScriptedCompletion::new().with_reply("korea, souh", "KR");
    let oracle = oracle(transport.clone());
    assert_eq!(oracle.resolve("korea, souh").unwrap(), Some("KR".to_string()));
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn null_and_unknown_replies_are_not_errors() {
    let transport = ScriptedCompletion::new()
        .with_reply("usa/canada", "null")
        .with_reply("atlantis", "AT")
        .with_reply("verbose", "The answer is PE");
    let oracle = oracle(transport);
    assert_eq!(oracle.resolve("usa/canada").unwrap(), None);
    assert_eq!(oracle.resolve("atlantis").unwrap(), None);
    assert_eq!(oracle.resolve("verbose").unwrap(), None);
}

#[test]
fn transport_failures_propagate() {
    let transport = ScriptedCompletion::new()
        .with_failure("qxj 4417", ScriptedFailure::Unavailable)
        .with_failure("slow", ScriptedFailure::Timeout)
        .with_failure("denied", ScriptedFailure::Unauthorized);
    let oracle = oracle(transport);
    assert!(matches!(
        oracle.resolve("qxj 4417"),
        Err(OracleError::Unavailable(_))
    ));
    assert!(matches!(oracle.resolve("slow"), Err(OracleError::Timeout)));
    assert!(matches!(
        oracle.resolve("denied"),
        Err(OracleError::Unauthorized { status: 401 })
    ));
}

#[test]
fn one_call_per_resolve() {
    let transport = ScriptedCompletion::new().with_default_reply("US");
    let oracle = oracle(transport.clone());
    for text in ["unitstat.", "unitstat.", "澳门"] {
        oracle.resolve(text).unwrap();
    }
    assert_eq!(transport.call_count(), 3);
}

#[test]
fn rendered_prompt() {
    let transport = ScriptedCompletion::new().with_reply("澳门", "MO");
    let oracle = oracle(transport.clone());
    assert_eq!(oracle.resolve("澳门").unwrap(), Some("MO".to_string()));
    let prompts = transport.prompts();
    insta::assert_snapshot!(prompts[0], @r"
    Answer with the cca2 code of the country, or null.

    Examples:
    Pérou -> PE
    USA/CANADA -> null

    Value: 澳门
    ");
}
