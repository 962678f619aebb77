//! End-to-end dispatch behaviour through the public API

use std::fs;
use std::path::Path;
use std::sync::Arc;

use hark::{
    Assistant, FixedClock, Interpretation, Launch, LocalInterpreter, Parameters, RecordingLauncher,
    FALLBACK_RESPONSE,
};

fn assistant_in(notes_dir: &Path) -> (Arc<RecordingLauncher>, Assistant) {
    let launcher = Arc::new(RecordingLauncher::new());
    let clock = Arc::new(FixedClock::at(2025, 7, 4, 21, 15, 42).unwrap());
    (launcher.clone(), Assistant::new(notes_dir, launcher, clock))
}

fn is_note_name(name: &str) -> bool {
    // note_YYYYMMDD_HHMMSS.txt
    let Some(stamp) = name.strip_prefix("note_").and_then(|n| n.strip_suffix(".txt")) else {
        return false;
    };
    let bytes = stamp.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}

#[test]
fn every_command_gets_a_response() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, assistant) = assistant_in(tmp.path());

    let commands = [
        "",
        " ",
        "\t\n",
        "?",
        "What time is it?",
        "OPEN",
        "search",
        "weather",
        "calculate",
        "note",
        "remind",
        "shutdown",
        "héllo wörld 🎤",
        "open open open launch",
    ];
    for command in commands {
        let response = assistant.process(command);
        assert!(!response.trim().is_empty(), "empty response for {:?}", command);
    }
}

#[test]
fn unclaimed_commands_get_the_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let (launcher, assistant) = assistant_in(tmp.path());

    for command in ["", "   ", "hello there", "tell me a joke", "good morning"] {
        assert_eq!(assistant.process(command), FALLBACK_RESPONSE, "{:?}", command);
    }
    assert!(launcher.launches().is_empty());
}

#[test]
fn earlier_handler_wins_on_overlap() {
    let tmp = tempfile::tempdir().unwrap();
    let (launcher, assistant) = assistant_in(tmp.path());

    // search (1st) over music (7th)
    assert_eq!(
        assistant.process("google music festivals"),
        "I've searched for 'music festivals' on the web."
    );
    // time (3rd) over reminder (9th)
    assert_eq!(
        assistant.process("remind me what time it is"),
        "The current time is 09:15 PM."
    );
    // application (2nd) over email (8th)
    assert_eq!(assistant.process("open mail"), "I've opened Mail for you.");

    assert_eq!(
        launcher.launches(),
        vec![
            Launch::Url("https://www.google.com/search?q=music+festivals".into()),
            Launch::App("Mail".into()),
        ]
    );
}

#[test]
fn time_answers_are_stable_for_a_fixed_clock() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, assistant) = assistant_in(tmp.path());

    let first = assistant.process("What time is it?");
    assert_eq!(first, "The current time is 09:15 PM.");
    assert_eq!(assistant.process("What time is it?"), first);
    assert_eq!(assistant.process("what is tomorrow"), "Tomorrow is July 05, 2025.");
}

#[test]
fn search_opens_exactly_one_url() {
    let tmp = tempfile::tempdir().unwrap();
    let (launcher, assistant) = assistant_in(tmp.path());

    let response = assistant.process("Search for artificial intelligence");
    assert_eq!(response, "I've searched for 'artificial intelligence' on the web.");
    assert_eq!(
        launcher.launches(),
        vec![Launch::Url(
            "https://www.google.com/search?q=artificial+intelligence".into()
        )]
    );
}

#[test]
fn calculator_through_parameter_path() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, assistant) = assistant_in(tmp.path());

    let mut parameters = Parameters::new();
    parameters.insert("expression".into(), "15+27".into());
    assert_eq!(
        assistant.execute_action("calculator", &parameters),
        Some("The result is 42.".to_string())
    );

    // Code is rejected, not run
    parameters.insert("expression".into(), "exec('rm -rf /')".into());
    let response = assistant.execute_action("calculator", &parameters).unwrap();
    assert!(response.starts_with("I couldn't calculate that expression."), "{}", response);
}

#[test]
fn note_creates_one_timestamped_file() {
    let tmp = tempfile::tempdir().unwrap();
    let notes = tmp.path().join("notes");
    let (_, assistant) = assistant_in(&notes);

    let mut parameters = Parameters::new();
    parameters.insert("content".into(), "buy milk".into());
    assert_eq!(
        assistant.execute_action("create_note", &parameters),
        Some("I've created a note with your content: buy milk".to_string())
    );

    let entries: Vec<_> = fs::read_dir(&notes)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().unwrap().to_str().unwrap();
    assert!(is_note_name(name), "unexpected name {}", name);
    assert_eq!(name, "note_20250704_211542.txt");
    assert_eq!(fs::read_to_string(&entries[0]).unwrap(), "buy milk");
}

#[test]
fn local_interpreter_drives_the_same_handlers() {
    let tmp = tempfile::tempdir().unwrap();
    let notes = tmp.path().join("notes");
    let (launcher, assistant) = assistant_in(&notes);

    assert_eq!(
        assistant.process_with(&LocalInterpreter, "Calculate 15 plus 27"),
        "Calculating. The result is 42."
    );
    assert_eq!(
        assistant.process_with(&LocalInterpreter, "note buy milk"),
        "Creating a note. I've created a note with your content: buy milk"
    );
    assert_eq!(
        assistant.process_with(&LocalInterpreter, "weather in Tokyo"),
        "Checking weather for tokyo. I've opened weather information for tokyo."
    );
    assert_eq!(
        assistant.process_with(&LocalInterpreter, "how are you?"),
        "I understand your request."
    );

    assert_eq!(fs::read_dir(&notes).unwrap().count(), 1);
    assert_eq!(
        launcher.launches(),
        vec![Launch::Url("https://www.google.com/search?q=weather+in+tokyo".into())]
    );
}

#[test]
fn classifier_json_is_answered() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, assistant) = assistant_in(tmp.path());

    let raw = serde_json::json!({
        "action": "reminder",
        "parameters": {"text": "water the plants"},
        "response": "Okay.",
    });
    let reply = assistant.respond(&Interpretation::from_json(&raw.to_string()));
    assert_eq!(reply, "Okay. I've set a reminder for: water the plants");

    let reply = assistant.respond(&Interpretation::from_json(
        r#"{"action": "general_chat", "response": "Nice to meet you!"}"#,
    ));
    assert_eq!(reply, "Nice to meet you!");

    let reply = assistant.respond(&Interpretation::from_json("not json"));
    assert_eq!(reply, "I understand your request. Let me help you with that.");
}

#[test]
fn classifier_json_with_unquoted_values_still_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let (launcher, assistant) = assistant_in(tmp.path());

    let raw = r#"{"action": "get_time", "parameters": {"format": 12}, "response": "Sure."}"#;
    let reply = assistant.respond(&Interpretation::from_json(raw));
    assert_eq!(reply, "Sure. The current time is 09:15 PM.");

    let raw = r#"{"action": "weather", "parameters": {"city": "Paris", "units": null}}"#;
    let reply = assistant.respond(&Interpretation::from_json(raw));
    assert_eq!(
        reply,
        "I understand your request. I've opened weather information for Paris."
    );
    assert_eq!(
        launcher.launches(),
        vec![Launch::Url("https://www.google.com/search?q=weather+in+Paris".into())]
    );
}
