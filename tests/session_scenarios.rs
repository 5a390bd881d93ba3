use std::io::Write;

use palaver::config::ResponderConfig;
use palaver::error::Result;
use palaver::intent::Intent;
use palaver::responder::Responder;
use palaver::session::{Session, SessionState, Turn};
use tempfile::NamedTempFile;

fn responder() -> Result<Responder> {
    Responder::from_config(&ResponderConfig::default().with_seed(Some(2024)))
}

#[test]
fn session_ends_after_farewell_reply() -> Result<()> {
    let responder = responder()?;
    let mut session = Session::new(&responder);

    let turns: Vec<Turn> = ["hey", "", "any jokes?", "goodbye!"]
        .into_iter()
        .map(|line| session.turn(Some(line)))
        .collect::<Result<_>>()?;

    let intents: Vec<Option<Intent>> = turns
        .iter()
        .map(|turn| match turn {
            Turn::Replied(reply) => Some(reply.intent),
            _ => None,
        })
        .collect();
    assert_eq!(
        intents,
        vec![
            Some(Intent::Greeting),
            None,
            Some(Intent::Joke),
            Some(Intent::Farewell)
        ]
    );
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(session.turns(), 3);
    Ok(())
}

#[test]
fn console_transcript_matches_driver_format() -> Result<()> {
    let config = ResponderConfig {
        greeting_message: "Hi, I'm palaver.".to_string(),
        closing_message: "Bye for now.".to_string(),
        ..ResponderConfig::default()
    };
    let responder = Responder::from_config(&config)?;
    let mut session = Session::new(&responder);
    let mut output = Vec::new();

    session.run("   \nwhat time is it\n".as_bytes(), &mut output)?;
    let transcript = String::from_utf8(output).expect("transcript is UTF-8");
    let lines: Vec<&str> = transcript.lines().collect();

    assert_eq!(lines[0], "Bot: Hi, I'm palaver.");
    assert!(lines[1].starts_with("You: You: Bot: "));
    assert_eq!(lines[2], "You: ");
    assert_eq!(lines[3], "Bot: Bye for now.");
    assert_eq!(lines.len(), 4);
    Ok(())
}

#[test]
fn session_from_config_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "keywords": {{ "greeting": ["ahoy"], "farewell": ["farewell", "so long"] }},
            "responses": {{
                "greeting": ["Ahoy, matey!"],
                "farewell": ["Fair winds!"],
                "fallback": ["Arr?"]
            }},
            "reduction": "lemma"
        }}"#
    )?;

    let config = ResponderConfig::from_file(file.path())?;
    let responder = Responder::from_config(&config)?;
    let mut session = Session::new(&responder);
    let mut output = Vec::new();

    session.run("Ahoy!\nhello\nso long, sailor\nnot reached\n".as_bytes(), &mut output)?;
    let transcript = String::from_utf8(output).expect("transcript is UTF-8");

    assert!(transcript.contains("Bot: Ahoy, matey!"));
    assert!(transcript.contains("Bot: Arr?"));
    assert!(transcript.contains("Bot: Fair winds!"));
    assert!(!transcript.contains("Bot: Goodbye!"));
    assert_eq!(session.state(), SessionState::Terminated);
    Ok(())
}

#[test]
fn invalid_config_file_is_reported() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "responses": {{ "greeting": ["Hi"] }} }}"#).expect("write config");

    let config = ResponderConfig::from_file(file.path()).expect("valid JSON");
    let err = Responder::from_config(&config).unwrap_err();
    assert!(err.is_config());

    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write config");
    assert!(ResponderConfig::from_file(file.path()).is_err());
}

#[test]
fn invalid_utf8_line_is_skipped() -> Result<()> {
    let responder = responder()?;
    let mut session = Session::new(&responder);
    let mut output = Vec::new();

    session.run(&b"hello\n\xff\xfe\nthanks\n"[..], &mut output)?;
    let transcript = String::from_utf8(output).expect("transcript is UTF-8");

    assert_eq!(session.turns(), 2);
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(transcript.matches("You: ").count(), 4);
    assert_eq!(transcript.matches("Bot: ").count(), 4);
    assert!(transcript.ends_with("\nBot: Goodbye!\n"));
    Ok(())
}
