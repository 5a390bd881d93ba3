use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use palaver::analysis::Normalizer;
use palaver::analysis::token_filter::ReductionMode;
use palaver::config::{ResponderConfig, default_responses};
use palaver::error::Result;
use palaver::intent::{Intent, IntentKeywords, IntentLexicon, classify};
use palaver::responder::Responder;
use palaver::response::{Chooser, FnGenerator};

fn keywords(entries: &[(Intent, &[&str])]) -> IntentKeywords {
    entries
        .iter()
        .map(|(intent, words)| (*intent, words.iter().map(|w| w.to_string()).collect()))
        .collect()
}

#[test]
fn greeting_farewell_and_fallback_with_default_tables() -> Result<()> {
    let responder = Responder::from_config(&ResponderConfig::default().with_seed(Some(42)))?;
    let responses = default_responses();

    let reply = responder.reply("Hello there!")?;
    assert_eq!(reply.intent, Intent::Greeting);
    assert!(responses[&Intent::Greeting].contains(&reply.text));

    let reply = responder.reply("Okay, see you later")?;
    assert_eq!(reply.intent, Intent::Farewell);
    assert!(responses[&Intent::Farewell].contains(&reply.text));

    let reply = responder.reply("What's the weather today?")?;
    assert_eq!(reply.intent, Intent::Fallback);
    assert!(responses[&Intent::Fallback].contains(&reply.text));
    Ok(())
}

#[test]
fn classification_is_deterministic_and_idempotent() -> Result<()> {
    let normalizer = Normalizer::new(ReductionMode::Stem);
    let lexicon = IntentLexicon::build(&ResponderConfig::default().keywords, &normalizer)?;

    for text in [
        "Tell me a joke, please!",
        "thanks!! that was hilarious",
        "Bye bye now",
        "I have no idea what to say",
    ] {
        let first = normalizer.normalize(text)?;
        let again = normalizer.normalize(&first.cleaned)?;
        assert_eq!(first, again, "input: {text}");

        let intent = classify(&first.tokens, &first.cleaned, &lexicon);
        for _ in 0..10 {
            assert_eq!(classify(&first.tokens, &first.cleaned, &lexicon), intent);
        }
    }
    Ok(())
}

#[test]
fn equal_scores_resolve_to_earlier_intent() -> Result<()> {
    let normalizer = Normalizer::new(ReductionMode::Stem);
    let lexicon = IntentLexicon::build(
        &keywords(&[
            (Intent::Greeting, &["hello"]),
            (Intent::Joke, &["joke"]),
            (Intent::Thanks, &["thanks"]),
        ]),
        &normalizer,
    )?;

    // Every intent scores exactly one; greeting is declared first.
    let utterance = normalizer.normalize("thanks for the joke, hello")?;
    assert_eq!(
        classify(&utterance.tokens, &utterance.cleaned, &lexicon),
        Intent::Greeting
    );

    let utterance = normalizer.normalize("thanks for the joke")?;
    assert_eq!(
        classify(&utterance.tokens, &utterance.cleaned, &lexicon),
        Intent::Joke
    );
    Ok(())
}

#[test]
fn phrase_triggers_only_match_contiguous_text() -> Result<()> {
    let normalizer = Normalizer::new(ReductionMode::Stem);
    let lexicon = IntentLexicon::build(
        &keywords(&[(Intent::Farewell, &["see you"]), (Intent::Joke, &["joke"])]),
        &normalizer,
    )?;

    let utterance = normalizer.normalize("See you!")?;
    assert_eq!(
        classify(&utterance.tokens, &utterance.cleaned, &lexicon),
        Intent::Farewell
    );

    // Same words, not adjacent: no phrase match, and "you" is a stop word.
    let utterance = normalizer.normalize("you should see this")?;
    assert_eq!(
        classify(&utterance.tokens, &utterance.cleaned, &lexicon),
        Intent::Fallback
    );
    Ok(())
}

#[test]
fn lemma_mode_classifies_inflections() -> Result<()> {
    let config = ResponderConfig::default()
        .with_reduction(ReductionMode::Lemma)
        .with_seed(Some(3));
    let responder = Responder::from_config(&config)?;

    assert_eq!(responder.classify("Any good jokes?")?, Intent::Joke);
    assert_eq!(responder.classify("Greetings, friend")?, Intent::Greeting);
    assert_eq!(responder.classify("I am laughing so hard")?, Intent::Joke);
    Ok(())
}

#[test]
fn failing_generator_yields_apology_for_every_turn() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let generator = FnGenerator::new("offline", move |_: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("service unavailable"))
    });

    let config = ResponderConfig {
        apology: "My words escape me.".to_string(),
        ..ResponderConfig::default().with_delegate(true)
    };
    let responder = Responder::builder(config)
        .generator(Arc::new(generator))
        .build()?;

    for text in ["hello", "tell me a joke", "bye"] {
        let reply = responder.reply(text)?;
        assert_eq!(reply.text, "My words escape me.");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn panicking_generator_without_timeout_yields_apology() -> Result<()> {
    let generator = FnGenerator::new("unstable", |_: &str| -> anyhow::Result<String> {
        panic!("backend exploded")
    });
    let config = ResponderConfig::default()
        .with_delegate(true)
        .with_generator_timeout(None);
    let responder = Responder::builder(config)
        .generator(Arc::new(generator))
        .build()?;

    let reply = responder.reply("hello")?;
    assert_eq!(reply.intent, Intent::Greeting);
    assert_eq!(reply.text, responder.selector().apology());
    Ok(())
}

#[test]
fn slow_generator_is_cut_off_by_timeout() -> Result<()> {
    let generator = FnGenerator::new("sleepy", |_: &str| {
        thread::sleep(Duration::from_millis(400));
        Ok("finally".to_string())
    });
    let config = ResponderConfig::default()
        .with_delegate(true)
        .with_generator_timeout(Some(Duration::from_millis(25)));
    let responder = Responder::builder(config)
        .generator(Arc::new(generator))
        .build()?;

    let reply = responder.reply("hello?")?;
    assert_eq!(reply.text, responder.selector().apology());
    Ok(())
}

#[test]
fn injected_chooser_controls_canned_reply() -> Result<()> {
    struct First;

    impl Chooser for First {
        fn choose(&self, _len: usize) -> usize {
            0
        }

        fn name(&self) -> &str {
            "first"
        }
    }

    let responder = Responder::builder(ResponderConfig::default())
        .chooser(Arc::new(First))
        .build()?;

    assert_eq!(responder.reply("thank you")?.text, "You are welcome!");
    assert_eq!(
        responder.reply("blah")?.text,
        "I'm not sure I understand. Could you rephrase that?"
    );
    Ok(())
}

#[test]
fn misconfigured_lexicon_fails_at_construction() {
    let config = ResponderConfig {
        keywords: keywords(&[(Intent::Fallback, &["huh"])]),
        ..ResponderConfig::default()
    };
    assert!(Responder::from_config(&config).unwrap_err().is_config());

    let config = ResponderConfig {
        keywords: keywords(&[(Intent::Joke, &["!!!"])]),
        ..ResponderConfig::default()
    };
    assert!(Responder::from_config(&config).unwrap_err().is_config());
}

#[test]
fn responder_is_shared_across_threads() -> Result<()> {
    let responder = Arc::new(Responder::from_config(&ResponderConfig::default())?);

    let handles: Vec<_> = ["hi", "bye", "thanks", "joke"]
        .into_iter()
        .map(|text| {
            let responder = Arc::clone(&responder);
            thread::spawn(move || responder.classify(text))
        })
        .collect();

    let intents = handles
        .into_iter()
        .map(|h| h.join().expect("classifier thread panicked"))
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(
        intents,
        vec![Intent::Greeting, Intent::Farewell, Intent::Thanks, Intent::Joke]
    );
    Ok(())
}
