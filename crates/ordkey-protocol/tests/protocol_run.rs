//! End-to-end protocol rounds against real and simulated handlers

use ordkey_core::{Message, ParticipantId, Timestamp};
use ordkey_effects::CompositeHandler;
use ordkey_protocol::{run_protocol, Channel, GenerationParams, Participant};
use std::time::Duration;

fn start_of_sim() -> Timestamp {
    Timestamp::from_micros(1_700_000_000_000_000).unwrap()
}

async fn simulated_round(seed: u64) -> (Vec<String>, String, String) {
    let effects = CompositeHandler::for_simulation(seed, start_of_sim());
    let channel = Channel::default();
    let mut alice = Participant::new("Alice");
    let mut bob = Participant::new("Bob");

    let outcome = run_protocol(
        &effects,
        &mut alice,
        &mut bob,
        &channel,
        Duration::from_millis(300),
    )
    .await
    .unwrap();

    let contents = channel
        .entries()
        .iter()
        .map(|m| m.content().to_string())
        .collect();
    (contents, outcome.first_secret, outcome.second_secret)
}

#[tokio::test(start_paused = true)]
async fn test_simulated_round_is_reproducible() {
    let first = simulated_round(42).await;
    let second = simulated_round(42).await;
    assert_eq!(first, second);
    assert!(!first.0.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_simulated_round_accounts_for_every_entry() {
    let effects = CompositeHandler::for_simulation(7, start_of_sim());
    let channel = Channel::new("sim");
    let mut alice = Participant::new("Alice");
    let mut bob = Participant::new("Bob");

    let outcome = run_protocol(
        &effects,
        &mut alice,
        &mut bob,
        &channel,
        Duration::from_millis(500),
    )
    .await
    .unwrap();

    assert_eq!(outcome.entry_count, channel.len());
    assert_eq!(outcome.entry_count, alice.posted_count() + bob.posted_count());
    assert_eq!(outcome.first_secret.len(), outcome.second_secret.len());
    assert!(outcome.start < outcome.end);

    // Every entry belongs to exactly one participant.
    for entry in channel.entries() {
        assert_ne!(alice.has_posted(&entry.id()), bob.has_posted(&entry.id()));
    }
}

#[tokio::test(start_paused = true)]
async fn test_both_participants_post_interleaved() {
    let effects = CompositeHandler::for_simulation(3, start_of_sim());
    let channel = Channel::default();
    let mut alice = Participant::new("Alice");
    let mut bob = Participant::new("Bob");

    run_protocol(
        &effects,
        &mut alice,
        &mut bob,
        &channel,
        Duration::from_millis(200),
    )
    .await
    .unwrap();

    let authors: Vec<bool> = channel
        .entries()
        .iter()
        .map(|m: &Message| alice.has_posted(&m.id()))
        .collect();
    assert!(authors.iter().any(|&by_alice| by_alice));
    assert!(authors.iter().any(|&by_alice| !by_alice));
    assert!(authors.windows(2).any(|w| w[0] != w[1]));
}

/// Expected bit for an entry: `'1'` when its content names someone other
/// than whoever posted it.
fn expected_bit(alice: &Participant, entry: &Message) -> char {
    let poster = if alice.has_posted(&entry.id()) { "Alice" } else { "Bob" };
    if entry.content() == poster {
        '0'
    } else {
        '1'
    }
}

#[tokio::test(start_paused = true)]
async fn test_bit_depends_only_on_poster_and_content() {
    for seed in 0..5 {
        let effects = CompositeHandler::for_simulation(seed, start_of_sim());
        let channel = Channel::default();
        let mut alice = Participant::new("Alice");
        let mut bob = Participant::new("Bob");

        let outcome = run_protocol(
            &effects,
            &mut alice,
            &mut bob,
            &channel,
            Duration::from_millis(200),
        )
        .await
        .unwrap();

        let expected: String = channel
            .range_query(outcome.start, outcome.end)
            .iter()
            .map(|entry| expected_bit(&alice, entry))
            .collect();
        assert!(expected.contains('0') && expected.contains('1'), "seed {seed}");
        assert_eq!(outcome.first_secret, expected, "seed {seed}");
        assert_eq!(outcome.second_secret, expected, "seed {seed}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_shorter_pauses_post_more_often() {
    let effects = CompositeHandler::for_simulation(9, start_of_sim());
    let channel = Channel::default();
    let mut alice = Participant::with_params(
        "Alice",
        GenerationParams {
            min_sleep_ms: 10,
            max_sleep_ms: 10,
        },
    );
    let mut bob = Participant::with_params(
        "Bob",
        GenerationParams {
            min_sleep_ms: 1,
            max_sleep_ms: 1,
        },
    );

    run_protocol(
        &effects,
        &mut alice,
        &mut bob,
        &channel,
        Duration::from_millis(200),
    )
    .await
    .unwrap();

    // Both sleep side by side on one clock, so Bob gets roughly ten posts
    // for each of Alice's.
    assert!(alice.posted_count() >= 15, "alice {}", alice.posted_count());
    assert!(
        bob.posted_count() >= 5 * alice.posted_count(),
        "alice {} bob {}",
        alice.posted_count(),
        bob.posted_count()
    );
}

#[tokio::test(start_paused = true)]
async fn test_generation_respects_sleep_bounds() {
    let effects = CompositeHandler::for_simulation(5, start_of_sim());
    let channel = Channel::default();
    let params = GenerationParams {
        min_sleep_ms: 4,
        max_sleep_ms: 4,
    };
    let mut alice = Participant::with_params("Alice", params);

    alice
        .generate(
            &effects,
            &ParticipantId::from("Bob"),
            &channel,
            Duration::from_millis(40),
        )
        .await
        .unwrap();

    // Fixed 4ms pauses over a 40ms window: about ten posts, at least 4ms apart.
    let entries = channel.entries();
    assert!((9..=10).contains(&entries.len()), "{} entries", entries.len());
    for pair in entries.windows(2) {
        let gap = pair[1].timestamp().as_micros() - pair[0].timestamp().as_micros();
        assert!(gap >= 4_000, "gap {gap}us");
    }
}

#[tokio::test]
async fn test_real_time_round_covers_every_entry() {
    let effects = CompositeHandler::for_production();
    let channel = Channel::default();
    let mut alice = Participant::new("Alice");
    let mut bob = Participant::new("Bob");

    let outcome = run_protocol(
        &effects,
        &mut alice,
        &mut bob,
        &channel,
        Duration::from_millis(60),
    )
    .await
    .unwrap();

    assert!(outcome.entry_count > 0);
    assert_eq!(outcome.entry_count, channel.len());
    assert_eq!(outcome.first_secret.len(), outcome.entry_count);
}
