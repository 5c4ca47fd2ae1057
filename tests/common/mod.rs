//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rust_fm::games::skirmish::Skirmish;

/// Four clearings in a ring, three seats, seat 2 is the alliance.
///
/// ```text
/// a(Fox) ── b(Rabbit, sympathy)
///   │              │
/// d(Fox) ──── c(Mouse)
/// ```
///
/// The deck holds no rabbit or bird cards, so an outraged mover can never
/// donate a supporter and must hand the decision to the alliance.
pub const RING: &str = r#"{
    "clearings": [
        {"name": "a", "suit": "Fox", "neighbours": ["b", "d"]},
        {"name": "b", "suit": "Rabbit", "neighbours": ["a", "c"]},
        {"name": "c", "suit": "Mouse", "neighbours": ["b", "d"]},
        {"name": "d", "suit": "Fox", "neighbours": ["a", "c"]}
    ],
    "homes": ["a", "c", "d", "b"],
    "starting_warriors": 4,
    "supply": 2,
    "alliance_seat": 2,
    "sympathy": ["b"],
    "deck": [{"suit": "Fox", "count": 6}, {"suit": "Mouse", "count": 6}],
    "starting_hand": 2,
    "hand_limit": 4
}"#;

/// Ring board where every card is a bird.
pub fn ring_with_birds() -> Skirmish {
    let json = RING.replace(
        r#""deck": [{"suit": "Fox", "count": 6}, {"suit": "Mouse", "count": 6}]"#,
        r#""deck": [{"suit": "Bird", "count": 12}]"#,
    );
    Skirmish::from_json(&json).expect("valid content")
}

pub fn ring() -> Skirmish {
    Skirmish::from_json(RING).expect("valid content")
}

/// Route engine logs to the test harness. `RUST_LOG=trace` shows everything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
