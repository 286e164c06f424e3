//! Property-based tests for transition histories.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use statelog::checkpoint::HistoryCheckpoint;
use statelog::clock::{FixedClock, SteppedClock};
use statelog::core::{
    EntryStamp, HistoryEntry, HistoryError, InvariantViolation, ReasonCode, State, StateCode,
    TransitionHistory, TransitionRecord,
};
use statelog::{reason_enum, state_enum};

state_enum! {
    enum TestState {
        Initial,
        Processing,
        Complete,
        Failed,
    }
    final: [Complete, Failed]
}

reason_enum! {
    enum TestReason {
        Started,
        Retried,
        Finished,
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> TestState {
        match variant {
            0 => TestState::Initial,
            1 => TestState::Processing,
            2 => TestState::Complete,
            _ => TestState::Failed,
        }
    }
}

prop_compose! {
    fn arbitrary_reason()(variant in 0..3u8) -> TestReason {
        match variant {
            0 => TestReason::Started,
            1 => TestReason::Retried,
            _ => TestReason::Finished,
        }
    }
}

fn stepped_history() -> TransitionHistory<TransitionRecord, SteppedClock> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    TransitionHistory::with_clock(SteppedClock::new(start, Duration::seconds(1)))
}

fn imported(sequence_number: u64) -> TransitionRecord {
    TransitionRecord::new(
        EntryStamp::new(sequence_number, Utc::now()),
        &StateCode::from(format!("S{sequence_number}")),
        &ReasonCode::from("Imported"),
        None,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn appends_are_numbered_from_one(
        steps in prop::collection::vec((arbitrary_state(), arbitrary_reason()), 0..20)
    ) {
        let mut history = stepped_history();

        for (state, reason) in &steps {
            history.append(state, reason, None).unwrap();
        }

        let numbers: Vec<u64> = history.entries().iter().map(HistoryEntry::sequence_number).collect();
        let expected: Vec<u64> = (1..=steps.len() as u64).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn most_recent_number_matches_count(
        steps in prop::collection::vec((arbitrary_state(), arbitrary_reason()), 1..20)
    ) {
        let mut history = stepped_history();

        for (state, reason) in &steps {
            history.append(state, reason, None).unwrap();
        }

        let most_recent = history.most_recent_entry().unwrap();
        prop_assert_eq!(most_recent.sequence_number(), history.len() as u64);
        prop_assert_eq!(history.initial_entry().unwrap().sequence_number(), 1);
    }

    #[test]
    fn history_preserves_order(
        states in prop::collection::vec(arbitrary_state(), 1..10)
    ) {
        let mut history = stepped_history();

        for state in &states {
            history.append(state, &TestReason::Started, None).unwrap();
        }

        let expected: Vec<&str> = states.iter().map(State::code).collect();
        prop_assert_eq!(history.state_path(), expected);
        prop_assert_eq!(
            history.current_state_code(),
            states.last().map(State::code)
        );
    }

    #[test]
    fn timestamps_never_go_backwards_with_a_stepped_clock(
        states in prop::collection::vec(arbitrary_state(), 1..10)
    ) {
        let mut history = stepped_history();

        for state in &states {
            history.append(state, &TestReason::Retried, None).unwrap();
        }

        for pair in history.entries().windows(2) {
            prop_assert!(pair[0].timestamp() < pair[1].timestamp());
        }
        prop_assert_eq!(
            history.duration(),
            Some(std::time::Duration::from_secs(states.len() as u64 - 1))
        );
    }

    #[test]
    fn replaced_entries_are_sorted(
        numbers in prop::collection::btree_set(1u64..1000, 0..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let mut history = TransitionHistory::with_clock(FixedClock::new(Utc::now()));

        history
            .replace_entries(numbers.iter().copied().map(imported).collect())
            .unwrap();

        let read: Vec<u64> = history.entries().iter().map(HistoryEntry::sequence_number).collect();
        let mut expected = numbers.clone();
        expected.sort_unstable();
        prop_assert_eq!(&read, &expected);
        prop_assert_eq!(
            history.initial_entry().map(HistoryEntry::sequence_number),
            expected.first().copied()
        );
        prop_assert_eq!(
            history.most_recent_entry().map(HistoryEntry::sequence_number),
            expected.last().copied()
        );
    }

    #[test]
    fn replacing_with_a_duplicate_is_rejected(
        numbers in prop::collection::btree_set(1u64..1000, 1..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
        pick in any::<prop::sample::Index>()
    ) {
        let duplicate = numbers[pick.index(numbers.len())];
        let mut entries: Vec<TransitionRecord> = numbers.iter().copied().map(imported).collect();
        entries.push(imported(duplicate));

        let mut history = TransitionHistory::with_clock(FixedClock::new(Utc::now()));
        let result = history.replace_entries(entries);

        prop_assert_eq!(
            result,
            Err(HistoryError::InvariantViolation(
                InvariantViolation::DuplicateSequenceNumber(duplicate)
            ))
        );
        prop_assert!(history.is_empty());
    }

    #[test]
    fn reads_are_idempotent(
        states in prop::collection::vec(arbitrary_state(), 0..10)
    ) {
        let mut history = stepped_history();

        for state in &states {
            history.append(state, &TestReason::Finished, Some("note")).unwrap();
        }

        let first = history.entries().to_vec();
        let second = history.entries().to_vec();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn history_roundtrip_checkpoint(
        states in prop::collection::vec(arbitrary_state(), 0..5)
    ) {
        let mut history = stepped_history();

        for state in &states {
            history.append(state, &TestReason::Started, None).unwrap();
        }

        let json = history.checkpoint().to_json().unwrap();
        let checkpoint = HistoryCheckpoint::<TransitionRecord>::from_json(&json).unwrap();
        let restored =
            TransitionHistory::restore(checkpoint, FixedClock::new(Utc::now())).unwrap();

        prop_assert_eq!(restored.entries(), history.entries());
    }
}
