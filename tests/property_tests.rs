use proptest::prelude::*;
use ringtimer::prelude::*;
use std::f64::consts::PI;

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::StartPause),
        Just(Intent::Reset),
        Just(Intent::ToggleTheme),
        (-20i64..200).prop_map(|m| Intent::SetDuration(m.to_string())),
        "[a-z0-9 .-]{0,6}".prop_map(Intent::SetDuration),
        (-150i32..150).prop_map(Intent::StepDuration),
        (0u32..2000).prop_map(|width| Intent::Resize { width }),
    ]
}

/// An intent or a tick.
#[derive(Debug, Clone)]
enum Event {
    Intent(Intent),
    Tick,
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => Just(Event::Tick),
        2 => arb_intent().prop_map(Event::Intent),
    ]
}

proptest! {
    #[test]
    fn offset_boundaries_are_exact(minutes in 1u32..=120, radius in 0.001f64..10_000.0) {
        let d = minutes * 60;
        prop_assert_eq!(offset(d, d, radius), 0.0);
        prop_assert_eq!(offset(0, d, radius), 2.0 * PI * radius);
    }

    #[test]
    fn offset_grows_as_time_runs_out(
        minutes in 1u32..=120,
        radius in 1.0f64..500.0,
        a in 0u32..7200,
        b in 0u32..7200
    ) {
        let d = minutes * 60;
        let (lo, hi) = (a.min(b).min(d), a.max(b).min(d));
        // Less time left means more of the ring hidden.
        prop_assert!(offset(lo, d, radius) >= offset(hi, d, radius));
        prop_assert!(offset(lo, d, radius) <= circumference(radius));
    }

    #[test]
    fn invariants_hold_after_every_transition(
        events in prop::collection::vec(arb_event(), 0..300)
    ) {
        let mut state = TimerState::default();
        for event in events {
            state = match event {
                Event::Intent(intent) => apply(state, &intent),
                Event::Tick => state.ticked().0,
            };
            prop_assert!(state.is_valid(), "broken state {:?}", state);
            prop_assert!(state.remaining() <= state.duration());
        }
    }

    #[test]
    fn reset_is_idempotent(events in prop::collection::vec(arb_event(), 0..100)) {
        let mut state = TimerState::default();
        for event in events {
            state = match event {
                Event::Intent(intent) => apply(state, &intent),
                Event::Tick => state.ticked().0,
            };
        }
        let once = apply(state, &Intent::Reset);
        prop_assert_eq!(apply(once, &Intent::Reset), once);
    }

    #[test]
    fn running_ticks_count_down_by_one(minutes in 1u32..=5) {
        let mut state = TimerState::new(minutes).unwrap().toggled_running();
        let mut previous = state.remaining();
        loop {
            let (next, outcome) = state.ticked();
            if outcome == TickOutcome::Ignored {
                break;
            }
            prop_assert_eq!(next.remaining(), previous - 1);
            previous = next.remaining();
            state = next;
        }
        prop_assert_eq!(state.remaining(), 0);
        prop_assert_eq!(state.phase(), Phase::Completed);
    }

    #[test]
    fn rejected_duration_text_changes_nothing(
        raw in "[^0-9]*|-[0-9]{1,4}|0|1[2-9][1-9]|[2-9][0-9]{2,4}"
    ) {
        let state = TimerState::default();
        prop_assert_eq!(apply(state, &Intent::SetDuration(raw)), state);
    }

    #[test]
    fn clock_format_round_trips(seconds in 0u32..=7200) {
        let text = format_clock(seconds);
        let (m, s) = text.split_once(':').unwrap();
        prop_assert_eq!(s.len(), 2);
        let back = m.parse::<u32>().unwrap() * 60 + s.parse::<u32>().unwrap();
        prop_assert_eq!(back, seconds);
    }
}
