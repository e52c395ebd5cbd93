use proptest::prelude::*;

use mindtype_core::{
    CaretMonitor, LONG_PAUSE_THRESHOLD_MS, RING_CAPACITY, SHORT_PAUSE_THRESHOLD_MS, SnapshotRing,
    compute_band, extract_fragment,
};
use mindtype_types::{CaretEvent, CaretSnapshot, EventKind, InteractionState, ToneConfig};

// --- Monitor ---

#[derive(Debug, Clone)]
enum Step {
    Event { kind: EventKind, dt: u64, caret: u32, anchor: Option<u32> },
    Flush { dt: u64 },
}

fn arb_kind() -> impl Strategy<Value = EventKind> {
    prop_oneof![
        Just(EventKind::Typing),
        Just(EventKind::Pause),
        Just(EventKind::Selection),
        Just(EventKind::Blur),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (arb_kind(), 0u64..3000, 0u32..64, proptest::option::of(0u32..64)).prop_map(
            |(kind, dt, caret, anchor)| Step::Event { kind, dt, caret, anchor }
        ),
        (0u64..3000).prop_map(|dt| Step::Flush { dt }),
    ]
}

fn drain_all(monitor: &mut CaretMonitor) -> Vec<CaretSnapshot> {
    monitor.drain(usize::MAX)
}

proptest! {
    #[test]
    fn snapshots_are_monotonic(steps in proptest::collection::vec(arb_step(), 1..60)) {
        let mut monitor = CaretMonitor::new();
        let mut now = 0u64;
        let mut drained = Vec::new();
        for step in steps {
            match step {
                Step::Event { kind, dt, caret, anchor } => {
                    now += dt;
                    let mut ev = CaretEvent::new(kind, now, caret, 48);
                    ev.selection_anchor = anchor;
                    monitor.update(&ev);
                }
                Step::Flush { dt } => {
                    now += dt;
                    monitor.flush(now);
                }
            }
            drained.extend(drain_all(&mut monitor));
        }
        for pair in drained.windows(2) {
            prop_assert!(pair[0].timestamp_ms <= pair[1].timestamp_ms);
        }
        for snap in &drained {
            prop_assert!(snap.caret <= snap.text_len);
        }
    }

    #[test]
    fn pause_classification(now in 0u64..(LONG_PAUSE_THRESHOLD_MS * 3)) {
        let mut monitor = CaretMonitor::new();
        monitor.update(&CaretEvent::new(EventKind::Typing, 0, 1, 1));
        monitor.flush(now);

        let expected = if now < SHORT_PAUSE_THRESHOLD_MS {
            InteractionState::Typing
        } else if now < LONG_PAUSE_THRESHOLD_MS {
            InteractionState::ShortPause
        } else {
            InteractionState::LongPause
        };
        prop_assert_eq!(monitor.primary(), expected);
    }

    #[test]
    fn monitor_keeps_newest_snapshots(extra in 1usize..64) {
        let mut monitor = CaretMonitor::new();
        let mut expected = Vec::new();
        let mut ts = 0u64;
        // Each cycle queues Typing then ShortPause.
        for i in 0..(RING_CAPACITY / 2 + extra) {
            let caret = (i % 48) as u32;
            if monitor.update(&CaretEvent::new(EventKind::Typing, ts, caret, 48)) {
                expected.push(monitor.state());
            }
            if monitor.flush(ts + SHORT_PAUSE_THRESHOLD_MS) == 1 {
                expected.push(monitor.state());
            }
            ts += 1000;
        }
        prop_assert!(expected.len() > RING_CAPACITY);

        let drained = drain_all(&mut monitor);
        prop_assert_eq!(drained.as_slice(), &expected[expected.len() - RING_CAPACITY..]);
        prop_assert_eq!(monitor.pending(), 0);
    }

    #[test]
    fn flush_without_events_never_emits(times in proptest::collection::vec(0u64..10_000, 1..20)) {
        let mut monitor = CaretMonitor::new();
        for t in times {
            prop_assert_eq!(monitor.flush(t), 0);
        }
        prop_assert!(drain_all(&mut monitor).is_empty());
    }
}

// --- Snapshot ring ---

proptest! {
    #[test]
    fn ring_keeps_newest(capacity in 1usize..32, extra in 0usize..40) {
        let mut ring = SnapshotRing::new(capacity);
        let total = capacity + extra;
        let mut evicted = 0usize;
        for ts in 1..=total as u64 {
            if ring.push(CaretSnapshot { timestamp_ms: ts, ..Default::default() }) {
                evicted += 1;
            }
        }
        let drained = ring.drain(capacity + 5);
        prop_assert_eq!(drained.len(), capacity);
        let expected: Vec<u64> = ((extra as u64 + 1)..=(total as u64)).collect();
        let got: Vec<u64> = drained.iter().map(|s| s.timestamp_ms).collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(evicted, extra);
    }
}

// --- Band and fragment ---

fn arb_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Zéü日本 .,!?'\n]{0,120}").unwrap()
}

fn arb_tone() -> impl Strategy<Value = ToneConfig> {
    prop_oneof![Just(ToneConfig::disabled()), Just(ToneConfig::enabled("Casual"))]
}

proptest! {
    #[test]
    fn band_invariant(text in arb_text(), frac in 0.0f64..=1.0, tone in arb_tone()) {
        let caret = (text.len() as f64 * frac) as usize;
        let band = compute_band(&text, caret, &tone);
        if text.is_empty() {
            prop_assert!(!band.valid);
        } else {
            prop_assert!(band.valid);
            prop_assert!(band.start <= caret);
            prop_assert!(caret <= band.end);
            prop_assert!(band.end <= text.len());
            prop_assert!(text.is_char_boundary(band.start));
            prop_assert!(text.is_char_boundary(band.end));
        }
    }

    #[test]
    fn fragment_is_pure(text in arb_text(), frac in 0.0f64..=1.0, tone in arb_tone()) {
        let anchor = (text.len() as f64 * frac) as usize;
        let first = extract_fragment(&text, anchor, &tone);
        let second = extract_fragment(&text, anchor, &tone);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.is_empty() || text.contains(first.as_str()));
    }
}
