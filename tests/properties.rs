//! Property tests for the draw pipeline.

use chrono::{TimeZone, Utc};
use entropy_roulette::{
    capture::{CaptureConfig, EntropyCollector, PointerSample},
    config::FileConfig,
    draw::{derive_seed, DrawEngine, DrawError, PrfKind, RangeConfig, Seed},
    reel::{Reel, ReelConfig},
    session::{DrawSession, SessionJournal},
};
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn samples_strategy(min_len: usize) -> impl Strategy<Value = Vec<PointerSample>> {
    prop::collection::vec(
        (1u32..2000, 1u32..2000).prop_map(|(x, y)| PointerSample::new(f64::from(x), f64::from(y))),
        min_len..min_len + 100,
    )
}

fn range_strategy() -> impl Strategy<Value = RangeConfig> {
    (-1000i64..1000, 1i64..500, -10i64..510).prop_map(|(min, width, offset)| {
        RangeConfig::new(min, min + width, min + offset)
    })
}

proptest! {
    #[test]
    fn winner_is_always_a_candidate(
        range in range_strategy(),
        samples in samples_strategy(100),
        ts in 1_600_000_000_000u64..1_900_000_000_000,
        mulberry in any::<bool>(),
    ) {
        let prf = if mulberry { PrfKind::Mulberry32 } else { PrfKind::Sine };
        let engine = DrawEngine::new(100, prf);

        match engine.draw(&range, &samples, ts) {
            Ok(outcome) => {
                prop_assert!(outcome.winner >= range.min && outcome.winner <= range.max);
                prop_assert_ne!(outcome.winner, range.excluded);
                prop_assert!(outcome.candidates.contains(outcome.winner));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn draws_are_reproducible(
        range in range_strategy(),
        samples in samples_strategy(100),
        ts in 1_600_000_000_000u64..1_900_000_000_000,
    ) {
        let engine = DrawEngine::default();
        let a = engine.draw(&range, &samples, ts).unwrap();
        let b = engine.draw(&range, &samples, ts).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn seed_changes_with_timestamp(
        samples in samples_strategy(1),
        ts in 1u64..1_000_000_000,
        delta in 1u64..1_000_000,
    ) {
        let earlier = derive_seed(&samples, ts);
        let later = derive_seed(&samples, ts + delta);
        prop_assert!(earlier.value() > 0.0);
        prop_assert!(later.value() > earlier.value());
    }

    #[test]
    fn prf_stays_in_unit_interval(seed in -1e18f64..1e18) {
        for prf in [PrfKind::Sine, PrfKind::Mulberry32] {
            let f = prf.evaluate(Seed::from_raw(seed));
            prop_assert!((0.0..1.0).contains(&f), "{:?}({}) = {}", prf, seed, f);
            prop_assert_eq!(f, prf.evaluate(Seed::from_raw(seed)));
        }
    }

    #[test]
    fn reel_lands_on_winner(
        range in range_strategy(),
        rng_seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let candidates = range.candidates().unwrap();
        let winner = candidates
            .get(pick.index(candidates.len() as usize) as u64)
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);

        let reel = Reel::build(&candidates, winner, &ReelConfig::default(), &mut rng).unwrap();

        prop_assert_eq!(reel.len(), 100);
        prop_assert!((80..=90).contains(&reel.winning_index()));
        prop_assert_eq!(reel.slots()[reel.winning_index()], winner);
        prop_assert!(reel.slots().iter().all(|v| candidates.contains(*v)));
        if candidates.len() > 1 {
            prop_assert!(reel.has_distinct_neighbours());
        }
    }

    #[test]
    fn collector_keeps_only_the_newest(
        points in prop::collection::vec((0.0f64..600.0, 0.0f64..400.0), 0..500),
        retention in 1usize..250,
    ) {
        let config = CaptureConfig {
            retention,
            min_samples: 1,
            ..Default::default()
        };
        let mut collector = EntropyCollector::new(&config);
        for &(x, y) in &points {
            collector.record_sample(x, y);
        }

        let kept = collector.current_samples();
        let expected: Vec<_> = points
            .iter()
            .skip(points.len().saturating_sub(retention))
            .map(|&(x, y)| PointerSample::new(x, y))
            .collect();
        prop_assert_eq!(kept, expected);

        collector.reset();
        collector.reset();
        prop_assert!(collector.is_empty());
    }
}

#[test]
fn session_round_trip_with_classroom_defaults() {
    let config = FileConfig::default();
    let mut session =
        DrawSession::with_rng(&config, SessionJournal::new(), ChaCha20Rng::seed_from_u64(7))
            .unwrap();
    let now = Utc.timestamp_millis_opt(1_714_551_330_250).unwrap();

    for i in 0..150 {
        session.record_pointer(f64::from(i % 600), f64::from(i % 400));
    }

    let ticket = session.trigger_draw_at(&config.range, now).unwrap();
    assert!((1..=100).contains(&ticket.winner));
    assert_ne!(ticket.winner, 7);
    assert_eq!(ticket.reel.winner(), ticket.winner);
    assert_eq!(session.sink().history()[0].timestamp_iso(), "2024-05-01T08:15:30.250Z");

    // Busy until the renderer signals completion
    assert!(matches!(
        session.trigger_draw_at(&config.range, now),
        Err(DrawError::InProgress)
    ));
    assert!(session.complete_presentation(ticket.draw_id));
    assert!(!session.complete_presentation(ticket.draw_id));

    // Samples were consumed by the draw
    assert!(matches!(
        session.trigger_draw_at(&config.range, now),
        Err(DrawError::InsufficientEntropy { got: 0, need: 100 })
    ));
}

#[test]
fn single_candidate_always_wins() {
    let range = RangeConfig::new(5, 6, 6);
    let samples = vec![PointerSample::new(3.0, 4.0); 100];
    let outcome = DrawEngine::default()
        .draw(&range, &samples, 1_700_000_000_000)
        .unwrap();
    assert_eq!(outcome.winner, 5);

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let reel = Reel::build(&outcome.candidates, 5, &ReelConfig::default(), &mut rng).unwrap();
    assert!(reel.slots().iter().all(|&v| v == 5));
}
