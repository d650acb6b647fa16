use pairs_core::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Clone, Debug)]
enum Command {
    Reveal(CardId),
    Resolve,
}

fn command(total_cards: CardCount) -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (0..total_cards).prop_map(Command::Reveal),
        1 => Just(Command::Resolve),
    ]
}

fn profile() -> impl Strategy<Value = DifficultyProfile> {
    prop_oneof![
        Just(Difficulty::Easy.profile()),
        Just(Difficulty::Normal.profile()),
        Just(Difficulty::Hard.profile()),
        (1u8..=8, 1u8..=4).prop_map(|(columns, half_rows)| {
            DifficultyProfile::try_new(Difficulty::Normal, columns, half_rows * 2).unwrap()
        }),
    ]
}

fn game() -> impl Strategy<Value = (DifficultyProfile, u64, Vec<Command>)> {
    profile().prop_flat_map(|profile| {
        (
            Just(profile),
            any::<u64>(),
            prop::collection::vec(command(profile.total_cards()), 0..200),
        )
    })
}

fn matched_count(engine: &MatchEngine) -> usize {
    engine.cards().iter().filter(|card| card.is_matched()).count()
}

proptest! {
    #[test]
    fn generated_decks_hold_every_pair_twice(profile in profile(), seed in any::<u64>()) {
        let deck = ShuffleDeckGenerator::new(SmallRng::seed_from_u64(seed)).generate(profile);

        prop_assert_eq!(deck.len(), usize::from(profile.total_cards()));
        let mut counts = vec![0; usize::from(profile.total_pairs())];
        for &value in deck.values() {
            counts[usize::from(value - 1)] += 1;
        }
        prop_assert!(counts.iter().all(|&count| count == 2));
    }

    #[test]
    fn command_sequences_keep_invariants((profile, seed, commands) in game()) {
        let mut engine = MatchEngine::generate(profile, RandomDeckGenerator::new(seed));

        for command in commands {
            let before = engine.clone();
            match command {
                Command::Reveal(id) => {
                    let outcome = engine.reveal(id).unwrap();

                    if before.has_pending_mismatch() {
                        prop_assert_eq!(outcome, RevealOutcome::NoChange);
                        prop_assert_eq!(&engine, &before);
                    }
                    if outcome == RevealOutcome::NoChange {
                        prop_assert_eq!(&engine, &before);
                    }
                    if outcome.is_match() {
                        prop_assert_eq!(engine.moves_made(), before.moves_made() + 1);
                    }
                    if outcome.completes_move() {
                        prop_assert_eq!(engine.moves_made(), before.moves_made() + 1);
                    } else {
                        prop_assert_eq!(engine.moves_made(), before.moves_made());
                    }
                    let all_matched = engine.cards().iter().all(Card::is_matched);
                    prop_assert_eq!(outcome == RevealOutcome::Won, all_matched && !before.is_won());
                }
                Command::Resolve => {
                    engine.resolve_pending();
                    prop_assert!(engine.session().selection().is_empty());
                    prop_assert!(engine.cards().iter().all(|card| card.is_matched() || !card.is_flipped()));
                }
            }

            prop_assert!(engine.pairs_found() >= before.pairs_found());
            prop_assert_eq!(usize::from(engine.pairs_found()), matched_count(&engine) / 2);
            prop_assert!(engine.session().selection().len() <= 2);
            prop_assert_eq!(engine.is_won(), engine.pairs_found() == engine.total_pairs());
        }
    }

    #[test]
    fn submit_keeps_short_sorted_lists(moves in prop::collection::vec(0u32..100, 0..20)) {
        let mut table = LeaderboardTable::new();
        for (index, &moves) in moves.iter().enumerate() {
            table = table.submit("Normal", moves, &index.to_string());

            let entries = table.entries("Normal");
            prop_assert!(entries.len() <= MAX_ENTRIES);
            prop_assert!(entries.windows(2).all(|pair| pair[0].moves() <= pair[1].moves()));
        }

        let mut expected = moves.clone();
        expected.sort();
        expected.truncate(MAX_ENTRIES);
        let kept: Vec<_> = table.entries("Normal").iter().map(LeaderboardEntry::moves).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn save_then_load_returns_the_same_table(
        results in prop::collection::vec((0usize..3, 0u32..500), 0..30)
    ) {
        let table = results.iter().fold(LeaderboardTable::new(), |table, &(tier, moves)| {
            table.submit(Difficulty::ALL[tier].name(), moves, "10/19/2026")
        });
        let mut store = LeaderboardStore::new(MemoryStorage::new());

        store.save(&table).unwrap();

        prop_assert_eq!(store.load(), table);
    }
}
