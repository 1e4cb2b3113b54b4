//! Property-based tests for the crash point pipeline.

use crash_core::{
    crash_point, derive_hash_hex, format_round, previous_rounds, CrashMultiplier, FairnessHasher,
};
use proptest::prelude::*;

proptest! {
    /// Any full-width hash yields a crash point of at least 1.00x
    #[test]
    fn prop_multiplier_lower_bound(hash in "[0-9a-f]{64}") {
        let m = crash_point(&hash).unwrap();
        prop_assert!(m >= CrashMultiplier::MIN);
        prop_assert!(m.as_f64() >= 1.0);
    }

    /// Hashes shorter than the 52-bit window are rejected, never defaulted
    #[test]
    fn prop_short_hash_rejected(hash in "[0-9a-f]{0,12}") {
        prop_assert!(crash_point(&hash).is_err());
    }

    #[test]
    fn prop_format_round_deterministic(seed in ".{1,80}") {
        prop_assert_eq!(format_round(&seed).unwrap(), format_round(&seed).unwrap());
    }

    #[test]
    fn prop_round_hash_is_lowercase_hex(seed in ".{0,80}") {
        let hash = FairnessHasher::default().salted_hash(&seed);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    /// The displayed value is exactly the stored hundredths
    #[test]
    fn prop_display_matches_hundredths(hash in "[0-9a-f]{64}") {
        let m = crash_point(&hash).unwrap();
        prop_assert_eq!(m.to_string().replace('.', "").parse::<u64>().unwrap(), m.hundredths());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_previous_rounds_chain(seed in "[ -~]{1,64}") {
        let rounds = previous_rounds(&seed).unwrap();
        prop_assert_eq!(rounds.len(), 100);
        prop_assert_eq!(&rounds[0].seed, &derive_hash_hex(seed.as_bytes()));
        for pair in rounds.windows(2) {
            prop_assert_eq!(&pair[1].seed, &derive_hash_hex(pair[0].seed.as_bytes()));
        }
    }
}
