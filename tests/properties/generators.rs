//! Property tests for the case generators behind sampled properties.

use proptest::prelude::*;

use infracheck::harness::{az_case, environment_pair, node_group};
use infracheck::{Sampler, Verdict};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Generated node groups are always internally consistent.
    #[test]
    fn property_node_groups_are_consistent(spec in node_group()) {
        prop_assert!(spec.min_size <= spec.desired_size);
        prop_assert!(spec.desired_size <= spec.max_size);
        prop_assert!(!spec.instance_types.is_empty());
        prop_assert_eq!(
            spec.populated_fields().contains(&"taints"),
            !spec.taints.is_empty()
        );
    }

    /// PROPERTY: Environment pairs never compare an environment with itself.
    #[test]
    fn property_environment_pairs_differ((a, b) in environment_pair()) {
        prop_assert_ne!(a, b);
    }

    /// PROPERTY: AZ layouts stay within two to four zones.
    #[test]
    fn property_az_counts_in_range(case in az_case()) {
        prop_assert!((2..=4).contains(&case.az_count));
    }

    /// PROPERTY: A passing check is evaluated exactly `cases` times.
    #[test]
    fn property_sampler_evaluates_every_case(cases in 1u32..64, seed in any::<u64>()) {
        let sampled = Sampler::new(cases, Some(seed)).run(az_case(), |_| Ok(Verdict::pass("ok")));
        prop_assert_eq!(sampled.samples, cases);
        prop_assert_eq!(sampled.verdict.status(), infracheck::CheckStatus::Pass);
    }

    /// PROPERTY: Same seed, same verdict.
    #[test]
    fn property_sampler_is_deterministic(seed in any::<u64>()) {
        let sampler = Sampler::new(16, Some(seed));
        let check = |case: &infracheck::AzCase| -> infracheck::VerifyResult<Verdict> {
            Ok(if case.az_count == 4 && !case.single_nat_gateway {
                Verdict::mismatch("four zones without a shared NAT", Vec::new())
            } else {
                Verdict::pass("ok")
            })
        };
        prop_assert_eq!(sampler.run(az_case(), check), sampler.run(az_case(), check));
    }
}
