// =========================================================================
// FALSIFY: conjugate normal-normal update contract
//
// Each test states a property of the closed-form posterior that a wrong
// formula (swapped precisions, variance used in place of precision, missing
// square root) would break.
//
// References:
//   - Gelman et al. (2013) "Bayesian Data Analysis", §2.5
//   - Gelman & Hill (2007) "Data Analysis Using Regression and
//     Multilevel/Hierarchical Models", ch. 12 (radon example)
// =========================================================================

use super::*;

/// Posterior is more concentrated than either input.
#[test]
fn falsify_posterior_narrower_than_inputs() {
    let post = posterior(0.3, 0.05, 0.5, 0.1).expect("valid");
    assert!(
        post.sd() < 0.05_f64.min(0.1),
        "FALSIFIED: sd_post={} not below min(sd_y, sd_prior)",
        post.sd()
    );
}

/// A very wide prior hands the data through.
#[test]
fn falsify_flat_prior_limit() {
    let post = posterior(0.3, 0.05, 0.5, 1e6).expect("valid");
    assert!(
        (post.mean() - 0.3).abs() < 1e-9,
        "FALSIFIED: mean_post={} should approach y=0.3",
        post.mean()
    );
    assert!(
        (post.sd() - 0.05).abs() < 1e-9,
        "FALSIFIED: sd_post={} should approach sd_y=0.05",
        post.sd()
    );
}

/// Very noisy data leaves the prior in place.
#[test]
fn falsify_uninformative_data_limit() {
    let post = posterior(0.3, 1e6, 0.5, 0.1).expect("valid");
    assert!(
        (post.mean() - 0.5).abs() < 1e-9,
        "FALSIFIED: mean_post={} should approach mean_prior=0.5",
        post.mean()
    );
    assert!(
        (post.sd() - 0.1).abs() < 1e-9,
        "FALSIFIED: sd_post={} should approach sd_prior=0.1",
        post.sd()
    );
}

/// Interval width shrinks as the data gets more precise.
#[test]
fn falsify_interval_narrows_with_precise_data() {
    let mut previous = f64::INFINITY;
    for sd_y in [1.0, 0.5, 0.2, 0.1, 0.05, 0.01, 0.001] {
        let (lo, hi) = credible_interval(0.3, sd_y, 0.5, 0.1, 0.95).expect("valid");
        let width = hi - lo;
        assert!(
            width < previous,
            "FALSIFIED: width={width} at sd_y={sd_y} not below previous {previous}"
        );
        previous = width;
    }
}

/// Standard deviations far from 1 still give a finite, usable posterior.
#[test]
fn falsify_extreme_sds_give_finite_moments() {
    let cases = [
        (1e-160, 1.0),
        (1.0, 1e-160),
        (1e160, 1e160),
        (1e-200, 1e200),
        (1e200, 1e-200),
        (1e-300, 1e-300),
        (1e300, 1e300),
        (f64::MIN_POSITIVE, 1.0),
    ];
    for (sd_y, sd_prior) in cases {
        let post = posterior(0.3, sd_y, 0.5, sd_prior).expect("valid");
        assert!(
            post.mean().is_finite() && post.sd().is_finite() && post.sd() > 0.0,
            "FALSIFIED: non-finite posterior {post:?} at sd_y={sd_y}, sd_prior={sd_prior}"
        );
        assert!(post.sd() <= sd_y.min(sd_prior));
        assert!((0.3..=0.5).contains(&post.mean()));

        let (lo, hi) = post.credible_interval(0.95).expect("finite moments");
        assert!(lo <= post.mean() && post.mean() <= hi);
    }
}

/// Exact limits when one source dominates by hundreds of orders of magnitude.
#[test]
fn falsify_extreme_sd_limits() {
    let post = posterior(0.3, 1e-160, 0.5, 1.0).expect("valid");
    assert!((post.mean() - 0.3).abs() < 1e-15);
    assert!((post.sd() / 1e-160 - 1.0).abs() < 1e-12);

    let post = posterior(0.3, 1e160, 0.5, 1e160).expect("valid");
    assert!((post.mean() - 0.4).abs() < 1e-12);
    assert!((post.sd() / (1e160 / 2.0_f64.sqrt()) - 1.0).abs() < 1e-12);
}

mod conjugate_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// Standard deviations spread log-uniformly over 1e-300..1e300.
    fn wide_sd() -> impl Strategy<Value = f64> {
        (-300.0f64..300.0).prop_map(|e| 10f64.powf(e))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// sd_post < min(sd_y, sd_prior) for any positive inputs.
        #[test]
        fn falsify_prop_shrinkage(
            y in -100.0f64..100.0,
            sd_y in 0.01f64..100.0,
            mean_prior in -100.0f64..100.0,
            sd_prior in 0.01f64..100.0,
        ) {
            let post = posterior(y, sd_y, mean_prior, sd_prior).expect("valid");
            prop_assert!(
                post.sd() < sd_y.min(sd_prior),
                "FALSIFIED: sd_post={} with sd_y={}, sd_prior={}",
                post.sd(), sd_y, sd_prior
            );
        }

        /// Swapping (y, sd_y) with (mean_prior, sd_prior) leaves the result unchanged.
        #[test]
        fn falsify_prop_symmetry(
            y in -100.0f64..100.0,
            sd_y in 0.01f64..100.0,
            mean_prior in -100.0f64..100.0,
            sd_prior in 0.01f64..100.0,
        ) {
            let a = posterior(y, sd_y, mean_prior, sd_prior).expect("valid");
            let b = posterior(mean_prior, sd_prior, y, sd_y).expect("valid");
            prop_assert!((a.mean() - b.mean()).abs() <= 1e-9 * (1.0 + a.mean().abs()));
            prop_assert!((a.sd() - b.sd()).abs() <= 1e-12 * (1.0 + a.sd()));
        }

        /// Posterior mean is a convex combination of y and mean_prior.
        #[test]
        fn falsify_prop_mean_between_inputs(
            y in -100.0f64..100.0,
            sd_y in 0.01f64..100.0,
            mean_prior in -100.0f64..100.0,
            sd_prior in 0.01f64..100.0,
        ) {
            let post = posterior(y, sd_y, mean_prior, sd_prior).expect("valid");
            let lo = y.min(mean_prior) - 1e-9;
            let hi = y.max(mean_prior) + 1e-9;
            prop_assert!(lo <= post.mean() && post.mean() <= hi);
        }

        /// Credible interval is centred on the posterior mean and ordered.
        #[test]
        fn falsify_prop_interval_centred(
            y in -10.0f64..10.0,
            sd_y in 0.01f64..10.0,
            sd_prior in 0.01f64..10.0,
            alpha in 0.05f64..0.995,
        ) {
            let post = posterior(y, sd_y, 0.0, sd_prior).expect("valid");
            let (lo, hi) = post.credible_interval(alpha).expect("valid");
            prop_assert!(lo < hi);
            prop_assert!(((lo + hi) / 2.0 - post.mean()).abs() < 1e-9);
        }

        /// Interval width narrows monotonically as sd_y decreases.
        #[test]
        fn falsify_prop_interval_monotone_in_sd_y(
            sd_y in 0.01f64..10.0,
            factor in 0.1f64..0.9,
            sd_prior in 0.01f64..10.0,
        ) {
            let (lo_a, hi_a) = credible_interval(0.0, sd_y, 0.0, sd_prior, 0.95).expect("valid");
            let (lo_b, hi_b) =
                credible_interval(0.0, sd_y * factor, 0.0, sd_prior, 0.95).expect("valid");
            prop_assert!(hi_b - lo_b < hi_a - lo_a);
        }

        /// Any positive finite pair of sds gives finite moments inside the inputs.
        #[test]
        fn falsify_prop_wide_sd_range(
            y in -100.0f64..100.0,
            sd_y in wide_sd(),
            mean_prior in -100.0f64..100.0,
            sd_prior in wide_sd(),
        ) {
            let post = posterior(y, sd_y, mean_prior, sd_prior).expect("valid");
            prop_assert!(post.mean().is_finite());
            prop_assert!(post.sd().is_finite() && post.sd() > 0.0);
            prop_assert!(post.sd() <= sd_y.min(sd_prior));
            let lo = y.min(mean_prior) - 1e-9;
            let hi = y.max(mean_prior) + 1e-9;
            prop_assert!(lo <= post.mean() && post.mean() <= hi);
            prop_assert!(post.credible_interval(0.95).is_ok());
        }

        /// Symmetry holds across the whole sd range.
        #[test]
        fn falsify_prop_wide_sd_symmetry(
            y in -100.0f64..100.0,
            sd_y in wide_sd(),
            mean_prior in -100.0f64..100.0,
            sd_prior in wide_sd(),
        ) {
            let a = posterior(y, sd_y, mean_prior, sd_prior).expect("valid");
            let b = posterior(mean_prior, sd_prior, y, sd_y).expect("valid");
            prop_assert!((a.mean() - b.mean()).abs() <= 1e-9 * (1.0 + a.mean().abs()));
            prop_assert_eq!(a.sd(), b.sd());
        }
    }
}
