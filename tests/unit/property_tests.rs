#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use greeks_rs::pricing::{
        BlackScholes, EngineConfig, GreeksEngine, OptionType, PricingParams, StandardNormal,
    };
    use proptest::prelude::*;

    fn option_type() -> impl Strategy<Value = OptionType> {
        prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
    }

    fn params() -> impl Strategy<Value = PricingParams> {
        (
            50.0..150.0f64,
            60.0..140.0f64,
            0.05..2.0f64,
            0.0..0.05f64,
            0.0..0.08f64,
            option_type(),
        )
            .prop_map(|(spot, strike, t, q, r, option_type)| {
                PricingParams::new(spot, strike, t, q, r, option_type)
            })
    }

    proptest! {
        #[test]
        fn prop_implied_volatility_round_trip(params in params(), vol in 0.05..1.5f64) {
            let engine = GreeksEngine::new(
                EngineConfig::default().with_risk_free_rate(params.risk_free_rate),
            )
            .unwrap();
            let price = BlackScholes::price(&params, vol);
            let vega = engine.greeks(&params, vol, price).vega.or_zero();
            prop_assume!(price > 1e-6 && vega > 1e-3);

            let solved = engine.implied_volatility(&params, price);
            let iv = solved.value();
            prop_assert!(iv.is_some(), "unsolved {:?} for {:?}", solved, params);
            let repriced = BlackScholes::price(&params, iv.unwrap_or_default());
            prop_assert!((repriced - price).abs() < 1e-4 * vega.max(1.0));
            prop_assert!((iv.unwrap_or_default() - vol).abs() < 1e-5);
        }

        #[test]
        fn prop_put_call_parity(params in params(), vol in 0.01..3.0f64) {
            let call_params = PricingParams { option_type: OptionType::Call, ..params };
            let call = BlackScholes::price(&call_params, vol);
            let put = BlackScholes::price(&call_params.mirrored(), vol);
            prop_assert!(BlackScholes::parity_gap(call, put, &call_params).abs() < 1e-8);
        }

        #[test]
        fn prop_cdf_symmetry(x in -8.0..8.0f64) {
            let total = StandardNormal::cdf(x) + StandardNormal::cdf(-x);
            prop_assert!((total - 1.0).abs() < 1e-8);
            prop_assert!((0.0..=1.0).contains(&StandardNormal::cdf(x)));
        }

        #[test]
        fn prop_call_delta_increases_with_spot(
            params in params(),
            vol in 0.05..1.0f64,
            bump in 0.5..20.0f64,
        ) {
            let engine = GreeksEngine::default();
            let call = PricingParams { option_type: OptionType::Call, ..params };
            let higher = PricingParams { spot: call.spot + bump, ..call };
            let delta = engine.greeks(&call, vol, 1.0).delta.or_zero();
            let bumped = engine.greeks(&higher, vol, 1.0).delta.or_zero();
            prop_assert!(bumped >= delta - 1e-12);
        }

        #[test]
        fn prop_price_increases_with_volatility(
            params in params(),
            vol in 0.05..1.0f64,
            bump in 0.01..0.5f64,
        ) {
            let price = BlackScholes::price(&params, vol);
            let bumped = BlackScholes::price(&params, vol + bump);
            prop_assert!(bumped >= price - 1e-9);
        }

        #[test]
        fn prop_delta_within_bounds(params in params(), vol in 0.01..2.0f64) {
            let engine = GreeksEngine::default();
            let delta = engine.greeks(&params, vol, 1.0).delta.or_zero();
            match params.option_type {
                OptionType::Call => prop_assert!((0.0..=1.0).contains(&delta)),
                OptionType::Put => prop_assert!((-1.0..=0.0).contains(&delta)),
            }
        }
    }

    #[test]
    fn test_symmetric_greeks_agree_between_legs() {
        let engine = GreeksEngine::default();
        let call = PricingParams::call(103.0, 97.0, 0.7, 0.04).with_dividend_yield(0.02);
        let put = call.mirrored();
        let call_greeks = engine.greeks(&call, 0.3, 10.0);
        let put_greeks = engine.greeks(&put, 0.3, 10.0);

        for (c, p) in [
            (call_greeks.vega, put_greeks.vega),
            (call_greeks.gamma, put_greeks.gamma),
            (call_greeks.vanna, put_greeks.vanna),
            (call_greeks.vomma, put_greeks.vomma),
            (call_greeks.veta, put_greeks.veta),
            (call_greeks.speed, put_greeks.speed),
            (call_greeks.zomma, put_greeks.zomma),
            (call_greeks.color, put_greeks.color),
            (call_greeks.ultima, put_greeks.ultima),
        ] {
            assert_approx_eq!(c.or_zero(), p.or_zero(), 1e-12);
        }

        // Delta legs differ by the dividend discount factor.
        let spread = call_greeks.delta.or_zero() - put_greeks.delta.or_zero();
        assert_approx_eq!(spread, call.dividend_discount(), 1e-7);
    }
}
