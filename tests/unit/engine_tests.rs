#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use greeks_rs::chain::{Contract, Quote};
    use greeks_rs::pricing::{
        BlackScholes, DEFAULT_RISK_FREE_RATE, EngineConfig, GreekValue, GreeksEngine,
        ImpliedVolatility, OptionType, PriceSource, PricingParams, StandardNormal,
        UnavailableReason,
    };

    fn engine_with_rate(rate: f64) -> GreeksEngine {
        GreeksEngine::new(EngineConfig::default().with_risk_free_rate(rate)).unwrap()
    }

    fn computed(value: GreekValue) -> f64 {
        value.value().expect("greek should be computed")
    }

    #[test]
    fn test_reference_call_at_five_percent() {
        let engine = engine_with_rate(0.05);
        let params = PricingParams::call(100.0, 100.0, 1.0, 0.05);

        let iv = engine.implied_volatility(&params, 10.45).value().unwrap();
        assert_approx_eq!(iv, 0.20, 1e-4);

        let greeks = engine.greeks(&params, iv, 10.45);
        assert_approx_eq!(computed(greeks.delta), 0.6368, 1e-3);
        assert!(computed(greeks.gamma) > 0.0);
        assert!(computed(greeks.vega) > 0.0);
    }

    #[test]
    fn test_reference_call_at_default_rate() {
        let engine = GreeksEngine::default();
        assert_eq!(engine.config().risk_free_rate, DEFAULT_RISK_FREE_RATE);

        let call = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        let iv = match engine.implied_volatility(&call, 10.45) {
            ImpliedVolatility::Solved { value, iterations } => {
                assert_eq!(iterations, 24);
                value
            }
            other => panic!("expected a solved volatility, got {other:?}"),
        };
        assert_approx_eq!(iv, 0.195252, 1e-5);

        let greeks = engine.greeks(&call, iv, 10.45);
        let delta = computed(greeks.delta);
        assert!(delta > 0.55 && delta < 0.70, "delta {delta}");
        assert_approx_eq!(computed(greeks.gamma), 0.019076, 1e-5);
        assert_approx_eq!(computed(greeks.vega), 37.246, 1e-2);

        // Put priced at the call's implied volatility lands on parity.
        let put = call.mirrored();
        let put_price = BlackScholes::price(&put, iv);
        let parity_put = 10.45 - 100.0 + 100.0 * (-DEFAULT_RISK_FREE_RATE).exp();
        assert_approx_eq!(parity_put, 5.2596, 1e-4);
        assert_approx_eq!(put_price, parity_put, 1e-4);
    }

    #[test]
    fn test_put_solves_to_the_same_volatility() {
        let engine = GreeksEngine::default();
        let call = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        let put = call.mirrored();
        let call_iv = engine.implied_volatility(&call, 10.45).value().unwrap();
        let put_price = 10.45 - 100.0 + 100.0 * (-DEFAULT_RISK_FREE_RATE).exp();
        let put_iv = engine.implied_volatility(&put, put_price).value().unwrap();
        assert_approx_eq!(call_iv, put_iv, 1e-5);
    }

    #[test]
    fn test_quote_above_volatility_ceiling() {
        let engine = GreeksEngine::default();
        let params = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        let ceiling = BlackScholes::price(&params, 15.0);
        let outcome = engine.implied_volatility(&params, ceiling + 0.5);
        assert_eq!(
            outcome,
            ImpliedVolatility::Unavailable(UnavailableReason::NotBracketed)
        );
        assert_eq!(outcome.or_zero(), 0.0);
    }

    #[test]
    fn test_narrower_bracket_limits_solutions() {
        let engine =
            GreeksEngine::new(EngineConfig::default().with_bounds(0.0, 0.5)).unwrap();
        let params = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        let price = BlackScholes::price(&params, 0.8);
        assert_eq!(
            engine.implied_volatility(&params, price),
            ImpliedVolatility::Unavailable(UnavailableReason::NotBracketed)
        );
    }

    #[test]
    fn test_tighter_tolerance_takes_more_iterations() {
        let coarse = GreeksEngine::new(EngineConfig::default().with_tolerance(1e-4)).unwrap();
        let fine = GreeksEngine::new(EngineConfig::default().with_tolerance(1e-10)).unwrap();
        let params = PricingParams::put(100.0, 90.0, 0.5, DEFAULT_RISK_FREE_RATE);
        let price = BlackScholes::price(&params, 0.35);

        let (coarse_iv, coarse_steps) = match coarse.implied_volatility(&params, price) {
            ImpliedVolatility::Solved { value, iterations } => (value, iterations),
            other => panic!("unexpected {other:?}"),
        };
        let (fine_iv, fine_steps) = match fine.implied_volatility(&params, price) {
            ImpliedVolatility::Solved { value, iterations } => (value, iterations),
            other => panic!("unexpected {other:?}"),
        };

        assert!(fine_steps > coarse_steps);
        assert_approx_eq!(coarse_iv, 0.35, 1e-4);
        assert_approx_eq!(fine_iv, 0.35, 1e-9);
    }

    #[test]
    fn test_iteration_guard_reports_solver_failure() {
        let engine = GreeksEngine::new(EngineConfig::default().with_max_iterations(5)).unwrap();
        let params = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        assert_eq!(
            engine.implied_volatility(&params, 10.45),
            ImpliedVolatility::Unavailable(UnavailableReason::SolverFailed)
        );
    }

    #[test]
    fn test_zero_volatility_greeks_are_flagged() {
        let engine = GreeksEngine::default();
        let params = PricingParams::call(100.0, 100.0, 1.0, 0.0);
        let greeks = engine.greeks(&params, 0.0, 1.0);
        assert!(greeks.gamma.is_indeterminate());
        assert!(greeks.vomma.is_indeterminate());
        assert!(greeks.ultima.is_indeterminate());
        assert!(greeks.indeterminate_count() > 0);
    }

    #[test]
    fn test_dividend_yield_lowers_call_delta() {
        let engine = GreeksEngine::default();
        let plain = PricingParams::call(100.0, 100.0, 1.0, DEFAULT_RISK_FREE_RATE);
        let paying = plain.with_dividend_yield(0.04);
        let plain_delta = computed(engine.greeks(&plain, 0.25, 10.0).delta);
        let paying_delta = computed(engine.greeks(&paying, 0.25, 10.0).delta);
        assert!(paying_delta < plain_delta);
    }

    #[test]
    fn test_delta_bounds() {
        let engine = GreeksEngine::default();
        for spot in [50.0, 80.0, 100.0, 120.0, 200.0] {
            for option_type in [OptionType::Call, OptionType::Put] {
                let params =
                    PricingParams::new(spot, 100.0, 0.5, 0.01, DEFAULT_RISK_FREE_RATE, option_type);
                let delta = computed(engine.greeks(&params, 0.3, 5.0).delta);
                match option_type {
                    OptionType::Call => assert!((0.0..=1.0).contains(&delta)),
                    OptionType::Put => assert!((-1.0..=0.0).contains(&delta)),
                }
            }
        }
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let engine = GreeksEngine::default();
        let params = PricingParams::put(95.0, 100.0, 0.75, DEFAULT_RISK_FREE_RATE)
            .with_dividend_yield(0.02);
        let vol = 0.28;
        let h = 1e-4;
        let up = BlackScholes::price(&params, vol + h);
        let down = BlackScholes::price(&params, vol - h);
        let bumped = (up - down) / (2.0 * h);
        let vega = computed(engine.greeks(&params, vol, 10.0).vega);
        assert_approx_eq!(vega, bumped, 1e-3);
    }

    #[test]
    fn test_veta_and_color_follow_calendar_time() {
        let engine = GreeksEngine::default();
        let params = PricingParams::call(105.0, 100.0, 0.75, DEFAULT_RISK_FREE_RATE)
            .with_dividend_yield(0.02);
        let vol = 0.28;
        let h = 1e-4;
        let later = PricingParams {
            time_to_expiry: params.time_to_expiry + h,
            ..params
        };
        let sooner = PricingParams {
            time_to_expiry: params.time_to_expiry - h,
            ..params
        };
        let at = |p: &PricingParams| engine.greeks(p, vol, 10.0);

        // Sensitivities to the passage of time: minus the slope in time to expiry.
        let vega_slope = (computed(at(&later).vega) - computed(at(&sooner).vega)) / (2.0 * h);
        let gamma_slope = (computed(at(&later).gamma) - computed(at(&sooner).gamma)) / (2.0 * h);
        let greeks = at(&params);
        assert_approx_eq!(computed(greeks.veta), -vega_slope, 1e-4);
        assert_approx_eq!(computed(greeks.color), -gamma_slope, 1e-7);
    }

    #[test]
    fn test_mid_price_source_rescues_untraded_contract() {
        // Quoted but never traded.
        let contract = Contract::call(100.0, 1.0, Quote::new(0.0, 10.40, 10.50, 0.0, 500.0, 0.0));

        let last_trade = GreeksEngine::default();
        let analytics = last_trade.evaluate(&contract, 100.0, 0.0);
        assert_eq!(
            analytics.implied_volatility,
            ImpliedVolatility::Unavailable(UnavailableReason::NoPrice)
        );
        assert_eq!(analytics.greeks.indeterminate_count(), 15);

        let mid = GreeksEngine::new(
            EngineConfig::default().with_price_source(PriceSource::MidPrice),
        )
        .unwrap();
        let analytics = mid.evaluate(&contract, 100.0, 0.0);
        let iv = analytics.implied_volatility.value().unwrap();
        assert_approx_eq!(iv, 0.195252, 1e-5);
        assert_eq!(analytics.greeks.indeterminate_count(), 0);
    }

    #[test]
    fn test_normal_distribution_landmarks() {
        assert!((StandardNormal::cdf(0.0) - 0.5).abs() < 1e-8);
        assert!((StandardNormal::cdf(1.959964) - 0.975).abs() < 1e-6);
        assert!((StandardNormal::pdf(0.0) - 0.398942280).abs() < 1e-9);
    }
}
