#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use greeks_rs::prelude::*;

    const RATE: f64 = 0.0533;
    const SPOT: f64 = 100.0;

    /// Volatility smile: higher volatility away from the money.
    fn smile(strike: f64) -> f64 {
        let moneyness = (strike / SPOT).ln();
        0.22 + 0.8 * moneyness * moneyness
    }

    fn quote_at(params: &PricingParams, vol: f64) -> Quote {
        let price = BlackScholes::price(params, vol);
        Quote::new(price, price - 0.05, price + 0.05, 250.0, 4_000.0, 0.0)
    }

    fn smile_chain() -> Chain {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let mut chain = Chain::new("QQQ", SPOT, 0.0).unwrap();
        for (month, day) in [(3, 21), (6, 20), (12, 19)] {
            let expiration = NaiveDate::from_ymd_opt(2025, month, day).unwrap();
            let t = DayCount::CalendarOver252.year_fraction(now, expiration);
            let mut ladder = ExpirationLadder::empty(expiration, t).unwrap();
            for strike in [85.0, 95.0, 100.0, 105.0, 115.0] {
                let call = PricingParams::call(SPOT, strike, t, RATE);
                let vol = smile(strike);
                let put = call.mirrored();
                ladder
                    .push_strike(strike, quote_at(&call, vol), quote_at(&put, vol))
                    .unwrap();
            }
            chain.push_ladder(ladder);
        }
        chain
    }

    #[test]
    fn test_enrichment_recovers_the_smile() {
        let chain = smile_chain();
        assert_eq!(chain.contract_count(), 30);

        let enriched = ChainAggregator::default().enrich(&chain);
        for ladder in enriched.ladders() {
            for (call, put) in ladder.rows() {
                let expected = smile(call.strike());
                for contract in [call, put] {
                    let iv = contract
                        .analytics()
                        .unwrap()
                        .implied_volatility
                        .value()
                        .unwrap();
                    assert!(
                        (iv - expected).abs() < 1e-5,
                        "strike {} iv {iv} expected {expected}",
                        contract.strike()
                    );
                }
            }
        }

        let summary = EnrichmentSummary::of(&enriched);
        assert_eq!(summary.contracts, 30);
        assert_eq!(summary.solved, 30);
        assert_eq!(summary.unavailable, 0);
        assert_eq!(summary.indeterminate_greeks, 0);
    }

    #[test]
    fn test_ladders_are_ordered_by_expiry() {
        let chain = smile_chain();
        let times: Vec<f64> = chain.ladders().iter().map(|l| l.time_to_expiry()).collect();
        assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn test_greeks_shape_across_strikes() {
        let enriched = ChainAggregator::default().enrich(&smile_chain());
        let ladder = &enriched.ladders()[1];

        let call_deltas: Vec<f64> = ladder
            .calls()
            .iter()
            .map(|c| c.analytics().unwrap().greeks.delta.or_zero())
            .collect();
        assert!(call_deltas.windows(2).all(|pair| pair[0] > pair[1]));

        for (call, put) in ladder.rows() {
            let call_greeks = call.analytics().unwrap().greeks;
            let put_greeks = put.analytics().unwrap().greeks;
            // Same volatility on both legs, so the symmetric Greeks agree.
            assert!((call_greeks.gamma.or_zero() - put_greeks.gamma.or_zero()).abs() < 1e-6);
            assert!((call_greeks.vega.or_zero() - put_greeks.vega.or_zero()).abs() < 1e-3);
            assert!(call_greeks.delta.or_zero() - put_greeks.delta.or_zero() > 0.99);
        }
    }

    #[test]
    fn test_unpriced_and_expired_contracts_do_not_abort() {
        let mut chain = smile_chain();
        let expired = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let mut ladder = ExpirationLadder::empty(expired, 0.0).unwrap();
        let stale = Quote::new(2.0, 1.9, 2.1, 1.0, 1.0, 0.0);
        ladder.push_strike(100.0, stale, Quote::default()).unwrap();
        chain.push_ladder(ladder);

        let aggregator = ChainAggregator::default();
        let mut enriched = chain.clone();
        let summary = aggregator.enrich_in_place(&mut enriched);
        assert_eq!(summary.contracts, 32);
        assert_eq!(summary.solved, 30);
        assert_eq!(summary.unavailable, 2);
        assert_eq!(summary.indeterminate_greeks, 0);
        assert_eq!(summary, EnrichmentSummary::of(&enriched));

        let expired = &enriched.ladders()[0];
        assert_eq!(expired.time_to_expiry(), 0.0);
        let analytics = expired.calls()[0].analytics().unwrap();
        assert_eq!(
            analytics.implied_volatility,
            ImpliedVolatility::Unavailable(UnavailableReason::Expired)
        );
        assert_eq!(analytics.implied_volatility.or_zero(), 0.0);
        assert_eq!(analytics.greeks.delta.or_zero(), 0.0);
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let aggregator = ChainAggregator::default();
        let once = aggregator.enrich(&smile_chain());
        let twice = aggregator.enrich(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rate_change_shifts_implied_volatility() {
        let chain = smile_chain();
        let config = EngineConfig::default().with_risk_free_rate(0.0);
        let low_rate = ChainAggregator::with_config(config).unwrap();
        let enriched = low_rate.enrich(&chain);
        let call = &enriched.ladders()[2].calls()[2];
        let iv = call.analytics().unwrap().implied_volatility.value().unwrap();
        // Quotes were generated with a positive rate; a zero rate needs more volatility.
        assert!(iv > smile(100.0));
    }

    #[test]
    fn test_misaligned_ladder_is_rejected() {
        let expiration = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        let quote = Quote::new(1.0, 0.9, 1.1, 1.0, 1.0, 0.0);
        let calls = vec![
            Contract::call(100.0, 0.2, quote),
            Contract::call(105.0, 0.2, quote),
        ];
        let puts = vec![
            Contract::put(100.0, 0.2, quote),
            Contract::put(110.0, 0.2, quote),
        ];
        let result = ExpirationLadder::new(expiration, 0.2, calls, puts);
        assert!(matches!(result, Err(ChainError::LadderMisaligned { .. })));
    }

    #[test]
    fn test_invalid_chain_inputs() {
        assert!(matches!(
            Chain::new("SPY", -1.0, 0.0),
            Err(ChainError::InvalidChain { .. })
        ));
        assert!(Chain::new("SPY", 100.0, f64::NAN).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_enrichment_matches_serial() {
        let aggregator = ChainAggregator::default();
        let chain = smile_chain();
        assert_eq!(aggregator.enrich(&chain), aggregator.enrich_par(&chain));
    }
}
