//! End-to-end pricing scenarios on small pools with hand-computed results

use ramm_engine::{
    dec, deposit_mint_amount, redeem_amount, single_asset_withdrawal, totals, trade_given_in,
    trade_given_out, Decimal, EngineError, PoolParams, PoolState, TradeStatus,
};

fn state(balances: &[Decimal], lp: &[Decimal], prices: &[Decimal]) -> PoolState {
    PoolState::new(balances.to_vec(), lp.to_vec(), prices.to_vec()).unwrap()
}

fn balanced() -> PoolState {
    state(&[dec!(100), dec!(100)], &[dec!(100), dec!(100)], &[dec!(1), dec!(1)])
}

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn first_deposit_mints_one_to_one() {
    let empty = state(&[dec!(0), dec!(0)], &[dec!(0), dec!(0)], &[dec!(1), dec!(1)]);
    assert_eq!(deposit_mint_amount(0, dec!(100), &empty).unwrap(), dec!(100));
}

#[test]
fn depleted_in_token_is_priced_linearly() {
    let pool = state(&[dec!(0), dec!(100)], &[dec!(50), dec!(50)], &[dec!(1), dec!(1)]);
    let outcome = trade_given_in(0, 1, dec!(10), &pool, &PoolParams::default()).unwrap();

    assert_eq!(outcome.amount, dec!(9.99));
    assert_eq!(outcome.swap_fee, dec!(0.01));
    assert_eq!(outcome.protocol_fee, dec!(0.005));
    assert!(outcome.execute);
    assert_eq!(outcome.status, TradeStatus::Executed);
    assert_eq!(outcome.message, "Trade executed.");
}

#[test]
fn depleted_in_token_given_out_mirrors_given_in() {
    let pool = state(&[dec!(0), dec!(100)], &[dec!(50), dec!(50)], &[dec!(1), dec!(1)]);
    let outcome = trade_given_out(0, 1, dec!(9.99), &pool, &PoolParams::default()).unwrap();

    assert_eq!(outcome.amount, dec!(10));
    assert_eq!(outcome.swap_fee, dec!(0.01));
    assert!(outcome.execute);
}

#[test]
fn redeem_uses_pool_and_lp_values() {
    let pool = state(&[dec!(100), dec!(100)], &[dec!(100), dec!(100)], &[dec!(1), dec!(2)]);
    let t = totals(&pool).unwrap();
    assert_eq!(t.b, dec!(300));
    assert_eq!(t.l, dec!(300));
    assert_eq!(redeem_amount(dec!(10), &pool).unwrap(), dec!(10));
}

#[test]
fn nominal_curve_when_out_token_has_no_lp() {
    let pool = state(&[dec!(100), dec!(100)], &[dec!(100), dec!(0)], &[dec!(1), dec!(1)]);
    let outcome = trade_given_in(0, 1, dec!(10), &pool, &PoolParams::default()).unwrap();

    // 10000 · 9.99 / 10009.99
    assert_close(outcome.amount, dec!(9.9800299500798702096605), dec!(0.000000001));
    assert_eq!(outcome.swap_fee, dec!(0.01));
    assert!(outcome.execute);
    assert!(outcome.price_impact > Decimal::ZERO);
}

#[test]
fn scaled_curve_in_balanced_pool() {
    let params = PoolParams::default();
    let given_in = trade_given_in(0, 1, dec!(10), &balanced(), &params).unwrap();
    assert!(given_in.execute);
    assert_close(given_in.amount, dec!(9.98003), dec!(0.00001));

    let given_out = trade_given_out(0, 1, given_in.amount, &balanced(), &params).unwrap();
    assert!(given_out.execute);
    assert_close(given_out.amount, dec!(10), dec!(0.000000001));
}

#[test]
fn guard_rejection_zeroes_amounts() {
    let outcome = trade_given_in(0, 1, dec!(40), &balanced(), &PoolParams::default()).unwrap();

    assert!(!outcome.execute);
    assert_eq!(outcome.status, TradeStatus::PoolImbalance);
    assert_eq!(outcome.amount, Decimal::ZERO);
    assert_eq!(outcome.swap_fee, Decimal::ZERO);
    assert_eq!(outcome.protocol_fee, Decimal::ZERO);
    assert_eq!(
        outcome.message,
        "The trade was not executed because of pool imbalance."
    );
}

#[test]
fn scarce_out_token_is_refused() {
    // ratio of token 1 is 200·50 / (150·100) ≈ 0.667
    let pool = state(&[dec!(100), dec!(50)], &[dec!(100), dec!(100)], &[dec!(1), dec!(1)]);
    let params = PoolParams::default();

    let given_in = trade_given_in(0, 1, dec!(1), &pool, &params).unwrap();
    assert_eq!(given_in.status, TradeStatus::OutTokenImbalanceTooLow);

    let given_out = trade_given_out(0, 1, dec!(1), &pool, &params).unwrap();
    assert_eq!(given_out.status, TradeStatus::OutTokenImbalanceTooLow);
}

#[test]
fn out_amount_beyond_balance_is_refused() {
    let outcome = trade_given_in(0, 1, dec!(200), &balanced(), &PoolParams::default()).unwrap();
    assert_eq!(outcome.status, TradeStatus::InsufficientOutBalance);
    assert!(!outcome.execute);
}

#[test]
fn given_out_equal_to_balance_is_refused() {
    let outcome = trade_given_out(0, 1, dec!(100), &balanced(), &PoolParams::default()).unwrap();
    assert_eq!(outcome.status, TradeStatus::InsufficientOutBalance);
    assert_eq!(
        outcome.message,
        "The trade is not allowed because there is not enough balance of the out-token."
    );
}

#[test]
fn power_domain_violation_is_a_math_error() {
    let pool = state(&[dec!(100), dec!(100)], &[dec!(100), dec!(0)], &[dec!(1), dec!(1)]);
    // base 10000 / (10000 + 5994) is below 2/3
    let outcome = trade_given_in(0, 1, dec!(6000), &pool, &PoolParams::default()).unwrap();

    assert_eq!(outcome.status, TradeStatus::MathError);
    assert_eq!(outcome.message, "Math error.");
    assert!(!outcome.execute);
}

#[test]
fn no_lp_of_in_token_or_empty_out_token() {
    let params = PoolParams::default();
    let no_lp_in = state(&[dec!(100), dec!(100)], &[dec!(0), dec!(100)], &[dec!(1), dec!(1)]);
    assert_eq!(
        trade_given_in(0, 1, dec!(1), &no_lp_in, &params).unwrap().status,
        TradeStatus::NoLpTokensIn
    );
    assert_eq!(
        trade_given_out(0, 1, dec!(1), &no_lp_in, &params).unwrap().status,
        TradeStatus::NoLpTokensIn
    );

    let empty_out = state(&[dec!(100), dec!(0)], &[dec!(100), dec!(100)], &[dec!(1), dec!(1)]);
    assert_eq!(
        trade_given_in(0, 1, dec!(1), &empty_out, &params).unwrap().status,
        TradeStatus::NoOutTokenLeft
    );
}

#[test]
fn caller_mistakes_are_errors() {
    let params = PoolParams::default();
    assert_eq!(
        trade_given_in(0, 2, dec!(1), &balanced(), &params),
        Err(EngineError::TokenIndexOutOfRange { index: 2, n: 2 })
    );
    assert_eq!(
        trade_given_out(1, 1, dec!(1), &balanced(), &params),
        Err(EngineError::SameToken(1))
    );
    assert_eq!(
        trade_given_in(0, 1, dec!(-1), &balanced(), &params),
        Err(EngineError::NegativeAmount(dec!(-1)))
    );
    assert!(deposit_mint_amount(5, dec!(1), &balanced()).is_err());
}

#[test]
fn four_token_withdrawal_cascades_by_largest_ratio() {
    // ratios: 0.8, 1.3, 1.1, 0.8
    let pool = state(
        &[dec!(80), dec!(130), dec!(110), dec!(80)],
        &[dec!(100), dec!(100), dec!(100), dec!(100)],
        &[dec!(1), dec!(1), dec!(1), dec!(1)],
    );
    let outcome = single_asset_withdrawal(0, dec!(90), &pool, &PoolParams::default()).unwrap();
    let paid: Vec<Decimal> = outcome.amounts_per_token.iter().map(|p| p.amount).collect();

    // owed 90·80/(100·0.8) = 90, token 0 gives 80 - 0.75·10 = 72.5
    // token 1 (ratio 1.3) covers the remaining 17.5
    assert_eq!(paid, vec![dec!(72.5), dec!(17.5), dec!(0), dec!(0)]);
    assert_eq!(outcome.total_amount, dec!(90));
    assert_eq!(outcome.remaining_amount, dec!(0));
}

#[test]
fn curve_overflow_is_a_math_error() {
    // exponent w_o/w_i = 164.5 on a base of 1.49995 leaves the decimal range
    let pool = state(&[dec!(1), dec!(164.5)], &[dec!(1), dec!(0)], &[dec!(1), dec!(1)]);
    let params = PoolParams::new(dec!(0.25), dec!(0.001), dec!(1), dec!(0.5)).unwrap();
    let outcome = trade_given_out(0, 1, dec!(54.83), &pool, &params).unwrap();

    assert!(!outcome.execute);
    assert_eq!(outcome.status, TradeStatus::MathError);
    assert_eq!(outcome.message, "Math error.");
    assert_eq!(outcome.amount, Decimal::ZERO);
}

#[test]
fn linear_overflow_is_a_math_error() {
    let pool = state(&[dec!(0), dec!(100)], &[dec!(50), dec!(50)], &[dec!(10), dec!(1)]);
    let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
    let outcome = trade_given_in(0, 1, huge, &pool, &PoolParams::default()).unwrap();

    assert!(!outcome.execute);
    assert_eq!(outcome.status, TradeStatus::MathError);
}

#[test]
fn large_balanced_pool_prices_normally() {
    // L·b_j would overflow if the ratio were not reordered
    let big = Decimal::from(1_000_000_000_000_000_i64);
    let pool = state(&[big, big], &[big, big], &[dec!(1), dec!(1)]);
    let params = PoolParams::default();

    let outcome = trade_given_in(0, 1, dec!(1), &pool, &params).unwrap();
    assert!(outcome.execute);
    assert_close(outcome.amount, dec!(0.999), dec!(0.000001));

    let withdrawal = single_asset_withdrawal(0, dec!(1), &pool, &params).unwrap();
    assert_eq!(withdrawal.total_amount, dec!(1));
    assert_eq!(withdrawal.remaining_amount, dec!(0));
}
