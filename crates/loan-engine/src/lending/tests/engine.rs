use super::common::*;
use crate::lending::domain::{ApplicantProfile, DeclineReason, LoanOffer};
use crate::lending::engine::{DecisionEngine, ProductLimits};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn high_score_offers_product_maximum_for_requested_period() {
    let decision = engine().decide(Some(&eligible(1000)), request(dec!(2000), 12));

    assert!(decision.is_granted());
    assert_eq!(
        decision.offer(),
        Some(&LoanOffer {
            amount: dec!(10000),
            period_months: 12,
        })
    );
    assert_eq!(decision.original_request(), &request(dec!(2000), 12));
}

#[test]
fn low_score_stretches_period_for_requested_amount() {
    let decision = engine().decide(Some(&eligible(100)), request(dec!(4000), 12));

    assert_eq!(
        decision.offer(),
        Some(&LoanOffer {
            amount: dec!(4000),
            period_months: 40,
        })
    );
}

#[test]
fn debtor_is_declined_and_request_echoed() {
    let original = request(dec!(4000), 12);
    let decision = engine().decide(Some(&ApplicantProfile::debtor("1234")), original.clone());

    assert!(!decision.is_granted());
    assert!(decision.offer().is_none());
    assert_eq!(decision.decline_reason(), Some(&DeclineReason::Debtor));
    assert_eq!(decision.original_request(), &original);
}

#[test]
fn missing_profile_is_declined() {
    let decision = engine().decide(None, request(dec!(2000), 12));

    assert!(!decision.is_granted());
    assert!(decision.offer().is_none());
    assert_eq!(decision.decline_reason(), Some(&DeclineReason::NoCreditRecord));
}

#[test]
fn suggested_period_beyond_product_maximum_is_declined() {
    let decision = engine().decide(Some(&eligible(10)), request(dec!(4000), 12));

    assert!(!decision.is_granted());
    assert_eq!(
        decision.decline_reason(),
        Some(&DeclineReason::SuggestedPeriodOutOfRange {
            suggested_period_months: dec!(400),
        })
    );
}

#[test]
fn score_exactly_at_threshold_maximises_amount() {
    // 1000 / 4000 = 0.25, * 4 = 1.00
    let decision = engine().decide(Some(&eligible(1000)), request(dec!(4000), 4));

    assert_eq!(
        decision.offer(),
        Some(&LoanOffer {
            amount: dec!(4000),
            period_months: 4,
        })
    );
}

#[test]
fn uncapped_maximum_is_offered_below_product_ceiling() {
    // 400 / 4000 = 0.10, * 12 = 1.2
    let decision = engine().decide(Some(&eligible(400)), request(dec!(4000), 12));

    assert_eq!(
        decision.offer(),
        Some(&LoanOffer {
            amount: dec!(4800),
            period_months: 12,
        })
    );
}

#[test]
fn maximum_equal_to_ceiling_offers_ceiling() {
    let decision = engine().decide(Some(&eligible(500)), request(dec!(2000), 20));

    assert_eq!(decision.offer().map(|offer| offer.amount), Some(dec!(10000)));
}

#[test]
fn suggested_period_on_either_bound_is_declined() {
    // 1200 / 100 = 12 months, equal to the minimum
    let at_minimum = engine().decide(Some(&eligible(100)), request(dec!(1200), 1));
    assert_eq!(
        at_minimum.decline_reason(),
        Some(&DeclineReason::SuggestedPeriodOutOfRange {
            suggested_period_months: dec!(12),
        })
    );

    // 6000 / 100 = 60 months, equal to the maximum
    let at_maximum = engine().decide(Some(&eligible(100)), request(dec!(6000), 12));
    assert_eq!(
        at_maximum.decline_reason(),
        Some(&DeclineReason::SuggestedPeriodOutOfRange {
            suggested_period_months: dec!(60),
        })
    );

    let inside = engine().decide(Some(&eligible(100)), request(dec!(5900), 12));
    assert_eq!(
        inside.offer(),
        Some(&LoanOffer {
            amount: dec!(5900),
            period_months: 59,
        })
    );
}

#[test]
fn product_limits_are_configurable() {
    let limits = ProductLimits {
        max_loan_amount: dec!(5000),
        min_period_months: 6,
        max_period_months: 36,
        required_credit_score: dec!(2),
    };
    let engine = DecisionEngine::new(limits);

    let capped = engine.decide(Some(&eligible(1000)), request(dec!(2000), 12));
    assert_eq!(capped.offer().map(|offer| offer.amount), Some(dec!(5000)));

    // 100 / 4000 -> 0.03, * 12 = 0.36 < 2; 40 months exceeds the 36 month product
    let too_long = engine.decide(Some(&eligible(100)), request(dec!(4000), 12));
    assert!(!too_long.is_granted());

    // 300 / 4000 -> 0.08, * 12 = 0.96 < 2; 14 months fits
    let stretched = engine.decide(Some(&eligible(300)), request(dec!(4000), 12));
    assert_eq!(stretched.offer().map(|offer| offer.period_months), Some(14));
}

#[test]
fn offer_fields_are_all_or_nothing() {
    let mut profiles = vec![None, Some(ApplicantProfile::debtor("1234"))];
    profiles.extend([1, 10, 100, 300, 1000].into_iter().map(|m| Some(eligible(m))));

    for profile in &profiles {
        for amount in [dec!(2000), dec!(4000), dec!(10000)] {
            for period in [12, 24, 60] {
                let view = engine().decide(profile.as_ref(), request(amount, period)).view();
                assert_eq!(view.granted, view.offered_amount.is_some());
                assert_eq!(view.granted, view.offered_period_months.is_some());
                assert_eq!(view.granted, view.decline_reason.is_none());
            }
        }
    }
}

#[test]
fn unknown_or_indebted_applicants_never_receive_offers() {
    let debtor = ApplicantProfile::debtor("1234");
    for amount in [dec!(0.01), dec!(1), dec!(2000), dec!(10000), Decimal::MAX] {
        for period in [1, 12, 36, 60, 600] {
            assert!(!engine().decide(None, request(amount, period)).is_granted());
            assert!(!engine().decide(Some(&debtor), request(amount, period)).is_granted());
        }
    }
}

#[test]
fn raising_modifier_keeps_granted_offers_granted() {
    let ladder = [10, 70, 100, 200, 300, 400, 1000, 5000];
    let mut granted_once = false;

    for modifier in ladder {
        let decision = engine().decide(Some(&eligible(modifier)), request(dec!(4000), 12));
        if granted_once {
            assert!(
                decision.is_granted(),
                "modifier {modifier} lost an offer a lower modifier earned"
            );
        }
        granted_once |= decision.is_granted();
    }

    assert!(granted_once);
}
