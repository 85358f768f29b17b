use audience_router_rs::{RouterOptions, RouterOptionsBuilder, RouterOptionsError};

#[test]
fn router_options_when_all_fields_customized_then_values_are_assigned() {
    let options = RouterOptionsBuilder::default()
        .high_priority_bonus(250)
        .load_timer_label("resolve-page")
        .build()
        .expect("router options should build");

    assert_eq!(options.high_priority_bonus, 250);
    assert_eq!(options.load_timer_label, "resolve-page");
    assert_eq!(options.rank_policy().high_priority_bonus(), 250);
}

#[test]
fn router_options_when_bonus_is_zero_then_build_fails() {
    let err = RouterOptions::builder()
        .high_priority_bonus(0)
        .build()
        .expect_err("zero bonus should be rejected");

    assert_eq!(
        err,
        RouterOptionsError::HighPriorityBonusInvalid { provided: 0 }
    );
}

#[test]
fn router_options_when_serialized_then_round_trips_camel_case() {
    let options = RouterOptions::default();
    let value = serde_json::to_value(&options).expect("options should serialize");

    assert_eq!(value["highPriorityBonus"], 1000);
    assert_eq!(value["loadTimerLabel"], "load-data");
}
