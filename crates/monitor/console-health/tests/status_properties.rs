use console_health::{
    aggregate_checks, classify_state, collect_issues, derive_notification, CheckSummaries, CheckSummary,
    FailoverState, HealthColor, IssueLink, ObjectRef, PlacementState, ResourceReport, ResourceState, StatusType,
};
use proptest::prelude::*;

fn status_type() -> impl Strategy<Value = StatusType> {
    prop_oneof![
        Just(StatusType::Default),
        Just(StatusType::Placement),
        Just(StatusType::Failover),
    ]
}

fn known_range(status_type: StatusType) -> std::ops::RangeInclusive<i32> {
    match status_type {
        StatusType::Default => 0..=3,
        StatusType::Placement => 0..=5,
        StatusType::Failover => 0..=4,
    }
}

fn report() -> impl Strategy<Value = ResourceReport> {
    ("[a-z]{1,8}", "[a-z]{1,8}", "[a-z]{1,8}")
        .prop_map(|(message, name, namespace)| ResourceReport::new(message, ObjectRef::new(name, namespace)))
}

fn summary() -> impl Strategy<Value = Option<CheckSummary>> {
    proptest::option::of(
        (prop::collection::vec(report(), 0..3), prop::collection::vec(report(), 0..3)).prop_map(
            |(errors_list, warnings_list)| CheckSummary {
                total: (errors_list.len() + warnings_list.len()) as u32,
                errors_list,
                warnings_list,
            },
        ),
    )
}

fn summaries() -> impl Strategy<Value = CheckSummaries> {
    prop::collection::vec(summary(), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, summary)| (format!("category{}", i), summary))
            .collect()
    })
}

#[test]
fn test_documented_scenarios() {
    assert_eq!(classify_state(ResourceState::Rejected.code(), StatusType::Default), HealthColor::Error);
    assert_eq!(classify_state(PlacementState::Stale.code(), StatusType::Placement), HealthColor::Warning);
    assert_eq!(classify_state(FailoverState::Processing.code(), StatusType::Failover), HealthColor::Warning);
    assert_eq!(classify_state(999, StatusType::Default), HealthColor::Warning);
}

#[test]
fn test_ordered_issue_collection() {
    let entries = |prefix: &str| {
        vec![
            ResourceReport::new(format!("{}1", prefix), ObjectRef::new("x", "ns")),
            ResourceReport::new(format!("{}2", prefix), ObjectRef::new("y", "ns")),
        ]
    };
    let mut summaries = CheckSummaries::new();
    summaries.insert(
        "a".to_string(),
        Some(CheckSummary { total: 4, errors_list: entries("ae"), warnings_list: entries("aw") }),
    );
    summaries.insert(
        "b".to_string(),
        Some(CheckSummary { total: 4, errors_list: entries("be"), warnings_list: entries("bw") }),
    );

    let issues = collect_issues(Some(&summaries), &|_: &str, _: &ObjectRef| IssueLink::default());
    let errors: Vec<_> = issues.errors.iter().map(|i| i.message.as_str()).collect();
    let warnings: Vec<_> = issues.warnings.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(errors, vec!["ae1", "ae2", "be1", "be2"]);
    assert_eq!(warnings, vec!["aw1", "aw2", "bw1", "bw2"]);
}

proptest! {
    #[test]
    fn prop_unrecognized_codes_warn(status_type in status_type(), code in any::<i32>()) {
        prop_assume!(!known_range(status_type).contains(&code));
        prop_assert_eq!(classify_state(code, status_type), HealthColor::Warning);
    }

    #[test]
    fn prop_known_codes_round_trip_their_enum(status_type in status_type(), code in 0i32..6) {
        prop_assume!(known_range(status_type).contains(&code));
        let expected = match status_type {
            StatusType::Default => ResourceState::from_code(code).map(|s| s.health_color()),
            StatusType::Placement => PlacementState::from_code(code).map(|s| s.health_color()),
            StatusType::Failover => FailoverState::from_code(code).map(|s| s.health_color()),
        };
        prop_assert_eq!(Some(classify_state(code, status_type)), expected);
    }

    #[test]
    fn prop_no_reason_no_notification(status_type in status_type(), code in any::<i32>()) {
        prop_assert!(derive_notification(code, status_type, None).is_none());
        prop_assert!(derive_notification(code, status_type, Some("")).is_none());
    }

    #[test]
    fn prop_notification_iff_actionable(
        status_type in status_type(),
        code in -2i32..8,
        reason in "[a-z ]{1,20}",
    ) {
        let notification = derive_notification(code, status_type, Some(reason.as_str()));
        let color = classify_state(code, status_type);
        prop_assert_eq!(notification.is_some(), color.is_actionable());
        if let Some(notification) = notification {
            prop_assert_eq!(notification.issue.message, reason);
        }
    }

    #[test]
    fn prop_aggregation_precedence(summaries in summaries()) {
        let fetched: Vec<_> = summaries.values().flatten().collect();
        let expected = if fetched.is_empty() {
            ResourceState::Pending
        } else if fetched.iter().any(|s| !s.errors_list.is_empty()) {
            ResourceState::Rejected
        } else if fetched.iter().any(|s| !s.warnings_list.is_empty()) {
            ResourceState::Warning
        } else {
            ResourceState::Accepted
        };
        prop_assert_eq!(aggregate_checks(Some(&summaries)), expected);
    }

    #[test]
    fn prop_collect_issues_keeps_every_entry(summaries in summaries()) {
        let issues = collect_issues(Some(&summaries), &|category: &str, _: &ObjectRef| IssueLink {
            details_link: category.to_string(),
            link_title: String::new(),
        });
        let expected_errors: Vec<_> = summaries
            .iter()
            .filter_map(|(category, summary)| summary.as_ref().map(|s| (category, s)))
            .flat_map(|(category, s)| s.errors_list.iter().map(move |r| (r.message.clone(), category.clone())))
            .collect();
        let actual_errors: Vec<_> = issues
            .errors
            .iter()
            .map(|i| (i.message.clone(), i.details_link.clone()))
            .collect();
        prop_assert_eq!(actual_errors, expected_errors);

        let expected_warnings: usize = summaries.values().flatten().map(|s| s.warnings_list.len()).sum();
        prop_assert_eq!(issues.warnings.len(), expected_warnings);
    }
}
