//! Pricing calculator properties

use rstest::rstest;
use slicks_core::domain::{compute_total, PriceEntry, SizeMultiplier, VehicleSize};
use slicks_core::AppError;

fn price_list() -> Vec<PriceEntry> {
    vec![
        PriceEntry {
            service_name: "wash".to_string(),
            base_price: 50.0,
            size_multiplier: SizeMultiplier {
                small: 1.0,
                medium: 1.5,
                large: 2.0,
            },
        },
        PriceEntry {
            service_name: "wax".to_string(),
            base_price: 80.0,
            size_multiplier: SizeMultiplier {
                small: 1.0,
                medium: 1.25,
                large: 1.5,
            },
        },
        PriceEntry {
            service_name: "interior detail".to_string(),
            base_price: 120.0,
            size_multiplier: SizeMultiplier {
                small: 1.0,
                medium: 1.0,
                large: 1.2,
            },
        },
    ]
}

#[test]
fn empty_service_list_costs_nothing() {
    let total = compute_total(&price_list(), &[], VehicleSize::Large).unwrap();
    assert_eq!(total, 0.0);
}

#[rstest]
#[case(VehicleSize::Small, 50.0)]
#[case(VehicleSize::Medium, 75.0)]
#[case(VehicleSize::Large, 100.0)]
fn single_wash_scales_with_vehicle_size(#[case] size: VehicleSize, #[case] expected: f64) {
    let total = compute_total(&price_list(), &["wash".to_string()], size).unwrap();
    assert_eq!(total, expected);
}

#[test]
fn totals_never_decrease_as_services_are_added() {
    let list = price_list();
    let services = [
        "wash".to_string(),
        "wax".to_string(),
        "interior detail".to_string(),
    ];

    let mut previous = 0.0;
    for n in 0..=services.len() {
        let total = compute_total(&list, &services[..n], VehicleSize::Medium).unwrap();
        assert!(total >= previous, "total dropped after adding a service");
        previous = total;
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    // wash at base 50 on a large vehicle (x2.0) must price at 100, every time
    let list = vec![PriceEntry {
        service_name: "wash".to_string(),
        base_price: 50.0,
        size_multiplier: SizeMultiplier {
            small: 1.0,
            medium: 1.5,
            large: 2.0,
        },
    }];
    let services = vec!["wash".to_string()];

    let first = compute_total(&list, &services, VehicleSize::Large).unwrap();
    let second = compute_total(&list, &services, VehicleSize::Large).unwrap();
    assert_eq!(first, 100.0);
    assert_eq!(second, 100.0);
}

#[test]
fn unknown_service_names_are_a_validation_error() {
    let err = compute_total(
        &price_list(),
        &["wash".to_string(), "engine bay".to_string()],
        VehicleSize::Small,
    )
    .unwrap_err();

    match err {
        AppError::Validation(msg) => assert!(msg.contains("engine bay")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn duplicate_requests_price_each_occurrence() {
    // ordering two washes doubles the line item
    let total = compute_total(
        &price_list(),
        &["wash".to_string(), "wash".to_string()],
        VehicleSize::Small,
    )
    .unwrap();
    assert_eq!(total, 100.0);
}
