use barchart_rs::core::{BarStyle, BoxSize, DataPoint, FieldValue, compute_bar_geometry};
use proptest::prelude::*;

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        4 => (-1_000.0f64..1_000.0).prop_map(FieldValue::Number),
        1 => Just(FieldValue::Null),
        1 => Just(FieldValue::Number(f64::NAN)),
        1 => "[a-z]{0,6}".prop_map(FieldValue::Text),
    ]
}

fn rows(values: &[Option<FieldValue>]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut row = DataPoint::new().with("name", format!("c{index}"));
            if let Some(value) = value {
                row.insert("value", value.clone());
            }
            row
        })
        .collect()
}

proptest! {
    #[test]
    fn domain_max_is_largest_coerced_value_or_zero(
        values in prop::collection::vec(prop::option::of(field_value()), 0..40),
        width in 0.0f64..2_000.0,
        height in 0.0f64..2_000.0
    ) {
        let data = rows(&values);
        let geometry = compute_bar_geometry(
            &data,
            "name",
            "value",
            BoxSize::new(width, height),
            &BarStyle::default(),
        );

        let expected = values
            .iter()
            .filter_map(|value| value.as_ref().and_then(FieldValue::as_finite_number))
            .fold(0.0f64, f64::max);
        prop_assert_eq!(geometry.domain_max(), expected);
    }

    #[test]
    fn bars_stay_inside_inner_area_in_input_order(
        values in prop::collection::vec(prop::option::of(field_value()), 1..40),
        width in 0.0f64..2_000.0,
        height in 0.0f64..2_000.0,
        gap_ratio in 0.0f64..0.95
    ) {
        let data = rows(&values);
        let style = BarStyle::default().with_gap_ratio(gap_ratio).expect("valid gap");
        let geometry = compute_bar_geometry(
            &data,
            "name",
            "value",
            BoxSize::new(width, height),
            &style,
        );

        prop_assert_eq!(geometry.bars.len(), values.len());
        for (index, bar) in geometry.bars.iter().enumerate() {
            prop_assert_eq!(bar.index, index);
            prop_assert_eq!(&bar.category, &format!("c{index}"));
            prop_assert!(bar.height >= 0.0);
            prop_assert!(bar.height <= height + 1e-9);
            prop_assert!(bar.y >= -1e-9 && bar.y <= height + 1e-9);
            prop_assert!((bar.y + bar.height - height).abs() <= 1e-6);
            prop_assert!(bar.x >= 0.0);
            prop_assert!(bar.x + bar.width <= width + 1e-6);
        }
    }

    #[test]
    fn taller_values_never_produce_shorter_bars(
        a in 0.0f64..1_000.0,
        b in 0.0f64..1_000.0,
        height in 1.0f64..2_000.0
    ) {
        let data = vec![
            DataPoint::new().with("name", "a").with("value", a),
            DataPoint::new().with("name", "b").with("value", b),
        ];
        let geometry = compute_bar_geometry(
            &data,
            "name",
            "value",
            BoxSize::new(400.0, height),
            &BarStyle::default(),
        );

        let (bar_a, bar_b) = (&geometry.bars[0], &geometry.bars[1]);
        if a <= b {
            prop_assert!(bar_a.height <= bar_b.height + 1e-9);
        } else {
            prop_assert!(bar_a.height + 1e-9 >= bar_b.height);
        }
    }
}
