use approx::{assert_abs_diff_eq, assert_relative_eq};
use dende_stats::{Column, Dataset, FrequencyMethod, Statistics, StatsError, Value};

fn events() -> Dataset {
    Dataset::from_iter([
        (
            "event_id",
            Column::from(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]),
        ),
        (
            "category",
            Column::from(vec![
                "Show", "Palestra", "Show", "Workshop", "Show", "Palestra", "Workshop", "Show",
                "Workshop", "Show",
            ]),
        ),
        (
            "priority",
            Column::from(vec![
                "alta", "media", "alta", "baixa", "alta", "media", "baixa", "alta", "baixa", "alta",
            ]),
        ),
        (
            "participants",
            Column::from(vec![
                50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0,
            ]),
        ),
        (
            "duration_hours",
            Column::from(vec![2.0, 3.0, 4.0, 2.0, 5.0, 3.0, 2.0, 4.0, 2.0, 3.0]),
        ),
        (
            "ticket_price",
            Column::from(vec![
                50.0, 30.0, 70.0, 20.0, 80.0, 30.0, 25.0, 75.0, 20.0, 65.0,
            ]),
        ),
        (
            "rating",
            Column::from(vec![4.5, 4.0, 4.8, 3.9, 4.9, 4.2, 4.0, 4.7, 3.8, 4.6]),
        ),
    ])
}

const NUMERIC: [&str; 5] = [
    "event_id",
    "participants",
    "duration_hours",
    "ticket_price",
    "rating",
];
const ALL: [&str; 7] = [
    "event_id",
    "category",
    "priority",
    "participants",
    "duration_hours",
    "ticket_price",
    "rating",
];

fn text(s: &str) -> Value {
    Value::from(s)
}

#[test]
fn mean_and_dispersion() {
    let dataset = events();
    let stats = Statistics::new(&dataset);

    assert_relative_eq!(stats.mean("ticket_price").unwrap(), 46.5);
    assert_relative_eq!(stats.mean("participants").unwrap(), 95.0);
    assert_relative_eq!(stats.variance("ticket_price").unwrap().unwrap(), 525.25);
    assert_abs_diff_eq!(
        stats.stdev("ticket_price").unwrap().unwrap(),
        22.9183,
        epsilon = 1e-4
    );
}

#[test]
fn mean_rejects_categorical_column() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    assert!(matches!(
        stats.mean("priority"),
        Err(StatsError::TypeMismatch { index: 0, .. })
    ));
}

#[test]
fn median_of_numeric_and_categorical() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    assert_eq!(stats.median("participants").unwrap(), Value::from(105.0));
    // sorted: alta x5, baixa x3, media x2 -> index 5
    assert_eq!(stats.median("priority").unwrap(), text("baixa"));
}

#[test]
fn modes() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    assert_eq!(stats.mode("category").unwrap(), vec![text("Show")]);
    assert_eq!(stats.mode("priority").unwrap(), vec![text("alta")]);
    // 2.0 occurs four times
    assert_eq!(stats.mode("duration_hours").unwrap(), vec![Value::from(2.0)]);
    // 30 and 20 both occur twice; 30 appears first
    assert_eq!(
        stats.mode("ticket_price").unwrap(),
        vec![Value::from(30.0), Value::from(20.0)]
    );
}

#[test]
fn covariance_between_columns() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    assert_relative_eq!(
        stats.covariance("participants", "ticket_price").unwrap(),
        27.5
    );
    assert_relative_eq!(
        stats.covariance("ticket_price", "ticket_price").unwrap(),
        stats.variance("ticket_price").unwrap().unwrap()
    );
}

#[test]
fn itemset_collapses_duplicates() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let items = stats.itemset("priority").unwrap();
    assert_eq!(items.len(), 3);
    for value in ["baixa", "media", "alta"] {
        assert!(items.contains(&text(value)));
    }
}

#[test]
fn frequency_tables() {
    let dataset = events();
    let stats = Statistics::new(&dataset);

    let absolute = stats.absolute_frequency("priority").unwrap();
    assert_eq!(absolute.get(&text("alta")), Some(5));
    assert_eq!(absolute.get(&text("media")), Some(2));
    assert_eq!(absolute.get(&text("baixa")), Some(3));

    let relative = stats.relative_frequency("priority").unwrap();
    assert_relative_eq!(relative.get(&text("alta")).unwrap(), 0.5);
    assert_relative_eq!(relative.get(&text("media")).unwrap(), 0.2);
    assert_relative_eq!(relative.get(&text("baixa")).unwrap(), 0.3);
}

#[test]
fn cumulative_frequency_with_ordinal_scale() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let order = ["baixa", "media", "alta"].map(Value::from);

    let absolute = stats
        .cumulative_frequency("priority", FrequencyMethod::Absolute, Some(&order))
        .unwrap();
    let sums = absolute
        .iter()
        .map(|(value, sum)| (value.to_string(), sum))
        .collect::<Vec<_>>();
    assert_eq!(
        sums,
        vec![
            ("baixa".to_owned(), 3.0),
            ("media".to_owned(), 5.0),
            ("alta".to_owned(), 10.0),
        ]
    );

    let relative = stats
        .cumulative_frequency("priority", FrequencyMethod::Relative, Some(&order))
        .unwrap();
    assert_relative_eq!(relative.get(&text("baixa")).unwrap(), 0.3);
    assert_relative_eq!(relative.get(&text("media")).unwrap(), 0.5);
    assert_relative_eq!(relative.get(&text("alta")).unwrap(), 1.0);
}

#[test]
fn cumulative_frequency_defaults_to_natural_order() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let table = stats
        .cumulative_frequency("priority", FrequencyMethod::Absolute, None)
        .unwrap();
    let order = table.values().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(order, vec!["alta", "baixa", "media"]);
}

#[test]
fn conditional_probability_of_transition() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    assert_relative_eq!(
        stats
            .conditional_probability("priority", &text("alta"), &text("media"))
            .unwrap(),
        0.5
    );
    assert_eq!(
        stats
            .conditional_probability("priority", &text("alta"), &text("urgente"))
            .unwrap(),
        0.0
    );
}

#[test]
fn quartiles_of_participants() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let quartiles = stats.quartiles("participants").unwrap();
    assert_eq!(quartiles.to_array(), [70.0, 105.0, 120.0]);
}

#[test]
fn histogram_of_ticket_price() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let histogram = stats.histogram("ticket_price", 4).unwrap();
    assert_eq!(histogram.total(), 10);
    let buckets = histogram.iter().collect::<Vec<_>>();
    assert_eq!(
        buckets,
        vec![
            ((20.0, 35.0), 5),
            ((35.0, 50.0), 0),
            ((50.0, 65.0), 1),
            ((65.0, 80.0), 4),
        ]
    );
}

#[test]
fn frequency_properties_hold_for_every_column() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    for column in ALL {
        let len = stats.count(column).unwrap() as u64;
        let absolute = stats.absolute_frequency(column).unwrap();
        assert_eq!(absolute.total(), len, "{column}");

        let relative = stats.relative_frequency(column).unwrap();
        assert_abs_diff_eq!(
            relative.iter().map(|(_, p)| p).sum::<f64>(),
            1.0,
            epsilon = 1e-9
        );

        let cumulative = stats
            .cumulative_frequency(column, FrequencyMethod::Absolute, None)
            .unwrap();
        assert_eq!(cumulative.last().unwrap().1, len as f64, "{column}");
        let cumulative = stats
            .cumulative_frequency(column, FrequencyMethod::Relative, None)
            .unwrap();
        assert_abs_diff_eq!(cumulative.last().unwrap().1, 1.0, epsilon = 1e-9);

        let modes = stats.mode(column).unwrap();
        let max = absolute.iter().map(|(_, c)| c).max().unwrap();
        for (value, count) in absolute.iter() {
            assert_eq!(modes.contains(value), count == max, "{column}: {value}");
        }
    }
}

#[test]
fn numeric_properties_hold_for_every_column() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    for column in NUMERIC {
        let variance = stats.variance(column).unwrap().unwrap();
        assert_relative_eq!(stats.stdev(column).unwrap().unwrap(), variance.sqrt());

        let q = stats.quartiles(column).unwrap();
        assert!(q.q1 <= q.q2 && q.q2 <= q.q3, "{column}: {q:?}");

        for bins in [1, 3, 4, 10] {
            let histogram = stats.histogram(column, bins).unwrap();
            assert_eq!(histogram.bins.len(), bins);
            assert_eq!(histogram.total(), 10, "{column} with {bins} bins");
        }
    }
}

#[test]
fn covariance_matrix_over_numeric_columns() {
    let dataset = events();
    let stats = Statistics::new(&dataset);
    let pairs = stats.covariance_matrix(&NUMERIC);
    assert_eq!(pairs.len(), 10);
    assert!(pairs.iter().all(|pair| pair.covariance.is_ok()));
}

#[test]
fn queries_leave_dataset_unchanged() {
    let dataset = events();
    let before = dataset.column("ticket_price").unwrap().clone();
    let stats = Statistics::new(&dataset);
    let _ = stats.quartiles("ticket_price");
    let _ = stats.median("ticket_price");
    let _ = stats.histogram("ticket_price", 4);
    assert_eq!(dataset.column("ticket_price").unwrap(), &before);
}
