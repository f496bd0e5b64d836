// tests/weekly_aggregation.rs
//
// Aggregator contract: Monday-keyed weekly buckets, mean of {-1, 0, +1}
// scores, empty weeks absent, output ordered and idempotent.

use chrono::{NaiveDate, NaiveTime};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use employer_sentiment_drift::{aggregate_weekly, week_start_of, Sentiment, SentimentRecord};

fn rec(date: &str, s: Sentiment) -> SentimentRecord {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    SentimentRecord::new(d.and_time(NaiveTime::MIN).and_utc(), s)
}

#[test]
fn mixed_week_then_neutral_week() {
    // Mon + Tue of week one (Positive, Negative), Mon of week two (Neutral):
    // week one mean (1 - 1) / 2 = 0.0, week two mean 0 / 1 = 0.0.
    let records = vec![
        rec("2025-03-03", Sentiment::Positive),
        rec("2025-03-04", Sentiment::Negative),
        rec("2025-03-10", Sentiment::Neutral),
    ];

    let weekly = aggregate_weekly(&records);
    assert_eq!(weekly.len(), 2);

    assert_eq!(
        weekly[0].week_start,
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );
    assert_eq!(weekly[0].mean_score, 0.0);
    assert_eq!(weekly[0].sample_count, 2);

    assert_eq!(
        weekly[1].week_start,
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    );
    assert_eq!(weekly[1].mean_score, 0.0);
    assert_eq!(weekly[1].sample_count, 1);
}

#[test]
fn quiet_week_leaves_a_gap() {
    // Records in week 1 and week 3, nothing in week 2: exactly two entries,
    // and the gap is visible in the week_start sequence.
    let records = vec![
        rec("2025-03-05", Sentiment::Positive),
        rec("2025-03-19", Sentiment::Negative),
    ];

    let weekly = aggregate_weekly(&records);
    assert_eq!(weekly.len(), 2);
    assert_eq!(
        weekly[0].week_start,
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );
    assert_eq!(
        weekly[1].week_start,
        NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
    );
    assert_eq!(
        (weekly[1].week_start - weekly[0].week_start).num_days(),
        14,
        "the empty week in between must not be fabricated"
    );
}

#[test]
fn sunday_closes_the_week_monday_opens_the_next() {
    // 2025-03-09 is a Sunday, 2025-03-10 the following Monday.
    let sunday = rec("2025-03-09", Sentiment::Positive);
    let monday = rec("2025-03-10", Sentiment::Positive);

    assert_eq!(
        week_start_of(sunday.created_at),
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );
    assert_eq!(
        week_start_of(monday.created_at),
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    );
}

#[test]
fn shuffled_input_yields_identical_output() {
    // Idempotence over an unordered collection: any permutation of the same
    // records produces the same ordered weekly sequence.
    let mut records = Vec::new();
    for week in 0..10u32 {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
            + chrono::Duration::weeks(week as i64);
        for (i, s) in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
            .into_iter()
            .enumerate()
        {
            let day = monday + chrono::Duration::days(i as i64);
            records.push(SentimentRecord::new(day.and_time(NaiveTime::MIN).and_utc(), s));
        }
    }

    let baseline = aggregate_weekly(&records);
    assert_eq!(baseline.len(), 10);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        records.shuffle(&mut rng);
        assert_eq!(aggregate_weekly(&records), baseline);
    }
}

#[test]
fn ascending_and_strictly_increasing() {
    let records = vec![
        rec("2025-06-02", Sentiment::Positive),
        rec("2025-04-07", Sentiment::Negative),
        rec("2025-05-05", Sentiment::Neutral),
        rec("2025-04-09", Sentiment::Positive),
    ];
    let weekly = aggregate_weekly(&records);
    assert!(weekly.windows(2).all(|w| w[0].week_start < w[1].week_start));
}
