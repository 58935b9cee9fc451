use chrono::{NaiveDate, TimeZone, Utc};
use metdesk_core::{day_window, FirstCardEntry, RecordSource, SecondCardEntry};
use metdesk_server::{MemoryStore, CARD_CAP};

fn first_card(hour: u32) -> FirstCardEntry {
    FirstCardEntry {
        station_id: "41953".into(),
        observed_at: Utc.with_ymd_and_hms(2026, 10, 19, hour, 0, 0).unwrap(),
        pressure: Default::default(),
        temperature: Default::default(),
    }
}

fn second_card(hour: u32) -> SecondCardEntry {
    SecondCardEntry {
        station_id: "41953".into(),
        observed_at: Utc.with_ymd_and_hms(2026, 10, 19, hour, 0, 0).unwrap(),
        observation: Default::default(),
    }
}

#[tokio::test]
async fn oldest_cards_are_dropped_past_capacity() {
    let store = MemoryStore::with_capacity(3);
    for hour in 0..5 {
        store.add_first_card(first_card(hour)).await;
        store.add_second_card(second_card(hour)).await;
    }

    let window = day_window(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    let first = store.first_card_entries("41953", &window).await.unwrap();
    let hours: Vec<_> = first.iter().map(|e| e.observed_at.format("%H").to_string()).collect();
    assert_eq!(hours, ["02", "03", "04"]);

    let second = store.second_card_entries("41953", &window).await.unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(second[0].observed_at, Utc.with_ymd_and_hms(2026, 10, 19, 2, 0, 0).unwrap());
}

#[tokio::test]
async fn default_store_keeps_cards_under_the_cap() {
    let store = MemoryStore::default();
    for hour in 0..24 {
        store.add_first_card(first_card(hour)).await;
    }
    let window = day_window(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    let first = store.first_card_entries("41953", &window).await.unwrap();
    assert!(first.len() < CARD_CAP);
    assert_eq!(first.len(), 24);
}
