// ═══════════════════════════════════════════════════════════════════
// Port Tests — MemoryStore adapter, HttpRemoteFeed construction
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::expense::Expense;
use expense_tracker_core::ports::memory::MemoryStore;
use expense_tracker_core::ports::remote::HttpRemoteFeed;
use expense_tracker_core::ports::traits::{ExpenseStore, KeyValueStore, RemoteFeed, RemoteRecord};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

mod memory_store {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.fetch_all().unwrap().is_empty());
        assert_eq!(store.get("budgets").unwrap(), None);
    }

    #[test]
    fn save_then_fetch_preserves_order() {
        let mut store = MemoryStore::new();
        let a = Expense::new(1.0, "Food", Some(d(2026, 1, 1)));
        let b = Expense::new(2.0, "Travel", Some(d(2026, 1, 2)));
        store.save(&a).unwrap();
        store.save(&b).unwrap();
        store.commit().unwrap();

        assert_eq!(store.fetch_all().unwrap(), vec![a, b]);
    }

    #[test]
    fn with_expenses_seeds_the_store() {
        let seeded = vec![Expense::new(3.0, "Food", Some(d(2026, 1, 1)))];
        let store = MemoryStore::with_expenses(seeded.clone());
        assert_eq!(store.fetch_all().unwrap(), seeded);
    }

    #[test]
    fn kv_set_replaces_value() {
        let mut store = MemoryStore::new();
        store.set("budgets", b"a").unwrap();
        store.set("budgets", b"b").unwrap();
        assert_eq!(store.get("budgets").unwrap().as_deref(), Some(b"b".as_slice()));
    }
}

mod http_remote_feed {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(HttpRemoteFeed::new("https://api.example.com/expenses").is_ok());
        assert!(HttpRemoteFeed::new("http://localhost:8080/expenses").is_ok());
    }

    #[test]
    fn rejects_non_http_urls() {
        for url in ["ftp://example.com", "example.com/expenses", ""] {
            assert!(matches!(
                HttpRemoteFeed::new(url),
                Err(CoreError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn keeps_the_configured_url() {
        let feed = HttpRemoteFeed::new("https://api.example.com/expenses").unwrap();
        assert_eq!(feed.url(), "https://api.example.com/expenses");
        assert_eq!(feed.name(), "HTTP");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Reserved TEST-NET-1 address, nothing listens there.
        let feed = HttpRemoteFeed::new("http://192.0.2.1:9/expenses").unwrap();
        assert!(matches!(
            feed.fetch_records().await,
            Err(CoreError::Network(_))
        ));
    }
}

mod remote_record {
    use super::*;

    #[test]
    fn decodes_expected_payload_shape() {
        let body = r#"[{"amount": 12.5, "category": "Food"}, {"amount": 3.0, "category": "Travel"}]"#;
        let records: Vec<RemoteRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 12.5);
        assert_eq!(records[1].category, "Travel");
    }

    #[test]
    fn rejects_malformed_payload() {
        assert!(serde_json::from_str::<Vec<RemoteRecord>>(r#"{"amount": 1}"#).is_err());
    }
}
