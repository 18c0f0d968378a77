//! Batch read and write tests: `batch_get`, `mass_write`, `multi_write`,
//! and `multi_delete`, including the shared 25-operation ceiling.

#[cfg(test)]
mod tests {
    use adynamo_client::{Error, Item, MAX_BATCH_OPERATIONS, Value, item};

    use crate::test_database;

    fn user_items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| item! { "id" => i as i64, "name" => format!("user-{i}") })
            .collect()
    }

    #[tokio::test]
    async fn test_should_batch_get_requested_items() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();
        for i in 1..=3_i64 {
            users.put(item! { "id" => i, "rank" => i * 10 }).await.unwrap();
        }

        let found = users
            .batch_get(vec![item! { "id" => 3 }, item! { "id" => 1 }])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        let ids: Vec<&Value> = found.iter().map(|item| &item["id"]).collect();
        assert!(ids.contains(&&Value::Int(1)));
        assert!(ids.contains(&&Value::Int(3)));
    }

    #[tokio::test]
    async fn test_should_skip_missing_keys_in_batch_get() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();
        users.put(item! { "id" => 1 }).await.unwrap();

        let found = users
            .batch_get(vec![item! { "id" => 1 }, item! { "id" => 99 }])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_should_reject_batch_get_with_non_key_attributes() {
        let (store, db) = test_database();
        let users = db.table("users").unwrap();

        let err = users
            .batch_get(vec![item! { "id" => 1, "name" => "alice" }])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedArgument(attr) if attr == "name"));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_mass_write_up_to_the_ceiling() {
        let (store, db) = test_database();
        let users = db.table("users").unwrap();

        let output = users.mass_write(user_items(MAX_BATCH_OPERATIONS)).await.unwrap();
        assert!(output.unprocessed_items.is_empty());
        assert_eq!(store.items_in("users").len(), MAX_BATCH_OPERATIONS);
        assert_eq!(store.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_should_reject_mass_write_over_the_ceiling() {
        let (store, db) = test_database();
        let users = db.table("users").unwrap();

        let err = users
            .mass_write(user_items(MAX_BATCH_OPERATIONS + 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(26)));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_multi_write_across_tables() {
        let (store, db) = test_database();

        let events: Vec<Item> = (0..13_i64)
            .map(|ts| item! { "id" => 1, "ts" => ts })
            .collect();
        db.multi_write([
            ("users", user_items(12)),
            ("events", events),
        ])
        .await
        .unwrap();

        assert_eq!(store.items_in("users").len(), 12);
        assert_eq!(store.items_in("events").len(), 13);
        assert_eq!(store.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_should_enforce_combined_ceiling_on_multi_write() {
        let (store, db) = test_database();

        let events: Vec<Item> = (0..13_i64)
            .map(|ts| item! { "id" => 1, "ts" => ts })
            .collect();
        let err = db
            .multi_write([("users", user_items(13)), ("events", events)])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(26)));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_reject_multi_write_to_unknown_table() {
        let (store, db) = test_database();

        let err = db
            .multi_write([("ghosts", user_items(1))])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTable(name) if name == "ghosts"));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_multi_delete_across_tables() {
        let (store, db) = test_database();
        let users = db.table("users").unwrap();
        let events = db.table("events").unwrap();
        users.put(item! { "id" => 1 }).await.unwrap();
        users.put(item! { "id" => 2 }).await.unwrap();
        events.put(item! { "id" => 1, "ts" => 10 }).await.unwrap();

        db.multi_delete([
            ("users", vec![item! { "id" => 1 }]),
            ("events", vec![item! { "id" => 1, "ts" => 10 }]),
        ])
        .await
        .unwrap();

        assert_eq!(store.items_in("users").len(), 1);
        assert!(store.items_in("events").is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_multi_delete_with_non_key_attributes() {
        let (store, db) = test_database();

        let err = db
            .multi_delete([("users", vec![item! { "id" => 1, "name" => "alice" }])])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedArgument(attr) if attr == "name"));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_enforce_combined_ceiling_on_multi_delete() {
        let (store, db) = test_database();

        let keys: Vec<Item> = (0..26_i64).map(|i| item! { "id" => i }).collect();
        let err = db.multi_delete([("users", keys)]).await.unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(26)));
        assert_eq!(store.dispatch_count(), 0);
    }
}
