//! Item CRUD tests: get, put, update, increment, remove.

#[cfg(test)]
mod tests {
    use adynamo_client::{Error, GetOptions, Value, item};

    use crate::test_database;

    #[tokio::test]
    async fn test_should_put_and_get_item() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users
            .put(item! { "id" => 1, "name" => "alice", "score" => 10 })
            .await
            .unwrap();

        let found = users.get(1).await.unwrap().expect("item should exist");
        assert_eq!(found["id"], Value::Int(1));
        assert_eq!(found["name"], Value::Str("alice".to_owned()));
        assert_eq!(found["score"], Value::Int(10));
    }

    #[tokio::test]
    async fn test_should_return_none_for_missing_item() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        assert!(users.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_get_item_by_composite_key() {
        let (_store, db) = test_database();
        let events = db.table("events").unwrap();

        events
            .put(item! { "id" => 1, "ts" => 10, "kind" => "signup" })
            .await
            .unwrap();

        let found = events
            .get_with_range(1, 10)
            .await
            .unwrap()
            .expect("item should exist");
        assert_eq!(found["kind"], Value::Str("signup".to_owned()));
        assert!(events.get_with_range(1, 11).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_project_attributes_on_get() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users
            .put(item! { "id" => 1, "name" => "alice", "score" => 10 })
            .await
            .unwrap();

        let opts = GetOptions {
            consistent_read: true,
            attributes_to_get: vec!["name".to_owned()],
        };
        let found = users
            .get_opts(Value::Int(1), None, opts)
            .await
            .unwrap()
            .expect("item should exist");
        assert_eq!(found.len(), 1);
        assert_eq!(found["name"], Value::Str("alice".to_owned()));
    }

    #[tokio::test]
    async fn test_should_reject_second_put_for_same_key() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users.put(item! { "id" => 1, "name" => "alice" }).await.unwrap();
        let err = users
            .put(item! { "id" => 1, "name" => "bob" })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConcurrencyConflict(_)));

        // The losing write must not have clobbered the original.
        let found = users.get(1).await.unwrap().expect("item should exist");
        assert_eq!(found["name"], Value::Str("alice".to_owned()));
    }

    #[tokio::test]
    async fn test_should_overwrite_with_unconditional_put() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users.put(item! { "id" => 1, "name" => "alice" }).await.unwrap();
        users
            .put_unconditional(item! { "id" => 1, "name" => "bob" })
            .await
            .unwrap();

        let found = users.get(1).await.unwrap().expect("item should exist");
        assert_eq!(found["name"], Value::Str("bob".to_owned()));
    }

    #[tokio::test]
    async fn test_should_report_consumed_capacity_on_put() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        let capacity = users
            .put(item! { "id" => 1 })
            .await
            .unwrap()
            .expect("capacity should be reported");
        assert_eq!(capacity.table_name.as_deref(), Some("users"));
        assert_eq!(capacity.capacity_units, Some(1.0));
    }

    #[tokio::test]
    async fn test_should_update_replacing_attributes() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users
            .put(item! { "id" => 1, "name" => "alice", "score" => 10 })
            .await
            .unwrap();
        let updated = users
            .update(item! { "id" => 1, "name" => "alicia" })
            .await
            .unwrap();

        // Resolves to the whole item as it stands after the update.
        assert_eq!(updated["name"], Value::Str("alicia".to_owned()));
        assert_eq!(updated["score"], Value::Int(10));
    }

    #[tokio::test]
    async fn test_should_upsert_on_update_of_missing_item() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        let updated = users.update(item! { "id" => 7, "name" => "eve" }).await.unwrap();
        assert_eq!(updated["id"], Value::Int(7));
        assert_eq!(updated["name"], Value::Str("eve".to_owned()));
    }

    #[tokio::test]
    async fn test_should_accumulate_increments() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        let first = users.increment(item! { "id" => 1, "score" => 5 }).await.unwrap();
        assert_eq!(first["score"], Value::Int(5));

        let second = users.increment(item! { "id" => 1, "score" => 3 }).await.unwrap();
        assert_eq!(second["score"], Value::Int(8));
    }

    #[tokio::test]
    async fn test_should_remove_item() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users.put(item! { "id" => 1, "name" => "alice" }).await.unwrap();
        users.remove(item! { "id" => 1 }).await.unwrap();

        assert!(users.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_enforce_remove_equality_preconditions() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        users
            .put(item! { "id" => 1, "version" => 2 })
            .await
            .unwrap();

        // Non-key attributes become equality preconditions; a stale value
        // means another writer got there first.
        let err = users
            .remove(item! { "id" => 1, "version" => 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConcurrencyConflict(_)));
        assert!(users.get(1).await.unwrap().is_some());

        users.remove(item! { "id" => 1, "version" => 2 }).await.unwrap();
        assert!(users.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_should_store_set_attributes() {
        let (_store, db) = test_database();
        let users = db.table("users").unwrap();

        let tags: std::collections::BTreeSet<String> =
            ["a".to_owned(), "b".to_owned()].into_iter().collect();
        users
            .put(item! { "id" => 1, "tags" => tags.clone() })
            .await
            .unwrap();

        let found = users.get(1).await.unwrap().expect("item should exist");
        assert_eq!(found["tags"], Value::StrSet(tags));
    }

    #[tokio::test]
    async fn test_should_fail_before_dispatch_on_missing_key() {
        let (store, db) = test_database();
        let users = db.table("users").unwrap();

        let err = users.put(item! { "name" => "alice" }).await.unwrap_err();
        assert!(matches!(err, Error::MissingKey(name) if name == "id"));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_should_fail_before_dispatch_on_mistyped_key() {
        let (store, db) = test_database();
        let products = db.table("products").unwrap();

        let err = products.get(1).await.unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(store.dispatch_count(), 0);
    }
}
