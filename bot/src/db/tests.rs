//! Database Integration Tests
//!
//! Run against a live `PostgreSQL` (see `Config::default_for_test`).

#[cfg(test)]
mod postgres_tests {
    use super::super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_migrations_are_idempotent(pool: PgPool) {
        run_migrations(&pool)
            .await
            .expect("Re-running migrations should be a no-op");

        let tables: Vec<(String,)> = sqlx::query_as(
            r"
            SELECT table_name::text FROM information_schema.tables
            WHERE table_name IN ('webhooks', 'purchases')
            ORDER BY table_name
            ",
        )
        .fetch_all(&pool)
        .await
        .expect("Query failed");

        assert_eq!(
            tables,
            vec![("purchases".to_string(),), ("webhooks".to_string(),)]
        );
    }

    #[sqlx::test]
    async fn test_record_and_list_purchases(pool: PgPool) {
        let first = record_purchase(&pool, "1001", "42")
            .await
            .expect("Failed to record purchase");
        let second = record_purchase(&pool, "1002", "42")
            .await
            .expect("Failed to record purchase");
        record_purchase(&pool, "2001", "77")
            .await
            .expect("Failed to record purchase");

        assert_eq!(first.rbxid, "1001");
        assert_eq!(first.discid, "42");

        let purchases = list_purchases_by_discord_id(&pool, "42")
            .await
            .expect("Query failed");
        assert_eq!(purchases, vec![first, second]);

        let none = list_purchases_by_discord_id(&pool, "999")
            .await
            .expect("Query failed");
        assert!(none.is_empty());
    }

    #[sqlx::test]
    async fn test_find_purchase_by_rbx_id(pool: PgPool) {
        assert!(find_purchase_by_rbx_id(&pool, "1001")
            .await
            .expect("Query failed")
            .is_none());

        record_purchase(&pool, "1001", "42")
            .await
            .expect("Failed to record purchase");

        let found = find_purchase_by_rbx_id(&pool, "1001")
            .await
            .expect("Query failed")
            .expect("Purchase not found");
        assert_eq!(found.discid, "42");
    }
}
