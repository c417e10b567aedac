#[cfg(test)]
mod tests {
    use skillswap_core::{Recommendation, SwapError, User, UserSink, UserSource};

    fn user(id: &str, teach: &[&str], learn: &[&str]) -> User {
        User::new(
            id,
            teach.iter().map(|s| s.to_string()).collect(),
            learn.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn rec(matches: &[&str], skills: &[&str]) -> Recommendation {
        Recommendation {
            recommended_matches: matches.iter().map(|s| s.to_string()).collect(),
            suggested_skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    // ── SQLite store ───────────────────────────────────────────

    mod sqlite {
        use super::*;
        use skillswap_store::UserStore;

        #[test]
        fn test_open_creates_users_table() {
            let dir = tempfile::tempdir().unwrap();
            let store = UserStore::open(&dir.path().join("test.db")).unwrap();
            let db = store.db();
            let count: i64 = db
                .query_row(
                    "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='users'",
                    [],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(count, 1);
        }

        #[test]
        fn test_upsert_and_get() {
            let store = UserStore::open_in_memory().unwrap();
            let alice = user("u1", &["Python", "Machine Learning"], &["sql"]).with_username("Alice");
            store.upsert_user(&alice).unwrap();

            let stored = store.get_user("u1").unwrap().unwrap();
            assert_eq!(stored.user, alice);
            assert!(stored.recommendation.is_empty());
            assert!(stored.recommended_at.is_none());
            assert!(store.get_user("missing").unwrap().is_none());
        }

        #[test]
        fn test_upsert_replaces_skills_keeps_recommendation() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_user(&user("u1", &["go"], &[])).unwrap();
            store.set_recommendation("u1", &rec(&["u2"], &["rust"])).unwrap();
            store.upsert_user(&user("u1", &["go", "rust"], &[])).unwrap();

            let stored = store.get_user("u1").unwrap().unwrap();
            assert_eq!(stored.user.skills_to_teach, vec!["go", "rust"]);
            assert_eq!(stored.recommendation.recommended_matches, vec!["u2"]);
            assert_eq!(store.count().unwrap(), 1);
        }

        #[test]
        fn test_list_users_in_insertion_order() {
            let store = UserStore::open_in_memory().unwrap();
            store
                .upsert_users(&[user("c", &[], &[]), user("a", &[], &[]), user("b", &[], &[])])
                .unwrap();
            // re-upserting keeps the original position
            store.upsert_user(&user("c", &["x"], &[])).unwrap();
            let ids: Vec<String> = store
                .list_users()
                .unwrap()
                .into_iter()
                .map(|s| s.user.id)
                .collect();
            assert_eq!(ids, vec!["c", "a", "b"]);
        }

        #[test]
        fn test_set_recommendation_overwrites() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_user(&user("u1", &["go"], &[])).unwrap();
            store.set_recommendation("u1", &rec(&["a", "b"], &["x"])).unwrap();
            store.set_recommendation("u1", &rec(&["c"], &[])).unwrap();

            let stored = store.get_user("u1").unwrap().unwrap();
            assert_eq!(stored.recommendation, rec(&["c"], &[]));
            assert!(stored.recommended_at.is_some());
        }

        #[test]
        fn test_set_recommendation_unknown_user() {
            let store = UserStore::open_in_memory().unwrap();
            let err = store.set_recommendation("ghost", &rec(&[], &[])).unwrap_err();
            assert!(matches!(err, SwapError::UserNotFound(ref id) if id == "ghost"));
        }

        #[test]
        fn test_delete_users_with_prefix() {
            let store = UserStore::open_in_memory().unwrap();
            store
                .upsert_users(&[
                    user("mock-alice", &[], &[]),
                    user("mock-bob", &[], &[]),
                    user("real", &[], &[]),
                ])
                .unwrap();
            assert_eq!(store.delete_users_with_prefix("mock-").unwrap(), 2);
            assert_eq!(store.count().unwrap(), 1);
        }

        #[test]
        fn test_persists_across_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("users.db");
            {
                let store = UserStore::open(&path).unwrap();
                store.upsert_user(&user("u1", &["go"], &["rust"])).unwrap();
                store.set_recommendation("u1", &rec(&["u2"], &["sql"])).unwrap();
            }
            let store = UserStore::open(&path).unwrap();
            let stored = store.get_user("u1").unwrap().unwrap();
            assert_eq!(stored.user.skills_to_learn, vec!["rust"]);
            assert_eq!(stored.recommendation.suggested_skills, vec!["sql"]);
        }

        #[test]
        fn test_corrupt_list_column_is_an_error() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_user(&user("u1", &["go"], &[])).unwrap();
            store
                .db()
                .execute("UPDATE users SET skills_to_teach = 'not json' WHERE id = 'u1'", [])
                .unwrap();
            assert!(store.list_users().is_err());
        }

        #[tokio::test]
        async fn test_source_and_sink_traits() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_user(&user("u1", &["go"], &[])).unwrap();

            let users = store.fetch_all().await.unwrap();
            assert_eq!(users.len(), 1);

            store
                .update_recommendations(&"u1".to_string(), &rec(&[], &["rust"]))
                .await
                .unwrap();
            assert!(store.per_record_writes());
            let stored = store.get_user("u1").unwrap().unwrap();
            assert_eq!(stored.recommendation.suggested_skills, vec!["rust"]);
        }

        #[test]
        fn test_stored_user_json_shape() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_user(&user("u1", &["go"], &[])).unwrap();
            let stored = store.get_user("u1").unwrap().unwrap();
            let json = serde_json::to_value(&stored).unwrap();
            assert_eq!(json["id"], "u1");
            assert_eq!(json["skillsToTeach"][0], "go");
            assert!(json["recommendedMatches"].as_array().unwrap().is_empty());
        }
    }

    // ── In-memory store ────────────────────────────────────────

    mod memory {
        use super::*;
        use skillswap_store::MemoryUserStore;

        #[tokio::test]
        async fn test_roundtrip() {
            let store = MemoryUserStore::new(vec![user("a", &["go"], &[])]);
            store
                .update_recommendations(&"a".to_string(), &rec(&["b"], &[]))
                .await
                .unwrap();
            assert_eq!(store.recommendation("a").unwrap(), rec(&["b"], &[]));
            assert_eq!(store.fetch_all().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_failing_writes() {
            let store = MemoryUserStore::new(vec![user("a", &[], &[])]).fail_writes_for("a");
            let err = store
                .update_recommendations(&"a".to_string(), &rec(&[], &[]))
                .await
                .unwrap_err();
            assert!(matches!(err, SwapError::Sink { .. }));
            assert!(store.recommendation("a").is_none());
        }

        #[tokio::test]
        async fn test_unknown_user() {
            let store = MemoryUserStore::default();
            let err = store
                .update_recommendations(&"x".to_string(), &rec(&[], &[]))
                .await
                .unwrap_err();
            assert!(matches!(err, SwapError::UserNotFound(_)));
        }

        #[test]
        fn test_insert_replaces_by_id() {
            let store = MemoryUserStore::default();
            store.insert(user("a", &["go"], &[]));
            store.insert(user("a", &["rust"], &[]));
            assert_eq!(store.len(), 1);
            assert!(!store.all_or_nothing().per_record_writes());
        }
    }

    // ── Seed import ────────────────────────────────────────────

    mod seed {
        use skillswap_store::seed;

        #[test]
        fn test_parse_users() {
            let users = seed::parse_users(
                r#"[
                    {"id": "u1", "username": "Alice", "skillsToTeach": ["html"], "skillsToLearn": ["sql"]},
                    {"username": "Bob", "skillsToTeach": ["python"]}
                ]"#,
            )
            .unwrap();
            assert_eq!(users.len(), 2);
            assert_eq!(users[0].id, "u1");
            assert_eq!(users[0].skills_to_learn, vec!["sql"]);
            // generated id
            assert_eq!(users[1].id.len(), 36);
            assert!(users[1].skills_to_learn.is_empty());
        }

        #[test]
        fn test_parse_rejects_duplicates() {
            let err = seed::parse_users(r#"[{"id": "u1"}, {"id": "u1"}]"#).unwrap_err();
            assert!(err.to_string().contains("duplicate"));
        }

        #[test]
        fn test_parse_rejects_non_array() {
            assert!(seed::parse_users(r#"{"id": "u1"}"#).is_err());
        }

        #[test]
        fn test_load_users_from_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("users.json");
            std::fs::write(&path, r#"[{"id": "a", "skillsToTeach": ["go"]}]"#).unwrap();
            let users = seed::load_users(&path).unwrap();
            assert_eq!(users[0].skills_to_teach, vec!["go"]);
        }

        #[test]
        fn test_demo_users() {
            let users = seed::demo_users();
            assert_eq!(users.len(), 10);
            assert!(users.iter().all(|u| u.id.starts_with(seed::DEMO_ID_PREFIX)));
            assert_eq!(users[0].label(), "Alice");
        }
    }

    // ── End to end ─────────────────────────────────────────────

    mod end_to_end {
        use super::*;
        use skillswap_engine::Pipeline;
        use skillswap_store::{UserStore, seed};

        #[tokio::test]
        async fn test_demo_population_run() {
            let store = UserStore::open_in_memory().unwrap();
            store.upsert_users(&seed::demo_users()).unwrap();

            let report = Pipeline::default().run(&store, &store).await.unwrap();
            assert_eq!(report.users, 10);
            assert_eq!(report.persisted, 10);

            for stored in store.list_users().unwrap() {
                let own: Vec<&str> = stored.user.declared_skills().collect();
                let rec = &stored.recommendation;
                assert_eq!(rec.recommended_matches.len(), 5);
                assert!(!rec.recommended_matches.contains(&stored.user.id));
                assert!(rec.suggested_skills.len() <= 5);
                assert!(rec.suggested_skills.iter().all(|s| !own.contains(&s.as_str())));
                assert!(stored.recommended_at.is_some());
            }

            // Bob teaches exactly what Alice wants to learn and vice versa
            let alice = store.get_user("mock-alice").unwrap().unwrap();
            assert_eq!(alice.recommendation.recommended_matches[0], "mock-bob");
        }
    }
}
