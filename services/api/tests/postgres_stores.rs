//! Integration tests for the Postgres-backed stores
//!
//! These need a reachable database (`DATABASE_URL`) with the migrations
//! applied, so they are ignored by default:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p api -- --ignored
//! ```

use std::sync::Arc;

use api::models::{NewUser, ProfileChanges};
use api::stores::{PgTaskStore, PgUserStore, TaskStore, UserStore};
use common::database::{DatabaseConfig, health_check, init_pool};
use common::error::StoreError;
use uuid::Uuid;

async fn connect() -> sqlx::PgPool {
    let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
    let pool = init_pool(&config).await.expect("failed to connect");
    assert!(health_check(&pool).await.unwrap(), "database not reachable");
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@integration.test", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_user_store_round_trip() {
    let pool = connect().await;
    let users = Arc::new(PgUserStore::new(pool));
    let email = unique_email("ann");

    let created = users
        .insert(NewUser {
            name: "Ann".to_string(),
            email: email.clone(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

    let found = users.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    let err = users
        .insert(NewUser {
            name: "Imposter".to_string(),
            email,
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));

    let updated = users
        .update_profile(
            created.id,
            ProfileChanges {
                name: Some("Annie".to_string()),
                email: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Annie");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_task_store_round_trip() {
    let pool = connect().await;
    let users = Arc::new(PgUserStore::new(pool.clone()));
    let tasks = Arc::new(PgTaskStore::new(pool));

    let owner = users
        .insert(NewUser {
            name: "Ann".to_string(),
            email: unique_email("tasks"),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

    let a = tasks.insert(owner.id, "A").await.unwrap();
    let b = tasks.insert(owner.id, "B").await.unwrap();

    let listed = tasks.list_by_owner(owner.id).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);

    let renamed = tasks.update_title(a.id, "A2").await.unwrap().unwrap();
    assert_eq!(renamed.title, "A2");

    assert!(tasks.delete(a.id).await.unwrap());
    assert!(!tasks.delete(a.id).await.unwrap());
    assert_eq!(tasks.list_by_owner(owner.id).await.unwrap().len(), 1);
}
