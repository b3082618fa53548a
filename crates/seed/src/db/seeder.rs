//! Database seeding utilities.

use std::io::Write;

use blog::database::UserStore;
use blog::errors::AppError;
use blog::models::UserWithPosts;
use blog::types::{UserCreate, UserInclude};
use thiserror::Error;
use tracing::{debug, info};

use crate::fixtures;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] AppError),
    #[error("Failed to serialize created user: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Runs one seed: migrate (optionally), create, print, disconnect.
///
/// `run` consumes the seeder, so the store is released exactly once.
pub struct Seeder<S: UserStore> {
    store: S,
    payload: UserCreate,
    include: UserInclude,
    run_migrations: bool,
}

impl<S: UserStore> Seeder<S> {
    /// Creates a seeder that writes the default seed user.
    pub fn new(store: S) -> Self {
        Self {
            store,
            payload: fixtures::seed_user(),
            include: fixtures::seed_include(),
            run_migrations: false,
        }
    }

    /// Applies the store's migrations before creating anything.
    pub fn with_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    /// Replaces the payload and inclusion directive.
    pub fn with_payload(mut self, payload: UserCreate, include: UserInclude) -> Self {
        self.payload = payload;
        self.include = include;
        self
    }

    /// Creates the user with its nested posts and writes the result to `out`
    /// as pretty JSON. The store is disconnected before returning, whether
    /// or not the seed succeeded. Errors are returned for the caller to
    /// report.
    pub async fn run<W: Write>(self, out: &mut W) -> Result<UserWithPosts, SeedError> {
        info!(
            "Seeding user {} with {} posts...",
            self.payload.email,
            self.payload.written_posts.len()
        );

        let result = self.seed(out).await;

        match &result {
            Ok(user) => info!(
                "Seeded user {} with {} posts",
                user.user.id,
                user.post_count()
            ),
            Err(e) => debug!("Seed failed: {e}"),
        }

        self.store.disconnect().await;
        result
    }

    async fn seed<W: Write>(&self, out: &mut W) -> Result<UserWithPosts, SeedError> {
        if self.run_migrations {
            self.store.migrate().await?;
        }

        let user = self
            .store
            .create_user(&self.payload, self.include)
            .await?;

        serde_json::to_writer_pretty(&mut *out, &user)?;
        writeln!(out)?;
        out.flush()?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blog::models::{Post, Role, User};
    use sqlx::migrate::MigrateError;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::OffsetDateTime;
    use uuid::Uuid;

    /// In-memory store enforcing unique emails and counting disconnects.
    #[derive(Clone, Default)]
    struct MemoryStore {
        emails: Arc<Mutex<HashSet<String>>>,
        disconnects: Arc<AtomicUsize>,
        migrations: Arc<AtomicUsize>,
        fail_migrations: bool,
    }

    impl MemoryStore {
        fn failing_migrations() -> Self {
            Self {
                fail_migrations: true,
                ..Self::default()
            }
        }

        fn disconnects(&self) -> usize {
            self.disconnects.load(Ordering::SeqCst)
        }

        fn migrations(&self) -> usize {
            self.migrations.load(Ordering::SeqCst)
        }

        fn user_count(&self) -> usize {
            self.emails.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn create_user(
            &self,
            data: &UserCreate,
            include: UserInclude,
        ) -> Result<UserWithPosts, AppError> {
            if !self.emails.lock().unwrap().insert(data.email.clone()) {
                return Err(AppError::EmailTaken(data.email.clone()));
            }

            let user = User {
                id: Uuid::new_v4(),
                name: data.name.clone(),
                email: data.email.clone(),
                age: data.age,
                role: data.role,
            };
            let now = OffsetDateTime::now_utc();
            let posts = data
                .written_posts
                .iter()
                .map(|p| Post {
                    id: Uuid::new_v4(),
                    title: p.title.clone(),
                    average_rating: p.average_rating,
                    created_at: now,
                    updated_at: now,
                    author_id: user.id,
                })
                .collect();

            Ok(UserWithPosts {
                user,
                written_posts: include.written_posts.then_some(posts),
            })
        }

        async fn migrate(&self) -> Result<(), AppError> {
            self.migrations.fetch_add(1, Ordering::SeqCst);
            if self.fail_migrations {
                return Err(AppError::Migration(MigrateError::VersionMissing(1)));
            }
            Ok(())
        }

        async fn disconnect(&self) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Writer that always fails, for the output error path.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_seed_prints_user_and_disconnects() {
        let store = MemoryStore::default();
        let mut out = Vec::new();

        let user = Seeder::new(store.clone()).run(&mut out).await.unwrap();

        assert_eq!(user.post_count(), 3);
        assert_eq!(store.disconnects(), 1);

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["email"], "jhon2@gmail.com");
        assert_eq!(printed["role"], "BASIC");
        assert_eq!(printed["name"], "Jhon");
        assert_eq!(printed["age"], 25);

        let posts = printed["writtenPosts"].as_array().unwrap();
        assert_eq!(posts.len(), 3);
        for post in posts {
            assert_eq!(post["averageRating"], 0.0);
            assert_eq!(post["authorId"], printed["id"]);
        }
    }

    #[tokio::test]
    async fn test_second_run_fails_and_still_disconnects() {
        let store = MemoryStore::default();

        Seeder::new(store.clone())
            .run(&mut Vec::new())
            .await
            .unwrap();

        let mut out = Vec::new();
        let err = Seeder::new(store.clone()).run(&mut out).await.unwrap_err();

        assert!(matches!(err, SeedError::Store(AppError::EmailTaken(ref email)) if email == "jhon2@gmail.com"));
        assert!(out.is_empty(), "nothing is printed on failure");
        assert_eq!(store.disconnects(), 2);
    }

    #[tokio::test]
    async fn test_output_failure_still_disconnects() {
        let store = MemoryStore::default();

        let err = Seeder::new(store.clone())
            .run(&mut BrokenPipe)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Serialize(_) | SeedError::Output(_)));
        assert_eq!(store.disconnects(), 1);
    }

    #[tokio::test]
    async fn test_custom_payload_without_posts_included() {
        let store = MemoryStore::default();
        let payload = UserCreate {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            age: 36,
            role: Role::Editor,
            written_posts: vec![],
        };
        let mut out = Vec::new();

        let user = Seeder::new(store.clone())
            .with_payload(payload, UserInclude::NONE)
            .run(&mut out)
            .await
            .unwrap();

        assert_eq!(user.user.role, Role::Editor);
        assert!(user.written_posts.is_none());

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["role"], "EDITOR");
        assert!(printed.get("writtenPosts").is_none());
        assert_eq!(store.disconnects(), 1);
    }

    #[tokio::test]
    async fn test_migrations_run_before_create() {
        let store = MemoryStore::default();

        let user = Seeder::new(store.clone())
            .with_migrations(true)
            .run(&mut Vec::new())
            .await
            .unwrap();

        assert_eq!(user.post_count(), 3);
        assert_eq!(store.migrations(), 1);
        assert_eq!(store.disconnects(), 1);
    }

    #[tokio::test]
    async fn test_migrations_skipped_by_default() {
        let store = MemoryStore::default();

        Seeder::new(store.clone()).run(&mut Vec::new()).await.unwrap();

        assert_eq!(store.migrations(), 0);
    }

    #[tokio::test]
    async fn test_migration_failure_disconnects_without_creating() {
        let store = MemoryStore::failing_migrations();
        let mut out = Vec::new();

        let err = Seeder::new(store.clone())
            .with_migrations(true)
            .run(&mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Store(AppError::Migration(_))));
        assert!(out.is_empty());
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.disconnects(), 1);
    }
}
