use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Post, User, UserWithPosts};
use crate::types::{UserCreate, UserInclude};

/// The operations a seeding run needs from a user store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user and its nested posts atomically.
    async fn create_user(
        &self,
        data: &UserCreate,
        include: UserInclude,
    ) -> Result<UserWithPosts, AppError>;

    /// Brings the schema up to date.
    async fn migrate(&self) -> Result<(), AppError>;

    /// Releases the store's connections. Returns once cleanup is complete.
    async fn disconnect(&self);
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    pub async fn find_user_by_email(
        &self,
        email: &str,
        include: UserInclude,
    ) -> Result<Option<UserWithPosts>, AppError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, age, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let written_posts = if include.written_posts {
            Some(self.get_user_posts(user.id).await?)
        } else {
            None
        };

        Ok(Some(UserWithPosts {
            user,
            written_posts,
        }))
    }

    pub async fn get_user_posts(&self, author_id: Uuid) -> Result<Vec<Post>, AppError> {
        let posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT id, title, average_rating, created_at, updated_at, author_id
            FROM posts
            WHERE author_id = $1
            ORDER BY position
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Deletes a user by email; their posts go with them.
    pub async fn delete_user_by_email(&self, email: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(
        &self,
        data: &UserCreate,
        include: UserInclude,
    ) -> Result<UserWithPosts, AppError> {
        // Dropping the transaction without commit rolls back every insert below.
        let mut tx = self.pool.begin().await?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, age, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, age, role
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.age)
        .bind(data.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_user_write(e, &data.email))?;

        let mut posts = Vec::with_capacity(data.written_posts.len());
        for (position, post) in data.written_posts.iter().enumerate() {
            let created: Post = sqlx::query_as(
                r#"
                INSERT INTO posts (id, title, position, average_rating, author_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
                RETURNING id, title, average_rating, created_at, updated_at, author_id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&post.title)
            .bind(position as i32)
            .bind(post.average_rating)
            .bind(user.id)
            .fetch_one(&mut *tx)
            .await?;

            posts.push(created);
        }

        tx.commit().await?;

        debug!(
            user_id = %user.id,
            posts = posts.len(),
            "Created user with nested posts"
        );

        Ok(UserWithPosts {
            user,
            written_posts: include.written_posts.then_some(posts),
        })
    }

    /// Applies the bundled migrations.
    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Migrations applied");
        Ok(())
    }

    async fn disconnect(&self) {
        self.pool.close().await;
        info!("Disconnected from database");
    }
}
