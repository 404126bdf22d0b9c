//! Catalog repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::result::AppResult;
use cinema_core::types::{MovieId, ShowingId, ShowroomId};
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};

use crate::store::CatalogStore;

/// Read-only queries over showings, movies, showrooms, and seats.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn find_showing(&self, id: ShowingId) -> AppResult<Option<Showing>> {
        sqlx::query_as::<_, Showing>(
            "SELECT id, movie_id, showroom_id, start_time, end_time FROM showings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find showing", e))
    }

    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>> {
        sqlx::query_as::<_, Movie>("SELECT id, title FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find movie", e))
    }

    async fn find_showroom(&self, id: ShowroomId) -> AppResult<Option<Showroom>> {
        sqlx::query_as::<_, Showroom>("SELECT id, name FROM showrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find showroom", e))
    }

    async fn list_seats(&self, showroom_id: ShowroomId) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT id, showroom_id, row_label, seat_number FROM seats \
             WHERE showroom_id = $1 ORDER BY row_label, seat_number",
        )
        .bind(showroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list seats", e))
    }
}
