//! PostgreSQL Repository Implementation
//!
//! Lifecycle writes run in one transaction that starts by locking the
//! pickup point row, so writes against the same pickup point are serialized.
//! The partial unique index on open receptions backs up the lock.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::{PickupPointId, ReceptionId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entities::{PickupPoint, Product, Reception};
use crate::domain::repository::{
    ListQuery, ListingRows, PickupPointRepository, ProductRepository, ReceptionRepository,
};
use crate::domain::value_objects::{City, ProductType, ReceptionStatus};
use crate::error::{PvzError, PvzResult, StorageContext};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPvzRepository {
    pool: PgPool,
}

impl PgPvzRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn lock_pickup_point(
    conn: &mut PgConnection,
    pvz_id: PickupPointId,
    operation: &'static str,
) -> PvzResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM pvz WHERE id = $1 FOR UPDATE")
        .bind(pvz_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await
        .during(operation)?
        .map(|_| ())
        .ok_or(PvzError::PickupPointNotFound(pvz_id))
}

async fn open_reception_id(
    conn: &mut PgConnection,
    pvz_id: PickupPointId,
    operation: &'static str,
) -> PvzResult<Option<ReceptionId>> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM receptions WHERE pvz_id = $1 AND status = 'in_progress'",
    )
    .bind(pvz_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .during(operation)?;

    Ok(id.map(ReceptionId::from_uuid))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// Pickup Point Repository Implementation
// ============================================================================

impl PickupPointRepository for PgPvzRepository {
    #[tracing::instrument(skip_all, fields(pvz_id = %point.id))]
    async fn create(&self, point: &PickupPoint) -> PvzResult<()> {
        sqlx::query("INSERT INTO pvz (id, city, registration_date) VALUES ($1, $2, $3)")
            .bind(point.id.as_uuid())
            .bind(point.city.code())
            .bind(point.registration_date)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PvzError::PickupPointExists(point.id)
                } else {
                    PvzError::Database {
                        operation: "create",
                        source: e,
                    }
                }
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> PvzResult<ListingRows> {
        let mut tx = self.pool.begin().await.during("list")?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await
            .during("list")?;

        let start = query.range.start;
        let end = query.range.end;

        let points = sqlx::query_as::<_, PickupPointRow>(
            r#"
            SELECT p.id, p.city, p.registration_date
            FROM pvz p
            WHERE ($1::timestamptz IS NULL AND $2::timestamptz IS NULL)
               OR EXISTS (
                    SELECT 1 FROM receptions r
                    WHERE r.pvz_id = p.id
                      AND ($1::timestamptz IS NULL OR r.date_time >= $1)
                      AND ($2::timestamptz IS NULL OR r.date_time <= $2)
               )
            ORDER BY p.registration_date, p.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(i64::from(query.page.limit))
        .bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *tx)
        .await
        .during("list")?
        .into_iter()
        .map(PickupPointRow::into_domain)
        .collect::<PvzResult<Vec<_>>>()?;

        if points.is_empty() {
            tx.commit().await.during("list")?;
            return Ok(ListingRows::default());
        }

        let point_ids: Vec<Uuid> = points.iter().map(|p| p.id.into_uuid()).collect();
        let receptions = sqlx::query_as::<_, ReceptionRow>(
            r#"
            SELECT id, pvz_id, status, date_time
            FROM receptions
            WHERE pvz_id = ANY($1)
              AND ($2::timestamptz IS NULL OR date_time >= $2)
              AND ($3::timestamptz IS NULL OR date_time <= $3)
            ORDER BY date_time, id
            "#,
        )
        .bind(&point_ids)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *tx)
        .await
        .during("list")?
        .into_iter()
        .map(ReceptionRow::into_domain)
        .collect::<PvzResult<Vec<_>>>()?;

        let products = if receptions.is_empty() {
            Vec::new()
        } else {
            let reception_ids: Vec<Uuid> =
                receptions.iter().map(|r| r.id.into_uuid()).collect();
            sqlx::query_as::<_, ProductRow>(
                r#"
                SELECT id, reception_id, type, date_time
                FROM products
                WHERE reception_id = ANY($1)
                ORDER BY seq
                "#,
            )
            .bind(&reception_ids)
            .fetch_all(&mut *tx)
            .await
            .during("list")?
            .into_iter()
            .map(ProductRow::into_domain)
            .collect::<PvzResult<Vec<_>>>()?
        };

        tx.commit().await.during("list")?;

        Ok(ListingRows {
            points,
            receptions,
            products,
        })
    }
}

// ============================================================================
// Reception Repository Implementation
// ============================================================================

impl ReceptionRepository for PgPvzRepository {
    #[tracing::instrument(skip_all, fields(pvz_id = %reception.pvz_id))]
    async fn open(&self, reception: &Reception) -> PvzResult<()> {
        let pvz_id = reception.pvz_id;
        let mut tx = self.pool.begin().await.during("open")?;

        lock_pickup_point(&mut tx, pvz_id, "open").await?;

        if open_reception_id(&mut tx, pvz_id, "open").await?.is_some() {
            return Err(PvzError::ReceptionAlreadyOpen(pvz_id));
        }

        sqlx::query(
            r#"
            INSERT INTO receptions (id, pvz_id, status, date_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reception.id.as_uuid())
        .bind(pvz_id.as_uuid())
        .bind(reception.status.code())
        .bind(reception.date_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PvzError::ReceptionAlreadyOpen(pvz_id)
            } else {
                PvzError::Database {
                    operation: "open",
                    source: e,
                }
            }
        })?;

        tx.commit().await.during("open")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn close_last(&self, pvz_id: PickupPointId) -> PvzResult<Reception> {
        let mut tx = self.pool.begin().await.during("close_last")?;

        lock_pickup_point(&mut tx, pvz_id, "close_last").await?;

        let row = sqlx::query_as::<_, ReceptionRow>(
            r#"
            UPDATE receptions SET status = 'close'
            WHERE pvz_id = $1 AND status = 'in_progress'
            RETURNING id, pvz_id, status, date_time
            "#,
        )
        .bind(pvz_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .during("close_last")?
        .ok_or(PvzError::NoOpenReception(pvz_id))?;

        tx.commit().await.during("close_last")?;
        row.into_domain()
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgPvzRepository {
    #[tracing::instrument(skip(self))]
    async fn add(
        &self,
        pvz_id: PickupPointId,
        product_type: ProductType,
        at: DateTime<Utc>,
    ) -> PvzResult<Product> {
        let mut tx = self.pool.begin().await.during("add")?;

        lock_pickup_point(&mut tx, pvz_id, "add").await?;

        let reception_id = open_reception_id(&mut tx, pvz_id, "add")
            .await?
            .ok_or(PvzError::NoOpenReception(pvz_id))?;

        let product = Product::new(reception_id, product_type, at);
        sqlx::query(
            r#"
            INSERT INTO products (id, reception_id, type, date_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(reception_id.as_uuid())
        .bind(product_type.code())
        .bind(product.date_time)
        .execute(&mut *tx)
        .await
        .during("add")?;

        tx.commit().await.during("add")?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_last(&self, pvz_id: PickupPointId) -> PvzResult<Product> {
        let mut tx = self.pool.begin().await.during("delete_last")?;

        lock_pickup_point(&mut tx, pvz_id, "delete_last").await?;

        let reception_id = open_reception_id(&mut tx, pvz_id, "delete_last")
            .await?
            .ok_or(PvzError::NoOpenReception(pvz_id))?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            DELETE FROM products
            WHERE id = (
                SELECT id FROM products
                WHERE reception_id = $1
                ORDER BY seq DESC
                LIMIT 1
            )
            RETURNING id, reception_id, type, date_time
            "#,
        )
        .bind(reception_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .during("delete_last")?
        .ok_or(PvzError::ReceptionEmpty(pvz_id))?;

        tx.commit().await.during("delete_last")?;
        row.into_domain()
    }
}

// ============================================================================
// Row mappings
// ============================================================================

fn corrupt(what: &str, value: &str) -> PvzError {
    PvzError::Internal(AppError::internal(format!("invalid {what} in database: {value}")))
}

#[derive(sqlx::FromRow)]
struct PickupPointRow {
    id: Uuid,
    city: String,
    registration_date: DateTime<Utc>,
}

impl PickupPointRow {
    fn into_domain(self) -> PvzResult<PickupPoint> {
        Ok(PickupPoint {
            id: PickupPointId::from_uuid(self.id),
            city: City::from_code(&self.city).ok_or_else(|| corrupt("city", &self.city))?,
            registration_date: self.registration_date,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReceptionRow {
    id: Uuid,
    pvz_id: Uuid,
    status: String,
    date_time: DateTime<Utc>,
}

impl ReceptionRow {
    fn into_domain(self) -> PvzResult<Reception> {
        Ok(Reception {
            id: ReceptionId::from_uuid(self.id),
            pvz_id: PickupPointId::from_uuid(self.pvz_id),
            status: ReceptionStatus::from_code(&self.status)
                .ok_or_else(|| corrupt("reception status", &self.status))?,
            date_time: self.date_time,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    reception_id: Uuid,
    #[sqlx(rename = "type")]
    product_type: String,
    date_time: DateTime<Utc>,
}

impl ProductRow {
    fn into_domain(self) -> PvzResult<Product> {
        Ok(Product {
            id: self.id.into(),
            reception_id: ReceptionId::from_uuid(self.reception_id),
            product_type: ProductType::from_code(&self.product_type)
                .ok_or_else(|| corrupt("product type", &self.product_type))?,
            date_time: self.date_time,
        })
    }
}
