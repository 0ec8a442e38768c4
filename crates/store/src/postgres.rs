//! Postgres-backed store.
//!
//! Uses a sqlx connection pool (thread-safe, cheap to clone). Every dynamic
//! filter is assembled with bound parameters; no user input reaches the SQL
//! text itself.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};

use equipe_core::{Collaborator, CollaboratorId, CollaboratorPatch, UserId};

use crate::collaborators::CollaboratorStore;
use crate::error::{StoreError, StoreResult};
use crate::query::{CollaboratorFilter, CollaboratorPage, Pagination};
use crate::users::{NewUser, UserRecord, UserStore};

const SCHEMA: &str = include_str!("schema.sql");

const COLLABORATOR_COLUMNS: &str = "id, name, cpf, birth_date, rg, rg_issuer, email, phone, \
     mobile_phone, street, number, complement, neighborhood, city, state, zip_code, bank_name, \
     bank_agency, bank_account, bank_account_type, pix_key, pix_key_type, status, created_at, \
     updated_at, created_by, updated_by";

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        tracing::debug!("database schema ensured");
        Ok(store)
    }

    /// Idempotent bootstrap DDL (`CREATE TABLE IF NOT EXISTS …`).
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(())
    }
}

fn parse_field<T>(value: Option<String>, field: &'static str) -> StoreResult<Option<T>>
where
    T: core::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|raw| raw.parse::<T>())
        .transpose()
        .map_err(|e| StoreError::Backend(anyhow!("bad value stored in {field}: {e}")))
}

fn collaborator_from_row(row: &PgRow) -> StoreResult<Collaborator> {
    let read = |e: sqlx::Error| StoreError::Backend(e.into());

    let status: String = row.try_get("status").map_err(read)?;
    let state: Option<String> = row.try_get("state").map_err(read)?;
    let bank_account_type: Option<String> = row.try_get("bank_account_type").map_err(read)?;
    let pix_key_type: Option<String> = row.try_get("pix_key_type").map_err(read)?;

    Ok(Collaborator {
        id: CollaboratorId::from_uuid(row.try_get("id").map_err(read)?),
        name: row.try_get("name").map_err(read)?,
        cpf: row.try_get("cpf").map_err(read)?,
        birth_date: row.try_get("birth_date").map_err(read)?,
        rg: row.try_get("rg").map_err(read)?,
        rg_issuer: row.try_get("rg_issuer").map_err(read)?,
        email: row.try_get("email").map_err(read)?,
        phone: row.try_get("phone").map_err(read)?,
        mobile_phone: row.try_get("mobile_phone").map_err(read)?,
        street: row.try_get("street").map_err(read)?,
        number: row.try_get("number").map_err(read)?,
        complement: row.try_get("complement").map_err(read)?,
        neighborhood: row.try_get("neighborhood").map_err(read)?,
        city: row.try_get("city").map_err(read)?,
        state: parse_field(state, "state")?,
        zip_code: row.try_get("zip_code").map_err(read)?,
        bank_name: row.try_get("bank_name").map_err(read)?,
        bank_agency: row.try_get("bank_agency").map_err(read)?,
        bank_account: row.try_get("bank_account").map_err(read)?,
        bank_account_type: parse_field(bank_account_type, "bank_account_type")?,
        pix_key: row.try_get("pix_key").map_err(read)?,
        pix_key_type: parse_field(pix_key_type, "pix_key_type")?,
        status: status
            .parse()
            .map_err(|e| StoreError::Backend(anyhow!("bad value stored in status: {e}")))?,
        created_at: row.try_get("created_at").map_err(read)?,
        updated_at: row.try_get("updated_at").map_err(read)?,
        created_by: row
            .try_get::<Option<uuid::Uuid>, _>("created_by")
            .map_err(read)?
            .map(UserId::from_uuid),
        updated_by: row
            .try_get::<Option<uuid::Uuid>, _>("updated_by")
            .map_err(read)?
            .map(UserId::from_uuid),
    })
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CollaboratorFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR cpf ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR email ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status.as_str());
    }
    if let Some(city) = &filter.city {
        qb.push(" AND city = ");
        qb.push_bind(city.clone());
    }
    if let Some(state) = filter.state {
        qb.push(" AND state = ");
        qb.push_bind(state.as_str());
    }
}

/// Full-row UPDATE used after applying a patch in memory.
///
/// Last-write-wins by design: there is no version column to check against.
async fn write_back(pool: &PgPool, c: &Collaborator) -> StoreResult<()> {
    sqlx::query(
        "UPDATE collaborators SET \
             name = $2, cpf = $3, birth_date = $4, rg = $5, rg_issuer = $6, email = $7, \
             phone = $8, mobile_phone = $9, street = $10, number = $11, complement = $12, \
             neighborhood = $13, city = $14, state = $15, zip_code = $16, bank_name = $17, \
             bank_agency = $18, bank_account = $19, bank_account_type = $20, pix_key = $21, \
             pix_key_type = $22, status = $23, updated_at = $24, updated_by = $25 \
         WHERE id = $1",
    )
    .bind(record_id(c))
    .bind(&c.name)
    .bind(&c.cpf)
    .bind(c.birth_date)
    .bind(&c.rg)
    .bind(&c.rg_issuer)
    .bind(&c.email)
    .bind(&c.phone)
    .bind(&c.mobile_phone)
    .bind(&c.street)
    .bind(&c.number)
    .bind(&c.complement)
    .bind(&c.neighborhood)
    .bind(&c.city)
    .bind(c.state.map(|s| s.as_str()))
    .bind(&c.zip_code)
    .bind(&c.bank_name)
    .bind(&c.bank_agency)
    .bind(&c.bank_account)
    .bind(c.bank_account_type.map(|t| t.as_str()))
    .bind(&c.pix_key)
    .bind(c.pix_key_type.map(|t| t.as_str()))
    .bind(c.status.as_str())
    .bind(c.updated_at)
    .bind(c.updated_by.map(|u| *u.as_uuid()))
    .execute(pool)
    .await
    .map_err(|e| StoreError::from_sqlx(e, "cpf"))?;
    Ok(())
}

fn record_id(c: &Collaborator) -> uuid::Uuid {
    *c.id.as_uuid()
}

#[async_trait]
impl CollaboratorStore for PostgresStore {
    async fn insert(&self, record: Collaborator) -> StoreResult<Collaborator> {
        sqlx::query(
            "INSERT INTO collaborators (\
                 id, name, cpf, birth_date, rg, rg_issuer, email, phone, mobile_phone, street, \
                 number, complement, neighborhood, city, state, zip_code, bank_name, bank_agency, \
                 bank_account, bank_account_type, pix_key, pix_key_type, status, created_at, \
                 updated_at, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)",
        )
        .bind(record_id(&record))
        .bind(&record.name)
        .bind(&record.cpf)
        .bind(record.birth_date)
        .bind(&record.rg)
        .bind(&record.rg_issuer)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.mobile_phone)
        .bind(&record.street)
        .bind(&record.number)
        .bind(&record.complement)
        .bind(&record.neighborhood)
        .bind(&record.city)
        .bind(record.state.map(|s| s.as_str()))
        .bind(&record.zip_code)
        .bind(&record.bank_name)
        .bind(&record.bank_agency)
        .bind(&record.bank_account)
        .bind(record.bank_account_type.map(|t| t.as_str()))
        .bind(&record.pix_key)
        .bind(record.pix_key_type.map(|t| t.as_str()))
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(record.created_by.map(|u| *u.as_uuid()))
        .bind(record.updated_by.map(|u| *u.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "cpf"))?;

        Ok(record)
    }

    async fn get(&self, id: CollaboratorId) -> StoreResult<Collaborator> {
        let row = sqlx::query(&format!(
            "SELECT {COLLABORATOR_COLUMNS} FROM collaborators WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?
        .ok_or(StoreError::NotFound)?;

        collaborator_from_row(&row)
    }

    async fn update(
        &self,
        id: CollaboratorId,
        patch: CollaboratorPatch,
        updated_by: UserId,
    ) -> StoreResult<Collaborator> {
        let mut record = self.get(id).await?;
        record.apply_patch(patch, updated_by, Utc::now());
        write_back(&self.pool, &record).await?;
        Ok(record)
    }

    async fn list(
        &self,
        filter: CollaboratorFilter,
        pagination: Pagination,
    ) -> StoreResult<CollaboratorPage> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM collaborators");
        push_filters(&mut count_qb, &filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLLABORATOR_COLUMNS} FROM collaborators"
        ));
        push_filters(&mut qb, &filter);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        qb.push_bind(i64::from(pagination.limit));
        qb.push(" OFFSET ");
        qb.push_bind(pagination.offset() as i64);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        let items = rows
            .iter()
            .map(collaborator_from_row)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(CollaboratorPage {
            items,
            total: total as u64,
        })
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let record = UserRecord {
            id: UserId::new(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*record.id.as_uuid())
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "email"))?;

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        row.map(|row| user_from_row(&row)).transpose()
    }
}

fn user_from_row(row: &PgRow) -> StoreResult<UserRecord> {
    let read = |e: sqlx::Error| StoreError::Backend(e.into());
    let role: String = row.try_get("role").map_err(read)?;

    Ok(UserRecord {
        id: UserId::from_uuid(row.try_get("id").map_err(read)?),
        email: row.try_get("email").map_err(read)?,
        password_hash: row.try_get("password_hash").map_err(read)?,
        role: role
            .parse()
            .map_err(|e| StoreError::Backend(anyhow!("bad value stored in role: {e}")))?,
        created_at: row.try_get("created_at").map_err(read)?,
    })
}
