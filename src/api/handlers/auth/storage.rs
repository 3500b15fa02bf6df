//! Database helpers for principal records and login state.

use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{
    AccountStatus, AdminProfile, AdminRole, ClientProfile, FundiProfile, SubscriptionPlan,
    SubscriptionStatus,
};

/// Admin row with enum columns parsed at the storage boundary.
pub(crate) struct AdminRecord {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: Option<AdminRole>,
    pub(crate) status: AccountStatus,
    pub(crate) last_login: Option<i64>,
    pub(crate) created_at: i64,
}

/// Fundi row with subscription state parsed at the storage boundary.
pub(crate) struct FundiRecord {
    pub(crate) id: Uuid,
    pub(crate) phone: String,
    pub(crate) email: Option<String>,
    pub(crate) password_hash: String,
    pub(crate) status: AccountStatus,
    pub(crate) subscription_plan: SubscriptionPlan,
    pub(crate) subscription_status: SubscriptionStatus,
    pub(crate) trial_ends_at: Option<i64>,
    pub(crate) last_login: Option<i64>,
    pub(crate) created_at: i64,
}

/// Client row.
pub(crate) struct ClientRecord {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) status: AccountStatus,
    pub(crate) last_login: Option<i64>,
    pub(crate) created_at: i64,
}

impl From<&AdminRecord> for AdminProfile {
    fn from(record: &AdminRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            role: record.role,
            status: record.status,
            last_login: record.last_login,
            created_at: record.created_at,
        }
    }
}

impl From<&FundiRecord> for FundiProfile {
    fn from(record: &FundiRecord) -> Self {
        Self {
            id: record.id,
            phone: record.phone.clone(),
            email: record.email.clone(),
            status: record.status,
            subscription_plan: record.subscription_plan,
            subscription_status: record.subscription_status,
            trial_ends_at: record.trial_ends_at,
            last_login: record.last_login,
            created_at: record.created_at,
        }
    }
}

impl From<&ClientRecord> for ClientProfile {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            status: record.status,
            last_login: record.last_login,
            created_at: record.created_at,
        }
    }
}

// Unknown stored enum values map to the most restrictive state.

fn admin_record(row: &PgRow) -> AdminRecord {
    let role: String = row.get("role");
    let status: String = row.get("status");
    AdminRecord {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: AdminRole::parse(&role),
        status: AccountStatus::parse(&status).unwrap_or(AccountStatus::Inactive),
        last_login: row.get("last_login"),
        created_at: row.get("created_at"),
    }
}

fn fundi_record(row: &PgRow) -> FundiRecord {
    let status: String = row.get("status");
    let plan: String = row.get("subscription_plan");
    let subscription: String = row.get("subscription_status");
    FundiRecord {
        id: row.get("id"),
        phone: row.get("phone"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        status: AccountStatus::parse(&status).unwrap_or(AccountStatus::Inactive),
        subscription_plan: SubscriptionPlan::parse(&plan).unwrap_or(SubscriptionPlan::Free),
        subscription_status: SubscriptionStatus::parse(&subscription)
            .unwrap_or(SubscriptionStatus::Expired),
        trial_ends_at: row.get("trial_ends_at"),
        last_login: row.get("last_login"),
        created_at: row.get("created_at"),
    }
}

fn client_record(row: &PgRow) -> ClientRecord {
    let status: String = row.get("status");
    ClientRecord {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        status: AccountStatus::parse(&status).unwrap_or(AccountStatus::Inactive),
        last_login: row.get("last_login"),
        created_at: row.get("created_at"),
    }
}

const ADMIN_COLUMNS: &str = r"
        id, email, password_hash, role, status,
        CAST(EXTRACT(EPOCH FROM last_login) AS BIGINT) AS last_login,
        CAST(EXTRACT(EPOCH FROM created_at) AS BIGINT) AS created_at";

const FUNDI_COLUMNS: &str = r"
        id, phone, email, password_hash, status, subscription_plan, subscription_status,
        CAST(EXTRACT(EPOCH FROM trial_ends_at) AS BIGINT) AS trial_ends_at,
        CAST(EXTRACT(EPOCH FROM last_login) AS BIGINT) AS last_login,
        CAST(EXTRACT(EPOCH FROM created_at) AS BIGINT) AS created_at";

const CLIENT_COLUMNS: &str = r"
        id, email, password_hash, status,
        CAST(EXTRACT(EPOCH FROM last_login) AS BIGINT) AS last_login,
        CAST(EXTRACT(EPOCH FROM created_at) AS BIGINT) AS created_at";

/// Look up an admin by normalized email (login path).
pub(super) async fn lookup_admin_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AdminRecord>> {
    let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup admin by email")?;
    Ok(row.map(|row| admin_record(&row)))
}

/// Re-load an admin by id (authenticated request path).
pub(super) async fn load_admin(pool: &PgPool, id: Uuid) -> Result<Option<AdminRecord>> {
    let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to load admin")?;
    Ok(row.map(|row| admin_record(&row)))
}

/// All admin accounts, oldest first.
pub(super) async fn list_admins(pool: &PgPool) -> Result<Vec<AdminRecord>> {
    let query = format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list admins")?;
    Ok(rows.iter().map(admin_record).collect())
}

/// Set an admin account status, returning the fresh row. `None` when
/// the id is unknown.
pub(super) async fn update_admin_status(
    pool: &PgPool,
    id: Uuid,
    status: AccountStatus,
) -> Result<Option<AdminRecord>> {
    let query = format!(
        "UPDATE admins SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {ADMIN_COLUMNS}"
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update admin status")?;
    Ok(row.map(|row| admin_record(&row)))
}

/// Stamp a successful admin login.
pub(super) async fn record_admin_login(pool: &PgPool, id: Uuid, ip: Option<String>) -> Result<()> {
    let query = r"
        UPDATE admins
        SET last_login = NOW(), last_login_ip = $2::inet, updated_at = NOW()
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(ip)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to record admin login")?;
    Ok(())
}

pub(super) async fn update_admin_password(pool: &PgPool, id: Uuid, hash: &str) -> Result<()> {
    let query = "UPDATE admins SET password_hash = $2, updated_at = NOW() WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update admin password")?;
    Ok(())
}

/// Look up a fundi by normalized phone or email (login accepts either).
pub(super) async fn lookup_fundi_by_identifier(
    pool: &PgPool,
    phone: &str,
    email: &str,
) -> Result<Option<FundiRecord>> {
    let query = format!("SELECT {FUNDI_COLUMNS} FROM fundis WHERE phone = $1 OR email = $2");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(phone)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup fundi by identifier")?;
    Ok(row.map(|row| fundi_record(&row)))
}

/// Re-load a fundi by id (authenticated request path).
pub(super) async fn load_fundi(pool: &PgPool, id: Uuid) -> Result<Option<FundiRecord>> {
    let query = format!("SELECT {FUNDI_COLUMNS} FROM fundis WHERE id = $1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to load fundi")?;
    Ok(row.map(|row| fundi_record(&row)))
}

/// Persist the lazy trial-to-expired transition.
///
/// Re-checked under the database clock; zero rows affected is fine when
/// a concurrent request already expired the trial or an admin renewed it.
pub(super) async fn expire_fundi_trial(pool: &PgPool, id: Uuid) -> Result<()> {
    let query = r"
        UPDATE fundis
        SET subscription_status = 'EXPIRED', updated_at = NOW()
        WHERE id = $1
          AND subscription_status = 'TRIAL'
          AND trial_ends_at IS NOT NULL
          AND trial_ends_at < NOW()
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to expire fundi trial")?;
    Ok(())
}

/// Apply an administrative subscription change, returning the fresh
/// row. `None` when the id is unknown.
pub(super) async fn update_fundi_subscription(
    pool: &PgPool,
    id: Uuid,
    plan: SubscriptionPlan,
    status: SubscriptionStatus,
) -> Result<Option<FundiRecord>> {
    let query = format!(
        "UPDATE fundis
        SET subscription_plan = $2, subscription_status = $3, updated_at = NOW()
        WHERE id = $1 RETURNING {FUNDI_COLUMNS}"
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .bind(plan.as_str())
        .bind(status.as_str())
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update fundi subscription")?;
    Ok(row.map(|row| fundi_record(&row)))
}

/// Stamp a successful fundi login.
pub(super) async fn record_fundi_login(pool: &PgPool, id: Uuid, ip: Option<String>) -> Result<()> {
    let query = r"
        UPDATE fundis
        SET last_login = NOW(), last_login_ip = $2::inet, updated_at = NOW()
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(ip)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to record fundi login")?;
    Ok(())
}

pub(super) async fn update_fundi_password(pool: &PgPool, id: Uuid, hash: &str) -> Result<()> {
    let query = "UPDATE fundis SET password_hash = $2, updated_at = NOW() WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update fundi password")?;
    Ok(())
}

/// Look up a client by normalized email (login path).
pub(super) async fn lookup_client_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<ClientRecord>> {
    let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup client by email")?;
    Ok(row.map(|row| client_record(&row)))
}

/// Re-load a client by id (authenticated request path).
pub(super) async fn load_client(pool: &PgPool, id: Uuid) -> Result<Option<ClientRecord>> {
    let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to load client")?;
    Ok(row.map(|row| client_record(&row)))
}

/// Stamp a successful client login.
pub(super) async fn record_client_login(pool: &PgPool, id: Uuid, ip: Option<String>) -> Result<()> {
    let query = r"
        UPDATE clients
        SET last_login = NOW(), last_login_ip = $2::inet, updated_at = NOW()
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(ip)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to record client login")?;
    Ok(())
}

pub(super) async fn update_client_password(pool: &PgPool, id: Uuid, hash: &str) -> Result<()> {
    let query = "UPDATE clients SET password_hash = $2, updated_at = NOW() WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .bind(hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update client password")?;
    Ok(())
}
