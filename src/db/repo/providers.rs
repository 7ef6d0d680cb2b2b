use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::DbApiProvider;
use crate::db::write::ProviderWrite;
use crate::error::PromptBuilderError;

const SELECT_PROVIDER: &str = r#"
    SELECT id, name, provider_type, api_key, api_url, is_default, config_options
    FROM api_providers
"#;

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<DbApiProvider>, sqlx::Error> {
    sqlx::query_as::<_, DbApiProvider>(&format!("{SELECT_PROVIDER} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await
}

pub async fn fetch_one(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<DbApiProvider>, sqlx::Error> {
    sqlx::query_as::<_, DbApiProvider>(&format!("{SELECT_PROVIDER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn insert(conn: &mut SqliteConnection, write: &ProviderWrite) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO api_providers (name, provider_type, api_key, api_url, is_default, config_options)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&write.name)
    .bind(&write.provider_type)
    .bind(&write.api_key)
    .bind(&write.api_url)
    .bind(write.is_default)
    .bind(write.config_options.as_deref())
    .fetch_one(&mut *conn)
    .await
}

/// Clears the default flag on every provider, or on every provider but `keep`.
pub async fn clear_default(conn: &mut SqliteConnection, keep: Option<i64>) -> Result<(), sqlx::Error> {
    match keep {
        Some(id) => {
            sqlx::query("UPDATE api_providers SET is_default = 0 WHERE is_default = 1 AND id <> ?")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        }
        None => {
            sqlx::query("UPDATE api_providers SET is_default = 0 WHERE is_default = 1")
                .execute(&mut *conn)
                .await?;
        }
    }
    Ok(())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM api_providers").execute(&mut *conn).await?;
    Ok(res.rows_affected())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<DbApiProvider>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_all(&mut conn).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<DbApiProvider>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_one(&mut conn, id).await?)
}

pub async fn get_default(pool: &SqlitePool) -> Result<Option<DbApiProvider>, PromptBuilderError> {
    let row = sqlx::query_as::<_, DbApiProvider>(&format!(
        "{SELECT_PROVIDER} WHERE is_default = 1 LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, write: ProviderWrite) -> Result<DbApiProvider, PromptBuilderError> {
    write.validate()?;

    let mut tx = pool.begin().await?;
    if write.is_default {
        clear_default(&mut tx, None).await?;
    }
    let id = insert(&mut tx, &write).await?;
    tx.commit().await?;

    Ok(DbApiProvider {
        id,
        name: write.name,
        provider_type: write.provider_type,
        api_key: write.api_key,
        api_url: write.api_url,
        is_default: write.is_default,
        config_options: write.config_options,
    })
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    write: ProviderWrite,
) -> Result<Option<DbApiProvider>, PromptBuilderError> {
    let mut tx = pool.begin().await?;
    if fetch_one(&mut tx, id).await?.is_none() {
        return Ok(None);
    }
    write.validate()?;

    if write.is_default {
        clear_default(&mut tx, Some(id)).await?;
    }
    sqlx::query(
        r#"
        UPDATE api_providers
        SET name = ?, provider_type = ?, api_key = ?, api_url = ?, is_default = ?, config_options = ?
        WHERE id = ?
        "#,
    )
    .bind(&write.name)
    .bind(&write.provider_type)
    .bind(&write.api_key)
    .bind(&write.api_url)
    .bind(write.is_default)
    .bind(write.config_options.as_deref())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Some(DbApiProvider {
        id,
        name: write.name,
        provider_type: write.provider_type,
        api_key: write.api_key,
        api_url: write.api_url,
        is_default: write.is_default,
        config_options: write.config_options,
    }))
}

/// `Ok(false)` when no such provider exists.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, PromptBuilderError> {
    let res = sqlx::query("DELETE FROM api_providers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}
