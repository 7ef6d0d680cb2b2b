use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::DbPromptTemplate;
use crate::db::write::TemplateWrite;
use crate::error::PromptBuilderError;

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<DbPromptTemplate>, sqlx::Error> {
    sqlx::query_as::<_, DbPromptTemplate>(
        "SELECT id, name, template, model FROM prompt_templates ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn fetch_one(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<DbPromptTemplate>, sqlx::Error> {
    sqlx::query_as::<_, DbPromptTemplate>(
        "SELECT id, name, template, model FROM prompt_templates WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, write: &TemplateWrite) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO prompt_templates (name, template, model) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&write.name)
    .bind(&write.template)
    .bind(&write.model)
    .fetch_one(&mut *conn)
    .await
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM prompt_templates")
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<DbPromptTemplate>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_all(&mut conn).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<DbPromptTemplate>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_one(&mut conn, id).await?)
}

pub async fn create(
    pool: &SqlitePool,
    write: TemplateWrite,
) -> Result<DbPromptTemplate, PromptBuilderError> {
    write.validate()?;
    let mut conn = pool.acquire().await?;
    let id = insert(&mut conn, &write).await?;
    Ok(DbPromptTemplate {
        id,
        name: write.name,
        template: write.template,
        model: write.model,
    })
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    write: TemplateWrite,
) -> Result<Option<DbPromptTemplate>, PromptBuilderError> {
    write.validate()?;
    let res = sqlx::query("UPDATE prompt_templates SET name = ?, template = ?, model = ? WHERE id = ?")
        .bind(&write.name)
        .bind(&write.template)
        .bind(&write.model)
        .bind(id)
        .execute(pool)
        .await?;
    if res.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(DbPromptTemplate {
        id,
        name: write.name,
        template: write.template,
        model: write.model,
    }))
}

/// `Ok(false)` when no such template exists.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    if fetch_one(&mut conn, id).await?.is_none() {
        return Ok(false);
    }

    let in_use: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE prompt_template_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
    if in_use > 0 {
        return Err(PromptBuilderError::Validation(
            "Cannot delete a template that is used by categories".to_string(),
        ));
    }

    let res = sqlx::query("DELETE FROM prompt_templates WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}
