use promptbuilder_schema::CategoryDto;
use sqlx::{SqliteConnection, SqlitePool};

use crate::category_tree;
use crate::db::models::DbCategory;
use crate::db::repo::templates;
use crate::db::write::CategoryWrite;
use crate::error::PromptBuilderError;

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<DbCategory>, sqlx::Error> {
    sqlx::query_as::<_, DbCategory>(
        "SELECT id, name, parent_id, prompt_template_id FROM categories ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn fetch_one(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<DbCategory>, sqlx::Error> {
    sqlx::query_as::<_, DbCategory>(
        "SELECT id, name, parent_id, prompt_template_id FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, write: &CategoryWrite) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO categories (name, parent_id, prompt_template_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&write.name)
    .bind(write.parent_id)
    .bind(write.prompt_template_id)
    .fetch_one(&mut *conn)
    .await
}

pub async fn set_parent(
    conn: &mut SqliteConnection,
    id: i64,
    parent_id: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE categories SET parent_id = ? WHERE id = ?")
        .bind(parent_id)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM categories").execute(&mut *conn).await?;
    Ok(res.rows_affected())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<DbCategory>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_all(&mut conn).await?)
}

pub async fn tree(pool: &SqlitePool) -> Result<Vec<CategoryDto>, PromptBuilderError> {
    let rows = list(pool).await?;
    Ok(category_tree::build_tree(&rows))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<DbCategory>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    Ok(fetch_one(&mut conn, id).await?)
}

pub async fn get_subtree(pool: &SqlitePool, id: i64) -> Result<Option<CategoryDto>, PromptBuilderError> {
    let rows = list(pool).await?;
    Ok(category_tree::subtree(&rows, id))
}

pub async fn create(pool: &SqlitePool, write: CategoryWrite) -> Result<DbCategory, PromptBuilderError> {
    write.validate()?;
    let mut conn = pool.acquire().await?;
    check_references(&mut conn, &write).await?;

    let id = insert(&mut conn, &write).await?;
    Ok(DbCategory {
        id,
        name: write.name,
        parent_id: write.parent_id,
        prompt_template_id: write.prompt_template_id,
    })
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    write: CategoryWrite,
) -> Result<Option<DbCategory>, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    if fetch_one(&mut conn, id).await?.is_none() {
        return Ok(None);
    }
    write.validate()?;

    if write.parent_id == Some(id) {
        return Err(PromptBuilderError::Validation(
            "A category cannot be its own parent".to_string(),
        ));
    }
    check_references(&mut conn, &write).await?;

    if let Some(parent_id) = write.parent_id {
        let rows = fetch_all(&mut conn).await?;
        if category_tree::creates_cycle(&rows, id, parent_id) {
            return Err(PromptBuilderError::Validation(format!(
                "Category with ID {parent_id} is a descendant of category {id} and cannot become its parent"
            )));
        }
    }

    sqlx::query("UPDATE categories SET name = ?, parent_id = ?, prompt_template_id = ? WHERE id = ?")
        .bind(&write.name)
        .bind(write.parent_id)
        .bind(write.prompt_template_id)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(Some(DbCategory {
        id,
        name: write.name,
        parent_id: write.parent_id,
        prompt_template_id: write.prompt_template_id,
    }))
}

/// `Ok(false)` when no such category exists.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    let children: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    if children > 0 {
        return Err(PromptBuilderError::Validation(
            "Cannot delete a category that has child categories".to_string(),
        ));
    }

    let res = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}

async fn check_references(
    conn: &mut SqliteConnection,
    write: &CategoryWrite,
) -> Result<(), PromptBuilderError> {
    if templates::fetch_one(conn, write.prompt_template_id)
        .await?
        .is_none()
    {
        return Err(PromptBuilderError::Validation(format!(
            "Prompt template with ID {} does not exist",
            write.prompt_template_id
        )));
    }
    if let Some(parent_id) = write.parent_id {
        if fetch_one(conn, parent_id).await?.is_none() {
            return Err(PromptBuilderError::Validation(format!(
                "Parent category with ID {parent_id} does not exist"
            )));
        }
    }
    Ok(())
}
