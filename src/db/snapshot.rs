//! Whole-dataset export, import and reset.
//!
//! Import replaces everything inside one transaction. Ids in the document are
//! only used to re-link rows; every inserted row gets a fresh id from the store.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use promptbuilder_schema::DataSnapshot;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info, warn};

use crate::category_tree;
use crate::db::models::DbCategory;
use crate::db::repo::{categories, providers, templates};
use crate::db::write::{CategoryWrite, ProviderWrite, TemplateWrite};
use crate::error::PromptBuilderError;

/// Row counts written by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub templates: usize,
    pub categories: usize,
    pub providers: usize,
}

pub async fn export(pool: &SqlitePool) -> Result<DataSnapshot, PromptBuilderError> {
    let mut conn = pool.acquire().await?;
    let prompt_templates = templates::fetch_all(&mut conn).await?;
    let categories = categories::fetch_all(&mut conn).await?;
    let api_providers = providers::fetch_all(&mut conn).await?;

    Ok(DataSnapshot {
        exported_at: Some(Utc::now()),
        prompt_templates: prompt_templates.into_iter().map(Into::into).collect(),
        categories: categories.into_iter().map(Into::into).collect(),
        api_providers: api_providers.into_iter().map(Into::into).collect(),
    })
}

/// Checks a document before anything is written and normalizes what can be
/// repaired: unknown parent ids become roots and only the first default
/// provider keeps its flag.
pub fn validate(snapshot: &mut DataSnapshot) -> Result<(), PromptBuilderError> {
    let mut template_ids = HashSet::new();
    for record in &snapshot.prompt_templates {
        if !template_ids.insert(record.id) {
            return Err(PromptBuilderError::Validation(format!(
                "Duplicate prompt template ID {} in import data",
                record.id
            )));
        }
    }

    let mut category_ids = HashSet::new();
    for record in &snapshot.categories {
        if !category_ids.insert(record.id) {
            return Err(PromptBuilderError::Validation(format!(
                "Duplicate category ID {} in import data",
                record.id
            )));
        }
        if !template_ids.contains(&record.prompt_template_id) {
            return Err(PromptBuilderError::Validation(format!(
                "Category {} references prompt template ID {} which is not in the import data",
                record.id, record.prompt_template_id
            )));
        }
    }

    for record in &mut snapshot.categories {
        if let Some(parent_id) = record.parent_id {
            if !category_ids.contains(&parent_id) {
                warn!(
                    category_id = record.id,
                    parent_id, "Import: parent category not in import data, importing as root"
                );
                record.parent_id = None;
            }
        }
    }

    let rows: Vec<DbCategory> = snapshot.categories.iter().map(DbCategory::from).collect();
    for row in &rows {
        if let Some(parent_id) = row.parent_id {
            if category_tree::creates_cycle(&rows, row.id, parent_id) {
                return Err(PromptBuilderError::Validation(format!(
                    "Category {} is part of a parent cycle in import data",
                    row.id
                )));
            }
        }
    }

    let mut seen_default = false;
    for record in &mut snapshot.api_providers {
        if record.is_default {
            if seen_default {
                warn!(
                    provider = %record.name,
                    "Import: more than one default provider, clearing flag"
                );
                record.is_default = false;
            }
            seen_default = true;
        }
    }

    Ok(())
}

/// Replaces the whole dataset with `snapshot`. Validation failures are 400s;
/// anything failing after the transaction began is rolled back and reported
/// as an import failure.
pub async fn import(
    pool: &SqlitePool,
    mut snapshot: DataSnapshot,
) -> Result<ImportSummary, PromptBuilderError> {
    validate(&mut snapshot)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| PromptBuilderError::Import(format!("failed to begin transaction: {e}")))?;

    match replace_all(&mut tx, &snapshot).await {
        Ok(summary) => {
            tx.commit()
                .await
                .map_err(|e| PromptBuilderError::Import(format!("commit failed: {e}")))?;
            info!(
                templates = summary.templates,
                categories = summary.categories,
                providers = summary.providers,
                "Import: dataset replaced"
            );
            Ok(summary)
        }
        Err(e) => {
            error!(error = %e, "Import: failed, rolling back");
            if let Err(rollback) = tx.rollback().await {
                error!(error = %rollback, "Import: rollback failed");
            }
            Err(PromptBuilderError::Import(e.to_string()))
        }
    }
}

pub async fn reset(pool: &SqlitePool) -> Result<(), PromptBuilderError> {
    let mut tx = pool.begin().await?;
    clear(&mut tx).await?;
    tx.commit().await?;
    info!("Reset: all data deleted");
    Ok(())
}

async fn clear(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    categories::delete_all(conn).await?;
    templates::delete_all(conn).await?;
    providers::delete_all(conn).await?;
    Ok(())
}

async fn replace_all(
    conn: &mut SqliteConnection,
    snapshot: &DataSnapshot,
) -> Result<ImportSummary, sqlx::Error> {
    clear(conn).await?;

    let mut template_map: HashMap<i64, i64> = HashMap::new();
    for record in &snapshot.prompt_templates {
        let new_id = templates::insert(conn, &TemplateWrite::from(record)).await?;
        template_map.insert(record.id, new_id);
    }

    for record in &snapshot.api_providers {
        providers::insert(conn, &ProviderWrite::from(record)).await?;
    }

    // Parents may appear after their children, so links are set in a second pass.
    let mut category_map: HashMap<i64, i64> = HashMap::new();
    for record in &snapshot.categories {
        let prompt_template_id = template_map
            .get(&record.prompt_template_id)
            .copied()
            .ok_or_else(|| {
                sqlx::Error::Protocol(format!(
                    "no imported template for ID {}",
                    record.prompt_template_id
                ))
            })?;
        let write = CategoryWrite {
            name: record.name.clone(),
            parent_id: None,
            prompt_template_id,
        };
        let new_id = categories::insert(conn, &write).await?;
        category_map.insert(record.id, new_id);
    }

    for record in &snapshot.categories {
        let Some(old_parent) = record.parent_id else {
            continue;
        };
        if let (Some(&id), Some(&parent_id)) =
            (category_map.get(&record.id), category_map.get(&old_parent))
        {
            categories::set_parent(conn, id, Some(parent_id)).await?;
        }
    }

    Ok(ImportSummary {
        templates: template_map.len(),
        categories: category_map.len(),
        providers: snapshot.api_providers.len(),
    })
}
