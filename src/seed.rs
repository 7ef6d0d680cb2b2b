//! Sample data for a fresh database: one default OpenRouter provider, three
//! templates and a small category tree using them.

use tracing::info;

use crate::db::{CategoryWrite, DbActorHandle, ProviderWrite, TemplateWrite};
use crate::error::PromptBuilderError;

pub const PLACEHOLDER_API_KEY: &str = "REPLACE_WITH_YOUR_API_KEY";
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

const SAMPLE_TEMPLATES: [(&str, &str, &str); 3] = [
    (
        "Code Generation",
        "Write a {{language}} function that {{task}}",
        "anthropic/claude-3-opus-20240229",
    ),
    (
        "Unit Test",
        "Write a unit test for a {{language}} function that {{task}}",
        "anthropic/claude-3-sonnet-20240229",
    ),
    (
        "Documentation",
        "Write documentation for a {{language}} function that {{task}}",
        "anthropic/claude-3-haiku-20240307",
    ),
];

/// Child categories of "Development", by index into `SAMPLE_TEMPLATES`.
const SAMPLE_SUBCATEGORIES: [(&str, usize); 3] = [
    ("Code Generation", 0),
    ("Unit Testing", 1),
    ("Documentation", 2),
];

/// Fills empty tables only; existing data is never touched.
pub async fn seed_sample_data(db: &DbActorHandle) -> Result<(), PromptBuilderError> {
    if db.list_providers().await?.is_empty() {
        db.create_provider(ProviderWrite {
            name: "OpenRouter".to_string(),
            provider_type: "OpenRouter".to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            api_url: OPENROUTER_API_URL.to_string(),
            is_default: true,
            config_options: Some("{}".to_string()),
        })
        .await?;
        info!("Seed: default OpenRouter provider created");
    }

    if !db.list_templates().await?.is_empty() {
        return Ok(());
    }

    let mut template_ids = Vec::with_capacity(SAMPLE_TEMPLATES.len());
    for (name, template, model) in SAMPLE_TEMPLATES {
        let row = db
            .create_template(TemplateWrite {
                name: name.to_string(),
                template: template.to_string(),
                model: model.to_string(),
            })
            .await?;
        template_ids.push(row.id);
    }

    if db.list_categories().await?.is_empty() {
        let root = db
            .create_category(CategoryWrite {
                name: "Development".to_string(),
                parent_id: None,
                prompt_template_id: template_ids[0],
            })
            .await?;
        for (name, template_idx) in SAMPLE_SUBCATEGORIES {
            db.create_category(CategoryWrite {
                name: name.to_string(),
                parent_id: Some(root.id),
                prompt_template_id: template_ids[template_idx],
            })
            .await?;
        }
    }

    info!(templates = template_ids.len(), "Seed: sample templates and categories created");
    Ok(())
}
