use promptbuilder_schema::{
    ApiProviderDto, CategoryDto, CategoryRecord, PromptTemplateDto, ProviderRecord,
    TemplateRecord,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbPromptTemplate {
    pub id: i64,
    pub name: String,
    pub template: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbCategory {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub prompt_template_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbApiProvider {
    pub id: i64,
    pub name: String,
    pub provider_type: String,
    pub api_key: String,
    pub api_url: String,
    pub is_default: bool,
    pub config_options: Option<String>,
}

impl From<DbPromptTemplate> for PromptTemplateDto {
    fn from(row: DbPromptTemplate) -> Self {
        Self {
            id: row.id,
            name: row.name,
            template: row.template,
            model: row.model,
        }
    }
}

impl From<DbPromptTemplate> for TemplateRecord {
    fn from(row: DbPromptTemplate) -> Self {
        Self {
            id: row.id,
            name: row.name,
            template: row.template,
            model: row.model,
        }
    }
}

/// A plain row; `children` stays `None` outside of tree responses.
impl From<DbCategory> for CategoryDto {
    fn from(row: DbCategory) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            prompt_template_id: row.prompt_template_id,
            children: None,
        }
    }
}

impl From<DbCategory> for CategoryRecord {
    fn from(row: DbCategory) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            prompt_template_id: row.prompt_template_id,
        }
    }
}

impl From<&CategoryRecord> for DbCategory {
    fn from(record: &CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            parent_id: record.parent_id,
            prompt_template_id: record.prompt_template_id,
        }
    }
}

impl From<DbApiProvider> for ApiProviderDto {
    fn from(row: DbApiProvider) -> Self {
        Self {
            id: row.id,
            name: row.name,
            provider_type: row.provider_type,
            api_url: row.api_url,
            is_default: row.is_default,
        }
    }
}

impl From<DbApiProvider> for ProviderRecord {
    fn from(row: DbApiProvider) -> Self {
        Self {
            id: row.id,
            name: row.name,
            provider_type: row.provider_type,
            api_key: row.api_key,
            api_url: row.api_url,
            is_default: row.is_default,
            config_options: row.config_options,
        }
    }
}
