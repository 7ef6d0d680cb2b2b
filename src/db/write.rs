//! Validated write payloads. Create and full-replace updates share one shape
//! per entity.

use promptbuilder_schema::{
    CreateApiProviderDto, CreateCategoryDto, CreatePromptTemplateDto, ProviderRecord,
    TemplateRecord,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PromptBuilderError;

const MAX_NAME_CHARS: usize = 100;
const MAX_MODEL_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateWrite {
    pub name: String,
    pub template: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryWrite {
    pub name: String,
    pub parent_id: Option<i64>,
    pub prompt_template_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderWrite {
    pub name: String,
    pub provider_type: String,
    pub api_key: String,
    pub api_url: String,
    pub is_default: bool,
    pub config_options: Option<String>,
}

impl TemplateWrite {
    pub fn validate(&self) -> Result<(), PromptBuilderError> {
        require("Name", &self.name, Some(MAX_NAME_CHARS))?;
        require("Template", &self.template, None)?;
        require("Model", &self.model, Some(MAX_MODEL_CHARS))
    }
}

impl CategoryWrite {
    pub fn validate(&self) -> Result<(), PromptBuilderError> {
        require("Name", &self.name, Some(MAX_NAME_CHARS))
    }
}

impl ProviderWrite {
    pub fn validate(&self) -> Result<(), PromptBuilderError> {
        require("Name", &self.name, Some(MAX_NAME_CHARS))?;
        require("ProviderType", &self.provider_type, Some(MAX_MODEL_CHARS))?;
        require("ApiUrl", &self.api_url, None)?;
        let url = Url::parse(self.api_url.trim()).map_err(|e| {
            PromptBuilderError::Validation(format!("ApiUrl is not a valid URL: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PromptBuilderError::Validation(format!(
                "ApiUrl must use http or https, got {}",
                url.scheme()
            )));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str, max_chars: Option<usize>) -> Result<(), PromptBuilderError> {
    if value.trim().is_empty() {
        return Err(PromptBuilderError::Validation(format!(
            "{field} is required"
        )));
    }
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            return Err(PromptBuilderError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

impl From<CreatePromptTemplateDto> for TemplateWrite {
    fn from(dto: CreatePromptTemplateDto) -> Self {
        Self {
            name: dto.name,
            template: dto.template,
            model: dto.model,
        }
    }
}

impl From<&TemplateRecord> for TemplateWrite {
    fn from(record: &TemplateRecord) -> Self {
        Self {
            name: record.name.clone(),
            template: record.template.clone(),
            model: record.model.clone(),
        }
    }
}

impl From<CreateCategoryDto> for CategoryWrite {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
            prompt_template_id: dto.prompt_template_id,
        }
    }
}

impl From<CreateApiProviderDto> for ProviderWrite {
    fn from(dto: CreateApiProviderDto) -> Self {
        Self {
            name: dto.name,
            provider_type: dto.provider_type,
            api_key: dto.api_key,
            api_url: dto.api_url.trim().to_string(),
            is_default: dto.is_default,
            config_options: dto.config_options,
        }
    }
}

impl From<&ProviderRecord> for ProviderWrite {
    fn from(record: &ProviderRecord) -> Self {
        Self {
            name: record.name.clone(),
            provider_type: record.provider_type.clone(),
            api_key: record.api_key.clone(),
            api_url: record.api_url.clone(),
            is_default: record.is_default,
            config_options: record.config_options.clone(),
        }
    }
}
