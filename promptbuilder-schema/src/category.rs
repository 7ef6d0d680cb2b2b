use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    /// `None` for root categories.
    pub parent_id: Option<i64>,
    pub prompt_template_id: i64,
    /// Populated for nodes returned as part of a tree; `null` for plain rows.
    pub children: Option<Vec<CategoryDto>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub prompt_template_id: i64,
}

pub type UpdateCategoryDto = CreateCategoryDto;
