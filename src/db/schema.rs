//! SQL DDL for initializing the database schema.
//! SQLite-first design; statements are idempotent and applied at start-up.

/// SQLite schema includes:
/// - `prompt_templates` table (template body + default model)
/// - `categories` table (tree via nullable `parent_id`, bound to one template)
/// - `api_providers` table (LLM endpoints, at most one flagged default)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Prompt templates
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS prompt_templates (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    template TEXT NOT NULL,
    model TEXT NOT NULL
);

-- ---------------------------------------------------------------------------
-- Categories (rows referenced as parent or template cannot be deleted)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    parent_id INTEGER NULL REFERENCES categories(id),
    prompt_template_id INTEGER NOT NULL REFERENCES prompt_templates(id)
);

CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories(parent_id);
CREATE INDEX IF NOT EXISTS idx_categories_prompt_template_id ON categories(prompt_template_id);

-- ---------------------------------------------------------------------------
-- API providers
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS api_providers (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    provider_type TEXT NOT NULL DEFAULT 'OpenRouter',
    api_key TEXT NOT NULL DEFAULT '',
    api_url TEXT NOT NULL,
    is_default INTEGER NOT NULL DEFAULT 0,
    config_options TEXT NULL
);

-- At most one default provider.
CREATE UNIQUE INDEX IF NOT EXISTS idx_api_providers_single_default
    ON api_providers(is_default) WHERE is_default = 1;
"#;
