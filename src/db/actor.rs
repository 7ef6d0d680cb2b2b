use crate::db::models::{DbApiProvider, DbCategory, DbPromptTemplate};
use crate::db::repo::{categories, providers, templates};
use crate::db::schema::SQLITE_INIT;
use crate::db::snapshot::{self, ImportSummary};
use crate::db::write::{CategoryWrite, ProviderWrite, TemplateWrite};
use crate::error::PromptBuilderError;
use promptbuilder_schema::{CategoryDto, DataSnapshot};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

type Reply<T> = RpcReplyPort<Result<T, PromptBuilderError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    ListTemplates(Reply<Vec<DbPromptTemplate>>),
    GetTemplate(i64, Reply<Option<DbPromptTemplate>>),
    CreateTemplate(TemplateWrite, Reply<DbPromptTemplate>),
    UpdateTemplate(i64, TemplateWrite, Reply<Option<DbPromptTemplate>>),
    /// Fails while categories still reference the template.
    DeleteTemplate(i64, Reply<bool>),

    /// Flat rows ordered by id.
    ListCategories(Reply<Vec<DbCategory>>),
    /// Roots with their children filled recursively.
    CategoryTree(Reply<Vec<CategoryDto>>),
    /// A single node with its subtree.
    GetCategory(i64, Reply<Option<CategoryDto>>),
    /// A category row together with the template it is bound to.
    GetCategoryWithTemplate(i64, Reply<Option<(DbCategory, Option<DbPromptTemplate>)>>),
    CreateCategory(CategoryWrite, Reply<DbCategory>),
    UpdateCategory(i64, CategoryWrite, Reply<Option<DbCategory>>),
    /// Fails while the category has children.
    DeleteCategory(i64, Reply<bool>),

    ListProviders(Reply<Vec<DbApiProvider>>),
    GetProvider(i64, Reply<Option<DbApiProvider>>),
    GetDefaultProvider(Reply<Option<DbApiProvider>>),
    CreateProvider(ProviderWrite, Reply<DbApiProvider>),
    UpdateProvider(i64, ProviderWrite, Reply<Option<DbApiProvider>>),
    DeleteProvider(i64, Reply<bool>),

    Export(Reply<DataSnapshot>),
    Import(DataSnapshot, Reply<ImportSummary>),
    Reset(Reply<()>),
}

fn rpc_failed<E: std::fmt::Display>(op: &'static str) -> impl FnOnce(E) -> PromptBuilderError {
    move |e| PromptBuilderError::RactorError(format!("DbActor {op} RPC failed: {e}"))
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_templates(&self) -> Result<Vec<DbPromptTemplate>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::ListTemplates)
            .map_err(rpc_failed("ListTemplates"))?
    }

    pub async fn get_template(&self, id: i64) -> Result<Option<DbPromptTemplate>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::GetTemplate, id)
            .map_err(rpc_failed("GetTemplate"))?
    }

    pub async fn create_template(
        &self,
        write: TemplateWrite,
    ) -> Result<DbPromptTemplate, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::CreateTemplate, write)
            .map_err(rpc_failed("CreateTemplate"))?
    }

    pub async fn update_template(
        &self,
        id: i64,
        write: TemplateWrite,
    ) -> Result<Option<DbPromptTemplate>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::UpdateTemplate, id, write)
            .map_err(rpc_failed("UpdateTemplate"))?
    }

    pub async fn delete_template(&self, id: i64) -> Result<bool, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::DeleteTemplate, id)
            .map_err(rpc_failed("DeleteTemplate"))?
    }

    pub async fn list_categories(&self) -> Result<Vec<DbCategory>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::ListCategories)
            .map_err(rpc_failed("ListCategories"))?
    }

    pub async fn category_tree(&self) -> Result<Vec<CategoryDto>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::CategoryTree)
            .map_err(rpc_failed("CategoryTree"))?
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<CategoryDto>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::GetCategory, id)
            .map_err(rpc_failed("GetCategory"))?
    }

    pub async fn get_category_with_template(
        &self,
        id: i64,
    ) -> Result<Option<(DbCategory, Option<DbPromptTemplate>)>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::GetCategoryWithTemplate, id)
            .map_err(rpc_failed("GetCategoryWithTemplate"))?
    }

    pub async fn create_category(&self, write: CategoryWrite) -> Result<DbCategory, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::CreateCategory, write)
            .map_err(rpc_failed("CreateCategory"))?
    }

    pub async fn update_category(
        &self,
        id: i64,
        write: CategoryWrite,
    ) -> Result<Option<DbCategory>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::UpdateCategory, id, write)
            .map_err(rpc_failed("UpdateCategory"))?
    }

    pub async fn delete_category(&self, id: i64) -> Result<bool, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::DeleteCategory, id)
            .map_err(rpc_failed("DeleteCategory"))?
    }

    pub async fn list_providers(&self) -> Result<Vec<DbApiProvider>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::ListProviders)
            .map_err(rpc_failed("ListProviders"))?
    }

    pub async fn get_provider(&self, id: i64) -> Result<Option<DbApiProvider>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::GetProvider, id)
            .map_err(rpc_failed("GetProvider"))?
    }

    pub async fn get_default_provider(&self) -> Result<Option<DbApiProvider>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::GetDefaultProvider)
            .map_err(rpc_failed("GetDefaultProvider"))?
    }

    pub async fn create_provider(
        &self,
        write: ProviderWrite,
    ) -> Result<DbApiProvider, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::CreateProvider, write)
            .map_err(rpc_failed("CreateProvider"))?
    }

    pub async fn update_provider(
        &self,
        id: i64,
        write: ProviderWrite,
    ) -> Result<Option<DbApiProvider>, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::UpdateProvider, id, write)
            .map_err(rpc_failed("UpdateProvider"))?
    }

    pub async fn delete_provider(&self, id: i64) -> Result<bool, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::DeleteProvider, id)
            .map_err(rpc_failed("DeleteProvider"))?
    }

    pub async fn export_snapshot(&self) -> Result<DataSnapshot, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::Export).map_err(rpc_failed("Export"))?
    }

    pub async fn import_snapshot(
        &self,
        snapshot: DataSnapshot,
    ) -> Result<ImportSummary, PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::Import, snapshot).map_err(rpc_failed("Import"))?
    }

    pub async fn reset(&self) -> Result<(), PromptBuilderError> {
        ractor::call!(self.actor, DbActorMessage::Reset).map_err(rpc_failed("Reset"))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::ListTemplates(reply) => {
                let _ = reply.send(templates::list(pool).await);
            }
            DbActorMessage::GetTemplate(id, reply) => {
                let _ = reply.send(templates::get(pool, id).await);
            }
            DbActorMessage::CreateTemplate(write, reply) => {
                let _ = reply.send(templates::create(pool, write).await);
            }
            DbActorMessage::UpdateTemplate(id, write, reply) => {
                let _ = reply.send(templates::update(pool, id, write).await);
            }
            DbActorMessage::DeleteTemplate(id, reply) => {
                let _ = reply.send(templates::delete(pool, id).await);
            }

            DbActorMessage::ListCategories(reply) => {
                let _ = reply.send(categories::list(pool).await);
            }
            DbActorMessage::CategoryTree(reply) => {
                let _ = reply.send(categories::tree(pool).await);
            }
            DbActorMessage::GetCategory(id, reply) => {
                let _ = reply.send(categories::get_subtree(pool, id).await);
            }
            DbActorMessage::GetCategoryWithTemplate(id, reply) => {
                let res = self.category_with_template(pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CreateCategory(write, reply) => {
                let _ = reply.send(categories::create(pool, write).await);
            }
            DbActorMessage::UpdateCategory(id, write, reply) => {
                let _ = reply.send(categories::update(pool, id, write).await);
            }
            DbActorMessage::DeleteCategory(id, reply) => {
                let _ = reply.send(categories::delete(pool, id).await);
            }

            DbActorMessage::ListProviders(reply) => {
                let _ = reply.send(providers::list(pool).await);
            }
            DbActorMessage::GetProvider(id, reply) => {
                let _ = reply.send(providers::get(pool, id).await);
            }
            DbActorMessage::GetDefaultProvider(reply) => {
                let _ = reply.send(providers::get_default(pool).await);
            }
            DbActorMessage::CreateProvider(write, reply) => {
                let _ = reply.send(providers::create(pool, write).await);
            }
            DbActorMessage::UpdateProvider(id, write, reply) => {
                let _ = reply.send(providers::update(pool, id, write).await);
            }
            DbActorMessage::DeleteProvider(id, reply) => {
                let _ = reply.send(providers::delete(pool, id).await);
            }

            DbActorMessage::Export(reply) => {
                let _ = reply.send(snapshot::export(pool).await);
            }
            DbActorMessage::Import(data, reply) => {
                let _ = reply.send(snapshot::import(pool, data).await);
            }
            DbActorMessage::Reset(reply) => {
                let _ = reply.send(snapshot::reset(pool).await);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn category_with_template(
        &self,
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<(DbCategory, Option<DbPromptTemplate>)>, PromptBuilderError> {
        let Some(category) = categories::get(pool, id).await? else {
            return Ok(None);
        };
        let template = templates::get(pool, category.prompt_template_id).await?;
        Ok(Some((category, template)))
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SQLITE_INIT.split(';') {
        let sql = stmt.trim();
        if sql.is_empty() || sql.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with("--")) {
            continue;
        }
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// Spawns the actor that owns the SQLite pool and returns its handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, PromptBuilderError> {
    let (actor, _jh) = Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| PromptBuilderError::RactorError(format!("failed to spawn DbActor: {e}")))?;
    Ok(DbActorHandle { actor })
}
