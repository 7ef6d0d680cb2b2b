mod common;

use promptbuilder::PromptBuilderError;
use promptbuilder::db::{CategoryWrite, DbActorHandle, ProviderWrite, TemplateWrite};

fn template(name: &str) -> TemplateWrite {
    TemplateWrite {
        name: name.to_string(),
        template: "Write a {{language}} function".to_string(),
        model: "anthropic/claude-3-haiku-20240307".to_string(),
    }
}

fn category(name: &str, parent_id: Option<i64>, prompt_template_id: i64) -> CategoryWrite {
    CategoryWrite {
        name: name.to_string(),
        parent_id,
        prompt_template_id,
    }
}

fn provider(name: &str, is_default: bool) -> ProviderWrite {
    ProviderWrite {
        name: name.to_string(),
        provider_type: "OpenRouter".to_string(),
        api_key: format!("key-{name}"),
        api_url: "https://openrouter.ai/api/v1".to_string(),
        is_default,
        config_options: None,
    }
}

async fn default_count(db: &DbActorHandle) -> usize {
    db.list_providers()
        .await
        .expect("list providers")
        .iter()
        .filter(|p| p.is_default)
        .count()
}

#[tokio::test]
async fn template_crud_and_in_use_guard() {
    let db = common::spawn_db("store-templates").await;

    let t = db.create_template(template("Code")).await.expect("create");
    assert!(t.id > 0);
    assert_eq!(db.get_template(t.id).await.expect("get").as_ref(), Some(&t));

    let mut changed = template("Code v2");
    changed.model = "openai/gpt-4o".to_string();
    let updated = db
        .update_template(t.id, changed)
        .await
        .expect("update")
        .expect("template exists");
    assert_eq!(updated.name, "Code v2");
    assert!(
        db.update_template(9999, template("x"))
            .await
            .expect("update missing")
            .is_none()
    );

    let c = db
        .create_category(category("Dev", None, t.id))
        .await
        .expect("create category");
    let err = db.delete_template(t.id).await.unwrap_err();
    assert!(matches!(err, PromptBuilderError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "Cannot delete a template that is used by categories"
    );

    assert!(db.delete_category(c.id).await.expect("delete category"));
    assert!(db.delete_template(t.id).await.expect("delete template"));
    assert!(!db.delete_template(t.id).await.expect("delete again"));
    assert!(db.list_templates().await.expect("list").is_empty());
}

#[tokio::test]
async fn template_validation_rejects_blank_and_long_fields() {
    let db = common::spawn_db("store-template-validation").await;

    let mut blank = template("");
    blank.name = "  ".to_string();
    assert!(matches!(
        db.create_template(blank).await,
        Err(PromptBuilderError::Validation(_))
    ));

    let mut long = template("Long");
    long.name = "n".repeat(101);
    assert!(matches!(
        db.create_template(long).await,
        Err(PromptBuilderError::Validation(_))
    ));
    assert!(db.list_templates().await.expect("list").is_empty());
}

#[tokio::test]
async fn category_references_and_tree_guards() {
    let db = common::spawn_db("store-categories").await;
    let t = db.create_template(template("T")).await.expect("template");

    let missing_template = db.create_category(category("Bad", None, 42)).await;
    assert!(matches!(missing_template, Err(PromptBuilderError::Validation(_))));
    let missing_parent = db.create_category(category("Bad", Some(42), t.id)).await;
    assert!(matches!(missing_parent, Err(PromptBuilderError::Validation(_))));

    let root = db.create_category(category("Root", None, t.id)).await.expect("root");
    let mid = db
        .create_category(category("Mid", Some(root.id), t.id))
        .await
        .expect("mid");
    let leaf = db
        .create_category(category("Leaf", Some(mid.id), t.id))
        .await
        .expect("leaf");

    // Own parent and any descendant as parent are both rejected.
    let own = db
        .update_category(root.id, category("Root", Some(root.id), t.id))
        .await;
    assert!(matches!(own, Err(PromptBuilderError::Validation(_))));
    let descendant = db
        .update_category(root.id, category("Root", Some(leaf.id), t.id))
        .await;
    assert!(matches!(descendant, Err(PromptBuilderError::Validation(_))));

    // Moving the leaf to the root is fine.
    let moved = db
        .update_category(leaf.id, category("Leaf", Some(root.id), t.id))
        .await
        .expect("move leaf")
        .expect("leaf exists");
    assert_eq!(moved.parent_id, Some(root.id));

    let tree = db.category_tree().await.expect("tree");
    assert_eq!(tree.len(), 1);
    let children: Vec<i64> = tree[0]
        .children
        .as_ref()
        .expect("children")
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(children, vec![mid.id, leaf.id]);

    let node = db.get_category(mid.id).await.expect("get").expect("exists");
    assert_eq!(node.children, Some(Vec::new()));
    assert!(db.get_category(9999).await.expect("get missing").is_none());

    let err = db.delete_category(root.id).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot delete a category that has child categories"
    );
    assert!(!db.delete_category(9999).await.expect("delete missing"));
}

#[tokio::test]
async fn at_most_one_default_provider_after_every_write() {
    let db = common::spawn_db("store-providers").await;
    assert!(db.get_default_provider().await.expect("default").is_none());

    let a = db.create_provider(provider("a", true)).await.expect("a");
    assert_eq!(default_count(&db).await, 1);

    let b = db.create_provider(provider("b", true)).await.expect("b");
    assert_eq!(default_count(&db).await, 1);
    let current = db.get_default_provider().await.expect("default").expect("some");
    assert_eq!(current.id, b.id);
    assert_eq!(current.api_key, "key-b");

    let c = db.create_provider(provider("c", false)).await.expect("c");
    assert_eq!(default_count(&db).await, 1);

    db.update_provider(a.id, provider("a", true))
        .await
        .expect("update a")
        .expect("a exists");
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(
        db.get_default_provider().await.expect("default").map(|p| p.id),
        Some(a.id)
    );

    // Re-saving the default keeps it default.
    db.update_provider(a.id, provider("a2", true))
        .await
        .expect("update a again")
        .expect("a exists");
    assert_eq!(default_count(&db).await, 1);

    assert!(db.delete_provider(a.id).await.expect("delete a"));
    assert_eq!(default_count(&db).await, 0);
    assert!(db.get_default_provider().await.expect("default").is_none());

    assert!(
        db.update_provider(9999, provider("x", true))
            .await
            .expect("update missing")
            .is_none()
    );
    assert_eq!(default_count(&db).await, 0);
    assert!(db.get_provider(c.id).await.expect("get c").is_some());
}

#[tokio::test]
async fn provider_validation_rejects_relative_urls() {
    let db = common::spawn_db("store-provider-validation").await;
    let mut bad = provider("bad", false);
    bad.api_url = "openrouter.ai/api/v1".to_string();
    assert!(matches!(
        db.create_provider(bad).await,
        Err(PromptBuilderError::Validation(_))
    ));
    assert!(db.list_providers().await.expect("list").is_empty());
}

#[tokio::test]
async fn seeding_fills_only_empty_tables() {
    let db = common::spawn_db("store-seed").await;
    promptbuilder::seed::seed_sample_data(&db).await.expect("seed");

    let providers = db.list_providers().await.expect("providers");
    assert_eq!(providers.len(), 1);
    assert!(providers[0].is_default);
    assert_eq!(providers[0].api_url, promptbuilder::seed::OPENROUTER_API_URL);

    let templates = db.list_templates().await.expect("templates");
    let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Code Generation", "Unit Test", "Documentation"]);

    let tree = db.category_tree().await.expect("tree");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name, "Development");
    assert_eq!(tree[0].children.as_ref().map(Vec::len), Some(3));

    promptbuilder::seed::seed_sample_data(&db).await.expect("seed again");
    assert_eq!(db.list_templates().await.expect("templates").len(), 3);
    assert_eq!(db.list_categories().await.expect("categories").len(), 4);
}
