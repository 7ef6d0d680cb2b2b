//! Assembly of the flat `categories` table into a rooted forest.
//!
//! Category counts are small (tens), so every node rescans the whole slice for
//! its children. Output order follows input order at every level.

use crate::db::DbCategory;
use promptbuilder_schema::CategoryDto;

/// Roots (rows without a parent) with `children` filled recursively.
/// Leaves carry an empty list, never `None`.
pub fn build_tree(rows: &[DbCategory]) -> Vec<CategoryDto> {
    rows.iter()
        .filter(|row| row.parent_id.is_none())
        .map(|root| attach_children(root, rows, &mut vec![root.id]))
        .collect()
}

/// The node `id` with its descendants, or `None` if no such row exists.
pub fn subtree(rows: &[DbCategory], id: i64) -> Option<CategoryDto> {
    rows.iter()
        .find(|row| row.id == id)
        .map(|node| attach_children(node, rows, &mut vec![node.id]))
}

/// Whether re-parenting `id` under `proposed_parent` would close a loop.
///
/// Walks the parent chain upwards from `proposed_parent`; reaching `id` means
/// the new parent is `id` itself or one of its descendants. A pre-existing
/// loop in stored data that does not involve `id` ends the walk.
pub fn creates_cycle(rows: &[DbCategory], id: i64, proposed_parent: i64) -> bool {
    let mut seen = Vec::new();
    let mut cursor = Some(proposed_parent);
    while let Some(current) = cursor {
        if current == id {
            return true;
        }
        if seen.contains(&current) {
            return false;
        }
        seen.push(current);
        cursor = rows
            .iter()
            .find(|row| row.id == current)
            .and_then(|row| row.parent_id);
    }
    false
}

fn attach_children(node: &DbCategory, rows: &[DbCategory], path: &mut Vec<i64>) -> CategoryDto {
    let mut children = Vec::new();
    for child in rows.iter().filter(|row| row.parent_id == Some(node.id)) {
        // Guard against malformed data looping back onto the current branch.
        if path.contains(&child.id) {
            continue;
        }
        path.push(child.id);
        children.push(attach_children(child, rows, path));
        path.pop();
    }

    CategoryDto {
        id: node.id,
        name: node.name.clone(),
        parent_id: node.parent_id,
        prompt_template_id: node.prompt_template_id,
        children: Some(children),
    }
}
