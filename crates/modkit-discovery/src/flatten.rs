use modkit_tree::ModuleNode;

use crate::record::ModuleRecord;

/// Flatten a module tree into an eagerly materialized pre-order sequence,
/// pruning subtrees below `max_depth` (`None` = unbounded).
///
/// The node sitting at the boundary level is still emitted; only its
/// children are skipped. Parents always precede their children and
/// siblings keep their tree order.
pub fn flatten(tree: &ModuleNode, max_depth: Option<usize>) -> Vec<ModuleRecord> {
    let mut records = Vec::new();
    walk(tree, 0, max_depth, &mut records);
    records
}

fn walk(node: &ModuleNode, depth: usize, max_depth: Option<usize>, out: &mut Vec<ModuleRecord>) {
    out.push(ModuleRecord::from_node(node));

    if max_depth.map_or(true, |limit| depth < limit) {
        for child in &node.children {
            walk(child, depth + 1, max_depth, out);
        }
    }
}
