//! Operand signature resolution
//!
//! The assembler picks a param list by the kinds of the operands it parsed.
//! Each instruction gets a trie keyed by [`ParamKind`]; the node reached after
//! the last operand points at the matching param list. A lookup costs one
//! step per operand regardless of how many param lists an instruction has.

use crate::tables::{EncodingTables, ParamListRecord};
use tracing::warn;
use uvm_isa::ParamKind;

#[derive(Debug, Default)]
struct Node {
    kind: Option<ParamKind>,
    children: Vec<Node>,
    /// Param list whose signature ends here
    param_list: Option<usize>,
}

impl Node {
    fn child(&self, kind: ParamKind) -> Option<&Node> {
        self.children.iter().find(|c| c.kind == Some(kind))
    }

    fn child_or_insert(&mut self, kind: ParamKind) -> &mut Node {
        let pos = match self.children.iter().position(|c| c.kind == Some(kind)) {
            Some(pos) => pos,
            None => {
                self.children.push(Node {
                    kind: Some(kind),
                    ..Node::default()
                });
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }
}

/// Per-instruction signature tries over a set of encoding tables
#[derive(Debug)]
pub struct SignatureTree<'a> {
    tables: &'a EncodingTables,
    roots: Vec<Node>,
    shadowed: usize,
}

impl<'a> SignatureTree<'a> {
    pub fn from_tables(tables: &'a EncodingTables) -> Self {
        let mut shadowed = 0;
        let mut roots = Vec::with_capacity(tables.len());

        for (index, param_lists) in tables.instructions().iter().enumerate() {
            let mut root = Node::default();
            for (position, record) in param_lists.iter().enumerate() {
                let mut node = &mut root;
                for kind in &record.params {
                    node = node.child_or_insert(*kind);
                }
                if let Some(previous) = node.param_list.replace(position) {
                    shadowed += 1;
                    warn!(
                        "{}: param list {} has the same signature as param list {} and shadows it",
                        tables.instruction_index()[index].name,
                        position,
                        previous
                    );
                }
            }
            roots.push(root);
        }

        Self {
            tables,
            roots,
            shadowed,
        }
    }

    /// Param list of instruction `index` matching `kinds` exactly
    pub fn resolve(&self, index: usize, kinds: &[ParamKind]) -> Option<&'a ParamListRecord> {
        let position = self.walk(index, kinds)?.param_list?;
        self.tables.param_lists(index)?.get(position)
    }

    pub fn resolve_by_name(&self, name: &str, kinds: &[ParamKind]) -> Option<&'a ParamListRecord> {
        self.resolve(self.tables.index_of(name)?, kinds)
    }

    /// Kinds that may follow `prefix` for instruction `index`
    pub fn expected_after(&self, index: usize, prefix: &[ParamKind]) -> Vec<ParamKind> {
        self.walk(index, prefix)
            .map(|node| node.children.iter().filter_map(|c| c.kind).collect())
            .unwrap_or_default()
    }

    /// Param lists made unreachable by a later identical signature
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }

    fn walk(&self, index: usize, kinds: &[ParamKind]) -> Option<&Node> {
        kinds
            .iter()
            .try_fold(self.roots.get(index)?, |node, kind| node.child(*kind))
    }
}
