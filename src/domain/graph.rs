use crate::domain::declaration::{Declaration, DeclarationId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Edge kind in the declaration graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Container type → directly contained member.
    Contains,
    /// Subtype → direct supertype.
    Extends,
}

/// Declaration graph - the run's immutable view of the codebase
///
/// Holds every declaration plus containment and supertype edges. Built once by
/// an adapter; read-only for the duration of the analysis run.
pub struct DeclarationGraph {
    /// The directed graph of declarations and edges
    pub graph: DiGraph<Declaration, EdgeKind>,

    /// Mapping from declaration id to node index
    id_to_node: HashMap<DeclarationId, NodeIndex>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_node: HashMap::new(),
        }
    }

    pub fn add_declaration(&mut self, decl: Declaration) -> NodeIndex {
        let id = decl.id();
        let idx = self.graph.add_node(decl);
        self.id_to_node.insert(id, idx);
        idx
    }

    /// Record `member` as directly contained in `container`.
    pub fn add_containment(&mut self, container: DeclarationId, member: DeclarationId) {
        if let (Some(&c), Some(&m)) = (self.id_to_node.get(&container), self.id_to_node.get(&member))
        {
            self.graph.add_edge(c, m, EdgeKind::Contains);
        }
    }

    /// Record `subtype` as directly extending/implementing `supertype`.
    pub fn add_extends(&mut self, subtype: DeclarationId, supertype: DeclarationId) {
        if let (Some(&s), Some(&p)) = (self.id_to_node.get(&subtype), self.id_to_node.get(&supertype))
        {
            self.graph.add_edge(s, p, EdgeKind::Extends);
        }
    }

    pub fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.id_to_node.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    pub fn declaration_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Direct members of a container type.
    pub fn members_of(&self, container: DeclarationId) -> impl Iterator<Item = &Declaration> {
        self.id_to_node
            .get(&container)
            .into_iter()
            .flat_map(move |&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .filter(|e| *e.weight() == EdgeKind::Contains)
                    .map(|e| &self.graph[e.target()])
            })
    }

    /// Containing type of a declaration, if any.
    pub fn container_of(&self, id: DeclarationId) -> Option<&Declaration> {
        let decl = self.declaration(id)?;
        decl.core()
            .containing_type
            .and_then(|c| self.declaration(c))
    }

    /// True when `outer` equals `inner` or lexically encloses it through the
    /// containing-type chain.
    pub fn lexically_encloses(&self, outer: DeclarationId, inner: DeclarationId) -> bool {
        let mut current = Some(inner);
        while let Some(id) = current {
            if id == outer {
                return true;
            }
            current = self
                .declaration(id)
                .and_then(|d| d.core().containing_type);
        }
        false
    }

    /// True when `subtype` is a strict subtype of `supertype` (transitive over
    /// Extends edges, excluding the type itself).
    pub fn is_strict_subtype(&self, subtype: DeclarationId, supertype: DeclarationId) -> bool {
        if subtype == supertype {
            return false;
        }
        let Some(&start) = self.id_to_node.get(&subtype) else {
            return false;
        };
        let mut stack = vec![start];
        let mut seen = vec![false; self.graph.node_count()];
        while let Some(idx) = stack.pop() {
            if seen[idx.index()] {
                continue;
            }
            seen[idx.index()] = true;
            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                if *edge.weight() != EdgeKind::Extends {
                    continue;
                }
                if self.graph[edge.target()].id() == supertype {
                    return true;
                }
                stack.push(edge.target());
            }
        }
        false
    }

    /// Qualified path of a declaration including its container chain, e.g.
    /// `com.app.Outer.Inner.member`.
    pub fn qualified_path(&self, decl: &Declaration) -> String {
        let mut segments = vec![decl.core().name.clone()];
        let mut current = decl.core().containing_type;
        while let Some(id) = current {
            match self.declaration(id) {
                Some(container) => {
                    segments.push(container.core().name.clone());
                    current = container.core().containing_type;
                }
                None => break,
            }
        }
        segments.reverse();
        let path = segments.join(".");
        let scope = &decl.core().scope;
        if scope.is_empty() {
            path
        } else {
            format!("{scope}.{path}")
        }
    }

    /// Number of containing types above a declaration. Used to order the
    /// aggregation pass innermost-first.
    pub fn nesting_depth(&self, id: DeclarationId) -> usize {
        let mut depth = 0;
        let mut current = self.declaration(id).and_then(|d| d.core().containing_type);
        while let Some(c) = current {
            depth += 1;
            current = self.declaration(c).and_then(|d| d.core().containing_type);
        }
        depth
    }
}

impl Default for DeclarationGraph {
    fn default() -> Self {
        Self::new()
    }
}
