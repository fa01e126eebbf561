use crate::{
    configuration::{ConfigKey, Configuration},
    error::{Result, RrtError},
    types::{ROOT, VertexId},
};
use std::collections::HashMap;

#[derive(Debug)]
pub struct Vertex {
    pub config: Configuration,
    pub parent: Option<VertexId>,
    pub children: Vec<VertexId>,
}

/// Rooted tree of configurations stored in an arena.
///
/// Vertices are never removed or mutated once inserted, so a [`VertexId`]
/// stays valid for the lifetime of the tree.
#[derive(Debug)]
pub struct Tree {
    vertices: Vec<Vertex>,
    index: HashMap<ConfigKey, VertexId>,
}

impl Vertex {
    fn new(config: Configuration) -> Self {
        Self {
            config,
            parent: None,
            children: Vec::with_capacity(2),
        }
    }
}

impl Tree {
    /// Creates a tree holding only `root`, stored as [`ROOT`] with no parent.
    pub fn new(root: Configuration) -> Self {
        let mut index = HashMap::new();
        index.insert(root.identity(), ROOT);
        Self {
            vertices: vec![Vertex::new(root)],
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.vertices[ROOT].config.dim()
    }

    pub fn root(&self) -> &Configuration {
        &self.vertices[ROOT].config
    }

    /// Whether `id` names a vertex of this tree.
    pub fn contains(&self, id: VertexId) -> bool {
        id < self.vertices.len()
    }

    /// Id of the vertex stored at exactly `config`, if any.
    pub fn lookup(&self, config: &Configuration) -> Option<VertexId> {
        self.index.get(&config.identity()).copied()
    }

    fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices.get(id).ok_or(RrtError::UnknownVertex(id))
    }

    /// Coordinates of vertex `id`.
    ///
    /// ### Errors
    /// [`RrtError::UnknownVertex`] if `id` is not in the tree.
    pub fn config(&self, id: VertexId) -> Result<&Configuration> {
        Ok(&self.vertex(id)?.config)
    }

    pub fn parent(&self, id: VertexId) -> Result<Option<VertexId>> {
        Ok(self.vertex(id)?.parent)
    }

    /// Direct children of `id`, in the order their edges were added.
    pub fn children(&self, id: VertexId) -> Result<&[VertexId]> {
        Ok(&self.vertex(id)?.children)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate()
    }

    /// Registers `config` as a new vertex with no parent and no children.
    ///
    /// Prefer [`Tree::add_child`], which also links the parent edge.
    ///
    /// ### Parameters
    /// - `config` - Coordinates of the new vertex; must match the root's
    ///   dimensionality.
    ///
    /// ### Returns
    /// The [`VertexId`] of the new vertex, one past the previous last id.
    ///
    /// ### Errors
    /// - [`RrtError::DimensionMismatch`] if `config` has the wrong length.
    /// - [`RrtError::DuplicateVertex`] if a vertex with the same
    ///   [`Configuration::identity`] already exists.
    pub fn insert(&mut self, config: Configuration) -> Result<VertexId> {
        if config.dim() != self.dim() {
            return Err(RrtError::DimensionMismatch {
                expected: self.dim(),
                actual: config.dim(),
            });
        }

        let key = config.identity();
        if let Some(&existing) = self.index.get(&key) {
            return Err(RrtError::DuplicateVertex { existing });
        }

        let id = self.vertices.len();
        self.vertices.push(Vertex::new(config));
        self.index.insert(key, id);
        Ok(id)
    }

    /// Links `child` under `parent`, appending it to the parent's children.
    ///
    /// `parent` must already be reachable from the root and `child` must not
    /// have a parent yet; together these keep the structure acyclic.
    ///
    /// ### Errors
    /// - [`RrtError::UnknownVertex`] if either id is absent.
    /// - [`RrtError::ParentAlreadySet`] if `child` is the root or already
    ///   linked.
    /// - [`RrtError::DetachedParent`] if `parent` is not connected to the root.
    pub fn add_edge(&mut self, parent: VertexId, child: VertexId) -> Result<()> {
        let p = self.vertex(parent)?;
        let c = self.vertex(child)?;

        if child == ROOT || c.parent.is_some() {
            return Err(RrtError::ParentAlreadySet { child });
        }
        if parent != ROOT && p.parent.is_none() {
            return Err(RrtError::DetachedParent(parent));
        }

        self.vertices[child].parent = Some(parent);
        self.vertices[parent].children.push(child);
        Ok(())
    }

    /// Inserts `config` and links it under `parent` in one step.
    ///
    /// All checks run before inserting, so a failed call leaves the tree
    /// unchanged.
    ///
    /// ### Returns
    /// The [`VertexId`] of the new child.
    ///
    /// ### Errors
    /// Any error of [`Tree::insert`] or [`Tree::add_edge`].
    pub fn add_child(&mut self, parent: VertexId, config: Configuration) -> Result<VertexId> {
        if parent != ROOT && self.vertex(parent)?.parent.is_none() {
            return Err(RrtError::DetachedParent(parent));
        }
        let id = self.insert(config)?;
        self.add_edge(parent, id)?;
        Ok(id)
    }

    /// Vertex closest to `query` by Euclidean distance.
    ///
    /// Linear scan over every vertex; ties go to the earliest inserted one.
    /// A single-vertex tree always answers [`ROOT`].
    ///
    /// ### Errors
    /// [`RrtError::DimensionMismatch`] if `query` does not match the tree's
    /// dimensionality.
    pub fn nearest(&self, query: &Configuration) -> Result<VertexId> {
        let mut best = ROOT;
        let mut best_d = f64::INFINITY;
        for (id, v) in self.vertices.iter().enumerate() {
            let d = v.config.distance(query)?;
            if d < best_d {
                best_d = d;
                best = id;
            }
        }
        Ok(best)
    }

    /// Ids from `id` up to and including the root.
    ///
    /// A vertex inserted without a parent edge yields just `[id]`.
    pub fn path_to_root(&self, id: VertexId) -> Result<Vec<VertexId>> {
        let mut path = vec![id];
        let mut current = self.vertex(id)?.parent;
        while let Some(p) = current {
            path.push(p);
            current = self.vertices[p].parent;
        }
        Ok(path)
    }
}
