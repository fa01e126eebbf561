/// Identifier for a vertex in a [`crate::tree::Tree`].
///
/// This is an index into the tree's vertex arena, and is only meaningful
/// within the lifetime of a given `Tree` instance. The root is always `0`.
pub type VertexId = usize;

/// The root vertex of every [`crate::tree::Tree`].
pub const ROOT: VertexId = 0;
