//! Error types for gltf-doc.

use thiserror::Error;

/// Result type for gltf-doc operations.
pub type Result<T> = std::result::Result<T, GltfError>;

/// Errors that can occur while decoding or querying a glTF document.
///
/// There is no local recovery anywhere in this crate: the first error aborts
/// the whole operation and the caller is expected to reject the asset.
#[derive(Debug, Error)]
pub enum GltfError {
    /// Malformed JSON text, or a required field that is missing or has the
    /// wrong JSON type. Propagated unmodified from the deserializer.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cross-entity index points past the end of the owning array.
    #[error("{entity} index {index} out of range (array has {len} entries)")]
    InvalidIndex {
        /// Entity kind the index was supposed to name.
        entity: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the array being indexed.
        len: usize,
    },

    /// An accessor being resolved does not name a buffer view.
    #[error("accessor {accessor} has no buffer view")]
    MissingBufferView {
        /// Index of the accessor in `Document::accessors`.
        accessor: usize,
    },

    /// A node specifies both an explicit matrix and TRS properties.
    #[error("node {node} specifies both a matrix and translation/rotation/scale")]
    AmbiguousTransform {
        /// Index of the node in `Document::nodes`.
        node: usize,
    },
}

impl GltfError {
    /// Create an out-of-range index error.
    pub fn index(entity: &'static str, index: usize, len: usize) -> Self {
        Self::InvalidIndex { entity, index, len }
    }
}
