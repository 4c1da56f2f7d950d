//! gltf-doc: typed glTF 2.0 document model with accessor resolution.
//!
//! This crate turns glTF 2.0 JSON text into a strongly-typed, read-only
//! [`Document`] and answers the one non-trivial query a loader needs: which
//! byte range backs a given accessor (the Accessor → BufferView → Buffer
//! chain). It is a preprocessing stage for a renderer or asset loader; the
//! caller supplies the JSON text and is responsible for fetching any
//! buffer or image bytes the document refers to.
//!
//! # Quick start
//!
//! ```
//! let doc = gltf_doc::from_str(r#"{
//!     "asset": {"version": "2.0"},
//!     "accessors": [{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"}],
//!     "bufferViews": [{"buffer": 0, "byteLength": 36}],
//!     "buffers": [{"byteLength": 36, "uri": "mesh.bin"}]
//! }"#)?;
//!
//! let resolved = doc.resolve_accessor(0)?;
//! assert_eq!(resolved.buffer.byte_length, 36);
//! # Ok::<(), gltf_doc::GltfError>(())
//! ```
//!
//! # Scope
//!
//! Decoding buffer bytes (component types, strides), loading URIs, binary
//! container (.glb) unpacking, and extension/"extras" fields are out of
//! scope; unknown JSON keys are ignored. Any parse or resolution failure
//! means the asset should be rejected — no partial documents are produced.

pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use error::{GltfError, Result};
pub use resolve::ResolvedAccessor;
pub use schema::Document;
pub use validate::validate;

/// Parse glTF JSON text into a validated [`Document`].
///
/// Every cross-entity index is checked against the owning array before the
/// document is returned; see [`validate`]. Use
/// `serde_json::from_str::<Document>` directly to skip validation.
pub fn from_str(text: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(text)?;
    validate(&doc)?;
    Ok(doc)
}

/// Parse glTF JSON bytes into a validated [`Document`].
pub fn from_slice(data: &[u8]) -> Result<Document> {
    let doc: Document = serde_json::from_slice(data)?;
    validate(&doc)?;
    Ok(doc)
}
