//! Accessor resolution: the Accessor → BufferView → Buffer chain.

use crate::error::{GltfError, Result};
use crate::schema::{Accessor, Buffer, BufferView, Document};

/// Borrowed view of the three-hop chain behind an accessor.
///
/// Identifies the byte range backing an accessor's data; interpreting those
/// bytes (component types, stride) is the consumer's job.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAccessor<'a> {
    pub accessor: &'a Accessor,
    /// The buffer view named by `accessor.buffer_view`.
    pub view: &'a BufferView,
    /// The buffer named by `view.buffer`.
    pub buffer: &'a Buffer,
}

impl Document {
    /// Resolve an accessor index to its backing buffer view and buffer.
    ///
    /// Fails if any hop in the chain is out of range or the accessor does
    /// not name a buffer view. Documents that passed [`crate::validate`]
    /// only fail here when `index` itself is bad.
    pub fn resolve_accessor(&self, index: usize) -> Result<ResolvedAccessor<'_>> {
        let accessor = self
            .accessors
            .get(index)
            .ok_or_else(|| GltfError::index("accessor", index, self.accessors.len()))?;

        let view_index = accessor
            .buffer_view
            .ok_or(GltfError::MissingBufferView { accessor: index })?;
        let view = self
            .buffer_views
            .get(view_index)
            .ok_or_else(|| GltfError::index("buffer view", view_index, self.buffer_views.len()))?;

        let buffer = self
            .buffers
            .get(view.buffer)
            .ok_or_else(|| GltfError::index("buffer", view.buffer, self.buffers.len()))?;

        Ok(ResolvedAccessor {
            accessor,
            view,
            buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chained_document() -> Document {
        serde_json::from_str(
            r#"{
                "asset": {"version": "2.0"},
                "accessors": [
                    {"bufferView": 2, "componentType": 5126, "count": 4, "type": "VEC3"},
                    {"componentType": 5126, "count": 4, "type": "VEC3"}
                ],
                "bufferViews": [
                    {"buffer": 0, "byteLength": 8},
                    {"buffer": 0, "byteLength": 8},
                    {"buffer": 1, "byteLength": 48}
                ],
                "buffers": [
                    {"byteLength": 16},
                    {"byteLength": 48}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn three_hop_chain() {
        let doc = chained_document();
        let resolved = doc.resolve_accessor(0).unwrap();
        assert_eq!(resolved.view.buffer, 1);
        assert_eq!(resolved.buffer.byte_length, doc.buffers[1].byte_length);
        assert_eq!(resolved.accessor.count, 4);
    }

    #[test]
    fn accessor_index_out_of_range() {
        let doc = chained_document();
        match doc.resolve_accessor(5) {
            Err(GltfError::InvalidIndex { entity, index, len }) => {
                assert_eq!(entity, "accessor");
                assert_eq!(index, 5);
                assert_eq!(len, 2);
            }
            other => panic!("expected InvalidIndex, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn accessor_without_buffer_view() {
        let doc = chained_document();
        assert!(matches!(
            doc.resolve_accessor(1),
            Err(GltfError::MissingBufferView { accessor: 1 })
        ));
    }

    #[test]
    fn dangling_view_reference() {
        let mut doc = chained_document();
        doc.accessors[0].buffer_view = Some(9);
        assert!(matches!(
            doc.resolve_accessor(0),
            Err(GltfError::InvalidIndex { entity: "buffer view", index: 9, .. })
        ));
    }
}
