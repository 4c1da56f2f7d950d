//! Post-parse validation of cross-entity references.
//!
//! The deserializer never range-checks indices; this pass rejects dangling
//! references before they can reach rendering code, and enforces the
//! matrix-vs-TRS exclusivity rule on nodes. The first failure aborts.

use crate::error::{GltfError, Result};
use crate::schema::Document;

fn check(entity: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(GltfError::index(entity, index, len))
    }
}

fn check_opt(entity: &'static str, index: Option<usize>, len: usize) -> Result<()> {
    match index {
        Some(i) => check(entity, i, len),
        None => Ok(()),
    }
}

/// Validate every cross-entity index in the document.
pub fn validate(doc: &Document) -> Result<()> {
    let nodes = doc.nodes.len();
    let accessors = doc.accessors.len();

    check_opt("scene", doc.scene, doc.scenes.len())?;

    for scene in &doc.scenes {
        for &node in &scene.nodes {
            check("node", node, nodes)?;
        }
    }

    for (i, node) in doc.nodes.iter().enumerate() {
        if node.has_matrix() && node.has_trs() {
            return Err(GltfError::AmbiguousTransform { node: i });
        }
        for &child in &node.children {
            check("node", child, nodes)?;
        }
        check_opt("mesh", node.mesh, doc.meshes.len())?;
        check_opt("camera", node.camera, doc.cameras.len())?;
        check_opt("skin", node.skin, doc.skins.len())?;
    }

    for mesh in &doc.meshes {
        for prim in &mesh.primitives {
            for &accessor in prim.attributes.values() {
                check("accessor", accessor, accessors)?;
            }
            check_opt("accessor", prim.indices, accessors)?;
            check_opt("material", prim.material, doc.materials.len())?;
        }
    }

    let textures = doc.textures.len();
    for material in &doc.materials {
        if let Some(pbr) = &material.pbr_metallic_roughness {
            if let Some(tex) = &pbr.base_color_texture {
                check("texture", tex.index, textures)?;
            }
            if let Some(tex) = &pbr.metallic_roughness_texture {
                check("texture", tex.index, textures)?;
            }
        }
        if let Some(tex) = &material.normal_texture {
            check("texture", tex.index, textures)?;
        }
        if let Some(tex) = &material.occlusion_texture {
            check("texture", tex.index, textures)?;
        }
        if let Some(tex) = &material.emissive_texture {
            check("texture", tex.index, textures)?;
        }
    }

    for texture in &doc.textures {
        check_opt("sampler", texture.sampler, doc.samplers.len())?;
        check_opt("image", texture.source, doc.images.len())?;
    }

    for image in &doc.images {
        check_opt("buffer view", image.buffer_view, doc.buffer_views.len())?;
    }

    for accessor in &doc.accessors {
        check_opt("buffer view", accessor.buffer_view, doc.buffer_views.len())?;
    }

    for view in &doc.buffer_views {
        check("buffer", view.buffer, doc.buffers.len())?;
    }

    for skin in &doc.skins {
        check_opt("accessor", skin.inverse_bind_matrices, accessors)?;
        check_opt("node", skin.skeleton, nodes)?;
        for &joint in &skin.joints {
            check("node", joint, nodes)?;
        }
    }

    for animation in &doc.animations {
        for channel in &animation.channels {
            check("animation sampler", channel.sampler, animation.samplers.len())?;
            check_opt("node", channel.target.node, nodes)?;
        }
        for sampler in &animation.samplers {
            check("accessor", sampler.input, accessors)?;
            check("accessor", sampler.output, accessors)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Node;

    fn parse(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn consistent_document_passes() {
        let doc = parse(
            r#"{
                "asset": {"version": "2.0"},
                "scene": 0,
                "scenes": [{"nodes": [0, 1]}],
                "nodes": [{"children": [1], "mesh": 0}, {}],
                "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "material": 0}]}],
                "materials": [{"pbrMetallicRoughness": {"baseColorTexture": {"index": 0}}}],
                "textures": [{"sampler": 0, "source": 0}],
                "images": [{"uri": "a.png"}],
                "samplers": [{}],
                "accessors": [
                    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"},
                    {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
                ],
                "bufferViews": [
                    {"buffer": 0, "byteLength": 36},
                    {"buffer": 0, "byteOffset": 36, "byteLength": 6}
                ],
                "buffers": [{"byteLength": 42}]
            }"#,
        );
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn rejects_out_of_range_scene_node() {
        let doc = parse(
            r#"{"asset": {"version": "2.0"}, "scenes": [{"nodes": [3]}], "nodes": [{}]}"#,
        );
        assert!(matches!(
            validate(&doc),
            Err(GltfError::InvalidIndex { entity: "node", index: 3, len: 1 })
        ));
    }

    #[test]
    fn rejects_out_of_range_child() {
        let doc = parse(r#"{"asset": {"version": "2.0"}, "nodes": [{"children": [1]}]}"#);
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn rejects_dangling_attribute_accessor() {
        let doc = parse(
            r#"{
                "asset": {"version": "2.0"},
                "meshes": [{"primitives": [{"attributes": {"POSITION": 7}}]}]
            }"#,
        );
        assert!(matches!(
            validate(&doc),
            Err(GltfError::InvalidIndex { entity: "accessor", index: 7, len: 0 })
        ));
    }

    #[test]
    fn rejects_dangling_buffer_reference() {
        let doc = parse(
            r#"{
                "asset": {"version": "2.0"},
                "bufferViews": [{"buffer": 2, "byteLength": 8}],
                "buffers": [{"byteLength": 8}]
            }"#,
        );
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn rejects_matrix_and_trs_on_same_node() {
        let mut doc = parse(r#"{"asset": {"version": "2.0"}}"#);
        doc.nodes.push(Node {
            matrix: Some([
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]),
            scale: Some([2.0, 2.0, 2.0]),
            ..Node::default()
        });
        assert!(matches!(
            validate(&doc),
            Err(GltfError::AmbiguousTransform { node: 0 })
        ));
    }

    #[test]
    fn rejects_channel_sampler_out_of_range() {
        let doc = parse(
            r#"{
                "asset": {"version": "2.0"},
                "nodes": [{}],
                "accessors": [
                    {"componentType": 5126, "count": 2, "type": "SCALAR"},
                    {"componentType": 5126, "count": 2, "type": "VEC3"}
                ],
                "animations": [{
                    "channels": [{"sampler": 1, "target": {"node": 0, "path": "translation"}}],
                    "samplers": [{"input": 0, "output": 1}]
                }]
            }"#,
        );
        assert!(matches!(
            validate(&doc),
            Err(GltfError::InvalidIndex { entity: "animation sampler", index: 1, len: 1 })
        ));
    }

    #[test]
    fn rejects_skin_joint_out_of_range() {
        let doc = parse(
            r#"{
                "asset": {"version": "2.0"},
                "nodes": [{}],
                "skins": [{"joints": [0, 4]}]
            }"#,
        );
        assert!(matches!(
            validate(&doc),
            Err(GltfError::InvalidIndex { entity: "node", index: 4, len: 1 })
        ));
    }
}
