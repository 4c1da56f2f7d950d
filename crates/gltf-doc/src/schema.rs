//! glTF 2.0 document model.
//!
//! Plain records mirroring the glTF 2.0 JSON schema, one flat owning array
//! per entity kind on [`Document`]. Cross-entity relationships are plain
//! indices into those arrays; absent references decode to `None`. Every
//! spec-mandated default lives in a named constant below so the serde
//! defaults cannot drift apart from the query helpers.

use glam::{Mat4, Quat, Vec3};
use indexmap::IndexMap;
use serde::Deserialize;

/// Sampler wrap mode REPEAT, the spec default for `wrapS`/`wrapT`.
pub const WRAP_REPEAT: u32 = 10497;
/// Primitive rendering mode TRIANGLES, the spec default for `mode`.
pub const MODE_TRIANGLES: u32 = 4;
/// Material alpha mode default.
pub const ALPHA_MODE_OPAQUE: &str = "OPAQUE";
/// Alpha cutoff default, applied in MASK mode.
pub const DEFAULT_ALPHA_CUTOFF: f32 = 0.5;
/// Emissive factor default (no emission).
pub const DEFAULT_EMISSIVE_FACTOR: [f32; 3] = [0.0, 0.0, 0.0];
/// Base color factor default (opaque white).
pub const DEFAULT_BASE_COLOR_FACTOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Metallic factor default.
pub const DEFAULT_METALLIC_FACTOR: f32 = 1.0;
/// Roughness factor default.
pub const DEFAULT_ROUGHNESS_FACTOR: f32 = 1.0;
/// Normal map scale default.
pub const DEFAULT_NORMAL_SCALE: f32 = 1.0;
/// Occlusion strength default.
pub const DEFAULT_OCCLUSION_STRENGTH: f32 = 1.0;
/// Animation sampler interpolation default.
pub const INTERPOLATION_LINEAR: &str = "LINEAR";

// Accessor component type constants.
pub const COMPONENT_BYTE: u32 = 5120;
pub const COMPONENT_UNSIGNED_BYTE: u32 = 5121;
pub const COMPONENT_SHORT: u32 = 5122;
pub const COMPONENT_UNSIGNED_SHORT: u32 = 5123;
pub const COMPONENT_UNSIGNED_INT: u32 = 5125;
pub const COMPONENT_FLOAT: u32 = 5126;

/// Root glTF document.
///
/// Built once by [`crate::from_str`] and read-only afterwards. A top-level
/// array key absent from the input yields an empty vector, never an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Asset metadata. The only required top-level field.
    pub asset: Asset,
    /// Default scene index.
    #[serde(default)]
    pub scene: Option<usize>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub samplers: Vec<Sampler>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub buffers: Vec<Buffer>,
    #[serde(default)]
    pub skins: Vec<Skin>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

/// Asset metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// glTF version string. Required.
    pub version: String,
    /// Minimum glTF version required to load this asset.
    #[serde(default)]
    pub min_version: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            min_version: None,
            generator: None,
            copyright: None,
        }
    }
}

/// A scene: a set of root node indices.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: Option<String>,
    /// Root node indices into `Document::nodes`.
    #[serde(default)]
    pub nodes: Vec<usize>,
}

/// A node in the scene graph.
///
/// A node legally carries either an explicit column-major `matrix` or
/// decomposed TRS properties, never both. The deserializer does not enforce
/// this; [`crate::validate`] rejects documents that violate it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: Option<String>,
    /// Child node indices into `Document::nodes`.
    #[serde(default)]
    pub children: Vec<usize>,
    #[serde(default)]
    pub mesh: Option<usize>,
    #[serde(default)]
    pub camera: Option<usize>,
    #[serde(default)]
    pub skin: Option<usize>,
    /// Explicit local transformation matrix (column-major).
    #[serde(default)]
    pub matrix: Option<[f32; 16]>,
    #[serde(default)]
    pub translation: Option<[f32; 3]>,
    /// Rotation quaternion as `[x, y, z, w]`.
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    /// Morph target weights.
    #[serde(default)]
    pub weights: Vec<f32>,
}

impl Node {
    /// Whether the node carries an explicit transformation matrix.
    pub fn has_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    /// Whether the node carries any explicit TRS property.
    pub fn has_trs(&self) -> bool {
        self.translation.is_some() || self.rotation.is_some() || self.scale.is_some()
    }

    /// Local transform: the explicit matrix if present, otherwise the TRS
    /// composition. Identity when nothing is specified.
    pub fn local_matrix(&self) -> Mat4 {
        if let Some(m) = &self.matrix {
            return Mat4::from_cols_array(m);
        }
        let translation = self.translation.map(Vec3::from).unwrap_or(Vec3::ZERO);
        let rotation = self
            .rotation
            .map(|r| Quat::from_xyzw(r[0], r[1], r[2], r[3]))
            .unwrap_or(Quat::IDENTITY);
        let scale = self.scale.map(Vec3::from).unwrap_or(Vec3::ONE);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }
}

/// A mesh: one or more primitives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub name: Option<String>,
    /// Mesh primitives. Required.
    pub primitives: Vec<MeshPrimitive>,
    /// Morph target weights.
    #[serde(default)]
    pub weights: Vec<f32>,
}

/// A single drawable primitive of a mesh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeshPrimitive {
    /// Vertex attributes: semantic name ("POSITION", "NORMAL",
    /// "TEXCOORD_0", ...) to accessor index. Decoded from a JSON object
    /// with insertion order preserved.
    pub attributes: IndexMap<String, usize>,
    /// Index accessor.
    #[serde(default)]
    pub indices: Option<usize>,
    /// Material index.
    #[serde(default)]
    pub material: Option<usize>,
    /// Rendering mode (0=POINTS, 1=LINES, 4=TRIANGLES, ...).
    #[serde(default = "default_primitive_mode")]
    pub mode: u32,
}

impl Default for MeshPrimitive {
    fn default() -> Self {
        Self {
            attributes: IndexMap::new(),
            indices: None,
            material: None,
            mode: MODE_TRIANGLES,
        }
    }
}

impl MeshPrimitive {
    /// Look up an attribute accessor by semantic name.
    pub fn attribute(&self, semantic: &str) -> Option<usize> {
        self.attributes.get(semantic).copied()
    }
}

fn default_primitive_mode() -> u32 {
    MODE_TRIANGLES
}

/// A PBR metallic-roughness material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(default)]
    pub normal_texture: Option<NormalTextureInfo>,
    #[serde(default)]
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    #[serde(default)]
    pub emissive_texture: Option<TextureInfo>,
    #[serde(default = "default_emissive_factor")]
    pub emissive_factor: [f32; 3],
    /// "OPAQUE", "MASK", or "BLEND".
    #[serde(default = "default_alpha_mode")]
    pub alpha_mode: String,
    /// Alpha cutoff, only meaningful in MASK mode.
    #[serde(default = "default_alpha_cutoff")]
    pub alpha_cutoff: f32,
    #[serde(default)]
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            pbr_metallic_roughness: None,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: DEFAULT_EMISSIVE_FACTOR,
            alpha_mode: ALPHA_MODE_OPAQUE.to_string(),
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            double_sided: false,
        }
    }
}

fn default_emissive_factor() -> [f32; 3] {
    DEFAULT_EMISSIVE_FACTOR
}

fn default_alpha_mode() -> String {
    ALPHA_MODE_OPAQUE.to_string()
}

fn default_alpha_cutoff() -> f32 {
    DEFAULT_ALPHA_CUTOFF
}

/// PBR metallic-roughness parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(default = "default_base_color_factor")]
    pub base_color_factor: [f32; 4],
    #[serde(default)]
    pub base_color_texture: Option<TextureInfo>,
    #[serde(default = "default_metallic_factor")]
    pub metallic_factor: f32,
    #[serde(default = "default_roughness_factor")]
    pub roughness_factor: f32,
    #[serde(default)]
    pub metallic_roughness_texture: Option<TextureInfo>,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: DEFAULT_BASE_COLOR_FACTOR,
            base_color_texture: None,
            metallic_factor: DEFAULT_METALLIC_FACTOR,
            roughness_factor: DEFAULT_ROUGHNESS_FACTOR,
            metallic_roughness_texture: None,
        }
    }
}

fn default_base_color_factor() -> [f32; 4] {
    DEFAULT_BASE_COLOR_FACTOR
}

fn default_metallic_factor() -> f32 {
    DEFAULT_METALLIC_FACTOR
}

fn default_roughness_factor() -> f32 {
    DEFAULT_ROUGHNESS_FACTOR
}

/// Reference from a material to a texture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    /// Texture index. Required.
    pub index: usize,
    /// Texture coordinate set.
    #[serde(default)]
    pub tex_coord: u32,
}

/// Normal map reference with an extra scale factor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTextureInfo {
    /// Texture index. Required.
    pub index: usize,
    #[serde(default)]
    pub tex_coord: u32,
    #[serde(default = "default_normal_scale")]
    pub scale: f32,
}

fn default_normal_scale() -> f32 {
    DEFAULT_NORMAL_SCALE
}

/// Occlusion map reference with an extra strength factor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionTextureInfo {
    /// Texture index. Required.
    pub index: usize,
    #[serde(default)]
    pub tex_coord: u32,
    #[serde(default = "default_occlusion_strength")]
    pub strength: f32,
}

fn default_occlusion_strength() -> f32 {
    DEFAULT_OCCLUSION_STRENGTH
}

/// A texture: a sampler applied to an image source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Texture {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sampler: Option<usize>,
    /// Image source index.
    #[serde(default)]
    pub source: Option<usize>,
}

/// An image, referenced by URI or buffer view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub buffer_view: Option<usize>,
}

/// A texture sampler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    #[serde(default)]
    pub name: Option<String>,
    /// Magnification filter; no spec default.
    #[serde(default)]
    pub mag_filter: Option<u32>,
    /// Minification filter; no spec default.
    #[serde(default)]
    pub min_filter: Option<u32>,
    #[serde(default = "default_wrap_mode")]
    pub wrap_s: u32,
    #[serde(default = "default_wrap_mode")]
    pub wrap_t: u32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            name: None,
            mag_filter: None,
            min_filter: None,
            wrap_s: WRAP_REPEAT,
            wrap_t: WRAP_REPEAT,
        }
    }
}

fn default_wrap_mode() -> u32 {
    WRAP_REPEAT
}

/// An accessor for typed data stored in a buffer view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default)]
    pub name: Option<String>,
    /// Buffer view index. Absent for sparse-only accessors.
    #[serde(default)]
    pub buffer_view: Option<usize>,
    /// Byte offset within the buffer view.
    #[serde(default)]
    pub byte_offset: usize,
    /// Component type (5120=BYTE ... 5126=FLOAT). Required.
    pub component_type: u32,
    /// Number of elements. Required.
    pub count: usize,
    /// Element type ("SCALAR", "VEC2", ..., "MAT4"). Required.
    #[serde(rename = "type")]
    pub accessor_type: String,
    #[serde(default)]
    pub normalized: bool,
    /// Per-component minimum values.
    #[serde(default)]
    pub min: Vec<f64>,
    /// Per-component maximum values.
    #[serde(default)]
    pub max: Vec<f64>,
}

impl Accessor {
    /// Byte size of a single component.
    pub fn component_size(&self) -> usize {
        match self.component_type {
            COMPONENT_BYTE | COMPONENT_UNSIGNED_BYTE => 1,
            COMPONENT_SHORT | COMPONENT_UNSIGNED_SHORT => 2,
            _ => 4,
        }
    }

    /// Number of components per element.
    pub fn component_count(&self) -> usize {
        match self.accessor_type.as_str() {
            "SCALAR" => 1,
            "VEC2" => 2,
            "VEC3" => 3,
            "VEC4" | "MAT2" => 4,
            "MAT3" => 9,
            "MAT4" => 16,
            _ => 1,
        }
    }

    /// Tightly-packed byte size of all elements.
    pub fn byte_size(&self) -> usize {
        self.count * self.component_count() * self.component_size()
    }
}

/// A contiguous, optionally strided, byte range within a buffer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default)]
    pub name: Option<String>,
    /// Buffer index. Required.
    pub buffer: usize,
    /// Byte offset into the buffer.
    #[serde(default)]
    pub byte_offset: usize,
    /// Byte length. Required.
    pub byte_length: usize,
    /// Byte stride for interleaved vertex data.
    #[serde(default)]
    pub byte_stride: Option<usize>,
    /// GPU binding target hint (34962=ARRAY_BUFFER, 34963=ELEMENT_ARRAY_BUFFER).
    #[serde(default)]
    pub target: Option<u32>,
}

/// Raw binary storage. Decoding its bytes is outside this crate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(default)]
    pub name: Option<String>,
    /// Byte length. Required.
    pub byte_length: usize,
    /// URI of the backing bytes (data URI or external file); absent for the
    /// binary chunk of a container format.
    #[serde(default)]
    pub uri: Option<String>,
}

/// A skin for skeletal animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    #[serde(default)]
    pub name: Option<String>,
    /// Accessor holding the inverse bind matrices.
    #[serde(default)]
    pub inverse_bind_matrices: Option<usize>,
    /// Skeleton root node.
    #[serde(default)]
    pub skeleton: Option<usize>,
    /// Joint node indices. Required.
    pub joints: Vec<usize>,
}

/// A keyframe animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub name: Option<String>,
    /// Channels routing sampler output to node properties. Required.
    pub channels: Vec<AnimationChannel>,
    /// Keyframe samplers, indexed per-animation by the channels. Required.
    pub samplers: Vec<AnimationSampler>,
}

/// Connects an animation sampler to the property it animates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationChannel {
    /// Sampler index within the owning animation. Required.
    pub sampler: usize,
    pub target: AnimationTarget,
}

/// The node property driven by an animation channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationTarget {
    #[serde(default)]
    pub node: Option<usize>,
    /// "translation", "rotation", "scale", or "weights". Required.
    pub path: String,
}

/// Keyframe input/output accessor pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationSampler {
    /// Keyframe time accessor. Required.
    pub input: usize,
    /// Keyframe value accessor. Required.
    pub output: usize,
    /// "LINEAR", "STEP", or "CUBICSPLINE".
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
}

fn default_interpolation() -> String {
    INTERPOLATION_LINEAR.to_string()
}

/// A camera, either perspective or orthographic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    #[serde(default)]
    pub name: Option<String>,
    /// "perspective" or "orthographic". Required.
    #[serde(rename = "type")]
    pub camera_type: String,
    #[serde(default)]
    pub perspective: Option<PerspectiveCamera>,
    #[serde(default)]
    pub orthographic: Option<OrthographicCamera>,
}

/// Perspective projection parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveCamera {
    #[serde(default)]
    pub aspect_ratio: Option<f32>,
    /// Vertical field of view in radians. Required.
    pub yfov: f32,
    /// Near clipping plane. Required.
    pub znear: f32,
    /// Far clipping plane; infinite projection when absent.
    #[serde(default)]
    pub zfar: Option<f32>,
}

/// Orthographic projection parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrthographicCamera {
    pub xmag: f32,
    pub ymag: f32,
    pub znear: f32,
    pub zfar: f32,
}
