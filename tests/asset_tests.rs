// Host-side tests for glTF flattening and buffer resolution.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod asset {
        include!("../src/core/asset.rs");
    }
}

use crate::core::asset::*;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use glam::Vec3;

/// One triangle in the XY plane: three f32 positions then three u16 indices.
fn triangle_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        out.extend_from_slice(&i.to_le_bytes());
    }
    out
}

struct Doc<'a> {
    uri: String,
    nodes: &'a str,
    scene_nodes: &'a str,
    mode: u32,
    base_color: [f32; 4],
}

impl Default for Doc<'_> {
    fn default() -> Self {
        Self {
            uri: format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(triangle_bytes())
            ),
            nodes: r#"[{"mesh":0}]"#,
            scene_nodes: "[0]",
            mode: 4,
            base_color: [1.0; 4],
        }
    }
}

impl Doc<'_> {
    fn json(&self) -> String {
        let c = self.base_color;
        format!(
            r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": {scene_nodes}}}],
  "nodes": {nodes},
  "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}, "indices": 1, "mode": {mode}, "material": 0}}]}}],
  "materials": [{{"pbrMetallicRoughness": {{"baseColorFactor": [{r}, {g}, {b}, {a}]}}}}],
  "buffers": [{{"uri": "{uri}", "byteLength": 42}}],
  "bufferViews": [
    {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
    {{"buffer": 0, "byteOffset": 36, "byteLength": 6}}
  ],
  "accessors": [
    {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0]}},
    {{"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}}
  ]
}}"#,
            scene_nodes = self.scene_nodes,
            nodes = self.nodes,
            mode = self.mode,
            uri = self.uri,
            r = c[0],
            g = c[1],
            b = c[2],
            a = c[3],
        )
    }

    fn parse(&self) -> gltf::Gltf {
        gltf::Gltf::from_slice(self.json().as_bytes()).expect("valid glTF")
    }
}

/// Resolve embedded buffers the way the loader does, then flatten.
fn load(doc: &Doc<'_>) -> Result<SceneMesh, LoadError> {
    let gltf = doc.parse();
    let mut buffers = Vec::new();
    for b in gltf.document.buffers() {
        let data = match buffer_source(&b)? {
            BufferSource::Embedded(bytes) => bytes,
            other => panic!("unexpected source {other:?}"),
        };
        check_buffer(&b, &data)?;
        buffers.push(data);
    }
    build_scene_mesh(&gltf.document, &buffers)
}

#[test]
fn single_triangle_without_normals_gets_face_normal() {
    let mesh = load(&Doc::default()).unwrap();
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
    for v in &mesh.vertices {
        assert!(Vec3::from(v.nrm).abs_diff_eq(Vec3::Z, 1e-6));
        assert_eq!(v.color, [1.0; 4]);
    }
}

#[test]
fn node_transforms_are_applied() {
    let doc = Doc {
        nodes: r#"[{"mesh":0, "translation":[10, 0, 0], "scale":[2, 2, 2]}]"#,
        ..Doc::default()
    };
    let b = load(&doc).unwrap().bounds().unwrap();
    assert_eq!(b.min, Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(b.max, Vec3::new(12.0, 2.0, 0.0));
}

#[test]
fn child_nodes_inherit_parent_transform() {
    let doc = Doc {
        nodes: r#"[{"translation":[0, 5, 0], "children":[1]}, {"mesh":0, "translation":[1, 0, 0]}]"#,
        ..Doc::default()
    };
    let b = load(&doc).unwrap().bounds().unwrap();
    assert_eq!(b.min, Vec3::new(1.0, 5.0, 0.0));
}

#[test]
fn instanced_meshes_are_merged_with_offset_indices() {
    let doc = Doc {
        nodes: r#"[{"mesh":0}, {"mesh":0, "translation":[0, 0, -3]}]"#,
        scene_nodes: "[0, 1]",
        ..Doc::default()
    };
    let mesh = load(&doc).unwrap();
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.triangle_count(), 2);
    let mut ix = mesh.indices.clone();
    ix.sort_unstable();
    assert_eq!(ix, vec![0, 1, 2, 3, 4, 5]);
    let b = mesh.bounds().unwrap();
    assert_eq!(b.min.z, -3.0);
}

#[test]
fn base_color_factor_tints_vertices() {
    let doc = Doc {
        base_color: [1.0, 0.5, 0.0, 1.0],
        ..Doc::default()
    };
    let mesh = load(&doc).unwrap();
    assert_eq!(mesh.vertices[0].color, [1.0, 0.5, 0.0, 1.0]);
}

#[test]
fn scene_without_meshes_is_empty() {
    let doc = Doc {
        nodes: r#"[{"translation":[1, 2, 3]}]"#,
        ..Doc::default()
    };
    assert!(matches!(load(&doc), Err(LoadError::EmptyScene)));
}

#[test]
fn non_triangle_primitives_are_skipped() {
    let doc = Doc {
        mode: 1,
        ..Doc::default()
    };
    assert!(matches!(load(&doc), Err(LoadError::EmptyScene)));
}

#[test]
fn external_buffers_are_left_for_the_fetcher() {
    let doc = Doc {
        uri: "tri.bin".into(),
        ..Doc::default()
    };
    let gltf = doc.parse();
    let b = gltf.document.buffers().next().unwrap();
    assert_eq!(buffer_source(&b).unwrap(), BufferSource::External("tri.bin"));
}

#[test]
fn short_buffer_is_rejected() {
    let gltf = Doc::default().parse();
    let b = gltf.document.buffers().next().unwrap();
    let err = check_buffer(&b, &triangle_bytes()[..20]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::BufferTooShort {
            index: 0,
            declared: 42,
            actual: 20
        }
    ));
}

#[test]
fn data_uri_must_be_base64() {
    assert!(matches!(
        decode_data_uri("data:application/octet-stream,AAAA", 2),
        Err(LoadError::UnsupportedDataUri { index: 2 })
    ));
    assert!(matches!(
        decode_data_uri("data:application/octet-stream;base64,@@@", 0),
        Err(LoadError::DataUri { index: 0, .. })
    ));
    assert_eq!(
        decode_data_uri("data:application/octet-stream;base64,AQID", 0).unwrap(),
        vec![1, 2, 3]
    );
}

#[test]
fn garbage_is_a_parse_error() {
    let err: LoadError = gltf::Gltf::from_slice(b"definitely not a model")
        .unwrap_err()
        .into();
    assert!(matches!(err, LoadError::Parse(_)));
    assert!(err.to_string().starts_with("invalid glTF"));
}

#[test]
fn progress_needs_a_known_total() {
    let p = LoadProgress {
        loaded: 50,
        total: Some(200),
    };
    assert_eq!(p.ratio(), Some(0.25));
    assert_eq!(p.percent(), Some(25.0));
    assert_eq!(LoadProgress { loaded: 5, total: None }.percent(), None);
    assert_eq!(LoadProgress { loaded: 5, total: Some(0) }.ratio(), None);
}

#[test]
fn loaded_mesh_is_placed_without_a_gpu() {
    use crate::core::constants::MODEL_FIT_EXTENT;
    use crate::core::scene::ViewerState;

    let doc = Doc {
        nodes: r#"[{"mesh":0, "translation":[10, 0, 0], "scale":[4, 4, 4]}]"#,
        ..Doc::default()
    };
    let mesh = load(&doc).unwrap();
    let mut state = ViewerState::new(320, 240);
    let p = state.place_model(&mesh.bounds().unwrap());
    assert!((p.scale * 4.0 - MODEL_FIT_EXTENT).abs() < 1e-5);
    assert!(state.model().is_some());
}
