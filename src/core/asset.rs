use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use glam::{Mat3, Mat4, Vec3};
use gltf::mesh::Mode;

use super::scene::Aabb;

/// Why a model could not be shown.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("viewer has no model path attribute")]
    MissingModelPath,
    #[error("fetch {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("fetch {url} returned HTTP {status}")]
    Http { url: String, status: u16 },
    #[error("invalid glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("buffer {index} refers to the GLB chunk but the file has none")]
    MissingBlob { index: usize },
    #[error("unsupported data URI for buffer {index}")]
    UnsupportedDataUri { index: usize },
    #[error("bad base64 in buffer {index}: {source}")]
    DataUri {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
    #[error("buffer {index} holds {actual} bytes, glTF declares {declared}")]
    BufferTooShort {
        index: usize,
        declared: usize,
        actual: usize,
    },
    #[error("scene has no drawable triangles")]
    EmptyScene,
}

/// Byte progress of one model fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub loaded: u64,
    /// From `Content-Length`; `None` when the server did not send it.
    pub total: Option<u64>,
}

impl LoadProgress {
    #[inline]
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(t) if t > 0 => Some(self.loaded as f64 / t as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn percent(&self) -> Option<f64> {
        self.ratio().map(|r| r * 100.0)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    pub color: [f32; 4],
}

/// All triangles of a glTF scene in model space, ready for one draw call.
#[derive(Clone, Debug, Default)]
pub struct SceneMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SceneMesh {
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| Vec3::from(v.pos)))
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Where the bytes of a glTF buffer come from.
#[derive(Debug, PartialEq, Eq)]
pub enum BufferSource<'a> {
    /// The binary chunk of a `.glb`.
    Blob,
    /// Decoded `data:` URI.
    Embedded(Vec<u8>),
    /// URI to fetch, relative to the model file.
    External(&'a str),
}

pub fn buffer_source<'a>(buffer: &gltf::Buffer<'a>) -> Result<BufferSource<'a>, LoadError> {
    match buffer.source() {
        gltf::buffer::Source::Bin => Ok(BufferSource::Blob),
        gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
            decode_data_uri(uri, buffer.index()).map(BufferSource::Embedded)
        }
        gltf::buffer::Source::Uri(uri) => Ok(BufferSource::External(uri)),
    }
}

/// Decode `data:[<mime>];base64,<payload>`.
pub fn decode_data_uri(uri: &str, index: usize) -> Result<Vec<u8>, LoadError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(LoadError::UnsupportedDataUri { index })?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or(LoadError::UnsupportedDataUri { index })?;
    if !meta.ends_with(";base64") {
        return Err(LoadError::UnsupportedDataUri { index });
    }
    BASE64
        .decode(payload.as_bytes())
        .map_err(|source| LoadError::DataUri { index, source })
}

/// Reject buffers shorter than declared; accessor reads would go out of range.
pub fn check_buffer(buffer: &gltf::Buffer<'_>, data: &[u8]) -> Result<(), LoadError> {
    if data.len() < buffer.length() {
        return Err(LoadError::BufferTooShort {
            index: buffer.index(),
            declared: buffer.length(),
            actual: data.len(),
        });
    }
    Ok(())
}

/// Flatten the default scene (or the first scene) into one mesh, applying
/// node transforms. `buffers[i]` holds the bytes of buffer `i`.
pub fn build_scene_mesh(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<SceneMesh, LoadError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(LoadError::EmptyScene)?;

    let mut out = SceneMesh::default();
    let mut stack: Vec<(gltf::Node, Mat4)> =
        scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
    while let Some((node, parent)) = stack.pop() {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            for prim in mesh.primitives() {
                append_primitive(&prim, world, buffers, &mut out);
            }
        }
        for child in node.children() {
            stack.push((child, world));
        }
    }

    if out.vertices.is_empty() || out.indices.is_empty() {
        return Err(LoadError::EmptyScene);
    }
    Ok(out)
}

fn append_primitive(
    prim: &gltf::Primitive<'_>,
    world: Mat4,
    buffers: &[Vec<u8>],
    out: &mut SceneMesh,
) {
    if prim.mode() != Mode::Triangles {
        log::warn!("[asset] skipping primitive with mode {:?}", prim.mode());
        return;
    }
    let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.as_slice()));
    let pos: Vec<Vec3> = match reader.read_positions() {
        Some(it) => it.map(|p| world.transform_point3(Vec3::from(p))).collect(),
        None => return,
    };
    let local_indices: Vec<u32> = match reader.read_indices() {
        Some(ix) => ix.into_u32().collect(),
        None => (0..pos.len() as u32).collect(),
    };
    if local_indices.iter().any(|&i| i as usize >= pos.len()) {
        log::warn!("[asset] skipping primitive with out-of-range indices");
        return;
    }

    let normal_mat = Mat3::from_mat4(world).inverse().transpose();
    let nrm: Vec<Vec3> = match reader.read_normals() {
        Some(it) => it
            .map(|n| (normal_mat * Vec3::from(n)).normalize_or_zero())
            .collect(),
        None => face_normals(&pos, &local_indices),
    };
    let base = prim.material().pbr_metallic_roughness().base_color_factor();
    let colors: Option<Vec<[f32; 4]>> = reader.read_colors(0).map(|c| c.into_rgba_f32().collect());

    let start = out.vertices.len() as u32;
    for (i, p) in pos.iter().enumerate() {
        let vc = colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or([1.0; 4]);
        out.vertices.push(MeshVertex {
            pos: p.to_array(),
            nrm: nrm.get(i).copied().unwrap_or(Vec3::Y).to_array(),
            color: [
                base[0] * vc[0],
                base[1] * vc[1],
                base[2] * vc[2],
                base[3] * vc[3],
            ],
        });
    }
    let whole = local_indices.len() - local_indices.len() % 3;
    out.indices
        .extend(local_indices[..whole].iter().map(|&i| start + i));
}

/// Area-weighted vertex normals for primitives that ship without any.
fn face_normals(pos: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; pos.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (pos[b] - pos[a]).cross(pos[c] - pos[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}
