use crate::constants::{MODEL_ATTRIBUTE, VIEWER_CANVAS_STYLE, VIEWER_SELECTOR};
use crate::core::camera::backing_size;
use crate::core::{LoadError, LoadProgress, SceneMesh, ViewerState};
use crate::dom;
use crate::events;
use crate::fetch;
use crate::frame::RenderLoop;
use crate::render::GpuState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// One mounted model viewer.
pub struct Viewer {
    pub(crate) state: ViewerState,
    container: web::Element,
    canvas: web::HtmlCanvasElement,
    css_size: (u32, u32),
    gpu: Option<GpuState>,
    /// Placed but not yet on the GPU.
    pending: Option<SceneMesh>,
}

impl Viewer {
    /// Place a freshly loaded mesh right away; the GPU upload follows once a
    /// device exists.
    fn accept_model(&mut self, mesh: SceneMesh) {
        if let Some(bounds) = mesh.bounds() {
            let p = self.state.place_model(&bounds);
            let fitted = bounds.transformed(p.matrix()).size();
            log::info!(
                "[viewer] model added to scene: scale={:.4} size=({:.3},{:.3},{:.3})",
                p.scale,
                fitted.x,
                fitted.y,
                fitted.z
            );
        }
        self.pending = Some(mesh);
    }

    fn frame(&mut self) {
        // Zoom or a monitor change alters the pixel ratio without resizing
        let size = dom::client_size(&self.container);
        let backing = backing_size(size.0, size.1, dom::device_pixel_ratio());
        if size != self.css_size || backing != (self.canvas.width(), self.canvas.height()) {
            self.css_size = size;
            let (w, h) = dom::sync_canvas_backing_size(&self.canvas, size.0, size.1);
            self.state.camera.set_viewport(w, h);
        }

        if let Some(g) = &mut self.gpu {
            if let Some(mesh) = self.pending.take() {
                g.upload_model(&mesh);
            }
        }

        self.state.tick();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(self.state.camera.view_projection(), self.state.model_matrix()) {
                log::error!("[gpu] render error: {:?}", e);
            }
        }
    }
}

/// Owner of a mounted viewer; dropping or disposing it stops the frame loop.
pub struct ViewerHandle {
    viewer: Rc<RefCell<Viewer>>,
    frame_loop: RenderLoop,
}

impl ViewerHandle {
    pub fn dispose(&self) {
        if !self.frame_loop.is_running() {
            return;
        }
        self.frame_loop.stop();
        let v = self.viewer.borrow();
        log::info!(
            "[viewer] disposed (model loaded: {})",
            v.gpu.as_ref().is_some_and(GpuState::has_model)
        );
    }
}

/// Mount a viewer in every designated container.
pub fn mount_all(document: &web::Document) -> Vec<ViewerHandle> {
    dom::query_all(document, VIEWER_SELECTOR)
        .into_iter()
        .filter_map(|container| match mount(document, container) {
            Ok(h) => Some(h),
            Err(e) => {
                log::error!("[viewer] mount failed: {:?}", e);
                None
            }
        })
        .collect()
}

pub fn mount(document: &web::Document, container: web::Element) -> anyhow::Result<ViewerHandle> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", VIEWER_CANVAS_STYLE);
    let css_size = dom::client_size(&container);
    let (w, h) = dom::sync_canvas_backing_size(&canvas, css_size.0, css_size.1);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewer = Rc::new(RefCell::new(Viewer {
        state: ViewerState::new(w, h),
        container: container.clone(),
        canvas: canvas.clone(),
        css_size,
        gpu: None,
        pending: None,
    }));

    events::wire_orbit_controls(&canvas, viewer.clone());

    let gpu_viewer = viewer.clone();
    spawn_local(async move {
        let canvas = gpu_viewer.borrow().canvas.clone();
        match GpuState::new(&canvas).await {
            Ok(g) => gpu_viewer.borrow_mut().gpu = Some(g),
            Err(e) => log::error!("[gpu] init error: {:?}", e),
        }
    });

    let model_path = container.get_attribute(MODEL_ATTRIBUTE);
    let load_viewer = viewer.clone();
    spawn_local(async move {
        match load_model(model_path).await {
            Ok(mesh) => load_viewer.borrow_mut().accept_model(mesh),
            Err(e) => log::error!("[viewer] Error loading model: {}", e),
        }
    });

    let frame_viewer = viewer.clone();
    let frame_loop = RenderLoop::start(move || frame_viewer.borrow_mut().frame());

    Ok(ViewerHandle { viewer, frame_loop })
}

async fn load_model(path: Option<String>) -> Result<SceneMesh, LoadError> {
    let path = path
        .filter(|p| !p.trim().is_empty())
        .ok_or(LoadError::MissingModelPath)?;
    log::info!("[viewer] Loading model from: {}", path);
    let started = Instant::now();
    let mut last_pct: Option<u32> = None;
    let mesh = fetch::load_scene(&path, |p: LoadProgress| {
        if let Some(pct) = p.percent() {
            let whole = pct.floor() as u32;
            if last_pct != Some(whole) {
                last_pct = Some(whole);
                log::info!("[viewer] Loading progress: {}%", whole);
            }
        }
    })
    .await?;
    log::info!(
        "[viewer] Model loaded successfully: {} vertices, {} triangles in {} ms",
        mesh.vertices.len(),
        mesh.triangle_count(),
        started.elapsed().as_millis()
    );
    Ok(mesh)
}
