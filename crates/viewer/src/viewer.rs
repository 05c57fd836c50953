//! Panorama viewer lifecycle.
//!
//! Mounting acquires, in order: renderer, sphere mesh, stop texture,
//! material, input listeners, and the first frame request. Every exit path
//! (unmount, stop change, failed setup) gives all of them back, and always
//! cancels the pending frame before anything else is released so a late
//! callback cannot reach freed resources.

use runtime::{EventBus, Frame, FrameHandle, TraceKind};
use tour::Navigator;
use tracing::{debug, info, warn};

use crate::camera::{PerspectiveCamera, Viewport};
use crate::config::ViewerConfig;
use crate::host::{
    BackendError, DrawScene, Host, InputKind, ListenerId, MaterialId, MeshId, RendererId,
    Resource, Surface, TextureId,
};
use crate::input::{CANVAS_INPUTS, PointerEvent};
use crate::mesh::SphereMesh;
use crate::orientation::OrientationController;
use crate::texture::synthesize_for;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    Backend(BackendError),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::Backend(err) => write!(f, "viewer setup failed: {err}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Backend(err) => Some(err),
        }
    }
}

impl From<BackendError> for ViewerError {
    fn from(err: BackendError) -> Self {
        ViewerError::Backend(err)
    }
}

/// Graphics resources backing one displayed stop.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Scene {
    stop_index: usize,
    renderer: RendererId,
    mesh: MeshId,
    texture: TextureId,
    material: MaterialId,
}

impl Scene {
    fn draw(&self) -> DrawScene {
        DrawScene {
            mesh: self.mesh,
            material: self.material,
        }
    }

    fn release<H: Host>(self, host: &mut H) {
        host.release(Resource::Mesh(self.mesh));
        host.release(Resource::Material(self.material));
        host.release(Resource::Texture(self.texture));
        host.release(Resource::Renderer(self.renderer));
    }
}

/// Resources acquired so far while a scene is being built.
struct PartialScene {
    renderer: RendererId,
    mesh: Option<MeshId>,
    texture: Option<TextureId>,
    material: Option<MaterialId>,
}

impl PartialScene {
    fn release<H: Host>(self, host: &mut H) {
        if let Some(mesh) = self.mesh {
            host.release(Resource::Mesh(mesh));
        }
        if let Some(material) = self.material {
            host.release(Resource::Material(material));
        }
        if let Some(texture) = self.texture {
            host.release(Resource::Texture(texture));
        }
        host.release(Resource::Renderer(self.renderer));
    }
}

pub struct Viewer {
    config: ViewerConfig,
    viewport: Viewport,
    camera: PerspectiveCamera,
    orientation: OrientationController,
    scene: Option<Scene>,
    listeners: Vec<ListenerId>,
    render_task: Option<FrameHandle>,
    frame: Frame,
    bus: EventBus,
}

impl Viewer {
    pub fn new(config: ViewerConfig, viewport: Viewport) -> Self {
        Self {
            camera: PerspectiveCamera::new(&config, viewport),
            orientation: OrientationController::new(&config),
            config,
            viewport,
            scene: None,
            listeners: Vec::new(),
            render_task: None,
            frame: Frame::first(),
            bus: EventBus::new(),
        }
    }

    /// Build the scene for the navigator's current stop and start the
    /// render loop. A mounted viewer is torn down first.
    ///
    /// On error nothing stays acquired and the viewer is left unmounted.
    pub fn mount<H: Host>(&mut self, host: &mut H, nav: &Navigator) -> Result<(), ViewerError> {
        self.teardown(host);

        let scene = match self.build_scene(host, nav) {
            Ok(scene) => scene,
            Err(err) => {
                warn!("scene setup failed: {err}");
                return Err(err.into());
            }
        };

        if let Err(err) = self.subscribe(host) {
            warn!("listener setup failed: {err}");
            for id in self.listeners.drain(..) {
                host.remove_listener(id);
            }
            scene.release(host);
            return Err(err.into());
        }

        self.orientation = OrientationController::new(&self.config);
        self.scene = Some(scene);
        self.render_task = Some(host.request_frame());
        let built = format!("built stop {}", scene.stop_index);
        self.bus.emit(self.frame, TraceKind::Scene, built);
        info!(stop = scene.stop_index, name = %nav.current_stop().name, "tour scene mounted");
        Ok(())
    }

    /// Rebuild if the navigator moved to a different stop since the scene
    /// was built. Returns whether a rebuild happened.
    pub fn sync<H: Host>(&mut self, host: &mut H, nav: &Navigator) -> Result<bool, ViewerError> {
        match self.scene {
            Some(scene) if scene.stop_index != nav.current_index() => {
                debug!(
                    from = scene.stop_index,
                    to = nav.current_index(),
                    "rebuilding tour scene"
                );
                self.mount(host, nav)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Run one frame of the render task. Callbacks carrying any handle other
    /// than the one currently held are stale and do nothing.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, handle: FrameHandle) -> bool {
        if self.render_task != Some(handle) {
            debug!(?handle, "ignoring stale frame callback");
            return false;
        }
        let Some(scene) = self.scene else {
            self.render_task = None;
            return false;
        };

        self.render_task = Some(host.request_frame());
        self.orientation.step();
        self.camera.look_toward(self.orientation.direction());
        host.render(scene.renderer, scene.draw(), &self.camera);
        self.frame = self.frame.next();
        true
    }

    /// Feed a pointer event into the camera orientation. Ignored while
    /// unmounted, since no listeners exist then.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        if self.scene.is_none() {
            return;
        }
        match event {
            PointerEvent::Down(pos) => {
                self.orientation.on_pointer_down(pos);
                self.bus.emit(self.frame, TraceKind::Input, "drag start");
            }
            PointerEvent::Move(pos) => self.orientation.on_pointer_move(pos),
            PointerEvent::Up | PointerEvent::Leave => {
                if self.orientation.is_dragging() {
                    self.bus.emit(self.frame, TraceKind::Input, "drag end");
                }
                self.orientation.on_pointer_up();
            }
        }
    }

    pub fn on_resize<H: Host>(&mut self, host: &mut H, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        if let Some(scene) = self.scene {
            host.set_size(scene.renderer, viewport);
        }
    }

    /// Stop rendering and give back every resource. Safe to call at any
    /// time, including mid-drag and when already unmounted.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        if self.teardown(host) {
            info!("tour scene unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.orientation.is_dragging()
    }

    pub fn shown_stop(&self) -> Option<usize> {
        self.scene.map(|s| s.stop_index)
    }

    pub fn render_task(&self) -> Option<FrameHandle> {
        self.render_task
    }

    pub fn orientation(&self) -> &OrientationController {
        &self.orientation
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    fn build_scene<H: Host>(&self, host: &mut H, nav: &Navigator) -> Result<Scene, BackendError> {
        let renderer = host.create_renderer(self.viewport)?;
        let mut partial = PartialScene {
            renderer,
            mesh: None,
            texture: None,
            material: None,
        };
        match self.populate(host, nav, &mut partial) {
            Ok(scene) => Ok(scene),
            Err(err) => {
                partial.release(host);
                Err(err)
            }
        }
    }

    fn populate<H: Host>(
        &self,
        host: &mut H,
        nav: &Navigator,
        partial: &mut PartialScene,
    ) -> Result<Scene, BackendError> {
        let cfg = &self.config;
        let geometry =
            SphereMesh::inside_out(cfg.sphere_radius, cfg.width_segments, cfg.height_segments);
        let mesh = host.create_mesh(&geometry)?;
        partial.mesh = Some(mesh);

        let panorama = synthesize_for(nav, &cfg.texture);
        if panorama.is_empty() {
            warn!(
                width = panorama.width,
                height = panorama.height,
                "texture canvas unavailable, using blank texture"
            );
        }
        let texture = host.create_texture(&panorama)?;
        partial.texture = Some(texture);

        let material = host.create_material(texture)?;
        partial.material = Some(material);

        Ok(Scene {
            stop_index: nav.current_index(),
            renderer: partial.renderer,
            mesh,
            texture,
            material,
        })
    }

    fn subscribe<H: Host>(&mut self, host: &mut H) -> Result<(), BackendError> {
        for kind in CANVAS_INPUTS {
            self.listeners.push(host.add_listener(Surface::Canvas, kind)?);
        }
        self.listeners
            .push(host.add_listener(Surface::Window, InputKind::Resize)?);
        Ok(())
    }

    /// Returns whether anything was mounted.
    fn teardown<H: Host>(&mut self, host: &mut H) -> bool {
        if let Some(handle) = self.render_task.take() {
            host.cancel_frame(handle);
        }
        for id in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        self.orientation.on_pointer_up();

        let Some(scene) = self.scene.take() else {
            return false;
        };
        scene.release(host);
        let released = format!("released stop {}", scene.stop_index);
        self.bus.emit(self.frame, TraceKind::Scene, released);
        true
    }
}
