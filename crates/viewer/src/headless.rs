//! In-memory [`Host`](crate::host::Host) that records every call.
//!
//! Used by the CLI to drive the viewer without a window and by tests to
//! check acquisition/release discipline and call ordering.

use std::collections::{BTreeMap, BTreeSet};

use runtime::{FrameHandle, FrameScheduler, ManualFrameScheduler};

use crate::camera::{Mat4, PerspectiveCamera, Viewport};
use crate::host::{
    BackendError, DrawScene, GraphicsBackend, InputKind, InputTarget, ListenerId, MaterialId,
    MeshId, RendererId, Resource, ResourceKind, Surface, TextureId,
};
use crate::mesh::SphereMesh;
use crate::texture::{PanoramaTexture, TextRun};
use crate::viewer::Viewer;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create(Resource),
    Release(Resource),
    SetSize(RendererId, Viewport),
    Render(RendererId),
    AddListener(ListenerId, Surface, InputKind),
    RemoveListener(ListenerId),
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
}

/// What the host saw of an uploaded texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureUpload {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
    pub blank: bool,
    pub text: Vec<TextRun>,
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    frames: ManualFrameScheduler,
    next_id: u64,
    live: BTreeSet<Resource>,
    listeners: BTreeMap<ListenerId, (Surface, InputKind)>,
    calls: Vec<HostCall>,
    uploads: Vec<TextureUpload>,
    fail_on: Option<ResourceKind>,
    stray_releases: usize,
    last_camera: Option<PerspectiveCamera>,
    last_view_proj: Option<Mat4>,
    renderer_sizes: BTreeMap<RendererId, Viewport>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent creation of `kind` fail.
    pub fn fail_on(&mut self, kind: ResourceKind) {
        self.fail_on = Some(kind);
    }

    pub fn clear_failure(&mut self) {
        self.fail_on = None;
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn live_resources(&self) -> &BTreeSet<Resource> {
        &self.live
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Releases of resources that were not live (double free or unknown id).
    pub fn stray_releases(&self) -> usize {
        self.stray_releases
    }

    pub fn uploads(&self) -> &[TextureUpload] {
        &self.uploads
    }

    pub fn last_camera(&self) -> Option<&PerspectiveCamera> {
        self.last_camera.as_ref()
    }

    /// Matrix the last draw would have uploaded.
    pub fn last_view_proj(&self) -> Option<Mat4> {
        self.last_view_proj
    }

    pub fn renderer_size(&self, renderer: RendererId) -> Option<Viewport> {
        self.renderer_sizes.get(&renderer).copied()
    }

    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Render(_)))
            .count()
    }

    /// Deliver due frame callbacks to `viewer`, `frames` times over.
    /// Returns how many callbacks actually rendered.
    pub fn run_frames(&mut self, viewer: &mut Viewer, frames: usize) -> usize {
        let mut rendered = 0;
        for _ in 0..frames {
            for handle in self.frames.take_due() {
                if viewer.on_frame(self, handle) {
                    rendered += 1;
                }
            }
        }
        rendered
    }

    /// Remove due callbacks without running them, e.g. to replay one late.
    pub fn take_due_frames(&mut self) -> Vec<FrameHandle> {
        self.frames.take_due()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, kind: ResourceKind) -> Result<(), BackendError> {
        if self.fail_on == Some(kind) {
            return Err(BackendError::new(kind, "injected failure"));
        }
        Ok(())
    }

    fn acquire(&mut self, resource: Resource) -> Resource {
        self.live.insert(resource);
        self.calls.push(HostCall::Create(resource));
        resource
    }
}

impl GraphicsBackend for HeadlessHost {
    fn create_renderer(&mut self, viewport: Viewport) -> Result<RendererId, BackendError> {
        self.check(ResourceKind::Renderer)?;
        let id = RendererId(self.next_id());
        self.acquire(Resource::Renderer(id));
        self.renderer_sizes.insert(id, viewport);
        Ok(id)
    }

    fn create_mesh(&mut self, _mesh: &SphereMesh) -> Result<MeshId, BackendError> {
        self.check(ResourceKind::Mesh)?;
        let id = MeshId(self.next_id());
        self.acquire(Resource::Mesh(id));
        Ok(id)
    }

    fn create_texture(&mut self, texture: &PanoramaTexture) -> Result<TextureId, BackendError> {
        self.check(ResourceKind::Texture)?;
        let id = TextureId(self.next_id());
        self.acquire(Resource::Texture(id));
        self.uploads.push(TextureUpload {
            id,
            width: texture.width,
            height: texture.height,
            blank: texture.is_empty(),
            text: texture.text.clone(),
        });
        Ok(id)
    }

    fn create_material(&mut self, _texture: TextureId) -> Result<MaterialId, BackendError> {
        self.check(ResourceKind::Material)?;
        let id = MaterialId(self.next_id());
        self.acquire(Resource::Material(id));
        Ok(id)
    }

    fn set_size(&mut self, renderer: RendererId, viewport: Viewport) {
        self.renderer_sizes.insert(renderer, viewport);
        self.calls.push(HostCall::SetSize(renderer, viewport));
    }

    fn render(&mut self, renderer: RendererId, _scene: DrawScene, camera: &PerspectiveCamera) {
        self.last_camera = Some(*camera);
        self.last_view_proj = Some(camera.view_proj());
        self.calls.push(HostCall::Render(renderer));
    }

    fn release(&mut self, resource: Resource) {
        if !self.live.remove(&resource) {
            self.stray_releases += 1;
        }
        if let Resource::Renderer(id) = resource {
            self.renderer_sizes.remove(&id);
        }
        self.calls.push(HostCall::Release(resource));
    }
}

impl InputTarget for HeadlessHost {
    fn add_listener(
        &mut self,
        surface: Surface,
        kind: InputKind,
    ) -> Result<ListenerId, BackendError> {
        self.check(ResourceKind::Listener)?;
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, (surface, kind));
        self.calls.push(HostCall::AddListener(id, surface, kind));
        Ok(id)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
        self.calls.push(HostCall::RemoveListener(id));
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.frames.request_frame();
        self.calls.push(HostCall::RequestFrame(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel_frame(handle);
        self.calls.push(HostCall::CancelFrame(handle));
    }
}
