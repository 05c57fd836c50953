//! Seams between the viewer and the platform it runs on.
//!
//! A [`Host`] is anything that can hand out graphics resources, deliver
//! input to listeners, and schedule display-frame callbacks. The viewer only
//! ever talks to the platform through these traits.

use runtime::FrameScheduler;

use crate::camera::{PerspectiveCamera, Viewport};
use crate::mesh::SphereMesh;
use crate::texture::PanoramaTexture;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RendererId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Any graphics resource the viewer may hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Renderer(RendererId),
    Mesh(MeshId),
    Texture(TextureId),
    Material(MaterialId),
}

impl Resource {
    pub fn kind(self) -> ResourceKind {
        match self {
            Resource::Renderer(_) => ResourceKind::Renderer,
            Resource::Mesh(_) => ResourceKind::Mesh,
            Resource::Texture(_) => ResourceKind::Texture,
            Resource::Material(_) => ResourceKind::Material,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Renderer,
    Mesh,
    Texture,
    Material,
    Listener,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Renderer => "renderer",
            ResourceKind::Mesh => "mesh",
            ResourceKind::Texture => "texture",
            ResourceKind::Material => "material",
            ResourceKind::Listener => "listener",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: ResourceKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: ResourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to create {}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BackendError {}

/// Where a listener is attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The render canvas.
    Canvas,
    /// The enclosing window (resize only).
    Window,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    Resize,
}

/// Draw call inputs for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawScene {
    pub mesh: MeshId,
    pub material: MaterialId,
}

pub trait GraphicsBackend {
    fn create_renderer(&mut self, viewport: Viewport) -> Result<RendererId, BackendError>;
    fn create_mesh(&mut self, mesh: &SphereMesh) -> Result<MeshId, BackendError>;
    fn create_texture(&mut self, texture: &PanoramaTexture) -> Result<TextureId, BackendError>;
    fn create_material(&mut self, texture: TextureId) -> Result<MaterialId, BackendError>;
    fn set_size(&mut self, renderer: RendererId, viewport: Viewport);
    fn render(&mut self, renderer: RendererId, scene: DrawScene, camera: &PerspectiveCamera);
    fn release(&mut self, resource: Resource);
}

pub trait InputTarget {
    fn add_listener(&mut self, surface: Surface, kind: InputKind)
    -> Result<ListenerId, BackendError>;
    fn remove_listener(&mut self, id: ListenerId);
}

pub trait Host: GraphicsBackend + InputTarget + FrameScheduler {}

impl<T: GraphicsBackend + InputTarget + FrameScheduler> Host for T {}
