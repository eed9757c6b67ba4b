//! Image lookup
//!
//! Cards carry an opaque image reference. Resolving it is the host's job; the
//! renderer only needs the intrinsic size to crop correctly.

use peel_core::Size;
use rustc_hash::FxHashMap;

/// Intrinsic pixel size of an image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Synchronous, side-effect-free image lookup
pub trait ImageSource {
    fn resolve(&self, image_ref: &str) -> Option<ImageInfo>;
}

/// In-memory asset catalog
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    assets: FxHashMap<String, ImageInfo>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding `img_1` through `img_{count}` at a common size
    pub fn bundled(count: usize, info: ImageInfo) -> Self {
        let mut catalog = Self::new();
        for index in 1..=count {
            catalog.insert(format!("img_{index}"), info);
        }
        catalog
    }

    pub fn insert(&mut self, name: impl Into<String>, info: ImageInfo) {
        self.assets.insert(name.into(), info);
    }

    pub fn with(mut self, name: impl Into<String>, info: ImageInfo) -> Self {
        self.insert(name, info);
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl ImageSource for AssetCatalog {
    fn resolve(&self, image_ref: &str) -> Option<ImageInfo> {
        self.assets.get(image_ref).copied()
    }
}
