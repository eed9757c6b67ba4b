//! Card renderer
//!
//! Draws a record's image aspect-filled and clipped into a rounded rectangle.

use crate::assets::ImageSource;
use crate::store::CardRecord;
use peel_core::{ClipShape, Color, CornerRadius, Layer, LayerProperties, Rect, Size};

/// Placeholder fill for references the image source cannot resolve
const PLACEHOLDER: Color = Color::rgb(0.85, 0.85, 0.87);

/// Renders card content
#[derive(Clone, Copy, Debug)]
pub struct CardRenderer {
    corner_radius: f32,
}

impl CardRenderer {
    pub fn new(corner_radius: f32) -> Self {
        Self { corner_radius }
    }

    /// Content layer for `record` at `size`, in card-local coordinates
    pub fn render(&self, record: &CardRecord, size: Size, images: &dyn ImageSource) -> Layer {
        if size.is_empty() {
            return Layer::empty();
        }

        let frame = size.to_rect();
        let corner_radius = CornerRadius::uniform(self.corner_radius);

        let Some(info) = images.resolve(&record.image_ref) else {
            tracing::trace!("no image for {}, drawing placeholder", record.image_ref);
            return Layer::Fill {
                rect: frame,
                brush: PLACEHOLDER.into(),
                corner_radius,
                shadow: None,
                props: LayerProperties::new(),
            };
        };

        Layer::Image {
            source: record.image_ref.clone(),
            rect: frame,
            source_rect: aspect_fill(info.size(), size),
            props: LayerProperties::new(),
        }
        .clipped(ClipShape::RoundedRect {
            rect: frame,
            corner_radius,
        })
    }
}

/// Region of an image (in image pixels) that fills `frame` without
/// distortion, centered, cropping whichever axis overflows.
///
/// `None` when the image has no pixels.
pub fn aspect_fill(image: Size, frame: Size) -> Option<Rect> {
    if image.is_empty() || frame.is_empty() {
        return None;
    }

    let scale = (frame.width / image.width).max(frame.height / image.height);
    let crop = Size::new(frame.width / scale, frame.height / scale);
    Some(Rect::new(
        (image.width - crop.width) / 2.0,
        (image.height - crop.height) / 2.0,
        crop.width,
        crop.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, ImageInfo};

    fn approx(a: Rect, b: Rect) -> bool {
        (a.x() - b.x()).abs() < 1e-3
            && (a.y() - b.y()).abs() < 1e-3
            && (a.width() - b.width()).abs() < 1e-3
            && (a.height() - b.height()).abs() < 1e-3
    }

    #[test]
    fn test_aspect_fill_crops_height_for_wide_frame() {
        // 1000x1000 image into 300x100: full width, middle third of the height
        let crop = aspect_fill(Size::new(1000.0, 1000.0), Size::new(300.0, 100.0)).unwrap();
        assert!(approx(crop, Rect::new(0.0, 333.333, 1000.0, 333.333)), "{crop:?}");
    }

    #[test]
    fn test_aspect_fill_crops_width_for_tall_frame() {
        let crop = aspect_fill(Size::new(400.0, 200.0), Size::new(100.0, 100.0)).unwrap();
        assert!(approx(crop, Rect::new(100.0, 0.0, 200.0, 200.0)), "{crop:?}");
    }

    #[test]
    fn test_aspect_fill_empty_image() {
        assert!(aspect_fill(Size::ZERO, Size::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_render_resolved_image_is_clipped() {
        let images = AssetCatalog::new().with("img_1", ImageInfo::new(1200, 800));
        let record = CardRecord::new("img_1");
        let layer = CardRenderer::new(10.0).render(&record, Size::new(300.0, 130.0), &images);

        let Layer::Clip { shape, layer, .. } = layer else {
            panic!("expected clip layer");
        };
        assert_eq!(
            shape,
            ClipShape::RoundedRect {
                rect: Rect::new(0.0, 0.0, 300.0, 130.0),
                corner_radius: CornerRadius::uniform(10.0),
            }
        );
        assert!(matches!(*layer, Layer::Image { ref source, .. } if source == "img_1"));
    }

    #[test]
    fn test_render_missing_image_uses_placeholder() {
        let record = CardRecord::new("img_404");
        let layer = CardRenderer::new(10.0).render(&record, Size::new(300.0, 130.0), &AssetCatalog::new());
        assert!(matches!(layer, Layer::Fill { .. }));
    }

    #[test]
    fn test_render_zero_size_is_empty() {
        let record = CardRecord::new("img_1");
        let layer = CardRenderer::new(10.0).render(&record, Size::new(0.0, 130.0), &AssetCatalog::new());
        assert!(matches!(layer, Layer::Empty { .. }));
    }
}
