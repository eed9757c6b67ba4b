//! Peel render recipe
//!
//! [`compose`] is a pure function from a card's peel state and size to the
//! geometry of every layer the host draws, back-to-front:
//!
//! 1. the delete panel behind the card
//! 2. a drop shadow under the lifted flap
//! 3. the un-peeled remainder of the content
//! 4. the flap: a mirrored copy of the content folded over at the reveal
//!    boundary, with a translucent tint and a sliding highlight
//!
//! With progress `p` and width `w`, the reveal boundary sits at `w(1-p)`. The
//! flap is the peeled strip `[w(1-p), w]` mirrored about that boundary, so it
//! covers `[w(1-2p), w(1-p)]`.

use crate::config::PeelConfig;
use crate::peel::PeelState;
use peel_animation::Easing;
use peel_core::{
    Affine2D, Brush, ClipShape, Color, CornerRadius, Gradient, GradientStop, Layer,
    LayerProperties, Point, Rect, Shadow, Size,
};
use serde::Serialize;
use smallvec::SmallVec;

/// Name of the only hit-testable layer in a composed card
pub const DELETE_LAYER: &str = "peel.delete";

const PANEL_RED: Color = Color::rgb(1.0, 0.23, 0.19);
const ICON_SIZE: f32 = 24.0;
/// Space between the trash icon and the trailing edge of the panel
const ICON_TRAILING: f32 = 40.0;

/// Delete panel behind the card
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActionPanel {
    pub rect: Rect,
    pub corner_radius: f32,
    pub delete_button: Rect,
    pub icon: Rect,
    /// Only an expanded card accepts taps on the delete button
    pub interactive: bool,
}

/// Shadow cast by the lifted flap
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShadowLayer {
    /// The peeled strip `[w(1-p), w]`
    pub region: Rect,
    /// Horizontal offset of the shadow from `region`, `-p * w`
    pub offset_x: f32,
    pub blur: f32,
    pub opacity: f32,
}

impl ShadowLayer {
    pub fn rect(&self) -> Rect {
        self.region.offset(self.offset_x, 0.0)
    }
}

/// Moving highlight across the flap
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlowLayer {
    pub rect: Rect,
    pub opacity: f32,
}

/// Mirrored flap of content
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlapLayer {
    /// Mirror about the reveal boundary, applied to the content
    pub transform: Affine2D,
    /// Visible region of the mirrored content
    pub mask: Rect,
    /// Leading (trailing-side) edge of the flap; equals the reveal boundary
    pub edge_x: f32,
    pub tint_opacity: f32,
    pub glow: GlowLayer,
}

/// Everything needed to draw one card for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PeelRecipe {
    pub size: Size,
    pub progress: f32,
    pub expanded: bool,
    pub panel: ActionPanel,
    pub shadow: ShadowLayer,
    /// Visible region of the un-peeled content, `[0, w(1-p)]`
    pub content_mask: Rect,
    pub flap: FlapLayer,
}

/// What a point inside a composed card lands on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeelHit {
    DeleteButton,
    Card,
    Outside,
}

/// Lay out the layers of a card with the given state
pub fn compose(state: PeelState, size: Size, config: &PeelConfig) -> PeelRecipe {
    let p = state.progress.clamp(0.0, 1.0);
    let (w, h) = if size.is_empty() {
        (0.0, 0.0)
    } else {
        (size.width, size.height)
    };

    let boundary = w * (1.0 - p);
    let peeled = Rect::new(boundary, 0.0, w * p, h);
    let flap_mask = peeled.offset(-w * p, 0.0);

    let ramp = if p <= 0.0 {
        0.0
    } else if config.glow_ramp <= 0.0 {
        1.0
    } else {
        Easing::EaseOut.apply(p / config.glow_ramp)
    };

    let panel_rect = Size::new(w, h).to_rect().inset(0.0, config.panel_inset);
    let button_width = config.delete_button_width.min(w);
    let delete_button = Rect::new(w - button_width, panel_rect.y(), button_width, panel_rect.height());
    let icon = Rect::new(
        w - ICON_TRAILING - ICON_SIZE,
        (h - ICON_SIZE) / 2.0,
        ICON_SIZE,
        ICON_SIZE,
    );

    // The brightest line of the glow slides onto the fold as it ramps in
    let glow_width = config.glow_width;
    let glow = GlowLayer {
        rect: Rect::new(
            boundary - glow_width * (1.0 / 6.0 + ramp / 2.0),
            0.0,
            glow_width,
            h,
        ),
        opacity: ramp,
    };

    PeelRecipe {
        size: Size::new(w, h),
        progress: p,
        expanded: state.expanded,
        panel: ActionPanel {
            rect: panel_rect,
            corner_radius: config.panel_corner_radius,
            delete_button,
            icon,
            interactive: state.expanded,
        },
        shadow: ShadowLayer {
            region: peeled,
            offset_x: -w * p,
            blur: 15.0,
            opacity: config.shadow_opacity * ramp,
        },
        content_mask: Rect::new(0.0, 0.0, boundary, h),
        flap: FlapLayer {
            transform: Affine2D::mirror_x(boundary),
            mask: flap_mask,
            edge_x: boundary,
            tint_opacity: config.tint_opacity,
            glow,
        },
    }
}

impl PeelRecipe {
    /// The part of the panel not covered by card content
    pub fn revealed(&self) -> Rect {
        let boundary = self.content_mask.max_x();
        Rect::new(boundary, 0.0, self.size.width - boundary, self.size.height)
    }

    /// Resolve a card-local point. The delete button only counts when the
    /// card is expanded and the point is on the uncovered part of the panel.
    pub fn hit_test(&self, point: Point) -> PeelHit {
        if !self.size.to_rect().contains(point) {
            return PeelHit::Outside;
        }
        let delete_area = self.panel.delete_button.intersect(&self.revealed());
        if self.panel.interactive && delete_area.contains(point) {
            PeelHit::DeleteButton
        } else {
            PeelHit::Card
        }
    }

    /// The four layers around `content`, back-to-front. Content is drawn
    /// twice: masked, and mirrored as the flap.
    pub fn layers(&self, content: Layer) -> SmallVec<[Layer; 4]> {
        smallvec::smallvec![
            self.panel_layer(),
            self.shadow_layer(),
            content
                .clone()
                .clipped(ClipShape::Rect(self.content_mask))
                .with_props(LayerProperties::new().with_name("peel.content").passthrough()),
            self.flap_layer(content),
        ]
    }

    /// [`layers`](Self::layers) as a single stack
    pub fn to_layer(&self, content: Layer) -> Layer {
        Layer::stack(self.layers(content).into_vec())
    }

    fn panel_layer(&self) -> Layer {
        let panel = &self.panel;
        let background = Layer::Fill {
            rect: panel.rect,
            brush: Brush::Solid(PANEL_RED),
            corner_radius: CornerRadius::uniform(panel.corner_radius),
            shadow: None,
            props: LayerProperties::new().passthrough(),
        };

        let mut button_props = LayerProperties::new();
        if !panel.interactive {
            button_props = button_props.passthrough();
        }
        let button = Layer::stack(vec![
            Layer::fill(panel.delete_button, Color::TRANSPARENT)
                .with_props(LayerProperties::new().with_name(DELETE_LAYER)),
            Layer::Icon {
                symbol: "trash".to_string(),
                rect: panel.icon,
                color: Color::WHITE,
                props: LayerProperties::new().passthrough(),
            },
        ])
        .clipped(ClipShape::Rect(self.revealed()))
        .with_props(button_props);

        Layer::stack(vec![background, button])
            .with_props(LayerProperties::new().with_name("peel.panel"))
    }

    fn shadow_layer(&self) -> Layer {
        let shadow = &self.shadow;
        Layer::Fill {
            rect: shadow.rect(),
            brush: Color::BLACK.with_alpha(shadow.opacity).into(),
            corner_radius: CornerRadius::ZERO,
            shadow: Some(Shadow::new(
                0.0,
                0.0,
                shadow.blur,
                Color::BLACK.with_alpha(shadow.opacity),
            )),
            props: LayerProperties::new().with_name("peel.shadow").passthrough(),
        }
    }

    fn flap_layer(&self, content: Layer) -> Layer {
        let flap = &self.flap;
        let glow = &flap.glow;
        let glow_layer = Layer::fill(
            glow.rect,
            Brush::Gradient(Gradient {
                start: Point::new(glow.rect.x(), 0.0),
                end: Point::new(glow.rect.max_x(), 0.0),
                stops: vec![
                    GradientStop::new(0.0, Color::TRANSPARENT),
                    GradientStop::new(1.0 / 3.0, Color::TRANSPARENT),
                    GradientStop::new(2.0 / 3.0, Color::WHITE),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            }),
        )
        .with_opacity(glow.opacity);

        Layer::stack(vec![
            content.transformed(flap.transform),
            Layer::fill(flap.mask, Color::WHITE.with_alpha(flap.tint_opacity)),
            glow_layer,
        ])
        .clipped(ClipShape::Rect(flap.mask))
        .with_props(LayerProperties::new().with_name("peel.flap").passthrough())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 300.0;
    const H: f32 = 130.0;

    fn recipe(progress: f32, expanded: bool) -> PeelRecipe {
        compose(
            PeelState { progress, expanded },
            Size::new(W, H),
            &PeelConfig::default(),
        )
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn test_idle_recipe_hides_peel_layers() {
        let r = recipe(0.0, false);
        assert_eq!(r.content_mask, Rect::new(0.0, 0.0, W, H));
        assert_eq!(r.flap.mask.width(), 0.0);
        assert_eq!(r.shadow.opacity, 0.0);
        assert_eq!(r.flap.glow.opacity, 0.0);
        assert!(!r.panel.interactive);
    }

    #[test]
    fn test_half_peeled_geometry() {
        let r = recipe(0.5, true);
        assert_close(r.content_mask.width(), 150.0);
        assert_close(r.flap.edge_x, 150.0);
        assert_close(r.flap.mask.x(), 0.0);
        assert_close(r.flap.mask.width(), 150.0);
        assert_close(r.shadow.offset_x, -150.0);
        assert_eq!(r.shadow.rect(), r.flap.mask);

        // Content at the trailing edge folds onto the leading edge
        let p = r.flap.transform.transform_point(Point::new(W, 0.0));
        assert_close(p.x, 0.0);
    }

    #[test]
    fn test_flap_edge_tracks_boundary() {
        for &p in &[0.1f32, 0.25, 0.4, 0.7, 1.0] {
            let r = recipe(p, false);
            assert_close(r.flap.edge_x, W * (1.0 - p));
            assert_close(r.flap.mask.max_x(), r.flap.edge_x);
            assert_close(r.flap.mask.width(), W * p);
        }
    }

    #[test]
    fn test_glow_ramps_over_first_five_percent() {
        assert!(recipe(0.01, false).flap.glow.opacity > 0.0);
        assert!(recipe(0.01, false).flap.glow.opacity < 1.0);
        assert_eq!(recipe(0.05, false).flap.glow.opacity, 1.0);
        assert_eq!(recipe(0.6, false).flap.glow.opacity, 1.0);

        // Fully ramped, the bright stop sits on the fold
        let r = recipe(0.6, false);
        assert_close(r.flap.glow.rect.x() + r.flap.glow.rect.width() * 2.0 / 3.0, r.flap.edge_x);
    }

    #[test]
    fn test_zero_size_is_degenerate() {
        let r = compose(
            PeelState {
                progress: 0.5,
                expanded: false,
            },
            Size::new(0.0, 130.0),
            &PeelConfig::default(),
        );
        assert_eq!(r.content_mask.width(), 0.0);
        assert_eq!(r.flap.mask.width(), 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(recipe(1.7, false).progress, 1.0);
        assert_eq!(recipe(-0.2, false).progress, 0.0);
    }

    #[test]
    fn test_hit_test_delete_only_when_expanded() {
        let button = Point::new(W - 20.0, H / 2.0);

        assert_eq!(recipe(0.55, true).hit_test(button), PeelHit::DeleteButton);
        assert_eq!(recipe(0.55, false).hit_test(button), PeelHit::Card);
        assert_eq!(recipe(0.55, true).hit_test(Point::new(20.0, 20.0)), PeelHit::Card);
        assert_eq!(recipe(0.55, true).hit_test(Point::new(-1.0, 20.0)), PeelHit::Outside);
    }

    #[test]
    fn test_hit_test_ignores_covered_button() {
        // Barely peeled: the button is still under the content
        let r = recipe(0.1, true);
        assert_eq!(r.hit_test(Point::new(W - 60.0, H / 2.0)), PeelHit::Card);
    }

    #[test]
    fn test_layer_tree_agrees_with_hit_test() {
        let content = Layer::fill(Rect::new(0.0, 0.0, W, H), Color::BLACK);
        let button = Point::new(W - 20.0, H / 2.0);

        let expanded = recipe(0.55, true).to_layer(content.clone());
        assert_eq!(expanded.hit_test(button).and_then(Layer::name), Some(DELETE_LAYER));
        assert!(expanded.hit_test(Point::new(20.0, 20.0)).is_none());

        let idle = recipe(0.55, false).to_layer(content);
        assert!(idle.hit_test(button).is_none());
    }

    #[test]
    fn test_layer_order_back_to_front() {
        let tree = recipe(0.3, false).to_layer(Layer::empty());
        let names: Vec<_> = tree.children().iter().map(Layer::name).collect();
        assert_eq!(
            names,
            vec![
                Some("peel.panel"),
                Some("peel.shadow"),
                Some("peel.content"),
                Some("peel.flap")
            ]
        );
    }

    #[test]
    fn test_panel_is_solid_fill() {
        for progress in [0.0, 0.5, 1.0] {
            let panel = recipe(progress, progress > 0.0).panel_layer();
            let background = &panel.children()[0];
            assert!(
                matches!(background, Layer::Fill { brush: Brush::Solid(color), .. } if *color == PANEL_RED),
                "{background:?}"
            );
        }
    }
}
