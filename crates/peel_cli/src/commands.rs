//! Subcommand implementations

use anyhow::{bail, Result};
use peel_core::{DragSample, GestureEvent, Point, Size};
use peel_widgets::prelude::*;
use serde::Serialize;

/// Frame step used when settling animations
const FRAME: f32 = 1.0 / 60.0;
/// Give up on settling after this many frames
const MAX_FRAMES: usize = 600;

/// A single-card drag to replay
pub struct Gesture {
    pub width: f32,
    pub height: f32,
    pub samples: Vec<f32>,
    pub tap: Option<Point>,
}

#[derive(Serialize)]
struct Report {
    transitions: Vec<PeelTransition>,
    phase: PeelPhase,
    state: PeelState,
    frames: usize,
    recipe: PeelRecipe,
}

pub fn pin_source(pin: Option<f32>, seed: Option<u64>) -> Box<dyn PinSource> {
    match (pin, seed) {
        (Some(pin), _) => Box::new(FixedPin(pin)),
        (None, Some(seed)) => Box::new(RandomPin::seeded(seed)),
        (None, None) => Box::new(RandomPin::from_entropy()),
    }
}

fn settle(controller: &mut PeelController) -> usize {
    let mut frames = 0;
    while frames < MAX_FRAMES && controller.tick(FRAME) {
        frames += 1;
    }
    frames
}

pub fn simulate(
    config: &Config,
    gesture: Gesture,
    mut pins: Box<dyn PinSource>,
    json: bool,
) -> Result<()> {
    let size = Size::new(gesture.width, gesture.height);
    if size.is_empty() {
        bail!("card size must be positive, got {}x{}", size.width, size.height);
    }

    let mut controller = PeelController::new(config.peel, size);
    let mut transitions = Vec::with_capacity(gesture.samples.len() + 2);

    for translation_x in gesture.samples {
        transitions.push(controller.handle(
            GestureEvent::Drag(DragSample::new(translation_x)),
            pins.as_mut(),
        ));
    }
    transitions.push(controller.handle(GestureEvent::DragEnd, pins.as_mut()));
    let mut frames = settle(&mut controller);

    if let Some(point) = gesture.tap {
        transitions.push(controller.handle(GestureEvent::Tap(point), pins.as_mut()));
        frames += settle(&mut controller);
    }

    let report = Report {
        transitions,
        phase: controller.phase(),
        state: controller.state(),
        frames,
        recipe: controller.recipe(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for transition in &report.transitions {
        println!("{transition:?}");
    }
    println!();
    println!("phase:     {:?}", report.phase);
    println!(
        "progress:  {:.3} ({})",
        report.state.progress,
        if report.state.expanded { "expanded" } else { "closed" }
    );
    println!("settled:   {} frames", report.frames);

    let recipe = &report.recipe;
    println!("boundary:  {:.1}", recipe.flap.edge_x);
    println!("content:   {:?}", recipe.content_mask);
    println!("flap:      {:?}", recipe.flap.mask);
    println!("shadow:    {:?}", recipe.shadow.rect());
    println!("glow:      {:?} @ {:.2}", recipe.flap.glow.rect, recipe.flap.glow.opacity);
    println!(
        "delete:    {:?}{}",
        recipe.panel.delete_button,
        if recipe.panel.interactive { "" } else { " (inactive)" }
    );
    Ok(())
}

pub fn demo(config: &Config, cards: usize, delete: usize, pins: Box<dyn PinSource>) -> Result<()> {
    if delete >= cards {
        bail!("cannot delete card {delete} of {cards}");
    }

    let images = AssetCatalog::bundled(cards, ImageInfo::new(1200, 800));
    let mut list = ListSurface::with_pin_source(*config, Size::new(390.0, 844.0), pins);
    list.populate(sample_records(cards));

    let Some(id) = list.store().ids().nth(delete) else {
        bail!("card {delete} not found");
    };
    let card = list.card_size();
    println!("before:    {}", order(list.store()));

    let drag = -0.6 * card.width;
    for step in 1..=6 {
        list.handle(id, GestureEvent::Drag(DragSample::new(drag * step as f32 / 6.0)));
    }
    let ended = list.handle(id, GestureEvent::DragEnd);
    println!("released:  {ended:?}");

    let mut frames = 0;
    while frames < MAX_FRAMES && list.tick(FRAME) {
        frames += 1;
    }

    let Some(target) = list.controller(id).map(|c| c.recipe().panel.delete_button.center()) else {
        bail!("card {id} disappeared before the tap");
    };
    let tapped = list.handle(id, GestureEvent::Tap(target));
    println!("tapped:    {tapped:?}");

    let mut collapse_frames = 0;
    while collapse_frames < MAX_FRAMES && list.tick(FRAME) {
        collapse_frames += 1;
    }
    tracing::info!(frames, collapse_frames, "demo settled");

    let frame = list.render(&images);
    println!("after:     {}", order(list.store()));
    println!("rows:      {}", frame.children().first().map_or(0, |rows| rows.children().len()));
    println!("height:    {:.1}", list.content_height());
    Ok(())
}

fn order(store: &ItemStore) -> String {
    store
        .iter()
        .map(|record| record.image_ref.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
