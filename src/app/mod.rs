use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Pos2, Vec2};

use crate::theory::{CategoryFilter, DataSource, Dataset, TheoryNetwork, describe_load_error, load_dataset};

mod graph;
mod physics;
mod render_utils;
mod search;
mod ui;

use physics::Simulation;

type LoadResult = Result<Dataset, String>;

pub struct TheoryNetworkApp {
    source: DataSource,
    initial_category: CategoryFilter,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: Dataset,
    category: CategoryFilter,
    search: String,
    hovered: Option<usize>,
    dragging: Option<usize>,
    pan: Vec2,
    zoom: f32,
    view_reset: Option<ViewReset>,
    canvas_size: Option<Vec2>,
    live_physics: bool,
    graph_dirty: bool,
    render_graph_revision: u64,
    graph_cache: Option<RenderGraph>,
    search_match_cache: Option<SearchMatchCache>,
}

struct SearchMatchCache {
    query: String,
    graph_revision: u64,
    matches: Arc<HashSet<usize>>,
}

#[derive(Clone, Copy)]
struct ViewReset {
    from_pan: Vec2,
    from_zoom: f32,
    started_at: f64,
}

struct RenderGraph {
    network: TheoryNetwork,
    nodes: Vec<RenderNode>,
    simulation: Simulation,
    physics_scratch: PhysicsScratch,
    view_scratch: ViewScratch,
}

struct PhysicsScratch {
    positions: Vec<Vec2>,
    deltas: Vec<Vec2>,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

struct RenderNode {
    world_pos: Vec2,
    velocity: Vec2,
    pinned: Option<Vec2>,
    radius: f32,
    fill: Color32,
}

impl RenderNode {
    fn at(world_pos: Vec2, radius: f32) -> Self {
        Self {
            world_pos,
            velocity: Vec2::ZERO,
            pinned: None,
            radius,
            fill: Color32::WHITE,
        }
    }
}

impl TheoryNetworkApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: DataSource,
        initial_category: CategoryFilter,
    ) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            initial_category,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: DataSource) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&source).map_err(|error| {
                let message = describe_load_error(&error);
                tracing::error!(%source, %message, "theory data load failed");
                message
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: DataSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready_state(dataset: Dataset, category: CategoryFilter) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(dataset, category)))
    }
}

impl eframe::App for TheoryNetworkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(dataset) => {
                                Self::ready_state(dataset, self.initial_category.clone())
                            }
                            Err(message) => AppState::Error(message),
                        });
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Error loading data: background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading theory data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new(message.as_str())
                            .color(Color32::from_rgb(255, 107, 107))
                            .size(15.0),
                    );
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(dataset)) => {
                            transition = Some(Self::ready_state(dataset, model.category.clone()));
                        }
                        Ok(Err(message)) => transition = Some(AppState::Error(message)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Error loading data: background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
