use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};
use knowledge_map::knowledge::{Article, Dimensions, Interest, KnowledgeGraph};
use knowledge_map::store::{ArticleStore, SearchQuery};
use tracing::{info, warn};

mod graph;
mod render_utils;
mod ui;

use self::graph::HoverTarget;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct KnowledgeMapApp {
    store: Arc<dyn ArticleStore>,
    store_label: String,
    loads: LoadTracker,
    in_flight: Vec<PendingLoad>,
    state: AppState,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
}

struct PendingLoad {
    generation: u64,
    rx: Receiver<LoadOutcome>,
}

struct LoadOutcome {
    query: SearchQuery,
    result: Result<Vec<Article>, String>,
}

/// Hands out increasing load generations; only the newest one may publish.
#[derive(Debug, Default)]
struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    fn begin(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
    Graph,
    Reader,
}

/// Follow-up work requested by the UI during a frame.
#[derive(Default)]
struct ViewRequests {
    load: Option<SearchQuery>,
}

struct ViewModel {
    articles: Vec<Article>,
    articles_revision: u64,
    query: SearchQuery,
    draft_query: SearchQuery,
    load_error: Option<String>,
    interests: Vec<Interest>,
    graph_cache: Option<GraphCache>,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    pan: Vec2,
    panning: bool,
    hovered: Option<HoverTarget>,
    view_mode: ViewMode,
    opened: Option<usize>,
}

struct GraphCache {
    articles_revision: u64,
    dimensions: Dimensions,
    graph: KnowledgeGraph,
    index_by_id: HashMap<String, usize>,
}

struct SearchMatchCache {
    query: String,
    articles_revision: u64,
    matches: Arc<HashSet<usize>>,
}

impl KnowledgeMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, store: Arc<dyn ArticleStore>) -> Self {
        let store_label = store.describe();
        let mut app = Self {
            store,
            store_label,
            loads: LoadTracker::default(),
            in_flight: Vec::new(),
            state: AppState::Loading,
        };
        app.start_load(SearchQuery::default());
        app
    }

    fn spawn_load(store: Arc<dyn ArticleStore>, query: SearchQuery) -> Receiver<LoadOutcome> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = if query.is_unrestricted() {
                store.fetch_articles()
            } else {
                store.search_articles(&query)
            };
            let _ = tx.send(LoadOutcome {
                query,
                result: result.map_err(|error| error.to_string()),
            });
        });

        rx
    }

    fn start_load(&mut self, query: SearchQuery) {
        let generation = self.loads.begin();
        info!(generation, keyword = %query.keyword, period = query.period.as_param(), "loading articles");
        let rx = Self::spawn_load(Arc::clone(&self.store), query);
        self.in_flight.push(PendingLoad { generation, rx });
    }

    fn is_loading(&self) -> bool {
        self.in_flight
            .iter()
            .any(|pending| self.loads.is_current(pending.generation))
    }

    /// Drains finished loads. Results from superseded loads are dropped, so
    /// the most recently requested article set always wins.
    fn poll_loads(&mut self) {
        let mut accepted = None;
        let loads = &self.loads;

        self.in_flight.retain(|pending| {
            let outcome = match pending.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => LoadOutcome {
                    query: SearchQuery::default(),
                    result: Err("Background load worker disconnected".to_owned()),
                },
            };

            if loads.is_current(pending.generation) {
                accepted = Some(outcome);
            } else {
                warn!(generation = pending.generation, "discarding stale article load");
            }
            false
        });

        if let Some(outcome) = accepted {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) {
        let (articles, load_error) = match outcome.result {
            Ok(articles) => (articles, None),
            Err(error) => {
                warn!(%error, "article load failed, showing an empty map");
                (Vec::new(), Some(error))
            }
        };

        match &mut self.state {
            AppState::Ready(model) => model.replace_articles(articles, outcome.query, load_error),
            AppState::Loading => {
                self.state = AppState::Ready(Box::new(ViewModel::new(
                    articles,
                    outcome.query,
                    load_error,
                )));
            }
        }
    }
}

impl eframe::App for KnowledgeMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        let mut requests = ViewRequests::default();
        let is_loading = self.is_loading();

        match &mut self.state {
            AppState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading saved articles...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.store_label, is_loading, &mut requests);
            }
        }

        if let Some(query) = requests.load {
            self.start_load(query);
        }

        if !self.in_flight.is_empty() {
            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
        }
    }
}
