use crate::core::map::init_map;
use crate::core::page::Page;
use crate::core::render;
use crate::domain::model::{MapOptions, MarkerHandle, Restaurant};
use crate::domain::ports::{MapWidget, Navigator, RestaurantSource};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// List and markers replaced with this many restaurants.
    Rendered(usize),
    /// A newer request was issued while this one was in flight.
    Superseded,
    /// The fetch failed; nothing was changed.
    Failed,
    MapNotReady,
}

/// Everything the directory page owns. Restaurants, markers and list items
/// are only ever replaced together.
pub struct PageState<M: MapWidget> {
    pub page: Page,
    restaurants: Vec<Restaurant>,
    markers: Vec<MarkerHandle>,
    map: Option<Arc<M>>,
    sequence: u64,
}

impl<M: MapWidget> PageState<M> {
    fn new() -> Self {
        Self {
            page: Page::new(),
            restaurants: Vec::new(),
            markers: Vec::new(),
            map: None,
            sequence: 0,
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    fn reset_restaurants(&mut self, restaurants: Vec<Restaurant>) {
        self.page.restaurants_list.clear();
        if let Some(map) = &self.map {
            for marker in &self.markers {
                map.detach_marker(marker);
            }
        }
        self.markers.clear();
        self.restaurants = restaurants;
    }
}

pub struct DirectoryController<S: RestaurantSource, M: MapWidget> {
    source: Arc<S>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<PageState<M>>,
    in_flight: StdMutex<Option<AbortHandle>>,
}

impl<S, M> DirectoryController<S, M>
where
    S: RestaurantSource + 'static,
    M: MapWidget + 'static,
{
    pub fn new(source: Arc<S>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            source,
            navigator,
            state: Mutex::new(PageState::new()),
            in_flight: StdMutex::new(None),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub async fn fetch_neighborhoods(&self) {
        match self.source.fetch_neighborhoods().await {
            Ok(neighborhoods) => {
                tracing::debug!("Filling {} neighborhoods", neighborhoods.len());
                self.state.lock().await.page.neighborhoods.fill(&neighborhoods);
            }
            Err(e) => tracing::error!("Failed to fetch neighborhoods: {}", e),
        }
    }

    pub async fn fetch_cuisines(&self) {
        match self.source.fetch_cuisines().await {
            Ok(cuisines) => {
                tracing::debug!("Filling {} cuisines", cuisines.len());
                self.state.lock().await.page.cuisines.fill(&cuisines);
            }
            Err(e) => tracing::error!("Failed to fetch cuisines: {}", e),
        }
    }

    pub async fn select_cuisine(&self, value: &str) -> bool {
        self.state.lock().await.page.cuisines.select_value(value)
    }

    pub async fn select_neighborhood(&self, value: &str) -> bool {
        self.state.lock().await.page.neighborhoods.select_value(value)
    }

    /// Map-ready callback: builds the map at its default view and runs the
    /// first query with the current selection.
    pub async fn on_map_ready(&self) -> UpdateOutcome {
        {
            let mut state = self.state.lock().await;
            if state.map.is_none() {
                state.map = Some(Arc::new(init_map::<M>()));
            }
        }
        self.update_restaurants().await
    }

    pub async fn map(&self) -> Option<Arc<M>> {
        self.state.lock().await.map.clone()
    }

    /// Fetches restaurants for the current selection and replaces the list
    /// and markers. Failures are logged and leave the page untouched.
    pub async fn update_restaurants(&self) -> UpdateOutcome {
        let (selection, sequence) = {
            let mut state = self.state.lock().await;
            if state.map.is_none() {
                tracing::debug!("Map not ready; update deferred to map-ready callback");
                return UpdateOutcome::MapNotReady;
            }
            state.sequence += 1;
            (state.page.selection(), state.sequence)
        };

        tracing::debug!(
            "Request {}: cuisine={} neighborhood={}",
            sequence,
            selection.cuisine,
            selection.neighborhood
        );

        let restaurants = match self
            .source
            .fetch_restaurants_by_cuisine_and_neighborhood(&selection.cuisine, &selection.neighborhood)
            .await
        {
            Ok(restaurants) => restaurants,
            Err(e) => {
                tracing::error!("Failed to fetch restaurants: {}", e);
                return UpdateOutcome::Failed;
            }
        };

        let mut state = self.state.lock().await;
        if state.sequence != sequence {
            tracing::debug!(
                "Discarding response {} (latest is {})",
                sequence,
                state.sequence
            );
            return UpdateOutcome::Superseded;
        }

        state.reset_restaurants(restaurants);
        self.fill_restaurants(&mut state);
        UpdateOutcome::Rendered(state.restaurants.len())
    }

    /// Runs [`Self::update_restaurants`] as a task, aborting the previous one
    /// if it is still in flight.
    pub fn spawn_update(self: &Arc<Self>) -> JoinHandle<UpdateOutcome> {
        let controller = Arc::clone(self);
        let handle = tokio::spawn(async move { controller.update_restaurants().await });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    fn fill_restaurants(&self, state: &mut PageState<M>) {
        let items: Vec<_> = state
            .restaurants
            .iter()
            .map(|restaurant| {
                render::restaurant_item(
                    restaurant,
                    &self.source.image_urls_for_restaurant(restaurant),
                    &self.source.url_for_restaurant(restaurant),
                )
            })
            .collect();
        state.page.restaurants_list = items;
        self.add_markers_to_map(state);
    }

    fn add_markers_to_map(&self, state: &mut PageState<M>) {
        let Some(map) = state.map.clone() else {
            return;
        };

        for restaurant in &state.restaurants {
            let marker = self
                .source
                .map_marker_for_restaurant(restaurant, map.as_ref());
            let navigator = Arc::clone(&self.navigator);
            let url = marker.url.clone();
            map.add_click_listener(&marker, Box::new(move || navigator.navigate(&url)));
            state.markers.push(marker);
        }
        tracing::info!("Showing {} restaurants", state.markers.len());
    }

    /// Runs `f` against the current page state.
    pub async fn with_state<T>(&self, f: impl FnOnce(&PageState<M>) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    pub async fn render_document(&self) -> String {
        let state = self.state.lock().await;
        let options: Option<MapOptions> = state.map.as_ref().map(|_| MapOptions::default());
        state
            .page
            .render_document(options.as_ref(), state.markers.len())
    }
}
