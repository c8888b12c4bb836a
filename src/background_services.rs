pub mod marker_renderer;
pub mod stop_fetcher;
