mod component;
mod http;
mod render;
mod scene;

pub use component::GraphExplorer;
pub use http::HttpFetcher;
pub use scene::CanvasScene;
