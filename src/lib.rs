//! # FundView Client
//!
//! Client-side access layer for the FundView project/report browser. Users
//! submit funding-registry project URLs, browse the fetched project and
//! report data, and manage stored reports; this crate gives the
//! application shell its two structural components:
//!
//! - [`router`]: declarative URL-to-view resolution with parameterized
//!   paths, plus a history abstraction for the navigation side effect
//! - [`api`]: typed API client — one method per backend capability, with
//!   request shaping, response unwrapping, and error normalization behind
//!   a single surface
//!
//! The two components are independent; they compose only through the
//! surrounding shell. Presentation (views, styling, view-local state) is
//! out of scope here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fundview::api::ApiClient;
//! use fundview::config::Config;
//! use fundview::router::{NavigationMode, Navigator, MemoryHistory, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(config.client);
//!
//!     let projects = client.get_projects(&Default::default()).await?;
//!     println!("{} projects stored", projects.pagination.total);
//!
//!     let nav = Navigator::new(Router::with_default_routes(), MemoryHistory::new());
//!     let route = nav.navigate("/project/42", NavigationMode::Push)?;
//!     println!("showing {} with {:?}", route.view, route.params);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod router;

// Re-export top-level types for convenience
pub use api::{
    ApiClient, ApiError, ApiResult, InterceptorChain, NormalizedError, RequestBody,
    RequestDescriptor, ResponseKind,
};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig};

pub use router::{
    History, MemoryHistory, NavigationMode, Navigator, ResolvedRoute, RouteEntry, RouteError,
    RoutePattern, Router, ViewId,
};
