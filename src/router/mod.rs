//! View Router
//!
//! Resolves URL paths against a static, ordered table of route patterns.
//! Resolution is pure: it maps a path to a view identifier plus captured
//! parameters and touches nothing else. The history side effect of an
//! actual navigation lives in [`history`], kept separate so the two can be
//! tested independently.
//!
//! The table is first-match-wins, so more specific patterns must be
//! registered before more general ones.

pub mod history;

pub use history::{History, MemoryHistory, NavigationMode, Navigator};

use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Identifier of a view the application shell can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Query,
    ProjectDetail,
    Manage,
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewId::Home => "Home",
            ViewId::Query => "Query",
            ViewId::ProjectDetail => "ProjectDetail",
            ViewId::Manage => "Manage",
        };
        f.write_str(name)
    }
}

/// One segment of a parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed URL template with optional `:name` dynamic segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/project/:id`.
    ///
    /// Rejects patterns that do not start with `/`, empty parameter names,
    /// and parameter names repeated within one pattern.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::InvalidPattern(pattern.to_string()));
        }

        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::InvalidPattern(pattern.to_string()));
                }
                if !seen.insert(name.to_string()) {
                    return Err(RouteError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a path against this pattern, capturing named segments.
    ///
    /// Literal segments must match exactly; a `:name` segment matches any
    /// single non-empty path segment.
    fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
                _ => return None,
            }
        }

        Some(params)
    }
}

/// One row of the route table
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub view: ViewId,

    /// Whether captured parameters are handed to the view as props
    pub params_as_props: bool,
}

impl RouteEntry {
    pub fn new(pattern: &str, view: ViewId) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            view,
            params_as_props: false,
        })
    }

    /// Expose captured parameters to the view
    pub fn expose_params(mut self) -> Self {
        self.params_as_props = true;
        self
    }
}

/// Result of a successful resolution
///
/// Created per navigation and discarded when navigation changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub view: ViewId,
    pub params: HashMap<String, String>,
}

/// Routing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route pattern: {0}")]
    InvalidPattern(String),

    #[error("duplicate parameter :{name} in pattern {pattern}")]
    DuplicateParam { pattern: String, name: String },

    #[error("duplicate route pattern: {0}")]
    DuplicatePattern(String),

    /// No pattern matched. Navigation leaves history untouched in this
    /// case; the shell decides what to render (e.g. a not-found view).
    #[error("no route matches {0}")]
    NoMatch(String),
}

/// Static, ordered route table
///
/// The table is fixed at construction; there is no later registration.
#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<RouteEntry>,
}

impl Router {
    /// Build a router from an ordered table, validating pattern uniqueness
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.pattern.as_str().to_string()) {
                return Err(RouteError::DuplicatePattern(
                    entry.pattern.as_str().to_string(),
                ));
            }
        }

        Ok(Self { entries })
    }

    /// The application's route table:
    ///
    /// | Pattern        | View          | Params |
    /// |----------------|---------------|--------|
    /// | `/`            | Home          | —      |
    /// | `/query`       | Query         | —      |
    /// | `/project/:id` | ProjectDetail | `id`   |
    /// | `/manage`      | Manage        | —      |
    pub fn with_default_routes() -> Self {
        let entries = vec![
            RouteEntry::new("/", ViewId::Home),
            RouteEntry::new("/query", ViewId::Query),
            RouteEntry::new("/project/:id", ViewId::ProjectDetail).map(RouteEntry::expose_params),
            RouteEntry::new("/manage", ViewId::Manage),
        ];

        let entries = entries
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .expect("default route table is valid");

        Self::new(entries).expect("default route table has unique patterns")
    }

    /// Resolve a path against the table, first match wins.
    ///
    /// Pure: no history mutation happens here. Query strings and fragments
    /// are ignored for matching.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let bare = path.split(['?', '#']).next().unwrap_or(path);

        for entry in &self.entries {
            if let Some(params) = entry.pattern.matches(bare) {
                tracing::debug!(path = %bare, view = %entry.view, "resolved route");
                return Ok(ResolvedRoute {
                    view: entry.view,
                    params,
                });
            }
        }

        Err(RouteError::NoMatch(bare.to_string()))
    }

    /// The table entries, in match order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}
