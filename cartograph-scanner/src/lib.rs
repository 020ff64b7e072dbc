pub mod canonical;
pub mod crawler;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod frontier;
pub mod graph;
pub mod policy;
pub mod transport;

pub use canonical::canonicalize;
pub use crawler::{CrawlStats, Crawler, ProgressCallback};
pub use diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use error::{CrawlError, Result};
pub use graph::{Digraph, GraphMutator, GraphSnapshot, Resource, ResourceGraph, ResourceView};
pub use policy::AccessPolicy;
pub use transport::{Fetched, HttpTransport, Transport};
