use indexmap::IndexSet;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Wire value of a resource that was named by an edge but never fetched.
pub const UNKNOWN_STATUS: i32 = -1;

/// One node of the site graph: a canonical URL, its last observed status
/// and the links it has to and from other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub refered_by: IndexSet<String>,
    pub refers_to: IndexSet<String>,
    #[serde(rename = "status_code", with = "status_code")]
    pub status: Option<u16>,
}

/// Borrowed view of a resource handed to [`ResourceGraph::walk`] visitors.
#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    pub link: &'a str,
    pub status: Option<u16>,
    pub refers_to: &'a IndexSet<String>,
    pub refered_by: &'a IndexSet<String>,
}

impl<'a> ResourceView<'a> {
    fn new(link: &'a str, resource: &'a Resource) -> Self {
        Self {
            link,
            status: resource.status,
            refers_to: &resource.refers_to,
            refered_by: &resource.refered_by,
        }
    }
}

/// Read-only surface of a site graph, the part handed to consumers once a
/// crawl is over.
pub trait ResourceGraph: Send + Sync {
    /// True if the URL was reached during the crawl.
    fn contains(&self, link: &str) -> bool;

    /// Number of distinct resources.
    fn resource_count(&self) -> usize;

    /// Number of links observed, duplicates included.
    fn link_count(&self) -> usize;

    /// Visits every resource once, in no particular order, until `visit`
    /// returns false. The visitor must not call back into the graph.
    fn walk(&self, visit: &mut dyn FnMut(ResourceView<'_>) -> bool);

    /// Point-in-time copy of the whole graph, ready for serialization.
    fn snapshot(&self) -> GraphSnapshot;
}

/// Write surface used by the crawl engine while it builds the graph.
pub trait GraphMutator: ResourceGraph {
    /// Records `from -> to`, creating either endpoint if needed.
    fn add_edge(&self, from: &str, to: &str) -> bool;

    /// Sets the status of a known resource. Returns false, and does
    /// nothing, if no edge ever named `link`.
    fn mark_status(&self, link: &str, status: u16) -> bool;
}

/// Thread-safe directed graph of resources.
///
/// Each public method takes the lock exactly once and works on
/// [`GraphInner`] through unlocked helpers, so no method ever re-enters the
/// lock it already holds.
#[derive(Debug, Default)]
pub struct Digraph {
    inner: RwLock<GraphInner>,
}

#[derive(Debug, Default)]
struct GraphInner {
    edges: usize,
    nodes: HashMap<String, Resource>,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    // The graph only ever grows, so a writer that panicked mid-call cannot
    // leave a half-removed node behind; keep serving the data.
    fn read(&self) -> RwLockReadGuard<'_, GraphInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GraphInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GraphInner {
    fn add_edge(&mut self, from: &str, to: &str) {
        self.nodes
            .entry(from.to_string())
            .or_default()
            .refers_to
            .insert(to.to_string());
        self.nodes
            .entry(to.to_string())
            .or_default()
            .refered_by
            .insert(from.to_string());
        self.edges += 1;
    }

    fn mark_status(&mut self, link: &str, status: u16) -> bool {
        match self.nodes.get_mut(link) {
            Some(resource) => {
                resource.status = Some(status);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            resource_count: self.nodes.len(),
            link_count: self.edges,
            resources: self
                .nodes
                .iter()
                .map(|(link, resource)| (link.clone(), resource.clone()))
                .collect(),
        }
    }
}

impl ResourceGraph for Digraph {
    fn contains(&self, link: &str) -> bool {
        self.read().nodes.contains_key(link)
    }

    fn resource_count(&self) -> usize {
        self.read().nodes.len()
    }

    fn link_count(&self) -> usize {
        self.read().edges
    }

    fn walk(&self, visit: &mut dyn FnMut(ResourceView<'_>) -> bool) {
        let inner = self.read();
        for (link, resource) in inner.nodes.iter() {
            if !visit(ResourceView::new(link, resource)) {
                return;
            }
        }
    }

    fn snapshot(&self) -> GraphSnapshot {
        self.read().snapshot()
    }
}

impl GraphMutator for Digraph {
    fn add_edge(&self, from: &str, to: &str) -> bool {
        self.write().add_edge(from, to);
        true
    }

    fn mark_status(&self, link: &str, status: u16) -> bool {
        self.write().mark_status(link, status)
    }
}

impl Serialize for Digraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

/// Serializable copy of a graph. Resources are keyed and ordered by URL so
/// the same site always produces the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub resource_count: usize,
    pub link_count: usize,
    pub resources: BTreeMap<String, Resource>,
}

impl ResourceGraph for GraphSnapshot {
    fn contains(&self, link: &str) -> bool {
        self.resources.contains_key(link)
    }

    fn resource_count(&self) -> usize {
        self.resources.len()
    }

    fn link_count(&self) -> usize {
        self.link_count
    }

    fn walk(&self, visit: &mut dyn FnMut(ResourceView<'_>) -> bool) {
        for (link, resource) in &self.resources {
            if !visit(ResourceView::new(link, resource)) {
                return;
            }
        }
    }

    fn snapshot(&self) -> GraphSnapshot {
        self.clone()
    }
}

/// `None` travels as `-1` on the wire.
mod status_code {
    use super::UNKNOWN_STATUS;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error> {
        match status {
            Some(code) => serializer.serialize_i32(i32::from(*code)),
            None => serializer.serialize_i32(UNKNOWN_STATUS),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        Ok(u16::try_from(raw).ok())
    }
}
