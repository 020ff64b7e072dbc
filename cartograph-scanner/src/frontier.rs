use std::collections::VecDeque;
use url::Url;

/// FIFO of URLs waiting to be fetched.
///
/// The frontier does not deduplicate; the crawler checks the graph before
/// adding anything.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, url: Url) {
        self.queue.push_back(url);
    }

    pub fn remove(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Extend<Url> for Frontier {
    fn extend<I: IntoIterator<Item = Url>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl FromIterator<Url> for Frontier {
    fn from_iter<I: IntoIterator<Item = Url>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}
