use std::collections::{HashSet, VecDeque};

/// Frontier and progress of a breadth-first crawl
///
/// Every canonical URL the crawl has seen lives in exactly one of three
/// collections:
///
/// - `visited`: attempted (fetched successfully or not), never queued again
/// - `current`: pending on the level being processed, in discovery order
/// - `next`: discovered while processing the current level
///
/// URLs only ever move forward (`next` -> `current` -> `visited`).
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    current: VecDeque<String>,
    current_set: HashSet<String>,
    next: Vec<String>,
    next_set: HashSet<String>,
    visited_count: u64,
    level: u32,
}

impl CrawlState {
    /// Creates an empty state positioned at level 1
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
            current: VecDeque::new(),
            current_set: HashSet::new(),
            next: Vec::new(),
            next_set: HashSet::new(),
            visited_count: 0,
            level: 1,
        }
    }

    /// Returns true if the URL is visited or pending on either level
    pub fn is_known(&self, url: &str) -> bool {
        self.visited.contains(url) || self.current_set.contains(url) || self.next_set.contains(url)
    }

    /// Marks a URL as visited without queueing it (used for the seed)
    ///
    /// Returns false if the URL was already known.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.is_known(url) {
            return false;
        }
        self.visited.insert(url.to_string());
        true
    }

    /// Queues a URL for the next level unless it is already known
    ///
    /// Returns true if the URL was added.
    pub fn enqueue_next(&mut self, url: String) -> bool {
        if self.is_known(&url) {
            return false;
        }
        self.next_set.insert(url.clone());
        self.next.push(url);
        true
    }

    /// Moves the next-level queue into the current level and clears it
    ///
    /// Anything still pending on the current level is discarded from the
    /// queue but stays known, so it is never discovered again.
    pub fn promote_next(&mut self) {
        self.visited.extend(self.current_set.drain());
        self.current = self.next.drain(..).collect();
        self.current_set = std::mem::take(&mut self.next_set);
    }

    /// Takes the next pending URL of the current level and marks it visited
    pub fn start_next_visit(&mut self) -> Option<String> {
        let url = self.current.pop_front()?;
        self.current_set.remove(&url);
        self.visited.insert(url.clone());
        Some(url)
    }

    /// Counts one successfully fetched page
    pub fn record_success(&mut self) {
        self.visited_count += 1;
    }

    /// Advances to the next level
    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// Number of successfully fetched pages so far
    pub fn visited_count(&self) -> u64 {
        self.visited_count
    }

    /// Current level counter (starts at 1)
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn next_len(&self) -> usize {
        self.next.len()
    }

    pub fn has_next(&self) -> bool {
        !self.next.is_empty()
    }

    /// Number of URLs that have been attempted
    pub fn attempted_len(&self) -> usize {
        self.visited.len()
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::new()
    }
}
