//! Bounded, duplicate-free FIFO window of recently seen numbers.
//!
//! One instance is shared by every request. Each `snapshot` and each
//! `merge_and_evict` holds the lock for the whole call and nothing longer,
//! so readers never observe a half-applied merge.

use std::collections::{HashSet, VecDeque};

use tokio::sync::Mutex;

/// What a single merge changed, plus the window as it stood right after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub inserted: Vec<i64>,
    pub evicted: Vec<i64>,
    pub window: Vec<i64>,
}

#[derive(Debug, Default)]
struct Window {
    /// Oldest first.
    order: VecDeque<i64>,
    members: HashSet<i64>,
}

impl Window {
    fn to_vec(&self) -> Vec<i64> {
        self.order.iter().copied().collect()
    }
}

/// Shared window store.
#[derive(Debug)]
pub struct WindowStore {
    inner: Mutex<Window>,
    capacity: usize,
}

impl WindowStore {
    /// Empty window holding at most `capacity` values. A zero capacity is
    /// raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Window::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Copy of the current contents, oldest first.
    pub async fn snapshot(&self) -> Vec<i64> {
        self.inner.lock().await.to_vec()
    }

    /// Append every value not already present, evicting from the front when
    /// full. Values already in the window (or seen earlier in `numbers`)
    /// are skipped without touching order.
    pub async fn merge_and_evict(&self, numbers: &[i64]) -> MergeReport {
        let mut window = self.inner.lock().await;
        let mut inserted = Vec::new();
        let mut evicted = Vec::new();

        for &n in numbers {
            if window.members.contains(&n) {
                continue;
            }
            if window.order.len() >= self.capacity {
                if let Some(oldest) = window.order.pop_front() {
                    window.members.remove(&oldest);
                    evicted.push(oldest);
                }
            }
            window.order.push_back(n);
            window.members.insert(n);
            inserted.push(n);
        }

        MergeReport {
            inserted,
            evicted,
            window: window.to_vec(),
        }
    }
}
