// 🗄️ Points Store
// Process-lifetime mapping from receipt id to computed points

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// Storage for scored receipts.
///
/// Handlers only see this trait so the backing store can be swapped, or a
/// fresh one handed to each test.
pub trait PointsStore: Send + Sync {
    /// Record a score under a newly generated id and return that id
    fn put(&self, points: u64) -> Uuid;

    /// Look up the score recorded under `id`
    fn get(&self, id: &Uuid) -> Option<u64>;

    /// Number of recorded scores
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded in-memory store. Lookups only contend with writers on the same shard.
#[derive(Debug, Default)]
pub struct InMemoryPointsStore {
    scores: DashMap<Uuid, u64>,
}

impl InMemoryPointsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsStore for InMemoryPointsStore {
    fn put(&self, points: u64) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            // Entry holds the shard lock, so check-and-insert is atomic
            if let Entry::Vacant(slot) = self.scores.entry(id) {
                slot.insert(points);
                return id;
            }
        }
    }

    fn get(&self, id: &Uuid) -> Option<u64> {
        self.scores.get(id).map(|points| *points)
    }

    fn len(&self) -> usize {
        self.scores.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
