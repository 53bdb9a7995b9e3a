pub use crate::builder::LruBuilder;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ArenaError, InvariantError};
pub use crate::index::{Compute, ConcurrentIndex, ShardedIndex};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
pub use crate::policy::lru::{EvictionCallback, LruCache, DEFAULT_MAX_SIZE};
