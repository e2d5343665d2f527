//! Single-flight region cache backed by a worker thread pool.
//!
//! Every region is generated at most once while it stays cached: the first
//! request inserts a pending handle and queues the generation task in the
//! same map entry operation, so concurrent requests for the same region all
//! receive that one handle. Completed regions are kept up to a capacity and
//! then evicted least recently requested first, both when a new region is
//! requested and when a worker finishes one.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::{FxBuildHasher, FxHashMap};
use strata_config::{ConfigError, Settings};
use strata_terrain::{Cell, Heightmap};

use crate::error::GenerationError;
use crate::extent::{Extent, RegionExtent};
use crate::generator::{HeightmapGenerator, RegionGenerator};
use crate::handle::RegionHandle;
use crate::pos::{RegionPos, RegionSize};
use crate::region::Region;

type RegionMap = DashMap<RegionPos, Arc<RegionHandle>, FxBuildHasher>;

/// A queued generation task.
struct Task {
    handle: Arc<RegionHandle>,
}

#[derive(Default)]
struct Counters {
    requested: AtomicU64,
    generated: AtomicU64,
    hits: AtomicU64,
    evicted: AtomicU64,
    failed: AtomicU64,
}

/// State shared between the cache and its workers.
struct Store {
    regions: RegionMap,
    capacity: usize,
    counters: Counters,
    /// Serializes eviction passes so each one sees the map length it acts on.
    evicting: Mutex<()>,
}

impl Store {
    /// Drop least recently requested completed regions until the map is back
    /// within capacity. Regions still generating are never evicted.
    fn evict(&self) {
        if self.regions.len() <= self.capacity {
            return;
        }
        let _guard = self.evicting.lock().unwrap_or_else(PoisonError::into_inner);

        let excess = self.regions.len().saturating_sub(self.capacity);
        if excess == 0 {
            return;
        }

        let mut candidates: Vec<(RegionPos, u64)> = self
            .regions
            .iter()
            .filter(|entry| entry.value().is_ready())
            .map(|entry| (*entry.key(), entry.value().last_access()))
            .collect();
        candidates.sort_unstable_by_key(|&(pos, tick)| (tick, pos));

        for (pos, tick) in candidates.into_iter().take(excess) {
            let removed = self
                .regions
                .remove_if(&pos, |_, handle| handle.last_access() == tick);
            if removed.is_some() {
                self.counters.evicted.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(region = %pos, "Evicted region");
            }
        }
    }
}

/// Snapshot of cache activity since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Region requests, including prefetches.
    pub requested: u64,
    /// Regions generated successfully.
    pub generated: u64,
    /// Requests served by an existing handle, pending or complete.
    pub hits: u64,
    /// Completed regions dropped to stay within capacity.
    pub evicted: u64,
    /// Generation attempts that failed or panicked.
    pub failed: u64,
}

/// Caches generated regions and generates missing ones on worker threads.
pub struct RegionCache {
    size: RegionSize,
    store: Arc<Store>,
    task_sender: Sender<Task>,
    clock: AtomicU64,
    workers: usize,
}

impl RegionCache {
    /// Create a cache with `thread_count` workers (at least one) keeping up
    /// to `capacity` completed regions.
    pub fn new(
        generator: impl RegionGenerator,
        size: RegionSize,
        thread_count: usize,
        capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = unbounded::<Task>();
        let generator: Arc<dyn RegionGenerator> = Arc::new(generator);
        let capacity = capacity.max(1);
        let store = Arc::new(Store {
            regions: DashMap::with_hasher(FxBuildHasher),
            capacity,
            counters: Counters::default(),
            evicting: Mutex::new(()),
        });
        let workers = thread_count.max(1);

        for _ in 0..workers {
            let receiver = task_receiver.clone();
            let generator = Arc::clone(&generator);
            let store = Arc::clone(&store);

            std::thread::Builder::new()
                .name("region-gen-worker".into())
                .spawn(move || run_worker(receiver, generator, size, store))
                .expect("Failed to spawn region generation worker thread");
        }

        tracing::debug!(
            workers,
            capacity,
            region_chunks = size.chunks(),
            "Region cache started"
        );

        Self {
            size,
            store,
            task_sender,
            clock: AtomicU64::new(0),
            workers,
        }
    }

    /// Cache over the heightmap, sized from the generator settings.
    pub fn from_settings(
        settings: &Settings,
        heightmap: Arc<Heightmap>,
    ) -> Result<Self, ConfigError> {
        Self::with_generator(settings, HeightmapGenerator::new(heightmap))
    }

    /// Cache over any generator, sized from the generator settings.
    pub fn with_generator(
        settings: &Settings,
        generator: impl RegionGenerator,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let generator_settings = &settings.generator;
        let threads = match generator_settings.worker_threads {
            0 => default_thread_count(),
            n => n,
        };
        Ok(Self::new(
            generator,
            RegionSize::new(generator_settings.region_chunks),
            threads,
            generator_settings.cache_capacity,
        ))
    }

    /// Handle for the region at `pos`, queueing its generation if it is not
    /// cached. Concurrent calls for one position share a single handle.
    pub fn get_region_async(&self, pos: RegionPos) -> Arc<RegionHandle> {
        self.store.counters.requested.fetch_add(1, Ordering::Relaxed);
        let tick = self.clock.fetch_add(1, Ordering::Relaxed) + 1;

        let (handle, inserted) = match self.store.regions.entry(pos) {
            Entry::Occupied(entry) => {
                self.store.counters.hits.fetch_add(1, Ordering::Relaxed);
                (Arc::clone(entry.get()), false)
            }
            Entry::Vacant(entry) => {
                let handle = Arc::new(RegionHandle::new(pos));
                handle.touch(tick);
                let task = Task {
                    handle: Arc::clone(&handle),
                };
                // The channel is unbounded, so this never blocks while the
                // map shard is locked.
                match self.task_sender.send(task) {
                    Ok(()) => {
                        tracing::trace!(region = %pos, "Queued region generation");
                        entry.insert(Arc::clone(&handle));
                        (handle, true)
                    }
                    Err(_) => {
                        self.store.counters.failed.fetch_add(1, Ordering::Relaxed);
                        handle.complete(Err(GenerationError::WorkersGone { region: pos }));
                        (handle, false)
                    }
                }
            }
        };

        handle.touch(tick);
        if inserted {
            self.store.evict();
        }
        handle
    }

    /// Start generating the region at `pos` without waiting for it.
    pub fn queue_region(&self, pos: RegionPos) {
        let _ = self.get_region_async(pos);
    }

    /// Completed region at `pos`, if cached. Never queues generation.
    pub fn cached_region(&self, pos: RegionPos) -> Option<Arc<Region>> {
        let handle = self.store.regions.get(&pos).map(|entry| Arc::clone(entry.value()))?;
        handle.try_get()?.ok()
    }

    pub fn contains(&self, pos: RegionPos) -> bool {
        self.store.regions.contains_key(&pos)
    }

    /// Regions currently cached or in flight.
    pub fn len(&self) -> usize {
        self.store.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.regions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn stats(&self) -> CacheStats {
        let c = &self.store.counters;
        CacheStats {
            requested: c.requested.load(Ordering::Relaxed),
            generated: c.generated.load(Ordering::Relaxed),
            hits: c.hits.load(Ordering::Relaxed),
            evicted: c.evicted.load(Ordering::Relaxed),
            failed: c.failed.load(Ordering::Relaxed),
        }
    }
}

impl Extent for RegionCache {
    /// Requests every covering region up front, then visits each one as soon
    /// as it completes, in completion order.
    fn visit<F>(
        &self,
        min_x: i32,
        min_z: i32,
        max_x: i32,
        max_z: i32,
        mut visitor: F,
    ) -> Result<(), GenerationError>
    where
        F: FnMut(i32, i32, &Cell),
    {
        if min_x >= max_x || min_z >= max_z {
            return Ok(());
        }

        let low = self.size.region_of_block(min_x, min_z);
        let high = self.size.region_of_block(max_x - 1, max_z - 1);

        let (notify, completed) = unbounded();
        let mut pending: FxHashMap<RegionPos, Arc<RegionHandle>> = FxHashMap::default();
        for rz in low.z..=high.z {
            for rx in low.x..=high.x {
                let pos = RegionPos::new(rx, rz);
                let handle = self.get_region_async(pos);
                handle.subscribe(notify.clone());
                pending.insert(pos, handle);
            }
        }

        while !pending.is_empty() {
            let Ok(pos) = completed.recv() else {
                break;
            };
            let Some(handle) = pending.remove(&pos) else {
                continue;
            };
            let region = handle.wait()?;

            let (ox, oz) = region.block_origin();
            let blocks = self.size.blocks();
            let (x0, x1) = (min_x.max(ox), max_x.min(ox.saturating_add(blocks)));
            let (z0, z1) = (min_z.max(oz), max_z.min(oz.saturating_add(blocks)));
            for z in z0..z1 {
                for x in x0..x1 {
                    if let Some(cell) = region.cell(x, z) {
                        visitor(x, z, cell);
                    }
                }
            }
        }
        // Leave the cache within capacity by the time the visit returns.
        self.store.evict();
        Ok(())
    }
}

impl RegionExtent for RegionCache {
    fn region_size(&self) -> RegionSize {
        self.size
    }

    fn get_region(&self, pos: RegionPos) -> Result<Arc<Region>, GenerationError> {
        self.get_region_async(pos).wait()
    }
}

/// Leave headroom for the threads that consume regions.
fn default_thread_count() -> usize {
    let cpus = num_cpus::get().max(2);
    (cpus - 2).max(1)
}

fn run_worker(
    receiver: Receiver<Task>,
    generator: Arc<dyn RegionGenerator>,
    size: RegionSize,
    store: Arc<Store>,
) {
    while let Ok(task) = receiver.recv() {
        let pos = task.handle.pos();
        let start = Instant::now();

        let result = panic::catch_unwind(AssertUnwindSafe(|| generator.generate(pos, size)))
            .unwrap_or_else(|payload| {
                Err(GenerationError::Panicked {
                    region: pos,
                    message: panic_message(payload.as_ref()),
                })
            })
            .and_then(|region| {
                if region.pos() == pos && region.size() == size {
                    Ok(Arc::new(region))
                } else {
                    Err(GenerationError::Generator {
                        region: pos,
                        message: format!("generator returned region {}", region.pos()),
                    })
                }
            });

        match &result {
            Ok(_) => {
                store.counters.generated.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    region = %pos,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Generated region"
                );
            }
            Err(err) => {
                store.counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(region = %pos, error = %err, "Region generation failed");
                // Forget the failure before publishing it so that a request
                // observing the error queues a fresh attempt.
                store.regions.remove_if(&pos, |_, handle| Arc::ptr_eq(handle, &task.handle));
            }
        }

        task.handle.complete(result);
        store.evict();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::pos::ChunkPos;

    /// Writes each column's coordinates into the cell and counts calls.
    fn coordinate_generator(
        calls: Arc<AtomicUsize>,
        delay: Duration,
    ) -> impl RegionGenerator {
        move |pos: RegionPos, size: RegionSize| -> Result<Region, GenerationError> {
            calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(delay);
            Ok(Region::generate(pos, size, |cell, x, z| {
                cell.value = x as f32;
                cell.temperature = z as f32;
            }))
        }
    }

    fn cache(calls: &Arc<AtomicUsize>, chunks: u32, capacity: usize) -> RegionCache {
        RegionCache::new(
            coordinate_generator(Arc::clone(calls), Duration::ZERO),
            RegionSize::new(chunks),
            4,
            capacity,
        )
    }

    #[test]
    fn test_concurrent_requests_generate_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(RegionCache::new(
            coordinate_generator(Arc::clone(&calls), Duration::from_millis(50)),
            RegionSize::new(1),
            4,
            16,
        ));
        let threads = 16;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_region(RegionPos::new(3, -2))
                })
            })
            .collect();

        let regions: Vec<Arc<Region>> = handles
            .into_iter()
            .map(|h| h.join().expect("requester panicked").expect("generation ok"))
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1, "region generated more than once");
        assert!(regions.iter().all(|r| Arc::ptr_eq(r, &regions[0])));
        let stats = cache.stats();
        assert_eq!(stats.requested, threads as u64);
        assert_eq!(stats.hits, threads as u64 - 1);
        assert_eq!(stats.generated, 1);
    }

    #[test]
    fn test_completed_region_is_reused() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 8);
        let first = cache.get_region(RegionPos::new(0, 0)).expect("generated");
        let handle = cache.get_region_async(RegionPos::new(0, 0));
        assert!(handle.is_done(), "cached region should be complete");
        let second = handle.wait().expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.cached_region(RegionPos::new(0, 0)).is_some());
        assert!(cache.cached_region(RegionPos::new(9, 9)).is_none());
        assert!(!cache.contains(RegionPos::new(9, 9)));
    }

    #[test]
    fn test_visit_covers_range_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 64);
        let (min_x, min_z, max_x, max_z) = (-37, -5, 21, 40);

        let mut seen: HashMap<(i32, i32), usize> = HashMap::new();
        cache
            .visit(min_x, min_z, max_x, max_z, |x, z, cell| {
                assert_eq!((cell.value, cell.temperature), (x as f32, z as f32));
                *seen.entry((x, z)).or_default() += 1;
            })
            .expect("visit succeeds");

        let expected = ((max_x - min_x) * (max_z - min_z)) as usize;
        assert_eq!(seen.len(), expected);
        assert!(seen.values().all(|&n| n == 1), "column visited twice");
        assert!(
            seen.keys()
                .all(|&(x, z)| (min_x..max_x).contains(&x) && (min_z..max_z).contains(&z))
        );
    }

    #[test]
    fn test_visit_empty_range_does_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 8);
        let mut visited = 0;
        cache
            .visit(10, 10, 10, 20, |_, _, _| visited += 1)
            .expect("empty visit");
        assert_eq!(visited, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_visit_consumes_regions_in_completion_order() {
        let slow = RegionPos::new(0, 0);
        let generator = move |pos: RegionPos, size: RegionSize| -> Result<Region, GenerationError> {
            if pos == slow {
                thread::sleep(Duration::from_millis(300));
            }
            Ok(Region::generate(pos, size, |_, _, _| {}))
        };
        let cache = RegionCache::new(generator, RegionSize::new(1), 4, 16);

        let mut order = Vec::new();
        cache
            .visit(0, 0, 32, 32, |x, z, _| {
                let pos = RegionSize::new(1).region_of_block(x, z);
                if order.last() != Some(&pos) {
                    order.push(pos);
                }
            })
            .expect("visit succeeds");

        assert_eq!(order.len(), 4);
        assert_eq!(order.last(), Some(&slow), "slow region should be visited last");
    }

    #[test]
    fn test_failure_reaches_every_waiter_and_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let generator = move |pos: RegionPos, size: RegionSize| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                thread::sleep(Duration::from_millis(50));
                return Err(GenerationError::Generator {
                    region: pos,
                    message: "first attempt fails".into(),
                });
            }
            Ok(Region::generate(pos, size, |_, _, _| {}))
        };
        let cache = RegionCache::new(generator, RegionSize::new(1), 2, 8);
        let pos = RegionPos::new(1, 1);

        let first = cache.get_region_async(pos);
        let second = cache.get_region_async(pos);
        assert!(Arc::ptr_eq(&first, &second));
        for handle in [&first, &second] {
            let err = handle.wait().expect_err("first attempt fails");
            assert!(matches!(err, GenerationError::Generator { region, .. } if region == pos));
        }

        assert!(!cache.contains(pos), "failed region must not stay cached");
        let region = cache.get_region(pos).expect("retry succeeds");
        assert_eq!(region.pos(), pos);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().failed, 1);
    }

    #[test]
    fn test_visit_propagates_failure() {
        let generator = |pos: RegionPos, size: RegionSize| {
            if pos == RegionPos::new(1, 0) {
                return Err(GenerationError::Generator {
                    region: pos,
                    message: "broken".into(),
                });
            }
            Ok(Region::generate(pos, size, |_, _, _| {}))
        };
        let cache = RegionCache::new(generator, RegionSize::new(1), 2, 8);
        let result = cache.visit(0, 0, 32, 16, |_, _, _| {});
        assert_eq!(
            result.map_err(|e| e.region()),
            Err(RegionPos::new(1, 0)),
            "bulk visit must not drop a failed region silently"
        );
    }

    #[test]
    fn test_panic_surfaces_as_error() {
        let generator = |_pos: RegionPos, _size: RegionSize| -> Result<Region, GenerationError> {
            panic!("noise exploded")
        };
        let cache = RegionCache::new(generator, RegionSize::new(1), 1, 8);
        let err = cache
            .get_region(RegionPos::new(0, 0))
            .expect_err("panic becomes an error");
        match err {
            GenerationError::Panicked { message, .. } => assert_eq!(message, "noise exploded"),
            other => panic!("unexpected error {other:?}"),
        }

        // The worker survives the panic.
        let err = cache.get_region(RegionPos::new(1, 0)).expect_err("panics again");
        assert!(matches!(err, GenerationError::Panicked { .. }));
    }

    #[test]
    fn test_wrong_region_from_generator_is_rejected() {
        let generator = |_pos: RegionPos, size: RegionSize| -> Result<Region, GenerationError> {
            Ok(Region::generate(RegionPos::new(0, 0), size, |_, _, _| {}))
        };
        let cache = RegionCache::new(generator, RegionSize::new(1), 1, 8);
        assert!(cache.get_region(RegionPos::new(5, 5)).is_err());
    }

    #[test]
    fn test_lru_eviction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 2);
        let a = RegionPos::new(0, 0);
        let b = RegionPos::new(1, 0);
        let c = RegionPos::new(2, 0);

        cache.get_region(a).expect("a");
        cache.get_region(b).expect("b");
        cache.get_region(a).expect("a again");
        cache.get_region(c).expect("c");

        assert!(cache.contains(a), "recently used region evicted");
        assert!(!cache.contains(b), "least recently used region kept");
        assert!(cache.contains(c));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evicted, 1);

        for x in 3..8 {
            cache.get_region(RegionPos::new(x, 0)).expect("generated");
        }
        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.stats().evicted, 6);
    }

    #[test]
    fn test_visit_wider_than_capacity_stays_within_capacity() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = RegionCache::new(
            coordinate_generator(Arc::clone(&calls), Duration::from_millis(20)),
            RegionSize::new(1),
            2,
            2,
        );

        let mut visited = 0;
        cache
            .visit(0, 0, 64, 64, |_, _, _| visited += 1)
            .expect("visit succeeds");

        assert_eq!(visited, 64 * 64);
        assert_eq!(calls.load(Ordering::SeqCst), 16);
        assert!(
            cache.len() <= cache.capacity(),
            "{} regions cached with capacity {}",
            cache.len(),
            cache.capacity()
        );
        assert_eq!(cache.stats().evicted, 16 - cache.len() as u64);
    }

    #[test]
    fn test_completed_prefetches_are_evicted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = RegionCache::new(
            coordinate_generator(Arc::clone(&calls), Duration::from_millis(10)),
            RegionSize::new(1),
            2,
            3,
        );

        let handles: Vec<_> = (0..10)
            .map(|x| cache.get_region_async(RegionPos::new(x, 0)))
            .collect();
        for handle in &handles {
            handle.wait().expect("generated");
        }

        // Workers evict after publishing each region.
        let deadline = Instant::now() + Duration::from_secs(5);
        while cache.len() > cache.capacity() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(
            cache.len() <= cache.capacity(),
            "{} regions cached with capacity {}",
            cache.len(),
            cache.capacity()
        );
        assert!(cache.contains(RegionPos::new(9, 0)), "most recent region evicted");
    }

    #[test]
    fn test_evicted_region_handle_stays_valid() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 1);
        let held = cache.get_region(RegionPos::new(0, 0)).expect("generated");
        cache.get_region(RegionPos::new(1, 0)).expect("generated");
        assert!(!cache.contains(RegionPos::new(0, 0)));
        assert_eq!(held.pos(), RegionPos::new(0, 0));

        cache.get_region(RegionPos::new(0, 0)).expect("regenerated");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_get_chunk_negative_coordinates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 2, 8);
        let chunk = cache.get_chunk(ChunkPos::new(-3, 5)).expect("chunk");
        assert_eq!(chunk.pos(), ChunkPos::new(-3, 5));
        assert_eq!(chunk.region().pos(), RegionPos::new(-2, 2));
        for (x, z, cell) in chunk.columns() {
            assert_eq!(ChunkPos::of_block(x, z), chunk.pos());
            assert_eq!((cell.value, cell.temperature), (x as f32, z as f32));
        }
    }

    #[test]
    fn test_queue_region_prefetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = cache(&calls, 1, 8);
        let pos = RegionPos::new(7, 7);
        cache.queue_region(pos);
        assert!(cache.contains(pos));
        cache.get_region(pos).expect("prefetched");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_from_settings_validates() {
        let mut settings = Settings::default();
        settings.generator.region_chunks = 3;
        let calls = Arc::new(AtomicUsize::new(0));
        let result = RegionCache::with_generator(
            &settings,
            coordinate_generator(calls, Duration::ZERO),
        );
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
