//! Process-wide build claims.
//!
//! At most one build of a given `(dictionary, name)` runs at a time; other requests wait for it.
//! Every build runs inside a [`Chain`]: the keys being built on its behalf, innermost first.
//! Nested requests inherit the chain, on the building thread through a thread-local and on helper
//! threads through the park handle the factory received. A request fails as a cycle instead of
//! blocking when the key is already in its chain, or when the build that owns the key waits,
//! directly or through its nested builds, on a key of the requester's chain.

use fxhash::{FxHashMap, FxHashSet};
use parking_lot::{Condvar, Mutex};
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

static BOARD: LazyLock<ClaimBoard> = LazyLock::new(ClaimBoard::default);
static NEXT_DICTIONARY: AtomicU64 = AtomicU64::new(1);
static NEXT_FRAME: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT: RefCell<Chain> = RefCell::new(Chain::default());
}

pub(crate) fn next_dictionary_id() -> u64 {
    NEXT_DICTIONARY.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ClaimKey {
    dictionary: u64,
    name: Arc<str>,
}

impl ClaimKey {
    pub(crate) fn new(dictionary: u64, name: &str) -> Self {
        Self { dictionary, name: name.into() }
    }
}

#[derive(Debug)]
struct Frame {
    id: u64,
    key: ClaimKey,
    parent: Chain,
}

/// The builds a request is made on behalf of. Empty outside of any build.
#[derive(Debug, Clone, Default)]
pub(crate) struct Chain(Option<Arc<Frame>>);

impl Chain {
    /// The chain of the build running on this thread.
    pub(crate) fn current() -> Self {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Makes this the current chain of the thread until the scope is dropped.
    pub(crate) fn enter(&self) -> ChainScope {
        let previous = CURRENT.with(|current| current.replace(self.clone()));
        ChainScope { previous }
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.0.as_deref(), |frame| frame.parent.0.as_deref())
    }

    fn innermost(&self) -> Option<u64> {
        self.0.as_ref().map(|frame| frame.id)
    }
}

#[derive(Debug)]
pub(crate) struct ChainScope {
    previous: Chain,
}

impl Drop for ChainScope {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

#[derive(Debug)]
pub(crate) enum Claim<T> {
    /// Someone else finished the build while we were waiting.
    Published(T),
    /// The caller builds; dropping the guard releases the claim.
    Owned(ClaimGuard),
}

#[derive(Debug)]
pub(crate) struct Cycle;

/// Claims `key` for a build nested in `chain`.
///
/// `published` is re-checked under the board lock before every claim attempt, so a request woken
/// after a successful build sees the result instead of building twice.
pub(crate) fn claim<T>(
    key: ClaimKey,
    chain: &Chain,
    published: impl Fn() -> Option<T>,
) -> Result<Claim<T>, Cycle> {
    if chain.frames().any(|frame| frame.key == key) {
        return Err(Cycle);
    }

    let mut board = BOARD.state.lock();
    loop {
        if let Some(entity) = published() {
            return Ok(Claim::Published(entity));
        }

        match board.owners.get(&key).copied() {
            None => {
                let id = NEXT_FRAME.fetch_add(1, Ordering::Relaxed);
                board.owners.insert(key.clone(), Owner { frame: id, parent: chain.innermost() });
                let frame = Frame { id, key, parent: chain.clone() };
                return Ok(Claim::Owned(ClaimGuard { frame: Arc::new(frame) }));
            }
            Some(owner) if board.waits_on(owner.frame, chain) => return Err(Cycle),
            Some(_) => {
                let ticket = NEXT_FRAME.fetch_add(1, Ordering::Relaxed);
                board.waiting.insert(ticket, (chain.innermost(), key.clone()));
                BOARD.released.wait(&mut board);
                board.waiting.remove(&ticket);
            }
        }
    }
}

#[derive(Debug, Default)]
struct ClaimBoard {
    state: Mutex<BoardState>,
    released: Condvar,
}

#[derive(Debug, Clone, Copy)]
struct Owner {
    frame: u64,
    parent: Option<u64>,
}

#[derive(Debug, Default)]
struct BoardState {
    owners: FxHashMap<ClaimKey, Owner>,
    /// Wait ticket -> (innermost build of the waiter, awaited key).
    waiting: FxHashMap<u64, (Option<u64>, ClaimKey)>,
}

impl BoardState {
    /// Whether finishing `frame` depends on a build of `chain`.
    ///
    /// A build depends on its nested builds and on the owners of every key that it or a nested
    /// build waits for.
    fn waits_on(&self, frame: u64, chain: &Chain) -> bool {
        let ours: FxHashSet<u64> = chain.frames().map(|frame| frame.id).collect();
        let mut pending = vec![frame];
        let mut seen = FxHashSet::default();

        while let Some(frame) = pending.pop() {
            if ours.contains(&frame) {
                return true;
            }
            if !seen.insert(frame) {
                continue;
            }
            pending.extend(
                self.owners
                    .values()
                    .filter(|owner| owner.parent == Some(frame))
                    .map(|owner| owner.frame),
            );
            pending.extend(
                self.waiting
                    .values()
                    .filter(|(waiter, _)| *waiter == Some(frame))
                    .filter_map(|(_, key)| self.owners.get(key))
                    .map(|owner| owner.frame),
            );
        }
        false
    }
}

#[derive(Debug)]
pub(crate) struct ClaimGuard {
    frame: Arc<Frame>,
}

impl ClaimGuard {
    /// The chain builds nested in this claim run in.
    pub(crate) fn chain(&self) -> Chain {
        Chain(Some(Arc::clone(&self.frame)))
    }
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        BOARD.state.lock().owners.remove(&self.frame.key);
        BOARD.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(key: &ClaimKey, chain: &Chain) -> ClaimGuard {
        match claim::<()>(key.clone(), chain, || None) {
            Ok(Claim::Owned(guard)) => guard,
            other => panic!("expected to own {key:?}, got {other:?}"),
        }
    }

    #[test]
    fn reentrant_claim_is_a_cycle() {
        let key = ClaimKey::new(next_dictionary_id(), "loop");
        let guard = owned(&key, &Chain::default());

        assert!(claim::<()>(key.clone(), &guard.chain(), || None).is_err());
        drop(guard);
        owned(&key, &Chain::default());
    }

    #[test]
    fn published_value_short_circuits() {
        let key = ClaimKey::new(next_dictionary_id(), "ready");
        assert!(matches!(claim(key, &Chain::default(), || Some(7)), Ok(Claim::Published(7))));
    }

    #[test]
    fn dictionaries_do_not_share_claims() {
        let first = ClaimKey::new(next_dictionary_id(), "same");
        let second = ClaimKey::new(next_dictionary_id(), "same");

        let held = owned(&first, &Chain::default());
        owned(&second, &held.chain());
    }

    #[test]
    fn scope_restores_the_previous_chain() {
        let guard = owned(&ClaimKey::new(next_dictionary_id(), "outer"), &Chain::default());

        {
            let _scope = guard.chain().enter();
            assert_eq!(Chain::current().innermost(), guard.chain().innermost());
        }
        assert!(Chain::current().innermost().is_none());
    }

    /// `a` waits on `b`; a build nested in `b` asking for `a` closes the loop.
    #[test]
    fn waits_of_nested_builds_are_followed() {
        let a = ClaimKey::new(next_dictionary_id(), "a");
        let b = ClaimKey::new(next_dictionary_id(), "b");
        let owner_a = owned(&a, &Chain::default());
        let owner_b = owned(&b, &Chain::default());
        let inner = owned(&ClaimKey::new(next_dictionary_id(), "nested"), &owner_b.chain());

        BOARD.state.lock().waiting.insert(u64::MAX, (owner_a.chain().innermost(), b));
        let outcome = claim::<()>(a, &inner.chain(), || None);
        BOARD.state.lock().waiting.remove(&u64::MAX);

        assert!(outcome.is_err());
    }
}
