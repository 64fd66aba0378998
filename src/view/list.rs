use std::collections::HashMap;

use tokio::sync::watch;

use crate::model::Pokemon;
use crate::store::Store;

/// List filter parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Every cached entry passes
    All,
    /// Only entries with the favorite flag set
    Favorites,
}

/// List sort parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sort {
    /// Ascending numeric id
    ById,
    /// Ascending case-sensitive name
    NameAsc,
    /// Descending case-sensitive name
    NameDesc,
}

impl Sort {
    /// The cycle the sort toggle walks: ById → NameAsc → NameDesc → ById
    pub fn next(self) -> Self {
        match self {
            Sort::ById => Sort::NameAsc,
            Sort::NameAsc => Sort::NameDesc,
            Sort::NameDesc => Sort::ById,
        }
    }
}

/// Filter and order one snapshot. Pure; the reactive wrapper below reruns
/// this on every input change.
pub fn project_list(snapshot: &HashMap<u32, Pokemon>, filter: Filter, sort: Sort) -> Vec<Pokemon> {
    let mut list: Vec<Pokemon> = snapshot
        .values()
        .filter(|p| match filter {
            Filter::All => true,
            Filter::Favorites => p.favorite,
        })
        .cloned()
        .collect();

    match sort {
        Sort::ById => list.sort_unstable_by_key(|p| p.id),
        Sort::NameAsc => list.sort_unstable_by(|a, b| a.name.cmp(&b.name)),
        Sort::NameDesc => list.sort_unstable_by(|a, b| b.name.cmp(&a.name)),
    }

    list
}

/// Recomputing list projection.
///
/// A background task re-runs [`project_list`] whenever the primary store
/// commits or a parameter changes, and republishes the ordered sequence
/// through a watch channel. The task exits once the store and every observer
/// of the view are gone.
pub struct ListView {
    out: watch::Receiver<Vec<Pokemon>>,
    filter_tx: watch::Sender<Filter>,
    sort_tx: watch::Sender<Sort>,
}

impl ListView {
    pub fn spawn(store: &Store<u32, Pokemon>, filter: Filter, sort: Sort) -> Self {
        let mut map_rx = store.observe();
        let (filter_tx, mut filter_rx) = watch::channel(filter);
        let (sort_tx, mut sort_rx) = watch::channel(sort);

        let initial = {
            let snapshot = map_rx.borrow_and_update();
            project_list(&snapshot, filter, sort)
        };
        let (out_tx, out) = watch::channel(initial);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = map_rx.changed() => if changed.is_err() { break },
                    changed = filter_rx.changed() => if changed.is_err() { break },
                    changed = sort_rx.changed() => if changed.is_err() { break },
                }

                let filter = *filter_rx.borrow_and_update();
                let sort = *sort_rx.borrow_and_update();
                let list = {
                    let snapshot = map_rx.borrow_and_update();
                    project_list(&snapshot, filter, sort)
                };

                // Err means every view observer is gone
                if out_tx.send(list).is_err() {
                    break;
                }
            }
        });

        Self {
            out,
            filter_tx,
            sort_tx,
        }
    }

    /// Subscribe to recomputed sequences
    pub fn observe(&self) -> watch::Receiver<Vec<Pokemon>> {
        self.out.clone()
    }

    /// Most recently published sequence
    pub fn current(&self) -> Vec<Pokemon> {
        self.out.borrow().clone()
    }

    pub fn filter(&self) -> Filter {
        *self.filter_tx.borrow()
    }

    pub fn sort(&self) -> Sort {
        *self.sort_tx.borrow()
    }

    pub fn set_filter(&self, filter: Filter) {
        let _ = self.filter_tx.send(filter);
    }

    pub fn set_sort(&self, sort: Sort) {
        let _ = self.sort_tx.send(sort);
    }

    /// Advance the sort parameter one step along its cycle
    pub fn cycle_sort(&self) -> Sort {
        let mut next = Sort::ById;
        self.sort_tx.send_modify(|sort| {
            *sort = sort.next();
            next = *sort;
        });
        next
    }
}
