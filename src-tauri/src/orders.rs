//! Order collection pipeline and shared board state.
//!
//! The pipeline is a pure function: filter by status scope, filter by search
//! text, then sort, always starting from the full snapshot. Views never feed
//! back into the snapshot, so repeated filtering cannot compound.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Mutex;

use crate::models::{Order, OrderStatus};

/// Orders missing `created_at` sort as the oldest possible entries.
const EPOCH_DATE: &str = "1970-01-01";

/// Which statuses a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusScope {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusScope {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "" | "all" | "All" => Ok(StatusScope::All),
            other => OrderStatus::from_str(other).map(StatusScope::Only),
        }
    }

    pub fn matches(self, order: &Order) -> bool {
        match self {
            StatusScope::All => true,
            StatusScope::Only(status) => order.status == status,
        }
    }

    pub fn label(self) -> String {
        match self {
            StatusScope::All => "All".to_string(),
            StatusScope::Only(status) => status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceDesc,
    PriceAsc,
}

fn matches_query(order: &Order, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&order.nama_pemesan)
        || order.nama_product.as_deref().map(hit).unwrap_or(false)
        || hit(&order.telp)
        || hit(order.status.as_str())
}

/// Computes the visible order list from the full snapshot. Sorts are stable,
/// so orders sharing a key keep their server-given relative order.
pub fn select(all: &[Order], scope: StatusScope, query: &str, sort: SortOrder) -> Vec<Order> {
    let needle = query.trim().to_lowercase();
    let mut view: Vec<Order> = all
        .iter()
        .filter(|o| scope.matches(o))
        .filter(|o| needle.is_empty() || matches_query(o, &needle))
        .cloned()
        .collect();

    let created_key = |o: &Order| o.created_at.as_deref().unwrap_or(EPOCH_DATE).to_string();
    match sort {
        SortOrder::Newest => view.sort_by(|a, b| created_key(b).cmp(&created_key(a))),
        SortOrder::Oldest => view.sort_by(|a, b| created_key(a).cmp(&created_key(b))),
        SortOrder::PriceDesc => view.sort_by(|a, b| b.harga.cmp(&a.harga)),
        SortOrder::PriceAsc => view.sort_by(|a, b| a.harga.cmp(&b.harga)),
    }
    view
}

#[derive(Default)]
struct BoardInner {
    all: Vec<Order>,
    scope: StatusScope,
    query: String,
    sort: SortOrder,
    generation: u64,
}

/// Shared snapshot of orders plus the active view settings. A generation
/// counter tags each load; results arriving for an older generation are
/// dropped so a slow fetch cannot overwrite a newer one.
#[derive(Default)]
pub struct OrderBoard {
    inner: Mutex<BoardInner>,
}

pub struct BoardView {
    pub orders: Vec<Order>,
    pub scope: StatusScope,
    pub query: String,
    pub sort: SortOrder,
}

impl OrderBoard {
    /// Starts a load for the given scope and returns the token the caller
    /// must present when installing results.
    pub fn begin_load(&self, scope: StatusScope) -> u64 {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.generation += 1;
        inner.scope = scope;
        inner.generation
    }

    /// Installs fetched orders. Returns false when a newer load superseded
    /// this one, in which case the snapshot is left untouched.
    pub fn install(&self, token: u64, orders: Vec<Order>) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.generation != token {
            return false;
        }
        inner.all = orders;
        true
    }

    pub fn set_query(&self, query: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.query = query.to_string();
    }

    pub fn set_sort(&self, sort: SortOrder) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sort = sort;
    }

    pub fn set_scope(&self, scope: StatusScope) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.scope = scope;
    }

    /// Bumps the generation without loading, so in-flight fetches from a
    /// closed screen are discarded when they land.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.generation += 1;
        inner.all.clear();
        inner.query.clear();
    }

    /// Recomputes the visible list from the current snapshot and settings.
    pub fn selection(&self) -> BoardView {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        BoardView {
            orders: select(&inner.all, inner.scope, &inner.query, inner.sort),
            scope: inner.scope,
            query: inner.query.clone(),
            sort: inner.sort,
        }
    }
}
