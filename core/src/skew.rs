//! Pure skew-selection logic: modular-arithmetic bucketing, status
//! threshold tables, and hot-key picks.
//!
//! RULE: Nothing in this module touches the database. Every function is a
//! pure mapping from (row index, scale) or (roll) to a category, so the
//! distribution logic is unit-testable in isolation and the generated
//! dataset's shape is fixed by construction, not by sampling luck.

use crate::rng::PhaseRng;
use crate::types::RowId;

/// The three deliberately over-represented client identifiers and their
/// shares of the entity population. Together they hold 12% of all rows.
pub const MEGA_CLIENTS: [(&str, u64); 3] = [
    ("Client-MEGA-01", 5),
    ("Client-MEGA-02", 4),
    ("Client-MEGA-03", 3),
];

/// Which client a generated entity row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientBucket {
    /// One of the mega clients.
    Mega(&'static str),
    /// Slot in the ordinary-client pool.
    Pool(u64),
}

/// Assign row index `n` (1-based) of `total` entity rows to a client.
/// The first 5% of indexes go to MEGA-01, the next 4% to MEGA-02, the
/// next 3% to MEGA-03; the remainder spreads over a fixed-size pool via
/// `n mod pool_size`. Integer arithmetic keeps the split exact.
pub fn client_bucket(n: u64, total: u64, pool_size: u64) -> ClientBucket {
    let mut cut = 0;
    for (name, pct) in MEGA_CLIENTS {
        cut += total * pct / 100;
        if n <= cut {
            return ClientBucket::Mega(name);
        }
    }
    ClientBucket::Pool(n % pool_size)
}

/// Fixed weighted country distribution over `n mod 10`:
/// 60% US, 20% GB, 10% DE, 10% SG. Deterministic given the row index, so
/// the country split is exact at any scale, not merely convergent.
pub fn country_bucket(n: u64) -> &'static str {
    match n % 10 {
        0..=5 => "US",
        6 | 7 => "GB",
        8 => "DE",
        _ => "SG",
    }
}

/// Risk tier in [1, 5], cycled over the row index.
pub fn risk_tier(n: u64) -> i64 {
    (n % 5) as i64 + 1
}

/// Invoice currency, deterministic from the owning entity id.
pub fn currency_for_entity(entity_id: RowId) -> &'static str {
    match entity_id % 4 {
        0 => "USD",
        1 => "EUR",
        2 => "GBP",
        _ => "SGD",
    }
}

/// Payment method, cycled over the payment row index.
pub fn payment_method(n: u64) -> &'static str {
    match n % 4 {
        0 => "ach",
        1 => "wire",
        2 => "card",
        _ => "check",
    }
}

/// Pick a parent id with hot-subrange bias: with probability `hot_share`
/// the id lands in the low `hot_fraction` slice of the id space, otherwise
/// anywhere in [1, parent_count]. The hot slice never shrinks below one id,
/// so every generated id stays inside the parent range by construction.
pub fn hot_parent_id(
    rng: &mut PhaseRng,
    parent_count: u64,
    hot_share: f64,
    hot_fraction: f64,
) -> RowId {
    debug_assert!(parent_count > 0);
    let hot_max = ((parent_count as f64 * hot_fraction).ceil() as u64)
        .clamp(1, parent_count);
    let id = if rng.chance(hot_share) {
        1 + rng.next_u64_below(hot_max)
    } else {
        1 + rng.next_u64_below(parent_count)
    };
    id as RowId
}

/// Highest id inside the hot subrange for a given parent scale.
pub fn hot_range_max(parent_count: u64, hot_fraction: f64) -> RowId {
    (((parent_count as f64 * hot_fraction).ceil() as u64).clamp(1, parent_count)) as RowId
}

// ── Status threshold tables ────────────────────────────────────────
//
// Every status is assigned by mapping a uniform roll in [0, 100) through
// fixed cumulative thresholds. The diagnostic queries depend on these
// shares staying put: an Overdue filter must keep selecting ~6% of rows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingStatus {
    Pending,
    Filed,
    Overdue,
    Rejected,
    Cancelled,
}

impl FilingStatus {
    /// <60 Pending, <90 Filed, <96 Overdue, <99 Rejected, else Cancelled.
    pub fn from_roll(roll: u64) -> Self {
        match roll {
            0..=59 => Self::Pending,
            60..=89 => Self::Filed,
            90..=95 => Self::Overdue,
            96..=98 => Self::Rejected,
            _ => Self::Cancelled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Filed => "Filed",
            Self::Overdue => "Overdue",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the filing was actually submitted (drives filed_date).
    pub fn was_submitted(&self) -> bool {
        matches!(self, Self::Filed | Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Issued,
    Paid,
    Overdue,
    Disputed,
    Cancelled,
}

impl InvoiceStatus {
    /// <45 Issued, <85 Paid, <94 Overdue, <98 Disputed, else Cancelled.
    pub fn from_roll(roll: u64) -> Self {
        match roll {
            0..=44 => Self::Issued,
            45..=84 => Self::Paid,
            85..=93 => Self::Overdue,
            94..=97 => Self::Disputed,
            _ => Self::Cancelled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issued => "Issued",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Disputed => "Disputed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Settled,
    Pending,
    Failed,
    Reversed,
}

impl PaymentStatus {
    /// <85 Settled, <93 Pending, <98 Failed, else Reversed.
    pub fn from_roll(roll: u64) -> Self {
        match roll {
            0..=84 => Self::Settled,
            85..=92 => Self::Pending,
            93..=97 => Self::Failed,
            _ => Self::Reversed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settled => "Settled",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Reversed => "Reversed",
        }
    }
}
