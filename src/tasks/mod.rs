mod recenter_buildings;
mod recenter_characters;
mod stamp_layout;

pub use recenter_buildings::RecenterBuildings;
pub use recenter_characters::RecenterCharacters;
pub use stamp_layout::StampLayout;

/// Per-run bookkeeping shared by the three tasks. `rows` counts update tuples
/// computed, whether or not the run wrote them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub settlements_seen: usize,
    pub settlements_updated: usize,
    pub settlements_skipped: usize,
    pub rows: usize,
}
