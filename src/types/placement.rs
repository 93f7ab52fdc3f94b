// src/types/placement.rs

use crate::shared_types::Direction;
use serde::{Deserialize, Serialize};

/// Where the next top/bottom bar pair goes. Y grows downward from the top
/// of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Running count of placements in the session, starting at 1.
    pub sequence: u64,
    pub gap_center_y: f64,
    pub gap_size: f64,
    /// The trade that spawned this pair. Styling only.
    pub amount: u64,
    pub direction: Direction,
    /// Whether the deviation bound was applied to the center.
    pub constrained: bool,
}

impl ObstaclePlacement {
    /// Height of the bar hanging from the top edge.
    pub fn top_bar_height(&self) -> f64 {
        self.gap_center_y - self.gap_size / 2.0
    }

    /// Y where the bar standing on the bottom edge begins.
    pub fn bottom_bar_top(&self) -> f64 {
        self.gap_center_y + self.gap_size / 2.0
    }
}
