pub const LINES_PER_LEVEL: u32 = 10;
pub const BASE_DROP_INTERVAL_MS: u32 = 1000;
pub const DROP_INTERVAL_STEP_MS: u32 = 100;
pub const MIN_DROP_INTERVAL_MS: u32 = 100;
const POINTS_PER_ROW: u32 = 100;

/// Score, cleared lines and the speed they imply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progression {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Progression {
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_INTERVAL_MS,
        }
    }

    /// Applies one sweep's worth of cleared rows. A batch of `k` rows scores `100 * k * k`.
    /// Returns true when the level went up.
    pub fn record_clear(&mut self, rows: u32) -> bool {
        if rows == 0 {
            return false;
        }
        let previous_level = self.level;
        self.lines += rows;
        self.score += POINTS_PER_ROW * rows * rows;
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_for_level(self.level);
        self.level > previous_level
    }
}

pub fn level_for_lines(lines: u32) -> u32 {
    1 + lines / LINES_PER_LEVEL
}

/// Gravity period: 1000ms at level 1, 100ms faster per level, never under 100ms.
pub fn drop_interval_for_level(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_INTERVAL_MS
        .saturating_sub(speedup)
        .max(MIN_DROP_INTERVAL_MS)
}
