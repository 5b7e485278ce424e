// patterns.rs - Starting patterns sized for the 32x24 grid

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::{info, warn};

use crate::error::GridError;
use crate::grid::Grid;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],  // (x, y) of each live cell
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(3, 2), (4, 3), (2, 4), (3, 4), (4, 4)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(15, 11), (15, 12), (15, 13)],
    },
    Pattern {
        name: "Toad",
        cells: &[(14, 11), (15, 11), (16, 11), (13, 12), (14, 12), (15, 12)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(10, 8), (11, 8), (10, 9), (11, 9), (12, 10), (13, 10), (12, 11), (13, 11)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (11, 5), (12, 5), (13, 5), (17, 5), (18, 5), (19, 5),
            (9, 7), (14, 7), (16, 7), (21, 7),
            (9, 8), (14, 8), (16, 8), (21, 8),
            (9, 9), (14, 9), (16, 9), (21, 9),
            (11, 10), (12, 10), (13, 10), (17, 10), (18, 10), (19, 10),
            // Bottom half (mirrored)
            (11, 12), (12, 12), (13, 12), (17, 12), (18, 12), (19, 12),
            (9, 13), (14, 13), (16, 13), (21, 13),
            (9, 14), (14, 14), (16, 14), (21, 14),
            (9, 15), (14, 15), (16, 15), (21, 15),
            (11, 17), (12, 17), (13, 17), (17, 17), (18, 17), (19, 17),
        ],
    },
    Pattern {
        name: "Lightweight spaceship",
        cells: &[(3, 14), (6, 14), (2, 15), (2, 16), (6, 16), (2, 17), (3, 17), (4, 17), (5, 17)],
    },
];

impl Grid {
    /// Clears the grid back to setup and brings the pattern's cells alive.
    /// Cells that fall outside the grid are skipped.
    pub fn apply_pattern(&mut self, pattern: &Pattern) -> Result<(), GridError> {
        self.reseed(|grid| {
            for &(x, y) in pattern.cells {
                grid.live_at(x, y);
            }
        })
        .inspect_err(|err| warn!(pattern = pattern.name, %err, "pattern not loaded"))?;

        info!(pattern = pattern.name, population = self.population(), "pattern loaded");
        Ok(())
    }

    /// Clears the grid back to setup and brings roughly a third of the
    /// cells alive, deterministically for a given seed.
    pub fn apply_random(&mut self, seed_value: u64) -> Result<(), GridError> {
        self.reseed(|grid| {
            let mut hasher = DefaultHasher::new();
            seed_value.hash(&mut hasher);
            let mut seed = hasher.finish();

            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                    if (seed >> 16) % 3 == 0 {
                        grid.live_at(x, y);
                    }
                }
            }
        })
        .inspect_err(|err| warn!(%err, "random fill refused"))?;

        info!(seed = seed_value, population = self.population(), "random pattern loaded");
        Ok(())
    }
}
