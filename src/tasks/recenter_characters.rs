//! Shift character placements onto the shared local-space center.
//!
//! The centroid comes from outdoor characters only; characters inside a
//! building sit in their building's frame and would drag the estimate toward
//! whatever corner the interiors cluster in. Once the offset is established
//! it moves every placement with known horizontal coordinates, indoor ones
//! included. Rows missing x or z stay where they are.

use anyhow::Result;

use crate::db::{CharacterUpdate, WorldDb};
use crate::geometry::{centroid, Ground};
use crate::report::{self, RunMode};
use crate::settings::LOCAL_TARGET_CENTER;
use crate::tasks::RunSummary;
use crate::world::Settlement;

pub struct RecenterCharacters {
    pub target: Ground,
}

impl Default for RecenterCharacters {
    fn default() -> Self {
        Self {
            target: LOCAL_TARGET_CENTER,
        }
    }
}

impl RecenterCharacters {
    pub fn run(&self, db: &mut WorldDb, mode: RunMode) -> Result<RunSummary> {
        let settlements = db.settlements()?;
        println!("recentering characters in {} settlements", settlements.len());

        let mut summary = RunSummary::default();
        for settlement in &settlements {
            summary.settlements_seen += 1;
            self.recenter_one(db, mode, settlement, &mut summary)?;
        }
        Ok(summary)
    }

    fn recenter_one(
        &self,
        db: &mut WorldDb,
        mode: RunMode,
        settlement: &Settlement,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let characters = db.settlement_characters(settlement.id)?;
        if characters.is_empty() {
            report::warn_skip(settlement.id, &settlement.name, "no characters");
            summary.settlements_skipped += 1;
            return Ok(());
        }

        let outdoor: Vec<Ground> = characters
            .iter()
            .filter(|c| c.is_outdoor())
            .filter_map(|c| c.ground())
            .collect();
        let Some(center) = centroid(&outdoor) else {
            report::warn_skip(
                settlement.id,
                &settlement.name,
                "no outdoor characters with known coordinates",
            );
            summary.settlements_skipped += 1;
            return Ok(());
        };
        let offset = center.offset_to(self.target);

        report::settlement_header(settlement.id, &settlement.name);
        report::center_line("current center", center);
        report::center_line("target center", self.target);
        report::center_line("offset", offset);
        println!(
            "  {} characters, {} outdoor",
            characters.len(),
            outdoor.len()
        );

        let mut updates = Vec::new();
        let mut sample = None;
        for character in &characters {
            let Some(ground) = character.ground() else {
                continue;
            };
            let moved = ground.shifted_by(offset);
            if sample.is_none() && character.is_outdoor() {
                sample = Some((character.id, ground, moved));
            }
            updates.push(CharacterUpdate {
                character_id: character.id,
                x: moved.x,
                height: character.height,
                z: moved.z,
            });
        }

        if let Some((id, before, after)) = sample {
            report::sample_move(&format!("character {id}"), before, after);
        }

        summary.rows += updates.len();
        summary.settlements_updated += 1;
        if mode.is_apply() {
            let written = db.write_character_positions(settlement.id, &updates)?;
            report::batch_result(mode, written, "characters");
        } else {
            report::batch_result(mode, updates.len(), "characters");
        }
        Ok(())
    }
}
