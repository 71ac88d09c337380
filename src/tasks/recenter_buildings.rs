//! Shift every settlement's buildings onto the shared local-space center.

use anyhow::Result;

use crate::db::{BuildingUpdate, WorldDb};
use crate::geometry::{centroid, Ground};
use crate::report::{self, RunMode};
use crate::settings::LOCAL_TARGET_CENTER;
use crate::tasks::RunSummary;
use crate::world::Settlement;

pub struct RecenterBuildings {
    pub target: Ground,
}

impl Default for RecenterBuildings {
    fn default() -> Self {
        Self {
            target: LOCAL_TARGET_CENTER,
        }
    }
}

impl RecenterBuildings {
    pub fn run(&self, db: &mut WorldDb, mode: RunMode) -> Result<RunSummary> {
        let settlements = db.settlements()?;
        println!("recentering {} settlements", settlements.len());

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
        let buildings = db.settlement_buildings(settlement.id)?;
        let points: Vec<_> = buildings.iter().map(|b| b.ground()).collect();
        let Some(center) = centroid(&points) else {
            report::warn_skip(settlement.id, &settlement.name, "no buildings");
            summary.settlements_skipped += 1;
            return Ok(());
        };
        let offset = center.offset_to(self.target);

        report::settlement_header(settlement.id, &settlement.name);
        report::center_line("current center", center);
        report::center_line("target center", self.target);
        report::center_line("offset", offset);
        println!("  {} buildings", buildings.len());

        // Height passes through untouched; only the ground plane moves.
        let updates: Vec<BuildingUpdate> = buildings
            .iter()
            .map(|building| BuildingUpdate {
                building_id: building.id,
                x: building.x + offset.x,
                z: building.z + offset.z,
                height: building.height,
            })
            .collect();

        if let (Some(first), Some(update)) = (buildings.first(), updates.first()) {
            report::sample_move(
                &first.name,
                first.ground(),
                Ground::new(update.x, update.z),
            );
        }

        summary.rows += updates.len();
        summary.settlements_updated += 1;
        if mode.is_apply() {
            let written = db.write_building_positions(&updates)?;
            report::batch_result(mode, written, "buildings");
        } else {
            report::batch_result(mode, updates.len(), "buildings");
        }
        Ok(())
    }
}
