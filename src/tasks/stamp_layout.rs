//! Stamp a reference settlement's building layout onto every other settlement.
//!
//! The pattern is extracted once, centroid-relative. Each target settlement
//! keeps its own current centroid and receives the pattern under one shared
//! random rotation and scale, with independent per-axis jitter per building,
//! so no two settlements end up pixel-identical.

use anyhow::Result;

use crate::db::{BuildingUpdate, WorldDb};
use crate::geometry::{centroid, Ground};
use crate::pattern::LayoutPattern;
use crate::report::{self, RunMode};
use crate::rng::StampRng;
use crate::settings::StampSettings;
use crate::tasks::RunSummary;
use crate::world::{Settlement, SettlementId};

pub struct StampLayout {
    pub reference: SettlementId,
    pub settings: StampSettings,
}

impl StampLayout {
    pub fn new(reference: SettlementId, settings: StampSettings) -> Self {
        Self {
            reference,
            settings,
        }
    }

    pub fn run(&self, db: &mut WorldDb, rng: &mut StampRng, mode: RunMode) -> Result<RunSummary> {
        let reference_buildings = db.settlement_buildings(self.reference)?;
        let pattern = LayoutPattern::from_buildings(&reference_buildings)?;
        println!(
            "pattern: {} buildings around ({:.2}, {:.2}) from settlement {}",
            pattern.len(),
            pattern.anchor().x,
            pattern.anchor().z,
            self.reference
        );

        let targets = db.settlements_except(self.reference)?;
        println!("stamping {} settlements", targets.len());

        let mut summary = RunSummary::default();
        for settlement in &targets {
            summary.settlements_seen += 1;
            self.stamp_one(db, rng, mode, settlement, &pattern, &mut summary)?;
        }
        Ok(summary)
    }

    fn stamp_one(
        &self,
        db: &mut WorldDb,
        rng: &mut StampRng,
        mode: RunMode,
        settlement: &Settlement,
        pattern: &LayoutPattern,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let buildings = db.settlement_buildings(settlement.id)?;
        let points: Vec<_> = buildings.iter().map(|b| b.ground()).collect();
        let Some(center) = centroid(&points) else {
            report::warn_skip(settlement.id, &settlement.name, "no buildings");
            summary.settlements_skipped += 1;
            return Ok(());
        };

        // One draw per settlement, shared by all its buildings.
        let rotation = rng.in_range(
            -self.settings.rotation_range_degrees,
            self.settings.rotation_range_degrees,
        );
        let scale = rng.in_range(self.settings.scale_min, self.settings.scale_max);

        report::settlement_header(settlement.id, &settlement.name);
        report::center_line("center", center);
        println!(
            "  {} buildings, rotation {rotation:.1} deg, scale {scale:.2}",
            buildings.len()
        );

        let mut updates = Vec::with_capacity(buildings.len());
        for (i, building) in buildings.iter().enumerate() {
            let placed = pattern.slot(i).offset.scaled(scale).rotated_degrees(rotation);
            let x = center.x + rng.jitter(placed.x, self.settings.variance_fraction);
            let z = center.z + rng.jitter(placed.z, self.settings.variance_fraction);
            // Height jitters off the building's existing height, not the pattern.
            let height = rng.jitter(
                building.height,
                self.settings.vertical_variance_fraction(),
            );
            if i < 3 {
                report::sample_move(&building.name, building.ground(), Ground::new(x, z));
            }
            updates.push(BuildingUpdate {
                building_id: building.id,
                x,
                z,
                height,
            });
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
