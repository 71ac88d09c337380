//! SQLite access for the world database.
//!
//! Every query names its columns explicitly; the mapping closures here are
//! the single place that knows `Buildings` stores (x, z, y) while
//! `CharacterLocations` stores (x, y, z). Writes for one settlement go
//! through one transaction, so a batch lands whole or not at all.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::world::{Building, CharacterPlacement, Settlement, SettlementId};

pub struct WorldDb {
    conn: Connection,
}

/// New coordinates for one `Buildings` row.
#[derive(Debug, Clone)]
pub struct BuildingUpdate {
    pub building_id: i64,
    pub x: f64,
    pub z: f64,
    pub height: f64,
}

/// New coordinates for one `CharacterLocations` row. Height stays optional
/// because the column is nullable and passes through untouched.
#[derive(Debug, Clone)]
pub struct CharacterUpdate {
    pub character_id: i64,
    pub x: f64,
    pub height: Option<f64>,
    pub z: f64,
}

impl WorldDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open world database at {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn settlements(&self) -> Result<Vec<Settlement>> {
        let mut stmt = self.conn.prepare(
            "SELECT settlement_id, name FROM Settlements ORDER BY settlement_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Settlement {
                id: SettlementId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to list settlements")
    }

    pub fn settlements_except(&self, excluded: SettlementId) -> Result<Vec<Settlement>> {
        let mut stmt = self.conn.prepare(
            "SELECT settlement_id, name FROM Settlements
             WHERE settlement_id != ?1 ORDER BY settlement_id",
        )?;
        let rows = stmt.query_map(params![excluded.raw()], |row| {
            Ok(Settlement {
                id: SettlementId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to list settlements")
    }

    pub fn settlement_buildings(&self, settlement: SettlementId) -> Result<Vec<Building>> {
        let mut stmt = self.conn.prepare(
            "SELECT building_id, name, type, x_coordinate, z_coordinate, y_coordinate
             FROM Buildings WHERE settlement_id = ?1 ORDER BY building_id",
        )?;
        let rows = stmt.query_map(params![settlement.raw()], |row| {
            Ok(Building {
                id: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                x: row.get(3)?,
                z: row.get(4)?,
                height: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to load buildings for settlement {settlement}"))
    }

    pub fn settlement_characters(&self, settlement: SettlementId) -> Result<Vec<CharacterPlacement>> {
        let mut stmt = self.conn.prepare(
            "SELECT character_id, x_coordinate, y_coordinate, z_coordinate, building_id
             FROM CharacterLocations WHERE settlement_id = ?1 ORDER BY character_id",
        )?;
        let rows = stmt.query_map(params![settlement.raw()], |row| {
            Ok(CharacterPlacement {
                id: row.get(0)?,
                x: row.get(1)?,
                height: row.get(2)?,
                z: row.get(3)?,
                building_id: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to load characters for settlement {settlement}"))
    }

    /// Commit one settlement's building moves as a single transaction.
    pub fn write_building_positions(&mut self, updates: &[BuildingUpdate]) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .context("failed to start building update transaction")?;
        {
            let mut stmt = tx.prepare(
                "UPDATE Buildings
                 SET x_coordinate = ?1, z_coordinate = ?2, y_coordinate = ?3
                 WHERE building_id = ?4",
            )?;
            for update in updates {
                stmt.execute(params![
                    update.x,
                    update.z,
                    update.height,
                    update.building_id
                ])?;
            }
        }
        tx.commit().context("failed to commit building updates")?;
        Ok(updates.len())
    }

    /// Commit one settlement's character moves as a single transaction.
    pub fn write_character_positions(
        &mut self,
        settlement: SettlementId,
        updates: &[CharacterUpdate],
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .context("failed to start character update transaction")?;
        {
            let mut stmt = tx.prepare(
                "UPDATE CharacterLocations
                 SET x_coordinate = ?1, y_coordinate = ?2, z_coordinate = ?3
                 WHERE character_id = ?4 AND settlement_id = ?5",
            )?;
            for update in updates {
                stmt.execute(params![
                    update.x,
                    update.height,
                    update.z,
                    update.character_id,
                    settlement.raw()
                ])?;
            }
        }
        tx.commit().context("failed to commit character updates")?;
        Ok(updates.len())
    }
}
