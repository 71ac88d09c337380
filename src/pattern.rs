//! Layout pattern extraction.
//!
//! A pattern is the centroid-relative snapshot of one reference settlement's
//! building layout. It lives only for the duration of a run and is stamped
//! onto other settlements by [`crate::tasks::StampLayout`].

use thiserror::Error;

use crate::geometry::{centroid, Ground};
use crate::world::Building;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("reference settlement has no buildings to derive a layout from")]
    EmptyReference,
}

/// One building's place in the layout: its centroid-relative ground offset
/// plus the metadata kept for reporting.
#[derive(Debug, Clone)]
pub struct PatternSlot {
    pub kind: Option<String>,
    pub name: String,
    pub offset: Ground,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutPattern {
    anchor: Ground,
    slots: Vec<PatternSlot>,
}

impl LayoutPattern {
    /// Decompose the reference buildings into centroid + relative offsets.
    /// Lossless: `anchor.shifted_by(slot.offset)` reproduces each building's
    /// original position.
    pub fn from_buildings(buildings: &[Building]) -> Result<Self, PatternError> {
        let points: Vec<Ground> = buildings.iter().map(Building::ground).collect();
        let anchor = centroid(&points).ok_or(PatternError::EmptyReference)?;
        let slots = buildings
            .iter()
            .map(|building| PatternSlot {
                kind: building.kind.clone(),
                name: building.name.clone(),
                offset: anchor.offset_to(building.ground()),
                height: building.height,
            })
            .collect();
        Ok(Self { anchor, slots })
    }

    /// Centroid of the reference layout, in its original world coordinates.
    pub fn anchor(&self) -> Ground {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot for the building at local index `index`, cycling when the target
    /// settlement holds more buildings than the pattern.
    pub fn slot(&self, index: usize) -> &PatternSlot {
        &self.slots[index % self.slots.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(id: i64, x: f64, z: f64) -> Building {
        Building {
            id,
            name: format!("building-{id}"),
            kind: Some("house".into()),
            x,
            z,
            height: 2.0,
        }
    }

    #[test]
    fn test_extraction_is_lossless() {
        let buildings = vec![
            building(1, 100.0, 40.0),
            building(2, 110.0, 40.0),
            building(3, 105.0, 50.0),
        ];
        let pattern = LayoutPattern::from_buildings(&buildings).unwrap();
        for (i, original) in buildings.iter().enumerate() {
            let rebuilt = pattern.anchor().shifted_by(pattern.slot(i).offset);
            assert!((rebuilt.x - original.x).abs() < 1e-9);
            assert!((rebuilt.z - original.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_offsets_sum_to_zero() {
        let buildings = vec![
            building(1, 3.0, -7.0),
            building(2, 18.0, 2.5),
            building(3, -4.0, 11.0),
            building(4, 9.0, 0.0),
        ];
        let pattern = LayoutPattern::from_buildings(&buildings).unwrap();
        let sum_x: f64 = (0..pattern.len()).map(|i| pattern.slot(i).offset.x).sum();
        let sum_z: f64 = (0..pattern.len()).map(|i| pattern.slot(i).offset.z).sum();
        assert!(sum_x.abs() < 1e-9);
        assert!(sum_z.abs() < 1e-9);
    }

    #[test]
    fn test_slot_cycles_modulo_length() {
        let buildings = vec![building(1, 0.0, 0.0), building(2, 10.0, 0.0)];
        let pattern = LayoutPattern::from_buildings(&buildings).unwrap();
        assert_eq!(pattern.slot(0).name, pattern.slot(2).name);
        assert_eq!(pattern.slot(1).name, pattern.slot(5).name);
    }

    #[test]
    fn test_empty_reference_is_an_error() {
        let err = LayoutPattern::from_buildings(&[]).unwrap_err();
        assert!(matches!(err, PatternError::EmptyReference));
    }
}
