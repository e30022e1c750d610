use serde::{Deserialize, Serialize};

use crate::model::{matrix::OdMatrixEntry, router::OdPoint};

/// a row of an origin or destination file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl From<PointRecord> for OdPoint {
    fn from(record: PointRecord) -> Self {
        OdPoint::new(&record.id, record.x, record.y)
    }
}

/// a row of the matrix output file. travel times are written in minutes and
/// left empty for unreachable pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdMatrixRow {
    pub from_id: String,
    pub to_id: String,
    pub travel_time: Option<f64>,
    pub unreachable_samples: usize,
}

impl From<&OdMatrixEntry> for OdMatrixRow {
    fn from(entry: &OdMatrixEntry) -> Self {
        OdMatrixRow {
            from_id: entry.from_id.clone(),
            to_id: entry.to_id.clone(),
            travel_time: entry.travel_time_minutes(),
            unreachable_samples: entry.unreachable_samples,
        }
    }
}
