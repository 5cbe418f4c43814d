//! Fetched annotation records.
//!
//! The data layer delivers annotations as JSON objects shaped like
//!
//! ```json
//! { "id": 7, "bbox": [10, 20, 30, 40],
//!   "polygon": { "has_segmentation": true, "polygons": [[[10, 20], [40, 20], [40, 60]]] },
//!   "category_id": 3, "score": 0.92, "created_at": "..." }
//! ```
//!
//! Fields the engine does not interpret are kept in `Annotation::metadata`.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use super::annotation::{Annotation, AnnotationId, BoundingBox, Mask, Point};
use crate::error::{RecordError, Result};

#[derive(Debug, Deserialize)]
struct AnnotationRecord {
    id: AnnotationId,
    /// Kept raw so one malformed box does not fail the whole list
    #[serde(default)]
    bbox: Option<serde_json::Value>,
    #[serde(default)]
    polygon: Option<PolygonRecord>,
    #[serde(default)]
    category_id: Option<u32>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    score: Option<f32>,
    /// Confidence reported by mask generators that do not set `score`
    #[serde(default)]
    stability_score: Option<f32>,
    #[serde(flatten)]
    metadata: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PolygonRecord {
    #[serde(default)]
    has_segmentation: bool,
    #[serde(default)]
    polygons: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct WrappedRecords {
    annotations: Vec<AnnotationRecord>,
}

/// All entries as numbers, or `None` if any entry is not one.
fn numbers(value: &serde_json::Value) -> Option<Vec<f32>> {
    value
        .as_array()?
        .iter()
        .map(|n| n.as_f64().map(|n| n as f32))
        .collect()
}

fn parse_bbox(id: AnnotationId, value: &serde_json::Value) -> Option<BoundingBox> {
    let bbox = numbers(value).and_then(|values| BoundingBox::from_slice(&values));
    if bbox.is_none() {
        log::debug!("Annotation {} has a malformed bbox {}, ignoring it", id, value);
    }
    bbox
}

/// A ring with any point that is not `[x, y]` is dropped whole.
fn parse_ring(id: AnnotationId, points: &[serde_json::Value]) -> Option<Vec<Point>> {
    let ring: Option<Vec<Point>> = points
        .iter()
        .map(|point| match numbers(point)?.as_slice() {
            [x, y] => Some(Point::new(*x, *y)),
            _ => None,
        })
        .collect();
    if ring.is_none() {
        log::debug!("Annotation {} has a polygon with a malformed point, ignoring it", id);
    }
    ring
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        let id = record.id;
        let bbox = record
            .bbox
            .as_ref()
            .filter(|value| !value.is_null())
            .and_then(|value| parse_bbox(id, value));

        let mask = record.polygon.map(|polygon| Mask {
            has_segmentation: polygon.has_segmentation,
            polygons: polygon
                .polygons
                .iter()
                .filter_map(|points| parse_ring(id, points))
                .collect(),
        });

        Annotation {
            id: record.id,
            bbox,
            mask,
            category_id: record.category_id,
            status: record.status,
            score: record.score.or(record.stability_score),
            metadata: record.metadata,
        }
    }
}

/// Parse a single annotation record.
pub fn parse_record(json: &str) -> Result<Annotation> {
    let record: AnnotationRecord = serde_json::from_str(json)?;
    Ok(record.into())
}

/// Parse a list of annotation records, either a bare array or an object with
/// an `annotations` array. List order is preserved.
///
/// Ids are the sole key for colors and interaction state, so a list with a
/// repeated id is rejected.
pub fn parse_records(json: &str) -> Result<Vec<Annotation>> {
    let records: Vec<AnnotationRecord> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json)?
    } else {
        serde_json::from_str::<WrappedRecords>(json)?.annotations
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut annotations = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(RecordError::invalid_record(format!(
                "duplicate annotation id {}",
                record.id
            )));
        }
        annotations.push(Annotation::from(record));
    }

    log::debug!("Parsed {} annotation records", annotations.len());
    Ok(annotations)
}
