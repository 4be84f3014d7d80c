use crate::config::MapConfig;
use crate::types::{DerivedView, MapPoint, Record};
use anyhow::{Context, Result};
use geo::{Centroid, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

pub const TABLE_COLUMNS: [&str; 3] = ["Poblado", "Extractivista", "Category"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow<'a> {
    #[serde(rename = "Poblado")]
    pub place: &'a str,
    #[serde(rename = "Extractivista")]
    pub company: &'a str,
    #[serde(rename = "Category")]
    pub category: &'a str,
}

impl<'a> From<&'a Record> for TableRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            place: &record.place,
            company: &record.company,
            category: &record.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<'a> {
    pub columns: Vec<Column>,
    pub data: Vec<TableRow<'a>>,
}

pub fn table<'a>(view: &DerivedView<'a>) -> Table<'a> {
    Table {
        columns: TABLE_COLUMNS.iter().map(|&c| Column { name: c, id: c }).collect(),
        data: view.rows.iter().map(|r| TableRow::from(*r)).collect(),
    }
}

pub fn table_csv(view: &DerivedView) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if view.rows.is_empty() {
        // serialize() only emits headers alongside the first row
        wtr.write_record(TABLE_COLUMNS)?;
    }
    for row in &view.rows {
        wtr.serialize(TableRow::from(*row))?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Plotly figure with one `scattermapbox` trace per category.
pub fn figure(view: &DerivedView, map: &MapConfig) -> serde_json::Value {
    let mut groups: Vec<(&str, Vec<&MapPoint>)> = Vec::new();
    for point in &view.points {
        match groups.iter_mut().find(|(category, _)| *category == point.category) {
            Some((_, members)) => members.push(point),
            None => groups.push((point.category.as_str(), vec![point])),
        }
    }

    let traces: Vec<serde_json::Value> = groups
        .iter()
        .map(|(category, members)| {
            json!({
                "type": "scattermapbox",
                "mode": "markers",
                "name": category,
                "legendgroup": category,
                "showlegend": true,
                "lat": members.iter().map(|p| p.lat).collect::<Vec<_>>(),
                "lon": members.iter().map(|p| p.lon).collect::<Vec<_>>(),
                "hovertext": members.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
                "customdata": members.iter().map(|p| json!([p.population, p.category])).collect::<Vec<_>>(),
                "hovertemplate": "<b>%{hovertext}</b><br><br>Population=%{customdata[0]}<br>Category=%{customdata[1]}<extra></extra>",
                "marker": { "color": members[0].color },
            })
        })
        .collect();

    let (center_lat, center_lon) = map_center(&view.points)
        .map(|c| (c.y(), c.x()))
        .unwrap_or((map.center.lat, map.center.lon));

    json!({
        "data": traces,
        "layout": {
            "title": { "text": map.title },
            "height": map.height,
            "mapbox": {
                "style": map.style,
                "zoom": map.zoom,
                "center": { "lat": center_lat, "lon": center_lon },
            },
            "legend": { "title": { "text": "Category" }, "tracegroupgap": 0 },
            "margin": { "r": 0, "t": 0, "l": 0, "b": 0 },
        },
    })
}

fn map_center(points: &[MapPoint]) -> Option<Point<f64>> {
    let multi: MultiPoint<f64> = points.iter().map(|p| Point::new(p.lon, p.lat)).collect();
    multi.centroid()
}

pub fn points_geojson(view: &DerivedView) -> FeatureCollection {
    let features = view
        .points
        .iter()
        .map(|point| {
            let mut properties = JsonObject::new();
            properties.insert("place".to_string(), json!(point.label));
            properties.insert("population".to_string(), json!(point.population));
            properties.insert("category".to_string(), json!(point.category));
            properties.insert("color".to_string(), json!(point.color));
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![point.lon, point.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
