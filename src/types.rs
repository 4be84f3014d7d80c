use geo::Point;
use serde::Serialize;
use std::collections::BTreeSet;

/// Company value for records with no associated operator.
pub const NOT_APPLICABLE: &str = "NA";

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub place: String,
    pub company: String,
    pub location: Point<f64>, // x = longitude, y = latitude
    pub population: u64,
    pub category: String,
}

impl Record {
    pub fn new(place: &str, company: &str, lat: f64, lon: f64, population: u64, category: &str) -> Self {
        Self {
            place: place.to_string(),
            company: company.to_string(),
            location: Point::new(lon, lat),
            population,
            category: category.to_string(),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// Current state of the two multi-select filters.
///
/// An empty set means the dimension is not filtered at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub places: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

impl Selection {
    pub fn new<P, C>(places: P, companies: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            places: places.into_iter().map(Into::into).collect(),
            companies: companies.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `place=..&company=..` pairs; keys may repeat, blank values are dropped.
    pub fn from_query(query: &str) -> Self {
        let mut selection = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                "place" => {
                    selection.places.insert(value.into_owned());
                }
                "company" => {
                    selection.companies.insert(value.into_owned());
                }
                _ => {}
            }
        }
        selection
    }

    pub fn admits(&self, record: &Record) -> bool {
        admits(&self.places, &record.place) && admits(&self.companies, &record.company)
    }
}

fn admits(filter: &BTreeSet<String>, value: &str) -> bool {
    filter.is_empty() || filter.contains(value)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub population: u64,
    pub category: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub rows: Vec<&'a Record>,
    pub points: Vec<MapPoint>,
}

/// Values offered by the place and company dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub places: Vec<String>,
    pub companies: Vec<String>,
}
