use crate::palette::ColorMap;
use crate::types::{FilterOptions, Record, NOT_APPLICABLE};
use anyhow::{bail, Result};

/// Immutable, validated set of records.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            validate_record(i, record)?;
        }
        Ok(Self { records })
    }

    /// The sample records the dashboard ships with.
    pub fn builtin() -> Result<Self> {
        Self::new(vec![
            Record::new("La ventosa", "Acciona", 16.552777777778, -94.947222222222, 8918653, "Parque Eólico"),
            Record::new("Alvaro Obregón", NOT_APPLICABLE, 16.297222, -95.084722, 1495182, "Parque Eólico"),
            Record::new("Jalcomulco", "Odebrecht", 19.331944, -96.7625, 1135512, "Presa"),
        ])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct places and companies, in order of first appearance.
    pub fn options(&self) -> FilterOptions {
        let mut places: Vec<String> = Vec::new();
        let mut companies: Vec<String> = Vec::new();
        for record in &self.records {
            if !places.contains(&record.place) {
                places.push(record.place.clone());
            }
            if !companies.contains(&record.company) {
                companies.push(record.company.clone());
            }
        }
        FilterOptions { places, companies }
    }

    /// Log every category the color table has no entry for.
    pub fn warn_unmapped(&self, colors: &ColorMap) -> usize {
        let mut unmapped = 0;
        for record in &self.records {
            if !colors.is_mapped(&record.category) {
                tracing::warn!(
                    "Category {:?} of {:?} has no color, using {}",
                    record.category,
                    record.place,
                    colors.default_color()
                );
                unmapped += 1;
            }
        }
        unmapped
    }
}

fn validate_record(index: usize, record: &Record) -> Result<()> {
    if record.place.trim().is_empty() {
        bail!("Record {} has an empty place name", index);
    }
    if record.category.trim().is_empty() {
        bail!("Record {} ({}) has an empty category", index, record.place);
    }
    let (lat, lon) = (record.latitude(), record.longitude());
    if !lat.is_finite() || lat.abs() > 90.0 {
        bail!("Record {} ({}) has invalid latitude {}", index, record.place, lat);
    }
    if !lon.is_finite() || lon.abs() > 180.0 {
        bail!("Record {} ({}) has invalid longitude {}", index, record.place, lon);
    }
    Ok(())
}
