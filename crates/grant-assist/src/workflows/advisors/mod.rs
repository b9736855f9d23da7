//! Bureau of Recreation and Conservation regional advisor directory.
//!
//! Every Pennsylvania county belongs to exactly one region. Lookups are case and
//! whitespace insensitive; if a county were listed twice the first region wins.

pub mod router;
mod table;

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use router::advisor_router;
pub use table::embedded_regions;

/// Contact record for one regional office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorRecord {
    pub region_id: u8,
    pub region_name: String,
    pub advisor_name: String,
    pub phone: String,
    pub email: String,
    pub counties: BTreeSet<String>,
}

impl AdvisorRecord {
    pub fn serves(&self, normalized_county: &str) -> bool {
        self.counties.contains(normalized_county)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorTableError {
    #[error("failed to read advisor table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid advisor table row: {0}")]
    Csv(#[from] csv::Error),
    #[error("advisor table defines no regions")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct AdvisorRow {
    region_id: u8,
    #[serde(default)]
    region_name: String,
    advisor_name: String,
    phone: String,
    email: String,
    counties: String,
}

/// Static county to advisor lookup table.
#[derive(Debug, Clone)]
pub struct AdvisorDirectory {
    regions: Vec<AdvisorRecord>,
}

impl Default for AdvisorDirectory {
    fn default() -> Self {
        Self::embedded()
    }
}

impl AdvisorDirectory {
    pub fn new(regions: Vec<AdvisorRecord>) -> Self {
        Self { regions }
    }

    pub fn embedded() -> Self {
        Self::new(embedded_regions())
    }

    /// Load a replacement table from CSV. Counties are `;` separated.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AdvisorTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AdvisorTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut regions = Vec::new();
        for row in csv_reader.deserialize::<AdvisorRow>() {
            let row = row?;
            let counties = row
                .counties
                .split(';')
                .map(normalize_county)
                .filter(|county| !county.is_empty())
                .collect();
            let region_name = if row.region_name.is_empty() {
                format!("Region {}", row.region_id)
            } else {
                row.region_name
            };
            regions.push(AdvisorRecord {
                region_id: row.region_id,
                region_name,
                advisor_name: row.advisor_name,
                phone: row.phone,
                email: row.email,
                counties,
            });
        }

        if regions.is_empty() {
            return Err(AdvisorTableError::Empty);
        }

        Ok(Self::new(regions))
    }

    pub fn regions(&self) -> &[AdvisorRecord] {
        &self.regions
    }

    pub fn lookup(&self, county: &str) -> Option<&AdvisorRecord> {
        let normalized = normalize_county(county);
        if normalized.is_empty() {
            return None;
        }
        self.regions.iter().find(|region| region.serves(&normalized))
    }

    /// Plain-text rendering searched alongside the other reference content.
    pub fn render_text(&self) -> String {
        let mut text = String::from("DCNR Bureau of Recreation and Conservation Regional Advisors\n");
        for region in &self.regions {
            let counties: Vec<String> = region.counties.iter().map(|c| title_case(c)).collect();
            let _ = writeln!(
                text,
                "\nRegion {} ({}): {}\nPhone: {}\nEmail: {}\nCounties: {}",
                region.region_id,
                region.region_name,
                region.advisor_name,
                region.phone,
                region.email,
                counties.join(", ")
            );
        }
        text
    }
}

pub fn normalize_county(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    trimmed
        .strip_suffix(" county")
        .map(str::trim_end)
        .unwrap_or(&trimmed)
        .to_string()
}

fn title_case(county: &str) -> String {
    county
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
