mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use super::domain::{
    Assessment, Contract, DueDiligenceReview, Incident, RiskProfile, Scorecard, Vendor, VendorId,
    VendorStatus,
};
use super::source::{SourceError, VendorDataSource};
use crate::engine::{parse_date, EngineError, RiskDimension};
use normalizer::{clean_text, slug};
use parser::{parse_flag, parse_rows, ContractRow, VendorRow};

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug)]
pub enum RegisterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingValue {
        line: u64,
        column: &'static str,
    },
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    InvalidDate {
        line: u64,
        column: &'static str,
        source: EngineError,
    },
}

impl std::fmt::Display for RegisterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterImportError::Io(err) => write!(f, "failed to read register export: {}", err),
            RegisterImportError::Csv(err) => write!(f, "invalid register CSV data: {}", err),
            RegisterImportError::MissingValue { line, column } => {
                write!(f, "line {}: '{}' is required", line, column)
            }
            RegisterImportError::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {}: '{}' is not a number in '{}'", line, value, column),
            RegisterImportError::InvalidDate {
                line,
                column,
                source,
            } => write!(f, "line {}: invalid '{}': {}", line, column, source),
        }
    }
}

impl std::error::Error for RegisterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegisterImportError::Io(err) => Some(err),
            RegisterImportError::Csv(err) => Some(err),
            RegisterImportError::InvalidDate { source, .. } => Some(source),
            RegisterImportError::MissingValue { .. }
            | RegisterImportError::InvalidNumber { .. } => None,
        }
    }
}

impl From<std::io::Error> for RegisterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RegisterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads vendor and contract registers exported from the backend as CSV.
pub struct RegisterImporter;

impl RegisterImporter {
    pub fn vendors_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vendor>, RegisterImportError> {
        let file = std::fs::File::open(path)?;
        Self::vendors_from_reader(file)
    }

    /// Later rows repeating an already imported vendor id are skipped.
    pub fn vendors_from_reader<R: Read>(reader: R) -> Result<Vec<Vendor>, RegisterImportError> {
        let mut seen: HashSet<VendorId> = HashSet::new();
        let mut vendors = Vec::new();

        for (line, row) in parse_rows::<_, VendorRow>(reader)? {
            let vendor = vendor_from_row(line, row)?;
            if !seen.insert(vendor.id.clone()) {
                warn!(line, vendor = %vendor.id, "skipping duplicate vendor row");
                continue;
            }
            vendors.push(vendor);
        }

        Ok(vendors)
    }

    pub fn contracts_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Contract>, RegisterImportError> {
        let file = std::fs::File::open(path)?;
        Self::contracts_from_reader(file)
    }

    pub fn contracts_from_reader<R: Read>(reader: R) -> Result<Vec<Contract>, RegisterImportError> {
        parse_rows::<_, ContractRow>(reader)?
            .into_iter()
            .map(|(line, row)| contract_from_row(line, row))
            .collect()
    }
}

fn vendor_from_row(line: u64, row: VendorRow) -> Result<Vendor, RegisterImportError> {
    let name = clean_text(&row.name);
    let id = row
        .id
        .as_deref()
        .map(clean_text)
        .unwrap_or_else(|| slug(&name));
    if name.is_empty() || id.is_empty() {
        return Err(RegisterImportError::MissingValue {
            line,
            column: "Vendor Name",
        });
    }

    let mut risk = RiskProfile::default();
    let columns = [
        (RiskDimension::Financial, "Financial", &row.financial),
        (RiskDimension::Operational, "Operational", &row.operational),
        (RiskDimension::Compliance, "Compliance", &row.compliance),
        (RiskDimension::Security, "Security", &row.security),
        (RiskDimension::Reputational, "Reputational", &row.reputational),
        (RiskDimension::Strategic, "Strategic", &row.strategic),
    ];
    for (dimension, column, raw) in columns {
        let value = raw
            .as_deref()
            .map(|raw| parse_number(line, column, raw))
            .transpose()?;
        risk.set(dimension, value);
    }

    let certification_expires_on = row
        .certification_expires
        .as_deref()
        .map(|raw| parse_register_date(line, "Certification Expires", raw))
        .transpose()?;

    Ok(Vendor {
        id: VendorId(id),
        name,
        category: row
            .category
            .as_deref()
            .map(clean_text)
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        status: VendorStatus::Active,
        risk,
        certification_expires_on,
    })
}

fn contract_from_row(line: u64, row: ContractRow) -> Result<Contract, RegisterImportError> {
    let annual_value = row
        .annual_value
        .as_deref()
        .map(|raw| parse_number(line, "Annual Value", &raw.replace(['$', ','], "")))
        .transpose()?
        .unwrap_or_default();

    Ok(Contract {
        id: clean_text(&row.id),
        vendor_id: VendorId(clean_text(&row.vendor_id)),
        title: clean_text(&row.title),
        annual_value,
        starts_on: parse_register_date(line, "Start Date", &row.start_date)?,
        ends_on: parse_register_date(line, "End Date", &row.end_date)?,
        auto_renew: parse_flag(row.auto_renew.as_deref()),
    })
}

fn parse_number(line: u64, column: &'static str, raw: &str) -> Result<f64, RegisterImportError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RegisterImportError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
        })
}

fn parse_register_date(
    line: u64,
    column: &'static str,
    raw: &str,
) -> Result<chrono::NaiveDate, RegisterImportError> {
    parse_date(raw).map_err(|source| RegisterImportError::InvalidDate {
        line,
        column,
        source,
    })
}

/// Imported registers exposed through the same boundary as the live store. Registers
/// only carry vendors and contracts.
#[derive(Debug, Clone, Default)]
pub struct RegisterDataSource {
    vendors: Vec<Vendor>,
    contracts: Vec<Contract>,
}

impl RegisterDataSource {
    pub fn new(vendors: Vec<Vendor>, contracts: Vec<Contract>) -> Self {
        Self { vendors, contracts }
    }
}

impl VendorDataSource for RegisterDataSource {
    fn vendors(&self) -> Result<Vec<Vendor>, SourceError> {
        Ok(self.vendors.clone())
    }

    fn contracts(&self) -> Result<Vec<Contract>, SourceError> {
        Ok(self.contracts.clone())
    }

    fn assessments(&self) -> Result<Vec<Assessment>, SourceError> {
        Ok(Vec::new())
    }

    fn due_diligence(&self) -> Result<Vec<DueDiligenceReview>, SourceError> {
        Ok(Vec::new())
    }

    fn incidents(&self) -> Result<Vec<Incident>, SourceError> {
        Ok(Vec::new())
    }

    fn scorecards(&self) -> Result<Vec<Scorecard>, SourceError> {
        Ok(Vec::new())
    }
}
