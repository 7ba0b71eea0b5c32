use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{TaxpayerDeclaration, TaxpayerIdentity};

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read declaration batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid declaration CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct DeclarationRow {
    full_name: String,
    pan: String,
    aadhaar: String,
    bank_account: String,
    age: u8,
    occupation: String,
    marital_status: String,
    children: String,
    reported_income: f64,
    #[serde(default)]
    interest_income: Option<f64>,
    #[serde(default)]
    capital_gains: Option<f64>,
}

impl From<DeclarationRow> for TaxpayerDeclaration {
    fn from(row: DeclarationRow) -> Self {
        TaxpayerDeclaration {
            identity: TaxpayerIdentity {
                full_name: row.full_name,
                pan: row.pan,
                aadhaar: row.aadhaar,
                bank_account: row.bank_account,
            },
            age: row.age,
            occupation: row.occupation,
            marital_status: row.marital_status,
            children: row.children,
            reported_income: row.reported_income,
            interest_income: row.interest_income,
            capital_gains: row.capital_gains,
        }
    }
}

/// Reads taxpayer declarations from a headed CSV file.
pub struct DeclarationBatch;

impl DeclarationBatch {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<TaxpayerDeclaration>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TaxpayerDeclaration>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut declarations = Vec::new();

        for record in csv_reader.deserialize::<DeclarationRow>() {
            declarations.push(record?.into());
        }

        Ok(declarations)
    }
}
