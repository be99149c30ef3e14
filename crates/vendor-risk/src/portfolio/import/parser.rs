use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct VendorRow {
    #[serde(rename = "Vendor ID", default, deserialize_with = "empty_string_as_none")]
    pub(crate) id: Option<String>,
    #[serde(rename = "Vendor Name")]
    pub(crate) name: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    pub(crate) category: Option<String>,
    #[serde(rename = "Financial", default, deserialize_with = "empty_string_as_none")]
    pub(crate) financial: Option<String>,
    #[serde(rename = "Operational", default, deserialize_with = "empty_string_as_none")]
    pub(crate) operational: Option<String>,
    #[serde(rename = "Compliance", default, deserialize_with = "empty_string_as_none")]
    pub(crate) compliance: Option<String>,
    #[serde(rename = "Security", default, deserialize_with = "empty_string_as_none")]
    pub(crate) security: Option<String>,
    #[serde(rename = "Reputational", default, deserialize_with = "empty_string_as_none")]
    pub(crate) reputational: Option<String>,
    #[serde(rename = "Strategic", default, deserialize_with = "empty_string_as_none")]
    pub(crate) strategic: Option<String>,
    #[serde(
        rename = "Certification Expires",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) certification_expires: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContractRow {
    #[serde(rename = "Contract ID")]
    pub(crate) id: String,
    #[serde(rename = "Vendor ID")]
    pub(crate) vendor_id: String,
    #[serde(rename = "Title")]
    pub(crate) title: String,
    #[serde(rename = "Annual Value", default, deserialize_with = "empty_string_as_none")]
    pub(crate) annual_value: Option<String>,
    #[serde(rename = "Start Date")]
    pub(crate) start_date: String,
    #[serde(rename = "End Date")]
    pub(crate) end_date: String,
    #[serde(rename = "Auto Renew", default, deserialize_with = "empty_string_as_none")]
    pub(crate) auto_renew: Option<String>,
}

/// Rows paired with the line they start on in the source file.
pub(crate) fn parse_rows<R, T>(reader: R) -> Result<Vec<(u64, T)>, csv::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        rows.push((line, record.deserialize(Some(&headers))?));
    }

    Ok(rows)
}

pub(crate) fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
