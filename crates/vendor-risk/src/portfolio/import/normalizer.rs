/// Strip invisible characters and collapse whitespace in a free-text register cell.
pub(crate) fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable identifier derived from a vendor name: "Acme Cloud, Inc." -> "acme-cloud-inc".
pub(crate) fn slug(value: &str) -> String {
    clean_text(value)
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

