/// Strips invisible marks and collapses runs of whitespace. Case is preserved
/// because category matching is case-sensitive.
pub(crate) fn normalize_field(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
