/// Comma-separated keyword entry, trimmed and deduplicated in order.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let keyword = part.trim();
        if keyword.is_empty() {
            continue;
        }
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

pub fn validate_upload(name: &str, course: &str, year: &str) -> Result<i32, String> {
    if name.trim().is_empty() {
        return Err("Resource name is required.".to_string());
    }
    if course.trim().is_empty() {
        return Err("Course code is required.".to_string());
    }
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| "Year must be a number.".to_string())?;
    if !(1900..=2100).contains(&year) {
        return Err("Year looks out of range.".to_string());
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_split_trimmed_and_deduped() {
        assert_eq!(
            parse_keywords(" quantum, physics ,, quantum ,notes"),
            vec!["quantum", "physics", "notes"]
        );
        assert!(parse_keywords("  ").is_empty());
    }

    #[test]
    fn upload_validation_checks_required_fields_and_year() {
        assert!(validate_upload("", "PHY301", "2023").is_err());
        assert!(validate_upload("Notes", "", "2023").is_err());
        assert!(validate_upload("Notes", "PHY301", "soon").is_err());
        assert!(validate_upload("Notes", "PHY301", "1200").is_err());
        assert_eq!(validate_upload("Notes", "PHY301", "2023"), Ok(2023));
    }
}
