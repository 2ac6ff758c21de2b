use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfoRow {
    pub label: String,
    pub value: String,
}

/// Key/value rows appended below every data sheet of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyInfo {
    pub rows: Vec<CompanyInfoRow>,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        let rows = [
            ("회사명", "J&T Solution"),
            (
                "비고",
                "본 리포트는 네이버 검색 데이터 기반으로 자동 생성된 키워드 분석 자료입니다.",
            ),
        ]
        .into_iter()
        .map(|(label, value)| CompanyInfoRow {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect();
        Self { rows }
    }
}

/// Load company info rows from a YAML list of `{label, value}` entries.
///
/// `None` yields the built-in rows.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_company_info(path: Option<&Path>) -> Result<CompanyInfo, ConfigError> {
    let Some(path) = path else {
        return Ok(CompanyInfo::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompanyInfoIo {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_yields_defaults() {
        let info = load_company_info(None).unwrap();
        assert_eq!(info, CompanyInfo::default());
        assert_eq!(info.rows[0].label, "회사명");
    }

    #[test]
    fn yaml_list_is_loaded_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("company.yaml");
        std::fs::write(
            &path,
            "- label: 회사명\n  value: Acme\n- label: 연락처\n  value: 02-000-0000\n",
        )
        .expect("write");

        let info = load_company_info(Some(&path)).unwrap();
        assert_eq!(info.rows.len(), 2);
        assert_eq!(info.rows[1].label, "연락처");
        assert_eq!(info.rows[1].value, "02-000-0000");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_company_info(Some(Path::new("/nonexistent/company.yaml")));
        assert!(matches!(result, Err(ConfigError::CompanyInfoIo { .. })));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("company.yaml");
        std::fs::write(&path, "label: [unclosed").expect("write");
        let result = load_company_info(Some(&path));
        assert!(matches!(result, Err(ConfigError::CompanyInfoParse(_))));
    }
}
