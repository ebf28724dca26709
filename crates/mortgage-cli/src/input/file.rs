use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let parsed = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    log::debug!("loaded input from {}", canonical.display());
    Ok(parsed)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::LoanParameters;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mortcalc-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_yaml_parameters() {
        let path = write_temp(
            "loan.yaml",
            "principal: \"250000\"\nannual_rate_percent: \"6\"\nterm_years: 15\n",
        );
        let params: LoanParameters = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(params.principal, Decimal::from(250000));
        assert_eq!(params.annual_rate_percent, Decimal::from(6));
        assert_eq!(params.term_years, 15);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_reads_json_parameters() {
        let path = write_temp(
            "loan.json",
            r#"{"principal": 120000, "annual_rate_percent": 0, "term_years": 10}"#,
        );
        let params: LoanParameters = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(params.principal, Decimal::from(120000));
        assert!(params.annual_rate_percent.is_zero());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file() {
        let result: Result<LoanParameters, _> = read_input("/definitely/not/here.json");
        assert!(result.is_err());
    }
}
