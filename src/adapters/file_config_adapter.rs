//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive and come back lowercased.
//! Only `#` starts a comment so that `;` can separate list entries such as
//! orders and debts.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    fn parser() -> Ini {
        let mut config = Ini::new();
        config.set_comment_symbols(&['#']);
        config
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Self::parser();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Self::parser();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }

    fn sections(&self) -> Vec<String> {
        let mut sections = self.config.sections();
        sections.sort();
        sections
    }

    fn keys(&self, section: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .config
            .get_map_ref()
            .get(&section.to_lowercase())
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[loan_payment]
principal = 250000
annual_rate = 6.5

[simulator]
starting_cash = 10000
orders = 0 BUY AAPL 10; 3 SELL AAPL 5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_double("loan_payment", "principal", 0.0), 250000.0);
        assert_eq!(
            adapter.get_string("simulator", "orders"),
            Some("0 BUY AAPL 10; 3 SELL AAPL 5".to_string())
        );
    }

    #[test]
    fn hash_comments_are_ignored() {
        let adapter =
            FileConfigAdapter::from_string("# header\n[dscr]\n# note\ntotal_debt_service = 10\n")
                .unwrap();
        assert_eq!(adapter.keys("dscr"), vec!["total_debt_service".to_string()]);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[markup]\ncost = 100\n").unwrap();
        assert_eq!(adapter.get_string("markup", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[simulator]\nticks = 20\nseed = abc\n").unwrap();
        assert_eq!(adapter.get_int("simulator", "ticks", 0), 20);
        assert_eq!(adapter.get_int("simulator", "seed", 42), 42);
        assert_eq!(adapter.get_int("simulator", "missing", 7), 7);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[roi]\namount_invested = lots\n").unwrap();
        assert_eq!(adapter.get_double("roi", "amount_invested", 99.9), 99.9);
        assert_eq!(adapter.get_double("roi", "missing", 1.5), 1.5);
    }

    #[test]
    fn get_bool_values() {
        let adapter = FileConfigAdapter::from_string(
            "[flags]\na = true\nb = yes\nc = 0\nd = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("flags", "a", false));
        assert!(adapter.get_bool("flags", "b", false));
        assert!(!adapter.get_bool("flags", "c", true));
        assert!(adapter.get_bool("flags", "d", true));
    }

    #[test]
    fn sections_and_keys_are_sorted_and_lowercased() {
        let adapter = FileConfigAdapter::from_string(
            "[stocks]\nMSFT = 410\nAAPL = 190\n[Crypto]\nBTC = 60000\n",
        )
        .unwrap();
        assert_eq!(adapter.sections(), vec!["crypto".to_string(), "stocks".to_string()]);
        assert_eq!(adapter.keys("stocks"), vec!["aapl".to_string(), "msft".to_string()]);
        assert_eq!(adapter.keys("CRYPTO"), vec!["btc".to_string()]);
        assert!(adapter.keys("missing").is_empty());
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[savings_goal]\ntarget_amount = 5000\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_double("savings_goal", "target_amount", 0.0), 5000.0);
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
