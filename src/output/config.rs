use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    /// `--json` wins; otherwise OSINT_OUTPUT_FORMAT picks the format.
    pub fn from_env(json_flag: bool) -> Self {
        Self::resolve(json_flag, env::var("OSINT_OUTPUT_FORMAT").ok().as_deref(), env::var("OSINT_OUTPUT_PRETTY").ok().as_deref())
    }

    fn resolve(json_flag: bool, format: Option<&str>, pretty: Option<&str>) -> Self {
        let format = match format {
            _ if json_flag => OutputFormat::Json,
            Some(f) if f.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let pretty = matches!(pretty, Some(v) if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"));
        OutputConfig { format, pretty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_env() {
        assert_eq!(OutputConfig::resolve(true, Some("text"), None).format, OutputFormat::Json);
        assert_eq!(OutputConfig::resolve(false, Some("JSON"), None).format, OutputFormat::Json);
        assert_eq!(OutputConfig::resolve(false, None, None).format, OutputFormat::Text);
    }

    #[test]
    fn pretty_values() {
        assert!(OutputConfig::resolve(false, None, Some("yes")).pretty);
        assert!(OutputConfig::resolve(false, None, Some("1")).pretty);
        assert!(!OutputConfig::resolve(false, None, Some("0")).pretty);
    }
}
