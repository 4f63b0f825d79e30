use crate::error_handling::Error::{
    IOError, InvalidConfig, MissingConfigKey, YamlParsingError,
};
use crate::error_handling::Result;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::io::Read;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<OutputFormat> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(InvalidConfig("output format must be `json` or `yaml`")),
        }
    }
}

pub struct NamedExpression {
    name: String,
    regex: String,
}

impl NamedExpression {
    pub fn new(name: String, regex: String) -> NamedExpression {
        Self { name, regex }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_regex(&self) -> &str {
        &self.regex
    }
}

// A YAML file of named expressions to convert in one run:
//
//   expressions:
//     ends_in_c: "(a|b)*c"
//   output:
//     format: yaml
//     pretty: true
pub struct BatchConfig {
    expressions: Vec<NamedExpression>,
    output_format: OutputFormat,
    pretty: bool,
}

impl BatchConfig {
    pub fn get_expressions(&self) -> &Vec<NamedExpression> {
        &self.expressions
    }

    pub fn get_output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl BatchConfig {
    const EXPRESSIONS_KEY: &'static str = "expressions";
    const OUTPUT_KEY: &'static str = "output";
    const FORMAT_KEY: &'static str = "format";
    const PRETTY_KEY: &'static str = "pretty";

    pub fn parse_from_file(yaml_file_path: &str) -> Result<BatchConfig> {
        match std::fs::File::open(yaml_file_path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    return Err(IOError(e));
                }
                Self::parse_from_str(contents.as_str())
            }
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<BatchConfig> {
        match Self::load_kv_pairs_from_yaml_content(yaml_content) {
            Ok(kv_pairs) => Self::load_from_kv_pairs(kv_pairs),
            Err(e) => Err(YamlParsingError(e)),
        }
    }

    fn get_key_value<'a>(
        kv_map: &'a IndexMap<String, Value>,
        key: &'static str,
    ) -> Result<&'a Value> {
        kv_map.get(key).ok_or_else(|| MissingConfigKey(key))
    }

    fn load_kv_pairs_from_yaml_content(
        yaml_content: &str,
    ) -> serde_yaml::Result<IndexMap<String, Value>> {
        let kv_map_result: IndexMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(kv_map_result)
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        // Handle expressions
        let mut expressions: Vec<NamedExpression> = Vec::new();
        let exprs = Self::get_key_value(&kv_pairs, Self::EXPRESSIONS_KEY)?;
        if let Value::Mapping(map) = exprs {
            for (key, value) in map {
                match (key, value) {
                    (Value::String(name), Value::String(regex)) => {
                        expressions.push(NamedExpression::new(name.clone(), regex.clone()));
                    }
                    _ => return Err(InvalidConfig("expressions must map names to strings")),
                }
            }
        } else {
            return Err(InvalidConfig("expressions must be a mapping"));
        }

        // Handle the optional output section
        let mut output_format = OutputFormat::default();
        let mut pretty = false;
        if let Some(output) = kv_pairs.get(Self::OUTPUT_KEY) {
            let Value::Mapping(map) = output else {
                return Err(InvalidConfig("output must be a mapping"));
            };
            match map.get(Self::FORMAT_KEY) {
                Some(Value::String(name)) => output_format = OutputFormat::from_name(name)?,
                Some(_) => return Err(InvalidConfig("output format must be a string")),
                None => {}
            }
            match map.get(Self::PRETTY_KEY) {
                Some(Value::Bool(flag)) => pretty = *flag,
                Some(_) => return Err(InvalidConfig("output pretty must be a boolean")),
                None => {}
            }
        }

        Ok(Self {
            expressions,
            output_format,
            pretty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    #[test]
    fn test_parse_batch_config() -> Result<()> {
        let config = BatchConfig::parse_from_str(
            r#"
expressions:
  single: "a"
  ends_in_c: "(a|b)*c"
  any_a: "a*"
output:
  format: yaml
  pretty: true
"#,
        )?;

        let names: Vec<&str> = config
            .get_expressions()
            .iter()
            .map(|e| e.get_name())
            .collect();
        assert_eq!(names, vec!["single", "ends_in_c", "any_a"]);
        assert_eq!(config.get_expressions()[1].get_regex(), "(a|b)*c");
        assert_eq!(config.get_output_format(), OutputFormat::Yaml);
        assert!(config.is_pretty());
        Ok(())
    }

    #[test]
    fn test_output_section_is_optional() -> Result<()> {
        let config = BatchConfig::parse_from_str("expressions:\n  x: \"ab\"\n")?;
        assert_eq!(config.get_expressions().len(), 1);
        assert_eq!(config.get_output_format(), OutputFormat::Json);
        assert!(false == config.is_pretty());
        Ok(())
    }

    #[test]
    fn test_missing_expressions_key() {
        let result = BatchConfig::parse_from_str("output:\n  format: json\n");
        assert!(matches!(
            result,
            Err(Error::MissingConfigKey("expressions"))
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            BatchConfig::parse_from_str("expressions:\n  - a\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            BatchConfig::parse_from_str("expressions:\n  x: a\noutput:\n  format: xml\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            BatchConfig::parse_from_str("expressions: [unclosed"),
            Err(Error::YamlParsingError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            BatchConfig::parse_from_file("/nonexistent/batch.yaml"),
            Err(Error::IOError(_))
        ));
    }
}
