use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The instrumented runtime a backend adapter talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Server-side process (e.g. a node instance).
    Native,
    /// Browser tab reached through its debugger.
    Browser,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Browser => "browser",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "node" => Ok(Backend::Native),
            "browser" | "chrome" => Ok(Backend::Browser),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("node".parse::<Backend>().unwrap(), Backend::Native);
        assert_eq!("Chrome".parse::<Backend>().unwrap(), Backend::Browser);
        assert!("firefox".parse::<Backend>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Backend::Browser).unwrap();
        assert_eq!(json, "\"browser\"");
    }
}
