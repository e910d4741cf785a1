//! Typed control configuration, validated at the host boundary.

use serde::Deserialize;
use serde_json::Value;
use shared::{domain::StateDefinition, error::CalendarError};
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    pub states: Vec<StateDefinition>,
    pub hilite_today: bool,
    pub hilite_selected: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            hilite_today: true,
            hilite_selected: true,
        }
    }
}

/// Property values as the host serializes them into `data-props`.
#[derive(Debug, Default, Deserialize)]
struct DataProps {
    #[serde(default, alias = "statesDef")]
    statesdef: Value,
    #[serde(default)]
    hilitetoday: Value,
    #[serde(default)]
    hiliteselected: Value,
}

impl ControlConfig {
    /// Reads the host's `data-props` object. A missing flag counts as off,
    /// the same as assigning an empty value to the property.
    pub fn from_data_props(raw: &str) -> Result<Self, CalendarError> {
        let props: DataProps =
            serde_json::from_str(raw).map_err(|err| CalendarError::InvalidPropertyValue {
                name: "data-props".to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            states: states_or_empty(&props.statesdef),
            hilite_today: parse_flag(&props.hilitetoday),
            hilite_selected: parse_flag(&props.hiliteselected),
        })
    }
}

/// Host flags are on for `true`, `"1"` or `1`; anything else is off.
pub fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "1",
        Value::Number(number) => number.as_i64() == Some(1),
        _ => false,
    }
}

/// Parses a state list given either as a JSON document in a string or as an
/// already structured array. Empty input is an empty list.
pub fn parse_states(value: &Value) -> Result<Vec<StateDefinition>, CalendarError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::String(text) => serde_json::from_str(text)
            .map_err(|source| CalendarError::MalformedStates { source }),
        other => serde_json::from_value(other.clone())
            .map_err(|source| CalendarError::MalformedStates { source }),
    }
}

/// Malformed state lists are logged and treated as no states.
pub fn states_or_empty(value: &Value) -> Vec<StateDefinition> {
    parse_states(value).unwrap_or_else(|err| {
        error!(%err, "bridge: malformed states definition");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_states_embedded_as_json_text() {
        let raw = json!({
            "statesDef": r##"[{"name":"holiday","color":"#f00","tooltip":"Festivo"},{"name":"booked","color":"#00f"}]"##,
            "hilitetoday": "1",
            "hiliteselected": true,
        })
        .to_string();

        let config = ControlConfig::from_data_props(&raw).expect("config");
        assert_eq!(config.states.len(), 2);
        assert_eq!(config.states[0].tooltip.as_deref(), Some("Festivo"));
        assert!(config.hilite_today);
        assert!(config.hilite_selected);
    }

    #[test]
    fn malformed_states_become_empty() {
        let raw = json!({ "statesdef": "[{\"name\": ", "hilitetoday": "0" }).to_string();
        let config = ControlConfig::from_data_props(&raw).expect("config");
        assert!(config.states.is_empty());
        assert!(!config.hilite_today);
    }

    #[test]
    fn missing_flags_are_off() {
        let config = ControlConfig::from_data_props("{}").expect("config");
        assert_eq!(
            config,
            ControlConfig {
                states: Vec::new(),
                hilite_today: false,
                hilite_selected: false,
            }
        );
    }

    #[test]
    fn unparseable_data_props_is_an_error() {
        let err = ControlConfig::from_data_props("not json").expect_err("should fail");
        assert!(matches!(err, CalendarError::InvalidPropertyValue { .. }));
    }

    #[test]
    fn flags_accept_host_spellings() {
        assert!(parse_flag(&json!(true)));
        assert!(parse_flag(&json!("1")));
        assert!(parse_flag(&json!(1)));
        assert!(!parse_flag(&json!("true")));
        assert!(!parse_flag(&json!(0)));
        assert!(!parse_flag(&Value::Null));
    }

    #[test]
    fn structured_state_arrays_are_accepted() {
        let states = parse_states(&json!([{ "name": "x", "color": "red" }])).expect("states");
        assert_eq!(states, vec![StateDefinition::new("x", "red")]);
        assert!(parse_states(&json!("  ")).expect("empty").is_empty());
        assert!(matches!(
            parse_states(&json!(42)),
            Err(CalendarError::MalformedStates { .. })
        ));
    }
}
