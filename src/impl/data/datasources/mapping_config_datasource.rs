use std::fs;

use fractic_server_error::ServerError;
use serde_json::Value;
use tracing::debug;

use crate::{
    data::models::mapping_config_model::MappingConfigModel,
    entities::ScheduleIiiMapping,
    errors::{InvalidJson, InvalidRon, ReadError},
};

pub(crate) const DEFAULT_MAPPING_CONFIG: &str =
    include_str!("../../../../config/schedule_iii_default.json");

pub(crate) trait MappingConfigDatasource {
    fn default_mapping(&self) -> Result<ScheduleIiiMapping, ServerError>;

    /// Parses a JSON or RON configuration and merges it over the default.
    fn from_string(&self, s: &str) -> Result<ScheduleIiiMapping, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<ScheduleIiiMapping, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct MappingConfigDatasourceImpl;

impl MappingConfigDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }

    fn default_value(&self) -> Result<Value, ServerError> {
        serde_json::from_str(DEFAULT_MAPPING_CONFIG)
            .map_err(|e| InvalidJson::with_debug("default mapping configuration", &e))
    }

    fn parse_user_value(&self, s: &str) -> Result<Value, ServerError> {
        match serde_json::from_str::<Value>(s) {
            Ok(value) => Ok(value),
            Err(json_error) => {
                debug!(error = %json_error, "mapping configuration is not JSON, trying RON");
                ron::from_str::<Value>(s)
                    .map_err(|e| InvalidRon::with_debug("mapping configuration", &e))
            }
        }
    }

    fn build(&self, value: Value) -> Result<ScheduleIiiMapping, ServerError> {
        let model: MappingConfigModel = serde_json::from_value(value)
            .map_err(|e| InvalidJson::with_debug("mapping configuration", &e))?;
        model.try_into()
    }
}

impl MappingConfigDatasource for MappingConfigDatasourceImpl {
    fn default_mapping(&self) -> Result<ScheduleIiiMapping, ServerError> {
        self.build(self.default_value()?)
    }

    fn from_string(&self, s: &str) -> Result<ScheduleIiiMapping, ServerError> {
        let mut merged = self.default_value()?;
        merge_values(&mut merged, self.parse_user_value(s)?);
        self.build(merged)
    }

    fn from_file<P>(&self, path: P) -> Result<ScheduleIiiMapping, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

/// Recursively merges `user` into `base`. Objects merge key by key; any other
/// value (including arrays) replaces what was there.
fn merge_values(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Object(base), Value::Object(user)) => {
            for (key, value) in user {
                let nested = value.is_object() && base.get(&key).is_some_and(Value::is_object);
                match base.get_mut(&key) {
                    Some(existing) if nested => merge_values(existing, value),
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, user) => *base = user,
    }
}
