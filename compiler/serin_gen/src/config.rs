//! Generator configuration.

use serde::Serialize;
use serin_ir::Attribute;

/// Engine names the generated code refers to. All are written fully
/// qualified so the companion does not depend on the user's usings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostProfile {
    /// Base class of every engine-managed object.
    pub engine_object: String,
    /// Interface whose hooks the engine calls around serialization.
    pub callback_interface: String,
    pub serialize_field_attribute: String,
    /// Logging class with static `LogWarning` / `LogError`.
    pub debug_log: String,
    /// Attribute applied to backing fields, taking one `typeof(..)` argument.
    pub validate_attribute: String,
    pub before_serialize_hook: String,
    pub after_deserialize_hook: String,
}

impl Default for HostProfile {
    fn default() -> Self {
        HostProfile {
            engine_object: "UnityEngine.Object".to_string(),
            callback_interface: "UnityEngine.ISerializationCallbackReceiver".to_string(),
            serialize_field_attribute: "UnityEngine.SerializeField".to_string(),
            debug_log: "UnityEngine.Debug".to_string(),
            validate_attribute: "SerializeInterface.ValidateInterface".to_string(),
            before_serialize_hook: "OnBeforeSerialize".to_string(),
            after_deserialize_hook: "OnAfterDeserialize".to_string(),
        }
    }
}

impl HostProfile {
    /// Whether a base-list entry as rendered names the callback interface,
    /// either fully qualified or by its simple name.
    pub fn is_callback_interface(&self, name: &str) -> bool {
        let simple = self
            .callback_interface
            .rsplit('.')
            .next()
            .unwrap_or(&self.callback_interface);
        let name = name.strip_prefix("global::").unwrap_or(name);
        name == self.callback_interface || name == simple
    }
}

/// Configuration for a generator run.
#[derive(Clone, Debug, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Config struct: each bool controls an independent flag"
)]
pub struct GeneratorConfig {
    /// Marker attribute name, with or without the `Attribute` suffix.
    pub marker_attribute: String,
    /// Appended to a field name to name its backing field.
    pub backing_suffix: String,
    /// Analyze and emit classes on a scoped thread pool.
    pub parallel: bool,
    /// Report skipped marker fields as warnings instead of only tracing them.
    pub report_skipped_fields: bool,
    /// Generated hooks log a warning when a stored reference fails the cast.
    pub emit_cast_warnings: bool,
    /// Emit one `InstantiateInterface` overload per element type.
    pub instantiate_helpers: bool,
    pub host: HostProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            marker_attribute: "SerializeInterface".to_string(),
            backing_suffix: "Serialized".to_string(),
            parallel: true,
            report_skipped_fields: true,
            emit_cast_warnings: true,
            instantiate_helpers: true,
            host: HostProfile::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn is_marker(&self, attribute: &Attribute) -> bool {
        attribute.is_named(&self.marker_attribute)
    }

    pub fn backing_name(&self, field_name: &str) -> String {
        format!("{field_name}{}", self.backing_suffix)
    }
}
