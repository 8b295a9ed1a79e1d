//! Simplified property updates: turns scalars and structured payloads into one PATCH body.

use super::Page;
use crate::error::AppError;
use crate::types::{PropertyName, Scalar};
use serde_json::{Map, Value};

/// A new value for one property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyUpdate {
    /// Written into the property's main value slot.
    Scalar(Scalar),
    /// A complete write-shape object such as `{"select": {"name": "Done"}}`, sent as-is.
    Payload(Value),
}

impl From<Value> for PropertyUpdate {
    fn from(value: Value) -> Self {
        match Scalar::from_json(&value) {
            Some(scalar) => PropertyUpdate::Scalar(scalar),
            None => PropertyUpdate::Payload(value),
        }
    }
}

impl From<Scalar> for PropertyUpdate {
    fn from(scalar: Scalar) -> Self {
        PropertyUpdate::Scalar(scalar)
    }
}

impl From<&str> for PropertyUpdate {
    fn from(text: &str) -> Self {
        PropertyUpdate::Scalar(text.into())
    }
}

impl From<bool> for PropertyUpdate {
    fn from(value: bool) -> Self {
        PropertyUpdate::Scalar(value.into())
    }
}

impl From<f64> for PropertyUpdate {
    fn from(value: f64) -> Self {
        PropertyUpdate::Scalar(value.into())
    }
}

/// Resolves a batch of updates against the page's current properties.
///
/// Returns the `properties` object for a PATCH request, keyed by property name.
/// Any failure aborts the whole batch; the page itself is never modified.
/// A scalar aimed at an empty multi-valued property is skipped, since there is
/// no element to write into.
pub fn resolve_property_updates<I, N>(page: &Page, updates: I) -> Result<Map<String, Value>, AppError>
where
    I: IntoIterator<Item = (N, PropertyUpdate)>,
    N: Into<PropertyName>,
{
    let mut resolved = Map::new();

    for (name, update) in updates {
        let name: PropertyName = name.into();
        let current = page.property(name.as_str());

        if let Some(current) = current.filter(|p| !p.is_updatable()) {
            let attempted = match &update {
                PropertyUpdate::Scalar(scalar) => scalar.to_string(),
                PropertyUpdate::Payload(payload) => payload.to_string(),
            };
            return Err(AppError::property_update(
                name.as_str(),
                attempted,
                format!("'{}' properties are read-only", current.type_name()),
            ));
        }

        let scalar = match update {
            PropertyUpdate::Payload(payload) => {
                log::debug!("Passing structured payload through for '{}'", name);
                resolved.insert(name.to_string(), payload);
                continue;
            }
            PropertyUpdate::Scalar(scalar) => scalar,
        };

        let current = current.ok_or_else(|| {
            AppError::property_update(
                name.as_str(),
                &scalar,
                "the page has no such property, so its type is unknown; supply a structured payload",
            )
        })?;

        if current.value.collection_len() == Some(0) {
            log::info!(
                "Skipping update of empty '{}' property '{}'; supply a structured payload to populate it",
                current.type_name(),
                name
            );
            continue;
        }

        let mut updated = current.clone();
        let encoded = updated
            .set_default_value(scalar.clone())
            .and_then(|_| updated.encode())
            .map_err(|err| rename_failure(err, &name, &scalar))?;
        resolved.insert(name.to_string(), encoded);
    }

    Ok(resolved)
}

/// Setter errors only know the discriminator; report them under the property name.
fn rename_failure(err: AppError, name: &PropertyName, scalar: &Scalar) -> AppError {
    match err {
        AppError::PropertyUpdate { reason, .. } => {
            AppError::property_update(name.as_str(), scalar, reason)
        }
        other => AppError::property_update(name.as_str(), scalar, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_primitives_become_scalars() {
        assert_eq!(
            PropertyUpdate::from(json!("Done")),
            PropertyUpdate::Scalar(Scalar::Text("Done".to_string()))
        );
        assert_eq!(
            PropertyUpdate::from(json!({"checkbox": true})),
            PropertyUpdate::Payload(json!({"checkbox": true}))
        );
        assert!(matches!(
            PropertyUpdate::from(json!([1, 2])),
            PropertyUpdate::Payload(_)
        ));
    }
}
