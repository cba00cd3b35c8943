//! The normalized success/failure envelope returned by every remote call.
//!
//! On the wire an [`ActionResult`] is `{ "ok": true, "value": ... }` or
//! `{ "ok": false, "error": "..." }`. The backend itself answers with the
//! variant shape `{ "ok": ... }` / `{ "err": "..." }`, modelled by
//! [`RemoteResult`] and normalized through `From`. A success without a
//! `value` field is accepted when the payload type reads from unit, as for
//! `ActionResult<()>`.

use serde::de::value::UnitDeserializer;
use serde::de::{self, Deserializer, IntoDeserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    Ok(T),
    Err(String),
}

impl<T> ActionResult<T> {
    #[must_use]
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    #[must_use]
    pub fn err(error: impl Into<String>) -> Self {
        Self::Err(error.into())
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            Self::Ok(value) => ActionResult::Ok(f(value)),
            Self::Err(error) => ActionResult::Err(error),
        }
    }

    /// Convert into a standard `Result`, carrying the error message as `Err`.
    ///
    /// # Errors
    ///
    /// Returns the carried message when the action failed.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(error),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for ActionResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResult", 2)?;
        match self {
            Self::Ok(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            Self::Err(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireResult<T> {
    Failure { ok: bool, error: String },
    Success { ok: bool, value: T },
    Bare { ok: bool },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ActionResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireResult::<T>::deserialize(deserializer)? {
            WireResult::Failure { ok: false, error } => Ok(Self::Err(error)),
            WireResult::Success { ok: true, value } => Ok(Self::Ok(value)),
            WireResult::Bare { ok: true } => {
                let unit: UnitDeserializer<D::Error> = ().into_deserializer();
                T::deserialize(unit).map(Self::Ok)
            }
            _ => Err(de::Error::custom(
                "action result `ok` flag does not match its payload",
            )),
        }
    }
}

/// Raw result variant as produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteResult<T> {
    Ok(T),
    Err(String),
}

impl<T> From<RemoteResult<T>> for ActionResult<T> {
    fn from(remote: RemoteResult<T>) -> Self {
        match remote {
            RemoteResult::Ok(value) => Self::Ok(value),
            RemoteResult::Err(error) => Self::Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_wire_shape() {
        let json = serde_json::to_value(ActionResult::ok(7_u32)).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "value": 7 }));
    }

    #[test]
    fn failure_wire_shape() {
        let json = serde_json::to_value(ActionResult::<u32>::err("Quiz not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ok": false, "error": "Quiz not found" })
        );
    }

    #[test]
    fn unit_success_reads_back() {
        let parsed: ActionResult<()> =
            serde_json::from_value(serde_json::json!({ "ok": true, "value": null })).unwrap();
        assert_eq!(parsed, ActionResult::Ok(()));
    }

    #[test]
    fn unit_success_without_value_field_reads_back() {
        let parsed: ActionResult<()> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(parsed, ActionResult::Ok(()));

        let optional: ActionResult<Option<u32>> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(optional, ActionResult::Ok(None));
    }

    #[test]
    fn missing_value_is_rejected_for_non_unit_payloads() {
        let parsed: Result<ActionResult<u32>, _> = serde_json::from_str(r#"{"ok":true}"#);
        assert!(parsed.is_err());

        let bare_failure: Result<ActionResult<()>, _> = serde_json::from_str(r#"{"ok":false}"#);
        assert!(bare_failure.is_err());
    }

    #[test]
    fn mismatched_flag_is_rejected() {
        let parsed: Result<ActionResult<u32>, _> =
            serde_json::from_value(serde_json::json!({ "ok": true, "error": "boom" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn remote_variants_normalize() {
        let ok: RemoteResult<String> = serde_json::from_str(r#"{"ok":"token-1"}"#).unwrap();
        let err: RemoteResult<String> = serde_json::from_str(r#"{"err":"Invalid credentials"}"#).unwrap();

        assert_eq!(ActionResult::from(ok), ActionResult::Ok("token-1".to_string()));
        assert_eq!(
            ActionResult::from(err).error(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn std_result_conversion_keeps_message() {
        let failed: Result<u8, std::io::Error> = Err(std::io::Error::other("disk gone"));
        let action = ActionResult::from(failed);
        assert_eq!(action.into_result(), Err("disk gone".to_string()));
    }
}
