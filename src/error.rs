// Domain error taxonomy and its HTTP mapping.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const ERR_INTERNAL_EXCEPTION_CODE: &str = "ERR_INTERNAL_EXCEPTION";
pub const ERR_INTERNAL_EXCEPTION_DESC: &str = "An internal server error occurred.";

/// Closed set of domain failures. Every recognized condition is translated
/// into one of these at the point of detection; storage failures ride along
/// opaquely in `Storage` and receive the generic fallback triple.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid page size")]
    BadPageSize,
    #[error("invalid page index")]
    BadPageIndex,
    #[error("unauthorized access")]
    Unauthorized,

    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error("malformed token")]
    MalformedToken,
    #[error("missing token")]
    MissingToken,
    #[error("invalid token claims")]
    InvalidClaims,

    #[error("bad payload: {0}")]
    BadPayload(String),

    #[error("no account found with the given email")]
    NotFoundAccountByEmail,
    #[error("no account found with the given ID")]
    NotFoundAccountById,
    #[error("no user found with the given email")]
    NotFoundUserByEmail,
    #[error("no user found with the given ID")]
    NotFoundUserById,
    #[error("no address found with the given ID")]
    NotFoundAddressById,
    #[error("no address found with the given account ID")]
    NotFoundAddressByAccountId,
    #[error("no model found with the given ID")]
    NotFoundModelById,
    #[error("no unit found with the given ID")]
    NotFoundUnitById,
    #[error("no unit found with the given name")]
    NotFoundUnitByName,
    #[error("no sensor found with the given ID")]
    NotFoundSensorById,
    #[error("no sensor found with the given code")]
    NotFoundSensorByCode,
    #[error("no device found with the given ID")]
    NotFoundDeviceById,
    #[error("no device found with the given serial number")]
    NotFoundDeviceBySerialNumber,

    #[error("no device for account ID provided")]
    NotOwnedDeviceById,
    #[error("no device for account with the given serial number")]
    NotOwnedDeviceBySerialNumber,
    #[error("no user for account ID provided")]
    NotOwnedUserById,
    #[error("no address for account ID provided")]
    NotOwnedAddressById,

    #[error("serial number does not match")]
    SerialNumberMismatch,
    #[error("model does not match")]
    ModelMismatch,
    #[error("device and account do not match")]
    DeviceAccountMismatch,

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    /// Stable machine-readable code. `NotOwned*` kinds deliberately share the
    /// code of their `NotFound*ById` counterpart so a caller cannot tell a
    /// foreign resource apart from a nonexistent one.
    pub fn code(&self) -> &'static str {
        use DomainError::*;
        match self {
            BadPageSize => "ERR_BAD_PAGE_SIZE",
            BadPageIndex => "ERR_BAD_PAGE_INDEX",
            Unauthorized => "ERR_UNAUTHORIZED",
            InvalidToken => "ERR_BAD_TOKEN",
            ExpiredToken => "ERR_EXPIRED_TOKEN",
            MalformedToken => "ERR_MALFORMED_TOKEN",
            MissingToken => "ERR_MISSING_TOKEN",
            InvalidClaims => "ERR_BAD_TOKEN_CLAIMS",
            BadPayload(_) => "ERR_BAD_PAYLOAD_FIELDS",
            NotFoundAccountByEmail => "ERR_NOT_FOUND_ACCOUNT_BY_EMAIL",
            NotFoundAccountById => "ERR_NOT_FOUND_ACCOUNT_BY_ID",
            NotFoundUserByEmail => "ERR_NOT_FOUND_USER_BY_EMAIL",
            NotFoundUserById | NotOwnedUserById => "ERR_NOT_FOUND_USER_BY_ID",
            NotFoundAddressById | NotOwnedAddressById => "ERR_NOT_FOUND_ADDRESS_BY_ID",
            NotFoundAddressByAccountId => "ERR_NOT_FOUND_ADDRESS_BY_ACCOUNT_ID",
            NotFoundModelById => "ERR_NOT_FOUND_MODEL_BY_ID",
            NotFoundUnitById => "ERR_NOT_FOUND_UNIT_BY_ID",
            NotFoundUnitByName => "ERR_NOT_FOUND_UNIT_BY_NAME",
            NotFoundSensorById => "ERR_NOT_FOUND_SENSOR_BY_ID",
            NotFoundSensorByCode => "ERR_NOT_FOUND_SENSOR_BY_CODE",
            NotFoundDeviceById | NotOwnedDeviceById => "ERR_NOT_FOUND_DEVICE_BY_ID",
            NotFoundDeviceBySerialNumber | NotOwnedDeviceBySerialNumber => {
                "ERR_NOT_FOUND_DEVICE_BY_SERIAL_NUMBER"
            }
            SerialNumberMismatch => "ERR_SERIAL_NUMBER_NOT_MATCH",
            ModelMismatch => "ERR_MODEL_NOT_MATCH",
            DeviceAccountMismatch => "ERR_DEVICE_AND_ACCOUNT_NOT_MATCH",
            Storage(_) | Internal(_) => ERR_INTERNAL_EXCEPTION_CODE,
        }
    }

    /// Human description, safe to return to clients. Internal causes (SQL
    /// text, driver errors) are never exposed here, only logged.
    pub fn description(&self) -> String {
        use DomainError::*;
        match self {
            BadPageSize => "The page size provided is invalid.".into(),
            BadPageIndex => "The page index provided is invalid.".into(),
            Unauthorized => "Unauthorized access.".into(),
            InvalidToken => "The token provided is invalid.".into(),
            ExpiredToken => "The token provided has expired.".into(),
            MalformedToken => "The token provided is malformed.".into(),
            MissingToken => "No token provided.".into(),
            InvalidClaims => "The token claims are invalid.".into(),
            BadPayload(reason) => format!("Bad Request: {}", reason),
            NotFoundAccountByEmail => "No account found with the given email.".into(),
            NotFoundAccountById => "No account found with the given ID.".into(),
            NotFoundUserByEmail => "No user found with the given email.".into(),
            NotFoundUserById | NotOwnedUserById => "No user found with the given ID.".into(),
            NotFoundAddressById | NotOwnedAddressById => {
                "No address found with the given ID.".into()
            }
            NotFoundAddressByAccountId => "No address found with the given account ID.".into(),
            NotFoundModelById => "No model found with the given ID.".into(),
            NotFoundUnitById => "No unit found with the given ID.".into(),
            NotFoundUnitByName => "No unit found with the given name.".into(),
            NotFoundSensorById => "No sensor found with the given ID.".into(),
            NotFoundSensorByCode => "No sensor found with the given code.".into(),
            NotFoundDeviceById | NotOwnedDeviceById => "No device found with the given ID.".into(),
            NotFoundDeviceBySerialNumber | NotOwnedDeviceBySerialNumber => {
                "No device found with the given serial number.".into()
            }
            SerialNumberMismatch => "The serial number does not match.".into(),
            ModelMismatch => "The model does not match.".into(),
            DeviceAccountMismatch => "The device and account do not match.".into(),
            Storage(_) | Internal(_) => ERR_INTERNAL_EXCEPTION_DESC.into(),
        }
    }

    /// HTTP status for the kind. Unmapped/internal failures fall back to 400,
    /// matching the long-standing observable behavior of this API.
    pub fn http_status(&self) -> StatusCode {
        use DomainError::*;
        match self {
            Unauthorized | InvalidToken | ExpiredToken | MalformedToken | MissingToken
            | InvalidClaims => StatusCode::UNAUTHORIZED,
            BadPageSize | BadPageIndex | BadPayload(_) | SerialNumberMismatch | ModelMismatch
            | DeviceAccountMismatch => StatusCode::BAD_REQUEST,
            NotFoundAccountByEmail
            | NotFoundAccountById
            | NotFoundUserByEmail
            | NotFoundUserById
            | NotFoundAddressById
            | NotFoundAddressByAccountId
            | NotFoundModelById
            | NotFoundUnitById
            | NotFoundUnitByName
            | NotFoundSensorById
            | NotFoundSensorByCode
            | NotFoundDeviceById
            | NotFoundDeviceBySerialNumber
            | NotOwnedDeviceById
            | NotOwnedDeviceBySerialNumber
            | NotOwnedUserById
            | NotOwnedAddressById => StatusCode::NOT_FOUND,
            Storage(_) | Internal(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Attach the request id so the error can answer the HTTP request.
    pub fn with_request_id(self, request_id: impl Into<String>) -> ApiError {
        ApiError {
            request_id: request_id.into(),
            error: self,
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub code: &'static str,
    pub error: String,
}

/// A `DomainError` bound to the request it failed, ready to serialize.
#[derive(Debug)]
pub struct ApiError {
    pub request_id: String,
    pub error: DomainError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let DomainError::Storage(ref source) = self.error {
            tracing::error!(request_id = %self.request_id, %source, "storage failure");
        } else {
            tracing::info!(
                request_id = %self.request_id,
                code = self.error.code(),
                "unable to perform request due to: {}",
                self.error
            );
        }

        let body = ErrorBody {
            request_id: self.request_id,
            code: self.error.code(),
            error: self.error.description(),
        };
        (self.error.http_status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_errors_are_bad_requests() {
        assert_eq!(DomainError::BadPageSize.code(), "ERR_BAD_PAGE_SIZE");
        assert_eq!(DomainError::BadPageSize.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(DomainError::BadPageIndex.code(), "ERR_BAD_PAGE_INDEX");
        assert_eq!(DomainError::BadPageIndex.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credential_errors_are_unauthorized() {
        for err in [
            DomainError::MissingToken,
            DomainError::InvalidToken,
            DomainError::ExpiredToken,
            DomainError::MalformedToken,
            DomainError::InvalidClaims,
            DomainError::Unauthorized,
        ] {
            assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED, "{:?}", err);
        }
        assert_eq!(DomainError::MissingToken.code(), "ERR_MISSING_TOKEN");
        assert_eq!(DomainError::ExpiredToken.code(), "ERR_EXPIRED_TOKEN");
    }

    #[test]
    fn not_owned_is_indistinguishable_from_not_found() {
        let pairs = [
            (DomainError::NotOwnedDeviceById, DomainError::NotFoundDeviceById),
            (
                DomainError::NotOwnedDeviceBySerialNumber,
                DomainError::NotFoundDeviceBySerialNumber,
            ),
            (DomainError::NotOwnedUserById, DomainError::NotFoundUserById),
            (DomainError::NotOwnedAddressById, DomainError::NotFoundAddressById),
        ];
        for (owned, found) in pairs {
            assert_eq!(owned.code(), found.code());
            assert_eq!(owned.description(), found.description());
            assert_eq!(owned.http_status(), found.http_status());
            assert_eq!(owned.http_status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn storage_failures_use_the_fallback_triple() {
        let err = DomainError::Storage(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), ERR_INTERNAL_EXCEPTION_CODE);
        assert_eq!(err.description(), ERR_INTERNAL_EXCEPTION_DESC);
        // Historic quirk: unmapped errors answer 400, not 500.
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_payload_carries_the_reason() {
        let err = DomainError::BadPayload("missing field `email`".into());
        assert_eq!(err.code(), "ERR_BAD_PAYLOAD_FIELDS");
        assert_eq!(err.description(), "Bad Request: missing field `email`");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }
}
