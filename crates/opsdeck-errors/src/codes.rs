use crate::retry::RetryClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub http_status: u16,
    pub retry: RetryClass,
}

pub const AUTH_UNAUTHENTICATED: ErrorCode = ErrorCode {
    code: "auth.unauthenticated",
    http_status: 401,
    retry: RetryClass::None,
};

pub const AUTH_FORBIDDEN: ErrorCode = ErrorCode {
    code: "auth.forbidden",
    http_status: 403,
    retry: RetryClass::None,
};

pub const SCHEMA_VALIDATION: ErrorCode = ErrorCode {
    code: "schema.validation",
    http_status: 422,
    retry: RetryClass::None,
};

pub const STORAGE_NOT_FOUND: ErrorCode = ErrorCode {
    code: "storage.not_found",
    http_status: 404,
    retry: RetryClass::None,
};

pub const STORAGE_CONFLICT: ErrorCode = ErrorCode {
    code: "storage.conflict",
    http_status: 409,
    retry: RetryClass::Transient,
};

pub const BAD_REQUEST: ErrorCode = ErrorCode {
    code: "request.invalid",
    http_status: 400,
    retry: RetryClass::None,
};

pub const UNKNOWN_INTERNAL: ErrorCode = ErrorCode {
    code: "unknown.internal",
    http_status: 500,
    retry: RetryClass::Permanent,
};
