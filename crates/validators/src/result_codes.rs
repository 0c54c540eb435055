//! Result codes the emulated service returns.
//!
//! Some of these are not documented by the service; the set was collected
//! from observed responses.

/// Constants representing VWS result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    TargetCreated,
    AuthenticationFailure,
    RequestTimeTooSkewed,
    TargetNameExist,
    UnknownTarget,
    BadImage,
    ImageTooLarge,
    MetadataTooLarge,
    DateRangeError,
    Fail,
    TargetStatusProcessing,
    RequestQuotaReached,
    TargetStatusNotSuccess,
    ProjectInactive,
    InactiveProject,
    TooManyRequests,
}

impl ResultCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Success => "Success",
            ResultCode::TargetCreated => "TargetCreated",
            ResultCode::AuthenticationFailure => "AuthenticationFailure",
            ResultCode::RequestTimeTooSkewed => "RequestTimeTooSkewed",
            ResultCode::TargetNameExist => "TargetNameExist",
            ResultCode::UnknownTarget => "UnknownTarget",
            ResultCode::BadImage => "BadImage",
            ResultCode::ImageTooLarge => "ImageTooLarge",
            ResultCode::MetadataTooLarge => "MetadataTooLarge",
            ResultCode::DateRangeError => "DateRangeError",
            ResultCode::Fail => "Fail",
            ResultCode::TargetStatusProcessing => "TargetStatusProcessing",
            ResultCode::RequestQuotaReached => "RequestQuotaReached",
            ResultCode::TargetStatusNotSuccess => "TargetStatusNotSuccess",
            ResultCode::ProjectInactive => "ProjectInactive",
            ResultCode::InactiveProject => "InactiveProject",
            ResultCode::TooManyRequests => "TooManyRequests",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
