//! Mapping serenity failures into fetch errors.

use scrollback_error::{FetchError, FetchErrorKind, ResourceKind};
use serenity::http::HttpError;

/// Status of a rejected REST call, if the failure was one.
fn status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

/// Error for a call that looks up a single resource.
///
/// Discord answers 403 for resources the bot cannot see, which callers
/// cannot tell apart from a missing one.
#[track_caller]
pub(crate) fn lookup_error(err: serenity::Error, resource: ResourceKind, id: u64) -> FetchError {
    match status(&err) {
        Some(404 | 403) => FetchError::not_found(resource, id),
        _ => platform_error(err),
    }
}

/// Error for a call whose failure is never a missing resource.
#[track_caller]
pub(crate) fn platform_error(err: serenity::Error) -> FetchError {
    FetchError::new(FetchErrorKind::Platform(err.to_string()))
}

/// A 404 while paging means the channel vanished mid-walk.
#[track_caller]
pub(crate) fn history_error(err: serenity::Error, channel: u64) -> FetchError {
    match status(&err) {
        Some(404) => FetchError::not_found(ResourceKind::Channel, channel),
        _ => platform_error(err),
    }
}
