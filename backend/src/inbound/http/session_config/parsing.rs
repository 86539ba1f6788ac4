//! Environment parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct EnvFlag {
    name: &'static str,
    debug_default: bool,
}

impl EnvFlag {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }
}

/// Return `fallback` in debug builds after logging, `error` in release.
fn lenient<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(%error, "session configuration fallback in debug build");
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn read_flag<E: Env>(
    env: &E,
    mode: BuildMode,
    flag: EnvFlag,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(flag.name) else {
        return lenient(
            mode,
            flag.debug_default,
            SessionConfigError::MissingEnv { name: flag.name },
        );
    };
    match parse_bool(&value) {
        Some(parsed) => Ok(parsed),
        None => lenient(
            mode,
            flag.debug_default,
            SessionConfigError::InvalidEnv {
                name: flag.name,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

pub(super) fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return lenient(
            mode,
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => lenient(mode, SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => lenient(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(true))]
    #[case(" Yes ", Some(true))]
    #[case("n", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
