use serde_json::Value;

use crate::coerce;
use crate::config::CONFIG;

use super::error::QueryError;
use super::types::Limit;

/// Number of records to skip. Must coerce to a non-negative integer.
pub fn convert_start(start: &Value) -> Result<u64, QueryError> {
    let n = coerce::parse_integer(start)?;
    if n < 0 {
        return Err(QueryError::OutOfRange { param: "start", value: n });
    }
    Ok(n as u64)
}

/// Record cap. `-1` means unbounded; anything else must be non-negative.
pub fn convert_limit(limit: &Value) -> Result<Limit, QueryError> {
    let n = coerce::parse_integer(limit)?;
    match n {
        -1 => Ok(Limit::Unbounded),
        n if n >= 0 => Ok(Limit::Count(n as u64)),
        n => Err(QueryError::OutOfRange { param: "limit", value: n }),
    }
}

/// Apply the configured server-side cap to a converted limit.
pub fn apply_max_limit(limit: Limit) -> Limit {
    cap_limit(limit, CONFIG.query.max_limit)
}

fn cap_limit(limit: Limit, max: Option<u64>) -> Limit {
    let Some(max) = max else {
        return limit;
    };
    match limit {
        Limit::Unbounded => {
            if CONFIG.query.debug_logging {
                tracing::warn!("Unbounded limit capped to configured max {}", max);
            }
            Limit::Count(max)
        }
        Limit::Count(n) if n > max => {
            if CONFIG.query.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", n, max);
            }
            Limit::Count(max)
        }
        other => other,
    }
}
