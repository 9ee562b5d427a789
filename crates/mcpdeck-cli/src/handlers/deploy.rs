//! Deploy and redeploy handlers.

use mcpdeck_core::{Request, SettingsValues};

use super::respond;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// `--set` pairs as a settings mapping; `None` when no pair was given so the
/// stored settings are left untouched.
fn supplied_settings(pairs: Vec<(String, String)>) -> Option<SettingsValues> {
    (!pairs.is_empty()).then(|| pairs.into_iter().collect())
}

pub async fn deploy(
    ctx: &CliContext,
    script_ref: String,
    pairs: Vec<(String, String)>,
    wait: bool,
) -> Result<(), CliError> {
    let request = Request::Deploy {
        script_ref,
        settings: supplied_settings(pairs),
    };
    respond(ctx, ctx.core().handle(request).await, wait).await
}

pub async fn redeploy(
    ctx: &CliContext,
    container_name: String,
    script_ref: String,
    pairs: Vec<(String, String)>,
    wait: bool,
) -> Result<(), CliError> {
    let request = Request::Redeploy {
        container_name,
        script_ref,
        settings: supplied_settings(pairs),
    };
    respond(ctx, ctx.core().handle(request).await, wait).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_settings() {
        assert_eq!(supplied_settings(Vec::new()), None);
        let values = supplied_settings(vec![
            ("A".to_string(), "1".to_string()),
            ("A".to_string(), "2".to_string()),
        ])
        .unwrap();
        assert_eq!(values["A"], "2");
    }
}
