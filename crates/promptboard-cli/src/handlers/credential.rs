use crate::cli::CredentialAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &mut CliContext, action: CredentialAction) -> anyhow::Result<()> {
    match action {
        CredentialAction::Set { value } => {
            if value.trim().is_empty() {
                output::output_error(
                    "credential must not be empty (use 'credential clear' to remove it)",
                );
            }
            ctx.save_credential(value.trim()).await?;
            output::output_success(serde_json::json!({
                "configured": true,
                "path": ctx.credential_path().display().to_string()
            }));
        }
        CredentialAction::Status => {
            output::output_success(serde_json::json!({
                "configured": ctx.credential.is_some(),
                "path": ctx.credential_path().display().to_string()
            }));
        }
        CredentialAction::Clear => {
            ctx.clear_credential().await?;
            output::output_success(serde_json::json!({ "configured": false }));
        }
    }
    Ok(())
}
