//! Interactive terminal prompts.

use dialoguer::{Confirm, Password};

use queuemate_client::{ConfirmationRequest, Decision};

/// Ask for the password without echoing it.
pub fn password() -> dialoguer::Result<String> {
    Password::new().with_prompt("Password").interact()
}

/// Show a confirmation request and ask y/N. `assume_yes` skips the prompt.
pub fn confirm(request: &ConfirmationRequest, assume_yes: bool) -> dialoguer::Result<Decision> {
    if assume_yes {
        return Ok(Decision::Confirm);
    }

    let confirmed = Confirm::new()
        .with_prompt(confirm_text(request))
        .default(false)
        .interact()?;
    Ok(Decision::from(confirmed))
}

fn confirm_text(request: &ConfirmationRequest) -> String {
    format!(
        "{}: {} ({} / {})",
        request.title, request.message, request.confirm_label, request.cancel_label
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use queuemate_core::BarberId;

    #[test]
    fn test_assume_yes_confirms_without_terminal() {
        let request = ConfirmationRequest::delete_barber(BarberId::new("b1"));
        assert_eq!(confirm(&request, true).unwrap(), Decision::Confirm);
    }

    #[test]
    fn test_confirm_text_names_both_choices() {
        let request = ConfirmationRequest::logout();
        let text = confirm_text(&request);
        assert!(text.starts_with(&format!("{}: {}", request.title, request.message)));
        assert!(text.ends_with(&format!("({} / {})", request.confirm_label, request.cancel_label)));
    }
}
