//! Bodies of the one-time code mails

/// Subject and plain-text body of an outgoing mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailContent {
    pub subject: String,
    pub body: String,
}

pub fn verification_mail(code: &str, expiry_minutes: i64) -> MailContent {
    MailContent {
        subject: String::from("Verify your Stazy email"),
        body: format!(
            "Welcome to Stazy!\n\nYour verification code is: {}\n\nThe code expires in {} minutes.",
            code, expiry_minutes
        ),
    }
}

pub fn password_reset_mail(code: &str, expiry_minutes: i64) -> MailContent {
    MailContent {
        subject: String::from("Reset your Stazy password"),
        body: format!(
            "We received a request to reset your password.\n\nYour reset code is: {}\n\n\
             The code expires in {} minutes. If you did not ask for this, ignore this mail.",
            code, expiry_minutes
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mails_carry_code_and_window() {
        let mail = verification_mail("123456", 5);
        assert!(mail.body.contains("123456"));
        assert!(mail.body.contains("5 minutes"));

        let mail = password_reset_mail("654321", 15);
        assert!(mail.body.contains("654321"));
        assert!(mail.body.contains("15 minutes"));
    }
}
