use super::{ensure_passwords_match, render, Flow, SettingsCommand, Shell};
use crate::error::Result;
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Shell<R, W> {
    /// The `settings>` sub-prompt. Returns to the main prompt on `back`,
    /// `logout`, or once the session is lost.
    pub(super) fn settings(&mut self) -> Result<Flow> {
        writeln!(self.output, "{}", render::SETTINGS_HELP)?;

        loop {
            let Some(line) = self.prompt("settings> ")? else {
                return Ok(Flow::Exit);
            };

            let command = match SettingsCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };

            let outcome = match command {
                SettingsCommand::Back => return Ok(Flow::Continue),
                SettingsCommand::Logout => {
                    self.session.sign_out();
                    writeln!(self.output, "Logged out")?;
                    return Ok(Flow::Continue);
                }
                SettingsCommand::Profile => self.show_profile(),
                SettingsCommand::ChangePassword => self.change_password(),
            };

            if let Err(e) = outcome {
                self.report(&e)?;
                if !self.session.is_authenticated() {
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    fn show_profile(&mut self) -> Result<()> {
        let info = self
            .session
            .authorized(&self.auth, |token| self.auth.get_profile(token))?;
        writeln!(self.output, "{}", render::profile(&info))?;
        Ok(())
    }

    fn change_password(&mut self) -> Result<()> {
        let current = self.read_field("Current password: ")?;
        let new_password = self.read_field("New password: ")?;
        let retype = self.read_field("Retype new password: ")?;
        ensure_passwords_match(&new_password, &retype)?;

        let message = self.session.authorized(&self.auth, |token| {
            self.auth.change_password(token, &current, &new_password)
        })?;
        writeln!(
            self.output,
            "Password changed: {}",
            message.detail.as_deref().unwrap_or("OK")
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::api::{ApiClient, AuthService, NoteService};
    use std::io::Cursor;
    use std::sync::Arc;

    const TOKENS: &str = r#"{"access": "acc-1", "refresh": "ref-1"}"#;

    fn run_script(mock: &Arc<MockTransport>, script: &str) -> (bool, String) {
        let api = Arc::new(ApiClient::new("http://127.0.0.1:8000/api", mock.clone()).unwrap());
        let mut shell = Shell::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            AuthService::new(api.clone()),
            NoteService::new(api),
        );
        shell.run().unwrap();
        let authenticated = shell.session().is_authenticated();
        (authenticated, String::from_utf8(shell.into_output()).unwrap())
    }

    #[test]
    fn test_profile_is_shown() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);
        mock.push_json(
            200,
            r#"{"id": 1, "username": "alice", "email": "a@example.com", "first_name": "Alice", "last_name": "Liddell"}"#,
        );

        let (_, out) = run_script(&mock, "login\nalice\nsecret\nsettings\nprofile\nback\nexit\n");

        assert!(out.contains(" id: 1\n username: alice\n email: a@example.com"));
        let requests = mock.requests();
        assert_eq!(requests[1].url.path(), "/api/auth/userinfo/");
        let logged_in_as = &requests[0].body.as_ref().unwrap()["username"];
        assert_eq!(logged_in_as, "alice");
    }

    #[test]
    fn test_logout_clears_session() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);

        let (authenticated, out) =
            run_script(&mock, "login\nalice\nsecret\nsettings\nlogout\nlist\n");

        assert!(out.contains("Logged out"));
        assert!(out.contains("Error: Please login first"));
        assert!(!authenticated);
    }

    #[test]
    fn test_change_password_mismatch_is_local() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);

        let (authenticated, out) = run_script(
            &mock,
            "login\nalice\nsecret\nsettings\nchange-password\nsecret\nnew1\nnew2\nback\n",
        );

        assert!(out.contains("Error: Passwords do not match"));
        assert_eq!(mock.request_count(), 1);
        assert!(authenticated);
    }

    #[test]
    fn test_change_password_success() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);
        mock.push_json(200, r#"{"detail": "Password updated successfully"}"#);

        let (_, out) = run_script(
            &mock,
            "login\nalice\nsecret\nsettings\nchange-password\nsecret\nnew\nnew\nback\n",
        );

        assert!(out.contains("Password changed: Password updated successfully"));
        assert_eq!(
            mock.requests()[1].body,
            Some(serde_json::json!({"old_password": "secret", "new_password": "new"}))
        );
    }

    #[test]
    fn test_unknown_settings_command() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);

        let (_, out) = run_script(&mock, "login\nalice\nsecret\nsettings\nwhoami\nback\n");

        assert!(out.contains("Unknown settings command"));
    }

    #[test]
    fn test_lost_session_leaves_settings() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, TOKENS);
        mock.push_json(401, r#"{"detail":"expired"}"#);
        mock.push_json(401, r#"{"detail":"Token is blacklisted"}"#);

        let (authenticated, out) =
            run_script(&mock, "login\nalice\nsecret\nsettings\nprofile\nlist\n");

        assert!(out.contains("Please login again."));
        // `list` is read by the main prompt, not the settings one
        assert!(out.contains("Error: Please login first"));
        assert!(!authenticated);
    }
}
