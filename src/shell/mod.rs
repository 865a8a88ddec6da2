//! Line-based interactive front end over the shared client core.

mod command;
pub mod render;
mod settings;

pub use command::{Command, SettingsCommand};

use crate::api::{AuthService, NoteService};
use crate::database;
use crate::error::{NoteError, Result};
use crate::models::{Note, NotePatch};
use crate::session::Session;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Whether the prompt loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Checked before register and change-password reach the network.
pub fn ensure_passwords_match(password: &str, retype: &str) -> Result<()> {
    if password == retype {
        Ok(())
    } else {
        Err(NoteError::PasswordMismatch)
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    auth: AuthService,
    notes: NoteService,
    session: Session,
    cache: Option<Connection>,
    page_size: Option<u32>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, auth: AuthService, notes: NoteService) -> Self {
        Shell {
            input,
            output,
            auth,
            notes,
            session: Session::new(),
            cache: None,
            page_size: None,
        }
    }

    pub fn with_cache(mut self, conn: Connection) -> Self {
        self.cache = Some(conn);
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the prompt loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", render::HELP)?;

        while let Some(line) = self.prompt("> ")? {
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };

            debug!("Dispatching {:?}", command);
            match self.dispatch(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => self.report(&e)?,
            }
        }

        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Register => self.register()?,
            Command::Login => self.login()?,
            Command::List { page } => {
                let page_size = self.page_size;
                let result = self
                    .session
                    .authorized(&self.auth, |token| self.notes.list(token, page, page_size))?;
                self.mirror(&result.results);
                writeln!(self.output, "{}", render::page(&result, page, "No notes found."))?;
            }
            Command::Search { query, page } => {
                let page_size = self.page_size;
                let result = self.session.authorized(&self.auth, |token| {
                    self.notes.search(token, &query, page, page_size)
                })?;
                self.mirror(&result.results);
                writeln!(self.output, "{}", render::page(&result, page, "No results."))?;
            }
            Command::Get { id } => {
                let note = self
                    .session
                    .authorized(&self.auth, |token| self.notes.get(token, id))?;
                self.mirror(std::slice::from_ref(&note));
                writeln!(self.output, "{}", render::note_detail(&note))?;
            }
            Command::Create { title, description } => {
                let note = self.session.authorized(&self.auth, |token| {
                    self.notes.create(token, &title, &description)
                })?;
                self.mirror(std::slice::from_ref(&note));
                writeln!(self.output, "Created note: {}", render::note_line(&note))?;
            }
            Command::Update {
                id,
                title,
                description,
            } => {
                let note = self.session.authorized(&self.auth, |token| {
                    self.notes.update(token, id, &title, &description)
                })?;
                self.mirror(std::slice::from_ref(&note));
                writeln!(self.output, "Updated: {}", render::note_line(&note))?;
            }
            Command::Patch {
                id,
                title,
                description,
            } => {
                let patch = NotePatch { title, description };
                let note = self
                    .session
                    .authorized(&self.auth, |token| self.notes.patch(token, id, &patch))?;
                self.mirror(std::slice::from_ref(&note));
                writeln!(self.output, "Patched: {}", render::note_line(&note))?;
            }
            Command::Delete { id } => {
                self.session
                    .authorized(&self.auth, |token| self.notes.delete(token, id))?;
                self.forget(id);
                writeln!(self.output, "Deleted.")?;
            }
            Command::Cached => self.show_cached()?,
            Command::Settings => {
                if !self.session.is_authenticated() {
                    return Err(NoteError::NotAuthenticated);
                }
                return self.settings();
            }
            Command::Help => writeln!(self.output, "{}", render::HELP)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn register(&mut self) -> Result<()> {
        let first_name = self.read_field("First name: ")?;
        let last_name = self.read_field("Last name: ")?;
        let username = self.read_field("Username: ")?;
        let email = self.read_field("Email: ")?;
        let password = self.read_field("Password: ")?;
        let retype = self.read_field("Retype password: ")?;
        ensure_passwords_match(&password, &retype)?;

        let profile = self
            .auth
            .register(&first_name, &last_name, &username, &email, &password)?;
        writeln!(self.output, "Registered: {}", profile.username)?;
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        let username = self.read_field("Username: ")?;
        let password = self.read_field("Password: ")?;

        let tokens = self.auth.login(&username, &password)?;
        self.session.sign_in(tokens);
        writeln!(self.output, "Logged in successfully")?;
        Ok(())
    }

    fn show_cached(&mut self) -> Result<()> {
        let Some(conn) = &self.cache else {
            writeln!(self.output, "Local cache is disabled.")?;
            return Ok(());
        };

        let notes = database::list_notes(conn)?;
        if notes.is_empty() {
            writeln!(self.output, "No cached notes.")?;
        }
        for note in &notes {
            writeln!(self.output, "{}", render::local_note_line(note))?;
        }
        Ok(())
    }

    /// Copies server notes into the local cache. Failures are logged only.
    fn mirror(&self, notes: &[Note]) {
        let Some(conn) = &self.cache else {
            return;
        };
        for note in notes {
            if let Err(e) = database::upsert_remote(conn, note) {
                warn!("Failed to cache note {}: {}", note.id, e);
            }
        }
    }

    fn forget(&self, server_id: i64) {
        if let Some(conn) = &self.cache {
            if let Err(e) = database::remove_remote(conn, server_id) {
                warn!("Failed to drop cached note {}: {}", server_id, e);
            }
        }
    }

    fn report(&mut self, error: &NoteError) -> io::Result<()> {
        match error {
            NoteError::InvalidArgument(msg) => writeln!(self.output, "{}", msg),
            other => writeln!(self.output, "Error: {}", other),
        }
    }

    /// Writes `label` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_field(&mut self, label: &str) -> Result<String> {
        self.prompt(label)?.ok_or_else(|| {
            NoteError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
        })
    }
}
