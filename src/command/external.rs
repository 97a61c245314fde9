use std::fmt;

/// One invocation of the external graphics tool: a program name plus an
/// ordered list of argument tokens.
///
/// Tokens are handed to the OS as an argument array, so text containing
/// spaces or quotes needs no escaping. The [`Display`](fmt::Display) form is
/// shell-quoted for humans only (logs and `--dry-run`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single token
    pub fn arg<S: Into<String>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag followed by its value
    pub fn option<F: Into<String>, V: ToString>(&mut self, flag: F, value: V) -> &mut Self {
        self.args.push(flag.into());
        self.args.push(value.to_string());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of times `token` appears in the argument list
    pub fn count(&self, token: &str) -> usize {
        self.args.iter().filter(|arg| *arg == token).count()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|arg| arg == token)
    }

    /// Build a ready-to-spawn process command with inherited stdio
    pub fn to_process_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token.chars().any(|c| {
            c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`' | '!' | '(' | ')' | '*' | '?' | '&' | ';' | '|' | '<' | '>' | '#')
        })
}

fn write_token(f: &mut fmt::Formatter<'_>, token: &str) -> fmt::Result {
    if needs_quoting(token) {
        write!(f, "'{}'", token.replace('\'', r"'\''"))
    } else {
        f.write_str(token)
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(f, &self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_token(f, arg)?;
        }
        Ok(())
    }
}
