//! Console context shared by the fixer steps

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Output and prompting settings for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct AppContext {
    pub quiet: bool,
    /// Ask before deleting a candidate whose target already exists
    pub confirm_deletes: bool,
}

impl AppContext {
    pub fn new(quiet: bool, confirm_deletes: bool) -> Self {
        Self {
            quiet,
            confirm_deletes,
        }
    }

    /// Prompt for a yes/no answer; quiet mode answers with `default`
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
        if self.quiet {
            return Ok(default);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
    }

    pub fn print_success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).green());
        }
    }

    pub fn print_warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).yellow());
        }
    }

    pub fn print_info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).cyan());
        }
    }

    /// Errors are printed even in quiet mode
    pub fn print_error(&self, msg: &str) {
        eprintln!("{}", style(msg).red());
    }
}
