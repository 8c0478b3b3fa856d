use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub refresh: bool,
}

impl GlobalFlags {
    /// Spinners and bars only make sense for a human reading a table.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        use std::io::IsTerminal;

        !self.quiet && self.format == OutputFormat::Table && std::io::stderr().is_terminal()
    }
}
