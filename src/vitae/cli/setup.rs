use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "vitae",
    bin_name = "vitae",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Edit, preview and export your CV from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the CV data (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Pdf,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Document,
    Appearance,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Document => "Document Commands:",
            CommandGroup::Appearance => "Appearance Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "show" | "set" | "add" | "edit" | "remove" => Some(CommandGroup::Document),
            "theme" | "render" => Some(CommandGroup::Appearance),
            "export" | "import" | "reset" => Some(CommandGroup::Data),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Document,
            CommandGroup::Appearance,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("vitae {version}\n"));
    output.push_str("Edit, preview and export your CV from the command line\n");
    output.push('\n');
    output.push_str("Usage: vitae [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>  Directory holding the CV data\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Name of the subcommand, as clap knows it.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Document(c) => match c {
            DocumentCommands::Show { .. } => "show",
            DocumentCommands::Set { .. } => "set",
            DocumentCommands::Add { .. } => "add",
            DocumentCommands::Edit { .. } => "edit",
            DocumentCommands::Remove { .. } => "remove",
        },
        Commands::Appearance(c) => match c {
            AppearanceCommands::Theme { .. } => "theme",
            AppearanceCommands::Render { .. } => "render",
        },
        Commands::Data(c) => match c {
            DataCommands::Export { .. } => "export",
            DataCommands::Import { .. } => "import",
            DataCommands::Reset { .. } => "reset",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
    }
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|a| a == name) {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Document(DocumentCommands),

    #[command(flatten)]
    Appearance(AppearanceCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// Show the document overview, or one section as JSON
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Section to print (e.g. skills, experience, personal)
        section: Option<String>,
    },

    /// Replace a whole section
    #[command(display_order = 2)]
    Set {
        /// Section to replace
        section: String,

        /// Text for summary, JSON for other sections; @FILE reads it from a file
        value: String,
    },

    /// Append a new entry to a list section
    #[command(alias = "a", display_order = 3)]
    Add {
        /// List section (e.g. skill, language, experience)
        section: String,

        /// Field to set on the new entry
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Edit fields of one entry, or of personal info (no id)
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Section holding the entry
        section: String,

        /// Entry id, as printed by `show`
        id: Option<String>,

        /// Field to change
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", required = true)]
        fields: Vec<String>,
    },

    /// Remove one entry from a list section
    #[command(alias = "rm", display_order = 5)]
    Remove {
        /// Section holding the entry
        section: String,

        /// Entry id, as printed by `show`
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppearanceCommands {
    /// Show or change the theme
    #[command(display_order = 10)]
    Theme {
        /// Layout template (modern, classic)
        #[arg(long)]
        template: Option<String>,

        /// Palette preset (e.g. "forest green")
        #[arg(long)]
        palette: Option<String>,

        /// Font preset (inter, lora, roboto, source-sans-pro)
        #[arg(long)]
        font: Option<String>,

        /// Override one palette color
        #[arg(long = "color", value_name = "ROLE=COLOR")]
        colors: Vec<String>,

        /// List available templates, palettes and fonts
        #[arg(long)]
        list: bool,
    },

    /// Render the HTML preview
    #[command(display_order = 11)]
    Render {
        /// Render with this template without saving it
        #[arg(short, long)]
        template: Option<String>,

        /// Write the page to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export the CV as JSON or PDF
    #[command(display_order = 20)]
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Target directory (defaults to the export-dir setting, then the current dir)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Replace the CV with the contents of a JSON file
    #[command(display_order = 21)]
    Import { file: PathBuf },

    /// Restore the sample CV
    #[command(display_order = 22)]
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (rasterizer, rasterizer-args, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for vitae or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
