//! # CLI Layer
//!
//! This module is **one possible UI client** for vitae. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides exit codes
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data dir, install logging, build `VitaeApi`
//! 3. **API Dispatch**: Call the appropriate `VitaeApi` method
//! 4. **Output Formatting**: Convert `CmdResult` into terminal output
//! 5. **Error Handling**: A result carrying an error message exits with 1
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API over `FsBackend`
//! - `handle_*()`: Per-command handlers that call the API and print

use super::print::{print_messages, print_overview, render_config, render_theme};
use super::setup::{
    command_name, print_grouped_help, print_help_for_command, AppearanceCommands, Cli, Commands,
    DataCommands, DocumentCommands, ExportFormat, MiscCommands,
};
use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vitae::api::{ConfigAction, ThemeChange, VitaeApi};
use vitae::commands::{CmdResult, VitaePaths};
use vitae::error::{Result, VitaeError};
use vitae::store::fs_backend::FsBackend;
use vitae::theme::TemplateVariant;

struct AppContext {
    api: VitaeApi<FsBackend>,
}

/// Runs the CLI and returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.help {
        match &cli.command {
            Some(command) => print_help_for_command(command_name(command)),
            None => print_grouped_help(),
        }
        return Ok(0);
    }

    init_tracing(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(cmd) => print_help_for_command(cmd),
            None => print_grouped_help(),
        }
        return Ok(0);
    }

    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Document(cmd)) => match cmd {
            DocumentCommands::Show { section } => handle_show(&ctx, section),
            DocumentCommands::Set { section, value } => handle_set(&mut ctx, section, value),
            DocumentCommands::Add { section, fields } => {
                ctx.api.add_entry(&section, &fields).map(print_result)
            }
            DocumentCommands::Edit {
                section,
                id,
                fields,
            } => ctx
                .api
                .edit_entry(&section, id.as_deref(), &fields)
                .map(print_result),
            DocumentCommands::Remove { section, id } => {
                ctx.api.remove_entry(&section, &id).map(print_result)
            }
        },
        Some(Commands::Appearance(cmd)) => match cmd {
            AppearanceCommands::Theme {
                template,
                palette,
                font,
                colors,
                list,
            } => handle_theme(&mut ctx, template, palette, font, colors, list),
            AppearanceCommands::Render { template, output } => {
                handle_render(&ctx, template, output)
            }
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export { format, output } => handle_export(&ctx, format, output),
            DataCommands::Import { file } => ctx.api.import(&file).map(print_result),
            DataCommands::Reset { yes } => ctx.api.reset(|| yes || confirm_reset()).map(print_result),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { .. } => Ok(CmdResult::default()),
        },
        None => handle_show(&ctx, None),
    }?;

    Ok(if result.has_errors() { 1 } else { 0 })
}

/// Logs go to stderr. `--verbose` forces debug; otherwise `RUST_LOG`, else warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vitae=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "vitae", "vitae")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                VitaeError::Api("Could not determine a data directory; pass --data-dir".into())
            })?,
    };
    debug!(data_dir = %data_dir.display(), "using data dir");

    let backend = FsBackend::new(data_dir.clone());
    let api = VitaeApi::new(backend, VitaePaths { data_dir })?;
    Ok(AppContext { api })
}

fn print_result(result: CmdResult) -> CmdResult {
    print_messages(&result.messages);
    result
}

fn handle_show(ctx: &AppContext, section: Option<String>) -> Result<CmdResult> {
    let result = ctx.api.show(section.as_deref())?;
    if let Some(json) = &result.section_json {
        println!("{}", serde_json::to_string_pretty(json)?);
    } else {
        print_overview(&result.overview);
    }
    Ok(print_result(result))
}

/// `@path` reads the value from a file; `@-` reads stdin.
fn handle_set(ctx: &mut AppContext, section: String, value: String) -> Result<CmdResult> {
    let value = match value.strip_prefix('@') {
        Some("-") => std::io::read_to_string(std::io::stdin())?,
        Some(path) => std::fs::read_to_string(path)?,
        None => value,
    };
    ctx.api.set_section(&section, &value).map(print_result)
}

fn handle_theme(
    ctx: &mut AppContext,
    template: Option<String>,
    palette: Option<String>,
    font: Option<String>,
    colors: Vec<String>,
    list: bool,
) -> Result<CmdResult> {
    if list {
        return Ok(print_result(ctx.api.theme_presets()));
    }

    let mut changes = Vec::new();
    if let Some(name) = palette {
        changes.push(ThemeChange::Palette(name));
    }
    for raw in colors {
        let (role, value) = raw
            .split_once('=')
            .ok_or_else(|| VitaeError::Api(format!("expected ROLE=COLOR, got '{}'", raw)))?;
        changes.push(ThemeChange::Color {
            role: role.trim().to_string(),
            value: value.trim().to_string(),
        });
    }
    if let Some(key) = font {
        changes.push(ThemeChange::Font(key));
    }
    if let Some(name) = template {
        let variant = TemplateVariant::from_str(&name).map_err(VitaeError::Api)?;
        changes.push(ThemeChange::Template(variant));
    }

    let result = ctx.api.theme(&changes)?;
    if let Some(theme) = &result.theme {
        print!("{}", render_theme(theme));
    }
    Ok(print_result(result))
}

fn handle_render(
    ctx: &AppContext,
    template: Option<String>,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let result = ctx.api.render(template.as_deref(), output.as_deref())?;
    if let Some(html) = &result.html {
        print!("{}", html);
    }
    Ok(print_result(result))
}

fn handle_export(
    ctx: &AppContext,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let result = match format {
        ExportFormat::Json => ctx.api.export_json(output.as_deref())?,
        ExportFormat::Pdf => {
            let rasterizer = ctx.api.rasterizer();
            ctx.api.export_pdf(&rasterizer, output.as_deref())?
        }
    };
    Ok(print_result(result))
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(print_result(result))
}

/// Asks on the terminal. Without an interactive stdin the reset is declined.
fn confirm_reset() -> bool {
    if !std::io::stdin().is_terminal() {
        println!("Not a terminal; pass -y to reset without confirmation.");
        return false;
    }
    let term = Term::stdout();
    if term
        .write_str("Replace your CV with the sample document? [y/N] ")
        .is_err()
    {
        return false;
    }
    match term.read_line() {
        Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
