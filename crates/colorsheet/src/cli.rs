//! Command-line interface.
//!
//! [`Cli`] is the clap definition and [`run`] executes a parsed invocation,
//! writing user-facing output to the given writer. Logging goes to stderr
//! through `tracing` and is set up separately by [`crate::logging::init`].

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use console::style;

use colorsheet_catalog::generator::DEFAULT_AUTHOR;
use colorsheet_catalog::{
    generate_with, write_swift, AccessLevel, CatalogOptions, ColorSpace, Context, RenderMode,
    SwiftOptions, SwiftOutcome,
};
use colorsheet_parser::ast::{Document, DocumentItem, RuleSet, RuleSetItem};

#[derive(Debug, Parser)]
#[command(name = "colorsheet", version, about = "Compile light/dark color sheets for Xcode")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an asset catalog (.xcassets) from a color sheet
    GenAssets(GenAssetsArgs),
    /// Generate a Swift UIColor extension from a color sheet
    GenSwift(GenSwiftArgs),
    /// Parse a color sheet and resolve all of its variables
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct GenAssetsArgs {
    /// Color sheet to compile
    pub input: PathBuf,

    /// Catalog directory to write; replaced if it exists
    #[arg(short, long)]
    pub output: PathBuf,

    /// Color space stamped on every color
    #[arg(long, env = "COLORSHEET_COLOR_SPACE", default_value_t = ColorSpace::Srgb)]
    pub color_space: ColorSpace,

    /// Author tag written into every Contents.json
    #[arg(long, env = "COLORSHEET_AUTHOR", default_value = DEFAULT_AUTHOR)]
    pub author: String,
}

#[derive(Debug, Args)]
pub struct GenSwiftArgs {
    /// Color sheet to compile
    pub input: PathBuf,

    /// Swift file to write
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::AssetCatalog)]
    pub mode: ModeArg,

    /// Access level of the generated enums and accessors
    #[arg(long, value_enum, default_value_t = AccessArg::Internal)]
    pub access: AccessArg,

    /// Rewrite the file even if its contents would not change
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Color sheet to check
    pub input: PathBuf,

    /// What to print once the sheet is valid
    #[arg(long, value_enum, default_value_t = CheckFormat::Summary)]
    pub format: CheckFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Look colors up in the asset catalog by name
    AssetCatalog,
    /// Build colors inline, no asset catalog needed
    DynamicColor,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::AssetCatalog => RenderMode::AssetCatalog,
            ModeArg::DynamicColor => RenderMode::DynamicColor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessArg {
    Internal,
    Public,
}

impl From<AccessArg> for AccessLevel {
    fn from(access: AccessArg) -> Self {
        match access {
            AccessArg::Internal => AccessLevel::Internal,
            AccessArg::Public => AccessLevel::Public,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckFormat {
    /// One line with item counts
    Summary,
    /// The syntax tree as JSON
    Json,
    /// The syntax tree as YAML
    Yaml,
}

/// Executes a parsed command line.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::GenAssets(args) => gen_assets(args, out),
        Command::GenSwift(args) => gen_swift(args, out),
        Command::Check(args) => check(args, out),
    }
}

fn load(input: &Path) -> Result<Document> {
    if !input.exists() {
        bail!("no such file: {}", input.display());
    }
    tracing::debug!(path = %input.display(), "parsing");
    Ok(colorsheet_parser::parse_file(input)?)
}

fn gen_assets(args: &GenAssetsArgs, out: &mut dyn Write) -> Result<()> {
    let document = load(&args.input)?;
    let context = Context::build(&document);
    let options = CatalogOptions::new()
        .color_space(args.color_space)
        .author(args.author.as_str());

    let summary = generate_with(&document, &args.output, &options, &context)
        .with_context(|| format!("failed to generate {}", args.output.display()))?;

    writeln!(
        out,
        "{}",
        style(format!(
            "Wrote {} colors in {} groups to {}",
            summary.colors,
            summary.groups,
            args.output.display()
        ))
        .green()
    )?;
    Ok(())
}

fn gen_swift(args: &GenSwiftArgs, out: &mut dyn Write) -> Result<()> {
    let document = load(&args.input)?;
    let context = Context::build(&document);
    let options = SwiftOptions::new()
        .mode(args.mode.into())
        .access_level(args.access.into());

    let outcome = write_swift(&document, &context, &args.output, &options, args.force)
        .with_context(|| format!("failed to generate {}", args.output.display()))?;

    match outcome {
        SwiftOutcome::Written => {
            writeln!(out, "{}", style(format!("Wrote {}", args.output.display())).green())?
        }
        SwiftOutcome::Unchanged => writeln!(
            out,
            "{}",
            style(format!(
                "Contents of {} are identical; the file has not been touched",
                args.output.display()
            ))
            .yellow()
        )?,
    }
    Ok(())
}

fn check(args: &CheckArgs, out: &mut dyn Write) -> Result<()> {
    let document = load(&args.input)?;
    let context = Context::build(&document);
    context
        .validate()
        .with_context(|| format!("{} has unresolvable variables", args.input.display()))?;

    match args.format {
        CheckFormat::Summary => {
            let counts = Counts::of(&document);
            writeln!(
                out,
                "{} {}: {} variables, {} groups, {} colors",
                style("ok").green().bold(),
                args.input.display(),
                context.len(),
                counts.groups,
                counts.colors
            )?;
        }
        CheckFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?,
        CheckFormat::Yaml => write!(out, "{}", serde_yaml::to_string(&document)?)?,
    }
    Ok(())
}

/// Rulesets and declarations in a document, variables excluded.
#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    groups: usize,
    colors: usize,
}

impl Counts {
    fn of(document: &Document) -> Self {
        let mut counts = Counts::default();
        for item in &document.items {
            match item {
                DocumentItem::Variable(_) => {}
                DocumentItem::RuleSet(ruleset) => counts.add_ruleset(ruleset),
                DocumentItem::Declaration(_) => counts.colors += 1,
            }
        }
        counts
    }

    fn add_ruleset(&mut self, ruleset: &RuleSet) {
        self.groups += 1;
        for item in &ruleset.items {
            match item {
                RuleSetItem::RuleSet(child) => self.add_ruleset(child),
                RuleSetItem::Declaration(_) => self.colors += 1,
            }
        }
    }
}
