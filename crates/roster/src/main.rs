//! `roster` - CLI for browsing a club's member directory
//!
//! This binary loads a roster export and prints search results, the grouped
//! team page, or a single member's profile.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use roster::cli::{
    BrowseCommand, Cli, Command, ConfigCommand, OutputFormat, ReorderCommand, SearchCommand,
    ShowCommand,
};
use roster::index::{filter, find, search, Directory, EnrichedMember};
use roster::source::{load_list_document, load_members, reorder_file};
use roster::{init_logging, move_item, Config, Direction, Error};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Validation reports on a config that may not load, so it runs first
    let command = match cli.command {
        Command::Config(ConfigCommand::Validate { file }) => {
            return handle_validate(file.or(cli.config));
        }
        command => command,
    };

    let config = Config::load_from(cli.config).context("loading configuration")?;

    match command {
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Browse(cmd) => handle_browse(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Reorder(cmd) => handle_reorder(&cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn enriched_members(config: &Config, file: &Path) -> Result<Vec<EnrichedMember>> {
    let records = load_members(file)
        .with_context(|| format!("loading roster from {}", file.display()))?;
    Ok(config.search_index().enrich(&records))
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> Result<()> {
    let members = enriched_members(config, &cmd.file)?;

    let limit = cmd.limit.or_else(|| config.default_limit());
    let hits = search(&members, &cmd.query, cmd.leaders, limit);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Table => print_table(&hits),
        OutputFormat::Plain => {
            for member in &hits {
                println!("{}", summary_line(member));
            }
        }
    }

    if hits.is_empty() && cmd.format != OutputFormat::Json {
        println!("No members match \"{}\".", cmd.query.trim());
    }
    Ok(())
}

fn handle_browse(config: &Config, cmd: &BrowseCommand) -> Result<()> {
    let mut members = enriched_members(config, &cmd.file)?;
    if let Some(query) = &cmd.query {
        members = filter(&members, query);
    }

    let directory =
        Directory::build(&members).with_leadership_label(&config.directory.leadership_label);

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&directory)?);
        return Ok(());
    }

    if directory.is_empty() {
        println!("No members to show.");
        return Ok(());
    }

    for (i, section) in directory.sections().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", section.title, section.members.len());
        println!("{}", "-".repeat(section.title.chars().count()));
        match cmd.format {
            OutputFormat::Table => print_table(section.members),
            _ => {
                for member in section.members {
                    println!("  {}", summary_line(member));
                }
            }
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let members = enriched_members(config, &cmd.file)?;
    let member = find(&members, &cmd.id).ok_or_else(|| Error::member_not_found(&cmd.id))?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(member)?);
        return Ok(());
    }

    let record = member.record();
    println!("{}", member.full_name());
    println!("{}", "=".repeat(member.full_name().chars().count().max(1)));
    println!("ID:          {}", member.id());
    println!("Role:        {}", member.primary_role());
    println!("Department:  {}", member.primary_department());
    println!("Leadership:  {}", if member.is_leader() { "yes" } else { "no" });
    if record.designations.len() > 1 {
        println!("Also:        {}", record.designations[1..].join(", "));
    }
    if record.departments.len() > 1 {
        println!("Also in:     {}", record.departments[1..].join(", "));
    }
    if !record.skills.is_empty() {
        println!("Skills:      {}", record.skills.join(", "));
    }
    for link in &record.social_links {
        let platform = if link.platform.is_empty() {
            "link"
        } else {
            link.platform.as_str()
        };
        println!("{:<13}{}", format!("{platform}:"), link.url);
    }
    if !record.bio.is_empty() {
        println!();
        println!("{}", record.bio);
    }
    Ok(())
}

fn handle_reorder(cmd: &ReorderCommand) -> Result<()> {
    let direction = Direction::from(cmd.direction);

    let moved = if cmd.in_place {
        let moved = reorder_file(&cmd.file, cmd.index, direction)
            .with_context(|| format!("reordering {}", cmd.file.display()))?;
        println!(
            "{} item {} {direction} in {}",
            if moved { "Moved" } else { "Did not move" },
            cmd.index,
            cmd.file.display()
        );
        moved
    } else {
        let mut document = load_list_document(&cmd.file)
            .with_context(|| format!("loading list from {}", cmd.file.display()))?;
        let moved = move_item(&mut document.items, cmd.index, direction)?;
        println!("{}", serde_json::to_string_pretty(&document.to_value())?);
        moved
    };

    if !moved {
        tracing::warn!(index = cmd.index, %direction, "Item is already at that end of the list");
    }
    Ok(())
}

fn handle_validate(file: Option<PathBuf>) -> Result<()> {
    let explicit = file.is_some();
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());

    if !explicit && !path.exists() {
        println!("No configuration file; defaults are in effect.");
        return Ok(());
    }

    Config::check_file(&path)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    println!("Configuration is valid.");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Directory]");
                println!("  Other department:   {}", config.directory.other_department);
                println!("  Default role:       {}", config.directory.default_role);
                println!("  Leadership label:   {}", config.directory.leadership_label);
                println!();
                println!("[Leadership]");
                println!("  Extra roles:        {}", config.leadership.extra_roles.len());
                println!("  Patterns:           {}", config.leadership.patterns.len());
                println!();
                println!("[Search]");
                match config.default_limit() {
                    Some(limit) => println!("  Default limit:      {limit}"),
                    None => println!("  Default limit:      unlimited"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => return handle_validate(file),
    }
    Ok(())
}

fn summary_line(member: &EnrichedMember) -> String {
    format!(
        "{} ({}, {})",
        display_name(member),
        member.primary_role(),
        member.primary_department()
    )
}

fn display_name(member: &EnrichedMember) -> &str {
    if member.full_name().is_empty() {
        "(unnamed)"
    } else {
        member.full_name()
    }
}

fn print_table(members: &[EnrichedMember]) {
    if members.is_empty() {
        return;
    }

    let headers = ["ID", "NAME", "ROLE", "DEPARTMENT", "LEAD"];
    let rows: Vec<[&str; 5]> = members
        .iter()
        .map(|m| {
            [
                m.id(),
                display_name(m),
                m.primary_role(),
                m.primary_department(),
                if m.is_leader() { "*" } else { "" },
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[&str; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(&headers));
    for row in &rows {
        println!("{}", render(row));
    }
}
