//! Command implementations for all diarist commands

use crate::cli::commands::{
    AskArgs, IndexArgs, InsightsArgs, PatternsArgs, RemoveArgs, SearchArgs, SelectArgs,
    SwitchArgs, UpdateArgs,
};
use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use diarist_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Index(args) => execute_index(ctx, args),
            Commands::Update(args) => execute_update(ctx, args),
            Commands::Remove(args) => execute_remove(ctx, args),
            Commands::Ask(args) => execute_ask(ctx, args),
            Commands::Switch(args) => execute_switch(ctx, args),
            Commands::Search(args) => execute_search(ctx, args),
            Commands::Insights(args) => execute_insights(ctx, args),
            Commands::Patterns(args) => execute_patterns(ctx, args),
            Commands::Stats => commands::stats::execute(ctx.cli, &ctx.open_journal()?),
            Commands::Select(args) => execute_select(ctx, args),
        }
    }
}

fn execute_index(ctx: &CommandContext, args: &IndexArgs) -> Result<()> {
    let journal = ctx.open_journal()?;
    if args.check {
        commands::index::execute_check(ctx.cli, &journal)
    } else {
        commands::index::execute(ctx.cli, &journal)
    }
}

fn execute_update(ctx: &CommandContext, args: &UpdateArgs) -> Result<()> {
    commands::update::execute(
        ctx.cli,
        &ctx.open_journal()?,
        &args.path,
        args.category,
        args.subcategory,
    )
}

fn execute_remove(ctx: &CommandContext, args: &RemoveArgs) -> Result<()> {
    commands::remove::execute(ctx.cli, &ctx.open_journal()?, &args.path)
}

fn execute_ask(ctx: &CommandContext, args: &AskArgs) -> Result<()> {
    commands::ask::execute(
        ctx.cli,
        &ctx.open_journal()?,
        &args.query,
        args.from,
        args.to,
        args.full,
    )
}

fn execute_switch(ctx: &CommandContext, args: &SwitchArgs) -> Result<()> {
    commands::switch::execute(ctx.cli, &ctx.open_journal()?, &args.query)
}

fn execute_search(ctx: &CommandContext, args: &SearchArgs) -> Result<()> {
    commands::search::execute(ctx.cli, &ctx.open_journal()?, &args.query, args.category)
}

fn execute_insights(ctx: &CommandContext, args: &InsightsArgs) -> Result<()> {
    commands::insights::execute(ctx.cli, &ctx.open_journal()?, &args.month, args.months)
}

fn execute_patterns(ctx: &CommandContext, args: &PatternsArgs) -> Result<()> {
    commands::patterns::execute(ctx.cli, &ctx.open_journal()?, args.days)
}

fn execute_select(ctx: &CommandContext, args: &SelectArgs) -> Result<()> {
    commands::select::execute(ctx.cli, &args.path)
}
