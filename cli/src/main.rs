mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use cardtext::{PowerRollPart, parse_power_rolls};
use catalog::{
    CardOptions, Catalog, Category, Deck, Echelon, Filter, Item, convert_leveled, pick_random,
    render_level_summary, render_print_document,
};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "trove",
    version,
    about = "Tabletop treasure catalog and print-deck tool"
)]
struct Cli {
    /// Configuration file (default: ./trove.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored diagnostic output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog items matching the filters
    List(ListArgs),

    /// Show one item in full
    Show {
        /// Item name (case-insensitive)
        name: String,
    },

    /// Pick one random item from the filtered catalog
    Random(FilterArgs),

    /// Print the keyword vocabulary
    Keywords,

    /// Edit a deck file
    Deck(DeckArgs),

    /// Render a deck file as a print-ready HTML document
    Print(PrintArgs),

    /// Convert rulebook leveled-item text to catalog JSON
    Convert(ConvertArgs),
}

#[derive(clap::Args)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Also print descriptions
    #[arg(short, long)]
    long: bool,
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Substring to search in names, descriptions, and effects
    #[arg(short, long)]
    query: Option<String>,

    /// Restrict to a category (repeatable)
    #[arg(short, long)]
    category: Vec<Category>,

    /// Restrict to an echelon (repeatable)
    #[arg(short, long)]
    echelon: Vec<Echelon>,

    /// Require a keyword (repeatable)
    #[arg(short, long)]
    keyword: Vec<String>,
}

impl FilterArgs {
    fn into_filter(self) -> Filter {
        Filter {
            query: self.query,
            categories: self.category,
            echelons: self.echelon,
            keywords: self.keyword,
        }
    }
}

#[derive(clap::Args)]
struct DeckArgs {
    /// Deck file to edit (created on first use)
    file: PathBuf,

    #[command(subcommand)]
    action: DeckAction,
}

#[derive(Subcommand)]
enum DeckAction {
    /// Look up items by name and append them
    Add { names: Vec<String> },

    /// Remove an item by name
    Remove { name: String },

    /// Move an item from one position to another (zero-based)
    Move { from: usize, to: usize },

    /// Remove every item
    Clear,

    /// List the deck in order
    Show,
}

#[derive(clap::Args)]
struct PrintArgs {
    /// Deck file to render
    file: PathBuf,

    /// Output path (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Leave out crafting-project blocks
    #[arg(long)]
    no_project: bool,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Rulebook text file with leveled-item entries
    input: PathBuf,

    /// Output path (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let explicit_config = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("trove.toml"));
    let config = match Config::load(&config_path, explicit_config) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::List(args) => do_list(&config, args),
        Command::Show { name } => do_show(&config, &name),
        Command::Random(args) => do_random(&config, args),
        Command::Keywords => do_keywords(&config),
        Command::Deck(args) => do_deck(&config, args),
        Command::Print(args) => do_print(&config, args),
        Command::Convert(args) => do_convert(args, cli.no_color),
    };

    if let Err(message) = result {
        eprintln!("error: {}", message);
        process::exit(1);
    }
}

fn load_catalog(config: &Config) -> Result<Catalog, String> {
    Catalog::load(&config.catalog_paths()).map_err(|e| e.to_string())
}

fn do_list(config: &Config, args: ListArgs) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let filter = args.filter.into_filter();
    let matches = catalog.filter(&filter);

    println!(
        "{} result{}",
        matches.len(),
        if matches.len() == 1 { "" } else { "s" }
    );
    for item in matches {
        println!("{}", item_line(item));
        if args.long {
            if let Some(desc) = &item.description {
                println!("    {}", desc);
            }
        }
    }
    Ok(())
}

fn item_line(item: &Item) -> String {
    let mut line = item.name.clone();
    if let Some(category) = item.category {
        line.push_str(&format!(" [{}]", category));
    }
    if let Some(echelon) = item.echelon {
        line.push_str(&format!(" ({})", echelon));
    }
    if let Some(summary) = render_level_summary(item) {
        line.push_str(&format!("  {}", summary));
    }
    line
}

fn do_show(config: &Config, name: &str) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let item = catalog
        .find_by_name(name)
        .ok_or_else(|| format!("no item named '{}' in the catalog", name))?;
    print_item(item);
    Ok(())
}

fn do_random(config: &Config, args: FilterArgs) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let matches = catalog.filter(&args.into_filter());
    match pick_random(&matches) {
        Some(item) => {
            print_item(item);
            Ok(())
        }
        None => Err("no items match the filters".to_string()),
    }
}

fn do_keywords(config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    for keyword in catalog.keywords() {
        println!("{}", keyword);
    }
    Ok(())
}

fn print_item(item: &Item) {
    println!("{}", item.name);
    println!("  {}", item.kind);
    if let Some(echelon) = item.echelon {
        println!("  Echelon: {}", echelon);
    }
    if !item.keywords.is_empty() {
        println!("  Keywords: {}", item.keywords.join(", "));
    }
    if let Some(desc) = &item.description {
        println!("  {}", desc);
    }
    if let Some(effect) = &item.effect {
        print_rules_text("Effect", effect);
    }
    for line in &item.power_roll {
        println!("    {}", line);
    }
    for ability in &item.abilities {
        match &ability.kind {
            Some(kind) => println!("  Ability: {} ({})", ability.name, kind),
            None => println!("  Ability: {}", ability.name),
        }
    }
    for (label, text) in [
        ("1st level", &item.first_level),
        ("5th level", &item.fifth_level),
        ("9th level", &item.ninth_level),
    ] {
        if let Some(text) = text {
            print_rules_text(label, text);
        }
    }
    if let Some(project) = &item.project {
        if let Some(goal) = &project.goal {
            println!("  Project goal: {}", goal);
        }
    }
}

/// Print rules text with tier lines broken out, one per line.
fn print_rules_text(label: &str, text: &str) {
    println!("  {}:", label);
    for part in parse_power_rolls(text) {
        match part {
            PowerRollPart::Plain { text } => println!("    {}", text),
            PowerRollPart::Roll { marker, desc } => println!("    {:>6}  {}", marker, desc),
        }
    }
}

fn do_deck(config: &Config, args: DeckArgs) -> Result<(), String> {
    let mut deck = Deck::load(&args.file).map_err(|e| e.to_string())?;

    match args.action {
        DeckAction::Add { names } => {
            let catalog = load_catalog(config)?;
            for name in &names {
                let item = catalog
                    .find_by_name(name)
                    .ok_or_else(|| format!("no item named '{}' in the catalog", name))?;
                if !deck.add(item.clone()) {
                    eprintln!("'{}' is already in the deck", item.name);
                }
            }
        }
        DeckAction::Remove { name } => {
            let found = deck
                .items()
                .iter()
                .find(|it| it.name.eq_ignore_ascii_case(&name))
                .map(|it| (it.kind.clone(), it.name.clone()));
            match found {
                Some((kind, name)) => {
                    deck.remove(&kind, &name);
                }
                None => return Err(format!("'{}' is not in the deck", name)),
            }
        }
        DeckAction::Move { from, to } => {
            if !deck.move_item(from, to) {
                return Err(format!(
                    "cannot move {} to {} in a deck of {}",
                    from,
                    to,
                    deck.len()
                ));
            }
        }
        DeckAction::Clear => deck.clear(),
        DeckAction::Show => {
            println!(
                "{} item{}",
                deck.len(),
                if deck.len() == 1 { "" } else { "s" }
            );
            for (idx, item) in deck.items().iter().enumerate() {
                println!("{:>3}. {}", idx, item_line(item));
            }
            return Ok(());
        }
    }

    deck.save(&args.file).map_err(|e| e.to_string())
}

fn do_print(config: &Config, args: PrintArgs) -> Result<(), String> {
    let deck = Deck::load(&args.file).map_err(|e| e.to_string())?;
    let opts = CardOptions {
        include_project: config.print.include_project && !args.no_project,
        for_print: true,
    };
    let html = render_print_document(&deck, &opts);
    write_output(args.out.as_deref(), &html)
}

fn do_convert(args: ConvertArgs, no_color: bool) -> Result<(), String> {
    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("cannot read '{}': {}", args.input.display(), e))?;

    let (items, warnings) = convert_leveled(&source);

    if !warnings.is_empty() {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        let mut files = SimpleFiles::new();
        let file_id = files.add(args.input.display().to_string(), source);
        let writer = StandardStream::stderr(color_choice);
        let term_config = term::Config::default();
        for warning in &warnings {
            let diagnostic = warning.to_diagnostic(file_id);
            let _ =
                term::emit_to_write_style(&mut writer.lock(), &term_config, &files, &diagnostic);
        }
    }

    let json = serde_json::to_string_pretty(&items).map_err(|e| e.to_string())?;
    eprintln!("converted {} items", items.len());
    write_output(args.out.as_deref(), &json)
}

fn write_output(out: Option<&std::path::Path>, content: &str) -> Result<(), String> {
    match out {
        Some(path) => std::fs::write(path, content)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e)),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
