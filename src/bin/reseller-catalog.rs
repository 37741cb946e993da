//! CLI for building reseller catalog JSON documents.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use owo_colors::OwoColorize;
use reseller_catalog::duration_parser::parse_duration;
use reseller_catalog::error::{CatalogError, Result};
use reseller_catalog::models::{PaymentMethod, ProductId, ResellerCatalog, Step};
use reseller_catalog::presets::{PRODUCT_PRESETS, find_preset};
use reseller_catalog::projection::project_to_json;
use reseller_catalog::wizard::Wizard;

/// Environment variable supplying the default reseller name.
const NAME_ENV: &str = "RESELLER_NAME";
/// Environment variable supplying the default profile picture URL.
const PFP_ENV: &str = "RESELLER_PFP";

/// Reseller catalog builder: parse durations and assemble catalog JSON.
#[derive(Debug, Parser)]
#[command(name = "reseller-catalog", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Show the canonical key for each duration input.
    Parse {
        /// Duration texts, e.g. "7 days", "1 month", "lifetime", "30".
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// List selectable products and payment methods.
    Presets,
    /// Build a catalog from flags and print its JSON.
    Build(BuildArgs),
    /// Build a catalog step by step from prompts on stdin.
    Wizard {
        /// Also write the final JSON to this file.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Arguments for the `build` subcommand.
#[derive(Debug, Args)]
struct BuildArgs {
    /// Reseller name (default: $RESELLER_NAME).
    #[arg(long)]
    name: Option<String>,
    /// Profile picture URL (default: $RESELLER_PFP).
    #[arg(long)]
    pfp: Option<String>,
    /// Product with its payment methods, e.g. "Wave=crypto,paypal".
    #[arg(long = "product", value_name = "NAME=PAY[,PAY...]", value_parser = parse_product_arg)]
    products: Vec<ProductSpec>,
    /// Priced duration, e.g. "Wave|7 days|9.99|https://shop/wave".
    #[arg(long = "duration", value_name = "PRODUCT|DURATION|PRICE|URL", value_parser = parse_duration_arg)]
    durations: Vec<DurationSpec>,
    /// Write the JSON to this file instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// A product and its payment methods.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProductSpec {
    /// Product name.
    name: String,
    /// Payment methods in the given order.
    payments: Vec<PaymentMethod>,
}

/// A priced duration for a named product.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DurationSpec {
    /// Product name.
    product: String,
    /// Raw duration text.
    duration: String,
    /// Price text.
    price: String,
    /// Purchase URL.
    url: String,
}

/// Reseller details taken from the environment.
#[derive(Debug, Clone, Default)]
struct Defaults {
    /// Default reseller name.
    name: Option<String>,
    /// Default profile picture URL.
    pfp: Option<String>,
}

impl Defaults {
    /// Reads defaults from `RESELLER_NAME` and `RESELLER_PFP`.
    fn from_env() -> Self {
        Self {
            name: env_value(NAME_ENV),
            pfp: env_value(PFP_ENV),
        }
    }
}

/// Reads a non-blank environment variable.
fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Splits `name<delimiter>pay,pay` into a [`ProductSpec`].
fn split_product_spec(raw: &str, delimiter: char) -> Result<ProductSpec> {
    let (name, payments) = raw
        .trim()
        .split_once(delimiter)
        .ok_or(CatalogError::MissingPayments)?;
    let name_text = name.trim();
    if name_text.is_empty() {
        return Err(CatalogError::UnknownProduct(name.to_owned()));
    }
    let methods = payments
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<PaymentMethod>>>()?;
    if methods.is_empty() {
        return Err(CatalogError::MissingPayments);
    }
    Ok(ProductSpec {
        name: name_text.to_owned(),
        payments: methods,
    })
}

/// Parses a `--product` value for clap.
fn parse_product_arg(raw: &str) -> core::result::Result<ProductSpec, String> {
    split_product_spec(raw, '=').map_err(|err| err.to_string())
}

/// Parses a `--duration` value for clap.
fn parse_duration_arg(raw: &str) -> core::result::Result<DurationSpec, String> {
    let mut parts = raw.splitn(4, '|');
    let mut next = || parts.next().map(str::trim).unwrap_or_default().to_owned();
    let spec = DurationSpec {
        product: next(),
        duration: next(),
        price: next(),
        url: next(),
    };
    if spec.product.is_empty() || spec.duration.is_empty() {
        return Err("expected PRODUCT|DURATION|PRICE|URL".to_owned());
    }
    Ok(spec)
}

/// Builds a catalog from `build` arguments, falling back to `defaults`.
fn build_catalog(args: &BuildArgs, defaults: &Defaults) -> Result<ResellerCatalog> {
    let mut catalog = ResellerCatalog::new();
    catalog.set_reseller_name(
        args.name
            .clone()
            .or_else(|| defaults.name.clone())
            .unwrap_or_default(),
    );
    catalog.set_profile_picture_url(
        args.pfp
            .clone()
            .or_else(|| defaults.pfp.clone())
            .unwrap_or_default(),
    );
    for spec in &args.products {
        let image = find_preset(&spec.name).map_or("", |preset| preset.image_url);
        let _id = catalog.add_product(&spec.name, image, spec.payments.clone())?;
    }
    for spec in &args.durations {
        let product = product_id(&catalog, &spec.product)?;
        let _id = catalog.add_duration(product, &spec.duration, &spec.price, &spec.url)?;
    }
    Ok(catalog)
}

/// Resolves a product name to its ID.
fn product_id(catalog: &ResellerCatalog, name: &str) -> Result<ProductId> {
    catalog
        .product_by_name(name)
        .map(|product| product.id)
        .ok_or_else(|| CatalogError::UnknownProduct(name.to_owned()))
}

/// Writes the JSON document to `path`.
fn write_output(path: &Path, json: &str) -> Result<()> {
    fs::write(path, format!("{json}\n"))?;
    tracing::info!(path = %path.display(), "wrote catalog document");
    Ok(())
}

/// Prints an error line.
fn print_error<W: Write>(out: &mut W, err: &CatalogError) -> io::Result<()> {
    writeln!(out, "{} {err}", "error:".red().bold())
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    dispatch(cli.command, &Defaults::from_env())
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(command: Command, defaults: &Defaults) -> io::Result<ExitCode> {
    match command {
        Command::Parse { inputs } => cmd_parse(&inputs),
        Command::Presets => cmd_presets(),
        Command::Build(args) => cmd_build(&args, defaults),
        Command::Wizard { output } => cmd_wizard(output.as_deref(), defaults),
    }
}

/// Executes the `parse` subcommand.
fn cmd_parse(inputs: &[String]) -> io::Result<ExitCode> {
    let (table, all_valid) = parse_table(inputs);
    writeln!(io::stdout().lock(), "{table}")?;
    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Tabulates each input with its key; the flag is `false` if any input is
/// invalid.
fn parse_table(inputs: &[String]) -> (Table, bool) {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Input").fg(Color::Cyan),
        Cell::new("Key").fg(Color::Cyan),
        Cell::new("Meaning").fg(Color::Cyan),
    ]);

    let mut all_valid = true;
    for input in inputs {
        match parse_duration(input) {
            Some(key) => {
                _ = table.add_row(vec![
                    Cell::new(input),
                    Cell::new(key.as_str()).fg(Color::Green),
                    Cell::new(key.label()),
                ]);
            }
            None => {
                all_valid = false;
                _ = table.add_row(vec![
                    Cell::new(input),
                    Cell::new("invalid").fg(Color::Red),
                    Cell::new("-").fg(Color::DarkGrey),
                ]);
            }
        }
    }

    (table, all_valid)
}

/// Executes the `presets` subcommand.
fn cmd_presets() -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Product").fg(Color::Cyan),
        Cell::new("Image").fg(Color::Cyan),
    ]);
    for preset in PRODUCT_PRESETS {
        _ = table.add_row(vec![Cell::new(preset.name), Cell::new(preset.image_url)]);
    }

    writeln!(
        out,
        "{} {}",
        "Products".green().bold(),
        format_args!("({})", PRODUCT_PRESETS.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    writeln!(out)?;
    writeln!(out, "{} {}", "Payment methods:".bold(), payment_list())?;
    Ok(ExitCode::SUCCESS)
}

/// Comma-separated list of every payment method.
fn payment_list() -> String {
    PaymentMethod::ALL
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Executes the `build` subcommand.
fn cmd_build(args: &BuildArgs, defaults: &Defaults) -> io::Result<ExitCode> {
    let written = build_catalog(args, defaults).and_then(|catalog| {
        let json = project_to_json(&catalog);
        match args.output.as_deref() {
            Some(path) => write_output(path, &json),
            None => Ok(writeln!(io::stdout().lock(), "{json}")?),
        }
    });
    match written {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            print_error(&mut io::stderr().lock(), &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `wizard` subcommand on stdin/stdout.
fn cmd_wizard(output: Option<&Path>, defaults: &Defaults) -> io::Result<ExitCode> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let finished = run_wizard(&mut input, &mut out, defaults).and_then(|wizard| {
        if let Some(path) = output {
            write_output(path, &wizard.json())?;
        }
        Ok(())
    });
    match finished {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            print_error(&mut io::stderr().lock(), &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Interactive wizard ───────────────────────────────────────────────

/// Drives a [`Wizard`] from line input until `quit` or end of input.
fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    defaults: &Defaults,
) -> Result<Wizard> {
    let mut wizard = Wizard::new();
    loop {
        let more = match wizard.step() {
            Step::Reseller => reseller_step(&mut wizard, input, out, defaults)?,
            Step::Products => products_step(&mut wizard, input, out)?,
            Step::Review => review_step(&mut wizard, input, out)?,
        };
        if !more {
            return Ok(wizard);
        }
    }
}

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}

/// Prompts for a value; a blank answer keeps `default`.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: Option<&str>,
) -> io::Result<Option<String>> {
    match default {
        Some(value) => write!(out, "{label} [{value}]: ")?,
        None => write!(out, "{label}: ")?,
    }
    out.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    let answer = line.trim();
    Ok(Some(if answer.is_empty() {
        default.unwrap_or_default().to_owned()
    } else {
        answer.to_owned()
    }))
}

/// Step 1: asks for the reseller name and picture. Returns `false` at end
/// of input.
fn reseller_step<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
    defaults: &Defaults,
) -> Result<bool> {
    writeln!(out, "{}", "Step 1: reseller".bold())?;
    let current_name = Some(wizard.catalog().reseller_name())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .or_else(|| defaults.name.clone());
    let Some(name) = prompt(input, out, "Reseller name", current_name.as_deref())? else {
        return Ok(false);
    };
    wizard.set_reseller_name(name);

    let current_pfp = Some(wizard.catalog().profile_picture_url())
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .or_else(|| defaults.pfp.clone());
    let Some(pfp) = prompt(input, out, "Profile picture URL", current_pfp.as_deref())? else {
        return Ok(false);
    };
    wizard.set_profile_picture_url(pfp);

    match wizard.advance() {
        Ok(_step) => {
            writeln!(out, "{}", "Step 2: products (type 'help' for commands)".bold())?;
        }
        Err(err) => print_error(out, &err)?,
    }
    Ok(true)
}

/// Step 2: runs one command. Returns `false` at end of input or on `quit`.
fn products_step<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    write!(out, "products> ")?;
    out.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(false);
    };
    match products_command(wizard, input, out, &line) {
        Ok(more) => Ok(more),
        Err(CatalogError::Io(err)) => Err(CatalogError::Io(err)),
        Err(err) => {
            print_error(out, &err)?;
            Ok(true)
        }
    }
}

/// Executes a step 2 command line.
fn products_command<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
    line: &str,
) -> Result<bool> {
    let trimmed = line.trim();
    let (command, rest) = trimmed
        .split_once(' ')
        .map_or((trimmed, ""), |(head, tail)| (head, tail.trim()));
    match command {
        "" => {}
        "help" => print_wizard_help(out)?,
        "list" => {
            let names: Vec<&str> = PRODUCT_PRESETS.iter().map(|preset| preset.name).collect();
            writeln!(out, "{} {}", "Products:".bold(), names.join(", "))?;
            writeln!(out, "{} {}", "Payment methods:".bold(), payment_list())?;
        }
        "add" => {
            let spec = split_product_spec(rest, ' ')?;
            let _: ProductId = add_product(wizard, spec)?;
            writeln!(out, "{} product added", "ok:".green())?;
        }
        "edit" => {
            let id = product_id(wizard.catalog(), rest)?;
            return edit_payments(wizard, input, out, id);
        }
        "duration" => {
            let id = product_id(wizard.catalog(), rest)?;
            return add_duration(wizard, input, out, id);
        }
        "remove" => {
            let id = product_id(wizard.catalog(), rest)?;
            let removed = wizard.remove_product(id)?;
            writeln!(out, "{} removed {}", "ok:".green(), removed.name)?;
        }
        "remove-duration" => {
            let (name, key) = rest.split_once(' ').unwrap_or((rest, ""));
            remove_duration(wizard, name, key.trim())?;
            writeln!(out, "{} duration removed", "ok:".green())?;
        }
        "json" => writeln!(out, "{}", wizard.json())?,
        "done" => {
            let _step = wizard.advance()?;
        }
        "back" => {
            let _step = wizard.back();
        }
        "reset" => {
            wizard.reset();
            writeln!(out, "{} all fields cleared", "ok:".green())?;
        }
        "quit" => return Ok(false),
        other => writeln!(out, "unknown command '{other}', type 'help'")?,
    }
    Ok(true)
}

/// Step 3: shows the JSON and waits for `back`, `reset` or `quit`.
/// Returns `false` at end of input or on `quit`.
fn review_step<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    writeln!(out, "{}", "Generated JSON".green().bold())?;
    writeln!(out, "{}", wizard.json())?;
    loop {
        write!(out, "review (back, reset, quit)> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match line.trim() {
            "" => {}
            "back" => {
                let _step = wizard.back();
                return Ok(true);
            }
            "reset" => {
                wizard.reset();
                writeln!(out, "{} all fields cleared", "ok:".green())?;
                return Ok(true);
            }
            "quit" => return Ok(false),
            other => writeln!(out, "unknown command '{other}', type back, reset or quit")?,
        }
    }
}

/// Replaces the draft with `spec` and commits it.
fn add_product(wizard: &mut Wizard, spec: ProductSpec) -> Result<ProductId> {
    let _preset = wizard.select_product(&spec.name)?;
    for method in wizard.draft().payments.clone() {
        let _selected = wizard.toggle_payment(method);
    }
    for method in spec.payments {
        if !wizard.draft().payments.contains(&method) {
            let _selected = wizard.toggle_payment(method);
        }
    }
    wizard.add_product()
}

/// Prompts for a duration, price and URL and adds them to a product.
fn add_duration<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
    product: ProductId,
) -> Result<bool> {
    let Some(duration) = prompt(input, out, "Duration (e.g. 7 days, 1 month, lifetime, 30)", None)?
    else {
        return Ok(false);
    };
    let Some(price) = prompt(input, out, "Price", None)? else {
        return Ok(false);
    };
    let Some(url) = prompt(input, out, "Product URL", None)? else {
        return Ok(false);
    };
    let id = wizard.add_duration(product, &duration, &price, &url)?;
    let label = wizard
        .catalog()
        .product(product)
        .and_then(|entry| entry.duration(id))
        .map(|entry| entry.key.label())
        .unwrap_or_default();
    writeln!(out, "{} added {label}", "ok:".green())?;
    Ok(true)
}

/// Removes the first duration of `name` whose key is `key`.
fn remove_duration(wizard: &mut Wizard, name: &str, key: &str) -> Result<()> {
    let product = product_id(wizard.catalog(), name)?;
    let wanted = parse_duration(key).ok_or_else(|| CatalogError::InvalidDuration {
        input: key.to_owned(),
    })?;
    let found = wizard
        .catalog()
        .product(product)
        .and_then(|entry| entry.duration_by_key(&wanted))
        .map(|entry| entry.id);
    let Some(duration) = found else {
        return Err(CatalogError::DurationKeyNotFound {
            product: name.to_lowercase(),
            key: wanted,
        });
    };
    let _removed = wizard.remove_duration(product, duration)?;
    Ok(())
}

/// Runs a payment edit session: each line toggles a method, a blank line
/// saves, `cancel` discards.
fn edit_payments<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
    product: ProductId,
) -> Result<bool> {
    wizard.begin_payment_edit(product)?;
    loop {
        let current = wizard
            .payment_edit()
            .map(|edit| {
                edit.payments
                    .iter()
                    .map(|method| method.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        writeln!(out, "{} [{current}]", "Payments:".bold())?;
        write!(out, "toggle (blank saves, 'cancel' discards): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            let _cancelled = wizard.cancel_payment_edit();
            return Ok(false);
        };
        match line.trim() {
            "" => {
                let _saved = wizard.save_payment_edit()?;
                writeln!(out, "{} payments updated", "ok:".green())?;
                return Ok(true);
            }
            "cancel" => {
                let _cancelled = wizard.cancel_payment_edit();
                writeln!(out, "{} edit discarded", "ok:".green())?;
                return Ok(true);
            }
            token => match token.parse::<PaymentMethod>() {
                Ok(method) => {
                    let _selected = wizard.toggle_edit_payment(method)?;
                }
                Err(err) => print_error(out, &err)?,
            },
        }
    }
}

/// Prints the step 2 command reference.
fn print_wizard_help<W: Write>(out: &mut W) -> io::Result<()> {
    let commands: &[(&str, &str)] = &[
        ("list", "show products and payment methods"),
        ("add NAME PAY[,PAY...]", "add a product, e.g. 'add Wave crypto,paypal'"),
        ("edit NAME", "toggle a product's payment methods"),
        ("duration NAME", "add a priced duration to a product"),
        ("remove NAME", "remove a product"),
        ("remove-duration NAME KEY", "remove a duration, e.g. 'remove-duration wave 7'"),
        ("json", "print the current JSON"),
        ("done", "review the JSON"),
        ("back", "return to step 1"),
        ("reset", "clear everything"),
        ("quit", "stop without reviewing"),
    ];
    for &(usage, description) in commands {
        writeln!(out, "  {:<26} {}", usage.cyan(), description)?;
    }
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed there is
            // nothing left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
