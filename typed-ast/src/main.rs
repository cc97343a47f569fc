//! Command-line front-end over the typed AST core.
//!
//! Loads compiler output JSON (optionally gzip-compressed), builds the
//! typed tree, runs the sanity checker and renders the result. Each input
//! file gets its own context, so files are processed in parallel.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use solidity_typed_ast::ast::traverse::{children_of_kind, print};
use solidity_typed_ast::{read, AstContext, NodeTag, ReaderConfig};

/// Typed AST tooling for Solidity compiler output
#[derive(Parser)]
#[command(name = "solidity-ast")]
#[command(version)]
#[command(about = "Build and inspect typed ASTs from solc JSON output")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read compiler output and render the typed tree
    Dump {
        /// Compiler output files (.json or .json.gz)
        inputs: Vec<PathBuf>,

        /// Maximum tree depth to render
        #[arg(long)]
        depth: Option<usize>,

        /// Render only subtrees of this node kind (e.g. FunctionDefinition)
        #[arg(long)]
        kind: Option<String>,

        /// Skip the post-read sanity check
        #[arg(long)]
        skip_sanity: bool,
    },

    /// Read compiler output, verify it and report context statistics
    Check {
        /// Compiler output files (.json or .json.gz)
        inputs: Vec<PathBuf>,

        /// Number of threads for parallel checking
        #[arg(long, short = 'j')]
        threads: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SOLIDITY_AST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            inputs,
            depth,
            kind,
            skip_sanity,
        } => {
            let kind = kind
                .map(|k| k.parse::<NodeTag>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            for input in &inputs {
                dump(input, depth, kind, skip_sanity)?;
            }
        }

        Commands::Check { inputs, threads } => {
            if let Some(threads) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("Failed to configure thread pool")?;
            }
            check(&inputs)?;
        }
    }

    Ok(())
}

/// Load one compiler output file into a fresh context.
fn load_units(
    input: &Path,
    cfg: &ReaderConfig,
) -> Result<(AstContext, Vec<solidity_typed_ast::NodeId>)> {
    let text = solidity_typed_ast::reader::load(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let output: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let mut ctx = AstContext::new();
    let units = read(&output, &mut ctx, cfg)
        .with_context(|| format!("Failed to build AST from {}", input.display()))?;
    Ok((ctx, units))
}

fn dump(input: &Path, depth: Option<usize>, kind: Option<NodeTag>, skip_sanity: bool) -> Result<()> {
    info!("Dumping {}", input.display());
    let cfg = ReaderConfig::new().skip_sanity(skip_sanity);
    let (ctx, units) = load_units(input, &cfg)?;

    for unit in units {
        match kind {
            None => print!("{}", print(&ctx, unit, depth)?),
            Some(tag) => {
                for node in children_of_kind(&ctx, unit, tag)? {
                    print!("{}", print(&ctx, node, depth)?);
                }
            }
        }
    }
    Ok(())
}

fn check(inputs: &[PathBuf]) -> Result<()> {
    info!("Checking {} files", inputs.len());

    let results: Vec<Result<(), String>> = inputs
        .par_iter()
        .map(|input| {
            check_file(input).map_err(|e| format!("{}: {:#}", input.display(), e))
        })
        .collect();

    let mut success_count = 0;
    let mut error_count = 0;
    for result in results {
        match result {
            Ok(()) => success_count += 1,
            Err(e) => {
                error!("{}", e);
                error_count += 1;
            }
        }
    }

    info!(
        "Check complete: {} succeeded, {} failed",
        success_count, error_count
    );

    if error_count > 0 {
        anyhow::bail!("{}/{} files failed the check", error_count, inputs.len());
    }
    Ok(())
}

fn check_file(input: &Path) -> Result<()> {
    let (ctx, units) = load_units(input, &ReaderConfig::new())?;

    let mut families: BTreeMap<&'static str, usize> = BTreeMap::new();
    for node in ctx.iter() {
        *families.entry(family(node.tag())).or_default() += 1;
    }
    let families = families
        .iter()
        .map(|(family, count)| format!("{} {}", count, family))
        .collect::<Vec<_>>()
        .join(", ");

    info!(
        "{}: {} unit(s), {} nodes (next id {}): {}",
        input.display(),
        units.len(),
        ctx.len(),
        ctx.peek_next_id(),
        families
    );
    Ok(())
}

fn family(tag: NodeTag) -> &'static str {
    use NodeTag::*;
    match tag {
        SourceUnit | PragmaDirective | ImportDirective | InheritanceSpecifier
        | ModifierInvocation | OverrideSpecifier | ParameterList | UsingForDirective
        | StructuredDocumentation | IdentifierPath => "meta",
        ContractDefinition | FunctionDefinition | ModifierDefinition | EventDefinition
        | ErrorDefinition | StructDefinition | EnumDefinition | EnumValue
        | UserDefinedValueTypeDefinition | VariableDeclaration => "declarations",
        ElementaryTypeName | UserDefinedTypeName | ArrayTypeName | Mapping
        | FunctionTypeName => "type names",
        Block | UncheckedBlock | IfStatement | ForStatement | WhileStatement
        | DoWhileStatement | Return | Break | Continue | Throw | EmitStatement
        | RevertStatement | ExpressionStatement | VariableDeclarationStatement
        | TryStatement | TryCatchClause | InlineAssembly | PlaceholderStatement => "statements",
        Literal | Identifier | MemberAccess | IndexAccess | IndexRangeAccess
        | UnaryOperation | BinaryOperation | Assignment | Conditional | FunctionCall
        | FunctionCallOptions | NewExpression | TupleExpression
        | ElementaryTypeNameExpression => "expressions",
        Extension => "extensions",
    }
}
