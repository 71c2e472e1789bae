//! Command-line client: generate through a running server and manage the
//! local collections of saved outputs.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

use pitchcraft::{
    GenerationRequest, GenerationResult, GeneratorKind,
    config::Config,
    export::ExportDocument,
    pipeline::GeneratorSpec,
    storage::{FileStore, SavedItem, SavedItems},
};

#[derive(Parser, Debug)]
#[command(name = "pitchcraft", version, about = "Sales outreach drafts in two variants")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP generator service
    Serve {
        /// Overrides [server].bind
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Generate two variants through a running server
    Generate {
        kind: GeneratorKind,
        /// Request field as name=value; repeatable
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Server base URL; defaults to the configured bind address
        #[arg(long)]
        server: Option<String>,
        /// Save the chosen variant to the local collection
        #[arg(long, value_enum)]
        save: Option<Variant>,
    },
    /// List the fields a generator accepts
    Fields { kind: GeneratorKind },
    /// Manage saved outputs
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SavedAction {
    /// Numbered listing of a collection
    List { kind: GeneratorKind },
    /// Print one saved item (1-based index)
    Show { kind: GeneratorKind, index: usize },
    /// Delete one saved item (1-based index)
    Delete { kind: GeneratorKind, index: usize },
    /// Write one saved item as Markdown (1-based index)
    Export {
        kind: GeneratorKind,
        index: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    A,
    B,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}

/// Run every command except `serve`
pub async fn run(command: Command, config: &Config) -> Result<()> {
    let repo = SavedItems::new(FileStore::new(config.storage_dir()));

    match command {
        Command::Serve { .. } => bail!("serve is handled by main"),
        Command::Generate {
            kind,
            fields,
            server,
            save,
        } => {
            let mut request = GenerationRequest::new();
            for (name, value) in fields {
                request.insert(name, value);
            }
            let base = server.unwrap_or_else(|| config.server_url());
            let result = request_generation(&base, kind, &request).await?;

            println!("=== Version A ===\n{}\n", result.output_a);
            println!("=== Version B ===\n{}", result.output_b);

            if let Some(variant) = save {
                let output = match variant {
                    Variant::A => result.output_a,
                    Variant::B => result.output_b,
                };
                let spec = GeneratorSpec::for_kind(kind);
                let kept: Vec<&str> = spec.all_fields().collect();
                let item = SavedItem::new(request.retain_only(&kept), output);
                let len = repo.append(kind, item)?;
                println!("\nVersion {:?} saved as #{} in {}", variant, len, kind.collection());
            }
            Ok(())
        }
        Command::Fields { kind } => {
            let spec = GeneratorSpec::for_kind(kind);
            println!("required: {}", spec.required.join(", "));
            println!("optional: {}", spec.optional.join(", "));
            Ok(())
        }
        Command::Saved { action } => run_saved(action, &repo),
    }
}

fn run_saved(action: SavedAction, repo: &SavedItems<FileStore>) -> Result<()> {
    match action {
        SavedAction::List { kind } => {
            let items = repo.load_all(kind)?;
            if items.is_empty() {
                println!("No saved items in {}", kind.collection());
            }
            let spec = GeneratorSpec::for_kind(kind);
            for (i, item) in items.iter().enumerate() {
                let label: Vec<&str> = spec
                    .required
                    .iter()
                    .filter_map(|f| item.field(f))
                    .take(2)
                    .collect();
                println!("{:>3}. {} | {}", i + 1, label.join(" / "), first_line(&item.output));
            }
            Ok(())
        }
        SavedAction::Show { kind, index } => {
            let item = repo
                .get(kind, to_offset(index)?)?
                .ok_or_else(|| anyhow!("no saved item #{} in {}", index, kind.collection()))?;
            for (name, value) in &item.fields {
                println!("{}: {}", name, value);
            }
            println!("\n{}", item.output);
            Ok(())
        }
        SavedAction::Delete { kind, index } => {
            match repo.delete(kind, to_offset(index)?)? {
                Some(_) => println!("Deleted #{} from {}", index, kind.collection()),
                None => println!("No saved item #{} in {}", index, kind.collection()),
            }
            Ok(())
        }
        SavedAction::Export { kind, index, out } => {
            let item = repo
                .get(kind, to_offset(index)?)?
                .ok_or_else(|| anyhow!("no saved item #{} in {}", index, kind.collection()))?;
            let doc = ExportDocument::for_item(kind, &item);
            let path = out.unwrap_or_else(|| PathBuf::from(doc.file_name()));
            std::fs::write(&path, doc.to_markdown())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
            Ok(())
        }
    }
}

async fn request_generation(
    base: &str,
    kind: GeneratorKind,
    request: &GenerationRequest,
) -> Result<GenerationResult> {
    let url = format!("{}/api/{}", base.trim_end_matches('/'), kind.endpoint());
    let res = reqwest::Client::new()
        .post(&url)
        .json(request)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = res.status();
    let body: serde_json::Value = res.json().await.context("Server returned a non-JSON body")?;
    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("unknown error");
        bail!("{} ({})", message, status);
    }
    Ok(serde_json::from_value(body)?)
}

fn to_offset(index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .ok_or_else(|| anyhow!("indexes start at 1"))
}

fn first_line(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut out: String = line.chars().take(60).collect();
    if line.chars().count() > 60 {
        out.push_str("...");
    }
    out
}
