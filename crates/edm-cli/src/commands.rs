use std::fs;
use std::path::Path as FilePath;

use anyhow::Context;
use colored::Colorize;
use edm_index::{DocumentIndex, ElementIndex};
use edm_types::{Document, Key, Path, Record};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Ids(args) => cmd_ids(args, config),
        Command::Types(args) => cmd_types(args, config),
        Command::Get(args) => cmd_get(args, config),
        Command::Find(args) => cmd_find(args, config),
        Command::Locate(args) => cmd_locate(args, config),
        Command::Remove(args) => cmd_remove(args, config),
        Command::Move(args) => cmd_move(args, config),
    }
}

fn load(file: &FilePath) -> anyhow::Result<Document> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let doc = Document::from_json_str(&text).with_context(|| format!("loading {}", file.display()))?;
    debug!(file = %file.display(), "loaded document");
    Ok(doc)
}

fn save(doc: &Document, output: Option<&FilePath>) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&doc.to_json())?;
    match output {
        Some(file) => {
            fs::write(file, text + "\n").with_context(|| format!("writing {}", file.display()))?;
            info!(file = %file.display(), "wrote document");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn label(record: &Record) -> String {
    match (record.type_name(), record.id()) {
        (Some(t), Some(id)) => format!("{} {}", t.cyan(), id.yellow()),
        (Some(t), None) => t.cyan().to_string(),
        (None, Some(id)) => id.yellow().to_string(),
        (None, None) => "(untyped)".dimmed().to_string(),
    }
}

fn cmd_ids(args: DocumentArgs, config: &CliConfig) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let index = ElementIndex::new(&doc, config.namespace.as_str());
    match config.format {
        OutputFormat::Json => print_json(&json!(index.ids().collect::<Vec<_>>())),
        OutputFormat::Text => {
            for id in index.ids() {
                println!("{id}");
            }
            for id in index.duplicate_ids() {
                eprintln!("{} '@id' {} occurs more than once", "warning:".yellow().bold(), id.bold());
            }
            Ok(())
        }
    }
}

fn cmd_types(args: TypesArgs, config: &CliConfig) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let index = ElementIndex::new(&doc, config.namespace.as_str());
    let names: Vec<&str> = if args.bare {
        index.types_without_namespace().collect()
    } else {
        index.types().collect()
    };
    let counts: Vec<(&str, usize)> = names
        .into_iter()
        .zip(index.types())
        .map(|(name, qualified)| (name, index.by_type(qualified).len()))
        .collect();
    match config.format {
        OutputFormat::Json => print_json(&json!(counts
            .iter()
            .map(|(name, count)| json!({ "type": name, "count": count }))
            .collect::<Vec<_>>())),
        OutputFormat::Text => {
            for (name, count) in counts {
                println!("{:>6}  {}", count.to_string().bold(), name.cyan());
            }
            Ok(())
        }
    }
}

fn cmd_get(args: GetArgs, config: &CliConfig) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let index = ElementIndex::new(&doc, config.namespace.as_str());
    let found = if args.strict || config.strict {
        Some(index.by_id_strict(&args.id)?)
    } else {
        index.by_id(&args.id)
    };
    println!("{}", get_output(found.copied(), &args.id, config.format)?);
    Ok(())
}

/// Rendering of a `get` result. A miss prints `null` in JSON mode.
fn get_output(found: Option<&Record>, id: &str, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match (format, found) {
        (OutputFormat::Json, Some(record)) => serde_json::to_string_pretty(&record.to_json())?,
        (OutputFormat::Json, None) => serde_json::Value::Null.to_string(),
        (OutputFormat::Text, Some(record)) => {
            format!("{}\n{}", label(record), serde_json::to_string_pretty(&record.to_json())?)
        }
        (OutputFormat::Text, None) => format!("{} no element with '@id' {}", "✗".red(), id.yellow()),
    })
}

fn count_output(type_name: &str, count: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({ "type": type_name, "count": count }).to_string(),
        OutputFormat::Text => count.to_string(),
    }
}

fn cmd_find(args: FindArgs, config: &CliConfig) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let index = ElementIndex::new(&doc, config.namespace.as_str());
    let nodes = if args.strict || config.strict {
        index.by_type_strict(&args.type_name)?
    } else {
        index.by_type(&args.type_name)
    };
    if args.count {
        println!("{}", count_output(&args.type_name, nodes.len(), config.format));
        return Ok(());
    }
    match config.format {
        OutputFormat::Json => print_json(&json!(nodes.map(|r| r.to_json()).collect::<Vec<_>>())),
        OutputFormat::Text => {
            let mut shown = 0usize;
            for record in nodes {
                println!("  {}", label(record));
                shown += 1;
            }
            if shown == 0 {
                println!("No elements of type {}.", args.type_name.cyan());
            }
            Ok(())
        }
    }
}

fn cmd_locate(args: LocateArgs, config: &CliConfig) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let index = DocumentIndex::new(&doc, config.namespace.as_str());
    let node = index.by_id_strict(&args.id)?;
    let key = match node.key() {
        Some(Key::Field(name)) => json!(name),
        Some(Key::Index(i)) => json!(i),
        None => serde_json::Value::Null,
    };
    let container = node.container().map_or("none", |c| c.kind());
    match config.format {
        OutputFormat::Json => print_json(&json!({
            "id": args.id,
            "type": node.value().type_name(),
            "path": node.path().to_string(),
            "container": container,
            "key": key,
        })),
        OutputFormat::Text => {
            println!("{}", label(node.value()));
            println!("  Path:      {}", node.path().to_string().bold());
            println!("  Container: {container}");
            println!("  Key:       {key}");
            if let Some(parent) = node.parent_record() {
                println!("  Parent:    {}", label(parent));
            }
            Ok(())
        }
    }
}

/// Path of the element with `id`. The index is dropped before returning so
/// the caller can edit the document.
fn path_of(doc: &Document, id: &str, config: &CliConfig) -> anyhow::Result<Path> {
    let index = DocumentIndex::new(doc, config.namespace.as_str());
    Ok(index.by_id_strict(id)?.path().clone())
}

fn cmd_remove(args: RemoveArgs, config: &CliConfig) -> anyhow::Result<()> {
    let mut doc = load(&args.file)?;
    let path = path_of(&doc, &args.id, config)?;
    doc.remove(&path)
        .with_context(|| format!("removing {} at {path}", args.id))?;
    info!(id = %args.id, path = %path, "removed element");
    save(&doc, args.output.as_deref())?;
    eprintln!("{} Removed {} from {}", "✓".green().bold(), args.id.yellow(), path.to_string().bold());
    Ok(())
}

fn cmd_move(args: MoveArgs, config: &CliConfig) -> anyhow::Result<()> {
    let mut doc = load(&args.file)?;
    let from = path_of(&doc, &args.id, config)?;
    doc.relocate(&from, &args.to)
        .with_context(|| format!("moving {} from {from} to {}", args.id, args.to))?;
    info!(id = %args.id, from = %from, to = %args.to, "moved element");
    save(&doc, args.output.as_deref())?;
    eprintln!(
        "{} Moved {} {} → {}",
        "✓".green().bold(),
        args.id.yellow(),
        from.to_string().dimmed(),
        args.to.to_string().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use edm_index::IndexError;
    use edm_types::Value;
    use std::path::PathBuf;

    const REPORT: &str = r#"{
        "@type": "CVR.CastVoteRecordReport",
        "GpUnit": [
            { "@id": "downtown-precinct", "@type": "CVR.GpUnit", "Name": "Downtown" },
            { "@id": "port-precinct", "@type": "CVR.GpUnit", "Name": "Port" }
        ],
        "Party": [
            { "@id": "party-hadron", "@type": "CVR.Party" },
            { "@id": "party-lepton", "@type": "CVR.Party" }
        ],
        "Version": "1.0.0"
    }"#;

    fn setup() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.json");
        fs::write(&file, REPORT).unwrap();
        (dir, file)
    }

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let config = CliConfig::default().with_overrides(&cli);
        run_command(cli, &config)
    }

    #[test]
    fn queries_succeed() {
        let (_dir, file) = setup();
        let file = file.to_str().unwrap();
        run(&["edm", "ids", file]).unwrap();
        run(&["edm", "types", "--bare", file]).unwrap();
        run(&["edm", "--format", "json", "get", file, "port-precinct"]).unwrap();
        run(&["edm", "find", file, "GpUnit"]).unwrap();
        run(&["edm", "locate", file, "party-lepton"]).unwrap();
    }

    #[test]
    fn non_strict_miss_is_not_an_error() {
        let (_dir, file) = setup();
        let file = file.to_str().unwrap();
        run(&["edm", "get", file, "uptown-precinct"]).unwrap();
        run(&["edm", "find", file, "NotARealType"]).unwrap();
    }

    #[test]
    fn json_miss_renders_null() {
        let rendered = get_output(None, "uptown-precinct", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.is_null());

        let text = get_output(None, "uptown-precinct", OutputFormat::Text).unwrap();
        assert!(text.contains("uptown-precinct"));
    }

    #[test]
    fn json_hit_renders_record() {
        let doc = Document::from_json_str(REPORT).unwrap();
        let index = ElementIndex::new(&doc, "CVR");
        let rendered = get_output(index.by_id("port-precinct").copied(), "port-precinct", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["@id"], "port-precinct");
        assert_eq!(parsed["Name"], "Port");
    }

    #[test]
    fn count_follows_format() {
        let doc = Document::from_json_str(REPORT).unwrap();
        let index = ElementIndex::new(&doc, "CVR");
        let count = index.by_type("GpUnit").len();

        let parsed: serde_json::Value =
            serde_json::from_str(&count_output("GpUnit", count, OutputFormat::Json)).unwrap();
        assert_eq!(parsed, json!({ "type": "GpUnit", "count": 2 }));
        assert_eq!(count_output("GpUnit", count, OutputFormat::Text), "2");

        let (_dir, file) = setup();
        run(&["edm", "--format", "json", "find", file.to_str().unwrap(), "GpUnit", "--count"]).unwrap();
        run(&["edm", "--format", "json", "get", file.to_str().unwrap(), "uptown-precinct"]).unwrap();
    }

    #[test]
    fn strict_miss_is_an_error() {
        let (_dir, file) = setup();
        let file = file.to_str().unwrap();
        let err = run(&["edm", "get", file, "uptown-precinct", "--strict"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<IndexError>(),
            Some(&IndexError::IdNotFound("uptown-precinct".into()))
        );
        let err = run(&["edm", "find", file, "NotARealType", "--strict"]).unwrap_err();
        assert_eq!(err.to_string(), "no items in index with '@type': CVR.NotARealType");
    }

    #[test]
    fn strict_from_config() {
        let (_dir, file) = setup();
        let cli = Cli::try_parse_from(["edm", "get", file.to_str().unwrap(), "uptown-precinct"]).unwrap();
        let config = CliConfig { strict: true, ..CliConfig::default() };
        assert!(run_command(cli, &config).is_err());
    }

    #[test]
    fn remove_writes_edited_document() {
        let (dir, file) = setup();
        let out = dir.path().join("out.json");
        run(&["edm", "remove", file.to_str().unwrap(), "downtown-precinct", "-o", out.to_str().unwrap()])
            .unwrap();

        let doc = load(&out).unwrap();
        let index = ElementIndex::new(&doc, "CVR");
        assert!(index.by_id("downtown-precinct").is_none());
        assert_eq!(index.by_type("GpUnit").len(), 1);
        assert_eq!(doc.root().get("version").and_then(Value::as_str), Some("1.0.0"));
    }

    #[test]
    fn move_reorders_sequence() {
        let (dir, file) = setup();
        let out = dir.path().join("out.json");
        run(&["edm", "move", file.to_str().unwrap(), "party-lepton", "/party/0", "-o", out.to_str().unwrap()])
            .unwrap();

        let doc = load(&out).unwrap();
        let index = ElementIndex::new(&doc, "CVR");
        let order: Vec<&str> = index.by_type("Party").filter_map(|r| r.id()).collect();
        assert_eq!(order, vec!["party-lepton", "party-hadron"]);
    }

    #[test]
    fn failed_move_leaves_file_untouched() {
        let (dir, file) = setup();
        let out = dir.path().join("out.json");
        let result = run(&["edm", "move", file.to_str().unwrap(), "party-lepton", "/version/0", "-o", out.to_str().unwrap()]);
        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn missing_file_names_it() {
        let err = run(&["edm", "ids", "/nonexistent/report.json"]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.json"));
    }
}
