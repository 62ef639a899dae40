//! CLI command implementation

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use seongraph_analyzer::{Language, Pipeline};
use seongraph_lsp::{LspClient, SymbolResolver};

pub fn analyze(
    input: PathBuf,
    output: PathBuf,
    java_server: Option<String>,
    cpp_server: Option<String>,
) -> anyhow::Result<()> {
    if !input.exists() {
        bail!("input path does not exist: {}", input.display());
    }

    // ZIP archives are extracted to a temporary working directory; the guard
    // keeps it alive until serialization is done.
    let (root, _extracted) = if input.is_dir() {
        (input, None)
    } else {
        let dir = tempfile::tempdir().context("failed to create extraction directory")?;
        extract_archive(&input, dir.path())?;
        (dir.path().to_path_buf(), Some(dir))
    };

    let pipeline = Pipeline::with_resolver_factory(Box::new(move |language, repo_root| {
        let override_command = match language {
            Language::Java => java_server.clone(),
            Language::Cpp => cpp_server.clone(),
        };
        let (program, args) = match &override_command {
            Some(command) => {
                let mut parts = command.split_whitespace().map(String::from);
                let program = parts.next().unwrap_or_default();
                (program, parts.collect::<Vec<String>>())
            }
            None => {
                let (program, args) = language.server_command();
                (
                    program.to_string(),
                    args.iter().map(|s| s.to_string()).collect(),
                )
            }
        };
        let client = LspClient::start(&program, &args, repo_root)?;
        Ok(Box::new(client) as Box<dyn SymbolResolver>)
    }));

    let rdf = pipeline.analyze(&root)?;
    std::fs::write(&output, rdf)
        .with_context(|| format!("failed to write output: {}", output.display()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

fn extract_archive(archive_path: &Path, target: &Path) -> anyhow::Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("failed to open archive: {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("input is not a valid ZIP archive")?;
    archive
        .extract(target)
        .context("failed to extract archive")?;
    tracing::info!("extracted {} entries to {}", archive.len(), target.display());
    Ok(())
}
