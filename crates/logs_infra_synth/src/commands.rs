use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use logs_infra_core::synth::{descriptor_fingerprint, render_template, template_file_name};
use logs_infra_core::{build_descriptor_set, DescriptorSet, StackConfig};
use tracing::info;

/// Builds the set and returns its pretty-printed template.
pub fn synthesize(config: &StackConfig) -> Result<(DescriptorSet, String)> {
    let set = build_descriptor_set(config)?;
    let template = render_template(&set);
    let body = serde_json::to_string_pretty(&template).context("failed to encode template")?;
    Ok((set, body))
}

/// Writes `<stack-id>.template.json` under `output_dir` and returns its path.
pub fn write_template(output_dir: &Path, stack_id: &str, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create '{}'", output_dir.display()))?;
    let path = output_dir.join(template_file_name(stack_id));
    fs::write(&path, format!("{body}\n"))
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

pub fn run_synth(
    config: &StackConfig,
    output_dir: Option<&Path>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let (set, body) = synthesize(config)?;
    let fingerprint = descriptor_fingerprint(&set);

    match output_dir {
        Some(dir) => {
            let path = write_template(dir, &set.stack_id, &body)?;
            info!(
                stack_id = %set.stack_id,
                path = %path.display(),
                %fingerprint,
                "wrote template"
            );
        }
        None => {
            writeln!(stdout, "{body}").context("failed to write template to stdout")?;
        }
    }
    Ok(())
}

pub fn run_validate(config: &StackConfig, stdout: &mut dyn Write) -> Result<()> {
    let set = build_descriptor_set(config)?;
    writeln!(
        stdout,
        "{}: bucket={} database={} table={} fingerprint={}",
        set.stack_id,
        set.container.bucket_name,
        set.database.name,
        set.table.name,
        descriptor_fingerprint(&set)
    )
    .context("failed to write summary")?;
    Ok(())
}
