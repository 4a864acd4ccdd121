//! Subcommand implementations. Each returns the text to print on stdout.

use std::{path::Path, sync::Arc};

use slider_config::{FormValues, build_config};
use slider_designer::StructureBuilder;
use slider_dom::{DesignerHost, MemoryDocument};
use slider_hydrate::{Hydrator, RecordingBehavior};
use tracing::info;

use crate::{cli::PreviewArgs, error::Result};

/// Configuration JSON for the form at `path`.
pub fn config(path: &Path) -> Result<String> {
    let form = FormValues::load(path)?;
    Ok(build_config(&form)?.to_json()?)
}

/// The default form as RON.
pub fn defaults() -> Result<String> {
    Ok(FormValues::defaults().to_ron()?)
}

/// Build the structure for a form into a fresh document and render it.
pub async fn preview(args: &PreviewArgs) -> Result<String> {
    let form = FormValues::load(&args.form.form)?;
    preview_form(&form, args.suffix, args.hydrate).await
}

/// Preview an already loaded form.
pub async fn preview_form(form: &FormValues, suffix: Option<u32>, hydrate: bool) -> Result<String> {
    let config = build_config(form)?;
    let doc = MemoryDocument::new();
    let mut builder = StructureBuilder::new(Arc::new(doc.clone()) as Arc<dyn DesignerHost>);
    if let Some(n) = suffix {
        builder = builder.with_suffix(n);
    }
    let created = builder.create(&config, None).await?;
    info!(wrapper = %created.wrapper_class, "preview built");

    let mut out = doc.to_html(created.wrapper);
    if !hydrate {
        return Ok(out);
    }

    let behavior = Arc::new(RecordingBehavior::new());
    let hydrator = Hydrator::new(Arc::new(doc), behavior.clone());
    let report = hydrator.scan();
    out.push_str(&format!(
        "\nscan: visited={} attached={} missing_config={} failed={}\n",
        report.visited,
        report.attached.len(),
        report.missing_config,
        report.failed.len()
    ));
    for err in &report.failed {
        out.push_str(&format!("  skipped: {err}\n"));
    }
    for (container, options) in behavior.attached() {
        let rendered = serde_json::to_string_pretty(&options.to_value())?;
        out.push_str(&format!("{container}: {rendered}\n"));
    }
    Ok(out)
}
