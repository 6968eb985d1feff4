//! Selection and preview flow

use crate::renderer::ConsoleRenderer;
use crate::Args;
use anyhow::{Context, Result};
use std::sync::Arc;
use widget_core::{files_info_listing, PreviewController, WidgetConfig};
use widget_fs::{FileSource, LocalFile};

/// Run one selection through the widget and preview it
pub async fn run(args: Args, mut config: WidgetConfig) -> Result<()> {
    if args.multiple {
        config.props.multiple = true;
    }
    if args.accept.is_some() {
        config.props.options.accept = args.accept.clone();
    }

    let json = args.json;
    let mut controller = PreviewController::from_config(&config)?.with_change_handler(move |change| {
        if json {
            match serde_json::to_string(change) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Cannot serialize value: {}", e),
            }
        }
    });
    tracing::debug!("Picker: {:?}", controller.picker());
    tracing::debug!(
        modal_width = config.preview.modal_width,
        animation = %config.preview.animation,
        show_mask = config.preview.show_mask,
        "Overlay settings"
    );

    if let Some(listing) = files_info_listing(controller.files_info()) {
        eprintln!("Initial value:\n{}", listing);
    }

    let files = pick_files(&controller, &args)?;
    if let Err(e) = controller.on_files_selected(&files).await {
        anyhow::bail!("{}", e.user_message());
    }

    if let Some(listing) = files_info_listing(controller.files_info()) {
        println!("{}", listing);
    }

    if !controller.can_preview() {
        return Ok(());
    }

    controller.open();
    let mut renderer = ConsoleRenderer::default();
    let mut rendered = controller.snapshot();
    controller.render_preview(&mut renderer);

    // Document renderers report their page count right after parsing
    controller.poll_page_counts();

    if let Some(page) = args.page {
        controller.set_page(page);
    }
    if controller.should_render(&rendered) {
        rendered = controller.snapshot();
        renderer.clear();
        controller.render_preview(&mut renderer);
    }

    for line in renderer.lines() {
        println!("{}", line);
    }
    tracing::debug!(
        page = rendered.state().current_page(),
        total = ?rendered.state().total_pages(),
        "Preview rendered"
    );

    controller.close();
    Ok(())
}

/// Stand-in for the native picker: build handles and apply `accept`
fn pick_files(controller: &PreviewController, args: &Args) -> Result<Vec<Arc<dyn FileSource>>> {
    let mut files: Vec<Arc<dyn FileSource>> = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let file = LocalFile::new(path).with_context(|| format!("Invalid file path {:?}", path))?;
        if !controller.accepts(&file) {
            tracing::warn!("{} does not match the accept filter, skipped", file.name());
            continue;
        }
        files.push(Arc::new(file));
    }

    if !controller.picker().multiple && files.len() > 1 {
        tracing::info!("Single-file mode: only the first file is reported");
    }
    Ok(files)
}
