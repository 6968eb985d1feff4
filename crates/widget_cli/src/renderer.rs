//! Console preview collaborators

use image::ImageReader;
use lopdf::Document;
use std::io::Cursor;
use widget_core::{decode_payload, EncodedFile, FileMetadata, PageCountReporter, PreviewRenderer};

/// Describes each preview as a line of text
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    lines: Vec<String>,
}

impl ConsoleRenderer {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl PreviewRenderer for ConsoleRenderer {
    fn show_image(&mut self, file: &EncodedFile, info: &FileMetadata) {
        let line = match image_dimensions(file) {
            Ok((width, height)) => format!("[image] {} {}x{}", info.name, width, height),
            Err(e) => {
                tracing::warn!("Cannot decode image {}: {}", info.name, e);
                format!("[image] {} (unreadable)", info.name)
            }
        };
        self.lines.push(line);
    }

    fn show_document(
        &mut self,
        file: &EncodedFile,
        info: &FileMetadata,
        page: u32,
        page_count: PageCountReporter,
    ) {
        match document_pages(file) {
            Ok(total) => {
                self.lines.push(format!(
                    "[document] {} page {} of {}",
                    info.name,
                    page.min(total.max(1)),
                    total
                ));
                page_count.report(total);
            }
            Err(e) => {
                // The page count stays unknown
                tracing::warn!("Cannot parse document {}: {}", info.name, e);
                self.lines
                    .push(format!("[document] {} page {} (unreadable)", info.name, page));
            }
        }
    }
}

/// Get image dimensions without fully decoding
fn image_dimensions(file: &EncodedFile) -> anyhow::Result<(u32, u32)> {
    let decoded = decode_payload(file.as_str())?;
    let reader = ImageReader::new(Cursor::new(decoded.bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// Number of pages in the page tree
fn document_pages(file: &EncodedFile) -> anyhow::Result<u32> {
    let decoded = decode_payload(file.as_str())?;
    let doc = Document::load_mem(&decoded.bytes)?;
    Ok(doc.get_pages().len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use lopdf::{dictionary, Object};
    use std::sync::Arc;
    use widget_core::{
        encode_bytes, DecodePolicy, FileSource, MemoryFile, PreviewController, WidgetProps,
    };

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                })
                .into()
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_document_pages() {
        let file = encode_bytes("three.pdf", "application/pdf", &pdf(3));
        assert_eq!(document_pages(&file).unwrap(), 3);

        let file = encode_bytes("broken.pdf", "application/pdf", b"not a pdf");
        assert!(document_pages(&file).is_err());
    }

    #[test]
    fn test_image_dimensions() {
        let file = encode_bytes("dot.png", "image/png", &png(3, 2));
        assert_eq!(image_dimensions(&file).unwrap(), (3, 2));
    }

    #[tokio::test]
    async fn test_document_reports_count_to_controller() {
        let props = WidgetProps {
            multiple: true,
            ..WidgetProps::default()
        };
        let mut controller = PreviewController::new(props, None, DecodePolicy::Strict).unwrap();
        let files: Vec<Arc<dyn FileSource>> = vec![
            Arc::new(MemoryFile::from_name("two.pdf", pdf(2))),
            Arc::new(MemoryFile::from_name("dot.png", png(4, 4))),
        ];
        controller.on_files_selected(&files).await.unwrap();

        controller.open();
        controller.set_page(5);
        let mut renderer = ConsoleRenderer::default();
        controller.render_preview(&mut renderer);
        assert!(controller.poll_page_counts());

        assert_eq!(controller.state().total_pages(), Some(2));
        assert_eq!(controller.state().current_page(), 2);
        assert_eq!(
            renderer.lines(),
            ["[document] two.pdf page 2 of 2", "[image] dot.png 4x4"]
        );
    }

    #[tokio::test]
    async fn test_unreadable_document_leaves_count_unknown() {
        let mut controller =
            PreviewController::new(WidgetProps::default(), None, DecodePolicy::Strict).unwrap();
        let files: Vec<Arc<dyn FileSource>> = vec![Arc::new(MemoryFile::from_name(
            "broken.pdf",
            b"%PDF-1.4 << /Type\n/Page >>".to_vec(),
        ))];
        controller.on_files_selected(&files).await.unwrap();

        controller.open();
        let mut renderer = ConsoleRenderer::default();
        controller.render_preview(&mut renderer);

        assert!(!controller.poll_page_counts());
        assert_eq!(controller.state().total_pages(), None);
        assert_eq!(renderer.lines(), ["[document] broken.pdf page 1 (unreadable)"]);
    }
}
