//! Page counting

use courtdoc_core::DocumentFormat;
use log::debug;

/// Counts the pages of a document given its bytes and declared format
pub trait PageCounter {
    /// Page count, or `None` when unknown for this format or unreadable
    fn page_count(&self, data: &[u8], format: DocumentFormat) -> Option<u32>;
}

/// Local page counter for PDFs backed by `lopdf`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LopdfPageCounter;

impl PageCounter for LopdfPageCounter {
    fn page_count(&self, data: &[u8], format: DocumentFormat) -> Option<u32> {
        if format != DocumentFormat::Pdf {
            return None;
        }
        match lopdf::Document::load_mem(data) {
            Ok(document) => u32::try_from(document.get_pages().len()).ok(),
            Err(e) => {
                debug!("Unable to count pages: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object, Stream};

    fn pdf_with_pages(count: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for _ in 0..count {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::try_from(count).unwrap(),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_counts_pdf_pages() {
        let data = pdf_with_pages(3);
        assert_eq!(LopdfPageCounter.page_count(&data, DocumentFormat::Pdf), Some(3));
    }

    #[test]
    fn test_other_formats_unknown() {
        assert_eq!(LopdfPageCounter.page_count(b"text", DocumentFormat::Txt), None);
    }

    #[test]
    fn test_garbage_pdf_unknown() {
        assert_eq!(LopdfPageCounter.page_count(b"not a pdf", DocumentFormat::Pdf), None);
    }
}
