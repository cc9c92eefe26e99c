//! URI link annotations, added to the saved file with lopdf.

use lopdf::{Object, ObjectId, StringFormat, dictionary};
use nuzum_render_core::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingLink {
    /// Zero-based page index.
    pub page: usize,
    /// `[x1, y1, x2, y2]` in PDF points, bottom-left origin.
    pub rect: [f32; 4],
    pub uri: String,
}

pub(crate) fn add_link_annotations(bytes: Vec<u8>, links: &[PendingLink]) -> Result<Vec<u8>, RenderError> {
    if links.is_empty() {
        return Ok(bytes);
    }
    let mut doc = lopdf::Document::load_mem(&bytes)?;
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for link in links {
        let Some(page_id) = pages.get(link.page).copied() else {
            log::warn!("Dropping link to {}: page {} does not exist", link.uri, link.page + 1);
            continue;
        };
        let annotation = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => link.rect.iter().map(|v| Object::from(*v)).collect::<Vec<_>>(),
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::String(link.uri.as_bytes().to_vec(), StringFormat::Literal),
            },
        };
        let annotation_id = doc.add_object(annotation);

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        let has_annots = matches!(page.get(b"Annots"), Ok(Object::Array(_)));
        if has_annots {
            if let Ok(Object::Array(annots)) = page.get_mut(b"Annots") {
                annots.push(Object::Reference(annotation_id));
            }
        } else {
            page.set("Annots", vec![Object::Reference(annotation_id)]);
        }
    }

    let mut out = Vec::with_capacity(bytes.len() + 256 * links.len());
    doc.save_to(&mut out)?;
    Ok(out)
}
