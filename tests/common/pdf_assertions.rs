use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use std::collections::{BTreeMap, HashMap, HashSet};

fn string_bytes(object: &Object) -> Vec<Vec<u8>> {
    match object {
        Object::String(bytes, _) => vec![bytes.clone()],
        Object::Array(items) => vec![items.iter().flat_map(string_bytes).flatten().collect()],
        _ => Vec::new(),
    }
}

type UnicodeMap = HashMap<u32, String>;

fn hex_token(token: &str) -> Option<u32> {
    u32::from_str_radix(token.trim().trim_start_matches('<').trim_end_matches('>'), 16).ok()
}

fn hex_text(token: &str) -> Option<String> {
    let hex = token.trim().trim_start_matches('<').trim_end_matches('>');
    let units: Vec<u16> = hex
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).ok().and_then(|c| u16::from_str_radix(c, 16).ok()))
        .collect::<Option<_>>()?;
    String::from_utf16(&units).ok()
}

/// Parses the `bfchar` and `bfrange` sections of a ToUnicode CMap.
fn parse_to_unicode(cmap: &str) -> UnicodeMap {
    let mut map = UnicodeMap::new();
    let mut section = "";
    for line in cmap.lines().map(str::trim) {
        if line.ends_with("beginbfchar") {
            section = "bfchar";
            continue;
        }
        if line.ends_with("beginbfrange") {
            section = "bfrange";
            continue;
        }
        if line.starts_with("endbf") {
            section = "";
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match (section, tokens.as_slice()) {
            ("bfchar", [code, text]) => {
                if let (Some(code), Some(text)) = (hex_token(code), hex_text(text)) {
                    map.insert(code, text);
                }
            }
            ("bfrange", [low, high, start]) if start.starts_with('<') => {
                if let (Some(low), Some(high), Some(start)) = (hex_token(low), hex_token(high), hex_token(start)) {
                    for (offset, code) in (low..=high).enumerate() {
                        if let Some(ch) = char::from_u32(start + offset as u32) {
                            map.insert(code, ch.to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }
    map
}

fn to_unicode_maps(doc: &LopdfDocument, fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>) -> HashMap<Vec<u8>, UnicodeMap> {
    let mut maps = HashMap::new();
    for (name, font) in fonts {
        let stream = match font.get(b"ToUnicode") {
            Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_stream).ok(),
            Ok(Object::Stream(stream)) => Some(stream),
            _ => None,
        };
        if let Some(stream) = stream {
            let data = stream.decompressed_content().unwrap_or_else(|_| stream.content.clone());
            maps.insert(name.clone(), parse_to_unicode(&String::from_utf8_lossy(&data)));
        }
    }
    maps
}

/// Text of every `Tj`/`TJ` on every page. Strings in a font with a
/// ToUnicode CMap are two-byte glyph ids decoded through it. Everything
/// else is the single-byte text the Latin adapter writes.
pub fn decoded_strings(doc: &LopdfDocument) -> Vec<String> {
    let mut out = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
        let maps = to_unicode_maps(doc, &fonts);
        let Ok(raw) = doc.get_page_content(page_id) else { continue };
        let Ok(content) = Content::decode(&raw) else { continue };
        let mut current: Option<&UnicodeMap> = None;
        for op in content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    current = op.operands.first().and_then(|o| o.as_name().ok()).and_then(|name| maps.get(name));
                }
                "Tj" | "TJ" => {
                    for bytes in op.operands.iter().flat_map(string_bytes) {
                        let text = match current {
                            Some(map) => bytes
                                .chunks(2)
                                .map(|pair| {
                                    let code = pair.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
                                    map.get(&code).cloned().unwrap_or_default()
                                })
                                .collect(),
                            None => bytes.iter().map(|&b| b as char).collect(),
                        };
                        out.push(text);
                    }
                }
                _ => {}
            }
        }
    }
    out
}

/// BaseFont names referenced from page resources.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = HashSet::new();
    for (_, page_id) in doc.get_pages() {
        for (_, font) in doc.get_page_fonts(page_id).unwrap_or_default() {
            if let Ok(name) = font.get(b"BaseFont").and_then(Object::as_name) {
                fonts.insert(String::from_utf8_lossy(name).to_string());
            }
        }
    }
    fonts.into_iter().collect()
}

/// True when any font dictionary has an embedded font program.
pub fn has_embedded_font(doc: &LopdfDocument) -> bool {
    doc.objects.values().filter_map(|o| o.as_dict().ok()).any(|dict| {
        dict.has(b"FontFile") || dict.has(b"FontFile2") || dict.has(b"FontFile3")
    })
}

/// URIs of link annotations on every page.
pub fn link_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else { continue };
        let annots = match page.get(b"Annots") {
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_array).cloned().unwrap_or_default(),
            _ => continue,
        };
        for annot in annots {
            let dict = match &annot {
                Object::Reference(id) => doc.get_dictionary(*id).ok(),
                Object::Dictionary(d) => Some(d),
                _ => None,
            };
            if let Some(action) = dict.and_then(|d| d.get(b"A").ok())
                && let Some(action) = match action {
                    Object::Reference(id) => doc.get_dictionary(*id).ok(),
                    Object::Dictionary(d) => Some(d),
                    _ => None,
                }
                && let Ok(Object::String(uri, _)) = action.get(b"URI")
            {
                uris.push(String::from_utf8_lossy(uri).to_string());
            }
        }
    }
    uris
}
