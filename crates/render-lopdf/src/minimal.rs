use crate::sanitize::sanitize_latin;

/// A one-page A4 PDF listing `lines` in Helvetica.
///
/// Serialized by hand with no fallible step, so it is the document of last
/// resort when every adapter has failed.
pub fn minimal_error_pdf<S: AsRef<str>>(lines: &[S]) -> Vec<u8> {
    let mut content = String::from("BT\n/F1 12 Tf\n16 TL\n50 790 Td\n");
    for line in lines {
        content.push('(');
        for ch in sanitize_latin(line.as_ref()).chars() {
            if matches!(ch, '(' | ')' | '\\') {
                content.push('\\');
            }
            content.push(ch);
        }
        content.push_str(") Tj T*\n");
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595.28 841.89] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_pdf_parses_and_carries_lines() {
        let bytes = minimal_error_pdf(&["SALARY NOTIFICATION", "Employee: (unknown) موظف", "Net Salary: 6300 SAR"]);
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("(Net Salary: 6300 SAR) Tj"));
        assert!(text.contains("Employee: \\(unknown\\)"));
        assert!(text.is_ascii());

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_line_list_is_still_a_pdf() {
        let bytes = minimal_error_pdf::<&str>(&[]);
        assert!(lopdf::Document::load_mem(&bytes).is_ok());
    }
}
