use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Pulls the plain text out of `word/document.xml`.
///
/// Paragraphs are separated by a blank line, `w:tab` becomes `\t` and
/// `w:br`/`w:cr` become `\n`. Images contribute nothing; table cells contribute
/// their paragraphs like any other body text.
pub(crate) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| ExtractError::extraction("docx", err))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|err| ExtractError::extraction("docx", format!("{DOCUMENT_PART}: {err}")))?
        .read_to_string(&mut xml)
        .map_err(|err| ExtractError::extraction("docx", err))?;

    let mut reader = XmlReader::from_str(&xml);
    let mut buf = Vec::new();
    let mut output = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => push_paragraph_break(&mut output),
                b"w:tab" => output.push('\t'),
                b"w:br" | b"w:cr" => output.push('\n'),
                b"w:t" => in_text_node = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => push_paragraph_break(&mut output),
                b"w:tab" => output.push('\t'),
                b"w:br" | b"w:cr" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_node => {
                let value = e
                    .unescape()
                    .map_err(|err| ExtractError::extraction("docx", err))?;
                output.push_str(&value);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_text_node = false,
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractError::extraction("docx", err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(output.trim().to_string())
}

fn push_paragraph_break(output: &mut String) {
    if !output.is_empty() {
        output.push_str("\n\n");
    }
}
