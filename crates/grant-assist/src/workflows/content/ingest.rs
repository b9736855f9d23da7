use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unable to extract text from PDF '{name}': {reason}")]
    Pdf { name: String, reason: String },
}

pub fn is_pdf(file_name: &str) -> bool {
    mime_guess::from_path(file_name)
        .first()
        .map(|mime| mime.essence_str() == "application/pdf")
        .unwrap_or(false)
}

/// Extracts searchable text from an uploaded file.
///
/// Unreadable PDFs yield empty text so one bad upload does not fail the batch.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> String {
    if is_pdf(file_name) {
        match extract_pdf_text(file_name, bytes) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "skipping unreadable PDF");
                String::new()
            }
        }
    } else {
        decode_text(bytes)
    }
}

fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let failure = |reason: String| IngestError::Pdf {
        name: file_name.to_string(),
        reason,
    };

    // pdf-extract panics on some malformed cross-reference tables.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| failure("parser panicked".to_string()))?;
    let text = extracted.map_err(|err| failure(err.to_string()))?;

    let mut normalized = text.replace('\u{c}', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    Ok(normalized)
}

/// Decodes plain-text uploads: UTF-8 first, then Latin-1.
///
/// Latin-1 maps every byte to a code point, so decoding never fails and no bytes
/// are replaced.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            debug!(valid_up_to = err.valid_up_to(), "upload is not UTF-8, decoding as Latin-1");
            bytes.iter().map(|&byte| char::from(byte)).collect()
        }
    }
}
