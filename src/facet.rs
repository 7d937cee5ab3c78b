use crate::compose::ComposedMessage;
use crate::error::{AppError, Result};

/// A link over a UTF-8 byte range of the post text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFacet {
    pub byte_start: usize,
    pub byte_end: usize,
    pub target_url: String,
}

/// Builds the link facet covering the first occurrence of `label` in `text`.
///
/// Offsets are byte offsets into `text`, so any multi-byte characters before
/// the label (an ellipsis, accents, emoji) shift them accordingly.
pub fn locate_link_facet(text: &str, label: &str, target_url: &str) -> Result<LinkFacet> {
    if label.is_empty() {
        return Err(AppError::LabelNotFoundError(label.to_string()));
    }
    let byte_start = text
        .find(label)
        .ok_or_else(|| AppError::LabelNotFoundError(label.to_string()))?;
    let byte_end = byte_start + label.len();

    ::log::debug!(
        "Link facet bytes {}..{} (label at char {})",
        byte_start,
        byte_end,
        text[..byte_start].chars().count()
    );

    Ok(LinkFacet {
        byte_start,
        byte_end,
        target_url: target_url.to_string(),
    })
}

/// Facet for the call-to-action the composer appended to `message`.
///
/// The first occurrence of the label must be the appended one; an excerpt
/// that already contains the label text would otherwise get the link.
pub fn message_link_facet(
    message: &ComposedMessage,
    label: &str,
    target_url: &str,
) -> Result<LinkFacet> {
    let facet = locate_link_facet(&message.text, label, target_url)?;
    let found_char = message.text[..facet.byte_start].chars().count();
    if found_char != message.label_start_char {
        ::log::error!(
            "Label found at char {} but was appended at char {}",
            found_char,
            message.label_start_char
        );
        return Err(AppError::LabelNotFoundError(label.to_string()));
    }
    Ok(facet)
}
